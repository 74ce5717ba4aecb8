//! CIE L*a*b* color type and the sRGB -> XYZ -> Lab conversion chain
//!
//! Lab is the space where palette matching happens: distances computed
//! with CIEDE2000 in Lab correlate with human-perceived color difference,
//! unlike raw RGB distances which over-weight dark tones.
//!
//! The conversion uses the standard D65 sRGB matrix and D65 reference
//! white, in `f64` throughout so the same input always produces the same
//! bit pattern.

use super::rgb::Rgb;

/// D65 reference white.
const REF_WHITE_X: f64 = 0.95047;
const REF_WHITE_Y: f64 = 1.0;
const REF_WHITE_Z: f64 = 1.08883;

/// A color in CIE L*a*b* space.
///
/// # Components
///
/// - `l`: Lightness, 0.0 (black) to 100.0 (white); clamped at 0 from below
/// - `a`: Green-red axis (negative = green, positive = red)
/// - `b`: Blue-yellow axis (negative = blue, positive = yellow)
///
/// `a` and `b` are unbounded in principle but stay small (roughly -128..128)
/// for colors reachable from 8-bit sRGB.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    /// Lightness: 0.0 (black) to 100.0 (white)
    pub l: f64,
    /// Green-red axis
    pub a: f64,
    /// Blue-yellow axis
    pub b: f64,
}

impl Lab {
    /// Create a new Lab color.
    ///
    /// # Example
    ///
    /// ```
    /// use block_mosaic::Lab;
    /// let mid = Lab::new(50.0, 0.0, 0.0);
    /// assert_eq!(mid.l, 50.0);
    /// ```
    #[inline]
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// Chroma magnitude `sqrt(a^2 + b^2)`.
    #[inline]
    pub fn chroma(self) -> f64 {
        (self.a * self.a + self.b * self.b).sqrt()
    }
}

impl From<Rgb> for Lab {
    /// Convert an 8-bit sRGB color to Lab.
    ///
    /// Composition of the sRGB inverse gamma, the D65 sRGB->XYZ matrix and
    /// the XYZ->Lab pivot. Pure and deterministic: the same `Rgb` always
    /// yields a bit-identical `Lab`.
    ///
    /// # Example
    ///
    /// ```
    /// use block_mosaic::{Lab, Rgb};
    ///
    /// let white = Lab::from(Rgb::new(255, 255, 255));
    /// assert!((white.l - 100.0).abs() < 1e-6);
    /// ```
    fn from(rgb: Rgb) -> Self {
        let (x, y, z) = rgb_to_xyz(rgb);
        xyz_to_lab(x, y, z)
    }
}

/// sRGB inverse gamma (IEC 61966-2-1 decoding curve).
#[inline]
fn pivot_srgb(n: f64) -> f64 {
    if n <= 0.04045 {
        n / 12.92
    } else {
        ((n + 0.055) / 1.055).powf(2.4)
    }
}

/// Linearize 8-bit sRGB channels and apply the D65 sRGB->XYZ matrix.
fn rgb_to_xyz(rgb: Rgb) -> (f64, f64, f64) {
    let r = pivot_srgb(rgb.r as f64 / 255.0);
    let g = pivot_srgb(rgb.g as f64 / 255.0);
    let b = pivot_srgb(rgb.b as f64 / 255.0);

    let x = r * 0.4124 + g * 0.3576 + b * 0.1805;
    let y = r * 0.2126 + g * 0.7152 + b * 0.0722;
    let z = r * 0.0193 + g * 0.1192 + b * 0.9505;

    (x, y, z)
}

/// Lab pivot: cube root above the CIE threshold, linear segment below.
#[inline]
fn pivot_xyz(t: f64) -> f64 {
    if t > 0.008856 {
        t.cbrt()
    } else {
        7.787 * t + 16.0 / 116.0
    }
}

fn xyz_to_lab(x: f64, y: f64, z: f64) -> Lab {
    let fx = pivot_xyz(x / REF_WHITE_X);
    let fy = pivot_xyz(y / REF_WHITE_Y);
    let fz = pivot_xyz(z / REF_WHITE_Z);

    Lab {
        l: (116.0 * fy - 16.0).max(0.0),
        a: 500.0 * (fx - fy),
        b: 200.0 * (fy - fz),
    }
}
