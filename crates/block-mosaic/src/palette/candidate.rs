//! Candidate seam: what the host environment supplies per block

use thiserror::Error;

use crate::image::ImageError;

/// Per-axis tolerance when testing a collision box against the unit cube.
pub const FULL_CUBE_EPSILON: f64 = 1e-6;

/// Axis-aligned collision bounding box of a candidate, in block-local
/// coordinates where the unit cube spans `[0,0,0]` to `[1,1,1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Minimum corner (x, y, z).
    pub min: [f64; 3],
    /// Maximum corner (x, y, z).
    pub max: [f64; 3],
}

impl Bounds {
    /// The full unit cube.
    pub const UNIT: Bounds = Bounds {
        min: [0.0; 3],
        max: [1.0; 3],
    };

    /// Create a bounding box from its corners.
    pub const fn new(min: [f64; 3], max: [f64; 3]) -> Self {
        Self { min, max }
    }

    /// True when the box fills the unit volume within
    /// [`FULL_CUBE_EPSILON`] on every axis.
    ///
    /// This is the palette eligibility test: doors, fences, slabs and other
    /// partial shapes fail it.
    pub fn is_unit_cube(&self) -> bool {
        self.min.iter().all(|v| v.abs() < FULL_CUBE_EPSILON)
            && self.max.iter().all(|v| (v - 1.0).abs() < FULL_CUBE_EPSILON)
    }
}

/// Failure to obtain a decoded texture for one candidate.
///
/// Never fatal to palette construction: the candidate is skipped and the
/// failure recorded in the [`BuildReport`](super::BuildReport).
#[derive(Debug, Error)]
pub enum TextureError {
    /// The texture bytes could not be fetched from the host resource system.
    #[error("texture fetch failed: {0}")]
    Fetch(String),

    /// The fetched bytes could not be decoded.
    #[error("texture decode failed: {0}")]
    Decode(#[from] ImageError),
}

/// A palette candidate as seen by [`build_palette`](super::build_palette).
///
/// Implemented by the host glue (a registry enumeration, a manifest file);
/// the core only ever sees identifier strings, shape descriptors and raw
/// texture bytes.
pub trait BlockCandidate {
    /// Stable identifier, conventionally namespaced (`"minecraft:stone"`).
    fn identifier(&self) -> &str;

    /// Collision bounding box, or `None` when the candidate has no
    /// collision volume at all.
    fn collision_bounds(&self) -> Option<Bounds>;

    /// True for air-like candidates that occupy no material space.
    fn is_void(&self) -> bool;

    /// Raw encoded texture bytes (PNG) for this candidate.
    fn texture_bytes(&self) -> Result<Vec<u8>, TextureError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_cube_accepts_exact_and_epsilon() {
        assert!(Bounds::UNIT.is_unit_cube());
        let wobbly = Bounds::new([1e-9, 0.0, -1e-9], [1.0 - 1e-9, 1.0, 1.0 + 1e-9]);
        assert!(wobbly.is_unit_cube());
    }

    #[test]
    fn test_unit_cube_rejects_partial_shapes() {
        // Slab: half height.
        assert!(!Bounds::new([0.0; 3], [1.0, 0.5, 1.0]).is_unit_cube());
        // Fence post: narrow footprint.
        assert!(!Bounds::new([0.375, 0.0, 0.375], [0.625, 1.5, 0.625]).is_unit_cube());
        // Off-axis full-size box.
        assert!(!Bounds::new([0.25, 0.0, 0.0], [1.25, 1.0, 1.0]).is_unit_cube());
    }
}
