//! Block palette types and construction
//!
//! A [`Palette`] maps block identifiers to representative Lab colors,
//! sampled once from block textures by [`build_palette`] and read-only
//! afterwards. The [`BlockCandidate`] trait is the seam to the host
//! environment: it supplies identifiers, collision shapes and texture
//! bytes without the core ever holding an engine object.

mod builder;
mod candidate;
mod palette;

pub use builder::{build_palette, BuildReport, PaletteBuild, SkipReason, SkippedCandidate};
pub use candidate::{BlockCandidate, Bounds, TextureError, FULL_CUBE_EPSILON};
pub use palette::{Palette, PaletteEntry};
