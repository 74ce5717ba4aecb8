//! Color types and conversion utilities
//!
//! This module provides the color pipeline used for palette matching:
//! 8-bit sRGB pixel values are converted through CIE XYZ into CIE Lab,
//! where perceptual distances are computed with CIEDE2000.
//!
//! # Color Spaces
//!
//! - **sRGB** ([`Rgb`], [`Rgba`]): The storage space of textures and input
//!   images. Use for I/O only; never compute distances here.
//! - **CIE Lab** ([`Lab`]): Perceptually oriented space. All palette
//!   matching happens here via [`delta_e2000`].
//!
//! # Example
//!
//! ```
//! use block_mosaic::{Lab, Rgb, delta_e2000};
//!
//! let stone = Lab::from(Rgb::new(125, 125, 125));
//! let coal = Lab::from(Rgb::new(16, 15, 15));
//! assert!(delta_e2000(stone, coal) > 0.0);
//! ```

mod delta_e;
mod lab;
mod rgb;

pub use delta_e::delta_e2000;
pub use lab::Lab;
pub use rgb::{Rgb, Rgba};
