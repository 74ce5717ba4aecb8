//! Pixel buffers and texture decoding
//!
//! [`PixelImage`] is the in-memory form of both block textures (sampled
//! during palette construction) and user images (quantized against the
//! palette). Decoding goes through the `png` crate with transformations
//! that normalize every bit depth and color type to 8-bit RGBA.

mod error;
mod pixel_image;

pub use error::ImageError;
pub use pixel_image::PixelImage;
