//! Error type for image decoding

use thiserror::Error;

/// Error decoding raw image bytes into a [`PixelImage`](super::PixelImage).
///
/// Palette construction treats this as a per-candidate skip; quantization
/// treats it as fatal for the call.
#[derive(Debug, Error)]
pub enum ImageError {
    /// The PNG stream is malformed or truncated.
    #[error("PNG decode error: {0}")]
    Decode(#[from] png::DecodingError),

    /// The decoder produced a color type the normalization does not cover.
    #[error("unsupported PNG color type: {0:?}")]
    UnsupportedColorType(png::ColorType),
}
