//! PixelImage buffer and PNG decoding

use super::error::ImageError;
use crate::color::Rgba;

/// A decoded raster image: width x height RGBA pixels, row-major.
///
/// The buffer is owned by the caller and only ever read by the pipeline:
/// the palette builder samples it, the quantizer scans it. Pixels without
/// an alpha channel in the source file decode as fully opaque.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelImage {
    width: usize,
    height: usize,
    pixels: Vec<Rgba>,
}

impl PixelImage {
    /// Create a `PixelImage` from raw pixels.
    ///
    /// # Panics (debug only)
    ///
    /// Debug-asserts that `pixels.len() == width * height`.
    pub fn from_pixels(pixels: Vec<Rgba>, width: usize, height: usize) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width * height,
            "pixel count ({}) must match width * height ({width}x{height}={})",
            pixels.len(),
            width * height,
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Decode PNG bytes into an RGBA pixel buffer.
    ///
    /// Every PNG color type is normalized to 8-bit RGBA: greyscale and RGB
    /// gain an opaque alpha channel, indexed images are expanded through
    /// their palette, 16-bit channels are stripped to 8.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::Decode`] for malformed or truncated streams.
    pub fn decode_png(bytes: &[u8]) -> Result<Self, ImageError> {
        let mut decoder = png::Decoder::new(bytes);
        decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
        let mut reader = decoder.read_info()?;

        let mut buf = vec![0u8; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf)?;
        let data = &buf[..info.buffer_size()];

        let pixels: Vec<Rgba> = match info.color_type {
            png::ColorType::Rgba => data
                .chunks_exact(4)
                .map(|p| Rgba::new(p[0], p[1], p[2], p[3]))
                .collect(),
            png::ColorType::Rgb => data
                .chunks_exact(3)
                .map(|p| Rgba::opaque(p[0], p[1], p[2]))
                .collect(),
            png::ColorType::GrayscaleAlpha => data
                .chunks_exact(2)
                .map(|p| Rgba::new(p[0], p[0], p[0], p[1]))
                .collect(),
            png::ColorType::Grayscale => data.iter().map(|&v| Rgba::opaque(v, v, v)).collect(),
            // EXPAND resolves indexed images before we see them.
            other => return Err(ImageError::UnsupportedColorType(other)),
        };

        Ok(Self::from_pixels(
            pixels,
            info.width as usize,
            info.height as usize,
        ))
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// All pixels, row-major.
    #[inline]
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// One row of pixels.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: usize) -> &[Rgba] {
        &self.pixels[y * self.width..(y + 1) * self.width]
    }

    /// The pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is out of bounds.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Rgba {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        self.pixels[y * self.width + x]
    }
}
