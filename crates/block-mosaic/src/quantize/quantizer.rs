//! Quantizer: palette-owning matcher, reusable across images

use rayon::prelude::*;

use crate::color::{delta_e2000, Lab, Rgb};
use crate::image::PixelImage;
use crate::palette::Palette;
use crate::wire::QuantizedGrid;

/// Identifier assigned when no palette entry can be matched (empty
/// palette), conventionally an air/empty marker.
pub const DEFAULT_FALLBACK: &str = "air";

/// Maps image pixels to block identifiers via CIEDE2000 nearest match.
///
/// # Design
///
/// - Constructor takes an owned [`Palette`]; quantization borrows `&self`,
///   so one quantizer serves any number of images (and any number of
///   threads: the palette is read-only).
/// - The nearest match is "minimum CIEDE2000, first-inserted wins on an
///   exact tie": the scan updates only on a strictly smaller distance, so
///   palette insertion order is the tie-break order. Results are fully
///   deterministic for a fixed palette.
/// - The source image's own alpha channel is ignored; transparency
///   filtering applies to palette *textures*, not to quantization input.
///
/// # Example
///
/// ```
/// use block_mosaic::{Lab, Palette, PaletteEntry, PixelImage, Quantizer, Rgba};
///
/// let palette = Palette::from_entries([
///     PaletteEntry::new("mosaic:black", Lab::new(0.0, 0.0, 0.0)),
///     PaletteEntry::new("mosaic:white", Lab::new(100.0, 0.0, 0.0)),
/// ]);
/// let quantizer = Quantizer::new(palette);
///
/// let image = PixelImage::from_pixels(vec![Rgba::opaque(250, 250, 250)], 1, 1);
/// let grid = quantizer.quantize(&image);
/// assert_eq!(grid.get(0, 0), "mosaic:white");
/// ```
pub struct Quantizer {
    palette: Palette,
    fallback: String,
}

impl Quantizer {
    /// Create a quantizer over the given palette.
    ///
    /// The fallback identifier defaults to [`DEFAULT_FALLBACK`].
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            fallback: DEFAULT_FALLBACK.to_owned(),
        }
    }

    /// Override the fallback identifier used when the palette is empty.
    pub fn with_fallback(mut self, identifier: impl Into<String>) -> Self {
        self.fallback = identifier.into();
        self
    }

    /// The palette this quantizer matches against.
    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Quantize an image into a grid of block identifiers.
    ///
    /// Rows are processed on the rayon worker pool; per-pixel results are
    /// independent and the row collect preserves order, so parallelism is
    /// unobservable in the output. Cost is O(pixels x palette size)
    /// distance evaluations.
    pub fn quantize(&self, image: &PixelImage) -> QuantizedGrid {
        let width = image.width();
        let height = image.height();

        let rows: Vec<Vec<String>> = (0..height)
            .into_par_iter()
            .map(|y| {
                image
                    .row(y)
                    .iter()
                    .map(|px| self.match_pixel(px.rgb()))
                    .collect()
            })
            .collect();

        let mut cells = Vec::with_capacity(width * height);
        for row in rows {
            cells.extend(row);
        }
        QuantizedGrid::new(width, height, cells)
    }

    /// Nearest palette identifier for one pixel color.
    fn match_pixel(&self, rgb: Rgb) -> String {
        let lab = Lab::from(rgb);

        let mut best: Option<usize> = None;
        let mut best_dist = f64::INFINITY;

        for (i, entry) in self.palette.entries().iter().enumerate() {
            let dist = delta_e2000(lab, entry.lab());
            // Strict comparison: an equal distance keeps the earlier entry.
            if dist < best_dist {
                best_dist = dist;
                best = Some(i);
            }
        }

        match best {
            Some(i) => self.palette.entries()[i].identifier().to_owned(),
            None => self.fallback.clone(),
        }
    }
}
