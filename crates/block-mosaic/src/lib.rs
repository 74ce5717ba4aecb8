//! block-mosaic: perceptual image-to-block-palette quantization
//!
//! This library turns a raster image into a grid of block identifiers
//! drawn from a palette of block-texture colors, and packs that grid into
//! a compact binary stream for transport to whatever places the blocks.
//!
//! # Quick Start
//!
//! ```
//! use block_mosaic::{
//!     encode_grid, decode_grid, BlockPos, Lab, Palette, PaletteEntry, PixelImage,
//!     Quantizer, Rgba,
//! };
//!
//! let palette = Palette::from_entries([
//!     PaletteEntry::new("mosaic:coal", Lab::new(5.0, 0.0, 0.0)),
//!     PaletteEntry::new("mosaic:snow", Lab::new(97.0, 0.0, 0.0)),
//! ]);
//! let quantizer = Quantizer::new(palette);
//!
//! let pixels = vec![Rgba::opaque(20, 20, 20), Rgba::opaque(240, 240, 240)];
//! let grid = quantizer.quantize(&PixelImage::from_pixels(pixels, 2, 1));
//! assert_eq!(grid.get(0, 0), "mosaic:coal");
//!
//! let bytes = encode_grid(BlockPos::new(0, 64, 0), &grid);
//! let (_, decoded) = decode_grid(&bytes).unwrap();
//! assert_eq!(decoded, grid);
//! ```
//!
//! # Pipeline Overview
//!
//! ```text
//! block registry + textures        (host environment, once at startup)
//!     |
//!     v
//! build_palette()                  full-cube filter, alpha-aware average,
//!     |                            sRGB -> XYZ -> Lab per candidate
//!     v
//! Palette                          immutable, identifier -> Lab
//!     |
//! image bytes --> PixelImage       (PNG decode)
//!     |               |
//!     v               v
//! Quantizer::quantize()            per pixel: Lab + CIEDE2000 linear scan
//!     |
//!     v
//! QuantizedGrid                    height x width identifiers
//!     |
//!     v
//! encode_grid() / decode_grid()    varint-framed packet across the wire
//! ```
//!
//! # Color Science
//!
//! Matching happens in CIE Lab with the CIEDE2000 difference formula, not
//! in RGB. Raw RGB distance is badly non-uniform: it over-weights dark
//! tones and cannot rank hue differences the way eyes do, which matters
//! when the palette is a few hundred block textures rather than a dense
//! gamut. Lab + CIEDE2000 keeps "nearest block" aligned with what a
//! viewer standing in front of the finished mosaic would pick.
//!
//! Palette colors are each block texture's average over its sufficiently
//! opaque pixels (alpha >= 128). Transparent texels are background, not
//! color: averaging them in would drag every leaf and glass block toward
//! black. A texture with no opaque pixels at all gets a magenta sentinel
//! so the degenerate entry is obvious on sight.
//!
//! # Determinism
//!
//! For a fixed palette the whole pipeline is deterministic: conversions
//! are pure `f64` math, the nearest-match scan runs in palette insertion
//! order and only a strictly smaller distance wins, so exact ties keep
//! the first-inserted entry. Candidate sampling and pixel rows run on a
//! rayon pool, but order-preserving collects keep parallelism invisible
//! in the output.

pub mod color;
pub mod image;
pub mod palette;
pub mod quantize;
pub mod wire;


pub use color::{delta_e2000, Lab, Rgb, Rgba};
pub use image::{ImageError, PixelImage};
pub use palette::{
    build_palette, BlockCandidate, Bounds, BuildReport, Palette, PaletteBuild, PaletteEntry,
    SkipReason, SkippedCandidate, TextureError, FULL_CUBE_EPSILON,
};
pub use quantize::{Quantizer, DEFAULT_FALLBACK};
pub use wire::{
    decode_grid, encode_grid, BlockPos, DecodeError, QuantizedGrid, MAX_GRID_CELLS,
    MAX_IDENTIFIER_LEN,
};
