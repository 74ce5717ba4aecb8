//! Image quantization: nearest palette entry per pixel
//!
//! Every pixel of an input image is converted to Lab and matched against
//! the palette by CIEDE2000 distance. The scan is a plain linear pass in
//! palette insertion order; with the palette sizes this pipeline sees
//! (hundreds of entries), that beats any spatial index worth maintaining.

mod quantizer;

pub use quantizer::{Quantizer, DEFAULT_FALLBACK};
