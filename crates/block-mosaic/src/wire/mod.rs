//! Grid wire format: compact binary packets for quantized grids
//!
//! The packet layout, in stream order:
//!
//! ```text
//! origin x, y, z      3 x zigzag varint (i32) -- opaque, passed through
//! height              unsigned varint
//! [height == 0]       stream ends here
//! width               unsigned varint
//! cells               height x width tokens, row-major (y outer, x inner)
//!                     each token = unsigned varint byte length + UTF-8
//!                     identifier ("namespace:key")
//! ```
//!
//! Varints are LEB128: 7 value bits per byte, high bit set on
//! continuation bytes, least-significant group first. Signed values use
//! zigzag mapping (0, -1, 1, -2, ...) before the unsigned encoding.
//! Encode and decode are exactly symmetric; decoding fails rather than
//! truncating when the stream ends before the declared number of tokens.

mod codec;
mod error;
mod grid;

pub use codec::{decode_grid, encode_grid, MAX_GRID_CELLS, MAX_IDENTIFIER_LEN};
pub use error::DecodeError;
pub use grid::{BlockPos, QuantizedGrid};
