//! Error type for grid packet decoding

use thiserror::Error;

/// Errors produced by [`decode_grid`](super::decode_grid).
///
/// Decoding never returns a partially populated grid: any of these means
/// the whole packet is rejected.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The stream ended before the declared content was read.
    #[error("unexpected end of stream")]
    UnexpectedEof,

    /// A varint ran past the 64-bit limit.
    #[error("varint exceeds 64 bits")]
    VarIntTooLong,

    /// An identifier token declared an implausible length.
    #[error("identifier too long: {len} bytes (max 32767)")]
    IdentifierTooLong {
        /// Declared token length.
        len: u64,
    },

    /// Declared dimensions multiply out to an implausible cell count.
    #[error("grid too large: {cells} cells (max 16777216)")]
    GridTooLarge {
        /// Declared cell count.
        cells: u64,
    },

    /// An identifier token is not valid UTF-8.
    #[error("identifier is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}
