use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the blockprint host layer.
///
/// Core pipeline errors (`ImageError`, `DecodeError`) convert in so
/// callers deal with a single error type at this boundary.
#[derive(Debug, Error)]
pub enum BlockprintError {
    #[error("failed to read {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid manifest {}: {source}", .path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("image error: {0}")]
    Image(#[from] block_mosaic::ImageError),

    #[error("grid decode error: {0}")]
    Decode(#[from] block_mosaic::DecodeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
