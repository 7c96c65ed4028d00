//! Error types for decoding.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Errors produced while decoding rasters or exporting meshes.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The image bytes could not be decoded.
    #[error("failed to decode image: {0}")]
    Image(#[from] image::ImageError),

    /// The sample buffer does not match the declared grid dimensions.
    #[error("grid of {width}x{height} does not match {actual} samples")]
    GridSizeMismatch {
        width: u32,
        height: u32,
        actual: usize,
    },

    /// Writing an export failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
