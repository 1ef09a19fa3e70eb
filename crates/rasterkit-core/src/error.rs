//! Error type shared by every rasterkit operation.

use thiserror::Error;

use crate::format::PixelFormat;

/// Errors returned by raster operations.
///
/// Operations check their inputs before touching any pixel, so an `Err`
/// always means the destination was left unmodified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RasterError {
    /// Source and destination have different channel counts.
    ///
    /// This is a caller bug (a precondition violation), not a data problem.
    #[error("channel count mismatch: source has {src} channels, destination has {dst}")]
    ChannelMismatch { src: usize, dst: usize },

    /// A numeric pixel format code that names no known layout.
    #[error("unrecognized pixel format code {0}")]
    UnknownPixelFormat(u8),

    /// The operation is not defined for this pixel format.
    #[error("{operation} does not support pixel format {format:?}")]
    UnsupportedFormat {
        format: PixelFormat,
        operation: &'static str,
    },

    /// Only EXIF orientations 3, 6 and 8 can be undone.
    #[error("cannot unrotate EXIF orientation {0}: only 3, 6 and 8 are supported")]
    UnsupportedOrientation(u16),

    /// Width or height is zero where a non-empty image is required.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// The pixel buffer cannot hold the described image.
    #[error("buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    /// Row stride is narrower than one row of pixels.
    #[error("invalid stride {stride}: a row needs at least {min} bytes")]
    InvalidStride { stride: usize, min: usize },

    /// The resampling kernel rejected the request.
    #[error("resample failed: {0}")]
    Resample(String),

    /// The external codec or metadata reader failed.
    #[error("codec error: {0}")]
    Codec(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RasterError>;
