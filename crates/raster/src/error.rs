//! Error types for raster decoding and construction.

use thiserror::Error;

/// Errors that can occur while building, reading or writing raster images.
#[derive(Error, Debug)]
pub enum RasterError {
    /// Underlying file I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The PNM codec rejected the header or the pixel data.
    #[error("PPM codec error: {0}")]
    Codec(#[from] ::image::ImageError),

    /// The header parsed but describes an image this crate cannot hold.
    #[error("invalid PPM header: {0}")]
    InvalidHeader(String),

    /// A PNM variant other than the `P3`/`P6` pixel maps.
    #[error("unsupported PPM format: {0}")]
    UnsupportedFormat(String),

    /// Only 8-bit RGB channels (maxval up to 255) are supported.
    #[error("unsupported channel layout {0}, expected 8-bit RGB")]
    UnsupportedDepth(String),

    /// The declared raster is larger than the input could possibly hold.
    #[error("header declares {expected} sample bytes but the input is only {available} bytes")]
    Truncated { expected: u64, available: usize },

    /// Dimensions exceed what the codec can encode.
    #[error("image {width}x{height} is too large to encode")]
    TooLarge { width: usize, height: usize },

    /// Pixel buffer length does not match the declared dimensions.
    #[error("pixel buffer holds {len} pixels but image is {width}x{height}")]
    DimensionMismatch {
        width: usize,
        height: usize,
        len: usize,
    },
}

impl RasterError {
    /// Create an InvalidHeader error.
    pub fn invalid_header(msg: impl Into<String>) -> Self {
        Self::InvalidHeader(msg.into())
    }
}

/// Result type for raster operations.
pub type Result<T> = std::result::Result<T, RasterError>;
