//! Rotation error codes.

use thiserror::Error;

/// Result type used throughout the crate.
pub type RotateResult<T> = Result<T, RotateError>;

/// Error codes for raster access, rotation and image I/O.
#[derive(Debug, Error)]
pub enum RotateError {
    /// A raster dimension was zero.
    #[error("Invalid raster size {width}x{height}")]
    InvalidSize {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },
    /// The row stride is shorter than a row.
    #[error("Row stride {stride} is smaller than width {width}")]
    InvalidStride {
        /// Requested stride.
        stride: usize,
        /// Raster width.
        width: usize,
    },
    /// The sample buffer does not match the raster size.
    #[error("Buffer holds {found} samples, expected {expected}")]
    BufferLength {
        /// `width * height`.
        expected: usize,
        /// Length of the supplied buffer.
        found: usize,
    },
    /// A pixel access fell outside the raster.
    #[error("Pixel ({x}, {y}) is outside the {width}x{height} raster")]
    OutOfBounds {
        /// Column of the access.
        x: usize,
        /// Row of the access.
        y: usize,
        /// Raster width.
        width: usize,
        /// Raster height.
        height: usize,
    },
    /// Source and destination rasters have different dimensions.
    #[error("Shape mismatch: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        /// `(width, height)` of the source.
        expected: (usize, usize),
        /// `(width, height)` of the destination.
        found: (usize, usize),
    },
    /// The rotation angle is NaN or infinite.
    #[error("Rotation angle must be finite, got {0}")]
    InvalidAngle(f64),
    /// The image file is malformed or not single-channel 8-bit.
    #[error("Format error: {0}")]
    Format(String),
    /// The image file could not be read or written.
    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(feature = "image")]
impl From<image::ImageError> for RotateError {
    fn from(err: image::ImageError) -> Self {
        match err {
            // Decoders report data that ends early as an I/O error.
            image::ImageError::IoError(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                RotateError::Format(format!("Truncated image data: {e}"))
            }
            image::ImageError::IoError(e) => RotateError::Io(e),
            other => RotateError::Format(other.to_string()),
        }
    }
}
