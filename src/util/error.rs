//! Error types for pupilcore.

use thiserror::Error;

/// Result alias for pupilcore operations.
pub type PupilResult<T> = std::result::Result<T, PupilError>;

/// Errors raised when inputs violate the calling contract.
///
/// Degenerate pupil hypotheses are not errors; estimators report them as
/// `None` scores instead.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PupilError {
    /// Width or height is zero, or their product overflows.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Row stride is smaller than the row width.
    #[error("invalid stride {stride} for width {width}")]
    InvalidStride { width: usize, stride: usize },
    /// Backing buffer cannot hold the described image.
    #[error("buffer too small: needed {needed} elements, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// Requested region does not fit inside the image.
    #[error(
        "roi ({x}, {y}, {width}x{height}) out of bounds for {img_width}x{img_height} image"
    )]
    RoiOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        img_width: usize,
        img_height: usize,
    },
    /// Two images that must share a size do not.
    #[error("dimension mismatch: expected {expected_width}x{expected_height}, got {width}x{height}")]
    DimensionMismatch {
        expected_width: usize,
        expected_height: usize,
        width: usize,
        height: usize,
    },
    /// A configuration value is outside its valid range.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: &'static str,
    },
    /// Image decoding failed (image-io feature).
    #[error("image io: {reason}")]
    ImageIo { reason: String },
}
