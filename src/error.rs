use thiserror::Error;

/// Error type for background removal operations
///
/// The numeric stages of the pipeline never fail. Errors only arise from
/// inputs that cannot describe a valid image or from invalid tuning values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CutoutError {
    /// Image and mask dimensions do not match
    ///
    /// This error occurs when a mask produced for one image is
    /// composited onto an image of a different size.
    #[error("Image and mask dimensions do not match: expected {expected:?}, actual {actual:?}")]
    DimensionMismatch {
        /// Expected dimensions (width, height)
        expected: (u32, u32),
        /// Actual dimensions (width, height)
        actual: (u32, u32),
    },

    /// Raw RGBA buffer length does not equal `width * height * 4`
    #[error("RGBA buffer length mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch {
        /// Expected buffer length in bytes
        expected: usize,
        /// Actual buffer length in bytes
        actual: usize,
    },

    /// Invalid tuning parameter
    ///
    /// Returned when a configuration value is negative, non-finite,
    /// or outside the range the operation accepts.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}
