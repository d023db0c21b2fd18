//! Internal utility functions for imageops-cutout.
//!
//! This module contains input checks shared by the pipeline entry points.

use crate::error::CutoutError;

/// Smallest side length a 3x3 neighborhood can be centred in
pub const MIN_SEGMENTABLE_SIDE: u32 = 3;

/// Returns true if the image is too small to segment.
///
/// # Arguments
///
/// * `width` - The width of the image
/// * `height` - The height of the image
#[inline]
pub const fn is_degenerate(width: u32, height: u32) -> bool {
    width < MIN_SEGMENTABLE_SIDE || height < MIN_SEGMENTABLE_SIDE
}

/// Computes the byte length of a `width x height` RGBA buffer.
///
/// # Arguments
///
/// * `width` - The width of the image
/// * `height` - The height of the image
///
/// # Returns
///
/// The expected length in bytes, or `CutoutError::InvalidParameter` if it overflows `usize`
pub fn rgba_buffer_len(width: u32, height: u32) -> Result<usize, CutoutError> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(4))
        .ok_or_else(|| {
            CutoutError::InvalidParameter(format!("image size {width}x{height} overflows usize"))
        })
}
