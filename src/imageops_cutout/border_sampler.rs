//! Background color sampling from the image border.
//!
//! The object is assumed not to touch a band of `b` pixels along the image
//! border, where
//!
//! ```text
//! b = max(min_border, floor(border_fraction * min(width, height)))
//! ```
//!
//! Every pixel in that band is taken as a background sample.

use std::ops::Deref;

use image::{ImageBuffer, Rgb, Rgba};
use itertools::iproduct;

use crate::imageops_cutout::config::SegmentationConfig;

/// Color sampled from the border band
pub type ColorSample = Rgb<u8>;

/// Computes the border band thickness
///
/// # Arguments
///
/// * `width` - The width of the image
/// * `height` - The height of the image
/// * `config` - Provides `border_fraction` and `min_border`
///
/// # Returns
///
/// `max(min_border, floor(border_fraction * min(width, height)))` in pixels
#[inline]
pub fn border_thickness(width: u32, height: u32, config: &SegmentationConfig) -> u32 {
    let scaled = (config.border_fraction * width.min(height) as f32).floor() as u32;
    scaled.max(config.min_border)
}

/// Collects background color samples from the border band of an image
///
/// The top and bottom `b` rows are sampled in full. The left and right `b`
/// columns are sampled only for the rows in between, so corners are not
/// counted twice. Images narrower than `2 * b` are sampled as far as
/// they extend; overlapping bands are not an error.
///
/// # Arguments
///
/// * `image` - RGBA image, the alpha channel is ignored
/// * `config` - Provides the band thickness parameters
///
/// # Returns
///
/// Samples in scan order: top and bottom rows first, then left and right
/// columns. Empty for a zero-area image.
pub fn sample_border<C>(
    image: &ImageBuffer<Rgba<u8>, C>,
    config: &SegmentationConfig,
) -> Vec<ColorSample>
where
    C: Deref<Target = [u8]>,
{
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let band = border_thickness(width, height, config);
    let rows = band.min(height);
    let cols = band.min(width);
    let side_rows = band..height.saturating_sub(band);

    let mut samples = Vec::with_capacity(
        2 * (rows as usize * width as usize) + 2 * (side_rows.len() * cols as usize),
    );

    for (y, x) in iproduct!(0..rows, 0..width) {
        samples.push(rgb_at(image, x, y));
        samples.push(rgb_at(image, x, height - 1 - y));
    }

    for (y, x) in iproduct!(side_rows, 0..cols) {
        samples.push(rgb_at(image, x, y));
        samples.push(rgb_at(image, width - 1 - x, y));
    }

    samples
}

#[inline]
fn rgb_at<C>(image: &ImageBuffer<Rgba<u8>, C>, x: u32, y: u32) -> ColorSample
where
    C: Deref<Target = [u8]>,
{
    let Rgba([r, g, b, _]) = *image.get_pixel(x, y);
    Rgb([r, g, b])
}
