//! Conditional dilation of the initial mask.
//!
//! Strict color distance erodes thin metallic rims whose color is close to
//! the backdrop and which sit on smooth gradients without Sobel support.
//! One dilation pass gated on adjacency to existing foreground reclaims
//! them without growing into the backdrop.

use std::ops::Deref;

use image::{ImageBuffer, Rgb, Rgba};
use itertools::iproduct;

use crate::imageops_cutout::background_stats::BackgroundColor;
use crate::imageops_cutout::config::SegmentationConfig;
use crate::imageops_cutout::mask::{Mask, FOREGROUND};
use crate::imageops_cutout::mask_builder::is_gold_like;

/// Single conditional dilation pass over the mask
///
/// A background interior pixel with at least one foreground 8-neighbour is
/// promoted when it is gold-like or any channel differs from the background
/// by more than `threshold * dilation_factor`. Neighbour state is read from
/// a snapshot taken before the pass, so the result does not depend on
/// traversal order. Applying the pass twice grows the mask twice.
///
/// # Arguments
///
/// * `image` - RGBA image the mask was built from
/// * `mask` - Mask from [`build_mask`](crate::build_mask), updated in place
/// * `background` - Mean border color
/// * `threshold` - Threshold the mask was built with
/// * `config` - Provides `dilation_factor` and the gold heuristic
pub fn refine_mask<C>(
    image: &ImageBuffer<Rgba<u8>, C>,
    mask: &mut Mask,
    background: &BackgroundColor,
    threshold: f32,
    config: &SegmentationConfig,
) where
    C: Deref<Target = [u8]>,
{
    let (width, height) = mask.dimensions();
    if width < 3 || height < 3 {
        return;
    }

    let snapshot = mask.clone();
    let limit = threshold * config.dilation_factor;

    for (y, x) in iproduct!(1..height - 1, 1..width - 1) {
        if snapshot.is_foreground(x, y) || !snapshot.has_foreground_neighbor(x, y) {
            continue;
        }

        let Rgba([r, g, b, _]) = *image.get_pixel(x, y);
        let deviates = background
            .deltas(r, g, b)
            .iter()
            .any(|delta| delta.abs() > limit);

        if deviates || is_gold_like(Rgb([r, g, b]), config) {
            mask.set(x, y, FOREGROUND);
        }
    }
}
