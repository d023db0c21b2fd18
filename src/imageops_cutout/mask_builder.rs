//! Initial foreground mask from color distance and edge strength.
//!
//! Each interior pixel receives a score
//!
//! ```text
//! score = color_distance + min(edge_clamp, |∇I|) / edge_clamp * edge_weight
//! ```
//!
//! where `|∇I|` is the 3x3 Sobel gradient magnitude of the mean-intensity
//! image `(R + G + B) / 3`. A pixel is foreground when its score exceeds the
//! adaptive threshold. The outermost one-pixel ring stays background since
//! the kernel cannot be centred there.

use std::ops::Deref;

use image::{ImageBuffer, Luma, Rgb, Rgba};
use imageproc::definitions::Image;
use itertools::iproduct;

use crate::imageops_cutout::background_stats::BackgroundColor;
use crate::imageops_cutout::config::SegmentationConfig;
use crate::imageops_cutout::mask::{Mask, FOREGROUND};

const SOBEL_X: [[f32; 3]; 3] = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const SOBEL_Y: [[f32; 3]; 3] = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

/// Returns true if the color matches the configured warm-metal heuristic
#[inline]
pub fn is_gold_like(color: Rgb<u8>, config: &SegmentationConfig) -> bool {
    let Rgb([r, g, b]) = color;
    config.is_gold_like(r, g, b)
}

/// Weighted Euclidean distance between a color and the background
///
/// Gold-like colors use the blue-heavy weights, all others the
/// perceptual weights.
#[inline]
pub fn color_distance(
    color: Rgb<u8>,
    background: &BackgroundColor,
    config: &SegmentationConfig,
) -> f32 {
    let Rgb([r, g, b]) = color;
    let weights = config.weights_for(r, g, b);
    let [dr, dg, db] = background.deltas(r, g, b);
    (weights.r * dr * dr + weights.g * dg * dg + weights.b * db * db).sqrt()
}

/// Sobel gradient magnitude at the centre of a 3x3 intensity neighborhood
///
/// `neighborhood[row][col]`, row 0 is the top row.
#[inline]
pub fn sobel_magnitude(neighborhood: &[[f32; 3]; 3]) -> f32 {
    let (gx, gy) = iproduct!(0..3, 0..3).fold((0.0f32, 0.0f32), |(gx, gy), (row, col)| {
        let value = neighborhood[row][col];
        (gx + SOBEL_X[row][col] * value, gy + SOBEL_Y[row][col] * value)
    });
    gx.hypot(gy)
}

/// Blends color distance with the saturated edge magnitude
#[inline]
pub fn combined_score(distance: f32, edge_magnitude: f32, config: &SegmentationConfig) -> f32 {
    distance + edge_magnitude.min(config.edge_clamp) / config.edge_clamp * config.edge_weight
}

/// Mean-intensity image `(R + G + B) / 3`
fn intensity_image<C>(image: &ImageBuffer<Rgba<u8>, C>) -> Image<Luma<f32>>
where
    C: Deref<Target = [u8]>,
{
    let (width, height) = image.dimensions();
    ImageBuffer::from_fn(width, height, |x, y| {
        let Rgba([r, g, b, _]) = *image.get_pixel(x, y);
        Luma([(f32::from(r) + f32::from(g) + f32::from(b)) / 3.0])
    })
}

#[inline]
fn neighborhood(intensity: &Image<Luma<f32>>, x: u32, y: u32) -> [[f32; 3]; 3] {
    let mut window = [[0.0f32; 3]; 3];
    for (row, col) in iproduct!(0..3u32, 0..3u32) {
        window[row as usize][col as usize] = intensity.get_pixel(x + col - 1, y + row - 1)[0];
    }
    window
}

/// Sobel gradient magnitude for every pixel
///
/// Pixels on the outermost ring are zero. Useful for inspecting why a
/// region was classified as foreground.
pub fn edge_magnitude_map<C>(image: &ImageBuffer<Rgba<u8>, C>) -> Image<Luma<f32>>
where
    C: Deref<Target = [u8]>,
{
    let (width, height) = image.dimensions();
    if width < 3 || height < 3 {
        return ImageBuffer::new(width, height);
    }

    let intensity = intensity_image(image);
    ImageBuffer::from_fn(width, height, |x, y| {
        if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
            Luma([0.0])
        } else {
            Luma([sobel_magnitude(&neighborhood(&intensity, x, y))])
        }
    })
}

/// Classifies every interior pixel by its combined color and edge score
///
/// # Arguments
///
/// * `image` - RGBA image, the alpha channel is ignored
/// * `background` - Mean border color
/// * `threshold` - Score a pixel must exceed to become foreground
/// * `config` - Channel weights, gold heuristic and edge weighting
///
/// # Returns
///
/// A mask of the image's dimensions. The outermost ring, and every pixel of
/// an image with a side shorter than 3, is background.
pub fn build_mask<C>(
    image: &ImageBuffer<Rgba<u8>, C>,
    background: &BackgroundColor,
    threshold: f32,
    config: &SegmentationConfig,
) -> Mask
where
    C: Deref<Target = [u8]>,
{
    let (width, height) = image.dimensions();
    let mut mask = Mask::new(width, height);
    if width < 3 || height < 3 {
        return mask;
    }

    let intensity = intensity_image(image);
    for (y, x) in iproduct!(1..height - 1, 1..width - 1) {
        let Rgba([r, g, b, _]) = *image.get_pixel(x, y);
        let distance = color_distance(Rgb([r, g, b]), background, config);
        let edge = sobel_magnitude(&neighborhood(&intensity, x, y));

        if combined_score(distance, edge, config) > threshold {
            mask.set(x, y, FOREGROUND);
        }
    }

    mask
}
