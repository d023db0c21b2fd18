//! Background color statistics over the border samples.
//!
//! The mean color becomes the reference every pixel is compared against.
//! The variance measures how noisy or graded the backdrop is and widens
//! the separation threshold accordingly.

use image::Rgb;

use crate::imageops_cutout::border_sampler::ColorSample;

/// Mean color of the sampled border
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BackgroundColor {
    /// Mean red channel value in `[0, 255]`
    pub r: f32,
    /// Mean green channel value in `[0, 255]`
    pub g: f32,
    /// Mean blue channel value in `[0, 255]`
    pub b: f32,
}

impl BackgroundColor {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Per-channel signed differences `pixel - background`
    #[inline]
    pub fn deltas(&self, r: u8, g: u8, b: u8) -> [f32; 3] {
        [
            f32::from(r) - self.r,
            f32::from(g) - self.g,
            f32::from(b) - self.b,
        ]
    }
}

/// Arithmetic mean of the samples per channel
///
/// # Arguments
///
/// * `samples` - Border samples from [`sample_border`](crate::sample_border)
///
/// # Returns
///
/// The per-channel mean, or black for an empty sample set
pub fn average_color(samples: &[ColorSample]) -> BackgroundColor {
    if samples.is_empty() {
        return BackgroundColor::default();
    }

    let sums = samples.iter().fold([0u64; 3], |mut acc, Rgb([r, g, b])| {
        acc[0] += u64::from(*r);
        acc[1] += u64::from(*g);
        acc[2] += u64::from(*b);
        acc
    });

    let count = samples.len() as f64;
    BackgroundColor::new(
        (sums[0] as f64 / count) as f32,
        (sums[1] as f64 / count) as f32,
        (sums[2] as f64 / count) as f32,
    )
}

/// Mean squared Euclidean distance of the samples from `average`
///
/// # Arguments
///
/// * `samples` - Border samples the average was computed from
/// * `average` - Mean color of `samples`
///
/// # Returns
///
/// `sum((r - avg.r)^2 + (g - avg.g)^2 + (b - avg.b)^2) / n`, or zero for
/// fewer than two samples
pub fn color_variance(samples: &[ColorSample], average: &BackgroundColor) -> f32 {
    if samples.len() < 2 {
        return 0.0;
    }

    let total: f64 = samples
        .iter()
        .map(|Rgb([r, g, b])| {
            average
                .deltas(*r, *g, *b)
                .iter()
                .map(|d| f64::from(*d) * f64::from(*d))
                .sum::<f64>()
        })
        .sum();

    (total / samples.len() as f64) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_of_empty_is_black() {
        assert_eq!(average_color(&[]), BackgroundColor::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn average_is_per_channel_mean() {
        let samples = [Rgb([0, 100, 200]), Rgb([100, 200, 0])];
        assert_eq!(average_color(&samples), BackgroundColor::new(50.0, 150.0, 100.0));
    }

    #[test]
    fn variance_of_single_sample_is_zero() {
        let samples = [Rgb([10, 20, 30])];
        let avg = average_color(&samples);
        assert_eq!(color_variance(&samples, &avg), 0.0);
        assert_eq!(color_variance(&[], &avg), 0.0);
    }

    #[test]
    fn variance_sums_channel_deviations() {
        // Each sample deviates by 10 in every channel: 3 * 100
        let samples = [Rgb([90, 90, 90]), Rgb([110, 110, 110])];
        let avg = average_color(&samples);
        assert_eq!(avg, BackgroundColor::new(100.0, 100.0, 100.0));
        assert!((color_variance(&samples, &avg) - 300.0).abs() < 1e-3);
    }

    #[test]
    fn uniform_samples_have_zero_variance() {
        let samples = vec![Rgb([37, 37, 200]); 64];
        let avg = average_color(&samples);
        assert_eq!(color_variance(&samples, &avg), 0.0);
    }
}
