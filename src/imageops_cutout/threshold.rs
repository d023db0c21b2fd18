use crate::imageops_cutout::config::SegmentationConfig;

/// Foreground separation threshold adapted to background noise
///
/// `base_threshold + sqrt(variance) * variance_multiplier`. A noisy or
/// graded backdrop widens the threshold.
#[inline]
pub fn adaptive_threshold(variance: f32, config: &SegmentationConfig) -> f32 {
    config.base_threshold + variance.max(0.0).sqrt() * config.variance_multiplier
}
