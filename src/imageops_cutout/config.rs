//! Tuning parameters for background removal.
//!
//! All defaults are tuned for photographed watches and similar metallic
//! objects on plain or near-plain backgrounds.

use crate::error::CutoutError;

/// Per-channel weights used by the weighted color distance
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelWeights {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl ChannelWeights {
    /// Luma-like weighting used for ordinary pixels
    pub const PERCEPTUAL: Self = Self::new(0.3, 0.59, 0.11);

    /// Blue-heavy weighting used for warm metallic pixels
    pub const GOLD: Self = Self::new(0.2, 0.2, 0.6);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    fn validate(&self, name: &str) -> Result<(), CutoutError> {
        for (channel, value) in [("r", self.r), ("g", self.g), ("b", self.b)] {
            validate_non_negative(&format!("{name}.{channel}"), value)?;
        }
        Ok(())
    }
}

/// Empirical warm-metal (gold, rose gold) color heuristic
///
/// A pixel is gold-like when `R > min_red`, `G > min_green` and
/// `R > B + min_red_blue_gap`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GoldPredicate {
    pub min_red: u8,
    pub min_green: u8,
    pub min_red_blue_gap: u8,
}

impl GoldPredicate {
    pub const fn new(min_red: u8, min_green: u8, min_red_blue_gap: u8) -> Self {
        Self {
            min_red,
            min_green,
            min_red_blue_gap,
        }
    }

    /// Returns true if the color matches the warm-metal heuristic
    #[inline]
    pub fn matches(&self, r: u8, g: u8, b: u8) -> bool {
        r > self.min_red
            && g > self.min_green
            && u16::from(r) > u16::from(b) + u16::from(self.min_red_blue_gap)
    }
}

impl Default for GoldPredicate {
    fn default() -> Self {
        Self::new(180, 140, 30)
    }
}

/// Configuration for the segmentation pipeline
///
/// # Examples
///
/// ```
/// use imageops_cutout::SegmentationConfig;
///
/// let config = SegmentationConfig::default()
///     .with_base_threshold(40.0)
///     .with_edge_weight(60.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SegmentationConfig {
    /// Border band thickness as a fraction of the shorter image side
    pub border_fraction: f32,
    /// Minimum border band thickness in pixels, at least 1
    pub min_border: u32,
    /// Base color separation added to every threshold
    pub base_threshold: f32,
    /// Multiplier applied to the background standard deviation
    pub variance_multiplier: f32,
    /// Score contributed by a saturated edge magnitude
    pub edge_weight: f32,
    /// Edge magnitude at which the edge contribution saturates
    pub edge_clamp: f32,
    pub default_weights: ChannelWeights,
    pub gold_weights: ChannelWeights,
    /// Warm-metal heuristic, `None` disables gold handling entirely
    pub gold: Option<GoldPredicate>,
    /// Fraction of the threshold a channel must deviate by to be reclaimed during dilation
    pub dilation_factor: f32,
    /// Reclassify enclosed background pockets as foreground
    pub fill_holes: bool,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            border_fraction: 0.03,
            min_border: 10,
            base_threshold: 32.0,
            variance_multiplier: 0.7,
            edge_weight: 80.0,
            edge_clamp: 255.0,
            default_weights: ChannelWeights::PERCEPTUAL,
            gold_weights: ChannelWeights::GOLD,
            gold: Some(GoldPredicate::default()),
            dilation_factor: 0.5,
            fill_holes: true,
        }
    }
}

impl SegmentationConfig {
    #[must_use]
    pub const fn with_border(mut self, fraction: f32, min_border: u32) -> Self {
        self.border_fraction = fraction;
        self.min_border = min_border;
        self
    }

    #[must_use]
    pub const fn with_base_threshold(mut self, base_threshold: f32) -> Self {
        self.base_threshold = base_threshold;
        self
    }

    #[must_use]
    pub const fn with_variance_multiplier(mut self, multiplier: f32) -> Self {
        self.variance_multiplier = multiplier;
        self
    }

    #[must_use]
    pub const fn with_edge_weight(mut self, edge_weight: f32) -> Self {
        self.edge_weight = edge_weight;
        self
    }

    #[must_use]
    pub const fn with_weights(mut self, default: ChannelWeights, gold: ChannelWeights) -> Self {
        self.default_weights = default;
        self.gold_weights = gold;
        self
    }

    #[must_use]
    pub const fn with_gold(mut self, gold: Option<GoldPredicate>) -> Self {
        self.gold = gold;
        self
    }

    #[must_use]
    pub const fn with_dilation_factor(mut self, factor: f32) -> Self {
        self.dilation_factor = factor;
        self
    }

    #[must_use]
    pub const fn with_fill_holes(mut self, fill_holes: bool) -> Self {
        self.fill_holes = fill_holes;
        self
    }

    /// Checks that every tuning value is finite and within range
    ///
    /// # Errors
    ///
    /// * `CutoutError::InvalidParameter` - When a value is negative, non-finite,
    ///   `border_fraction` lies outside `[0, 1]`, or `min_border` is zero
    pub fn validate(&self) -> Result<(), CutoutError> {
        validate_non_negative("border_fraction", self.border_fraction)?;
        if self.border_fraction > 1.0 {
            return Err(CutoutError::InvalidParameter(format!(
                "border_fraction must be within [0, 1], got {}",
                self.border_fraction
            )));
        }
        // A zero band yields no samples and a black background estimate
        if self.min_border == 0 {
            return Err(CutoutError::InvalidParameter(
                "min_border must be at least 1".to_string(),
            ));
        }
        validate_non_negative("base_threshold", self.base_threshold)?;
        validate_non_negative("variance_multiplier", self.variance_multiplier)?;
        validate_non_negative("edge_weight", self.edge_weight)?;
        validate_non_negative("dilation_factor", self.dilation_factor)?;
        validate_non_negative("edge_clamp", self.edge_clamp)?;
        if self.edge_clamp == 0.0 {
            return Err(CutoutError::InvalidParameter(
                "edge_clamp must be greater than zero".to_string(),
            ));
        }
        self.default_weights.validate("default_weights")?;
        self.gold_weights.validate("gold_weights")
    }

    /// Selects the channel weights for a pixel
    #[inline]
    pub(crate) fn weights_for(&self, r: u8, g: u8, b: u8) -> ChannelWeights {
        if self.is_gold_like(r, g, b) {
            self.gold_weights
        } else {
            self.default_weights
        }
    }

    #[inline]
    pub(crate) fn is_gold_like(&self, r: u8, g: u8, b: u8) -> bool {
        self.gold.is_some_and(|gold| gold.matches(r, g, b))
    }
}

fn validate_non_negative(name: &str, value: f32) -> Result<(), CutoutError> {
    if !value.is_finite() || value < 0.0 {
        return Err(CutoutError::InvalidParameter(format!(
            "{name} must be a finite non-negative number, got {value}"
        )));
    }
    Ok(())
}
