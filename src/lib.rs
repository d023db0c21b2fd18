//! # imageops-cutout
//!
//! Background removal for product photos, typically a watch on a plain or
//! near-plain backdrop.
//!
//! The background is estimated from a band along the image border. Each
//! pixel is then scored by its weighted color distance to that background
//! plus its Sobel edge strength, the resulting mask is grown once into
//! adjacent metallic pixels, and background pockets enclosed by the object
//! are filled. Finally the background pixels are made transparent.
//!
//! - **Border statistics**: mean color and variance of the border band
//! - **Adaptive threshold**: widened on noisy backgrounds
//! - **Color + edge mask**: gold-aware weighted distance combined with Sobel magnitude
//! - **Conditional dilation**: reclaims thin metallic rims next to the object
//! - **Hole filling**: border-reachability flood fill
//! - **Alpha compositing**: writes the mask into the alpha channel in place
//!
//! ## Example Usage
//!
//! ```no_run
//! use imageops_cutout::{Image, RemoveBackgroundExt, SegmentationConfig, segment_foreground};
//! use image::Rgba;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let photo: Image<Rgba<u8>> = Image::new(640, 480);
//!
//! // Inspect the mask without touching the image
//! let segmentation = segment_foreground(&photo, &SegmentationConfig::default())?;
//! let preview = segmentation.mask.to_luma_image();
//!
//! // Or cut the background out directly
//! let cutout = photo.remove_background(&SegmentationConfig::default())?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! - `rayon`: Parallel batch processing
//! - `serde`: Serialization support for the tuning parameters

mod error;
mod imageops_cutout;
mod utils;

#[cfg(test)]
mod test_utils;

pub use error::CutoutError;
pub use imageops_cutout::alpha_compositor::ApplyForegroundMask;
pub use imageops_cutout::background_stats::{average_color, color_variance, BackgroundColor};
pub use imageops_cutout::border_sampler::{border_thickness, sample_border, ColorSample};
pub use imageops_cutout::config::{ChannelWeights, GoldPredicate, SegmentationConfig};
pub use imageops_cutout::hole_filler::fill_holes;
pub use imageops_cutout::mask::{Mask, BACKGROUND, FOREGROUND};
pub use imageops_cutout::mask_builder::{
    build_mask, color_distance, combined_score, edge_magnitude_map, is_gold_like, sobel_magnitude,
};
pub use imageops_cutout::mask_refiner::refine_mask;
pub use imageops_cutout::pipeline::{
    remove_background, remove_background_batch, remove_background_raw, segment_foreground,
    RemoveBackgroundExt, Segmentation,
};
pub use imageops_cutout::threshold::adaptive_threshold;

// Re-export imageproc::definitions::Image for convenience
pub use imageproc::definitions::Image;
