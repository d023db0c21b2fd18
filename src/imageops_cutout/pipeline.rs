//! End-to-end background removal.
//!
//! The stages run strictly in sequence on a single image:
//!
//! 1. sample the border band ([`sample_border`])
//! 2. background mean and variance ([`average_color`], [`color_variance`])
//! 3. adaptive threshold ([`adaptive_threshold`])
//! 4. color + edge mask ([`build_mask`])
//! 5. conditional dilation ([`refine_mask`])
//! 6. enclosed hole filling ([`fill_holes`])
//! 7. alpha compositing ([`ApplyForegroundMask`])
//!
//! Every intermediate buffer is owned by the call that created it, so
//! independent images can be processed concurrently.

use std::ops::{Deref, DerefMut};

use image::{ImageBuffer, Rgba};
use imageproc::definitions::Image;
use tracing::{debug, instrument};

use crate::error::CutoutError;
use crate::imageops_cutout::alpha_compositor::ApplyForegroundMask;
use crate::imageops_cutout::background_stats::{average_color, color_variance, BackgroundColor};
use crate::imageops_cutout::border_sampler::sample_border;
use crate::imageops_cutout::config::SegmentationConfig;
use crate::imageops_cutout::hole_filler::fill_holes;
use crate::imageops_cutout::mask::{Mask, FOREGROUND};
use crate::imageops_cutout::mask_builder::build_mask;
use crate::imageops_cutout::mask_refiner::refine_mask;
use crate::imageops_cutout::threshold::adaptive_threshold;
use crate::utils::{is_degenerate, rgba_buffer_len};

/// Result of segmenting one image
#[derive(Debug, Clone, PartialEq)]
pub struct Segmentation {
    /// Final foreground mask
    pub mask: Mask,
    /// Mean color of the border band
    pub background: BackgroundColor,
    /// Variance of the border band around `background`
    pub variance: f32,
    /// Threshold the color/edge score was compared against
    pub threshold: f32,
    /// Number of border samples the statistics were computed from
    pub sample_count: usize,
    /// Number of enclosed background pixels reclassified as foreground
    pub holes_filled: usize,
}

/// Computes the foreground mask of an image without modifying it
///
/// Images with a side shorter than 3 pixels cannot be segmented; they get
/// an all-foreground mask so that compositing leaves them untouched.
///
/// # Errors
///
/// * `CutoutError::InvalidParameter` - When the configuration is invalid
///
/// # Examples
///
/// ```
/// use imageops_cutout::{segment_foreground, Image, SegmentationConfig};
/// use image::Rgba;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let image: Image<Rgba<u8>> = Image::from_pixel(64, 64, Rgba([240, 240, 240, 255]));
/// let segmentation = segment_foreground(&image, &SegmentationConfig::default())?;
/// assert_eq!(segmentation.mask.foreground_count(), 0);
/// # Ok(())
/// # }
/// ```
#[instrument(level = "debug", skip_all, fields(width = image.width(), height = image.height()))]
pub fn segment_foreground<C>(
    image: &ImageBuffer<Rgba<u8>, C>,
    config: &SegmentationConfig,
) -> Result<Segmentation, CutoutError>
where
    C: Deref<Target = [u8]>,
{
    config.validate()?;

    let (width, height) = image.dimensions();
    if is_degenerate(width, height) {
        debug!("image too small to segment, keeping every pixel");
        return Ok(Segmentation {
            mask: Mask::filled(width, height, FOREGROUND),
            background: BackgroundColor::default(),
            variance: 0.0,
            threshold: adaptive_threshold(0.0, config),
            sample_count: 0,
            holes_filled: 0,
        });
    }

    let samples = sample_border(image, config);
    let background = average_color(&samples);
    let variance = color_variance(&samples, &background);
    let threshold = adaptive_threshold(variance, config);
    debug!(
        samples = samples.len(),
        ?background,
        variance,
        threshold,
        "background statistics"
    );

    let mut mask = build_mask(image, &background, threshold, config);
    debug!(foreground = mask.foreground_count(), "initial mask");

    refine_mask(image, &mut mask, &background, threshold, config);
    debug!(foreground = mask.foreground_count(), "dilated mask");

    let holes_filled = if config.fill_holes {
        fill_holes(&mut mask)
    } else {
        0
    };
    debug!(
        foreground = mask.foreground_count(),
        holes_filled, "final mask"
    );

    Ok(Segmentation {
        mask,
        background,
        variance,
        threshold,
        sample_count: samples.len(),
        holes_filled,
    })
}

/// Segments an image and makes its background transparent in place
///
/// # Errors
///
/// * `CutoutError::InvalidParameter` - When the configuration is invalid
pub fn remove_background<C>(
    image: &mut ImageBuffer<Rgba<u8>, C>,
    config: &SegmentationConfig,
) -> Result<Segmentation, CutoutError>
where
    C: Deref<Target = [u8]> + DerefMut,
{
    let segmentation = segment_foreground(image, config)?;
    image.apply_foreground_mask_mut(&segmentation.mask)?;
    Ok(segmentation)
}

/// Removes the background of a raw row-major RGBA buffer in place
///
/// The buffer is wrapped in a borrowed view and written directly, without
/// an intermediate copy.
///
/// # Errors
///
/// * `CutoutError::BufferSizeMismatch` - When `data.len() != width * height * 4`
/// * `CutoutError::InvalidParameter` - When the configuration is invalid or
///   the image size overflows `usize`
pub fn remove_background_raw(
    data: &mut [u8],
    width: u32,
    height: u32,
    config: &SegmentationConfig,
) -> Result<Segmentation, CutoutError> {
    let expected = rgba_buffer_len(width, height)?;
    let actual = data.len();

    // from_raw accepts oversized buffers, trailing bytes are rejected here
    let mut image = ImageBuffer::<Rgba<u8>, &mut [u8]>::from_raw(width, height, data)
        .filter(|_| actual == expected)
        .ok_or(CutoutError::BufferSizeMismatch { expected, actual })?;

    remove_background(&mut image, config)
}

/// Removes the background of several independent images
///
/// With the `rayon` feature the images are processed in parallel.
///
/// # Errors
///
/// * `CutoutError::InvalidParameter` - When the configuration is invalid
pub fn remove_background_batch(
    images: &mut [Image<Rgba<u8>>],
    config: &SegmentationConfig,
) -> Result<Vec<Segmentation>, CutoutError> {
    config.validate()?;

    #[cfg(feature = "rayon")]
    {
        use rayon::prelude::*;
        images
            .par_iter_mut()
            .map(|image| remove_background(image, config))
            .collect()
    }

    #[cfg(not(feature = "rayon"))]
    {
        images
            .iter_mut()
            .map(|image| remove_background(image, config))
            .collect()
    }
}

/// Trait providing background removal on RGBA images
///
/// Offers a consuming variant and an in-place `_mut` variant.
pub trait RemoveBackgroundExt {
    /// Removes the background, consuming the image
    ///
    /// # Errors
    ///
    /// * `CutoutError::InvalidParameter` - When the configuration is invalid
    ///
    /// # Examples
    ///
    /// ```
    /// use imageops_cutout::{Image, RemoveBackgroundExt, SegmentationConfig};
    /// use image::Rgba;
    ///
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let photo: Image<Rgba<u8>> = Image::from_pixel(32, 32, Rgba([255, 255, 255, 255]));
    /// let cutout = photo.remove_background(&SegmentationConfig::default())?;
    /// assert!(cutout.pixels().all(|p| p[3] == 0));
    /// # Ok(())
    /// # }
    /// ```
    fn remove_background(self, config: &SegmentationConfig) -> Result<Self, CutoutError>
    where
        Self: Sized;

    /// Removes the background in-place
    ///
    /// # Errors
    ///
    /// * `CutoutError::InvalidParameter` - When the configuration is invalid
    fn remove_background_mut(
        &mut self,
        config: &SegmentationConfig,
    ) -> Result<&mut Self, CutoutError>;
}

impl RemoveBackgroundExt for Image<Rgba<u8>> {
    fn remove_background(mut self, config: &SegmentationConfig) -> Result<Self, CutoutError> {
        self.remove_background_mut(config)?;
        Ok(self)
    }

    fn remove_background_mut(
        &mut self,
        config: &SegmentationConfig,
    ) -> Result<&mut Self, CutoutError> {
        remove_background(self, config)?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_framed_square_image, create_uniform_image};
    use itertools::iproduct;

    #[test]
    fn uniform_image_becomes_fully_transparent() {
        let mut image = create_uniform_image(40, 40, Rgba([90, 120, 150, 255]));
        let segmentation = remove_background(&mut image, &SegmentationConfig::default()).unwrap();

        assert_eq!(segmentation.mask.foreground_count(), 0);
        assert_eq!(segmentation.variance, 0.0);
        assert_eq!(segmentation.threshold, 32.0);
        assert!(image.pixels().all(|p| p[3] == 0));
        // Color is kept
        assert_eq!(image.get_pixel(5, 5), &Rgba([90, 120, 150, 0]));
    }

    #[test]
    fn black_square_on_white_is_kept() {
        let mut image = create_framed_square_image(100, 40, Rgba([0, 0, 0, 255]));
        let segmentation = remove_background(&mut image, &SegmentationConfig::default()).unwrap();

        assert_eq!(
            segmentation.background,
            BackgroundColor::new(255.0, 255.0, 255.0)
        );
        for (y, x) in iproduct!(30..70, 30..70) {
            assert_eq!(image.get_pixel(x, y)[3], 255);
        }
        for (y, x) in iproduct!(0..10, 0..100) {
            assert_eq!(image.get_pixel(x, y)[3], 0);
            assert_eq!(image.get_pixel(y, x)[3], 0);
        }
    }

    #[test]
    fn hole_filling_can_be_disabled() {
        // White ring interior: a 30x30 dark frame, 5px thick, on white
        let mut image = create_uniform_image(60, 60, Rgba([255, 255, 255, 255]));
        for (y, x) in iproduct!(15..45, 15..45) {
            let inner = (20..40).contains(&x) && (20..40).contains(&y);
            if !inner {
                image.put_pixel(x, y, Rgba([20, 20, 20, 255]));
            }
        }

        let filled = segment_foreground(&image, &SegmentationConfig::default()).unwrap();
        assert!(filled.holes_filled > 0);
        assert!(filled.mask.is_foreground(30, 30));

        let config = SegmentationConfig::default().with_fill_holes(false);
        let open = segment_foreground(&image, &config).unwrap();
        assert_eq!(open.holes_filled, 0);
        assert!(!open.mask.is_foreground(30, 30));
    }

    #[test]
    fn degenerate_images_are_left_untouched() {
        let original = create_uniform_image(2, 10, Rgba([1, 2, 3, 200]));
        let mut image = original.clone();
        let segmentation = remove_background(&mut image, &SegmentationConfig::default()).unwrap();

        assert_eq!(segmentation.sample_count, 0);
        assert_eq!(segmentation.mask.dimensions(), (2, 10));
        assert_eq!(image, original);

        let mut empty = create_uniform_image(0, 0, Rgba([0, 0, 0, 0]));
        let segmentation = remove_background(&mut empty, &SegmentationConfig::default()).unwrap();
        assert!(segmentation.mask.labels().is_empty());
    }

    #[test]
    fn invalid_config_is_rejected_before_processing() {
        let mut image = create_uniform_image(20, 20, Rgba([0, 0, 0, 255]));
        let config = SegmentationConfig::default().with_dilation_factor(-0.5);

        assert!(matches!(
            remove_background(&mut image, &config),
            Err(CutoutError::InvalidParameter(_))
        ));
        assert!(image.pixels().all(|p| p[3] == 255));
    }

    #[test]
    fn raw_buffer_matches_image_api() {
        let image = create_framed_square_image(50, 20, Rgba([30, 30, 30, 255]));
        let config = SegmentationConfig::default();

        let mut raw = image.as_raw().clone();
        remove_background_raw(&mut raw, 50, 50, &config).unwrap();

        let expected = image.remove_background(&config).unwrap();
        assert_eq!(&raw, expected.as_raw());
    }

    #[test]
    fn borrowed_view_writes_through_to_caller_bytes() {
        let image = create_framed_square_image(30, 10, Rgba([0, 0, 0, 255]));
        let mut raw = image.as_raw().clone();

        let mut view = ImageBuffer::<Rgba<u8>, &mut [u8]>::from_raw(30, 30, raw.as_mut_slice())
            .unwrap();
        let segmentation = remove_background(&mut view, &SegmentationConfig::default()).unwrap();
        assert!(segmentation.mask.is_foreground(15, 15));

        let alpha_at = |x: usize, y: usize| raw[(y * 30 + x) * 4 + 3];
        assert_eq!(alpha_at(0, 0), 0);
        assert_eq!(alpha_at(15, 15), 255);
        // Only alpha is written
        for (written, original) in raw.chunks_exact(4).zip(image.as_raw().chunks_exact(4)) {
            assert_eq!(written[..3], original[..3]);
        }
    }

    #[test]
    fn raw_buffer_with_wrong_length_is_rejected() {
        let mut raw = vec![0u8; 10 * 10 * 4 - 1];
        assert_eq!(
            remove_background_raw(&mut raw, 10, 10, &SegmentationConfig::default()).unwrap_err(),
            CutoutError::BufferSizeMismatch {
                expected: 400,
                actual: 399,
            }
        );
    }

    #[test]
    fn batch_processes_every_image() {
        let mut images = vec![
            create_uniform_image(20, 20, Rgba([200, 200, 200, 255])),
            create_framed_square_image(40, 10, Rgba([0, 0, 0, 255])),
        ];
        let results = remove_background_batch(&mut images, &SegmentationConfig::default()).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].mask.foreground_count(), 0);
        assert!(results[1].mask.foreground_count() >= 100);
        assert_eq!(images[1].get_pixel(20, 20)[3], 255);
    }
}
