use std::ops::{Deref, DerefMut};

use image::{ImageBuffer, Rgba};

use crate::error::CutoutError;
use crate::imageops_cutout::mask::{Mask, BACKGROUND};

/// Trait for writing a foreground mask into the alpha channel of RGBA images
///
/// Background pixels become fully transparent. Foreground pixels keep
/// their color and alpha untouched. Implemented for any RGBA buffer, so a
/// view over borrowed bytes is composited without copying.
pub trait ApplyForegroundMask {
    /// Applies the mask, consuming the image
    ///
    /// # Errors
    ///
    /// * `CutoutError::DimensionMismatch` - When image and mask dimensions don't match
    ///
    /// # Examples
    ///
    /// ```
    /// use imageops_cutout::{ApplyForegroundMask, Image, Mask};
    /// use image::Rgba;
    ///
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let image: Image<Rgba<u8>> = Image::from_pixel(4, 4, Rgba([10, 20, 30, 255]));
    /// let mask = Mask::new(4, 4);
    ///
    /// let cut = image.apply_foreground_mask(&mask)?;
    /// assert_eq!(cut.get_pixel(0, 0), &Rgba([10, 20, 30, 0]));
    /// # Ok(())
    /// # }
    /// ```
    fn apply_foreground_mask(self, mask: &Mask) -> Result<Self, CutoutError>
    where
        Self: Sized;

    /// Applies the mask in-place
    ///
    /// # Errors
    ///
    /// * `CutoutError::DimensionMismatch` - When image and mask dimensions don't match
    fn apply_foreground_mask_mut(&mut self, mask: &Mask) -> Result<&mut Self, CutoutError>;
}

impl<C> ApplyForegroundMask for ImageBuffer<Rgba<u8>, C>
where
    C: Deref<Target = [u8]> + DerefMut,
{
    fn apply_foreground_mask(mut self, mask: &Mask) -> Result<Self, CutoutError> {
        self.apply_foreground_mask_mut(mask)?;
        Ok(self)
    }

    fn apply_foreground_mask_mut(&mut self, mask: &Mask) -> Result<&mut Self, CutoutError> {
        validate_dimensions(self, mask)?;

        self.pixels_mut()
            .zip(mask.labels())
            .filter(|(_, label)| **label == BACKGROUND)
            .for_each(|(pixel, _)| {
                let Rgba([red, green, blue, _]) = *pixel;
                *pixel = Rgba([red, green, blue, 0]);
            });

        Ok(self)
    }
}

#[inline]
fn validate_dimensions<C>(image: &ImageBuffer<Rgba<u8>, C>, mask: &Mask) -> Result<(), CutoutError>
where
    C: Deref<Target = [u8]>,
{
    if image.dimensions() != mask.dimensions() {
        return Err(CutoutError::DimensionMismatch {
            expected: image.dimensions(),
            actual: mask.dimensions(),
        });
    }
    Ok(())
}
