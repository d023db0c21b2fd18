//! Test utilities for imageops-cutout
//!
//! This module provides synthetic product photos for testing the pipeline.
//! It is only compiled when running tests.

use image::Rgba;
use imageproc::definitions::Image;
use itertools::iproduct;

/// Creates a test RGBA image with predefined pixel values for testing.
///
/// This function creates a 2x2 test image with known pixel values including alpha:
/// - (0,0): [200, 150, 100, 255] (opaque)
/// - (1,0): [100, 200, 150, 128] (semi-transparent)
/// - (0,1): [150, 100, 200, 64]  (more transparent)
/// - (1,1): [50, 75, 25, 0]      (fully transparent)
pub fn create_test_rgba_image() -> Image<Rgba<u8>> {
    let mut image: Image<Rgba<u8>> = Image::new(2, 2);
    image.put_pixel(0, 0, Rgba([200, 150, 100, 255]));
    image.put_pixel(1, 0, Rgba([100, 200, 150, 128]));
    image.put_pixel(0, 1, Rgba([150, 100, 200, 64]));
    image.put_pixel(1, 1, Rgba([50, 75, 25, 0]));
    image
}

/// Creates an image filled with a single color.
pub fn create_uniform_image(width: u32, height: u32, color: Rgba<u8>) -> Image<Rgba<u8>> {
    Image::from_pixel(width, height, color)
}

/// Creates a `size x size` opaque white image with a centred square of `square` pixels.
pub fn create_framed_square_image(size: u32, square: u32, color: Rgba<u8>) -> Image<Rgba<u8>> {
    let mut image = create_uniform_image(size, size, Rgba([255, 255, 255, 255]));
    let offset = (size - square) / 2;
    for (y, x) in iproduct!(offset..offset + square, offset..offset + square) {
        image.put_pixel(x, y, color);
    }
    image
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_framed_square_image_centres_square() {
        let image = create_framed_square_image(10, 4, Rgba([0, 0, 0, 255]));
        assert_eq!(image.dimensions(), (10, 10));
        assert_eq!(image.get_pixel(2, 2), &Rgba([255, 255, 255, 255]));
        assert_eq!(image.get_pixel(3, 3), &Rgba([0, 0, 0, 255]));
        assert_eq!(image.get_pixel(6, 6), &Rgba([0, 0, 0, 255]));
        assert_eq!(image.get_pixel(7, 7), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn create_uniform_image_fills_every_pixel() {
        let image = create_uniform_image(3, 2, Rgba([1, 2, 3, 4]));
        assert!(image.pixels().all(|p| *p == Rgba([1, 2, 3, 4])));
    }
}
