use image::{ImageBuffer, Luma};
use imageproc::definitions::Image;

/// Label of a background pixel
pub const BACKGROUND: u8 = 0;
/// Label of a foreground pixel
pub const FOREGROUND: u8 = 1;

/// Binary foreground/background labeling of an image
///
/// Labels are stored row-major with the same indexing as the image they
/// were computed from, one byte per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    labels: Vec<u8>,
}

impl Mask {
    /// Creates an all-background mask
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, BACKGROUND)
    }

    /// Creates a mask with every pixel set to `label`
    pub fn filled(width: u32, height: u32, label: u8) -> Self {
        Self {
            width,
            height,
            labels: vec![label; width as usize * height as usize],
        }
    }

    /// Builds a mask from a grayscale image, non-zero pixels become foreground
    pub fn from_luma_image(image: &Image<Luma<u8>>) -> Self {
        let (width, height) = image.dimensions();
        let labels = image
            .pixels()
            .map(|Luma([value])| if *value > 0 { FOREGROUND } else { BACKGROUND })
            .collect();
        Self {
            width,
            height,
            labels,
        }
    }

    /// Exports the mask as a grayscale image (255 foreground, 0 background)
    pub fn to_luma_image(&self) -> Image<Luma<u8>> {
        ImageBuffer::from_fn(self.width, self.height, |x, y| {
            Luma([if self.is_foreground(x, y) { 255 } else { 0 }])
        })
    }

    #[inline]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub const fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn labels(&self) -> &[u8] {
        &self.labels
    }

    #[inline]
    pub(crate) fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Returns the label at `(x, y)`
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.labels[self.index(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, label: u8) {
        let idx = self.index(x, y);
        self.labels[idx] = label;
    }

    #[inline]
    pub fn is_foreground(&self, x: u32, y: u32) -> bool {
        self.get(x, y) != BACKGROUND
    }

    pub fn foreground_count(&self) -> usize {
        self.labels.iter().filter(|&&label| label != BACKGROUND).count()
    }

    /// Returns true if every foreground pixel of `other` is foreground here
    pub fn is_superset_of(&self, other: &Self) -> bool {
        self.dimensions() == other.dimensions()
            && self
                .labels
                .iter()
                .zip(&other.labels)
                .all(|(&mine, &theirs)| theirs == BACKGROUND || mine != BACKGROUND)
    }

    /// Returns true if any of the eight neighbours of `(x, y)` is foreground
    ///
    /// `(x, y)` must not lie on the outermost ring.
    #[inline]
    pub(crate) fn has_foreground_neighbor(&self, x: u32, y: u32) -> bool {
        (y - 1..=y + 1)
            .flat_map(|ny| (x - 1..=x + 1).map(move |nx| (nx, ny)))
            .any(|(nx, ny)| (nx, ny) != (x, y) && self.is_foreground(nx, ny))
    }
}
