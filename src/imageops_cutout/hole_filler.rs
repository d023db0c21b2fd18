//! Enclosed hole filling by border reachability.
//!
//! Background is whatever can be reached from the image border without
//! crossing foreground. Pockets enclosed by the object, such as an open
//! watch face or strap holes, are not reachable and are reclassified,
//! whatever the object's shape.

use std::collections::VecDeque;

use crate::imageops_cutout::mask::{Mask, BACKGROUND, FOREGROUND};

/// Reclassifies enclosed background pockets as foreground
///
/// Background is flood filled (4-connected, breadth-first) from every
/// background pixel on the image border. Background pixels the fill does
/// not reach are fully enclosed by foreground and become foreground.
/// Filling an already filled mask changes nothing.
///
/// # Arguments
///
/// * `mask` - Mask to fill in place
///
/// # Returns
///
/// The number of pixels that were reclassified as foreground
///
/// # Examples
///
/// ```
/// use imageops_cutout::{fill_holes, Mask, FOREGROUND};
///
/// // A 3x3 ring around (2, 2)
/// let mut mask = Mask::new(5, 5);
/// for (x, y) in [(1, 1), (2, 1), (3, 1), (1, 2), (3, 2), (1, 3), (2, 3), (3, 3)] {
///     mask.set(x, y, FOREGROUND);
/// }
///
/// assert_eq!(fill_holes(&mut mask), 1);
/// assert!(mask.is_foreground(2, 2));
/// assert!(!mask.is_foreground(0, 0));
/// ```
pub fn fill_holes(mask: &mut Mask) -> usize {
    let (width, height) = mask.dimensions();
    if width == 0 || height == 0 {
        return 0;
    }

    let mut reachable = vec![false; mask.labels().len()];
    let mut queue = VecDeque::new();

    let border = (0..width)
        .flat_map(|x| [(x, 0), (x, height - 1)])
        .chain((0..height).flat_map(|y| [(0, y), (width - 1, y)]));
    for (x, y) in border {
        let idx = mask.index(x, y);
        if !reachable[idx] && mask.get(x, y) == BACKGROUND {
            reachable[idx] = true;
            queue.push_back((x, y));
        }
    }

    while let Some((x, y)) = queue.pop_front() {
        let neighbors = [
            (x.checked_sub(1), Some(y)),
            ((x + 1 < width).then_some(x + 1), Some(y)),
            (Some(x), y.checked_sub(1)),
            (Some(x), (y + 1 < height).then_some(y + 1)),
        ];

        for (nx, ny) in neighbors {
            let (Some(nx), Some(ny)) = (nx, ny) else {
                continue;
            };
            let idx = mask.index(nx, ny);
            if !reachable[idx] && mask.get(nx, ny) == BACKGROUND {
                reachable[idx] = true;
                queue.push_back((nx, ny));
            }
        }
    }

    let mut filled = 0;
    for (idx, reached) in reachable.into_iter().enumerate() {
        let x = (idx % width as usize) as u32;
        let y = (idx / width as usize) as u32;
        if !reached && mask.get(x, y) == BACKGROUND {
            mask.set(x, y, FOREGROUND);
            filled += 1;
        }
    }

    filled
}

#[cfg(test)]
mod tests {
    use super::*;
    use imageproc::gray_image;

    #[test]
    fn enclosed_pocket_is_filled() {
        let mut mask = Mask::from_luma_image(&gray_image!(
            0, 0, 0, 0, 0;
            0, 1, 1, 1, 0;
            0, 1, 0, 1, 0;
            0, 1, 1, 1, 0;
            0, 0, 0, 0, 0));

        assert_eq!(fill_holes(&mut mask), 1);
        assert!(mask.is_foreground(2, 2));
        assert_eq!(mask.foreground_count(), 9);
        assert!(!mask.is_foreground(0, 0));
    }

    #[test]
    fn pocket_touching_border_stays_background() {
        let mut mask = Mask::from_luma_image(&gray_image!(
            1, 1, 1, 1;
            1, 0, 0, 1;
            1, 0, 1, 1;
            1, 0, 1, 1));
        let before = mask.clone();

        assert_eq!(fill_holes(&mut mask), 0);
        assert_eq!(mask, before);
    }

    #[test]
    fn diagonal_gap_does_not_leak() {
        // The pocket only touches the outside through a diagonal
        let mut mask = Mask::from_luma_image(&gray_image!(
            0, 0, 0, 0, 0;
            0, 0, 1, 1, 0;
            0, 1, 0, 1, 0;
            0, 1, 1, 1, 0;
            0, 0, 0, 0, 0));

        assert_eq!(fill_holes(&mut mask), 1);
        assert!(mask.is_foreground(2, 2));
    }

    #[test]
    fn multiple_disjoint_holes_are_filled() {
        let mut mask = Mask::from_luma_image(&gray_image!(
            0, 0, 0, 0, 0, 0, 0;
            0, 1, 1, 1, 1, 1, 0;
            0, 1, 0, 1, 0, 1, 0;
            0, 1, 0, 1, 0, 1, 0;
            0, 1, 1, 1, 1, 1, 0;
            0, 0, 0, 0, 0, 0, 0));

        assert_eq!(fill_holes(&mut mask), 4);
        assert!(mask.is_foreground(2, 2));
        assert!(mask.is_foreground(4, 3));
    }

    #[test]
    fn second_pass_changes_nothing() {
        let mut mask = Mask::from_luma_image(&gray_image!(
            0, 1, 1, 1, 0;
            0, 1, 0, 1, 0;
            0, 1, 1, 1, 0;
            0, 0, 0, 0, 0));

        fill_holes(&mut mask);
        let once = mask.clone();
        assert_eq!(fill_holes(&mut mask), 0);
        assert_eq!(mask, once);
    }

    #[test]
    fn all_foreground_and_empty_masks() {
        let mut full = Mask::filled(3, 3, FOREGROUND);
        assert_eq!(fill_holes(&mut full), 0);

        let mut empty = Mask::new(0, 0);
        assert_eq!(fill_holes(&mut empty), 0);
    }
}
