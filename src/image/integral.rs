//! Summed-area table over a grayscale image.
//!
//! The table has `(width + 1) x (height + 1)` cells; cell `(x, y)` holds the
//! sum of all pixels in `[0, x) x [0, y)`, so row 0 and column 0 are zero.

use crate::image::ImageView;
use crate::util::{PupilError, PupilResult};

/// Integral image with `u32` cell sums.
pub struct IntegralImage {
    sums: Vec<u32>,
    width: usize,
    height: usize,
}

impl IntegralImage {
    /// Builds the table in a single pass over `src`.
    ///
    /// Fails if the total intensity of a white image of this size would not
    /// fit in `u32`.
    pub fn from_view(src: ImageView<'_, u8>) -> PupilResult<Self> {
        let width = src.width();
        let height = src.height();
        let pixels = width
            .checked_mul(height)
            .ok_or(PupilError::InvalidDimensions { width, height })?;
        if (pixels as u64).saturating_mul(255) > u64::from(u32::MAX) {
            return Err(PupilError::InvalidDimensions { width, height });
        }

        let stride = width + 1;
        let mut sums = vec![0u32; stride * (height + 1)];
        for y in 0..height {
            let row = src.row(y).ok_or(PupilError::BufferTooSmall {
                needed: y * src.stride() + width,
                got: src.as_slice().len(),
            })?;
            let mut row_sum = 0u32;
            let above = y * stride;
            let here = above + stride;
            for (x, &value) in row.iter().enumerate() {
                row_sum += u32::from(value);
                sums[here + x + 1] = sums[above + x + 1] + row_sum;
            }
        }

        Ok(Self {
            sums,
            width,
            height,
        })
    }

    /// Width of the source image.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height of the source image.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the cumulative sum at table cell `(x, y)`, `x <= width`, `y <= height`.
    #[inline]
    pub fn at(&self, x: usize, y: usize) -> u32 {
        debug_assert!(x <= self.width && y <= self.height);
        self.sums[y * (self.width + 1) + x]
    }

    /// Sum of pixels in `[x0, x1) x [y0, y1)`.
    #[inline]
    pub fn rect_sum(&self, x0: usize, y0: usize, x1: usize, y1: usize) -> u32 {
        debug_assert!(x0 <= x1 && y0 <= y1);
        self.at(x1, y1)
            .wrapping_add(self.at(x0, y0))
            .wrapping_sub(self.at(x1, y0))
            .wrapping_sub(self.at(x0, y1))
    }
}

#[cfg(test)]
mod tests {
    use super::IntegralImage;
    use crate::image::ImageView;

    #[test]
    fn rect_sum_matches_brute_force() {
        let data: Vec<u8> = (0..30u8).map(|v| v.wrapping_mul(37)).collect();
        let view = ImageView::from_slice(&data, 6, 5).unwrap();
        let itg = IntegralImage::from_view(view).unwrap();

        for y0 in 0..=5 {
            for y1 in y0..=5 {
                for x0 in 0..=6 {
                    for x1 in x0..=6 {
                        let mut expected = 0u32;
                        for y in y0..y1 {
                            for x in x0..x1 {
                                expected += u32::from(data[y * 6 + x]);
                            }
                        }
                        assert_eq!(itg.rect_sum(x0, y0, x1, y1), expected);
                    }
                }
            }
        }
    }

    #[test]
    fn first_row_and_column_are_zero() {
        let data = [9u8; 12];
        let view = ImageView::from_slice(&data, 4, 3).unwrap();
        let itg = IntegralImage::from_view(view).unwrap();
        for x in 0..=4 {
            assert_eq!(itg.at(x, 0), 0);
        }
        for y in 0..=3 {
            assert_eq!(itg.at(0, y), 0);
        }
        assert_eq!(itg.at(4, 3), 9 * 12);
    }
}
