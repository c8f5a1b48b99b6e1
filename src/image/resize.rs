//! Bilinear resampling for grayscale `u8` images.
//!
//! Destination pixel centers map to source coordinates with
//! `src = (dst + 0.5) * scale - 0.5`. Coordinates left of the first pixel
//! clamp to it; coordinates at or beyond the last pixel clamp to the last one.
//! Results are rounded to the nearest integer.

use crate::image::{ImageView, OwnedImage};
use crate::util::{PupilError, PupilResult};

/// Resizes `src` to `dst_width x dst_height` using the size ratio as scale.
pub fn resize_bilinear(
    src: ImageView<'_, u8>,
    dst_width: usize,
    dst_height: usize,
) -> PupilResult<OwnedImage> {
    if dst_width == 0 || dst_height == 0 {
        return Err(PupilError::InvalidDimensions {
            width: dst_width,
            height: dst_height,
        });
    }
    let scale_x = src.width() as f32 / dst_width as f32;
    let scale_y = src.height() as f32 / dst_height as f32;
    resize_bilinear_scaled(src, dst_width, dst_height, scale_x, scale_y)
}

/// Uniformly rescales `src` by `1 / factor`, rounding the output size.
///
/// A factor above 1 shrinks the image. The output is at least 1x1.
pub fn downscale_by(src: ImageView<'_, u8>, factor: f32) -> PupilResult<OwnedImage> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(PupilError::InvalidParameter {
            name: "factor",
            reason: "scale factor must be finite and > 0",
        });
    }
    let dst_width = ((src.width() as f32 / factor).round() as usize).max(1);
    let dst_height = ((src.height() as f32 / factor).round() as usize).max(1);
    resize_bilinear_scaled(src, dst_width, dst_height, factor, factor)
}

/// Source coordinate and weight for one destination index along an axis.
#[derive(Clone, Copy)]
struct Tap {
    i0: usize,
    i1: usize,
    w1: f32,
}

fn axis_taps(src_len: usize, dst_len: usize, scale: f32) -> Vec<Tap> {
    let last = src_len - 1;
    (0..dst_len)
        .map(|d| {
            let pos = (d as f32 + 0.5) * scale - 0.5;
            let base = pos.floor();
            let mut frac = pos - base;
            let mut i0 = base as i64;
            if i0 < 0 {
                i0 = 0;
                frac = 0.0;
            }
            if i0 as usize >= last {
                return Tap {
                    i0: last,
                    i1: last,
                    w1: 0.0,
                };
            }
            let i0 = i0 as usize;
            Tap {
                i0,
                i1: i0 + 1,
                w1: frac,
            }
        })
        .collect()
}

fn resize_bilinear_scaled(
    src: ImageView<'_, u8>,
    dst_width: usize,
    dst_height: usize,
    scale_x: f32,
    scale_y: f32,
) -> PupilResult<OwnedImage> {
    let len = dst_width
        .checked_mul(dst_height)
        .ok_or(PupilError::InvalidDimensions {
            width: dst_width,
            height: dst_height,
        })?;
    let xs = axis_taps(src.width(), dst_width, scale_x);
    let ys = axis_taps(src.height(), dst_height, scale_y);

    let mut out = Vec::with_capacity(len);
    for ty in &ys {
        let row0 = src.row(ty.i0).ok_or(PupilError::BufferTooSmall {
            needed: ty.i0 * src.stride() + src.width(),
            got: src.as_slice().len(),
        })?;
        let row1 = src.row(ty.i1).ok_or(PupilError::BufferTooSmall {
            needed: ty.i1 * src.stride() + src.width(),
            got: src.as_slice().len(),
        })?;
        for tx in &xs {
            let top = row0[tx.i0] as f32 * (1.0 - tx.w1) + row0[tx.i1] as f32 * tx.w1;
            let bottom = row1[tx.i0] as f32 * (1.0 - tx.w1) + row1[tx.i1] as f32 * tx.w1;
            let value = top * (1.0 - ty.w1) + bottom * ty.w1;
            out.push(value.round().clamp(0.0, 255.0) as u8);
        }
    }

    OwnedImage::new(out, dst_width, dst_height)
}
