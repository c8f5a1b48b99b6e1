//! Multi-scale center-surround scan over an integral image.
//!
//! For each inner half-width `r` the feature compares the mean of the
//! `2r x 2r` square centered on a grid position against the mean of the
//! `6r x 6r` square around it with the inner square removed. Window centers
//! stay `3r` pixels away from the borders so every lookup is in range.

use crate::coarse::candidate::RegionCandidate;
use crate::image::IntegralImage;

/// Inner radius range as fractions of the image diagonal.
const MIN_RADIUS_FRACTION: f32 = 0.5 * 0.07;
const MAX_RADIUS_FRACTION: f32 = 0.5 * 0.29;
/// Radius step as a fraction of `min_r + max_r`.
const RADIUS_STEP_FRACTION: f32 = 0.2;
/// Position stride as a fraction of the image size.
const GRID_STEP_FRACTION: f32 = 0.01;

/// Radii and grid strides derived from the working image size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ScanGeometry {
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) min_r: usize,
    pub(crate) max_r: usize,
    pub(crate) r_step: usize,
    pub(crate) x_step: usize,
    pub(crate) y_step: usize,
}

impl ScanGeometry {
    pub(crate) fn new(width: usize, height: usize) -> Self {
        let diagonal = ((width * width + height * height) as f32).sqrt();
        let min_r = (MIN_RADIUS_FRACTION * diagonal) as usize;
        let max_r = (MAX_RADIUS_FRACTION * diagonal) as usize;
        let r_step = (RADIUS_STEP_FRACTION * (min_r + max_r) as f32).max(1.0) as usize;
        let x_step = (GRID_STEP_FRACTION * width as f32).max(1.0) as usize;
        let y_step = (GRID_STEP_FRACTION * height as f32).max(1.0) as usize;
        Self {
            width,
            height,
            min_r,
            max_r,
            r_step,
            x_step,
            y_step,
        }
    }

    /// Evaluated inner radii in ascending order; a zero radius has no
    /// inner area and is never evaluated.
    pub(crate) fn radii(&self) -> impl Iterator<Item = usize> + Clone {
        (self.min_r..=self.max_r)
            .step_by(self.r_step)
            .filter(|&r| r > 0)
    }

    /// Grid rows for radius `r`.
    pub(crate) fn rows(&self, r: usize) -> impl Iterator<Item = usize> {
        let margin = 3 * r;
        (margin..self.height.saturating_sub(margin)).step_by(self.y_step)
    }

    /// True when row `y` belongs to the grid of radius `r`.
    pub(crate) fn has_row(&self, r: usize, y: usize) -> bool {
        let margin = 3 * r;
        y >= margin && y + margin < self.height && (y - margin) % self.y_step == 0
    }
}

/// Mean denominators for one radius.
///
/// Means are computed as `sum / (255 * count)` in `f64` so that equal
/// intensities inside and around the window give exactly zero response.
#[derive(Clone, Copy)]
struct Norms {
    inner: f64,
    outer: f64,
}

impl Norms {
    fn new(r: usize) -> Self {
        let inner_count = (2 * r) * (2 * r);
        let outer_count = (6 * r) * (6 * r) - inner_count;
        Self {
            inner: 255.0 * inner_count as f64,
            outer: 255.0 * outer_count as f64,
        }
    }

    fn response(&self, inner_sum: u32, outer_sum: u32) -> f32 {
        let inner_mean = f64::from(inner_sum) / self.inner;
        let outer_mean = f64::from(outer_sum) / self.outer;
        (outer_mean - inner_mean) as f32
    }
}

/// Calls `visit(x, response)` for every grid column of row `y` at radius `r`.
fn scan_row<F>(itg: &IntegralImage, geom: &ScanGeometry, r: usize, y: usize, mut visit: F)
where
    F: FnMut(usize, f32),
{
    let norms = Norms::new(r);
    let step = 3 * r;
    for x in (step..geom.width.saturating_sub(step)).step_by(geom.x_step) {
        let inner = itg.rect_sum(x - r, y - r, x + r, y + r);
        let outer = itg.rect_sum(x - step, y - step, x + step, y + step) - inner;
        visit(x, norms.response(inner, outer));
    }
}

/// Sequential scan pruning against the running best response.
///
/// Radii are visited in ascending order, rows and columns in raster order;
/// a response below half the best seen so far is rejected.
pub(crate) fn scan_sequential(itg: &IntegralImage, geom: &ScanGeometry) -> Vec<RegionCandidate> {
    let mut best = f32::MIN_POSITIVE;
    let mut per_pixel = vec![0.0f32; geom.width * geom.height];
    let mut candidates = Vec::new();

    for r in geom.radii() {
        for y in geom.rows(r) {
            let row = &mut per_pixel[y * geom.width..(y + 1) * geom.width];
            scan_row(itg, geom, r, y, |x, response| {
                if response < 0.5 * best {
                    return;
                }
                if response > best {
                    best = response;
                }
                if response > row[x] {
                    row[x] = response;
                    candidates.push(RegionCandidate::new(x, y, r, response));
                }
            });
        }
    }

    candidates
}

/// Row-parallel scan pruning against the global best response.
///
/// A first pass finds the best response over all radii and positions; the
/// second pass keeps per-pixel maxima that reach half of it. The result can
/// be smaller than the sequential candidate set, never larger in threshold.
#[cfg(feature = "rayon")]
pub(crate) fn scan_parallel(itg: &IntegralImage, geom: &ScanGeometry) -> Vec<RegionCandidate> {
    use rayon::prelude::*;

    let best = (0..geom.height)
        .into_par_iter()
        .map(|y| {
            let mut row_best = f32::MIN_POSITIVE;
            for r in geom.radii().filter(|&r| geom.has_row(r, y)) {
                scan_row(itg, geom, r, y, |_, response| {
                    row_best = row_best.max(response);
                });
            }
            row_best
        })
        .reduce(|| f32::MIN_POSITIVE, f32::max);

    let rows: Vec<Vec<RegionCandidate>> = (0..geom.height)
        .into_par_iter()
        .map(|y| {
            let mut row = vec![0.0f32; geom.width];
            let mut found = Vec::new();
            for r in geom.radii().filter(|&r| geom.has_row(r, y)) {
                scan_row(itg, geom, r, y, |x, response| {
                    if response < 0.5 * best {
                        return;
                    }
                    if response > row[x] {
                        row[x] = response;
                        found.push(RegionCandidate::new(x, y, r, response));
                    }
                });
            }
            found
        })
        .collect();

    rows.into_iter().flatten().collect()
}
