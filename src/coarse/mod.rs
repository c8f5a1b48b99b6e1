//! Coarse pupil localization with a multi-scale Haar-like feature.
//!
//! The frame is shrunk so that it fits `working_width x working_height`,
//! scanned with a dark-center / bright-surround feature over an integral
//! image, and the strongest per-pixel responses are unioned until they cover
//! a minimum fraction of the working image. The union is scaled back to the
//! frame and clipped; when nothing usable is found the whole frame is
//! returned.
//!
//! The feature follows Świrski et al., "Robust real-time pupil tracking in
//! highly off-axis images" (ETRA 2012), collecting per-pixel maxima instead
//! of a single global one.

mod candidate;
pub(crate) mod scan;

pub use candidate::RegionCandidate;

use crate::geometry::Rect;
use crate::image::resize::downscale_by;
use crate::image::{ImageView, IntegralImage};
use crate::trace::{trace_event, trace_span};
use crate::util::{PupilError, PupilResult};
use candidate::{merge_until_covered, sort_candidates_desc};
use scan::ScanGeometry;

/// Configuration for [`coarse_locate`].
#[derive(Clone, Debug)]
pub struct CoarseConfig {
    /// Fraction of the working width and height the ROI must exceed.
    pub min_coverage: f32,
    /// Working width the frame is shrunk towards.
    pub working_width: usize,
    /// Working height the frame is shrunk towards.
    pub working_height: usize,
    /// Use the two-pass row-parallel scan (requires the `rayon` feature).
    pub parallel: bool,
}

impl Default for CoarseConfig {
    fn default() -> Self {
        Self {
            min_coverage: 0.5,
            working_width: 60,
            working_height: 40,
            parallel: false,
        }
    }
}

impl CoarseConfig {
    /// Checks that the configuration describes a usable scan.
    pub fn validate(&self) -> PupilResult<()> {
        if self.working_width == 0 || self.working_height == 0 {
            return Err(PupilError::InvalidDimensions {
                width: self.working_width,
                height: self.working_height,
            });
        }
        if !self.min_coverage.is_finite() || self.min_coverage < 0.0 {
            return Err(PupilError::InvalidParameter {
                name: "min_coverage",
                reason: "must be finite and >= 0",
            });
        }
        Ok(())
    }
}

/// Receives intermediate results of a coarse localization.
///
/// Replaces ad-hoc debug drawing: implementors can render the merged
/// candidates and the working-resolution ROI however they like.
pub trait CoarseObserver {
    /// Called for each candidate, strongest first, as it joins the ROI.
    fn on_merge(&mut self, _candidate: &RegionCandidate) {}

    /// Called once with the ROI in working coordinates and the factor that
    /// maps working coordinates back to the frame.
    fn on_working_roi(&mut self, _roi: Rect, _scale: f32) {}
}

impl CoarseObserver for () {}

/// Full outcome of a coarse localization.
#[derive(Clone, Debug, PartialEq)]
pub struct CoarseDetails {
    /// Region of interest in frame coordinates; never empty.
    pub roi: Rect,
    /// True when `roi` is the full-frame fallback.
    pub fallback: bool,
    /// Frame pixels per working pixel.
    pub scale: f32,
    /// Working image size.
    pub working_size: (usize, usize),
    /// Number of candidates recorded by the scan.
    pub candidates: usize,
    /// Number of candidates unioned into the ROI.
    pub merged: usize,
    /// Strongest response, if any candidate was recorded.
    pub best_response: Option<f32>,
}

/// Returns a region of `frame` likely to contain the pupil.
///
/// The result always lies inside the frame and is never empty.
pub fn coarse_locate(frame: ImageView<'_, u8>, cfg: &CoarseConfig) -> PupilResult<Rect> {
    coarse_locate_detailed(frame, cfg, &mut ()).map(|details| details.roi)
}

/// Like [`coarse_locate`], reporting intermediate results to `observer`.
pub fn coarse_locate_detailed<O>(
    frame: ImageView<'_, u8>,
    cfg: &CoarseConfig,
    observer: &mut O,
) -> PupilResult<CoarseDetails>
where
    O: CoarseObserver + ?Sized,
{
    cfg.validate()?;
    let _span = trace_span!(
        "coarse_locate",
        width = frame.width(),
        height = frame.height()
    )
    .entered();

    let xr = frame.width() as f32 / cfg.working_width as f32;
    let yr = frame.height() as f32 / cfg.working_height as f32;
    let scale = xr.max(yr);

    let working = downscale_by(frame, scale)?;
    let itg = IntegralImage::from_view(working.view())?;
    let geom = ScanGeometry::new(working.width(), working.height());

    let mut candidates = run_scan(&itg, &geom, cfg.parallel);
    sort_candidates_desc(&mut candidates);
    trace_event!(
        "coarse_candidates",
        scale = scale,
        candidates = candidates.len(),
        min_r = geom.min_r,
        max_r = geom.max_r
    );

    let min_width = (cfg.min_coverage * working.width() as f32) as usize;
    let min_height = (cfg.min_coverage * working.height() as f32) as usize;
    let (working_roi, merged) =
        merge_until_covered(&candidates, min_width, min_height, |c| observer.on_merge(c));
    observer.on_working_roi(working_roi, scale);

    let bounds = frame.bounds();
    let clipped = working_roi.scaled(scale).intersect(&bounds);
    let fallback = clipped.is_empty();
    let roi = if fallback { bounds } else { clipped };
    trace_event!(
        "coarse_roi",
        x = roi.x,
        y = roi.y,
        width = roi.width,
        height = roi.height,
        fallback = fallback
    );

    Ok(CoarseDetails {
        roi,
        fallback,
        scale,
        working_size: (working.width(), working.height()),
        candidates: candidates.len(),
        merged,
        best_response: candidates.first().map(|c| c.response),
    })
}

#[cfg(feature = "rayon")]
fn run_scan(
    itg: &IntegralImage,
    geom: &ScanGeometry,
    parallel: bool,
) -> Vec<RegionCandidate> {
    let _span = trace_span!("coarse_scan", parallel = parallel).entered();
    if parallel {
        scan::scan_parallel(itg, geom)
    } else {
        scan::scan_sequential(itg, geom)
    }
}

#[cfg(not(feature = "rayon"))]
fn run_scan(
    itg: &IntegralImage,
    geom: &ScanGeometry,
    _parallel: bool,
) -> Vec<RegionCandidate> {
    let _span = trace_span!("coarse_scan", parallel = false).entered();
    scan::scan_sequential(itg, geom)
}
