//! Independent confidence estimators for a pupil hypothesis.
//!
//! Each estimator is a pure function of its inputs. Scores lie in `[0, 1]`;
//! `None` means the estimator does not apply to the hypothesis (for example,
//! a pupil without an outline) and must not be read as a low score.

mod aspect;
mod contrast;
mod edge;
mod spread;

pub use aspect::aspect_ratio_confidence;
pub use contrast::{outline_contrast_confidence, OUTLINE_STEP_DEG, SEGMENT_FRACTION};
pub use edge::{edge_ratio_confidence, EdgeRatio};
pub use spread::angular_spread_confidence;

use crate::geometry::{Point, Pupil};
use crate::image::ImageView;
use crate::trace::{trace_debug, trace_span};
use crate::util::{PupilError, PupilResult};

/// Parameters shared by the estimators in a [`ConfidenceReport`].
#[derive(Clone, Debug)]
pub struct ConfidenceConfig {
    /// Gray levels the outside must exceed the inside by at an outline point.
    pub contrast_bias: f32,
    /// Thickness in pixels of the band searched for edge pixels.
    pub edge_band: usize,
    /// Evaluate estimators concurrently (requires the `rayon` feature).
    pub parallel: bool,
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            contrast_bias: 5.0,
            edge_band: 5,
            parallel: false,
        }
    }
}

impl ConfidenceConfig {
    /// Checks parameter ranges.
    pub fn validate(&self) -> PupilResult<()> {
        if !self.contrast_bias.is_finite() {
            return Err(PupilError::InvalidParameter {
                name: "contrast_bias",
                reason: "must be finite",
            });
        }
        if self.edge_band == 0 {
            return Err(PupilError::InvalidParameter {
                name: "edge_band",
                reason: "band thickness must be > 0",
            });
        }
        Ok(())
    }
}

/// Scores of all four estimators for one hypothesis.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConfidenceReport {
    /// Inner/outer contrast along the outline; `None` without an outline.
    pub outline_contrast: Option<f32>,
    /// Quadrant coverage of the matched edge points; `None` without an
    /// edge map or when the edge ratio does not apply.
    pub angular_spread: Option<f32>,
    /// Minor over major axis; `None` without an outline.
    pub aspect_ratio: Option<f32>,
    /// `None` without an edge map or for an invalid hypothesis.
    pub edge_ratio: Option<f32>,
    /// Edge pixels matched by the edge-ratio estimator.
    pub edge_points: Vec<Point>,
}

impl ConfidenceReport {
    /// Runs every applicable estimator on `pupil`.
    ///
    /// `edges`, when given, must have the frame's dimensions.
    pub fn evaluate(
        frame: ImageView<'_, u8>,
        edges: Option<ImageView<'_, u8>>,
        pupil: &Pupil,
        cfg: &ConfidenceConfig,
    ) -> PupilResult<Self> {
        cfg.validate()?;
        if let Some(edges) = &edges {
            frame.ensure_same_size(edges)?;
        }
        let _span = trace_span!("confidence_report", parallel = cfg.parallel).entered();

        let (outline_contrast, (aspect_ratio, edge)) = run_estimators(
            || outline_contrast_confidence(frame, pupil, cfg.contrast_bias),
            || {
                let aspect = aspect_ratio_confidence(pupil);
                let edge = match edges {
                    Some(edges) => edge_ratio_confidence(edges, pupil, cfg.edge_band),
                    None => Ok(None),
                };
                (aspect, edge)
            },
            cfg.parallel,
        );

        let mut report = Self {
            outline_contrast,
            aspect_ratio,
            ..Self::default()
        };
        if let Some(edge) = edge? {
            report.angular_spread = Some(angular_spread_confidence(
                &edge.edge_points,
                pupil.center(),
            ));
            report.edge_ratio = Some(edge.confidence);
            report.edge_points = edge.edge_points;
        }

        trace_debug!(
            "confidence_scores",
            outline_contrast = report.outline_contrast.unwrap_or(f32::NAN),
            angular_spread = report.angular_spread.unwrap_or(f32::NAN),
            aspect_ratio = report.aspect_ratio.unwrap_or(f32::NAN),
            edge_ratio = report.edge_ratio.unwrap_or(f32::NAN),
        );
        Ok(report)
    }
}

#[cfg(feature = "rayon")]
fn run_estimators<A, B, RA, RB>(a: A, b: B, parallel: bool) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    if parallel {
        rayon::join(a, b)
    } else {
        (a(), b())
    }
}

#[cfg(not(feature = "rayon"))]
fn run_estimators<A, B, RA, RB>(a: A, b: B, _parallel: bool) -> (RA, RB)
where
    A: FnOnce() -> RA,
    B: FnOnce() -> RB,
{
    (a(), b())
}
