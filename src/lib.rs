//! Pupilcore locates and scores pupil candidates in grayscale eye images.
//!
//! Two independent stages are provided:
//!
//! * [`coarse_locate`] shrinks a frame, scans it with a multi-scale
//!   dark-center / bright-surround feature over an integral image and returns
//!   a region of interest likely to contain the pupil.
//! * The confidence estimators ([`outline_contrast_confidence`],
//!   [`angular_spread_confidence`], [`aspect_ratio_confidence`],
//!   [`edge_ratio_confidence`]) score an elliptical pupil hypothesis produced
//!   elsewhere. [`ConfidenceReport`] runs all of them at once.
//!
//! Everything is synchronous and stateless. Optional features: `rayon`
//! (parallel scan and estimators), `tracing` (spans and events) and
//! `image-io` (loading frames and edge maps from disk).

pub mod coarse;
pub mod confidence;
pub mod geometry;
pub mod image;
pub mod lowlevel;
mod trace;
pub mod util;

#[cfg(feature = "image-io")]
pub use crate::image::io;

pub use coarse::{
    coarse_locate, coarse_locate_detailed, CoarseConfig, CoarseDetails, CoarseObserver,
    RegionCandidate,
};
pub use confidence::{
    angular_spread_confidence, aspect_ratio_confidence, edge_ratio_confidence,
    outline_contrast_confidence, ConfidenceConfig, ConfidenceReport, EdgeRatio,
};
pub use geometry::{ellipse_points, EllipsePoints, Point, Pupil, Rect};
pub use crate::image::{ImageView, OwnedImage};
pub use util::{PupilError, PupilResult};
