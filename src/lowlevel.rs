//! Low-level building blocks behind the high-level API.
//!
//! Exposed for callers that want to reuse the integral image, the resampler
//! or the whole-degree trigonometry in their own detectors.

pub use crate::image::resize::{downscale_by, resize_bilinear};
pub use crate::image::IntegralImage;
pub use crate::util::trig::{cos_deg, sin_cos_deg, sin_deg, TABLE_LEN};
