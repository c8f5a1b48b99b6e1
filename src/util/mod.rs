//! Shared utility helpers.

pub mod error;
pub(crate) mod math;
pub mod trig;

pub use error::{PupilError, PupilResult};
