//! Geometric primitives: integer points, rectangles, pupil ellipses and the
//! boundary sampler.

mod pupil;
mod rect;
pub mod sampler;

pub use pupil::Pupil;
pub use rect::Rect;
pub use sampler::{ellipse_points, EllipsePoints};

/// Integer pixel coordinate; may lie outside the image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl Point {
    /// Creates a point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}
