//! Pupil hypothesis as produced by an external ellipse fitter.

use crate::util::math::ellipse_perimeter;

/// Rotated ellipse describing a candidate pupil outline.
///
/// `width` and `height` are full axis lengths (not semi-axes) along the
/// ellipse's own x and y directions before rotation by `angle_deg`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pupil {
    /// Center column.
    pub cx: f32,
    /// Center row.
    pub cy: f32,
    /// Full axis length along the rotated x direction.
    pub width: f32,
    /// Full axis length along the rotated y direction.
    pub height: f32,
    /// Rotation in degrees; any value, normalized by consumers.
    pub angle_deg: f32,
}

impl Pupil {
    /// Creates a hypothesis from center, full axis lengths and rotation.
    pub fn new(cx: f32, cy: f32, width: f32, height: f32, angle_deg: f32) -> Self {
        Self {
            cx,
            cy,
            width,
            height,
            angle_deg,
        }
    }

    /// Circle of the given radius.
    pub fn circle(cx: f32, cy: f32, radius: f32) -> Self {
        Self::new(cx, cy, 2.0 * radius, 2.0 * radius, 0.0)
    }

    /// Center as `[x, y]`.
    pub fn center(&self) -> [f32; 2] {
        [self.cx, self.cy]
    }

    /// Shorter full axis length.
    pub fn minor_axis(&self) -> f32 {
        self.width.min(self.height)
    }

    /// Longer full axis length.
    pub fn major_axis(&self) -> f32 {
        self.width.max(self.height)
    }

    /// Perimeter estimate (Ramanujan) in pixels.
    pub fn circumference(&self) -> f32 {
        ellipse_perimeter(0.5 * self.major_axis(), 0.5 * self.minor_axis())
    }

    /// True when both axes are finite and strictly positive.
    pub fn has_outline(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// True for an outline whose center lies at non-negative finite coordinates.
    pub fn is_valid(&self) -> bool {
        self.has_outline()
            && self.cx.is_finite()
            && self.cy.is_finite()
            && self.cx >= 0.0
            && self.cy >= 0.0
    }

    /// True when the hypothesis is valid, its center lies inside a
    /// `width x height` image and neither axis is longer than the image
    /// diagonal.
    pub fn is_within(&self, width: usize, height: usize) -> bool {
        let diagonal = (width as f32).hypot(height as f32);
        self.is_valid()
            && self.cx < width as f32
            && self.cy < height as f32
            && self.major_axis() <= diagonal
    }
}
