//! Discrete boundary points of a rotated ellipse.
//!
//! Sampling uses the whole-degree lookup table, so the ellipse rotation is
//! truncated to an integer number of degrees before use.

use crate::geometry::{Point, Pupil};
use crate::util::math::{round_i32, wrap_deg_i32};
use crate::util::trig::{cos_deg, sin_cos_deg, sin_deg};
use crate::util::{PupilError, PupilResult};

/// Lazy iterator over boundary points, one per `step_deg` degrees.
///
/// Cloning restarts from the current position; the sequence is a pure
/// function of the ellipse and the step.
#[derive(Clone, Debug)]
pub struct EllipsePoints {
    cx: f32,
    cy: f32,
    half_width: f32,
    half_height: f32,
    sin_a: f32,
    cos_a: f32,
    step_deg: usize,
    next_deg: usize,
}

/// Samples the outline of `pupil` every `step_deg` degrees in `[0, 360)`.
///
/// Degenerate ellipses yield coincident points; check
/// [`Pupil::has_outline`] first when that matters.
pub fn ellipse_points(pupil: &Pupil, step_deg: usize) -> PupilResult<EllipsePoints> {
    if step_deg == 0 {
        return Err(PupilError::InvalidParameter {
            name: "step_deg",
            reason: "angular step must be > 0",
        });
    }
    let angle = wrap_deg_i32(pupil.angle_deg as i32);
    let (sin_a, cos_a) = sin_cos_deg(angle);
    Ok(EllipsePoints {
        cx: pupil.cx,
        cy: pupil.cy,
        half_width: 0.5 * pupil.width,
        half_height: 0.5 * pupil.height,
        sin_a,
        cos_a,
        step_deg,
        next_deg: 0,
    })
}

impl Iterator for EllipsePoints {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.next_deg >= 360 {
            return None;
        }
        let deg = self.next_deg as i32;
        self.next_deg += self.step_deg;

        let x = self.half_width * cos_deg(deg);
        let y = self.half_height * sin_deg(deg);
        Some(Point::new(
            round_i32(self.cx + x * self.cos_a - y * self.sin_a),
            round_i32(self.cy + x * self.sin_a + y * self.cos_a),
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.next_deg >= 360 {
            0
        } else {
            (360 - self.next_deg).div_ceil(self.step_deg)
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for EllipsePoints {}

#[cfg(test)]
mod tests {
    use super::ellipse_points;
    use crate::geometry::{Point, Pupil};

    #[test]
    fn step_controls_point_count() {
        let pupil = Pupil::circle(0.0, 0.0, 10.0);
        assert_eq!(ellipse_points(&pupil, 1).unwrap().len(), 360);
        assert_eq!(ellipse_points(&pupil, 10).unwrap().count(), 36);
        assert_eq!(ellipse_points(&pupil, 7).unwrap().len(), 52);
        assert_eq!(ellipse_points(&pupil, 7).unwrap().count(), 52);
    }

    #[test]
    fn zero_step_is_rejected() {
        let pupil = Pupil::circle(0.0, 0.0, 10.0);
        assert!(ellipse_points(&pupil, 0).is_err());
    }

    #[test]
    fn rotation_by_ninety_swaps_axes() {
        let pupil = Pupil::new(50.0, 50.0, 40.0, 10.0, 90.0);
        let first = ellipse_points(&pupil, 90).unwrap().next().unwrap();
        assert_eq!(first, Point::new(50, 70));
    }

    #[test]
    fn negative_and_wrapped_angles_agree() {
        let a = Pupil::new(30.0, 30.0, 20.0, 12.0, -30.0);
        let b = Pupil::new(30.0, 30.0, 20.0, 12.0, 330.0);
        let pa: Vec<_> = ellipse_points(&a, 5).unwrap().collect();
        let pb: Vec<_> = ellipse_points(&b, 5).unwrap().collect();
        assert_eq!(pa, pb);
    }

    #[test]
    fn degenerate_ellipse_collapses_to_center() {
        let pupil = Pupil::new(12.0, 7.0, 0.0, 0.0, 0.0);
        assert!(ellipse_points(&pupil, 30)
            .unwrap()
            .all(|p| p == Point::new(12, 7)));
    }
}
