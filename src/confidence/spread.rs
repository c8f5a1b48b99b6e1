//! Angular coverage of supporting points around a center.

use crate::geometry::Point;

/// Fraction of the four quadrants around `center` holding at least one point.
///
/// A point with a negative offset on an axis lies on the negative side of
/// that axis; zero offsets count as positive. Returns one of
/// `0.0, 0.25, 0.5, 0.75, 1.0`.
pub fn angular_spread_confidence(points: &[Point], center: [f32; 2]) -> f32 {
    let mut quadrants = 0u8;
    for p in points {
        let left = (p.x as f32 - center[0]) < 0.0;
        let above = (p.y as f32 - center[1]) < 0.0;
        let bit = match (left, above) {
            (true, true) => 0,
            (false, true) => 1,
            (false, false) => 2,
            (true, false) => 3,
        };
        quadrants |= 1 << bit;
        if quadrants == 0b1111 {
            break;
        }
    }
    quadrants.count_ones() as f32 / 4.0
}

#[cfg(test)]
mod tests {
    use super::angular_spread_confidence;
    use crate::geometry::Point;

    #[test]
    fn no_points_no_spread() {
        assert_eq!(angular_spread_confidence(&[], [0.0, 0.0]), 0.0);
    }

    #[test]
    fn points_on_the_axes_count_as_positive() {
        let points = [Point::new(5, 5), Point::new(5, 9), Point::new(9, 5)];
        assert_eq!(angular_spread_confidence(&points, [5.0, 5.0]), 0.25);
    }

    #[test]
    fn opposite_quadrants_give_half() {
        let points = [Point::new(0, 0), Point::new(10, 10)];
        assert_eq!(angular_spread_confidence(&points, [5.0, 5.0]), 0.5);
    }
}
