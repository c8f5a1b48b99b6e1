//! Inner/outer contrast across a pupil outline.
//!
//! Follows the outline contrast measure of Santini, Fuhl and Kasneci,
//! "PuRe: Robust pupil detection for real-time pervasive eye tracking"
//! (CVIU 2018).

use crate::geometry::{ellipse_points, Point, Pupil};
use crate::image::ImageView;
use crate::util::math::{round_even_i32, round_i32};

/// Angular spacing of the evaluated outline points.
pub const OUTLINE_STEP_DEG: usize = 10;
/// Half-length of each sampled segment as a fraction of the minor axis.
pub const SEGMENT_FRACTION: f32 = 0.15;

/// Line through the pupil center, `y = slope * x + intercept`.
#[derive(Clone, Copy)]
struct CenterLine {
    slope: f32,
    intercept: f32,
}

impl CenterLine {
    fn y_at(&self, x: i32) -> i32 {
        round_i32(self.slope * x as f32 + self.intercept)
    }

    fn x_at(&self, y: i32) -> i32 {
        round_i32((y as f32 - self.intercept) / self.slope)
    }
}

/// Which coordinate is stepped while sampling a segment.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Walk {
    Columns,
    Rows,
}

fn inside(frame: &ImageView<'_, u8>, p: Point) -> bool {
    frame.get_i32(p.x, p.y).is_some()
}

/// Rounded mean intensity over `delta` samples produced by `at(t)` for
/// `t` in `range`.
fn side_mean<F>(frame: &ImageView<'_, u8>, range: std::ops::Range<i32>, delta: i32, at: F) -> Option<f32>
where
    F: Fn(i32) -> Point,
{
    let mut sum = 0.0f32;
    for t in range {
        let p = at(t);
        sum += f32::from(*frame.get_i32(p.x, p.y)?);
    }
    Some((sum / delta as f32).round())
}

/// Means on both sides of `p` along the center line: the side with smaller
/// coordinates first. `None` when the segment leaves the frame.
fn segment_sides(
    frame: &ImageView<'_, u8>,
    p: Point,
    line: CenterLine,
    walk: Walk,
    delta: i32,
) -> Option<(f32, f32)> {
    if delta <= 0 {
        return None;
    }
    let at = |t: i32| match walk {
        Walk::Columns => Point::new(t, line.y_at(t)),
        Walk::Rows => Point::new(line.x_at(t), t),
    };
    let pivot = match walk {
        Walk::Columns => p.x,
        Walk::Rows => p.y,
    };
    let (first, last) = (pivot.saturating_sub(delta), pivot.saturating_add(delta));
    if !inside(frame, at(first)) || !inside(frame, at(last)) {
        return None;
    }
    let before = side_mean(frame, first..pivot, delta, at)?;
    let after = side_mean(frame, pivot + 1..last + 1, delta, at)?;
    Some((before, after))
}

/// Fraction of outline points where the outside is brighter than the inside
/// by more than `bias` gray levels.
///
/// Outline points are taken every [`OUTLINE_STEP_DEG`] degrees. At each point
/// a segment of `2 * trunc(0.15 * trunc(minor_axis))` pixels is sampled along
/// the line through the pupil center (rounded half to even), stepping columns
/// when the point is more horizontal than vertical from the center and rows
/// otherwise. Points
/// exactly level with or exactly above/below the center are skipped.
/// Points whose segment leaves the frame still count as evaluated but can
/// never be valid.
///
/// Returns `None` when the pupil has no outline and `Some(0.0)` when no point
/// could be evaluated.
pub fn outline_contrast_confidence(
    frame: ImageView<'_, u8>,
    pupil: &Pupil,
    bias: f32,
) -> Option<f32> {
    if !pupil.has_outline() {
        return None;
    }

    let delta = (SEGMENT_FRACTION * pupil.minor_axis().trunc()) as i32;
    let center = Point::new(round_even_i32(pupil.cx), round_even_i32(pupil.cy));

    let mut evaluated = 0usize;
    let mut valid = 0usize;
    for p in ellipse_points(pupil, OUTLINE_STEP_DEG).ok()? {
        // Outlines far beyond the frame saturate to the i32 range.
        let dx = p.x.saturating_sub(center.x);
        let dy = p.y.saturating_sub(center.y);
        let slope = if dx != 0 { dy as f32 / dx as f32 } else { 0.0 };
        if slope == 0.0 {
            continue;
        }
        let line = CenterLine {
            slope,
            intercept: center.y as f32 - slope * center.x as f32,
        };
        let (walk, outer_first) = if dx.unsigned_abs() > dy.unsigned_abs() {
            (Walk::Columns, p.x < center.x)
        } else {
            (Walk::Rows, p.y < center.y)
        };

        evaluated += 1;
        let Some((before, after)) = segment_sides(&frame, p, line, walk, delta) else {
            continue;
        };
        let supported = if outer_first {
            before > after + bias
        } else {
            after > before + bias
        };
        if supported {
            valid += 1;
        }
    }

    if evaluated == 0 {
        return Some(0.0);
    }
    Some(valid as f32 / evaluated as f32)
}

#[cfg(test)]
mod tests {
    use super::outline_contrast_confidence;
    use crate::geometry::Pupil;
    use crate::image::ImageView;

    fn disc(width: usize, height: usize, cx: f32, cy: f32, r: f32, fg: u8, bg: u8) -> Vec<u8> {
        let mut data = vec![bg; width * height];
        for y in 0..height {
            for x in 0..width {
                let dx = x as f32 - cx;
                let dy = y as f32 - cy;
                if dx * dx + dy * dy <= r * r {
                    data[y * width + x] = fg;
                }
            }
        }
        data
    }

    #[test]
    fn inverted_disc_scores_zero() {
        let data = disc(120, 120, 60.0, 60.0, 25.0, 230, 20);
        let view = ImageView::from_slice(&data, 120, 120).unwrap();
        let score = outline_contrast_confidence(view, &Pupil::circle(60.0, 60.0, 25.0), 5.0);
        assert_eq!(score, Some(0.0));
    }

    #[test]
    fn tiny_pupil_has_no_valid_points() {
        let data = disc(40, 40, 20.0, 20.0, 3.0, 0, 255);
        let view = ImageView::from_slice(&data, 40, 40).unwrap();
        // 0.15 * 6 truncates to an empty segment
        let score = outline_contrast_confidence(view, &Pupil::circle(20.0, 20.0, 3.0), 5.0);
        assert_eq!(score, Some(0.0));
    }

    #[test]
    fn outline_leaving_the_frame_lowers_the_score() {
        let data = disc(100, 100, 15.0, 50.0, 25.0, 10, 240);
        let view = ImageView::from_slice(&data, 100, 100).unwrap();
        let score = outline_contrast_confidence(view, &Pupil::circle(15.0, 50.0, 25.0), 5.0)
            .unwrap();
        assert!(score > 0.2 && score < 0.8, "score {score}");
    }
}
