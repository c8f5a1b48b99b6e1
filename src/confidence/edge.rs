//! Edge density along a pupil outline.

use crate::geometry::{ellipse_points, Point, Pupil, Rect};
use crate::image::ImageView;
use crate::util::{PupilError, PupilResult};

/// Result of [`edge_ratio_confidence`].
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeRatio {
    /// Matched edge pixels over the outline circumference, capped at 1.
    pub confidence: f32,
    /// Edge pixels inside the outline band, in row-major order.
    pub edge_points: Vec<Point>,
}

/// Pixels within `thickness / 2` of the closed outline polyline.
struct OutlineBand {
    area: Rect,
    cells: Vec<bool>,
}

impl OutlineBand {
    fn rasterize(pupil: &Pupil, thickness: usize, width: usize, height: usize) -> PupilResult<Self> {
        let outline: Vec<Point> = ellipse_points(pupil, 1)?.collect();
        let half = 0.5 * thickness as f32;
        let reach = half.ceil() as i32;

        let (mut x0, mut y0, mut x1, mut y1) = (i32::MAX, i32::MAX, i32::MIN, i32::MIN);
        for p in &outline {
            x0 = x0.min(p.x.saturating_sub(reach));
            y0 = y0.min(p.y.saturating_sub(reach));
            x1 = x1.max(p.x.saturating_add(reach + 1));
            y1 = y1.max(p.y.saturating_add(reach + 1));
        }
        let x0 = x0.clamp(0, width as i32);
        let y0 = y0.clamp(0, height as i32);
        let x1 = x1.clamp(0, width as i32);
        let y1 = y1.clamp(0, height as i32);
        let area = Rect::new(
            x0 as usize,
            y0 as usize,
            (x1 - x0).max(0) as usize,
            (y1 - y0).max(0) as usize,
        );

        let mut band = Self {
            area,
            cells: vec![false; area.area()],
        };
        if area.is_empty() {
            return Ok(band);
        }
        let n = outline.len();
        for i in 0..n {
            band.stroke(outline[i], outline[(i + 1) % n], half, reach);
        }
        Ok(band)
    }

    /// Marks cells whose centers lie within `half` of segment `a`-`b`.
    fn stroke(&mut self, a: Point, b: Point, half: f32, reach: i32) {
        let left = a.x.min(b.x).saturating_sub(reach).max(self.area.x as i32);
        let top = a.y.min(b.y).saturating_sub(reach).max(self.area.y as i32);
        let right = a.x.max(b.x).saturating_add(reach).min(self.area.right() as i32 - 1);
        let bottom = a.y.max(b.y).saturating_add(reach).min(self.area.bottom() as i32 - 1);

        let limit = half * half;
        for y in top..=bottom {
            for x in left..=right {
                if distance_sq_to_segment(x, y, a, b) <= limit {
                    let idx = (y as usize - self.area.y) * self.area.width
                        + (x as usize - self.area.x);
                    self.cells[idx] = true;
                }
            }
        }
    }

    fn contains(&self, x: usize, y: usize) -> bool {
        self.area.contains(x, y)
            && self.cells[(y - self.area.y) * self.area.width + (x - self.area.x)]
    }
}

fn distance_sq_to_segment(x: i32, y: i32, a: Point, b: Point) -> f32 {
    let (px, py) = (x as f32, y as f32);
    let (ax, ay) = (a.x as f32, a.y as f32);
    let (vx, vy) = (b.x as f32 - ax, b.y as f32 - ay);
    let len_sq = vx * vx + vy * vy;
    let t = if len_sq > 0.0 {
        (((px - ax) * vx + (py - ay) * vy) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let dx = px - (ax + t * vx);
    let dy = py - (ay + t * vy);
    dx * dx + dy * dy
}

/// Scores how densely `edges` supports the outline of `pupil`.
///
/// The outline is drawn as a closed band `band` pixels thick; every non-zero
/// pixel of `edges` inside the band is collected, and the score is the
/// collected count over [`Pupil::circumference`], capped at 1.
///
/// Returns `Ok(None)` when the pupil is not a valid hypothesis inside the
/// edge map, and an error when `band` is zero.
pub fn edge_ratio_confidence(
    edges: ImageView<'_, u8>,
    pupil: &Pupil,
    band: usize,
) -> PupilResult<Option<EdgeRatio>> {
    if band == 0 {
        return Err(PupilError::InvalidParameter {
            name: "band",
            reason: "band thickness must be > 0",
        });
    }
    if !pupil.is_within(edges.width(), edges.height()) {
        return Ok(None);
    }

    let mask = OutlineBand::rasterize(pupil, band, edges.width(), edges.height())?;
    let mut edge_points = Vec::new();
    for y in mask.area.y..mask.area.bottom() {
        let Some(row) = edges.row(y) else {
            continue;
        };
        for x in mask.area.x..mask.area.right() {
            if row[x] != 0 && mask.contains(x, y) {
                edge_points.push(Point::new(x as i32, y as i32));
            }
        }
    }

    let confidence = (edge_points.len() as f32 / pupil.circumference()).min(1.0);
    Ok(Some(EdgeRatio {
        confidence,
        edge_points,
    }))
}

#[cfg(test)]
mod tests {
    use super::{edge_ratio_confidence, OutlineBand};
    use crate::geometry::{Point, Pupil};
    use crate::image::ImageView;

    #[test]
    fn zero_band_is_rejected() {
        let data = vec![0u8; 100];
        let view = ImageView::from_slice(&data, 10, 10).unwrap();
        assert!(edge_ratio_confidence(view, &Pupil::circle(5.0, 5.0, 3.0), 0).is_err());
    }

    #[test]
    fn center_outside_the_map_is_not_scored() {
        let data = vec![255u8; 100];
        let view = ImageView::from_slice(&data, 10, 10).unwrap();
        let result = edge_ratio_confidence(view, &Pupil::circle(12.0, 5.0, 3.0), 3).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn empty_edge_map_scores_zero() {
        let data = vec![0u8; 64 * 64];
        let view = ImageView::from_slice(&data, 64, 64).unwrap();
        let result = edge_ratio_confidence(view, &Pupil::circle(32.0, 32.0, 12.0), 3)
            .unwrap()
            .unwrap();
        assert_eq!(result.confidence, 0.0);
        assert!(result.edge_points.is_empty());
    }

    #[test]
    fn band_is_a_ring_around_the_outline() {
        let pupil = Pupil::circle(30.0, 30.0, 15.0);
        let band = OutlineBand::rasterize(&pupil, 3, 60, 60).unwrap();
        assert!(band.contains(45, 30));
        assert!(band.contains(30, 15));
        assert!(!band.contains(30, 30));
        assert!(!band.contains(50, 30));
    }

    #[test]
    fn points_come_back_in_row_major_order() {
        let data = vec![255u8; 50 * 50];
        let view = ImageView::from_slice(&data, 50, 50).unwrap();
        let result = edge_ratio_confidence(view, &Pupil::circle(25.0, 25.0, 10.0), 1)
            .unwrap()
            .unwrap();
        let mut sorted = result.edge_points.clone();
        sorted.sort_by_key(|p: &Point| (p.y, p.x));
        assert_eq!(sorted, result.edge_points);
    }
}
