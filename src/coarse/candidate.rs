//! Candidate regions produced by the center-surround scan.

use std::cmp::Ordering;

use crate::geometry::Rect;

/// Per-pixel response maximum recorded during the scan.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegionCandidate {
    /// Region spanning halfway between the inner and outer windows,
    /// in working (downscaled) coordinates.
    pub rect: Rect,
    /// Outer mean minus inner mean, in `[-1, 1]`.
    pub response: f32,
    /// Window center column.
    pub x: usize,
    /// Window center row.
    pub y: usize,
    /// Inner half-width.
    pub radius: usize,
}

impl RegionCandidate {
    pub(crate) fn new(x: usize, y: usize, radius: usize, response: f32) -> Self {
        Self {
            rect: Rect::new(x - 2 * radius, y - 2 * radius, 4 * radius, 4 * radius),
            response,
            x,
            y,
            radius,
        }
    }
}

fn candidate_cmp_desc(a: &RegionCandidate, b: &RegionCandidate) -> Ordering {
    b.response
        .total_cmp(&a.response)
        .then_with(|| a.y.cmp(&b.y))
        .then_with(|| a.x.cmp(&b.x))
        .then_with(|| a.radius.cmp(&b.radius))
}

/// Sorts candidates by descending response with deterministic tie-breaking.
pub(crate) fn sort_candidates_desc(candidates: &mut [RegionCandidate]) {
    candidates.sort_by(candidate_cmp_desc);
}

/// Greedily unions sorted candidates until the union is wider than
/// `min_width` and taller than `min_height`.
///
/// Returns the union and the number of candidates merged into it; the union
/// is empty when `candidates` is.
pub(crate) fn merge_until_covered<F>(
    candidates: &[RegionCandidate],
    min_width: usize,
    min_height: usize,
    mut on_merge: F,
) -> (Rect, usize)
where
    F: FnMut(&RegionCandidate),
{
    let mut coverage = Rect::default();
    let mut merged = 0usize;
    for candidate in candidates {
        coverage = coverage.union(&candidate.rect);
        merged += 1;
        on_merge(candidate);
        if coverage.width > min_width && coverage.height > min_height {
            break;
        }
    }
    (coverage, merged)
}

#[cfg(test)]
mod tests {
    use super::{merge_until_covered, sort_candidates_desc, RegionCandidate};
    use crate::geometry::Rect;

    #[test]
    fn candidate_rect_spans_twice_the_radius() {
        let c = RegionCandidate::new(20, 30, 4, 0.5);
        assert_eq!(c.rect, Rect::new(12, 22, 16, 16));
    }

    #[test]
    fn sort_is_descending_and_deterministic() {
        let mut items = vec![
            RegionCandidate::new(10, 10, 2, 0.2),
            RegionCandidate::new(12, 10, 2, 0.7),
            RegionCandidate::new(11, 10, 2, 0.7),
        ];
        sort_candidates_desc(&mut items);
        let order: Vec<_> = items.iter().map(|c| (c.x, c.response)).collect();
        assert_eq!(order, vec![(11, 0.7), (12, 0.7), (10, 0.2)]);
    }

    #[test]
    fn merge_stops_once_coverage_exceeds_minimum() {
        let items = vec![
            RegionCandidate::new(10, 10, 2, 0.9),
            RegionCandidate::new(20, 10, 2, 0.8),
            RegionCandidate::new(40, 40, 2, 0.7),
        ];
        let mut seen = 0;
        let (rect, merged) = merge_until_covered(&items, 15, 7, |_| seen += 1);
        assert_eq!(merged, 2);
        assert_eq!(seen, 2);
        assert_eq!(rect, Rect::new(6, 6, 18, 8));
    }

    #[test]
    fn merge_of_nothing_is_empty() {
        let (rect, merged) = merge_until_covered(&[], 1, 1, |_| {});
        assert!(rect.is_empty());
        assert_eq!(merged, 0);
    }
}
