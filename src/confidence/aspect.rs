//! Shape plausibility from the axis ratio.

use crate::geometry::Pupil;

/// Minor over major axis: 1 for a circle, approaching 0 as the outline
/// elongates. `None` when the pupil has no outline.
pub fn aspect_ratio_confidence(pupil: &Pupil) -> Option<f32> {
    if !pupil.has_outline() {
        return None;
    }
    Some(pupil.minor_axis() / pupil.major_axis())
}

#[cfg(test)]
mod tests {
    use super::aspect_ratio_confidence;
    use crate::geometry::Pupil;

    #[test]
    fn half_as_wide_scores_half() {
        let p = Pupil::new(10.0, 10.0, 10.0, 20.0, 45.0);
        assert_eq!(aspect_ratio_confidence(&p), Some(0.5));
    }

    #[test]
    fn missing_outline_is_not_scored() {
        let p = Pupil::new(10.0, 10.0, 0.0, 20.0, 0.0);
        assert_eq!(aspect_ratio_confidence(&p), None);
    }
}
