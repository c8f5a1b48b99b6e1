//! Numeric helpers shared by the sampling and scoring loops.

/// Wraps a whole-degree angle into `[0, 360)`.
pub(crate) fn wrap_deg_i32(angle_deg: i32) -> i32 {
    angle_deg.rem_euclid(360)
}

/// Rounds half away from zero and converts to `i32`.
///
/// Non-finite inputs saturate the same way `as` casts do.
#[inline]
pub(crate) fn round_i32(value: f32) -> i32 {
    value.round() as i32
}

/// Rounds half to even and converts to `i32`, saturating like `as` casts.
#[inline]
pub(crate) fn round_even_i32(value: f32) -> i32 {
    value.round_ties_even() as i32
}

/// Ramanujan's first approximation of an ellipse perimeter from semi-axes.
pub(crate) fn ellipse_perimeter(a: f32, b: f32) -> f32 {
    let a = a.abs();
    let b = b.abs();
    std::f32::consts::PI * (3.0 * (a + b) - ((3.0 * a + b) * (a + 3.0 * b)).sqrt())
}
