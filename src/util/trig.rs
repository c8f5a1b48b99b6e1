//! Whole-degree sine/cosine lookup.
//!
//! The table holds `sin(i°)` for `i` in `0..=450`, so the cosine of any angle
//! in `[0, 360]` can be read as `SIN[450 - angle]`. Values are computed once
//! on first use and never mutated.

use std::sync::OnceLock;

/// Number of table entries (`0..=450` degrees).
pub const TABLE_LEN: usize = 451;

static SIN_TABLE: OnceLock<[f32; TABLE_LEN]> = OnceLock::new();

fn table() -> &'static [f32; TABLE_LEN] {
    SIN_TABLE.get_or_init(|| {
        let mut out = [0.0f32; TABLE_LEN];
        for (deg, value) in out.iter_mut().enumerate() {
            *value = (deg as f64).to_radians().sin() as f32;
        }
        out
    })
}

/// Returns `sin(angle_deg)` for `angle_deg` in `[0, 450]`.
///
/// # Panics
/// Panics if `angle_deg` lies outside the table; callers normalize first.
#[inline]
pub fn sin_deg(angle_deg: i32) -> f32 {
    table()[angle_deg as usize]
}

/// Returns `cos(angle_deg)` for `angle_deg` in `[0, 360]`.
#[inline]
pub fn cos_deg(angle_deg: i32) -> f32 {
    table()[(450 - angle_deg) as usize]
}

/// Returns `(sin, cos)` for `angle_deg` in `[-360, 360]`.
///
/// Negative angles are shifted by one full turn before the lookup.
#[inline]
pub fn sin_cos_deg(angle_deg: i32) -> (f32, f32) {
    let angle = if angle_deg < 0 {
        angle_deg + 360
    } else {
        angle_deg
    };
    (sin_deg(angle), cos_deg(angle))
}
