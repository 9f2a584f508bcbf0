//! 2D vector helpers shared by the collision code
//!
//! `glam::Vec2` already covers add/scale/length. What lives here are the
//! operations with a degenerate case that must not leak NaN into the sim.

use glam::Vec2;

pub use crate::rotate;

/// Reflect `v` about a unit `normal`: v' = v - 2(v·n)n
#[inline]
pub fn reflect(v: Vec2, normal: Vec2) -> Vec2 {
    v - 2.0 * v.dot(normal) * normal
}

/// Normalize, or `None` for a zero-length (or non-finite) input
#[inline]
pub fn try_normalize(v: Vec2) -> Option<Vec2> {
    v.try_normalize()
}

/// Clamp a vector's magnitude to `max_len`, keeping its direction
pub fn clamp_length(v: Vec2, max_len: f32) -> Vec2 {
    if v.length() > max_len {
        match try_normalize(v) {
            Some(dir) => dir * max_len,
            None => Vec2::ZERO,
        }
    } else {
        v
    }
}

/// Replace a vector with any NaN/Inf component by zero.
///
/// Returns true if the vector had to be reset.
#[inline]
pub fn sanitize(v: &mut Vec2) -> bool {
    if v.is_finite() {
        false
    } else {
        *v = Vec2::ZERO;
        true
    }
}
