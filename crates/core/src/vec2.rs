//! Vector math helpers shared by the arrow grid and the particle integrator.
//!
//! All functions are pure and operate on [`glam::DVec2`]. Angles follow the
//! canvas convention: y grows downward, so positive angles turn clockwise
//! from the +x axis.

use crate::error::FlowError;
use glam::DVec2;

/// Euclidean magnitude of `v`. Never negative; zero iff `v` is the zero vector.
pub fn magnitude(v: DVec2) -> f64 {
    v.length()
}

/// Angle from the +x axis to `v` in degrees, range `(-180, 180]`.
///
/// Measured clockwise in the y-down canvas convention:
/// `angle_degrees((1, 0)) == 0`, `angle_degrees((0, 1)) == 90`.
/// The zero vector maps to 0 (`atan2(0, 0)` is defined as 0).
pub fn angle_degrees(v: DVec2) -> f64 {
    let deg = v.y.atan2(v.x).to_degrees();
    // atan2 can return exactly -180 for (x < 0, y = -0.0); fold it onto +180.
    if deg <= -180.0 {
        deg + 360.0
    } else {
        deg
    }
}

/// Scales `v` to unit length.
///
/// Returns `FlowError::ZeroMagnitude` when `magnitude(v) == 0`; the division
/// is never performed, so no NaN can escape into rotations or positions.
pub fn normalize(v: DVec2) -> Result<DVec2, FlowError> {
    let mag = magnitude(v);
    if mag == 0.0 {
        return Err(FlowError::ZeroMagnitude);
    }
    Ok(v / mag)
}
