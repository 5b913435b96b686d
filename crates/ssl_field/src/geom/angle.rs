//! Angle normalization helpers (radians)

use std::f64::consts::{PI, TAU};

/// Normalize to (-pi, +pi]
pub fn normalize_angle(angle: f64) -> f64 {
    PI - normalize_angle_positive(PI - angle)
}

/// Normalize to [0, 2pi)
pub fn normalize_angle_positive(angle: f64) -> f64 {
    let normalized = angle.rem_euclid(TAU);
    // rem_euclid rounds tiny negative inputs up to exactly TAU
    if normalized >= TAU {
        0.0
    } else {
        normalized
    }
}

/// Difference such that `angle2 = angle1 + diff`, normalized to (-pi, +pi]
pub fn angle_diff(angle1: f64, angle2: f64) -> f64 {
    normalize_angle(angle2 - angle1)
}
