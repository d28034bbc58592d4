//! Coordinate transformation functions.

use std::f64::consts::PI;

/// Convert degrees to radians as `2π·deg/360`.
#[inline]
pub fn deg_to_rad(angle_deg: f64) -> f64 {
    2.0 * PI * angle_deg / 360.0
}

/// A rotation about the origin with its sine and cosine precomputed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    sin: f64,
    cos: f64,
}

impl Rotation {
    /// Rotation by `angle_deg` degrees (counter-clockwise in a y-up frame).
    pub fn from_degrees(angle_deg: f64) -> Self {
        let (sin, cos) = deg_to_rad(angle_deg).sin_cos();
        Self { sin, cos }
    }

    pub fn sin(&self) -> f64 {
        self.sin
    }

    pub fn cos(&self) -> f64 {
        self.cos
    }

    /// Rotate the point `(x, y)`.
    #[inline]
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (x * self.cos - y * self.sin, x * self.sin + y * self.cos)
    }
}
