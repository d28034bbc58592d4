//! # Euclidean Dot Screen
//!
//! A rotated, periodic dot pattern used as the threshold field for
//! halftoning.
//!
//! ## Formula
//!
//! ```text
//! pixel_div = 2 / spacing
//! (sx, sy)  = (x * pixel_div, y * pixel_div)
//! (rx, ry)  = rotate((sx, sy), angle)
//! value     = 0.5 - 0.25 * (sin(π(rx + 0.5)) + cos(π·ry))
//! ```
//!
//! `sin(π(rx + 0.5))` equals `cos(π·rx)`, so the screen is
//! `0.5 - 0.5·cos(π(rx+ry)/2)·cos(π(rx-ry)/2)`: a grid of round dots with one
//! dark and one light cell per `spacing` pixels along each rotated axis.
//! Values sit in [0, 1] up to floating-point rounding and are not clamped.
//!
//! ## Axis Order
//!
//! [`EuclideanDot::generate`] feeds the pixel *row* index as the first
//! coordinate and the column index as the second ([`ScreenAxes::RowFirst`]),
//! which is the orientation existing halftone node outputs were produced
//! with. At 0° and 45° the screen is symmetric and the order is invisible;
//! at other angles the dot grid is mirrored across the diagonal.
//! [`ScreenAxes::ColumnFirst`] selects the `(column, row)` order instead.

use std::f64::consts::PI;

use tracing::debug;

use super::transform::Rotation;
use crate::field::Field;
use crate::params::HalftoneParams;

/// Which pixel index feeds the screen's first coordinate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScreenAxes {
    /// `value(row, column)`.
    #[default]
    RowFirst,
    /// `value(column, row)`.
    ColumnFirst,
}

/// Rotated Euclidean dot screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EuclideanDot {
    spacing: f64,
    angle: f64,
    pixel_div: f64,
    rotation: Rotation,
    axes: ScreenAxes,
}

impl EuclideanDot {
    /// Build a screen from a dot spacing (pixels) and angle (degrees).
    ///
    /// `spacing` must be positive; the angle may be any real since the
    /// screen is periodic in it. Use [`EuclideanDot::from_params`] for
    /// boundary-validated input.
    pub fn new(spacing: f64, angle: f64) -> Self {
        Self {
            spacing,
            angle,
            pixel_div: 2.0 / spacing,
            rotation: Rotation::from_degrees(angle),
            axes: ScreenAxes::default(),
        }
    }

    pub fn from_params(params: &HalftoneParams) -> Self {
        Self::new(params.spacing(), params.angle())
    }

    /// Choose which pixel index [`generate`](Self::generate) passes first.
    pub fn with_axes(mut self, axes: ScreenAxes) -> Self {
        self.axes = axes;
        self
    }

    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn axes(&self) -> ScreenAxes {
        self.axes
    }

    /// Scale then rotate a pixel coordinate into screen space.
    #[inline]
    pub fn to_screen(&self, x: f64, y: f64) -> (f64, f64) {
        self.rotation.apply(x * self.pixel_div, y * self.pixel_div)
    }

    /// Screen value at a (possibly fractional) pixel coordinate.
    #[inline]
    pub fn value(&self, x: f64, y: f64) -> f64 {
        let (rx, ry) = self.to_screen(x, y);
        0.5 - (0.25 * ((PI * (rx + 0.5)).sin() + (PI * ry).cos()))
    }

    /// Evaluate the screen at every pixel of a `width x height` image.
    ///
    /// Cell `(x, y)` of the result holds `value(y, x)` under
    /// [`ScreenAxes::RowFirst`] and `value(x, y)` under
    /// [`ScreenAxes::ColumnFirst`].
    pub fn generate(&self, width: usize, height: usize) -> Field<f64> {
        debug!(
            width,
            height,
            spacing = self.spacing,
            angle = self.angle,
            axes = ?self.axes,
            "Generating dot screen"
        );
        match self.axes {
            ScreenAxes::RowFirst => {
                Field::from_fn(width, height, |x, y| self.value(y as f64, x as f64))
            }
            ScreenAxes::ColumnFirst => {
                Field::from_fn(width, height, |x, y| self.value(x as f64, y as f64))
            }
        }
    }

    /// The two lattice vectors, in [`value`](Self::value) coordinates, along
    /// which the screen repeats.
    ///
    /// Moving by either vector advances `rx` (resp. `ry`) by exactly 2 while
    /// leaving the other coordinate unchanged.
    pub fn period(&self) -> [(f64, f64); 2] {
        let (sin, cos) = (self.rotation.sin(), self.rotation.cos());
        [
            (self.spacing * cos, -self.spacing * sin),
            (self.spacing * sin, self.spacing * cos),
        ]
    }
}

impl Default for EuclideanDot {
    fn default() -> Self {
        Self::from_params(&HalftoneParams::default())
    }
}
