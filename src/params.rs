//! # Halftone Parameters
//!
//! The parameter schema for a halftone invocation and its validation.
//!
//! Parameters are described once, in the static [`PARAM_SPECS`] table, and
//! every path that produces a [`HalftoneParams`] (constructor, setters,
//! string-keyed `set_param`, serde) checks values against that table. A
//! `HalftoneParams` in hand is therefore always in range.
//!
//! | Name | Constraint | Default | Meaning |
//! |------|------------|---------|---------|
//! | `spacing` | 0 < spacing ≤ 800 | 8 | dot pitch in pixels |
//! | `angle` | 0 ≤ angle < 360 | 45 | screen rotation, degrees |
//!
//! ## Example
//!
//! ```
//! use halftone::params::HalftoneParams;
//!
//! let mut params = HalftoneParams::default();
//! params.set_param("spacing", "12")?;
//! assert_eq!(params.spacing(), 12.0);
//!
//! // Out of range values are rejected
//! assert!(params.set_angle(360.0).is_err());
//! # Ok::<(), halftone::HalftoneError>(())
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{HalftoneError, Result};

/// One end of a numeric range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    Inclusive(f64),
    Exclusive(f64),
}

impl Bound {
    fn value(self) -> f64 {
        match self {
            Bound::Inclusive(v) | Bound::Exclusive(v) => v,
        }
    }
}

/// Description of a single parameter for UIs and validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub min: Bound,
    pub max: Bound,
    pub default: f64,
    /// Suggested slider step.
    pub step: f64,
    pub description: &'static str,
}

impl ParamSpec {
    /// Check `value` against both bounds. NaN is never in range.
    pub fn contains(&self, value: f64) -> bool {
        let above_min = match self.min {
            Bound::Inclusive(m) => value >= m,
            Bound::Exclusive(m) => value > m,
        };
        let below_max = match self.max {
            Bound::Inclusive(m) => value <= m,
            Bound::Exclusive(m) => value < m,
        };
        above_min && below_max
    }

    /// Validate `value`, reporting the constraint on failure.
    pub fn check(&self, value: f64) -> Result<f64> {
        if self.contains(value) {
            Ok(value)
        } else {
            Err(HalftoneError::ParameterOutOfRange {
                name: self.name,
                value,
                constraint: self.constraint(),
            })
        }
    }

    /// Human-readable constraint built from the bounds, e.g.
    /// `0 < spacing <= 800`.
    pub fn constraint(&self) -> String {
        let lower = match self.min {
            Bound::Inclusive(_) => "<=",
            Bound::Exclusive(_) => "<",
        };
        let upper = match self.max {
            Bound::Inclusive(_) => "<=",
            Bound::Exclusive(_) => "<",
        };
        format!(
            "{} {} {} {} {}",
            self.min.value(),
            lower,
            self.name,
            upper,
            self.max.value()
        )
    }
}

impl fmt::Display for ParamSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let open = match self.min {
            Bound::Inclusive(_) => '[',
            Bound::Exclusive(_) => '(',
        };
        let close = match self.max {
            Bound::Inclusive(_) => ']',
            Bound::Exclusive(_) => ')',
        };
        write!(
            f,
            "{:<8} {:<8} {}{}, {}{}  default {}  step {}  {}",
            self.name,
            self.label,
            open,
            self.min.value(),
            self.max.value(),
            close,
            self.default,
            self.step,
            self.description
        )
    }
}

pub const SPACING: ParamSpec = ParamSpec {
    name: "spacing",
    label: "Spacing",
    min: Bound::Exclusive(0.0),
    max: Bound::Inclusive(800.0),
    default: 8.0,
    step: 0.5,
    description: "Halftone dot spacing in pixels",
};

pub const ANGLE: ParamSpec = ParamSpec {
    name: "angle",
    label: "Angle",
    min: Bound::Inclusive(0.0),
    max: Bound::Exclusive(360.0),
    default: 45.0,
    step: 1.0,
    description: "Halftone screen angle in degrees",
};

/// All parameters, in display order.
pub const PARAM_SPECS: &[ParamSpec] = &[SPACING, ANGLE];

/// Look up a parameter spec by name.
pub fn spec(name: &str) -> Option<&'static ParamSpec> {
    PARAM_SPECS.iter().find(|s| s.name == name)
}

/// Unvalidated wire form of [`HalftoneParams`].
#[derive(Debug, Deserialize)]
struct RawParams {
    #[serde(default = "default_spacing")]
    spacing: f64,
    #[serde(default = "default_angle")]
    angle: f64,
}

fn default_spacing() -> f64 {
    SPACING.default
}

fn default_angle() -> f64 {
    ANGLE.default
}

impl TryFrom<RawParams> for HalftoneParams {
    type Error = HalftoneError;

    fn try_from(raw: RawParams) -> Result<Self> {
        HalftoneParams::new(raw.spacing, raw.angle)
    }
}

/// Validated halftone parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawParams")]
pub struct HalftoneParams {
    spacing: f64,
    angle: f64,
}

impl Default for HalftoneParams {
    fn default() -> Self {
        Self {
            spacing: SPACING.default,
            angle: ANGLE.default,
        }
    }
}

impl HalftoneParams {
    /// Create parameters, rejecting values outside [`PARAM_SPECS`].
    pub fn new(spacing: f64, angle: f64) -> Result<Self> {
        Ok(Self {
            spacing: SPACING.check(spacing)?,
            angle: ANGLE.check(angle)?,
        })
    }

    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn set_spacing(&mut self, spacing: f64) -> Result<()> {
        self.spacing = SPACING.check(spacing)?;
        Ok(())
    }

    pub fn set_angle(&mut self, angle: f64) -> Result<()> {
        self.angle = ANGLE.check(angle)?;
        Ok(())
    }

    /// Set a parameter by name from its string form.
    pub fn set_param(&mut self, name: &str, value: &str) -> Result<()> {
        let parsed = value.trim().parse::<f64>().map_err(|e| {
            HalftoneError::InvalidParameter(format!("Invalid value '{}' for {}: {}", value, name, e))
        })?;
        match name {
            "spacing" => self.set_spacing(parsed),
            "angle" => self.set_angle(parsed),
            _ => Err(HalftoneError::InvalidParameter(format!(
                "Unknown param '{}'. Available: spacing, angle",
                name
            ))),
        }
    }
}

impl fmt::Display for HalftoneParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "spacing={:.2} angle={:.1}", self.spacing, self.angle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_out_of_range(result: Result<HalftoneParams>, param: &str) {
        match result {
            Err(HalftoneError::ParameterOutOfRange { name, .. }) => assert_eq!(name, param),
            other => panic!("expected {} to be out of range, got {:?}", param, other),
        }
    }

    #[test]
    fn test_defaults() {
        let p = HalftoneParams::default();
        assert_eq!(p.spacing(), 8.0);
        assert_eq!(p.angle(), 45.0);
    }

    #[test]
    fn test_boundary_rejection() {
        assert_out_of_range(HalftoneParams::new(0.0, 45.0), "spacing");
        assert_out_of_range(HalftoneParams::new(800.0001, 45.0), "spacing");
        assert_out_of_range(HalftoneParams::new(-3.0, 45.0), "spacing");
        assert_out_of_range(HalftoneParams::new(8.0, 360.0), "angle");
        assert_out_of_range(HalftoneParams::new(8.0, -1.0), "angle");
    }

    #[test]
    fn test_boundary_acceptance() {
        assert!(HalftoneParams::new(800.0, 0.0).is_ok());
        assert!(HalftoneParams::new(f64::MIN_POSITIVE, 359.999).is_ok());
    }

    #[test]
    fn test_non_finite_rejected() {
        assert_out_of_range(HalftoneParams::new(f64::NAN, 45.0), "spacing");
        assert_out_of_range(HalftoneParams::new(f64::INFINITY, 45.0), "spacing");
        assert_out_of_range(HalftoneParams::new(8.0, f64::NAN), "angle");
    }

    #[test]
    fn test_setter_keeps_old_value_on_error() {
        let mut p = HalftoneParams::default();
        assert!(p.set_spacing(0.0).is_err());
        assert_eq!(p.spacing(), 8.0);
        assert!(p.set_angle(-0.5).is_err());
        assert_eq!(p.angle(), 45.0);
    }

    #[test]
    fn test_set_param_by_name() {
        let mut p = HalftoneParams::default();
        p.set_param("spacing", "16.5").unwrap();
        p.set_param("angle", " 15 ").unwrap();
        assert_eq!(p.spacing(), 16.5);
        assert_eq!(p.angle(), 15.0);
    }

    #[test]
    fn test_set_param_errors() {
        let mut p = HalftoneParams::default();
        assert!(matches!(
            p.set_param("gamma", "1.0"),
            Err(HalftoneError::InvalidParameter(_))
        ));
        assert!(matches!(
            p.set_param("spacing", "wide"),
            Err(HalftoneError::InvalidParameter(_))
        ));
        assert!(matches!(
            p.set_param("spacing", "0"),
            Err(HalftoneError::ParameterOutOfRange { .. })
        ));
    }

    #[test]
    fn test_deserialize_validates() {
        let p: HalftoneParams = serde_json::from_str(r#"{"spacing": 4, "angle": 10}"#).unwrap();
        assert_eq!(p.spacing(), 4.0);
        assert_eq!(p.angle(), 10.0);

        let p: HalftoneParams = serde_json::from_str("{}").unwrap();
        assert_eq!(p, HalftoneParams::default());

        assert!(serde_json::from_str::<HalftoneParams>(r#"{"angle": 360}"#).is_err());
        assert!(serde_json::from_str::<HalftoneParams>(r#"{"spacing": 0}"#).is_err());
    }

    #[test]
    fn test_serialize_roundtrip_fields() {
        let p = HalftoneParams::new(12.0, 30.0).unwrap();
        let json = serde_json::to_value(p).unwrap();
        assert_eq!(json["spacing"], 12.0);
        assert_eq!(json["angle"], 30.0);
    }

    #[test]
    fn test_spec_table() {
        assert_eq!(PARAM_SPECS.len(), 2);
        assert_eq!(spec("spacing"), Some(&SPACING));
        assert_eq!(spec("angle"), Some(&ANGLE));
        assert!(spec("image").is_none());
        for s in PARAM_SPECS {
            assert!(s.contains(s.default), "default for {} must be valid", s.name);
        }
    }

    #[test]
    fn test_spec_display() {
        let line = SPACING.to_string();
        assert!(line.starts_with("spacing"));
        assert!(line.contains("Spacing"));
        assert!(line.contains("(0, 800]"));
        assert!(line.contains("step 0.5"));
        assert!(ANGLE.to_string().contains("[0, 360)"));
    }

    #[test]
    fn test_constraint_follows_bounds() {
        assert_eq!(SPACING.constraint(), "0 < spacing <= 800");
        assert_eq!(ANGLE.constraint(), "0 <= angle < 360");

        let gamma = ParamSpec {
            name: "gamma",
            label: "Gamma",
            min: Bound::Inclusive(0.1),
            max: Bound::Inclusive(4.0),
            default: 1.0,
            step: 0.1,
            description: "Tone curve",
        };
        assert_eq!(gamma.constraint(), "0.1 <= gamma <= 4");
        match gamma.check(5.0) {
            Err(HalftoneError::ParameterOutOfRange { constraint, .. }) => {
                assert_eq!(constraint, "0.1 <= gamma <= 4")
            }
            other => panic!("expected out of range, got {:?}", other),
        }
    }
}
