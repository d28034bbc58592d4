//! # Dot Screens
//!
//! Threshold fields for halftoning.
//!
//! - [`euclid`]: rotated Euclidean dot screen
//! - [`transform`]: rotation primitives
//!
//! ## Example
//!
//! ```
//! use halftone::screen::EuclideanDot;
//!
//! let screen = EuclideanDot::new(8.0, 45.0);
//! let field = screen.generate(64, 32);
//! assert_eq!(field.shape(), (64, 32));
//! ```

pub mod euclid;
pub mod transform;

pub use euclid::{EuclideanDot, ScreenAxes};
pub use transform::Rotation;
