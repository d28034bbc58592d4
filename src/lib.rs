//! # Halftone - Rotated Dot-Screen Halftoning
//!
//! Halftone converts grayscale or color images into binary dot patterns that
//! simulate classic print halftoning. It provides:
//!
//! - **Dot screen**: a rotated, periodic Euclidean dot function
//! - **Thresholding**: intensity vs. screen comparison into a boolean mask
//! - **Reconstruction**: mask back to an RGB/RGBA bitmap matching the source
//! - **Collaborators**: traits for decoding and storing images, with
//!   filesystem and in-memory implementations
//!
//! ## Quick Start
//!
//! ```no_run
//! use halftone::{HalftoneParams, engine::halftone};
//!
//! let source = image::open("photo.jpg")?;
//! let params = HalftoneParams::new(8.0, 45.0)?;
//!
//! let output = halftone(&source, &params)?;
//! output.image.save("photo-halftone.png")?;
//!
//! # Ok::<(), halftone::HalftoneError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`engine`] | Pipeline and host-facing invocation |
//! | [`screen`] | Euclidean dot screen |
//! | [`render`] | Normalization, thresholding, reconstruction |
//! | [`params`] | Parameter schema and validation |
//! | [`field`] | 2D array type shared by all stages |
//! | [`store`] | Image source/store collaborators |
//! | [`error`] | Error types |

pub mod engine;
pub mod error;
pub mod field;
pub mod params;
pub mod render;
pub mod screen;
pub mod store;

// Re-exports for convenience
pub use engine::{HalftoneEngine, HalftoneInvocation, HalftoneOutput, HalftoneResult, halftone};
pub use error::{HalftoneError, Result};
pub use params::HalftoneParams;
pub use render::AlphaPolicy;
