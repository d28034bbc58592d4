//! # Rendering Module
//!
//! The per-image stages of the halftone pipeline.
//!
//! ## Modules
//!
//! - [`normalize`]: color image to single-channel intensity field
//! - [`threshold`]: intensity vs. screen comparison, mask text form
//! - [`reconstruct`]: mask back to an RGB/RGBA bitmap
//!
//! The screen itself lives in [`crate::screen`]; [`crate::engine`] wires the
//! stages together.
//!
//! ## Usage Example
//!
//! ```
//! use halftone::render::{normalize, reconstruct, threshold};
//! use halftone::screen::EuclideanDot;
//! use image::{DynamicImage, GrayImage, Luma};
//!
//! let source = DynamicImage::ImageLuma8(GrayImage::from_pixel(32, 32, Luma([128])));
//!
//! let (intensity, mode) = normalize::normalize(&source)?;
//! let screen = EuclideanDot::new(8.0, 45.0).generate(32, 32);
//! let mask = threshold::build_mask(&intensity, &screen)?;
//! let output = reconstruct::reconstruct(&mask, mode, Default::default(), None)?;
//!
//! assert_eq!((output.width(), output.height()), (32, 32));
//! # Ok::<(), halftone::HalftoneError>(())
//! ```

pub mod normalize;
pub mod reconstruct;
pub mod threshold;

pub use normalize::{ColorMode, normalize};
pub use reconstruct::{AlphaPolicy, reconstruct};
pub use threshold::{build_mask, ink_count};
