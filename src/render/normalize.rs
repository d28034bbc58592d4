//! # Color/Channel Normalization
//!
//! Converts a decoded bitmap of any color type into a single-channel
//! intensity field in [0.0, 1.0] and remembers the source [`ColorMode`] so the
//! output can be rebuilt in a matching layout.
//!
//! ## Luminance
//!
//! Color pixels are reduced with the ITU-R 601-2 luma weights, evaluated in
//! 16.16 fixed point on 8-bit samples:
//!
//! ```text
//! L = (R * 19595 + G * 38470 + B * 7471 + 0x8000) >> 16
//! ```
//!
//! (19595, 38470 and 7471 are 0.299, 0.587 and 0.114 scaled by 65536.)
//! Grayscale sources are used as-is. 16-bit and float sources are first
//! reduced to 8 bits per sample. Alpha never contributes to luminance.
//!
//! Each 8-bit luminance value `L` becomes `L / 255` in the intensity field.

use image::{ColorType, DynamicImage, GenericImageView};
use rayon::prelude::*;
use tracing::debug;

use crate::error::{HalftoneError, Result};
use crate::field::Field;

/// Channel layout of a source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Luma,
    LumaAlpha,
    Rgb,
    Rgba,
}

impl ColorMode {
    /// Classify an `image` color type by its channels.
    pub fn of(color: ColorType) -> Self {
        match (color.has_color(), color.has_alpha()) {
            (false, false) => ColorMode::Luma,
            (false, true) => ColorMode::LumaAlpha,
            (true, false) => ColorMode::Rgb,
            (true, true) => ColorMode::Rgba,
        }
    }

    /// Layout of the halftoned output for a source in this mode.
    ///
    /// Four-channel sources come back as RGBA; everything else, including
    /// luma+alpha, comes back as RGB.
    pub fn output(self) -> ColorMode {
        match self {
            ColorMode::Rgba => ColorMode::Rgba,
            _ => ColorMode::Rgb,
        }
    }
}

/// ITU-R 601-2 luma of an 8-bit RGB triple.
#[inline]
pub fn luma601(r: u8, g: u8, b: u8) -> u8 {
    ((u32::from(r) * 19595 + u32::from(g) * 38470 + u32::from(b) * 7471 + 0x8000) >> 16) as u8
}

/// Single-channel 8-bit luminance of an image, row-major.
pub fn luminance(image: &DynamicImage) -> Vec<u8> {
    match image {
        DynamicImage::ImageLuma8(gray) => gray.as_raw().clone(),
        _ if !image.color().has_color() => image.to_luma8().into_raw(),
        _ => image
            .to_rgb8()
            .as_raw()
            .par_chunks_exact(3)
            .map(|p| luma601(p[0], p[1], p[2]))
            .collect(),
    }
}

/// Convert a decoded bitmap into an intensity field plus its color mode.
///
/// Fails with [`HalftoneError::InvalidInput`] if the image has zero width or
/// height.
pub fn normalize(image: &DynamicImage) -> Result<(Field<f64>, ColorMode)> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(HalftoneError::InvalidInput(format!(
            "Image has no pixels ({}x{})",
            width, height
        )));
    }

    let mode = ColorMode::of(image.color());
    debug!(width, height, ?mode, "Normalizing image to intensity field");

    let intensity: Vec<f64> = luminance(image)
        .into_par_iter()
        .map(|l| f64::from(l) / 255.0)
        .collect();
    let field = Field::from_vec(width as usize, height as usize, intensity)?;
    Ok((field, mode))
}

/// The source alpha plane as 8-bit values, if the image has one.
pub fn extract_alpha(image: &DynamicImage) -> Option<Field<u8>> {
    if !image.color().has_alpha() {
        return None;
    }
    let (width, height) = image.dimensions();
    let alpha: Vec<u8> = image.to_rgba8().pixels().map(|p| p[3]).collect();
    Field::from_vec(width as usize, height as usize, alpha).ok()
}
