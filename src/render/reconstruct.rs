//! # Output Reconstruction
//!
//! Turns a halftone mask back into a bitmap in the caller's color layout.
//!
//! The mask is first scaled to 8-bit luma (`false → 0`, `true → 255`) and
//! then expanded:
//!
//! | Source mode | Output |
//! |-------------|--------|
//! | RGBA (any depth) | RGBA8, mask on R/G/B |
//! | RGB, luma, luma+alpha | RGB8, mask on R/G/B |
//!
//! Alpha in RGBA output follows [`AlphaPolicy`]. The default is fully opaque;
//! [`AlphaPolicy::Preserve`] copies the source alpha plane through instead.

use image::{DynamicImage, GrayImage, RgbImage, RgbaImage};
use tracing::debug;

use super::normalize::ColorMode;
use crate::error::{HalftoneError, Result};
use crate::field::Field;

/// What to write into the alpha channel of RGBA output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AlphaPolicy {
    /// Every pixel fully opaque.
    #[default]
    Opaque,
    /// Copy the source image's alpha plane.
    Preserve,
}

fn dimensions<T>(field: &Field<T>) -> Result<(u32, u32)> {
    let width = u32::try_from(field.width())
        .map_err(|_| HalftoneError::InvalidInput("Mask too wide for an image".to_string()))?;
    let height = u32::try_from(field.height())
        .map_err(|_| HalftoneError::InvalidInput("Mask too tall for an image".to_string()))?;
    Ok((width, height))
}

/// Scale a mask to a single-channel 8-bit bitmap.
pub fn mask_to_luma(mask: &Field<bool>) -> Result<GrayImage> {
    let (width, height) = dimensions(mask)?;
    let raw: Vec<u8> = mask.as_slice().iter().map(|&v| if v { 255 } else { 0 }).collect();
    let len = raw.len();
    GrayImage::from_raw(width, height, raw).ok_or(HalftoneError::BufferLength {
        expected: width as usize * height as usize,
        actual: len,
    })
}

/// Rebuild an output bitmap from a mask.
///
/// `alpha` is only read for RGBA output under [`AlphaPolicy::Preserve`], in
/// which case it must be present and match the mask's shape.
pub fn reconstruct(
    mask: &Field<bool>,
    mode: ColorMode,
    policy: AlphaPolicy,
    alpha: Option<&Field<u8>>,
) -> Result<DynamicImage> {
    let luma = mask_to_luma(mask)?;
    let (width, height) = luma.dimensions();
    let output = mode.output();
    debug!(width, height, ?mode, ?output, ?policy, "Reconstructing output image");

    match output {
        ColorMode::Rgba => {
            let alpha = match policy {
                AlphaPolicy::Opaque => None,
                AlphaPolicy::Preserve => {
                    let plane = alpha.ok_or_else(|| {
                        HalftoneError::InvalidInput(
                            "Alpha preservation requested but source has no alpha plane"
                                .to_string(),
                        )
                    })?;
                    if plane.shape() != mask.shape() {
                        return Err(HalftoneError::ShapeMismatch {
                            expected: mask.shape(),
                            actual: plane.shape(),
                        });
                    }
                    Some(plane)
                }
            };
            let rgba = RgbaImage::from_fn(width, height, |x, y| {
                let v = luma.get_pixel(x, y)[0];
                let a = alpha.map_or(255, |plane| plane.get(x as usize, y as usize));
                image::Rgba([v, v, v, a])
            });
            Ok(DynamicImage::ImageRgba8(rgba))
        }
        _ => {
            let rgb = RgbImage::from_fn(width, height, |x, y| {
                let v = luma.get_pixel(x, y)[0];
                image::Rgb([v, v, v])
            });
            Ok(DynamicImage::ImageRgb8(rgb))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diagonal_mask() -> Field<bool> {
        Field::from_fn(3, 2, |x, y| x == y)
    }

    #[test]
    fn test_mask_to_luma_values() {
        let luma = mask_to_luma(&diagonal_mask()).unwrap();
        assert_eq!(luma.dimensions(), (3, 2));
        assert_eq!(luma.as_raw(), &vec![255, 0, 0, 0, 255, 0]);
    }

    #[test]
    fn test_rgb_output_for_rgb_and_gray() {
        for mode in [ColorMode::Rgb, ColorMode::Luma, ColorMode::LumaAlpha] {
            let img = reconstruct(&diagonal_mask(), mode, AlphaPolicy::Opaque, None).unwrap();
            assert_eq!(img.color(), image::ColorType::Rgb8, "mode {:?}", mode);
            assert_eq!((img.width(), img.height()), (3, 2));
            let rgb = img.to_rgb8();
            assert_eq!(rgb.get_pixel(1, 1).0, [255, 255, 255]);
            assert_eq!(rgb.get_pixel(2, 1).0, [0, 0, 0]);
        }
    }

    #[test]
    fn test_rgba_output_is_opaque_by_default() {
        let img = reconstruct(&diagonal_mask(), ColorMode::Rgba, AlphaPolicy::Opaque, None).unwrap();
        assert_eq!(img.color(), image::ColorType::Rgba8);
        let rgba = img.to_rgba8();
        assert!(rgba.pixels().all(|p| p[3] == 255));
        assert_eq!(rgba.get_pixel(0, 0).0, [255, 255, 255, 255]);
        assert_eq!(rgba.get_pixel(1, 0).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_rgba_preserves_source_alpha() {
        let alpha = Field::from_fn(3, 2, |x, y| (x * 10 + y) as u8);
        let img = reconstruct(
            &diagonal_mask(),
            ColorMode::Rgba,
            AlphaPolicy::Preserve,
            Some(&alpha),
        )
        .unwrap();
        let rgba = img.to_rgba8();
        assert_eq!(rgba.get_pixel(2, 1).0, [0, 0, 0, 21]);
        assert_eq!(rgba.get_pixel(1, 1).0, [255, 255, 255, 11]);
    }

    #[test]
    fn test_preserve_requires_alpha_plane() {
        assert!(matches!(
            reconstruct(&diagonal_mask(), ColorMode::Rgba, AlphaPolicy::Preserve, None),
            Err(HalftoneError::InvalidInput(_))
        ));
        let wrong = Field::filled(2, 2, 0u8);
        assert!(matches!(
            reconstruct(
                &diagonal_mask(),
                ColorMode::Rgba,
                AlphaPolicy::Preserve,
                Some(&wrong)
            ),
            Err(HalftoneError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_preserve_ignored_for_rgb_output() {
        let img = reconstruct(
            &diagonal_mask(),
            ColorMode::LumaAlpha,
            AlphaPolicy::Preserve,
            None,
        )
        .unwrap();
        assert_eq!(img.color(), image::ColorType::Rgb8);
    }
}
