//! HEIC/HEIF decoding through libheif.

use image::{DynamicImage, RgbImage};
use libheif_rs::{ColorSpace, HeifContext, LibHeif, RgbChroma};
use std::path::Path;
use tracing::debug;

use crate::error::{HalftoneError, Result};

fn heif_error(context: &str, e: impl std::fmt::Display) -> HalftoneError {
    HalftoneError::InvalidInput(format!("{}: {}", context, e))
}

/// Pack a strided interleaved RGB plane into a tight `RgbImage`.
///
/// Fails with [`HalftoneError::InvalidInput`] if a row is shorter than
/// `width` pixels or the plane holds fewer than `height` rows.
fn pack_rgb_plane(width: u32, height: u32, stride: usize, data: &[u8]) -> Result<RgbImage> {
    let row_len = width as usize * 3;
    let needed = match height {
        0 => 0,
        h => stride * (h as usize - 1) + row_len,
    };
    if stride < row_len || data.len() < needed {
        return Err(HalftoneError::InvalidInput(format!(
            "HEIF plane too small for {}x{}: stride {}, {} bytes",
            width,
            height,
            stride,
            data.len()
        )));
    }

    let mut raw = Vec::with_capacity(row_len * height as usize);
    for y in 0..height as usize {
        let start = y * stride;
        raw.extend_from_slice(&data[start..start + row_len]);
    }
    let len = raw.len();
    RgbImage::from_raw(width, height, raw).ok_or(HalftoneError::BufferLength {
        expected: row_len * height as usize,
        actual: len,
    })
}

/// Decode the primary image of a HEIC/HEIF file to RGB8.
pub fn decode_file(path: &Path) -> Result<DynamicImage> {
    let data = std::fs::read(path)?;
    let lib_heif = LibHeif::new();
    let ctx = HeifContext::read_from_bytes(&data)
        .map_err(|e| heif_error("Failed to read HEIF container", e))?;
    let handle = ctx
        .primary_image_handle()
        .map_err(|e| heif_error("HEIF file has no primary image", e))?;
    let image = lib_heif
        .decode(&handle, ColorSpace::Rgb(RgbChroma::Rgb), None)
        .map_err(|e| heif_error("Failed to decode HEIF image", e))?;

    let planes = image.planes();
    let plane = planes
        .interleaved
        .ok_or_else(|| HalftoneError::InvalidInput("HEIF image has no interleaved RGB plane".to_string()))?;
    debug!(
        width = image.width(),
        height = image.height(),
        stride = plane.stride,
        "Decoded HEIF plane"
    );

    let rgb = pack_rgb_plane(image.width(), image.height(), plane.stride, plane.data)?;
    Ok(DynamicImage::ImageRgb8(rgb))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_skips_row_padding() {
        // 2x2 image, stride 8: each row carries two padding bytes.
        let data = [1, 2, 3, 4, 5, 6, 0, 0, 7, 8, 9, 10, 11, 12];
        let rgb = pack_rgb_plane(2, 2, 8, &data).unwrap();
        assert_eq!(rgb.as_raw(), &vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
    }

    #[test]
    fn test_pack_rejects_short_plane() {
        let data = [0u8; 13];
        assert!(matches!(
            pack_rgb_plane(2, 2, 8, &data),
            Err(HalftoneError::InvalidInput(_))
        ));
        assert!(matches!(
            pack_rgb_plane(3, 1, 6, &[0u8; 9]),
            Err(HalftoneError::InvalidInput(_))
        ));
    }
}
