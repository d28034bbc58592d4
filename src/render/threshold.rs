//! # Thresholding
//!
//! Compares an intensity field against a screen field to build the halftone
//! mask.
//!
//! For each pixel position (x, y):
//!
//! 1. Look up the screen value at (x, y)
//! 2. Compare the pixel's intensity to it
//! 3. If intensity > screen value, the pixel is inked
//!
//! The comparison is strict, so an intensity exactly equal to the screen
//! value stays un-inked.
//!
//! ## Text Form
//!
//! Masks have a plain-text rendering used for golden fixtures and CLI
//! previews: one line per row, `#` for inked and `.` for un-inked pixels.
//!
//! ```
//! use halftone::field::Field;
//! use halftone::render::threshold::{build_mask, mask_to_text};
//!
//! let intensity = Field::from_fn(4, 2, |x, _| x as f64 / 3.0);
//! let screen = Field::filled(4, 2, 0.5);
//! let mask = build_mask(&intensity, &screen)?;
//! assert_eq!(mask_to_text(&mask), "..##\n..##\n");
//! # Ok::<(), halftone::HalftoneError>(())
//! ```

use tracing::debug;

use crate::error::{HalftoneError, Result};
use crate::field::Field;

/// Character for an inked pixel in the text form.
pub const INK: char = '#';
/// Character for an un-inked pixel in the text form.
pub const BLANK: char = '.';

/// Build the halftone mask: `mask[x, y] = intensity[x, y] > screen[x, y]`.
///
/// Fails with [`HalftoneError::ShapeMismatch`] if the fields differ in shape.
pub fn build_mask(intensity: &Field<f64>, screen: &Field<f64>) -> Result<Field<bool>> {
    let mask = intensity.zip_with(screen, |i, t| i > t)?;
    debug!(
        width = mask.width(),
        height = mask.height(),
        inked = mask.count_true(),
        "Built halftone mask"
    );
    Ok(mask)
}

/// Number of inked pixels in a mask.
pub fn ink_count(mask: &Field<bool>) -> usize {
    mask.count_true()
}

/// Render a mask as text, one newline-terminated line per row.
pub fn mask_to_text(mask: &Field<bool>) -> String {
    let mut out = String::with_capacity((mask.width() + 1) * mask.height());
    for y in 0..mask.height() {
        out.extend(mask.row(y).iter().map(|&v| if v { INK } else { BLANK }));
        out.push('\n');
    }
    out
}

/// Parse the text form produced by [`mask_to_text`].
///
/// Blank lines are ignored. Every remaining line must have the same length
/// and contain only `#` and `.`.
pub fn mask_from_text(text: &str) -> Result<Field<bool>> {
    let rows: Vec<&str> = text
        .lines()
        .map(str::trim_end)
        .filter(|l| !l.is_empty())
        .collect();
    let width = rows.first().map_or(0, |r| r.chars().count());

    let mut data = Vec::with_capacity(width * rows.len());
    for (y, row) in rows.iter().enumerate() {
        if row.chars().count() != width {
            return Err(HalftoneError::InvalidInput(format!(
                "Mask row {} has {} columns, expected {}",
                y,
                row.chars().count(),
                width
            )));
        }
        for c in row.chars() {
            match c {
                INK => data.push(true),
                BLANK => data.push(false),
                other => {
                    return Err(HalftoneError::InvalidInput(format!(
                        "Unexpected character '{}' in mask row {}",
                        other, y
                    )));
                }
            }
        }
    }

    Field::from_vec(width, rows.len(), data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_greater_than() {
        let intensity = Field::from_vec(3, 1, vec![0.4, 0.5, 0.6]).unwrap();
        let screen = Field::filled(3, 1, 0.5);
        let mask = build_mask(&intensity, &screen).unwrap();
        assert_eq!(mask.as_slice(), &[false, false, true]);
    }

    #[test]
    fn test_white_inks_everywhere_black_nowhere() {
        // Screen values stay below 1 and above 0 away from dot centers.
        let screen = Field::from_fn(8, 8, |x, y| (x * 8 + y) as f64 / 64.0 + 0.005);
        let white = Field::filled(8, 8, 1.0);
        let black = Field::filled(8, 8, 0.0);
        assert_eq!(ink_count(&build_mask(&white, &screen).unwrap()), 64);
        assert_eq!(ink_count(&build_mask(&black, &screen).unwrap()), 0);
    }

    #[test]
    fn test_shape_mismatch() {
        let intensity = Field::filled(4, 4, 0.5);
        let screen = Field::filled(4, 3, 0.5);
        assert!(matches!(
            build_mask(&intensity, &screen),
            Err(HalftoneError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_mask_text_roundtrip() {
        let mask = Field::from_fn(5, 3, |x, y| (x + y) % 3 == 0);
        let text = mask_to_text(&mask);
        assert_eq!(text, "#..#.\n..#..\n.#..#\n");
        assert_eq!(mask_from_text(&text).unwrap(), mask);
    }

    #[test]
    fn test_mask_from_text_rejects_ragged_rows() {
        assert!(matches!(
            mask_from_text("##\n#\n"),
            Err(HalftoneError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_mask_from_text_rejects_bad_chars() {
        assert!(matches!(
            mask_from_text("#x\n"),
            Err(HalftoneError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_mask_from_text_ignores_blank_lines() {
        let mask = mask_from_text("\n#.\n\n.#\n\n").unwrap();
        assert_eq!(mask.shape(), (2, 2));
        assert_eq!(ink_count(&mask), 2);
    }
}
