//! # 2D Fields
//!
//! [`Field`] is the owned 2D array every pipeline stage passes around: the
//! intensity field, the screen field and the halftone mask are all fields.
//!
//! ## Layout
//!
//! A field has shape `(width, height)`. Accessors take `(x, y)` with the
//! origin at the top-left and `x` running along the width. Storage is
//! row-major, so one row is a contiguous slice:
//!
//! ```text
//! index = y * width + x
//!
//!        x=0  x=1  x=2
//! y=0  [  0    1    2  ]
//! y=1  [  3    4    5  ]
//! ```
//!
//! ## Example
//!
//! ```
//! use halftone::field::Field;
//!
//! let f = Field::from_fn(3, 2, |x, y| (x + 10 * y) as f64);
//! assert_eq!(f.shape(), (3, 2));
//! assert_eq!(f.get(2, 1), 12.0);
//! ```

use rayon::prelude::*;

use crate::error::{HalftoneError, Result};

/// An owned 2D array of shape `(width, height)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Field<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

impl<T> Field<T> {
    /// Wrap an existing row-major buffer.
    ///
    /// Fails with [`HalftoneError::BufferLength`] if `data` does not hold
    /// exactly `width * height` values.
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Result<Self> {
        if data.len() != width * height {
            return Err(HalftoneError::BufferLength {
                expected: width * height,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Shape as `(width, height)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Row-major view of all values.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Values of row `y`, left to right.
    pub fn row(&self, y: usize) -> &[T] {
        let start = y * self.width;
        &self.data[start..start + self.width]
    }

    fn check_shape<U>(&self, other: &Field<U>) -> Result<()> {
        if self.shape() != other.shape() {
            return Err(HalftoneError::ShapeMismatch {
                expected: self.shape(),
                actual: other.shape(),
            });
        }
        Ok(())
    }
}

impl<T: Copy> Field<T> {
    /// A field with every cell set to `value`.
    pub fn filled(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    /// Value at `(x, y)`.
    ///
    /// Panics if the coordinate is outside the field.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> T {
        assert!(
            x < self.width && y < self.height,
            "({}, {}) outside {}x{} field",
            x,
            y,
            self.width,
            self.height
        );
        self.data[y * self.width + x]
    }
}

impl<T: Send + Sync> Field<T> {
    /// Evaluate `f(x, y)` at every coordinate.
    ///
    /// Rows are filled in parallel; `f` must be pure, and the result is the
    /// same as a sequential row-major loop.
    pub fn from_fn<F>(width: usize, height: usize, f: F) -> Self
    where
        F: Fn(usize, usize) -> T + Send + Sync,
    {
        let data = if width == 0 {
            Vec::new()
        } else {
            (0..height)
                .into_par_iter()
                .flat_map_iter(|y| (0..width).map(move |x| (x, y)))
                .map(|(x, y)| f(x, y))
                .collect()
        };
        Self {
            width,
            height,
            data,
        }
    }

    /// Combine two fields of identical shape value by value.
    ///
    /// Fails with [`HalftoneError::ShapeMismatch`] when the shapes differ.
    pub fn zip_with<U, V, F>(&self, other: &Field<U>, f: F) -> Result<Field<V>>
    where
        U: Send + Sync,
        V: Send,
        F: Fn(&T, &U) -> V + Send + Sync,
    {
        self.check_shape(other)?;
        let data = self
            .data
            .par_iter()
            .zip(other.data.par_iter())
            .map(|(a, b)| f(a, b))
            .collect();
        Ok(Field {
            width: self.width,
            height: self.height,
            data,
        })
    }
}

impl Field<bool> {
    /// Number of `true` cells.
    pub fn count_true(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fn_is_row_major() {
        let f = Field::from_fn(4, 3, |x, y| y * 4 + x);
        assert_eq!(f.as_slice(), &(0..12).collect::<Vec<_>>()[..]);
        assert_eq!(f.row(1), &[4, 5, 6, 7]);
    }

    #[test]
    fn test_get_uses_x_as_width_axis() {
        let f = Field::from_fn(5, 2, |x, y| (x, y));
        assert_eq!(f.get(4, 1), (4, 1));
        assert_eq!(f.shape(), (5, 2));
    }

    #[test]
    #[should_panic]
    fn test_get_out_of_bounds_panics() {
        let f = Field::filled(2, 2, 0u8);
        f.get(2, 0);
    }

    #[test]
    fn test_from_vec_rejects_wrong_length() {
        match Field::from_vec(3, 3, vec![0.0; 8]) {
            Err(HalftoneError::BufferLength { expected, actual }) => {
                assert_eq!(expected, 9);
                assert_eq!(actual, 8);
            }
            other => panic!("expected buffer length error, got {:?}", other),
        }
    }

    #[test]
    fn test_zip_with_shape_mismatch() {
        let a = Field::filled(4, 4, 0.0);
        let b = Field::filled(4, 5, 0.0);
        match a.zip_with(&b, |x, y| x + y) {
            Err(HalftoneError::ShapeMismatch { expected, actual }) => {
                assert_eq!(expected, (4, 4));
                assert_eq!(actual, (4, 5));
            }
            other => panic!("expected shape mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_zip_with_elementwise() {
        let a = Field::from_fn(3, 2, |x, _| x as f64);
        let b = Field::from_fn(3, 2, |_, y| y as f64);
        let c = a.zip_with(&b, |p, q| p * 10.0 + q).unwrap();
        assert_eq!(c.get(2, 1), 21.0);
    }

    #[test]
    fn test_count_true() {
        let f = Field::from_fn(4, 4, |x, y| (x + y) % 2 == 0);
        assert_eq!(f.count_true(), 8);
    }

    #[test]
    fn test_empty_field() {
        let f: Field<f64> = Field::from_fn(0, 5, |_, _| 1.0);
        assert!(f.as_slice().is_empty());
        assert_eq!(f.shape(), (0, 5));
    }
}
