//! Row-major intensity grids.

use alloc::vec::Vec;
use core::slice::ChunksExact;

use crate::error::{Error, Result};
use crate::format::FormatVersion;

/// A `height` x `width` grid of samples stored row by row.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    height: usize,
    width: usize,
    data: Vec<T>,
}

impl<T> Grid<T> {
    /// Reshape a flat sample vector into `height` rows of `width` columns.
    ///
    /// Fails with `Error::ShapeMismatch` when either dimension is zero or the
    /// sample count differs from `height * width`.
    pub fn from_shape_vec(height: usize, width: usize, data: Vec<T>) -> Result<Self> {
        let expected = height.checked_mul(width);
        if height == 0 || width == 0 || expected != Some(data.len()) {
            return Err(Error::ShapeMismatch {
                height,
                width,
                samples: data.len(),
            });
        }
        Ok(Grid {
            height,
            width,
            data,
        })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// `(height, width)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false; a grid has at least one cell.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.data.get(row * self.width + col)
    }

    pub fn row(&self, row: usize) -> Option<&[T]> {
        if row >= self.height {
            return None;
        }
        let start = row * self.width;
        Some(&self.data[start..start + self.width])
    }

    /// Iterate over rows, top to bottom.
    pub fn rows(&self) -> ChunksExact<'_, T> {
        self.data.chunks_exact(self.width)
    }

    /// Flat row-major view of all samples.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Apply `f` to every sample, keeping the shape.
    pub fn map<U, F: FnMut(&T) -> U>(&self, f: F) -> Grid<U> {
        Grid {
            height: self.height,
            width: self.width,
            data: self.data.iter().map(f).collect(),
        }
    }
}

/// Decoded intensity data, typed by the file's format version.
#[derive(Debug, Clone, PartialEq)]
pub enum IntensityGrid {
    /// Version 256: raw unsigned 16-bit counts.
    Counts(Grid<u16>),
    /// Version 257: signed thousandths already divided by 1000.
    Scaled(Grid<f64>),
}

impl IntensityGrid {
    pub fn version(&self) -> FormatVersion {
        match self {
            IntensityGrid::Counts(_) => FormatVersion::PointerIndexed,
            IntensityGrid::Scaled(_) => FormatVersion::FixedOffset,
        }
    }

    pub fn height(&self) -> usize {
        match self {
            IntensityGrid::Counts(g) => g.height(),
            IntensityGrid::Scaled(g) => g.height(),
        }
    }

    pub fn width(&self) -> usize {
        match self {
            IntensityGrid::Counts(g) => g.width(),
            IntensityGrid::Scaled(g) => g.width(),
        }
    }

    /// `(height, width)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.height(), self.width())
    }

    /// Convert to a floating-point grid regardless of version.
    pub fn to_f64(&self) -> Grid<f64> {
        match self {
            IntensityGrid::Counts(g) => g.map(|&v| f64::from(v)),
            IntensityGrid::Scaled(g) => g.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn reshape_row_major() {
        let grid = Grid::from_shape_vec(2, 3, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(grid.shape(), (2, 3));
        assert_eq!(grid.get(0, 2), Some(&3));
        assert_eq!(grid.get(1, 0), Some(&4));
        assert_eq!(grid.row(1), Some(&[4, 5, 6][..]));
        assert_eq!(grid.len(), 6);
        assert!(!grid.is_empty());
    }

    #[test]
    fn reshape_count_mismatch() {
        let err = Grid::from_shape_vec(2, 3, vec![1, 2, 3, 4, 5]).unwrap_err();
        assert!(matches!(
            err,
            Error::ShapeMismatch {
                height: 2,
                width: 3,
                samples: 5
            }
        ));
    }

    #[test]
    fn reshape_zero_dimension_fails() {
        assert!(Grid::<u16>::from_shape_vec(0, 0, Vec::new()).is_err());
        assert!(Grid::<u16>::from_shape_vec(0, 4, Vec::new()).is_err());
        assert!(Grid::from_shape_vec(1, 0, vec![1u16]).is_err());
    }

    #[test]
    fn out_of_range_access() {
        let grid = Grid::from_shape_vec(1, 2, vec![10u16, 20]).unwrap();
        assert_eq!(grid.get(1, 0), None);
        assert_eq!(grid.get(0, 2), None);
        assert_eq!(grid.row(1), None);
    }

    #[test]
    fn rows_iterate_in_order() {
        let grid = Grid::from_shape_vec(3, 2, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let rows: Vec<&[i32]> = grid.rows().collect();
        assert_eq!(rows, vec![&[1, 2][..], &[3, 4][..], &[5, 6][..]]);
    }

    #[test]
    fn map_keeps_shape() {
        let grid = Grid::from_shape_vec(1, 3, vec![1u16, 2, 3]).unwrap();
        let doubled = grid.map(|&v| v * 2);
        assert_eq!(doubled.shape(), (1, 3));
        assert_eq!(doubled.into_vec(), vec![2, 4, 6]);
    }

    #[test]
    fn intensity_grid_accessors() {
        let counts = IntensityGrid::Counts(Grid::from_shape_vec(1, 2, vec![10, 20]).unwrap());
        assert_eq!(counts.version(), FormatVersion::PointerIndexed);
        assert_eq!(counts.shape(), (1, 2));
        assert_eq!(counts.to_f64().as_slice(), &[10.0, 20.0]);

        let scaled =
            IntensityGrid::Scaled(Grid::from_shape_vec(1, 3, vec![1.0, -2.0, 0.5]).unwrap());
        assert_eq!(scaled.version(), FormatVersion::FixedOffset);
        assert_eq!(scaled.width(), 3);
        assert_eq!(scaled.height(), 1);
        assert_eq!(scaled.to_f64().as_slice(), &[1.0, -2.0, 0.5]);
    }
}
