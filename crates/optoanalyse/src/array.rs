use ndarray::Array2;

use crate::error::{Error, Result};
use crate::grid::{Grid, IntensityGrid};

impl<T> Grid<T> {
    /// Convert into an `ndarray` matrix of shape `(height, width)`.
    pub fn into_array2(self) -> Result<Array2<T>> {
        let (height, width) = self.shape();
        let samples = self.len();
        Array2::from_shape_vec((height, width), self.into_vec()).map_err(|_| {
            Error::ShapeMismatch {
                height,
                width,
                samples,
            }
        })
    }
}

impl IntensityGrid {
    /// Convert to an `f64` matrix regardless of version.
    pub fn to_array2_f64(&self) -> Result<Array2<f64>> {
        self.to_f64().into_array2()
    }
}
