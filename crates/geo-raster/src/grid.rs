//! Grid construction helpers.

use ndarray::Array2;

use crate::error::{RasterError, Result};

/// Build a grid from nested rows, rejecting jagged input.
///
/// An empty slice gives a `(0, 0)` grid.
pub fn grid_from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Array2<f64>> {
    let height = rows.len();
    let width = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);

    let mut data = Vec::with_capacity(width * height);
    for row in rows {
        let row = row.as_ref();
        if row.len() != width {
            return Err(RasterError::shape_mismatch((height, width), (height, row.len())));
        }
        data.extend_from_slice(row);
    }

    Array2::from_shape_vec((height, width), data)
        .map_err(|e| RasterError::Config(format!("grid layout: {}", e)))
}
