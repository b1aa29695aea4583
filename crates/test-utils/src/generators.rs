//! Test data generators for grids and coordinate axes.
//!
//! These generators create predictable, verifiable patterns so that a value
//! read back from a raster can be traced to the cell it came from.

use ndarray::Array2;

/// Creates a test grid with predictable values.
///
/// Each cell value is calculated as: `col * 1000 + row`
///
/// This makes it easy to verify that data is being read/written correctly
/// by checking that grid[[row, col]] == col * 1000 + row.
///
/// # Example
///
/// ```
/// use test_utils::create_test_grid;
///
/// let grid = create_test_grid(10, 5);
/// assert_eq!(grid.dim(), (5, 10));
/// assert_eq!(grid[[0, 0]], 0.0);
/// assert_eq!(grid[[0, 1]], 1000.0);
/// assert_eq!(grid[[1, 0]], 1.0);
/// ```
pub fn create_test_grid(width: usize, height: usize) -> Array2<f64> {
    Array2::from_shape_fn((height, width), |(row, col)| (col * 1000 + row) as f64)
}

/// Creates a smooth displacement-like field in metres.
///
/// A Gaussian bump centred on the grid with peak `amplitude`, roughly the
/// shape of vertical uplift above a buried thrust.
pub fn create_uplift_grid(width: usize, height: usize, amplitude: f64) -> Array2<f64> {
    let cx = (width as f64 - 1.0) / 2.0;
    let cy = (height as f64 - 1.0) / 2.0;
    let sigma = (width.max(height) as f64 / 4.0).max(1.0);

    Array2::from_shape_fn((height, width), |(row, col)| {
        let dx = col as f64 - cx;
        let dy = row as f64 - cy;
        amplitude * (-(dx * dx + dy * dy) / (2.0 * sigma * sigma)).exp()
    })
}

/// Creates an evenly spaced axis of `n` samples starting at `start`.
///
/// # Example
///
/// ```
/// use test_utils::create_axis;
///
/// assert_eq!(create_axis(100.0, 50.0, 3), vec![100.0, 150.0, 200.0]);
/// ```
pub fn create_axis(start: f64, step: f64, n: usize) -> Vec<f64> {
    (0..n).map(|i| start + step * i as f64).collect()
}

/// Creates a grid with NaN values at specified positions.
///
/// `nan_positions` are `(col, row)` pairs; out-of-range positions are ignored.
pub fn create_grid_with_nans(
    width: usize,
    height: usize,
    nan_positions: &[(usize, usize)],
) -> Array2<f64> {
    let mut data = Array2::zeros((height, width));
    for &(col, row) in nan_positions {
        if col < width && row < height {
            data[[row, col]] = f64::NAN;
        }
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_grid() {
        let grid = create_test_grid(4, 3);
        assert_eq!(grid.dim(), (3, 4));
        assert_eq!(grid[[2, 3]], 3002.0);
    }

    #[test]
    fn test_uplift_peaks_at_centre() {
        let grid = create_uplift_grid(5, 5, 2.0);
        assert!((grid[[2, 2]] - 2.0).abs() < 1e-12);
        assert!(grid[[0, 0]] < grid[[2, 2]]);
        assert!((grid[[0, 0]] - grid[[4, 4]]).abs() < 1e-12);
    }

    #[test]
    fn test_create_axis_descending() {
        assert_eq!(create_axis(10.0, -5.0, 3), vec![10.0, 5.0, 0.0]);
        assert!(create_axis(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn test_create_grid_with_nans() {
        let grid = create_grid_with_nans(3, 2, &[(1, 0), (9, 9)]);
        assert!(grid[[0, 1]].is_nan());
        assert_eq!(grid.iter().filter(|v| v.is_nan()).count(), 1);
    }
}
