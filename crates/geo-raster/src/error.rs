//! Error types for raster writing and reading.

use std::path::PathBuf;

use thiserror::Error;

use crate::axis::AxisName;

/// Errors that can occur while building or writing a georeferenced raster.
#[derive(Error, Debug)]
pub enum RasterError {
    /// Grid dimensions do not match the coordinate axes.
    #[error("grid shape {got:?} does not match axes (expected {expected:?} as (len(y), len(x)))")]
    ShapeMismatch {
        expected: (usize, usize),
        got: (usize, usize),
    },

    /// Axis has too few samples to derive a spacing.
    #[error("{axis} axis has {len} sample(s); at least 2 are needed to compute spacing")]
    DegenerateAxis { axis: AxisName, len: usize },

    /// Axis failed the optional monotonicity/uniform spacing check.
    #[error("invalid {axis} axis: {reason}")]
    InvalidAxis { axis: AxisName, reason: String },

    /// EPSG code cannot be stored in a GeoTIFF key.
    #[error("EPSG:{0} cannot be encoded as a GeoTIFF key (must be 1-65535)")]
    InvalidCrs(u32),

    /// Destination could not be created or flushed.
    #[error("cannot write raster to {path}: {source}")]
    UnwritablePath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TIFF encoder failure.
    #[error("GeoTIFF encoding error: {0}")]
    Encode(String),

    /// TIFF decoder failure or missing georeferencing.
    #[error("GeoTIFF decoding error: {0}")]
    Decode(String),

    /// Other I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl RasterError {
    /// Create a ShapeMismatch error.
    pub fn shape_mismatch(expected: (usize, usize), got: (usize, usize)) -> Self {
        Self::ShapeMismatch { expected, got }
    }

    /// Create an InvalidAxis error.
    pub fn invalid_axis(axis: AxisName, reason: impl Into<String>) -> Self {
        Self::InvalidAxis {
            axis,
            reason: reason.into(),
        }
    }

    /// Create an UnwritablePath error.
    pub fn unwritable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::UnwritablePath {
            path: path.into(),
            source,
        }
    }

    /// Create a Decode error.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }
}

impl From<tiff::TiffError> for RasterError {
    fn from(err: tiff::TiffError) -> Self {
        Self::Encode(err.to_string())
    }
}

impl From<serde_yaml::Error> for RasterError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type for raster operations.
pub type Result<T> = std::result::Result<T, RasterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_mismatch_message() {
        let err = RasterError::shape_mismatch((2, 3), (3, 2));
        assert_eq!(
            err.to_string(),
            "grid shape (3, 2) does not match axes (expected (2, 3) as (len(y), len(x)))"
        );
    }

    #[test]
    fn test_degenerate_axis_message() {
        let err = RasterError::DegenerateAxis {
            axis: AxisName::Y,
            len: 1,
        };
        assert_eq!(
            err.to_string(),
            "y axis has 1 sample(s); at least 2 are needed to compute spacing"
        );
    }

    #[test]
    fn test_unwritable_keeps_source() {
        use std::error::Error as _;

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = RasterError::unwritable("/root/out.tif", io);
        assert!(err.to_string().contains("/root/out.tif"));
        assert!(err.source().is_some());
    }
}
