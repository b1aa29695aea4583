//! Error types for surface displacement runs.

use geo_raster::RasterError;
use thiserror::Error;

/// Errors that can occur while computing or writing a displacement field.
#[derive(Error, Debug)]
pub enum SurfaceError {
    /// Writing the output raster failed.
    #[error(transparent)]
    Raster(#[from] RasterError),

    /// Fault geometry or slip fields are inconsistent.
    #[error("invalid fault model: {0}")]
    InvalidFault(String),

    /// Mask shape does not match the observation grid.
    #[error("mask shape {got:?} does not match observation grid {expected:?}")]
    InvalidMask {
        expected: (usize, usize),
        got: (usize, usize),
    },

    /// Coordinate range cannot be generated.
    #[error("invalid range: {0}")]
    InvalidRange(String),

    /// The dislocation kernel rejected an observation point.
    #[error("dislocation kernel failed: {0}")]
    Kernel(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl SurfaceError {
    /// Create an InvalidFault error.
    pub fn invalid_fault(msg: impl Into<String>) -> Self {
        Self::InvalidFault(msg.into())
    }

    /// Create a Kernel error.
    pub fn kernel(msg: impl Into<String>) -> Self {
        Self::Kernel(msg.into())
    }
}

/// Result type for surface displacement operations.
pub type Result<T> = std::result::Result<T, SurfaceError>;
