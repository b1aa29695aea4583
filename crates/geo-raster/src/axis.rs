//! Coordinate axis helpers.
//!
//! An axis is a plain slice of sample positions. The writer only needs its
//! extent and spacing; the spacing is derived from `(max - min) / (n - 1)`,
//! which assumes uniform sampling.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{RasterError, Result};

/// Which grid axis a slice of coordinates describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisName {
    X,
    Y,
}

impl fmt::Display for AxisName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => write!(f, "x"),
            Self::Y => write!(f, "y"),
        }
    }
}

/// Extent and spacing of a coordinate axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisExtent {
    pub min: f64,
    pub max: f64,
    pub spacing: f64,
    pub len: usize,
}

impl AxisExtent {
    /// Compute the extent of an axis.
    ///
    /// Fails with `DegenerateAxis` when fewer than two samples are given.
    pub fn from_values(values: &[f64], axis: AxisName) -> Result<Self> {
        if values.len() < 2 {
            return Err(RasterError::DegenerateAxis {
                axis,
                len: values.len(),
            });
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let spacing = (max - min) / (values.len() - 1) as f64;

        Ok(Self {
            min,
            max,
            spacing,
            len: values.len(),
        })
    }
}

/// True when the axis runs from high to low values.
pub fn is_descending(values: &[f64]) -> bool {
    match (values.first(), values.last()) {
        (Some(first), Some(last)) => first > last,
        _ => false,
    }
}

/// Check that an axis is finite, strictly monotonic and uniformly spaced.
///
/// `tolerance` is relative to the nominal spacing.
pub fn validate_axis(values: &[f64], axis: AxisName, tolerance: f64) -> Result<()> {
    let extent = AxisExtent::from_values(values, axis)?;

    if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
        return Err(RasterError::invalid_axis(
            axis,
            format!("non-finite coordinate {}", bad),
        ));
    }

    let step = if is_descending(values) {
        -extent.spacing
    } else {
        extent.spacing
    };
    if step == 0.0 {
        return Err(RasterError::invalid_axis(axis, "all coordinates are equal"));
    }

    for (i, pair) in values.windows(2).enumerate() {
        let delta = pair[1] - pair[0];
        if delta == 0.0 || delta.signum() != step.signum() {
            return Err(RasterError::invalid_axis(
                axis,
                format!("not strictly monotonic at index {}", i + 1),
            ));
        }
        if ((delta - step) / step).abs() > tolerance {
            return Err(RasterError::invalid_axis(
                axis,
                format!(
                    "spacing {} at index {} differs from nominal spacing {}",
                    delta,
                    i + 1,
                    step
                ),
            ));
        }
    }

    Ok(())
}
