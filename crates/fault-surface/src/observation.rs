//! Observation grids at the free surface.

use ndarray::Array2;

use crate::error::{Result, SurfaceError};

/// Half-open range `start, start + step, ...` stopping before `stop`.
///
/// Produces `ceil((stop - start) / step)` samples (or none when the range
/// is empty), matching numpy's `arange`.
pub fn arange(start: f64, stop: f64, step: f64) -> Result<Vec<f64>> {
    if !(start.is_finite() && stop.is_finite()) {
        return Err(SurfaceError::InvalidRange(format!(
            "non-finite bounds {}..{}",
            start, stop
        )));
    }
    if step == 0.0 || !step.is_finite() {
        return Err(SurfaceError::InvalidRange(format!("step {} must be non-zero", step)));
    }

    let n = ((stop - start) / step).ceil().max(0.0) as usize;
    Ok((0..n).map(|i| start + step * i as f64).collect())
}

/// One surface point where displacement is evaluated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObservationPoint {
    pub row: usize,
    pub col: usize,
    /// `(x, y, 0)`.
    pub position: [f64; 3],
}

/// Regular grid of surface points, optionally restricted by a mask.
#[derive(Debug, Clone)]
pub struct ObservationGrid {
    x: Vec<f64>,
    y: Vec<f64>,
    mask: Option<Array2<bool>>,
}

impl ObservationGrid {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Self {
        Self { x, y, mask: None }
    }

    /// Grid from two `arange` calls sharing one step.
    pub fn from_ranges(
        x_start: f64,
        x_stop: f64,
        y_start: f64,
        y_stop: f64,
        step: f64,
    ) -> Result<Self> {
        Ok(Self::new(
            arange(x_start, x_stop, step)?,
            arange(y_start, y_stop, step)?,
        ))
    }

    /// Restrict evaluation to cells where `mask` is true.
    ///
    /// The mask has shape `(len(y), len(x))`.
    pub fn with_mask(mut self, mask: Array2<bool>) -> Result<Self> {
        if mask.dim() != self.shape() {
            return Err(SurfaceError::InvalidMask {
                expected: self.shape(),
                got: mask.dim(),
            });
        }
        self.mask = Some(mask);
        Ok(self)
    }

    /// Build the mask from a predicate on `(x, y)`.
    pub fn with_mask_fn<F>(self, keep: F) -> Self
    where
        F: Fn(f64, f64) -> bool,
    {
        let mask = Array2::from_shape_fn(self.shape(), |(row, col)| keep(self.x[col], self.y[row]));
        Self {
            mask: Some(mask),
            ..self
        }
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn mask(&self) -> Option<&Array2<bool>> {
        self.mask.as_ref()
    }

    /// `(len(y), len(x))`, the shape of grids on these axes.
    pub fn shape(&self) -> (usize, usize) {
        (self.y.len(), self.x.len())
    }

    fn is_active(&self, row: usize, col: usize) -> bool {
        self.mask.as_ref().map_or(true, |m| m[[row, col]])
    }

    /// Active points in row-major order.
    pub fn points(&self) -> Vec<ObservationPoint> {
        let mut points = Vec::new();
        for (row, &y) in self.y.iter().enumerate() {
            for (col, &x) in self.x.iter().enumerate() {
                if self.is_active(row, col) {
                    points.push(ObservationPoint {
                        row,
                        col,
                        position: [x, y, 0.0],
                    });
                }
            }
        }
        points
    }

    /// Number of active points.
    pub fn active_count(&self) -> usize {
        match &self.mask {
            Some(mask) => mask.iter().filter(|&&keep| keep).count(),
            None => self.x.len() * self.y.len(),
        }
    }
}
