//! Surface displacement grids from a fault source.

use std::path::Path;
use std::time::Instant;

use geo_raster::{GeoTiffWriter, RasterWriteResult};
use ndarray::Array2;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::config::{DisplacementComponent, SurfaceConfig};
use crate::error::{Result, SurfaceError};
use crate::fault::FaultSource;
use crate::kernel::{Displacement, DislocationKernel};
use crate::observation::ObservationGrid;

/// Displacement components on an observation grid.
///
/// Masked-out cells hold zero.
#[derive(Debug, Clone)]
pub struct DisplacementField {
    pub east: Array2<f64>,
    pub north: Array2<f64>,
    pub up: Array2<f64>,
}

impl DisplacementField {
    fn zeros(shape: (usize, usize)) -> Self {
        Self {
            east: Array2::zeros(shape),
            north: Array2::zeros(shape),
            up: Array2::zeros(shape),
        }
    }

    pub fn component(&self, component: DisplacementComponent) -> &Array2<f64> {
        [&self.east, &self.north, &self.up][component.index()]
    }

    /// Largest absolute value of one component.
    pub fn max_abs(&self, component: DisplacementComponent) -> f64 {
        self.component(component)
            .iter()
            .fold(0.0_f64, |acc, v| acc.max(v.abs()))
    }
}

/// Evaluates a dislocation kernel over an observation grid and rasterizes
/// the result.
pub struct SurfaceDisplacement<K> {
    kernel: K,
    config: SurfaceConfig,
    writer: GeoTiffWriter,
}

impl<K: DislocationKernel> SurfaceDisplacement<K> {
    pub fn new(kernel: K, config: SurfaceConfig, writer: GeoTiffWriter) -> Self {
        Self {
            kernel,
            config,
            writer,
        }
    }

    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    /// Evaluate the kernel at every active point of `grid`.
    pub fn compute(
        &self,
        fault: &FaultSource,
        grid: &ObservationGrid,
    ) -> Result<DisplacementField> {
        self.config.validate().map_err(SurfaceError::Config)?;

        let points = grid.points();
        let nu = self.config.poisson_ratio;
        let started = Instant::now();

        let values: Vec<Displacement> = points
            .par_iter()
            .map(|p| self.kernel.displacement(fault, p.position, nu))
            .collect::<Result<_>>()?;

        let mut field = DisplacementField::zeros(grid.shape());
        for (point, d) in points.iter().zip(&values) {
            let idx = [point.row, point.col];
            field.east[idx] = d[0];
            field.north[idx] = d[1];
            field.up[idx] = d[2];
        }

        debug!(
            points = points.len(),
            triangles = fault.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Evaluated dislocation kernel"
        );

        Ok(field)
    }

    /// Compute the configured component and write it to `output`.
    ///
    /// Returns `Ok(None)` without computing anything when `output` exists
    /// and `overwrite` is off.
    pub fn run(
        &self,
        fault: &FaultSource,
        grid: &ObservationGrid,
        output: impl AsRef<Path>,
    ) -> Result<Option<RasterWriteResult>> {
        let output = output.as_ref();
        if output.exists() && !self.config.overwrite {
            info!(path = %output.display(), "Output exists, skipping");
            return Ok(None);
        }

        let (height, width) = grid.shape();
        info!(
            width,
            height,
            active = grid.active_count(),
            triangles = fault.len(),
            component = %self.config.component,
            "Computing surface displacements"
        );

        let field = self.compute(fault, grid)?;
        let component = self.config.component;
        let result = self
            .writer
            .write(output, grid.x(), grid.y(), field.component(component))?;

        info!(
            path = %output.display(),
            max_abs = field.max_abs(component),
            bytes = result.bytes_written,
            "Wrote surface displacement raster"
        );

        Ok(Some(result))
    }
}
