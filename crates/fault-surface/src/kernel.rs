//! Seam for the elastic dislocation solution.
//!
//! The half-space Green's functions live outside this workspace; callers
//! plug one in by implementing [`DislocationKernel`].

use crate::error::Result;
use crate::fault::FaultSource;

/// Displacement `[east, north, up]`, in the units of the fault slip.
pub type Displacement = [f64; 3];

/// Computes surface displacement caused by slip on a triangulated fault.
///
/// Implementations must be pure: the same fault, point and Poisson's ratio
/// always give the same displacement. Points are evaluated concurrently.
pub trait DislocationKernel: Sync {
    fn displacement(
        &self,
        fault: &FaultSource,
        point: [f64; 3],
        poisson_ratio: f64,
    ) -> Result<Displacement>;
}

impl<F> DislocationKernel for F
where
    F: Fn(&FaultSource, [f64; 3], f64) -> Result<Displacement> + Sync,
{
    fn displacement(
        &self,
        fault: &FaultSource,
        point: [f64; 3],
        poisson_ratio: f64,
    ) -> Result<Displacement> {
        self(fault, point, poisson_ratio)
    }
}
