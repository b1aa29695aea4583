//! Surface displacement rasters from slip on triangulated faults.
//!
//! A [`FaultSource`] carries triangle geometry plus slip and rake per
//! triangle. [`SurfaceDisplacement`] evaluates a pluggable
//! [`DislocationKernel`] at every active point of an [`ObservationGrid`]
//! (in parallel) and writes one displacement component as a GeoTIFF through
//! [`geo_raster::GeoTiffWriter`].
//!
//! ```text
//! FaultSource ──┐
//!               ├─► SurfaceDisplacement::compute() ─► DisplacementField
//! ObservationGrid┘                                        │
//!                                                         ▼
//!                                            GeoTiffWriter::write() ─► .tif
//! ```

pub mod config;
pub mod error;
pub mod fault;
pub mod kernel;
pub mod observation;
pub mod surface;

pub use config::{DisplacementComponent, SurfaceConfig};
pub use error::{Result, SurfaceError};
pub use fault::{FaultSource, SlipVector};
pub use kernel::{Displacement, DislocationKernel};
pub use observation::{arange, ObservationGrid, ObservationPoint};
pub use surface::{DisplacementField, SurfaceDisplacement};
