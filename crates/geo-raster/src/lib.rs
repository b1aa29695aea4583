//! Georeferenced raster output for gridded model results.
//!
//! This crate turns a 2-D grid sampled on regular x/y axes into a
//! single-band float64 GeoTIFF:
//!
//! - **Transform from axes**: spacing and origin come from the axis extents
//! - **Row order control**: bottom-up (default) or top-down (`reverse_y`)
//! - **CRS tagging**: EPSG code stored as GeoKeys, NZTM (2193) by default
//! - **LZW compression**: on by default, switchable per write
//!
//! # Architecture
//!
//! ```text
//! x, y, grid
//!      │
//!      ▼
//! GeoTiffWriter::prepare()
//!      │
//!      ├─► Check grid shape == (len(y), len(x))
//!      ├─► Axis extents ─► GeoTransform
//!      ├─► EPSG lookup (warn if not recognised)
//!      └─► Orient rows (descending y, reverse_y)
//!               │
//!               ▼
//!          encode_geotiff() ─► file
//! ```
//!
//! # Example
//!
//! ```no_run
//! use geo_raster::{GeoTiffWriter, RasterConfig, WriteOptions};
//! use ndarray::array;
//!
//! let writer = GeoTiffWriter::new(RasterConfig::default());
//! let grid = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
//! let options = WriteOptions::default().with_reverse_y(true);
//! writer.write_with_options("out.tif", &[0.0, 1.0, 2.0], &[0.0, 1.0], &grid, &options)?;
//! # Ok::<(), geo_raster::RasterError>(())
//! ```

pub mod axis;
pub mod config;
pub mod crs;
pub mod error;
pub mod grid;
pub mod reader;
pub mod transform;
pub mod types;
pub mod writer;

// Re-export commonly used types at crate root
pub use axis::{AxisExtent, AxisName};
pub use config::{RasterCompression, RasterConfig};
pub use crs::{EpsgCode, ModelType, NZTM2000, WGS84};
pub use error::{RasterError, Result};
pub use grid::grid_from_rows;
pub use reader::GeoRaster;
pub use transform::GeoTransform;
pub use types::{RasterProfile, RasterWriteResult, RowOrder, WriteOptions};
pub use writer::{encode_geotiff, write_raster, GeoTiffWriter, PreparedRaster};
