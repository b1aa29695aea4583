//! GeoTIFF writer for gridded data.
//!
//! Encodes a 2-D float64 grid plus its coordinate axes into a single-band
//! GeoTIFF with an affine transform and optional EPSG code.

pub mod geokeys;
mod geotiff_writer;

pub use geotiff_writer::{encode_geotiff, write_raster, GeoTiffWriter, PreparedRaster};
