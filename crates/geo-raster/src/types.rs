//! Core types shared by the writer and reader.

use serde::{Deserialize, Serialize};

use crate::config::{RasterCompression, RasterConfig};
use crate::crs::EpsgCode;
use crate::transform::GeoTransform;

/// Per-call options for a raster write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WriteOptions {
    /// EPSG code to attach, or `None` for no CRS.
    pub epsg: Option<u32>,
    /// Origin at max y with rows running downwards.
    pub reverse_y: bool,
    /// Band compression.
    pub compression: RasterCompression,
}

impl WriteOptions {
    /// Options taking every default from the configuration.
    pub fn from_config(config: &RasterConfig) -> Self {
        Self {
            epsg: config.default_epsg,
            reverse_y: config.reverse_y,
            compression: config.compression,
        }
    }

    pub fn with_epsg(mut self, epsg: Option<u32>) -> Self {
        self.epsg = epsg;
        self
    }

    pub fn with_reverse_y(mut self, reverse_y: bool) -> Self {
        self.reverse_y = reverse_y;
        self
    }

    /// Toggle LZW compression on or off.
    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compression = RasterCompression::from_flag(compress);
        self
    }

    pub fn with_compression(mut self, compression: RasterCompression) -> Self {
        self.compression = compression;
        self
    }
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self::from_config(&RasterConfig::default())
    }
}

/// Order in which rows are stored in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowOrder {
    /// Row 0 holds the smallest y.
    BottomUp,
    /// Row 0 holds the largest y.
    TopDown,
}

impl RowOrder {
    pub fn from_reverse_y(reverse_y: bool) -> Self {
        if reverse_y {
            Self::TopDown
        } else {
            Self::BottomUp
        }
    }
}

/// Description of a single-band float64 raster as written to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RasterProfile {
    pub width: usize,
    pub height: usize,
    pub band_count: u16,
    pub dtype: String,
    pub transform: GeoTransform,
    pub epsg: Option<EpsgCode>,
    /// False when `epsg` is set but not on the recognised list.
    pub epsg_recognised: bool,
    pub compression: RasterCompression,
    pub row_order: RowOrder,
}

impl RasterProfile {
    /// Serialize to JSON, e.g. for a sidecar or a log line.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }

    /// Number of samples in the band.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Result of writing a raster.
#[derive(Debug, Clone)]
pub struct RasterWriteResult {
    pub profile: RasterProfile,
    /// Size of the file on disk.
    pub bytes_written: u64,
}
