//! Configuration for the raster writer.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::crs::{EpsgCode, NZTM2000};
use crate::error::{RasterError, Result};

/// Configuration for [`GeoTiffWriter`](crate::GeoTiffWriter).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RasterConfig {
    /// EPSG code attached when a write does not specify one.
    pub default_epsg: Option<u32>,

    /// Codes accepted without a warning.
    pub recognised_epsg: Vec<u32>,

    /// Band compression.
    pub compression: RasterCompression,

    /// Write rows top-down (origin at max y) by default.
    pub reverse_y: bool,

    /// Check axes for monotonicity and uniform spacing before writing.
    pub validate_axes: bool,

    /// Relative tolerance for the uniform spacing check.
    pub spacing_tolerance: f64,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            default_epsg: Some(NZTM2000),
            recognised_epsg: vec![2193, 4326, 32759, 32760, 27200],
            compression: RasterCompression::Lzw,
            reverse_y: false,
            validate_axes: false,
            spacing_tolerance: 1e-6,
        }
    }
}

impl RasterConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("RASTER_DEFAULT_EPSG") {
            if val.eq_ignore_ascii_case("none") || val.is_empty() {
                config.default_epsg = None;
            } else if let Ok(code) = val.parse::<EpsgCode>() {
                config.default_epsg = Some(code.into());
            }
        }

        if let Ok(val) = std::env::var("RASTER_RECOGNISED_EPSG") {
            let codes: Vec<u32> = val
                .split(',')
                .filter_map(|s| s.parse::<EpsgCode>().ok())
                .map(u32::from)
                .collect();
            if !codes.is_empty() {
                config.recognised_epsg = codes;
            }
        }

        if let Ok(val) = std::env::var("RASTER_COMPRESSION") {
            config.compression = RasterCompression::from_str(&val);
        }

        if let Ok(val) = std::env::var("RASTER_REVERSE_Y") {
            config.reverse_y = val.to_lowercase() == "true" || val == "1";
        }

        if let Ok(val) = std::env::var("RASTER_VALIDATE_AXES") {
            config.validate_axes = val.to_lowercase() == "true" || val == "1";
        }

        if let Ok(val) = std::env::var("RASTER_SPACING_TOLERANCE") {
            if let Ok(tol) = val.parse() {
                config.spacing_tolerance = tol;
            }
        }

        config
    }

    /// Parse configuration from a YAML document. Missing fields take defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate().map_err(RasterError::Config)?;
        Ok(config)
    }

    /// Load configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if let Some(code) = self.default_epsg {
            EpsgCode::new(code).map_err(|e| format!("default_epsg: {}", e))?;
        }

        for code in &self.recognised_epsg {
            EpsgCode::new(*code).map_err(|e| format!("recognised_epsg: {}", e))?;
        }

        if !(self.spacing_tolerance.is_finite() && self.spacing_tolerance >= 0.0) {
            return Err("spacing_tolerance must be finite and >= 0".to_string());
        }

        Ok(())
    }

    /// Whether an EPSG code is on the recognised list.
    pub fn is_recognised(&self, code: u32) -> bool {
        self.recognised_epsg.contains(&code)
    }
}

/// Compression codec for the raster band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RasterCompression {
    /// No compression.
    None,
    /// LZW (lossless, the GeoTIFF default for GIS tools).
    #[default]
    Lzw,
    /// Deflate/zlib.
    Deflate,
}

impl RasterCompression {
    /// Parse from string (case-insensitive).
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "none" | "uncompressed" | "false" | "0" => Self::None,
            "deflate" | "zlib" => Self::Deflate,
            _ => Self::Lzw,
        }
    }

    /// Map the `compress` flag of the writer contract.
    pub fn from_flag(compress: bool) -> Self {
        if compress {
            Self::Lzw
        } else {
            Self::None
        }
    }

    /// TIFF `Compression` tag value.
    pub fn tiff_code(&self) -> u16 {
        match self {
            Self::None => 1,
            Self::Lzw => 5,
            Self::Deflate => 8,
        }
    }

    /// Inverse of [`tiff_code`](Self::tiff_code).
    pub fn from_tiff_code(code: u16) -> Option<Self> {
        match code {
            1 => Some(Self::None),
            5 => Some(Self::Lzw),
            8 | 32946 => Some(Self::Deflate),
            _ => None,
        }
    }

    /// Get the codec name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Lzw => "lzw",
            Self::Deflate => "deflate",
        }
    }
}

impl std::fmt::Display for RasterCompression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
