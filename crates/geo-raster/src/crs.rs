//! Coordinate Reference System codes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{RasterError, Result};

/// NZGD2000 / New Zealand Transverse Mercator 2000.
pub const NZTM2000: u32 = 2193;

/// WGS84 geographic.
pub const WGS84: u32 = 4326;

/// Geographic codes the writer knows about. Anything else is written as a
/// projected CRS.
const GEOGRAPHIC_CODES: &[u16] = &[4167, 4258, 4269, 4283, 4326];

/// An EPSG code that fits in a GeoTIFF key value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct EpsgCode(u16);

impl EpsgCode {
    /// Validate a raw EPSG integer.
    pub fn new(code: u32) -> Result<Self> {
        match u16::try_from(code) {
            Ok(c) if c > 0 => Ok(Self(c)),
            _ => Err(RasterError::InvalidCrs(code)),
        }
    }

    pub fn code(&self) -> u16 {
        self.0
    }

    /// Check if this is a geographic (lat/lon) CRS.
    pub fn is_geographic(&self) -> bool {
        GEOGRAPHIC_CODES.contains(&self.0)
    }

    /// GeoTIFF `GTModelTypeGeoKey` value for this CRS.
    pub fn model_type(&self) -> ModelType {
        if self.is_geographic() {
            ModelType::Geographic
        } else {
            ModelType::Projected
        }
    }

    /// Human readable name for the codes commonly used with NZ data.
    pub fn name(&self) -> Option<&'static str> {
        match self.0 {
            2193 => Some("NZGD2000 / New Zealand Transverse Mercator 2000"),
            4167 => Some("NZGD2000"),
            4326 => Some("WGS 84"),
            27200 => Some("NZGD49 / New Zealand Map Grid"),
            32759 => Some("WGS 84 / UTM zone 59S"),
            32760 => Some("WGS 84 / UTM zone 60S"),
            _ => None,
        }
    }
}

impl TryFrom<u32> for EpsgCode {
    type Error = RasterError;

    fn try_from(code: u32) -> Result<Self> {
        Self::new(code)
    }
}

impl From<EpsgCode> for u32 {
    fn from(code: EpsgCode) -> Self {
        code.0 as u32
    }
}

impl FromStr for EpsgCode {
    type Err = RasterError;

    /// Accepts "2193", "EPSG:2193" or "epsg:2193".
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let digits = trimmed
            .get(..5)
            .filter(|prefix| prefix.eq_ignore_ascii_case("epsg:"))
            .map(|_| &trimmed[5..])
            .unwrap_or(trimmed);
        let code: u32 = digits
            .parse()
            .map_err(|_| RasterError::Config(format!("not an EPSG code: {}", s)))?;
        Self::new(code)
    }
}

impl fmt::Display for EpsgCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.0)
    }
}

/// GeoTIFF model type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u16)]
pub enum ModelType {
    Projected = 1,
    Geographic = 2,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_out_of_range() {
        assert!(EpsgCode::new(2193).is_ok());
        assert!(matches!(EpsgCode::new(0), Err(RasterError::InvalidCrs(0))));
        assert!(matches!(
            EpsgCode::new(102_100),
            Err(RasterError::InvalidCrs(102_100))
        ));
    }

    #[test]
    fn test_parse_epsg() {
        assert_eq!("EPSG:2193".parse::<EpsgCode>().unwrap().code(), 2193);
        assert_eq!("epsg:4326".parse::<EpsgCode>().unwrap().code(), 4326);
        assert_eq!(" 32760 ".parse::<EpsgCode>().unwrap().code(), 32760);
        assert!("EPSG:abc".parse::<EpsgCode>().is_err());
        assert!("".parse::<EpsgCode>().is_err());
    }

    #[test]
    fn test_model_type() {
        assert_eq!(EpsgCode::new(WGS84).unwrap().model_type(), ModelType::Geographic);
        assert_eq!(EpsgCode::new(NZTM2000).unwrap().model_type(), ModelType::Projected);
        assert_eq!(EpsgCode::new(9999).unwrap().model_type(), ModelType::Projected);
    }

    #[test]
    fn test_display_and_name() {
        let nztm = EpsgCode::new(NZTM2000).unwrap();
        assert_eq!(nztm.to_string(), "EPSG:2193");
        assert!(nztm.name().unwrap().contains("Transverse Mercator"));
        assert_eq!(EpsgCode::new(9999).unwrap().name(), None);
    }

    #[test]
    fn test_serde_as_integer() {
        let code: EpsgCode = serde_json::from_str("27200").unwrap();
        assert_eq!(code.code(), 27200);
        assert_eq!(serde_json::to_string(&code).unwrap(), "27200");
        assert!(serde_json::from_str::<EpsgCode>("70000").is_err());
    }
}
