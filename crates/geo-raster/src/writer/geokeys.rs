//! GeoKey directory encoding.
//!
//! Only short-valued keys stored inline in the directory are produced, so
//! `GeoDoubleParamsTag` and `GeoAsciiParamsTag` are never needed.

use crate::crs::{EpsgCode, ModelType};

pub const GT_MODEL_TYPE: u16 = 1024;
pub const GT_RASTER_TYPE: u16 = 1025;
pub const GEOGRAPHIC_TYPE: u16 = 2048;
pub const PROJECTED_CS_TYPE: u16 = 3072;

/// `GTRasterTypeGeoKey` value: pixel values describe areas.
pub const RASTER_PIXEL_IS_AREA: u16 = 1;

const KEY_DIRECTORY_VERSION: u16 = 1;
const KEY_REVISION: u16 = 1;
const MINOR_REVISION: u16 = 0;

/// Build the `GeoKeyDirectoryTag` payload for an optional CRS.
///
/// Keys are emitted in ascending id order.
pub fn geo_key_directory(epsg: Option<EpsgCode>) -> Vec<u16> {
    let mut keys: Vec<[u16; 4]> = Vec::with_capacity(3);

    if let Some(code) = epsg {
        keys.push([GT_MODEL_TYPE, 0, 1, code.model_type() as u16]);
    }
    keys.push([GT_RASTER_TYPE, 0, 1, RASTER_PIXEL_IS_AREA]);
    if let Some(code) = epsg {
        let key = match code.model_type() {
            ModelType::Geographic => GEOGRAPHIC_TYPE,
            ModelType::Projected => PROJECTED_CS_TYPE,
        };
        keys.push([key, 0, 1, code.code()]);
    }

    let mut directory = vec![
        KEY_DIRECTORY_VERSION,
        KEY_REVISION,
        MINOR_REVISION,
        keys.len() as u16,
    ];
    directory.extend(keys.iter().flatten());
    directory
}

/// Extract the EPSG code from a `GeoKeyDirectoryTag` payload.
pub fn epsg_from_directory(directory: &[u16]) -> Option<u16> {
    let count = *directory.get(3)? as usize;
    directory
        .get(4..)?
        .chunks_exact(4)
        .take(count)
        .find(|entry| {
            (entry[0] == PROJECTED_CS_TYPE || entry[0] == GEOGRAPHIC_TYPE) && entry[1] == 0
        })
        .map(|entry| entry[3])
}
