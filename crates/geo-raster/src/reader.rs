//! GeoTIFF reader for rasters produced by the writer.

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use ndarray::Array2;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::tags::Tag;

use crate::config::RasterCompression;
use crate::crs::EpsgCode;
use crate::error::{RasterError, Result};
use crate::transform::GeoTransform;
use crate::writer::geokeys::epsg_from_directory;

/// A decoded single-band float64 GeoTIFF.
#[derive(Debug, Clone)]
pub struct GeoRaster {
    pub width: usize,
    pub height: usize,
    pub transform: GeoTransform,
    pub epsg: Option<EpsgCode>,
    pub compression: Option<RasterCompression>,
    /// Band values in file row order, shape `(height, width)`.
    pub data: Array2<f64>,
}

impl GeoRaster {
    /// Read a GeoTIFF from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// Read a GeoTIFF from any seekable source.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut decoder = Decoder::new(reader).map_err(decode_err)?;
        let (width, height) = decoder.dimensions().map_err(decode_err)?;
        let (width, height) = (width as usize, height as usize);

        let transform = read_transform(&mut decoder)?;

        let epsg = if has_tag(&mut decoder, Tag::GeoKeyDirectoryTag)? {
            let directory = decoder
                .get_tag_u16_vec(Tag::GeoKeyDirectoryTag)
                .map_err(decode_err)?;
            epsg_from_directory(&directory)
                .map(|code| EpsgCode::new(code as u32))
                .transpose()?
        } else {
            None
        };

        let compression = decoder
            .find_tag(Tag::Compression)
            .map_err(decode_err)?
            .map(|value| value.into_u32())
            .transpose()
            .map_err(decode_err)?
            .and_then(|code| RasterCompression::from_tiff_code(code as u16));

        let values = match decoder.read_image().map_err(decode_err)? {
            DecodingResult::F64(values) => values,
            _ => return Err(RasterError::decode("band is not float64")),
        };
        let data = Array2::from_shape_vec((height, width), values)
            .map_err(|e| RasterError::decode(format!("band is not {}x{}: {}", width, height, e)))?;

        Ok(Self {
            width,
            height,
            transform,
            epsg,
            compression,
            data,
        })
    }

    /// World x coordinate of each column.
    pub fn x_coords(&self) -> Vec<f64> {
        (0..self.width)
            .map(|col| self.transform.apply(col as f64, 0.0).0)
            .collect()
    }

    /// World y coordinate of each row.
    pub fn y_coords(&self) -> Vec<f64> {
        (0..self.height)
            .map(|row| self.transform.apply(0.0, row as f64).1)
            .collect()
    }

    /// Value at (row, col), or `None` outside the raster.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.data.get((row, col)).copied()
    }
}

fn read_transform<R: Read + Seek>(decoder: &mut Decoder<R>) -> Result<GeoTransform> {
    if has_tag(decoder, Tag::ModelTransformationTag)? {
        let matrix = decoder
            .get_tag_f64_vec(Tag::ModelTransformationTag)
            .map_err(decode_err)?;
        return GeoTransform::from_model_transformation(&matrix)
            .ok_or_else(|| RasterError::decode("truncated ModelTransformationTag"));
    }

    if has_tag(decoder, Tag::ModelPixelScaleTag)? && has_tag(decoder, Tag::ModelTiepointTag)? {
        let scale = decoder
            .get_tag_f64_vec(Tag::ModelPixelScaleTag)
            .map_err(decode_err)?;
        let tiepoint = decoder
            .get_tag_f64_vec(Tag::ModelTiepointTag)
            .map_err(decode_err)?;
        return GeoTransform::from_scale_and_tiepoint(&scale, &tiepoint)
            .ok_or_else(|| RasterError::decode("truncated pixel scale or tiepoint"));
    }

    Err(RasterError::decode("no georeferencing tags"))
}

fn has_tag<R: Read + Seek>(decoder: &mut Decoder<R>, tag: Tag) -> Result<bool> {
    Ok(decoder.find_tag(tag).map_err(decode_err)?.is_some())
}

fn decode_err(err: tiff::TiffError) -> RasterError {
    RasterError::decode(err.to_string())
}
