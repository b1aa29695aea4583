//! Single-band float64 GeoTIFF writer.
//!
//! Grids arrive as `(len(y), len(x))` arrays whose row `i` sits at `y[i]`.
//! Descending y axes are normalised to ascending before the transform is
//! derived; the row order in the file then follows `reverse_y`.

use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

use ndarray::{s, ArrayBase, ArrayView2, Data, Ix2};
use tiff::encoder::compression::{Compression, Deflate, Lzw, Uncompressed};
use tiff::encoder::{colortype, DirectoryEncoder, TiffEncoder, TiffKindStandard};
use tiff::tags::Tag;
use tracing::{debug, warn};

use super::geokeys::geo_key_directory;
use crate::axis::{is_descending, validate_axis, AxisExtent, AxisName};
use crate::config::{RasterCompression, RasterConfig};
use crate::crs::EpsgCode;
use crate::error::{RasterError, Result};
use crate::transform::GeoTransform;
use crate::types::{RasterProfile, RasterWriteResult, RowOrder, WriteOptions};

const SOFTWARE: &str = concat!("geo-raster ", env!("CARGO_PKG_VERSION"));

/// A validated raster ready to be encoded.
#[derive(Debug, Clone)]
pub struct PreparedRaster {
    pub profile: RasterProfile,
    /// Band values in file order (row-major, row 0 first).
    pub data: Vec<f64>,
}

/// Writer for georeferenced single-band rasters.
#[derive(Debug, Clone, Default)]
pub struct GeoTiffWriter {
    config: RasterConfig,
}

impl GeoTiffWriter {
    /// Create a new GeoTiffWriter with the given configuration.
    pub fn new(config: RasterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RasterConfig {
        &self.config
    }

    /// Write `grid` using the configured defaults for CRS, row order and
    /// compression.
    pub fn write<P, S>(
        &self,
        path: P,
        x: &[f64],
        y: &[f64],
        grid: &ArrayBase<S, Ix2>,
    ) -> Result<RasterWriteResult>
    where
        P: AsRef<Path>,
        S: Data<Elem = f64>,
    {
        let options = WriteOptions::from_config(&self.config);
        self.write_with_options(path, x, y, grid, &options)
    }

    /// Write `grid` to `path` as a GeoTIFF.
    ///
    /// # Arguments
    /// * `x` - Column coordinates, one per grid column
    /// * `y` - Row coordinates, one per grid row (ascending or descending)
    /// * `grid` - Values with shape `(y.len(), x.len())`
    /// * `options` - CRS, row order and compression for this file
    ///
    /// Validation happens before the file is created, so a shape mismatch
    /// leaves nothing on disk.
    pub fn write_with_options<P, S>(
        &self,
        path: P,
        x: &[f64],
        y: &[f64],
        grid: &ArrayBase<S, Ix2>,
        options: &WriteOptions,
    ) -> Result<RasterWriteResult>
    where
        P: AsRef<Path>,
        S: Data<Elem = f64>,
    {
        let path = path.as_ref();
        let prepared = self.prepare(x, y, grid.view(), options)?;

        let file = File::create(path).map_err(|e| RasterError::unwritable(path, e))?;
        let mut out = BufWriter::new(file);
        encode_geotiff(&mut out, &prepared)?;
        out.flush().map_err(|e| RasterError::unwritable(path, e))?;

        let bytes_written = out.get_ref().metadata()?.len();

        debug!(
            path = %path.display(),
            width = prepared.profile.width,
            height = prepared.profile.height,
            compression = %prepared.profile.compression,
            bytes = bytes_written,
            "Wrote GeoTIFF"
        );

        Ok(RasterWriteResult {
            profile: prepared.profile,
            bytes_written,
        })
    }

    /// Validate inputs and lay out the band without touching the filesystem.
    pub fn prepare(
        &self,
        x: &[f64],
        y: &[f64],
        grid: ArrayView2<'_, f64>,
        options: &WriteOptions,
    ) -> Result<PreparedRaster> {
        let expected = (y.len(), x.len());
        if grid.dim() != expected {
            return Err(RasterError::shape_mismatch(expected, grid.dim()));
        }

        if self.config.validate_axes {
            validate_axis(x, AxisName::X, self.config.spacing_tolerance)?;
            validate_axis(y, AxisName::Y, self.config.spacing_tolerance)?;
        }

        let x_extent = AxisExtent::from_values(x, AxisName::X)?;
        let y_extent = AxisExtent::from_values(y, AxisName::Y)?;
        let transform = GeoTransform::from_axes(&x_extent, &y_extent, options.reverse_y);

        let (epsg, epsg_recognised) = match options.epsg {
            Some(code) => {
                let epsg = EpsgCode::new(code)?;
                let recognised = self.config.is_recognised(code);
                if !recognised {
                    warn!(
                        epsg = code,
                        "EPSG:{} is not a recognised NZ coordinate system, writing anyway", code
                    );
                }
                (Some(epsg), recognised)
            }
            None => (None, true),
        };

        // Rows are flipped once for a descending axis (to make y ascending)
        // and once more for top-down output; two flips cancel.
        let flip = is_descending(y) != options.reverse_y;
        let oriented = if flip {
            grid.slice_move(s![..;-1, ..])
        } else {
            grid
        };
        let data: Vec<f64> = oriented.iter().copied().collect();

        let profile = RasterProfile {
            width: x.len(),
            height: y.len(),
            band_count: 1,
            dtype: "float64".to_string(),
            transform,
            epsg,
            epsg_recognised,
            compression: options.compression,
            row_order: RowOrder::from_reverse_y(options.reverse_y),
        };

        Ok(PreparedRaster { profile, data })
    }
}

/// Write `grid` with the default configuration.
///
/// Convenience wrapper mirroring the flat `write_raster(path, x, y, grid,
/// crs, reverse_y, compress)` call.
pub fn write_raster<P, S>(
    path: P,
    x: &[f64],
    y: &[f64],
    grid: &ArrayBase<S, Ix2>,
    epsg: Option<u32>,
    reverse_y: bool,
    compress: bool,
) -> Result<RasterWriteResult>
where
    P: AsRef<Path>,
    S: Data<Elem = f64>,
{
    let options = WriteOptions::default()
        .with_epsg(epsg)
        .with_reverse_y(reverse_y)
        .with_compress(compress);
    GeoTiffWriter::default().write_with_options(path, x, y, grid, &options)
}

/// Encode a prepared raster into any seekable sink.
pub fn encode_geotiff<W: Write + Seek>(sink: W, prepared: &PreparedRaster) -> Result<()> {
    let mut encoder = TiffEncoder::new(sink)?;
    match prepared.profile.compression {
        RasterCompression::None => encode_band(&mut encoder, prepared, Uncompressed),
        RasterCompression::Lzw => encode_band(&mut encoder, prepared, Lzw),
        RasterCompression::Deflate => encode_band(&mut encoder, prepared, Deflate::default()),
    }
}

fn encode_band<W: Write + Seek, D: Compression>(
    encoder: &mut TiffEncoder<W>,
    prepared: &PreparedRaster,
    compression: D,
) -> Result<()> {
    let profile = &prepared.profile;
    let mut image = encoder.new_image_with_compression::<colortype::Gray64Float, D>(
        profile.width as u32,
        profile.height as u32,
        compression,
    )?;
    write_geo_tags(image.encoder(), profile)?;
    image.write_data(&prepared.data)?;
    Ok(())
}

fn write_geo_tags<W: Write + Seek>(
    dir: &mut DirectoryEncoder<'_, W, TiffKindStandard>,
    profile: &RasterProfile,
) -> Result<()> {
    let t = &profile.transform;
    if t.is_north_up() {
        let scale = [t.a, -t.e, 0.0];
        let tiepoint = [0.0, 0.0, 0.0, t.c, t.f, 0.0];
        dir.write_tag(Tag::ModelPixelScaleTag, &scale[..])?;
        dir.write_tag(Tag::ModelTiepointTag, &tiepoint[..])?;
    } else {
        let matrix = t.to_model_transformation();
        dir.write_tag(Tag::ModelTransformationTag, &matrix[..])?;
    }

    let directory = geo_key_directory(profile.epsg);
    dir.write_tag(Tag::GeoKeyDirectoryTag, &directory[..])?;

    dir.write_tag(Tag::Software, SOFTWARE)?;
    let timestamp = chrono::Utc::now().format("%Y:%m:%d %H:%M:%S").to_string();
    dir.write_tag(Tag::DateTime, timestamp.as_str())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn writer() -> GeoTiffWriter {
        GeoTiffWriter::new(RasterConfig::default())
    }

    #[test]
    fn test_prepare_bottom_up_scenario() {
        let grid = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let prepared = writer()
            .prepare(
                &[0.0, 1.0, 2.0],
                &[0.0, 1.0],
                grid.view(),
                &WriteOptions::default(),
            )
            .unwrap();

        assert_eq!(prepared.profile.width, 3);
        assert_eq!(prepared.profile.height, 2);
        assert_eq!(prepared.profile.transform.origin(), (0.0, 0.0));
        assert_eq!(prepared.profile.transform.pixel_size(), (1.0, 1.0));
        assert_eq!(prepared.profile.row_order, RowOrder::BottomUp);
        assert_eq!(prepared.data, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_prepare_reverse_y_flips_rows() {
        let grid = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let options = WriteOptions::default().with_reverse_y(true);
        let prepared = writer()
            .prepare(&[10.0, 20.0], &[0.0, 5.0, 10.0], grid.view(), &options)
            .unwrap();

        assert_eq!(prepared.profile.transform.origin(), (10.0, 10.0));
        assert_eq!(prepared.profile.transform.pixel_size(), (10.0, -5.0));
        assert_eq!(prepared.profile.row_order, RowOrder::TopDown);
        assert_eq!(prepared.data, vec![5.0, 6.0, 3.0, 4.0, 1.0, 2.0]);
    }

    #[test]
    fn test_prepare_descending_y_matches_ascending() {
        let grid = array![[5.0, 6.0], [3.0, 4.0], [1.0, 2.0]];
        let ascending = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let x = [0.0, 1.0];

        for reverse_y in [false, true] {
            let options = WriteOptions::default().with_reverse_y(reverse_y);
            let from_desc = writer()
                .prepare(&x, &[10.0, 5.0, 0.0], grid.view(), &options)
                .unwrap();
            let from_asc = writer()
                .prepare(&x, &[0.0, 5.0, 10.0], ascending.view(), &options)
                .unwrap();
            assert_eq!(from_desc.profile, from_asc.profile);
            assert_eq!(from_desc.data, from_asc.data);
        }
    }

    #[test]
    fn test_prepare_shape_mismatch() {
        let grid = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let err = writer()
            .prepare(&[0.0, 1.0, 2.0], &[0.0, 1.0], grid.view(), &WriteOptions::default())
            .unwrap_err();
        assert!(matches!(
            err,
            RasterError::ShapeMismatch {
                expected: (2, 3),
                got: (3, 2)
            }
        ));
    }

    #[test]
    fn test_prepare_degenerate_axis() {
        let grid = array![[1.0, 2.0, 3.0]];
        let err = writer()
            .prepare(&[0.0, 1.0, 2.0], &[7.0], grid.view(), &WriteOptions::default())
            .unwrap_err();
        assert!(matches!(
            err,
            RasterError::DegenerateAxis {
                axis: AxisName::Y,
                len: 1
            }
        ));
    }

    #[test]
    fn test_prepare_unrecognised_epsg_is_flagged() {
        let grid = array![[0.0, 0.0], [0.0, 0.0]];
        let options = WriteOptions::default().with_epsg(Some(9999));
        let prepared = writer()
            .prepare(&[0.0, 1.0], &[0.0, 1.0], grid.view(), &options)
            .unwrap();
        assert_eq!(prepared.profile.epsg.map(|c| c.code()), Some(9999));
        assert!(!prepared.profile.epsg_recognised);
    }

    #[test]
    fn test_prepare_invalid_epsg_fails() {
        let grid = array![[0.0, 0.0], [0.0, 0.0]];
        let options = WriteOptions::default().with_epsg(Some(0));
        let err = writer()
            .prepare(&[0.0, 1.0], &[0.0, 1.0], grid.view(), &options)
            .unwrap_err();
        assert!(matches!(err, RasterError::InvalidCrs(0)));
    }

    #[test]
    fn test_prepare_non_uniform_axis_only_fails_when_validating() {
        let grid = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let x = [0.0, 1.0, 5.0];
        let y = [0.0, 1.0];

        let lenient = writer().prepare(&x, &y, grid.view(), &WriteOptions::default());
        assert_eq!(lenient.unwrap().profile.transform.pixel_size(), (2.5, 1.0));

        let strict = GeoTiffWriter::new(RasterConfig {
            validate_axes: true,
            ..RasterConfig::default()
        });
        let err = strict
            .prepare(&x, &y, grid.view(), &WriteOptions::default())
            .unwrap_err();
        assert!(matches!(err, RasterError::InvalidAxis { axis: AxisName::X, .. }));
    }

    #[test]
    fn test_encode_into_memory() {
        let grid = array![[1.0, 2.0], [3.0, 4.0]];
        let prepared = writer()
            .prepare(&[0.0, 1.0], &[0.0, 1.0], grid.view(), &WriteOptions::default())
            .unwrap();
        let mut buf = std::io::Cursor::new(Vec::new());
        encode_geotiff(&mut buf, &prepared).unwrap();
        let bytes = buf.into_inner();
        assert!(bytes.starts_with(b"II*\0") || bytes.starts_with(b"MM\0*"));
    }
}
