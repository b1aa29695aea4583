//! Affine pixel-to-world transform.

use serde::{Deserialize, Serialize};

use crate::axis::AxisExtent;

/// Six-coefficient affine transform in the usual GDAL/rasterio order.
///
/// ```text
/// x' = a * col + b * row + c
/// y' = d * col + e * row + f
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoTransform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl GeoTransform {
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// Build the transform for a grid sampled on the given axes.
    ///
    /// With `reverse_y` the origin sits at the top (`max(y)`) and y decreases
    /// with row index; otherwise the origin is `min(y)` and y increases.
    pub fn from_axes(x: &AxisExtent, y: &AxisExtent, reverse_y: bool) -> Self {
        if reverse_y {
            Self::new(x.spacing, 0.0, x.min, 0.0, -y.spacing, y.max)
        } else {
            Self::new(x.spacing, 0.0, x.min, 0.0, y.spacing, y.min)
        }
    }

    /// Map a (col, row) pixel position to world coordinates.
    pub fn apply(&self, col: f64, row: f64) -> (f64, f64) {
        (
            self.a * col + self.b * row + self.c,
            self.d * col + self.e * row + self.f,
        )
    }

    /// World coordinates of pixel (0, 0).
    pub fn origin(&self) -> (f64, f64) {
        (self.c, self.f)
    }

    /// Pixel size as (x, y); y is negative for north-up rasters.
    pub fn pixel_size(&self) -> (f64, f64) {
        (self.a, self.e)
    }

    /// No rotation and y decreasing downwards.
    pub fn is_north_up(&self) -> bool {
        self.b == 0.0 && self.d == 0.0 && self.e < 0.0
    }

    /// 4x4 row-major matrix as stored in `ModelTransformationTag`.
    pub fn to_model_transformation(&self) -> [f64; 16] {
        [
            self.a, self.b, 0.0, self.c, //
            self.d, self.e, 0.0, self.f, //
            0.0, 0.0, 0.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ]
    }

    /// Inverse of [`to_model_transformation`](Self::to_model_transformation).
    pub fn from_model_transformation(m: &[f64]) -> Option<Self> {
        if m.len() < 8 {
            return None;
        }
        Some(Self::new(m[0], m[1], m[3], m[4], m[5], m[7]))
    }

    /// Rebuild a north-up transform from `ModelPixelScaleTag` and the first
    /// `ModelTiepointTag` entry.
    pub fn from_scale_and_tiepoint(scale: &[f64], tiepoint: &[f64]) -> Option<Self> {
        if scale.len() < 2 || tiepoint.len() < 6 {
            return None;
        }
        let (i, j, x, y) = (tiepoint[0], tiepoint[1], tiepoint[3], tiepoint[4]);
        let c = x - i * scale[0];
        let f = y + j * scale[1];
        Some(Self::new(scale[0], 0.0, c, 0.0, -scale[1], f))
    }
}

impl Default for GeoTransform {
    fn default() -> Self {
        Self::new(1.0, 0.0, 0.0, 0.0, 1.0, 0.0)
    }
}
