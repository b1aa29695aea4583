//! Common test fixtures.
//!
//! Pre-defined CRS codes and fault geometry that show up across the
//! raster and surface displacement tests.

/// Common EPSG codes.
pub mod crs {
    /// NZGD2000 / NZTM2000
    pub const NZTM: u32 = 2193;

    /// WGS84 geographic
    pub const WGS84: u32 = 4326;

    /// Valid but outside the NZ allow-list
    pub const UNRECOGNISED: u32 = 9999;
}

/// A single planar fault patch made of two triangles.
pub mod fault {
    /// Corner vertices (x, y, z) in metres; z is negative below the surface.
    pub const RECTANGLE_VERTICES: [[f64; 3]; 4] = [
        [0.0, -5_000.0, -1_000.0],
        [0.0, 5_000.0, -1_000.0],
        [0.0, 5_000.0, -9_000.0],
        [0.0, -5_000.0, -9_000.0],
    ];

    /// Two triangles covering the rectangle.
    pub const RECTANGLE_TRIANGLES: [[usize; 3]; 2] = [[0, 1, 2], [0, 2, 3]];
}
