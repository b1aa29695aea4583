//! Integration test: fault source -> displacement field -> GeoTIFF.
//!
//! Uses a simple point-source kernel so expected values can be computed by
//! hand, then reads the raster back to check georeferencing and values.

use std::sync::atomic::{AtomicUsize, Ordering};

use fault_surface::{
    DisplacementComponent, Displacement, DislocationKernel, FaultSource, ObservationGrid,
    Result, SurfaceConfig, SurfaceDisplacement,
};
use geo_raster::{GeoRaster, GeoTiffWriter, RasterConfig};
use ndarray::Array2;
use test_utils::fault::{RECTANGLE_TRIANGLES, RECTANGLE_VERTICES};
use test_utils::{assert_approx_eq, init_test_tracing, temp_test_dir};

/// Uplift decaying with horizontal distance from the fault centroid, scaled
/// by mean dip slip. Counts how many points it evaluates.
#[derive(Default)]
struct PointSourceKernel {
    calls: AtomicUsize,
}

impl DislocationKernel for PointSourceKernel {
    fn displacement(
        &self,
        fault: &FaultSource,
        point: [f64; 3],
        _poisson_ratio: f64,
    ) -> Result<Displacement> {
        self.calls.fetch_add(1, Ordering::Relaxed);

        // Mean over triangle corners.
        let corners: Vec<[f64; 3]> = fault
            .connectivity()
            .iter()
            .flatten()
            .map(|&i| fault.vertices()[i])
            .collect();
        let n = corners.len() as f64;
        let cx = corners.iter().map(|v| v[0]).sum::<f64>() / n;
        let cy = corners.iter().map(|v| v[1]).sum::<f64>() / n;
        let slips = fault.slip_vectors();
        let dip = slips.iter().map(|s| s.dip_slip).sum::<f64>() / slips.len() as f64;

        let dist = ((point[0] - cx).powi(2) + (point[1] - cy).powi(2)).sqrt();
        let up = dip / (1.0 + dist / 1_000.0);
        Ok([0.0, 0.0, up])
    }
}

fn thrust_fault() -> FaultSource {
    FaultSource::uniform(
        RECTANGLE_VERTICES.to_vec(),
        RECTANGLE_TRIANGLES.to_vec(),
        2.0,
        90.0,
    )
    .expect("Failed to build fault")
}

fn engine(config: SurfaceConfig) -> SurfaceDisplacement<PointSourceKernel> {
    SurfaceDisplacement::new(
        PointSourceKernel::default(),
        config,
        GeoTiffWriter::new(RasterConfig::default()),
    )
}

#[test]
fn test_run_writes_uplift_raster() {
    init_test_tracing();
    let dir = temp_test_dir();
    let path = dir.path().join("uplift.tif");

    let grid = ObservationGrid::from_ranges(-2_000.0, 3_000.0, -1_000.0, 2_000.0, 1_000.0)
        .expect("Failed to build grid");
    assert_eq!(grid.shape(), (3, 5));

    let result = engine(SurfaceConfig::default())
        .run(&thrust_fault(), &grid, &path)
        .expect("Run failed")
        .expect("Run was skipped");
    assert_eq!(result.profile.width, 5);
    assert_eq!(result.profile.height, 3);

    let raster = GeoRaster::open(&path).expect("Failed to read raster");
    assert_eq!(raster.transform.origin(), (-2_000.0, -1_000.0));
    assert_eq!(raster.transform.pixel_size(), (1_000.0, 1_000.0));
    assert_eq!(raster.epsg.map(|c| c.code()), Some(2193));

    // Centroid is (0, 0): row 1 is y = 0, col 2 is x = 0.
    assert_approx_eq!(raster.data[[1, 2]], 2.0, 1e-9);
    assert_approx_eq!(raster.data[[1, 3]], 1.0, 1e-9);
    assert_approx_eq!(raster.data[[1, 0]], 2.0 / 3.0, 1e-9);
}

#[test]
fn test_run_skips_existing_output() {
    let dir = temp_test_dir();
    let path = dir.path().join("existing.tif");
    std::fs::write(&path, b"placeholder").unwrap();

    let engine = engine(SurfaceConfig::default());
    let grid = ObservationGrid::new(vec![0.0, 1.0], vec![0.0, 1.0]);
    let outcome = engine.run(&thrust_fault(), &grid, &path).expect("Run failed");

    assert!(outcome.is_none());
    assert_eq!(engine.kernel().calls.load(Ordering::Relaxed), 0);
    assert_eq!(std::fs::read(&path).unwrap(), b"placeholder");
}

#[test]
fn test_run_overwrites_when_configured() {
    let dir = temp_test_dir();
    let path = dir.path().join("existing.tif");
    std::fs::write(&path, b"placeholder").unwrap();

    let config = SurfaceConfig {
        overwrite: true,
        ..SurfaceConfig::default()
    };
    let grid = ObservationGrid::new(vec![0.0, 1.0], vec![0.0, 1.0]);
    let outcome = engine(config)
        .run(&thrust_fault(), &grid, &path)
        .expect("Run failed");

    assert!(outcome.is_some());
    let raster = GeoRaster::open(&path).expect("Failed to read raster");
    assert_eq!(raster.data.dim(), (2, 2));
}

#[test]
fn test_mask_limits_kernel_calls() {
    let grid = ObservationGrid::from_ranges(0.0, 10_000.0, 0.0, 5_000.0, 1_000.0)
        .unwrap()
        .with_mask_fn(|x, y| x >= 5_000.0 && y < 2_000.0);
    let engine = engine(SurfaceConfig::default());

    let field = engine.compute(&thrust_fault(), &grid).expect("Compute failed");

    assert_eq!(grid.active_count(), 10);
    assert_eq!(engine.kernel().calls.load(Ordering::Relaxed), 10);
    let masked_zero = field
        .up
        .indexed_iter()
        .filter(|((row, col), _)| !grid.mask().unwrap()[[*row, *col]])
        .all(|(_, &v)| v == 0.0);
    assert!(masked_zero);
    assert!(field.up[[0, 5]] > 0.0);
}

#[test]
fn test_component_selection() {
    let dir = temp_test_dir();
    let path = dir.path().join("east.tif");
    let shift = |_: &FaultSource, p: [f64; 3], _: f64| -> Result<Displacement> {
        Ok([p[0] * 0.01, p[1] * 0.01, 0.0])
    };
    let config = SurfaceConfig {
        component: DisplacementComponent::East,
        ..SurfaceConfig::default()
    };
    let engine = SurfaceDisplacement::new(shift, config, GeoTiffWriter::default());
    let grid = ObservationGrid::new(vec![100.0, 200.0, 300.0], vec![0.0, 50.0]);

    engine.run(&thrust_fault(), &grid, &path).unwrap();

    let raster = GeoRaster::open(&path).unwrap();
    let expected = Array2::from_shape_fn((2, 3), |(_, col)| (col as f64 + 1.0));
    for (got, want) in raster.data.iter().zip(expected.iter()) {
        assert_approx_eq!(*got, *want, 1e-9);
    }
}
