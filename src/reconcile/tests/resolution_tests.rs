//! Tests for resolution and size arithmetic

extern crate std;

use super::test_utils::{assert_close, ScalingTransform, TransformCall};
use crate::coordinate::{BoundingBox, CoordinateSystem};
use crate::reconcile::{
    original_resolution, reproject_resolution, resolution_from_size, size_from_resolution,
    GridSize, Resolution,
};
use crate::source::SourceInfo;

#[test]
fn test_size_from_resolution() {
    let extent = BoundingBox::new(0.0, 0.0, 100.0, 50.0);
    std::assert_eq!(size_from_resolution(&extent, 10.0, 10.0), GridSize::new(10, 5));
}

#[test]
fn test_resolution_from_size() {
    let extent = BoundingBox::new(0.0, 0.0, 100.0, 50.0);
    std::assert_eq!(resolution_from_size(&extent, 25, 25), Resolution::new(4.0, 2.0));
}

#[test]
fn test_zero_denominators_yield_zero() {
    let extent = BoundingBox::new(0.0, 0.0, 100.0, 50.0);
    let grid = size_from_resolution(&extent, 0.0, 5.0);
    std::assert_eq!(grid, GridSize::new(0, 10));
    std::assert!(grid.is_empty());

    let res = resolution_from_size(&extent, 0, 10);
    std::assert_eq!(res, Resolution::new(0.0, 5.0));
}

#[test]
fn test_tiny_resolution_caps_count() {
    let _ = env_logger::builder().is_test(true).try_init();
    let extent = BoundingBox::new(0.0, 0.0, 1.0e6, 10.0);
    std::assert_eq!(size_from_resolution(&extent, 1.0e-6, 1.0), GridSize::new(u32::MAX, 10));
}

#[test]
fn test_rounding_is_half_away_from_zero() {
    let extent = BoundingBox::new(0.0, 0.0, 25.0, 35.0);
    // 25 / 10 = 2.5 and 35 / 10 = 3.5 both round up
    std::assert_eq!(size_from_resolution(&extent, 10.0, 10.0), GridSize::new(3, 4));
    let extent = BoundingBox::new(0.0, 0.0, 24.9, 34.9);
    std::assert_eq!(size_from_resolution(&extent, 10.0, 10.0), GridSize::new(2, 3));
}

#[test]
fn test_round_trip_stays_within_one_rounding_unit() {
    let extents = [
        BoundingBox::new(0.0, 0.0, 100.0, 50.0),
        BoundingBox::new(-180.0, -90.0, 180.0, 90.0),
        BoundingBox::new(412345.5, 5123456.25, 498765.0, 5234567.75),
    ];
    let resolutions = [(0.3, 0.7), (1.0, 1.0), (7.25, 3.5), (33.3, 12.1)];

    for extent in &extents {
        for &(x_res, y_res) in &resolutions {
            let grid = size_from_resolution(extent, x_res, y_res);
            let back = resolution_from_size(extent, grid.columns, grid.rows);
            // One pixel more or less changes the resolution by at most res / (n - 1)
            let x_tol = x_res / (grid.columns as f64 - 1.0).max(1.0);
            let y_tol = y_res / (grid.rows as f64 - 1.0).max(1.0);
            std::assert!((back.x - x_res).abs() <= x_tol, "x {} vs {} for {:?}", back.x, x_res, extent);
            std::assert!((back.y - y_res).abs() <= y_tol, "y {} vs {} for {:?}", back.y, y_res, extent);
        }
    }
}

#[test]
fn test_original_resolution_fixed_grid() {
    let source = SourceInfo::gridded(BoundingBox::new(0.0, 0.0, 100.0, 50.0), 200, 25, CoordinateSystem::WGS84);
    std::assert_eq!(original_resolution(&source), Resolution::new(0.5, 2.0));
}

#[test]
fn test_original_resolution_without_grid_uses_placeholder() {
    let source = SourceInfo::gridless(BoundingBox::new(0.0, 0.0, 1000.0, 300.0), CoordinateSystem::WebMercator);
    std::assert_eq!(original_resolution(&source), Resolution::new(10.0, 10.0));
}

#[test]
fn test_reproject_resolution_same_crs_is_identity() {
    let transformer = ScalingTransform::new();
    let res = reproject_resolution(
        &transformer, Resolution::new(3.0, 4.0), &CoordinateSystem::WGS84, &CoordinateSystem::WGS84,
        &BoundingBox::new(0.0, 0.0, 10.0, 10.0)).unwrap();
    std::assert_eq!(res, Resolution::new(3.0, 4.0));
    std::assert!(transformer.calls.borrow().is_empty());
}

#[test]
fn test_reproject_resolution_uses_extent_center() {
    let transformer = ScalingTransform::new();
    let from = CoordinateSystem::Other(2);
    let to = CoordinateSystem::Other(6);
    let res = reproject_resolution(
        &transformer, Resolution::new(1.5, 0.5), &from, &to,
        &BoundingBox::new(0.0, 0.0, 60.0, 30.0)).unwrap();
    assert_close(res.x, 4.5);
    assert_close(res.y, 1.5);

    let calls = transformer.calls.borrow();
    std::assert_eq!(calls[0], TransformCall::Point { from: to, to: from });
    std::assert_eq!(calls[1], TransformCall::BBox { from, to });
}

#[test]
fn test_reproject_resolution_propagates_transform_errors() {
    let transformer = ScalingTransform::new();
    let result = reproject_resolution(
        &transformer, Resolution::new(1.0, 1.0), &CoordinateSystem::WGS84, &super::test_utils::FAILING_CRS,
        &BoundingBox::new(0.0, 0.0, 10.0, 10.0));
    std::assert!(matches!(result, Err(crate::errors::ExportError::TransformError { .. })));
}

#[test]
fn test_reproject_resolution_with_real_transformer() {
    use crate::coordinate::CoordinateTransformer;

    let transformer = CoordinateTransformer::new();
    // One arc second near the equator is roughly 30 m in Web Mercator
    let mercator_extent = BoundingBox::new(-1000.0, -1000.0, 1000.0, 1000.0);
    let res = reproject_resolution(
        &transformer, Resolution::new(1.0 / 3600.0, 1.0 / 3600.0),
        &CoordinateSystem::WGS84, &CoordinateSystem::WebMercator, &mercator_extent).unwrap();
    std::assert!((res.x - 30.92).abs() < 0.01, "x resolution {}", res.x);
    std::assert!((res.y - 30.92).abs() < 0.01, "y resolution {}", res.y);
}
