//! Tests for the export form controller

extern crate std;

use std::fs;

use super::scratch_dir;
use crate::coordinate::{BoundingBox, CoordinateSystem, CoordinateTransformer};
use crate::errors::ExportError;
use crate::export::{ExportForm, ExportMode, NoDataRange, PyramidsFlag};
use crate::reconcile::SizeMode;
use crate::source::{RasterDataType, SourceInfo};

fn gridded_source() -> SourceInfo {
    SourceInfo::gridded(BoundingBox::new(0.0, 0.0, 1000.0, 500.0), 1000, 500, CoordinateSystem::Other(1))
}

fn gridless_source() -> SourceInfo {
    SourceInfo::gridless(BoundingBox::new(0.0, 0.0, 1000.0, 500.0), CoordinateSystem::Other(1))
}

fn canvas() -> (BoundingBox, CoordinateSystem) {
    (BoundingBox::new(100.0, 100.0, 300.0, 200.0), CoordinateSystem::Other(1))
}

#[test]
fn test_defaults_for_gridded_source() {
    let _ = env_logger::builder().is_test(true).try_init();
    let source = gridded_source();
    let transformer = CoordinateTransformer::new();
    let (extent, crs) = canvas();
    let form = ExportForm::new(&source, &transformer, extent, crs).unwrap();

    std::assert!(!form.tile_mode());
    std::assert_eq!(form.maximum_tile_size_x(), 1000);
    std::assert_eq!(form.maximum_tile_size_y(), 500);
    std::assert_eq!(form.output_format(), "GTiff");
    std::assert_eq!(form.mode(), ExportMode::Raw);
    std::assert!(form.add_to_canvas());
    std::assert_eq!(form.n_columns(), 1000);
    std::assert_eq!(form.n_rows(), 500);
    std::assert_eq!(form.x_resolution(), 1.0);
    std::assert_eq!(form.y_resolution(), 1.0);
    std::assert_eq!(form.output_crs(), CoordinateSystem::Other(1));
    std::assert_eq!(form.output_rectangle(), BoundingBox::new(0.0, 0.0, 1000.0, 500.0));
    std::assert!(form.create_options().is_empty());
}

#[test]
fn test_defaults_for_gridless_source() {
    let source = gridless_source();
    let transformer = CoordinateTransformer::new();
    let (extent, crs) = canvas();
    let mut form = ExportForm::new(&source, &transformer, extent, crs).unwrap();

    std::assert!(form.tile_mode());
    std::assert_eq!(form.maximum_tile_size_x(), 2000);
    std::assert_eq!(form.maximum_tile_size_y(), 2000);
    std::assert_eq!(form.n_columns(), 100);
    std::assert_eq!(form.n_rows(), 50);

    // Pyramids cannot be built for a source without a grid
    std::assert!(!form.pyramids_available());
    form.pyramid_options_mut().set_enabled(true);
    form.pyramid_options_mut().set_levels(vec![2, 4]);
    std::assert_eq!(form.build_pyramids_flag(), PyramidsFlag::No);
    std::assert!(form.pyramids_list().is_empty());
    std::assert_eq!(form.pyramid_resolutions_text(), "");
}

#[test]
fn test_choose_output_file_appends_extension() {
    let source = gridded_source();
    let transformer = CoordinateTransformer::new();
    let (extent, crs) = canvas();
    let mut form = ExportForm::new(&source, &transformer, extent, crs).unwrap();

    std::assert!(form.choose_output_file("out").unwrap().is_empty());
    std::assert_eq!(form.output_file_name(), "out.tif");
    form.choose_output_file("OUT.TIFF").unwrap();
    std::assert_eq!(form.output_file_name(), "OUT.TIFF");

    form.set_output_file_name("typed");
    std::assert_eq!(form.output_file_name(), "typed");
}

#[test]
fn test_choose_output_directory_in_tile_mode() {
    let source = gridless_source();
    let transformer = CoordinateTransformer::new();
    let (extent, crs) = canvas();
    let mut form = ExportForm::new(&source, &transformer, extent, crs).unwrap();

    let dir = scratch_dir("form_tiles");
    let base = dir.file_name().unwrap().to_string_lossy().to_string();
    fs::write(dir.join(format!("{}.vrt", base)), b"").unwrap();

    let dir_name = dir.to_string_lossy().to_string();
    let conflicts = form.choose_output_file(&dir_name).unwrap();
    std::assert_eq!(conflicts, vec![format!("{}.vrt", base)]);
    std::assert_eq!(form.output_file_name(), dir_name);
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_output_format() {
    let source = gridded_source();
    let transformer = CoordinateTransformer::new();
    let (extent, crs) = canvas();
    let mut form = ExportForm::new(&source, &transformer, extent, crs).unwrap();

    std::assert!(form.set_output_format("gtiff").is_ok());
    std::assert_eq!(form.output_format(), "GTiff");
    std::assert!(matches!(form.set_output_format("PNG"), Err(ExportError::InvalidInput(_))));
    std::assert_eq!(form.output_format(), "GTiff");
}

#[test]
fn test_no_data_only_for_raw_single_band() {
    let source = gridded_source().with_bands(vec![RasterDataType::Int16]);
    let transformer = CoordinateTransformer::new();
    let (extent, crs) = canvas();
    let mut form = ExportForm::new(&source, &transformer, extent, crs).unwrap();

    form.no_data_table_mut().set_enabled(true);
    form.no_data_table_mut().add_row(-1.0, -1.0);
    std::assert!(form.no_data_available());
    std::assert_eq!(form.no_data().unwrap(), vec![NoDataRange::new(-1.0, -1.0)]);

    form.set_mode(ExportMode::Rendered);
    std::assert!(!form.no_data_available());
    std::assert!(form.no_data().unwrap().is_empty());

    let multi_band = gridded_source().with_bands(vec![RasterDataType::Byte; 3]);
    let form = ExportForm::new(&multi_band, &transformer, extent, crs).unwrap();
    std::assert!(!form.no_data_available());
}

#[test]
fn test_load_transparent_no_data() {
    let source = gridded_source().with_transparency(vec![crate::source::TransparentPixel {
        min: 255.0,
        max: 255.0,
        percent_transparent: 100.0,
    }]);
    let transformer = CoordinateTransformer::new();
    let (extent, crs) = canvas();
    let mut form = ExportForm::new(&source, &transformer, extent, crs).unwrap();

    form.load_transparent_no_data();
    std::assert_eq!(form.no_data_table().cells(0), Some(("255", "255")));
}

#[test]
fn test_can_accept() {
    let source = gridded_source();
    let transformer = CoordinateTransformer::new();
    let (extent, crs) = canvas();
    let mut form = ExportForm::new(&source, &transformer, extent, crs).unwrap();

    std::assert!(!form.can_accept());
    form.set_output_file_name("/no/such/directory/out.tif");
    std::assert!(!form.can_accept());
    form.set_output_file_name("out.tif");
    std::assert!(form.can_accept());

    form.set_output_file_name("");
    form.hide_output();
    std::assert!(form.can_accept());
}

#[test]
fn test_validate_checks_enabled_groups_only() {
    let source = gridded_source();
    let transformer = CoordinateTransformer::new();
    let (extent, crs) = canvas();
    let mut form = ExportForm::new(&source, &transformer, extent, crs).unwrap();

    form.create_options_mut().set_options(vec!["COMPRESS=FOO".to_string()]);
    std::assert!(form.validate().is_ok());
    form.create_options_mut().set_enabled(true);
    std::assert!(matches!(form.validate(), Err(ExportError::InvalidCreateOption(_))));

    form.create_options_mut().set_options(vec!["COMPRESS=LZW".to_string()]);
    form.pyramid_options_mut().set_enabled(true);
    form.pyramid_options_mut().set_levels(vec![1]);
    std::assert!(form.validate().is_err());
    form.pyramid_options_mut().set_levels(vec![2, 4]);
    std::assert!(form.validate().is_ok());
}

#[test]
fn test_reconciler_edits_flow_through() {
    let source = gridded_source();
    let transformer = CoordinateTransformer::new();
    let (extent, crs) = canvas();
    let mut form = ExportForm::new(&source, &transformer, extent, crs).unwrap();

    form.reconciler_mut().set_output_extent_from_current().unwrap();
    std::assert_eq!(form.output_rectangle(), BoundingBox::new(100.0, 100.0, 300.0, 200.0));
    std::assert_eq!(form.n_columns(), 200);
    std::assert_eq!(form.n_rows(), 100);

    form.reconciler_mut().set_size_mode(SizeMode::BySpecifiedSize);
    form.reconciler_mut().set_user_size(50, 25).unwrap();
    std::assert_eq!(form.x_resolution(), 4.0);
    std::assert_eq!(form.y_resolution(), 4.0);
}
