//! Tests for output file naming

extern crate std;

use std::fs;

use super::scratch_dir;
use crate::export::filename::{conflicting_tile_files, ensure_tif_extension, output_directory_exists};

#[test]
fn test_ensure_tif_extension() {
    std::assert_eq!(ensure_tif_extension("out"), "out.tif");
    std::assert_eq!(ensure_tif_extension("out.tif"), "out.tif");
    std::assert_eq!(ensure_tif_extension("OUT.TIFF"), "OUT.TIFF");
    std::assert_eq!(ensure_tif_extension("out.png"), "out.png.tif");
    std::assert_eq!(ensure_tif_extension(""), "");
}

#[test]
fn test_output_directory_exists() {
    let dir = scratch_dir("outdir");
    let inside = dir.join("out.tif");
    std::assert!(output_directory_exists(&inside.to_string_lossy()));
    std::assert!(output_directory_exists("out.tif"));
    std::assert!(!output_directory_exists(&dir.join("missing").join("out.tif").to_string_lossy()));
    std::assert!(!output_directory_exists(""));
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_conflicting_tile_files() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = scratch_dir("tiles");
    let base = dir.file_name().unwrap().to_string_lossy().to_string();
    for name in [format!("{}.vrt", base), format!("{}.1.tif", base), format!("{}_0_0.tif", base), "other.tif".to_string()] {
        fs::write(dir.join(name), b"").unwrap();
    }

    let conflicts = conflicting_tile_files(&dir).unwrap();
    std::assert_eq!(conflicts, vec![format!("{}.1.tif", base), format!("{}.vrt", base)]);
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_conflicting_tile_files_missing_directory() {
    let dir = std::env::temp_dir().join("rastersave_does_not_exist_42");
    std::assert!(conflicting_tile_files(&dir).unwrap().is_empty());
}
