//! Output file naming

use std::fs;
use std::path::Path;
use log::debug;
use regex::Regex;

use crate::errors::{ExportError, ExportResult};

/// Append ".tif" unless the name already ends in ".tif" or ".tiff"
///
/// The check ignores case. An empty name stays empty.
pub fn ensure_tif_extension(file_name: &str) -> String {
    if file_name.is_empty() {
        return String::new();
    }
    let lower = file_name.to_lowercase();
    if lower.ends_with(".tif") || lower.ends_with(".tiff") {
        file_name.to_string()
    } else {
        format!("{}.tif", file_name)
    }
}

/// Whether the directory that would contain `file_name` exists
///
/// Relative names are resolved against the working directory.
pub fn output_directory_exists(file_name: &str) -> bool {
    if file_name.is_empty() {
        return false;
    }
    match Path::new(file_name).parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.is_dir(),
        _ => Path::new(".").is_dir(),
    }
}

/// Files a tile-mode export into `dir` would overwrite
///
/// Tiles and their index are named after the directory, so any entry
/// called `<base name>.<anything>` is reported. The base name is the
/// directory name up to its first dot. A missing directory has no
/// conflicts.
pub fn conflicting_tile_files(dir: &Path) -> ExportResult<Vec<String>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let base_name = dir.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();
    let base_name = base_name.split('.').next().unwrap_or_default();
    if base_name.is_empty() {
        return Ok(Vec::new());
    }

    let pattern = Regex::new(&format!(r"^{}\..*$", regex::escape(base_name)))
        .map_err(|e| ExportError::GenericError(format!("Invalid tile name pattern: {}", e)))?;

    let mut conflicts = Vec::new();
    for entry in fs::read_dir(dir)? {
        let name = entry?.file_name().to_string_lossy().to_string();
        if pattern.is_match(&name) {
            conflicts.push(name);
        }
    }
    conflicts.sort();

    debug!("{} existing files in {} would be overwritten", conflicts.len(), dir.display());
    Ok(conflicts)
}
