//! Output mode and tiling settings

use crate::errors::{ExportError, ExportResult};
use crate::source::RasterSource;

/// Formats the exporter can write
pub const OUTPUT_FORMATS: &[&str] = &["GTiff"];

/// Maximum tile edge used for sources without a native grid
const DEFAULT_MAX_TILE_SIZE: u32 = 2000;

/// What gets written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportMode {
    /// Raw band values
    Raw,
    /// The rendered RGBA image
    Rendered,
}

impl ExportMode {
    pub fn from_name(name: &str) -> ExportResult<Self> {
        match name.trim().to_lowercase().as_str() {
            "raw" | "raw_data" => Ok(ExportMode::Raw),
            "rendered" | "rendered_image" => Ok(ExportMode::Rendered),
            other => Err(ExportError::InvalidInput(format!("Unknown export mode: {}", other))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ExportMode::Raw => "raw",
            ExportMode::Rendered => "rendered",
        }
    }
}

/// Splitting of the output into several files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSettings {
    pub tile_mode: bool,
    pub max_tile_size_x: u32,
    pub max_tile_size_y: u32,
}

impl TileSettings {
    /// Defaults for a source
    ///
    /// Gridded sources fit in one tile of their native size. Sources
    /// without a grid are written in tiles of at most 2000x2000 pixels.
    pub fn for_source(source: &dyn RasterSource) -> Self {
        if source.has_fixed_grid() {
            TileSettings {
                tile_mode: false,
                max_tile_size_x: source.x_size(),
                max_tile_size_y: source.y_size(),
            }
        } else {
            TileSettings {
                tile_mode: true,
                max_tile_size_x: DEFAULT_MAX_TILE_SIZE,
                max_tile_size_y: DEFAULT_MAX_TILE_SIZE,
            }
        }
    }
}
