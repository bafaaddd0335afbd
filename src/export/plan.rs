//! Finished export parameters

use super::nodata::NoDataRange;
use super::pyramids::{PyramidsFlag, PyramidsFormat, ResamplingMethod};
use super::settings::{ExportMode, TileSettings};
use crate::coordinate::{BoundingBox, CoordinateSystem};
use crate::reconcile::{ExtentState, GridSize, Resolution, ResolutionState, SizeMode};
use crate::utils::format_utils::{format_number, format_pair};

/// Everything a raster writer needs to produce the output
#[derive(Debug, Clone, PartialEq)]
pub struct ExportPlan {
    pub output_file: String,
    pub format: String,
    pub mode: ExportMode,
    pub crs: CoordinateSystem,
    pub extent: BoundingBox,
    pub extent_state: ExtentState,
    pub resolution: Resolution,
    pub grid: GridSize,
    pub size_mode: SizeMode,
    pub resolution_state: ResolutionState,
    pub tiles: TileSettings,
    pub add_to_canvas: bool,
    pub create_options: Vec<String>,
    /// Compression name and TIFF compression code
    pub compression: Option<(String, u16)>,
    pub no_data: Vec<NoDataRange>,
    pub pyramids_flag: PyramidsFlag,
    pub pyramid_levels: Vec<u32>,
    pub pyramid_resampling: ResamplingMethod,
    pub pyramids_format: PyramidsFormat,
    pub pyramid_resolutions: String,
}

impl ExportPlan {
    /// Human-readable multi-line description
    pub fn summary(&self) -> String {
        let mut result = "Export Plan:\n".to_string();
        result.push_str(&format!("  Output: {}\n",
                                 if self.output_file.is_empty() { "(none)" } else { &self.output_file }));
        result.push_str(&format!("  Format: {} ({} data)\n", self.format, self.mode.name()));
        result.push_str(&format!("  CRS: {}\n", self.crs.description()));
        result.push_str(&format!("  Extent ({}): {}, {} : {}, {}\n",
                                 self.extent_state.name(),
                                 format_number(self.extent.min_x), format_number(self.extent.min_y),
                                 format_number(self.extent.max_x), format_number(self.extent.max_y)));
        result.push_str(&format!("  Resolution (current: {}): {}\n",
                                 self.resolution_state.label(),
                                 format_pair(self.resolution.x, self.resolution.y)));
        result.push_str(&format!("  Size: {} columns x {} rows{}\n", self.grid.columns, self.grid.rows,
                                 match self.size_mode {
                                     SizeMode::BySpecifiedResolution => "",
                                     SizeMode::BySpecifiedSize => " (fixed)",
                                 }));

        if self.tiles.tile_mode {
            result.push_str(&format!("  Tiles: max {}x{} pixels\n",
                                     self.tiles.max_tile_size_x, self.tiles.max_tile_size_y));
        }

        if !self.create_options.is_empty() {
            result.push_str(&format!("  Creation options: {}\n", self.create_options.join(" ")));
        }
        if let Some((name, code)) = &self.compression {
            result.push_str(&format!("  Compression: {} ({})\n", name, code));
        }

        for range in &self.no_data {
            result.push_str(&format!("  No-data: {} - {}\n", format_number(range.min), format_number(range.max)));
        }

        if self.pyramids_flag == PyramidsFlag::Yes {
            result.push_str(&format!("  Pyramids ({}, {}): {}\n",
                                     self.pyramids_format.name(), self.pyramid_resampling,
                                     self.pyramid_resolutions));
        }

        result.push_str(&format!("  Add to canvas: {}\n", if self.add_to_canvas { "yes" } else { "no" }));
        result
    }

    /// Plan as a TOML document
    pub fn to_toml(&self) -> String {
        let mut table = toml::Table::new();
        table.insert("output".to_string(), toml::Value::String(self.output_file.clone()));
        table.insert("format".to_string(), toml::Value::String(self.format.clone()));
        table.insert("mode".to_string(), toml::Value::String(self.mode.name().to_string()));
        table.insert("crs".to_string(), toml::Value::String(self.crs.auth_id()));
        table.insert("extent_mode".to_string(), toml::Value::String(self.extent_state.name().to_string()));
        table.insert("extent".to_string(), float_array(&[
            self.extent.min_x, self.extent.min_y, self.extent.max_x, self.extent.max_y,
        ]));
        table.insert("resolution".to_string(), float_array(&[self.resolution.x, self.resolution.y]));
        table.insert("size".to_string(), toml::Value::Array(vec![
            toml::Value::Integer(self.grid.columns as i64),
            toml::Value::Integer(self.grid.rows as i64),
        ]));
        table.insert("resolution_state".to_string(),
                     toml::Value::String(self.resolution_state.label().to_string()));
        table.insert("tile_mode".to_string(), toml::Value::Boolean(self.tiles.tile_mode));
        table.insert("max_tile_size".to_string(), toml::Value::Array(vec![
            toml::Value::Integer(self.tiles.max_tile_size_x as i64),
            toml::Value::Integer(self.tiles.max_tile_size_y as i64),
        ]));
        table.insert("add_to_canvas".to_string(), toml::Value::Boolean(self.add_to_canvas));
        table.insert("create_options".to_string(), toml::Value::Array(
            self.create_options.iter().cloned().map(toml::Value::String).collect()));

        let no_data = self.no_data.iter()
            .map(|range| {
                let mut row = toml::Table::new();
                row.insert("from".to_string(), toml::Value::Float(range.min));
                row.insert("to".to_string(), toml::Value::Float(range.max));
                toml::Value::Table(row)
            })
            .collect();
        table.insert("nodata".to_string(), toml::Value::Array(no_data));

        let mut pyramids = toml::Table::new();
        pyramids.insert("build".to_string(), toml::Value::Boolean(self.pyramids_flag == PyramidsFlag::Yes));
        pyramids.insert("levels".to_string(), toml::Value::Array(
            self.pyramid_levels.iter().map(|l| toml::Value::Integer(*l as i64)).collect()));
        pyramids.insert("resampling".to_string(), toml::Value::String(self.pyramid_resampling.name().to_string()));
        pyramids.insert("format".to_string(), toml::Value::String(self.pyramids_format.name().to_string()));
        table.insert("pyramids".to_string(), toml::Value::Table(pyramids));

        let mut document = toml::Table::new();
        document.insert("plan".to_string(), toml::Value::Table(table));
        document.to_string()
    }
}

fn float_array(values: &[f64]) -> toml::Value {
    toml::Value::Array(values.iter().map(|v| toml::Value::Float(*v)).collect())
}
