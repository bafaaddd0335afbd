//! Export job configuration
//!
//! A job is described by a TOML document with three tables:
//!
//! ```toml
//! [source]
//! crs = "EPSG:32633"
//! extent = [500000.0, 4000000.0, 510000.0, 4005000.0]
//! width = 1000
//! height = 500
//!
//! [canvas]
//! crs = "EPSG:4326"
//! extent = "14.9,36.1,15.0,36.2"
//!
//! [export]
//! output = "out.tif"
//! crs = "EPSG:3857"
//! resolution = [20.0, 20.0]
//! ```
//!
//! The document is walked by hand from `toml::Value`. Anything missing from
//! `[export]` keeps the form default.

use std::fs;
use std::path::Path;
use log::{debug, info};

use crate::coordinate::{BoundingBox, CoordinateSystem, CoordinateSystemFactory, CoordinateTransform};
use crate::errors::{ExportError, ExportResult};
use crate::export::{ExportForm, ExportMode, PyramidsFormat, ResamplingMethod};
use crate::reconcile::{ExtentState, SizeMode};
use crate::source::{RasterDataType, SourceInfo, TransparentPixel};
use crate::utils::parse_utils::{parse_f64_pair, parse_levels, parse_u32_pair};

/// Pyramid settings requested in `[export.pyramids]`
#[derive(Debug, Clone, PartialEq)]
pub struct PyramidRequest {
    pub enabled: bool,
    pub levels: Vec<u32>,
    pub resampling: Option<ResamplingMethod>,
    pub format: Option<PyramidsFormat>,
    pub create_options: Option<Vec<String>>,
}

/// One `[[export.nodata]]` row as cell text; a missing "to" mirrors "from"
#[derive(Debug, Clone, PartialEq)]
pub struct NoDataRequest {
    pub from: String,
    pub to: Option<String>,
}

/// Requested export settings
///
/// Every field is optional; unset fields leave the form defaults alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportRequest {
    pub output: Option<String>,
    pub format: Option<String>,
    pub crs: Option<CoordinateSystem>,
    pub extent_mode: Option<ExtentState>,
    pub user_extent: Option<BoundingBox>,
    /// CRS of `user_extent`, the output CRS when unset
    pub user_extent_crs: Option<CoordinateSystem>,
    pub size_mode: Option<SizeMode>,
    pub resolution: Option<(f64, f64)>,
    pub size: Option<(u32, u32)>,
    pub mode: Option<ExportMode>,
    pub tile_mode: Option<bool>,
    pub max_tile_size: Option<(u32, u32)>,
    pub add_to_canvas: Option<bool>,
    pub create_options: Option<Vec<String>>,
    pub load_transparent_nodata: Option<bool>,
    pub nodata: Option<Vec<NoDataRequest>>,
    pub pyramids: Option<PyramidRequest>,
}

impl ExportRequest {
    /// Read the `[export]` table
    pub fn from_toml(table: &toml::Value) -> ExportResult<Self> {
        let mut request = ExportRequest {
            output: get_str(table, "output")?,
            format: get_str(table, "format")?,
            crs: get_crs(table, "crs")?,
            user_extent: get_bbox(table, "user_extent")?,
            user_extent_crs: get_crs(table, "user_extent_crs")?,
            resolution: get_f64_pair(table, "resolution")?,
            size: get_u32_pair(table, "size")?,
            tile_mode: get_bool(table, "tile_mode")?,
            max_tile_size: get_u32_pair(table, "max_tile_size")?,
            add_to_canvas: get_bool(table, "add_to_canvas")?,
            create_options: get_string_list(table, "create_options")?,
            load_transparent_nodata: get_bool(table, "load_transparent_nodata")?,
            ..Default::default()
        };

        if let Some(name) = get_str(table, "extent_mode")? {
            request.extent_mode = Some(parse_extent_mode(&name)?);
        }
        if let Some(name) = get_str(table, "size_mode")? {
            request.size_mode = Some(parse_size_mode(&name)?);
        }
        if let Some(name) = get_str(table, "mode")? {
            request.mode = Some(ExportMode::from_name(&name)?);
        }

        if let Some(rows) = table.get("nodata") {
            let rows = rows.as_array()
                .ok_or_else(|| config_error("export.nodata must be an array of tables"))?;
            let mut nodata = Vec::with_capacity(rows.len());
            for row in rows {
                let from = get_cell(row, "from")?
                    .ok_or_else(|| config_error("export.nodata entries need a 'from' value"))?;
                nodata.push(NoDataRequest { from, to: get_cell(row, "to")? });
            }
            request.nodata = Some(nodata);
        }

        if let Some(pyramids) = table.get("pyramids") {
            request.pyramids = Some(parse_pyramids(pyramids)?);
        }

        Ok(request)
    }

    /// Replace fields with those set in `other`
    pub fn override_with(&mut self, other: ExportRequest) {
        macro_rules! take {
            ($($field:ident),*) => {
                $(if other.$field.is_some() { self.$field = other.$field; })*
            };
        }
        take!(output, format, crs, extent_mode, user_extent, user_extent_crs, size_mode, resolution, size,
              mode, tile_mode, max_tile_size, add_to_canvas, create_options, load_transparent_nodata,
              nodata, pyramids);
    }

    /// Apply the request to a form
    ///
    /// The CRS is applied first, then the extent, then resolution or size,
    /// so each step sees the output CRS and extent it depends on.
    pub fn apply(&self, form: &mut ExportForm) -> ExportResult<()> {
        if self.resolution.is_some() && self.size.is_some() {
            return Err(config_error("resolution and size cannot both be given"));
        }

        if let Some(format) = &self.format {
            form.set_output_format(format)?;
        }

        if let Some(crs) = self.crs {
            form.reconciler_mut().on_crs_changed(crs)?;
        }

        let extent_mode = match (self.extent_mode, self.user_extent) {
            (Some(mode), _) => Some(mode),
            (None, Some(_)) => Some(ExtentState::User),
            (None, None) => None,
        };
        match extent_mode {
            Some(ExtentState::Original) => form.reconciler_mut().set_output_extent_from_original()?,
            Some(ExtentState::Current) => form.reconciler_mut().set_output_extent_from_current()?,
            Some(ExtentState::User) => {
                let extent = self.user_extent
                    .ok_or_else(|| config_error("extent_mode 'user' needs user_extent"))?;
                let crs = self.user_extent_crs.unwrap_or_else(|| form.output_crs());
                form.reconciler_mut().set_output_extent_from_user(extent, &crs)?;
            },
            None => {},
        }

        let size_mode = match (self.size_mode, self.size) {
            (Some(mode), _) => Some(mode),
            (None, Some(_)) => Some(SizeMode::BySpecifiedSize),
            (None, None) => None,
        };
        let effective_mode = size_mode.unwrap_or_else(|| form.reconciler().size_mode());
        if self.resolution.is_some() && effective_mode == SizeMode::BySpecifiedSize {
            return Err(config_error("resolution cannot be given with size_mode 'size'"));
        }
        if self.size.is_some() && effective_mode == SizeMode::BySpecifiedResolution {
            return Err(config_error("size cannot be given with size_mode 'resolution'"));
        }

        if let Some(mode) = size_mode {
            form.reconciler_mut().set_size_mode(mode);
        }
        if let Some((x, y)) = self.resolution {
            form.reconciler_mut().set_user_resolution(x, y)?;
        }
        if let Some((columns, rows)) = self.size {
            form.reconciler_mut().set_user_size(columns, rows)?;
        }

        if let Some(mode) = self.mode {
            form.set_mode(mode);
        }
        if let Some(tile_mode) = self.tile_mode {
            form.set_tile_mode(tile_mode);
        }
        if let Some((x, y)) = self.max_tile_size {
            form.set_maximum_tile_size(x, y);
        }
        if let Some(output) = &self.output {
            form.choose_output_file(output)?;
        }
        if let Some(add_to_canvas) = self.add_to_canvas {
            form.set_add_to_canvas(add_to_canvas);
        }

        if let Some(options) = &self.create_options {
            let group = form.create_options_mut();
            group.set_enabled(true);
            group.set_options(options.clone());
        }

        if self.load_transparent_nodata == Some(true) {
            form.no_data_table_mut().set_enabled(true);
            form.load_transparent_no_data();
        }
        if let Some(rows) = &self.nodata {
            let table = form.no_data_table_mut();
            table.set_enabled(true);
            for row in rows {
                table.add_empty_row();
                let index = table.row_count() - 1;
                table.edit_from(index, &row.from)?;
                if let Some(to) = &row.to {
                    table.edit_to(index, to)?;
                }
            }
        }

        if let Some(request) = &self.pyramids {
            let pyramids = form.pyramid_options_mut();
            pyramids.set_enabled(request.enabled);
            pyramids.set_levels(request.levels.clone());
            if let Some(resampling) = request.resampling {
                pyramids.set_resampling(resampling);
            }
            if let Some(format) = request.format {
                pyramids.set_format(format);
            }
            if let Some(options) = &request.create_options {
                pyramids.create_options_mut().set_enabled(true);
                pyramids.create_options_mut().set_options(options.clone());
            }
        }

        debug!("Export request applied: {} x {} pixels", form.n_columns(), form.n_rows());
        Ok(())
    }
}

/// A complete export job
#[derive(Debug, Clone, PartialEq)]
pub struct ExportConfig {
    pub source: SourceInfo,
    /// Map canvas extent and CRS
    pub canvas: (BoundingBox, CoordinateSystem),
    pub export: ExportRequest,
}

impl ExportConfig {
    /// Parse a job from TOML text
    pub fn from_str(content: &str) -> ExportResult<Self> {
        let toml_value: toml::Value = match content.parse() {
            Ok(value) => value,
            Err(e) => return Err(ExportError::ConfigError(format!("Failed to parse TOML: {}", e))),
        };

        let source_table = toml_value.get("source")
            .ok_or_else(|| config_error("missing [source] table"))?;
        let source = parse_source(source_table)?;

        // Without a [canvas] the visible extent is the layer itself
        let canvas = match toml_value.get("canvas") {
            Some(table) => {
                let extent = get_bbox(table, "extent")?
                    .ok_or_else(|| config_error("canvas.extent is required"))?;
                let crs = get_crs(table, "crs")?.unwrap_or(source.crs);
                (extent, crs)
            },
            None => (source.extent, source.crs),
        };

        let export = match toml_value.get("export") {
            Some(table) => ExportRequest::from_toml(table)?,
            None => ExportRequest::default(),
        };

        Ok(ExportConfig { source, canvas, export })
    }

    /// Load a job from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> ExportResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        info!("Loaded export configuration from {}", path.display());
        Self::from_str(&content)
    }

    /// Build the export form for this job
    pub fn build_form<'a>(&'a self, transformer: &'a dyn CoordinateTransform) -> ExportResult<ExportForm<'a>> {
        let (extent, crs) = self.canvas;
        let mut form = ExportForm::new(&self.source, transformer, extent, crs)?;
        self.export.apply(&mut form)?;
        Ok(form)
    }
}

fn config_error(message: &str) -> ExportError {
    ExportError::ConfigError(message.to_string())
}

fn parse_source(table: &toml::Value) -> ExportResult<SourceInfo> {
    let extent = get_bbox(table, "extent")?
        .ok_or_else(|| config_error("source.extent is required"))?;
    let crs = get_crs(table, "crs")?
        .ok_or_else(|| config_error("source.crs is required"))?;

    let mut source = match (get_u32(table, "width")?, get_u32(table, "height")?) {
        (Some(width), Some(height)) => SourceInfo::gridded(extent, width, height, crs),
        (None, None) => SourceInfo::gridless(extent, crs),
        _ => return Err(config_error("source.width and source.height must be given together")),
    };

    if let Some(name) = get_str(table, "name")? {
        source.name = name;
    }

    if let Some(types) = get_string_list(table, "band_types")? {
        let types = types.iter()
            .map(|name| RasterDataType::from_name(name))
            .collect::<ExportResult<Vec<_>>>()?;
        source = source.with_bands(types);
    } else if let Some(bands) = get_u32(table, "bands")? {
        let data_type = match get_str(table, "data_type")? {
            Some(name) => RasterDataType::from_name(&name)?,
            None => RasterDataType::Byte,
        };
        source = source.with_bands(vec![data_type; bands as usize]);
    } else if let Some(name) = get_str(table, "data_type")? {
        let data_type = RasterDataType::from_name(&name)?;
        let bands = source.band_types.len();
        source = source.with_bands(vec![data_type; bands]);
    }

    if let Some(build) = get_bool(table, "build_pyramids")? {
        source.build_pyramids = build;
    }

    if let Some(entries) = table.get("transparency") {
        let entries = entries.as_array()
            .ok_or_else(|| config_error("source.transparency must be an array of tables"))?;
        let mut pixels = Vec::with_capacity(entries.len());
        for entry in entries {
            let min = get_f64(entry, "min")?
                .ok_or_else(|| config_error("source.transparency entries need 'min'"))?;
            let max = get_f64(entry, "max")?.unwrap_or(min);
            let percent_transparent = get_f64(entry, "percent")?.unwrap_or(100.0);
            pixels.push(TransparentPixel { min, max, percent_transparent });
        }
        source = source.with_transparency(pixels);
    }

    debug!("Source '{}': {} bands, extent {}", source.name, source.band_types.len(), source.extent.to_bbox_string());
    Ok(source)
}

fn parse_pyramids(table: &toml::Value) -> ExportResult<PyramidRequest> {
    let levels = match table.get("levels") {
        None => Vec::new(),
        Some(toml::Value::String(text)) => parse_levels(text)?,
        Some(toml::Value::Array(values)) => values.iter()
            .map(|v| v.as_integer()
                .and_then(|i| u32::try_from(i).ok())
                .ok_or_else(|| config_error("export.pyramids.levels must be positive integers")))
            .collect::<ExportResult<Vec<_>>>()?,
        Some(_) => return Err(config_error("export.pyramids.levels must be a list or a string")),
    };

    Ok(PyramidRequest {
        enabled: get_bool(table, "enabled")?.unwrap_or(true),
        levels,
        resampling: get_str(table, "resampling")?.map(|n| ResamplingMethod::from_name(&n)).transpose()?,
        format: get_str(table, "format")?.map(|n| PyramidsFormat::from_name(&n)).transpose()?,
        create_options: get_string_list(table, "create_options")?,
    })
}

fn parse_extent_mode(name: &str) -> ExportResult<ExtentState> {
    match name.trim().to_lowercase().as_str() {
        "original" | "layer" => Ok(ExtentState::Original),
        "current" | "canvas" => Ok(ExtentState::Current),
        "user" => Ok(ExtentState::User),
        other => Err(ExportError::ConfigError(format!("Unknown extent mode: {}", other))),
    }
}

fn parse_size_mode(name: &str) -> ExportResult<SizeMode> {
    match name.trim().to_lowercase().as_str() {
        "resolution" => Ok(SizeMode::BySpecifiedResolution),
        "size" => Ok(SizeMode::BySpecifiedSize),
        other => Err(ExportError::ConfigError(format!("Unknown size mode: {}", other))),
    }
}

/// Parse an extent mode given on the command line
pub fn extent_mode_from_name(name: &str) -> ExportResult<ExtentState> {
    parse_extent_mode(name)
}

fn get_str(table: &toml::Value, key: &str) -> ExportResult<Option<String>> {
    match table.get(key) {
        None => Ok(None),
        Some(value) => value.as_str()
            .map(|s| Some(s.to_string()))
            .ok_or_else(|| ExportError::ConfigError(format!("'{}' must be a string", key))),
    }
}

fn get_bool(table: &toml::Value, key: &str) -> ExportResult<Option<bool>> {
    match table.get(key) {
        None => Ok(None),
        Some(value) => value.as_bool()
            .map(Some)
            .ok_or_else(|| ExportError::ConfigError(format!("'{}' must be true or false", key))),
    }
}

fn as_f64(value: &toml::Value) -> Option<f64> {
    match value {
        toml::Value::Float(f) => Some(*f),
        toml::Value::Integer(i) => Some(*i as f64),
        _ => None,
    }
}

fn get_f64(table: &toml::Value, key: &str) -> ExportResult<Option<f64>> {
    match table.get(key) {
        None => Ok(None),
        Some(value) => as_f64(value)
            .map(Some)
            .ok_or_else(|| ExportError::ConfigError(format!("'{}' must be a number", key))),
    }
}

fn get_u32(table: &toml::Value, key: &str) -> ExportResult<Option<u32>> {
    match table.get(key) {
        None => Ok(None),
        Some(value) => value.as_integer()
            .and_then(|i| u32::try_from(i).ok())
            .map(Some)
            .ok_or_else(|| ExportError::ConfigError(format!("'{}' must be a non-negative integer", key))),
    }
}

/// Numbers from an array, or from comma separated text
fn get_numbers(table: &toml::Value, key: &str, count: usize) -> ExportResult<Option<Vec<f64>>> {
    let values = match table.get(key) {
        None => return Ok(None),
        Some(toml::Value::Array(values)) => values.iter()
            .map(|v| as_f64(v).ok_or_else(|| ExportError::ConfigError(format!("'{}' must hold numbers", key))))
            .collect::<ExportResult<Vec<_>>>()?,
        Some(_) => return Err(ExportError::ConfigError(format!("'{}' must be an array of {} numbers", key, count))),
    };
    if values.len() != count {
        return Err(ExportError::ConfigError(format!("'{}' must hold {} numbers, got {}", key, count, values.len())));
    }
    Ok(Some(values))
}

fn get_bbox(table: &toml::Value, key: &str) -> ExportResult<Option<BoundingBox>> {
    if let Some(toml::Value::String(text)) = table.get(key) {
        return BoundingBox::from_string(text).map(Some);
    }
    Ok(get_numbers(table, key, 4)?.map(|v| BoundingBox::new(v[0], v[1], v[2], v[3])))
}

fn get_f64_pair(table: &toml::Value, key: &str) -> ExportResult<Option<(f64, f64)>> {
    if let Some(toml::Value::String(text)) = table.get(key) {
        return parse_f64_pair(text, key).map(Some);
    }
    Ok(get_numbers(table, key, 2)?.map(|v| (v[0], v[1])))
}

fn get_u32_pair(table: &toml::Value, key: &str) -> ExportResult<Option<(u32, u32)>> {
    match table.get(key) {
        None => Ok(None),
        Some(toml::Value::String(text)) => parse_u32_pair(text, key).map(Some),
        Some(toml::Value::Array(values)) if values.len() == 2 => {
            let parse = |v: &toml::Value| v.as_integer()
                .and_then(|i| u32::try_from(i).ok())
                .ok_or_else(|| ExportError::ConfigError(format!("'{}' must hold non-negative integers", key)));
            Ok(Some((parse(&values[0])?, parse(&values[1])?)))
        },
        Some(_) => Err(ExportError::ConfigError(format!("'{}' must be two integers", key))),
    }
}

fn get_crs(table: &toml::Value, key: &str) -> ExportResult<Option<CoordinateSystem>> {
    match table.get(key) {
        None => Ok(None),
        Some(toml::Value::String(text)) => CoordinateSystemFactory::from_string(text).map(Some),
        Some(toml::Value::Integer(code)) => {
            let code = u32::try_from(*code)
                .map_err(|_| ExportError::ConfigError(format!("'{}' is not a valid EPSG code", key)))?;
            CoordinateSystemFactory::from_epsg(code).map(Some)
        },
        Some(_) => Err(ExportError::ConfigError(format!("'{}' must be an EPSG code", key))),
    }
}

/// Strings from an array, or space separated text
fn get_string_list(table: &toml::Value, key: &str) -> ExportResult<Option<Vec<String>>> {
    match table.get(key) {
        None => Ok(None),
        Some(toml::Value::String(text)) => Ok(Some(text.split_whitespace().map(str::to_string).collect())),
        Some(toml::Value::Array(values)) => values.iter()
            .map(|v| v.as_str()
                .map(str::to_string)
                .ok_or_else(|| ExportError::ConfigError(format!("'{}' must hold strings", key))))
            .collect::<ExportResult<Vec<_>>>()
            .map(Some),
        Some(_) => Err(ExportError::ConfigError(format!("'{}' must be a list of strings", key))),
    }
}

/// No-data cell: numbers are written as text, strings kept as typed
fn get_cell(table: &toml::Value, key: &str) -> ExportResult<Option<String>> {
    match table.get(key) {
        None => Ok(None),
        Some(toml::Value::String(text)) => Ok(Some(text.clone())),
        Some(toml::Value::Integer(i)) => Ok(Some(i.to_string())),
        Some(toml::Value::Float(f)) => Ok(Some(f.to_string())),
        Some(_) => Err(ExportError::ConfigError(format!("no-data '{}' must be a number or text", key))),
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::coordinate::CoordinateTransformer;
    use crate::export::PyramidsFlag;
    use crate::reconcile::ResolutionState;

    const JOB: &str = r#"
[source]
name = "dem"
crs = "EPSG:32633"
extent = [500000.0, 4000000.0, 510000.0, 4005000.0]
width = 1000
height = 500
data_type = "Float32"

[[source.transparency]]
min = -9999
max = -9999
percent = 100

[canvas]
crs = "EPSG:32633"
extent = "502000,4001000,504000,4002000"

[export]
output = "dem_out"
extent_mode = "current"
resolution = "20,20"
create_options = ["COMPRESS=DEFLATE", "PREDICTOR=3"]
load_transparent_nodata = true

[[export.nodata]]
from = 0

[export.pyramids]
levels = "2 4"
resampling = "average"
"#;

    #[test]
    fn test_parse_job() {
        let _ = env_logger::builder().is_test(true).try_init();
        let config = ExportConfig::from_str(JOB).unwrap();

        std::assert_eq!(config.source.name, "dem");
        std::assert_eq!(config.source.crs, CoordinateSystem::UTM(33, true));
        std::assert_eq!(config.source.size, Some((1000, 500)));
        std::assert_eq!(config.source.band_types, vec![RasterDataType::Float32]);
        std::assert_eq!(config.source.transparency.len(), 1);
        std::assert_eq!(config.canvas.0, BoundingBox::new(502000.0, 4001000.0, 504000.0, 4002000.0));

        std::assert_eq!(config.export.extent_mode, Some(ExtentState::Current));
        std::assert_eq!(config.export.resolution, Some((20.0, 20.0)));
        std::assert_eq!(config.export.nodata, Some(vec![NoDataRequest { from: "0".to_string(), to: None }]));
        let pyramids = config.export.pyramids.clone().unwrap();
        std::assert!(pyramids.enabled);
        std::assert_eq!(pyramids.levels, vec![2, 4]);
        std::assert_eq!(pyramids.resampling, Some(ResamplingMethod::Average));
    }

    #[test]
    fn test_build_form() {
        let config = ExportConfig::from_str(JOB).unwrap();
        let transformer = CoordinateTransformer::new();
        let form = config.build_form(&transformer).unwrap();

        std::assert_eq!(form.output_file_name(), "dem_out.tif");
        std::assert_eq!(form.output_rectangle(), BoundingBox::new(502000.0, 4001000.0, 504000.0, 4002000.0));
        std::assert_eq!(form.n_columns(), 100);
        std::assert_eq!(form.n_rows(), 50);
        std::assert_eq!(form.reconciler().resolution_state(), ResolutionState::UserDefined);
        std::assert_eq!(form.create_options(), vec!["COMPRESS=DEFLATE".to_string(), "PREDICTOR=3".to_string()]);
        std::assert_eq!(form.no_data_table().cells(0), Some(("-9999", "-9999")));
        std::assert_eq!(form.no_data_table().cells(1), Some(("0", "0")));
        std::assert_eq!(form.build_pyramids_flag(), PyramidsFlag::Yes);
    }

    #[test]
    fn test_override_with() {
        let mut request = ExportRequest {
            output: Some("a.tif".to_string()),
            resolution: Some((1.0, 1.0)),
            ..Default::default()
        };
        request.override_with(ExportRequest {
            output: Some("b.tif".to_string()),
            crs: Some(CoordinateSystem::WebMercator),
            ..Default::default()
        });

        std::assert_eq!(request.output.as_deref(), Some("b.tif"));
        std::assert_eq!(request.resolution, Some((1.0, 1.0)));
        std::assert_eq!(request.crs, Some(CoordinateSystem::WebMercator));
    }

    #[test]
    fn test_resolution_and_size_conflict() {
        let config = ExportConfig::from_str(r#"
[source]
crs = 1
extent = [0, 0, 100, 50]
width = 10
height = 5

[export]
resolution = [1, 1]
size = [10, 10]
"#).unwrap();
        let transformer = CoordinateTransformer::new();
        std::assert!(matches!(config.build_form(&transformer), Err(ExportError::ConfigError(_))));
    }

    #[test]
    fn test_resolution_and_size_must_match_size_mode() {
        let transformer = CoordinateTransformer::new();
        let base = "[source]\ncrs = 1\nextent = [0, 0, 100, 50]\nwidth = 10\nheight = 5\n\n[export]\n";

        let config = ExportConfig::from_str(&format!("{}size_mode = \"size\"\nresolution = [3, 3]\n", base)).unwrap();
        std::assert!(matches!(config.build_form(&transformer), Err(ExportError::ConfigError(_))));

        let config = ExportConfig::from_str(&format!("{}size_mode = \"resolution\"\nsize = [10, 10]\n", base)).unwrap();
        std::assert!(matches!(config.build_form(&transformer), Err(ExportError::ConfigError(_))));

        let config = ExportConfig::from_str(&format!("{}size_mode = \"size\"\nsize = [33, 17]\n", base)).unwrap();
        let form = config.build_form(&transformer).unwrap();
        std::assert_eq!((form.n_columns(), form.n_rows()), (33, 17));
        std::assert_eq!(form.x_resolution(), 100.0 / 33.0);
        std::assert_eq!(form.y_resolution(), 50.0 / 17.0);
    }

    #[test]
    fn test_invalid_documents() {
        std::assert!(matches!(ExportConfig::from_str("not toml ["), Err(ExportError::ConfigError(_))));
        std::assert!(ExportConfig::from_str("[canvas]\nextent = [0, 0, 1, 1]").is_err());
        std::assert!(ExportConfig::from_str("[source]\ncrs = 1\nextent = [0, 0, 1]").is_err());
        std::assert!(ExportConfig::from_str("[source]\ncrs = 1\nextent = [0, 0, 1, 1]\nwidth = 10").is_err());
        std::assert!(ExportConfig::from_str(
            "[source]\ncrs = 1\nextent = [0, 0, 1, 1]\n[export]\nextent_mode = \"sideways\"").is_err());
    }

    #[test]
    fn test_gridless_source_defaults() {
        let config = ExportConfig::from_str("[source]\ncrs = \"EPSG:3857\"\nextent = [0, 0, 1000, 500]").unwrap();
        std::assert_eq!(config.source.size, None);
        std::assert_eq!(config.canvas, (BoundingBox::new(0.0, 0.0, 1000.0, 500.0), CoordinateSystem::WebMercator));
        std::assert_eq!(config.export, ExportRequest::default());
    }
}
