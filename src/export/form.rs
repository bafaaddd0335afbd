//! Export form controller

use std::path::Path;
use log::{debug, info, warn};

use super::create_options::CreateOptions;
use super::filename;
use super::nodata::{NoDataRange, NoDataTable};
use super::plan::ExportPlan;
use super::pyramids::{PyramidOptions, PyramidsFlag};
use super::settings::{ExportMode, TileSettings, OUTPUT_FORMATS};
use crate::coordinate::{BoundingBox, CoordinateSystem, CoordinateTransform};
use crate::errors::{ExportError, ExportResult};
use crate::reconcile::ResolutionReconciler;
use crate::source::RasterSource;

/// All parameters of one raster export
///
/// Each user action maps to one method call; derived values (grid size,
/// resolution, which groups are available) are recomputed on the spot.
pub struct ExportForm<'a> {
    source: &'a dyn RasterSource,
    reconciler: ResolutionReconciler<'a>,
    output_file_name: String,
    output_hidden: bool,
    format: String,
    mode: ExportMode,
    tiles: TileSettings,
    add_to_canvas: bool,
    create_options: CreateOptions,
    no_data: NoDataTable,
    pyramids: PyramidOptions,
}

impl<'a> ExportForm<'a> {
    /// Create a form with defaults derived from the source
    ///
    /// # Arguments
    /// * `source` - Metadata of the layer being exported
    /// * `transformer` - Coordinate transform used for reprojection
    /// * `current_extent` - Visible map canvas extent
    /// * `current_crs` - CRS of the map canvas
    pub fn new(
        source: &'a dyn RasterSource,
        transformer: &'a dyn CoordinateTransform,
        current_extent: BoundingBox,
        current_crs: CoordinateSystem,
    ) -> ExportResult<Self> {
        let reconciler = ResolutionReconciler::new(source, transformer, current_extent, current_crs)?;
        let tiles = TileSettings::for_source(source);
        if tiles.tile_mode {
            info!("Source '{}' has no fixed grid, tile mode enabled", source.name());
        }

        Ok(ExportForm {
            source,
            reconciler,
            output_file_name: String::new(),
            output_hidden: false,
            format: OUTPUT_FORMATS[0].to_string(),
            mode: ExportMode::Raw,
            tiles,
            add_to_canvas: true,
            create_options: CreateOptions::default(),
            no_data: NoDataTable::new(source.data_type(1)),
            pyramids: PyramidOptions::default(),
        })
    }

    pub fn source(&self) -> &dyn RasterSource {
        self.source
    }

    pub fn reconciler(&self) -> &ResolutionReconciler<'a> {
        &self.reconciler
    }

    /// Resolution, size, extent and CRS edits go through the reconciler
    pub fn reconciler_mut(&mut self) -> &mut ResolutionReconciler<'a> {
        &mut self.reconciler
    }

    pub fn output_file_name(&self) -> &str {
        &self.output_file_name
    }

    /// Set the output name exactly as typed
    pub fn set_output_file_name(&mut self, file_name: &str) {
        self.output_file_name = file_name.to_string();
    }

    /// Set the output name as picked from a file chooser
    ///
    /// In tile mode the name is a directory, and the files inside it that
    /// the export would overwrite are returned. Otherwise ".tif" is
    /// appended when the name has no GeoTIFF extension.
    pub fn choose_output_file(&mut self, file_name: &str) -> ExportResult<Vec<String>> {
        if self.tiles.tile_mode {
            let conflicts = filename::conflicting_tile_files(Path::new(file_name))?;
            if !conflicts.is_empty() {
                warn!("The directory {} contains files which will be overwritten: {}",
                      file_name, conflicts.join(", "));
            }
            self.output_file_name = file_name.to_string();
            Ok(conflicts)
        } else {
            self.output_file_name = filename::ensure_tif_extension(file_name);
            Ok(Vec::new())
        }
    }

    /// Export into a caller-supplied destination; no output name is needed
    pub fn hide_output(&mut self) {
        self.output_hidden = true;
    }

    pub fn output_format(&self) -> &str {
        &self.format
    }

    pub fn set_output_format(&mut self, format: &str) -> ExportResult<()> {
        match OUTPUT_FORMATS.iter().find(|f| f.eq_ignore_ascii_case(format.trim())) {
            Some(f) => {
                self.format = f.to_string();
                Ok(())
            },
            None => Err(ExportError::InvalidInput(format!(
                "Unsupported output format '{}', expected one of: {}", format, OUTPUT_FORMATS.join(", ")))),
        }
    }

    pub fn mode(&self) -> ExportMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ExportMode) {
        self.mode = mode;
        debug!("Export mode {}, no-data ranges {}", mode.name(),
               if self.no_data_available() { "available" } else { "unavailable" });
    }

    pub fn tile_settings(&self) -> TileSettings {
        self.tiles
    }

    pub fn tile_mode(&self) -> bool {
        self.tiles.tile_mode
    }

    pub fn set_tile_mode(&mut self, tile_mode: bool) {
        self.tiles.tile_mode = tile_mode;
    }

    pub fn maximum_tile_size_x(&self) -> u32 {
        self.tiles.max_tile_size_x
    }

    pub fn maximum_tile_size_y(&self) -> u32 {
        self.tiles.max_tile_size_y
    }

    pub fn set_maximum_tile_size(&mut self, x: u32, y: u32) {
        self.tiles.max_tile_size_x = x;
        self.tiles.max_tile_size_y = y;
    }

    pub fn add_to_canvas(&self) -> bool {
        self.add_to_canvas
    }

    pub fn set_add_to_canvas(&mut self, add_to_canvas: bool) {
        self.add_to_canvas = add_to_canvas;
    }

    pub fn create_options_group(&self) -> &CreateOptions {
        &self.create_options
    }

    pub fn create_options_mut(&mut self) -> &mut CreateOptions {
        &mut self.create_options
    }

    /// Creation options for the writer; empty while the group is disabled
    pub fn create_options(&self) -> Vec<String> {
        self.create_options.options()
    }

    /// No-data ranges can only be set for raw single-band output
    pub fn no_data_available(&self) -> bool {
        self.mode == ExportMode::Raw && self.source.band_count() == 1
    }

    pub fn no_data_table(&self) -> &NoDataTable {
        &self.no_data
    }

    pub fn no_data_table_mut(&mut self) -> &mut NoDataTable {
        &mut self.no_data
    }

    /// Fill the no-data table from the layer's transparency settings
    pub fn load_transparent_no_data(&mut self) {
        let pixels = self.source.transparent_pixels();
        self.no_data.load_transparent(&pixels);
    }

    /// No-data ranges to write
    pub fn no_data(&self) -> ExportResult<Vec<NoDataRange>> {
        if !self.no_data_available() {
            return Ok(Vec::new());
        }
        self.no_data.ranges()
    }

    /// Overviews can only be built by sources that support it
    pub fn pyramids_available(&self) -> bool {
        self.source.can_build_pyramids()
    }

    pub fn pyramid_options(&self) -> &PyramidOptions {
        &self.pyramids
    }

    pub fn pyramid_options_mut(&mut self) -> &mut PyramidOptions {
        &mut self.pyramids
    }

    pub fn pyramids_list(&self) -> Vec<u32> {
        if self.pyramids_available() {
            self.pyramids.pyramids_list()
        } else {
            Vec::new()
        }
    }

    pub fn build_pyramids_flag(&self) -> PyramidsFlag {
        if self.pyramids_available() {
            self.pyramids.build_flag()
        } else {
            PyramidsFlag::No
        }
    }

    /// Overview sizes for display
    pub fn pyramid_resolutions_text(&self) -> String {
        if self.pyramids_available() {
            self.pyramids.resolutions_text(self.source)
        } else {
            String::new()
        }
    }

    pub fn output_rectangle(&self) -> BoundingBox {
        self.reconciler.output_extent()
    }

    pub fn output_crs(&self) -> CoordinateSystem {
        self.reconciler.output_crs()
    }

    pub fn n_columns(&self) -> u32 {
        self.reconciler.grid_size().columns
    }

    pub fn n_rows(&self) -> u32 {
        self.reconciler.grid_size().rows
    }

    pub fn x_resolution(&self) -> f64 {
        self.reconciler.resolution().x
    }

    pub fn y_resolution(&self) -> f64 {
        self.reconciler.resolution().y
    }

    /// Whether the export can be confirmed
    ///
    /// The output name must point into an existing directory unless the
    /// output was hidden.
    pub fn can_accept(&self) -> bool {
        self.output_hidden || filename::output_directory_exists(&self.output_file_name)
    }

    /// Check the creation options and the pyramid options
    pub fn validate(&self) -> ExportResult<()> {
        if self.create_options.is_enabled() {
            self.create_options.validate()?;
        }
        if self.pyramids_available() && self.pyramids.is_enabled() {
            self.pyramids.validate()?;
        }
        Ok(())
    }

    /// Collect everything the writer needs
    pub fn plan(&self) -> ExportResult<ExportPlan> {
        let snapshot = self.reconciler.snapshot();
        let plan = ExportPlan {
            output_file: self.output_file_name.clone(),
            format: self.format.clone(),
            mode: self.mode,
            crs: snapshot.crs,
            extent: snapshot.extent,
            extent_state: snapshot.extent_state,
            resolution: snapshot.resolution,
            grid: snapshot.grid,
            size_mode: snapshot.size_mode,
            resolution_state: snapshot.resolution_state,
            tiles: self.tiles,
            add_to_canvas: self.add_to_canvas,
            create_options: self.create_options(),
            compression: if self.create_options.is_enabled() { self.create_options.compression() } else { None },
            no_data: self.no_data()?,
            pyramids_flag: self.build_pyramids_flag(),
            pyramid_levels: self.pyramids_list(),
            pyramid_resampling: self.pyramids.resampling(),
            pyramids_format: self.pyramids.format(),
            pyramid_resolutions: self.pyramid_resolutions_text(),
        };
        debug!("Export plan ready for '{}'", plan.output_file);
        Ok(plan)
    }
}
