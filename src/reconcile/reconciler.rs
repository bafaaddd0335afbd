//! Resolution/extent reconciler

use log::{debug, info};

use super::extent::{ExtentSelector, ExtentState};
use super::resolution::{
    original_resolution, reproject_resolution, resolution_from_size, size_from_resolution,
    GridSize, Resolution, ResolutionState, SizeMode,
};
use crate::coordinate::{BoundingBox, CoordinateSystem, CoordinateTransform};
use crate::errors::{ExportError, ExportResult};
use crate::source::RasterSource;

/// Which inputs of the resolution group can currently be edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldAccess {
    pub resolution_editable: bool,
    pub size_editable: bool,
    /// "Use layer resolution" is offered
    pub original_resolution_available: bool,
    /// "Use layer size" is offered
    pub original_size_available: bool,
}

/// Complete reconciled state at one moment
#[derive(Debug, Clone, PartialEq)]
pub struct ReconcileSnapshot {
    pub crs: CoordinateSystem,
    pub extent: BoundingBox,
    pub extent_state: ExtentState,
    pub resolution: Resolution,
    pub grid: GridSize,
    pub size_mode: SizeMode,
    pub resolution_state: ResolutionState,
}

/// Keeps output extent, resolution and grid size consistent
///
/// Each setter runs to completion and leaves the three quantities in
/// agreement: whichever of resolution and size is driving (see
/// [`SizeMode`]) stays as given and the other is derived from it and the
/// output extent.
pub struct ResolutionReconciler<'a> {
    source: &'a dyn RasterSource,
    transformer: &'a dyn CoordinateTransform,
    extent: ExtentSelector,
    /// CRS the stored resolution is expressed in
    previous_crs: CoordinateSystem,
    resolution: Resolution,
    grid: GridSize,
    size_mode: SizeMode,
    resolution_state: ResolutionState,
}

impl<'a> ResolutionReconciler<'a> {
    /// Create a reconciler for a source
    ///
    /// The output CRS starts as the layer CRS, the output extent as the
    /// layer extent, and the resolution as the layer's native resolution.
    ///
    /// # Arguments
    /// * `source` - Metadata of the layer being exported
    /// * `transformer` - Coordinate transform used for every reprojection
    /// * `current_extent` - Visible map canvas extent
    /// * `current_crs` - CRS of the map canvas
    pub fn new(
        source: &'a dyn RasterSource,
        transformer: &'a dyn CoordinateTransform,
        current_extent: BoundingBox,
        current_crs: CoordinateSystem,
    ) -> ExportResult<Self> {
        let layer_crs = source.crs();
        let extent = ExtentSelector::new(
            source.extent(), layer_crs, current_extent, current_crs, layer_crs, transformer)?;

        let mut reconciler = ResolutionReconciler {
            source,
            transformer,
            extent,
            previous_crs: layer_crs,
            resolution: Resolution::default(),
            grid: GridSize::default(),
            size_mode: SizeMode::BySpecifiedResolution,
            resolution_state: ResolutionState::Original,
        };
        reconciler.set_original_resolution()?;
        Ok(reconciler)
    }

    pub fn output_extent(&self) -> BoundingBox {
        self.extent.output_extent()
    }

    pub fn output_crs(&self) -> CoordinateSystem {
        self.extent.output_crs()
    }

    pub fn extent_state(&self) -> ExtentState {
        self.extent.state()
    }

    pub fn extent_selector(&self) -> &ExtentSelector {
        &self.extent
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn grid_size(&self) -> GridSize {
        self.grid
    }

    pub fn resolution_state(&self) -> ResolutionState {
        self.resolution_state
    }

    pub fn size_mode(&self) -> SizeMode {
        self.size_mode
    }

    /// Title of the resolution group, e.g. "Resolution (current: layer)"
    pub fn resolution_state_label(&self) -> String {
        format!("Resolution (current: {})", self.resolution_state.label())
    }

    /// Which inputs are editable in the current mode
    pub fn field_access(&self) -> FieldAccess {
        let by_resolution = self.size_mode == SizeMode::BySpecifiedResolution;
        let has_grid = self.source.has_fixed_grid();
        FieldAccess {
            resolution_editable: by_resolution,
            size_editable: !by_resolution,
            original_resolution_available: by_resolution && has_grid,
            original_size_available: !by_resolution && has_grid,
        }
    }

    pub fn snapshot(&self) -> ReconcileSnapshot {
        ReconcileSnapshot {
            crs: self.output_crs(),
            extent: self.output_extent(),
            extent_state: self.extent_state(),
            resolution: self.resolution,
            grid: self.grid,
            size_mode: self.size_mode,
            resolution_state: self.resolution_state,
        }
    }

    /// Layer resolution expressed in the CRS and at the extent of `extent`
    fn derive_original_resolution(&self, extent: &ExtentSelector) -> ExportResult<Resolution> {
        let native = original_resolution(self.source);
        reproject_resolution(
            self.transformer, native, &self.source.crs(), &extent.output_crs(), &extent.output_extent())
    }

    /// Reset the resolution to the layer's native resolution
    pub fn set_original_resolution(&mut self) -> ExportResult<()> {
        let resolution = self.derive_original_resolution(&self.extent)?;
        self.resolution = resolution;
        self.resolution_state = ResolutionState::Original;
        debug!("Original resolution {} in {}", resolution, self.output_crs().auth_id());
        self.recalc_size();
        Ok(())
    }

    /// Reset the grid size to the layer's native pixel dimensions
    pub fn set_original_size(&mut self) -> ExportResult<()> {
        if !self.source.has_fixed_grid() {
            return Err(ExportError::InvalidInput(format!(
                "Source '{}' has no native size", self.source.name())));
        }
        self.grid = GridSize::new(self.source.x_size(), self.source.y_size());
        self.recalc_resolution();
        Ok(())
    }

    /// Resolution typed by the user
    ///
    /// Only accepted while the resolution drives the grid size.
    pub fn set_user_resolution(&mut self, x_res: f64, y_res: f64) -> ExportResult<()> {
        if !self.field_access().resolution_editable {
            return Err(ExportError::InvalidInput(
                "Resolution cannot be edited while the grid size is fixed".to_string()));
        }
        self.resolution = Resolution::new(x_res, y_res);
        self.resolution_state = ResolutionState::UserDefined;
        self.recalc_size();
        Ok(())
    }

    /// Grid size typed by the user
    ///
    /// Only accepted while the grid size drives the resolution.
    pub fn set_user_size(&mut self, columns: u32, rows: u32) -> ExportResult<()> {
        if !self.field_access().size_editable {
            return Err(ExportError::InvalidInput(
                "Grid size cannot be edited while the resolution is fixed".to_string()));
        }
        self.grid = GridSize::new(columns, rows);
        self.resolution_state = ResolutionState::UserDefined;
        self.recalc_resolution();
        Ok(())
    }

    /// Choose whether resolution or grid size drives the other
    pub fn set_size_mode(&mut self, mode: SizeMode) {
        self.size_mode = mode;
        self.recalc_resolution_size();
    }

    fn recalc_size(&mut self) {
        self.grid = size_from_resolution(&self.output_extent(), self.resolution.x, self.resolution.y);
    }

    fn recalc_resolution(&mut self) {
        self.resolution = resolution_from_size(&self.output_extent(), self.grid.columns, self.grid.rows);
    }

    fn recalc_resolution_size(&mut self) {
        match self.size_mode {
            SizeMode::BySpecifiedResolution => self.recalc_size(),
            SizeMode::BySpecifiedSize => {
                self.resolution_state = ResolutionState::UserDefined;
                self.recalc_resolution();
            },
        }
    }

    /// Switch the output CRS
    ///
    /// The output extent is derived again from its source. An original
    /// resolution is recomputed from the layer; a user resolution is
    /// reprojected from the previous CRS. In size mode the grid is kept and
    /// only the resolution follows the new extent.
    ///
    /// Nothing changes if `new_crs` is already the output CRS. If any
    /// transform fails, the error is returned and the state is left as it
    /// was before the call.
    pub fn on_crs_changed(&mut self, new_crs: CoordinateSystem) -> ExportResult<()> {
        if new_crs == self.previous_crs {
            return Ok(());
        }

        let mut extent = self.extent.clone();
        extent.set_output_crs(new_crs);
        extent.rederive(&self.previous_crs, self.transformer)?;

        let (resolution, grid) = match self.size_mode {
            SizeMode::BySpecifiedResolution => {
                let resolution = match self.resolution_state {
                    ResolutionState::Original => self.derive_original_resolution(&extent)?,
                    ResolutionState::UserDefined => reproject_resolution(
                        self.transformer, self.resolution, &self.previous_crs, &new_crs, &extent.output_extent())?,
                };
                (resolution, size_from_resolution(&extent.output_extent(), resolution.x, resolution.y))
            },
            SizeMode::BySpecifiedSize => {
                (resolution_from_size(&extent.output_extent(), self.grid.columns, self.grid.rows), self.grid)
            },
        };

        info!("Output CRS changed from {} to {}: extent {}, resolution {}, size {}",
              self.previous_crs.auth_id(), new_crs.auth_id(),
              extent.output_extent().to_bbox_string(), resolution, grid);

        self.extent = extent;
        self.resolution = resolution;
        self.grid = grid;
        self.previous_crs = new_crs;
        Ok(())
    }

    /// Use the layer extent as output extent
    pub fn set_output_extent_from_original(&mut self) -> ExportResult<()> {
        self.extent.set_from_original(self.transformer)?;
        self.on_extent_changed();
        Ok(())
    }

    /// Use the map canvas extent as output extent
    pub fn set_output_extent_from_current(&mut self) -> ExportResult<()> {
        self.extent.set_from_current(self.transformer)?;
        self.on_extent_changed();
        Ok(())
    }

    /// Use a user rectangle, given in `crs`, as output extent
    pub fn set_output_extent_from_user(&mut self, extent: BoundingBox, crs: &CoordinateSystem) -> ExportResult<()> {
        self.extent.set_from_user(extent, crs, self.transformer)?;
        self.on_extent_changed();
        Ok(())
    }

    /// Set the output extent directly, in the output CRS
    pub fn set_output_extent(&mut self, extent: BoundingBox) -> ExportResult<()> {
        let crs = self.output_crs();
        self.set_output_extent_from_user(extent, &crs)
    }

    fn on_extent_changed(&mut self) {
        // A fixed grid over a new extent can no longer have the layer's resolution
        if self.size_mode == SizeMode::BySpecifiedSize {
            self.resolution_state = ResolutionState::UserDefined;
        }
        self.recalc_resolution_size();
    }
}
