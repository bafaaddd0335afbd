//! Output extent selection

use log::debug;

use crate::coordinate::{BoundingBox, CoordinateSystem, CoordinateTransform};
use crate::errors::ExportResult;

/// Which rectangle the output extent was taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtentState {
    /// The full extent of the source layer
    Original,
    /// The extent currently visible on the map canvas
    Current,
    /// A rectangle entered by the user
    User,
}

impl ExtentState {
    pub fn name(&self) -> &'static str {
        match self {
            ExtentState::Original => "original",
            ExtentState::Current => "current",
            ExtentState::User => "user",
        }
    }
}

/// Output extent together with the rectangles it can be derived from
///
/// The layer and canvas extents are kept in their own CRS. When the output
/// CRS changes the output extent is derived again from whichever of them it
/// came from, so reprojection errors do not pile up over several changes.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtentSelector {
    original_extent: BoundingBox,
    original_crs: CoordinateSystem,
    current_extent: BoundingBox,
    current_crs: CoordinateSystem,
    output_crs: CoordinateSystem,
    output_extent: BoundingBox,
    state: ExtentState,
}

impl ExtentSelector {
    /// Create a selector whose output extent is the layer extent in `output_crs`
    pub fn new(
        original_extent: BoundingBox,
        original_crs: CoordinateSystem,
        current_extent: BoundingBox,
        current_crs: CoordinateSystem,
        output_crs: CoordinateSystem,
        transformer: &dyn CoordinateTransform,
    ) -> ExportResult<Self> {
        let mut selector = ExtentSelector {
            original_extent,
            original_crs,
            current_extent,
            current_crs,
            output_crs,
            output_extent: original_extent,
            state: ExtentState::Original,
        };
        selector.set_from_original(transformer)?;
        Ok(selector)
    }

    pub fn output_extent(&self) -> BoundingBox {
        self.output_extent
    }

    pub fn output_crs(&self) -> CoordinateSystem {
        self.output_crs
    }

    pub fn state(&self) -> ExtentState {
        self.state
    }

    pub fn original_extent(&self) -> (BoundingBox, CoordinateSystem) {
        (self.original_extent, self.original_crs)
    }

    pub fn current_extent(&self) -> (BoundingBox, CoordinateSystem) {
        (self.current_extent, self.current_crs)
    }

    /// Change the output CRS without touching the output extent
    ///
    /// Call [`ExtentSelector::rederive`] afterwards to bring the extent into
    /// the new system.
    pub fn set_output_crs(&mut self, crs: CoordinateSystem) {
        self.output_crs = crs;
    }

    /// Use the layer extent
    pub fn set_from_original(&mut self, transformer: &dyn CoordinateTransform) -> ExportResult<()> {
        let (extent, crs) = (self.original_extent, self.original_crs);
        self.set_output_extent(extent, &crs, ExtentState::Original, transformer)
    }

    /// Use the map canvas extent
    pub fn set_from_current(&mut self, transformer: &dyn CoordinateTransform) -> ExportResult<()> {
        let (extent, crs) = (self.current_extent, self.current_crs);
        self.set_output_extent(extent, &crs, ExtentState::Current, transformer)
    }

    /// Use a user rectangle given in `crs`
    pub fn set_from_user(
        &mut self,
        extent: BoundingBox,
        crs: &CoordinateSystem,
        transformer: &dyn CoordinateTransform,
    ) -> ExportResult<()> {
        self.set_output_extent(extent, crs, ExtentState::User, transformer)
    }

    /// Derive the output extent again after an output CRS change
    ///
    /// A user extent has no source of its own, so the previous output
    /// extent is reprojected from `previous_crs`.
    pub fn rederive(&mut self, previous_crs: &CoordinateSystem, transformer: &dyn CoordinateTransform) -> ExportResult<()> {
        match self.state {
            ExtentState::Original => self.set_from_original(transformer),
            ExtentState::Current => self.set_from_current(transformer),
            ExtentState::User => {
                let extent = self.output_extent;
                self.set_from_user(extent, previous_crs, transformer)
            },
        }
    }

    fn set_output_extent(
        &mut self,
        extent: BoundingBox,
        src_crs: &CoordinateSystem,
        state: ExtentState,
        transformer: &dyn CoordinateTransform,
    ) -> ExportResult<()> {
        let output_extent = if *src_crs != self.output_crs {
            transformer.transform_bbox(&extent, src_crs, &self.output_crs)?
        } else {
            extent
        };

        debug!("Output extent ({}) set to {} in {}",
               state.name(), output_extent.to_bbox_string(), self.output_crs.auth_id());
        self.output_extent = output_extent;
        self.state = state;
        Ok(())
    }
}
