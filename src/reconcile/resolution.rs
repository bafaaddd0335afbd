//! Resolution and grid size arithmetic

use std::fmt;
use log::{debug, warn};

use crate::coordinate::{BoundingBox, CoordinateSystem, CoordinateTransform};
use crate::errors::ExportResult;
use crate::source::RasterSource;

/// Divisor used to invent a resolution for sources without a native grid
const GRIDLESS_RESOLUTION_DIVISOR: f64 = 100.0;

/// Pixel size in units of the output CRS
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Resolution {
    pub x: f64,
    pub y: f64,
}

impl Resolution {
    pub fn new(x: f64, y: f64) -> Self {
        Resolution { x, y }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {}", self.x, self.y)
    }
}

/// Output grid dimensions in pixels; zero means unresolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridSize {
    pub columns: u32,
    pub rows: u32,
}

impl GridSize {
    pub fn new(columns: u32, rows: u32) -> Self {
        GridSize { columns, rows }
    }

    /// True when either dimension is still unresolved
    pub fn is_empty(&self) -> bool {
        self.columns == 0 || self.rows == 0
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.columns, self.rows)
    }
}

/// Where the current resolution came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionState {
    /// Derived from the source's native resolution
    Original,
    /// Typed by the user or implied by a user-chosen size or extent
    UserDefined,
}

impl ResolutionState {
    /// Short label used in the resolution group title
    pub fn label(&self) -> &'static str {
        match self {
            ResolutionState::Original => "layer",
            ResolutionState::UserDefined => "user defined",
        }
    }
}

/// Which of resolution and grid size drives the other
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeMode {
    BySpecifiedResolution,
    BySpecifiedSize,
}

fn rounded_count(length: f64, resolution: f64) -> u32 {
    if resolution == 0.0 {
        return 0;
    }
    // f64::round rounds half away from zero; negative or NaN counts saturate to 0
    let count = (length / resolution).round();
    if count > u32::MAX as f64 {
        warn!("Resolution {} over length {} gives {} pixels, capped at {}", resolution, length, count, u32::MAX);
        return u32::MAX;
    }
    count as u32
}

/// Grid size covering `extent` at the given resolution
///
/// Counts are rounded to the nearest integer with ties away from zero. A
/// zero resolution on either axis yields a zero count on that axis, and
/// counts too large for a `u32` are capped at `u32::MAX`.
pub fn size_from_resolution(extent: &BoundingBox, x_res: f64, y_res: f64) -> GridSize {
    GridSize::new(
        rounded_count(extent.width(), x_res),
        rounded_count(extent.height(), y_res),
    )
}

/// Resolution that divides `extent` into the given grid
///
/// A zero column or row count yields a zero resolution on that axis.
pub fn resolution_from_size(extent: &BoundingBox, columns: u32, rows: u32) -> Resolution {
    let x = if columns != 0 { extent.width() / columns as f64 } else { 0.0 };
    let y = if rows != 0 { extent.height() / rows as f64 } else { 0.0 };
    Resolution::new(x, y)
}

/// Native resolution of a source, in the source's own CRS
///
/// Sources without a fixed grid get `extent.width / 100` on both axes, a
/// placeholder that only guarantees a usable non-zero value.
pub fn original_resolution(source: &dyn RasterSource) -> Resolution {
    let extent = source.extent();
    if source.has_fixed_grid() && source.x_size() > 0 && source.y_size() > 0 {
        Resolution::new(
            extent.width() / source.x_size() as f64,
            extent.height() / source.y_size() as f64,
        )
    } else {
        let res = extent.width() / GRIDLESS_RESOLUTION_DIVISOR;
        Resolution::new(res, res)
    }
}

/// Express a resolution measured in `source_crs` in `output_crs` units
///
/// A single pixel is placed at the centre of the output extent, moved into
/// the source CRS, and its reprojected envelope gives the new resolution.
/// Distortion varies across an extent, so pixels near the edges may map to
/// noticeably different sizes; only the centre is considered.
pub fn reproject_resolution(
    transformer: &dyn CoordinateTransform,
    resolution: Resolution,
    source_crs: &CoordinateSystem,
    output_crs: &CoordinateSystem,
    output_extent: &BoundingBox,
) -> ExportResult<Resolution> {
    if source_crs == output_crs {
        return Ok(resolution);
    }

    let center = output_extent.center();
    let source_center = transformer.transform_point(&center, output_crs, source_crs)?;
    let pixel = BoundingBox::from_center(&source_center, resolution.x, resolution.y);
    let projected = transformer.transform_bbox(&pixel, source_crs, output_crs)?;

    let result = Resolution::new(projected.width(), projected.height());
    debug!("Reprojected resolution {} from {} to {} in {}",
           resolution, source_crs.auth_id(), result, output_crs.auth_id());
    Ok(result)
}
