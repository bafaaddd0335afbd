//! Data provider interface

use std::fmt;

use crate::coordinate::{BoundingBox, CoordinateSystem};
use crate::errors::{ExportError, ExportResult};

/// Sample type of a raster band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterDataType {
    Byte,
    UInt16,
    Int16,
    UInt32,
    Int32,
    Float32,
    Float64,
}

impl RasterDataType {
    /// Floating point bands keep fractional no-data values
    pub fn is_float(&self) -> bool {
        matches!(self, RasterDataType::Float32 | RasterDataType::Float64)
    }

    /// GDAL-style type name
    pub fn name(&self) -> &'static str {
        match self {
            RasterDataType::Byte => "Byte",
            RasterDataType::UInt16 => "UInt16",
            RasterDataType::Int16 => "Int16",
            RasterDataType::UInt32 => "UInt32",
            RasterDataType::Int32 => "Int32",
            RasterDataType::Float32 => "Float32",
            RasterDataType::Float64 => "Float64",
        }
    }

    /// Parse a type name, case-insensitively
    pub fn from_name(name: &str) -> ExportResult<Self> {
        match name.trim().to_lowercase().as_str() {
            "byte" | "uint8" => Ok(RasterDataType::Byte),
            "uint16" => Ok(RasterDataType::UInt16),
            "int16" => Ok(RasterDataType::Int16),
            "uint32" => Ok(RasterDataType::UInt32),
            "int32" => Ok(RasterDataType::Int32),
            "float32" => Ok(RasterDataType::Float32),
            "float64" => Ok(RasterDataType::Float64),
            other => Err(ExportError::InvalidInput(format!("Unknown raster data type: {}", other))),
        }
    }
}

impl fmt::Display for RasterDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One overview level of a raster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterPyramid {
    /// Decimation factor relative to the full-resolution image
    pub level: u32,
    /// Width of the overview in pixels
    pub x_dim: u32,
    /// Height of the overview in pixels
    pub y_dim: u32,
    /// Whether the overview already exists in the source
    pub exists: bool,
}

/// A value range rendered fully or partly transparent by the layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransparentPixel {
    pub min: f64,
    pub max: f64,
    pub percent_transparent: f64,
}

/// Metadata a raster data provider exposes to the exporter
pub trait RasterSource {
    /// Provider name, e.g. "gdal" or "wms"
    fn name(&self) -> &str;

    /// Whether the source has a fixed pixel grid
    ///
    /// Web services render on demand and have no native size; for those
    /// `x_size`/`y_size` carry no meaning.
    fn has_fixed_grid(&self) -> bool;

    /// Full extent in the source's native CRS
    fn extent(&self) -> BoundingBox;

    /// Native width in pixels
    fn x_size(&self) -> u32;

    /// Native height in pixels
    fn y_size(&self) -> u32;

    /// Native coordinate system
    fn crs(&self) -> CoordinateSystem;

    fn band_count(&self) -> u32;

    /// Sample type of a 1-based band number
    fn data_type(&self, band: u32) -> RasterDataType;

    /// Whether overviews can be built while writing
    fn can_build_pyramids(&self) -> bool;

    /// Overview dimensions for the requested decimation levels
    fn build_pyramid_list(&self, levels: &[u32]) -> Vec<RasterPyramid>;

    /// Transparency ranges configured on the layer's renderer
    fn transparent_pixels(&self) -> Vec<TransparentPixel>;
}
