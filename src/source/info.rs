//! Metadata-only raster source

use log::debug;

use super::provider::{RasterDataType, RasterPyramid, RasterSource, TransparentPixel};
use crate::coordinate::{BoundingBox, CoordinateSystem};

/// Raster source described entirely by its metadata
#[derive(Debug, Clone, PartialEq)]
pub struct SourceInfo {
    /// Provider name
    pub name: String,
    /// Native extent
    pub extent: BoundingBox,
    /// Native pixel dimensions, None for sources without a fixed grid
    pub size: Option<(u32, u32)>,
    /// Native coordinate system
    pub crs: CoordinateSystem,
    /// Per-band sample types
    pub band_types: Vec<RasterDataType>,
    /// Whether overviews can be built
    pub build_pyramids: bool,
    /// Renderer transparency ranges
    pub transparency: Vec<TransparentPixel>,
}

impl SourceInfo {
    /// Create a single-band gridded source
    pub fn gridded(extent: BoundingBox, x_size: u32, y_size: u32, crs: CoordinateSystem) -> Self {
        SourceInfo {
            name: "gdal".to_string(),
            extent,
            size: Some((x_size, y_size)),
            crs,
            band_types: vec![RasterDataType::Byte],
            build_pyramids: true,
            transparency: Vec::new(),
        }
    }

    /// Create a source without a fixed grid, such as a web map service
    pub fn gridless(extent: BoundingBox, crs: CoordinateSystem) -> Self {
        SourceInfo {
            name: "wms".to_string(),
            extent,
            size: None,
            crs,
            band_types: vec![RasterDataType::Byte, RasterDataType::Byte, RasterDataType::Byte],
            build_pyramids: false,
            transparency: Vec::new(),
        }
    }

    /// Replace the band types
    pub fn with_bands(mut self, band_types: Vec<RasterDataType>) -> Self {
        self.band_types = band_types;
        self
    }

    /// Replace the renderer transparency list
    pub fn with_transparency(mut self, transparency: Vec<TransparentPixel>) -> Self {
        self.transparency = transparency;
        self
    }
}

impl RasterSource for SourceInfo {
    fn name(&self) -> &str {
        &self.name
    }

    fn has_fixed_grid(&self) -> bool {
        self.size.is_some()
    }

    fn extent(&self) -> BoundingBox {
        self.extent
    }

    fn x_size(&self) -> u32 {
        self.size.map(|(x, _)| x).unwrap_or(0)
    }

    fn y_size(&self) -> u32 {
        self.size.map(|(_, y)| y).unwrap_or(0)
    }

    fn crs(&self) -> CoordinateSystem {
        self.crs
    }

    fn band_count(&self) -> u32 {
        self.band_types.len() as u32
    }

    fn data_type(&self, band: u32) -> RasterDataType {
        band.checked_sub(1)
            .and_then(|i| self.band_types.get(i as usize))
            .copied()
            .unwrap_or(RasterDataType::Byte)
    }

    fn can_build_pyramids(&self) -> bool {
        self.build_pyramids && self.has_fixed_grid()
    }

    fn build_pyramid_list(&self, levels: &[u32]) -> Vec<RasterPyramid> {
        let (x_size, y_size) = match self.size {
            Some(size) => size,
            None => return Vec::new(),
        };

        levels.iter()
            .filter(|level| **level > 1)
            .map(|&level| {
                let pyramid = RasterPyramid {
                    level,
                    x_dim: (0.5 + x_size as f64 / level as f64) as u32,
                    y_dim: (0.5 + y_size as f64 / level as f64) as u32,
                    exists: false,
                };
                debug!("Pyramid level {}: {}x{}", level, pyramid.x_dim, pyramid.y_dim);
                pyramid
            })
            .collect()
    }

    fn transparent_pixels(&self) -> Vec<TransparentPixel> {
        self.transparency.clone()
    }
}
