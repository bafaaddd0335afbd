//! Raster data source metadata
//!
//! The exporter never reads pixels itself. It only needs to know the
//! native grid, extent and CRS of the layer being exported, which a data
//! provider exposes through the [`RasterSource`] trait.

mod provider;
mod info;

pub use self::provider::{RasterDataType, RasterPyramid, RasterSource, TransparentPixel};
pub use self::info::SourceInfo;
