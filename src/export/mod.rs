//! Export form model
//!
//! Everything the user decides before a raster is written: output file,
//! format, extent and resolution (through the reconciler), tiling,
//! creation options, no-data ranges and pyramids. [`ExportForm`] ties the
//! pieces together and turns them into an [`ExportPlan`] for the writer.

pub mod filename;
pub mod create_options;
mod nodata;
mod pyramids;
mod settings;
mod form;
mod plan;
#[cfg(test)]
mod tests;

pub use self::create_options::{compression_code, validate_option, CreateOptions};
pub use self::nodata::{NoDataRange, NoDataTable};
pub use self::pyramids::{PyramidOptions, PyramidsFlag, PyramidsFormat, ResamplingMethod};
pub use self::settings::{ExportMode, TileSettings, OUTPUT_FORMATS};
pub use self::form::ExportForm;
pub use self::plan::ExportPlan;
