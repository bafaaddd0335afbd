pub mod errors;
pub mod utils;
pub mod coordinate;
pub mod source;
pub mod reconcile;
pub mod export;
pub mod config;
pub mod commands;
pub mod api;

pub use crate::api::RasterSave;

pub use errors::{ExportError, ExportResult};
pub use coordinate::{BoundingBox, Point, CoordinateTransform, CoordinateTransformer, CoordinateSystem};
pub use source::{RasterSource, SourceInfo};
pub use reconcile::{ResolutionReconciler, SizeMode, ResolutionState};
pub use export::{ExportForm, ExportPlan};
pub use config::{ExportConfig, ExportRequest};
