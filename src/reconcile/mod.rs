//! Output extent, resolution and grid size reconciliation
//!
//! The output extent, the pixel resolution and the pixel grid size of an
//! export depend on each other. Whenever one of them (or the output CRS)
//! changes, the others are recomputed so the three stay consistent. Which
//! of resolution and size is held fixed is decided by [`SizeMode`]; whether
//! the resolution still matches the source's native one is tracked by
//! [`ResolutionState`].

mod resolution;
mod extent;
mod reconciler;
#[cfg(test)]
mod tests;

pub use self::resolution::{
    original_resolution, reproject_resolution, resolution_from_size, size_from_resolution,
    GridSize, Resolution, ResolutionState, SizeMode,
};
pub use self::extent::{ExtentSelector, ExtentState};
pub use self::reconciler::{FieldAccess, ReconcileSnapshot, ResolutionReconciler};
