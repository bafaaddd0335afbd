//! CLI command implementations
//!
//! Commands load an export job, apply command-line overrides and either
//! print the resulting plan or only validate it.

pub mod command_traits;
pub mod plan_command;
pub mod validate_command;

pub use command_traits::{Command, CommandFactory};
pub use plan_command::{PlanCommand, PlanFormat};
pub use validate_command::ValidateCommand;

use clap::ArgMatches;

use crate::config::{extent_mode_from_name, ExportConfig, ExportRequest};
use crate::coordinate::{BoundingBox, CoordinateSystemFactory};
use crate::errors::{ExportError, ExportResult};
use crate::reconcile::ExtentState;
use crate::utils::logger::Logger;
use crate::utils::parse_utils::{parse_f64_pair, parse_u32_pair};

/// Factory for creating command instances based on CLI arguments
pub struct RastersaveCommandFactory;

impl RastersaveCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        RastersaveCommandFactory
    }
}

impl Default for RastersaveCommandFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CommandFactory<'a> for RastersaveCommandFactory {
    fn create_command(&self, args: &ArgMatches, logger: &'a Logger) -> ExportResult<Box<dyn Command + 'a>> {
        if args.get_flag("validate") {
            Ok(Box::new(ValidateCommand::new(args, logger)?))
        } else {
            Ok(Box::new(PlanCommand::new(args, logger)?))
        }
    }
}

/// Path of the job file given on the command line
pub(crate) fn config_path(args: &ArgMatches) -> ExportResult<String> {
    args.get_one::<String>("config")
        .cloned()
        .ok_or_else(|| ExportError::GenericError("Missing configuration file".to_string()))
}

/// Export settings given as command-line flags
///
/// `--extent` is a rectangle in the output CRS and implies the user
/// extent mode unless `--extent-mode` says otherwise.
pub fn request_from_args(args: &ArgMatches) -> ExportResult<ExportRequest> {
    let mut request = ExportRequest::default();

    if let Some(crs) = args.get_one::<String>("crs") {
        request.crs = Some(CoordinateSystemFactory::from_string(crs)?);
    }
    if let Some(extent) = args.get_one::<String>("extent") {
        request.user_extent = Some(BoundingBox::from_string(extent)?);
    }
    if let Some(mode) = args.get_one::<String>("extent-mode") {
        request.extent_mode = Some(extent_mode_from_name(mode)?);
    }
    if let Some(resolution) = args.get_one::<String>("resolution") {
        request.resolution = Some(parse_f64_pair(resolution, "resolution")?);
    }
    if let Some(size) = args.get_one::<String>("size") {
        request.size = Some(parse_u32_pair(size, "size")?);
    }
    if let Some(output) = args.get_one::<String>("output") {
        request.output = Some(output.clone());
    }

    Ok(request)
}

/// Load the job file and merge the command-line overrides into it
pub(crate) fn load_job(args: &ArgMatches) -> ExportResult<ExportConfig> {
    let mut config = ExportConfig::load(config_path(args)?)?;
    let mut overrides = request_from_args(args)?;

    if overrides.user_extent.is_some() {
        let crs = overrides.crs.or(config.export.crs).unwrap_or(config.source.crs);
        overrides.user_extent_crs = Some(crs);
        if overrides.extent_mode.is_none() {
            overrides.extent_mode = Some(ExtentState::User);
        }
    }

    // Resolution and size exclude each other; the command line wins
    if overrides.size.is_some() {
        config.export.resolution = None;
        config.export.size_mode = None;
    } else if overrides.resolution.is_some() {
        config.export.size = None;
        config.export.size_mode = None;
    }

    config.export.override_with(overrides);
    Ok(config)
}
