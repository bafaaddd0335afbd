//! Export planning command
//!
//! Loads an export job, reconciles extent, resolution and size, and prints
//! the resulting plan.

use clap::ArgMatches;
use log::{debug, info, warn};

use crate::commands::command_traits::Command;
use crate::commands::{config_path, load_job};
use crate::coordinate::CoordinateTransformer;
use crate::errors::{ExportError, ExportResult};
use crate::export::ExportPlan;
use crate::utils::logger::Logger;

/// How the plan is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanFormat {
    Text,
    Toml,
}

impl PlanFormat {
    pub fn from_name(name: &str) -> ExportResult<Self> {
        match name.trim().to_lowercase().as_str() {
            "text" | "txt" => Ok(PlanFormat::Text),
            "toml" => Ok(PlanFormat::Toml),
            other => Err(ExportError::InvalidInput(format!("Unknown plan format: {}", other))),
        }
    }
}

/// Command printing the export plan of a job
pub struct PlanCommand<'a> {
    /// Path to the job file
    config_file: String,
    format: PlanFormat,
    args: ArgMatches,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> PlanCommand<'a> {
    /// Create a new plan command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Logger for recording operations
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> ExportResult<Self> {
        let config_file = config_path(args)?;
        let format = match args.get_one::<String>("format") {
            Some(name) => PlanFormat::from_name(name)?,
            None => PlanFormat::Text,
        };

        Ok(PlanCommand {
            config_file,
            format,
            args: args.clone(),
            logger,
        })
    }

    /// Reconcile the job and build its plan
    pub fn build_plan(&self) -> ExportResult<ExportPlan> {
        let config = load_job(&self.args)?;
        let transformer = CoordinateTransformer::new();
        let form = config.build_form(&transformer)?;
        form.validate()?;

        if form.output_file_name().is_empty() {
            warn!("No output file set in {}", self.config_file);
        } else if !form.can_accept() {
            return Err(ExportError::InvalidInput(format!(
                "Output directory for '{}' does not exist", form.output_file_name())));
        }

        form.plan()
    }
}

impl<'a> Command for PlanCommand<'a> {
    fn execute(&self) -> ExportResult<()> {
        info!("Planning export from {}", self.config_file);
        let plan = self.build_plan()?;

        let text = match self.format {
            PlanFormat::Text => plan.summary(),
            PlanFormat::Toml => plan.to_toml(),
        };
        println!("{}", text);

        let lines: Vec<String> = plan.summary().lines().skip(1).map(str::to_string).collect();
        self.logger.log_section(&format!("Export plan for {}", self.config_file), &lines)?;
        debug!("Plan written for {} x {} pixels", plan.grid.columns, plan.grid.rows);
        Ok(())
    }
}
