//! Export job validation command

use clap::ArgMatches;
use log::{info, warn};

use crate::commands::command_traits::Command;
use crate::commands::{config_path, load_job};
use crate::coordinate::CoordinateTransformer;
use crate::errors::ExportResult;
use crate::utils::logger::Logger;

/// Command checking a job without printing its plan
///
/// Fails on the first invalid setting. A missing output directory is only
/// reported, since it may be created before the export runs.
pub struct ValidateCommand<'a> {
    config_file: String,
    args: ArgMatches,
    logger: &'a Logger,
}

impl<'a> ValidateCommand<'a> {
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> ExportResult<Self> {
        Ok(ValidateCommand {
            config_file: config_path(args)?,
            args: args.clone(),
            logger,
        })
    }
}

impl<'a> Command for ValidateCommand<'a> {
    fn execute(&self) -> ExportResult<()> {
        info!("Validating export job {}", self.config_file);
        let config = load_job(&self.args)?;
        let transformer = CoordinateTransformer::new();
        let form = config.build_form(&transformer)?;
        form.validate()?;

        if !form.can_accept() {
            warn!("Output directory for '{}' does not exist", form.output_file_name());
        }

        println!("{}: valid ({} x {} pixels)", self.config_file, form.n_columns(), form.n_rows());
        self.logger.log(&format!("Validated {}", self.config_file))?;
        Ok(())
    }
}
