use std::path::Path;
use log::info;

use crate::config::ExportConfig;
use crate::coordinate::CoordinateTransformer;
use crate::errors::ExportResult;
use crate::export::ExportPlan;
use crate::utils::logger::Logger;

/// Main interface to the rastersave library
pub struct RasterSave {
    logger: Logger,
    transformer: CoordinateTransformer,
}

impl RasterSave {
    /// Create a new RasterSave instance
    ///
    /// # Arguments
    /// * `log_file` - Optional path to log file, defaults to "rastersave.log"
    ///
    /// # Returns
    /// A RasterSave instance or an error if the log file cannot be created
    pub fn new(log_file: Option<&str>) -> ExportResult<Self> {
        let log_path = log_file.unwrap_or("rastersave.log");
        let logger = Logger::new(log_path)?;
        Ok(RasterSave { logger, transformer: CoordinateTransformer::new() })
    }

    /// Reconcile an export job and return its plan
    ///
    /// # Arguments
    /// * `config` - Parsed export job
    pub fn plan(&self, config: &ExportConfig) -> ExportResult<ExportPlan> {
        let form = config.build_form(&self.transformer)?;
        form.validate()?;
        let plan = form.plan()?;

        let lines: Vec<String> = plan.summary().lines().skip(1).map(str::to_string).collect();
        self.logger.log_section("Export plan", &lines)?;
        info!("Planned {} x {} pixels in {}", plan.grid.columns, plan.grid.rows, plan.crs.auth_id());
        Ok(plan)
    }

    /// Plan an export job given as TOML text
    pub fn plan_from_str(&self, content: &str) -> ExportResult<ExportPlan> {
        let config = ExportConfig::from_str(content)?;
        self.plan(&config)
    }

    /// Plan an export job stored in a TOML file
    pub fn plan_from_file<P: AsRef<Path>>(&self, path: P) -> ExportResult<ExportPlan> {
        let config = ExportConfig::load(path)?;
        self.plan(&config)
    }

    /// Check an export job file without planning it
    pub fn validate_file<P: AsRef<Path>>(&self, path: P) -> ExportResult<()> {
        let path = path.as_ref();
        let config = ExportConfig::load(path)?;
        config.build_form(&self.transformer)?.validate()?;
        self.logger.log(&format!("Validated {}", path.display()))?;
        Ok(())
    }
}
