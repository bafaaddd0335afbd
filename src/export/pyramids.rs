//! Overview (pyramid) options

use std::fmt;

use super::create_options::CreateOptions;
use crate::errors::{ExportError, ExportResult};
use crate::source::RasterSource;

/// Whether overviews are built for the written file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PyramidsFlag {
    No,
    Yes,
}

/// Where overviews are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PyramidsFormat {
    /// Inside the GeoTIFF itself
    Internal,
    /// In a GeoTIFF ".ovr" side-car file
    External,
    /// In an ERDAS ".aux" side-car file
    ExternalErdas,
}

impl PyramidsFormat {
    pub fn from_name(name: &str) -> ExportResult<Self> {
        match name.trim().to_lowercase().as_str() {
            "internal" => Ok(PyramidsFormat::Internal),
            "external" | "ovr" => Ok(PyramidsFormat::External),
            "erdas" | "external_erdas" | "aux" => Ok(PyramidsFormat::ExternalErdas),
            other => Err(ExportError::InvalidInput(format!("Unknown pyramids format: {}", other))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PyramidsFormat::Internal => "internal",
            PyramidsFormat::External => "external",
            PyramidsFormat::ExternalErdas => "external_erdas",
        }
    }
}

/// Resampling used to compute overview pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResamplingMethod {
    Nearest,
    Average,
    Gauss,
    Cubic,
    CubicSpline,
    Lanczos,
    Mode,
    None,
}

impl ResamplingMethod {
    pub fn from_name(name: &str) -> ExportResult<Self> {
        match name.trim().to_uppercase().as_str() {
            "NEAREST" => Ok(ResamplingMethod::Nearest),
            "AVERAGE" => Ok(ResamplingMethod::Average),
            "GAUSS" => Ok(ResamplingMethod::Gauss),
            "CUBIC" => Ok(ResamplingMethod::Cubic),
            "CUBICSPLINE" => Ok(ResamplingMethod::CubicSpline),
            "LANCZOS" => Ok(ResamplingMethod::Lanczos),
            "MODE" => Ok(ResamplingMethod::Mode),
            "NONE" => Ok(ResamplingMethod::None),
            other => Err(ExportError::InvalidInput(format!("Unknown resampling method: {}", other))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ResamplingMethod::Nearest => "NEAREST",
            ResamplingMethod::Average => "AVERAGE",
            ResamplingMethod::Gauss => "GAUSS",
            ResamplingMethod::Cubic => "CUBIC",
            ResamplingMethod::CubicSpline => "CUBICSPLINE",
            ResamplingMethod::Lanczos => "LANCZOS",
            ResamplingMethod::Mode => "MODE",
            ResamplingMethod::None => "NONE",
        }
    }
}

impl fmt::Display for ResamplingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Pyramids group of the export form
#[derive(Debug, Clone, PartialEq)]
pub struct PyramidOptions {
    enabled: bool,
    levels: Vec<u32>,
    resampling: ResamplingMethod,
    format: PyramidsFormat,
    create_options: CreateOptions,
}

impl Default for PyramidOptions {
    fn default() -> Self {
        PyramidOptions {
            enabled: false,
            levels: Vec::new(),
            resampling: ResamplingMethod::Nearest,
            format: PyramidsFormat::Internal,
            create_options: CreateOptions::default(),
        }
    }
}

impl PyramidOptions {
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Decimation levels, e.g. [2, 4, 8]
    pub fn set_levels(&mut self, levels: Vec<u32>) {
        self.levels = levels;
    }

    pub fn levels(&self) -> &[u32] {
        &self.levels
    }

    pub fn resampling(&self) -> ResamplingMethod {
        self.resampling
    }

    pub fn set_resampling(&mut self, resampling: ResamplingMethod) {
        self.resampling = resampling;
    }

    pub fn format(&self) -> PyramidsFormat {
        self.format
    }

    pub fn set_format(&mut self, format: PyramidsFormat) {
        self.format = format;
    }

    pub fn create_options(&self) -> &CreateOptions {
        &self.create_options
    }

    pub fn create_options_mut(&mut self) -> &mut CreateOptions {
        &mut self.create_options
    }

    /// Levels to build; empty while the group is disabled
    pub fn pyramids_list(&self) -> Vec<u32> {
        if self.enabled {
            self.levels.clone()
        } else {
            Vec::new()
        }
    }

    pub fn build_flag(&self) -> PyramidsFlag {
        if self.enabled {
            PyramidsFlag::Yes
        } else {
            PyramidsFlag::No
        }
    }

    /// Overview sizes for display, e.g. "500x250 250x125"
    pub fn resolutions_text(&self, source: &dyn RasterSource) -> String {
        if !self.enabled || self.levels.is_empty() {
            return String::new();
        }
        source.build_pyramid_list(&self.levels)
            .iter()
            .map(|p| format!("{}x{}", p.x_dim, p.y_dim))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Check levels and overview creation options
    pub fn validate(&self) -> ExportResult<()> {
        if let Some(level) = self.levels.iter().find(|level| **level < 2) {
            return Err(ExportError::InvalidInput(format!("Overview level {} must be at least 2", level)));
        }
        if self.create_options.is_enabled() {
            self.create_options.validate()?;
        }
        Ok(())
    }
}
