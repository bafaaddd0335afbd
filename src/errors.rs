//! Custom error types for export planning

use std::fmt;
use std::io;

/// Export-specific error types
#[derive(Debug)]
pub enum ExportError {
    /// I/O error
    IoError(io::Error),
    /// Malformed or incomplete configuration
    ConfigError(String),
    /// The coordinate transform is undefined for the given input
    TransformError {
        /// Source CRS description
        from: String,
        /// Target CRS description
        to: String,
        /// What went wrong
        message: String,
    },
    /// No transformation is known between the two systems
    UnsupportedTransform {
        /// Source CRS description
        from: String,
        /// Target CRS description
        to: String,
    },
    /// A creation option is malformed or has an illegal value
    InvalidCreateOption(String),
    /// A user-supplied value could not be interpreted
    InvalidInput(String),
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::IoError(e) => write!(f, "I/O error: {}", e),
            ExportError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            ExportError::TransformError { from, to, message } => {
                write!(f, "Transform from {} to {} failed: {}", from, to, message)
            },
            ExportError::UnsupportedTransform { from, to } => {
                write!(f, "Unsupported coordinate transformation from {} to {}", from, to)
            },
            ExportError::InvalidCreateOption(msg) => write!(f, "Invalid creation option: {}", msg),
            ExportError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            ExportError::GenericError(msg) => write!(f, "Export error: {}", msg),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ExportError {
    fn from(error: io::Error) -> Self {
        ExportError::IoError(error)
    }
}

impl From<String> for ExportError {
    fn from(msg: String) -> Self {
        ExportError::GenericError(msg)
    }
}

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;
