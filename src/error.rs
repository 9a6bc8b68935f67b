//! Error types for city generation and export

use std::path::PathBuf;

/// Errors surfaced by the generation pipeline and the exporters.
#[derive(Debug)]
pub enum CityError {
    /// A configuration value is out of range; raised before any generation work.
    InvalidConfiguration {
        field: &'static str,
        reason: String,
    },
    /// A configuration file could not be read or parsed
    ConfigLoad {
        path: PathBuf,
        message: String,
    },
    /// Writing an output file failed
    ExportFailure {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl CityError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        CityError::InvalidConfiguration {
            field,
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for CityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CityError::InvalidConfiguration { field, reason } => {
                write!(f, "Invalid configuration: {} {}", field, reason)
            }
            CityError::ConfigLoad { path, message } => {
                write!(f, "Failed to load config {}: {}", path.display(), message)
            }
            CityError::ExportFailure { path, source } => {
                write!(f, "Failed to export {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for CityError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CityError::ExportFailure { source, .. } => Some(source),
            _ => None,
        }
    }
}
