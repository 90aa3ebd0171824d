//! Error types for plsa-cli

use plsa::error::{ErrorKind, PlsaError};
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

/// Result type alias for CLI operations
pub(crate) type Result<T> = std::result::Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug)]
pub(crate) enum CliError {
    /// File not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Not a file (e.g., directory)
    #[error("Not a file: {}", .0.display())]
    NotAFile(PathBuf),

    /// Dataset could not be loaded or is inconsistent
    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),

    /// Training parameters or config file rejected
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Get exit code for this error
    pub(crate) fn exit_code(&self) -> ExitCode {
        match self {
            Self::FileNotFound(_) | Self::NotAFile(_) => ExitCode::from(3),
            Self::InvalidDataset(_) => ExitCode::from(4),
            Self::InvalidConfig(_) => ExitCode::from(5),
            Self::Io(_) => ExitCode::from(7),
            Self::Json(_) => ExitCode::from(1),
        }
    }
}

impl From<PlsaError> for CliError {
    fn from(e: PlsaError) -> Self {
        match e {
            PlsaError::SourceNotFound(path) => Self::FileNotFound(path),
            PlsaError::Io(io) => Self::Io(io),
            other => match other.kind() {
                ErrorKind::Dataset => Self::InvalidDataset(other.to_string()),
                ErrorKind::InvalidParameters => Self::InvalidConfig(other.to_string()),
            },
        }
    }
}
