//! Subcommand implementations.

pub(crate) mod inspect;
pub(crate) mod train;

use crate::error::{CliError, Result};
use std::path::Path;

/// Fail early with a CLI-specific error for paths that cannot be datasets.
pub(crate) fn validate_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(CliError::NotAFile(path.to_path_buf()));
    }
    Ok(())
}
