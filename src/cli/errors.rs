//! CLI error types

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::gateway::TemplateError;

/// Result type for CLI commands
pub type CliResult<T> = Result<T, CliError>;

/// Errors surfaced to the operator
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration problem
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Template file problem
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// File I/O problem
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    /// Refusing to overwrite an existing config
    #[error("config already exists at {path:?}")]
    AlreadyInitialized {
        /// The occupied path
        path: PathBuf,
    },
}
