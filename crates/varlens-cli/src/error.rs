//! CLI error types.

use std::path::PathBuf;

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Portfolio could not be built from the arguments or config.
    #[error("Invalid portfolio: {0}")]
    InvalidPortfolio(String),

    /// Configuration file problem.
    #[error("Configuration error in {path}: {message}")]
    Config {
        /// File being read
        path: PathBuf,
        /// What went wrong
        message: String,
    },

    /// Refused to overwrite an existing file.
    #[error("{0} already exists. Use --force to overwrite.")]
    AlreadyExists(PathBuf),

    /// No usable config directory on this platform.
    #[error("Could not determine config directory")]
    NoConfigDir,

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
