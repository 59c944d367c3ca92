//! CLI error types.

use risk_core::types::RiskError;
use thiserror::Error;

use crate::config::ConfigError;

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors surfaced to the user by `riskdash`.
#[derive(Debug, Error)]
pub enum CliError {
    /// Input file does not exist.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Input file type the loader cannot read.
    #[error("Unsupported input file '{0}': export the sheet to CSV and pass the .csv file")]
    UnsupportedInput(String),

    /// Command line argument outside its domain.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Engine validation or calculation failure.
    #[error(transparent)]
    Risk(#[from] RiskError),

    /// Configuration could not be loaded or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Malformed CSV input or output failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialisation failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem or stdout failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
