//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

use std::path::PathBuf;

use clap::Args;

use crate::config::{CliConfig, OutputFormat};
use crate::Result;

pub mod check;
pub mod mtm;
pub mod report;
pub mod stress;
pub mod summary;
pub mod var;

/// Trade file, filters and output format shared by the data commands
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Path to trade file (CSV)
    #[arg(short, long)]
    pub trades: PathBuf,

    /// Row filter: column=value, column=a|b, column>=x or column<=x (repeatable)
    #[arg(short, long = "filter")]
    pub filters: Vec<String>,

    /// Output format (table, json, csv); defaults to the configured format
    #[arg(short = 'o', long)]
    pub format: Option<String>,
}

impl InputArgs {
    /// Output format from the flag, else from the configuration.
    pub fn output_format(&self, config: &CliConfig) -> Result<OutputFormat> {
        match &self.format {
            Some(format) => Ok(format.parse()?),
            None => Ok(config.output_format),
        }
    }
}
