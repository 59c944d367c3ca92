//! Check command implementation
//!
//! Loads and validates the configuration.

use std::path::Path;

use tracing::info;

use crate::config::CliConfig;
use crate::output::{emit, Section};
use crate::Result;

/// Run the check command
pub fn run(config_path: &str) -> Result<()> {
    let path = Path::new(config_path);
    if path.exists() {
        info!("Checking configuration file {}", path.display());
    } else {
        info!("No configuration file at {}, using defaults", path.display());
    }

    let config = CliConfig::load_or_default(path)?.with_env_override()?;
    config.validate()?;

    let section = Section::key_values(
        "Configuration",
        vec![
            ("confidence", config.confidence.to_string()),
            ("value_basis", config.value_basis.to_string()),
            (
                "rolling_window",
                config
                    .rolling_window
                    .map(|w| w.to_string())
                    .unwrap_or_else(|| "none".to_string()),
            ),
            ("log_level", config.log_level.clone()),
            ("output_format", config.output_format.to_string()),
        ],
    );
    emit(config.output_format, &[section], &config)?;

    info!("Configuration OK");
    Ok(())
}
