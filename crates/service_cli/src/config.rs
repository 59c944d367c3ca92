//! CLI configuration management
//!
//! Settings come from a TOML file, then `RISKDASH_*` environment
//! variables, then command line flags (highest priority).

use std::path::Path;
use std::str::FromStr;

use risk_engine::var::{Confidence, PortfolioValueBasis};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read or parsed
    #[error("Configuration file error: {0}")]
    FileError(String),

    /// Environment variable could not be interpreted
    #[error("Environment variable error: {0}")]
    EnvError(String),

    /// Unknown log level
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// Unknown output format
    #[error("Invalid output format: {0}. Must be one of: table, json, csv")]
    InvalidOutputFormat(String),

    /// One or more settings outside their domain
    #[error("Invalid configuration: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// Log levels accepted in the configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// How command results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(ConfigError::InvalidOutputFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// `riskdash` configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Default VaR confidence in percent
    pub confidence: f64,
    /// Portfolio value basis for VaR
    pub value_basis: PortfolioValueBasis,
    /// Default historical VaR lookback
    pub rolling_window: Option<usize>,
    /// Tracing level; `RUST_LOG` takes precedence
    pub log_level: String,
    /// Output format
    pub output_format: OutputFormat,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            confidence: 95.0,
            value_basis: PortfolioValueBasis::MtmSum,
            rolling_window: None,
            log_level: "info".to_string(),
            output_format: OutputFormat::Table,
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Load from `path` if it exists, otherwise use defaults
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Apply `RISKDASH_*` environment variables
    pub fn with_env_override(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any variable source
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("RISKDASH_CONFIDENCE") {
            self.confidence = value.trim().parse().map_err(|_| {
                ConfigError::EnvError(format!("RISKDASH_CONFIDENCE is not a number: '{}'", value))
            })?;
        }
        if let Some(value) = lookup("RISKDASH_VALUE_BASIS") {
            self.value_basis = value
                .parse()
                .map_err(|e| ConfigError::EnvError(format!("RISKDASH_VALUE_BASIS: {}", e)))?;
        }
        if let Some(value) = lookup("RISKDASH_ROLLING_WINDOW") {
            self.rolling_window = if value.trim().is_empty() {
                None
            } else {
                Some(value.trim().parse().map_err(|_| {
                    ConfigError::EnvError(format!(
                        "RISKDASH_ROLLING_WINDOW is not a whole number: '{}'",
                        value
                    ))
                })?)
            };
        }
        if let Some(value) = lookup("RISKDASH_LOG_LEVEL") {
            self.log_level = value;
        }
        if let Some(value) = lookup("RISKDASH_OUTPUT_FORMAT") {
            self.output_format = value.parse()?;
        }
        Ok(self)
    }

    /// Validate the configuration, reporting every problem at once
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut problems = Vec::new();
        if let Err(e) = Confidence::new(self.confidence) {
            problems.push(e.to_string());
        }
        if let Some(window) = self.rolling_window {
            if window < 2 {
                problems.push(format!("rolling_window must be at least 2, got {}", window));
            }
        }
        if let Err(e) = LogLevel::from_str(&self.log_level) {
            problems.push(e.to_string());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(problems))
        }
    }

    /// Tracing filter for the configured level
    pub fn log_filter(&self) -> &'static str {
        LogLevel::from_str(&self.log_level)
            .unwrap_or_default()
            .as_filter_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.confidence, 95.0);
        assert_eq!(config.value_basis, PortfolioValueBasis::MtmSum);
        assert_eq!(config.rolling_window, None);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.output_format, OutputFormat::Table);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = CliConfig::from_toml(
            r#"
            confidence = 99.0
            value_basis = "last_mtm"
            output_format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.confidence, 99.0);
        assert_eq!(config.value_basis, PortfolioValueBasis::LastMtm);
        assert_eq!(config.output_format, OutputFormat::Json);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_unknown_basis_is_file_error() {
        let err = CliConfig::from_toml("value_basis = \"book\"").unwrap_err();
        assert!(matches!(err, ConfigError::FileError(_)));
    }

    #[test]
    fn test_env_overrides() {
        let config = CliConfig::default()
            .with_overrides(lookup(&[
                ("RISKDASH_CONFIDENCE", "97.5"),
                ("RISKDASH_VALUE_BASIS", "notional"),
                ("RISKDASH_ROLLING_WINDOW", "20"),
                ("RISKDASH_OUTPUT_FORMAT", "CSV"),
            ]))
            .unwrap();
        assert_eq!(config.confidence, 97.5);
        assert_eq!(config.value_basis, PortfolioValueBasis::Notional);
        assert_eq!(config.rolling_window, Some(20));
        assert_eq!(config.output_format, OutputFormat::Csv);
    }

    #[test]
    fn test_bad_env_value() {
        let err = CliConfig::default()
            .with_overrides(lookup(&[("RISKDASH_CONFIDENCE", "high")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::EnvError(_)));
    }

    #[test]
    fn test_validation_collects_every_problem() {
        let config = CliConfig {
            confidence: 100.0,
            rolling_window: Some(1),
            log_level: "loud".to_string(),
            ..Default::default()
        };
        match config.validate().unwrap_err() {
            ConfigError::Validation(problems) => assert_eq!(problems.len(), 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert!(LogLevel::from_str("verbose").is_err());
        let config = CliConfig {
            log_level: "warn".to_string(),
            ..Default::default()
        };
        assert_eq!(config.log_filter(), "warn");
    }

    #[test]
    fn test_load_or_default_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = CliConfig::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, CliConfig::default());
    }
}
