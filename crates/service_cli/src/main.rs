//! riskdash - Command Line Risk Dashboard for Trade Books
//!
//! This is the operational entry point for the trade risk engine.
//!
//! # Commands
//!
//! - `riskdash summary --trades <file>` - Portfolio headline figures
//! - `riskdash mtm --trades <file>` - Per-trade MTM and PnL split
//! - `riskdash var --trades <file>` - Parametric and historical VaR
//! - `riskdash stress --trades <file>` - Price shock scenarios
//! - `riskdash report --trades <file>` - Grouped, trend and distribution views
//! - `riskdash check` - Validate the configuration
//!
//! # Architecture
//!
//! This crate is the service edge: it owns file loading, configuration and
//! logging, and calls the pure `risk_engine` functions.

use std::path::Path;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod loader;
mod output;

pub use error::{CliError, Result};

use commands::var::VarMethod;
use commands::InputArgs;
use config::CliConfig;

/// Trade risk dashboard CLI
#[derive(Parser)]
#[command(name = "riskdash")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "riskdash.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Portfolio summary and PnL totals
    Summary {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Per-trade MTM with realised/unrealised split
    Mtm {
        #[command(flatten)]
        input: InputArgs,

        /// Show only the N trades with the largest MTM
        #[arg(long)]
        top: Option<usize>,
    },

    /// Value-at-Risk
    Var {
        #[command(flatten)]
        input: InputArgs,

        /// Confidence level in percent (e.g. 95, 99)
        #[arg(long)]
        confidence: Option<f64>,

        /// Estimator to run
        #[arg(short, long, value_enum, default_value_t = VarMethod::Both)]
        method: VarMethod,

        /// Historical VaR lookback window in observations
        #[arg(short, long)]
        window: Option<usize>,

        /// Portfolio value basis (mtm_sum, last_mtm, notional)
        #[arg(short, long)]
        basis: Option<String>,
    },

    /// Apply price shocks and preset stress scenarios
    Stress {
        #[command(flatten)]
        input: InputArgs,

        /// Market price shock in percent (repeatable)
        #[arg(short, long = "shock", allow_hyphen_values = true)]
        shocks: Vec<f64>,

        /// Include the preset scenarios
        #[arg(short, long)]
        presets: bool,
    },

    /// Grouped breakdowns, daily MTM trend and MTM distribution
    Report {
        #[command(flatten)]
        input: InputArgs,

        /// Categorical column to group by (e.g. commodity, counterparty)
        #[arg(short, long)]
        group_by: Option<String>,

        /// Sort groups by MTM, largest first
        #[arg(short, long)]
        drilldown: bool,

        /// Daily MTM trend
        #[arg(long)]
        trend: bool,

        /// MTM distribution percentiles
        #[arg(long)]
        distribution: bool,
    },

    /// Check the configuration
    Check,
}

fn init_tracing(level: &str) {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = CliConfig::load_or_default(Path::new(&cli.config))?.with_env_override()?;
    init_tracing(if cli.verbose {
        "debug"
    } else {
        config.log_filter()
    });

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    if let Commands::Check = cli.command {
        return commands::check::run(&cli.config);
    }
    config.validate()?;

    match cli.command {
        Commands::Summary { input } => commands::summary::run(&input, &config),
        Commands::Mtm { input, top } => commands::mtm::run(&input, top, &config),
        Commands::Var {
            input,
            confidence,
            method,
            window,
            basis,
        } => commands::var::run(&input, confidence, method, window, basis.as_deref(), &config),
        Commands::Stress {
            input,
            shocks,
            presets,
        } => commands::stress::run(&input, &shocks, presets, &config),
        Commands::Report {
            input,
            group_by,
            drilldown,
            trend,
            distribution,
        } => commands::report::run(
            &input,
            group_by.as_deref(),
            drilldown,
            trend,
            distribution,
            &config,
        ),
        Commands::Check => commands::check::run(&cli.config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_var_arguments() {
        let cli = Cli::try_parse_from([
            "riskdash", "var", "--trades", "t.csv", "--confidence", "99", "-m", "historical",
            "-w", "20", "-f", "commodity=Gold", "-f", "quantity>=10",
        ])
        .unwrap();
        match cli.command {
            Commands::Var {
                input,
                confidence,
                method,
                window,
                ..
            } => {
                assert_eq!(input.filters.len(), 2);
                assert_eq!(confidence, Some(99.0));
                assert_eq!(method, VarMethod::Historical);
                assert_eq!(window, Some(20));
            }
            _ => panic!("expected var"),
        }
    }

    #[test]
    fn test_unknown_var_method_rejected_at_parse() {
        let err = Cli::try_parse_from(["riskdash", "var", "-t", "t.csv", "-m", "monte-carlo"])
            .err()
            .unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);

        let cli = Cli::try_parse_from(["riskdash", "var", "-t", "t.csv"]).unwrap();
        assert!(matches!(cli.command, Commands::Var { method: VarMethod::Both, .. }));
    }

    #[test]
    fn test_parse_negative_shocks() {
        let cli = Cli::try_parse_from([
            "riskdash", "stress", "-t", "t.csv", "--shock", "-10", "--shock", "5", "--presets",
        ])
        .unwrap();
        match cli.command {
            Commands::Stress {
                shocks, presets, ..
            } => {
                assert_eq!(shocks, vec![-10.0, 5.0]);
                assert!(presets);
            }
            _ => panic!("expected stress"),
        }
    }
}
