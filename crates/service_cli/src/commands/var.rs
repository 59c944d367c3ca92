//! VaR command implementation
//!
//! Computes parametric and/or historical VaR for the filtered portfolio.

use risk_engine::portfolio::{filter_table, TradePredicate};
use risk_engine::var::{
    historical_var_report, parametric_var_report, Confidence, PortfolioValueBasis, ReturnSeries,
};
use serde_json::{json, Map, Value};
use tracing::{debug, info, warn};

use super::InputArgs;
use crate::config::CliConfig;
use crate::loader::{load_trades, parse_filters};
use crate::output::{emit, money, percent, Section};
use crate::Result;

/// VaR estimators to run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum VarMethod {
    /// Normal-distribution estimate
    Parametric,
    /// Empirical percentile of past returns
    Historical,
    #[default]
    Both,
}

impl VarMethod {
    fn parametric(self) -> bool {
        matches!(self, VarMethod::Parametric | VarMethod::Both)
    }

    fn historical(self) -> bool {
        matches!(self, VarMethod::Historical | VarMethod::Both)
    }
}

impl std::fmt::Display for VarMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VarMethod::Parametric => write!(f, "parametric"),
            VarMethod::Historical => write!(f, "historical"),
            VarMethod::Both => write!(f, "both"),
        }
    }
}

/// Run the var command
pub fn run(
    input: &InputArgs,
    confidence: Option<f64>,
    method: VarMethod,
    window: Option<usize>,
    basis: Option<&str>,
    config: &CliConfig,
) -> Result<()> {
    let confidence = Confidence::new(confidence.unwrap_or(config.confidence))?;
    let basis: PortfolioValueBasis = match basis {
        Some(name) => name.parse()?,
        None => config.value_basis,
    };
    let window = window.or(config.rolling_window);

    info!("Computing VaR...");
    info!("  Trades: {}", input.trades.display());
    info!("  Method: {}", method);
    info!("  Confidence: {}", confidence);
    info!("  Value basis: {}", basis);

    let format = input.output_format(config)?;
    let table = load_trades(&input.trades)?;
    let filter = parse_filters(&input.filters)?;
    let predicate = filter.as_ref().map(|f| f as &dyn TradePredicate);

    let filtered = match predicate {
        Some(p) => filter_table(&table, p)?,
        None => table.clone(),
    };
    let series = ReturnSeries::from_table(&filtered)?;
    debug!(points = series.len(), dated = series.is_dated(), "Built return series");
    if series.excluded_undated() > 0 {
        warn!(
            "{} undated trade(s) left out of the daily series",
            series.excluded_undated()
        );
    }

    let mut sections = Vec::new();
    let mut payload = Map::new();

    if method.parametric() {
        let report = parametric_var_report(&filtered, confidence, basis)?;
        sections.push(Section::key_values(
            "Parametric VaR",
            vec![
                ("Confidence", confidence.to_string()),
                ("Observations", report.observations.to_string()),
                ("Mean Return", percent(report.mean_return)),
                ("Std Return", percent(report.std_return)),
                ("Z Score", format!("{:.4}", report.z_score)),
                ("Portfolio Value", money(report.portfolio_value)),
                ("VaR", money(report.var)),
            ],
        ));
        payload.insert("parametric".to_string(), serde_json::to_value(&report)?);
    }

    if method.historical() {
        let report = historical_var_report(&table, confidence, basis, predicate, window)?;
        let mut pairs = vec![
            ("Confidence", confidence.to_string()),
            ("Observations", report.sorted_returns.len().to_string()),
            ("Percentile Return", percent(report.percentile_return)),
            ("Portfolio Value", money(report.portfolio_value)),
            ("VaR", money(report.var)),
        ];
        if let Some(w) = report.window {
            pairs.push(("Window", w.to_string()));
        }
        sections.push(Section::key_values("Historical VaR", pairs));

        if let Some(rolling) = &report.rolling {
            let mut section = Section::new("Rolling Historical VaR", &["Point", "VaR"]);
            for point in rolling {
                section.row(vec![
                    point.key.to_string(),
                    point.var.map(money).unwrap_or_else(|| "-".to_string()),
                ]);
            }
            sections.push(section);
        }
        payload.insert("historical".to_string(), serde_json::to_value(&report)?);
    }

    emit(format, &sections, &Value::Object(payload))?;

    info!("VaR complete");
    Ok(())
}
