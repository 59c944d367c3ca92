//! Report command implementation
//!
//! Grouped breakdowns, daily MTM trend and MTM distribution.

use risk_engine::portfolio::Column;
use risk_engine::reporting::{daily_mtm_trend, drilldown, group_summary, mtm_quantiles};
use serde_json::{Map, Value};
use tracing::info;

use super::InputArgs;
use crate::config::CliConfig;
use crate::loader::load_filtered;
use crate::output::{emit, money, Section};
use crate::{CliError, Result};

const DISTRIBUTION_PERCENTILES: [f64; 7] = [0.0, 5.0, 25.0, 50.0, 75.0, 95.0, 100.0];

/// Run the report command
pub fn run(
    input: &InputArgs,
    group_by: Option<&str>,
    drill: bool,
    trend: bool,
    distribution: bool,
    config: &CliConfig,
) -> Result<()> {
    if group_by.is_none() && !trend && !distribution {
        return Err(CliError::InvalidArgument(
            "Nothing to report. Pass --group-by, --trend or --distribution".to_string(),
        ));
    }
    if drill && group_by.is_none() {
        return Err(CliError::InvalidArgument(
            "--drilldown requires --group-by".to_string(),
        ));
    }

    info!("Generating report...");
    info!("  Trades: {}", input.trades.display());

    let format = input.output_format(config)?;
    let table = load_filtered(&input.trades, &input.filters)?;

    let mut sections = Vec::new();
    let mut payload = Map::new();

    if let Some(name) = group_by {
        let column: Column = name.parse()?;
        info!("  Group by: {}", column);
        let rows = if drill {
            drilldown(&table, column)?
        } else {
            group_summary(&table, column)?
        };
        let mut section = Section::new(
            format!("By {}", column),
            &[column.label(), "Trades", "MTM", "Realized", "Unrealized"],
        );
        for row in &rows {
            section.row(vec![
                row.key.clone(),
                row.trades.to_string(),
                money(row.mtm),
                money(row.realized_pnl),
                money(row.unrealized_pnl),
            ]);
        }
        sections.push(section);
        payload.insert("groups".to_string(), serde_json::to_value(&rows)?);
    }

    if trend {
        let points = daily_mtm_trend(&table)?;
        let mut section = Section::new("Daily MTM", &["Date", "Trades", "MTM"]);
        for point in &points {
            section.row(vec![
                point.date.to_string(),
                point.trades.to_string(),
                money(point.mtm),
            ]);
        }
        sections.push(section);
        payload.insert("trend".to_string(), serde_json::to_value(&points)?);
    }

    if distribution {
        let quantiles = mtm_quantiles(&table, &DISTRIBUTION_PERCENTILES)?;
        let mut section = Section::new("MTM Distribution", &["Percentile", "MTM"]);
        for (p, value) in &quantiles {
            section.row(vec![format!("{}", p), money(*value)]);
        }
        sections.push(section);
        payload.insert("distribution".to_string(), serde_json::to_value(&quantiles)?);
    }

    emit(format, &sections, &Value::Object(payload))?;

    info!("Report complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> InputArgs {
        InputArgs {
            trades: "unused.csv".into(),
            filters: Vec::new(),
            format: None,
        }
    }

    #[test]
    fn test_nothing_selected() {
        let err = run(&input(), None, false, false, false, &CliConfig::default()).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
    }

    #[test]
    fn test_drilldown_needs_group() {
        let err = run(&input(), None, true, true, false, &CliConfig::default()).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
    }
}
