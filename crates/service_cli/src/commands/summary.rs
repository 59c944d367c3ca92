//! Summary command implementation
//!
//! Prints the portfolio headline figures.

use risk_engine::reporting::PortfolioSummary;
use serde_json::json;
use tracing::info;

use super::InputArgs;
use crate::config::CliConfig;
use crate::loader::load_filtered;
use crate::output::{emit, money, Section};
use crate::Result;

/// Run the summary command
pub fn run(input: &InputArgs, config: &CliConfig) -> Result<()> {
    info!("Summarising portfolio...");
    info!("  Trades: {}", input.trades.display());

    let format = input.output_format(config)?;
    let table = load_filtered(&input.trades, &input.filters)?;
    let summary = PortfolioSummary::from_table(&table)?;

    let section = Section::key_values(
        "Portfolio Summary",
        vec![
            ("Trades", summary.trade_count.to_string()),
            ("Total MTM", money(summary.total_mtm)),
            ("Average MTM", money(summary.average_mtm)),
            ("Realized PnL", money(summary.total_realized_pnl)),
            ("Unrealized PnL", money(summary.total_unrealized_pnl)),
            ("Notional", money(summary.total_notional)),
            ("Instrument Types", summary.instrument_types.to_string()),
            ("Commodities", summary.commodities.to_string()),
        ],
    );
    emit(
        format,
        &[section],
        &json!({
            "summary": summary,
            "coerced_cells": table.coercion_notes().len(),
        }),
    )?;

    info!("Summary complete");
    Ok(())
}
