//! MTM command implementation
//!
//! Prints per-trade MTM with its realised/unrealised split.

use risk_engine::portfolio::TradeRecord;
use risk_engine::reporting::top_by_mtm;
use risk_engine::valuation::{compute_pnl, PnlTotals};
use serde_json::json;
use tracing::{debug, info};

use super::InputArgs;
use crate::config::CliConfig;
use crate::loader::load_filtered;
use crate::output::{emit, money, Section};
use crate::Result;

/// Run the mtm command
pub fn run(input: &InputArgs, top: Option<usize>, config: &CliConfig) -> Result<()> {
    info!("Computing MTM...");
    info!("  Trades: {}", input.trades.display());

    let format = input.output_format(config)?;
    let table = load_filtered(&input.trades, &input.filters)?;
    let attributed = compute_pnl(&table)?;
    let totals = PnlTotals::from_table(&attributed);

    let records: Vec<TradeRecord> = match top {
        Some(n) => top_by_mtm(&attributed, n)?,
        None => attributed.records().to_vec(),
    };
    debug!(records = records.len(), "Valued trades");

    let mut section = Section::new(
        "Mark-to-Market",
        &[
            "Trade ID", "Trade Date", "Commodity", "Action", "Quantity", "Book Price",
            "Market Price", "MTM", "Realized", "Unrealized",
        ],
    );
    for record in &records {
        section.row(vec![
            record.trade_id().to_string(),
            record.trade_date().map(|d| d.to_string()).unwrap_or_default(),
            record.commodity().unwrap_or_default().to_string(),
            record.action().map(|a| a.to_string()).unwrap_or_default(),
            record.quantity().to_string(),
            money(record.book_price()),
            money(record.market_price()),
            money(record.mtm()),
            money(record.realized_pnl()),
            money(record.unrealized_pnl()),
        ]);
    }
    let totals_section = Section::key_values(
        "Totals",
        vec![
            ("MTM", money(totals.mtm)),
            ("Realized PnL", money(totals.realized)),
            ("Unrealized PnL", money(totals.unrealized)),
        ],
    );

    emit(
        format,
        &[section, totals_section],
        &json!({ "trades": records, "totals": totals }),
    )?;

    info!("MTM complete");
    Ok(())
}
