//! Trade file loading and command line filters.

use std::path::Path;

use risk_engine::portfolio::{build_trade_table, filter_table, RawTable, TradeFilter, TradeTable};
use tracing::{debug, warn};

use crate::{CliError, Result};

const SPREADSHEET_EXTENSIONS: [&str; 4] = ["xlsx", "xls", "xlsm", "ods"];

/// Reads a CSV trade file into a validated table.
///
/// Every coerced cell is logged as a warning.
pub fn load_trades(path: &Path) -> Result<TradeTable> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    if SPREADSHEET_EXTENSIONS.contains(&extension.as_str()) {
        return Err(CliError::UnsupportedInput(path.display().to_string()));
    }

    let raw = read_csv(path)?;
    debug!(rows = raw.len(), columns = raw.columns().len(), "Read trade file");

    let table = build_trade_table(&raw)?;
    for note in table.coercion_notes() {
        warn!("{}", note);
    }
    Ok(table)
}

fn read_csv(path: &Path) -> Result<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(record?.iter().map(str::to_string).collect());
    }
    Ok(RawTable::from_rows(columns, rows))
}

/// Parses `--filter` expressions into a single conjunctive filter.
pub fn parse_filters(expressions: &[String]) -> Result<Option<TradeFilter>> {
    let filters = expressions
        .iter()
        .map(|e| e.parse::<TradeFilter>())
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(match filters.len() {
        0 => None,
        1 => filters.into_iter().next(),
        _ => Some(TradeFilter::all(filters)),
    })
}

/// Loads a trade file and applies the filters.
pub fn load_filtered(path: &Path, expressions: &[String]) -> Result<TradeTable> {
    let table = load_trades(path)?;
    match parse_filters(expressions)? {
        Some(filter) => {
            let filtered = filter_table(&table, &filter)?;
            debug!(before = table.len(), after = filtered.len(), "Applied filters");
            Ok(filtered)
        }
        None => Ok(table),
    }
}
