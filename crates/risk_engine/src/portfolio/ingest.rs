//! Trade table ingestion and validation.
//!
//! Converts an externally parsed table (header names plus rows of
//! header→cell mappings) into a schema-checked [`TradeTable`]. No file I/O
//! happens here.
//!
//! Numeric cells are interpreted leniently: unreadable values become 0 and
//! the substitution is recorded as a [`CoercionNote`] on the table so the
//! caller can surface it.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use risk_core::types::{Date, RiskError, RiskResult, TradeAction, TradeStatus};

use super::column::{Capabilities, Column, ColumnKind};
use super::ids::TradeId;
use super::record::TradeRecord;
use super::table::TradeTable;

/// A single cell of a raw input table.
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    /// Blank cell
    Empty,
    /// Text as read from the source
    Text(String),
    /// Value already typed as a number by the source
    Number(f64),
}

impl Cell {
    /// Trimmed text content, or `None` for a blank cell.
    pub fn text(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            Cell::Number(x) => Some(x.to_string()),
        }
    }

    /// Returns true for a blank cell or whitespace-only text.
    pub fn is_blank(&self) -> bool {
        self.text().is_none()
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        if s.trim().is_empty() {
            Cell::Empty
        } else {
            Cell::Text(s.to_string())
        }
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::from(s.as_str())
    }
}

impl From<f64> for Cell {
    fn from(x: f64) -> Self {
        Cell::Number(x)
    }
}

/// One row of a raw table, keyed by header name.
pub type RawRow = HashMap<String, Cell>;

/// Externally parsed tabular input: column names plus rows.
///
/// # Examples
///
/// ```
/// use risk_engine::portfolio::RawTable;
///
/// let raw = RawTable::from_rows(
///     vec!["Quantity".into(), "Book Price".into(), "Market Price".into()],
///     vec![vec!["100".into(), "50".into(), "55".into()]],
/// );
/// assert_eq!(raw.len(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawTable {
    columns: Vec<String>,
    rows: Vec<RawRow>,
}

impl RawTable {
    /// Creates an empty table with the given column names.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Creates a table from positional rows aligned with `columns`.
    ///
    /// Short rows leave their trailing cells missing; extra cells are dropped.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let mut table = Self::new(columns);
        for values in rows {
            let row = table
                .columns
                .iter()
                .zip(values)
                .map(|(header, value)| (header.clone(), Cell::from(value)))
                .collect();
            table.rows.push(row);
        }
        table
    }

    /// Appends a row.
    pub fn push_row(&mut self, row: RawRow) {
        self.rows.push(row);
    }

    /// Column names in source order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in source order.
    pub fn rows(&self) -> &[RawRow] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true when there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A cell that was replaced during ingestion.
///
/// Numeric cells are replaced by 0; other cells are treated as absent.
/// An empty `raw` value means the cell was missing from its row.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoercionNote {
    /// 1-based source row number
    pub row: usize,
    /// Column the cell belongs to
    pub column: Column,
    /// Raw cell text
    pub raw: String,
}

impl fmt::Display for CoercionNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fallback = match self.column.kind() {
            ColumnKind::Numeric => "0",
            _ => "absent",
        };
        if self.raw.is_empty() {
            write!(
                f,
                "row {}: missing {} cell treated as {}",
                self.row,
                self.column.label(),
                fallback
            )
        } else {
            write!(
                f,
                "row {}: unreadable {} value '{}' treated as {}",
                self.row,
                self.column.label(),
                self.raw,
                fallback
            )
        }
    }
}

/// Parses a numeric cell, tolerating thousands separators.
fn parse_number(text: &str) -> Option<f64> {
    let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
    cleaned.parse::<f64>().ok().filter(|x| x.is_finite())
}

/// Reads cells of one row through the table's header mapping.
struct RowReader<'a> {
    row: &'a RawRow,
    headers: &'a BTreeMap<Column, String>,
    row_number: usize,
    notes: &'a mut Vec<CoercionNote>,
}

/// Stand-in for a cell absent from its row.
static EMPTY_CELL: Cell = Cell::Empty;

impl<'a> RowReader<'a> {
    /// Returns `None` when the column is absent from the table.
    /// A missing cell is recorded and otherwise treated as blank.
    fn cell(&mut self, column: Column) -> Option<&'a Cell> {
        let header = self.headers.get(&column)?;
        match self.row.get(header) {
            Some(cell) => Some(cell),
            None => {
                self.notes.push(CoercionNote {
                    row: self.row_number,
                    column,
                    raw: String::new(),
                });
                Some(&EMPTY_CELL)
            }
        }
    }

    fn text(&mut self, column: Column) -> Option<String> {
        self.cell(column).and_then(Cell::text)
    }

    /// Blank cells read as `None`; unreadable ones as 0 with a note.
    fn number(&mut self, column: Column) -> Option<f64> {
        let value = match self.cell(column)? {
            Cell::Empty => return None,
            Cell::Number(x) if x.is_finite() => return Some(*x),
            Cell::Number(x) => x.to_string(),
            Cell::Text(s) if s.trim().is_empty() => return None,
            Cell::Text(s) => match parse_number(s) {
                Some(x) => return Some(x),
                None => s.trim().to_string(),
            },
        };
        self.notes.push(CoercionNote {
            row: self.row_number,
            column,
            raw: value,
        });
        Some(0.0)
    }

    fn non_negative(&mut self, column: Column) -> RiskResult<Option<f64>> {
        match self.number(column) {
            Some(x) if x < 0.0 => Err(RiskError::invalid_parameter(
                column.label(),
                format!("row {}: must be non-negative, got {}", self.row_number, x),
            )),
            other => Ok(other),
        }
    }

    fn date(&mut self, column: Column) -> Option<Date> {
        let text = self.text(column)?;
        match Date::parse_lenient(&text) {
            Ok(date) => Some(date),
            Err(_) => {
                self.notes.push(CoercionNote {
                    row: self.row_number,
                    column,
                    raw: text,
                });
                None
            }
        }
    }

    fn action(&mut self) -> RiskResult<Option<TradeAction>> {
        let Some(text) = self.text(Column::TradeAction) else {
            return Ok(None);
        };
        text.parse().map(Some).map_err(|_| RiskError::InvalidValue {
            column: Column::TradeAction.label().to_string(),
            row: self.row_number,
            value: text,
        })
    }

    fn status(&mut self) -> RiskResult<Option<TradeStatus>> {
        let Some(text) = self.text(Column::TradeStatus) else {
            return Ok(None);
        };
        text.parse().map(Some).map_err(|_| RiskError::InvalidValue {
            column: Column::TradeStatus.label().to_string(),
            row: self.row_number,
            value: text,
        })
    }
}

/// Builds a validated trade table from raw rows.
///
/// # Validation
/// - Market Price, Book Price and Quantity (or Lot Size with Lots) must be
///   present as columns, else `MissingColumns` naming every absent one
/// - unrecognised trade action or status text fails with `InvalidValue`
/// - negative quantity, lot size or lot count fails with `InvalidParameter`
///
/// # Leniency
/// - blank numeric cells read as 0
/// - unreadable numeric cells read as 0 and are noted
/// - unreadable dates read as absent and are noted
/// - a blank Trade ID becomes `ROW-<n>`
/// - rows whose cells are all blank are skipped
///
/// # Examples
///
/// ```
/// use risk_engine::portfolio::{build_trade_table, RawTable};
///
/// let raw = RawTable::from_rows(
///     vec!["Trade Action".into(), "Quantity".into(), "Book Price".into(), "Market Price".into()],
///     vec![vec!["BUY".into(), "1,000".into(), "50".into(), "n/a".into()]],
/// );
/// let table = build_trade_table(&raw).unwrap();
/// let record = &table.records()[0];
///
/// assert_eq!(record.quantity(), 1_000.0);
/// assert_eq!(record.market_price(), 0.0);
/// assert_eq!(record.trade_id().as_str(), "ROW-1");
/// assert_eq!(table.coercion_notes().len(), 1);
///
/// let missing = RawTable::from_rows(vec!["Quantity".into(), "Book Price".into()], vec![]);
/// let err = build_trade_table(&missing).unwrap_err();
/// assert!(err.to_string().contains("Market Price"));
/// ```
pub fn build_trade_table(raw: &RawTable) -> RiskResult<TradeTable> {
    let mut headers: BTreeMap<Column, String> = BTreeMap::new();
    for name in raw.columns() {
        if let Some(column) = Column::from_header(name) {
            headers.entry(column).or_insert_with(|| name.clone());
        }
    }

    let mut capabilities = Capabilities::from_columns(headers.keys().copied());
    let lot_based = !capabilities.contains(Column::Quantity)
        && capabilities.contains(Column::LotSize)
        && capabilities.contains(Column::Lots);
    if lot_based {
        capabilities.insert(Column::Quantity);
    }

    let missing = capabilities.missing(&[Column::MarketPrice, Column::BookPrice, Column::Quantity]);
    if !missing.is_empty() {
        return Err(RiskError::MissingColumns(
            missing.iter().map(|c| c.label().to_string()).collect(),
        ));
    }
    capabilities.insert(Column::TradeId);

    let mut records = Vec::with_capacity(raw.len());
    let mut notes = Vec::new();

    for (index, row) in raw.rows().iter().enumerate() {
        if row.values().all(Cell::is_blank) {
            continue;
        }
        let mut reader = RowReader {
            row,
            headers: &headers,
            row_number: index + 1,
            notes: &mut notes,
        };
        records.push(read_record(&mut reader, lot_based)?);
    }

    Ok(TradeTable::new(records, capabilities).with_notes(notes))
}

fn read_record(reader: &mut RowReader<'_>, lot_based: bool) -> RiskResult<TradeRecord> {
    let quantity = if lot_based {
        let lot_size = reader.non_negative(Column::LotSize)?.unwrap_or(0.0);
        let lots = reader.non_negative(Column::Lots)?.unwrap_or(0.0);
        lot_size * lots
    } else {
        reader.non_negative(Column::Quantity)?.unwrap_or(0.0)
    };
    let book_price = reader.number(Column::BookPrice).unwrap_or(0.0);
    let market_price = reader.number(Column::MarketPrice).unwrap_or(0.0);

    let trade_id = reader
        .text(Column::TradeId)
        .map(TradeId::new)
        .unwrap_or_else(|| TradeId::for_row(reader.row_number));

    let mut record = TradeRecord::new(trade_id, quantity, book_price, market_price);

    if let Some(date) = reader.date(Column::TradeDate) {
        record = record.with_trade_date(date);
    }
    if let Some(commodity) = reader.text(Column::Commodity) {
        record = record.with_commodity(commodity);
    }
    if let Some(instrument_type) = reader.text(Column::InstrumentType) {
        record = record.with_instrument_type(instrument_type);
    }
    if let Some(action) = reader.action()? {
        record = record.with_action(action);
    }
    if let Some(status) = reader.status()? {
        record = record.with_status(status);
    }
    if let Some(premium) = reader.number(Column::Premium) {
        record = record.with_premium(premium);
    }
    if let Some(uom) = reader.text(Column::Uom) {
        record = record.with_uom(uom);
    }
    if let Some(counterparty) = reader.text(Column::Counterparty) {
        record = record.with_counterparty(counterparty);
    }

    let realized = reader.number(Column::RealizedPnl);
    let unrealized = reader.number(Column::UnrealizedPnl);
    if realized.is_some() || unrealized.is_some() {
        record = record.with_reported_pnl(realized.unwrap_or(0.0), unrealized.unwrap_or(0.0));
    }

    Ok(record)
}
