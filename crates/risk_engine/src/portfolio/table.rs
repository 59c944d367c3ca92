//! Trade table: an ordered, immutable collection of trade records.

use risk_core::types::{RiskError, RiskResult};

use super::column::{Capabilities, Column};
use super::ingest::CoercionNote;
use super::record::TradeRecord;

/// Columns every MTM-dependent calculation needs.
pub const PRICING_COLUMNS: [Column; 3] = [Column::MarketPrice, Column::BookPrice, Column::Quantity];

/// Ordered collection of trade records sharing one schema.
///
/// A table never changes after construction. Filtering, valuation and
/// shocks all return a new table with the same capabilities and coercion
/// notes.
///
/// # Examples
///
/// ```
/// use risk_engine::portfolio::{Column, TradeRecord, TradeTable};
///
/// let table = TradeTable::from_records(vec![
///     TradeRecord::new("T1", 100.0, 50.0, 55.0).with_commodity("Gold"),
///     TradeRecord::new("T2", 10.0, 20.0, 18.0),
/// ]);
///
/// assert_eq!(table.len(), 2);
/// assert!(table.has(Column::Commodity));
/// assert!(!table.has(Column::Counterparty));
/// assert_eq!(table.total_notional(), 5_200.0);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TradeTable {
    records: Vec<TradeRecord>,
    capabilities: Capabilities,
    notes: Vec<CoercionNote>,
    valued: bool,
}

impl TradeTable {
    /// Creates a table with an explicit schema.
    ///
    /// Capabilities describe which optional columns callers may group or
    /// filter on, independently of which records happen to carry values.
    pub fn new(records: Vec<TradeRecord>, capabilities: Capabilities) -> Self {
        Self {
            records,
            capabilities,
            notes: Vec::new(),
            valued: false,
        }
    }

    /// Creates a table whose capabilities are inferred from the records.
    ///
    /// Trade ID and the pricing columns are always present; an optional
    /// column is present when at least one record carries a value for it.
    pub fn from_records(records: Vec<TradeRecord>) -> Self {
        let mut capabilities = Capabilities::from_columns([
            Column::TradeId,
            Column::Quantity,
            Column::BookPrice,
            Column::MarketPrice,
        ]);
        let optional = [
            (Column::TradeDate, records.iter().any(|r| r.trade_date().is_some())),
            (Column::Commodity, records.iter().any(|r| r.commodity().is_some())),
            (Column::InstrumentType, records.iter().any(|r| r.instrument_type().is_some())),
            (Column::TradeAction, records.iter().any(|r| r.action().is_some())),
            (Column::TradeStatus, records.iter().any(|r| r.status().is_some())),
            (Column::Premium, records.iter().any(|r| r.premium().is_some())),
            (Column::Uom, records.iter().any(|r| r.uom().is_some())),
            (Column::Counterparty, records.iter().any(|r| r.counterparty().is_some())),
        ];
        for (column, present) in optional {
            if present {
                capabilities.insert(column);
            }
        }
        Self::new(records, capabilities)
    }

    /// Attaches ingestion coercion notes.
    pub fn with_notes(mut self, notes: Vec<CoercionNote>) -> Self {
        self.notes = notes;
        self
    }

    /// Records in insertion order.
    pub fn records(&self) -> &[TradeRecord] {
        &self.records
    }

    /// Iterates over records in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, TradeRecord> {
        self.records.iter()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true when the table has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Columns present in the table's schema.
    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    /// Returns true when the column is part of the schema.
    pub fn has(&self, column: Column) -> bool {
        self.capabilities.contains(column)
    }

    /// Cells that were coerced during ingestion.
    pub fn coercion_notes(&self) -> &[CoercionNote] {
        &self.notes
    }

    /// Returns true once MTM has been computed for every record.
    pub fn is_valued(&self) -> bool {
        self.valued
    }

    /// Fails with `MissingColumns` unless the pricing columns are present.
    pub fn require_pricing(&self) -> RiskResult<()> {
        let missing = self.capabilities.missing(&PRICING_COLUMNS);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(RiskError::MissingColumns(
                missing.iter().map(|c| c.label().to_string()).collect(),
            ))
        }
    }

    /// Sum of MTM across records.
    pub fn total_mtm(&self) -> f64 {
        self.records.iter().map(TradeRecord::mtm).sum()
    }

    /// Sum of realised PnL across records.
    pub fn total_realized_pnl(&self) -> f64 {
        self.records.iter().map(TradeRecord::realized_pnl).sum()
    }

    /// Sum of unrealised PnL across records.
    pub fn total_unrealized_pnl(&self) -> f64 {
        self.records.iter().map(TradeRecord::unrealized_pnl).sum()
    }

    /// Sum of `quantity × book_price` across records.
    pub fn total_notional(&self) -> f64 {
        self.records.iter().map(TradeRecord::notional).sum()
    }

    /// Sum of shocked MTM, or `None` if no shock has been applied.
    pub fn total_shocked_mtm(&self) -> Option<f64> {
        if self.records.is_empty() || self.records.iter().any(|r| r.shocked_mtm().is_none()) {
            return None;
        }
        Some(self.records.iter().filter_map(TradeRecord::shocked_mtm).sum())
    }

    /// New table with the same schema, notes and valuation state.
    pub(crate) fn derive(&self, records: Vec<TradeRecord>) -> Self {
        Self {
            records,
            capabilities: self.capabilities.clone(),
            notes: self.notes.clone(),
            valued: self.valued,
        }
    }

    /// New table with the same schema, marked as valued.
    pub(crate) fn derive_valued(&self, records: Vec<TradeRecord>) -> Self {
        let mut table = self.derive(records);
        table.valued = true;
        table
    }
}

impl<'a> IntoIterator for &'a TradeTable {
    type Item = &'a TradeRecord;
    type IntoIter = std::slice::Iter<'a, TradeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
