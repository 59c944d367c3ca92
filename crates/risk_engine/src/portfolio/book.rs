//! Manual trade entry.
//!
//! [`TradeBook`] is an append-only, in-memory list of hand-entered trades.
//! Trade IDs come from a counter starting at 1.

use std::fmt;

use risk_core::types::{Date, RiskError, RiskResult, TradeAction};

use super::column::{Capabilities, Column};
use super::ids::TradeId;
use super::record::TradeRecord;
use super::table::TradeTable;

/// Call or put.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OptionType {
    /// Right to buy
    Call,
    /// Right to sell
    Put,
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Call => write!(f, "Call"),
            Self::Put => write!(f, "Put"),
        }
    }
}

/// Pricing inputs of a manual entry.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntryPricing {
    /// Futures, forwards, swaps: valued on price difference
    Standard {
        /// Entry price
        book_price: f64,
        /// Current market price
        market_price: f64,
    },
    /// Options: valued on premium
    Option {
        /// Call or put
        option_type: OptionType,
        /// Strike price
        strike: f64,
        /// Premium per unit
        premium: f64,
    },
}

/// A hand-entered trade before it is assigned an ID.
///
/// # Examples
///
/// ```
/// use risk_core::types::{Date, TradeAction};
/// use risk_engine::portfolio::{EntryPricing, TradeBook, TradeEntry};
///
/// let entry = TradeEntry::new(
///     "Futures",
///     Date::from_ymd(2024, 5, 1).unwrap(),
///     "Gold",
///     TradeAction::Buy,
///     10.0,
///     3.0,
///     EntryPricing::Standard { book_price: 2300.0, market_price: 2310.0 },
/// );
///
/// let mut book = TradeBook::new();
/// let id = book.add(entry).unwrap();
/// assert_eq!(id.as_str(), "1");
/// assert_eq!(book.to_table().records()[0].quantity(), 30.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TradeEntry {
    /// Futures, Options, Forwards, Swaps or free text
    pub instrument_type: String,
    /// Trade date
    pub trade_date: Date,
    /// Commodity
    pub commodity: String,
    /// Direction
    pub action: TradeAction,
    /// Units per lot
    pub lot_size: f64,
    /// Number of lots
    pub lots: f64,
    /// Counterparty name
    pub counterparty: Option<String>,
    /// Pricing inputs
    pub pricing: EntryPricing,
}

impl TradeEntry {
    /// Creates an entry without a counterparty.
    pub fn new(
        instrument_type: impl Into<String>,
        trade_date: Date,
        commodity: impl Into<String>,
        action: TradeAction,
        lot_size: f64,
        lots: f64,
        pricing: EntryPricing,
    ) -> Self {
        Self {
            instrument_type: instrument_type.into(),
            trade_date,
            commodity: commodity.into(),
            action,
            lot_size,
            lots,
            counterparty: None,
            pricing,
        }
    }

    /// Sets the counterparty.
    pub fn with_counterparty(mut self, counterparty: impl Into<String>) -> Self {
        self.counterparty = Some(counterparty.into());
        self
    }

    /// Lot-adjusted quantity.
    pub fn quantity(&self) -> f64 {
        self.lot_size * self.lots
    }

    fn validate(&self) -> RiskResult<()> {
        let mut checks = vec![("lot_size", self.lot_size), ("lots", self.lots)];
        match self.pricing {
            EntryPricing::Standard {
                book_price,
                market_price,
            } => {
                checks.push(("book_price", book_price));
                checks.push(("market_price", market_price));
            }
            EntryPricing::Option { strike, premium, .. } => {
                checks.push(("strike", strike));
                checks.push(("premium", premium));
            }
        }
        for (name, value) in checks {
            if !value.is_finite() || value < 0.0 {
                return Err(RiskError::invalid_parameter(
                    name,
                    format!("must be a non-negative number, got {}", value),
                ));
            }
        }
        Ok(())
    }

    fn into_record(self, id: TradeId) -> TradeRecord {
        let quantity = self.quantity();
        let (book_price, market_price, premium) = match self.pricing {
            EntryPricing::Standard {
                book_price,
                market_price,
            } => (book_price, market_price, None),
            EntryPricing::Option { strike, premium, .. } => (strike, 0.0, Some(premium)),
        };

        let mut record = TradeRecord::new(id, quantity, book_price, market_price)
            .with_trade_date(self.trade_date)
            .with_commodity(self.commodity)
            .with_instrument_type(self.instrument_type)
            .with_action(self.action);
        if let Some(premium) = premium {
            record = record.with_premium(premium);
        }
        if let Some(counterparty) = self.counterparty {
            record = record.with_counterparty(counterparty);
        }
        record
    }
}

/// Append-only book of manually entered trades.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TradeBook {
    records: Vec<TradeRecord>,
    next_id: u64,
}

impl Default for TradeBook {
    fn default() -> Self {
        Self::new()
    }
}

impl TradeBook {
    /// Creates an empty book; the first trade receives ID 1.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }

    /// Validates and appends an entry, returning its assigned ID.
    ///
    /// A rejected entry does not consume an ID.
    pub fn add(&mut self, entry: TradeEntry) -> RiskResult<TradeId> {
        entry.validate()?;
        let id = TradeId::from(self.next_id);
        self.next_id += 1;
        self.records.push(entry.into_record(id.clone()));
        Ok(id)
    }

    /// Number of trades entered.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true when no trade has been entered.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Entered trades in entry order.
    pub fn records(&self) -> &[TradeRecord] {
        &self.records
    }

    /// Snapshot of the book as a trade table.
    pub fn to_table(&self) -> TradeTable {
        let mut capabilities = Capabilities::from_columns([
            Column::TradeId,
            Column::TradeDate,
            Column::Commodity,
            Column::InstrumentType,
            Column::TradeAction,
            Column::Quantity,
            Column::BookPrice,
            Column::MarketPrice,
        ]);
        if self.records.iter().any(|r| r.premium().is_some()) {
            capabilities.insert(Column::Premium);
        }
        if self.records.iter().any(|r| r.counterparty().is_some()) {
            capabilities.insert(Column::Counterparty);
        }
        TradeTable::new(self.records.clone(), capabilities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> Date {
        Date::from_ymd(2024, 5, 1).unwrap()
    }

    fn futures(book_price: f64, market_price: f64) -> TradeEntry {
        TradeEntry::new(
            "Futures",
            date(),
            "Crude",
            TradeAction::Buy,
            100.0,
            2.0,
            EntryPricing::Standard {
                book_price,
                market_price,
            },
        )
    }

    #[test]
    fn test_ids_count_from_one() {
        let mut book = TradeBook::new();
        assert_eq!(book.add(futures(70.0, 71.0)).unwrap().as_str(), "1");
        assert_eq!(book.add(futures(70.0, 72.0)).unwrap().as_str(), "2");
        assert_eq!(book.len(), 2);
    }

    #[test]
    fn test_rejected_entry_keeps_counter() {
        let mut book = TradeBook::new();
        let err = book.add(futures(-1.0, 71.0)).unwrap_err();
        assert!(err.is_invalid_parameter());
        assert!(book.is_empty());
        assert_eq!(book.add(futures(70.0, 71.0)).unwrap().as_str(), "1");
    }

    #[test]
    fn test_option_entry_layout() {
        let entry = TradeEntry::new(
            "Options",
            date(),
            "Gold",
            TradeAction::Sell,
            1.0,
            10.0,
            EntryPricing::Option {
                option_type: OptionType::Call,
                strike: 2400.0,
                premium: 12.5,
            },
        )
        .with_counterparty("Bank A");

        let mut book = TradeBook::new();
        book.add(entry).unwrap();
        let table = book.to_table();
        let record = &table.records()[0];

        assert!(record.is_option());
        assert_eq!(record.book_price(), 2400.0);
        assert_eq!(record.market_price(), 0.0);
        assert_eq!(record.premium(), Some(12.5));
        assert_eq!(record.quantity(), 10.0);
        assert!(table.has(Column::Premium));
        assert!(table.has(Column::Counterparty));
    }

    #[test]
    fn test_negative_lots_rejected() {
        let mut entry = futures(70.0, 71.0);
        entry.lots = -1.0;
        let err = TradeBook::new().add(entry).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid parameter 'lots': must be a non-negative number, got -1"
        );
    }
}
