//! Trade table schema: recognised columns and capability sets.
//!
//! Upload headers vary in casing, spacing and wording across files
//! ("Market Price", "market_price", "Total Qty"). Every header is matched
//! against a fixed set of [`Column`]s after normalisation, and the columns a
//! table actually carries are recorded as its [`Capabilities`]. Callers check
//! capabilities before grouping or filtering on an optional column.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use risk_core::types::{RiskError, RiskResult};

/// How a column's cells are interpreted.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    /// Free text, compared case-insensitively
    Text,
    /// Enumerated text (trade action, trade status)
    Categorical,
    /// Calendar date
    Date,
    /// Real number, coerced to 0 when unreadable
    Numeric,
}

/// A recognised trade table column.
///
/// # Examples
///
/// ```
/// use risk_engine::portfolio::Column;
///
/// assert_eq!(Column::from_header("market_price"), Some(Column::MarketPrice));
/// assert_eq!(Column::from_header(" Total Qty "), Some(Column::Quantity));
/// assert_eq!(Column::from_header("Position"), Some(Column::TradeAction));
/// assert_eq!(Column::from_header("Exchange"), None);
/// assert_eq!(Column::MarketPrice.label(), "Market Price");
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Column {
    /// Trade identifier
    TradeId,
    /// Trade date
    TradeDate,
    /// Commodity or underlying
    Commodity,
    /// Instrument type (Futures, Options, ...)
    InstrumentType,
    /// Buy/Sell direction
    TradeAction,
    /// Open/Closed lifecycle state
    TradeStatus,
    /// Flat quantity
    Quantity,
    /// Units per lot
    LotSize,
    /// Number of lots
    Lots,
    /// Entry price (strike for options)
    BookPrice,
    /// Current market reference price
    MarketPrice,
    /// Option premium per unit
    Premium,
    /// Unit of measure
    Uom,
    /// Counterparty name
    Counterparty,
    /// Realised PnL supplied with the upload
    RealizedPnl,
    /// Unrealised PnL supplied with the upload
    UnrealizedPnl,
}

impl Column {
    /// Every recognised column, in display order.
    pub const ALL: [Column; 16] = [
        Column::TradeId,
        Column::TradeDate,
        Column::Commodity,
        Column::InstrumentType,
        Column::TradeAction,
        Column::TradeStatus,
        Column::Quantity,
        Column::LotSize,
        Column::Lots,
        Column::BookPrice,
        Column::MarketPrice,
        Column::Premium,
        Column::Uom,
        Column::Counterparty,
        Column::RealizedPnl,
        Column::UnrealizedPnl,
    ];

    /// Canonical header label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::TradeId => "Trade ID",
            Self::TradeDate => "Trade Date",
            Self::Commodity => "Commodity",
            Self::InstrumentType => "Instrument Type",
            Self::TradeAction => "Trade Action",
            Self::TradeStatus => "Trade Status",
            Self::Quantity => "Quantity",
            Self::LotSize => "Lot Size",
            Self::Lots => "Lots",
            Self::BookPrice => "Book Price",
            Self::MarketPrice => "Market Price",
            Self::Premium => "Premium",
            Self::Uom => "UOM",
            Self::Counterparty => "Counterparty",
            Self::RealizedPnl => "Realized PnL",
            Self::UnrealizedPnl => "Unrealized PnL",
        }
    }

    /// Normalised header spellings accepted for this column.
    fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::TradeId => &["tradeid", "id"],
            Self::TradeDate => &["tradedate", "date"],
            Self::Commodity => &["commodity"],
            Self::InstrumentType => &["instrumenttype", "instrument"],
            Self::TradeAction => &["tradeaction", "action", "position"],
            Self::TradeStatus => &["tradestatus", "status"],
            Self::Quantity => &["quantity", "totalqty", "qty"],
            Self::LotSize => &["lotsize"],
            Self::Lots => &["lots"],
            Self::BookPrice => &["bookprice"],
            Self::MarketPrice => &["marketprice"],
            Self::Premium => &["premium"],
            Self::Uom => &["uom"],
            Self::Counterparty => &["counterparty"],
            Self::RealizedPnl => &["realizedpnl", "realisedpnl"],
            Self::UnrealizedPnl => &["unrealizedpnl", "unrealisedpnl"],
        }
    }

    /// Cell interpretation for this column.
    pub fn kind(&self) -> ColumnKind {
        match self {
            Self::TradeId | Self::Commodity | Self::InstrumentType | Self::Uom | Self::Counterparty => {
                ColumnKind::Text
            }
            Self::TradeAction | Self::TradeStatus => ColumnKind::Categorical,
            Self::TradeDate => ColumnKind::Date,
            Self::Quantity
            | Self::LotSize
            | Self::Lots
            | Self::BookPrice
            | Self::MarketPrice
            | Self::Premium
            | Self::RealizedPnl
            | Self::UnrealizedPnl => ColumnKind::Numeric,
        }
    }

    /// Returns true for columns usable as a grouping dimension.
    pub fn is_groupable(&self) -> bool {
        matches!(self.kind(), ColumnKind::Text | ColumnKind::Categorical)
    }

    /// Matches a raw header against the recognised columns.
    ///
    /// Matching ignores case, whitespace, underscores and punctuation.
    pub fn from_header(header: &str) -> Option<Column> {
        let key = normalise_header(header);
        if key.is_empty() {
            return None;
        }
        Self::ALL
            .iter()
            .copied()
            .find(|column| column.aliases().contains(&key.as_str()))
    }
}

/// Lowercases and strips everything but ASCII letters and digits.
fn normalise_header(header: &str) -> String {
    header
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Column {
    type Err = RiskError;

    fn from_str(s: &str) -> RiskResult<Self> {
        Column::from_header(s).ok_or_else(|| {
            RiskError::invalid_parameter("column", format!("unrecognised column '{}'", s.trim()))
        })
    }
}

/// The set of columns a table carries.
///
/// Quantity is present either directly or when both Lot Size and Lots are
/// present, since quantity is then derived from them.
///
/// # Examples
///
/// ```
/// use risk_engine::portfolio::{Capabilities, Column};
///
/// let caps = Capabilities::from_columns([Column::Commodity, Column::Quantity]);
/// assert!(caps.contains(Column::Commodity));
/// assert!(caps.require(&[Column::Commodity], "group").is_ok());
/// assert!(caps.require(&[Column::Counterparty], "group").is_err());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Capabilities {
    columns: BTreeSet<Column>,
}

impl Capabilities {
    /// Creates an empty capability set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a capability set from the given columns.
    pub fn from_columns(columns: impl IntoIterator<Item = Column>) -> Self {
        Self {
            columns: columns.into_iter().collect(),
        }
    }

    /// Adds a column.
    pub fn insert(&mut self, column: Column) {
        self.columns.insert(column);
    }

    /// Returns true when the column is present.
    #[inline]
    pub fn contains(&self, column: Column) -> bool {
        self.columns.contains(&column)
    }

    /// Returns the columns from `required` that are absent, in the given order.
    pub fn missing(&self, required: &[Column]) -> Vec<Column> {
        required
            .iter()
            .copied()
            .filter(|column| !self.contains(*column))
            .collect()
    }

    /// Fails with `InvalidParameter` naming `purpose` if any column is absent.
    pub fn require(&self, required: &[Column], purpose: &str) -> RiskResult<()> {
        let missing = self.missing(required);
        if missing.is_empty() {
            return Ok(());
        }
        let labels: Vec<&str> = missing.iter().map(|c| c.label()).collect();
        Err(RiskError::invalid_parameter(
            purpose,
            format!("column(s) not present in the table: {}", labels.join(", ")),
        ))
    }

    /// Iterates over the present columns in display order.
    pub fn iter(&self) -> impl Iterator<Item = Column> + '_ {
        self.columns.iter().copied()
    }

    /// Number of present columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true when no column is present.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
