//! Trade records, tables and their construction.
//!
//! - `ids`: `TradeId`
//! - `column`: recognised columns and table capabilities
//! - `record`: `TradeRecord`
//! - `table`: `TradeTable`
//! - `ingest`: raw rows to a validated `TradeTable`
//! - `filter`: row predicates and `filter_table`
//! - `book`: manual trade entry

pub mod book;
pub mod column;
pub mod filter;
pub mod ids;
pub mod ingest;
pub mod record;
pub mod table;

pub use book::{EntryPricing, OptionType, TradeBook, TradeEntry};
pub use column::{Capabilities, Column, ColumnKind};
pub use filter::{filter_table, FilterBound, TradeFilter, TradePredicate};
pub use ids::TradeId;
pub use ingest::{build_trade_table, Cell, CoercionNote, RawRow, RawTable};
pub use record::TradeRecord;
pub use table::{TradeTable, PRICING_COLUMNS};
