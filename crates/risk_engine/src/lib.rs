//! # Risk Engine (L2: Analytics)
//!
//! Deterministic risk calculations over a trade table.
//!
//! This crate provides:
//! - Trade records, tables, ingestion from raw rows and manual entry
//! - Mark-to-market and realised/unrealised PnL attribution
//! - Parametric and historical Value-at-Risk, rolling volatility
//! - Market price shocks, preset stress scenarios and a scenario engine
//! - Summary, grouped, trend and distribution reports
//!
//! Every operation takes a [`portfolio::TradeTable`] by reference and
//! returns a new value; nothing is mutated in place and nothing is logged.
//! Ingestion leniency is reported as [`portfolio::CoercionNote`]s on the
//! resulting table.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            risk_engine (L2)             │
//! ├─────────────────────────────────────────┤
//! │  portfolio/  - TradeRecord, TradeTable, │
//! │               ingest, filter, book      │
//! │  valuation/  - MTM, PnL split           │
//! │  var/        - parametric, historical,  │
//! │               rolling volatility        │
//! │  scenarios/  - shocks, presets, engine  │
//! │  reporting/  - summaries, groups, trend │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │             risk_core (L1)              │
//! │  Date, trade enums, errors, statistics  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use risk_engine::portfolio::{build_trade_table, RawTable};
//! use risk_engine::valuation::{compute_pnl, PnlTotals};
//! use risk_engine::var::parametric_var;
//!
//! let row = |cells: &[&str]| cells.iter().map(|c| c.to_string()).collect::<Vec<_>>();
//! let raw = RawTable::from_rows(
//!     row(&["Trade ID", "Trade Date", "Quantity", "Book Price", "Market Price", "Action"]),
//!     vec![
//!         row(&["T1", "2024-01-02", "100", "0", "10", "Buy"]),
//!         row(&["T2", "2024-01-03", "100", "0", "11", "Buy"]),
//!     ],
//! );
//! let table = build_trade_table(&raw).unwrap();
//!
//! let totals = PnlTotals::from_table(&compute_pnl(&table).unwrap());
//! assert_eq!(totals.unrealized, 2_100.0);
//!
//! let var = parametric_var(&table, 95.0).unwrap();
//! assert!((var - 139.2483).abs() < 1e-3);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod portfolio;
pub mod reporting;
pub mod scenarios;
pub mod valuation;
pub mod var;

// Re-export commonly used types
pub use portfolio::{build_trade_table, filter_table, TradeFilter, TradeRecord, TradeTable};
pub use reporting::PortfolioSummary;
pub use scenarios::{apply_shock, PresetScenario, ScenarioEngine};
pub use valuation::{compute_mtm, compute_pnl};
pub use var::{historical_var, parametric_var, Confidence, PortfolioValueBasis};
