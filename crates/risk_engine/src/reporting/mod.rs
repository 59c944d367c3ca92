//! Portfolio reporting views: summary figures, grouped breakdowns, MTM
//! trend and MTM distribution.
//!
//! Every view values the table and attributes PnL before aggregating, so
//! raw ingested tables can be passed directly.

pub mod grouping;
pub mod summary;

pub use grouping::{daily_mtm_trend, drilldown, group_summary, GroupRow, TrendPoint, UNSPECIFIED};
pub use summary::{mtm_quantiles, top_by_mtm, PortfolioSummary};
