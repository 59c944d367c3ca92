//! Value-at-Risk.
//!
//! Both methods work on the aggregated MTM series of a table:
//!
//! - [`parametric_var`]: normal quantile of daily returns
//! - [`historical_var`]: empirical percentile of daily returns, with an
//!   optional pre-filter and lookback window
//!
//! The portfolio value that scales returns into currency is selected with
//! [`PortfolioValueBasis`]. Reported VaR is always non-negative.

mod config;
mod historical;
mod parametric;
mod returns;
mod rolling;

pub use config::{Confidence, PortfolioValueBasis};
pub use historical::{historical_var, historical_var_report, HistoricalVar, RollingVarPoint};
pub use parametric::{parametric_var, parametric_var_report, ParametricVar};
pub use returns::{ReturnSeries, SeriesKey, SeriesPoint, MIN_OBSERVATIONS};
pub use rolling::{rolling_volatility, RollingVolatility, VolatilityPoint};
