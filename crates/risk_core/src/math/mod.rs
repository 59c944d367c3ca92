//! Numeric helpers shared by the risk measures.
//!
//! - `distributions`: standard normal CDF, PDF and inverse CDF
//! - `statistics`: mean, sample standard deviation, linear-interpolated
//!   percentiles, percentage changes and rolling windows

pub mod distributions;
pub mod statistics;

pub use distributions::{norm_cdf, norm_inv, norm_pdf};
pub use statistics::{
    mean, pct_change, percentile_linear, percentile_sorted, rolling_apply, rolling_std, sample_std,
};
