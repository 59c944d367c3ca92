//! Core time, trade and error types.
//!
//! This module provides:
//! - `time`: `Date` wrapper with ISO and day-first parsing for uploaded files
//! - `trade`: `TradeAction` and `TradeStatus` with lenient text parsing
//! - `error`: Structured error types for validation, parameters and data sufficiency
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`Date`] from `time`
//! - [`TradeAction`], [`TradeStatus`] from `trade`
//! - [`RiskError`], [`DateError`], [`TradeFieldError`], [`RiskResult`] from `error`

pub mod error;
pub mod time;
pub mod trade;

// Re-export commonly used types at module level
pub use error::{DateError, RiskError, RiskResult, TradeFieldError};
pub use time::Date;
pub use trade::{TradeAction, TradeStatus};
