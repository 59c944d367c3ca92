//! Error types for structured error handling.
//!
//! This module provides:
//! - `RiskError`: Errors from ingestion, parameter checks and return-based calculations
//! - `DateError`: Errors from date construction and parsing
//! - `TradeFieldError`: Errors from parsing trade action and status text
//!
//! The engine never recovers from these internally; they are propagated to the
//! caller, which owns all user-facing messaging.

use thiserror::Error;

/// Convenience alias for results carrying a [`RiskError`].
pub type RiskResult<T> = Result<T, RiskError>;

/// Categorised risk engine errors.
///
/// # Variants
/// - `MissingColumns`: Required columns absent from an ingested table
/// - `InvalidValue`: A categorical cell that cannot be interpreted
/// - `InvalidParameter`: Confidence, shock, window or filter outside its domain
/// - `InsufficientData`: Too few observations for a return-based calculation
///
/// # Examples
/// ```
/// use risk_core::types::RiskError;
///
/// let err = RiskError::MissingColumns(vec!["Market Price".to_string()]);
/// assert_eq!(format!("{}", err), "Missing required column(s): Market Price");
///
/// let err = RiskError::insufficient_data("parametric VaR", 1, 2);
/// assert!(err.is_insufficient_data());
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RiskError {
    /// One or more required columns are absent.
    #[error("Missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// A cell value could not be interpreted for its column.
    #[error("Invalid value '{value}' for column '{column}' in row {row}")]
    InvalidValue {
        /// Column display label
        column: String,
        /// 1-based row number
        row: usize,
        /// Raw cell text
        value: String,
    },

    /// A scalar parameter is outside its valid domain.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name
        name: String,
        /// Why the value was rejected
        reason: String,
    },

    /// Not enough observations to compute a return-based measure.
    #[error("Insufficient data for {context}: got {got} observation(s), need at least {need}")]
    InsufficientData {
        /// Calculation that was attempted
        context: String,
        /// Observations available
        got: usize,
        /// Observations required
        need: usize,
    },
}

impl RiskError {
    /// Create an invalid parameter error.
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create an insufficient data error.
    pub fn insufficient_data(context: impl Into<String>, got: usize, need: usize) -> Self {
        Self::InsufficientData {
            context: context.into(),
            got,
            need,
        }
    }

    /// Returns true for ingestion validation failures.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::MissingColumns(_) | Self::InvalidValue { .. })
    }

    /// Returns true for parameter domain failures.
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, Self::InvalidParameter { .. })
    }

    /// Returns true when a calculation was not computable.
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, Self::InsufficientData { .. })
    }
}

/// Date-related errors.
///
/// # Examples
/// ```
/// use risk_core::types::DateError;
///
/// let err = DateError::InvalidDate { year: 2024, month: 2, day: 30 };
/// assert_eq!(format!("{}", err), "Invalid date: 2024-2-30");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Invalid date components (e.g., February 30th).
    #[error("Invalid date: {year}-{month}-{day}")]
    InvalidDate {
        /// Year component
        year: i32,
        /// Month component (1-12)
        month: u32,
        /// Day component (1-31)
        day: u32,
    },

    /// Failed to parse date string.
    #[error("Date parse error: {0}")]
    ParseError(String),
}

/// Errors from parsing categorical trade fields.
///
/// # Examples
/// ```
/// use risk_core::types::{TradeAction, TradeFieldError};
///
/// let err = "hold".parse::<TradeAction>().unwrap_err();
/// assert_eq!(err, TradeFieldError::UnknownAction("hold".to_string()));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TradeFieldError {
    /// Text is not a recognised trade action.
    #[error("Unknown trade action: {0}")]
    UnknownAction(String),

    /// Text is not a recognised trade status.
    #[error("Unknown trade status: {0}")]
    UnknownStatus(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_columns_display_lists_all() {
        let err = RiskError::MissingColumns(vec![
            "Market Price".to_string(),
            "Quantity".to_string(),
        ]);
        assert_eq!(
            format!("{}", err),
            "Missing required column(s): Market Price, Quantity"
        );
        assert!(err.is_validation());
    }

    #[test]
    fn test_invalid_value_display() {
        let err = RiskError::InvalidValue {
            column: "Trade Action".to_string(),
            row: 3,
            value: "hold".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "Invalid value 'hold' for column 'Trade Action' in row 3"
        );
        assert!(err.is_validation());
    }

    #[test]
    fn test_invalid_parameter_display() {
        let err = RiskError::invalid_parameter("confidence", "must be in (0, 100), got 120");
        assert_eq!(
            format!("{}", err),
            "Invalid parameter 'confidence': must be in (0, 100), got 120"
        );
        assert!(err.is_invalid_parameter());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_insufficient_data_display() {
        let err = RiskError::insufficient_data("historical VaR", 1, 2);
        assert_eq!(
            format!("{}", err),
            "Insufficient data for historical VaR: got 1 observation(s), need at least 2"
        );
        assert!(err.is_insufficient_data());
    }

    #[test]
    fn test_error_is_error_trait() {
        let err: Box<dyn std::error::Error> = Box::new(RiskError::MissingColumns(vec![]));
        assert!(err.to_string().contains("Missing"));
    }

    #[test]
    fn test_date_error_parse_display() {
        let err = DateError::ParseError("bad".to_string());
        assert_eq!(format!("{}", err), "Date parse error: bad");
    }
}
