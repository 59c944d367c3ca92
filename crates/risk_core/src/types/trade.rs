//! Trade direction and lifecycle enums.
//!
//! Uploaded files spell these fields in many ways ("BUY", "b", "Long",
//! "Squared Off"). Parsing is case-insensitive and accepts the common
//! synonyms; display always uses a single canonical casing.

use std::fmt;
use std::str::FromStr;

use super::error::TradeFieldError;

/// Direction of a trade.
///
/// # Examples
///
/// ```
/// use risk_core::types::TradeAction;
///
/// let buy: TradeAction = " long ".parse().unwrap();
/// assert_eq!(buy, TradeAction::Buy);
/// assert_eq!(buy.sign(), 1.0);
///
/// let sell: TradeAction = "S".parse().unwrap();
/// assert_eq!(sell.to_string(), "Sell");
/// assert_eq!(sell.sign(), -1.0);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TradeAction {
    /// Long position
    Buy,
    /// Short position
    Sell,
}

impl TradeAction {
    /// Canonical display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Buy => "Buy",
            Self::Sell => "Sell",
        }
    }

    /// Direction multiplier: `+1` for Buy, `-1` for Sell.
    #[inline]
    pub fn sign(&self) -> f64 {
        match self {
            Self::Buy => 1.0,
            Self::Sell => -1.0,
        }
    }
}

impl FromStr for TradeAction {
    type Err = TradeFieldError;

    fn from_str(s: &str) -> Result<Self, TradeFieldError> {
        match s.trim().to_lowercase().as_str() {
            "buy" | "b" | "long" => Ok(Self::Buy),
            "sell" | "s" | "short" => Ok(Self::Sell),
            _ => Err(TradeFieldError::UnknownAction(s.trim().to_string())),
        }
    }
}

impl fmt::Display for TradeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Lifecycle state of a position.
///
/// A closed position has its P&L realised; an open one carries it as
/// unrealised.
///
/// # Examples
///
/// ```
/// use risk_core::types::TradeStatus;
///
/// let status: TradeStatus = "Squared Off".parse().unwrap();
/// assert!(status.is_closed());
/// assert_eq!(status.to_string(), "Closed");
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TradeStatus {
    /// Position still held
    Open,
    /// Position closed out
    Closed,
}

impl TradeStatus {
    /// Canonical display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Closed => "Closed",
        }
    }

    /// Returns true when the position has been closed out.
    #[inline]
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }
}

impl FromStr for TradeStatus {
    type Err = TradeFieldError;

    fn from_str(s: &str) -> Result<Self, TradeFieldError> {
        match s.trim().to_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "closed" | "squared off" | "squared-off" | "settled" => Ok(Self::Closed),
            _ => Err(TradeFieldError::UnknownStatus(s.trim().to_string())),
        }
    }
}

impl fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
