//! Identifier types for trade records.
//!
//! Uploaded files may omit the identifier column or leave cells blank;
//! [`TradeId::for_row`] supplies a stable positional fallback.

use std::fmt;

/// Identifier for a trade.
///
/// Uniqueness within a table is not enforced; duplicates are permitted.
///
/// # Examples
///
/// ```
/// use risk_engine::portfolio::TradeId;
///
/// let id = TradeId::new("TRADE001");
/// assert_eq!(id.as_str(), "TRADE001");
///
/// assert_eq!(TradeId::for_row(7).as_str(), "ROW-7");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TradeId(String);

impl TradeId {
    /// Creates a new trade ID.
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Creates the fallback ID for a row without one (1-based row number).
    pub fn for_row(row: usize) -> Self {
        Self(format!("ROW-{}", row))
    }

    /// Returns the ID as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TradeId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TradeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<u64> for TradeId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}
