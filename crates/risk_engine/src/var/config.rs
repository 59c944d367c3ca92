//! VaR parameters: confidence level and portfolio value basis.

use std::fmt;
use std::str::FromStr;

use risk_core::math::norm_inv;
use risk_core::types::{RiskError, RiskResult};

use super::returns::ReturnSeries;
use crate::portfolio::TradeTable;

/// Confidence level in percent, strictly between 0 and 100.
///
/// # Examples
///
/// ```
/// use risk_engine::var::Confidence;
///
/// let c = Confidence::new(95.0).unwrap();
/// assert_eq!(c.percent(), 95.0);
/// assert!((c.tail_percent() - 5.0).abs() < 1e-12);
/// assert!((c.z_score() - 1.6448536).abs() < 1e-6);
///
/// assert!(Confidence::new(100.0).is_err());
/// assert!(Confidence::new(f64::NAN).is_err());
/// ```
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Confidence(f64);

impl Confidence {
    /// Validates a confidence level given in percent.
    pub fn new(percent: f64) -> RiskResult<Self> {
        if !percent.is_finite() || percent <= 0.0 || percent >= 100.0 {
            return Err(RiskError::invalid_parameter(
                "confidence",
                format!("must be strictly between 0 and 100, got {}", percent),
            ));
        }
        Ok(Self(percent))
    }

    /// Level in percent.
    #[inline]
    pub fn percent(&self) -> f64 {
        self.0
    }

    /// Level as a probability.
    #[inline]
    pub fn fraction(&self) -> f64 {
        self.0 / 100.0
    }

    /// Loss-tail percentile, `100 − c`.
    #[inline]
    pub fn tail_percent(&self) -> f64 {
        100.0 - self.0
    }

    /// Standard normal quantile `Φ⁻¹(c / 100)`.
    pub fn z_score(&self) -> f64 {
        norm_inv(self.fraction())
    }
}

impl Default for Confidence {
    fn default() -> Self {
        Self(95.0)
    }
}

impl TryFrom<f64> for Confidence {
    type Error = RiskError;

    fn try_from(percent: f64) -> RiskResult<Self> {
        Self::new(percent)
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Portfolio value `X` that scales VaR returns into currency.
///
/// The choice materially changes VaR magnitude:
/// - `MtmSum`: signed sum of per-record MTM (default)
/// - `LastMtm`: aggregated MTM of the final series point
/// - `Notional`: sum of `quantity × book_price`
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PortfolioValueBasis {
    /// Sum of MTM across all records
    #[default]
    MtmSum,
    /// MTM of the last aggregated point
    LastMtm,
    /// Sum of notional across all records
    Notional,
}

impl PortfolioValueBasis {
    /// Configuration name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::MtmSum => "mtm_sum",
            Self::LastMtm => "last_mtm",
            Self::Notional => "notional",
        }
    }

    /// Evaluates `X` for a valued table and its series.
    pub fn value(&self, table: &TradeTable, series: &ReturnSeries) -> f64 {
        match self {
            Self::MtmSum => table.total_mtm(),
            Self::LastMtm => series.last_mtm().unwrap_or(0.0),
            Self::Notional => table.total_notional(),
        }
    }
}

impl FromStr for PortfolioValueBasis {
    type Err = RiskError;

    fn from_str(s: &str) -> RiskResult<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "mtm_sum" | "mtm" => Ok(Self::MtmSum),
            "last_mtm" | "last" => Ok(Self::LastMtm),
            "notional" => Ok(Self::Notional),
            other => Err(RiskError::invalid_parameter(
                "value_basis",
                format!("expected mtm_sum, last_mtm or notional, got '{}'", other),
            )),
        }
    }
}

impl fmt::Display for PortfolioValueBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_bounds() {
        assert!(Confidence::new(0.0).is_err());
        assert!(Confidence::new(-5.0).is_err());
        assert!(Confidence::new(f64::INFINITY).is_err());
        assert!(Confidence::new(0.5).is_ok());
        assert!(Confidence::new(99.9).is_ok());
    }

    #[test]
    fn test_confidence_error_message() {
        let err = Confidence::try_from(120.0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid parameter 'confidence': must be strictly between 0 and 100, got 120"
        );
    }

    #[test]
    fn test_z_score_increases_with_confidence() {
        let z90 = Confidence::new(90.0).unwrap().z_score();
        let z99 = Confidence::new(99.0).unwrap().z_score();
        assert!(z99 > z90);
    }

    #[test]
    fn test_basis_parse() {
        assert_eq!("mtm_sum".parse::<PortfolioValueBasis>().unwrap(), PortfolioValueBasis::MtmSum);
        assert_eq!("Last-MTM".parse::<PortfolioValueBasis>().unwrap(), PortfolioValueBasis::LastMtm);
        assert_eq!("notional".parse::<PortfolioValueBasis>().unwrap(), PortfolioValueBasis::Notional);
        assert!("book".parse::<PortfolioValueBasis>().is_err());
        assert_eq!(PortfolioValueBasis::default(), PortfolioValueBasis::MtmSum);
    }
}
