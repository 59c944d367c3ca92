//! Parametric (variance-covariance) VaR.
//!
//! Assumes normally distributed daily returns:
//!
//! ```text
//! VaR = −(mean_return − z × std_return) × X
//! ```
//!
//! where `z = Φ⁻¹(c / 100)`, `std_return` is the sample deviation
//! (n − 1) and `X` is the portfolio value under the chosen
//! [`PortfolioValueBasis`]. The reported figure is the loss factor
//! `z × std_return − mean_return`, floored at zero, scaled by `|X|`, so a
//! negative portfolio value does not flip the sign and the result grows
//! with the confidence level.

use risk_core::math::{mean, sample_std};
use risk_core::types::{RiskError, RiskResult};

use super::config::{Confidence, PortfolioValueBasis};
use super::returns::{ReturnSeries, MIN_OBSERVATIONS};
use crate::portfolio::TradeTable;
use crate::valuation::compute_mtm;

const CONTEXT: &str = "parametric VaR";

/// Parametric VaR together with its inputs.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ParametricVar {
    /// Confidence level used
    pub confidence: Confidence,
    /// Normal quantile for the confidence level
    pub z_score: f64,
    /// Mean daily return
    pub mean_return: f64,
    /// Sample standard deviation of daily returns
    pub std_return: f64,
    /// Basis for the portfolio value
    pub basis: PortfolioValueBasis,
    /// Portfolio value `X`
    pub portfolio_value: f64,
    /// Signed result of the formula
    pub raw_var: f64,
    /// Reported VaR, `max(z × std − mean, 0) × |X|`
    pub var: f64,
    /// Number of return observations
    pub observations: usize,
}

/// Parametric VaR with the default (MTM sum) portfolio value basis.
///
/// # Errors
/// - `InvalidParameter` for a confidence outside (0, 100)
/// - `MissingColumns` when pricing columns are absent
/// - `InsufficientData` with fewer than two series points
///
/// # Examples
///
/// ```
/// use risk_core::types::Date;
/// use risk_engine::portfolio::{TradeRecord, TradeTable};
/// use risk_engine::var::parametric_var;
///
/// let table = TradeTable::from_records(vec![
///     TradeRecord::new("A", 100.0, 0.0, 10.0).with_trade_date(Date::from_ymd(2024, 1, 1).unwrap()),
///     TradeRecord::new("B", 100.0, 0.0, 11.0).with_trade_date(Date::from_ymd(2024, 1, 2).unwrap()),
/// ]);
///
/// let var = parametric_var(&table, 95.0).unwrap();
/// assert!((var - 139.2483).abs() < 1e-3);
/// assert!(parametric_var(&table, 100.0).is_err());
/// ```
pub fn parametric_var(table: &TradeTable, confidence: f64) -> RiskResult<f64> {
    let confidence = Confidence::new(confidence)?;
    parametric_var_report(table, confidence, PortfolioValueBasis::default()).map(|r| r.var)
}

/// Parametric VaR with full detail and an explicit value basis.
pub fn parametric_var_report(
    table: &TradeTable,
    confidence: Confidence,
    basis: PortfolioValueBasis,
) -> RiskResult<ParametricVar> {
    let valued = compute_mtm(table)?;
    let series = ReturnSeries::from_valued(&valued);
    series.require_observations(CONTEXT)?;

    let returns = series.returns();
    let mean_return = mean(&returns)
        .ok_or_else(|| RiskError::insufficient_data(CONTEXT, 0, MIN_OBSERVATIONS))?;
    let std_return = sample_std(&returns)
        .ok_or_else(|| RiskError::insufficient_data(CONTEXT, returns.len(), MIN_OBSERVATIONS))?;

    let z_score = confidence.z_score();
    let portfolio_value = basis.value(&valued, &series);
    let loss_factor = z_score * std_return - mean_return;
    let raw_var = loss_factor * portfolio_value;

    Ok(ParametricVar {
        confidence,
        z_score,
        mean_return,
        std_return,
        basis,
        portfolio_value,
        raw_var,
        var: loss_factor.max(0.0) * portfolio_value.abs(),
        observations: returns.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::TradeRecord;
    use approx::assert_relative_eq;
    use risk_core::types::Date;

    fn two_day_table() -> TradeTable {
        TradeTable::from_records(vec![
            TradeRecord::new("A", 100.0, 0.0, 10.0)
                .with_trade_date(Date::from_ymd(2024, 1, 1).unwrap()),
            TradeRecord::new("B", 100.0, 0.0, 11.0)
                .with_trade_date(Date::from_ymd(2024, 1, 2).unwrap()),
        ])
    }

    #[test]
    fn test_last_mtm_basis_arithmetic() {
        let report = parametric_var_report(
            &two_day_table(),
            Confidence::new(95.0).unwrap(),
            PortfolioValueBasis::LastMtm,
        )
        .unwrap();
        assert_relative_eq!(report.mean_return, 0.05, epsilon = 1e-12);
        assert_relative_eq!(report.std_return, 0.07071067811865475, epsilon = 1e-12);
        assert_relative_eq!(report.portfolio_value, 1100.0);
        assert_relative_eq!(report.var, 72.93958690443405, max_relative = 1e-7);
        assert_eq!(report.observations, 2);
    }

    #[test]
    fn test_notional_basis() {
        // notional is 0 because book prices are 0
        let report = parametric_var_report(
            &two_day_table(),
            Confidence::default(),
            PortfolioValueBasis::Notional,
        )
        .unwrap();
        assert_eq!(report.portfolio_value, 0.0);
        assert_eq!(report.var, 0.0);
    }

    #[test]
    fn test_negative_portfolio_value_reported_as_loss() {
        // MTM -10 then -20: the raw formula is negative because X < 0
        let table = TradeTable::from_records(vec![
            TradeRecord::new("A", 1.0, 100.0, 90.0)
                .with_trade_date(Date::from_ymd(2024, 1, 1).unwrap()),
            TradeRecord::new("B", 1.0, 100.0, 80.0)
                .with_trade_date(Date::from_ymd(2024, 1, 2).unwrap()),
        ]);
        let report =
            parametric_var_report(&table, Confidence::default(), PortfolioValueBasis::MtmSum)
                .unwrap();
        assert!(report.raw_var < 0.0);
        assert_relative_eq!(report.var, report.raw_var.abs(), max_relative = 1e-12);
    }

    /// MTM growing 10% a day: mean return sits between the 95% and 99%
    /// loss thresholds.
    fn steady_growth() -> TradeTable {
        TradeTable::from_records(
            (0..6)
                .map(|i| {
                    TradeRecord::new(format!("G{}", i), 1.0, 0.0, 100.0 * 1.1_f64.powi(i))
                        .with_trade_date(Date::from_ymd(2024, 1, i as u32 + 1).unwrap())
                })
                .collect(),
        )
    }

    #[test]
    fn test_var_grows_with_confidence_under_steady_gains() {
        let table = steady_growth();
        let var95 = parametric_var(&table, 95.0).unwrap();
        let var99 = parametric_var(&table, 99.0).unwrap();
        assert!(var95 >= 0.0);
        assert!(var99 >= var95, "VaR99 {} < VaR95 {}", var99, var95);
    }

    #[test]
    fn test_expected_gain_floors_at_zero() {
        let report = parametric_var_report(
            &steady_growth(),
            Confidence::new(60.0).unwrap(),
            PortfolioValueBasis::MtmSum,
        )
        .unwrap();
        // mean 0.0833 exceeds z(60%) × std
        assert!(report.raw_var < 0.0);
        assert_eq!(report.var, 0.0);
    }

    #[test]
    fn test_single_date_is_insufficient() {
        let table = TradeTable::from_records(vec![TradeRecord::new("A", 1.0, 0.0, 1.0)
            .with_trade_date(Date::from_ymd(2024, 1, 1).unwrap())]);
        let err = parametric_var(&table, 95.0).unwrap_err();
        assert!(err.is_insufficient_data());
    }

    #[test]
    fn test_confidence_checked_before_data() {
        let err = parametric_var(&TradeTable::default(), 0.0).unwrap_err();
        assert!(err.is_invalid_parameter());
    }
}
