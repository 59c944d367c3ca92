//! Historical (empirical percentile) VaR.
//!
//! ```text
//! HistVaR = −percentile(returns, 100 − c) × X
//! ```
//!
//! The reported figure is `max(−percentile, 0) × |X|`: a tail return that
//! is still a gain gives zero VaR.
//!
//! The percentile interpolates linearly between order statistics. An
//! optional filter is applied to the table before returns are built, and
//! an optional lookback window restricts the calculation to the trailing
//! `w` observations while also producing a rolling VaR per series point.

use std::cmp::Ordering;

use risk_core::math::{percentile_sorted, rolling_apply};
use risk_core::types::{RiskError, RiskResult};

use super::config::{Confidence, PortfolioValueBasis};
use super::returns::{ReturnSeries, SeriesKey, MIN_OBSERVATIONS};
use crate::portfolio::{filter_table, TradePredicate, TradeTable};
use crate::valuation::compute_mtm;

const CONTEXT: &str = "historical VaR";

/// Rolling VaR at one series point; `None` until a full window is available.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RollingVarPoint {
    /// Date or record of the point
    pub key: SeriesKey,
    /// VaR over the trailing window ending at this point
    pub var: Option<f64>,
}

/// Historical VaR together with the return distribution behind it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HistoricalVar {
    /// Confidence level used
    pub confidence: Confidence,
    /// Percentile taken from the return distribution, `100 − c`
    pub percentile: f64,
    /// Return at that percentile
    pub percentile_return: f64,
    /// Basis for the portfolio value
    pub basis: PortfolioValueBasis,
    /// Portfolio value `X`
    pub portfolio_value: f64,
    /// Signed result of the formula
    pub raw_var: f64,
    /// Reported VaR, `max(−percentile_return, 0) × |X|`
    pub var: f64,
    /// Returns used for the headline figure, ascending
    pub sorted_returns: Vec<f64>,
    /// Lookback window, if any
    pub window: Option<usize>,
    /// Per-point rolling VaR when a window is given
    pub rolling: Option<Vec<RollingVarPoint>>,
}

/// Historical VaR with the default (MTM sum) portfolio value basis.
///
/// With a window, the figure covers only the trailing `window` returns.
///
/// # Errors
/// - `InvalidParameter` for a confidence outside (0, 100), a window below
///   2, or a filter on a column the table lacks
/// - `InsufficientData` with fewer than two observations after filtering,
///   or fewer observations than the window
///
/// # Examples
///
/// ```
/// use risk_core::types::Date;
/// use risk_engine::portfolio::{Column, TradeFilter, TradeRecord, TradeTable};
/// use risk_engine::var::historical_var;
///
/// let d = |day| Date::from_ymd(2024, 1, day).unwrap();
/// let table = TradeTable::from_records(vec![
///     TradeRecord::new("A", 100.0, 0.0, 10.0).with_trade_date(d(1)).with_commodity("Gold"),
///     TradeRecord::new("B", 100.0, 0.0, 11.0).with_trade_date(d(2)).with_commodity("Gold"),
///     TradeRecord::new("C", 1.0, 0.0, 5.0).with_trade_date(d(3)).with_commodity("Zinc"),
/// ]);
///
/// let gold = TradeFilter::equals(Column::Commodity, "gold");
/// let var = historical_var(&table, 95.0, Some(&gold), None).unwrap();
/// assert!((var - 10.5).abs() < 1e-9);
/// ```
pub fn historical_var(
    table: &TradeTable,
    confidence: f64,
    filter: Option<&dyn TradePredicate>,
    window: Option<usize>,
) -> RiskResult<f64> {
    let confidence = Confidence::new(confidence)?;
    historical_var_report(table, confidence, PortfolioValueBasis::default(), filter, window)
        .map(|r| r.var)
}

/// Historical VaR with full detail and an explicit value basis.
///
/// For the `LastMtm` basis each rolling point is scaled by its own
/// aggregated MTM; the other bases use the portfolio-wide value.
pub fn historical_var_report(
    table: &TradeTable,
    confidence: Confidence,
    basis: PortfolioValueBasis,
    filter: Option<&dyn TradePredicate>,
    window: Option<usize>,
) -> RiskResult<HistoricalVar> {
    if let Some(w) = window {
        if w < MIN_OBSERVATIONS {
            return Err(RiskError::invalid_parameter(
                "window",
                format!("must be at least {}, got {}", MIN_OBSERVATIONS, w),
            ));
        }
    }

    let subset = match filter {
        Some(predicate) => filter_table(table, predicate)?,
        None => table.clone(),
    };
    let valued = compute_mtm(&subset)?;
    let series = ReturnSeries::from_valued(&valued);
    series.require_observations(CONTEXT)?;

    let returns = series.returns();
    let percentile = confidence.tail_percent();
    let portfolio_value = basis.value(&valued, &series);

    let (used, rolling) = match window {
        None => (returns.as_slice(), None),
        Some(w) => {
            if returns.len() < w {
                return Err(RiskError::insufficient_data(
                    format!("{} over a {}-point window", CONTEXT, w),
                    returns.len(),
                    w,
                ));
            }
            let values = rolling_apply(&returns, w, |trailing| {
                percentile_sorted(&sorted(trailing), percentile)
            });
            let points = series
                .points()
                .iter()
                .zip(values)
                .map(|(point, p)| {
                    let scale = match basis {
                        PortfolioValueBasis::LastMtm => point.mtm,
                        _ => portfolio_value,
                    };
                    RollingVarPoint {
                        key: point.key.clone(),
                        var: p.map(|p| reported_var(p, scale)),
                    }
                })
                .collect();
            (&returns[returns.len() - w..], Some(points))
        }
    };

    let sorted_returns = sorted(used);
    let percentile_return = percentile_sorted(&sorted_returns, percentile)
        .ok_or_else(|| RiskError::insufficient_data(CONTEXT, 0, MIN_OBSERVATIONS))?;
    let raw_var = -percentile_return * portfolio_value;

    Ok(HistoricalVar {
        confidence,
        percentile,
        percentile_return,
        basis,
        portfolio_value,
        raw_var,
        var: reported_var(percentile_return, portfolio_value),
        sorted_returns,
        window,
        rolling,
    })
}

fn reported_var(percentile_return: f64, portfolio_value: f64) -> f64 {
    (-percentile_return).max(0.0) * portfolio_value.abs()
}

fn sorted(values: &[f64]) -> Vec<f64> {
    let mut out = values.to_vec();
    out.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    out
}
