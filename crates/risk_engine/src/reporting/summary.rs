//! Portfolio-level summary figures.

use std::collections::BTreeSet;

use risk_core::math::percentile_linear;
use risk_core::types::{RiskError, RiskResult};

use crate::portfolio::{TradeRecord, TradeTable};
use crate::valuation::compute_pnl;

/// Headline figures of a portfolio.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PortfolioSummary {
    /// Number of trades
    pub trade_count: usize,
    /// Sum of MTM
    pub total_mtm: f64,
    /// Mean MTM per trade; 0 for an empty table
    pub average_mtm: f64,
    /// Sum of realised PnL
    pub total_realized_pnl: f64,
    /// Sum of unrealised PnL
    pub total_unrealized_pnl: f64,
    /// Sum of `quantity × book_price`
    pub total_notional: f64,
    /// Distinct instrument types
    pub instrument_types: usize,
    /// Distinct commodities
    pub commodities: usize,
}

impl PortfolioSummary {
    /// Values and attributes the table, then summarises it.
    ///
    /// # Errors
    /// `MissingColumns` when the pricing columns are absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use risk_core::types::TradeAction;
    /// use risk_engine::portfolio::{TradeRecord, TradeTable};
    /// use risk_engine::reporting::PortfolioSummary;
    ///
    /// let table = TradeTable::from_records(vec![
    ///     TradeRecord::new("A", 100.0, 50.0, 55.0).with_commodity("Gold"),
    ///     TradeRecord::new("B", 100.0, 50.0, 55.0)
    ///         .with_commodity("Gold")
    ///         .with_action(TradeAction::Sell),
    /// ]);
    /// let summary = PortfolioSummary::from_table(&table).unwrap();
    ///
    /// assert_eq!(summary.trade_count, 2);
    /// assert_eq!(summary.total_mtm, 0.0);
    /// assert_eq!(summary.total_realized_pnl, -500.0);
    /// assert_eq!(summary.commodities, 1);
    /// ```
    pub fn from_table(table: &TradeTable) -> RiskResult<Self> {
        let attributed = compute_pnl(table)?;
        let trade_count = attributed.len();
        let total_mtm = attributed.total_mtm();
        let average_mtm = if trade_count == 0 {
            0.0
        } else {
            total_mtm / trade_count as f64
        };

        Ok(Self {
            trade_count,
            total_mtm,
            average_mtm,
            total_realized_pnl: attributed.total_realized_pnl(),
            total_unrealized_pnl: attributed.total_unrealized_pnl(),
            total_notional: attributed.total_notional(),
            instrument_types: distinct(&attributed, TradeRecord::instrument_type),
            commodities: distinct(&attributed, TradeRecord::commodity),
        })
    }
}

fn distinct<'a, F>(table: &'a TradeTable, field: F) -> usize
where
    F: Fn(&'a TradeRecord) -> Option<&'a str>,
{
    table.iter().filter_map(field).collect::<BTreeSet<_>>().len()
}

/// Records with the largest MTM, best first.
///
/// # Errors
/// `MissingColumns` when the pricing columns are absent.
pub fn top_by_mtm(table: &TradeTable, n: usize) -> RiskResult<Vec<TradeRecord>> {
    let attributed = compute_pnl(table)?;
    let mut records = attributed.records().to_vec();
    records.sort_by(|a, b| b.mtm().total_cmp(&a.mtm()));
    records.truncate(n);
    Ok(records)
}

/// Linear-interpolated percentiles of the per-record MTM distribution.
///
/// Returns one `(percentile, mtm)` pair per requested percentile.
///
/// # Errors
/// - `InsufficientData` with fewer than two records
/// - `InvalidParameter` for a percentile outside [0, 100]
///
/// # Examples
///
/// ```
/// use risk_engine::portfolio::{TradeRecord, TradeTable};
/// use risk_engine::reporting::mtm_quantiles;
///
/// let table = TradeTable::from_records(vec![
///     TradeRecord::new("A", 1.0, 0.0, 10.0),
///     TradeRecord::new("B", 1.0, 0.0, 20.0),
///     TradeRecord::new("C", 1.0, 0.0, 30.0),
/// ]);
/// let q = mtm_quantiles(&table, &[0.0, 50.0, 75.0]).unwrap();
/// assert_eq!(q, vec![(0.0, 10.0), (50.0, 20.0), (75.0, 25.0)]);
/// ```
pub fn mtm_quantiles(table: &TradeTable, percentiles: &[f64]) -> RiskResult<Vec<(f64, f64)>> {
    let attributed = compute_pnl(table)?;
    if attributed.len() < 2 {
        return Err(RiskError::insufficient_data(
            "MTM distribution",
            attributed.len(),
            2,
        ));
    }
    let mtms: Vec<f64> = attributed.iter().map(TradeRecord::mtm).collect();
    percentiles
        .iter()
        .map(|&p| {
            percentile_linear(&mtms, p).map(|v| (p, v)).ok_or_else(|| {
                RiskError::invalid_parameter(
                    "percentile",
                    format!("must be between 0 and 100, got {}", p),
                )
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample() -> TradeTable {
        TradeTable::from_records(vec![
            TradeRecord::new("A", 10.0, 100.0, 110.0)
                .with_commodity("Gold")
                .with_instrument_type("Futures"),
            TradeRecord::new("B", 5.0, 20.0, 18.0)
                .with_commodity("Silver")
                .with_instrument_type("Futures"),
            TradeRecord::new("C", 2.0, 40.0, 45.0)
                .with_commodity("gold")
                .with_instrument_type("Swaps"),
        ])
    }

    #[test]
    fn test_summary_figures() {
        let summary = PortfolioSummary::from_table(&sample()).unwrap();
        // 100 - 10 + 10
        assert_relative_eq!(summary.total_mtm, 100.0);
        assert_relative_eq!(summary.average_mtm, 100.0 / 3.0);
        assert_relative_eq!(summary.total_unrealized_pnl, 100.0);
        assert_relative_eq!(summary.total_notional, 1_180.0);
        assert_eq!(summary.instrument_types, 2);
        // distinct values are case-sensitive
        assert_eq!(summary.commodities, 3);
    }

    #[test]
    fn test_empty_summary() {
        let summary = PortfolioSummary::from_table(&TradeTable::from_records(vec![])).unwrap();
        assert_eq!(summary.trade_count, 0);
        assert_eq!(summary.average_mtm, 0.0);
    }

    #[test]
    fn test_top_by_mtm() {
        let top = top_by_mtm(&sample(), 2).unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].trade_id().as_str(), "A");
        assert_eq!(top[1].trade_id().as_str(), "C");
    }

    #[test]
    fn test_quantiles_need_two_records() {
        let table = TradeTable::from_records(vec![TradeRecord::new("A", 1.0, 0.0, 1.0)]);
        assert!(mtm_quantiles(&table, &[50.0]).unwrap_err().is_insufficient_data());
    }

    #[test]
    fn test_quantile_out_of_range() {
        assert!(mtm_quantiles(&sample(), &[101.0]).unwrap_err().is_invalid_parameter());
    }
}
