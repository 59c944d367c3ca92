//! Aggregation by categorical column and by date.

use std::collections::BTreeMap;

use risk_core::types::{Date, RiskError, RiskResult};

use crate::portfolio::{Column, TradeTable};
use crate::valuation::compute_pnl;

/// Label for records without a value in the grouping column.
pub const UNSPECIFIED: &str = "(unspecified)";

/// Sums for one value of a grouping column.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupRow {
    /// Column value
    pub key: String,
    /// Number of trades
    pub trades: usize,
    /// Sum of MTM
    pub mtm: f64,
    /// Sum of realised PnL
    pub realized_pnl: f64,
    /// Sum of unrealised PnL
    pub unrealized_pnl: f64,
}

impl GroupRow {
    fn new(key: String) -> Self {
        Self {
            key,
            trades: 0,
            mtm: 0.0,
            realized_pnl: 0.0,
            unrealized_pnl: 0.0,
        }
    }
}

/// MTM and PnL per distinct value of `column`, in first-seen order.
///
/// # Errors
/// `InvalidParameter` when the column is not categorical or is absent from
/// the table; `MissingColumns` when pricing columns are absent.
///
/// # Examples
///
/// ```
/// use risk_engine::portfolio::{Column, TradeRecord, TradeTable};
/// use risk_engine::reporting::group_summary;
///
/// let table = TradeTable::from_records(vec![
///     TradeRecord::new("A", 1.0, 0.0, 10.0).with_commodity("Gold"),
///     TradeRecord::new("B", 1.0, 0.0, 5.0).with_commodity("Zinc"),
///     TradeRecord::new("C", 1.0, 0.0, 1.0).with_commodity("Gold"),
/// ]);
/// let rows = group_summary(&table, Column::Commodity).unwrap();
///
/// assert_eq!(rows[0].key, "Gold");
/// assert_eq!(rows[0].trades, 2);
/// assert_eq!(rows[0].mtm, 11.0);
/// assert!(group_summary(&table, Column::Counterparty).is_err());
/// ```
pub fn group_summary(table: &TradeTable, column: Column) -> RiskResult<Vec<GroupRow>> {
    if !column.is_groupable() {
        return Err(RiskError::invalid_parameter(
            "group_by",
            format!("'{}' is not a categorical column", column),
        ));
    }
    table.capabilities().require(&[column], "grouping")?;
    let attributed = compute_pnl(table)?;

    let mut rows: Vec<GroupRow> = Vec::new();
    let mut index: BTreeMap<String, usize> = BTreeMap::new();
    for record in &attributed {
        let key = record
            .text_value(column)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| UNSPECIFIED.to_string());
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            rows.push(GroupRow::new(key));
            rows.len() - 1
        });
        let row = &mut rows[slot];
        row.trades += 1;
        row.mtm += record.mtm();
        row.realized_pnl += record.realized_pnl();
        row.unrealized_pnl += record.unrealized_pnl();
    }
    Ok(rows)
}

/// Group rows sorted by MTM, largest first.
pub fn drilldown(table: &TradeTable, column: Column) -> RiskResult<Vec<GroupRow>> {
    let mut rows = group_summary(table, column)?;
    rows.sort_by(|a, b| b.mtm.total_cmp(&a.mtm));
    Ok(rows)
}

/// MTM on one trade date.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrendPoint {
    /// Trade date
    pub date: Date,
    /// Sum of MTM of trades on the date
    pub mtm: f64,
    /// Number of trades
    pub trades: usize,
}

/// MTM per trade date in ascending date order.
///
/// Undated records are left out.
///
/// # Errors
/// `InvalidParameter` when the table has no Trade Date column.
pub fn daily_mtm_trend(table: &TradeTable) -> RiskResult<Vec<TrendPoint>> {
    table.capabilities().require(&[Column::TradeDate], "MTM trend")?;
    let attributed = compute_pnl(table)?;

    let mut by_date: BTreeMap<Date, (f64, usize)> = BTreeMap::new();
    for record in &attributed {
        if let Some(date) = record.trade_date() {
            let entry = by_date.entry(date).or_insert((0.0, 0));
            entry.0 += record.mtm();
            entry.1 += 1;
        }
    }
    Ok(by_date
        .into_iter()
        .map(|(date, (mtm, trades))| TrendPoint { date, mtm, trades })
        .collect())
}
