//! Aggregated MTM series and daily returns.
//!
//! When records carry trade dates the series has one point per distinct
//! date (MTM summed, ascending date order). Undated records in such a
//! table are left out and counted. A table with no dates at all yields one
//! point per record in insertion order.

use std::collections::BTreeMap;
use std::fmt;

use risk_core::math::pct_change;
use risk_core::types::{Date, RiskError, RiskResult};

use crate::portfolio::{TradeId, TradeTable};
use crate::valuation::compute_mtm;

/// Minimum number of points for any return-based measure.
pub const MIN_OBSERVATIONS: usize = 2;

/// Position of a point in a return series.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SeriesKey {
    /// Aggregated trading day
    Date(Date),
    /// Single record of an undated table
    Record(TradeId),
}

impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(date) => write!(f, "{}", date),
            Self::Record(id) => write!(f, "{}", id),
        }
    }
}

/// One point of the aggregated series.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeriesPoint {
    /// Date or record the point represents
    pub key: SeriesKey,
    /// Aggregated MTM
    pub mtm: f64,
    /// Fractional change from the previous point (0 for the first)
    pub daily_return: f64,
    /// Records aggregated into the point
    pub trades: usize,
}

/// Aggregated MTM series with daily returns.
///
/// # Examples
///
/// ```
/// use risk_core::types::Date;
/// use risk_engine::portfolio::{TradeRecord, TradeTable};
/// use risk_engine::var::ReturnSeries;
///
/// let table = TradeTable::from_records(vec![
///     TradeRecord::new("A", 100.0, 0.0, 10.0).with_trade_date(Date::from_ymd(2024, 1, 1).unwrap()),
///     TradeRecord::new("B", 100.0, 0.0, 11.0).with_trade_date(Date::from_ymd(2024, 1, 2).unwrap()),
/// ]);
/// let series = ReturnSeries::from_table(&table).unwrap();
///
/// assert_eq!(series.mtm_values(), vec![1000.0, 1100.0]);
/// assert_eq!(series.returns()[0], 0.0);
/// assert!((series.returns()[1] - 0.1).abs() < 1e-12);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReturnSeries {
    points: Vec<SeriesPoint>,
    excluded_undated: usize,
}

impl ReturnSeries {
    /// Values the table and builds its series.
    ///
    /// # Errors
    /// `MissingColumns` when the pricing columns are absent.
    pub fn from_table(table: &TradeTable) -> RiskResult<Self> {
        let valued = if table.is_valued() {
            table.clone()
        } else {
            compute_mtm(table)?
        };
        Ok(Self::from_valued(&valued))
    }

    /// Builds the series from MTM already on the records.
    pub fn from_valued(table: &TradeTable) -> Self {
        let dated = table.iter().any(|r| r.trade_date().is_some());

        let (keys, values, counts, excluded_undated) = if dated {
            let mut by_date: BTreeMap<Date, (f64, usize)> = BTreeMap::new();
            let mut excluded = 0;
            for record in table {
                match record.trade_date() {
                    Some(date) => {
                        let entry = by_date.entry(date).or_insert((0.0, 0));
                        entry.0 += record.mtm();
                        entry.1 += 1;
                    }
                    None => excluded += 1,
                }
            }
            let mut keys = Vec::with_capacity(by_date.len());
            let mut values = Vec::with_capacity(by_date.len());
            let mut counts = Vec::with_capacity(by_date.len());
            for (date, (mtm, count)) in by_date {
                keys.push(SeriesKey::Date(date));
                values.push(mtm);
                counts.push(count);
            }
            (keys, values, counts, excluded)
        } else {
            let keys = table
                .iter()
                .map(|r| SeriesKey::Record(r.trade_id().clone()))
                .collect();
            let values = table.iter().map(|r| r.mtm()).collect();
            (keys, values, vec![1; table.len()], 0)
        };

        let returns = pct_change(&values);
        let points = keys
            .into_iter()
            .zip(values)
            .zip(returns)
            .zip(counts)
            .map(|(((key, mtm), daily_return), trades)| SeriesPoint {
                key,
                mtm,
                daily_return,
                trades,
            })
            .collect();

        Self {
            points,
            excluded_undated,
        }
    }

    /// Points in series order.
    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true for an empty series.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns true when points are per date rather than per record.
    pub fn is_dated(&self) -> bool {
        matches!(self.points.first().map(|p| &p.key), Some(SeriesKey::Date(_)))
    }

    /// Undated records left out of a dated series.
    pub fn excluded_undated(&self) -> usize {
        self.excluded_undated
    }

    /// Aggregated MTM per point.
    pub fn mtm_values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.mtm).collect()
    }

    /// Daily returns per point.
    pub fn returns(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.daily_return).collect()
    }

    /// Aggregated MTM of the final point.
    pub fn last_mtm(&self) -> Option<f64> {
        self.points.last().map(|p| p.mtm)
    }

    /// Fails with `InsufficientData` when the series is too short.
    pub fn require_observations(&self, context: &str) -> RiskResult<()> {
        if self.len() < MIN_OBSERVATIONS {
            return Err(RiskError::insufficient_data(
                context,
                self.len(),
                MIN_OBSERVATIONS,
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::TradeRecord;
    use approx::assert_relative_eq;

    fn day(d: u32) -> Date {
        Date::from_ymd(2024, 3, d).unwrap()
    }

    #[test]
    fn test_same_day_records_are_summed() {
        let table = TradeTable::from_records(vec![
            TradeRecord::new("A", 1.0, 0.0, 600.0).with_trade_date(day(2)),
            TradeRecord::new("B", 1.0, 0.0, 400.0).with_trade_date(day(2)),
            TradeRecord::new("C", 1.0, 0.0, 1200.0).with_trade_date(day(3)),
        ]);
        let series = ReturnSeries::from_table(&table).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.points()[0].trades, 2);
        assert_eq!(series.mtm_values(), vec![1000.0, 1200.0]);
        assert_relative_eq!(series.returns()[1], 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_dates_sorted_ascending() {
        let table = TradeTable::from_records(vec![
            TradeRecord::new("late", 1.0, 0.0, 2.0).with_trade_date(day(9)),
            TradeRecord::new("early", 1.0, 0.0, 1.0).with_trade_date(day(1)),
        ]);
        let series = ReturnSeries::from_table(&table).unwrap();
        assert_eq!(series.points()[0].key, SeriesKey::Date(day(1)));
        assert_eq!(series.last_mtm(), Some(2.0));
    }

    #[test]
    fn test_undated_records_excluded_from_dated_series() {
        let table = TradeTable::from_records(vec![
            TradeRecord::new("A", 1.0, 0.0, 1.0).with_trade_date(day(1)),
            TradeRecord::new("B", 1.0, 0.0, 1.0),
        ]);
        let series = ReturnSeries::from_table(&table).unwrap();
        assert!(series.is_dated());
        assert_eq!(series.len(), 1);
        assert_eq!(series.excluded_undated(), 1);
    }

    #[test]
    fn test_undated_table_uses_record_order() {
        let table = TradeTable::from_records(vec![
            TradeRecord::new("A", 1.0, 0.0, 10.0),
            TradeRecord::new("B", 1.0, 0.0, 5.0),
        ]);
        let series = ReturnSeries::from_table(&table).unwrap();
        assert!(!series.is_dated());
        assert_eq!(series.points()[1].key, SeriesKey::Record(TradeId::new("B")));
        assert_relative_eq!(series.returns()[1], -0.5);
    }

    #[test]
    fn test_require_observations() {
        let table = TradeTable::from_records(vec![
            TradeRecord::new("A", 1.0, 0.0, 1.0).with_trade_date(day(1)),
            TradeRecord::new("B", 1.0, 0.0, 1.0).with_trade_date(day(1)),
        ]);
        let series = ReturnSeries::from_table(&table).unwrap();
        let err = series.require_observations("parametric VaR").unwrap_err();
        assert_eq!(err, RiskError::insufficient_data("parametric VaR", 1, 2));
    }
}
