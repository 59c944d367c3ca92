//! Rolling volatility of daily returns.

use risk_core::math::rolling_std;
use risk_core::types::{RiskError, RiskResult};

use super::returns::{ReturnSeries, SeriesKey, MIN_OBSERVATIONS};
use crate::portfolio::TradeTable;

/// Sample standard deviation of returns over a trailing window.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct VolatilityPoint {
    /// Date or record of the point
    pub key: SeriesKey,
    /// Daily return at the point
    pub daily_return: f64,
    /// Volatility over the window ending here; `None` before a full window
    pub volatility: Option<f64>,
}

/// Rolling volatility series.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RollingVolatility {
    /// Window length in observations
    pub window: usize,
    /// One entry per series point
    pub points: Vec<VolatilityPoint>,
}

impl RollingVolatility {
    /// Most recent defined volatility.
    pub fn latest(&self) -> Option<f64> {
        self.points.iter().rev().find_map(|p| p.volatility)
    }
}

/// Rolling standard deviation of the table's daily returns.
///
/// # Errors
/// - `InvalidParameter` when `window < 2`
/// - `InsufficientData` with fewer than two series points
///
/// # Examples
///
/// ```
/// use risk_engine::portfolio::{TradeRecord, TradeTable};
/// use risk_engine::var::rolling_volatility;
///
/// let table = TradeTable::from_records(vec![
///     TradeRecord::new("A", 1.0, 0.0, 100.0),
///     TradeRecord::new("B", 1.0, 0.0, 110.0),
///     TradeRecord::new("C", 1.0, 0.0, 99.0),
/// ]);
/// let vol = rolling_volatility(&table, 2).unwrap();
/// assert!(vol.points[0].volatility.is_none());
/// assert!(vol.latest().unwrap() > 0.0);
/// ```
pub fn rolling_volatility(table: &TradeTable, window: usize) -> RiskResult<RollingVolatility> {
    if window < MIN_OBSERVATIONS {
        return Err(RiskError::invalid_parameter(
            "window",
            format!("must be at least {}, got {}", MIN_OBSERVATIONS, window),
        ));
    }
    let series = ReturnSeries::from_table(table)?;
    series.require_observations("rolling volatility")?;

    let stds = rolling_std(&series.returns(), window);
    let points = series
        .points()
        .iter()
        .zip(stds)
        .map(|(point, volatility)| VolatilityPoint {
            key: point.key.clone(),
            daily_return: point.daily_return,
            volatility,
        })
        .collect();

    Ok(RollingVolatility { window, points })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::TradeRecord;
    use approx::assert_relative_eq;

    fn series_table(mtms: &[f64]) -> TradeTable {
        TradeTable::from_records(
            mtms.iter()
                .enumerate()
                .map(|(i, m)| TradeRecord::new(format!("T{}", i), 1.0, 0.0, *m))
                .collect(),
        )
    }

    #[test]
    fn test_constant_returns_have_zero_volatility() {
        let vol = rolling_volatility(&series_table(&[100.0, 110.0, 121.0, 133.1]), 2).unwrap();
        assert_eq!(vol.points.len(), 4);
        // returns 0, .1, .1, .1
        assert_relative_eq!(vol.points[3].volatility.unwrap(), 0.0, epsilon = 1e-12);
        assert!(vol.points[1].volatility.unwrap() > 0.0);
    }

    #[test]
    fn test_window_longer_than_series_leaves_all_undefined() {
        let vol = rolling_volatility(&series_table(&[1.0, 2.0]), 5).unwrap();
        assert!(vol.points.iter().all(|p| p.volatility.is_none()));
        assert_eq!(vol.latest(), None);
    }

    #[test]
    fn test_invalid_window() {
        let err = rolling_volatility(&series_table(&[1.0, 2.0]), 1).unwrap_err();
        assert!(err.is_invalid_parameter());
    }

    #[test]
    fn test_single_point_is_insufficient() {
        let err = rolling_volatility(&series_table(&[1.0]), 2).unwrap_err();
        assert!(err.is_insufficient_data());
    }
}
