//! Multiplicative market price shocks.

use risk_core::types::{RiskError, RiskResult};

use crate::portfolio::TradeTable;
use crate::valuation::{compute_mtm, mtm_at_price};

/// Portfolio-level outcome of a shock.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShockResult {
    /// Shock in percent
    pub shock_pct: f64,
    /// Sum of MTM before the shock
    pub original_total: f64,
    /// Sum of shocked MTM
    pub shocked_total: f64,
    /// `shocked_total − original_total`
    pub delta: f64,
}

fn validate_shock(shock_pct: f64) -> RiskResult<()> {
    if !shock_pct.is_finite() {
        return Err(RiskError::invalid_parameter(
            "shock",
            format!("must be a finite percentage, got {}", shock_pct),
        ));
    }
    if shock_pct < -100.0 {
        return Err(RiskError::invalid_parameter(
            "shock",
            format!("must be at least -100%, got {}", shock_pct),
        ));
    }
    Ok(())
}

/// Returns a valued table with `shocked_mtm` set on every record.
///
/// Each record is revalued at `market_price × (1 + shock_pct / 100)` with
/// the usual sign convention. Option records valued on premium are not
/// price-sensitive, so their shocked MTM equals their MTM.
///
/// # Errors
/// - `InvalidParameter` for a non-finite shock or one below −100%
/// - `MissingColumns` when the pricing columns are absent
///
/// # Examples
///
/// ```
/// use risk_engine::portfolio::{TradeRecord, TradeTable};
/// use risk_engine::scenarios::apply_shock;
///
/// let table = TradeTable::from_records(vec![TradeRecord::new("A", 100.0, 50.0, 55.0)]);
/// let shocked = apply_shock(&table, -10.0).unwrap();
///
/// let record = &shocked.records()[0];
/// assert_eq!(record.mtm(), 500.0);
/// assert!((record.shocked_mtm().unwrap() + 50.0).abs() < 1e-9);
/// ```
pub fn apply_shock(table: &TradeTable, shock_pct: f64) -> RiskResult<TradeTable> {
    validate_shock(shock_pct)?;
    let valued = compute_mtm(table)?;
    let factor = 1.0 + shock_pct / 100.0;

    let records = valued
        .iter()
        .map(|record| {
            let mut shocked = record.clone();
            shocked.set_shocked_mtm(mtm_at_price(record, record.market_price() * factor));
            shocked
        })
        .collect();
    Ok(valued.derive_valued(records))
}

/// Shocks the table and sums the result.
///
/// # Examples
///
/// ```
/// use risk_engine::portfolio::{TradeRecord, TradeTable};
/// use risk_engine::scenarios::shock_summary;
///
/// let table = TradeTable::from_records(vec![TradeRecord::new("A", 100.0, 50.0, 55.0)]);
/// let result = shock_summary(&table, -10.0).unwrap();
/// assert_eq!(result.original_total, 500.0);
/// assert!((result.delta + 550.0).abs() < 1e-9);
/// ```
pub fn shock_summary(table: &TradeTable, shock_pct: f64) -> RiskResult<ShockResult> {
    let shocked = apply_shock(table, shock_pct)?;
    let original_total = shocked.total_mtm();
    let shocked_total = shocked.total_shocked_mtm().unwrap_or(original_total);
    Ok(ShockResult {
        shock_pct,
        original_total,
        shocked_total,
        delta: shocked_total - original_total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::TradeRecord;
    use approx::assert_relative_eq;
    use risk_core::types::TradeAction;

    fn book() -> TradeTable {
        TradeTable::from_records(vec![
            TradeRecord::new("L", 100.0, 50.0, 55.0).with_action(TradeAction::Buy),
            TradeRecord::new("S", 10.0, 80.0, 75.0).with_action(TradeAction::Sell),
            TradeRecord::new("O", 5.0, 90.0, 0.0)
                .with_instrument_type("Options")
                .with_premium(3.0),
        ])
    }

    #[test]
    fn test_zero_shock_is_identity() {
        let shocked = apply_shock(&book(), 0.0).unwrap();
        for record in &shocked {
            assert_eq!(record.shocked_mtm(), Some(record.mtm()));
        }
    }

    #[test]
    fn test_sell_gains_when_prices_fall() {
        let shocked = apply_shock(&book(), -20.0).unwrap();
        let sell = &shocked.records()[1];
        // -(75*0.8 - 80)*10 = 200
        assert_relative_eq!(sell.shocked_mtm().unwrap(), 200.0, epsilon = 1e-9);
        assert!(sell.shocked_mtm().unwrap() > sell.mtm());
    }

    #[test]
    fn test_option_on_premium_unchanged() {
        let shocked = apply_shock(&book(), 30.0).unwrap();
        let option = &shocked.records()[2];
        assert_eq!(option.mtm(), -15.0);
        assert_eq!(option.shocked_mtm(), Some(-15.0));
    }

    #[test]
    fn test_summary_totals() {
        let result = shock_summary(&book(), 10.0).unwrap();
        // long: (60.5-50)*100 = 1050; short: -(82.5-80)*10 = -25; option: -15
        assert_relative_eq!(result.shocked_total, 1010.0, epsilon = 1e-9);
        assert_relative_eq!(result.original_total, 535.0, epsilon = 1e-9);
        assert_relative_eq!(result.delta, 475.0, epsilon = 1e-9);
    }

    #[test]
    fn test_invalid_shocks() {
        assert!(apply_shock(&book(), f64::NAN).unwrap_err().is_invalid_parameter());
        assert!(apply_shock(&book(), -100.5).unwrap_err().is_invalid_parameter());
        assert!(apply_shock(&book(), -100.0).is_ok());
    }
}
