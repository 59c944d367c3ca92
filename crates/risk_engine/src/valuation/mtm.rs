//! Mark-to-market calculator.

use risk_core::types::{RiskResult, TradeAction};

use crate::portfolio::{TradeRecord, TradeTable};

/// MTM of a record at an arbitrary market price.
///
/// Standard instruments: `(market_price − book_price) × quantity`, negated
/// for Sell. Options carrying a premium: `quantity × premium`, positive for
/// Sell (premium received) and negative otherwise (premium paid); the
/// market price does not enter. An option row without a premium falls
/// back to the standard formula.
///
/// # Examples
///
/// ```
/// use risk_core::types::TradeAction;
/// use risk_engine::portfolio::TradeRecord;
/// use risk_engine::valuation::mtm_at_price;
///
/// let sell = TradeRecord::new("T1", 100.0, 50.0, 55.0).with_action(TradeAction::Sell);
/// assert_eq!(mtm_at_price(&sell, 55.0), -500.0);
/// assert_eq!(mtm_at_price(&sell, 45.0), 500.0);
/// ```
pub fn mtm_at_price(record: &TradeRecord, market_price: f64) -> f64 {
    let is_sell = record.action() == Some(TradeAction::Sell);
    if record.is_option() {
        if let Some(premium) = record.premium() {
            let outlay = record.quantity() * premium;
            return if is_sell { outlay } else { -outlay };
        }
    }
    let difference = (market_price - record.book_price()) * record.quantity();
    if is_sell {
        -difference
    } else {
        difference
    }
}

/// MTM of a record at its own market price.
///
/// # Examples
///
/// ```
/// use risk_core::types::TradeAction;
/// use risk_engine::portfolio::TradeRecord;
/// use risk_engine::valuation::trade_mtm;
///
/// let buy = TradeRecord::new("T1", 100.0, 50.0, 55.0).with_action(TradeAction::Buy);
/// assert_eq!(trade_mtm(&buy), 500.0);
///
/// let long_call = TradeRecord::new("T2", 10.0, 2400.0, 0.0)
///     .with_instrument_type("Options")
///     .with_premium(12.0);
/// assert_eq!(trade_mtm(&long_call), -120.0);
/// ```
#[inline]
pub fn trade_mtm(record: &TradeRecord) -> f64 {
    mtm_at_price(record, record.market_price())
}

/// Returns a new table with `mtm` populated on every record.
///
/// Any MTM already on the records is recomputed from prices, so calling
/// this twice yields the same values.
///
/// # Errors
/// `MissingColumns` when the table lacks Market Price, Book Price or
/// Quantity.
pub fn compute_mtm(table: &TradeTable) -> RiskResult<TradeTable> {
    table.require_pricing()?;
    let records = table
        .iter()
        .map(|record| {
            let mut valued = record.clone();
            valued.set_mtm(trade_mtm(record));
            valued
        })
        .collect();
    Ok(table.derive_valued(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::{Capabilities, Column};
    use approx::assert_relative_eq;

    #[test]
    fn test_buy_and_sell_are_mirrored() {
        let buy = TradeRecord::new("A", 100.0, 50.0, 55.0).with_action(TradeAction::Buy);
        let sell = TradeRecord::new("B", 100.0, 50.0, 55.0).with_action(TradeAction::Sell);
        assert_relative_eq!(trade_mtm(&buy), 500.0);
        assert_relative_eq!(trade_mtm(&sell), -500.0);
    }

    #[test]
    fn test_missing_action_valued_as_buy() {
        let record = TradeRecord::new("A", 2.0, 10.0, 7.5);
        assert_relative_eq!(trade_mtm(&record), -5.0);
    }

    #[test]
    fn test_option_premium_signs() {
        let short_put = TradeRecord::new("P", 10.0, 100.0, 0.0)
            .with_instrument_type("Options")
            .with_action(TradeAction::Sell)
            .with_premium(3.0);
        assert_relative_eq!(trade_mtm(&short_put), 30.0);

        let long_put = short_put.clone().with_action(TradeAction::Buy);
        assert_relative_eq!(trade_mtm(&long_put), -30.0);
    }

    #[test]
    fn test_option_without_premium_uses_prices() {
        let record = TradeRecord::new("O", 10.0, 5.0, 6.0).with_instrument_type("Options");
        assert_relative_eq!(trade_mtm(&record), 10.0);
    }

    #[test]
    fn test_compute_mtm_is_idempotent() {
        let table = TradeTable::from_records(vec![
            TradeRecord::new("A", 100.0, 50.0, 55.0),
            TradeRecord::new("B", 3.0, 10.0, 9.0).with_action(TradeAction::Sell),
        ]);
        let once = compute_mtm(&table).unwrap();
        let twice = compute_mtm(&once).unwrap();
        assert_eq!(once, twice);
        assert!(once.is_valued());
        assert_relative_eq!(once.total_mtm(), 503.0);
        // input untouched
        assert_eq!(table.total_mtm(), 0.0);
    }

    #[test]
    fn test_compute_mtm_requires_pricing_columns() {
        let table = TradeTable::new(
            vec![TradeRecord::new("A", 1.0, 1.0, 1.0)],
            Capabilities::from_columns([Column::MarketPrice]),
        );
        let err = compute_mtm(&table).unwrap_err();
        assert!(err.is_validation());
    }
}
