//! Property-based tests for the engine invariants.

use proptest::prelude::*;
use risk_core::types::{Date, TradeAction, TradeStatus};
use risk_engine::portfolio::{filter_table, TradeFilter, TradeRecord, TradeTable};
use risk_engine::scenarios::apply_shock;
use risk_engine::valuation::{compute_mtm, compute_pnl};
use risk_engine::var::{historical_var, parametric_var_report, Confidence, PortfolioValueBasis};

fn arb_record() -> impl Strategy<Value = TradeRecord> {
    (
        0.0_f64..1_000.0,
        0.0_f64..500.0,
        0.0_f64..500.0,
        prop::option::of(prop::bool::ANY),
        prop::option::of(prop::bool::ANY),
        0_u32..20,
    )
        .prop_map(|(qty, book, market, sell, closed, day)| {
            let mut record = TradeRecord::new("T", qty, book, market)
                .with_trade_date(Date::from_ymd(2024, 3, day + 1).unwrap());
            if let Some(sell) = sell {
                record = record.with_action(if sell {
                    TradeAction::Sell
                } else {
                    TradeAction::Buy
                });
            }
            if let Some(closed) = closed {
                record = record.with_status(if closed {
                    TradeStatus::Closed
                } else {
                    TradeStatus::Open
                });
            }
            record
        })
}

fn arb_table() -> impl Strategy<Value = TradeTable> {
    prop::collection::vec(arb_record(), 0..40).prop_map(TradeTable::from_records)
}

proptest! {
    #[test]
    fn pnl_split_sums_to_mtm(table in arb_table()) {
        let attributed = compute_pnl(&table).unwrap();
        for record in &attributed {
            prop_assert!((record.realized_pnl() + record.unrealized_pnl() - record.mtm()).abs() < 1e-9);
            prop_assert!(record.realized_pnl() == 0.0 || record.unrealized_pnl() == 0.0);
        }
    }

    #[test]
    fn always_filter_keeps_every_record(table in arb_table()) {
        let filtered = filter_table(&table, &TradeFilter::always()).unwrap();
        prop_assert_eq!(filtered.records(), table.records());
    }

    #[test]
    fn mtm_is_idempotent(table in arb_table()) {
        let once = compute_mtm(&table).unwrap();
        let twice = compute_mtm(&once).unwrap();
        prop_assert_eq!(once.records(), twice.records());
    }

    #[test]
    fn parametric_var_grows_with_confidence(
        table in arb_table(),
        lo in 50.0_f64..90.0,
        step in 1.0_f64..9.0,
    ) {
        let low = parametric_var_report(&table, Confidence::new(lo).unwrap(), PortfolioValueBasis::MtmSum);
        let high = parametric_var_report(&table, Confidence::new(lo + step).unwrap(), PortfolioValueBasis::MtmSum);
        if let (Ok(low), Ok(high)) = (low, high) {
            prop_assert!(low.var >= 0.0);
            prop_assert!(high.var + 1e-9 >= low.var);
        }
    }

    #[test]
    fn historical_var_grows_with_confidence(
        table in arb_table(),
        lo in 50.0_f64..90.0,
        step in 1.0_f64..9.0,
    ) {
        let low = historical_var(&table, lo, None, None);
        let high = historical_var(&table, lo + step, None, None);
        if let (Ok(low), Ok(high)) = (low, high) {
            prop_assert!(high + 1e-9 * low.max(1.0) >= low);
        }
    }

    #[test]
    fn zero_shock_leaves_mtm_unchanged(table in arb_table()) {
        let shocked = apply_shock(&table, 0.0).unwrap();
        for record in &shocked {
            prop_assert_eq!(record.shocked_mtm(), Some(record.mtm()));
        }
    }

    #[test]
    fn historical_var_is_non_negative(table in arb_table(), c in 1.0_f64..99.0) {
        if let Ok(var) = historical_var(&table, c, None, None) {
            prop_assert!(var >= 0.0);
        }
    }
}
