//! Realised/unrealised PnL attribution.

use risk_core::types::{RiskResult, TradeAction, TradeStatus};

use super::mtm::compute_mtm;
use crate::portfolio::TradeTable;

/// Splits an MTM value into `(realized, unrealized)`.
///
/// Exactly one side carries the MTM; the other is 0. Status decides when
/// present (Closed is realised, Open unrealised). Otherwise Sell is
/// realised and Buy or an unknown action is unrealised.
///
/// # Examples
///
/// ```
/// use risk_core::types::{TradeAction, TradeStatus};
/// use risk_engine::valuation::split_pnl;
///
/// assert_eq!(split_pnl(500.0, Some(TradeAction::Buy), None), (0.0, 500.0));
/// assert_eq!(split_pnl(-500.0, Some(TradeAction::Sell), None), (-500.0, 0.0));
/// assert_eq!(
///     split_pnl(40.0, Some(TradeAction::Buy), Some(TradeStatus::Closed)),
///     (40.0, 0.0)
/// );
/// ```
pub fn split_pnl(mtm: f64, action: Option<TradeAction>, status: Option<TradeStatus>) -> (f64, f64) {
    let realized = match status {
        Some(status) => status.is_closed(),
        None => action == Some(TradeAction::Sell),
    };
    if realized {
        (mtm, 0.0)
    } else {
        (0.0, mtm)
    }
}

/// Returns a new table with realised and unrealised PnL populated.
///
/// MTM is computed first if the table has not been valued. PnL values
/// supplied with an upload are replaced.
pub fn compute_pnl(table: &TradeTable) -> RiskResult<TradeTable> {
    let valued = if table.is_valued() {
        table.clone()
    } else {
        compute_mtm(table)?
    };
    let records = valued
        .iter()
        .map(|record| {
            let (realized, unrealized) = split_pnl(record.mtm(), record.action(), record.status());
            let mut attributed = record.clone();
            attributed.set_pnl(realized, unrealized);
            attributed
        })
        .collect();
    Ok(valued.derive_valued(records))
}

/// Portfolio-level MTM and PnL sums.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PnlTotals {
    /// Sum of MTM
    pub mtm: f64,
    /// Sum of realised PnL
    pub realized: f64,
    /// Sum of unrealised PnL
    pub unrealized: f64,
}

impl PnlTotals {
    /// Sums the current values of a table.
    pub fn from_table(table: &TradeTable) -> Self {
        Self {
            mtm: table.total_mtm(),
            realized: table.total_realized_pnl(),
            unrealized: table.total_unrealized_pnl(),
        }
    }
}
