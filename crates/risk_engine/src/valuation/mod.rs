//! Mark-to-market valuation and PnL attribution.
//!
//! Sign convention: MTM is P&L from the holder's perspective. A Sell
//! trade gains when the market falls, so its price difference is negated.
//! Records with no trade action are valued as Buy.

pub mod mtm;
pub mod pnl;

pub use mtm::{compute_mtm, mtm_at_price, trade_mtm};
pub use pnl::{compute_pnl, split_pnl, PnlTotals};
