//! # risk_core: Foundation for the Trade Risk Engine
//!
//! ## Layer Role
//!
//! risk_core is the bottom layer of the workspace, providing:
//! - Date type with lenient parsing for uploaded trade files (`types::time`)
//! - Trade direction and lifecycle enums (`types::trade`)
//! - Error taxonomy: `RiskError`, `DateError` (`types::error`)
//! - Generic numeric helpers: normal distribution, sample statistics,
//!   percentiles and percentage changes (`math`)
//!
//! ## Zero Dependency Principle
//!
//! This crate has no dependencies on other workspace crates, with minimal
//! external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - chrono: Date arithmetic
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use risk_core::math::distributions::norm_inv;
//! use risk_core::types::{Date, TradeAction};
//!
//! let date = Date::parse_lenient("15/06/2024").unwrap();
//! assert_eq!(date, Date::from_ymd(2024, 6, 15).unwrap());
//!
//! let action: TradeAction = "SELL".parse().unwrap();
//! assert_eq!(action, TradeAction::Sell);
//!
//! let z = norm_inv(0.95_f64);
//! assert!((z - 1.6448536).abs() < 1e-6);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for `Date`, `TradeAction` and `TradeStatus`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
