//! Stress testing: price shocks, presets and the scenario engine.
//!
//! - `shock`: [`apply_shock`] and [`shock_summary`] for a single move
//! - `presets`: named market moves
//! - `engine`: runs several scenarios and reports the worst case

pub mod engine;
pub mod presets;
pub mod shock;

pub use engine::{
    ScenarioEngine, ScenarioPnL, ScenarioResult, ShockScenario, StressReport, TradeScenarioPnL,
};
pub use presets::PresetScenario;
pub use shock::{apply_shock, shock_summary, ShockResult};
