//! Scenario execution engine.
//!
//! Runs named market price shocks against a trade table and collects the
//! portfolio and per-trade P&L of each.

use std::cmp::Ordering;

use risk_core::types::RiskResult;

use super::presets::PresetScenario;
use super::shock::apply_shock;
use crate::portfolio::{TradeId, TradeTable};

/// A named market price shock.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShockScenario {
    name: String,
    shock_pct: f64,
}

impl ShockScenario {
    /// Creates a scenario; the shock is validated when it is executed.
    pub fn new(name: impl Into<String>, shock_pct: f64) -> Self {
        Self {
            name: name.into(),
            shock_pct,
        }
    }

    /// Scenario labelled by its shock, e.g. "Shock -10%".
    pub fn custom(shock_pct: f64) -> Self {
        Self::new(format!("Shock {:+}%", shock_pct), shock_pct)
    }

    /// Scenario name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Shock in percent.
    pub fn shock_pct(&self) -> f64 {
        self.shock_pct
    }
}

impl From<PresetScenario> for ShockScenario {
    fn from(preset: PresetScenario) -> Self {
        preset.scenario()
    }
}

/// P&L result from a single scenario.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenarioPnL {
    /// Scenario name
    pub scenario_name: String,
    /// Value before the shock
    pub base_value: f64,
    /// Value after the shock
    pub stressed_value: f64,
    /// P&L (stressed − base)
    pub pnl: f64,
    /// P&L as a fraction of |base|; 0 when the base is 0
    pub pnl_pct: f64,
}

impl ScenarioPnL {
    /// Create a new scenario P&L result.
    pub fn new(scenario_name: impl Into<String>, base_value: f64, stressed_value: f64) -> Self {
        let pnl = stressed_value - base_value;
        let pnl_pct = if base_value != 0.0 {
            pnl / base_value.abs()
        } else {
            0.0
        };
        Self {
            scenario_name: scenario_name.into(),
            base_value,
            stressed_value,
            pnl,
            pnl_pct,
        }
    }

    /// Check if P&L is a loss (negative).
    pub fn is_loss(&self) -> bool {
        self.pnl < 0.0
    }

    /// Check if P&L is a gain (positive).
    pub fn is_gain(&self) -> bool {
        self.pnl > 0.0
    }
}

/// P&L of one trade under a scenario.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TradeScenarioPnL {
    /// Trade
    pub trade_id: TradeId,
    /// Base and stressed MTM of the trade
    pub pnl: ScenarioPnL,
}

/// Complete result from scenario execution.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenarioResult {
    /// Scenario that was executed
    pub scenario_name: String,
    /// Shock applied, in percent
    pub shock_pct: f64,
    /// P&L by trade, in table order
    pub trade_pnls: Vec<TradeScenarioPnL>,
    /// Portfolio-level P&L
    pub portfolio_pnl: ScenarioPnL,
}

impl ScenarioResult {
    /// Get trade P&L count.
    pub fn trade_count(&self) -> usize {
        self.trade_pnls.len()
    }

    /// Get worst trade P&L.
    pub fn worst_trade_pnl(&self) -> Option<&TradeScenarioPnL> {
        self.trade_pnls
            .iter()
            .min_by(|a, b| a.pnl.pnl.partial_cmp(&b.pnl.pnl).unwrap_or(Ordering::Equal))
    }
}

/// Results of a stress run, one per scenario in registration order.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StressReport {
    /// Scenario results
    pub results: Vec<ScenarioResult>,
}

impl StressReport {
    /// Get the worst-case scenario (largest loss).
    pub fn worst_case(&self) -> Option<&ScenarioResult> {
        self.results.iter().min_by(|a, b| {
            a.portfolio_pnl
                .pnl
                .partial_cmp(&b.portfolio_pnl.pnl)
                .unwrap_or(Ordering::Equal)
        })
    }

    /// Number of scenarios run.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Returns true when no scenario was run.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Engine for executing shock scenarios against a trade table.
///
/// # Examples
///
/// ```
/// use risk_engine::portfolio::{TradeRecord, TradeTable};
/// use risk_engine::scenarios::{PresetScenario, ScenarioEngine};
///
/// let table = TradeTable::from_records(vec![TradeRecord::new("A", 100.0, 50.0, 55.0)]);
///
/// let mut engine = ScenarioEngine::new();
/// engine.add_presets(PresetScenario::all());
/// let report = engine.execute(&table).unwrap();
///
/// assert_eq!(report.len(), 3);
/// assert_eq!(report.worst_case().unwrap().scenario_name, "Market Crash");
/// ```
#[derive(Clone, Debug, Default)]
pub struct ScenarioEngine {
    scenarios: Vec<ShockScenario>,
}

impl ScenarioEngine {
    /// Create a new scenario engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a scenario.
    pub fn add_scenario(&mut self, scenario: ShockScenario) {
        self.scenarios.push(scenario);
    }

    /// Add multiple scenarios.
    pub fn add_scenarios(&mut self, scenarios: impl IntoIterator<Item = ShockScenario>) {
        self.scenarios.extend(scenarios);
    }

    /// Add preset scenarios.
    pub fn add_presets(&mut self, presets: impl IntoIterator<Item = PresetScenario>) {
        self.scenarios.extend(presets.into_iter().map(ShockScenario::from));
    }

    /// Get registered scenarios.
    pub fn scenarios(&self) -> &[ShockScenario] {
        &self.scenarios
    }

    /// Get scenario count.
    pub fn scenario_count(&self) -> usize {
        self.scenarios.len()
    }

    /// Execute a single scenario.
    ///
    /// # Errors
    /// Propagates shock validation and missing pricing columns.
    pub fn execute_scenario(
        &self,
        scenario: &ShockScenario,
        table: &TradeTable,
    ) -> RiskResult<ScenarioResult> {
        let shocked = apply_shock(table, scenario.shock_pct())?;
        let trade_pnls = shocked
            .iter()
            .map(|record| TradeScenarioPnL {
                trade_id: record.trade_id().clone(),
                pnl: ScenarioPnL::new(
                    scenario.name(),
                    record.mtm(),
                    record.shocked_mtm().unwrap_or(record.mtm()),
                ),
            })
            .collect();
        let base = shocked.total_mtm();
        let stressed = shocked.total_shocked_mtm().unwrap_or(base);

        Ok(ScenarioResult {
            scenario_name: scenario.name().to_string(),
            shock_pct: scenario.shock_pct(),
            trade_pnls,
            portfolio_pnl: ScenarioPnL::new(scenario.name(), base, stressed),
        })
    }

    /// Execute all registered scenarios.
    ///
    /// Stops at the first scenario that fails validation.
    pub fn execute(&self, table: &TradeTable) -> RiskResult<StressReport> {
        let results = self
            .scenarios
            .iter()
            .map(|scenario| self.execute_scenario(scenario, table))
            .collect::<RiskResult<Vec<_>>>()?;
        Ok(StressReport { results })
    }

    /// Clear scenarios.
    pub fn clear(&mut self) {
        self.scenarios.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::TradeRecord;
    use approx::assert_relative_eq;
    use risk_core::types::TradeAction;

    fn hedged() -> TradeTable {
        TradeTable::from_records(vec![
            TradeRecord::new("LONG", 100.0, 50.0, 50.0).with_action(TradeAction::Buy),
            TradeRecord::new("SHORT", 40.0, 50.0, 50.0).with_action(TradeAction::Sell),
        ])
    }

    // ================================================================
    // ScenarioPnL
    // ================================================================

    #[test]
    fn test_scenario_pnl_new() {
        let pnl = ScenarioPnL::new("Crash", 1_000.0, 800.0);
        assert_eq!(pnl.scenario_name, "Crash");
        assert_relative_eq!(pnl.pnl, -200.0);
        assert_relative_eq!(pnl.pnl_pct, -0.2);
        assert!(pnl.is_loss());
        assert!(!pnl.is_gain());
    }

    #[test]
    fn test_scenario_pnl_zero_base() {
        let pnl = ScenarioPnL::new("Up", 0.0, 50.0);
        assert_eq!(pnl.pnl_pct, 0.0);
        assert!(pnl.is_gain());
    }

    #[test]
    fn test_scenario_pnl_negative_base_uses_abs() {
        let pnl = ScenarioPnL::new("Up", -100.0, -50.0);
        assert_relative_eq!(pnl.pnl_pct, 0.5);
    }

    // ================================================================
    // ScenarioEngine
    // ================================================================

    #[test]
    fn test_engine_per_trade_pnl_in_table_order() {
        let mut engine = ScenarioEngine::new();
        engine.add_scenario(ShockScenario::custom(-10.0));
        let report = engine.execute(&hedged()).unwrap();

        let result = &report.results[0];
        assert_eq!(result.scenario_name, "Shock -10%");
        assert_eq!(result.trade_count(), 2);
        assert_eq!(result.trade_pnls[0].trade_id.as_str(), "LONG");
        assert_relative_eq!(result.trade_pnls[0].pnl.pnl, -500.0, epsilon = 1e-9);
        assert_relative_eq!(result.trade_pnls[1].pnl.pnl, 200.0, epsilon = 1e-9);
        assert_relative_eq!(result.portfolio_pnl.pnl, -300.0, epsilon = 1e-9);
        assert_eq!(result.worst_trade_pnl().unwrap().trade_id.as_str(), "LONG");
    }

    #[test]
    fn test_worst_case_is_largest_loss() {
        let mut engine = ScenarioEngine::new();
        engine.add_presets(PresetScenario::all());
        engine.add_scenario(ShockScenario::new("Deep Crash", -50.0));
        let report = engine.execute(&hedged()).unwrap();

        assert_eq!(report.len(), 4);
        assert_eq!(report.worst_case().unwrap().scenario_name, "Deep Crash");
    }

    #[test]
    fn test_invalid_scenario_fails_run() {
        let mut engine = ScenarioEngine::new();
        engine.add_scenario(ShockScenario::new("Bad", f64::INFINITY));
        assert!(engine.execute(&hedged()).unwrap_err().is_invalid_parameter());
    }

    #[test]
    fn test_empty_engine_gives_empty_report() {
        let mut engine = ScenarioEngine::new();
        engine.add_scenario(ShockScenario::custom(5.0));
        engine.clear();
        let report = engine.execute(&hedged()).unwrap();
        assert!(report.is_empty());
        assert!(report.worst_case().is_none());
    }
}
