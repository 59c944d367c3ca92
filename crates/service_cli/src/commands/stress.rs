//! Stress command implementation
//!
//! Runs custom and preset price shocks through the scenario engine.

use risk_engine::scenarios::{PresetScenario, ScenarioEngine, ShockScenario};
use tracing::info;

use super::InputArgs;
use crate::config::CliConfig;
use crate::loader::load_filtered;
use crate::output::{emit, money, percent, Section};
use crate::Result;

/// Run the stress command
///
/// With neither `shocks` nor `presets`, the preset scenarios are run.
pub fn run(input: &InputArgs, shocks: &[f64], presets: bool, config: &CliConfig) -> Result<()> {
    info!("Running stress scenarios...");
    info!("  Trades: {}", input.trades.display());

    let format = input.output_format(config)?;
    let table = load_filtered(&input.trades, &input.filters)?;

    let mut engine = ScenarioEngine::new();
    engine.add_scenarios(shocks.iter().copied().map(ShockScenario::custom));
    if presets || shocks.is_empty() {
        engine.add_presets(PresetScenario::all());
    }
    info!("  Scenarios: {}", engine.scenario_count());

    let report = engine.execute(&table)?;

    let mut section = Section::new(
        "Stress Scenarios",
        &["Scenario", "Shock", "Base MTM", "Stressed MTM", "P&L", "P&L %"],
    );
    for result in &report.results {
        let pnl = &result.portfolio_pnl;
        section.row(vec![
            result.scenario_name.clone(),
            format!("{:+}%", result.shock_pct),
            money(pnl.base_value),
            money(pnl.stressed_value),
            money(pnl.pnl),
            percent(pnl.pnl_pct),
        ]);
    }
    let mut sections = vec![section];
    if let Some(worst) = report.worst_case() {
        sections.push(Section::key_values(
            "Worst Case",
            vec![
                ("Scenario", worst.scenario_name.clone()),
                ("P&L", money(worst.portfolio_pnl.pnl)),
            ],
        ));
    }

    emit(format, &sections, &report)?;

    info!("Stress run complete");
    Ok(())
}
