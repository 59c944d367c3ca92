//! Preset stress scenarios.
//!
//! Ready-made market price shocks for a quick stress run:
//! - Market Crash (−20%)
//! - Rate Hike (+5%)
//! - Commodity Spike (+30%)

use std::fmt;

use super::engine::ShockScenario;

/// Named preset shocks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PresetScenario {
    /// Broad price fall of 20%
    MarketCrash,
    /// Prices up 5% on tighter monetary policy
    RateHike,
    /// Commodity prices up 30%
    CommoditySpike,
}

impl PresetScenario {
    /// Every preset, in display order.
    pub fn all() -> Vec<Self> {
        vec![Self::MarketCrash, Self::RateHike, Self::CommoditySpike]
    }

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::MarketCrash => "Market Crash",
            Self::RateHike => "Rate Hike",
            Self::CommoditySpike => "Commodity Spike",
        }
    }

    /// Description of the move.
    pub fn description(&self) -> &'static str {
        match self {
            Self::MarketCrash => "Market prices decline 20%",
            Self::RateHike => "Market prices rise 5%",
            Self::CommoditySpike => "Commodity prices rise 30%",
        }
    }

    /// Shock applied to market prices, in percent.
    pub fn shock_pct(&self) -> f64 {
        match self {
            Self::MarketCrash => -20.0,
            Self::RateHike => 5.0,
            Self::CommoditySpike => 30.0,
        }
    }

    /// Builds the scenario for the engine.
    pub fn scenario(&self) -> ShockScenario {
        ShockScenario::new(self.name(), self.shock_pct())
    }
}

impl fmt::Display for PresetScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_shocks() {
        assert_eq!(PresetScenario::MarketCrash.shock_pct(), -20.0);
        assert_eq!(PresetScenario::RateHike.shock_pct(), 5.0);
        assert_eq!(PresetScenario::CommoditySpike.shock_pct(), 30.0);
    }

    #[test]
    fn test_all_presets_named() {
        let all = PresetScenario::all();
        assert_eq!(all.len(), 3);
        for preset in all {
            assert!(!preset.name().is_empty());
            assert!(!preset.description().is_empty());
            assert_eq!(preset.scenario().name(), preset.name());
        }
    }
}
