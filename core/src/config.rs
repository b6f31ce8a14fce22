//! Game configuration — the unit catalog and the tick cadence.
//!
//! The chain topology lives here as data, not code: each catalog entry
//! names its collaborators by key, so rearranging the chain is a config
//! edit, not a refactor.

use crate::unit::{ClickRule, TickRule};
use serde::{Deserialize, Serialize};

/// One catalog entry: a unit's identity plus its two rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitConfig {
    pub name: String,
    pub description: String,
    pub tick: TickRule,
    pub click: ClickRule,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Scheduler cadence at normal speed. The reference is one tick per
    /// second.
    pub tick_interval_ms: u64,
    /// Units in tick/display order.
    pub units: Vec<UnitConfig>,
}

impl GameConfig {
    /// Load a catalog override from a JSON file.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: GameConfig = serde_json::from_str(&content)?;
        Ok(config)
    }
}

impl Default for GameConfig {
    /// The authoritative A–E production chain.
    fn default() -> Self {
        let units = vec![
            UnitConfig {
                name: "A".into(),
                description: "One per click".into(),
                tick: TickRule::Harvest {
                    source: "B".into(),
                    rate: 0.5,
                },
                click: ClickRule::Gain { amount: 1.0 },
            },
            UnitConfig {
                name: "B".into(),
                description: "1 per 10 A".into(),
                tick: TickRule::Harvest {
                    source: "C".into(),
                    rate: 0.25,
                },
                click: ClickRule::Convert {
                    source: "A".into(),
                    cost: 10.0,
                    output: 100.0,
                },
            },
            UnitConfig {
                name: "C".into(),
                description: "1 per 100 B".into(),
                tick: TickRule::Harvest {
                    source: "D".into(),
                    rate: 0.1,
                },
                click: ClickRule::Convert {
                    source: "B".into(),
                    cost: 100.0,
                    output: 100.0,
                },
            },
            UnitConfig {
                name: "D".into(),
                description: "1 per 100 C".into(),
                tick: TickRule::Harvest {
                    source: "E".into(),
                    rate: 0.05,
                },
                click: ClickRule::Convert {
                    source: "C".into(),
                    cost: 100.0,
                    output: 1.0,
                },
            },
            UnitConfig {
                name: "E".into(),
                description: "1 per 100 D".into(),
                tick: TickRule::None,
                click: ClickRule::Convert {
                    source: "D".into(),
                    cost: 100.0,
                    output: 1.0,
                },
            },
        ];
        Self {
            tick_interval_ms: 1000,
            units,
        }
    }
}
