//! Units and their production rules.
//!
//! RULE: A rule names its collaborator by key and the ledger resolves
//! it at call time. Rules never hold references to other units, so the
//! chain topology is pure data and a missing collaborator degrades to
//! a no-op instead of a dangling pointer.

use crate::types::UnitName;
use serde::{Deserialize, Serialize};

/// One named resource/producer in the chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    pub name: UnitName,
    pub description: String,
    /// Current quantity. Full precision; rounding is display-only.
    pub value: f64,
    pub tick_rule: TickRule,
    pub click_rule: ClickRule,
}

/// Automatic per-tick production.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum TickRule {
    /// No automatic production (the end of the chain).
    None,
    /// Grow by `rate × source.value` once per tick, only while `source`
    /// exists and its value is > 0.
    Harvest { source: UnitName, rate: f64 },
}

/// User-interaction production.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum ClickRule {
    /// Flat unconditional gain (the root of the chain has no upstream
    /// cost).
    Gain { amount: f64 },
    /// Spend `cost` from `source` to gain `output`, gated on
    /// `source.value >= cost`. Check and both mutations are atomic per
    /// click: threshold failure applies nothing.
    Convert {
        source: UnitName,
        cost: f64,
        output: f64,
    },
}

/// Round a value for presentation: three decimal places, trailing
/// zeros dropped by the float round-trip.
pub fn display_round(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Render a value for the unit table: `display_round`, then the
/// shortest decimal form (12.5, not 12.500).
pub fn display_value(value: f64) -> String {
    format!("{}", display_round(value))
}
