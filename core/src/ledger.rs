//! The unit ledger — the heart of Cascade.
//!
//! TICK ORDER (fixed, documented, never reordered):
//!   units tick in catalog declaration order, and each unit's delta is
//!   applied immediately, not batched. A unit whose source appears
//!   earlier in the catalog therefore harvests the already-ticked value
//!   from the same cycle. This ripple is observable behavior and is
//!   pinned by tests — do not "fix" it into a snapshot pass.
//!
//! RULES:
//!   - Units are registered once at build; never added or removed after.
//!   - Unit names are unique; duplicates are a build error.
//!   - Rules resolve collaborators by name at call time. A missing or
//!     exhausted collaborator makes the rule a no-op, never an error.

use crate::{
    config::UnitConfig,
    error::{GameError, GameResult},
    event::GameEvent,
    snapshot::SaveMapping,
    types::Tick,
    unit::{ClickRule, TickRule, Unit},
};
use std::collections::BTreeSet;

pub struct UnitLedger {
    units: Vec<Unit>,
}

impl UnitLedger {
    /// Build a ledger from catalog entries, every value starting at 0.
    pub fn from_catalog(catalog: &[UnitConfig]) -> GameResult<Self> {
        let mut seen: BTreeSet<&str> = BTreeSet::new();
        for entry in catalog {
            if !seen.insert(entry.name.as_str()) {
                return Err(GameError::DuplicateUnit {
                    name: entry.name.clone(),
                });
            }
        }
        let units = catalog
            .iter()
            .map(|entry| Unit {
                name: entry.name.clone(),
                description: entry.description.clone(),
                value: 0.0,
                tick_rule: entry.tick.clone(),
                click_rule: entry.click.clone(),
            })
            .collect();
        Ok(Self { units })
    }

    /// Units in tick/display order.
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Name-keyed lookup used by the rules themselves.
    pub fn value_of(&self, name: &str) -> Option<f64> {
        self.units.iter().find(|u| u.name == name).map(|u| u.value)
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.units.iter().position(|u| u.name == name)
    }

    /// Advance every unit's tick rule once, in ledger order.
    ///
    /// Each delta is computed against the current collection state and
    /// applied before the next unit runs (see module header).
    pub fn tick_all(&mut self, tick: Tick) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for i in 0..self.units.len() {
            let rule = self.units[i].tick_rule.clone();
            let delta = match rule {
                TickRule::None => None,
                TickRule::Harvest { source, rate } => self
                    .value_of(&source)
                    .filter(|v| *v > 0.0)
                    .map(|v| v * rate),
            };
            if let Some(delta) = delta {
                let unit = &mut self.units[i];
                unit.value += delta;
                events.push(GameEvent::UnitProduced {
                    tick,
                    unit: unit.name.clone(),
                    delta,
                    value: unit.value,
                });
            }
        }
        events
    }

    /// Apply the named unit's click rule.
    ///
    /// Returns `None` (and changes nothing) for an unknown name, a
    /// missing conversion source, or a source below the conversion
    /// threshold.
    pub fn click(&mut self, name: &str) -> Option<GameEvent> {
        let i = match self.index_of(name) {
            Some(i) => i,
            None => {
                log::debug!("click on unknown unit '{name}' ignored");
                return None;
            }
        };
        match self.units[i].click_rule.clone() {
            ClickRule::Gain { amount } => {
                self.units[i].value += amount;
            }
            ClickRule::Convert {
                source,
                cost,
                output,
            } => {
                let j = self.index_of(&source)?;
                if self.units[j].value < cost {
                    log::debug!(
                        "click on '{name}' ignored: {source} {} below cost {cost}",
                        self.units[j].value
                    );
                    return None;
                }
                // Threshold held: deduct and credit together.
                self.units[j].value -= cost;
                self.units[i].value += output;
            }
        }
        Some(GameEvent::UnitClicked {
            unit: self.units[i].name.clone(),
            value: self.units[i].value,
        })
    }

    /// Flat name→value record for the persistence layer.
    pub fn serialize(&self) -> SaveMapping {
        self.units
            .iter()
            .map(|u| (u.name.clone(), u.value))
            .collect()
    }

    /// Overwrite values from a stored record. Units absent from the
    /// mapping keep their current value; unknown keys are ignored.
    pub fn restore(&mut self, mapping: &SaveMapping) {
        for unit in &mut self.units {
            if let Some(value) = mapping.get(&unit.name) {
                unit.value = *value;
            }
        }
    }
}
