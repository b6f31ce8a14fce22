//! Game events — everything the core reports to the outside world.
//!
//! RULE: The presentation layer re-renders from events, never by
//! polling ledger internals mid-operation. Every state change the
//! player can observe has an event.

use crate::types::{SessionId, Tick, UnitName};
use serde::{Deserialize, Serialize};

/// Every event emitted during play.
/// Variants are added as the game grows — never removed or reordered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    // ── Engine events ──────────────────────────────
    SessionStarted {
        session_id: SessionId,
    },
    TickCompleted {
        tick: Tick,
    },
    StateRestored {
        units: usize,
    },

    // ── Ledger events ──────────────────────────────
    /// A unit's tick rule fired and its value grew.
    UnitProduced {
        tick: Tick,
        unit: UnitName,
        delta: f64,
        value: f64,
    },
    /// A click landed: either a flat gain or a completed conversion.
    UnitClicked {
        unit: UnitName,
        value: f64,
    },
}

/// Extract a stable string name from a GameEvent variant.
/// Used for the event_type column in event_log.
pub fn event_type_name(event: &GameEvent) -> &'static str {
    match event {
        GameEvent::SessionStarted { .. } => "session_started",
        GameEvent::TickCompleted { .. }  => "tick_completed",
        GameEvent::StateRestored { .. }  => "state_restored",
        GameEvent::UnitProduced { .. }   => "unit_produced",
        GameEvent::UnitClicked { .. }    => "unit_clicked",
    }
}

/// The event log entry as persisted to SQLite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventLogEntry {
    pub id: Option<i64>,
    pub session_id: SessionId,
    pub tick: Tick,
    pub event_type: String,
    pub payload: String, // JSON-serialized GameEvent
}
