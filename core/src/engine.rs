//! The game engine — session plumbing around the unit ledger.
//!
//! RULES:
//!   - Single-threaded and cooperative: tick() and apply() each run to
//!     completion before the next operation starts. No locking.
//!   - The save slot is written once per tick, after the ledger has
//!     mutated. Clicks mutate in-memory state only; their effect is
//!     captured by the next tick's save.
//!   - Every observable state change is appended to the event log.

use crate::{
    clock::GameClock,
    command::PlayerCommand,
    config::GameConfig,
    error::GameResult,
    event::{event_type_name, EventLogEntry, GameEvent},
    ledger::UnitLedger,
    snapshot::{self, SAVE_SLOT},
    store::GameStore,
    types::{SessionId, Tick},
};

pub struct GameEngine {
    pub session_id: SessionId,
    pub clock:      GameClock,
    pub store:      GameStore,
    ledger:         UnitLedger,
}

impl GameEngine {
    /// Build a fully wired engine: ledger from the catalog, session row
    /// inserted, values restored from the save slot when one exists.
    pub fn build(store: GameStore, config: &GameConfig) -> GameResult<Self> {
        let session_id = uuid::Uuid::new_v4().to_string();
        store.insert_session(&session_id, env!("CARGO_PKG_VERSION"))?;

        let mut ledger = UnitLedger::from_catalog(&config.units)?;

        let restored = match store.read_save(SAVE_SLOT)? {
            // An unreadable payload counts as no stored state; decode
            // has already logged the reason.
            Some(payload) => snapshot::decode(&payload),
            None => None,
        };
        let mut startup_events = vec![GameEvent::SessionStarted {
            session_id: session_id.clone(),
        }];
        if let Some(mapping) = restored {
            ledger.restore(&mapping);
            log::info!("restored {} unit values from save slot", mapping.len());
            startup_events.push(GameEvent::StateRestored {
                units: mapping.len(),
            });
        }

        let engine = Self {
            session_id,
            clock: GameClock::new(),
            store,
            ledger,
        };
        for event in &startup_events {
            engine.append_event(0, event)?;
        }
        Ok(engine)
    }

    /// Units in display order, for rendering.
    pub fn ledger(&self) -> &UnitLedger {
        &self.ledger
    }

    /// Advance one tick. This is the core game step.
    pub fn tick(&mut self) -> GameResult<Vec<GameEvent>> {
        assert!(!self.clock.paused, "tick() called on paused engine");

        let current_tick = self.clock.advance();
        let mut tick_events = self.ledger.tick_all(current_tick);
        tick_events.push(GameEvent::TickCompleted { tick: current_tick });

        // Persist: overwrite the save slot, then log the tick's events.
        let payload = snapshot::encode(&self.ledger.serialize())?;
        self.store.write_save(SAVE_SLOT, &payload, current_tick)?;
        for event in &tick_events {
            self.append_event(current_tick, event)?;
        }

        log::debug!("tick={current_tick} complete, {} events", tick_events.len());
        Ok(tick_events)
    }

    /// Execute a player command. A click that lands returns its event;
    /// a click that misses (unknown unit, unmet threshold) returns
    /// nothing and changes nothing.
    pub fn apply(&mut self, command: PlayerCommand) -> GameResult<Vec<GameEvent>> {
        match command {
            PlayerCommand::Pause => {
                self.clock.pause();
                Ok(vec![])
            }
            PlayerCommand::Resume => {
                self.clock.resume();
                Ok(vec![])
            }
            PlayerCommand::SetSpeed { speed } => {
                self.clock.set_speed(speed);
                Ok(vec![])
            }
            PlayerCommand::Click { unit } => match self.ledger.click(&unit) {
                Some(event) => {
                    self.append_event(self.clock.current_tick, &event)?;
                    Ok(vec![event])
                }
                None => Ok(vec![]),
            },
        }
    }

    /// Run n ticks in a loop. Used for fast-forward and tests.
    pub fn run_ticks(&mut self, n: u64) -> GameResult<()> {
        self.clock.resume();
        for _ in 0..n {
            self.tick()?;
        }
        self.clock.pause();
        Ok(())
    }

    /// Query events for a specific tick from the store.
    /// Used by the determinism test and replay tooling.
    pub fn store_events_for_tick(&self, tick: Tick) -> GameResult<Vec<EventLogEntry>> {
        self.store.events_for_tick(&self.session_id, tick)
    }

    fn append_event(&self, tick: Tick, event: &GameEvent) -> GameResult<()> {
        let entry = EventLogEntry {
            id:         None,
            session_id: self.session_id.clone(),
            tick,
            event_type: event_type_name(event).to_string(),
            payload:    serde_json::to_string(event)?,
        };
        self.store.append_event(&entry)
    }
}
