//! SQLite persistence layer.
//!
//! RULE: Only store.rs talks to the database.
//! The engine and ledger call store methods — they never execute SQL
//! directly. The save slot is the browser-localStorage analogue: one
//! well-known key, one flat JSON record, overwritten in place.

use rusqlite::{params, Connection, OptionalExtension};
use crate::{
    error::GameResult,
    event::EventLogEntry,
    types::Tick,
};

pub struct GameStore {
    conn: Connection,
}

impl GameStore {
    /// Open (or create) the save database at `path`.
    pub fn open(path: &str) -> GameResult<Self> {
        let conn = Connection::open(path)?;
        // WAL mode: better concurrent read performance.
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> GameResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> GameResult<()> {
        self.conn
            .execute_batch(include_str!("../../migrations/001_foundation.sql"))?;
        Ok(())
    }

    // ── Session ────────────────────────────────────────────────

    pub fn insert_session(&self, session_id: &str, version: &str) -> GameResult<()> {
        self.conn.execute(
            "INSERT INTO session (session_id, version, started_at) VALUES (?1, ?2, ?3)",
            params![session_id, version, chrono::Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    // ── Save slot ──────────────────────────────────────────────

    /// Overwrite the save slot with a fresh payload.
    pub fn write_save(&self, slot: &str, payload: &str, tick: Tick) -> GameResult<()> {
        self.conn.execute(
            "INSERT INTO save_state (slot, payload, saved_at_tick) VALUES (?1, ?2, ?3)
             ON CONFLICT(slot) DO UPDATE SET payload = ?2, saved_at_tick = ?3",
            params![slot, payload, tick as i64],
        )?;
        Ok(())
    }

    /// Read the save slot, if any save has ever been written.
    pub fn read_save(&self, slot: &str) -> GameResult<Option<String>> {
        let payload = self
            .conn
            .query_row(
                "SELECT payload FROM save_state WHERE slot = ?1",
                params![slot],
                |row| row.get(0),
            )
            .optional()?;
        Ok(payload)
    }

    // ── Event log ──────────────────────────────────────────────

    pub fn append_event(&self, entry: &EventLogEntry) -> GameResult<()> {
        self.conn.execute(
            "INSERT INTO event_log (session_id, tick, event_type, payload)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                entry.session_id,
                entry.tick as i64,
                entry.event_type,
                entry.payload,
            ],
        )?;
        Ok(())
    }

    pub fn events_for_tick(&self, session_id: &str, tick: Tick) -> GameResult<Vec<EventLogEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, session_id, tick, event_type, payload
             FROM event_log WHERE session_id = ?1 AND tick = ?2
             ORDER BY id ASC",
        )?;
        let entries = stmt
            .query_map(params![session_id, tick as i64], |row| {
                Ok(EventLogEntry {
                    id: Some(row.get(0)?),
                    session_id: row.get(1)?,
                    tick: row.get::<_, i64>(2)? as u64,
                    event_type: row.get(3)?,
                    payload: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }
}
