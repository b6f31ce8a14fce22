//! Save-state serialization — the flat name→value record to/from JSON.
//!
//! The whole persisted state is one record under one well-known slot,
//! overwritten once per tick. A payload that fails to parse counts as
//! "no stored state": the caller logs and keeps default values, it
//! never fails the session.

use crate::types::UnitName;
use std::collections::BTreeMap;

/// The single slot every save lives under.
pub const SAVE_SLOT: &str = "units";

/// Flat name→value record, e.g. `{"A": 12.0, "B": 3.5}`.
/// BTreeMap keeps the JSON key order stable across saves.
pub type SaveMapping = BTreeMap<UnitName, f64>;

/// Encode a mapping for the save slot.
pub fn encode(mapping: &SaveMapping) -> serde_json::Result<String> {
    serde_json::to_string(mapping)
}

/// Decode a stored payload. Malformed input is `None`, not an error.
pub fn decode(payload: &str) -> Option<SaveMapping> {
    match serde_json::from_str(payload) {
        Ok(mapping) => Some(mapping),
        Err(err) => {
            log::warn!("discarding unreadable save payload: {err}");
            None
        }
    }
}
