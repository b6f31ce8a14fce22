//! Shared primitive types used across the entire game core.

/// A game tick. One tick = one second of play at normal speed.
pub type Tick = u64;

/// The key a unit is registered and looked up under.
pub type UnitName = String;

/// The canonical session identifier.
pub type SessionId = String;
