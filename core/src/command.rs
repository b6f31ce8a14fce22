use serde::{Deserialize, Serialize};
use crate::types::UnitName;

/// All player-issued commands.
/// Variants added as the game grows — never removed or reordered.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum PlayerCommand {
    // ── Clock control ─────────────────────────────
    Pause,
    Resume,
    SetSpeed { speed: crate::clock::GameSpeed },

    // ── Unit interaction ──────────────────────────
    /// Click a unit by name. Unknown names are ignored, not errors.
    Click { unit: UnitName },
}
