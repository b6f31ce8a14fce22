//! Game clock — owns tick state, speed control, and pause.

use crate::types::Tick;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameClock {
    pub current_tick: Tick,
    pub speed:        GameSpeed,
    pub paused:       bool,
}

impl GameClock {
    pub fn new() -> Self {
        Self {
            current_tick: 0,
            speed: GameSpeed::Normal,
            paused: true,
        }
    }

    /// Advance one tick. Returns the new tick number.
    /// Panics if called while paused — callers must check.
    pub fn advance(&mut self) -> Tick {
        assert!(!self.paused, "advance() called on paused clock");
        self.current_tick += 1;
        self.current_tick
    }

    pub fn pause(&mut self)  { self.paused = true;  }
    pub fn resume(&mut self) { self.paused = false; }

    pub fn set_speed(&mut self, speed: GameSpeed) {
        self.speed = speed;
    }

    pub fn ticks_per_real_second(&self) -> u32 {
        match self.speed {
            GameSpeed::Normal => 1,
            GameSpeed::Fast   => 5,
            GameSpeed::Turbo  => 20,
        }
    }
}

impl Default for GameClock {
    fn default() -> Self { Self::new() }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GameSpeed {
    Normal, // 1 tick per real second — the reference cadence
    Fast,   // 5 ticks per real second
    Turbo,  // 20 ticks per real second
}
