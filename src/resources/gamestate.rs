//! High-level session state.
//!
//! Tracks pause and game-over flags, the active level and which entity is
//! the local player. The game loop reads `is_paused` to decide whether to
//! simulate a frame.

use serde::{Deserialize, Serialize};

use crate::world::EntityId;

/// Session flags and the player entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub is_paused: bool,
    pub is_game_over: bool,
    pub current_level: String,
    pub player_entity: Option<EntityId>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new("test_level")
    }
}

impl GameState {
    pub fn new(level: impl Into<String>) -> Self {
        GameState {
            is_paused: false,
            is_game_over: false,
            current_level: level.into(),
            player_entity: None,
        }
    }

    pub fn toggle_pause(&mut self) {
        self.is_paused = !self.is_paused;
    }
}
