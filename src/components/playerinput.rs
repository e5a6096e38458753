//! Player-controlled input intents.
//!
//! [`PlayerInput`] marks an entity as controlled by the local player. The
//! input system refreshes its intents every frame from
//! [`InputState`](crate::resources::input::InputState); the movement system
//! reads them to drive the state machine.

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

use crate::tuning;
use crate::world::{ComponentKind, GameComponent};

/// Actions that can be remembered by the input buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BufferedAction {
    LightAttack,
    HeavyAttack,
    Roll,
    Jump,
}

impl BufferedAction {
    /// Priority this action is buffered with by the default bindings.
    pub fn default_priority(self) -> BufferPriority {
        match self {
            BufferedAction::Jump => BufferPriority::Low,
            BufferedAction::LightAttack | BufferedAction::HeavyAttack => BufferPriority::Medium,
            BufferedAction::Roll => BufferPriority::High,
        }
    }
}

/// Overwrite priority of a buffered action. Ordered low to high.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BufferPriority {
    Low = 1,
    Medium = 2,
    High = 3,
}

/// A single remembered action.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BufferedInput {
    pub action: BufferedAction,
    /// Session clock time in milliseconds when the action was pressed.
    pub timestamp: f64,
    pub priority: BufferPriority,
}

impl BufferedInput {
    pub fn new(action: BufferedAction, timestamp: f64, priority: BufferPriority) -> Self {
        Self {
            action,
            timestamp,
            priority,
        }
    }

    /// Whether the entry has aged past the buffer window at `now`.
    pub fn is_expired(&self, now: f64) -> bool {
        now - self.timestamp > tuning::input_buffer::WINDOW
    }
}

/// Weapon stance derived from the mouse position relative to the character.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponZone {
    Guard = 0,
    High = 1,
    #[default]
    Mid = 2,
    Low = 3,
}

/// Live intents of a player-controlled entity.
#[derive(Component, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerInput {
    pub move_left: bool,
    pub move_right: bool,
    pub move_up: bool,
    pub move_down: bool,
    pub run: bool,
    pub jump: bool,
    pub crouch: bool,
    pub dodge_roll: bool,
    pub backstep: bool,
    pub light_attack: bool,
    pub heavy_attack: bool,
    pub block: bool,
    pub parry: bool,

    /// Screen-space mouse position.
    pub mouse_x: f32,
    pub mouse_y: f32,
    /// World-space mouse position.
    pub world_mouse_x: f32,
    pub world_mouse_y: f32,

    pub weapon_zone: WeaponZone,
    /// Copy of the input source's pending buffered action.
    pub buffered_input: Option<BufferedInput>,
}

impl GameComponent for PlayerInput {
    const KIND: ComponentKind = ComponentKind::PlayerInput;
}

impl PlayerInput {
    /// Reset every boolean intent. Mouse, zone and buffer are kept.
    pub fn clear(&mut self) {
        self.move_left = false;
        self.move_right = false;
        self.move_up = false;
        self.move_down = false;
        self.run = false;
        self.jump = false;
        self.crouch = false;
        self.dodge_roll = false;
        self.backstep = false;
        self.light_attack = false;
        self.heavy_attack = false;
        self.block = false;
        self.parry = false;
    }

    pub fn set_buffered_input(&mut self, buffered: Option<BufferedInput>) {
        self.buffered_input = buffered;
    }

    /// Take the buffered action, leaving the slot empty.
    pub fn consume_buffered_input(&mut self) -> Option<BufferedInput> {
        self.buffered_input.take()
    }

    /// Whether a buffered action of the given kind is pending.
    pub fn has_buffered(&self, action: BufferedAction) -> bool {
        self.buffered_input.is_some_and(|b| b.action == action)
    }

    /// Either horizontal direction is held.
    pub fn is_moving_horizontally(&self) -> bool {
        self.move_left || self.move_right
    }

    /// Recompute [`WeaponZone`] from the world mouse position.
    ///
    /// `facing` flips the horizontal test so "behind" always means opposite
    /// to where the character looks.
    pub fn update_weapon_zone(&mut self, player_x: f32, player_y: f32, facing: f32) {
        let relative_x = self.world_mouse_x - player_x;
        let relative_y = self.world_mouse_y - player_y;
        let adjusted_x = relative_x * facing;

        self.weapon_zone = if adjusted_x < -tuning::weapon_zone::BEHIND_THRESHOLD {
            WeaponZone::Guard
        } else if relative_y < -tuning::weapon_zone::VERTICAL_THRESHOLD {
            WeaponZone::High
        } else if relative_y > tuning::weapon_zone::VERTICAL_THRESHOLD {
            WeaponZone::Low
        } else {
            WeaponZone::Mid
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input_with_mouse(x: f32, y: f32) -> PlayerInput {
        PlayerInput {
            world_mouse_x: x,
            world_mouse_y: y,
            ..Default::default()
        }
    }

    #[test]
    fn test_default_zone_is_mid() {
        assert_eq!(PlayerInput::default().weapon_zone, WeaponZone::Mid);
    }

    #[test]
    fn test_weapon_zone_behind_is_guard() {
        let mut input = input_with_mouse(-25.0, 0.0);
        input.update_weapon_zone(0.0, 0.0, 1.0);
        assert_eq!(input.weapon_zone, WeaponZone::Guard);

        // same mouse, character now faces left: mouse is in front
        input.update_weapon_zone(0.0, 0.0, -1.0);
        assert_eq!(input.weapon_zone, WeaponZone::Mid);
    }

    #[test]
    fn test_weapon_zone_threshold_is_exclusive() {
        let mut input = input_with_mouse(-20.0, 30.0);
        input.update_weapon_zone(0.0, 0.0, 1.0);
        assert_eq!(input.weapon_zone, WeaponZone::Mid);
    }

    #[test]
    fn test_weapon_zone_high_and_low() {
        let mut input = input_with_mouse(10.0, -31.0);
        input.update_weapon_zone(0.0, 0.0, 1.0);
        assert_eq!(input.weapon_zone, WeaponZone::High);

        input.world_mouse_y = 31.0;
        input.update_weapon_zone(0.0, 0.0, 1.0);
        assert_eq!(input.weapon_zone, WeaponZone::Low);
    }

    #[test]
    fn test_weapon_zone_guard_wins_over_vertical() {
        let mut input = input_with_mouse(100.0, -100.0);
        input.update_weapon_zone(200.0, 0.0, 1.0);
        assert_eq!(input.weapon_zone, WeaponZone::Guard);
    }

    #[test]
    fn test_clear_keeps_mouse_and_buffer() {
        let mut input = input_with_mouse(5.0, 6.0);
        input.jump = true;
        input.block = true;
        input.buffered_input = Some(BufferedInput::new(
            BufferedAction::Jump,
            0.0,
            BufferPriority::Low,
        ));
        input.clear();
        assert!(!input.jump);
        assert!(!input.block);
        assert_eq!(input.world_mouse_x, 5.0);
        assert!(input.buffered_input.is_some());
    }

    #[test]
    fn test_consume_buffered_input_empties_slot() {
        let mut input = PlayerInput::default();
        input.set_buffered_input(Some(BufferedInput::new(
            BufferedAction::Roll,
            10.0,
            BufferPriority::High,
        )));
        assert!(input.has_buffered(BufferedAction::Roll));
        let taken = input.consume_buffered_input();
        assert_eq!(taken.map(|b| b.action), Some(BufferedAction::Roll));
        assert!(input.consume_buffered_input().is_none());
    }

    #[test]
    fn test_buffered_input_expiry() {
        let b = BufferedInput::new(BufferedAction::Jump, 1000.0, BufferPriority::Low);
        assert!(!b.is_expired(1133.0));
        assert!(b.is_expired(1133.5));
    }

    #[test]
    fn test_priority_ordering() {
        assert!(BufferPriority::High > BufferPriority::Medium);
        assert!(BufferPriority::Medium > BufferPriority::Low);
        assert_eq!(
            BufferedAction::Roll.default_priority(),
            BufferPriority::High
        );
    }
}
