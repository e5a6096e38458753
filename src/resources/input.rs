//! Raw input state shared by the host and the input system.
//!
//! The host shell feeds key, mouse-button and mouse-move events into
//! [`InputState`]; the input system projects it into
//! [`PlayerInput`](crate::components::playerinput::PlayerInput) once per frame.
//!
//! Pressing a bound key also records a [`BufferedInput`]. Only one action is
//! buffered at a time. A new action replaces the pending one only if its
//! priority is at least as high, or if the pending one has aged past the
//! buffer window; otherwise the pending higher-priority action is kept.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::components::playerinput::{BufferPriority, BufferedAction, BufferedInput};

/// Keyboard keys the gameplay core knows about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    KeyA,
    KeyD,
    KeyW,
    KeyS,
    KeyE,
    KeyG,
    KeyQ,
    Space,
    ShiftLeft,
    ShiftRight,
    AltLeft,
    AltRight,
    Escape,
    Enter,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

/// Buffered action recorded when `key` is pressed, if any.
fn buffered_action_for_key(key: KeyCode) -> Option<BufferedAction> {
    match key {
        KeyCode::Space => Some(BufferedAction::Jump),
        KeyCode::KeyG => Some(BufferedAction::Roll),
        KeyCode::KeyE => Some(BufferedAction::HeavyAttack),
        _ => None,
    }
}

/// Per-session raw input: pressed keys and buttons, mouse position and the
/// single buffered action.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    keys: FxHashMap<KeyCode, bool>,
    mouse_buttons: FxHashMap<MouseButton, bool>,
    /// Mouse position in screen pixels.
    pub mouse_x: f32,
    pub mouse_y: f32,
    /// Mouse position in world pixels.
    pub world_mouse_x: f32,
    pub world_mouse_y: f32,
    buffered_input: Option<BufferedInput>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press at session time `now` (ms).
    pub fn handle_key_down(&mut self, key: KeyCode, now: f64) {
        self.keys.insert(key, true);
        if let Some(action) = buffered_action_for_key(key) {
            self.buffer_input(action, action.default_priority(), now);
        }
    }

    pub fn handle_key_up(&mut self, key: KeyCode) {
        self.keys.insert(key, false);
    }

    /// Record a mouse button press. Left click buffers a light attack;
    /// block (right click) is instantaneous and never buffered.
    pub fn handle_mouse_down(&mut self, button: MouseButton, now: f64) {
        self.mouse_buttons.insert(button, true);
        if button == MouseButton::Left {
            self.buffer_input(
                BufferedAction::LightAttack,
                BufferedAction::LightAttack.default_priority(),
                now,
            );
        }
    }

    pub fn handle_mouse_up(&mut self, button: MouseButton) {
        self.mouse_buttons.insert(button, false);
    }

    /// Update both screen and world mouse coordinates.
    pub fn set_mouse_position(&mut self, screen: (f32, f32), world: (f32, f32)) {
        (self.mouse_x, self.mouse_y) = screen;
        (self.world_mouse_x, self.world_mouse_y) = world;
    }

    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys.get(&key).copied().unwrap_or(false)
    }

    pub fn is_mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.mouse_buttons.get(&button).copied().unwrap_or(false)
    }

    /// Try to buffer `action`. Returns true if it was stored.
    pub fn buffer_input(
        &mut self,
        action: BufferedAction,
        priority: BufferPriority,
        now: f64,
    ) -> bool {
        self.expire_buffer(now);
        let accept = self
            .buffered_input
            .is_none_or(|current| priority >= current.priority);
        if accept {
            self.buffered_input = Some(BufferedInput::new(action, now, priority));
        }
        accept
    }

    /// Drop the buffered action if it has aged past the window at `now`.
    pub fn expire_buffer(&mut self, now: f64) {
        if self.buffered_input.is_some_and(|b| b.is_expired(now)) {
            self.buffered_input = None;
        }
    }

    /// Pending buffered action, without consuming it.
    pub fn buffered_input(&self) -> Option<BufferedInput> {
        self.buffered_input
    }

    pub fn consume_buffered_input(&mut self) -> Option<BufferedInput> {
        self.buffered_input.take()
    }

    /// Consume the buffered action only if it is `action`.
    pub fn consume_buffered_action(&mut self, action: BufferedAction) -> Option<BufferedInput> {
        if self.buffered_input.is_some_and(|b| b.action == action) {
            self.buffered_input.take()
        } else {
            None
        }
    }

    /// Release every key and button and drop the buffer.
    pub fn reset(&mut self) {
        self.keys.clear();
        self.mouse_buttons.clear();
        self.buffered_input = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inputstate_default_all_released() {
        let input = InputState::default();
        assert!(!input.is_key_pressed(KeyCode::KeyA));
        assert!(!input.is_key_pressed(KeyCode::Space));
        assert!(!input.is_mouse_button_pressed(MouseButton::Left));
        assert!(input.buffered_input().is_none());
    }

    #[test]
    fn test_key_down_up() {
        let mut input = InputState::new();
        input.handle_key_down(KeyCode::KeyD, 0.0);
        assert!(input.is_key_pressed(KeyCode::KeyD));
        input.handle_key_up(KeyCode::KeyD);
        assert!(!input.is_key_pressed(KeyCode::KeyD));
    }

    #[test]
    fn test_bound_keys_buffer_actions() {
        let mut input = InputState::new();
        input.handle_key_down(KeyCode::Space, 10.0);
        let b = input.buffered_input().unwrap();
        assert_eq!(b.action, BufferedAction::Jump);
        assert_eq!(b.priority, BufferPriority::Low);
        assert_eq!(b.timestamp, 10.0);

        input.handle_key_down(KeyCode::KeyA, 11.0);
        assert_eq!(input.buffered_input().unwrap().action, BufferedAction::Jump);
    }

    #[test]
    fn test_lower_priority_rejected_inside_window() {
        let mut input = InputState::new();
        input.handle_key_down(KeyCode::KeyG, 100.0); // roll, high
        input.handle_key_down(KeyCode::Space, 200.0); // jump, low
        let b = input.buffered_input().unwrap();
        assert_eq!(b.action, BufferedAction::Roll);
        assert_eq!(b.timestamp, 100.0);
    }

    #[test]
    fn test_equal_priority_replaces() {
        let mut input = InputState::new();
        input.handle_key_down(KeyCode::KeyE, 100.0);
        input.handle_mouse_down(MouseButton::Left, 120.0);
        let b = input.buffered_input().unwrap();
        assert_eq!(b.action, BufferedAction::LightAttack);
        assert_eq!(b.timestamp, 120.0);
    }

    #[test]
    fn test_lower_priority_replaces_after_window() {
        let mut input = InputState::new();
        input.handle_key_down(KeyCode::KeyG, 100.0);
        input.handle_key_down(KeyCode::Space, 234.0);
        assert_eq!(input.buffered_input().unwrap().action, BufferedAction::Jump);
    }

    #[test]
    fn test_lower_priority_at_window_edge_rejected() {
        let mut input = InputState::new();
        input.handle_key_down(KeyCode::KeyG, 100.0);
        assert!(!input.buffer_input(BufferedAction::Jump, BufferPriority::Low, 233.0));
        assert_eq!(input.buffered_input().unwrap().action, BufferedAction::Roll);
    }

    #[test]
    fn test_right_click_not_buffered() {
        let mut input = InputState::new();
        input.handle_mouse_down(MouseButton::Right, 0.0);
        assert!(input.is_mouse_button_pressed(MouseButton::Right));
        assert!(input.buffered_input().is_none());
    }

    #[test]
    fn test_expire_buffer() {
        let mut input = InputState::new();
        input.handle_key_down(KeyCode::Space, 0.0);
        input.expire_buffer(133.0);
        assert!(input.buffered_input().is_some());
        input.expire_buffer(134.0);
        assert!(input.buffered_input().is_none());
    }

    #[test]
    fn test_consume_buffered_action_only_matching() {
        let mut input = InputState::new();
        input.handle_key_down(KeyCode::KeyG, 0.0);
        assert!(input.consume_buffered_action(BufferedAction::Jump).is_none());
        assert!(input.buffered_input().is_some());
        assert!(input.consume_buffered_action(BufferedAction::Roll).is_some());
        assert!(input.buffered_input().is_none());
    }

    #[test]
    fn test_reset_releases_everything() {
        let mut input = InputState::new();
        input.handle_key_down(KeyCode::Space, 0.0);
        input.handle_mouse_down(MouseButton::Left, 0.0);
        input.reset();
        assert!(!input.is_key_pressed(KeyCode::Space));
        assert!(!input.is_mouse_button_pressed(MouseButton::Left));
        assert!(input.buffered_input().is_none());
    }
}
