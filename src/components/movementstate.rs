//! Character movement state machine.
//!
//! [`MovementState`] holds the current [`MoveState`], how long the entity has
//! been in it, and the forgiveness timers (coyote time, jump buffer, slide
//! cooldown, invulnerability).
//!
//! # Transitions
//!
//! [`MovementState::change_state`] is the only way to change the state. It
//! records the previous state, resets the state timer, stores the duration and
//! applies the capability row for the new state (see [`Capabilities`]).
//! Capabilities cannot be set independently.
//!
//! A state with a non-zero duration is complete once its timer reaches the
//! duration. Completion is polled by the movement system via
//! [`MovementState::is_state_complete`]; the state machine never transitions
//! on its own, so the driver picks the follow-up state from context.
//!
//! All timers are in milliseconds.

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

use crate::world::{ComponentKind, GameComponent};

/// Movement states a character can be in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveState {
    #[default]
    Idle,
    Walking,
    Running,
    Crouching,
    CrouchWalking,
    Jumping,
    Falling,
    Landing,
    DodgeRoll,
    Backstep,
    CrouchSlide,
}

impl MoveState {
    /// Standing or moving on the ground with full control.
    pub fn is_grounded_locomotion(self) -> bool {
        matches!(
            self,
            MoveState::Idle
                | MoveState::Walking
                | MoveState::Running
                | MoveState::Crouching
                | MoveState::CrouchWalking
        )
    }

    pub fn is_airborne(self) -> bool {
        matches!(self, MoveState::Jumping | MoveState::Falling)
    }
}

/// What a character may do in a given state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub can_move: bool,
    pub can_jump: bool,
    pub can_attack: bool,
    pub can_block: bool,
    pub can_dodge: bool,
}

impl Capabilities {
    const FREE: Capabilities = Capabilities {
        can_move: true,
        can_jump: true,
        can_attack: true,
        can_block: true,
        can_dodge: true,
    };

    const AIRBORNE: Capabilities = Capabilities {
        can_move: true,
        can_jump: false,
        can_attack: true,
        can_block: false,
        can_dodge: false,
    };

    const LOCKED: Capabilities = Capabilities {
        can_move: false,
        can_jump: false,
        can_attack: false,
        can_block: false,
        can_dodge: false,
    };

    /// Capability row for `state`.
    pub fn for_state(state: MoveState) -> Self {
        match state {
            MoveState::Idle
            | MoveState::Walking
            | MoveState::Running
            | MoveState::Crouching
            | MoveState::CrouchWalking => Self::FREE,
            MoveState::Jumping | MoveState::Falling => Self::AIRBORNE,
            MoveState::Landing
            | MoveState::DodgeRoll
            | MoveState::Backstep
            | MoveState::CrouchSlide => Self::LOCKED,
        }
    }
}

/// Movement state and timing windows of a character.
#[derive(Component, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MovementState {
    current_state: MoveState,
    previous_state: MoveState,
    /// Time spent in the current state.
    state_timer: f32,
    /// 0 means the state lasts until changed.
    state_duration: f32,
    capabilities: Capabilities,

    /// Remaining coyote window after leaving the ground.
    pub coyote_time: f32,
    /// Remaining window during which an early jump press is honoured.
    pub jump_buffer_time: f32,
    /// Time until crouch-slide can be used again.
    pub slide_cooldown: f32,
    /// Press time of the input that last armed the jump buffer.
    armed_jump_press: Option<f64>,
    is_invulnerable: bool,
    invulnerability_timer: f32,
}

impl GameComponent for MovementState {
    const KIND: ComponentKind = ComponentKind::MovementState;
}

impl Default for MovementState {
    fn default() -> Self {
        Self::new()
    }
}

impl MovementState {
    /// Start idle with no timers running.
    pub fn new() -> Self {
        Self {
            current_state: MoveState::Idle,
            previous_state: MoveState::Idle,
            state_timer: 0.0,
            state_duration: 0.0,
            capabilities: Capabilities::for_state(MoveState::Idle),
            coyote_time: 0.0,
            jump_buffer_time: 0.0,
            slide_cooldown: 0.0,
            armed_jump_press: None,
            is_invulnerable: false,
            invulnerability_timer: 0.0,
        }
    }

    pub fn current_state(&self) -> MoveState {
        self.current_state
    }

    pub fn previous_state(&self) -> MoveState {
        self.previous_state
    }

    pub fn state_timer(&self) -> f32 {
        self.state_timer
    }

    pub fn state_duration(&self) -> f32 {
        self.state_duration
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn can_move(&self) -> bool {
        self.capabilities.can_move
    }

    pub fn can_jump(&self) -> bool {
        self.capabilities.can_jump
    }

    pub fn can_attack(&self) -> bool {
        self.capabilities.can_attack
    }

    pub fn can_block(&self) -> bool {
        self.capabilities.can_block
    }

    pub fn can_dodge(&self) -> bool {
        self.capabilities.can_dodge
    }

    pub fn is_invulnerable(&self) -> bool {
        self.is_invulnerable
    }

    pub fn invulnerability_timer(&self) -> f32 {
        self.invulnerability_timer
    }

    /// Transition to `new_state`. `duration` of 0 means indefinite.
    pub fn change_state(&mut self, new_state: MoveState, duration: f32) {
        self.previous_state = self.current_state;
        self.current_state = new_state;
        self.state_timer = 0.0;
        self.state_duration = duration;
        self.capabilities = Capabilities::for_state(new_state);
    }

    /// Advance the state timer and count every window down toward zero.
    pub fn update(&mut self, delta_ms: f32) {
        self.state_timer += delta_ms;
        self.coyote_time = (self.coyote_time - delta_ms).max(0.0);
        self.jump_buffer_time = (self.jump_buffer_time - delta_ms).max(0.0);
        self.slide_cooldown = (self.slide_cooldown - delta_ms).max(0.0);

        if self.invulnerability_timer > 0.0 {
            self.invulnerability_timer = (self.invulnerability_timer - delta_ms).max(0.0);
            if self.invulnerability_timer <= 0.0 {
                self.is_invulnerable = false;
            }
        }
    }

    /// A timed state has run for its full duration.
    pub fn is_state_complete(&self) -> bool {
        self.state_duration > 0.0 && self.state_timer >= self.state_duration
    }

    pub fn set_invulnerability(&mut self, duration: f32) {
        self.is_invulnerable = true;
        self.invulnerability_timer = duration;
    }

    pub fn start_coyote_time(&mut self, max_time: f32) {
        self.coyote_time = max_time;
    }

    pub fn has_coyote_time(&self) -> bool {
        self.coyote_time > 0.0
    }

    pub fn buffer_jump_input(&mut self, buffer_time: f32) {
        self.jump_buffer_time = buffer_time;
    }

    /// Arm the jump buffer for the press made at `pressed_at`. A press that
    /// already armed it is ignored so the window is not refreshed.
    pub fn buffer_jump_press(&mut self, pressed_at: f64, buffer_time: f32) -> bool {
        if self.armed_jump_press == Some(pressed_at) {
            return false;
        }
        self.armed_jump_press = Some(pressed_at);
        self.buffer_jump_input(buffer_time);
        true
    }

    pub fn clear_jump_buffer(&mut self) {
        self.jump_buffer_time = 0.0;
        self.armed_jump_press = None;
    }

    pub fn has_jump_buffer(&self) -> bool {
        self.jump_buffer_time > 0.0
    }

    /// Enter landing recovery for `duration` ms and close the coyote window.
    ///
    /// A pending jump buffer is extended by the recovery time, so a press
    /// made just before touchdown is still live when landing completes.
    pub fn start_landing(&mut self, duration: f32) {
        if self.has_jump_buffer() {
            self.jump_buffer_time += duration;
        }
        self.coyote_time = 0.0;
        self.change_state(MoveState::Landing, duration);
    }

    pub fn start_slide_cooldown(&mut self, cooldown: f32) {
        self.slide_cooldown = cooldown;
    }

    pub fn can_slide(&self) -> bool {
        self.slide_cooldown <= 0.0
    }
}
