//! Movement state machine driver.
//!
//! For every entity carrying [`PlayerInput`], [`Transform`], [`Physics`] and
//! [`MovementState`], once per variable-rate tick:
//!
//! 1. advance the state machine timers by the frame delta
//! 2. dispatch on the current [`MoveState`] into one of six handlers
//!    (grounded, airborne, landing, dodge roll, backstep, crouch slide)
//! 3. update facing from left/right input when the state allows movement
//!
//! Handlers write horizontal velocity directly; position integration and
//! gravity belong to the physics system.
//!
//! A buffered jump is consumed only when a jump actually starts from it,
//! both the copy on [`PlayerInput`] and the pending entry in
//! [`InputState`](crate::resources::input::InputState), so a single press
//! cannot fire twice. A press seen in the air arms the jump buffer, which
//! survives landing recovery and fires the jump as soon as landing ends.
use log::debug;

use crate::components::movementstate::{MoveState, MovementState};
use crate::components::physics::Physics;
use crate::components::playerinput::{BufferedAction, PlayerInput};
use crate::components::transform::Transform;
use crate::error::Result;
use crate::resources::Resources;
use crate::resources::input::InputState;
use crate::tuning::{backstep, crouch_slide, dodge_roll, jump_forgiveness, movement};
use crate::world::{EntityId, GameSystem, World};

/// Player movement driver. Variable-rate only.
#[derive(Debug, Default)]
pub struct MovementSystem;

impl MovementSystem {
    pub fn new() -> Self {
        Self
    }
}

/// Mutable view of one player entity for the duration of a tick.
struct Mover<'a> {
    id: EntityId,
    input: &'a mut PlayerInput,
    transform: &'a mut Transform,
    physics: &'a mut Physics,
    state: &'a mut MovementState,
}

/// Constant speed of a fixed-distance move, in px/s.
fn move_speed(distance: f32, duration_ms: f32) -> f32 {
    distance / (duration_ms / 1000.0)
}

impl Mover<'_> {
    fn change_state(&mut self, new_state: MoveState, duration: f32) {
        debug!(
            "Entity {}: {:?} -> {:?}",
            self.id,
            self.state.current_state(),
            new_state
        );
        self.state.change_state(new_state, duration);
    }

    fn wants_jump(&self) -> bool {
        self.input.jump
            || self.input.has_buffered(BufferedAction::Jump)
            || self.state.has_jump_buffer()
    }

    fn handle(&mut self, input_state: &mut InputState) {
        match self.state.current_state() {
            MoveState::Idle
            | MoveState::Walking
            | MoveState::Running
            | MoveState::Crouching
            | MoveState::CrouchWalking => self.handle_grounded(input_state),
            MoveState::Jumping | MoveState::Falling => self.handle_airborne(input_state),
            MoveState::Landing => self.handle_landing(input_state),
            MoveState::DodgeRoll => self.handle_dodge_roll(),
            MoveState::Backstep => self.handle_backstep(),
            MoveState::CrouchSlide => self.handle_crouch_slide(),
        }
        self.update_facing();
    }

    fn handle_grounded(&mut self, input_state: &mut InputState) {
        if self.wants_jump() && (self.state.can_jump() || self.state.has_coyote_time()) {
            self.start_jump(input_state);
            return;
        }

        let wants_roll = self.input.dodge_roll || self.input.has_buffered(BufferedAction::Roll);
        if wants_roll && self.state.can_dodge() {
            self.input.consume_buffered_input();
            input_state.consume_buffered_action(BufferedAction::Roll);
            self.change_state(MoveState::DodgeRoll, dodge_roll::DURATION);
            return;
        }

        if self.input.backstep && self.state.can_dodge() {
            self.change_state(MoveState::Backstep, backstep::DURATION);
            return;
        }

        let moving = self.input.is_moving_horizontally();
        if self.input.crouch && moving && self.state.can_slide() {
            self.start_crouch_slide();
            return;
        }

        let (target_speed, new_state) = if self.input.crouch {
            let state = if moving {
                MoveState::CrouchWalking
            } else {
                MoveState::Crouching
            };
            (movement::CROUCH_SPEED, state)
        } else if moving {
            if self.input.run {
                (movement::RUN_SPEED, MoveState::Running)
            } else {
                (movement::WALK_SPEED, MoveState::Walking)
            }
        } else {
            (0.0, MoveState::Idle)
        };

        self.physics.velocity_x = if self.input.move_left {
            -target_speed
        } else if self.input.move_right {
            target_speed
        } else {
            0.0
        };

        if new_state != self.state.current_state() {
            self.change_state(new_state, 0.0);
        }
    }

    fn handle_airborne(&mut self, input_state: &mut InputState) {
        // Walked off a ledge: the coyote window still allows a jump.
        if self.state.current_state() == MoveState::Falling
            && self.state.has_coyote_time()
            && (self.input.jump || self.input.has_buffered(BufferedAction::Jump))
        {
            self.start_jump(input_state);
            return;
        }

        // Remember an early press so it fires after touchdown. The pending
        // entry stays in the input source until a jump starts from it.
        if let Some(pressed) = self
            .input
            .buffered_input
            .filter(|b| b.action == BufferedAction::Jump)
        {
            self.state
                .buffer_jump_press(pressed.timestamp, jump_forgiveness::JUMP_BUFFER);
        }

        let air_speed = movement::WALK_SPEED * movement::AIR_CONTROL_FACTOR;
        let target_velocity_x = if self.input.move_left {
            -air_speed
        } else if self.input.move_right {
            air_speed
        } else {
            0.0
        };
        self.physics.velocity_x +=
            (target_velocity_x - self.physics.velocity_x) * movement::AIR_CONTROL_BLEND;

        if self.physics.is_grounded {
            debug!(
                "Entity {}: {:?} -> {:?}",
                self.id,
                self.state.current_state(),
                MoveState::Landing
            );
            self.state.start_landing(movement::LANDING_DURATION);
        }
    }

    fn handle_landing(&mut self, input_state: &mut InputState) {
        self.physics.velocity_x = 0.0;
        if self.state.is_state_complete() {
            self.change_state(MoveState::Idle, 0.0);
            if self.wants_jump() {
                self.start_jump(input_state);
            }
        }
    }

    fn handle_dodge_roll(&mut self) {
        let speed = move_speed(dodge_roll::DISTANCE, dodge_roll::DURATION);
        self.physics.velocity_x = speed * self.transform.facing();

        if self.state.state_timer() < dodge_roll::I_FRAMES_START && !self.state.is_invulnerable() {
            self.state.set_invulnerability(dodge_roll::I_FRAMES_START);
        }

        if self.state.is_state_complete() {
            self.physics.velocity_x = 0.0;
            self.change_state(MoveState::Idle, 0.0);
        }
    }

    fn handle_backstep(&mut self) {
        let speed = move_speed(backstep::DISTANCE, backstep::DURATION);
        self.physics.velocity_x = -speed * self.transform.facing();

        if self.state.state_timer() < backstep::I_FRAMES_START && !self.state.is_invulnerable() {
            self.state.set_invulnerability(backstep::I_FRAMES_START);
        }

        if self.state.is_state_complete() {
            self.physics.velocity_x = 0.0;
            self.change_state(MoveState::Idle, 0.0);
        }
    }

    fn handle_crouch_slide(&mut self) {
        // Direction is locked in on the first tick and held afterwards.
        if self.state.state_timer() == 0.0 {
            self.physics.velocity_x = self.slide_velocity();
        }

        if self.state.is_state_complete() {
            self.physics.velocity_x = 0.0;
            self.state.start_slide_cooldown(crouch_slide::COOLDOWN);
            let next = if self.input.crouch {
                MoveState::Crouching
            } else {
                MoveState::Idle
            };
            self.change_state(next, 0.0);
        }
    }

    fn slide_velocity(&self) -> f32 {
        move_speed(crouch_slide::DISTANCE, crouch_slide::DURATION) * self.transform.facing()
    }

    fn start_jump(&mut self, input_state: &mut InputState) {
        self.physics.velocity_y = -movement::JUMP_VELOCITY_MIN;
        self.physics.set_grounded(false);
        self.change_state(MoveState::Jumping, 0.0);

        self.state.clear_jump_buffer();
        self.state.coyote_time = 0.0;
        if self.input.has_buffered(BufferedAction::Jump) {
            self.input.consume_buffered_input();
        }
        input_state.consume_buffered_action(BufferedAction::Jump);
    }

    fn start_crouch_slide(&mut self) {
        self.change_state(MoveState::CrouchSlide, crouch_slide::DURATION);
        // The state timer is 0 right after entry.
        self.physics.velocity_x = self.slide_velocity();
    }

    fn update_facing(&mut self) {
        if !self.state.can_move() {
            return;
        }
        if self.input.move_left {
            self.transform.set_facing(-1.0);
        } else if self.input.move_right {
            self.transform.set_facing(1.0);
        }
    }
}

impl GameSystem for MovementSystem {
    fn name(&self) -> &'static str {
        "MovementSystem"
    }

    fn update(&mut self, world: &mut World, resources: &mut Resources, dt: f32) -> Result<()> {
        let input_state = resources.input_mut()?;
        let delta_ms = dt * 1000.0;

        let mut query = world.ecs_mut().query::<(
            &EntityId,
            &mut PlayerInput,
            &mut Transform,
            &mut Physics,
            &mut MovementState,
        )>();
        for (id, mut input, mut transform, mut physics, mut state) in
            query.iter_mut(world.ecs_mut())
        {
            state.update(delta_ms);
            let mut mover = Mover {
                id: *id,
                input: &mut input,
                transform: &mut transform,
                physics: &mut physics,
                state: &mut state,
            };
            mover.handle(input_state);
        }
        Ok(())
    }

    fn fixed_update(&mut self, _world: &mut World, _res: &mut Resources, _dt: f32) -> Result<()> {
        Ok(())
    }
}
