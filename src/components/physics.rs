//! Kinematic body for platformer characters.
//!
//! The [`Physics`] component stores velocity, an acceleration accumulator
//! that the physics system drains every fixed step, and the grounded state
//! the movement state machine reacts to.
//!
//! Velocity caps are only enforced by [`Physics::set_velocity`]. Gameplay code
//! that drives motion directly (rolls, slides, ground locomotion) writes the
//! fields and is not clamped.
//!
//! `mass` is used as a divisor by [`Physics::apply_force`] and
//! [`Physics::apply_impulse`] and must stay above zero; it is not validated.

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

use crate::tuning;
use crate::world::{ComponentKind, GameComponent};

/// Velocity, acceleration and grounded state of an entity.
#[derive(Component, Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Physics {
    /// Horizontal velocity in px/s.
    pub velocity_x: f32,
    /// Vertical velocity in px/s (positive is down).
    pub velocity_y: f32,
    /// Accumulated acceleration in px/s², reset after each fixed step.
    pub acceleration_x: f32,
    pub acceleration_y: f32,
    /// Gravity in px/s² applied while airborne.
    pub gravity: f32,
    /// Ground deceleration in px/s².
    pub friction: f32,
    pub is_grounded: bool,
    /// Milliseconds continuously grounded.
    pub grounded_time: f32,
    pub mass: f32,
    pub max_velocity_x: f32,
    pub max_velocity_y: f32,
}

impl GameComponent for Physics {
    const KIND: ComponentKind = ComponentKind::Physics;
}

impl Default for Physics {
    fn default() -> Self {
        Self::new()
    }
}

impl Physics {
    pub fn new() -> Self {
        Self {
            velocity_x: 0.0,
            velocity_y: 0.0,
            acceleration_x: 0.0,
            acceleration_y: 0.0,
            gravity: tuning::physics::GRAVITY,
            friction: tuning::physics::DEFAULT_FRICTION,
            is_grounded: false,
            grounded_time: 0.0,
            mass: 1.0,
            max_velocity_x: tuning::physics::DEFAULT_MAX_VELOCITY,
            max_velocity_y: tuning::physics::MAX_FALL_SPEED,
        }
    }

    /// Set velocity, clamping each axis symmetrically to its cap.
    pub fn set_velocity(&mut self, vx: f32, vy: f32) {
        self.velocity_x = vx.clamp(-self.max_velocity_x, self.max_velocity_x);
        self.velocity_y = vy.clamp(-self.max_velocity_y, self.max_velocity_y);
    }

    /// Accumulate a force; integrated on the next fixed step.
    pub fn apply_force(&mut self, fx: f32, fy: f32) {
        self.acceleration_x += fx / self.mass;
        self.acceleration_y += fy / self.mass;
    }

    /// Instant velocity change.
    pub fn apply_impulse(&mut self, ix: f32, iy: f32) {
        self.velocity_x += ix / self.mass;
        self.velocity_y += iy / self.mass;
    }

    /// Update the grounded flag. Any transition restarts `grounded_time`.
    pub fn set_grounded(&mut self, grounded: bool) {
        if grounded != self.is_grounded {
            self.grounded_time = 0.0;
        }
        self.is_grounded = grounded;
    }

    /// Advance `grounded_time` by `delta_ms` while grounded, zero it otherwise.
    pub fn update_grounded_time(&mut self, delta_ms: f32) {
        if self.is_grounded {
            self.grounded_time += delta_ms;
        } else {
            self.grounded_time = 0.0;
        }
    }
}
