//! World-space placement of an entity.
//!
//! [`Transform`] stores the pivot position, rotation, non-uniform scale and
//! the horizontal facing sign. `facing` is always -1 or 1 once created:
//! [`Transform::set_facing`] coerces through the sign of its argument and
//! [`Transform::flip_facing`] negates it.

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

use crate::world::{ComponentKind, GameComponent};

/// Position, rotation, scale and facing of an entity.
#[derive(Component, Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// World X in pixels.
    pub x: f32,
    /// World Y in pixels (grows downward).
    pub y: f32,
    /// Rotation in radians.
    pub rotation: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    /// -1 for left, 1 for right.
    facing: f32,
}

impl GameComponent for Transform {
    const KIND: ComponentKind = ComponentKind::Transform;
}

impl Default for Transform {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl Transform {
    /// Create a transform at `(x, y)` facing right.
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            facing: 1.0,
        }
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    /// Move by a delta in pixels.
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.x += dx;
        self.y += dy;
    }

    /// Current facing sign, -1 or 1.
    pub fn facing(&self) -> f32 {
        self.facing
    }

    /// Set facing from the sign of `facing`.
    ///
    /// Zero (and NaN) keep the current direction so the sign never collapses.
    pub fn set_facing(&mut self, facing: f32) {
        if facing > 0.0 {
            self.facing = 1.0;
        } else if facing < 0.0 {
            self.facing = -1.0;
        }
    }

    pub fn flip_facing(&mut self) {
        self.facing = -self.facing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_new_faces_right() {
        let t = Transform::new(3.0, 4.0);
        assert_eq!(t.x, 3.0);
        assert_eq!(t.y, 4.0);
        assert_eq!(t.facing(), 1.0);
        assert_eq!(t.scale_x, 1.0);
        assert_eq!(t.scale_y, 1.0);
    }

    #[test]
    fn test_set_facing_uses_sign() {
        let mut t = Transform::default();
        t.set_facing(-42.0);
        assert_eq!(t.facing(), -1.0);
        t.set_facing(0.5);
        assert_eq!(t.facing(), 1.0);
    }

    #[test]
    fn test_set_facing_zero_keeps_direction() {
        let mut t = Transform::default();
        t.set_facing(-1.0);
        t.set_facing(0.0);
        assert_eq!(t.facing(), -1.0);
        t.set_facing(f32::NAN);
        assert_eq!(t.facing(), -1.0);
    }

    #[test]
    fn test_flip_facing() {
        let mut t = Transform::default();
        t.flip_facing();
        assert_eq!(t.facing(), -1.0);
        t.flip_facing();
        assert_eq!(t.facing(), 1.0);
    }

    #[test]
    fn test_translate_and_set_position() {
        let mut t = Transform::new(1.0, 1.0);
        t.translate(2.0, -3.0);
        assert_eq!((t.x, t.y), (3.0, -2.0));
        t.set_position(10.0, 20.0);
        assert_eq!((t.x, t.y), (10.0, 20.0));
    }
}
