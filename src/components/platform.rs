//! Static platform marker.
//!
//! Platforms are placeholders: the physics system still collides against a
//! single ground plane and ignores this component. The size is kept for the
//! render boundary.

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

use crate::world::{ComponentKind, GameComponent};

/// Axis-aligned platform extent in pixels, centred on the entity's transform.
#[derive(Component, Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub width: f32,
    pub height: f32,
}

impl GameComponent for Platform {
    const KIND: ComponentKind = ComponentKind::Platform;
}

impl Platform {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}
