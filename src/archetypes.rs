//! Entity factories.
//!
//! Each function creates one entity and attaches a fixed component bundle:
//!
//! | archetype | components |
//! |---|---|
//! | player | Transform, Physics, PlayerInput, MovementState |
//! | platform | Transform, Platform |
//! | basic enemy | Transform, Physics |
//!
//! Platforms do not collide yet (the physics system only knows the ground
//! plane) and enemies have no behaviour.
use log::info;

use crate::components::movementstate::MovementState;
use crate::components::physics::Physics;
use crate::components::platform::Platform;
use crate::components::playerinput::PlayerInput;
use crate::components::transform::Transform;
use crate::error::Result;
use crate::world::{EntityId, World};

/// Spawn a player-controlled character at `(x, y)`.
pub fn create_player(world: &mut World, x: f32, y: f32) -> Result<EntityId> {
    let id = world.create_entity();
    world.add_component(id, Transform::new(x, y))?;
    world.add_component(id, Physics::new())?;
    world.add_component(id, PlayerInput::default())?;
    world.add_component(id, MovementState::new())?;
    info!("Spawned player {} at ({}, {})", id, x, y);
    Ok(id)
}

/// Spawn a static platform centred on `(x, y)`.
pub fn create_platform(
    world: &mut World,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
) -> Result<EntityId> {
    let id = world.create_entity();
    world.add_component(id, Transform::new(x, y))?;
    world.add_component(id, Platform::new(width, height))?;
    info!(
        "Spawned platform {} at ({}, {}) size {}x{}",
        id, x, y, width, height
    );
    Ok(id)
}

/// Spawn a physics body with no controller.
pub fn create_basic_enemy(world: &mut World, x: f32, y: f32) -> Result<EntityId> {
    let id = world.create_entity();
    world.add_component(id, Transform::new(x, y))?;
    world.add_component(id, Physics::new())?;
    info!("Spawned enemy {} at ({}, {})", id, x, y);
    Ok(id)
}
