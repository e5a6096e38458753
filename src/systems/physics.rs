//! Fixed-step physics integration and placeholder collision.
//!
//! Runs only in the fixed phase. For every entity with [`Transform`] and
//! [`Physics`]:
//!
//! - gravity while airborne, capped at `max_velocity_y`
//! - accumulated acceleration added to velocity, then cleared
//! - ground friction toward zero (never past it)
//! - position integrated from velocity
//!
//! Collision is a single infinite ground plane plus a rectangular world
//! boundary, both taken from [`GameConfig`]. Every body is treated as a
//! [`character`](crate::tuning::character)-sized box centred on its
//! transform. Touching down and leaving the plane notify the entity's
//! [`MovementState`] if it has one. A body that is off the ground while its
//! state still says it is standing (a fresh spawn in mid-air) is switched
//! to falling.
use log::debug;

use crate::components::movementstate::{MoveState, MovementState};
use crate::components::physics::Physics;
use crate::components::transform::Transform;
use crate::error::Result;
use crate::resources::Resources;
use crate::resources::gameconfig::{GameConfig, WorldBounds};
use crate::tuning::{character, jump_forgiveness, movement};
use crate::world::{EntityId, GameSystem, World};

/// Gravity, integration and ground/bounds collision. Fixed-rate only.
#[derive(Debug, Clone)]
pub struct PhysicsSystem {
    ground_y: f32,
    bounds: WorldBounds,
}

impl Default for PhysicsSystem {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

impl PhysicsSystem {
    pub fn new(ground_y: f32, bounds: WorldBounds) -> Self {
        Self { ground_y, bounds }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.ground_y, config.world_bounds)
    }

    pub fn ground_y(&self) -> f32 {
        self.ground_y
    }

    pub fn bounds(&self) -> WorldBounds {
        self.bounds
    }

    fn collide(
        &self,
        id: EntityId,
        transform: &mut Transform,
        physics: &mut Physics,
        state: Option<&mut MovementState>,
    ) {
        let half_width = character::WIDTH / 2.0;
        let half_height = character::HEIGHT / 2.0;

        let feet_y = transform.y + half_height;
        if feet_y >= self.ground_y && physics.velocity_y >= 0.0 {
            transform.y = self.ground_y - half_height;
            physics.velocity_y = 0.0;
            if !physics.is_grounded {
                on_landed(id, physics, state);
            }
        } else if feet_y < self.ground_y {
            if physics.is_grounded {
                on_left_ground(id, physics, state);
            } else if let Some(state) = state {
                fall_if_standing(id, state);
            }
        }

        if transform.x - half_width < self.bounds.left {
            transform.x = self.bounds.left + half_width;
            physics.velocity_x = 0.0;
        } else if transform.x + half_width > self.bounds.right {
            transform.x = self.bounds.right - half_width;
            physics.velocity_x = 0.0;
        }

        if transform.y - half_height < self.bounds.top {
            transform.y = self.bounds.top + half_height;
            physics.velocity_y = 0.0;
        } else if transform.y + half_height > self.bounds.bottom {
            transform.y = self.bounds.bottom - half_height;
            physics.velocity_y = 0.0;
        }
    }
}

/// Advance one body by `dt` seconds.
fn integrate(transform: &mut Transform, physics: &mut Physics, dt: f32) {
    if !physics.is_grounded {
        physics.velocity_y += physics.gravity * dt;
        if physics.velocity_y > physics.max_velocity_y {
            physics.velocity_y = physics.max_velocity_y;
        }
    }

    physics.velocity_x += physics.acceleration_x * dt;
    physics.velocity_y += physics.acceleration_y * dt;

    if physics.is_grounded && physics.velocity_x != 0.0 {
        let friction = physics.friction * dt;
        if physics.velocity_x.abs() <= friction {
            physics.velocity_x = 0.0;
        } else {
            physics.velocity_x -= physics.velocity_x.signum() * friction;
        }
    }

    transform.translate(physics.velocity_x * dt, physics.velocity_y * dt);

    physics.acceleration_x = 0.0;
    physics.acceleration_y = 0.0;
}

fn on_landed(id: EntityId, physics: &mut Physics, state: Option<&mut MovementState>) {
    debug!("Entity {} landed", id);
    physics.set_grounded(true);
    let Some(state) = state else {
        return;
    };
    if state.current_state().is_airborne() {
        state.start_landing(movement::LANDING_DURATION);
    } else {
        state.start_coyote_time(0.0);
    }
}

fn on_left_ground(id: EntityId, physics: &mut Physics, state: Option<&mut MovementState>) {
    debug!("Entity {} left the ground", id);
    physics.set_grounded(false);
    let Some(state) = state else {
        return;
    };
    state.start_coyote_time(jump_forgiveness::COYOTE_TIME);
    if state.current_state() != MoveState::Jumping {
        state.change_state(MoveState::Falling, 0.0);
    }
}

/// Airborne without ever leaving the plane, so no coyote window.
fn fall_if_standing(id: EntityId, state: &mut MovementState) {
    if state.current_state().is_grounded_locomotion() {
        debug!("Entity {} is airborne while standing, falling", id);
        state.change_state(MoveState::Falling, 0.0);
    }
}

impl GameSystem for PhysicsSystem {
    fn name(&self) -> &'static str {
        "PhysicsSystem"
    }

    fn update(&mut self, _world: &mut World, _res: &mut Resources, _dt: f32) -> Result<()> {
        Ok(())
    }

    fn fixed_update(&mut self, world: &mut World, _res: &mut Resources, dt: f32) -> Result<()> {
        let mut query = world.ecs_mut().query::<(
            &EntityId,
            &mut Transform,
            &mut Physics,
            Option<&mut MovementState>,
        )>();
        for (id, mut transform, mut physics, mut state) in query.iter_mut(world.ecs_mut()) {
            integrate(&mut transform, &mut physics, dt);
            self.collide(*id, &mut transform, &mut physics, state.as_deref_mut());
            physics.update_grounded_time(dt * 1000.0);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-3;
    const DT: f32 = 1.0 / 60.0;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn spawn(world: &mut World, x: f32, y: f32, physics: Physics) -> EntityId {
        let id = world.create_entity();
        world.add_component(id, Transform::new(x, y)).unwrap();
        world.add_component(id, physics).unwrap();
        id
    }

    fn step(world: &mut World) {
        PhysicsSystem::default()
            .fixed_update(world, &mut Resources::new(), DT)
            .unwrap();
    }

    #[test]
    fn test_gravity_accelerates_airborne_body() {
        let mut world = World::new();
        let id = spawn(&mut world, 0.0, 0.0, Physics::new());
        step(&mut world);
        let physics = world.get_component::<Physics>(id).unwrap();
        assert!(approx_eq(physics.velocity_y, 980.0 * DT));
        let transform = world.get_component::<Transform>(id).unwrap();
        assert!(approx_eq(transform.y, 980.0 * DT * DT));
    }

    #[test]
    fn test_fall_speed_is_capped() {
        let mut world = World::new();
        let mut physics = Physics::new();
        physics.velocity_y = 799.0;
        let id = spawn(&mut world, 0.0, -500.0, physics);
        step(&mut world);
        assert!(approx_eq(
            world.get_component::<Physics>(id).unwrap().velocity_y,
            800.0
        ));
    }

    #[test]
    fn test_acceleration_is_integrated_then_cleared() {
        let mut world = World::new();
        let mut physics = Physics::new();
        physics.gravity = 0.0;
        physics.apply_force(600.0, 0.0);
        let id = spawn(&mut world, 0.0, 0.0, physics);
        step(&mut world);
        let physics = world.get_component::<Physics>(id).unwrap();
        assert!(approx_eq(physics.velocity_x, 10.0));
        assert_eq!(physics.acceleration_x, 0.0);
    }

    #[test]
    fn test_friction_never_overshoots_zero() {
        let mut world = World::new();
        let mut physics = Physics::new();
        physics.set_grounded(true);
        physics.friction = 600.0;
        physics.velocity_x = -5.0;
        let id = spawn(&mut world, 0.0, 268.0, physics);
        step(&mut world);
        assert_eq!(world.get_component::<Physics>(id).unwrap().velocity_x, 0.0);
    }

    #[test]
    fn test_ground_snaps_and_lands() {
        let mut world = World::new();
        let mut physics = Physics::new();
        physics.velocity_y = 300.0;
        let id = spawn(&mut world, 0.0, 266.0, physics);
        let mut state = MovementState::new();
        state.change_state(MoveState::Falling, 0.0);
        world.add_component(id, state).unwrap();

        step(&mut world);

        let transform = world.get_component::<Transform>(id).unwrap();
        assert!(approx_eq(transform.y, 268.0));
        let physics = world.get_component::<Physics>(id).unwrap();
        assert!(physics.is_grounded);
        assert_eq!(physics.velocity_y, 0.0);
        let state = world.get_component::<MovementState>(id).unwrap();
        assert_eq!(state.current_state(), MoveState::Landing);
        assert_eq!(state.state_duration(), 100.0);
    }

    #[test]
    fn test_leaving_ground_starts_coyote_and_falls() {
        let mut world = World::new();
        let mut physics = Physics::new();
        physics.set_grounded(true);
        physics.velocity_y = -100.0;
        let id = spawn(&mut world, 0.0, 268.0, physics);
        world.add_component(id, MovementState::new()).unwrap();

        step(&mut world);

        assert!(!world.get_component::<Physics>(id).unwrap().is_grounded);
        let state = world.get_component::<MovementState>(id).unwrap();
        assert_eq!(state.current_state(), MoveState::Falling);
        assert!(state.has_coyote_time());
    }

    #[test]
    fn test_jumping_state_survives_leaving_ground() {
        let mut world = World::new();
        let mut physics = Physics::new();
        physics.set_grounded(true);
        physics.velocity_y = -500.0;
        let id = spawn(&mut world, 0.0, 268.0, physics);
        let mut state = MovementState::new();
        state.change_state(MoveState::Jumping, 0.0);
        world.add_component(id, state).unwrap();

        step(&mut world);

        let state = world.get_component::<MovementState>(id).unwrap();
        assert_eq!(state.current_state(), MoveState::Jumping);
    }

    #[test]
    fn test_standing_state_in_mid_air_starts_falling() {
        let mut world = World::new();
        let id = spawn(&mut world, 0.0, 200.0, Physics::new());
        world.add_component(id, MovementState::new()).unwrap();

        step(&mut world);

        let state = world.get_component::<MovementState>(id).unwrap();
        assert_eq!(state.current_state(), MoveState::Falling);
        assert!(!state.can_jump());
        assert!(!state.has_coyote_time());
    }

    #[test]
    fn test_locked_state_in_mid_air_is_left_alone() {
        let mut world = World::new();
        let id = spawn(&mut world, 0.0, 200.0, Physics::new());
        let mut state = MovementState::new();
        state.change_state(MoveState::DodgeRoll, 500.0);
        world.add_component(id, state).unwrap();

        step(&mut world);

        let state = world.get_component::<MovementState>(id).unwrap();
        assert_eq!(state.current_state(), MoveState::DodgeRoll);
    }

    #[test]
    fn test_landing_carries_jump_buffer() {
        let mut world = World::new();
        let mut physics = Physics::new();
        physics.velocity_y = 300.0;
        let id = spawn(&mut world, 0.0, 266.0, physics);
        let mut state = MovementState::new();
        state.change_state(MoveState::Jumping, 0.0);
        state.buffer_jump_input(40.0);
        world.add_component(id, state).unwrap();

        step(&mut world);

        let state = world.get_component::<MovementState>(id).unwrap();
        assert_eq!(state.current_state(), MoveState::Landing);
        assert!(approx_eq(state.jump_buffer_time, 140.0));
    }

    #[test]
    fn test_world_bounds_clamp_and_stop() {
        let mut world = World::new();
        let mut physics = Physics::new();
        physics.gravity = 0.0;
        physics.velocity_x = 600.0;
        let id = spawn(&mut world, 380.0, 0.0, physics);

        step(&mut world);

        assert!(approx_eq(
            world.get_component::<Transform>(id).unwrap().x,
            384.0
        ));
        assert_eq!(world.get_component::<Physics>(id).unwrap().velocity_x, 0.0);
    }

    #[test]
    fn test_grounded_time_accumulates() {
        let mut world = World::new();
        let mut physics = Physics::new();
        physics.set_grounded(true);
        let id = spawn(&mut world, 0.0, 268.0, physics);
        step(&mut world);
        step(&mut world);
        assert!(approx_eq(
            world.get_component::<Physics>(id).unwrap().grounded_time,
            2000.0 / 60.0
        ));
    }

    #[test]
    fn test_variable_phase_is_noop() {
        let mut world = World::new();
        let id = spawn(&mut world, 0.0, 0.0, Physics::new());
        PhysicsSystem::default()
            .update(&mut world, &mut Resources::new(), DT)
            .unwrap();
        assert_eq!(world.get_component::<Physics>(id).unwrap().velocity_y, 0.0);
    }
}
