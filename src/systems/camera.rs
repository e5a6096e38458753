//! Camera follow and screen shake.
//!
//! Follows the first player entity (lowest [`EntityId`] with
//! [`PlayerInput`] and [`Transform`]). The target is the player position,
//! pushed ahead along facing while running. The camera only moves by the
//! part of the offset that lies outside the dead zone, and covers a fixed
//! fraction of it per tick. Bounds are applied afterwards.
//!
//! Shake counts down in milliseconds. While it lasts, each tick picks a new
//! random offset scaled by the remaining time; when it runs out the offset
//! snaps back to zero.
use fastrand::Rng;

use crate::components::playerinput::PlayerInput;
use crate::components::transform::Transform;
use crate::error::Result;
use crate::resources::Resources;
use crate::resources::camera::CameraState;
use crate::tuning::camera;
use crate::world::{EntityId, GameSystem, World};

/// Camera driver. Variable-rate only.
#[derive(Debug)]
pub struct CameraSystem {
    rng: Rng,
}

impl Default for CameraSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraSystem {
    pub fn new() -> Self {
        Self { rng: Rng::new() }
    }

    /// Deterministic shake jitter.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Rng::with_seed(seed),
        }
    }

    fn update_shake(&mut self, cam: &mut CameraState, dt: f32) {
        if cam.shake.duration <= 0.0 {
            return;
        }
        cam.shake.duration -= dt * 1000.0;
        if cam.shake.duration <= 0.0 {
            cam.shake.x = 0.0;
            cam.shake.y = 0.0;
            cam.shake.duration = 0.0;
        } else {
            let intensity = cam.shake.duration / camera::SHAKE_FADE;
            cam.shake.x = (self.rng.f32() - 0.5) * camera::SHAKE_AMPLITUDE * intensity;
            cam.shake.y = (self.rng.f32() - 0.5) * camera::SHAKE_AMPLITUDE * intensity;
        }
    }
}

/// Move one axis toward `target`, ignoring the part inside the dead zone.
fn follow_axis(position: f32, target: f32, half_dead_zone: f32) -> f32 {
    let offset = target - position;
    if offset.abs() > half_dead_zone {
        let excess = offset.signum() * (offset.abs() - half_dead_zone);
        position + excess * camera::FOLLOW_FACTOR
    } else {
        position
    }
}

fn follow(cam: &mut CameraState, transform: &Transform, running: bool) {
    let mut target_x = transform.x;
    let target_y = transform.y;
    if running {
        target_x += camera::LOOK_AHEAD_DISTANCE * transform.facing();
    }
    cam.target = Some((target_x, target_y));

    cam.x = follow_axis(cam.x, target_x, camera::DEAD_ZONE_WIDTH / 2.0);
    cam.y = follow_axis(cam.y, target_y, camera::DEAD_ZONE_HEIGHT / 2.0);
    cam.apply_bounds();
}

impl GameSystem for CameraSystem {
    fn name(&self) -> &'static str {
        "CameraSystem"
    }

    fn update(&mut self, world: &mut World, resources: &mut Resources, dt: f32) -> Result<()> {
        let cam = resources.camera_mut()?;

        let mut query = world
            .ecs_mut()
            .query::<(&EntityId, &Transform, &PlayerInput)>();
        let player = query
            .iter(world.ecs())
            .min_by_key(|(id, _, _)| **id)
            .map(|(_, transform, input)| (*transform, input.run));

        let Some((transform, running)) = player else {
            return Ok(());
        };
        follow(cam, &transform, running);
        self.update_shake(cam, dt);
        Ok(())
    }

    fn fixed_update(&mut self, _world: &mut World, _res: &mut Resources, _dt: f32) -> Result<()> {
        Ok(())
    }
}
