//! Render boundary.
//!
//! Drawing is done outside the core. A [`RenderSink`] is handed shared
//! references to the world and resources once per frame, after all
//! simulation for that frame has finished, so it can read anything but
//! mutate nothing.
//!
//! [`WorldSnapshot`] is a serialisable copy of what a renderer needs, and
//! [`JsonSnapshotSink`] is the headless sink used by the binary.
use log::info;
use serde::Serialize;

use crate::components::movementstate::{MoveState, MovementState};
use crate::components::physics::Physics;
use crate::components::platform::Platform;
use crate::components::transform::Transform;
use crate::error::{CoreError, Result};
use crate::resources::Resources;
use crate::resources::camera::CameraState;
use crate::world::{EntityId, World};

/// Consumer of finished frames.
pub trait RenderSink {
    /// Draw the current state. `alpha` is the fixed-step interpolation factor.
    fn render(&mut self, world: &World, resources: &Resources, alpha: f32) -> Result<()>;
}

/// Drawable state of one entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntitySnapshot {
    pub id: EntityId,
    pub transform: Option<Transform>,
    pub physics: Option<Physics>,
    pub state: Option<MoveState>,
    pub invulnerable: bool,
    pub platform: Option<Platform>,
}

/// Everything a renderer reads for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorldSnapshot {
    pub alpha: f32,
    pub camera: CameraState,
    pub entities: Vec<EntitySnapshot>,
}

impl WorldSnapshot {
    /// Copy the drawable state out of the world. Entities are in id order.
    pub fn capture(world: &World, resources: &Resources, alpha: f32) -> Result<Self> {
        let camera = resources.camera()?.clone();
        let entities = world
            .entities()
            .into_iter()
            .map(|id| {
                let movement = world.get_component::<MovementState>(id);
                EntitySnapshot {
                    id,
                    transform: world.get_component::<Transform>(id).copied(),
                    physics: world.get_component::<Physics>(id).copied(),
                    state: movement.map(|m| m.current_state()),
                    invulnerable: movement.is_some_and(|m| m.is_invulnerable()),
                    platform: world.get_component::<Platform>(id).copied(),
                }
            })
            .collect();
        Ok(Self {
            alpha,
            camera,
            entities,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| CoreError::Render(e.to_string()))
    }
}

/// Logs a JSON snapshot every `every` frames.
#[derive(Debug, Clone)]
pub struct JsonSnapshotSink {
    every: u64,
    frames: u64,
    last: Option<String>,
}

impl JsonSnapshotSink {
    /// `every` of 0 disables output.
    pub fn new(every: u64) -> Self {
        Self {
            every,
            frames: 0,
            last: None,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Most recently emitted snapshot.
    pub fn last(&self) -> Option<&str> {
        self.last.as_deref()
    }
}

impl RenderSink for JsonSnapshotSink {
    fn render(&mut self, world: &World, resources: &Resources, alpha: f32) -> Result<()> {
        self.frames += 1;
        if self.every == 0 || self.frames % self.every != 0 {
            return Ok(());
        }
        let json = WorldSnapshot::capture(world, resources, alpha)?.to_json()?;
        info!("frame {}: {}", self.frames, json);
        self.last = Some(json);
        Ok(())
    }
}
