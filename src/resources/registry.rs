//! Named shared resources for one game session.
//!
//! [`Resources`] is owned by the game loop and passed explicitly into every
//! system call. It holds at most one value per [`ResourceKind`]; a system
//! asking for a kind that was never registered gets
//! [`CoreError::ResourceNotFound`].
//!
//! The table is single-writer: whichever system is running owns `&mut` to it.

use rustc_hash::FxHashMap;

use crate::error::{CoreError, Result};
use crate::resources::camera::CameraState;
use crate::resources::gamestate::GameState;
use crate::resources::input::InputState;

/// Names of the shared resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    InputState,
    CameraState,
    GameState,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [
        ResourceKind::InputState,
        ResourceKind::CameraState,
        ResourceKind::GameState,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ResourceKind::InputState => "InputState",
            ResourceKind::CameraState => "CameraState",
            ResourceKind::GameState => "GameState",
        }
    }
}

/// A registered resource value.
#[derive(Debug, Clone)]
pub enum Resource {
    Input(InputState),
    Camera(CameraState),
    Game(GameState),
}

impl Resource {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Resource::Input(_) => ResourceKind::InputState,
            Resource::Camera(_) => ResourceKind::CameraState,
            Resource::Game(_) => ResourceKind::GameState,
        }
    }
}

impl From<InputState> for Resource {
    fn from(value: InputState) -> Self {
        Resource::Input(value)
    }
}

impl From<CameraState> for Resource {
    fn from(value: CameraState) -> Self {
        Resource::Camera(value)
    }
}

impl From<GameState> for Resource {
    fn from(value: GameState) -> Self {
        Resource::Game(value)
    }
}

/// Session-scoped resource table.
#[derive(Debug, Default)]
pub struct Resources {
    entries: FxHashMap<ResourceKind, Resource>,
}

impl Resources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a value under its kind, replacing any previous one.
    pub fn register(&mut self, resource: impl Into<Resource>) {
        let resource = resource.into();
        self.entries.insert(resource.kind(), resource);
    }

    pub fn get(&self, kind: ResourceKind) -> Result<&Resource> {
        self.entries
            .get(&kind)
            .ok_or(CoreError::ResourceNotFound(kind.name()))
    }

    pub fn get_mut(&mut self, kind: ResourceKind) -> Result<&mut Resource> {
        self.entries
            .get_mut(&kind)
            .ok_or(CoreError::ResourceNotFound(kind.name()))
    }

    pub fn has(&self, kind: ResourceKind) -> bool {
        self.entries.contains_key(&kind)
    }

    pub fn remove(&mut self, kind: ResourceKind) -> Option<Resource> {
        self.entries.remove(&kind)
    }

    /// Drop every resource (session teardown).
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn input(&self) -> Result<&InputState> {
        match self.get(ResourceKind::InputState)? {
            Resource::Input(input) => Ok(input),
            _ => Err(CoreError::ResourceNotFound(ResourceKind::InputState.name())),
        }
    }

    pub fn input_mut(&mut self) -> Result<&mut InputState> {
        match self.get_mut(ResourceKind::InputState)? {
            Resource::Input(input) => Ok(input),
            _ => Err(CoreError::ResourceNotFound(ResourceKind::InputState.name())),
        }
    }

    pub fn camera(&self) -> Result<&CameraState> {
        match self.get(ResourceKind::CameraState)? {
            Resource::Camera(camera) => Ok(camera),
            _ => Err(CoreError::ResourceNotFound(ResourceKind::CameraState.name())),
        }
    }

    pub fn camera_mut(&mut self) -> Result<&mut CameraState> {
        match self.get_mut(ResourceKind::CameraState)? {
            Resource::Camera(camera) => Ok(camera),
            _ => Err(CoreError::ResourceNotFound(ResourceKind::CameraState.name())),
        }
    }

    pub fn game(&self) -> Result<&GameState> {
        match self.get(ResourceKind::GameState)? {
            Resource::Game(game) => Ok(game),
            _ => Err(CoreError::ResourceNotFound(ResourceKind::GameState.name())),
        }
    }

    pub fn game_mut(&mut self) -> Result<&mut GameState> {
        match self.get_mut(ResourceKind::GameState)? {
            Resource::Game(game) => Ok(game),
            _ => Err(CoreError::ResourceNotFound(ResourceKind::GameState.name())),
        }
    }
}
