//! Gameplay systems.
//!
//! Each system implements [`GameSystem`](crate::world::GameSystem) and is
//! registered on the [`World`](crate::world::World) in execution order:
//! input, movement, physics, camera. Systems never call each other; they
//! communicate only through component data and the
//! [`Resources`](crate::resources::Resources) table.
//!
//! Submodules overview
//! - [`camera`] – follow the player with dead zone and look-ahead, decay screen shake
//! - [`input`] – project [`InputState`](crate::resources::input::InputState) into player intents
//! - [`movement`] – drive the movement state machine and set state-driven velocities
//! - [`physics`] – fixed-step integration, ground plane and world bounds

pub mod camera;
pub mod input;
pub mod movement;
pub mod physics;
