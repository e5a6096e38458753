//! Edgecore gameplay library.
//!
//! The ECS core of a 2D action-platformer: world and components, the
//! movement state machine, fixed-step physics, input projection and camera.
//! Exposed as a library for the headless binary and integration tests.

pub mod archetypes;
pub mod components;
pub mod demo;
pub mod error;
pub mod game;
pub mod render;
pub mod resources;
pub mod systems;
pub mod tuning;
pub mod world;
