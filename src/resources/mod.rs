//! Shared session state made available to systems.
//!
//! Long-lived data that is not attached to any entity: raw input, the camera,
//! session flags, the fixed-step clock and configuration. The
//! [`Resources`] table is passed explicitly into every system call.
//!
//! Overview
//! - `camera` – camera position, zoom, bounds and screen shake
//! - `gameconfig` – INI-backed session configuration
//! - `gamestate` – pause/game-over flags, level and player entity
//! - `input` – raw key/mouse state and the single buffered action
//! - `registry` – the [`Resources`] table itself
//! - `worldtime` – frame clock and fixed-step accumulator
pub mod camera;
pub mod gameconfig;
pub mod gamestate;
pub mod input;
pub mod registry;
pub mod worldtime;

pub use registry::{Resource, ResourceKind, Resources};
