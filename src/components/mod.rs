//! ECS components for entities.
//!
//! Plain data records attached to entities in the [`World`](crate::world::World),
//! plus small mutators that keep their field invariants. Behaviour lives in
//! [`crate::systems`].
//!
//! Submodules overview:
//! - [`movementstate`] – movement state machine, capability table and timing windows
//! - [`physics`] – velocity, acceleration accumulator and grounded state
//! - [`platform`] – static platform extent (render-only placeholder)
//! - [`playerinput`] – player intents, weapon zone and buffered input record
//! - [`transform`] – world position, rotation, scale and facing sign

pub mod movementstate;
pub mod physics;
pub mod platform;
pub mod playerinput;
pub mod transform;
