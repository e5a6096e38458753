//! Error types for the gameplay core.
//!
//! Every failure here is a logic error in entity lifetime or system
//! ordering, so nothing is retried: errors are returned to the caller and
//! propagate out of [`Game::frame`](crate::game::Game::frame), which stops
//! the loop.

use thiserror::Error;

use crate::world::{ComponentKind, EntityId};

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Main error type for the gameplay core.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// The entity id was never created or has been removed.
    #[error("entity {0} not found")]
    EntityNotFound(EntityId),

    /// The entity exists but does not carry the requested component.
    #[error("component {kind:?} not found on entity {entity}")]
    ComponentNotFound {
        entity: EntityId,
        kind: ComponentKind,
    },

    /// No resource is registered under this name.
    #[error("resource '{0}' not found")]
    ResourceNotFound(&'static str),

    /// Configuration file could not be read or written.
    #[error("configuration error: {0}")]
    Config(String),

    /// A render sink could not encode or emit a frame.
    #[error("render error: {0}")]
    Render(String),
}
