//! # Runtime Errors
//!
//! Failures raised by the actor runtime itself, as opposed to a record refusing a write.

/// Errors that can occur while talking to a `ResourceActor`.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// True when the failure came from the channel rather than from the store.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::ActorClosed | Self::ActorDropped)
    }
}
