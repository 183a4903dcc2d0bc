//! Error types for the Product actor.

use thiserror::Error;

/// Errors that can occur during product operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    /// Products must carry a non-blank name.
    #[error("Product name must not be empty")]
    EmptyName,

    /// Prices and costs are never negative.
    #[error("Invalid {field}: {cents} cents")]
    NegativeAmount { field: &'static str, cents: i64 },

    /// The requested product was not found.
    #[error("Product not found: {0}")]
    NotFound(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
