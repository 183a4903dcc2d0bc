//! # Ledger Actor
//!
//! Append-only store of [`StockMovement`] records for every scope.
//!
//! - [`entity`] - [`ActorEntity`](resource_actors::ActorEntity) implementation, sign rule
//! - [`error`] - [`LedgerError`]

pub mod entity;
pub mod error;

pub use entity::{check_direction, LedgerAction};
pub use error::*;

use crate::clients::LedgerClient;
use crate::model::StockMovement;
use resource_actors::ResourceActor;

/// Creates a new Ledger actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<StockMovement>, LedgerClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, LedgerClient::new(generic_client))
}
