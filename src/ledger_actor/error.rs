//! Error types for the Ledger actor.

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum LedgerError {
    /// A movement must change stock.
    #[error("Stock movement quantity must not be zero")]
    ZeroQuantity,

    /// Entries record stock coming in, so their delta is positive.
    #[error("Entry movements must increase stock, got {0}")]
    EntryMustIncrease(Decimal),

    /// Stored movements are never rewritten or removed.
    #[error("Stock movement {0} is immutable")]
    ImmutableMovement(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
