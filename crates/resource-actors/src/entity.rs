//! # ActorEntity Trait
//!
//! The contract a record kind implements to be stored by a [`ResourceActor`](crate::ResourceActor).
//! Associated types pin the payload of every request, so a stock movement can never
//! be created from product fields by accident.
//!
//! Hooks with a default body:
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_delete`]
//!
//! A record kind that must never change after creation (an append-only ledger)
//! refuses in `on_update` and `on_delete`.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any stored record must implement to be managed by `ResourceActor`.
///
/// The `Context` type is injected into every hook when the actor starts
/// (`actor.run(context)`), not when it is constructed.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// Identifier of the record. Generated by the actor from a `u32` sequence.
    type Id: Eq + Hash + Ord + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Fields required to create a record.
    type Create: Send + Sync + Debug;

    /// Partial fields applied by an update.
    type Update: Send + Sync + Debug;

    /// Record-specific operations outside CRUD.
    type Action: Send + Sync + Debug;

    /// Result returned by [`ActorEntity::handle_action`].
    type ActionResult: Send + Sync + Debug;

    /// Dependencies injected at run time. `()` when there are none.
    type Context: Send + Sync;

    /// Error produced by the hooks of this record kind.
    ///
    /// One enum per record kind, shared by every hook.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Build the record from its generated id and creation fields.
    /// Called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Called after construction, before the record is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Apply a partial update in place.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called before the record is removed from the store.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Handle a record-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
