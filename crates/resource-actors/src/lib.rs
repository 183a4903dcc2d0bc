//! # Resource Actors
//!
//! In-process persistence runtime for the inventory engine. Every kind of record
//! (catalog products, stock movements) is owned by one [`ResourceActor`] running
//! in its own Tokio task; callers talk to it through a cloneable [`ResourceClient`].
//!
//! ## Why actors for a repository?
//!
//! The inventory core treats persistence as an asynchronous collaborator whose
//! calls may suspend and complete out of order. An actor per record kind gives
//! exactly that contract in-process:
//!
//! - **Isolated state**: the store is owned by the actor task, so no `Mutex` is
//!   needed around it.
//! - **Sequential per kind**: messages for one kind are applied in arrival order.
//! - **Parallel across kinds**: the product store and the movement ledger run
//!   independently.
//!
//! ## Layers
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - validation and mutation rules of a record
//! 2. **Runtime Layer** ([`ResourceActor`]) - message loop and the in-memory store
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) - typed requests
//!
//! ## Requests
//!
//! [`ResourceRequest`] carries Create, Get, List, Update, Delete and a custom
//! Action variant. Entities refuse a request by returning their own error from a
//! hook; the runtime wraps it in [`FrameworkError::EntityError`].
//!
//! ```rust,ignore
//! let (actor, client) = ResourceActor::<Product>::new(32);
//! tokio::spawn(actor.run(()));
//!
//! let id = client.create(ProductCreate::ingredient("Flour", Unit::Gram)).await?;
//! let everything = client.list().await?;
//! ```
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers requests from a queue of expectations instead of
//! a real store, which makes transport failures trivial to inject.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
