//! # Product Actor
//!
//! The catalog store: one [`ResourceActor<Product>`] holding every product and
//! ingredient of every scope.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](resource_actors::ActorEntity) implementation for [`Product`];
//!   products have no custom actions
//! - [`error`] - [`ProductError`]
//! - [`new()`] - factory for the actor and its client
//!
//! ```rust,ignore
//! let (actor, client) = product_actor::new(32);
//! tokio::spawn(actor.run(()));
//!
//! let flour = client
//!     .create_product(ProductCreate::new(scope, "Flour", Unit::Gram).ingredient())
//!     .await?;
//! let restocked = client
//!     .patch_product(flour.id, ProductPatch::stock(dec!(5000)))
//!     .await?;
//! ```

pub mod entity;
pub mod error;

pub use entity::ProductAction;
pub use error::*;

use crate::clients::ProductClient;
use crate::model::Product;
use resource_actors::ResourceActor;

/// Creates a new Product actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Product>, ProductClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, ProductClient::new(generic_client))
}
