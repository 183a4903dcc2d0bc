//! Type-safe wrappers around [`ResourceClient`](resource_actors::ResourceClient).

pub mod ledger_client;
pub mod product_client;

pub use ledger_client::*;
pub use product_client::*;
