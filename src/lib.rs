//! # POS Inventory
//!
//! Stock tracking and recipe costing for a point-of-sale catalog.
//!
//! The crate keeps product stock, derives ingredient consumption from recipes when
//! finished goods are produced, records every stock change in an append-only
//! ledger, converts between quantity and price for goods sold by weight or volume,
//! and bulk-imports catalog templates.
//!
//! ## Module Tour
//!
//! ### 1. The Services
//! - [`catalog`]: [`ProductCatalog`](catalog::ProductCatalog) CRUD and the
//!   caller-held [`CatalogView`](catalog::CatalogView).
//! - [`ledger`]: [`StockLedger`](ledger::StockLedger), append and list movements.
//! - [`converter`]: pure quantity/price helpers.
//! - [`costing`]: [`RecipeCostingEngine`](costing::RecipeCostingEngine) for cost,
//!   margin and cascading production.
//! - [`importer`]: [`TemplateImporter`](importer::TemplateImporter), two-phase
//!   template import.
//!
//! ### 2. Persistence
//! The services only see the [`InventoryRepository`](repository::InventoryRepository)
//! trait. The bundled implementation, [`ActorRepository`](repository::ActorRepository),
//! stores products and movements in two actors built on
//! [`resource_actors::ResourceActor`]:
//! - [`product_actor`] / [`ledger_actor`]: the entity hooks and their errors.
//! - [`clients`]: typed wrappers over `ResourceClient<T>`.
//!
//! ### 3. The Orchestrator ([`lifecycle`])
//! [`InventorySystem`](lifecycle::InventorySystem) spawns the actors, wires the
//! services from an [`EngineConfig`](crate::config::EngineConfig) and shuts everything
//! down.
//!
//! ## Errors
//!
//! Caller-facing operations return [`InventoryError`](error::InventoryError).
//! Conditions that are not errors (a recipe pointing at a deleted ingredient, too
//! little stock to deduct in full) are reported in result values and logged with
//! `warn!`.
//!
//! ## Running the Demo
//!
//! ```bash
//! RUST_LOG=info cargo run
//! ```

pub mod catalog;
pub mod clients;
pub mod config;
pub mod converter;
pub mod costing;
pub mod error;
pub mod importer;
pub mod ledger;
pub mod ledger_actor;
pub mod lifecycle;
pub mod model;
pub mod product_actor;
pub mod repository;
pub mod templates;

pub use error::{InventoryError, Result};
