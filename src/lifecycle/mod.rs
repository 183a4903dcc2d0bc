//! # System Lifecycle
//!
//! Starting, wiring and stopping the in-process inventory runtime.
//!
//! ## The InventorySystem
//!
//! [`InventorySystem`] spawns the product and ledger actors, puts an
//! [`ActorRepository`](crate::repository::ActorRepository) in front of them and
//! hands the same repository to every service:
//!
//! ```rust,ignore
//! let config = EngineConfig::load()?;
//! let system = InventorySystem::new(&config);
//!
//! let report = system
//!     .importer
//!     .apply(&templates::bakery(), &[0, 5, 6], ImportMode::Merge)
//!     .await?;
//!
//! let view = system.view().await?;
//! system.shutdown().await?;
//! ```
//!
//! Neither actor needs the other, so both run with an empty `()` context.
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop every client** - the services and the repository hold the only senders
//! 2. **Actors detect closure** - `receiver.recv()` returns `None`
//! 3. **Await completion** - each actor logs its final size and exits
//!
//! ## Observability
//!
//! [`setup_tracing`] installs the subscriber. See the [`tracing`](self::tracing) module.

pub mod inventory_system;
pub mod tracing;

pub use self::inventory_system::InventorySystem;
pub use self::tracing::setup_tracing;
