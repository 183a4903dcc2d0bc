//! # Persistence Repository
//!
//! The contract the inventory core consumes for storage, and its in-process
//! implementation on top of the product and ledger actors.
//!
//! The core never talks to a store directly: [`ProductCatalog`](crate::catalog::ProductCatalog)
//! and [`StockLedger`](crate::ledger::StockLedger) hold a [`SharedRepository`]. Any
//! transport (HTTP service, database, actors) can sit behind it.

use crate::clients::{LedgerClient, ProductClient};
use crate::ledger_actor::LedgerError;
use crate::model::{
    NewStockMovement, Product, ProductCreate, ProductId, ProductPatch, ScopeId, StockMovement,
};
use crate::product_actor::ProductError;
use async_trait::async_trait;
use resource_actors::ActorClient;
use std::sync::Arc;
use thiserror::Error;
use tracing::instrument;

/// Failure reported by a repository call.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RepositoryError {
    /// No record with this id.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// The store refused the write (invalid fields, immutable record).
    #[error("Write rejected: {0}")]
    Rejected(String),

    /// The store could not be reached or answered abnormally.
    #[error("Transport failure: {0}")]
    Transport(String),
}

impl From<ProductError> for RepositoryError {
    fn from(e: ProductError) -> Self {
        match e {
            ProductError::NotFound(id) => RepositoryError::NotFound(id),
            ProductError::ActorCommunicationError(msg) => RepositoryError::Transport(msg),
            refused => RepositoryError::Rejected(refused.to_string()),
        }
    }
}

impl From<LedgerError> for RepositoryError {
    fn from(e: LedgerError) -> Self {
        match e {
            LedgerError::ActorCommunicationError(msg) => RepositoryError::Transport(msg),
            refused => RepositoryError::Rejected(refused.to_string()),
        }
    }
}

/// Storage operations the inventory core depends on.
#[async_trait]
pub trait InventoryRepository: Send + Sync {
    async fn create_product(&self, fields: ProductCreate) -> Result<Product, RepositoryError>;

    async fn patch_product(
        &self,
        id: ProductId,
        patch: ProductPatch,
    ) -> Result<Product, RepositoryError>;

    async fn delete_product(&self, id: ProductId) -> Result<(), RepositoryError>;

    async fn list_products(&self, scope: &ScopeId) -> Result<Vec<Product>, RepositoryError>;

    async fn append_stock_movement(&self, fields: NewStockMovement)
        -> Result<(), RepositoryError>;

    async fn list_stock_movements(
        &self,
        scope: &ScopeId,
    ) -> Result<Vec<StockMovement>, RepositoryError>;
}

pub type SharedRepository = Arc<dyn InventoryRepository>;

/// Repository backed by the product and ledger actors.
#[derive(Clone)]
pub struct ActorRepository {
    products: ProductClient,
    ledger: LedgerClient,
}

impl ActorRepository {
    pub fn new(products: ProductClient, ledger: LedgerClient) -> Self {
        Self { products, ledger }
    }

    pub fn shared(self) -> SharedRepository {
        Arc::new(self)
    }
}

#[async_trait]
impl InventoryRepository for ActorRepository {
    #[instrument(skip(self))]
    async fn create_product(&self, fields: ProductCreate) -> Result<Product, RepositoryError> {
        Ok(self.products.create_product(fields).await?)
    }

    #[instrument(skip(self))]
    async fn patch_product(
        &self,
        id: ProductId,
        patch: ProductPatch,
    ) -> Result<Product, RepositoryError> {
        Ok(self.products.patch_product(id, patch).await?)
    }

    #[instrument(skip(self))]
    async fn delete_product(&self, id: ProductId) -> Result<(), RepositoryError> {
        Ok(self.products.delete(id).await?)
    }

    #[instrument(skip(self))]
    async fn list_products(&self, scope: &ScopeId) -> Result<Vec<Product>, RepositoryError> {
        Ok(self.products.products_in(scope).await?)
    }

    #[instrument(skip(self))]
    async fn append_stock_movement(
        &self,
        fields: NewStockMovement,
    ) -> Result<(), RepositoryError> {
        self.ledger.append(fields).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_stock_movements(
        &self,
        scope: &ScopeId,
    ) -> Result<Vec<StockMovement>, RepositoryError> {
        Ok(self.ledger.movements_in(scope).await?)
    }
}

/// Actor-backed repository on fresh product and ledger actors, for unit tests.
#[cfg(test)]
pub(crate) fn spawn_in_memory() -> SharedRepository {
    let (product_actor, products) = crate::product_actor::new(32);
    let (ledger_actor, ledger) = crate::ledger_actor::new(32);
    tokio::spawn(product_actor.run(()));
    tokio::spawn(ledger_actor.run(()));
    ActorRepository::new(products, ledger).shared()
}
