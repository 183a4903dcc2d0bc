//! # Stock Ledger
//!
//! Append-only record of stock changes. The ledger checks the sign of a movement
//! against its kind and nothing else: it never compares against current stock.

use crate::error::{InventoryError, Result};
use crate::ledger_actor::check_direction;
use crate::model::{NewStockMovement, ScopeId, StockMovement};
use crate::repository::SharedRepository;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct StockLedger {
    repo: SharedRepository,
}

impl StockLedger {
    pub fn new(repo: SharedRepository) -> Self {
        Self { repo }
    }

    #[instrument(skip(self, movement), fields(product_id = %movement.product_id, kind = %movement.kind))]
    pub async fn append(&self, movement: NewStockMovement) -> Result<()> {
        check_direction(&movement).map_err(|e| InventoryError::Validation(e.to_string()))?;
        debug!(quantity = %movement.quantity, "Appending movement");
        Ok(self.repo.append_stock_movement(movement).await?)
    }

    /// Every movement recorded for `scope`, oldest first.
    pub async fn movements(&self, scope: &ScopeId) -> Result<Vec<StockMovement>> {
        Ok(self.repo.list_stock_movements(scope).await?)
    }
}
