//! # Ledger Client
//!
//! High-level API for the append-only `StockMovement` actor.
use crate::ledger_actor::LedgerError;
use crate::model::{NewStockMovement, ScopeId, StockMovement, StockMovementId};
use async_trait::async_trait;
use resource_actors::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for interacting with the Ledger actor.
#[derive(Clone)]
pub struct LedgerClient {
    inner: ResourceClient<StockMovement>,
}

impl LedgerClient {
    pub fn new(inner: ResourceClient<StockMovement>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<StockMovement> for LedgerClient {
    type Error = LedgerError;

    fn inner(&self) -> &ResourceClient<StockMovement> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::EntityError(inner) => match inner.downcast_ref::<LedgerError>() {
                Some(refused) => refused.clone(),
                None => LedgerError::ActorCommunicationError(inner.to_string()),
            },
            other => LedgerError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl LedgerClient {
    #[instrument(skip(self))]
    pub async fn append(&self, movement: NewStockMovement) -> Result<StockMovementId, LedgerError> {
        debug!("Sending request");
        self.inner.create(movement).await.map_err(Self::map_error)
    }

    /// Every movement of `scope`, oldest first.
    #[instrument(skip(self))]
    pub async fn movements_in(&self, scope: &ScopeId) -> Result<Vec<StockMovement>, LedgerError> {
        let mut movements = self.list().await?;
        movements.retain(|m| &m.scope == scope);
        Ok(movements)
    }
}
