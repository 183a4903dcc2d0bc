use crate::catalog::{CatalogView, ProductCatalog};
use crate::config::EngineConfig;
use crate::costing::RecipeCostingEngine;
use crate::error::Result;
use crate::importer::TemplateImporter;
use crate::ledger::StockLedger;
use crate::model::ScopeId;
use crate::repository::{ActorRepository, SharedRepository};
use tracing::{error, info};

/// The running inventory core for one active scope.
///
/// Owns the actor tasks; every service shares one [`SharedRepository`].
///
/// # Example
///
/// ```ignore
/// let system = InventorySystem::new(&EngineConfig::default());
/// let view = system.view().await?;
/// let bread = view.finished_goods().next().unwrap().clone();
/// let outcome = system.engine.produce(&bread, dec!(10), &view).await?;
/// system.shutdown().await?;
/// ```
pub struct InventorySystem {
    /// Scope used by [`view`](Self::view) and the importer.
    pub scope: ScopeId,

    pub repository: SharedRepository,

    pub catalog: ProductCatalog,

    pub ledger: StockLedger,

    pub engine: RecipeCostingEngine,

    pub importer: TemplateImporter,

    /// Task handles of the actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl InventorySystem {
    /// Spawns the product and ledger actors and wires the services on top.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn new(config: &EngineConfig) -> Self {
        // 1. Create actors
        let (product_actor, product_client) = crate::product_actor::new(config.channel_buffer);
        let (ledger_actor, ledger_client) = crate::ledger_actor::new(config.channel_buffer);

        // 2. Start actors, neither has dependencies
        let product_handle = tokio::spawn(product_actor.run(()));
        let ledger_handle = tokio::spawn(ledger_actor.run(()));

        // 3. Services
        let scope = ScopeId::new(config.scope_id.clone());
        let repository = ActorRepository::new(product_client, ledger_client).shared();
        let catalog = ProductCatalog::new(repository.clone());
        let ledger = StockLedger::new(repository.clone());
        let engine = RecipeCostingEngine::new(catalog.clone(), ledger.clone());
        let importer = TemplateImporter::new(catalog.clone(), engine.clone(), scope.clone());

        info!(scope = %scope, buffer = config.channel_buffer, "Inventory system started");

        Self {
            scope,
            repository,
            catalog,
            ledger,
            engine,
            importer,
            handles: vec![product_handle, ledger_handle],
        }
    }

    /// Fresh snapshot of the active scope.
    pub async fn view(&self) -> Result<CatalogView> {
        CatalogView::load(&self.catalog, &self.scope).await
    }

    /// Gracefully shuts down the system.
    ///
    /// Drops every service so the actor channels close, then waits for the actor
    /// tasks. Clones of the services held elsewhere keep the actors alive until
    /// they are dropped too.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if all actors shut down cleanly
    /// - `Err(String)` if any actor task failed or panicked
    pub async fn shutdown(self) -> std::result::Result<(), String> {
        info!("Shutting down system...");

        drop(self.importer);
        drop(self.engine);
        drop(self.ledger);
        drop(self.catalog);
        drop(self.repository);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ProductCreate, Unit};

    #[tokio::test]
    async fn test_services_share_one_store() {
        let config = EngineConfig {
            scope_id: "bakery".to_string(),
            channel_buffer: 4,
        };
        let system = InventorySystem::new(&config);

        system
            .catalog
            .create(ProductCreate::new(system.scope.clone(), "Bread", Unit::Count))
            .await
            .unwrap();
        let view = system.view().await.unwrap();
        assert_eq!(view.len(), 1);

        system.shutdown().await.unwrap();
    }
}
