//! # Product Catalog
//!
//! CRUD over products and ingredients, plus [`CatalogView`], the snapshot callers
//! hold between calls.
//!
//! The catalog keeps no cache. After every successful write the caller either
//! re-loads its view or folds the returned records into it with
//! [`CatalogView::upsert`] / [`CatalogView::apply`].

use crate::costing::ProductionOutcome;
use crate::error::{InventoryError, Result};
use crate::model::{Product, ProductCreate, ProductId, ProductPatch, ScopeId};
use crate::repository::{RepositoryError, SharedRepository};
use std::collections::BTreeMap;
use tracing::{debug, info, instrument, warn};

#[derive(Clone)]
pub struct ProductCatalog {
    repo: SharedRepository,
}

impl ProductCatalog {
    pub fn new(repo: SharedRepository) -> Self {
        Self { repo }
    }

    /// Creates a product. A blank name is refused before the repository is called.
    #[instrument(skip(self, params), fields(name = %params.name))]
    pub async fn create(&self, params: ProductCreate) -> Result<Product> {
        if params.name.trim().is_empty() {
            return Err(InventoryError::Validation(
                "product name must not be empty".to_string(),
            ));
        }
        let product = self.repo.create_product(params).await?;
        info!(product_id = %product.id, "Product created");
        Ok(product)
    }

    #[instrument(skip(self))]
    pub async fn patch(&self, id: ProductId, patch: ProductPatch) -> Result<Product> {
        Ok(self.repo.patch_product(id, patch).await?)
    }

    /// Removes a product. Deleting an id that is already gone succeeds.
    ///
    /// Recipes that reference the product are left alone.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: ProductId) -> Result<()> {
        match self.repo.delete_product(id.clone()).await {
            Ok(()) => {
                info!(product_id = %id, "Product deleted");
                Ok(())
            }
            Err(RepositoryError::NotFound(_)) => {
                debug!(product_id = %id, "Already deleted");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, scope: &ScopeId) -> Result<Vec<Product>> {
        Ok(self.repo.list_products(scope).await?)
    }

    /// Looks up one product of `scope`.
    pub async fn get(&self, scope: &ScopeId, id: &ProductId) -> Result<Product> {
        self.list(scope)
            .await?
            .into_iter()
            .find(|p| &p.id == id)
            .ok_or_else(|| InventoryError::NotFound(id.to_string()))
    }
}

/// Caller-held snapshot of one scope's catalog, keyed by id.
///
/// Products of any other scope never enter the view.
#[derive(Debug, Clone)]
pub struct CatalogView {
    scope: ScopeId,
    products: BTreeMap<ProductId, Product>,
}

impl CatalogView {
    /// Fetches every product of `scope`.
    pub async fn load(catalog: &ProductCatalog, scope: &ScopeId) -> Result<Self> {
        let products = catalog.list(scope).await?;
        Ok(Self::from_products(scope.clone(), products))
    }

    pub fn from_products(scope: ScopeId, products: impl IntoIterator<Item = Product>) -> Self {
        let products = products
            .into_iter()
            .filter(|p| p.scope == scope)
            .map(|p| (p.id.clone(), p))
            .collect();
        Self { scope, products }
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.get(id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    pub fn ingredients(&self) -> impl Iterator<Item = &Product> {
        self.products.values().filter(|p| p.is_ingredient)
    }

    pub fn finished_goods(&self) -> impl Iterator<Item = &Product> {
        self.products.values().filter(|p| !p.is_ingredient)
    }

    /// Inserts or replaces a product returned by a write. A product of another
    /// scope is ignored.
    pub fn upsert(&mut self, product: Product) {
        if product.scope != self.scope {
            warn!(
                product_id = %product.id,
                scope = %product.scope,
                view = %self.scope,
                "Product outside the view's scope ignored"
            );
            return;
        }
        self.products.insert(product.id.clone(), product);
    }

    pub fn remove(&mut self, id: &ProductId) -> Option<Product> {
        self.products.remove(id)
    }

    /// Folds the records written by a production run into the view.
    pub fn apply(&mut self, outcome: &ProductionOutcome) {
        self.upsert(outcome.product.clone());
        for ingredient in &outcome.ingredients {
            self.upsert(ingredient.clone());
        }
    }
}
