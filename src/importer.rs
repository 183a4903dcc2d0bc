//! # Template Importer
//!
//! Bulk-creates catalog entries from a [`Template`] in two phases:
//!
//! 1. every selected ingredient is created, concurrently, and its template name
//!    is mapped to the id the repository generated;
//! 2. every selected finished good has its recipe resolved through that map and
//!    is created, concurrently.
//!
//! Phase 2 starts only once phase 1 has fully completed. A failed creation is
//! logged and reported in [`ImportReport::failures`]; the rest of the batch
//! carries on. Recipe lines naming an ingredient that was not created are
//! dropped and listed in [`ImportReport::dropped_references`].

use crate::catalog::{CatalogView, ProductCatalog};
use crate::costing::RecipeCostingEngine;
use crate::error::{InventoryError, Result};
use crate::model::{ImportMode, Product, ProductId, RecipeLine, ScopeId, Template, TemplateItem};
use futures_util::future::join_all;
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, info, instrument, warn};

/// A template item that could not be created.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportFailure {
    pub item: String,
    pub error: InventoryError,
}

/// A recipe line left out because its ingredient was not created.
#[derive(Debug, Clone, PartialEq)]
pub struct DroppedReference {
    pub item: String,
    pub ingredient: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportReport {
    pub created: Vec<Product>,
    pub failures: Vec<ImportFailure>,
    pub dropped_references: Vec<DroppedReference>,
}

impl ImportReport {
    pub fn created_count(&self) -> usize {
        self.created.len()
    }

    fn record(&mut self, item: &TemplateItem, result: Result<Product>) -> Option<Product> {
        match result {
            Ok(product) => {
                self.created.push(product.clone());
                Some(product)
            }
            Err(error) => {
                warn!(item = %item.name, %error, "Template item not created");
                self.failures.push(ImportFailure {
                    item: item.name.clone(),
                    error,
                });
                None
            }
        }
    }
}

#[derive(Clone)]
pub struct TemplateImporter {
    catalog: ProductCatalog,
    engine: RecipeCostingEngine,
    scope: ScopeId,
}

impl TemplateImporter {
    /// Importer writing into `scope`.
    pub fn new(catalog: ProductCatalog, engine: RecipeCostingEngine, scope: ScopeId) -> Self {
        Self {
            catalog,
            engine,
            scope,
        }
    }

    /// Imports the items of `template` at `selected` indices.
    ///
    /// Indices past the end of the template fail the whole call before anything is
    /// written. Repeated indices import the item once. In [`ImportMode::Replace`]
    /// the scope is emptied first, and a failed delete aborts the import.
    #[instrument(skip(self, template, selected), fields(template = %template.name, scope = %self.scope))]
    pub async fn apply(
        &self,
        template: &Template,
        selected: &[usize],
        mode: ImportMode,
    ) -> Result<ImportReport> {
        let picked: BTreeSet<usize> = selected.iter().copied().collect();
        if let Some(bad) = picked.iter().find(|&&i| i >= template.items.len()) {
            return Err(InventoryError::Validation(format!(
                "template {} has no item {}",
                template.name, bad
            )));
        }

        if mode == ImportMode::Replace {
            self.clear_scope().await?;
        }

        let (ingredients, goods): (Vec<&TemplateItem>, Vec<&TemplateItem>) = picked
            .iter()
            .map(|&i| &template.items[i])
            .partition(|item| item.is_ingredient);

        let mut report = ImportReport::default();

        // Phase 1
        let created = join_all(
            ingredients
                .iter()
                .map(|item| self.catalog.create(item.to_create(&self.scope, Vec::new()))),
        )
        .await;
        let mut ids: HashMap<String, ProductId> = HashMap::new();
        let mut made = Vec::new();
        for (item, result) in ingredients.iter().zip(created) {
            if let Some(product) = report.record(item, result) {
                ids.insert(item.name.clone(), product.id.clone());
                made.push(product);
            }
        }
        let costs = CatalogView::from_products(self.scope.clone(), made);
        debug!(ingredients = ids.len(), "Ingredients created");

        // Phase 2
        let mut costed = Vec::with_capacity(goods.len());
        let mut creates = Vec::with_capacity(goods.len());
        for item in &goods {
            let recipe = self.resolve(item, &ids, &mut report.dropped_references);
            let mut params = item.to_create(&self.scope, recipe);
            if params.cost_cents == 0 && !params.recipe.is_empty() {
                match self.engine.cost_of_recipe(&params.recipe, &costs) {
                    Ok(cost) => params.cost_cents = cost,
                    Err(e) => {
                        report.record(item, Err(e));
                        continue;
                    }
                }
            }
            costed.push(*item);
            creates.push(self.catalog.create(params));
        }
        let created = join_all(creates).await;
        for (item, result) in costed.into_iter().zip(created) {
            report.record(item, result);
        }

        info!(
            created = report.created_count(),
            failed = report.failures.len(),
            dropped = report.dropped_references.len(),
            "Template imported"
        );
        Ok(report)
    }

    /// Deletes every product of the scope.
    async fn clear_scope(&self) -> Result<()> {
        let existing = self.catalog.list(&self.scope).await?;
        debug!(count = existing.len(), "Clearing scope");
        let deletes = existing.into_iter().map(|p| self.catalog.delete(p.id));
        join_all(deletes).await.into_iter().collect()
    }

    fn resolve(
        &self,
        item: &TemplateItem,
        ids: &HashMap<String, ProductId>,
        dropped: &mut Vec<DroppedReference>,
    ) -> Vec<RecipeLine> {
        let mut recipe = Vec::with_capacity(item.recipe.len());
        for line in &item.recipe {
            match ids.get(&line.ingredient_name) {
                Some(id) => recipe.push(RecipeLine::new(id.clone(), line.quantity)),
                None => {
                    warn!(
                        item = %item.name,
                        ingredient = %line.ingredient_name,
                        "Ingredient not imported, recipe line dropped"
                    );
                    dropped.push(DroppedReference {
                        item: item.name.clone(),
                        ingredient: line.ingredient_name.clone(),
                    });
                }
            }
        }
        recipe
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::ConversionError;
    use crate::ledger::StockLedger;
    use crate::model::{
        NewStockMovement, ProductCreate, ProductPatch, StockMovement, TemplateRecipeLine, Unit,
    };
    use crate::repository::{
        spawn_in_memory, InventoryRepository, RepositoryError, SharedRepository,
    };
    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn scope() -> ScopeId {
        ScopeId::new("bakery")
    }

    fn importer(repo: SharedRepository) -> (ProductCatalog, TemplateImporter) {
        let catalog = ProductCatalog::new(repo.clone());
        let engine = RecipeCostingEngine::new(catalog.clone(), StockLedger::new(repo));
        let importer = TemplateImporter::new(catalog.clone(), engine, scope());
        (catalog, importer)
    }

    fn item(name: &str, is_ingredient: bool, recipe: &[(&str, Decimal)]) -> TemplateItem {
        TemplateItem {
            name: name.to_string(),
            category: String::new(),
            unit: if is_ingredient { Unit::Gram } else { Unit::Count },
            price_cents: if is_ingredient { 0 } else { 1500 },
            cost_cents: if is_ingredient { 5 } else { 0 },
            current_stock: Some(dec!(1000)),
            tracks_stock: true,
            is_ingredient,
            available: true,
            recipe: recipe
                .iter()
                .map(|(n, q)| TemplateRecipeLine {
                    ingredient_name: n.to_string(),
                    quantity: *q,
                })
                .collect(),
        }
    }

    fn small_bakery() -> Template {
        Template {
            name: "Small Bakery".to_string(),
            items: vec![
                item("Flour", true, &[]),
                item("Sugar", true, &[]),
                item("Bread", false, &[("Flour", dec!(200))]),
                item("Cake", false, &[("Flour", dec!(100)), ("Sugar", dec!(50))]),
            ],
        }
    }

    /// Refuses to create products with a given name and forwards everything else.
    struct Flaky {
        inner: SharedRepository,
        refuse: &'static str,
    }

    #[async_trait]
    impl InventoryRepository for Flaky {
        async fn create_product(
            &self,
            fields: ProductCreate,
        ) -> std::result::Result<Product, RepositoryError> {
            if fields.name == self.refuse {
                return Err(RepositoryError::Transport("connection reset".to_string()));
            }
            self.inner.create_product(fields).await
        }

        async fn patch_product(
            &self,
            id: ProductId,
            patch: ProductPatch,
        ) -> std::result::Result<Product, RepositoryError> {
            self.inner.patch_product(id, patch).await
        }

        async fn delete_product(&self, id: ProductId) -> std::result::Result<(), RepositoryError> {
            if self.refuse == "*delete*" {
                return Err(RepositoryError::Transport("connection reset".to_string()));
            }
            self.inner.delete_product(id).await
        }

        async fn list_products(
            &self,
            scope: &ScopeId,
        ) -> std::result::Result<Vec<Product>, RepositoryError> {
            self.inner.list_products(scope).await
        }

        async fn append_stock_movement(
            &self,
            fields: NewStockMovement,
        ) -> std::result::Result<(), RepositoryError> {
            self.inner.append_stock_movement(fields).await
        }

        async fn list_stock_movements(
            &self,
            scope: &ScopeId,
        ) -> std::result::Result<Vec<StockMovement>, RepositoryError> {
            self.inner.list_stock_movements(scope).await
        }
    }

    fn flaky(refuse: &'static str) -> SharedRepository {
        Arc::new(Flaky {
            inner: spawn_in_memory(),
            refuse,
        })
    }

    #[tokio::test]
    async fn test_recipes_point_at_created_ingredients() {
        let (catalog, importer) = importer(spawn_in_memory());
        let report = importer
            .apply(&small_bakery(), &[0, 1, 2, 3], ImportMode::Merge)
            .await
            .unwrap();

        assert_eq!(report.created_count(), 4);
        assert!(report.failures.is_empty());

        let view = CatalogView::load(&catalog, &scope()).await.unwrap();
        let by_name = |name: &str| view.products().find(|p| p.name == name).unwrap().clone();
        let flour = by_name("Flour");
        let sugar = by_name("Sugar");
        let cake = by_name("Cake");

        assert_eq!(
            cake.recipe,
            vec![
                RecipeLine::new(flour.id.clone(), dec!(100)),
                RecipeLine::new(sugar.id.clone(), dec!(50)),
            ]
        );
        assert_eq!(by_name("Bread").recipe[0].ingredient_id, flour.id);
        // 100 * 5 + 50 * 5
        assert_eq!(cake.cost_cents, 750);
    }

    #[tokio::test]
    async fn test_unselected_ingredient_is_dropped_from_recipe() {
        let (_, importer) = importer(spawn_in_memory());
        let report = importer
            .apply(&small_bakery(), &[0, 3], ImportMode::Merge)
            .await
            .unwrap();

        assert_eq!(report.created_count(), 2);
        assert_eq!(
            report.dropped_references,
            vec![DroppedReference {
                item: "Cake".to_string(),
                ingredient: "Sugar".to_string(),
            }]
        );
        let cake = report.created.iter().find(|p| p.name == "Cake").unwrap();
        assert_eq!(cake.recipe.len(), 1);
        assert_eq!(cake.cost_cents, 500);
    }

    #[tokio::test]
    async fn test_failed_item_does_not_stop_the_batch() {
        let (catalog, importer) = importer(flaky("Sugar"));
        let report = importer
            .apply(&small_bakery(), &[0, 1, 2, 3], ImportMode::Merge)
            .await
            .unwrap();

        assert_eq!(report.created_count(), 3);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].item, "Sugar");
        assert!(matches!(
            report.failures[0].error,
            InventoryError::Transport(_)
        ));
        assert_eq!(report.dropped_references.len(), 1);
        assert_eq!(catalog.list(&scope()).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_uncostable_item_is_reported_and_the_rest_created() {
        let (catalog, importer) = importer(spawn_in_memory());
        let template = Template {
            name: "Giant Bakery".to_string(),
            items: vec![
                item("Flour", true, &[]),
                item("Huge Loaf", false, &[("Flour", Decimal::MAX)]),
                item("Bread", false, &[("Flour", dec!(2))]),
            ],
        };

        let report = importer
            .apply(&template, &[0, 1, 2], ImportMode::Merge)
            .await
            .unwrap();

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].item, "Huge Loaf");
        assert!(matches!(
            report.failures[0].error,
            InventoryError::Conversion(ConversionError::Overflow)
        ));

        let names: Vec<String> = catalog
            .list(&scope())
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Flour", "Bread"]);
        let bread = report.created.iter().find(|p| p.name == "Bread").unwrap();
        assert_eq!(bread.cost_cents, 10);
    }

    #[tokio::test]
    async fn test_bad_index_writes_nothing() {
        let (catalog, importer) = importer(spawn_in_memory());
        let result = importer
            .apply(&small_bakery(), &[0, 9], ImportMode::Merge)
            .await;
        assert!(matches!(result, Err(InventoryError::Validation(_))));
        assert!(catalog.list(&scope()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_indices_import_once() {
        let (_, importer) = importer(spawn_in_memory());
        let report = importer
            .apply(&small_bakery(), &[0, 0, 2, 2], ImportMode::Merge)
            .await
            .unwrap();
        assert_eq!(report.created_count(), 2);
    }

    #[tokio::test]
    async fn test_replace_clears_scope_first() {
        let repo = spawn_in_memory();
        let (catalog, importer) = importer(repo);
        catalog
            .create(ProductCreate::new(scope(), "Old Muffin", Unit::Count))
            .await
            .unwrap();
        catalog
            .create(ProductCreate::new(ScopeId::new("cafe"), "Latte", Unit::Count))
            .await
            .unwrap();

        importer
            .apply(&small_bakery(), &[0, 2], ImportMode::Replace)
            .await
            .unwrap();

        let names: Vec<String> = catalog
            .list(&scope())
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Flour", "Bread"]);
        assert_eq!(catalog.list(&ScopeId::new("cafe")).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_merge_keeps_existing_products() {
        let (catalog, importer) = importer(spawn_in_memory());
        catalog
            .create(ProductCreate::new(scope(), "Old Muffin", Unit::Count))
            .await
            .unwrap();

        importer
            .apply(&small_bakery(), &[0], ImportMode::Merge)
            .await
            .unwrap();
        assert_eq!(catalog.list(&scope()).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_replace_aborts_when_delete_fails() {
        let repo = flaky("*delete*");
        let (catalog, importer) = importer(repo);
        catalog
            .create(ProductCreate::new(scope(), "Old Muffin", Unit::Count))
            .await
            .unwrap();

        let result = importer
            .apply(&small_bakery(), &[0], ImportMode::Replace)
            .await;
        assert!(matches!(result, Err(InventoryError::Transport(_))));

        let names: Vec<String> = catalog
            .list(&scope())
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Old Muffin"]);
    }
}
