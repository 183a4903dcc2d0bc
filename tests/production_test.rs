use pos_inventory::catalog::{CatalogView, ProductCatalog};
use pos_inventory::clients::{LedgerClient, ProductClient};
use pos_inventory::costing::RecipeCostingEngine;
use pos_inventory::ledger::StockLedger;
use pos_inventory::model::{Product, ProductId, RecipeLine, ScopeId, StockMovement, Unit};
use pos_inventory::repository::ActorRepository;
use pos_inventory::InventoryError;
use resource_actors::mock::MockClient;
use resource_actors::FrameworkError;
use rust_decimal_macros::dec;

fn product(id: u32, name: &str, stock: rust_decimal::Decimal, recipe: Vec<RecipeLine>) -> Product {
    Product {
        id: ProductId(id),
        scope: ScopeId::new("bakery"),
        name: name.to_string(),
        category: String::new(),
        unit: Unit::Count,
        price_cents: 1500,
        cost_cents: 5,
        current_stock: Some(stock),
        tracks_stock: true,
        is_ingredient: recipe.is_empty(),
        available: true,
        recipe,
    }
}

fn engine(products: &MockClient<Product>, ledger: &MockClient<StockMovement>) -> RecipeCostingEngine {
    let repo = ActorRepository::new(
        ProductClient::new(products.client()),
        LedgerClient::new(ledger.client()),
    )
    .shared();
    RecipeCostingEngine::new(ProductCatalog::new(repo.clone()), StockLedger::new(repo))
}

/// Same stock level: neither store is touched.
#[tokio::test]
async fn test_no_op_sends_no_requests() {
    let products = MockClient::<Product>::new();
    let ledger = MockClient::<StockMovement>::new();
    let engine = engine(&products, &ledger);

    let flour = product(1, "Flour", dec!(1000), vec![]);
    let bread = product(2, "Bread", dec!(4), vec![RecipeLine::new(ProductId(1), dec!(200))]);
    let view = CatalogView::from_products(ScopeId::new("bakery"), vec![flour, bread.clone()]);

    let outcome = engine.produce(&bread, dec!(4), &view).await.unwrap();
    assert_eq!(outcome.product, bread);

    products.verify();
    ledger.verify();
}

/// A ledger outage after the stock patch surfaces as a transport error; the patch stays.
#[tokio::test]
async fn test_ledger_outage_aborts_production() {
    let mut products = MockClient::<Product>::new();
    let mut ledger = MockClient::<StockMovement>::new();

    let flour = product(1, "Flour", dec!(1000), vec![]);
    let bread = product(2, "Bread", dec!(0), vec![RecipeLine::new(ProductId(1), dec!(200))]);

    products
        .expect_update(ProductId(2))
        .return_ok(Product {
            current_stock: Some(dec!(3)),
            ..bread.clone()
        });
    ledger.expect_create().return_err(FrameworkError::ActorClosed);

    let engine = engine(&products, &ledger);
    let view = CatalogView::from_products(ScopeId::new("bakery"), vec![flour, bread.clone()]);

    let result = engine.produce(&bread, dec!(3), &view).await;
    assert!(matches!(result, Err(InventoryError::Transport(_))));

    products.verify();
    ledger.verify();
}
