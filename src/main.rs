//! Demo: seed a bakery catalog from its template and bake a batch of bread.

use pos_inventory::config::EngineConfig;
use pos_inventory::converter::{format_quantity, quantity_from_total_price};
use pos_inventory::lifecycle::{setup_tracing, InventorySystem};
use pos_inventory::model::ImportMode;
use pos_inventory::templates;
use rust_decimal_macros::dec;
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = EngineConfig::load().map_err(|e| e.to_string())?;
    info!(scope = %config.scope_id, "Starting inventory demo");

    let system = InventorySystem::new(&config);

    let template = templates::bakery();
    let everything: Vec<usize> = (0..template.items.len()).collect();
    let span = tracing::info_span!("template_import");
    let report = async {
        system
            .importer
            .apply(&template, &everything, ImportMode::Replace)
            .await
            .map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;
    info!(created = report.created_count(), "Template imported");

    let mut view = system.view().await.map_err(|e| e.to_string())?;
    let bread = view
        .finished_goods()
        .find(|p| p.name == "Bread")
        .cloned()
        .ok_or("bread missing from template")?;

    let cost = system
        .engine
        .cost_of(&bread, &view)
        .map_err(|e| e.to_string())?;
    let margin = system
        .engine
        .margin_of(&bread, &view)
        .map_err(|e| e.to_string())?;
    info!(cost, margin = ?margin.map(|m| m.round_dp(1)), "Bread costed");

    let span = tracing::info_span!("production");
    let outcome = async {
        system
            .engine
            .produce(&bread, dec!(12), &view)
            .await
            .map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;
    for note in &outcome.notes {
        warn!(?note, "Production incomplete");
    }
    view.apply(&outcome);

    for ingredient in view.ingredients() {
        info!(
            name = %ingredient.name,
            stock = %format_quantity(ingredient.stock_or_zero(), ingredient.unit),
            "Ingredient left"
        );
    }

    // Milk bought for 6.50 at cost price
    if let Some(milk) = view.ingredients().find(|p| p.name == "Milk") {
        let quantity = quantity_from_total_price(650, milk.cost_cents.max(1))
            .map_err(|e| e.to_string())?;
        info!(quantity = %format_quantity(quantity, milk.unit), "Milk for 6.50 at cost");
    }

    let movements = system
        .ledger
        .movements(&system.scope)
        .await
        .map_err(|e| e.to_string())?;
    info!(count = movements.len(), "Ledger movements recorded");

    system.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}
