//! # Recipe Costing Engine
//!
//! Prices finished goods from their recipes and cascades production into
//! ingredient stock.
//!
//! Costs always use the ingredients' **current** `cost_cents`. Ledger movements
//! keep the unit cost of the moment they were written, so a recipe cost and the
//! ledger valuation of the same production can drift apart after a cost change.
//!
//! ## Production
//!
//! [`RecipeCostingEngine::produce`] moves a product to a new stock level. When the
//! level goes up and the product has a recipe, every tracked ingredient is
//! deducted by `line quantity * delta`, clamped so stock never goes below zero.
//! The ledger records the clamped amount. A missing ingredient or a clamp is not
//! an error: it shows up as a [`DeductionNote`] in the returned
//! [`ProductionOutcome`] and as a `warn!` event.
//!
//! Ingredient writes are issued concurrently without any locking, so two
//! overlapping `produce` calls can race on the same ingredient.

use crate::catalog::{CatalogView, ProductCatalog};
use crate::converter::{round_cents, ConversionError};
use crate::error::{InventoryError, Result};
use crate::ledger::StockLedger;
use crate::model::{MovementKind, NewStockMovement, Product, ProductId, ProductPatch, RecipeLine};
use futures_util::future::join_all;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, instrument, warn};

/// Something a production run could not do as asked.
#[derive(Debug, Clone, PartialEq)]
pub enum DeductionNote {
    /// A recipe line points at an ingredient that is not in the catalog.
    MissingIngredient { ingredient: ProductId },
    /// Less stock was available than the recipe required.
    Shortfall {
        ingredient: ProductId,
        required: Decimal,
        applied: Decimal,
    },
}

/// Records written by [`RecipeCostingEngine::produce`].
#[derive(Debug, Clone, PartialEq)]
pub struct ProductionOutcome {
    pub product: Product,
    /// Ingredients whose stock was patched.
    pub ingredients: Vec<Product>,
    pub notes: Vec<DeductionNote>,
}

impl ProductionOutcome {
    fn unchanged(product: &Product) -> Self {
        Self {
            product: product.clone(),
            ingredients: Vec::new(),
            notes: Vec::new(),
        }
    }

    /// True when every ingredient was found and fully deducted.
    pub fn is_complete(&self) -> bool {
        self.notes.is_empty()
    }
}

/// One ingredient to deduct during production.
struct Deduction {
    ingredient: Product,
    remaining: Decimal,
    applied: Decimal,
}

#[derive(Clone)]
pub struct RecipeCostingEngine {
    catalog: ProductCatalog,
    ledger: StockLedger,
}

impl RecipeCostingEngine {
    pub fn new(catalog: ProductCatalog, ledger: StockLedger) -> Self {
        Self { catalog, ledger }
    }

    /// Cost in cents of one unit of `product`.
    pub fn cost_of(&self, product: &Product, view: &CatalogView) -> Result<i64> {
        self.cost_of_recipe(&product.recipe, view)
    }

    /// Sum of current ingredient cost times quantity, rounded once to the cent.
    ///
    /// Lines whose ingredient is not in `view` contribute nothing.
    pub fn cost_of_recipe(&self, recipe: &[RecipeLine], view: &CatalogView) -> Result<i64> {
        let mut total = Decimal::ZERO;
        for line in recipe {
            match view.get(&line.ingredient_id) {
                Some(ingredient) => {
                    let line_cost = Decimal::from(ingredient.cost_cents)
                        .checked_mul(line.quantity)
                        .ok_or(ConversionError::Overflow)?;
                    total = total
                        .checked_add(line_cost)
                        .ok_or(ConversionError::Overflow)?;
                }
                None => debug!(ingredient_id = %line.ingredient_id, "Ingredient not in catalog"),
            }
        }
        Ok(round_cents(total)
            .to_i64()
            .ok_or(ConversionError::Overflow)?)
    }

    /// Margin over the sale price, as a percentage. `None` when the price is zero.
    pub fn margin_of(&self, product: &Product, view: &CatalogView) -> Result<Option<Decimal>> {
        if product.price_cents == 0 {
            return Ok(None);
        }
        let cost = self.cost_of(product, view)?;
        let price = Decimal::from(product.price_cents);
        Ok(Some((price - Decimal::from(cost)) / price * dec!(100)))
    }

    /// Moves `product` to `new_stock` and deducts its ingredients.
    ///
    /// Ingredients are looked up in `view`. Errors from the repository abort the
    /// run; writes already made stay made.
    #[instrument(skip(self, product, view), fields(product_id = %product.id))]
    pub async fn produce(
        &self,
        product: &Product,
        new_stock: Decimal,
        view: &CatalogView,
    ) -> Result<ProductionOutcome> {
        let delta = new_stock - product.stock_or_zero();
        if delta.is_zero() {
            debug!("Stock unchanged");
            return Ok(ProductionOutcome::unchanged(product));
        }

        let updated = self
            .catalog
            .patch(product.id.clone(), ProductPatch::stock(new_stock))
            .await?;
        let kind = if delta.is_sign_positive() {
            MovementKind::Entry
        } else {
            MovementKind::Adjustment
        };
        self.ledger
            .append(NewStockMovement::for_product(product, delta, kind))
            .await?;
        info!(%delta, %kind, "Product stock moved");

        let mut outcome = ProductionOutcome::unchanged(&updated);
        if delta.is_sign_negative() || !product.has_recipe() {
            return Ok(outcome);
        }

        let deductions = self.plan_deductions(product, delta, view, &mut outcome.notes);
        let writes = deductions.into_iter().map(|d| self.deduct(d));
        for written in join_all(writes).await {
            outcome.ingredients.push(written?);
        }

        info!(
            ingredients = outcome.ingredients.len(),
            notes = outcome.notes.len(),
            "Production recorded"
        );
        Ok(outcome)
    }

    /// Works out how much of each tracked ingredient to take for `delta` units.
    fn plan_deductions(
        &self,
        product: &Product,
        delta: Decimal,
        view: &CatalogView,
        notes: &mut Vec<DeductionNote>,
    ) -> Vec<Deduction> {
        let mut per_unit: BTreeMap<ProductId, Decimal> = BTreeMap::new();
        for line in &product.recipe {
            *per_unit.entry(line.ingredient_id.clone()).or_default() += line.quantity;
        }

        let mut deductions = Vec::new();
        for (ingredient_id, quantity) in per_unit {
            let Some(ingredient) = view.get(&ingredient_id) else {
                warn!(ingredient_id = %ingredient_id, "Recipe ingredient missing, skipped");
                notes.push(DeductionNote::MissingIngredient {
                    ingredient: ingredient_id,
                });
                continue;
            };
            if !ingredient.tracks_stock {
                continue;
            }

            let required = quantity * delta;
            if required <= Decimal::ZERO {
                continue;
            }
            let available = ingredient.stock_or_zero().max(Decimal::ZERO);
            let applied = required.min(available);
            if applied < required {
                warn!(
                    ingredient_id = %ingredient_id,
                    %required,
                    %applied,
                    "Not enough stock, deducting what is left"
                );
                notes.push(DeductionNote::Shortfall {
                    ingredient: ingredient_id,
                    required,
                    applied,
                });
            }
            if applied.is_zero() {
                continue;
            }

            deductions.push(Deduction {
                ingredient: ingredient.clone(),
                remaining: available - applied,
                applied,
            });
        }
        deductions
    }

    async fn deduct(&self, deduction: Deduction) -> Result<Product> {
        let Deduction {
            ingredient,
            remaining,
            applied,
        } = deduction;
        let patched = self
            .catalog
            .patch(ingredient.id.clone(), ProductPatch::stock(remaining))
            .await?;
        self.ledger
            .append(NewStockMovement::for_product(
                &ingredient,
                -applied,
                MovementKind::Adjustment,
            ))
            .await?;
        debug!(ingredient_id = %ingredient.id, %applied, "Ingredient deducted");
        Ok(patched)
    }

    /// Replaces the recipe of `product_id`, refusing recipes that would make the
    /// product an ingredient of itself.
    #[instrument(skip(self, recipe, view))]
    pub async fn set_recipe(
        &self,
        product_id: ProductId,
        recipe: Vec<RecipeLine>,
        view: &CatalogView,
    ) -> Result<Product> {
        for line in &recipe {
            if reaches(view, &line.ingredient_id, &product_id) {
                return Err(InventoryError::CyclicRecipe {
                    product: product_id,
                    ingredient: line.ingredient_id.clone(),
                });
            }
        }
        self.catalog
            .patch(product_id, ProductPatch::recipe(recipe))
            .await
    }

    /// Stores the recipe cost computed from current ingredient costs.
    #[instrument(skip(self, product, view), fields(product_id = %product.id))]
    pub async fn refresh_cost(&self, product: &Product, view: &CatalogView) -> Result<Product> {
        let cost = self.cost_of(product, view)?;
        debug!(old = product.cost_cents, new = cost, "Refreshing cost");
        self.catalog
            .patch(product.id.clone(), ProductPatch::cost(cost))
            .await
    }
}

/// Whether `target` is `from` or appears anywhere below it in the recipe graph.
fn reaches(view: &CatalogView, from: &ProductId, target: &ProductId) -> bool {
    let mut seen = BTreeSet::new();
    let mut pending = vec![from.clone()];
    while let Some(id) = pending.pop() {
        if &id == target {
            return true;
        }
        if !seen.insert(id.clone()) {
            continue;
        }
        if let Some(product) = view.get(&id) {
            pending.extend(product.recipe.iter().map(|l| l.ingredient_id.clone()));
        }
    }
    false
}
