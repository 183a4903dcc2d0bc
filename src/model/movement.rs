/// Stock movements: the append-only record of every stock change.
///
/// A movement keeps the product name and the unit cost as they were when it was
/// written; later catalog edits do not touch it.
use crate::model::{Product, ProductId, ScopeId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for stock movements.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StockMovementId(pub u32);

impl From<u32> for StockMovementId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for StockMovementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "movement_{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementKind {
    /// Manual stock-in or production.
    Entry,
    /// Any other change, including recipe deductions.
    Adjustment,
}

impl Display for MovementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MovementKind::Entry => f.write_str("entry"),
            MovementKind::Adjustment => f.write_str("adjustment"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockMovement {
    pub id: StockMovementId,
    pub scope: ScopeId,
    pub product_id: ProductId,
    pub product_name: String,
    /// Signed delta: positive increases stock, negative decreases it.
    pub quantity: Decimal,
    /// Cost per unit when the movement was written.
    pub unit_cost_cents: i64,
    pub recorded_at: DateTime<Utc>,
    pub kind: MovementKind,
}

/// Fields for appending a movement. The ledger stamps id and time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewStockMovement {
    pub scope: ScopeId,
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: Decimal,
    pub unit_cost_cents: i64,
    pub kind: MovementKind,
}

impl NewStockMovement {
    /// Movement of `quantity` for `product`, snapshotting its name and current cost.
    pub fn for_product(product: &Product, quantity: Decimal, kind: MovementKind) -> Self {
        Self {
            scope: product.scope.clone(),
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            quantity,
            unit_cost_cents: product.cost_cents,
            kind,
        }
    }
}
