//! [`ActorEntity`] implementation for [`StockMovement`].
//!
//! The ledger is append-only: create is the only write it accepts. Updates and
//! deletes are refused with [`LedgerError::ImmutableMovement`].

use super::error::LedgerError;
use crate::model::{MovementKind, NewStockMovement, StockMovement, StockMovementId};
use async_trait::async_trait;
use chrono::Utc;
use resource_actors::ActorEntity;

/// The ledger has no custom actions.
#[derive(Debug, Clone)]
pub enum LedgerAction {}

/// Sign rule: entries are positive, adjustments are any non-zero delta.
pub fn check_direction(movement: &NewStockMovement) -> Result<(), LedgerError> {
    if movement.quantity.is_zero() {
        return Err(LedgerError::ZeroQuantity);
    }
    if movement.kind == MovementKind::Entry && movement.quantity.is_sign_negative() {
        return Err(LedgerError::EntryMustIncrease(movement.quantity));
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for StockMovement {
    type Id = StockMovementId;
    type Create = NewStockMovement;
    type Update = ();
    type Action = LedgerAction;
    type ActionResult = ();
    type Context = ();
    type Error = LedgerError;

    fn from_create_params(
        id: StockMovementId,
        params: NewStockMovement,
    ) -> Result<Self, Self::Error> {
        check_direction(&params)?;
        Ok(Self {
            id,
            scope: params.scope,
            product_id: params.product_id,
            product_name: params.product_name,
            quantity: params.quantity,
            unit_cost_cents: params.unit_cost_cents,
            recorded_at: Utc::now(),
            kind: params.kind,
        })
    }

    async fn on_update(&mut self, _update: (), _ctx: &()) -> Result<(), Self::Error> {
        Err(LedgerError::ImmutableMovement(self.id.to_string()))
    }

    async fn on_delete(&self, _ctx: &()) -> Result<(), Self::Error> {
        Err(LedgerError::ImmutableMovement(self.id.to_string()))
    }

    async fn handle_action(&mut self, action: LedgerAction, _ctx: &()) -> Result<(), Self::Error> {
        match action {}
    }
}
