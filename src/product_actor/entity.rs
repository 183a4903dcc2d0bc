//! [`ActorEntity`] implementation for [`Product`].
//!
//! Creation and patches are validated here, before anything is stored: a blank name
//! or a negative price or cost is refused and the stored record stays untouched.

use super::error::ProductError;
use crate::model::{Product, ProductCreate, ProductId, ProductPatch};
use async_trait::async_trait;
use resource_actors::ActorEntity;

/// Products have no custom actions.
#[derive(Debug, Clone)]
pub enum ProductAction {}

fn check_name(name: &str) -> Result<(), ProductError> {
    if name.trim().is_empty() {
        return Err(ProductError::EmptyName);
    }
    Ok(())
}

fn check_amount(field: &'static str, cents: i64) -> Result<(), ProductError> {
    if cents < 0 {
        return Err(ProductError::NegativeAmount { field, cents });
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductPatch;
    type Action = ProductAction;
    type ActionResult = ();
    type Context = ();
    type Error = ProductError;

    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, Self::Error> {
        check_name(&params.name)?;
        check_amount("price", params.price_cents)?;
        check_amount("cost", params.cost_cents)?;

        Ok(Self {
            id,
            scope: params.scope,
            name: params.name.trim().to_string(),
            category: params.category,
            unit: params.unit,
            price_cents: params.price_cents,
            cost_cents: params.cost_cents,
            current_stock: params.current_stock,
            tracks_stock: params.tracks_stock,
            is_ingredient: params.is_ingredient,
            available: params.available,
            recipe: params.recipe,
        })
    }

    async fn on_update(&mut self, update: ProductPatch, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(name) = &update.name {
            check_name(name)?;
        }
        if let Some(price) = update.price_cents {
            check_amount("price", price)?;
        }
        if let Some(cost) = update.cost_cents {
            check_amount("cost", cost)?;
        }

        if let Some(name) = update.name {
            self.name = name.trim().to_string();
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(price) = update.price_cents {
            self.price_cents = price;
        }
        if let Some(cost) = update.cost_cents {
            self.cost_cents = cost;
        }
        if let Some(stock) = update.current_stock {
            self.current_stock = Some(stock);
        }
        if let Some(tracks_stock) = update.tracks_stock {
            self.tracks_stock = tracks_stock;
            if !tracks_stock {
                self.current_stock = None;
            }
        }
        if let Some(available) = update.available {
            self.available = available;
        }
        if let Some(recipe) = update.recipe {
            self.recipe = recipe;
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: ProductAction, _ctx: &()) -> Result<(), Self::Error> {
        match action {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ScopeId, Unit};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn flour_params() -> ProductCreate {
        ProductCreate::new(ScopeId::new("bakery"), "  Flour ", Unit::Gram)
            .ingredient()
            .cost(5)
            .stock(dec!(1000))
    }

    #[test]
    fn test_create_trims_name() {
        let flour = Product::from_create_params(ProductId(1), flour_params()).unwrap();
        assert_eq!(flour.name, "Flour");
        assert_eq!(flour.current_stock, Some(dec!(1000)));
        assert!(flour.tracks_stock);
    }

    #[test]
    fn test_create_rejects_blank_name() {
        let params = ProductCreate::new(ScopeId::new("bakery"), "   ", Unit::Count);
        let result = Product::from_create_params(ProductId(1), params);
        assert_eq!(result.unwrap_err(), ProductError::EmptyName);
    }

    #[tokio::test]
    async fn test_rejected_patch_leaves_product_untouched() {
        let mut flour = Product::from_create_params(ProductId(1), flour_params()).unwrap();
        let patch = ProductPatch {
            current_stock: Some(dec!(5)),
            cost_cents: Some(-1),
            ..ProductPatch::default()
        };

        let result = flour.on_update(patch, &()).await;
        assert_eq!(
            result.unwrap_err(),
            ProductError::NegativeAmount {
                field: "cost",
                cents: -1
            }
        );
        assert_eq!(flour.current_stock, Some(dec!(1000)));
        assert_eq!(flour.cost_cents, 5);
    }

    #[tokio::test]
    async fn test_patch_applies_only_present_fields() {
        let mut flour = Product::from_create_params(ProductId(1), flour_params()).unwrap();
        flour
            .on_update(ProductPatch::stock(dec!(400)), &())
            .await
            .unwrap();
        assert_eq!(flour.current_stock, Some(dec!(400)));
        assert_eq!(flour.cost_cents, 5);
        assert_eq!(flour.name, "Flour");
    }

    #[tokio::test]
    async fn test_untracking_clears_stock_level() {
        let mut flour = Product::from_create_params(ProductId(1), flour_params()).unwrap();
        flour
            .on_update(ProductPatch::stock(dec!(400)), &())
            .await
            .unwrap();

        let untrack = ProductPatch {
            current_stock: Some(dec!(900)),
            ..ProductPatch::untracked()
        };
        flour.on_update(untrack, &()).await.unwrap();
        assert!(!flour.tracks_stock);
        assert_eq!(flour.current_stock, None);
        assert_eq!(flour.stock_or_zero(), Decimal::ZERO);
    }

    #[test]
    fn test_products_have_no_custom_actions() {
        fn unreachable_action(action: ProductAction) -> std::convert::Infallible {
            match action {}
        }
        let _ = unreachable_action;
        assert_eq!(std::mem::size_of::<ProductAction>(), 0);
    }
}
