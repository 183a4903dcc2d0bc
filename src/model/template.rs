/// Catalog templates: static seed lists used to populate a new catalog in bulk.
///
/// Recipes inside a template name their ingredients instead of pointing at ids,
/// because ids only exist once the ingredients have been created.
use crate::model::{ProductCreate, RecipeLine, ScopeId, Unit};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub name: String,
    pub items: Vec<TemplateItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateRecipeLine {
    pub ingredient_name: String,
    pub quantity: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateItem {
    pub name: String,
    pub category: String,
    pub unit: Unit,
    pub price_cents: i64,
    pub cost_cents: i64,
    pub current_stock: Option<Decimal>,
    pub tracks_stock: bool,
    pub is_ingredient: bool,
    pub available: bool,
    pub recipe: Vec<TemplateRecipeLine>,
}

impl TemplateItem {
    /// Creation fields for this item in `scope`, with an already resolved recipe.
    pub fn to_create(&self, scope: &ScopeId, recipe: Vec<RecipeLine>) -> ProductCreate {
        ProductCreate {
            scope: scope.clone(),
            name: self.name.clone(),
            category: self.category.clone(),
            unit: self.unit,
            price_cents: self.price_cents,
            cost_cents: self.cost_cents,
            current_stock: self.current_stock,
            tracks_stock: self.tracks_stock,
            is_ingredient: self.is_ingredient,
            available: self.available,
            recipe,
        }
    }
}

/// What happens to the existing catalog when a template is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportMode {
    /// Keep existing products and add the template items.
    Merge,
    /// Delete every product in the scope first.
    Replace,
}
