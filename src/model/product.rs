/// Catalog records: finished goods and the ingredients their recipes consume.
///
/// # Actor Framework
/// [`Product`] implements [`ActorEntity`](resource_actors::ActorEntity) in
/// [`product_actor::entity`](crate::product_actor::entity), so the catalog store is a
/// [`ResourceActor<Product>`](resource_actors::ResourceActor).
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Products.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProductId(pub u32);

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "product_{}", self.0)
    }
}

/// The business (store, branch) a record belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScopeId(pub String);

impl ScopeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl Display for ScopeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unit of measure a product is stocked and priced in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Count,
    Gram,
    Kilogram,
    Liter,
    Milliliter,
}

impl Unit {
    /// Gram, kilogram, liter and milliliter products are sold by weight or volume.
    pub fn is_weight_based(self) -> bool {
        !matches!(self, Unit::Count)
    }

    /// Unit used to display fractions of a large unit.
    pub fn smaller(self) -> Option<Unit> {
        match self {
            Unit::Kilogram => Some(Unit::Gram),
            Unit::Liter => Some(Unit::Milliliter),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Unit::Count => "u",
            Unit::Gram => "g",
            Unit::Kilogram => "kg",
            Unit::Liter => "l",
            Unit::Milliliter => "ml",
        }
    }
}

/// Quantity of an ingredient, in the ingredient's own unit, consumed per unit of
/// the finished good.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeLine {
    pub ingredient_id: ProductId,
    pub quantity: Decimal,
}

impl RecipeLine {
    pub fn new(ingredient_id: ProductId, quantity: Decimal) -> Self {
        Self {
            ingredient_id,
            quantity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub scope: ScopeId,
    pub name: String,
    pub category: String,
    pub unit: Unit,
    /// Sale price in cents.
    pub price_cents: i64,
    /// Cost in cents per unit.
    pub cost_cents: i64,
    /// `None` when the product has never been stocked.
    pub current_stock: Option<Decimal>,
    pub tracks_stock: bool,
    pub is_ingredient: bool,
    pub available: bool,
    pub recipe: Vec<RecipeLine>,
}

impl Product {
    /// Current stock, counting an untracked value as zero.
    pub fn stock_or_zero(&self) -> Decimal {
        self.current_stock.unwrap_or(Decimal::ZERO)
    }

    pub fn has_recipe(&self) -> bool {
        !self.recipe.is_empty()
    }
}

/// Fields for creating a Product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCreate {
    pub scope: ScopeId,
    pub name: String,
    pub category: String,
    pub unit: Unit,
    pub price_cents: i64,
    pub cost_cents: i64,
    pub current_stock: Option<Decimal>,
    pub tracks_stock: bool,
    pub is_ingredient: bool,
    pub available: bool,
    pub recipe: Vec<RecipeLine>,
}

impl ProductCreate {
    /// A sellable, available product with no stock tracking and no recipe.
    pub fn new(scope: ScopeId, name: impl Into<String>, unit: Unit) -> Self {
        Self {
            scope,
            name: name.into(),
            category: String::new(),
            unit,
            price_cents: 0,
            cost_cents: 0,
            current_stock: None,
            tracks_stock: false,
            is_ingredient: false,
            available: true,
            recipe: Vec::new(),
        }
    }

    pub fn ingredient(mut self) -> Self {
        self.is_ingredient = true;
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn price(mut self, cents: i64) -> Self {
        self.price_cents = cents;
        self
    }

    pub fn cost(mut self, cents: i64) -> Self {
        self.cost_cents = cents;
        self
    }

    /// Starts tracking stock at `level`.
    pub fn stock(mut self, level: Decimal) -> Self {
        self.current_stock = Some(level);
        self.tracks_stock = true;
        self
    }

    pub fn recipe(mut self, recipe: Vec<RecipeLine>) -> Self {
        self.recipe = recipe;
        self
    }
}

/// Partial update of a Product. `None` leaves a field unchanged.
///
/// Setting `tracks_stock` to `false` also clears `current_stock`, whatever the
/// patch says about the level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price_cents: Option<i64>,
    pub cost_cents: Option<i64>,
    pub current_stock: Option<Decimal>,
    pub tracks_stock: Option<bool>,
    pub available: Option<bool>,
    pub recipe: Option<Vec<RecipeLine>>,
}

impl ProductPatch {
    pub fn stock(level: Decimal) -> Self {
        Self {
            current_stock: Some(level),
            ..Self::default()
        }
    }

    pub fn cost(cents: i64) -> Self {
        Self {
            cost_cents: Some(cents),
            ..Self::default()
        }
    }

    /// Stops tracking stock and forgets the current level.
    pub fn untracked() -> Self {
        Self {
            tracks_stock: Some(false),
            ..Self::default()
        }
    }

    pub fn recipe(recipe: Vec<RecipeLine>) -> Self {
        Self {
            recipe: Some(recipe),
            ..Self::default()
        }
    }
}
