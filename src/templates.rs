//! Built-in catalog templates for common kinds of business.
//!
//! Templates are static seed data: they are built fresh on every call and never
//! mutated or persisted.

use crate::model::{Template, TemplateItem, TemplateRecipeLine, Unit};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Every built-in template.
pub fn builtin() -> Vec<Template> {
    vec![bakery(), coffee_shop()]
}

/// The built-in template called `name`, ignoring case.
pub fn find(name: &str) -> Option<Template> {
    builtin()
        .into_iter()
        .find(|t| t.name.eq_ignore_ascii_case(name))
}

fn ingredient(name: &str, unit: Unit, cost_cents: i64, stock: Decimal) -> TemplateItem {
    TemplateItem {
        name: name.to_string(),
        category: "Ingredients".to_string(),
        unit,
        price_cents: 0,
        cost_cents,
        current_stock: Some(stock),
        tracks_stock: true,
        is_ingredient: true,
        available: false,
        recipe: Vec::new(),
    }
}

fn good(name: &str, category: &str, price_cents: i64, recipe: &[(&str, Decimal)]) -> TemplateItem {
    TemplateItem {
        name: name.to_string(),
        category: category.to_string(),
        unit: Unit::Count,
        price_cents,
        cost_cents: 0,
        current_stock: Some(Decimal::ZERO),
        tracks_stock: true,
        is_ingredient: false,
        available: true,
        recipe: recipe
            .iter()
            .map(|(name, quantity)| TemplateRecipeLine {
                ingredient_name: name.to_string(),
                quantity: *quantity,
            })
            .collect(),
    }
}

pub fn bakery() -> Template {
    Template {
        name: "Bakery".to_string(),
        items: vec![
            ingredient("Flour", Unit::Gram, 5, dec!(10000)),
            ingredient("Butter", Unit::Gram, 12, dec!(2000)),
            ingredient("Sugar", Unit::Gram, 3, dec!(5000)),
            ingredient("Eggs", Unit::Count, 30, dec!(60)),
            ingredient("Milk", Unit::Liter, 120, dec!(10)),
            ingredient("Yeast", Unit::Gram, 20, dec!(500)),
            good("Bread", "Breads", 1500, &[("Flour", dec!(200)), ("Yeast", dec!(5))]),
            good(
                "Croissant",
                "Pastries",
                900,
                &[("Flour", dec!(60)), ("Butter", dec!(30)), ("Milk", dec!(0.02))],
            ),
            good(
                "Sponge Cake",
                "Cakes",
                3500,
                &[
                    ("Flour", dec!(250)),
                    ("Sugar", dec!(200)),
                    ("Eggs", dec!(4)),
                    ("Butter", dec!(100)),
                ],
            ),
        ],
    }
}

pub fn coffee_shop() -> Template {
    Template {
        name: "Coffee Shop".to_string(),
        items: vec![
            ingredient("Coffee Beans", Unit::Kilogram, 2400, dec!(5)),
            ingredient("Milk", Unit::Milliliter, 1, dec!(20000)),
            ingredient("Sugar", Unit::Gram, 3, dec!(2000)),
            ingredient("Cocoa", Unit::Gram, 4, dec!(1000)),
            good("Espresso", "Coffee", 250, &[("Coffee Beans", dec!(0.018))]),
            good(
                "Latte",
                "Coffee",
                450,
                &[("Coffee Beans", dec!(0.018)), ("Milk", dec!(200))],
            ),
            good(
                "Mocha",
                "Coffee",
                500,
                &[
                    ("Coffee Beans", dec!(0.018)),
                    ("Milk", dec!(180)),
                    ("Cocoa", dec!(15)),
                    ("Sugar", dec!(10)),
                ],
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_find_ignores_case() {
        assert_eq!(find("bakery").unwrap().name, "Bakery");
        assert_eq!(find("COFFEE SHOP").unwrap().name, "Coffee Shop");
        assert!(find("Butcher").is_none());
    }

    #[test]
    fn test_recipes_only_name_template_ingredients() {
        for template in builtin() {
            let ingredients: HashSet<&str> = template
                .items
                .iter()
                .filter(|i| i.is_ingredient)
                .map(|i| i.name.as_str())
                .collect();
            for item in &template.items {
                for line in &item.recipe {
                    assert!(
                        ingredients.contains(line.ingredient_name.as_str()),
                        "{} in {} names unknown {}",
                        item.name,
                        template.name,
                        line.ingredient_name
                    );
                }
            }
        }
    }
}
