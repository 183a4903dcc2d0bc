//! Quantity and price conversion for products sold by weight or volume.
//!
//! Pure functions, no repository access. Quantities are in the product's own unit,
//! prices are integer cents. `quantity_from_total_price` and
//! `total_price_from_quantity` are inverse up to the cent rounding of the total:
//! a round trip moves a quantity by at most half a cent's worth.

use crate::model::Unit;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConversionError {
    #[error("Unit price must be positive, got {0} cents")]
    NonPositiveUnitPrice(i64),

    #[error("Amount does not fit in cents")]
    Overflow,
}

/// Increment used by quantity steppers: 100 g / 100 ml for kilogram and liter
/// products, 100 for gram and milliliter products, 1 for counted products.
pub fn step_for(unit: Unit) -> Decimal {
    match unit {
        Unit::Kilogram | Unit::Liter => dec!(0.1),
        Unit::Gram | Unit::Milliliter => dec!(100),
        Unit::Count => Decimal::ONE,
    }
}

/// Quantity bought for `total_price_cents` at `unit_price_cents` per unit.
///
/// Not rounded; callers round for display only.
pub fn quantity_from_total_price(
    total_price_cents: i64,
    unit_price_cents: i64,
) -> Result<Decimal, ConversionError> {
    if unit_price_cents <= 0 {
        return Err(ConversionError::NonPositiveUnitPrice(unit_price_cents));
    }
    Decimal::from(total_price_cents)
        .checked_div(Decimal::from(unit_price_cents))
        .ok_or(ConversionError::Overflow)
}

/// Total price of `quantity` at `unit_price_cents`, rounded to the nearest cent.
pub fn total_price_from_quantity(
    quantity: Decimal,
    unit_price_cents: i64,
) -> Result<i64, ConversionError> {
    quantity
        .checked_mul(Decimal::from(unit_price_cents))
        .map(round_cents)
        .and_then(|cents| cents.to_i64())
        .ok_or(ConversionError::Overflow)
}

/// Rounds to whole cents, halves away from zero.
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Human-readable quantity.
///
/// Kilograms and liters under 1 switch to grams and milliliters. Larger values keep
/// the large unit with at most three decimals. Grams and milliliters are whole
/// numbers; counts are printed as they are.
pub fn format_quantity(quantity: Decimal, unit: Unit) -> String {
    if !unit.is_weight_based() {
        return quantity.normalize().to_string();
    }
    match unit.smaller() {
        Some(small) if quantity < Decimal::ONE => {
            format!("{} {}", whole(quantity * dec!(1000)), small.symbol())
        }
        Some(_) => {
            let large = quantity
                .round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
                .normalize();
            format!("{} {}", large, unit.symbol())
        }
        None => format!("{} {}", whole(quantity), unit.symbol()),
    }
}

/// Nearest whole quantity, halves away from zero.
fn whole(quantity: Decimal) -> Decimal {
    quantity
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps() {
        assert_eq!(step_for(Unit::Kilogram), dec!(0.1));
        assert_eq!(step_for(Unit::Liter), dec!(0.1));
        assert_eq!(step_for(Unit::Gram), dec!(100));
        assert_eq!(step_for(Unit::Milliliter), dec!(100));
        assert_eq!(step_for(Unit::Count), dec!(1));
    }

    #[test]
    fn test_quantity_from_total_price() {
        assert_eq!(quantity_from_total_price(650, 1300), Ok(dec!(0.5)));
        assert_eq!(
            quantity_from_total_price(650, 0),
            Err(ConversionError::NonPositiveUnitPrice(0))
        );
        assert_eq!(
            quantity_from_total_price(650, -20),
            Err(ConversionError::NonPositiveUnitPrice(-20))
        );
    }

    #[test]
    fn test_total_price_rounds_to_cent() {
        assert_eq!(total_price_from_quantity(dec!(0.35), 1299), Ok(455));
        assert_eq!(total_price_from_quantity(dec!(0.5), 1), Ok(1));
        assert_eq!(total_price_from_quantity(dec!(2), 1500), Ok(3000));
    }

    #[test]
    fn test_round_trip_stays_within_a_cent() {
        let unit_prices = [1, 7, 99, 1299, 2450, 100_000];
        let quantities = [dec!(0.001), dec!(0.35), dec!(1), dec!(1.234), dec!(250), dec!(3.3333)];

        for &unit_price in &unit_prices {
            let one_cent = Decimal::ONE / Decimal::from(unit_price);
            for &quantity in &quantities {
                let total = total_price_from_quantity(quantity, unit_price).unwrap();
                let back = quantity_from_total_price(total, unit_price).unwrap();
                assert!(
                    (back - quantity).abs() <= one_cent,
                    "{} at {} came back as {}",
                    quantity,
                    unit_price,
                    back
                );
            }
        }
    }

    #[test]
    fn test_format_large_units() {
        assert_eq!(format_quantity(dec!(0.5), Unit::Kilogram), "500 g");
        assert_eq!(format_quantity(dec!(0.2504), Unit::Liter), "250 ml");
        assert_eq!(format_quantity(dec!(1.25), Unit::Kilogram), "1.25 kg");
        assert_eq!(format_quantity(dec!(2.34567), Unit::Liter), "2.346 l");
        assert_eq!(format_quantity(dec!(3), Unit::Kilogram), "3 kg");
    }

    #[test]
    fn test_format_small_units_and_counts() {
        assert_eq!(format_quantity(dec!(250.6), Unit::Gram), "251 g");
        assert_eq!(format_quantity(dec!(100), Unit::Milliliter), "100 ml");
        assert_eq!(format_quantity(dec!(3), Unit::Count), "3");
        assert_eq!(format_quantity(dec!(2.5), Unit::Count), "2.5");
    }

    #[test]
    fn test_format_rounds_halves_to_whole_units() {
        assert_eq!(format_quantity(dec!(0.0005), Unit::Kilogram), "1 g");
        assert_eq!(format_quantity(dec!(0.1235), Unit::Liter), "124 ml");
        assert_eq!(format_quantity(dec!(99.5), Unit::Milliliter), "100 ml");
        assert_eq!(format_quantity(dec!(-12.5), Unit::Gram), "-13 g");
        assert_eq!(format_quantity(dec!(0.25), Unit::Count), "0.25");
    }

    #[test]
    fn test_only_counts_are_not_weight_based() {
        assert!(!Unit::Count.is_weight_based());
        for unit in [Unit::Gram, Unit::Kilogram, Unit::Liter, Unit::Milliliter] {
            assert!(unit.is_weight_based());
        }
    }
}
