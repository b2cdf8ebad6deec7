//! Display formatting for ingredient amounts.
//!
//! Two rules exist and they are not interchangeable:
//!
//! - [`format_amount`] renders aggregated and batch amounts, folding large
//!   millilitre quantities into litres.
//! - [`format_number`] renders per-bottle recipe amounts with trailing zeros
//!   stripped.
//!
//! Neither changes stored values. Rounding is half away from zero.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::domain::recipe::Recipe;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedAmount {
    pub amount: String,
    /// Empty when the unit is already part of `amount`.
    pub unit: String,
}

pub fn format_amount(amount: Decimal, unit: &str) -> FormattedAmount {
    if unit == "ml" && amount >= Decimal::ONE_THOUSAND {
        let litres = to_fixed(amount / Decimal::ONE_THOUSAND, 2);
        let millilitres = to_fixed(amount, 0);
        return FormattedAmount {
            amount: format!("{litres}L ({millilitres}ml)"),
            unit: String::new(),
        };
    }

    FormattedAmount { amount: to_fixed(amount, 1), unit: unit.to_string() }
}

pub fn format_number(num: Decimal) -> String {
    let fixed = to_fixed(num, 2);
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn to_fixed(value: Decimal, decimals: u32) -> String {
    let mut rounded =
        value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(decimals);
    rounded.to_string()
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeCardRow {
    pub ingredient: String,
    pub amount: String,
    pub unit: String,
    /// Present only when the card is scaled by something other than one.
    pub scaled_amount: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeCard {
    pub title: String,
    pub rows: Vec<RecipeCardRow>,
}

pub fn recipe_card(recipe: &Recipe, scaling: Decimal) -> RecipeCard {
    let scaled = scaling != Decimal::ONE;
    let rows = recipe
        .ingredients
        .iter()
        .map(|ingredient| RecipeCardRow {
            ingredient: ingredient.name.clone(),
            amount: format_number(ingredient.amount),
            unit: ingredient.unit.clone(),
            scaled_amount: scaled.then(|| {
                format!("{} {}", format_number(ingredient.amount * scaling), ingredient.unit)
            }),
        })
        .collect();

    RecipeCard { title: recipe.name.clone(), rows }
}
