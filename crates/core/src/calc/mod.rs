pub mod aggregate;
pub mod batch;
pub mod catalog;
pub mod format;

use serde::{Deserialize, Serialize};

use crate::domain::order::CustomerOrder;

use self::{
    aggregate::{total_ingredients, totals_by_drink, DrinkTotal, IngredientTotals},
    batch::batch_recipes,
    catalog::Catalog,
    format::format_amount,
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientLine {
    pub ingredient: String,
    pub amount: String,
    pub unit: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSection {
    pub drink: String,
    pub bottles: u64,
    pub ingredients: Vec<IngredientLine>,
}

/// Everything the calculator shows for one order book: bottles per drink,
/// a scaled batch per drink, and the combined shopping list.
///
/// Zero rows are dropped here; the underlying aggregates keep them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorReport {
    pub order_count: usize,
    pub drink_totals: Vec<DrinkTotal>,
    pub batches: Vec<BatchSection>,
    pub total_ingredients: Vec<IngredientLine>,
}

impl CalculatorReport {
    pub fn build(catalog: &Catalog, orders: &[CustomerOrder]) -> Self {
        let drink_totals = totals_by_drink(catalog, orders);

        let batches = batch_recipes(catalog, &drink_totals)
            .into_iter()
            .map(|batch| BatchSection {
                drink: batch.name,
                bottles: batch.bottles,
                ingredients: batch
                    .ingredients
                    .iter()
                    .map(|ingredient| {
                        let formatted = format_amount(ingredient.amount, &ingredient.unit);
                        IngredientLine {
                            ingredient: ingredient.name.clone(),
                            amount: formatted.amount,
                            unit: formatted.unit,
                        }
                    })
                    .collect(),
            })
            .collect();

        Self {
            order_count: orders.len(),
            drink_totals: drink_totals.non_zero().cloned().collect(),
            batches,
            total_ingredients: ingredient_lines(&total_ingredients(catalog, orders)),
        }
    }
}

/// Formatted shopping-list rows for every non-zero bucket.
pub fn ingredient_lines(totals: &IngredientTotals) -> Vec<IngredientLine> {
    totals
        .non_zero()
        .map(|(name, total)| {
            let formatted = format_amount(total.amount, &total.unit);
            IngredientLine {
                ingredient: name.to_string(),
                amount: formatted.amount,
                unit: formatted.unit,
            }
        })
        .collect()
}
