use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calc::catalog::Catalog;
use crate::domain::order::CustomerOrder;
use crate::domain::recipe::DrinkType;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrinkTotal {
    pub drink_type: DrinkType,
    pub name: String,
    pub bottles: u64,
}

/// Bottles ordered per drink, keyed by recipe display name in first-seen order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DrinkTotals(Vec<DrinkTotal>);

impl DrinkTotals {
    pub fn get(&self, name: &str) -> Option<u64> {
        self.0.iter().find(|total| total.name == name).map(|total| total.bottles)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrinkTotal> {
        self.0.iter()
    }

    /// Entries a display would show; zero totals are kept in the data but hidden.
    pub fn non_zero(&self) -> impl Iterator<Item = &DrinkTotal> {
        self.0.iter().filter(|total| total.bottles > 0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn add(&mut self, drink_type: DrinkType, name: &str, bottles: u64) {
        match self.0.iter_mut().find(|total| total.name == name) {
            Some(total) => total.bottles += bottles,
            None => self.0.push(DrinkTotal { drink_type, name: name.to_string(), bottles }),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientTotal {
    pub amount: Decimal,
    pub unit: String,
}

/// Accumulated ingredient amounts keyed by ingredient name in first-seen order.
///
/// The unit of a bucket is taken from the first ingredient that created it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IngredientTotals {
    entries: Vec<(String, IngredientTotal)>,
}

impl IngredientTotals {
    pub fn get(&self, name: &str) -> Option<&IngredientTotal> {
        self.entries.iter().find(|(entry, _)| entry == name).map(|(_, total)| total)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &IngredientTotal)> {
        self.entries.iter().map(|(name, total)| (name.as_str(), total))
    }

    pub fn non_zero(&self) -> impl Iterator<Item = (&str, &IngredientTotal)> {
        self.iter().filter(|(_, total)| total.amount > Decimal::ZERO)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn add(&mut self, name: &str, amount: Decimal, unit: &str) {
        match self.entries.iter_mut().find(|(entry, _)| entry == name) {
            Some((_, total)) => total.amount = total.amount.saturating_add(amount),
            None => self
                .entries
                .push((name.to_string(), IngredientTotal { amount, unit: unit.to_string() })),
        }
    }

    /// Bucket-wise sum of two totals.
    pub fn merged(&self, other: &IngredientTotals) -> IngredientTotals {
        let mut merged = self.clone();
        for (name, total) in other.iter() {
            merged.add(name, total.amount, &total.unit);
        }
        merged
    }
}

pub fn totals_by_drink(catalog: &Catalog, orders: &[CustomerOrder]) -> DrinkTotals {
    let mut totals = DrinkTotals::default();
    for order in orders {
        for item in &order.items {
            let recipe = catalog.recipe(item.drink_type);
            totals.add(item.drink_type, &recipe.name, u64::from(item.quantity));
        }
    }
    totals
}

pub fn total_ingredients(catalog: &Catalog, orders: &[CustomerOrder]) -> IngredientTotals {
    let mut totals = IngredientTotals::default();
    for order in orders {
        for item in &order.items {
            let quantity = Decimal::from(item.quantity);
            for ingredient in &catalog.recipe(item.drink_type).ingredients {
                totals.add(&ingredient.name, ingredient.amount * quantity, &ingredient.unit);
            }
        }
    }
    totals
}
