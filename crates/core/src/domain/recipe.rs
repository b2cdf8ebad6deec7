use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Drinks the bottling line knows how to make.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DrinkType {
    PeachPalmer,
    StrawberryLemonade,
    ColdBrew,
}

impl DrinkType {
    /// Catalog iteration order. New orders seed their items in this order.
    pub const ALL: [DrinkType; 3] =
        [DrinkType::PeachPalmer, DrinkType::StrawberryLemonade, DrinkType::ColdBrew];

    pub fn key(self) -> &'static str {
        match self {
            Self::PeachPalmer => "peach-palmer",
            Self::StrawberryLemonade => "strawberry-lemonade",
            Self::ColdBrew => "cold-brew",
        }
    }
}

impl fmt::Display for DrinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for DrinkType {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|drink| drink.key() == trimmed)
            .ok_or_else(|| DomainError::UnknownRecipe(trimmed.to_string()))
    }
}

fn default_scaling() -> Decimal {
    Decimal::ONE
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    /// Amount for a single bottle.
    pub amount: Decimal,
    pub unit: String,
    #[serde(default = "default_scaling")]
    pub scaling: Decimal,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, amount: Decimal, unit: impl Into<String>) -> Self {
        Self { name: name.into(), amount, unit: unit.into(), scaling: Decimal::ONE }
    }

    /// Copy of this ingredient with the amount multiplied by `factor`.
    pub fn scaled_by(&self, factor: Decimal) -> Self {
        Self { amount: self.amount * factor, ..self.clone() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub product_id: DrinkType,
    pub name: String,
    pub ingredients: Vec<Ingredient>,
}
