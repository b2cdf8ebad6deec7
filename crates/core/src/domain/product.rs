use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sites that place bottle orders in the product table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Location {
    Lodgic,
    Bake,
    Brew,
}

impl Location {
    pub const ALL: [Location; 3] = [Location::Lodgic, Location::Bake, Location::Brew];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lodgic => "Lodgic",
            Self::Bake => "Bake",
            Self::Brew => "Brew",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Location {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "lodgic" => Ok(Self::Lodgic),
            "bake" => Ok(Self::Bake),
            "brew" => Ok(Self::Brew),
            other => Err(DomainError::InvariantViolation(format!(
                "unknown location `{other}` (expected lodgic|bake|brew)"
            ))),
        }
    }
}

/// A bottled product with per-location bottle counts.
///
/// Quantities are signed so that a hand-edited or legacy record with a negative
/// count can still be loaded and reported by validation instead of failing to
/// decode.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub quantities: BTreeMap<Location, i64>,
}

impl Product {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: ProductId(id.into()),
            name: name.into(),
            quantities: Location::ALL.into_iter().map(|location| (location, 0)).collect(),
        }
    }

    pub fn quantity_at(&self, location: Location) -> i64 {
        self.quantities.get(&location).copied().unwrap_or(0)
    }

    /// Bottles across every location, saturating at the `i64` bounds.
    pub fn total_quantity(&self) -> i64 {
        self.quantities.values().fold(0i64, |total, quantity| total.saturating_add(*quantity))
    }
}
