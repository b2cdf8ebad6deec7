use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::calc::aggregate::IngredientTotals;
use crate::calc::catalog::Catalog;
use crate::confirm::ConfirmationPrompt;
use crate::domain::product::{Location, Product, ProductId};
use crate::domain::recipe::DrinkType;
use crate::errors::DomainError;
use crate::orders::parse_leading_int;

pub const RESET_PRODUCTS_PROMPT: &str = "Are you sure you want to clear all products?";

/// Largest bottle count a single location may hold.
pub const MAX_LOCATION_QUANTITY: i64 = u32::MAX as i64;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

/// Field-level problems with `product`; empty when it may be saved.
pub fn validate_product(product: &Product) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if product.name.trim().is_empty() {
        errors.push(ValidationError {
            field: "name".to_string(),
            message: "Product name is required".to_string(),
        });
    }

    for (location, quantity) in &product.quantities {
        let problem = if *quantity < 0 {
            "cannot be negative"
        } else if *quantity > MAX_LOCATION_QUANTITY {
            "is too large"
        } else {
            continue;
        };
        errors.push(ValidationError {
            field: format!("quantities.{location}"),
            message: format!("{location} quantity {problem}"),
        });
    }

    errors
}

/// Ingredient totals for the product table.
///
/// Each product's bottles are summed across locations and multiplied by the
/// recipe whose drink key equals the product id, including the ingredient
/// scaling factor. Products without a matching recipe contribute nothing.
pub fn calculate_ingredient_totals(catalog: &Catalog, products: &[Product]) -> IngredientTotals {
    let mut totals = IngredientTotals::default();

    for product in products {
        let Ok(drink_type) = product.id.0.parse::<DrinkType>() else {
            debug!(
                event_name = "products.totals.recipe_missing",
                product_id = %product.id,
                "product has no recipe; skipping"
            );
            continue;
        };

        let total_quantity = Decimal::from(product.total_quantity());
        for ingredient in &catalog.recipe(drink_type).ingredients {
            let scaled =
                ingredient.amount.saturating_mul(total_quantity).saturating_mul(ingredient.scaling);
            totals.add(&ingredient.name, scaled, &ingredient.unit);
        }
    }

    totals
}

/// The product table, replaced wholesale on every edit.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductList {
    products: Vec<Product>,
}

impl ProductList {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn into_products(self) -> Vec<Product> {
        self.products
    }

    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| &product.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Adds `product`, or returns its validation errors untouched.
    pub fn with_product(&self, product: Product) -> Result<Self, Vec<ValidationError>> {
        let mut errors = validate_product(&product);
        if self.find(&product.id).is_some() {
            errors.push(ValidationError {
                field: "id".to_string(),
                message: format!("Product `{}` already exists", product.id),
            });
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        let mut products = self.products.clone();
        products.push(product);
        Ok(Self { products })
    }

    pub fn with_name(&self, id: &ProductId, name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        self.map_product(id, |product| Product { name: name.clone(), ..product.clone() })
    }

    pub fn with_quantity(
        &self,
        id: &ProductId,
        location: Location,
        quantity: u32,
    ) -> Result<Self, DomainError> {
        self.map_product(id, |product| {
            let mut updated = product.clone();
            updated.quantities.insert(location, i64::from(quantity));
            updated
        })
    }

    /// Quantity update from raw input. Negative input is ignored and the
    /// current count is kept; unparseable input counts as 0.
    pub fn with_quantity_input(
        &self,
        id: &ProductId,
        location: Location,
        raw: &str,
    ) -> Result<Self, DomainError> {
        match parse_leading_int(raw).unwrap_or(0) {
            value if value < 0 => {
                if self.find(id).is_none() {
                    return Err(DomainError::ProductNotFound(id.clone()));
                }
                Ok(self.clone())
            }
            value => {
                let quantity = u32::try_from(value).unwrap_or(u32::MAX);
                self.with_quantity(id, location, quantity)
            }
        }
    }

    pub fn without_product(&self, id: &ProductId) -> Result<Self, DomainError> {
        if self.find(id).is_none() {
            return Err(DomainError::ProductNotFound(id.clone()));
        }

        Ok(Self {
            products: self.products.iter().filter(|product| &product.id != id).cloned().collect(),
        })
    }

    /// Clears every product once `prompt` agrees; a declined prompt keeps the list.
    #[must_use]
    pub fn reset(&self, prompt: &dyn ConfirmationPrompt) -> Self {
        self.confirm_reset(prompt).unwrap_or_else(|| self.clone())
    }

    /// The cleared list, or `None` when the prompt is declined.
    pub fn confirm_reset(&self, prompt: &dyn ConfirmationPrompt) -> Option<Self> {
        if !prompt.confirm(RESET_PRODUCTS_PROMPT) {
            return None;
        }

        info!(
            event_name = "products.reset",
            product_count = self.products.len(),
            "products cleared"
        );
        Some(Self::default())
    }

    fn map_product<F>(&self, id: &ProductId, update: F) -> Result<Self, DomainError>
    where
        F: Fn(&Product) -> Product,
    {
        if self.find(id).is_none() {
            return Err(DomainError::ProductNotFound(id.clone()));
        }

        let products = self
            .products
            .iter()
            .map(|product| if &product.id == id { update(product) } else { product.clone() })
            .collect();
        Ok(Self { products })
    }
}
