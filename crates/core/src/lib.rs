pub mod calc;
pub mod config;
pub mod confirm;
pub mod domain;
pub mod errors;
pub mod orders;
pub mod products;

pub use calc::aggregate::{
    total_ingredients, totals_by_drink, DrinkTotal, DrinkTotals, IngredientTotal, IngredientTotals,
};
pub use calc::batch::{batch_recipes, calculate_batch_for_name, calculate_batch_recipe, BatchRecipe};
pub use calc::catalog::{Catalog, CatalogError};
pub use calc::format::{format_amount, format_number, FormattedAmount};
pub use calc::CalculatorReport;
pub use confirm::{AlwaysConfirm, ConfirmationPrompt, NeverConfirm};
pub use domain::order::{CustomerOrder, OrderId, OrderItem, OrderItemId};
pub use domain::product::{Location, Product, ProductId};
pub use domain::recipe::{DrinkType, Ingredient, Recipe};
pub use errors::DomainError;
pub use orders::{parse_quantity, OrderBook};
pub use products::{calculate_ingredient_totals, validate_product, ProductList, ValidationError};
