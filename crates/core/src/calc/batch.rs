use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calc::aggregate::DrinkTotals;
use crate::calc::catalog::Catalog;
use crate::domain::recipe::{DrinkType, Ingredient};
use crate::errors::DomainError;

/// Scaled ingredient list needed to bottle `bottles` units of one drink.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchRecipe {
    pub drink_type: DrinkType,
    pub name: String,
    pub bottles: u64,
    pub ingredients: Vec<Ingredient>,
}

pub fn calculate_batch_recipe(
    catalog: &Catalog,
    drink_type: DrinkType,
    bottle_count: u64,
) -> Vec<Ingredient> {
    let factor = Decimal::from(bottle_count);
    catalog
        .recipe(drink_type)
        .ingredients
        .iter()
        .map(|ingredient| ingredient.scaled_by(factor))
        .collect()
}

/// Batch lookup by recipe display name, the key order totals are reported under.
pub fn calculate_batch_for_name(
    catalog: &Catalog,
    name: &str,
    bottle_count: u64,
) -> Result<Vec<Ingredient>, DomainError> {
    let recipe = catalog.find_by_name(name)?;
    Ok(calculate_batch_recipe(catalog, recipe.product_id, bottle_count))
}

/// One batch per drink with a non-zero bottle total, in the order of `totals`.
pub fn batch_recipes(catalog: &Catalog, totals: &DrinkTotals) -> Vec<BatchRecipe> {
    totals
        .non_zero()
        .map(|total| BatchRecipe {
            drink_type: total.drink_type,
            name: total.name.clone(),
            bottles: total.bottles,
            ingredients: calculate_batch_recipe(catalog, total.drink_type, total.bottles),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{batch_recipes, calculate_batch_for_name, calculate_batch_recipe};
    use crate::calc::aggregate::totals_by_drink;
    use crate::calc::catalog::Catalog;
    use crate::domain::order::{CustomerOrder, OrderId, OrderItem, OrderItemId};
    use crate::domain::recipe::DrinkType;
    use crate::errors::DomainError;

    #[test]
    fn batch_amounts_are_recipe_amounts_times_bottles() {
        let catalog = Catalog::standard();
        for drink in DrinkType::ALL {
            for bottles in [0_u64, 1, 7, 250] {
                let batch = calculate_batch_recipe(&catalog, drink, bottles);
                let recipe = catalog.recipe(drink);

                assert_eq!(batch.len(), recipe.ingredients.len());
                for (scaled, base) in batch.iter().zip(&recipe.ingredients) {
                    assert_eq!(scaled.name, base.name);
                    assert_eq!(scaled.unit, base.unit);
                    assert_eq!(scaled.scaling, base.scaling);
                    assert_eq!(scaled.amount, base.amount * Decimal::from(bottles));
                }
            }
        }
    }

    #[test]
    fn batch_by_display_name_matches_batch_by_drink() {
        let catalog = Catalog::standard();
        let by_name = calculate_batch_for_name(&catalog, "Strawberry Lemonade", 4)
            .expect("display name resolves");
        assert_eq!(by_name, calculate_batch_recipe(&catalog, DrinkType::StrawberryLemonade, 4));

        let error = calculate_batch_for_name(&catalog, "", 4).expect_err("blank name");
        assert_eq!(error, DomainError::UnknownRecipe(String::new()));
    }

    #[test]
    fn expanding_a_batch_leaves_the_catalog_untouched() {
        let catalog = Catalog::standard();
        let _ = calculate_batch_recipe(&catalog, DrinkType::ColdBrew, 12);
        assert_eq!(catalog, Catalog::standard());
    }

    #[test]
    fn batch_recipes_skip_drinks_nobody_ordered() {
        let catalog = Catalog::standard();
        let order_id = OrderId("o-1".to_string());
        let orders = vec![CustomerOrder {
            items: vec![
                OrderItem {
                    id: OrderItemId::for_drink(&order_id, DrinkType::PeachPalmer),
                    drink_type: DrinkType::PeachPalmer,
                    quantity: 0,
                },
                OrderItem {
                    id: OrderItemId::for_drink(&order_id, DrinkType::ColdBrew),
                    drink_type: DrinkType::ColdBrew,
                    quantity: 3,
                },
            ],
            id: order_id,
            customer_name: "Ada".to_string(),
        }];

        let batches = batch_recipes(&catalog, &totals_by_drink(&catalog, &orders));
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].name, "Cold Brew");
        assert_eq!(batches[0].bottles, 3);
        assert_eq!(batches[0].ingredients[0].amount, Decimal::from(1488));
    }
}
