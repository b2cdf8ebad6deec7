use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::recipe::{DrinkType, Ingredient, Recipe};
use crate::errors::DomainError;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("could not read catalog file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse catalog: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("catalog has no recipe for `{0}`")]
    MissingRecipe(DrinkType),
    #[error("catalog defines `{0}` more than once")]
    DuplicateRecipe(DrinkType),
    #[error("recipe `{drink}` has invalid amount {amount} for ingredient `{ingredient}`")]
    InvalidAmount { drink: DrinkType, ingredient: String, amount: Decimal },
    #[error(
        "ingredient `{ingredient}` is measured in `{first_unit}` and `{conflicting_unit}`; \
         totals would mix units"
    )]
    UnitConflict { ingredient: String, first_unit: String, conflicting_unit: String },
}

/// Fixed set of recipes, exactly one per [`DrinkType`].
///
/// Construction validates coverage, so [`Catalog::recipe`] is total.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Catalog {
    recipes: Vec<Recipe>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl Catalog {
    /// Recipes used by the bottling calculator.
    pub fn standard() -> Self {
        Self::builtin("ml")
    }

    /// Recipes behind the product table totals, where syrups are weighed.
    pub fn product_defaults() -> Self {
        Self::builtin("g")
    }

    fn builtin(syrup_unit: &str) -> Self {
        let ml = |name: &str, amount: i64| Ingredient::new(name, Decimal::from(amount), "ml");
        let syrup =
            |name: &str, amount: i64| Ingredient::new(name, Decimal::from(amount), syrup_unit);

        Self {
            recipes: vec![
                Recipe {
                    product_id: DrinkType::PeachPalmer,
                    name: "Peach Palmer".to_string(),
                    ingredients: vec![
                        ml("Peach Tea", 448),
                        ml("Lemon Concentrate", 74),
                        ml("Water", 375),
                        syrup("Cane Syrup", 160),
                    ],
                },
                Recipe {
                    product_id: DrinkType::StrawberryLemonade,
                    name: "Strawberry Lemonade".to_string(),
                    ingredients: vec![
                        ml("Water", 743),
                        ml("Lemon Concentrate", 144),
                        syrup("Strawberry Syrup", 96),
                        syrup("Cane Syrup", 64),
                    ],
                },
                Recipe {
                    product_id: DrinkType::ColdBrew,
                    name: "Cold Brew".to_string(),
                    ingredients: vec![ml("Cold Brew Concentrate", 496), ml("Water", 496)],
                },
            ],
        }
    }

    pub fn from_recipes(recipes: Vec<Recipe>) -> Result<Self, CatalogError> {
        let mut by_drink: HashMap<DrinkType, Recipe> = HashMap::new();
        for recipe in recipes {
            let drink = recipe.product_id;
            if by_drink.insert(drink, recipe).is_some() {
                return Err(CatalogError::DuplicateRecipe(drink));
            }
        }

        let mut ordered = Vec::with_capacity(DrinkType::ALL.len());
        for drink in DrinkType::ALL {
            let recipe = by_drink.remove(&drink).ok_or(CatalogError::MissingRecipe(drink))?;
            ordered.push(recipe);
        }

        validate_amounts(&ordered)?;
        validate_units(&ordered)?;

        Ok(Self { recipes: ordered })
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(raw)?;
        Self::from_recipes(file.recipes)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path)
            .map_err(|source| CatalogError::ReadFile { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&raw)
    }

    /// Loads `path` when given, the standard recipes otherwise.
    pub fn load_or_standard(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::standard()),
        }
    }

    pub fn recipe(&self, drink_type: DrinkType) -> &Recipe {
        let index = DrinkType::ALL
            .iter()
            .position(|candidate| *candidate == drink_type)
            .unwrap_or_default();
        &self.recipes[index]
    }

    pub fn recipes(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.iter()
    }

    /// Resolves a recipe by its display name, as shown in order totals.
    pub fn find_by_name(&self, name: &str) -> Result<&Recipe, DomainError> {
        self.recipes
            .iter()
            .find(|recipe| recipe.name == name)
            .ok_or_else(|| DomainError::UnknownRecipe(name.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    recipes: Vec<Recipe>,
}

fn validate_amounts(recipes: &[Recipe]) -> Result<(), CatalogError> {
    for recipe in recipes {
        for ingredient in &recipe.ingredients {
            if ingredient.amount.is_sign_negative() || ingredient.scaling.is_sign_negative() {
                return Err(CatalogError::InvalidAmount {
                    drink: recipe.product_id,
                    ingredient: ingredient.name.clone(),
                    amount: ingredient.amount,
                });
            }
        }
    }
    Ok(())
}

fn validate_units(recipes: &[Recipe]) -> Result<(), CatalogError> {
    let mut units: HashMap<&str, &str> = HashMap::new();
    for ingredient in recipes.iter().flat_map(|recipe| recipe.ingredients.iter()) {
        let first_unit =
            *units.entry(ingredient.name.as_str()).or_insert(ingredient.unit.as_str());
        if first_unit != ingredient.unit {
            return Err(CatalogError::UnitConflict {
                ingredient: ingredient.name.clone(),
                first_unit: first_unit.to_string(),
                conflicting_unit: ingredient.unit.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use rust_decimal::Decimal;
    use tempfile::TempDir;

    use super::{Catalog, CatalogError};
    use crate::domain::recipe::DrinkType;
    use crate::errors::DomainError;

    const CUSTOM_CATALOG: &str = r#"
[[recipes]]
product_id = "cold-brew"
name = "Cold Brew"
ingredients = [
  { name = "Cold Brew Concentrate", amount = 500, unit = "ml" },
  { name = "Water", amount = 500, unit = "ml" },
]

[[recipes]]
product_id = "peach-palmer"
name = "Peach Palmer"
ingredients = [
  { name = "Peach Tea", amount = 448, unit = "ml" },
  { name = "Cane Syrup", amount = 160.5, unit = "g", scaling = 2 },
]

[[recipes]]
product_id = "strawberry-lemonade"
name = "Strawberry Lemonade"
ingredients = [
  { name = "Water", amount = 743, unit = "ml" },
]
"#;

    #[test]
    fn standard_catalog_passes_its_own_validation() {
        let standard = Catalog::standard();
        let rebuilt = Catalog::from_recipes(standard.recipes().cloned().collect())
            .expect("standard recipes validate");
        assert_eq!(rebuilt, standard);
    }

    #[test]
    fn product_defaults_weigh_the_syrups() {
        let products = Catalog::product_defaults();
        let rebuilt = Catalog::from_recipes(products.recipes().cloned().collect())
            .expect("product recipes validate");
        assert_eq!(rebuilt, products);

        let units = |catalog: &Catalog, drink: DrinkType| -> Vec<String> {
            catalog.recipe(drink).ingredients.iter().map(|i| i.unit.clone()).collect()
        };
        assert_eq!(units(&products, DrinkType::PeachPalmer), vec!["ml", "ml", "ml", "g"]);
        assert_eq!(units(&products, DrinkType::StrawberryLemonade), vec!["ml", "ml", "g", "g"]);
        assert_eq!(units(&Catalog::standard(), DrinkType::PeachPalmer), vec!["ml"; 4]);
        assert_eq!(
            products.recipe(DrinkType::ColdBrew),
            Catalog::standard().recipe(DrinkType::ColdBrew)
        );
    }

    #[test]
    fn lookup_is_total_and_follows_drink_order() {
        let catalog = Catalog::standard();
        for drink in DrinkType::ALL {
            assert_eq!(catalog.recipe(drink).product_id, drink);
        }
        let names: Vec<&str> = catalog.recipes().map(|recipe| recipe.name.as_str()).collect();
        assert_eq!(names, vec!["Peach Palmer", "Strawberry Lemonade", "Cold Brew"]);
    }

    #[test]
    fn toml_catalog_is_reordered_into_drink_order() {
        let catalog = Catalog::from_toml_str(CUSTOM_CATALOG).expect("custom catalog parses");

        assert_eq!(catalog.recipes().next().map(|r| r.product_id), Some(DrinkType::PeachPalmer));
        let syrup = &catalog.recipe(DrinkType::PeachPalmer).ingredients[1];
        assert_eq!(syrup.amount, Decimal::new(1605, 1));
        assert_eq!(syrup.scaling, Decimal::from(2));
        assert_eq!(catalog.recipe(DrinkType::ColdBrew).ingredients[0].scaling, Decimal::ONE);
    }

    #[test]
    fn catalog_missing_a_drink_is_rejected() {
        let mut recipes: Vec<_> = Catalog::standard().recipes().cloned().collect();
        recipes.retain(|recipe| recipe.product_id != DrinkType::ColdBrew);

        let error = Catalog::from_recipes(recipes).expect_err("cold brew missing");
        assert!(matches!(error, CatalogError::MissingRecipe(DrinkType::ColdBrew)));
    }

    #[test]
    fn duplicate_recipe_is_rejected() {
        let mut recipes: Vec<_> = Catalog::standard().recipes().cloned().collect();
        recipes.push(recipes[0].clone());

        let error = Catalog::from_recipes(recipes).expect_err("duplicate peach palmer");
        assert!(matches!(error, CatalogError::DuplicateRecipe(DrinkType::PeachPalmer)));
    }

    #[test]
    fn same_ingredient_in_two_units_is_rejected() {
        let mut recipes: Vec<_> = Catalog::standard().recipes().cloned().collect();
        recipes[1].ingredients[3].unit = "g".to_string();

        let error = Catalog::from_recipes(recipes).expect_err("cane syrup in ml and g");
        assert!(matches!(
            error,
            CatalogError::UnitConflict { ref ingredient, ref first_unit, ref conflicting_unit }
                if ingredient == "Cane Syrup" && first_unit == "ml" && conflicting_unit == "g"
        ));
    }

    #[test]
    fn negative_amount_is_rejected() {
        let mut recipes: Vec<_> = Catalog::standard().recipes().cloned().collect();
        recipes[2].ingredients[0].amount = Decimal::NEGATIVE_ONE;

        let error = Catalog::from_recipes(recipes).expect_err("negative amount");
        assert!(matches!(error, CatalogError::InvalidAmount { drink: DrinkType::ColdBrew, .. }));
    }

    #[test]
    fn unknown_drink_key_in_file_fails_to_parse() {
        let raw = CUSTOM_CATALOG.replace("cold-brew", "iced-mocha");
        let error = Catalog::from_toml_str(&raw).expect_err("unknown drink key");
        assert!(matches!(error, CatalogError::Parse(_)));
    }

    #[test]
    fn load_reads_catalog_from_disk() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("recipes.toml");
        fs::write(&path, CUSTOM_CATALOG).expect("write catalog");

        let catalog = Catalog::load_or_standard(Some(&path)).expect("load catalog");
        assert_eq!(catalog.recipe(DrinkType::ColdBrew).ingredients[0].amount, Decimal::from(500));

        let missing = Catalog::load(&dir.path().join("absent.toml")).expect_err("absent file");
        assert!(matches!(missing, CatalogError::ReadFile { .. }));
    }

    #[test]
    fn find_by_name_reports_unknown_names() {
        let catalog = Catalog::standard();
        assert_eq!(
            catalog.find_by_name("Cold Brew").map(|recipe| recipe.product_id),
            Ok(DrinkType::ColdBrew)
        );
        assert_eq!(
            catalog.find_by_name("Iced Mocha").map(|recipe| recipe.product_id),
            Err(DomainError::UnknownRecipe("Iced Mocha".to_string()))
        );
    }
}
