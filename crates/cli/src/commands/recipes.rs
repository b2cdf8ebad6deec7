use rust_decimal::Decimal;

use bottler_core::calc::catalog::Catalog;
use bottler_core::calc::format::{recipe_card, RecipeCard};

use crate::commands::{load_catalog, load_config, CommandResult};

pub fn run(raw_scale: &str) -> CommandResult {
    let scale = match raw_scale.trim().parse::<Decimal>() {
        Ok(scale) if scale > Decimal::ZERO => scale,
        _ => {
            return CommandResult::failure(
                "recipes",
                "invalid_input",
                format!("--scale must be a positive number, got `{raw_scale}`"),
                2,
            );
        }
    };

    let config = match load_config("recipes") {
        Ok(config) => config,
        Err(failure) => return failure,
    };
    let catalog = match load_catalog("recipes", &config) {
        Ok(catalog) => catalog,
        Err(failure) => return failure,
    };

    CommandResult::report(render_cards(&catalog, scale))
}

fn render_cards(catalog: &Catalog, scale: Decimal) -> String {
    catalog
        .recipes()
        .map(|recipe| render_card(&recipe_card(recipe, scale), scale))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_card(card: &RecipeCard, scale: Decimal) -> String {
    let mut lines = vec![card.title.clone()];
    for row in &card.rows {
        let mut line = format!("- {}: {} {}", row.ingredient, row.amount, row.unit);
        if let Some(scaled) = &row.scaled_amount {
            line.push_str(&format!(" (x{} = {scaled})", scale.normalize()));
        }
        lines.push(line);
    }
    lines.join("\n")
}
