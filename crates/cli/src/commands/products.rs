use std::io::{self, BufRead, Write};

use clap::Subcommand;

use bottler_core::calc::{catalog::Catalog, ingredient_lines, IngredientLine};
use bottler_core::confirm::ConfirmationPrompt;
use bottler_core::domain::product::{Location, Product, ProductId};
use bottler_core::errors::DomainError;
use bottler_core::products::{calculate_ingredient_totals, ProductList, ValidationError};
use bottler_db::{connect_with_config, migrations, ProductStore, SqlProductRepository};

use crate::commands::{build_runtime, load_config, CommandResult};

#[derive(Debug, Subcommand)]
pub enum ProductsCommand {
    #[command(about = "List stored products with per-location counts")]
    List {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Add a product; its id must match a recipe key to count toward totals")]
    Add {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        lodgic: i64,
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        bake: i64,
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        brew: i64,
    },
    #[command(about = "Change a product's display name")]
    Rename {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
    },
    #[command(about = "Set the bottle count at one location; negative input is ignored")]
    Set {
        #[arg(long)]
        id: String,
        #[arg(long, help = "Lodgic, Bake, or Brew")]
        location: String,
        #[arg(long, allow_hyphen_values = true)]
        quantity: String,
    },
    #[command(about = "Remove a product")]
    Remove {
        #[arg(long)]
        id: String,
    },
    #[command(about = "Clear every product after confirmation")]
    Reset {
        #[arg(long, help = "Skip the confirmation prompt")]
        yes: bool,
    },
    #[command(about = "Total ingredients needed for all stored products")]
    Totals {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

impl ProductsCommand {
    pub fn assume_yes(&self) -> bool {
        matches!(self, Self::Reset { yes: true })
    }
}

/// Asks on stderr and reads a `y`/`yes` answer from stdin.
pub struct StdinPrompt;

impl ConfirmationPrompt for StdinPrompt {
    fn confirm(&self, message: &str) -> bool {
        eprint!("{message} [y/N] ");
        if io::stderr().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

pub fn run(command: ProductsCommand, prompt: &dyn ConfirmationPrompt) -> CommandResult {
    let config = match load_config("products") {
        Ok(config) => config,
        Err(failure) => return failure,
    };
    let runtime = match build_runtime("products") {
        Ok(runtime) => runtime,
        Err(failure) => return failure,
    };

    runtime.block_on(async {
        let pool = match connect_with_config(&config.database).await {
            Ok(pool) => pool,
            Err(error) => {
                return CommandResult::failure("products", "db_connectivity", error.to_string(), 4)
            }
        };
        if let Err(error) = migrations::run_pending(&pool).await {
            return CommandResult::failure("products", "migration", error.to_string(), 5);
        }

        let store = ProductStore::new(SqlProductRepository::new(pool.clone()));
        let result = execute(command, &store, prompt).await;
        pool.close().await;
        result
    })
}

async fn execute(
    command: ProductsCommand,
    store: &ProductStore<SqlProductRepository>,
    prompt: &dyn ConfirmationPrompt,
) -> CommandResult {
    let products = store.load().await;

    match command {
        ProductsCommand::List { json } => render_list(&products, json),
        ProductsCommand::Add { id, name, lodgic, bake, brew } => {
            let mut product = Product::new(id, name);
            product.quantities.insert(Location::Lodgic, lodgic);
            product.quantities.insert(Location::Bake, bake);
            product.quantities.insert(Location::Brew, brew);
            let product_id = product.id.clone();

            match products.with_product(product) {
                Ok(updated) => {
                    store.save(&updated).await;
                    CommandResult::success("products", format!("added product `{product_id}`"))
                }
                Err(errors) => validation_failure(&errors),
            }
        }
        ProductsCommand::Rename { id, name } => {
            let id = ProductId(id);
            let updated = products.with_name(&id, name);
            persist(store, updated, format!("renamed product `{id}`")).await
        }
        ProductsCommand::Set { id, location, quantity } => {
            let id = ProductId(id);
            let updated = location
                .parse::<Location>()
                .and_then(|location| products.with_quantity_input(&id, location, &quantity));
            persist(store, updated, format!("updated product `{id}`")).await
        }
        ProductsCommand::Remove { id } => {
            let id = ProductId(id);
            let updated = products.without_product(&id);
            persist(store, updated, format!("removed product `{id}`")).await
        }
        ProductsCommand::Reset { .. } => {
            let Some(cleared) = products.confirm_reset(prompt) else {
                return CommandResult::success("products", "reset cancelled; products kept");
            };
            store.save(&cleared).await;
            CommandResult::success("products", "cleared all products")
        }
        ProductsCommand::Totals { json } => {
            let totals =
                calculate_ingredient_totals(&Catalog::product_defaults(), products.products());
            render_totals(&ingredient_lines(&totals), json)
        }
    }
}

async fn persist(
    store: &ProductStore<SqlProductRepository>,
    updated: Result<ProductList, DomainError>,
    message: String,
) -> CommandResult {
    match updated {
        Ok(updated) => {
            store.save(&updated).await;
            CommandResult::success("products", message)
        }
        Err(error @ DomainError::ProductNotFound(_)) => {
            CommandResult::failure("products", "not_found", error.to_string(), 2)
        }
        Err(error) => CommandResult::failure("products", "invalid_input", error.to_string(), 2),
    }
}

fn validation_failure(errors: &[ValidationError]) -> CommandResult {
    let message = errors
        .iter()
        .map(|error| format!("{}: {}", error.field, error.message))
        .collect::<Vec<_>>()
        .join("; ");
    CommandResult::failure("products", "validation", message, 2)
}

fn render_list(products: &ProductList, json_output: bool) -> CommandResult {
    if json_output {
        return match serde_json::to_string_pretty(products) {
            Ok(output) => CommandResult::report(output),
            Err(error) => {
                CommandResult::failure("products", "serialization", error.to_string(), 3)
            }
        };
    }

    if products.is_empty() {
        return CommandResult::report("No products yet.");
    }

    let lines = products
        .products()
        .iter()
        .map(|product| {
            let counts = Location::ALL
                .iter()
                .map(|location| format!("{location} {}", product.quantity_at(*location)))
                .collect::<Vec<_>>()
                .join(", ");
            format!(
                "- {} ({}): {counts} (total {})",
                product.name,
                product.id,
                product.total_quantity()
            )
        })
        .collect::<Vec<_>>();
    CommandResult::report(lines.join("\n"))
}

fn render_totals(lines: &[IngredientLine], json_output: bool) -> CommandResult {
    if json_output {
        return match serde_json::to_string_pretty(lines) {
            Ok(output) => CommandResult::report(output),
            Err(error) => {
                CommandResult::failure("products", "serialization", error.to_string(), 3)
            }
        };
    }

    if lines.is_empty() {
        return CommandResult::report("No ingredients needed.");
    }

    let rendered = lines
        .iter()
        .map(|line| {
            if line.unit.is_empty() {
                format!("- {}: {}", line.ingredient, line.amount)
            } else {
                format!("- {}: {} {}", line.ingredient, line.amount, line.unit)
            }
        })
        .collect::<Vec<_>>();
    CommandResult::report(rendered.join("\n"))
}
