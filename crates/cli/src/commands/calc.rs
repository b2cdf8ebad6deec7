use bottler_core::calc::catalog::Catalog;
use bottler_core::calc::{CalculatorReport, IngredientLine};
use bottler_core::domain::recipe::DrinkType;
use bottler_core::errors::DomainError;
use bottler_core::orders::{parse_quantity, OrderBook};

use crate::commands::{load_catalog, load_config, CommandResult};

/// One `--order` argument: `customer:drink=qty,drink=qty`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderSpec {
    pub customer_name: String,
    pub quantities: Vec<(DrinkType, u32)>,
}

pub fn parse_order_spec(raw: &str) -> Result<OrderSpec, DomainError> {
    let (customer_name, items) = raw.split_once(':').unwrap_or(("", raw));

    let mut quantities = Vec::new();
    for item in items.split(',').map(str::trim).filter(|item| !item.is_empty()) {
        let (drink, quantity) = item.split_once('=').ok_or_else(|| {
            DomainError::InvariantViolation(format!(
                "order item `{item}` must look like `drink=quantity`"
            ))
        })?;
        quantities.push((drink.parse::<DrinkType>()?, parse_quantity(quantity)));
    }

    Ok(OrderSpec { customer_name: customer_name.trim().to_string(), quantities })
}

pub fn build_order_book(catalog: &Catalog, specs: &[OrderSpec]) -> Result<OrderBook, DomainError> {
    let mut book = OrderBook::default();
    for spec in specs {
        book = book.with_new_order(catalog, spec.customer_name.clone());
        let Some(order_id) = book.orders().last().map(|order| order.id.clone()) else {
            continue;
        };
        for (drink_type, quantity) in &spec.quantities {
            book = book.with_drink_quantity(&order_id, *drink_type, *quantity)?;
        }
    }
    Ok(book)
}

pub fn run(raw_orders: &[String], json_output: bool) -> CommandResult {
    let config = match load_config("calc") {
        Ok(config) => config,
        Err(failure) => return failure,
    };
    let catalog = match load_catalog("calc", &config) {
        Ok(catalog) => catalog,
        Err(failure) => return failure,
    };

    let book = raw_orders
        .iter()
        .map(|raw| parse_order_spec(raw))
        .collect::<Result<Vec<_>, _>>()
        .and_then(|specs| build_order_book(&catalog, &specs));
    let book = match book {
        Ok(book) => book,
        Err(error) => return CommandResult::failure("calc", "invalid_order", error.to_string(), 2),
    };

    let report = CalculatorReport::build(&catalog, book.orders());
    if json_output {
        return match serde_json::to_string_pretty(&report) {
            Ok(output) => CommandResult::report(output),
            Err(error) => CommandResult::failure("calc", "serialization", error.to_string(), 3),
        };
    }

    CommandResult::report(render_human(&report))
}

fn render_human(report: &CalculatorReport) -> String {
    if report.order_count == 0 {
        return "No orders yet. Pass --order to add one.".to_string();
    }

    let mut lines = vec!["Order totals:".to_string()];
    if report.drink_totals.is_empty() {
        lines.push("- (no bottles ordered)".to_string());
    }
    for total in &report.drink_totals {
        lines.push(format!("- {}: {} bottles", total.name, total.bottles));
    }

    for batch in &report.batches {
        lines.push(String::new());
        lines.push(format!("{} ({} bottles):", batch.drink, batch.bottles));
        lines.extend(batch.ingredients.iter().map(render_line));
    }

    lines.push(String::new());
    lines.push("Total ingredients:".to_string());
    lines.extend(report.total_ingredients.iter().map(render_line));

    lines.join("\n")
}

fn render_line(line: &IngredientLine) -> String {
    if line.unit.is_empty() {
        format!("- {}: {}", line.ingredient, line.amount)
    } else {
        format!("- {}: {} {}", line.ingredient, line.amount, line.unit)
    }
}
