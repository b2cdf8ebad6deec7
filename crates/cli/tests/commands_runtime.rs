use std::env;
use std::sync::{Mutex, OnceLock};

use bottler_cli::commands::products::ProductsCommand;
use bottler_cli::commands::{calc, doctor, migrate, products, recipes};
use bottler_core::confirm::{AlwaysConfirm, NeverConfirm};
use serde_json::Value;
use tempfile::TempDir;

#[test]
fn migrate_returns_success_with_valid_env() {
    with_env(&[("BOTTLER_DATABASE_URL", "sqlite::memory:")], || {
        let result = migrate::run();
        assert_eq!(result.exit_code, 0, "expected successful migrate run");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "migrate");
        assert_eq!(payload["status"], "ok");
    });
}

#[test]
fn migrate_returns_config_failure_for_non_sqlite_url() {
    with_env(&[("BOTTLER_DATABASE_URL", "postgres://localhost/bottler")], || {
        let result = migrate::run();
        assert_eq!(result.exit_code, 2, "expected config validation failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "config_validation");
    });
}

#[test]
fn calc_json_reports_worked_example() {
    with_env(&[], || {
        let result = calc::run(&["Ada:peach-palmer=2".to_string()], true);
        assert_eq!(result.exit_code, 0, "expected calc success");

        let report = parse_payload(&result.output);
        assert_eq!(report["order_count"], 1);
        assert_eq!(report["drink_totals"][0]["name"], "Peach Palmer");
        assert_eq!(report["drink_totals"][0]["bottles"], 2);
        assert_eq!(report["total_ingredients"][0]["ingredient"], "Peach Tea");
        assert_eq!(report["total_ingredients"][0]["amount"], "896.0");
        assert_eq!(report["total_ingredients"][0]["unit"], "ml");
    });
}

#[test]
fn calc_rejects_unknown_drink() {
    with_env(&[], || {
        let result = calc::run(&["Ada:iced-mocha=2".to_string()], false);
        assert_eq!(result.exit_code, 2);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "calc");
        assert_eq!(payload["error_class"], "invalid_order");
    });
}

#[test]
fn recipes_rejects_non_positive_scale() {
    with_env(&[], || {
        let result = recipes::run("0");
        assert_eq!(result.exit_code, 2);
        assert_eq!(parse_payload(&result.output)["error_class"], "invalid_input");
    });
}

#[test]
fn missing_catalog_file_is_reported() {
    with_env(&[("BOTTLER_CATALOG_PATH", "/nonexistent/bottler-recipes.toml")], || {
        let result = recipes::run("1");
        assert_eq!(result.exit_code, 2);
        assert_eq!(parse_payload(&result.output)["error_class"], "catalog");
    });
}

#[test]
fn doctor_json_passes_with_in_memory_database() {
    with_env(&[("BOTTLER_DATABASE_URL", "sqlite::memory:")], || {
        let report = parse_payload(&doctor::run(true));
        assert_eq!(report["overall_status"], "pass");
        assert_eq!(report["checks"][1]["name"], "recipe_catalog");
    });
}

#[test]
fn products_lifecycle_persists_between_commands() {
    let dir = TempDir::new().expect("temp dir");
    let url = format!("sqlite://{}", dir.path().join("bottler.db").display());

    with_env(&[("BOTTLER_DATABASE_URL", url.as_str())], || {
        let added = products::run(
            ProductsCommand::Add {
                id: "cold-brew".to_string(),
                name: "Cold Brew".to_string(),
                lodgic: 1,
                bake: 0,
                brew: 2,
            },
            &NeverConfirm,
        );
        assert_eq!(added.exit_code, 0, "add failed: {}", added.output);

        let ignored = products::run(
            ProductsCommand::Set {
                id: "cold-brew".to_string(),
                location: "brew".to_string(),
                quantity: "-4".to_string(),
            },
            &NeverConfirm,
        );
        assert_eq!(ignored.exit_code, 0);

        let totals = products::run(ProductsCommand::Totals { json: true }, &NeverConfirm);
        let lines = parse_payload(&totals.output);
        assert_eq!(lines[0]["ingredient"], "Cold Brew Concentrate");
        assert_eq!(lines[0]["amount"], "1.49L (1488ml)");

        let declined = products::run(ProductsCommand::Reset { yes: false }, &NeverConfirm);
        assert_eq!(parse_payload(&declined.output)["message"], "reset cancelled; products kept");

        let listed = products::run(ProductsCommand::List { json: true }, &NeverConfirm);
        assert_eq!(parse_payload(&listed.output)[0]["quantities"]["Brew"], 2);

        let cleared = products::run(ProductsCommand::Reset { yes: true }, &AlwaysConfirm);
        assert_eq!(parse_payload(&cleared.output)["message"], "cleared all products");

        let listed = products::run(ProductsCommand::List { json: true }, &NeverConfirm);
        assert_eq!(parse_payload(&listed.output), Value::Array(Vec::new()));
    });
}

#[test]
fn products_add_returns_validation_errors() {
    let dir = TempDir::new().expect("temp dir");
    let url = format!("sqlite://{}", dir.path().join("bottler.db").display());

    with_env(&[("BOTTLER_DATABASE_URL", url.as_str())], || {
        let result = products::run(
            ProductsCommand::Add {
                id: "peach-palmer".to_string(),
                name: " ".to_string(),
                lodgic: 0,
                bake: -1,
                brew: 0,
            },
            &NeverConfirm,
        );
        assert_eq!(result.exit_code, 2);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["error_class"], "validation");
        assert_eq!(
            payload["message"],
            "name: Product name is required; quantities.Bake: Bake quantity cannot be negative"
        );
    });
}

#[test]
fn products_totals_weigh_syrups_and_reject_oversized_counts() {
    let dir = TempDir::new().expect("temp dir");
    let url = format!("sqlite://{}", dir.path().join("bottler.db").display());

    with_env(&[("BOTTLER_DATABASE_URL", url.as_str())], || {
        let oversized = products::run(
            ProductsCommand::Add {
                id: "peach-palmer".to_string(),
                name: "Peach Palmer".to_string(),
                lodgic: i64::MAX,
                bake: 1,
                brew: 0,
            },
            &NeverConfirm,
        );
        assert_eq!(oversized.exit_code, 2);
        assert_eq!(
            parse_payload(&oversized.output)["message"],
            "quantities.Lodgic: Lodgic quantity is too large"
        );

        let added = products::run(
            ProductsCommand::Add {
                id: "peach-palmer".to_string(),
                name: "Peach Palmer".to_string(),
                lodgic: 1,
                bake: 1,
                brew: 0,
            },
            &NeverConfirm,
        );
        assert_eq!(added.exit_code, 0, "add failed: {}", added.output);

        let totals = products::run(ProductsCommand::Totals { json: true }, &NeverConfirm);
        let lines = parse_payload(&totals.output);
        let syrup = lines
            .as_array()
            .and_then(|lines| lines.iter().find(|line| line["ingredient"] == "Cane Syrup"))
            .cloned()
            .expect("cane syrup line");
        assert_eq!(syrup["amount"], "320.0");
        assert_eq!(syrup["unit"], "g");
    });
}

#[test]
fn products_confirmed_reset_of_empty_list_reports_cleared() {
    let dir = TempDir::new().expect("temp dir");
    let url = format!("sqlite://{}", dir.path().join("bottler.db").display());

    with_env(&[("BOTTLER_DATABASE_URL", url.as_str())], || {
        let cleared = products::run(ProductsCommand::Reset { yes: true }, &AlwaysConfirm);
        assert_eq!(cleared.exit_code, 0);
        assert_eq!(parse_payload(&cleared.output)["message"], "cleared all products");
    });
}

#[test]
fn products_remove_unknown_id_is_not_found() {
    let dir = TempDir::new().expect("temp dir");
    let url = format!("sqlite://{}", dir.path().join("bottler.db").display());

    with_env(&[("BOTTLER_DATABASE_URL", url.as_str())], || {
        let result =
            products::run(ProductsCommand::Remove { id: "kombucha".to_string() }, &NeverConfirm);
        assert_eq!(result.exit_code, 2);
        assert_eq!(parse_payload(&result.output)["error_class"], "not_found");
    });
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be valid JSON")
}

fn with_env(vars: &[(&str, &str)], test_fn: impl FnOnce()) {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let _guard =
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().expect("env mutex should not be poisoned");

    let keys = [
        "BOTTLER_DATABASE_URL",
        "BOTTLER_DATABASE_MAX_CONNECTIONS",
        "BOTTLER_DATABASE_TIMEOUT_SECS",
        "BOTTLER_CATALOG_PATH",
        "BOTTLER_LOGGING_LEVEL",
        "BOTTLER_LOGGING_FORMAT",
        "BOTTLER_LOG_LEVEL",
        "BOTTLER_LOG_FORMAT",
    ];

    let previous_values: Vec<(&str, Option<String>)> =
        keys.iter().map(|key| (*key, env::var(key).ok())).collect();

    for key in &keys {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    test_fn();

    for (key, value) in previous_values {
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
    }
}
