pub mod commands;
pub mod logging;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use bottler_core::config::{AppConfig, LoadOptions};
use bottler_core::confirm::{AlwaysConfirm, ConfirmationPrompt};

use crate::commands::products::{ProductsCommand, StdinPrompt};

#[derive(Debug, Parser)]
#[command(
    name = "bottler",
    about = "Bottled drink ingredient calculator",
    long_about = "Total bottle orders per drink, expand batch recipes, and track per-location \
                  product counts backed by SQLite.",
    after_help = "Examples:\n  bottler calc --order \"Ada:peach-palmer=2,cold-brew=1\"\n  \
                  bottler recipes --scale 1.5\n  bottler products totals --json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Compute bottle totals, batch recipes, and total ingredients for orders")]
    Calc {
        #[arg(
            long = "order",
            value_name = "CUSTOMER:DRINK=QTY,...",
            help = "One customer order; repeat the flag for more orders",
            allow_hyphen_values = true
        )]
        orders: Vec<String>,
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Show recipe cards, optionally with a scaled column")]
    Recipes {
        #[arg(long, default_value = "1", help = "Multiplier for the scaled column")]
        scale: String,
    },
    #[command(subcommand, about = "Manage per-location product counts")]
    Products(ProductsCommand),
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
    #[command(about = "Validate config, recipe catalog, and DB connectivity")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Apply pending database migrations and return structured status output")]
    Migrate,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    if let Ok(config) = AppConfig::load(LoadOptions::default()) {
        if let Err(error) = logging::init(&config) {
            eprintln!("{error}");
        }
    }

    let result = match cli.command {
        Command::Calc { orders, json } => commands::calc::run(&orders, json),
        Command::Recipes { scale } => commands::recipes::run(&scale),
        Command::Products(command) => {
            let prompt: Box<dyn ConfirmationPrompt> =
                if command.assume_yes() { Box::new(AlwaysConfirm) } else { Box::new(StdinPrompt) };
            commands::products::run(command, prompt.as_ref())
        }
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Doctor { json } => {
            commands::CommandResult { exit_code: 0, output: commands::doctor::run(json) }
        }
        Command::Migrate => commands::migrate::run(),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
