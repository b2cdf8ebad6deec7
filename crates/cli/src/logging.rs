use anyhow::{anyhow, Result};
use tracing::Level;

use bottler_core::config::{AppConfig, LogFormat};

/// Installs the global subscriber. Events go to stderr so stdout stays a
/// clean command payload.
pub fn init(config: &AppConfig) -> Result<()> {
    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);
    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(log_level)
        .with_writer(std::io::stderr);

    match config.logging.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
    .map_err(|error| anyhow!("could not install log subscriber: {error}"))
}
