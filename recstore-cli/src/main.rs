//! recstore command-line tool
//!
//! Reads a store configuration and runs one command against its data file.
//!
//! Usage:
//!   recstore --config todo.toml find Note --query "price < 12"
//!   recstore --config todo.toml put Note 3 '{"title": "milk", "price": 2}'

use anyhow::{Context, Result};
use clap::Parser;
use recstore_cli::{Cli, execute, open_store};
use recstore_storage::StoreConfig;
use tracing::{Level, debug};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) if !cli.verbose => filter,
        _ => EnvFilter::new(log_level.as_str()),
    };
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let config = StoreConfig::load(&cli.config)
        .with_context(|| format!("Failed to load configuration {}", cli.config.display()))?;
    let store = open_store(config, cli.data)?;
    debug!("Running {:?}", cli.command);

    let output = execute(&store, &cli.command)?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
