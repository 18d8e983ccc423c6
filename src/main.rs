//! # InsightDash
//!
//! Entry point: parses the command line, initialises tracing, loads
//! configuration and dispatches to the command handlers.

#![forbid(unsafe_code)]
#![forbid(clippy::unwrap_used)]
#![forbid(clippy::panic)]
#![deny(clippy::expect_used)]

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use insightdash::cli::Cli;
use insightdash::commands::execute_command;
use insightdash::config::load_config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing();

    let config = load_config(cli.config.as_deref(), |key| std::env::var(key).ok())
        .context("Failed to load configuration")?;

    execute_command(cli.command, config).await
}

/// Initialize tracing subscriber with environment filter.
///
/// Logs go to stderr so `sankey` and `export` output on stdout stays clean JSON.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,insightdash_web=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
