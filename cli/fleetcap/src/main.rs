//! fleetcap - capacity planning CLI for scaling groups.
//!
//! Plans an even distribution of a desired instance count across
//! tag-matched scaling groups and applies the resulting capacity updates.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod output;

use commands::Cli;

/// Filter directives applied when `RUST_LOG` is unset. Targets in this
/// binary begin with `fleetcap` (the bin name), not the package name.
const DEFAULT_LOG_FILTER: &str = "fleetcap=info,fleetcap_provider=info";

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout is reserved for command output.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = cli.run().await {
        error::print_error(&e);
        std::process::exit(1);
    }

    Ok(())
}
