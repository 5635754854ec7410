//! CLI commands.

mod auth;
mod context;
mod groups;
mod set_capacity;

use anyhow::Result;
use clap::{Parser, Subcommand};
use fleetcap_provider::ApiClient;

use crate::config::{Config, CredentialsStore, DEFAULT_PROFILE};
use crate::output::OutputFormat;

/// fleetcap CLI - plan and apply scaling group capacity.
#[derive(Debug, Parser)]
#[command(name = "fleetcap")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format (table or json).
    #[arg(long, global = true, default_value = "table")]
    format: String,

    /// Credentials profile to use.
    #[arg(long, global = true, env = "FLEETCAP_PROFILE")]
    profile: Option<String>,

    /// Region to operate in.
    #[arg(long, global = true, env = "FLEETCAP_REGION")]
    region: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Authenticate with the scaling service.
    Auth(auth::AuthCommand),

    /// Show or change saved CLI context.
    Context(context::ContextCommand),

    /// Inspect scaling groups.
    Groups(groups::GroupsCommand),

    /// Distribute a desired instance count across matching groups.
    SetCapacity(set_capacity::SetCapacityCommand),

    /// Show CLI version.
    Version,
}

impl Cli {
    /// Run the CLI command.
    pub async fn run(self) -> Result<()> {
        let format = match self.format.as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Table,
        };

        let config = Config::load()?;
        let credentials = CredentialsStore::load()?;

        // Build context from flags and config
        let ctx = CommandContext {
            config,
            credentials,
            format,
            profile: self.profile,
            region: self.region,
        };

        match self.command {
            Commands::Auth(cmd) => cmd.run(ctx).await,
            Commands::Context(cmd) => cmd.run(ctx).await,
            Commands::Groups(cmd) => cmd.run(ctx).await,
            Commands::SetCapacity(cmd) => cmd.run(ctx).await,
            Commands::Version => {
                println!("fleetcap {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

/// Shared command context.
pub struct CommandContext {
    pub config: Config,
    pub credentials: CredentialsStore,
    pub format: OutputFormat,
    pub profile: Option<String>,
    pub region: Option<String>,
}

impl CommandContext {
    /// Get an API client authenticated with the active profile's token.
    pub fn client(&self) -> Result<ApiClient> {
        let token = self
            .credentials
            .get(self.resolve_profile())
            .map(|creds| creds.token.as_str());
        Ok(ApiClient::new(&self.config.endpoint, token)?)
    }

    /// Resolve the active profile, preferring flag over context.
    pub fn resolve_profile(&self) -> &str {
        self.profile
            .as_deref()
            .or(self.config.context.profile.as_deref())
            .unwrap_or(DEFAULT_PROFILE)
    }

    /// Resolve the current region, preferring flag over context.
    pub fn resolve_region(&self) -> Option<&str> {
        self.region
            .as_deref()
            .or(self.config.context.region.as_deref())
    }

    /// Require a region to be specified.
    pub fn require_region(&self) -> Result<&str> {
        self.resolve_region().ok_or_else(|| {
            anyhow::anyhow!("No region specified. Use --region or set a default context.")
        })
    }
}
