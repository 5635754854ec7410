//! Authentication commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;

use crate::config::Credentials;
use crate::output::{print_info, print_success};

use super::CommandContext;

/// Authentication commands.
#[derive(Debug, Args)]
pub struct AuthCommand {
    #[command(subcommand)]
    command: AuthSubcommand,
}

#[derive(Debug, Subcommand)]
enum AuthSubcommand {
    /// Save a token for the active profile.
    Login(LoginArgs),

    /// Remove the active profile's token.
    Logout,

    /// Show authentication status for the active profile.
    Status,
}

#[derive(Debug, Args)]
struct LoginArgs {
    /// API token (for non-interactive login).
    #[arg(long, env = "FLEETCAP_TOKEN")]
    token: Option<String>,
}

impl AuthCommand {
    pub async fn run(self, ctx: CommandContext) -> Result<()> {
        match self.command {
            AuthSubcommand::Login(args) => login(ctx, args),
            AuthSubcommand::Logout => logout(ctx),
            AuthSubcommand::Status => status(ctx),
        }
    }
}

/// Save a token for the active profile.
fn login(ctx: CommandContext, args: LoginArgs) -> Result<()> {
    let Some(token) = args.token else {
        print_info("Interactive login is not supported.");
        print_info("Use --token or set the FLEETCAP_TOKEN environment variable.");
        return Ok(());
    };

    let profile = ctx.resolve_profile().to_string();
    let mut store = ctx.credentials;
    store.insert(&profile, Credentials::new(token));
    store.save()?;

    print_success(&format!("Saved token for profile '{profile}'."));
    Ok(())
}

/// Remove the active profile's token.
fn logout(ctx: CommandContext) -> Result<()> {
    let profile = ctx.resolve_profile().to_string();
    let mut store = ctx.credentials;

    if store.remove(&profile) {
        store.save()?;
        print_success(&format!("Removed token for profile '{profile}'."));
    } else {
        print_info(&format!("No token stored for profile '{profile}'."));
    }

    Ok(())
}

/// Show authentication status.
fn status(ctx: CommandContext) -> Result<()> {
    let profile = ctx.resolve_profile();

    match ctx.credentials.get(profile) {
        Some(creds) => {
            println!(
                "{} Authenticated (profile '{}')",
                "Status:".green().bold(),
                profile
            );

            if creds.is_expired() {
                println!(
                    "  {} Token has expired. Run `fleetcap auth login`.",
                    "Warning:".yellow()
                );
            } else if let Some(expires_at) = creds.expires_at {
                println!("  Expires: {}", expires_at);
            }
        }
        None => {
            println!(
                "{} Not authenticated (profile '{}')",
                "Status:".red().bold(),
                profile
            );
            println!("\nRun {} to log in.", "fleetcap auth login".cyan());
        }
    }

    let others: Vec<&str> = ctx
        .credentials
        .profile_names()
        .into_iter()
        .filter(|name| *name != profile)
        .collect();
    if !others.is_empty() {
        println!("\nOther stored profiles: {}", others.join(", "));
    }

    Ok(())
}
