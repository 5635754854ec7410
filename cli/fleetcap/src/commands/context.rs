//! Context commands (saved defaults for profile and region).

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::output::{print_single, print_success, OutputFormat};

use super::CommandContext;

/// Manage saved CLI context (defaults for profile and region).
#[derive(Debug, Args)]
pub struct ContextCommand {
    #[command(subcommand)]
    command: ContextSubcommand,
}

#[derive(Debug, Subcommand)]
enum ContextSubcommand {
    /// Show the saved context.
    Show,

    /// Save default profile and region.
    Set(SetArgs),

    /// Clear the saved context.
    Clear,
}

#[derive(Debug, Args)]
struct SetArgs {
    /// Default credentials profile.
    #[arg(long)]
    profile: Option<String>,

    /// Default region.
    #[arg(long)]
    region: Option<String>,
}

#[derive(Debug, Serialize)]
struct ContextView {
    endpoint: String,
    profile: Option<String>,
    region: Option<String>,
}

impl ContextCommand {
    pub async fn run(self, ctx: CommandContext) -> Result<()> {
        match self.command {
            ContextSubcommand::Show => show(ctx),
            ContextSubcommand::Set(args) => set(ctx, args),
            ContextSubcommand::Clear => clear(ctx),
        }
    }
}

fn show(ctx: CommandContext) -> Result<()> {
    let view = ContextView {
        endpoint: ctx.config.endpoint.clone(),
        profile: ctx.config.context.profile.clone(),
        region: ctx.config.context.region.clone(),
    };

    match ctx.format {
        OutputFormat::Json => print_single(&view),
        OutputFormat::Table => {
            println!("endpoint: {}", view.endpoint);
            println!("profile: {}", view.profile.as_deref().unwrap_or("-"));
            println!("region: {}", view.region.as_deref().unwrap_or("-"));
        }
    }

    Ok(())
}

fn set(mut ctx: CommandContext, args: SetArgs) -> Result<()> {
    if args.profile.is_none() && args.region.is_none() {
        return Err(anyhow::anyhow!(
            "Nothing to set. Pass --profile and/or --region."
        ));
    }

    if let Some(profile) = args.profile {
        ctx.config.context.profile = Some(profile);
    }
    if let Some(region) = args.region {
        ctx.config.context.region = Some(region);
    }
    ctx.config.save()?;

    match ctx.format {
        OutputFormat::Json => print_single(&serde_json::json!({ "ok": true })),
        OutputFormat::Table => print_success("Saved context"),
    }

    Ok(())
}

fn clear(mut ctx: CommandContext) -> Result<()> {
    ctx.config.context.profile = None;
    ctx.config.context.region = None;
    ctx.config.save()?;

    match ctx.format {
        OutputFormat::Json => print_single(&serde_json::json!({ "ok": true })),
        OutputFormat::Table => print_success("Cleared saved context"),
    }

    Ok(())
}
