//! Scaling group commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use fleetcap_planner::GroupInfo;
use fleetcap_provider::{GroupDirectory, GroupFilter};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{print_output, print_single, OutputFormat};

use super::CommandContext;

/// Scaling group commands.
#[derive(Debug, Args)]
pub struct GroupsCommand {
    #[command(subcommand)]
    command: GroupsSubcommand,
}

#[derive(Debug, Subcommand)]
enum GroupsSubcommand {
    /// List scaling groups in the region.
    List(ListGroupsArgs),
}

#[derive(Debug, Args)]
struct ListGroupsArgs {
    /// Tag key to filter on.
    #[arg(long, requires = "tag_value")]
    tag_key: Option<String>,

    /// Tag value to filter on.
    #[arg(long, requires = "tag_key")]
    tag_value: Option<String>,

    /// Only include groups whose name contains this fragment.
    #[arg(long)]
    name_contains: Option<String>,
}

impl GroupsCommand {
    pub async fn run(self, ctx: CommandContext) -> Result<()> {
        match self.command {
            GroupsSubcommand::List(args) => list_groups(ctx, args).await,
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
struct GroupRow {
    #[tabled(rename = "Name")]
    name: String,

    #[tabled(rename = "Min")]
    min_size: u32,

    #[tabled(rename = "Max")]
    max_size: u32,

    #[tabled(rename = "Desired")]
    desired_capacity: u32,
}

impl From<&GroupInfo> for GroupRow {
    fn from(group: &GroupInfo) -> Self {
        Self {
            name: group.name.clone(),
            min_size: group.min_size,
            max_size: group.max_size,
            desired_capacity: group.desired_capacity,
        }
    }
}

/// List scaling groups, optionally filtered by tag and name fragment.
async fn list_groups(ctx: CommandContext, args: ListGroupsArgs) -> Result<()> {
    let region = ctx.require_region()?;
    let directory = GroupDirectory::new(ctx.client()?, region);

    let mut filter = match (args.tag_key, args.tag_value) {
        (Some(key), Some(value)) => GroupFilter::by_tag(key, value),
        _ => GroupFilter::default(),
    };
    filter.name_contains = args.name_contains;

    let groups = directory.list_groups(&filter).await?;

    match ctx.format {
        OutputFormat::Table => {
            let rows: Vec<GroupRow> = groups.iter().map(GroupRow::from).collect();
            print_output(&rows, ctx.format);
        }
        OutputFormat::Json => print_single(&groups),
    }

    Ok(())
}
