//! Set-capacity command (plan and apply an even capacity distribution).

use anyhow::Result;
use clap::Args;
use fleetcap_planner::{effective_cap, plan_equal_split, plan_zero, CapacityUpdate, Plan};
use fleetcap_provider::{CapacityApplier, GroupDirectory, GroupFilter};
use serde::Serialize;
use tabled::Tabled;
use tracing::{debug, info};

use crate::output::{
    print_info, print_output, print_single, print_success, print_warning, OutputFormat,
};

use super::CommandContext;

/// Distribute a desired instance count across matching scaling groups.
#[derive(Debug, Args)]
pub struct SetCapacityCommand {
    /// Tag key to filter groups.
    #[arg(long, default_value = "eks:cluster-name")]
    tag_key: String,

    /// Tag value to filter groups.
    #[arg(long)]
    tag_value: String,

    /// Desired instances total across matched groups (0 allowed).
    #[arg(long)]
    desired: i64,

    /// Optional max size cap to apply to each group.
    #[arg(long)]
    max_size: Option<i64>,

    /// Further filter: group name contains this fragment.
    #[arg(long)]
    name_contains: Option<String>,

    /// Do not perform updates, only report the plan.
    #[arg(long)]
    dry_run: bool,
}

/// One planned update, for table output.
#[derive(Debug, Serialize, Tabled)]
struct PlanRow {
    #[tabled(rename = "Group")]
    group: String,

    #[tabled(rename = "Desired", display = "display_option_u32")]
    desired: Option<u32>,

    #[tabled(rename = "Min", display = "display_option_u32")]
    min_size: Option<u32>,

    #[tabled(rename = "Max", display = "display_option_u32")]
    max_size: Option<u32>,
}

fn display_option_u32(opt: &Option<u32>) -> String {
    opt.map(|v| v.to_string())
        .unwrap_or_else(|| "-".to_string())
}

impl From<&CapacityUpdate> for PlanRow {
    fn from(update: &CapacityUpdate) -> Self {
        Self {
            group: update.name.clone(),
            desired: update.desired,
            min_size: update.min_size,
            max_size: update.max_size,
        }
    }
}

/// Machine-readable run summary for `--format json`.
#[derive(Debug, Serialize)]
struct CapacityReport {
    region: String,
    requested: u32,
    planned: u64,
    matched_groups: usize,
    dry_run: bool,
    updates: Vec<CapacityUpdate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    applied: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    skipped: Option<Vec<String>>,
}

impl SetCapacityCommand {
    pub async fn run(self, ctx: CommandContext) -> Result<()> {
        if self.desired < 0 {
            return Err(anyhow::anyhow!(
                "Desired must be >= 0, got {}",
                self.desired
            ));
        }
        let desired = u32::try_from(self.desired)
            .map_err(|_| anyhow::anyhow!("Desired is too large, got {}", self.desired))?;

        let region = ctx.require_region()?.to_string();
        let client = ctx.client()?;

        info!(
            tag_key = %self.tag_key,
            tag_value = %self.tag_value,
            desired,
            max_size = ?self.max_size,
            region = %region,
            dry_run = self.dry_run,
            "starting capacity run"
        );

        // Discover matching groups
        let directory = GroupDirectory::new(client.clone(), region.clone());
        let mut filter = GroupFilter::by_tag(self.tag_key.clone(), self.tag_value.clone());
        if let Some(fragment) = self.name_contains.clone() {
            filter = filter.with_name_contains(fragment);
        }

        let groups = directory.list_groups(&filter).await?;
        if groups.is_empty() {
            return Err(anyhow::anyhow!(
                "No scaling groups matched the provided filters (tag {}={})",
                self.tag_key,
                self.tag_value
            ));
        }

        // Plan the distribution
        let plan: Plan = if desired == 0 {
            plan_zero(&groups)
        } else {
            let n = groups.len() as u32;
            debug!(base = desired / n, remainder = desired % n, "fair share computed");
            for group in &groups {
                let cap = effective_cap(group, self.max_size);
                debug!(group = %group.name, cap, "effective cap");
            }
            plan_equal_split(&groups, desired, self.max_size)
        };

        let planned = plan.total_desired();
        info!(
            matched = groups.len(),
            planned,
            requested = desired,
            "plan computed"
        );

        if planned < u64::from(desired) {
            print_warning(&format!(
                "Planned total desired {planned} is less than requested {desired}. \
                 This may be due to per-group caps or current max size limits."
            ));
        }

        match ctx.format {
            OutputFormat::Table => {
                print_info(&format!(
                    "{} scaling groups matched {}={}",
                    groups.len(),
                    self.tag_key,
                    self.tag_value
                ));
                let rows: Vec<PlanRow> = plan.updates.iter().map(PlanRow::from).collect();
                print_output(&rows, ctx.format);
                print_info(&format!(
                    "Planned {planned} of {desired} requested instances."
                ));

                if self.dry_run {
                    print_info("Dry run; no changes applied.");
                    return Ok(());
                }

                let applier = CapacityApplier::new(client, region);
                let report = applier.apply(&plan.updates).await?;
                print_success(&format!(
                    "Submitted {} capacity updates ({} skipped as no-ops).",
                    report.applied.len(),
                    report.skipped.len()
                ));
            }
            OutputFormat::Json => {
                let mut summary = CapacityReport {
                    region: region.clone(),
                    requested: desired,
                    planned,
                    matched_groups: groups.len(),
                    dry_run: self.dry_run,
                    updates: plan.updates.clone(),
                    applied: None,
                    skipped: None,
                };

                if !self.dry_run {
                    let applier = CapacityApplier::new(client, region);
                    let report = applier.apply(&plan.updates).await?;
                    summary.applied = Some(report.applied);
                    summary.skipped = Some(report.skipped);
                }

                print_single(&summary);
            }
        }

        Ok(())
    }
}
