//! Capacity update submission.
//!
//! Applies a plan's updates one group at a time, in plan order. Updates that
//! would change nothing are skipped without a request. The first failure
//! aborts the run; the error carries the names already applied so the caller
//! can report exactly how far the run got.

use fleetcap_planner::CapacityUpdate;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::client::ApiClient;
use crate::error::ProviderError;
use crate::idempotency;
use crate::types::{ScalingGroupResource, UpdateCapacityRequest};

/// Outcome of a fully successful apply run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Groups whose update was submitted, in submission order.
    pub applied: Vec<String>,
    /// Groups whose update was a no-op and was skipped.
    pub skipped: Vec<String>,
}

/// A failed apply run. Updates before `group` were already submitted.
#[derive(Debug, Error)]
#[error(
    "capacity update for group '{group}' failed after {applied_count} of {total} updates were applied",
    applied_count = .applied.len()
)]
pub struct ApplyError {
    /// The group whose update failed.
    pub group: String,
    /// Groups already applied before the failure, in submission order.
    pub applied: Vec<String>,
    /// Total updates in the run, including skipped ones.
    pub total: usize,
    #[source]
    pub source: ProviderError,
}

/// Applies capacity updates to scaling groups in one region.
#[derive(Debug, Clone)]
pub struct CapacityApplier {
    client: ApiClient,
    region: String,
}

impl CapacityApplier {
    pub fn new(client: ApiClient, region: impl Into<String>) -> Self {
        Self {
            client,
            region: region.into(),
        }
    }

    /// Submit every update in order, stopping at the first failure.
    pub async fn apply(&self, updates: &[CapacityUpdate]) -> Result<ApplyReport, ApplyError> {
        info!(
            region = %self.region,
            updates = updates.len(),
            "applying capacity updates"
        );

        let mut report = ApplyReport::default();

        for update in updates {
            if update.is_noop() {
                debug!(group = %update.name, "skipping no-op capacity update");
                report.skipped.push(update.name.clone());
                continue;
            }

            let request = UpdateCapacityRequest::from(update);
            match self.apply_one(&update.name, &request).await {
                Ok(group) => {
                    info!(
                        group = %update.name,
                        desired = group.desired_capacity,
                        "capacity update applied"
                    );
                    report.applied.push(update.name.clone());
                }
                Err(source) => {
                    error!(group = %update.name, error = %source, "capacity update failed");
                    return Err(ApplyError {
                        group: update.name.clone(),
                        applied: report.applied,
                        total: updates.len(),
                        source,
                    });
                }
            }
        }

        info!(
            region = %self.region,
            applied = report.applied.len(),
            skipped = report.skipped.len(),
            "capacity updates complete"
        );

        Ok(report)
    }

    async fn apply_one(
        &self,
        group: &str,
        request: &UpdateCapacityRequest,
    ) -> Result<ScalingGroupResource, ProviderError> {
        let path = format!(
            "/v1/regions/{}/scaling-groups/{}/capacity",
            self.region, group
        );
        let key = idempotency::default_idempotency_key(
            "scaling-groups.update_capacity",
            &path,
            request,
        )?;

        self.client
            .patch_with_idempotency_key(&path, request, Some(&key))
            .await
    }
}
