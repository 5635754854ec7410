//! Value objects shared between the planner and its callers.

use serde::{Deserialize, Serialize};

/// Read-only snapshot of one scaling group's current state.
///
/// Built by the group directory from live or test data. The planner
/// reads `name` and `max_size`; `min_size` and `desired_capacity` are
/// carried for reporting only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupInfo {
    /// Unique group name within the region.
    pub name: String,

    /// Current minimum size.
    pub min_size: u32,

    /// Current maximum size, the group's own capacity ceiling.
    pub max_size: u32,

    /// Current desired capacity (informational).
    pub desired_capacity: u32,
}

/// One per-group instruction produced by the planner.
///
/// Each value field is three-state: `None` means "do not change this
/// attribute" and must not be sent to the scaling service at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityUpdate {
    /// Name of the group this update targets.
    pub name: String,

    /// New desired capacity. Always set by the planner.
    pub desired: Option<u32>,

    /// New minimum size. Set only in zero-mode.
    pub min_size: Option<u32>,

    /// New maximum size. Set only when an override cap was supplied.
    pub max_size: Option<u32>,
}

impl CapacityUpdate {
    /// True when no value field is set.
    ///
    /// The applier skips such updates instead of sending an empty
    /// mutation to the scaling service.
    pub fn is_noop(&self) -> bool {
        self.desired.is_none() && self.min_size.is_none() && self.max_size.is_none()
    }
}

/// An ordered set of capacity updates, one per input group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    /// Updates in input group order.
    pub updates: Vec<CapacityUpdate>,
}

impl Plan {
    /// Sum of all set `desired` values, i.e. the total the plan achieves.
    pub fn total_desired(&self) -> u64 {
        self.updates
            .iter()
            .filter_map(|u| u.desired)
            .map(u64::from)
            .sum()
    }

    /// Number of updates in the plan.
    pub fn len(&self) -> usize {
        self.updates.len()
    }

    /// True when the plan contains no updates.
    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }
}
