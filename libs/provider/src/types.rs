//! Wire types for the scaling service API.

use std::collections::BTreeMap;

use fleetcap_planner::{CapacityUpdate, GroupInfo};
use serde::{Deserialize, Serialize};

/// A scaling group resource as returned by the API.
///
/// Sizes are `i64` on the wire; conversion to the planner's [`GroupInfo`]
/// clamps anything out of range into `u32`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScalingGroupResource {
    pub name: String,
    #[serde(default)]
    pub min_size: i64,
    #[serde(default)]
    pub max_size: i64,
    #[serde(default)]
    pub desired_capacity: i64,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl ScalingGroupResource {
    /// Convert to the planner's view of the group.
    pub fn to_group_info(&self) -> GroupInfo {
        GroupInfo {
            name: self.name.clone(),
            min_size: clamp_size(self.min_size),
            max_size: clamp_size(self.max_size),
            desired_capacity: clamp_size(self.desired_capacity),
        }
    }
}

fn clamp_size(value: i64) -> u32 {
    value.clamp(0, i64::from(u32::MAX)) as u32
}

/// One page of scaling groups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListScalingGroupsResponse {
    pub items: Vec<ScalingGroupResource>,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// PATCH body for a capacity update. Absent fields are left unchanged by
/// the service, so unset values must not be serialized at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateCapacityRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desired_capacity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_size: Option<i64>,
}

impl From<&CapacityUpdate> for UpdateCapacityRequest {
    fn from(update: &CapacityUpdate) -> Self {
        Self {
            desired_capacity: update.desired.map(i64::from),
            min_size: update.min_size.map(i64::from),
            max_size: update.max_size.map(i64::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_fields_are_omitted_from_the_wire() {
        let request = UpdateCapacityRequest {
            desired_capacity: Some(3),
            min_size: None,
            max_size: None,
        };

        let value = serde_json::to_value(&request).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert_eq!(object["desired_capacity"], 3);
        assert!(!object.contains_key("min_size"));
        assert!(!object.contains_key("max_size"));
    }

    #[test]
    fn name_only_update_maps_to_empty_request() {
        let update = CapacityUpdate {
            name: "web-a".to_string(),
            desired: None,
            min_size: None,
            max_size: None,
        };

        let request = UpdateCapacityRequest::from(&update);
        assert_eq!(serde_json::to_value(&request).unwrap(), serde_json::json!({}));
    }

    #[test]
    fn negative_wire_sizes_clamp_to_zero() {
        let resource = ScalingGroupResource {
            name: "web-a".to_string(),
            min_size: -1,
            max_size: -5,
            desired_capacity: 2,
            tags: BTreeMap::new(),
        };

        let info = resource.to_group_info();
        assert_eq!(info.min_size, 0);
        assert_eq!(info.max_size, 0);
        assert_eq!(info.desired_capacity, 2);
    }

    #[test]
    fn missing_size_fields_default_to_zero() {
        let resource: ScalingGroupResource =
            serde_json::from_value(serde_json::json!({ "name": "bare" })).unwrap();
        assert_eq!(resource.min_size, 0);
        assert_eq!(resource.max_size, 0);
        assert_eq!(resource.desired_capacity, 0);
        assert!(resource.tags.is_empty());
    }
}
