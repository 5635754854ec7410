//! Scaling group discovery.
//!
//! Lists every scaling group in a region, walking cursor pagination to the
//! end, and keeps the groups matching the caller's filter. Match order is
//! the service's listing order.

use fleetcap_planner::GroupInfo;
use tracing::{debug, info};

use crate::client::ApiClient;
use crate::error::ProviderError;
use crate::types::{ListScalingGroupsResponse, ScalingGroupResource};

const PAGE_LIMIT: usize = 100;

/// An exact-match tag requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagFilter {
    pub key: String,
    pub value: String,
}

/// Filter applied to discovered groups. An empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupFilter {
    pub tag: Option<TagFilter>,
    pub name_contains: Option<String>,
}

impl GroupFilter {
    /// Filter by an exact tag key/value pair.
    pub fn by_tag(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            tag: Some(TagFilter {
                key: key.into(),
                value: value.into(),
            }),
            name_contains: None,
        }
    }

    /// Additionally require the group name to contain a fragment.
    pub fn with_name_contains(mut self, fragment: impl Into<String>) -> Self {
        self.name_contains = Some(fragment.into());
        self
    }

    fn matches(&self, group: &ScalingGroupResource) -> bool {
        if let Some(tag) = &self.tag {
            if group.tags.get(&tag.key) != Some(&tag.value) {
                return false;
            }
        }
        if let Some(fragment) = &self.name_contains {
            if !group.name.contains(fragment.as_str()) {
                return false;
            }
        }
        true
    }
}

/// Directory of scaling groups in one region.
#[derive(Debug, Clone)]
pub struct GroupDirectory {
    client: ApiClient,
    region: String,
}

impl GroupDirectory {
    pub fn new(client: ApiClient, region: impl Into<String>) -> Self {
        Self {
            client,
            region: region.into(),
        }
    }

    /// List every group in the region and return the ones matching `filter`,
    /// in listing order.
    pub async fn list_groups(&self, filter: &GroupFilter) -> Result<Vec<GroupInfo>, ProviderError> {
        debug!(region = %self.region, "scaling group discovery started");

        let mut matched = Vec::new();
        let mut scanned = 0usize;
        let mut cursor: Option<String> = None;

        loop {
            let mut path = format!(
                "/v1/regions/{}/scaling-groups?limit={}",
                self.region, PAGE_LIMIT
            );
            if let Some(cursor) = cursor.as_deref() {
                path.push_str("&cursor=");
                path.push_str(cursor);
            }

            let page: ListScalingGroupsResponse = self.client.get(&path).await?;
            debug!(items = page.items.len(), "scaling group page fetched");

            for group in &page.items {
                scanned += 1;
                if filter.matches(group) {
                    debug!(group = %group.name, "scaling group matched filter");
                    matched.push(group.to_group_info());
                }
            }

            match page.next_cursor {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        info!(
            region = %self.region,
            scanned,
            matched = matched.len(),
            "scaling group discovery complete"
        );

        Ok(matched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::BTreeMap;

    fn group(name: &str, tags: &[(&str, &str)]) -> ScalingGroupResource {
        ScalingGroupResource {
            name: name.to_string(),
            min_size: 0,
            max_size: 10,
            desired_capacity: 0,
            tags: tags
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = GroupFilter::default();
        assert!(filter.matches(&group("anything", &[])));
    }

    #[test]
    fn tag_match_is_exact_on_key_and_value() {
        let filter = GroupFilter::by_tag("eks:cluster-name", "prod");
        assert!(filter.matches(&group("a", &[("eks:cluster-name", "prod")])));
        assert!(!filter.matches(&group("b", &[("eks:cluster-name", "prod-eu")])));
        assert!(!filter.matches(&group("c", &[("cluster", "prod")])));
        assert!(!filter.matches(&group("d", &[])));
    }

    #[test]
    fn name_fragment_is_substring_containment() {
        let filter = GroupFilter::by_tag("team", "web").with_name_contains("spot");
        assert!(filter.matches(&group("web-spot-a", &[("team", "web")])));
        assert!(!filter.matches(&group("web-ondemand-a", &[("team", "web")])));
    }
}
