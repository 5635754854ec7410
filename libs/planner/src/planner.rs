//! The allocation algorithms.

use crate::model::{CapacityUpdate, GroupInfo, Plan};

/// Plan a scale-to-zero: every group gets `desired = min = max = 0`.
///
/// Kept separate from [`plan_equal_split`] because zeroing also forces
/// `min_size` and `max_size` down, while a general split never touches
/// `min_size` and only touches `max_size` when an override cap is
/// supplied.
pub fn plan_zero(groups: &[GroupInfo]) -> Plan {
    let updates = groups
        .iter()
        .map(|g| CapacityUpdate {
            name: g.name.clone(),
            desired: Some(0),
            min_size: Some(0),
            max_size: Some(0),
        })
        .collect();
    Plan { updates }
}

/// Distribute `total_desired` instances evenly across `groups`.
///
/// Each group's share is capped by `per_group_cap` when given (it
/// supersedes the group's own `max_size`; negative values are treated
/// as zero), otherwise by the group's `max_size`. The remainder of the
/// integer division goes to the earliest groups in input order. Shares
/// truncated by a cap are redistributed in a single forward top-up
/// pass over the remaining headroom; if total capacity is below the
/// request, the plan simply achieves less than asked.
pub fn plan_equal_split(
    groups: &[GroupInfo],
    total_desired: u32,
    per_group_cap: Option<i64>,
) -> Plan {
    if groups.is_empty() {
        return Plan::default();
    }

    // Caps are snapshotted up front; the top-up pass below must not
    // recompute them.
    let cap_override = per_group_cap.map(clamp_cap);
    let caps: Vec<u32> = groups
        .iter()
        .map(|g| effective_cap(g, per_group_cap))
        .collect();

    let n = groups.len() as u32;
    let base = total_desired / n;
    let remainder = total_desired % n;

    let mut assigned: Vec<u32> = caps
        .iter()
        .enumerate()
        .map(|(idx, &cap)| {
            let want = if (idx as u32) < remainder { base + 1 } else { base };
            want.min(cap)
        })
        .collect();

    let assigned_total: u64 = assigned.iter().map(|&a| u64::from(a)).sum();
    let mut remaining = u64::from(total_desired).saturating_sub(assigned_total);

    if remaining > 0 {
        // One forward pass is enough: `remaining` only decreases and
        // each group's headroom is fixed once its slot is reached.
        for (idx, &cap) in caps.iter().enumerate() {
            if remaining == 0 {
                break;
            }
            let headroom = cap.saturating_sub(assigned[idx]);
            if headroom == 0 {
                continue;
            }
            let add = u64::from(headroom).min(remaining) as u32;
            assigned[idx] += add;
            remaining -= u64::from(add);
        }
    }

    let updates = groups
        .iter()
        .zip(&assigned)
        .map(|(g, &desired)| CapacityUpdate {
            name: g.name.clone(),
            desired: Some(desired),
            min_size: None,
            max_size: cap_override,
        })
        .collect();
    Plan { updates }
}

/// The cap [`plan_equal_split`] enforces for `group`: the override
/// clamped into `u32` range when supplied, otherwise the group's own
/// `max_size`.
pub fn effective_cap(group: &GroupInfo, per_group_cap: Option<i64>) -> u32 {
    per_group_cap.map(clamp_cap).unwrap_or(group.max_size)
}

fn clamp_cap(cap: i64) -> u32 {
    cap.clamp(0, i64::from(u32::MAX)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn make_groups(n: usize, max_size: u32) -> Vec<GroupInfo> {
        (0..n)
            .map(|i| GroupInfo {
                name: format!("group-{i}"),
                min_size: 0,
                max_size,
                desired_capacity: 0,
            })
            .collect()
    }

    fn desireds(plan: &Plan) -> Vec<u32> {
        plan.updates.iter().map(|u| u.desired.unwrap()).collect()
    }

    #[test]
    fn zero_mode_forces_all_fields_to_zero() {
        let groups = make_groups(3, 5);
        let plan = plan_zero(&groups);

        assert_eq!(plan.len(), 3);
        for update in &plan.updates {
            assert_eq!(update.desired, Some(0));
            assert_eq!(update.min_size, Some(0));
            assert_eq!(update.max_size, Some(0));
        }
        assert_eq!(plan.total_desired(), 0);
    }

    #[test]
    fn zero_mode_preserves_group_order() {
        let groups = make_groups(4, 10);
        let plan = plan_zero(&groups);

        let names: Vec<&str> = plan.updates.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["group-0", "group-1", "group-2", "group-3"]);
    }

    #[test]
    fn empty_groups_yield_empty_plan() {
        let plan = plan_equal_split(&[], 10, None);
        assert!(plan.is_empty());
        assert_eq!(plan.total_desired(), 0);
    }

    #[test]
    fn total_zero_through_equal_split_assigns_zero_everywhere() {
        let groups = make_groups(3, 10);
        let plan = plan_equal_split(&groups, 0, None);
        assert_eq!(desireds(&plan), [0, 0, 0]);
    }

    #[test]
    fn remainder_goes_to_earliest_groups() {
        let groups = make_groups(3, 10);
        let plan = plan_equal_split(&groups, 8, None);

        // base = 2, remainder = 2: the first two groups get the extra unit.
        assert_eq!(desireds(&plan), [3, 3, 2]);
        assert_eq!(plan.total_desired(), 8);
    }

    #[test]
    fn override_cap_limits_every_group_and_is_echoed() {
        let groups = make_groups(2, 10);
        let plan = plan_equal_split(&groups, 10, Some(4));

        assert_eq!(desireds(&plan), [4, 4]);
        for update in &plan.updates {
            assert_eq!(update.max_size, Some(4));
            assert_eq!(update.min_size, None);
        }
        // Requested 10, achievable 8.
        assert_eq!(plan.total_desired(), 8);
    }

    #[test]
    fn group_max_respected_with_topup() {
        let groups = vec![
            GroupInfo {
                name: "a".to_string(),
                min_size: 0,
                max_size: 2,
                desired_capacity: 0,
            },
            GroupInfo {
                name: "b".to_string(),
                min_size: 0,
                max_size: 10,
                desired_capacity: 0,
            },
        ];
        let plan = plan_equal_split(&groups, 5, None);

        // base = 2, remainder = 1: want = [3, 2]; a truncates to 2 and
        // the stranded unit tops up b.
        assert_eq!(desireds(&plan), [2, 3]);
        // Group-default caps are never echoed back as explicit updates.
        assert!(plan.updates.iter().all(|u| u.max_size.is_none()));
    }

    #[test]
    fn topup_fills_earliest_headroom_first() {
        let mut groups = make_groups(3, 10);
        groups[0].max_size = 1;
        let plan = plan_equal_split(&groups, 9, None);

        // want = [3, 3, 3]; group-0 truncates to 1, and its two
        // stranded units land on group-1 (the first with headroom).
        assert_eq!(desireds(&plan), [1, 5, 3]);
    }

    #[test]
    fn zero_capacity_groups_absorb_nothing() {
        let groups = make_groups(3, 0);
        let plan = plan_equal_split(&groups, 6, None);

        assert_eq!(plan.len(), 3);
        assert_eq!(desireds(&plan), [0, 0, 0]);
        assert_eq!(plan.total_desired(), 0);
    }

    #[test]
    fn override_cap_unlocks_zero_capacity_groups() {
        let groups = make_groups(2, 0);
        let plan = plan_equal_split(&groups, 4, Some(3));

        assert_eq!(desireds(&plan), [2, 2]);
        for update in &plan.updates {
            assert_eq!(update.max_size, Some(3));
        }
        assert_eq!(plan.total_desired(), 4);
    }

    #[test]
    fn negative_override_cap_is_clamped_to_zero() {
        let groups = make_groups(2, 10);
        let plan = plan_equal_split(&groups, 6, Some(-5));

        assert_eq!(desireds(&plan), [0, 0]);
        for update in &plan.updates {
            assert_eq!(update.max_size, Some(0));
        }
    }

    #[test]
    fn effective_cap_prefers_the_clamped_override() {
        let group = GroupInfo {
            name: "a".to_string(),
            min_size: 0,
            max_size: 7,
            desired_capacity: 0,
        };

        assert_eq!(effective_cap(&group, None), 7);
        assert_eq!(effective_cap(&group, Some(3)), 3);
        assert_eq!(effective_cap(&group, Some(-2)), 0);
        assert_eq!(effective_cap(&group, Some(i64::MAX)), u32::MAX);
    }

    #[test]
    fn equal_split_never_touches_min_size() {
        let groups = make_groups(3, 10);
        let plan = plan_equal_split(&groups, 7, Some(5));
        assert!(plan.updates.iter().all(|u| u.min_size.is_none()));
    }

    #[test]
    fn identical_inputs_produce_identical_plans() {
        let groups = make_groups(5, 7);
        let first = plan_equal_split(&groups, 23, Some(6));
        let second = plan_equal_split(&groups, 23, Some(6));
        assert_eq!(first, second);
    }

    #[rstest]
    #[case(4, 10, vec![3, 3, 2, 2])]
    #[case(5, 5, vec![1, 1, 1, 1, 1])]
    #[case(3, 7, vec![3, 2, 2])]
    #[case(2, 9, vec![5, 4])]
    #[case(1, 6, vec![6])]
    #[case(4, 3, vec![1, 1, 1, 0])]
    fn fair_share_grid(#[case] n: usize, #[case] total: u32, #[case] expected: Vec<u32>) {
        let groups = make_groups(n, 100);
        let plan = plan_equal_split(&groups, total, None);
        assert_eq!(desireds(&plan), expected);
    }

    fn arb_groups() -> impl Strategy<Value = Vec<GroupInfo>> {
        prop::collection::vec((0u32..50, 0u32..50), 0..12).prop_map(|sizes| {
            sizes
                .into_iter()
                .enumerate()
                .map(|(i, (max_size, desired_capacity))| GroupInfo {
                    name: format!("group-{i}"),
                    min_size: 0,
                    max_size,
                    desired_capacity,
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn plan_covers_every_group_in_order(
            groups in arb_groups(),
            total in 0u32..400,
            cap in prop::option::of(-20i64..60),
        ) {
            let plan = plan_equal_split(&groups, total, cap);

            prop_assert_eq!(plan.len(), groups.len());
            for (group, update) in groups.iter().zip(&plan.updates) {
                prop_assert_eq!(&group.name, &update.name);
            }
        }

        #[test]
        fn plan_achieves_exactly_the_capacity_limited_total(
            groups in arb_groups(),
            total in 0u32..400,
            cap in prop::option::of(-20i64..60),
        ) {
            let plan = plan_equal_split(&groups, total, cap);

            let capacity: u64 = groups
                .iter()
                .map(|g| u64::from(effective_cap(g, cap)))
                .sum();
            prop_assert_eq!(plan.total_desired(), u64::from(total).min(capacity));
        }

        #[test]
        fn no_group_exceeds_its_effective_cap(
            groups in arb_groups(),
            total in 0u32..400,
            cap in prop::option::of(-20i64..60),
        ) {
            let plan = plan_equal_split(&groups, total, cap);

            for (group, update) in groups.iter().zip(&plan.updates) {
                prop_assert!(update.desired.unwrap() <= effective_cap(group, cap));
            }
        }

        #[test]
        fn planning_is_idempotent(
            groups in arb_groups(),
            total in 0u32..400,
            cap in prop::option::of(-20i64..60),
        ) {
            let first = plan_equal_split(&groups, total, cap);
            let second = plan_equal_split(&groups, total, cap);
            prop_assert_eq!(first, second);
        }
    }
}
