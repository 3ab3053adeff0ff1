//! Property-based tests for the capacity, validation and allocation invariants

use std::collections::HashSet;

use cohort_allocator::core::{Member, RoleId, RoleRegistry, Roster, Template};
use cohort_allocator::{
    allocate, max_groups, validate, AllocationRequest, GroupNamePool, TraceEvent,
};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Roles plus a roster with `counts[i]` members of role `i`
fn cohort(counts: &[usize]) -> (RoleRegistry, Vec<RoleId>, Roster) {
    let roles = RoleRegistry::with_defaults();
    let ids: Vec<RoleId> = roles.iter().map(|r| r.id).collect();
    let mut roster = Roster::new();
    for (role_id, count) in ids.iter().zip(counts) {
        for i in 0..*count {
            roster.add(Member::new(format!("{}-{}", role_id, i), Some(*role_id)).unwrap()).unwrap();
        }
    }
    (roles, ids, roster)
}

fn template(ids: &[RoleId], quotas: &[i64]) -> Template {
    ids.iter()
        .zip(quotas)
        .fold(Template::new("Generated").unwrap(), |t, (id, &q)| t.with_role(*id, q))
}

/// Member counts for each of the six stock roles
fn counts_strategy() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0usize..12, 6)
}

/// Per-group quotas, occasionally negative to exercise clamping
fn quotas_strategy() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(-1i64..4, 6)
}

proptest! {
    #[test]
    fn max_groups_matches_floor_division(counts in counts_strategy(), quotas in quotas_strategy()) {
        let (_, ids, roster) = cohort(&counts);
        let template = template(&ids, &quotas);
        let per_group: u64 = quotas.iter().map(|q| (*q).max(0) as u64).sum();

        let expected = if per_group == 0 {
            1
        } else {
            ((roster.len() as u64 / per_group) as u32).max(1)
        };
        prop_assert_eq!(max_groups(&template, &roster), expected);
    }

    #[test]
    fn validator_accepts_exactly_when_every_quota_is_covered(
        counts in counts_strategy(),
        quotas in quotas_strategy(),
        group_count in 0u32..5,
    ) {
        let (roles, ids, roster) = cohort(&counts);
        let template = template(&ids, &quotas);
        let feasibility = validate(Some(&template), &roster, &roles, group_count);

        let covered = quotas.iter().zip(&counts).all(|(q, available)| {
            let q = (*q).max(0) as u64;
            q == 0 || *available as u64 >= q * group_count as u64
        });
        let any_required = quotas.iter().any(|q| *q > 0);
        prop_assert_eq!(feasibility.is_valid(), group_count > 0 && covered && any_required);
    }

    #[test]
    fn allocation_conserves_members_and_respects_quotas(
        counts in counts_strategy(),
        quotas in quotas_strategy(),
        group_count in 1u32..6,
        seed in any::<u64>(),
    ) {
        let (roles, ids, roster) = cohort(&counts);
        let template = template(&ids, &quotas);
        let names = GroupNamePool::default();
        let request = AllocationRequest {
            template: &template,
            roster: &roster,
            roles: &roles,
            group_count,
            names: &names,
        };
        let result = allocate(&request, &mut StdRng::seed_from_u64(seed));

        prop_assert_eq!(result.groups.len(), group_count as usize);
        prop_assert_eq!(result.assigned_count() + result.leftovers.len(), roster.len());

        let mut seen = HashSet::new();
        for group in &result.groups {
            for assigned in &group.members {
                prop_assert!(seen.insert(assigned.member.id), "member placed twice");
            }
        }
        for leftover in &result.leftovers {
            prop_assert!(!seen.contains(&leftover.id));
        }

        // Under-filled slots and warnings account for each other exactly
        let mut missing_slots = 0usize;
        for group in &result.groups {
            for entry in template.structure.iter() {
                let placed = group.count_with_role(entry.role_id);
                prop_assert!(placed <= entry.count as usize);
                missing_slots += entry.count as usize - placed;
            }
        }
        prop_assert_eq!(missing_slots, result.trace.warnings().count());
    }

    #[test]
    fn validated_requests_never_warn(
        quotas in prop::collection::vec(0i64..4, 6),
        extra in counts_strategy(),
        group_count in 1u32..4,
        seed in any::<u64>(),
    ) {
        prop_assume!(quotas.iter().any(|q| *q > 0));
        let counts: Vec<usize> = quotas
            .iter()
            .zip(&extra)
            .map(|(q, e)| *q as usize * group_count as usize + e)
            .collect();
        let (roles, ids, roster) = cohort(&counts);
        let template = template(&ids, &quotas);
        prop_assert!(validate(Some(&template), &roster, &roles, group_count).is_valid());

        let names = GroupNamePool::default();
        let request = AllocationRequest {
            template: &template,
            roster: &roster,
            roles: &roles,
            group_count,
            names: &names,
        };
        let result = allocate(&request, &mut StdRng::seed_from_u64(seed));
        prop_assert!(!result.trace.events().iter().any(TraceEvent::is_warning));

        let per_group = template.structure.per_group_total() as usize;
        prop_assert!(result.groups.iter().all(|g| g.len() == per_group));
        let leftover_expected: usize = extra.iter().sum();
        prop_assert_eq!(result.leftovers.len(), leftover_expected);
    }
}
