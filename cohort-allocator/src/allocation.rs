//! Randomized quota fill
//!
//! Members are split into one shuffled pool per role. Groups are then built
//! one at a time, and each template entry pops its count of members from
//! the matching pool. An exhausted pool leaves the slot empty and records a
//! warning; nothing is retried or borrowed from other groups.

use crate::names::{display_name, GroupNamePool};
use crate::trace::{TraceEvent, TraceLog};
use cohort_core::{ColorKey, Member, MemberId, RoleId, RoleRegistry, Roster, Template};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// A member placed into a group, with its role resolved for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignedMember {
    pub member: Member,
    pub role_name: String,
    pub role_color: ColorKey,
}

impl AssignedMember {
    pub fn role_hex(&self) -> &'static str {
        self.role_color.hex()
    }
}

/// One generated group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    pub members: Vec<AssignedMember>,
    pub template_name: String,
}

impl Group {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members of this group holding `role_id`
    pub fn count_with_role(&self, role_id: RoleId) -> usize {
        self.members
            .iter()
            .filter(|m| m.member.has_role(role_id))
            .count()
    }
}

/// Everything one run produces
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationResult {
    pub groups: Vec<Group>,
    pub trace: TraceLog,
    pub leftovers: Vec<Member>,
}

impl AllocationResult {
    pub fn assigned_count(&self) -> usize {
        self.groups.iter().map(Group::len).sum()
    }
}

/// Inputs of one allocation; a read-only snapshot of the host's state
#[derive(Debug, Clone, Copy)]
pub struct AllocationRequest<'a> {
    pub template: &'a Template,
    pub roster: &'a Roster,
    pub roles: &'a RoleRegistry,
    pub group_count: u32,
    pub names: &'a GroupNamePool,
}

/// Build `group_count` groups from the request.
///
/// Expects a request that already passed [`crate::validation::validate`];
/// an infeasible request under-fills groups and logs warnings instead of
/// failing.
pub fn allocate<R: Rng>(request: &AllocationRequest<'_>, rng: &mut R) -> AllocationResult {
    let AllocationRequest {
        template,
        roster,
        roles,
        group_count,
        names,
    } = *request;
    let mut trace = TraceLog::new();

    let mut pools: HashMap<RoleId, Vec<&Member>> = HashMap::with_capacity(roles.len());
    for role in roles.iter() {
        let mut pool: Vec<&Member> = roster.with_role(role.id).collect();
        pool.shuffle(rng);
        debug!(role = %role.name, size = pool.len(), "pool initialized");
        trace.push(TraceEvent::PoolInitialized {
            role: role.name.clone(),
            size: pool.len(),
        });
        pools.insert(role.id, pool);
    }

    // Group names and ids come from a stream forked off `rng`.
    let mut name_rng = StdRng::seed_from_u64(rng.gen());
    let shuffled_names = names.shuffled(&mut name_rng);

    let mut used: HashSet<MemberId> = HashSet::with_capacity(roster.len());
    let mut groups = Vec::with_capacity(group_count as usize);

    for index in 0..group_count as usize {
        let name = display_name(&shuffled_names, index, &mut name_rng);
        trace.push(TraceEvent::GroupHeader {
            index: index + 1,
            name: name.clone(),
        });

        let mut members = Vec::new();
        for entry in template.structure.iter() {
            let role_name = roles.name_or_unknown(Some(entry.role_id)).to_string();
            let role_color = roles.color_or_default(Some(entry.role_id));

            for slot in 0..entry.count {
                match pools.get_mut(&entry.role_id).and_then(Vec::pop) {
                    Some(member) => {
                        used.insert(member.id);
                        trace.push(TraceEvent::Assigned {
                            member: member.name.clone(),
                            role: role_name.clone(),
                        });
                        members.push(AssignedMember {
                            member: member.clone(),
                            role_name: role_name.clone(),
                            role_color,
                        });
                    }
                    None => {
                        warn!(
                            group = %name,
                            role = %role_name,
                            slot = slot + 1,
                            required = entry.count,
                            "role pool exhausted"
                        );
                        trace.push(TraceEvent::Warning {
                            role: role_name.clone(),
                            slot: slot + 1,
                            required: entry.count,
                        });
                    }
                }
            }
        }

        debug!(group = %name, size = members.len(), "group built");
        groups.push(Group {
            id: uuid::Builder::from_random_bytes(name_rng.gen()).into_uuid(),
            name,
            members,
            template_name: template.name.clone(),
        });
    }

    let leftovers: Vec<Member> = roster
        .iter()
        .filter(|m| !used.contains(&m.id))
        .cloned()
        .collect();

    if leftovers.is_empty() {
        trace.push(TraceEvent::AllAssigned);
    } else {
        trace.push(TraceEvent::LeftoverSummary {
            count: leftovers.len(),
        });
        for member in &leftovers {
            trace.push(TraceEvent::Unassigned {
                member: member.name.clone(),
                role: roles.name_or_unknown(member.role_id).to_string(),
            });
        }
    }

    info!(
        template = %template.name,
        groups = groups.len(),
        assigned = used.len(),
        leftovers = leftovers.len(),
        warnings = trace.warnings().count(),
        "allocation complete"
    );

    AllocationResult {
        groups,
        trace,
        leftovers,
    }
}
