//! Upper bound on how many groups a roster can fill for a template

use cohort_core::{Roster, Template};

/// Maximum number of groups the roster can supply for `template`.
///
/// Always at least 1. A template that requires nobody is treated as able to
/// form exactly one (empty) group.
pub fn max_groups(template: &Template, roster: &Roster) -> u32 {
    let per_group_total = template.structure.per_group_total();
    if per_group_total == 0 {
        return 1;
    }
    let groups = roster.len() as u64 / per_group_total;
    u32::try_from(groups).unwrap_or(u32::MAX).max(1)
}

/// Clamp a requested group count into `[1, max]`
pub fn clamp_group_count(requested: u32, max: u32) -> u32 {
    requested.clamp(1, max.max(1))
}
