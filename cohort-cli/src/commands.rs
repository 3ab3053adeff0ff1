//! Subcommand implementations
//!
//! The host owns the mutable workspace and the user's group-count request;
//! the engine only ever sees an immutable snapshot of both.

use crate::config::Config;
use crate::{Error, Result};
use chrono::Local;
use cohort_allocator::export::{export_file_name, write_csv};
use cohort_allocator::{
    clamp_group_count, max_groups, run, validate, AllocationResult, Feasibility, GroupNamePool,
    RunOutcome, RunRequest,
};
use cohort_core::{Template, Workspace};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt::Write as _;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Options shared by `validate` and `allocate`
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub template: String,
    pub groups: Option<u32>,
    pub seed: Option<u64>,
    pub strict: bool,
}

/// Decide the group count handed to the engine.
///
/// No request means "as many as fit". In strict mode the request passes
/// through untouched so the validator can reject it; otherwise it is clamped
/// into `[1, max]` and the adjustment is logged.
pub fn resolve_group_count(requested: Option<u32>, max: u32, strict: bool) -> u32 {
    match requested {
        None => max,
        Some(count) if strict => count,
        Some(count) => {
            let clamped = clamp_group_count(count, max);
            if clamped != count {
                warn!(requested = count, max, clamped, "group count adjusted to capacity");
            }
            clamped
        }
    }
}

fn find_template<'a>(workspace: &'a Workspace, name: &str) -> Option<&'a Template> {
    let template = workspace.templates.find_by_name(name);
    if template.is_none() {
        warn!(template = name, "no template with this name");
    }
    template
}

/// Capacity summary for one template
pub fn capacity_report(workspace: &Workspace, template_name: &str) -> Result<String> {
    let template = find_template(workspace, template_name).ok_or_else(|| {
        Error::Core(cohort_core::Error::not_found("Template", template_name))
    })?;

    let mut report = String::new();
    writeln!(report, "Template: {}", template.name).ok();
    for entry in template.structure.iter() {
        writeln!(
            report,
            "  {}: {} per group ({} available)",
            workspace.roles.name_or_unknown(Some(entry.role_id)),
            entry.count,
            workspace.roster.count_with_role(entry.role_id)
        )
        .ok();
    }
    writeln!(report, "Members: {}", workspace.roster.len()).ok();
    writeln!(report, "Max groups: {}", max_groups(template, &workspace.roster)).ok();
    Ok(report)
}

/// Run only the feasibility gate
pub fn check(workspace: &Workspace, options: &RunOptions) -> Feasibility {
    let template = find_template(workspace, &options.template);
    let max = template
        .map(|t| max_groups(t, &workspace.roster))
        .unwrap_or(1);
    let group_count = resolve_group_count(options.groups, max, options.strict);
    validate(template, &workspace.roster, &workspace.roles, group_count)
}

/// Validate and allocate one run
pub async fn allocate(workspace: &Workspace, config: &Config, options: &RunOptions) -> RunOutcome {
    let template = find_template(workspace, &options.template);
    let max = template
        .map(|t| max_groups(t, &workspace.roster))
        .unwrap_or(1);
    let strict = options.strict || config.allocation.strict_group_count;
    let group_count = resolve_group_count(options.groups, max, strict);
    let names = GroupNamePool::from_names(config.allocation.team_names.iter().cloned());

    let mut rng = match options.seed.or(config.allocation.seed) {
        Some(seed) => {
            info!(seed, "using seeded generator");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    if config.allocation.processing_delay_ms > 0 {
        tokio::time::sleep(Duration::from_millis(config.allocation.processing_delay_ms)).await;
    }

    let request = RunRequest {
        template,
        roster: &workspace.roster,
        roles: &workspace.roles,
        group_count,
        names: &names,
    };
    run(&request, &mut rng)
}

/// Text summary of generated groups and leftovers
pub fn render_groups(result: &AllocationResult) -> String {
    let mut out = String::new();
    for group in &result.groups {
        writeln!(out, "{} ({} members)", group.name, group.len()).ok();
        for assigned in &group.members {
            writeln!(
                out,
                "  {} [{}] {}",
                assigned.member.name,
                assigned.role_name,
                assigned.role_hex()
            )
            .ok();
        }
    }
    if !result.leftovers.is_empty() {
        writeln!(out, "Unassigned: {}", result.leftovers.len()).ok();
    }
    out
}

/// Where a CSV export lands; a directory gets the dated default name
pub fn csv_destination(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.join(export_file_name(Local::now().date_naive()))
    } else {
        path.to_path_buf()
    }
}

/// Write the groups of a finished run as CSV
pub fn export_csv(result: &AllocationResult, path: &Path) -> Result<PathBuf> {
    let destination = csv_destination(path);
    let file = File::create(&destination)?;
    write_csv(&result.groups, BufWriter::new(file))?;
    info!(path = %destination.display(), rows = result.assigned_count(), "csv exported");
    Ok(destination)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cohort_allocator::RunState;
    use cohort_core::Member;

    fn demo_workspace() -> Workspace {
        let mut workspace = Workspace::with_defaults();
        let bulk = "Zoe Nova, Lead\nKaelen Hyper, Lead\nJett Vector, Developer\n\
                    Lyra Pulsar, Developer\nOnyx Star, Developer\nRiven Flux, Developer\n\
                    Cyrus Data, Developer\nAnya Byte, Developer\nJax Orbit, Designer\n\
                    Syd Chaos, Designer";
        let roles = workspace.roles.clone();
        workspace.roster.import_bulk(bulk, &roles);
        workspace
    }

    #[test]
    fn test_resolve_group_count() {
        assert_eq!(resolve_group_count(None, 3, false), 3);
        assert_eq!(resolve_group_count(Some(5), 3, false), 3);
        assert_eq!(resolve_group_count(Some(0), 3, false), 1);
        assert_eq!(resolve_group_count(Some(5), 3, true), 5);
        assert_eq!(resolve_group_count(Some(0), 3, true), 0);
    }

    #[test]
    fn test_capacity_report() {
        let workspace = demo_workspace();
        let report = capacity_report(&workspace, "standard squad protocol").unwrap();
        assert!(report.contains("Lead: 1 per group (2 available)"));
        assert!(report.contains("Max groups: 2"));

        let err = capacity_report(&workspace, "Nope").unwrap_err();
        assert!(matches!(err, Error::Core(ref e) if e.is_not_found()));
    }

    #[test]
    fn test_check_strict_and_clamped() {
        let workspace = demo_workspace();
        let mut options = RunOptions {
            template: "Standard Squad Protocol".to_string(),
            groups: Some(3),
            ..Default::default()
        };
        assert!(check(&workspace, &options).is_valid());

        options.strict = true;
        let feasibility = check(&workspace, &options);
        assert!(feasibility.message().unwrap().contains("Requires 3 Leads"));

        options.template = "Missing".to_string();
        assert_eq!(check(&workspace, &options).message().unwrap(), "No template selected.");
    }

    #[tokio::test]
    async fn test_seeded_allocation_is_reproducible() {
        let workspace = demo_workspace();
        let config = Config::default();
        let options = RunOptions {
            template: "Standard Squad Protocol".to_string(),
            groups: None,
            seed: Some(99),
            strict: false,
        };

        let first = allocate(&workspace, &config, &options).await;
        let second = allocate(&workspace, &config, &options).await;
        assert_eq!(first.state(), RunState::Done);
        assert_eq!(first, second);

        let result = first.result().unwrap();
        assert_eq!(result.groups.len(), 2);
        assert_eq!(result.leftovers.len(), 2);
        let summary = render_groups(result);
        assert!(summary.contains("(4 members)"));
        assert!(summary.contains("Unassigned: 2"));
    }

    #[tokio::test]
    async fn test_custom_team_names_and_delay() {
        let mut workspace = Workspace::with_defaults();
        let lead = workspace.roles.find_by_name("Lead").unwrap().id;
        workspace.roster.add(Member::new("Zoe Nova", Some(lead)).unwrap()).unwrap();

        let mut config = Config::default();
        config.allocation.team_names = vec!["Night Shift".to_string()];
        config.allocation.processing_delay_ms = 5;

        let mut template = Template::new("Solo").unwrap();
        template.set_count(lead, 1);
        workspace.templates.add(template);

        let options = RunOptions {
            template: "Solo".to_string(),
            groups: Some(1),
            seed: Some(1),
            strict: true,
        };
        let outcome = allocate(&workspace, &config, &options).await;
        let result = outcome.result().unwrap();
        assert!(result.groups[0].name.starts_with("Night Shift "));
    }

    #[test]
    fn test_export_csv_into_directory() {
        let dir = tempfile::tempdir().unwrap();
        let workspace = demo_workspace();
        let template = workspace.templates.find_by_name("Standard Squad Protocol").unwrap();
        let names = GroupNamePool::default();
        let request = RunRequest {
            template: Some(template),
            roster: &workspace.roster,
            roles: &workspace.roles,
            group_count: 2,
            names: &names,
        };
        let result = run(&request, &mut StdRng::seed_from_u64(4))
            .into_result()
            .unwrap();

        let written = export_csv(&result, dir.path()).unwrap();
        let file_name = written.file_name().unwrap().to_string_lossy().to_string();
        assert!(file_name.starts_with("Cohort_Export_"));
        assert!(file_name.ends_with(".csv"));

        let csv = std::fs::read_to_string(&written).unwrap();
        assert_eq!(csv.lines().count(), 9);
        assert!(csv.starts_with("Group Name,Member Name,Role,Template\n"));
    }
}
