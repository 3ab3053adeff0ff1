//! Shared fixtures for allocator integration tests

#![allow(dead_code)]

use cohort_allocator::core::{Member, RoleId, Template, Workspace};

/// The stock demo roster: 2 Leads, 6 Developers, 2 Designers
pub struct DemoCohort {
    pub workspace: Workspace,
    pub lead: RoleId,
    pub developer: RoleId,
    pub designer: RoleId,
}

impl DemoCohort {
    pub fn new() -> Self {
        let mut workspace = Workspace::with_defaults();
        let role = |name: &str| workspace.roles.find_by_name(name).map(|r| r.id).unwrap();
        let (lead, developer, designer) = (role("Lead"), role("Developer"), role("Designer"));

        let people = [
            ("Zoe Nova", lead),
            ("Kaelen Hyper", lead),
            ("Jett Vector", developer),
            ("Lyra Pulsar", developer),
            ("Onyx Star", developer),
            ("Riven Flux", developer),
            ("Cyrus Data", developer),
            ("Anya Byte", developer),
            ("Jax Orbit", designer),
            ("Syd Chaos", designer),
        ];
        for (name, role_id) in people {
            workspace.roster.add(Member::new(name, Some(role_id)).unwrap()).unwrap();
        }

        Self {
            workspace,
            lead,
            developer,
            designer,
        }
    }

    /// Lead 1, Developer 2, Designer 1
    pub fn squad(&self) -> &Template {
        self.workspace
            .templates
            .find_by_name("Standard Squad Protocol")
            .unwrap()
    }
}
