//! The three base collections and the updates that must touch them together
//!
//! Deleting a role is a single `&mut self` operation so no member or
//! template can be observed referencing a role that is already gone.

use crate::member::Roster;
use crate::role::{Role, RoleId, RoleRegistry};
use crate::template::{Template, TemplateCatalog};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Role registry, roster and template catalog owned by the host
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Workspace {
    pub roles: RoleRegistry,
    pub roster: Roster,
    pub templates: TemplateCatalog,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stock roles plus the two stock templates, with an empty roster
    pub fn with_defaults() -> Self {
        let roles = RoleRegistry::with_defaults();
        let mut templates = TemplateCatalog::new();

        let lookup = |name: &str| roles.find_by_name(name).map(|r| r.id);
        if let (Some(lead), Some(dev), Some(designer)) =
            (lookup("Lead"), lookup("Developer"), lookup("Designer"))
        {
            let stock = [
                ("Standard Squad Protocol", vec![(lead, 1), (dev, 2), (designer, 1)]),
                ("Developer Core Team", vec![(lead, 1), (dev, 3)]),
            ];
            for (name, quotas) in stock {
                let mut template = Template {
                    id: Default::default(),
                    name: name.to_string(),
                    structure: Default::default(),
                };
                for (role_id, count) in quotas {
                    template.structure.set(role_id, count);
                }
                templates.add(template);
            }
        }

        Self {
            roles,
            roster: Roster::new(),
            templates,
        }
    }

    /// Remove a role and cascade the removal.
    ///
    /// Members holding the role move to the first remaining role, or become
    /// unassigned when none remain; every template drops its quota for it.
    pub fn remove_role(&mut self, id: RoleId) -> Result<Role> {
        let removed = self
            .roles
            .remove(id)
            .ok_or_else(|| Error::not_found("Role", id.to_string()))?;

        let fallback = self.roles.first().map(|r| r.id);
        let reassigned = self.roster.reassign_role(id, fallback);
        let templates_touched = self.templates.drop_role(id);

        if reassigned > 0 && fallback.is_none() {
            warn!(
                role = %removed.name,
                reassigned,
                "last role removed; members left without a role"
            );
        }
        info!(
            role = %removed.name,
            reassigned,
            templates_touched,
            "role removed"
        );
        Ok(removed)
    }
}
