//! JSON workspace files
//!
//! A workspace file describes roles, members and templates by name so it
//! can be written by hand:
//!
//! ```json
//! {
//!   "roles": [{ "name": "Lead", "color": "cosmicPink" }],
//!   "members": [{ "name": "Zoe Nova", "role": "Lead" }],
//!   "bulk": "Jett Vector, Lead\nLyra Pulsar",
//!   "templates": [{ "name": "Solo", "structure": [{ "role": "Lead", "count": 1 }] }]
//! }
//! ```
//!
//! Omitting `roles` seeds the stock roles; omitting `templates` seeds the
//! stock templates.

use crate::{Error, Result};
use anyhow::Context;
use cohort_core::{ColorKey, Member, Role, Template, Workspace};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, Deserialize)]
pub struct WorkspaceFile {
    #[serde(default)]
    pub roles: Option<Vec<RoleSpec>>,
    #[serde(default)]
    pub members: Vec<MemberSpec>,
    /// Free-form `name[, role]` lines, imported after `members`
    #[serde(default)]
    pub bulk: Option<String>,
    #[serde(default)]
    pub templates: Option<Vec<TemplateSpec>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoleSpec {
    pub name: String,
    #[serde(default)]
    pub color: Option<ColorKey>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MemberSpec {
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TemplateSpec {
    pub name: String,
    #[serde(default)]
    pub structure: Vec<QuotaSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuotaSpec {
    pub role: String,
    pub count: i64,
}

impl WorkspaceFile {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build the in-memory workspace, resolving role names
    pub fn into_workspace(self) -> Result<Workspace> {
        let mut workspace = match &self.templates {
            Some(_) => Workspace::new(),
            None => Workspace::with_defaults(),
        };

        if let Some(roles) = self.roles {
            if self.templates.is_none() {
                return Err(Error::Configuration(
                    "custom roles require explicit templates".to_string(),
                ));
            }
            for (i, spec) in roles.into_iter().enumerate() {
                let color = spec
                    .color
                    .unwrap_or(ColorKey::ALL[i % ColorKey::ALL.len()]);
                workspace.roles.add(Role::new(spec.name, color)?)?;
            }
        } else if self.templates.is_some() {
            workspace.roles = cohort_core::RoleRegistry::with_defaults();
        }

        for spec in self.members {
            let role_id = match spec.role.as_deref() {
                Some(name) => Some(resolve_role(&workspace, name)?),
                None => workspace.roles.first().map(|r| r.id),
            };
            workspace.roster.add(Member::new(&spec.name, role_id)?)?;
        }

        if let Some(bulk) = self.bulk.as_deref() {
            let imported = workspace.roster.import_bulk(bulk, &workspace.roles);
            debug!(imported, "bulk members imported");
        }

        for spec in self.templates.unwrap_or_default() {
            let mut template = Template::new(spec.name)?;
            for quota in spec.structure {
                let role_id = resolve_role(&workspace, &quota.role)?;
                template.set_count(role_id, quota.count);
            }
            workspace.templates.add(template);
        }

        info!(
            roles = workspace.roles.len(),
            members = workspace.roster.len(),
            templates = workspace.templates.len(),
            "workspace loaded"
        );
        Ok(workspace)
    }
}

fn resolve_role(workspace: &Workspace, name: &str) -> Result<cohort_core::RoleId> {
    workspace
        .roles
        .find_by_name(name)
        .map(|r| r.id)
        .ok_or_else(|| cohort_core::Error::not_found("Role", name).into())
}

/// Read and build a workspace from a JSON file
pub fn load_workspace(path: &Path) -> Result<Workspace> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read workspace file {}", path.display()))?;
    WorkspaceFile::from_json(&json)?.into_workspace()
}
