//! Composition templates and the template catalog
//!
//! A template describes one group's target composition as an ordered list of
//! `(role, required count)` entries. Counts are clamped to non-negative
//! integers on every write; zero or absent entries mean "not required".
//!
//! # Examples
//!
//! ```rust
//! use cohort_core::role::RoleRegistry;
//! use cohort_core::template::Template;
//!
//! let roles = RoleRegistry::with_defaults();
//! let lead = roles.find_by_name("Lead").unwrap().id;
//! let dev = roles.find_by_name("Developer").unwrap().id;
//!
//! let squad = Template::new("Squad").unwrap().with_role(lead, 1).with_role(dev, 2);
//! assert_eq!(squad.structure.per_group_total(), 3);
//! ```

use crate::role::RoleId;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier of a template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(pub Uuid);

impl TemplateId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TemplateId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One quota line of a template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaEntry {
    pub role_id: RoleId,
    pub count: u32,
}

/// Insertion-ordered mapping from role to required members per group
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateStructure {
    entries: Vec<QuotaEntry>,
}

impl TemplateStructure {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-group count for a role. Negative input clamps to zero;
    /// an existing entry keeps its position.
    pub fn set(&mut self, role_id: RoleId, count: i64) {
        let count = u32::try_from(count.max(0)).unwrap_or(u32::MAX);
        match self.entries.iter_mut().find(|e| e.role_id == role_id) {
            Some(entry) => entry.count = count,
            None => self.entries.push(QuotaEntry { role_id, count }),
        }
    }

    /// Required count for a role; absent roles require nobody
    pub fn get(&self, role_id: RoleId) -> u32 {
        self.entries
            .iter()
            .find(|e| e.role_id == role_id)
            .map(|e| e.count)
            .unwrap_or(0)
    }

    pub fn remove_role(&mut self, role_id: RoleId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.role_id != role_id);
        self.entries.len() != before
    }

    /// Members needed to fill one group
    pub fn per_group_total(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.count)).sum()
    }

    /// Entries in the order they were first written
    pub fn iter(&self) -> impl Iterator<Item = &QuotaEntry> {
        self.entries.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A reusable per-group composition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Template {
    pub id: TemplateId,
    pub name: String,
    pub structure: TemplateStructure,
}

impl Template {
    /// Create a template with an empty structure
    pub fn new<S: Into<String>>(name: S) -> Result<Self> {
        let name = name.into();
        Self::validate_name(&name)?;
        Ok(Self {
            id: TemplateId::new(),
            name,
            structure: TemplateStructure::new(),
        })
    }

    /// Builder-style quota setter
    pub fn with_role(mut self, role_id: RoleId, count: i64) -> Self {
        self.set_count(role_id, count);
        self
    }

    pub fn set_count(&mut self, role_id: RoleId, count: i64) {
        self.structure.set(role_id, count);
    }

    fn validate_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(Error::validation("Template name cannot be empty"));
        }
        Ok(())
    }
}

/// Ordered collection of templates
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TemplateCatalog {
    templates: Vec<Template>,
}

impl TemplateCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, template: Template) -> TemplateId {
        let id = template.id;
        self.templates.push(template);
        id
    }

    /// Append an empty template for the user to fill in
    pub fn add_blank(&mut self) -> TemplateId {
        self.add(Template {
            id: TemplateId::new(),
            name: "New Custom Matrix".to_string(),
            structure: TemplateStructure::new(),
        })
    }

    pub fn get(&self, id: TemplateId) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    pub fn get_mut(&mut self, id: TemplateId) -> Option<&mut Template> {
        self.templates.iter_mut().find(|t| t.id == id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Template> {
        let wanted = name.trim().to_lowercase();
        self.templates.iter().find(|t| t.name.to_lowercase() == wanted)
    }

    pub fn rename<S: Into<String>>(&mut self, id: TemplateId, name: S) -> Result<()> {
        let name = name.into();
        Template::validate_name(&name)?;
        let template = self
            .get_mut(id)
            .ok_or_else(|| Error::not_found("Template", id.to_string()))?;
        template.name = name;
        Ok(())
    }

    pub fn set_count(&mut self, id: TemplateId, role_id: RoleId, count: i64) -> Result<()> {
        self.get_mut(id)
            .ok_or_else(|| Error::not_found("Template", id.to_string()))?
            .set_count(role_id, count);
        Ok(())
    }

    pub fn remove(&mut self, id: TemplateId) -> Option<Template> {
        let pos = self.templates.iter().position(|t| t.id == id)?;
        Some(self.templates.remove(pos))
    }

    pub fn first(&self) -> Option<&Template> {
        self.templates.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Template> {
        self.templates.iter()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Drop a role's quota line from every template
    pub(crate) fn drop_role(&mut self, role_id: RoleId) -> usize {
        self.templates
            .iter_mut()
            .map(|t| t.structure.remove_role(role_id))
            .filter(|removed| *removed)
            .count()
    }
}
