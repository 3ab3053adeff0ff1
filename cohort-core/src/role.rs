//! Role domain model and the role registry
//!
//! Roles classify members ("Lead", "Developer", ...) and are the keys of a
//! template's per-group quota. Each role carries a symbolic color key into a
//! fixed palette so display layers can tint members consistently.
//!
//! # Examples
//!
//! ```rust
//! use cohort_core::role::*;
//!
//! let mut registry = RoleRegistry::new();
//! let lead = registry.add(Role::new("Lead", ColorKey::CosmicPink).unwrap()).unwrap();
//!
//! assert_eq!(registry.name_or_unknown(Some(lead)), "Lead");
//! assert_eq!(registry.find_by_name("lead").map(|r| r.id), Some(lead));
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Display label for a role id that no longer resolves
pub const UNKNOWN_ROLE: &str = "Unknown Role";

const MAX_ROLE_NAME_LEN: usize = 60;

/// Unique identifier of a role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleId(pub Uuid);

impl RoleId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RoleId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Symbolic reference into the fixed display palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColorKey {
    CosmicPink,
    HyperViolet,
    PlasmaGreen,
    CohortBlue,
    ElectricPurple,
    QuantumGreen,
}

impl ColorKey {
    /// Every palette entry, in palette order
    pub const ALL: [ColorKey; 6] = [
        ColorKey::CosmicPink,
        ColorKey::HyperViolet,
        ColorKey::PlasmaGreen,
        ColorKey::CohortBlue,
        ColorKey::ElectricPurple,
        ColorKey::QuantumGreen,
    ];

    /// Hex color for this palette entry
    pub fn hex(&self) -> &'static str {
        match self {
            ColorKey::CosmicPink => "#FF47C8",
            ColorKey::HyperViolet => "#B04CFF",
            ColorKey::PlasmaGreen => "#A8FF4F",
            ColorKey::CohortBlue => "#00E5FF",
            ColorKey::ElectricPurple => "#BF00FF",
            ColorKey::QuantumGreen => "#4FFFD8",
        }
    }
}

impl Default for ColorKey {
    /// Unresolvable roles are drawn in the primary accent
    fn default() -> Self {
        ColorKey::CohortBlue
    }
}

/// A named classification used to tag members and express quotas
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
    pub color: ColorKey,
}

impl Role {
    /// Create a new role with validation
    pub fn new<S: Into<String>>(name: S, color: ColorKey) -> Result<Self> {
        let name = name.into();
        Self::validate_name(&name)?;
        Ok(Self {
            id: RoleId::new(),
            name,
            color,
        })
    }

    fn validate_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(Error::validation("Role name cannot be empty"));
        }
        if name.len() > MAX_ROLE_NAME_LEN {
            return Err(Error::constraint_violation(
                "role_name_length",
                format!("Role name cannot exceed {} characters", MAX_ROLE_NAME_LEN),
            ));
        }
        Ok(())
    }
}

/// Ordered collection of role definitions
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RoleRegistry {
    roles: Vec<Role>,
}

impl RoleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry seeded with the stock roles
    pub fn with_defaults() -> Self {
        let stock = [
            ("Lead", ColorKey::CosmicPink),
            ("Co-Lead", ColorKey::HyperViolet),
            ("Developer", ColorKey::PlasmaGreen),
            ("Designer", ColorKey::CohortBlue),
            ("Architect", ColorKey::ElectricPurple),
            ("QA Analyst", ColorKey::QuantumGreen),
        ];
        let roles = stock
            .into_iter()
            .map(|(name, color)| Role {
                id: RoleId::new(),
                name: name.to_string(),
                color,
            })
            .collect();
        Self { roles }
    }

    /// Append a role and return its id; ids are unique within the registry
    pub fn add(&mut self, role: Role) -> Result<RoleId> {
        if self.contains(role.id) {
            return Err(Error::constraint_violation(
                "unique_id",
                format!("Role {} is already registered", role.id),
            ));
        }
        let id = role.id;
        self.roles.push(role);
        Ok(id)
    }

    /// Append a placeholder role for the user to rename
    pub fn add_default(&mut self) -> RoleId {
        let id = RoleId::new();
        self.roles.push(Role {
            id,
            name: "New Role".to_string(),
            color: ColorKey::ElectricPurple,
        });
        id
    }

    pub fn get(&self, id: RoleId) -> Option<&Role> {
        self.roles.iter().find(|r| r.id == id)
    }

    pub fn contains(&self, id: RoleId) -> bool {
        self.get(id).is_some()
    }

    /// Case-insensitive lookup by display name
    pub fn find_by_name(&self, name: &str) -> Option<&Role> {
        let wanted = name.trim().to_lowercase();
        self.roles.iter().find(|r| r.name.to_lowercase() == wanted)
    }

    pub fn rename<S: Into<String>>(&mut self, id: RoleId, name: S) -> Result<()> {
        let name = name.into();
        Role::validate_name(&name)?;
        let role = self.get_mut(id)?;
        role.name = name;
        Ok(())
    }

    pub fn set_color(&mut self, id: RoleId, color: ColorKey) -> Result<()> {
        self.get_mut(id)?.color = color;
        Ok(())
    }

    pub fn first(&self) -> Option<&Role> {
        self.roles.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Role> {
        self.roles.iter()
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Display name for a role reference, or [`UNKNOWN_ROLE`]
    pub fn name_or_unknown(&self, id: Option<RoleId>) -> &str {
        id.and_then(|id| self.get(id))
            .map(|r| r.name.as_str())
            .unwrap_or(UNKNOWN_ROLE)
    }

    /// Palette entry for a role reference, falling back to the default accent
    pub fn color_or_default(&self, id: Option<RoleId>) -> ColorKey {
        id.and_then(|id| self.get(id))
            .map(|r| r.color)
            .unwrap_or_default()
    }

    /// Only the workspace cascade may remove roles
    pub(crate) fn remove(&mut self, id: RoleId) -> Option<Role> {
        let pos = self.roles.iter().position(|r| r.id == id)?;
        Some(self.roles.remove(pos))
    }

    fn get_mut(&mut self, id: RoleId) -> Result<&mut Role> {
        self.roles
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| Error::not_found("Role", id.to_string()))
    }
}
