//! Member domain model and the roster
//!
//! Members are added one at a time or through a bulk text import where each
//! line reads `name[, role name]`.

use crate::role::{RoleId, RoleRegistry};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;
use uuid::Uuid;

/// Unique identifier of a member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(pub Uuid);

impl MemberId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MemberId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A person on the roster
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    /// `None` once the last role has been deleted
    pub role_id: Option<RoleId>,
}

impl Member {
    /// Create a new member; the name is trimmed and must not be empty
    pub fn new<S: AsRef<str>>(name: S, role_id: Option<RoleId>) -> Result<Self> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(Error::validation("Member name cannot be empty"));
        }
        Ok(Self {
            id: MemberId::new(),
            name: name.to_string(),
            role_id,
        })
    }

    pub fn has_role(&self, role_id: RoleId) -> bool {
        self.role_id == Some(role_id)
    }
}

/// Ordered collection of members
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Roster {
    members: Vec<Member>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a member; a member id may appear on the roster only once
    pub fn add(&mut self, member: Member) -> Result<MemberId> {
        if self.get(member.id).is_some() {
            return Err(Error::constraint_violation(
                "unique_id",
                format!("Member {} is already on the roster", member.id),
            ));
        }
        let id = member.id;
        self.members.push(member);
        Ok(id)
    }

    pub fn remove(&mut self, id: MemberId) -> Option<Member> {
        let pos = self.members.iter().position(|m| m.id == id)?;
        Some(self.members.remove(pos))
    }

    pub fn clear(&mut self) {
        self.members.clear();
    }

    pub fn get(&self, id: MemberId) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Member> {
        self.members.iter()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members tagged with the given role, in roster order
    pub fn with_role(&self, role_id: RoleId) -> impl Iterator<Item = &Member> {
        self.members.iter().filter(move |m| m.has_role(role_id))
    }

    pub fn count_with_role(&self, role_id: RoleId) -> usize {
        self.with_role(role_id).count()
    }

    /// Import one member per non-blank line of `name[, role name]`.
    ///
    /// Role names match case-insensitively; unmatched or missing roles fall
    /// back to the first registered role. Returns the number of members added.
    pub fn import_bulk(&mut self, text: &str, roles: &RoleRegistry) -> usize {
        let fallback = roles.first().map(|r| r.id);
        let mut imported = 0;

        for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let mut parts = line.split(',').map(str::trim);
            let name = match parts.next() {
                Some(name) if !name.is_empty() => name,
                _ => line,
            };
            let role_id = parts
                .next()
                .filter(|r| !r.is_empty())
                .and_then(|r| roles.find_by_name(r))
                .map(|r| r.id)
                .or(fallback);

            self.members.push(Member {
                id: MemberId::new(),
                name: name.to_string(),
                role_id,
            });
            imported += 1;
        }

        debug!(imported, total = self.members.len(), "bulk roster import");
        imported
    }

    /// Rewrite every reference to `from` so it points at `to`
    pub(crate) fn reassign_role(&mut self, from: RoleId, to: Option<RoleId>) -> usize {
        let mut changed = 0;
        for member in self.members.iter_mut().filter(|m| m.has_role(from)) {
            member.role_id = to;
            changed += 1;
        }
        changed
    }
}
