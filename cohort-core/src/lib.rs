//! Core domain models for the Team Cohort group builder
//!
//! This crate contains the role registry, the member roster and the
//! template catalog, plus the [`workspace::Workspace`] aggregate that keeps
//! them consistent when a role is deleted.

pub mod error;
pub mod member;
pub mod role;
pub mod template;
pub mod workspace;

pub use error::{Error, Result};
pub use member::{Member, MemberId, Roster};
pub use role::{ColorKey, Role, RoleId, RoleRegistry, UNKNOWN_ROLE};
pub use template::{QuotaEntry, Template, TemplateCatalog, TemplateId, TemplateStructure};
pub use workspace::Workspace;
