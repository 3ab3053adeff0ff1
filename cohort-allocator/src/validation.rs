//! Feasibility gate run before every allocation
//!
//! Infeasibility is an expected outcome the host branches on, so it is
//! reported as a [`Feasibility`] value rather than an error.

use cohort_core::{RoleId, RoleRegistry, Roster, Template};
use serde::Serialize;
use std::fmt;

/// Not enough members of one role for the requested group count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Shortfall {
    pub role_id: RoleId,
    pub role_name: String,
    pub required: u64,
    pub available: usize,
}

impl fmt::Display for Shortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Requires {} {}s, but only have {}.",
            self.required, self.role_name, self.available
        )
    }
}

/// Why a request cannot be allocated
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Rejection {
    NoTemplate,
    ZeroGroups,
    Shortfalls { shortfalls: Vec<Shortfall> },
    EmptyTemplate,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::NoTemplate => f.write_str("No template selected."),
            Rejection::ZeroGroups => f.write_str("Team count must be greater than zero."),
            Rejection::Shortfalls { shortfalls } => {
                for (i, shortfall) in shortfalls.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", shortfall)?;
                }
                Ok(())
            }
            Rejection::EmptyTemplate => f.write_str("The selected template has no roles defined."),
        }
    }
}

/// Result of a feasibility check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Feasibility {
    Valid,
    Invalid { rejection: Rejection },
}

impl Feasibility {
    pub fn is_valid(&self) -> bool {
        matches!(self, Feasibility::Valid)
    }

    /// Human-readable rejection message, if any
    pub fn message(&self) -> Option<String> {
        match self {
            Feasibility::Valid => None,
            Feasibility::Invalid { rejection } => Some(rejection.to_string()),
        }
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Feasibility::Valid => None,
            Feasibility::Invalid { rejection } => Some(rejection),
        }
    }
}

impl From<Rejection> for Feasibility {
    fn from(rejection: Rejection) -> Self {
        Feasibility::Invalid { rejection }
    }
}

/// Check a `(template, group_count)` request against roster availability.
///
/// Pure: the same inputs always produce the same answer.
pub fn validate(
    template: Option<&Template>,
    roster: &Roster,
    roles: &RoleRegistry,
    group_count: u32,
) -> Feasibility {
    let Some(template) = template else {
        return Rejection::NoTemplate.into();
    };
    if group_count == 0 {
        return Rejection::ZeroGroups.into();
    }

    let shortfalls: Vec<Shortfall> = template
        .structure
        .iter()
        .filter(|entry| entry.count > 0)
        .filter_map(|entry| {
            let required = u64::from(entry.count) * u64::from(group_count);
            let available = roster.count_with_role(entry.role_id);
            ((available as u64) < required).then(|| Shortfall {
                role_id: entry.role_id,
                role_name: roles.name_or_unknown(Some(entry.role_id)).to_string(),
                required,
                available,
            })
        })
        .collect();

    if !shortfalls.is_empty() {
        return Rejection::Shortfalls { shortfalls }.into();
    }
    if template.structure.per_group_total() == 0 {
        return Rejection::EmptyTemplate.into();
    }
    Feasibility::Valid
}

#[cfg(test)]
mod tests {
    use super::*;
    use cohort_core::Member;

    struct Fixture {
        roles: RoleRegistry,
        roster: Roster,
        lead: RoleId,
        dev: RoleId,
        designer: RoleId,
    }

    fn fixture() -> Fixture {
        let roles = RoleRegistry::with_defaults();
        let lead = roles.find_by_name("Lead").unwrap().id;
        let dev = roles.find_by_name("Developer").unwrap().id;
        let designer = roles.find_by_name("Designer").unwrap().id;

        let mut roster = Roster::new();
        for (count, role) in [(2, lead), (6, dev), (2, designer)] {
            for i in 0..count {
                roster.add(Member::new(format!("{} {}", role, i), Some(role)).unwrap()).unwrap();
            }
        }
        Fixture { roles, roster, lead, dev, designer }
    }

    fn squad(f: &Fixture) -> Template {
        Template::new("Standard Squad Protocol")
            .unwrap()
            .with_role(f.lead, 1)
            .with_role(f.dev, 2)
            .with_role(f.designer, 1)
    }

    #[test]
    fn test_missing_template() {
        let f = fixture();
        let result = validate(None, &f.roster, &f.roles, 2);
        assert_eq!(result.rejection(), Some(&Rejection::NoTemplate));
        assert_eq!(result.message().unwrap(), "No template selected.");
    }

    #[test]
    fn test_zero_groups() {
        let f = fixture();
        let result = validate(Some(&squad(&f)), &f.roster, &f.roles, 0);
        assert_eq!(result.rejection(), Some(&Rejection::ZeroGroups));
        assert_eq!(result.message().unwrap(), "Team count must be greater than zero.");
    }

    #[test]
    fn test_feasible_request() {
        let f = fixture();
        let result = validate(Some(&squad(&f)), &f.roster, &f.roles, 2);
        assert!(result.is_valid());
        assert_eq!(result.message(), None);
    }

    #[test]
    fn test_lead_and_designer_shortfalls() {
        let f = fixture();
        let result = validate(Some(&squad(&f)), &f.roster, &f.roles, 3);
        assert!(!result.is_valid());
        assert_eq!(
            result.rejection(),
            Some(&Rejection::Shortfalls {
                shortfalls: vec![
                    Shortfall {
                        role_id: f.lead,
                        role_name: "Lead".to_string(),
                        required: 3,
                        available: 2,
                    },
                    Shortfall {
                        role_id: f.designer,
                        role_name: "Designer".to_string(),
                        required: 3,
                        available: 2,
                    },
                ]
            })
        );
        assert_eq!(
            result.message().unwrap(),
            "Requires 3 Leads, but only have 2. Requires 3 Designers, but only have 2."
        );
    }

    #[test]
    fn test_single_shortfall() {
        let f = fixture();
        let template = Template::new("Lead Pairs").unwrap().with_role(f.lead, 2);
        let result = validate(Some(&template), &f.roster, &f.roles, 2);
        assert_eq!(result.message().unwrap(), "Requires 4 Leads, but only have 2.");
    }

    #[test]
    fn test_multiple_shortfalls_are_space_joined() {
        let f = fixture();
        let result = validate(Some(&squad(&f)), &f.roster, &f.roles, 4);
        assert_eq!(
            result.message().unwrap(),
            "Requires 4 Leads, but only have 2. Requires 8 Developers, but only have 6. \
             Requires 4 Designers, but only have 2."
        );
    }

    #[test]
    fn test_empty_template() {
        let f = fixture();
        let empty = Template::new("Nothing").unwrap();
        let result = validate(Some(&empty), &f.roster, &f.roles, 1);
        assert_eq!(result.rejection(), Some(&Rejection::EmptyTemplate));

        let zeroed = Template::new("Zeroed").unwrap().with_role(f.lead, 0);
        let result = validate(Some(&zeroed), &f.roster, &f.roles, 1);
        assert_eq!(result.message().unwrap(), "The selected template has no roles defined.");
    }

    #[test]
    fn test_deleted_role_reports_unknown() {
        let f = fixture();
        let ghost = RoleId::new();
        let template = Template::new("Ghostly").unwrap().with_role(ghost, 1);
        let result = validate(Some(&template), &f.roster, &f.roles, 1);
        assert_eq!(result.message().unwrap(), "Requires 1 Unknown Roles, but only have 0.");
    }

    #[test]
    fn test_validation_is_repeatable() {
        let f = fixture();
        let template = squad(&f);
        let first = validate(Some(&template), &f.roster, &f.roles, 3);
        let second = validate(Some(&template), &f.roster, &f.roles, 3);
        assert_eq!(first, second);
    }
}
