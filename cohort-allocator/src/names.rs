//! Themed display names for generated groups

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Stock group-name themes
pub const DEFAULT_GROUP_NAMES: [&str; 10] = [
    "Cohort Core",
    "Stream Team",
    "Cosmic Flux",
    "Hyperdrive",
    "Starlight Fleet",
    "Ion Grid",
    "Aura Protocol",
    "Vector Group",
    "Deep Space Drifters",
    "Celestial Code",
];

/// Lowest numeric suffix appended to a group name
pub const SUFFIX_MIN: u32 = 100;
/// Highest numeric suffix appended to a group name
pub const SUFFIX_MAX: u32 = 1098;

/// The list of themes group names are drawn from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupNamePool {
    names: Vec<String>,
}

impl GroupNamePool {
    /// Build a pool from custom names; blank entries are dropped and an
    /// empty result falls back to the stock themes.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names
            .into_iter()
            .map(Into::into)
            .filter(|n: &String| !n.trim().is_empty())
            .collect();
        if names.is_empty() {
            Self::default()
        } else {
            Self { names }
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// A fresh random permutation of the pool
    pub fn shuffled<R: Rng>(&self, rng: &mut R) -> Vec<String> {
        let mut names = self.names.clone();
        names.shuffle(rng);
        names
    }
}

impl Default for GroupNamePool {
    fn default() -> Self {
        Self {
            names: DEFAULT_GROUP_NAMES.iter().map(|n| n.to_string()).collect(),
        }
    }
}

/// Display name for the group at `index`: a theme, cycling through the
/// shuffled list, plus a random numeric suffix.
pub fn display_name<R: Rng>(shuffled: &[String], index: usize, rng: &mut R) -> String {
    let suffix = rng.gen_range(SUFFIX_MIN..=SUFFIX_MAX);
    match shuffled.get(index % shuffled.len().max(1)) {
        Some(theme) => format!("{} {}", theme, suffix),
        None => format!("Group {}", suffix),
    }
}
