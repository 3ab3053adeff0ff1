//! Structured audit trail of one allocation run
//!
//! Events carry the decision data; text is produced only when a display
//! layer asks for it through [`TraceLog::render`] or `Display`.

use serde::Serialize;
use std::fmt;

/// One allocation decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TraceEvent {
    PoolInitialized { role: String, size: usize },
    /// `index` is 1-based
    GroupHeader { index: usize, name: String },
    Assigned { member: String, role: String },
    /// `slot` is 1-based
    Warning { role: String, slot: u32, required: u32 },
    LeftoverSummary { count: usize },
    Unassigned { member: String, role: String },
    AllAssigned,
    Rejected { message: String },
}

impl TraceEvent {
    pub fn is_warning(&self) -> bool {
        matches!(self, TraceEvent::Warning { .. })
    }
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceEvent::PoolInitialized { role, size } => {
                write!(f, "Pool '{}' initialized with {} members.", role, size)
            }
            TraceEvent::GroupHeader { index, name } => {
                write!(f, "--- Allocating Group {}: {} ---", index, name)
            }
            TraceEvent::Assigned { member, role } => {
                write!(f, "  - Assigned {} as {}", member, role)
            }
            TraceEvent::Warning { role, slot, required } => write!(
                f,
                "  - WARNING: Insufficient {}s for slot {}/{} in this group.",
                role, slot, required
            ),
            TraceEvent::LeftoverSummary { count } => {
                write!(f, "{} members were unassigned (Leftover Pool).", count)
            }
            TraceEvent::Unassigned { member, role } => {
                write!(f, "  - Unassigned: {} ({})", member, role)
            }
            TraceEvent::AllAssigned => f.write_str(
                "All members successfully assigned or used in the template calculations.",
            ),
            TraceEvent::Rejected { message } => write!(f, "Generation failed: {}", message),
        }
    }
}

/// Ordered events of a single run; never carried across runs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TraceLog {
    events: Vec<TraceEvent>,
}

impl TraceLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn warnings(&self) -> impl Iterator<Item = &TraceEvent> {
        self.events.iter().filter(|e| e.is_warning())
    }

    /// One display line per event
    pub fn render(&self) -> Vec<String> {
        self.events.iter().map(ToString::to_string).collect()
    }

    /// Serialize the events for machine consumers
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for TraceLog {
    /// Group headers and the leftover section are set off by a blank line
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, event) in self.events.iter().enumerate() {
            let spaced = matches!(
                event,
                TraceEvent::GroupHeader { .. }
                    | TraceEvent::LeftoverSummary { .. }
                    | TraceEvent::AllAssigned
            );
            if i > 0 && spaced {
                writeln!(f)?;
            }
            writeln!(f, "{}", event)?;
        }
        Ok(())
    }
}
