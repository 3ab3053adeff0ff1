//! One-shot allocation run: validate, then allocate
//!
//! ```text
//! Idle -> Validating -> Rejected
//!                    \-> Allocating -> Done
//! ```
//!
//! A rejected run yields the validator's message as its only trace entry
//! and no groups. Allocation itself cannot fail.

use crate::allocation::{allocate, AllocationRequest, AllocationResult};
use crate::names::GroupNamePool;
use crate::trace::{TraceEvent, TraceLog};
use crate::validation::{validate, Feasibility, Rejection};
use cohort_core::{RoleRegistry, Roster, Template};
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

/// Lifecycle of a single run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Idle,
    Validating,
    Rejected,
    Allocating,
    Done,
}

impl RunState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Rejected | RunState::Done)
    }

    fn can_transition_to(&self, next: RunState) -> bool {
        matches!(
            (self, next),
            (RunState::Idle, RunState::Validating)
                | (RunState::Validating, RunState::Rejected)
                | (RunState::Validating, RunState::Allocating)
                | (RunState::Allocating, RunState::Done)
        )
    }
}

/// Host-supplied inputs; `template` is `None` when nothing is selected
#[derive(Debug, Clone, Copy)]
pub struct RunRequest<'a> {
    pub template: Option<&'a Template>,
    pub roster: &'a Roster,
    pub roles: &'a RoleRegistry,
    pub group_count: u32,
    pub names: &'a GroupNamePool,
}

/// Terminal state of a run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RunOutcome {
    Rejected { rejection: Rejection, trace: TraceLog },
    Done(AllocationResult),
}

impl RunOutcome {
    pub fn state(&self) -> RunState {
        match self {
            RunOutcome::Rejected { .. } => RunState::Rejected,
            RunOutcome::Done(_) => RunState::Done,
        }
    }

    pub fn trace(&self) -> &TraceLog {
        match self {
            RunOutcome::Rejected { trace, .. } => trace,
            RunOutcome::Done(result) => &result.trace,
        }
    }

    pub fn result(&self) -> Option<&AllocationResult> {
        match self {
            RunOutcome::Done(result) => Some(result),
            RunOutcome::Rejected { .. } => None,
        }
    }

    pub fn into_result(self) -> Option<AllocationResult> {
        match self {
            RunOutcome::Done(result) => Some(result),
            RunOutcome::Rejected { .. } => None,
        }
    }
}

struct Lifecycle {
    state: RunState,
}

impl Lifecycle {
    fn advance(&mut self, next: RunState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "invalid run transition {:?} -> {:?}",
            self.state,
            next
        );
        debug!(from = ?self.state, to = ?next, "run state");
        self.state = next;
    }
}

fn reject(lifecycle: &mut Lifecycle, rejection: Rejection) -> RunOutcome {
    lifecycle.advance(RunState::Rejected);
    info!(reason = %rejection, "allocation rejected");
    let mut trace = TraceLog::new();
    trace.push(TraceEvent::Rejected {
        message: rejection.to_string(),
    });
    RunOutcome::Rejected { rejection, trace }
}

/// Validate `request` and, if feasible, allocate it
pub fn run<R: Rng>(request: &RunRequest<'_>, rng: &mut R) -> RunOutcome {
    let mut lifecycle = Lifecycle {
        state: RunState::Idle,
    };
    lifecycle.advance(RunState::Validating);

    let Some(template) = request.template else {
        return reject(&mut lifecycle, Rejection::NoTemplate);
    };
    if let Feasibility::Invalid { rejection } = validate(
        Some(template),
        request.roster,
        request.roles,
        request.group_count,
    ) {
        return reject(&mut lifecycle, rejection);
    }

    lifecycle.advance(RunState::Allocating);
    let result = allocate(
        &AllocationRequest {
            template,
            roster: request.roster,
            roles: request.roles,
            group_count: request.group_count,
            names: request.names,
        },
        rng,
    );
    lifecycle.advance(RunState::Done);
    RunOutcome::Done(result)
}
