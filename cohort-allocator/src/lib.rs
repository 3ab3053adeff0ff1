//! Group allocation engine for Team Cohort
//!
//! This crate provides the pure functions a host calls to turn a roster and
//! a composition template into groups:
//!
//! - [`capacity::max_groups`] bounds the group count a host may offer
//! - [`validation::validate`] gates a request before anything is allocated
//! - [`allocation::allocate`] performs the randomized quota fill
//! - [`run::run`] chains the two as a single one-shot run
//!
//! None of them mutate their inputs. Randomness is always injected so that
//! callers can seed runs for reproducibility.

pub mod allocation;
pub mod capacity;
pub mod error;
pub mod export;
pub mod names;
pub mod run;
pub mod trace;
pub mod validation;

pub use allocation::{allocate, AllocationRequest, AllocationResult, AssignedMember, Group};
pub use capacity::{clamp_group_count, max_groups};
pub use error::{Error, Result};
pub use names::GroupNamePool;
pub use run::{run, RunOutcome, RunRequest, RunState};
pub use trace::{TraceEvent, TraceLog};
pub use validation::{validate, Feasibility, Rejection, Shortfall};

/// Re-export core types for convenience
pub use cohort_core as core;
