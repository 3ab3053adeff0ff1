//! Command line host for the Team Cohort group builder
//!
//! The host owns configuration, logging and the workspace loaded from disk,
//! and calls into `cohort-allocator` at discrete points.

use clap::ValueEnum;

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod logging;


pub use error::{Error, Result};

/// Re-export the library crates for convenience
pub use cohort_allocator as allocator;
pub use cohort_core as core;

/// How `allocate` reports the trace log
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum TraceFormat {
    /// Human-readable lines
    Text,
    /// Tagged JSON events
    Json,
    /// No trace output
    Off,
}
