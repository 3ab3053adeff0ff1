//! Error types for the allocation crate
//!
//! Infeasible requests are not errors; see [`crate::validation::Feasibility`].

use thiserror::Error;

/// Allocation crate error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience result type for allocation operations
pub type Result<T> = std::result::Result<T, Error>;
