//! Error types for the command line host

use thiserror::Error;

/// Host error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Config file error: {0}")]
    ConfigFile(#[from] config::ConfigError),

    #[error("Core domain error: {0}")]
    Core(#[from] cohort_core::Error),

    #[error("Allocation error: {0}")]
    Allocator(#[from] cohort_allocator::Error),

    #[error("Workspace file error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Convenience result type for host operations
pub type Result<T> = std::result::Result<T, Error>;
