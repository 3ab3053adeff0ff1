//! Configuration management for the command line host

use serde::{Deserialize, Serialize};

const ENV_PREFIX: &str = "COHORT";

/// Host configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub allocation: AllocationConfig,
    pub logging: LoggingConfig,
}

/// Allocation run settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AllocationConfig {
    /// Fixed seed for reproducible runs; entropy-seeded when absent
    pub seed: Option<u64>,
    /// Pause before invoking the engine, in milliseconds
    pub processing_delay_ms: u64,
    /// Reject group counts above capacity instead of clamping them
    pub strict_group_count: bool,
    /// Custom group-name themes; the stock themes are used when empty
    #[serde(default)]
    pub team_names: Vec<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            allocation: AllocationConfig {
                seed: None,
                processing_delay_ms: 0,
                strict_group_count: false,
                team_names: Vec::new(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: LogFormat::Pretty,
            },
        }
    }
}

impl Config {
    /// Load configuration from config files and the environment
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = Self::with_defaults(config::Config::builder())?
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(Self::environment());

        builder.build()?.try_deserialize()
    }

    /// Load configuration from an explicit file, still honoring the environment
    pub fn load_from_file(path: &str) -> Result<Self, config::ConfigError> {
        let builder = Self::with_defaults(config::Config::builder())?
            .add_source(config::File::with_name(path).required(true))
            .add_source(Self::environment());

        builder.build()?.try_deserialize()
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
    }

    fn with_defaults(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
        builder
            .set_default("allocation.processing_delay_ms", 0)?
            .set_default("allocation.strict_group_count", false)?
            .set_default("allocation.team_names", Vec::<String>::new())?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")
    }
}
