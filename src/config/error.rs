//! Configuration errors.

use crate::config::validation::ConfigViolation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config ({} violations)", .0.len())]
    Invalid(NonEmptyVec<ConfigViolation>),
}
