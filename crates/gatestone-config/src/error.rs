//! Configuration error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML policy config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to build configuration: {0}")]
    BuildError(#[from] config::ConfigError),

    #[error("Unknown role {role:?} configured for action {action:?}")]
    UnknownRole { action: String, role: String },

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}
