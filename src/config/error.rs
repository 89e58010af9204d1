//! Configuration error types.

use thiserror::Error;

/// Errors that can occur when validating or loading a machine configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No configuration, or a configuration without states
    #[error("Configuration is empty: at least one state is required")]
    Empty,

    #[error("Initial state not specified")]
    MissingInitial,

    #[error("Initial state '{0}' is not a configured state")]
    UnknownInitial(String),

    /// A state key, transition target or initial state has an empty name
    #[error("State identifiers must not be empty")]
    BlankState,

    #[error("State '{0}' is declared more than once")]
    DuplicateState(String),

    #[error("Transition '{event}' from '{state}' targets unknown state '{target}'")]
    UnknownTarget {
        state: String,
        event: String,
        target: String,
    },

    #[error("History limit must be greater than zero")]
    ZeroHistoryLimit,

    /// Configuration text could not be decoded
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}
