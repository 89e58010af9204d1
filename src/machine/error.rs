//! Runtime error types.

use thiserror::Error;

/// Errors returned by state-changing operations.
///
/// A failed operation never mutates the machine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FsmError {
    /// An identifier argument was empty
    #[error("Invalid argument `{argument}`: identifier must not be empty")]
    InvalidArgument { argument: &'static str },

    /// The requested state is not part of the configuration
    #[error("Unknown state '{0}'")]
    UnknownState(String),

    /// The current state has no transition for the event
    #[error("No transition for event '{event}' from state '{state}'")]
    InvalidTransition { state: String, event: String },
}
