//! Builder for constructing state machines.

use crate::config::{ConfigError, MachineConfig};
use crate::core::Identifier;
use crate::machine::StateMachine;

/// Builder for constructing state machines with a fluent API.
///
/// States are declared in the order they are first mentioned, either by
/// [`state`](Self::state) or as the source of a
/// [`transition`](Self::transition). Transition targets are not declared
/// implicitly; an undeclared target fails validation.
///
/// # Example
///
/// ```rust
/// use rewind::builder::StateMachineBuilder;
///
/// let fsm = StateMachineBuilder::<String, String>::new()
///     .initial("idle")
///     .transition("idle", "start", "running")
///     .transition("running", "stop", "idle")
///     .state("broken")
///     .max_history(16)
///     .build()
///     .unwrap();
///
/// assert_eq!(fsm.states(), vec!["idle", "running", "broken"]);
/// assert_eq!(fsm.max_history(), Some(16));
/// ```
pub struct StateMachineBuilder<S: Identifier, E: Identifier> {
    config: MachineConfig<S, E>,
}

impl<S: Identifier, E: Identifier> StateMachineBuilder<S, E> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            config: MachineConfig::default(),
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: impl Into<S>) -> Self {
        self.config.initial = Some(state.into());
        self
    }

    /// Declare a state. Declaring a state twice is a no-op.
    pub fn state(mut self, state: impl Into<S>) -> Self {
        self.config.states.entry(state.into());
        self
    }

    /// Register `from --event--> to`, declaring `from` if needed.
    ///
    /// A later transition for the same state and event replaces the earlier
    /// one.
    pub fn transition(
        mut self,
        from: impl Into<S>,
        event: impl Into<E>,
        to: impl Into<S>,
    ) -> Self {
        self.config
            .states
            .entry(from.into())
            .transitions
            .insert(event.into(), to.into());
        self
    }

    /// Bound the history stack to `limit` entries.
    pub fn max_history(mut self, limit: usize) -> Self {
        self.config.max_history = Some(limit);
        self
    }

    /// Bound the journal to `limit` moves; zero disables it.
    ///
    /// Without this the journal follows the history limit.
    pub fn max_journal(mut self, limit: usize) -> Self {
        self.config.max_journal = Some(limit);
        self
    }

    /// Produce the validated configuration without building a machine.
    pub fn config(self) -> Result<MachineConfig<S, E>, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }

    /// Build the state machine.
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> Result<StateMachine<S, E>, ConfigError> {
        StateMachine::new(self.config)
    }
}

impl<S: Identifier, E: Identifier> Default for StateMachineBuilder<S, E> {
    fn default() -> Self {
        Self::new()
    }
}
