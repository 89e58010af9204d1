//! The state machine engine.
//!
//! `StateMachine` owns the transition table, the current state, the undo and
//! redo stacks and the journal. Forward moves (`change_state`, `trigger`)
//! invalidate pending redo entries; `undo` and `redo` walk the stacks;
//! `reset` jumps back to the oldest history entry.
//!
//! The engine is synchronous and takes `&mut self` for every mutation.
//! Callers that share a machine across threads wrap it in a
//! `std::sync::Mutex`.

use crate::builder::StateMachineBuilder;
use crate::config::{ConfigError, MachineConfig};
use crate::core::{History, Identifier, TransitionJournal, TransitionKind};
use std::collections::HashMap;

pub mod error;

pub use error::FsmError;

/// Finite state machine with event transitions and undo/redo.
///
/// # Example
///
/// ```rust
/// use rewind::StateMachine;
///
/// let mut fsm: StateMachine<String, String> = StateMachine::builder()
///     .initial("A")
///     .transition("A", "go", "B")
///     .transition("B", "back", "A")
///     .build()
///     .unwrap();
///
/// fsm.trigger("go").unwrap();
/// assert_eq!(fsm.state(), "B");
///
/// assert!(fsm.undo());
/// assert_eq!(fsm.state(), "A");
///
/// assert!(fsm.redo());
/// assert_eq!(fsm.state(), "B");
/// ```
#[derive(Clone, Debug)]
pub struct StateMachine<S: Identifier, E: Identifier> {
    /// States in configuration order
    order: Vec<S>,
    table: HashMap<S, HashMap<E, S>>,
    current: S,
    history: History<S>,
    journal: TransitionJournal<S, E>,
}

impl<S: Identifier, E: Identifier> StateMachine<S, E> {
    /// Create a machine in the configured initial state.
    ///
    /// The configuration is validated first; see [`MachineConfig::validate`].
    pub fn new(config: MachineConfig<S, E>) -> Result<Self, ConfigError> {
        config.validate()?;

        let MachineConfig {
            states,
            initial,
            max_history,
            max_journal,
        } = config;
        let journal_limit = max_journal.or(max_history);
        let current = initial.ok_or(ConfigError::MissingInitial)?;

        let mut order = Vec::with_capacity(states.len());
        let mut table = HashMap::with_capacity(states.len());
        for (state, state_config) in states {
            order.push(state.clone());
            table.insert(state, state_config.transitions);
        }

        tracing::debug!(
            initial = current.name(),
            states = order.len(),
            max_history = ?max_history,
            journal_limit = ?journal_limit,
            "State machine created"
        );

        Ok(Self {
            order,
            table,
            current,
            history: History::new(max_history),
            journal: TransitionJournal::with_limit(journal_limit),
        })
    }

    /// Start a fluent builder.
    pub fn builder() -> StateMachineBuilder<S, E> {
        StateMachineBuilder::new()
    }

    /// Current state.
    pub fn state(&self) -> &S {
        &self.current
    }

    /// Move to `state` regardless of the transition table.
    ///
    /// Records the current state in history and clears the redo stack, even
    /// when `state` is already current.
    pub fn change_state(&mut self, state: impl Into<S>) -> Result<(), FsmError> {
        let state = state.into();
        if state.is_blank() {
            tracing::debug!("Rejected change to blank state");
            return Err(FsmError::InvalidArgument { argument: "state" });
        }
        if !self.table.contains_key(&state) {
            tracing::debug!(state = state.name(), "Rejected change to unknown state");
            return Err(FsmError::UnknownState(state.name().to_string()));
        }

        self.advance(state, TransitionKind::Change);
        Ok(())
    }

    /// Follow the current state's transition for `event`.
    ///
    /// Fails without touching anything if no such transition is registered.
    pub fn trigger(&mut self, event: impl Into<E>) -> Result<(), FsmError> {
        let event = event.into();
        let target = self
            .table
            .get(&self.current)
            .and_then(|transitions| transitions.get(&event))
            .cloned();

        let Some(target) = target else {
            tracing::debug!(
                state = self.current.name(),
                event = event.name(),
                "Rejected event with no transition"
            );
            return Err(FsmError::InvalidTransition {
                state: self.current.name().to_string(),
                event: event.name().to_string(),
            });
        };

        self.advance(target, TransitionKind::Trigger { event });
        Ok(())
    }

    fn advance(&mut self, target: S, kind: TransitionKind<E>) {
        let from = std::mem::replace(&mut self.current, target);
        self.history.record(from.clone());
        self.history.clear_redo();
        self.log_move(&from, &kind);
        self.journal.record(from, self.current.clone(), kind);
    }

    /// Jump back to the oldest retained history entry.
    ///
    /// The target is read before the current state is recorded, so a full
    /// bounded history cannot evict it. With an empty history the machine
    /// stays where it is. The redo stack is left alone.
    pub fn reset(&mut self) {
        let target = self
            .history
            .first()
            .cloned()
            .unwrap_or_else(|| self.current.clone());
        let from = std::mem::replace(&mut self.current, target);
        self.history.record(from.clone());
        self.log_move(&from, &TransitionKind::Reset);
        self.journal
            .record(from, self.current.clone(), TransitionKind::Reset);
    }

    /// All configured states, in configuration order.
    pub fn states(&self) -> Vec<&S> {
        self.order.iter().collect()
    }

    /// States that have a transition for `event`, in configuration order.
    pub fn states_for(&self, event: impl Into<E>) -> Vec<&S> {
        let event = event.into();
        self.order
            .iter()
            .filter(|state| {
                self.table
                    .get(*state)
                    .is_some_and(|transitions| transitions.contains_key(&event))
            })
            .collect()
    }

    /// Step back to the most recent history entry.
    ///
    /// Returns `false` and changes nothing when the history is empty.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.history.undo(self.current.clone()) else {
            tracing::trace!(state = self.current.name(), "Nothing to undo");
            return false;
        };

        let from = std::mem::replace(&mut self.current, previous);
        self.log_move(&from, &TransitionKind::Undo);
        self.journal
            .record(from, self.current.clone(), TransitionKind::Undo);
        true
    }

    /// Replay the most recently undone state.
    ///
    /// Returns `false` and changes nothing when there is nothing to redo.
    /// The state being left is not recorded in history.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.history.redo() else {
            tracing::trace!(state = self.current.name(), "Nothing to redo");
            return false;
        };

        let from = std::mem::replace(&mut self.current, next);
        self.log_move(&from, &TransitionKind::Redo);
        self.journal
            .record(from, self.current.clone(), TransitionKind::Redo);
        true
    }

    /// Empty the history stack. Current state and redo stack are kept.
    pub fn clear_history(&mut self) {
        tracing::debug!(dropped = self.history.len(), "History cleared");
        self.history.clear();
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// History entries, oldest first.
    pub fn history(&self) -> Vec<&S> {
        self.history.past().collect()
    }

    /// Pending redo entries; the last one is replayed next.
    pub fn redo_stack(&self) -> &[S] {
        self.history.pending_redo()
    }

    pub fn max_history(&self) -> Option<usize> {
        self.history.limit()
    }

    /// Events accepted in the current state, in no particular order.
    pub fn events(&self) -> Vec<&E> {
        self.table
            .get(&self.current)
            .map(|transitions| transitions.keys().collect())
            .unwrap_or_default()
    }

    /// Check if the current state has no outgoing transitions.
    pub fn is_terminal(&self) -> bool {
        self.table
            .get(&self.current)
            .map_or(true, |transitions| transitions.is_empty())
    }

    pub fn journal(&self) -> &TransitionJournal<S, E> {
        &self.journal
    }

    pub fn clear_journal(&mut self) {
        self.journal.clear();
    }

    fn log_move(&self, from: &S, kind: &TransitionKind<E>) {
        match kind {
            TransitionKind::Trigger { event } => tracing::debug!(
                from = from.name(),
                to = self.current.name(),
                event = event.name(),
                "Triggered transition"
            ),
            TransitionKind::Change => tracing::debug!(
                from = from.name(),
                to = self.current.name(),
                "Changed state"
            ),
            TransitionKind::Reset => tracing::debug!(
                from = from.name(),
                to = self.current.name(),
                "Reset state"
            ),
            TransitionKind::Undo => tracing::debug!(
                from = from.name(),
                to = self.current.name(),
                "Undid transition"
            ),
            TransitionKind::Redo => tracing::debug!(
                from = from.name(),
                to = self.current.name(),
                "Redid transition"
            ),
        }
    }
}
