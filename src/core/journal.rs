//! Timestamped record of every move a machine makes.
//!
//! The journal is observational only. Undo and redo never consult it, and
//! clearing the undo history leaves it intact.

use super::identifier::Identifier;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// What caused a move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub enum TransitionKind<E: Identifier> {
    /// Explicit `change_state`
    Change,
    /// Event-driven `trigger`
    Trigger { event: E },
    /// `reset` to the oldest history entry
    Reset,
    Undo,
    Redo,
}

/// Record of a single move.
///
/// # Example
///
/// ```rust
/// use rewind::core::{StateTransition, TransitionKind};
/// use chrono::Utc;
///
/// let transition: StateTransition<String, String> = StateTransition {
///     from: "locked".to_string(),
///     to: "unlocked".to_string(),
///     kind: TransitionKind::Trigger { event: "coin".to_string() },
///     timestamp: Utc::now(),
/// };
/// assert!(transition.is_forward());
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: Identifier, E: Identifier> {
    /// The state being left
    pub from: S,
    /// The state being entered
    pub to: S,
    /// The operation that caused the move
    pub kind: TransitionKind<E>,
    /// When the move happened
    pub timestamp: DateTime<Utc>,
}

impl<S: Identifier, E: Identifier> StateTransition<S, E> {
    /// Forward moves are the ones that invalidate pending redo entries.
    pub fn is_forward(&self) -> bool {
        matches!(
            self.kind,
            TransitionKind::Change | TransitionKind::Trigger { .. }
        )
    }
}

/// Ordered journal of moves.
///
/// A journal created with [`TransitionJournal::with_limit`] keeps only the
/// most recent moves; a limit of zero records nothing.
///
/// # Example
///
/// ```rust
/// use rewind::core::{TransitionJournal, TransitionKind};
///
/// let mut journal: TransitionJournal<String, String> = TransitionJournal::new();
/// journal.record("a".to_string(), "b".to_string(), TransitionKind::Change);
/// journal.record("b".to_string(), "c".to_string(), TransitionKind::Change);
///
/// let path = journal.get_path();
/// assert_eq!(path.len(), 3); // a -> b -> c
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionJournal<S: Identifier, E: Identifier> {
    transitions: VecDeque<StateTransition<S, E>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    limit: Option<usize>,
}

impl<S: Identifier, E: Identifier> Default for TransitionJournal<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Identifier, E: Identifier> TransitionJournal<S, E> {
    /// Create an unbounded journal.
    pub fn new() -> Self {
        Self::with_limit(None)
    }

    /// Create a journal that keeps at most `limit` moves.
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            transitions: VecDeque::new(),
            limit,
        }
    }

    /// Append a move stamped with the current time.
    pub fn record(&mut self, from: S, to: S, kind: TransitionKind<E>) {
        self.push(StateTransition {
            from,
            to,
            kind,
            timestamp: Utc::now(),
        });
    }

    /// Append a move, dropping the oldest ones beyond the limit.
    pub fn push(&mut self, transition: StateTransition<S, E>) {
        self.transitions.push_back(transition);
        if let Some(limit) = self.limit {
            while self.transitions.len() > limit {
                self.transitions.pop_front();
            }
        }
    }

    /// Get the path of states traversed.
    ///
    /// Returns the `from` state of the first move followed by the `to`
    /// state of every move.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.front() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Time between the first and last recorded move.
    ///
    /// Returns `None` for an empty journal.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.front()?, self.transitions.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Recorded moves, oldest first.
    pub fn transitions(
        &self,
    ) -> impl DoubleEndedIterator<Item = &StateTransition<S, E>> + ExactSizeIterator + '_ {
        self.transitions.iter()
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn clear(&mut self) {
        self.transitions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Journal = TransitionJournal<String, String>;

    fn s(name: &str) -> String {
        name.to_string()
    }

    #[test]
    fn new_journal_is_empty() {
        let journal = Journal::new();
        assert!(journal.is_empty());
        assert!(journal.get_path().is_empty());
        assert!(journal.duration().is_none());
    }

    #[test]
    fn get_path_returns_state_sequence() {
        let mut journal = Journal::new();
        journal.record(s("a"), s("b"), TransitionKind::Change);
        journal.record(
            s("b"),
            s("c"),
            TransitionKind::Trigger { event: s("next") },
        );
        journal.record(s("c"), s("b"), TransitionKind::Undo);

        let path = journal.get_path();
        assert_eq!(path, vec![&s("a"), &s("b"), &s("c"), &s("b")]);
    }

    #[test]
    fn duration_calculates_elapsed_time() {
        let mut journal = Journal::new();
        journal.record(s("a"), s("b"), TransitionKind::Change);

        std::thread::sleep(std::time::Duration::from_millis(10));

        journal.record(s("b"), s("a"), TransitionKind::Undo);

        let duration = journal.duration().unwrap();
        assert!(duration >= std::time::Duration::from_millis(10));
    }

    #[test]
    fn single_transition_has_duration_zero() {
        let mut journal = Journal::new();
        journal.record(s("a"), s("b"), TransitionKind::Reset);
        assert_eq!(journal.duration(), Some(std::time::Duration::from_secs(0)));
    }

    #[test]
    fn forward_kinds_are_change_and_trigger() {
        let mut journal = Journal::new();
        journal.record(s("a"), s("b"), TransitionKind::Change);
        journal.record(s("b"), s("c"), TransitionKind::Trigger { event: s("e") });
        journal.record(s("c"), s("a"), TransitionKind::Reset);
        journal.record(s("a"), s("c"), TransitionKind::Undo);
        journal.record(s("c"), s("a"), TransitionKind::Redo);

        let forward: Vec<bool> = journal.transitions().map(|t| t.is_forward()).collect();
        assert_eq!(forward, vec![true, true, false, false, false]);
    }

    #[test]
    fn journal_serializes_correctly() {
        let mut journal = Journal::new();
        journal.record(s("a"), s("b"), TransitionKind::Trigger { event: s("go") });

        let json = serde_json::to_string(&journal).unwrap();
        let deserialized: Journal = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.len(), 1);
        assert_eq!(
            deserialized.transitions().next().unwrap().kind,
            TransitionKind::Trigger { event: s("go") }
        );
    }

    #[test]
    fn limit_keeps_most_recent_moves() {
        let mut journal = Journal::with_limit(Some(2));
        journal.record(s("a"), s("b"), TransitionKind::Change);
        journal.record(s("b"), s("c"), TransitionKind::Change);
        journal.record(s("c"), s("d"), TransitionKind::Change);

        assert_eq!(journal.len(), 2);
        assert_eq!(journal.limit(), Some(2));
        assert_eq!(journal.get_path(), vec![&s("b"), &s("c"), &s("d")]);
    }

    #[test]
    fn zero_limit_records_nothing() {
        let mut journal = Journal::with_limit(Some(0));
        journal.record(s("a"), s("b"), TransitionKind::Change);
        assert!(journal.is_empty());
        assert!(journal.duration().is_none());
    }

    #[test]
    fn clear_empties_journal() {
        let mut journal = Journal::new();
        journal.record(s("a"), s("b"), TransitionKind::Change);
        journal.clear();
        assert!(journal.is_empty());
    }
}
