//! Undo/redo bookkeeping.
//!
//! `History` owns two stacks: the states the machine has left (oldest
//! first) and the states that were undone and can be replayed.

use super::identifier::Identifier;
use std::collections::VecDeque;

/// History and redo stacks for a state machine.
///
/// Undo and redo availability is decided by stack length only.
///
/// # Example
///
/// ```rust
/// use rewind::core::History;
///
/// let mut history = History::new(None);
/// history.record("a".to_string());
///
/// let previous = history.undo("b".to_string());
/// assert_eq!(previous.as_deref(), Some("a"));
/// assert!(history.can_redo());
///
/// assert_eq!(history.redo().as_deref(), Some("b"));
/// assert!(!history.can_undo());
/// ```
#[derive(Clone, Debug)]
pub struct History<S: Identifier> {
    past: VecDeque<S>,
    redo: Vec<S>,
    limit: Option<usize>,
}

impl<S: Identifier> Default for History<S> {
    fn default() -> Self {
        Self::new(None)
    }
}

impl<S: Identifier> History<S> {
    /// Create empty stacks. `limit` bounds the history stack; `None` is
    /// unbounded.
    pub fn new(limit: Option<usize>) -> Self {
        Self {
            past: VecDeque::new(),
            redo: Vec::new(),
            limit,
        }
    }

    /// Push a state the machine is leaving.
    ///
    /// When a limit is set and exceeded, the oldest entry is dropped. The
    /// redo stack is left alone; forward transitions clear it explicitly
    /// with [`History::clear_redo`].
    pub fn record(&mut self, state: S) {
        self.past.push_back(state);
        if let Some(limit) = self.limit {
            while self.past.len() > limit {
                self.past.pop_front();
            }
        }
    }

    /// Pop the most recent history entry, parking `current` on the redo
    /// stack. Returns `None` (and leaves both stacks untouched) when there is
    /// nothing to undo.
    pub fn undo(&mut self, current: S) -> Option<S> {
        let previous = self.past.pop_back()?;
        self.redo.push(current);
        Some(previous)
    }

    /// Pop the most recent redo entry.
    ///
    /// Redo does not re-record the state being left.
    pub fn redo(&mut self) -> Option<S> {
        self.redo.pop()
    }

    /// Oldest retained history entry.
    pub fn first(&self) -> Option<&S> {
        self.past.front()
    }

    pub fn clear(&mut self) {
        self.past.clear();
    }

    pub fn clear_redo(&mut self) {
        self.redo.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// History entries, oldest first.
    pub fn past(&self) -> impl ExactSizeIterator<Item = &S> + '_ {
        self.past.iter()
    }

    /// Redo entries, oldest first; the last one is replayed next.
    pub fn pending_redo(&self) -> &[S] {
        &self.redo
    }

    pub fn len(&self) -> usize {
        self.past.len()
    }

    pub fn is_empty(&self) -> bool {
        self.past.is_empty()
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }
}
