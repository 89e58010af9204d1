//! Core building blocks of the state machine.
//!
//! - Identifiers for states and events via the `Identifier` trait
//! - Undo/redo stacks
//! - A timestamped journal of every move

mod history;
mod identifier;
mod journal;

pub use history::History;
pub use identifier::Identifier;
pub use journal::{StateTransition, TransitionJournal, TransitionKind};
