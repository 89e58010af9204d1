//! Identifier trait for states and events.
//!
//! States and events are opaque tokens: the engine only hashes, compares
//! and names them.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state and event identifiers.
///
/// # Required Traits
///
/// - `Clone`: identifiers are copied onto the history and redo stacks
/// - `Eq` + `Hash`: identifiers are map keys in the transition table
/// - `Debug`: identifiers appear in diagnostics
/// - `Serialize` + `Deserialize`: identifiers appear in configuration
///
/// `String` implements this trait out of the box. Simple enums can use
/// [`identifier_enum!`](crate::identifier_enum).
///
/// # Example
///
/// ```rust
/// use rewind::core::Identifier;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Door {
///     Open,
///     Closed,
/// }
///
/// impl Identifier for Door {
///     fn name(&self) -> &str {
///         match self {
///             Self::Open => "Open",
///             Self::Closed => "Closed",
///         }
///     }
/// }
///
/// assert_eq!(Door::Open.name(), "Open");
/// assert!(!Door::Closed.is_blank());
/// ```
pub trait Identifier:
    Clone + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Name used for display and logging.
    fn name(&self) -> &str;

    /// Blank identifiers are rejected everywhere the engine accepts one.
    ///
    /// Default implementation checks for an empty name.
    fn is_blank(&self) -> bool {
        self.name().is_empty()
    }
}

impl Identifier for String {
    fn name(&self) -> &str {
        self.as_str()
    }
}
