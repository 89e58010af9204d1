//! Machine configuration.
//!
//! A configuration is a table of states, each with its event transitions,
//! plus the initial state. It is supplied once at construction and never
//! mutated by the engine.
//!
//! The serde shape matches the usual JSON form:
//!
//! ```json
//! {
//!   "states": {
//!     "A": { "transitions": { "go": "B" } },
//!     "B": { "transitions": { "back": "A" } }
//!   },
//!   "initial": "A"
//! }
//! ```

use crate::core::Identifier;
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

pub mod error;

pub use error::ConfigError;

/// Transitions registered for a single state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateConfig<S: Identifier, E: Identifier> {
    /// Event -> target state
    #[serde(default)]
    pub transitions: HashMap<E, S>,
}

impl<S: Identifier, E: Identifier> Default for StateConfig<S, E> {
    fn default() -> Self {
        Self {
            transitions: HashMap::new(),
        }
    }
}

impl<S: Identifier, E: Identifier> StateConfig<S, E> {
    /// Add a transition, returning the updated config.
    pub fn on(mut self, event: impl Into<E>, target: impl Into<S>) -> Self {
        self.transitions.insert(event.into(), target.into());
        self
    }
}

/// Insertion-ordered mapping from state to its transitions.
///
/// Declaration order is what `StateMachine::states` reports, so the table
/// keeps it rather than relying on hash order. Lookups go through a hash
/// index into `entries`.
#[derive(Clone, Debug, PartialEq)]
pub struct StateTable<S: Identifier, E: Identifier> {
    entries: Vec<(S, StateConfig<S, E>)>,
    index: HashMap<S, usize>,
}

impl<S: Identifier, E: Identifier> Default for StateTable<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Identifier, E: Identifier> StateTable<S, E> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Declare a state. Fails if it is already declared.
    pub fn insert(&mut self, state: S, config: StateConfig<S, E>) -> Result<(), ConfigError> {
        if self.contains(&state) {
            return Err(ConfigError::DuplicateState(state.name().to_string()));
        }
        self.push(state, config);
        Ok(())
    }

    /// Get a state's config, declaring the state at the end of the table if
    /// it is new.
    pub fn entry(&mut self, state: S) -> &mut StateConfig<S, E> {
        let position = match self.index.get(&state) {
            Some(&position) => position,
            None => self.push(state, StateConfig::default()),
        };
        &mut self.entries[position].1
    }

    fn push(&mut self, state: S, config: StateConfig<S, E>) -> usize {
        let position = self.entries.len();
        self.index.insert(state.clone(), position);
        self.entries.push((state, config));
        position
    }

    pub fn get(&self, state: &S) -> Option<&StateConfig<S, E>> {
        self.index
            .get(state)
            .map(|&position| &self.entries[position].1)
    }

    pub fn contains(&self, state: &S) -> bool {
        self.index.contains_key(state)
    }

    /// States in declaration order.
    pub fn states(&self) -> impl Iterator<Item = &S> + '_ {
        self.entries.iter().map(|(state, _)| state)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&S, &StateConfig<S, E>)> + '_ {
        self.entries.iter().map(|(state, config)| (state, config))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Identifier, E: Identifier> IntoIterator for StateTable<S, E> {
    type Item = (S, StateConfig<S, E>);
    type IntoIter = std::vec::IntoIter<(S, StateConfig<S, E>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<S: Identifier, E: Identifier> Serialize for StateTable<S, E> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        serializer.collect_map(self.iter())
    }
}

impl<'de, S: Identifier, E: Identifier> Deserialize<'de> for StateTable<S, E> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TableVisitor<S, E>(PhantomData<(S, E)>);

        impl<'de, S: Identifier, E: Identifier> Visitor<'de> for TableVisitor<S, E> {
            type Value = StateTable<S, E>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of states to their transitions")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut table = StateTable::new();
                while let Some((state, config)) = access.next_entry::<S, StateConfig<S, E>>()? {
                    table.insert(state, config).map_err(de::Error::custom)?;
                }
                Ok(table)
            }
        }

        deserializer.deserialize_map(TableVisitor(PhantomData))
    }
}

/// Complete machine configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct MachineConfig<S: Identifier, E: Identifier> {
    #[serde(default)]
    pub states: StateTable<S, E>,

    #[serde(default)]
    pub initial: Option<S>,

    /// Maximum history depth; `None` keeps every entry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_history: Option<usize>,

    /// Maximum journal length; `None` falls back to `max_history`, and
    /// `Some(0)` disables the journal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_journal: Option<usize>,
}

impl<S: Identifier, E: Identifier> Default for MachineConfig<S, E> {
    fn default() -> Self {
        Self {
            states: StateTable::new(),
            initial: None,
            max_history: None,
            max_journal: None,
        }
    }
}

impl<S: Identifier, E: Identifier> MachineConfig<S, E> {
    /// Journal capacity: the explicit journal limit, else the history limit.
    pub fn journal_limit(&self) -> Option<usize> {
        self.max_journal.or(self.max_history)
    }

    /// Parse and validate a JSON configuration.
    ///
    /// Blank input and `null` are treated as an absent configuration.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rewind::config::MachineConfig;
    ///
    /// let config: MachineConfig<String, String> = MachineConfig::from_json_str(
    ///     r#"{"states": {"A": {"transitions": {"go": "B"}}, "B": {}}, "initial": "A"}"#,
    /// )
    /// .unwrap();
    /// assert_eq!(config.states.len(), 2);
    /// ```
    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        if input.trim().is_empty() {
            return Err(ConfigError::Empty);
        }
        let config: Option<Self> = serde_json::from_str(input)?;
        let config = config.ok_or(ConfigError::Empty)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration describes a usable machine.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.states.is_empty() {
            return Err(ConfigError::Empty);
        }

        let initial = self.initial.as_ref().ok_or(ConfigError::MissingInitial)?;

        for (state, config) in self.states.iter() {
            if state.is_blank() {
                return Err(ConfigError::BlankState);
            }
            for (event, target) in &config.transitions {
                if target.is_blank() {
                    return Err(ConfigError::BlankState);
                }
                if !self.states.contains(target) {
                    return Err(ConfigError::UnknownTarget {
                        state: state.name().to_string(),
                        event: event.name().to_string(),
                        target: target.name().to_string(),
                    });
                }
            }
        }

        if initial.is_blank() {
            return Err(ConfigError::BlankState);
        }
        if !self.states.contains(initial) {
            return Err(ConfigError::UnknownInitial(initial.name().to_string()));
        }

        if self.max_history == Some(0) {
            return Err(ConfigError::ZeroHistoryLimit);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Config = MachineConfig<String, String>;

    fn two_state() -> Config {
        let mut states = StateTable::new();
        states
            .insert("A".into(), StateConfig::default().on("go", "B"))
            .unwrap();
        states
            .insert("B".into(), StateConfig::default().on("back", "A"))
            .unwrap();
        MachineConfig {
            states,
            initial: Some("A".into()),
            max_history: None,
            max_journal: None,
        }
    }

    #[test]
    fn valid_config_passes() {
        assert_eq!(two_state().validate(), Ok(()));
    }

    #[test]
    fn empty_config_is_rejected() {
        let config = Config::default();
        assert_eq!(config.validate(), Err(ConfigError::Empty));
    }

    #[test]
    fn missing_initial_is_rejected() {
        let mut config = two_state();
        config.initial = None;
        assert_eq!(config.validate(), Err(ConfigError::MissingInitial));
    }

    #[test]
    fn unknown_initial_is_rejected() {
        let mut config = two_state();
        config.initial = Some("C".into());
        assert_eq!(
            config.validate(),
            Err(ConfigError::UnknownInitial("C".into()))
        );
    }

    #[test]
    fn blank_initial_is_rejected() {
        let mut config = two_state();
        config.initial = Some(String::new());
        assert_eq!(config.validate(), Err(ConfigError::BlankState));
    }

    #[test]
    fn blank_state_key_is_rejected() {
        let mut config = two_state();
        config.states.entry(String::new());
        assert_eq!(config.validate(), Err(ConfigError::BlankState));
    }

    #[test]
    fn unknown_target_is_rejected() {
        let mut config = two_state();
        config
            .states
            .entry("B".into())
            .transitions
            .insert("jump".into(), "Z".into());
        assert_eq!(
            config.validate(),
            Err(ConfigError::UnknownTarget {
                state: "B".into(),
                event: "jump".into(),
                target: "Z".into(),
            })
        );
    }

    #[test]
    fn zero_history_limit_is_rejected() {
        let mut config = two_state();
        config.max_history = Some(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroHistoryLimit));
    }

    #[test]
    fn duplicate_insert_is_rejected() {
        let mut table: StateTable<String, String> = StateTable::new();
        table.insert("A".into(), StateConfig::default()).unwrap();
        assert_eq!(
            table.insert("A".into(), StateConfig::default()),
            Err(ConfigError::DuplicateState("A".into()))
        );
    }

    #[test]
    fn entry_preserves_declaration_order() {
        let mut table: StateTable<String, String> = StateTable::new();
        table.entry("C".into());
        table.entry("A".into());
        table.entry("C".into()).transitions.insert("x".into(), "A".into());
        table.entry("B".into());

        let order: Vec<&String> = table.states().collect();
        assert_eq!(order, vec!["C", "A", "B"]);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn json_preserves_state_order() {
        let config = Config::from_json_str(
            r#"{"states": {"Z": {}, "A": {"transitions": {"go": "Z"}}, "M": {}}, "initial": "A"}"#,
        )
        .unwrap();
        let order: Vec<&String> = config.states.states().collect();
        assert_eq!(order, vec!["Z", "A", "M"]);
    }

    #[test]
    fn json_missing_transitions_defaults_to_empty() {
        let config = Config::from_json_str(r#"{"states": {"A": {}}, "initial": "A"}"#).unwrap();
        assert!(config.states.get(&"A".into()).unwrap().transitions.is_empty());
    }

    #[test]
    fn json_duplicate_state_is_parse_error() {
        let result = Config::from_json_str(r#"{"states": {"A": {}, "A": {}}, "initial": "A"}"#);
        assert!(matches!(result, Err(ConfigError::Parse(msg)) if msg.contains("more than once")));
    }

    #[test]
    fn absent_json_is_empty_config() {
        assert_eq!(Config::from_json_str(""), Err(ConfigError::Empty));
        assert_eq!(Config::from_json_str("  \n"), Err(ConfigError::Empty));
        assert_eq!(Config::from_json_str("null"), Err(ConfigError::Empty));
        assert_eq!(Config::from_json_str("{}"), Err(ConfigError::Empty));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        assert!(matches!(
            Config::from_json_str("{\"states\": "),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn journal_limit_falls_back_to_history_limit() {
        let mut config = two_state();
        assert_eq!(config.journal_limit(), None);

        config.max_history = Some(8);
        assert_eq!(config.journal_limit(), Some(8));

        config.max_journal = Some(0);
        assert_eq!(config.journal_limit(), Some(0));
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn large_table_validates_and_keeps_order() {
        let mut table: StateTable<String, String> = StateTable::new();
        for i in 0..2_000 {
            table
                .entry(format!("s{i}"))
                .transitions
                .insert("next".into(), format!("s{}", (i + 1) % 2_000));
        }
        let config = MachineConfig {
            states: table,
            initial: Some("s0".into()),
            ..Config::default()
        };

        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.states.len(), 2_000);
        assert_eq!(config.states.states().nth(1_999), Some(&"s1999".to_string()));
        assert!(config.states.contains(&"s1234".to_string()));
        assert!(!config.states.contains(&"s2000".to_string()));
        assert_eq!(
            config.states.get(&"s7".to_string()).unwrap().transitions["next"],
            "s8"
        );
    }

    #[test]
    fn json_reads_history_limit() {
        let config =
            Config::from_json_str(r#"{"states": {"A": {}}, "initial": "A", "max_history": 4}"#)
                .unwrap();
        assert_eq!(config.max_history, Some(4));
    }

    #[test]
    fn config_serializes_in_declaration_order() {
        let json = serde_json::to_string(&two_state()).unwrap();
        assert!(json.find("\"A\"").unwrap() < json.find("\"B\"").unwrap());
        assert!(!json.contains("max_history"));
        assert!(!json.contains("max_journal"));

        let back = Config::from_json_str(&json).unwrap();
        assert_eq!(back, two_state());
    }
}
