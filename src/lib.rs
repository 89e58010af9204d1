//! Rewind: a finite state machine engine with undo and redo.
//!
//! A machine is built once from a fixed set of states, each with a table of
//! event transitions. It tracks a current state that moves forward through
//! explicit state changes or named events, and keeps a history of the states
//! it left so moves can be undone and replayed.
//!
//! # Core Concepts
//!
//! - **Identifier**: opaque state and event tokens via the `Identifier` trait
//! - **Configuration**: an ordered state table plus the initial state
//! - **History**: undo and redo stacks, optionally bounded
//! - **Journal**: a timestamped record of every move
//!
//! # Example
//!
//! ```rust
//! use rewind::{FsmError, MachineConfig, StateMachine};
//!
//! let config: MachineConfig<String, String> = MachineConfig::from_json_str(
//!     r#"{
//!         "states": {
//!             "A": { "transitions": { "go": "B" } },
//!             "B": { "transitions": { "back": "A" } }
//!         },
//!         "initial": "A"
//!     }"#,
//! )
//! .unwrap();
//!
//! let mut fsm = StateMachine::new(config).unwrap();
//! assert_eq!(fsm.states(), vec!["A", "B"]);
//! assert_eq!(fsm.states_for("go"), vec!["A"]);
//!
//! fsm.trigger("go").unwrap();
//! assert_eq!(fsm.state(), "B");
//!
//! assert!(matches!(
//!     fsm.change_state("C"),
//!     Err(FsmError::UnknownState(_))
//! ));
//!
//! assert!(fsm.undo());
//! assert_eq!(fsm.state(), "A");
//! assert!(fsm.redo());
//! assert_eq!(fsm.state(), "B");
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod machine;

// Re-export commonly used types
pub use builder::StateMachineBuilder;
pub use config::{ConfigError, MachineConfig, StateConfig, StateTable};
pub use core::{Identifier, StateTransition, TransitionJournal, TransitionKind};
pub use machine::{FsmError, StateMachine};
