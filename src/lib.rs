//! Stategate: guarded state transitions for arbitrary objects
//!
//! Stategate answers one question: may this object move from the state it is
//! in to the state it is asked to move to, right now? If so, it performs the
//! move.
//!
//! # Core Concepts
//!
//! - **State**: an opaque, comparable name ([`State`])
//! - **Transition**: a declared origin → exit edge ([`Transition`])
//! - **Guard**: a predicate over the subject and goal state ([`Guard`])
//! - **Ruleset**: the table of transitions and their guards ([`Ruleset`])
//! - **Subject**: anything that can report and accept a state ([`Subject`])
//! - **Machine**: one ruleset bound to one subject ([`Machine`])
//!
//! All guards for a transition run concurrently and every one of them runs to
//! completion. The failures they report are collected in the order the guards
//! finished and returned together as a [`Rejection`].
//!
//! Subjects choose their own starting state. A subject that has never been
//! given one reports the empty state, for which no transition is declared
//! unless the caller declares it.
//!
//! # Example
//!
//! ```rust
//! use stategate::{Machine, MachineError, Ruleset, State, Subject};
//!
//! struct Thing {
//!     state: State,
//! }
//!
//! impl Subject for Thing {
//!     fn current_state(&self) -> State {
//!         self.state.clone()
//!     }
//!
//!     fn set_state(&mut self, state: State) {
//!         self.state = state;
//!     }
//! }
//!
//! let rules = Ruleset::from_transitions([
//!     ("pending", "started"),
//!     ("started", "finished"),
//! ]);
//!
//! let mut thing = Thing { state: State::new("pending") };
//! let mut machine = Machine::new().with_rules(&rules).with_subject(&mut thing);
//!
//! // States cannot be skipped.
//! let err = machine.transition("finished").unwrap_err();
//! assert!(matches!(err, MachineError::Rejected(ref r) if r.is_unknown_transition()));
//!
//! machine.transition("started").unwrap();
//! machine.transition("finished").unwrap();
//! assert_eq!(machine.current_state(), Some(State::new("finished")));
//! ```

pub mod builder;
pub mod core;
pub mod machine;
pub mod ruleset;

// Re-export commonly used types
pub use crate::builder::{BuildError, RulesetBuilder};
pub use crate::core::{Guard, GuardError, GuardResult, State, Subject, Transition};
pub use crate::machine::{Machine, MachineError};
pub use crate::ruleset::{Rejection, Ruleset, TransitionError};
