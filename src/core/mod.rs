//! Value types the rule engine is built from.
//!
//! - [`State`] names and the [`Subject`] capability trait
//! - [`Transition`] edges used as rule table keys
//! - [`Guard`] predicates and the [`GuardError`] they report

mod guard;
mod state;
mod transition;

pub use guard::{Guard, GuardError, GuardResult};
pub use state::{State, Subject};
pub use transition::Transition;
