//! Directed edges between states.

use super::state::State;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A directed edge from an origin state to an exit state.
///
/// Transitions are plain values: two transitions built independently from the
/// same pair of names are equal and hash identically, which is what makes them
/// usable as the key of a [`Ruleset`](crate::Ruleset).
///
/// # Example
///
/// ```rust
/// use stategate::Transition;
///
/// let a = Transition::new("pending", "started");
/// let b: Transition = ("pending", "started").into();
///
/// assert_eq!(a, b);
/// assert_eq!(a.origin(), "pending");
/// assert_eq!(a.exit(), "started");
/// assert_eq!(a.to_string(), "pending -> started");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transition {
    origin: State,
    exit: State,
}

impl Transition {
    pub fn new(origin: impl Into<State>, exit: impl Into<State>) -> Self {
        Self {
            origin: origin.into(),
            exit: exit.into(),
        }
    }

    /// The state a subject must be in for this transition to apply.
    pub fn origin(&self) -> &State {
        &self.origin
    }

    /// The state a subject ends up in once the transition is performed.
    pub fn exit(&self) -> &State {
        &self.exit
    }
}

impl<O: Into<State>, E: Into<State>> From<(O, E)> for Transition {
    fn from((origin, exit): (O, E)) -> Self {
        Transition::new(origin, exit)
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.origin, self.exit)
    }
}
