//! State names and the subject capability trait.
//!
//! A [`State`] is an opaque name. The engine only ever compares states for
//! equality; it never orders them or interprets their contents.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// A named condition a subject may occupy.
///
/// The empty state (`State::default()`) is what an uninitialised subject
/// reports. The engine gives it no special meaning: callers are expected to
/// put their subjects into a real state before the first transition.
///
/// # Example
///
/// ```rust
/// use stategate::State;
///
/// let pending = State::new("pending");
/// assert_eq!(pending, "pending");
/// assert_eq!(pending, State::from(String::from("pending")));
/// assert!(State::default().is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct State(Cow<'static, str>);

impl State {
    /// Create a state from any string-like name.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        State(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the zero state an uninitialised subject reports.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for State {
    fn from(name: &'static str) -> Self {
        State(Cow::Borrowed(name))
    }
}

impl From<String> for State {
    fn from(name: String) -> Self {
        State(Cow::Owned(name))
    }
}

impl AsRef<str> for State {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for State {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for State {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// Capability an object must provide to be evaluated against a ruleset.
///
/// Implementors own their state; the engine only reads it through
/// [`current_state`](Subject::current_state) and writes it through
/// [`set_state`](Subject::set_state) after a transition has been approved.
///
/// # Example
///
/// ```rust
/// use stategate::{State, Subject};
///
/// struct Order {
///     state: State,
/// }
///
/// impl Subject for Order {
///     fn current_state(&self) -> State {
///         self.state.clone()
///     }
///
///     fn set_state(&mut self, state: State) {
///         self.state = state;
///     }
/// }
/// ```
pub trait Subject {
    /// The state the subject is in right now.
    fn current_state(&self) -> State;

    /// Move the subject into `state`.
    fn set_state(&mut self, state: State);
}

impl<T: Subject + ?Sized> Subject for &mut T {
    fn current_state(&self) -> State {
        (**self).current_state()
    }

    fn set_state(&mut self, state: State) {
        (**self).set_state(state)
    }
}

impl<T: Subject + ?Sized> Subject for Box<T> {
    fn current_state(&self) -> State {
        (**self).current_state()
    }

    fn set_state(&mut self, state: State) {
        (**self).set_state(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Thing {
        state: State,
    }

    impl Subject for Thing {
        fn current_state(&self) -> State {
            self.state.clone()
        }

        fn set_state(&mut self, state: State) {
            self.state = state;
        }
    }

    #[test]
    fn borrowed_and_owned_names_are_equal() {
        let borrowed = State::from("pending");
        let owned = State::from("pending".to_string());

        assert_eq!(borrowed, owned);
        assert_ne!(borrowed, State::new("started"));
    }

    #[test]
    fn default_state_is_empty() {
        assert!(State::default().is_empty());
        assert!(!State::new("pending").is_empty());
    }

    #[test]
    fn state_compares_with_str() {
        let state = State::new("started");
        assert_eq!(state, "started");
        assert!(state != "finished");
    }

    #[test]
    fn state_serializes_as_bare_string() {
        let json = serde_json::to_string(&State::new("finished")).unwrap();
        assert_eq!(json, "\"finished\"");

        let state: State = serde_json::from_str(&json).unwrap();
        assert_eq!(state, "finished");
    }

    fn advance<S: Subject>(mut subject: S, to: &'static str) -> State {
        subject.set_state(State::new(to));
        subject.current_state()
    }

    #[test]
    fn subject_is_usable_through_references_and_boxes() {
        let mut thing = Thing::default();
        assert_eq!(advance(&mut thing, "started"), "started");
        assert_eq!(thing.current_state(), "started");

        let mut boxed: Box<dyn Subject> = Box::new(Thing::default());
        boxed.set_state(State::new("finished"));
        assert_eq!(boxed.current_state(), "finished");
    }
}
