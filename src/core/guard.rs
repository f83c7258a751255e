//! Guard predicates for controlling state transitions.
//!
//! A guard looks at a subject and the state it is about to move into and
//! either lets the transition through or explains why it may not happen.
//! Guards for the same transition run concurrently, so they must be
//! `Send + Sync` and must not rely on running in any particular order.

use super::state::{State, Subject};
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// What a guard returns when it denies a transition.
///
/// Carries a message and, optionally, the error that caused the denial.
///
/// # Example
///
/// ```rust
/// use stategate::GuardError;
///
/// let denied = GuardError::new("order has no items");
/// assert_eq!(denied.to_string(), "order has no items");
///
/// let io = std::io::Error::new(std::io::ErrorKind::Other, "inventory offline");
/// let denied = GuardError::with_source("stock check failed", io);
/// assert!(std::error::Error::source(&denied).is_some());
/// ```
#[derive(Clone, Debug, Error)]
#[error("{message}")]
pub struct GuardError {
    message: String,
    #[source]
    source: Option<Arc<dyn StdError + Send + Sync + 'static>>,
}

impl GuardError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Denial caused by another error, kept as the `source()` of this one.
    pub fn with_source<E>(message: impl Into<String>, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self {
            message: message.into(),
            source: Some(Arc::new(source)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<&str> for GuardError {
    fn from(message: &str) -> Self {
        GuardError::new(message)
    }
}

impl From<String> for GuardError {
    fn from(message: String) -> Self {
        GuardError::new(message)
    }
}

/// Outcome of a single guard.
pub type GuardResult = Result<(), GuardError>;

/// Predicate bound to one transition of a [`Ruleset`](crate::Ruleset).
///
/// Guards receive the subject being evaluated and the goal state. They are
/// cheap to clone; clones share the same predicate.
///
/// # Example
///
/// ```rust
/// use stategate::{Guard, GuardError, State, Subject};
///
/// struct Order {
///     state: State,
///     items: usize,
/// }
///
/// impl Subject for Order {
///     fn current_state(&self) -> State { self.state.clone() }
///     fn set_state(&mut self, state: State) { self.state = state; }
/// }
///
/// let has_items = Guard::new(|order: &Order, _goal: &State| {
///     if order.items == 0 {
///         return Err(GuardError::new("order has no items"));
///     }
///     Ok(())
/// });
///
/// let empty = Order { state: State::new("cart"), items: 0 };
/// assert!(has_items.check(&empty, &State::new("placed")).is_err());
/// ```
pub struct Guard<S: ?Sized> {
    predicate: Arc<dyn Fn(&S, &State) -> GuardResult + Send + Sync>,
}

impl<S: ?Sized> Guard<S> {
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&S, &State) -> GuardResult + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    /// Run the predicate against `subject` for a move into `goal`.
    pub fn check(&self, subject: &S, goal: &State) -> GuardResult {
        (self.predicate)(subject, goal)
    }
}

impl<S: Subject + ?Sized> Guard<S> {
    /// The guard every declared transition starts with: it passes only while
    /// the subject is still in `origin`.
    pub fn from_origin(origin: State) -> Self {
        Guard::new(move |subject: &S, _goal: &State| {
            let current = subject.current_state();
            if current == origin {
                Ok(())
            } else {
                Err(GuardError::new(format!(
                    "subject is in '{current}' but the transition starts from '{origin}'"
                )))
            }
        })
    }
}

impl<S: ?Sized> Clone for Guard<S> {
    fn clone(&self) -> Self {
        Guard {
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<S: ?Sized> fmt::Debug for Guard<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}
