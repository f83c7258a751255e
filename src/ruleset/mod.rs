//! The rule table: which transitions exist and which guards protect them.
//!
//! A [`Ruleset`] maps each declared [`Transition`] to the guards that must
//! all pass before a subject may take it. A transition with no entry is not a
//! legal transition at all; that is reported differently from a declared
//! transition whose guards refuse it (see [`TransitionError`]).
//!
//! # Example
//!
//! ```rust
//! use stategate::{GuardError, Ruleset, State, Subject, Transition};
//!
//! struct Job {
//!     state: State,
//!     approved: bool,
//! }
//!
//! impl Subject for Job {
//!     fn current_state(&self) -> State { self.state.clone() }
//!     fn set_state(&mut self, state: State) { self.state = state; }
//! }
//!
//! let mut rules = Ruleset::from_transitions([
//!     ("pending", "started"),
//!     ("started", "finished"),
//! ]);
//! rules.add_rule(("pending", "started"), |job: &Job, _goal: &State| {
//!     if job.approved { Ok(()) } else { Err(GuardError::new("job not approved")) }
//! });
//!
//! let job = Job { state: State::new("pending"), approved: false };
//! let rejection = rules.validate_transition(&job, "started").unwrap_err();
//! assert_eq!(rejection.len(), 1);
//! assert!(rejection[0].is_guard_rejection());
//! ```

mod error;
mod evaluate;

pub use error::{Rejection, TransitionError};

use crate::core::{Guard, GuardResult, State, Subject, Transition};
use std::collections::HashMap;
use std::fmt;

/// Table of known transitions and the guards attached to each.
///
/// Registration takes `&mut self` and evaluation takes `&self`, so the table
/// cannot change while an evaluation against it is running.
pub struct Ruleset<S: ?Sized> {
    rules: HashMap<Transition, Vec<Guard<S>>>,
}

impl<S: ?Sized> Ruleset<S> {
    /// An empty table. Every transition is unknown until declared.
    pub fn new() -> Self {
        Ruleset {
            rules: HashMap::new(),
        }
    }

    /// Append `guard` to the guards of `transition`.
    ///
    /// If the transition has no entry yet, one is created holding only this
    /// guard; no default origin guard is added for it. Use
    /// [`add_transition`](Ruleset::add_transition) first, or build through
    /// [`RulesetBuilder::strict`](crate::RulesetBuilder::strict), when that
    /// matters.
    pub fn add_guard(&mut self, transition: impl Into<Transition>, guard: Guard<S>) {
        self.rules.entry(transition.into()).or_default().push(guard);
    }

    /// Append every guard in `guards` to `transition`.
    ///
    /// An empty `guards` leaves the table untouched; a transition never gets
    /// an entry without at least one guard.
    pub fn add_guards<I>(&mut self, transition: impl Into<Transition>, guards: I)
    where
        I: IntoIterator<Item = Guard<S>>,
    {
        let mut guards = guards.into_iter().peekable();
        if guards.peek().is_none() {
            return;
        }
        self.rules
            .entry(transition.into())
            .or_default()
            .extend(guards);
    }

    /// Wrap `predicate` in a [`Guard`] and append it to `transition`.
    pub fn add_rule<F>(&mut self, transition: impl Into<Transition>, predicate: F)
    where
        F: Fn(&S, &State) -> GuardResult + Send + Sync + 'static,
    {
        self.add_guard(transition, Guard::new(predicate));
    }

    pub fn contains(&self, transition: &Transition) -> bool {
        self.rules.contains_key(transition)
    }

    /// Number of guards registered on `transition`, 0 when it is unknown.
    pub fn guard_count(&self, transition: &Transition) -> usize {
        self.rules.get(transition).map_or(0, Vec::len)
    }

    /// Guards registered on `transition`, in registration order.
    pub fn guards(&self, transition: &Transition) -> Option<&[Guard<S>]> {
        self.rules.get(transition).map(Vec::as_slice)
    }

    /// Every declared transition, in no particular order.
    pub fn transitions(&self) -> impl Iterator<Item = &Transition> + '_ {
        self.rules.keys()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<S: Subject + ?Sized> Ruleset<S> {
    /// Build a table where each transition carries exactly the default
    /// origin guard.
    pub fn from_transitions<I, T>(transitions: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Transition>,
    {
        let mut rules = Ruleset::new();
        for transition in transitions {
            rules.add_transition(transition);
        }
        rules
    }

    /// Declare `transition` by appending the default guard, which passes only
    /// while the subject is in the transition's origin.
    ///
    /// Declaring the same transition twice appends a second copy of the
    /// default guard. Registration is additive, never deduplicated.
    pub fn add_transition(&mut self, transition: impl Into<Transition>) {
        let transition = transition.into();
        let guard = Guard::from_origin(transition.origin().clone());
        self.add_guard(transition, guard);
    }
}

impl<S: ?Sized> Default for Ruleset<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ?Sized> Clone for Ruleset<S> {
    fn clone(&self) -> Self {
        Ruleset {
            rules: self.rules.clone(),
        }
    }
}

impl<S: ?Sized> fmt::Debug for Ruleset<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.rules
                    .iter()
                    .map(|(transition, guards)| (transition.to_string(), guards.len())),
            )
            .finish()
    }
}

impl<S: Subject + ?Sized, T: Into<Transition>> FromIterator<T> for Ruleset<S> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Ruleset::from_transitions(iter)
    }
}

impl<S: Subject + ?Sized, T: Into<Transition>> Extend<T> for Ruleset<S> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for transition in iter {
            self.add_transition(transition);
        }
    }
}
