//! Guarded mutation of a single subject.
//!
//! A [`Machine`] borrows one [`Ruleset`] and one subject and performs
//! transitions on that subject only after the ruleset approves them. It keeps
//! no state of its own: each call to [`Machine::transition`] is an
//! independent decide-then-mutate step.

mod error;

pub use error::MachineError;

use crate::core::{State, Subject};
use crate::ruleset::Ruleset;
use std::fmt;
use tracing::trace;

/// Pairing of a ruleset and a subject.
///
/// Either half can be bound at construction or later, and replaced at any
/// time between transitions.
///
/// # Example
///
/// ```rust
/// use stategate::{Machine, Ruleset, State, Subject};
///
/// #[derive(Default)]
/// struct Task {
///     state: State,
/// }
///
/// impl Subject for Task {
///     fn current_state(&self) -> State { self.state.clone() }
///     fn set_state(&mut self, state: State) { self.state = state; }
/// }
///
/// let rules = Ruleset::from_transitions([("pending", "started"), ("started", "finished")]);
/// let mut task = Task { state: State::new("pending") };
///
/// let mut machine = Machine::new().with_rules(&rules).with_subject(&mut task);
/// assert!(machine.transition("finished").is_err());
/// machine.transition("started").unwrap();
/// machine.transition("finished").unwrap();
///
/// assert_eq!(task.state, "finished");
/// ```
pub struct Machine<'a, S: ?Sized> {
    rules: Option<&'a Ruleset<S>>,
    subject: Option<&'a mut S>,
}

impl<'a, S: ?Sized> Machine<'a, S> {
    /// A machine with nothing bound yet.
    pub fn new() -> Self {
        Machine {
            rules: None,
            subject: None,
        }
    }

    pub fn with_rules(mut self, rules: &'a Ruleset<S>) -> Self {
        self.rules = Some(rules);
        self
    }

    pub fn with_subject(mut self, subject: &'a mut S) -> Self {
        self.subject = Some(subject);
        self
    }

    /// Bind `rules`, returning the ruleset previously bound.
    pub fn set_rules(&mut self, rules: &'a Ruleset<S>) -> Option<&'a Ruleset<S>> {
        self.rules.replace(rules)
    }

    /// Bind `subject`, handing back the subject previously bound.
    pub fn set_subject(&mut self, subject: &'a mut S) -> Option<&'a mut S> {
        self.subject.replace(subject)
    }

    pub fn rules(&self) -> Option<&'a Ruleset<S>> {
        self.rules
    }

    pub fn subject(&self) -> Option<&S> {
        self.subject.as_deref()
    }

    pub fn subject_mut(&mut self) -> Option<&mut S> {
        self.subject.as_deref_mut()
    }
}

impl<S: Subject + ?Sized> Machine<'_, S> {
    /// Current state of the bound subject.
    pub fn current_state(&self) -> Option<State> {
        self.subject().map(Subject::current_state)
    }
}

impl<S: Subject + Sync + ?Sized> Machine<'_, S> {
    /// Move the bound subject to `goal` if the bound ruleset allows it.
    ///
    /// The subject's state is written only after every guard has passed. On
    /// any failure it is left exactly as it was and the ruleset's
    /// [`Rejection`](crate::Rejection) is returned unchanged inside
    /// [`MachineError::Rejected`].
    pub fn transition(&mut self, goal: impl Into<State>) -> Result<(), MachineError> {
        let rules = self.rules.ok_or(MachineError::MissingRuleset)?;
        let subject = self
            .subject
            .as_deref_mut()
            .ok_or(MachineError::MissingSubject)?;
        let goal = goal.into();

        rules.validate_transition(subject, goal.clone())?;

        trace!(to = %goal, "applying transition");
        subject.set_state(goal);
        Ok(())
    }
}

impl<S: ?Sized> Default for Machine<'_, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ?Sized> fmt::Debug for Machine<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("rules", &self.rules)
            .field("subject_bound", &self.subject.is_some())
            .finish()
    }
}
