//! Builder API for ergonomic ruleset construction.
//!
//! [`RulesetBuilder`] collects declared transitions and extra guards and
//! produces a [`Ruleset`] in one go. In strict mode it refuses guards for
//! transitions that were never declared, so every entry of the resulting
//! table carries the default origin guard.

pub mod error;
pub mod macros;

pub use error::BuildError;

use crate::core::{Guard, GuardResult, State, Subject, Transition};
use crate::ruleset::Ruleset;
use std::collections::HashSet;

/// Fluent builder for [`Ruleset`].
///
/// # Example
///
/// ```
/// use stategate::{BuildError, GuardError, RulesetBuilder, State, Subject};
///
/// struct Ticket {
///     state: State,
///     assignee: Option<String>,
/// }
///
/// impl Subject for Ticket {
///     fn current_state(&self) -> State { self.state.clone() }
///     fn set_state(&mut self, state: State) { self.state = state; }
/// }
///
/// let rules = RulesetBuilder::new()
///     .strict()
///     .transition(("open", "in_progress"))
///     .transition(("in_progress", "done"))
///     .rule(("open", "in_progress"), |ticket: &Ticket, _: &State| {
///         match ticket.assignee {
///             Some(_) => Ok(()),
///             None => Err(GuardError::new("ticket is unassigned")),
///         }
///     })
///     .build()
///     .unwrap();
///
/// let ticket = Ticket { state: State::new("open"), assignee: None };
/// assert!(!rules.is_valid_transition(&ticket, "in_progress"));
///
/// let undeclared = RulesetBuilder::<Ticket>::new()
///     .strict()
///     .rule(("done", "open"), |_: &Ticket, _: &State| Ok(()))
///     .build();
/// assert!(matches!(undeclared, Err(BuildError::UndeclaredTransition(_))));
/// ```
pub struct RulesetBuilder<S: ?Sized> {
    transitions: Vec<Transition>,
    guards: Vec<(Transition, Guard<S>)>,
    strict: bool,
}

impl<S: Subject + ?Sized> RulesetBuilder<S> {
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
            guards: Vec::new(),
            strict: false,
        }
    }

    /// Reject guards whose transition was not declared with
    /// [`transition`](Self::transition) or [`transitions`](Self::transitions).
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Declare a transition with the default origin guard.
    pub fn transition(mut self, transition: impl Into<Transition>) -> Self {
        self.transitions.push(transition.into());
        self
    }

    /// Declare several transitions at once.
    pub fn transitions<I, T>(mut self, transitions: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Transition>,
    {
        self.transitions
            .extend(transitions.into_iter().map(Into::into));
        self
    }

    /// Attach an extra guard to `transition`.
    pub fn guard(mut self, transition: impl Into<Transition>, guard: Guard<S>) -> Self {
        self.guards.push((transition.into(), guard));
        self
    }

    /// Attach a closure as an extra guard to `transition`.
    pub fn rule<F>(self, transition: impl Into<Transition>, predicate: F) -> Self
    where
        F: Fn(&S, &State) -> GuardResult + Send + Sync + 'static,
    {
        self.guard(transition, Guard::new(predicate))
    }

    /// Build the ruleset.
    /// Returns an error in strict mode if a guard names an undeclared transition.
    pub fn build(self) -> Result<Ruleset<S>, BuildError> {
        if self.strict {
            let declared: HashSet<&Transition> = self.transitions.iter().collect();
            if let Some((transition, _)) = self
                .guards
                .iter()
                .find(|(transition, _)| !declared.contains(transition))
            {
                return Err(BuildError::UndeclaredTransition(transition.clone()));
            }
        }

        let mut rules = Ruleset::from_transitions(self.transitions);
        for (transition, guard) in self.guards {
            rules.add_guard(transition, guard);
        }
        Ok(rules)
    }
}

impl<S: Subject + ?Sized> Default for RulesetBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}
