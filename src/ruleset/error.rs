//! Failures produced while evaluating a transition.

use crate::core::{GuardError, Transition};
use std::fmt;
use std::ops::Index;
use thiserror::Error;

/// A single reason a transition was refused.
#[derive(Clone, Debug, Error)]
pub enum TransitionError {
    /// No rule exists for this origin/exit pair. No guard was run.
    #[error("no transition from '{}' to '{}'", .0.origin(), .0.exit())]
    UnknownTransition(Transition),

    /// A guard registered on the transition denied it.
    #[error("guard rejected transition {transition}: {reason}")]
    GuardRejected {
        transition: Transition,
        #[source]
        reason: GuardError,
    },

    /// A guard panicked while running. The panic was contained to that guard.
    #[error("guard panicked during transition {transition}: {message}")]
    GuardPanicked {
        transition: Transition,
        message: String,
    },
}

impl TransitionError {
    /// The transition that was being attempted.
    pub fn transition(&self) -> &Transition {
        match self {
            Self::UnknownTransition(transition)
            | Self::GuardRejected { transition, .. }
            | Self::GuardPanicked { transition, .. } => transition,
        }
    }

    pub fn is_unknown_transition(&self) -> bool {
        matches!(self, Self::UnknownTransition(_))
    }

    pub fn is_guard_rejection(&self) -> bool {
        matches!(self, Self::GuardRejected { .. })
    }

    pub fn is_guard_panic(&self) -> bool {
        matches!(self, Self::GuardPanicked { .. })
    }
}

/// Every failure collected for one refused transition.
///
/// Never empty. Failures appear in the order the guards finished, which is
/// not the order they were registered in.
#[derive(Clone, Debug)]
pub struct Rejection {
    errors: Vec<TransitionError>,
}

impl Rejection {
    /// Returns `None` when there is nothing to reject with.
    pub(crate) fn from_errors(errors: Vec<TransitionError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Rejection { errors })
        }
    }

    pub(crate) fn unknown(transition: Transition) -> Self {
        Rejection {
            errors: vec![TransitionError::UnknownTransition(transition)],
        }
    }

    pub fn errors(&self) -> &[TransitionError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<TransitionError> {
        self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Always false for a rejection returned by evaluation.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TransitionError> {
        self.errors.iter()
    }

    /// True when the transition is not declared at all, as opposed to
    /// declared but denied by its guards.
    pub fn is_unknown_transition(&self) -> bool {
        self.errors.iter().any(TransitionError::is_unknown_transition)
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.as_slice() {
            [only] => write!(f, "transition rejected: {only}"),
            errors => {
                write!(f, "transition rejected with {} failures", errors.len())?;
                for error in errors {
                    write!(f, "; {error}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for Rejection {}

impl Index<usize> for Rejection {
    type Output = TransitionError;

    fn index(&self, index: usize) -> &Self::Output {
        &self.errors[index]
    }
}

impl IntoIterator for Rejection {
    type Item = TransitionError;
    type IntoIter = std::vec::IntoIter<TransitionError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a Rejection {
    type Item = &'a TransitionError;
    type IntoIter = std::slice::Iter<'a, TransitionError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}
