//! Errors returned by [`Machine::transition`](super::Machine::transition).

use crate::ruleset::Rejection;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MachineError {
    #[error("Ruleset not bound. Call .with_rules(rules) before transitioning")]
    MissingRuleset,

    #[error("Subject not bound. Call .with_subject(subject) before transitioning")]
    MissingSubject,

    /// The ruleset refused the transition; the subject was left untouched.
    #[error(transparent)]
    Rejected(#[from] Rejection),
}

impl MachineError {
    /// The rejection, when the failure came from evaluating the ruleset.
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Rejected(rejection) => Some(rejection),
            _ => None,
        }
    }
}
