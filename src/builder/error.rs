//! Build errors for the ruleset builder.

use crate::core::Transition;
use thiserror::Error;

/// Errors that can occur when building a ruleset.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Guard attached to undeclared transition {0}. Declare it with .transition() first")]
    UndeclaredTransition(Transition),
}
