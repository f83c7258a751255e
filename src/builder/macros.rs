//! Macros for ergonomic ruleset construction.

/// Build a [`Ruleset`](crate::Ruleset) from `origin => exit` pairs.
///
/// Each pair is declared with the default origin guard, exactly as
/// [`Ruleset::from_transitions`](crate::Ruleset::from_transitions) does.
///
/// # Example
///
/// ```
/// use stategate::{ruleset, Ruleset, State, Subject, Transition};
///
/// struct Door {
///     state: State,
/// }
///
/// impl Subject for Door {
///     fn current_state(&self) -> State { self.state.clone() }
///     fn set_state(&mut self, state: State) { self.state = state; }
/// }
///
/// let rules: Ruleset<Door> = ruleset! {
///     "closed" => "open",
///     "open" => "closed",
///     "closed" => "locked",
/// };
///
/// assert_eq!(rules.len(), 3);
/// assert!(rules.contains(&Transition::new("closed", "locked")));
/// ```
#[macro_export]
macro_rules! ruleset {
    () => {
        $crate::Ruleset::new()
    };
    ($($origin:expr => $exit:expr),+ $(,)?) => {
        $crate::Ruleset::from_transitions([
            $($crate::Transition::new($origin, $exit)),+
        ])
    };
}
