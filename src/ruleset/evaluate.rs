//! Concurrent guard evaluation.
//!
//! Every guard for the attempted transition runs on its own scoped thread.
//! Outcomes are funnelled through a channel so failures are collected in the
//! order the guards finish. Nothing is short-circuited: the call returns only
//! after every guard has reported, even when an early one already failed.

use super::error::{Rejection, TransitionError};
use super::Ruleset;
use crate::core::{Guard, State, Subject, Transition};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::thread;
use tracing::trace;

impl<S: Subject + Sync + ?Sized> Ruleset<S> {
    /// Decide whether `subject` may move from its current state to `goal`.
    ///
    /// Returns `Ok(())` when the transition is declared and every guard on it
    /// passes. Otherwise the [`Rejection`] holds either a single
    /// [`TransitionError::UnknownTransition`] (no guard ran) or one entry per
    /// failing guard, ordered by completion.
    ///
    /// Blocks until all guards have finished. A guard that never returns
    /// stalls the call.
    pub fn validate_transition(
        &self,
        subject: &S,
        goal: impl Into<State>,
    ) -> Result<(), Rejection> {
        let goal = goal.into();
        let attempt = Transition::new(subject.current_state(), goal.clone());

        let Some(guards) = self.guards(&attempt) else {
            trace!(transition = %attempt, "no rule for transition");
            return Err(Rejection::unknown(attempt));
        };

        trace!(transition = %attempt, guards = guards.len(), "evaluating guards");
        let errors = run_guards(guards, subject, &goal, &attempt);
        trace!(transition = %attempt, failures = errors.len(), "guards settled");

        match Rejection::from_errors(errors) {
            Some(rejection) => Err(rejection),
            None => Ok(()),
        }
    }

    /// Shorthand for `validate_transition(..).is_ok()`.
    pub fn is_valid_transition(&self, subject: &S, goal: impl Into<State>) -> bool {
        self.validate_transition(subject, goal).is_ok()
    }
}

fn run_guards<S: Sync + ?Sized>(
    guards: &[Guard<S>],
    subject: &S,
    goal: &State,
    attempt: &Transition,
) -> Vec<TransitionError> {
    if let [guard] = guards {
        return run_guard(guard, subject, goal, attempt)
            .err()
            .into_iter()
            .collect();
    }

    let (outcome_tx, outcome_rx) = crossbeam_channel::unbounded();
    thread::scope(|scope| {
        for guard in guards {
            let outcome_tx = outcome_tx.clone();
            scope.spawn(move || {
                // The receiver is alive until the scope ends, so this cannot fail.
                let _ = outcome_tx.send(run_guard(guard, subject, goal, attempt));
            });
        }
        drop(outcome_tx);

        outcome_rx.iter().filter_map(Result::err).collect()
    })
}

fn run_guard<S: ?Sized>(
    guard: &Guard<S>,
    subject: &S,
    goal: &State,
    attempt: &Transition,
) -> Result<(), TransitionError> {
    match panic::catch_unwind(AssertUnwindSafe(|| guard.check(subject, goal))) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(reason)) => Err(TransitionError::GuardRejected {
            transition: attempt.clone(),
            reason,
        }),
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            trace!(transition = %attempt, %message, "guard panicked");
            Err(TransitionError::GuardPanicked {
                transition: attempt.clone(),
                message,
            })
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "guard panicked with a non-string payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GuardError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Barrier};
    use std::time::{Duration, Instant};

    #[derive(Clone, Default)]
    struct Thing {
        state: State,
    }

    impl Thing {
        fn at(state: &'static str) -> Self {
            Thing {
                state: State::new(state),
            }
        }
    }

    impl Subject for Thing {
        fn current_state(&self) -> State {
            self.state.clone()
        }

        fn set_state(&mut self, state: State) {
            self.state = state;
        }
    }

    fn workflow() -> Ruleset<Thing> {
        Ruleset::from_transitions([("pending", "started"), ("started", "finished")])
    }

    #[test]
    fn default_guards_follow_the_declared_edges() {
        let rules = workflow();

        let cases = [
            ("", "started", false),
            ("", "pending", false),
            ("", "finished", false),
            ("pending", "started", true),
            ("pending", "pending", false),
            ("pending", "finished", false),
            ("started", "started", false),
            ("started", "pending", false),
            ("started", "finished", true),
        ];

        for (origin, goal, valid) in cases {
            let result = rules.validate_transition(&Thing::at(origin), goal);
            assert_eq!(result.is_ok(), valid, "{origin} -> {goal}");
            if let Err(rejection) = result {
                assert_eq!(rejection.len(), 1);
                assert!(matches!(
                    &rejection[0],
                    TransitionError::UnknownTransition(t) if *t == Transition::new(origin, goal)
                ));
            }
        }
    }

    #[test]
    fn unknown_transition_runs_no_guards() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut rules = workflow();
        let counter = Arc::clone(&calls);
        rules.add_rule(("started", "finished"), move |_: &Thing, _: &State| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        let rejection = rules
            .validate_transition(&Thing::at("pending"), "finished")
            .unwrap_err();

        assert!(rejection.is_unknown_transition());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn slow_failure_is_waited_for() {
        let mut rules = workflow();
        rules.add_rule(("started", "finished"), |_: &Thing, _: &State| {
            thread::sleep(Duration::from_millis(200));
            Err(GuardError::new("error"))
        });
        rules.add_rule(("started", "finished"), |_: &Thing, _: &State| Ok(()));

        let rejection = rules
            .validate_transition(&Thing::at("started"), "finished")
            .unwrap_err();

        assert_eq!(rejection.len(), 1);
        assert!(matches!(
            &rejection[0],
            TransitionError::GuardRejected { reason, .. } if reason.message() == "error"
        ));
    }

    #[test]
    fn guards_run_concurrently() {
        // Each guard blocks until all three are running at once.
        let barrier = Arc::new(Barrier::new(3));
        let mut rules: Ruleset<Thing> = Ruleset::new();
        for _ in 0..3 {
            let barrier = Arc::clone(&barrier);
            rules.add_rule(("a", "b"), move |_: &Thing, _: &State| {
                barrier.wait();
                Ok(())
            });
        }

        assert!(rules.is_valid_transition(&Thing::at("a"), "b"));
    }

    #[test]
    fn failures_arrive_in_completion_order() {
        let mut rules: Ruleset<Thing> = Ruleset::from_transitions([("a", "b")]);
        rules.add_rule(("a", "b"), |_: &Thing, _: &State| {
            thread::sleep(Duration::from_millis(300));
            Err("slow".into())
        });
        rules.add_rule(("a", "b"), |_: &Thing, _: &State| Err("fast".into()));

        let rejection = rules.validate_transition(&Thing::at("a"), "b").unwrap_err();
        let reasons: Vec<String> = rejection
            .iter()
            .map(|e| match e {
                TransitionError::GuardRejected { reason, .. } => reason.message().to_string(),
                other => panic!("unexpected failure {other}"),
            })
            .collect();

        assert_eq!(reasons, vec!["fast", "slow"]);
    }

    #[test]
    fn total_latency_tracks_the_slowest_guard() {
        // Three quick guards meet at the barrier while the slow one sleeps,
        // so they can only finish if they all run alongside it.
        let barrier = Arc::new(Barrier::new(3));
        let mut rules: Ruleset<Thing> = Ruleset::new();
        rules.add_rule(("a", "b"), |_: &Thing, _: &State| {
            thread::sleep(Duration::from_millis(150));
            Ok(())
        });
        for _ in 0..3 {
            let barrier = Arc::clone(&barrier);
            rules.add_rule(("a", "b"), move |_: &Thing, _: &State| {
                barrier.wait();
                Ok(())
            });
        }

        let started = Instant::now();
        assert!(rules.is_valid_transition(&Thing::at("a"), "b"));

        assert!(started.elapsed() >= Duration::from_millis(150));
    }

    #[test]
    fn panicking_guard_is_reported_not_propagated() {
        let mut rules = workflow();
        rules.add_rule(("started", "finished"), |_: &Thing, _: &State| {
            panic!("guard blew up")
        });
        rules.add_rule(("started", "finished"), |_: &Thing, _: &State| {
            Err("plain denial".into())
        });

        let rejection = rules
            .validate_transition(&Thing::at("started"), "finished")
            .unwrap_err();

        assert_eq!(rejection.len(), 2);
        assert_eq!(rejection.iter().filter(|e| e.is_guard_rejection()).count(), 1);
        let panicked = rejection.iter().find(|e| e.is_guard_panic()).unwrap();
        assert!(panicked.to_string().contains("guard blew up"));
    }

    #[test]
    fn lone_guard_panic_is_contained() {
        let mut rules: Ruleset<Thing> = Ruleset::new();
        rules.add_rule(("a", "b"), |_: &Thing, _: &State| {
            panic!("{}", String::from("owned payload"))
        });

        let rejection = rules.validate_transition(&Thing::at("a"), "b").unwrap_err();
        assert!(matches!(
            &rejection[0],
            TransitionError::GuardPanicked { message, .. } if message == "owned payload"
        ));
    }

    #[test]
    fn guards_receive_the_goal_state() {
        let mut rules: Ruleset<Thing> = Ruleset::from_transitions([("a", "b")]);
        rules.add_rule(("a", "b"), |_: &Thing, goal: &State| {
            if goal == "b" {
                Ok(())
            } else {
                Err(format!("unexpected goal {goal}").into())
            }
        });

        assert!(rules.is_valid_transition(&Thing::at("a"), "b"));
    }

    #[test]
    fn dyn_subjects_can_be_evaluated() {
        let rules: Ruleset<dyn Subject + Sync> = Ruleset::from_transitions([("a", "b")]);
        let thing = Thing::at("a");

        assert!(rules.is_valid_transition(&thing, "b"));
        assert!(!rules.is_valid_transition(&thing, "c"));
    }
}
