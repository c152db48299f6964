//! Handler dispatch on outcomes.
//!
//! Every dispatch method runs its handler synchronously, at most once, and
//! returns the receiver so calls can be chained on the same outcome:
//!
//! ```rust
//! use outcome_core::{ErrorClass, ErrorValue, Outcome};
//!
//! let outcome = Outcome::fail(ErrorValue::divide_by_zero("divided by 0")).unwrap();
//! outcome
//!     .on_success(|_| unreachable!())
//!     .on(ErrorClass::Arithmetic, |_, message, _| {
//!         assert_eq!(message, Some("divided by 0"));
//!     })
//!     .on(ErrorClass::Argument, |_, _, _| unreachable!());
//! ```

use tracing::trace;

use super::event::Event;
use crate::foundation::identity::ErrorIdentity;
use crate::foundation::outcome::Outcome;
use crate::foundation::payload::Payload;

impl Outcome {
    /// Returns `true` if `event` selects this outcome.
    pub fn matches(&self, event: &Event) -> bool {
        match self {
            Self::Succeeded(_) => event.matches_success(),
            Self::Failed(failure) => event.matches_failure(failure.error()),
        }
    }

    /// Calls `handler` with the payload if this outcome succeeded.
    pub fn on_success<F>(&self, handler: F) -> &Self
    where
        F: FnOnce(Option<&Payload>),
    {
        if let Self::Succeeded(success) = self {
            trace!(event = "success", "Dispatching success handler");
            handler(success.payload());
        }
        self
    }

    /// Calls `handler` with the identity, message and payload if this
    /// outcome failed.
    pub fn on_failure<F>(&self, handler: F) -> &Self
    where
        F: FnOnce(Option<&ErrorIdentity>, Option<&str>, Option<&Payload>),
    {
        if let Self::Failed(failure) = self {
            trace!(event = "failure", "Dispatching failure handler");
            handler(failure.error(), failure.message(), failure.payload());
        }
        self
    }

    /// Calls `handler` if `event` selects this outcome.
    ///
    /// A failure passes its identity, message and payload. A success can
    /// only be selected by `"success"` and passes its payload alone.
    pub fn on<E, F>(&self, event: E, handler: F) -> &Self
    where
        E: Into<Event>,
        F: FnOnce(Option<&ErrorIdentity>, Option<&str>, Option<&Payload>),
    {
        let event = event.into();
        if !self.matches(&event) {
            trace!(%event, "Event did not match, skipping handler");
            return self;
        }

        trace!(%event, "Event matched, dispatching handler");
        match self {
            Self::Succeeded(success) => handler(None, None, success.payload()),
            Self::Failed(failure) => handler(failure.error(), failure.message(), failure.payload()),
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::error::{ErrorClass, ErrorValue};
    use std::cell::Cell;

    #[test]
    fn test_on_success_runs_only_on_success() {
        let run_success = Cell::new(0);
        let run_error = Cell::new(0);

        Outcome::succeeded(1_i32).on_success(|payload| {
            assert_eq!(payload.and_then(Payload::downcast_ref::<i32>), Some(&1));
            run_success.set(run_success.get() + 1);
        });
        Outcome::failure().on_success(|_| run_error.set(run_error.get() + 1));

        assert_eq!(run_success.get(), 1);
        assert_eq!(run_error.get(), 0);
    }

    #[test]
    fn test_on_failure_runs_only_on_failure() {
        let run_success = Cell::new(false);
        let run_error = Cell::new(false);

        Outcome::succeeded(1_i32).on_failure(|_, _, _| run_success.set(true));
        Outcome::failure().on_failure(|error, message, payload| {
            assert!(error.is_none());
            assert!(message.is_none());
            assert!(payload.is_none());
            run_error.set(true);
        });

        assert!(!run_success.get());
        assert!(run_error.get());
    }

    #[test]
    fn test_hooks_chain_on_same_outcome() {
        let calls = Cell::new(0);
        Outcome::success()
            .on_success(|_| calls.set(calls.get() + 1))
            .on_failure(|_, _, _| calls.set(calls.get() + 10))
            .on_success(|_| calls.set(calls.get() + 1));
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_on_matches_keyword_and_symbol() {
        let (h1, h2, h3) = (Cell::new(false), Cell::new(false), Cell::new(false));

        Outcome::fail("e1")
            .unwrap()
            .on("failure", |_, _, _| h1.set(true))
            .on("e1", |_, _, _| h2.set(true))
            .on("e2", |_, _, _| h3.set(true));

        assert!(h1.get());
        assert!(h2.get());
        assert!(!h3.get());
    }

    #[test]
    fn test_on_matches_class_hierarchy() {
        let (h1, h2, h3) = (Cell::new(false), Cell::new(false), Cell::new(false));

        Outcome::fail(ErrorValue::divide_by_zero("divided by 0"))
            .unwrap()
            .on(ErrorClass::DivideByZero, |_, _, _| h1.set(true))
            .on(ErrorClass::Argument, |_, _, _| h2.set(true))
            .on(ErrorClass::Standard, |_, _, _| h3.set(true));

        assert!(h1.get());
        assert!(!h2.get());
        assert!(h3.get());
    }

    #[test]
    fn test_success_ignores_failure_events() {
        let calls = Cell::new(0);
        Outcome::success()
            .on("failure", |_, _, _| calls.set(calls.get() + 1))
            .on("e1", |_, _, _| calls.set(calls.get() + 1))
            .on(ErrorClass::Standard, |_, _, _| calls.set(calls.get() + 1));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_failure_ignores_success_event() {
        let calls = Cell::new(0);
        let outcome = Outcome::fail("e1").unwrap();
        outcome
            .on("success", |_, _, _| calls.set(calls.get() + 1))
            .on_success(|_| calls.set(calls.get() + 1));
        assert_eq!(calls.get(), 0);
        assert!(!outcome.matches(&Event::Success));
    }

    #[test]
    fn test_success_event_passes_payload() {
        let calls = Cell::new(0);
        Outcome::succeeded(String::from("data")).on("success", |error, message, payload| {
            assert!(error.is_none());
            assert!(message.is_none());
            assert_eq!(
                payload.and_then(Payload::downcast_ref::<String>).map(String::as_str),
                Some("data")
            );
            calls.set(calls.get() + 1);
        });
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_handler_receives_failure_triple() {
        let seen = Cell::new(false);
        Outcome::failed(
            Some(ErrorIdentity::from("e1")),
            Some("went wrong".to_string()),
            Some(Payload::new(vec![1_u8, 2, 3])),
        )
        .unwrap()
        .on("e1", |error, message, payload| {
            assert_eq!(error, Some(&ErrorIdentity::from("e1")));
            assert_eq!(message, Some("went wrong"));
            assert_eq!(payload.and_then(Payload::downcast_ref::<Vec<u8>>), Some(&vec![1, 2, 3]));
            seen.set(true);
        });
        assert!(seen.get());
    }
}
