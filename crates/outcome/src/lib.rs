//! # Outcome
//!
//! Success and failure as plain values.
//!
//! ## Overview
//!
//! An [`Outcome`](prelude::Outcome) is either `Succeeded`, carrying an
//! optional payload, or `Failed`, carrying an optional error identity,
//! message and payload. Steps are sequenced with `and_then`, which stops at
//! the first failure, and results are consumed by dispatching handlers:
//!
//! ```text
//! callback ──▶ adapter ("exception") ──▶ Outcome ──▶ and_then ──▶ on_success / on_failure / on(event)
//! ```
//!
//! - **Core**: the outcome types, dispatch and the adapter registry
//! - **Runtime**: configuration, logging and a process-wide registry
//!
//! ## Quick Start
//!
//! ```rust
//! use outcome::prelude::*;
//!
//! let outcome = OutcomeRuntime::global()
//!     .registry()
//!     .run("exception", || "42".parse::<i32>())
//!     .unwrap()
//!     .and_then(|payload| {
//!         let n = payload.as_ref().and_then(Payload::downcast_ref::<i32>).copied();
//!         match n {
//!             Some(n) if n > 0 => Outcome::succeeded(n * 2),
//!             _ => Outcome::fail("not_positive").unwrap(),
//!         }
//!     });
//!
//! outcome
//!     .on_success(|payload| {
//!         assert_eq!(payload.and_then(Payload::downcast_ref::<i32>), Some(&84));
//!     })
//!     .on("not_positive", |_, _, _| unreachable!())
//!     .on(ErrorClass::Argument, |_, _, _| unreachable!());
//! ```
//!
//! ## Features
//!
//! - `toml-config`: TOML configuration files (default)
//! - `yaml-config`: YAML configuration files
//! - `json-log`: JSON log output

pub use outcome_core as core;
pub use outcome_runtime as runtime;

/// Prelude module for convenient imports.
///
/// ```rust
/// use outcome::prelude::*;
/// ```
pub mod prelude {
    // Outcome values
    pub use outcome_core::{Failure, Outcome, Payload, Success, Symbol};

    // Error identities
    pub use outcome_core::{ErrorClass, ErrorIdentity, ErrorValue};

    // Dispatch
    pub use outcome_core::Event;

    // Adapters
    pub use outcome_core::{AdapterRegistry, Callback};

    // Errors
    pub use outcome_core::{OutcomeError, RegistryError};

    // Runtime
    pub use outcome_runtime::{OutcomeRuntime, RuntimeError};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn int(payload: Option<&Payload>) -> Option<i32> {
        payload.and_then(Payload::downcast_ref::<i32>).copied()
    }

    #[test]
    fn test_succeeded_round_trips_payload() {
        let payload = Payload::new(vec!["a", "b"]);
        let outcome = Outcome::from_payload(Some(payload.clone()));

        assert!(outcome.is_success());
        assert!(Payload::ptr_eq(outcome.payload().unwrap(), &payload));
        assert!(Outcome::success().payload().is_none());
    }

    #[test]
    fn test_failed_is_never_success() {
        let identities = [
            None,
            Some(ErrorIdentity::from("e1")),
            Some(ErrorIdentity::from(ErrorValue::runtime("boom"))),
        ];
        for identity in identities {
            let outcome = Outcome::failed(identity, None, None).unwrap();
            assert!(!outcome.is_success());
        }
    }

    #[test]
    fn test_reserved_keywords_are_rejected() {
        for keyword in ["success", "failure"] {
            let err = Outcome::fail(keyword).unwrap_err();
            assert!(matches!(err, OutcomeError::ReservedIdentity { keyword: k } if k == keyword));
            assert!(err.to_string().contains(keyword));
        }
    }

    #[test]
    fn test_non_identity_values_are_rejected() {
        let err = Failure::from_dynamic(Some(Payload::new(42_i32)), None, None).unwrap_err();
        assert!(matches!(err, OutcomeError::InvalidIdentity { found } if found == "i32"));
    }

    #[test]
    fn test_message_derivation() {
        let failed = Outcome::fail(ErrorValue::standard("Failed")).unwrap();
        assert_eq!(failed.message(), Some("Failed"));

        let failed = Outcome::failed(
            Some(ErrorValue::standard("Failed").into()),
            Some("Another".to_string()),
            None,
        )
        .unwrap();
        assert_eq!(failed.message(), Some("Another"));

        let failed = Failure::from_dynamic(None, Some(Payload::new(true)), None).unwrap();
        assert_eq!(failed.message(), Some("true"));

        let failed = Outcome::failed(None, None, None).unwrap();
        assert_eq!(failed.message(), None);
    }

    #[test]
    fn test_and_then_sequences_successes() {
        let outcome =
            Outcome::succeeded(1_i32).and_then(|v| Outcome::succeeded(int(v.as_ref()).unwrap() + 1));
        assert!(outcome.is_success());
        assert_eq!(int(outcome.payload()), Some(2));
    }

    #[test]
    fn test_and_then_short_circuits_failures() {
        let calls = AtomicUsize::new(0);
        let outcome = Outcome::fail("err").unwrap().and_then(|v| {
            calls.fetch_add(1, Ordering::SeqCst);
            Outcome::succeeded(int(v.as_ref()).unwrap_or_default() + 1)
        });

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(outcome.error(), Some(&ErrorIdentity::from("err")));
    }

    #[test]
    fn test_and_then_rejects_bare_values() {
        let err = Outcome::succeeded(1_i32)
            .and_then_any(|v| int(v.as_ref()))
            .unwrap_err();
        assert!(matches!(err, OutcomeError::ChainContract { .. }));
    }

    #[test]
    fn test_success_hooks() {
        let success = AtomicUsize::new(0);
        let failure = AtomicUsize::new(0);
        Outcome::success()
            .on_success(|_| {
                success.fetch_add(1, Ordering::SeqCst);
            })
            .on_failure(|_, _, _| {
                failure.fetch_add(1, Ordering::SeqCst);
            });
        assert_eq!(success.load(Ordering::SeqCst), 1);
        assert_eq!(failure.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_failure_dispatch_by_name() {
        let hits = [
            AtomicUsize::new(0),
            AtomicUsize::new(0),
            AtomicUsize::new(0),
        ];
        Outcome::fail("e1")
            .unwrap()
            .on("failure", |_, _, _| {
                hits[0].fetch_add(1, Ordering::SeqCst);
            })
            .on("e1", |_, _, _| {
                hits[1].fetch_add(1, Ordering::SeqCst);
            })
            .on("e2", |_, _, _| {
                hits[2].fetch_add(1, Ordering::SeqCst);
            });

        let counts: Vec<_> = hits.iter().map(|h| h.load(Ordering::SeqCst)).collect();
        assert_eq!(counts, [1, 1, 0]);
    }

    #[test]
    fn test_failure_dispatch_by_class() {
        let hits = [AtomicUsize::new(0), AtomicUsize::new(0)];
        Outcome::fail(ErrorValue::divide_by_zero("divided by 0"))
            .unwrap()
            .on(ErrorClass::DivideByZero, |_, _, _| {
                hits[0].fetch_add(1, Ordering::SeqCst);
            })
            .on(ErrorClass::Argument, |_, _, _| {
                hits[1].fetch_add(1, Ordering::SeqCst);
            });

        assert_eq!(hits[0].load(Ordering::SeqCst), 1);
        assert_eq!(hits[1].load(Ordering::SeqCst), 0);
    }

    fn noop(_: Callback<'_>) -> Outcome {
        Outcome::success()
    }

    #[test]
    fn test_registry_contracts() {
        let registry = AdapterRegistry::new();

        registry.register("dup", noop).unwrap();
        assert!(matches!(
            registry.register("dup", noop),
            Err(RegistryError::DuplicateAdapter { .. })
        ));

        assert!(matches!(
            registry.run("missing", || Ok::<_, ErrorValue>(true)),
            Err(RegistryError::UnknownAdapter { .. })
        ));

        registry.register("broken", |_: Callback<'_>| true).unwrap();
        let err = registry
            .run("broken", || Ok::<_, ErrorValue>(true))
            .unwrap_err();
        assert!(err.to_string().contains("must return an Outcome"));
    }

    #[test]
    fn test_exception_adapter() {
        let registry = AdapterRegistry::with_builtins();

        let failed = registry
            .run("exception", || Err::<(), _>(ErrorValue::argument("Failed")))
            .unwrap();
        assert!(failed.is_failure());
        assert!(failed.error().unwrap().is_a(ErrorClass::Argument));
        assert_eq!(failed.message(), Some("Failed"));

        #[derive(Debug, PartialEq)]
        struct Data {
            data: bool,
        }
        let succeeded = registry
            .run("exception", || Ok::<_, ErrorValue>(Data { data: true }))
            .unwrap();
        assert!(succeeded.is_success());
        assert_eq!(succeeded.payload_as::<Data>(), Some(&Data { data: true }));
    }
}
