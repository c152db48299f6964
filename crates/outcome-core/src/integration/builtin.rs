//! Built-in adapters installed by [`AdapterRegistry::with_builtins`].
//!
//! [`AdapterRegistry::with_builtins`]: super::registry::AdapterRegistry::with_builtins

use std::panic::{self, AssertUnwindSafe};

use outcome_macros::adapter;

use super::registry::Callback;
use crate::foundation::error::ErrorValue;
use crate::foundation::outcome::{Failure, Outcome};

/// Bridges error-returning and panicking code into an outcome.
///
/// The payload of a normal return becomes a success. A returned error, or a
/// caught panic as a [`Panic`](crate::ErrorClass::Panic) error, becomes a
/// failure whose identity is the structured error and whose message is the
/// error's own message.
#[adapter(exception)]
pub fn exception(callback: Callback<'_>) -> Outcome {
    match panic::catch_unwind(AssertUnwindSafe(callback)) {
        Ok(Ok(payload)) => Outcome::from_payload(payload),
        Ok(Err(err)) => Failure::structured(err, None).into(),
        Err(panic) => Failure::structured(ErrorValue::from_panic(panic.as_ref()), None).into(),
    }
}
