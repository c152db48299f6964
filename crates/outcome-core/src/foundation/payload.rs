//! Type-erased payloads carried by outcomes.
//!
//! A [`Payload`] wraps any `Send + Sync` value in an `Arc`, so it can travel
//! through an [`Outcome`](crate::Outcome) without the outcome knowing its
//! concrete type. Callers recover the value by downcasting:
//!
//! ```rust
//! use outcome_core::Payload;
//!
//! let payload = Payload::new(42_i32);
//! assert_eq!(payload.downcast_ref::<i32>(), Some(&42));
//! assert!(payload.downcast_ref::<String>().is_none());
//! ```

use std::any::{Any, type_name};
use std::fmt;
use std::sync::Arc;

/// An opaque, immutable, cheaply clonable value.
///
/// Clones share the same allocation; use [`Payload::ptr_eq`] to check that
/// two payloads are the very same value.
#[derive(Clone)]
pub struct Payload {
    inner: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl Payload {
    /// Wraps a value.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            inner: Arc::new(value),
            type_name: type_name::<T>(),
        }
    }

    /// Wraps a value that is already shared.
    pub fn from_arc<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Self {
            inner: value,
            type_name: type_name::<T>(),
        }
    }

    /// Attempts to downcast to a concrete type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref()
    }

    /// Attempts to downcast to a shared handle of a concrete type.
    pub fn downcast_arc<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.inner).downcast().ok()
    }

    /// Returns `true` if the payload holds a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    /// The name of the wrapped type, as reported by [`std::any::type_name`].
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns `true` if both payloads point at the same value.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Payload")
            .field("type_name", &self.type_name)
            .finish()
    }
}
