//! Adapter registry.
//!
//! An adapter is a named conversion that runs caller code and turns whatever
//! that code produced into an [`Outcome`]. Adapters are registered once and
//! never replaced or removed.
//!
//! The registry is an explicit value: build one with
//! [`AdapterRegistry::with_builtins`] (or [`AdapterRegistry::new`] for an
//! empty one) and pass it by reference to the code that needs it.
//!
//! ```rust
//! use outcome_core::{AdapterRegistry, ErrorValue, Outcome};
//!
//! let registry = AdapterRegistry::with_builtins();
//!
//! registry
//!     .register("boolean", |callback: outcome_core::Callback<'_>| match callback() {
//!         Ok(Some(value)) if value.downcast_ref::<bool>() == Some(&true) => Outcome::success(),
//!         _ => Outcome::failure(),
//!     })
//!     .unwrap();
//!
//! let outcome = registry.run("boolean", || Ok::<_, ErrorValue>(true)).unwrap();
//! assert!(outcome.is_success());
//! ```

use std::any::{Any, type_name};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::sync::Arc;

use linkme::distributed_slice;
use parking_lot::RwLock;
use tracing::{debug, trace, warn};

use crate::error::{RegistryError, RegistryResult};
use crate::foundation::error::ErrorValue;
use crate::foundation::outcome::Outcome;
use crate::foundation::payload::Payload;
use crate::foundation::symbol::Symbol;

// =============================================================================
// Callback and Conversion Types
// =============================================================================

/// What caller code hands back to an adapter: a payload, or a structured
/// error it raised.
pub type CallbackResult = Result<Option<Payload>, ErrorValue>;

/// Caller code wrapped for an adapter to run. It may borrow from the
/// caller's stack frame for the duration of the run.
pub type Callback<'a> = Box<dyn FnOnce() -> CallbackResult + 'a>;

/// Plain function pointer form of a conversion, used by built-in adapters.
pub type ConvertFn = fn(Callback<'_>) -> Outcome;

type ErasedConversion = dyn for<'a> Fn(Callback<'a>) -> Box<dyn Any> + Send + Sync;

/// A type-erased conversion function.
///
/// The conversion may return any type; [`AdapterRegistry::run`] checks at
/// run time that it actually produced an [`Outcome`].
#[derive(Clone)]
pub struct Conversion {
    inner: Arc<ErasedConversion>,
    returns: &'static str,
}

impl Conversion {
    /// Erases a conversion function.
    pub fn new<F, R>(conversion: F) -> Self
    where
        F: for<'a> Fn(Callback<'a>) -> R + Send + Sync + 'static,
        R: Any,
    {
        let inner: Arc<ErasedConversion> =
            Arc::new(move |callback: Callback<'_>| Box::new(conversion(callback)) as Box<dyn Any>);
        Self {
            inner,
            returns: type_name::<R>(),
        }
    }

    /// Name of the type the conversion returns.
    pub fn returns(&self) -> &'static str {
        self.returns
    }

    fn call(&self, callback: Callback<'_>) -> Box<dyn Any> {
        (self.inner)(callback)
    }
}

impl fmt::Debug for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Conversion")
            .field("returns", &self.returns)
            .finish()
    }
}

// =============================================================================
// Built-in Adapters (linkme distributed slice)
// =============================================================================

/// A conversion registered at link time with `#[adapter(name)]`.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinAdapter {
    /// Name the adapter is installed under.
    pub name: &'static str,
    /// The conversion itself.
    pub convert: ConvertFn,
}

/// Every built-in adapter linked into the binary.
#[distributed_slice]
pub static BUILTIN_ADAPTERS: [BuiltinAdapter];

// =============================================================================
// Adapter Registry
// =============================================================================

/// Named, add-only collection of adapters.
///
/// Registration takes the write lock for both the existence check and the
/// insert, so concurrent registrations of one name cannot both succeed.
/// Running an adapter only holds the read lock long enough to clone the
/// conversion; the conversion itself runs unlocked.
#[derive(Default)]
pub struct AdapterRegistry {
    adapters: RwLock<HashMap<Symbol, Conversion>>,
}

impl AdapterRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            adapters: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a registry holding every built-in adapter.
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        registry.install_builtins(|_| true);
        registry
    }

    /// Installs the built-in adapters accepted by `filter`.
    ///
    /// Built-ins whose name is taken already are skipped with a warning.
    /// Returns the number of adapters installed.
    pub fn install_builtins<F>(&self, filter: F) -> usize
    where
        F: Fn(&str) -> bool,
    {
        let mut installed = 0;
        for builtin in BUILTIN_ADAPTERS.iter().filter(|b| filter(b.name)) {
            match self.register(builtin.name, builtin.convert) {
                Ok(()) => installed += 1,
                Err(err) => warn!(adapter = builtin.name, error = %err, "Skipping built-in adapter"),
            }
        }
        installed
    }

    /// Registers a conversion under `name`.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::InvalidName`] if `name` is not a symbolic identifier.
    /// - [`RegistryError::DuplicateAdapter`] if `name` is taken.
    pub fn register<F, R>(&self, name: impl AsRef<str>, conversion: F) -> RegistryResult<()>
    where
        F: for<'a> Fn(Callback<'a>) -> R + Send + Sync + 'static,
        R: Any,
    {
        self.register_boxed(name, Some(Conversion::new(conversion)))
    }

    /// Registers an already erased conversion under `name`.
    ///
    /// # Errors
    ///
    /// As [`AdapterRegistry::register`], plus
    /// [`RegistryError::MissingCallback`] if `conversion` is `None`.
    pub fn register_boxed(
        &self,
        name: impl AsRef<str>,
        conversion: Option<Conversion>,
    ) -> RegistryResult<()> {
        let name = Symbol::new(name);
        if !name.is_identifier() {
            return Err(RegistryError::invalid_name(name.as_str()));
        }
        let conversion = conversion.ok_or(RegistryError::MissingCallback {
            operation: "register",
        })?;

        match self.adapters.write().entry(name) {
            Entry::Occupied(entry) => Err(RegistryError::duplicate(entry.key().as_str())),
            Entry::Vacant(entry) => {
                debug!(adapter = %entry.key(), returns = conversion.returns(), "Registered adapter");
                entry.insert(conversion);
                Ok(())
            }
        }
    }

    /// Runs `callback` through the adapter registered under `name`.
    ///
    /// The callback's `Ok` value becomes the payload handed to the adapter;
    /// its `Err` value is converted into a structured error.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::UnknownAdapter`] if nothing is registered as `name`.
    /// - [`RegistryError::AdapterContract`] if the adapter returned something
    ///   other than an [`Outcome`].
    pub fn run<'a, F, T, E>(&self, name: &str, callback: F) -> RegistryResult<Outcome>
    where
        F: FnOnce() -> Result<T, E> + 'a,
        T: Any + Send + Sync,
        E: Into<ErrorValue> + 'a,
    {
        let callback: Callback<'a> = Box::new(move || {
            callback()
                .map(|value| Some(Payload::new(value)))
                .map_err(Into::into)
        });
        self.run_boxed(name, Some(callback))
    }

    /// Runs an already boxed callback through the adapter `name`.
    ///
    /// # Errors
    ///
    /// As [`AdapterRegistry::run`], plus [`RegistryError::MissingCallback`]
    /// if `callback` is `None`.
    pub fn run_boxed(&self, name: &str, callback: Option<Callback<'_>>) -> RegistryResult<Outcome> {
        let conversion = self
            .adapters
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::unknown(name))?;
        let callback = callback.ok_or(RegistryError::MissingCallback { operation: "run" })?;

        trace!(adapter = name, "Running adapter");
        conversion
            .call(callback)
            .downcast::<Outcome>()
            .map(|outcome| *outcome)
            .map_err(|_| RegistryError::AdapterContract {
                name: name.to_string(),
                returned: conversion.returns(),
            })
    }

    /// Returns `true` if an adapter is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.adapters.read().contains_key(name)
    }

    /// Returns all registered names, sorted.
    pub fn names(&self) -> Vec<Symbol> {
        let mut names: Vec<Symbol> = self.adapters.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Returns the number of registered adapters.
    pub fn len(&self) -> usize {
        self.adapters.read().len()
    }

    /// Returns `true` if no adapter is registered.
    pub fn is_empty(&self) -> bool {
        self.adapters.read().is_empty()
    }
}

impl fmt::Debug for AdapterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterRegistry")
            .field("adapters", &self.names())
            .finish()
    }
}
