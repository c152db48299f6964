//! Contract errors raised by the Outcome core.
//!
//! These errors describe misuse of the library itself: an invalid failure
//! identity, a chained step that did not return an outcome, or a broken
//! adapter registration. They are returned to the immediate caller and are
//! never turned into a failed [`Outcome`](crate::Outcome).

use thiserror::Error;

// =============================================================================
// Outcome Errors
// =============================================================================

/// Errors raised while constructing or chaining outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OutcomeError {
    /// The error identity was neither a symbol nor a structured error.
    #[error("error must be either absent, a symbol or a structured error, got `{found}`")]
    InvalidIdentity {
        /// Type name of the rejected value.
        found: &'static str,
    },

    /// The error identity used a reserved dispatch keyword.
    #[error("`{keyword}` is reserved and cannot be used as an error identity")]
    ReservedIdentity {
        /// The offending keyword.
        keyword: &'static str,
    },

    /// The explicit message could not be converted to a string.
    #[error("error message must be convertible to a string, got `{found}`")]
    InvalidMessage {
        /// Type name of the rejected value.
        found: &'static str,
    },

    /// A step passed to `and_then` returned something other than an outcome.
    #[error("chained step must return an Outcome, got `{returned}`")]
    ChainContract {
        /// Type name of the value the step returned.
        returned: &'static str,
    },
}

// =============================================================================
// Registry Errors
// =============================================================================

/// Errors raised by the adapter registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The adapter name is not a symbolic identifier.
    #[error("adapter name must be a symbol, got `{name}`")]
    InvalidName {
        /// The rejected name.
        name: String,
    },

    /// No conversion function or callback was supplied.
    #[error("no callback given to `{operation}`")]
    MissingCallback {
        /// The registry operation that was called.
        operation: &'static str,
    },

    /// An adapter with this name is already registered.
    #[error("adapter `{name}` exists already")]
    DuplicateAdapter {
        /// The duplicate name.
        name: String,
    },

    /// No adapter with this name is registered.
    #[error("adapter `{name}` does not exist")]
    UnknownAdapter {
        /// The missing name.
        name: String,
    },

    /// A registered adapter returned something other than an outcome.
    #[error("adapter `{name}` must return an Outcome, got `{returned}`")]
    AdapterContract {
        /// The adapter that broke its contract.
        name: String,
        /// Type name of the value it returned.
        returned: &'static str,
    },
}

impl RegistryError {
    /// Creates an invalid name error.
    pub fn invalid_name(name: impl Into<String>) -> Self {
        Self::InvalidName { name: name.into() }
    }

    /// Creates a duplicate adapter error.
    pub fn duplicate(name: impl Into<String>) -> Self {
        Self::DuplicateAdapter { name: name.into() }
    }

    /// Creates an unknown adapter error.
    pub fn unknown(name: impl Into<String>) -> Self {
        Self::UnknownAdapter { name: name.into() }
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for outcome construction and chaining.
pub type OutcomeResult<T> = Result<T, OutcomeError>;

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
