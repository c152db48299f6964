//! Error identities attached to failed outcomes.

use std::fmt;

use super::error::{ErrorClass, ErrorValue};
use super::symbol::Symbol;

/// What identifies a specific failure.
///
/// A failure without an identity is represented by `Option::None` at the use
/// site rather than by a variant here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorIdentity {
    /// A symbolic name such as `:not_found`.
    Named(Symbol),
    /// A structured error value.
    Structured(ErrorValue),
}

impl ErrorIdentity {
    /// Returns the symbolic name, if this identity is one.
    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Self::Named(symbol) => Some(symbol),
            Self::Structured(_) => None,
        }
    }

    /// Returns the structured error, if this identity is one.
    pub fn as_error(&self) -> Option<&ErrorValue> {
        match self {
            Self::Named(_) => None,
            Self::Structured(err) => Some(err),
        }
    }

    /// Returns `true` if this is a structured error of `class` or a subclass.
    pub fn is_a(&self, class: ErrorClass) -> bool {
        self.as_error().is_some_and(|err| err.is_a(class))
    }
}

impl fmt::Display for ErrorIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(symbol) => write!(f, ":{symbol}"),
            Self::Structured(err) => write!(f, "{err}"),
        }
    }
}

impl From<Symbol> for ErrorIdentity {
    fn from(symbol: Symbol) -> Self {
        Self::Named(symbol)
    }
}

impl From<&str> for ErrorIdentity {
    fn from(name: &str) -> Self {
        Self::Named(Symbol::new(name))
    }
}

impl From<ErrorValue> for ErrorIdentity {
    fn from(err: ErrorValue) -> Self {
        Self::Structured(err)
    }
}
