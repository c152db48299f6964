//! Dispatch events.
//!
//! An [`Event`] names what a handler is interested in: any success, any
//! failure, a failure with a particular symbolic identity, a failure whose
//! structured error belongs to a class, or a failure carrying one exact
//! structured error.
//!
//! Strings convert into events the way a caller would write them:
//!
//! ```rust
//! use outcome_core::{ErrorClass, Event};
//!
//! assert_eq!(Event::from("success"), Event::Success);
//! assert_eq!(Event::from("failure"), Event::Failure);
//! assert!(matches!(Event::from("not_found"), Event::Named(_)));
//! assert_eq!(Event::from(ErrorClass::Argument), Event::Class(ErrorClass::Argument));
//! ```

use std::fmt;

use crate::foundation::error::{ErrorClass, ErrorValue};
use crate::foundation::identity::ErrorIdentity;
use crate::foundation::symbol::{FAILURE_KEYWORD, SUCCESS_KEYWORD, Symbol};

/// What a dispatched handler listens for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Event {
    /// Any successful outcome.
    Success,
    /// Any failed outcome.
    Failure,
    /// A failure whose identity is this symbol.
    Named(Symbol),
    /// A failure whose structured error is of this class or a subclass.
    Class(ErrorClass),
    /// A failure whose structured error equals this value.
    Value(ErrorValue),
}

impl Event {
    /// Returns `true` if a failure with `identity` matches this event.
    ///
    /// Checks run in a fixed order: the failure keyword, then value equality
    /// with the identity, then the class hierarchy.
    pub fn matches_failure(&self, identity: Option<&ErrorIdentity>) -> bool {
        match self {
            Self::Success => false,
            Self::Failure => true,
            Self::Named(symbol) => identity.and_then(ErrorIdentity::as_symbol) == Some(symbol),
            Self::Value(err) => identity.and_then(ErrorIdentity::as_error) == Some(err),
            Self::Class(class) => identity.is_some_and(|identity| identity.is_a(*class)),
        }
    }

    /// Returns `true` if a success matches this event.
    pub fn matches_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => f.write_str(SUCCESS_KEYWORD),
            Self::Failure => f.write_str(FAILURE_KEYWORD),
            Self::Named(symbol) => write!(f, ":{symbol}"),
            Self::Class(class) => write!(f, "{class}"),
            Self::Value(err) => write!(f, "{err}"),
        }
    }
}

impl From<Symbol> for Event {
    fn from(symbol: Symbol) -> Self {
        match symbol.as_str() {
            SUCCESS_KEYWORD => Self::Success,
            FAILURE_KEYWORD => Self::Failure,
            _ => Self::Named(symbol),
        }
    }
}

impl From<&str> for Event {
    fn from(name: &str) -> Self {
        Self::from(Symbol::new(name))
    }
}

impl From<String> for Event {
    fn from(name: String) -> Self {
        Self::from(Symbol::from(name))
    }
}

impl From<ErrorClass> for Event {
    fn from(class: ErrorClass) -> Self {
        Self::Class(class)
    }
}

impl From<ErrorValue> for Event {
    fn from(err: ErrorValue) -> Self {
        Self::Value(err)
    }
}

impl From<ErrorIdentity> for Event {
    fn from(identity: ErrorIdentity) -> Self {
        match identity {
            ErrorIdentity::Named(symbol) => Self::from(symbol),
            ErrorIdentity::Structured(err) => Self::Value(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_become_fixed_events() {
        assert_eq!(Event::from(String::from("success")), Event::Success);
        assert_eq!(Event::from(Symbol::new("failure")), Event::Failure);
        assert_eq!(Event::from("e1"), Event::Named(Symbol::new("e1")));
    }

    #[test]
    fn test_failure_matching_order() {
        let named = ErrorIdentity::from("e1");
        assert!(Event::Failure.matches_failure(Some(&named)));
        assert!(Event::Failure.matches_failure(None));
        assert!(Event::from("e1").matches_failure(Some(&named)));
        assert!(!Event::from("e2").matches_failure(Some(&named)));
        assert!(!Event::from("e1").matches_failure(None));
        assert!(!Event::Success.matches_failure(Some(&named)));
    }

    #[test]
    fn test_class_and_value_matching() {
        let err = ErrorValue::divide_by_zero("divided by 0");
        let identity = ErrorIdentity::Structured(err.clone());

        assert!(Event::Class(ErrorClass::DivideByZero).matches_failure(Some(&identity)));
        assert!(Event::Class(ErrorClass::Arithmetic).matches_failure(Some(&identity)));
        assert!(Event::Class(ErrorClass::Standard).matches_failure(Some(&identity)));
        assert!(!Event::Class(ErrorClass::Argument).matches_failure(Some(&identity)));

        assert!(Event::Value(err).matches_failure(Some(&identity)));
        assert!(!Event::Value(ErrorValue::divide_by_zero("other")).matches_failure(Some(&identity)));

        let named = ErrorIdentity::from("e1");
        assert!(!Event::Class(ErrorClass::Standard).matches_failure(Some(&named)));
    }

    #[test]
    fn test_display() {
        assert_eq!(Event::Success.to_string(), "success");
        assert_eq!(Event::from("e1").to_string(), ":e1");
        assert_eq!(Event::from(ErrorClass::Argument).to_string(), "ArgumentError");
    }
}
