//! Structured errors that can serve as a failure's identity.
//!
//! Structured errors form a small closed hierarchy described by
//! [`ErrorClass`]. Class-based dispatch on a failed outcome is a subtype
//! check against this hierarchy:
//!
//! ```text
//! Standard
//! ├── Argument
//! ├── Type
//! ├── Unsupported
//! ├── Arithmetic
//! │   └── DivideByZero
//! ├── Io
//! │   └── NotFound
//! └── Runtime
//!     └── Panic
//! ```

use std::any::Any;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

// ============================================================================
// Error Class Hierarchy
// ============================================================================

/// The class of a structured error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// Root of the hierarchy; every class is a `Standard` error.
    Standard,
    /// An argument had an unacceptable value.
    Argument,
    /// A value had an unexpected type.
    Type,
    /// The requested operation is not supported.
    Unsupported,
    /// An arithmetic operation failed.
    Arithmetic,
    /// Division by zero.
    DivideByZero,
    /// An input/output operation failed.
    Io,
    /// A resource could not be found.
    NotFound,
    /// A generic runtime failure.
    Runtime,
    /// Code panicked and the panic was caught.
    Panic,
}

impl ErrorClass {
    /// Every class, root first.
    pub const ALL: [ErrorClass; 10] = [
        ErrorClass::Standard,
        ErrorClass::Argument,
        ErrorClass::Type,
        ErrorClass::Unsupported,
        ErrorClass::Arithmetic,
        ErrorClass::DivideByZero,
        ErrorClass::Io,
        ErrorClass::NotFound,
        ErrorClass::Runtime,
        ErrorClass::Panic,
    ];

    /// Returns the direct parent class, or `None` for the root.
    pub fn parent(self) -> Option<ErrorClass> {
        match self {
            Self::Standard => None,
            Self::DivideByZero => Some(Self::Arithmetic),
            Self::NotFound => Some(Self::Io),
            Self::Panic => Some(Self::Runtime),
            Self::Argument
            | Self::Type
            | Self::Unsupported
            | Self::Arithmetic
            | Self::Io
            | Self::Runtime => Some(Self::Standard),
        }
    }

    /// Iterates over this class and all of its ancestors, nearest first.
    pub fn ancestors(self) -> impl Iterator<Item = ErrorClass> {
        std::iter::successors(Some(self), |class| class.parent())
    }

    /// Returns `true` if this class is `other` or derives from it.
    pub fn is_a(self, other: ErrorClass) -> bool {
        self.ancestors().any(|class| class == other)
    }

    /// Returns the class name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Standard => "StandardError",
            Self::Argument => "ArgumentError",
            Self::Type => "TypeError",
            Self::Unsupported => "UnsupportedError",
            Self::Arithmetic => "ArithmeticError",
            Self::DivideByZero => "DivideByZeroError",
            Self::Io => "IoError",
            Self::NotFound => "NotFoundError",
            Self::Runtime => "RuntimeError",
            Self::Panic => "PanicError",
        }
    }
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ErrorClass {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|class| class.name().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

// ============================================================================
// Error Value
// ============================================================================

/// A structured error: a class from the hierarchy plus a message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[error("{class}: {message}")]
pub struct ErrorValue {
    class: ErrorClass,
    message: String,
}

impl ErrorValue {
    /// Creates a structured error of the given class.
    pub fn new(class: ErrorClass, message: impl Into<String>) -> Self {
        Self {
            class,
            message: message.into(),
        }
    }

    /// Creates a `Standard` error.
    pub fn standard(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Standard, message)
    }

    /// Creates an `Argument` error.
    pub fn argument(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Argument, message)
    }

    /// Creates a `Type` error.
    pub fn type_error(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Type, message)
    }

    /// Creates a `DivideByZero` error.
    pub fn divide_by_zero(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::DivideByZero, message)
    }

    /// Creates a `Runtime` error.
    pub fn runtime(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Runtime, message)
    }

    /// Converts any standard error into a `Standard` structured error,
    /// keeping its display text as the message.
    pub fn from_error<E: std::error::Error + ?Sized>(err: &E) -> Self {
        Self::standard(err.to_string())
    }

    /// Builds a `Panic` error from the payload of a caught panic.
    pub fn from_panic(panic: &(dyn Any + Send)) -> Self {
        let message = if let Some(message) = panic.downcast_ref::<&'static str>() {
            (*message).to_string()
        } else if let Some(message) = panic.downcast_ref::<String>() {
            message.clone()
        } else {
            "panicked with a non-string payload".to_string()
        };
        Self::new(ErrorClass::Panic, message)
    }

    /// The error's class.
    pub fn class(&self) -> ErrorClass {
        self.class
    }

    /// The error's own message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns `true` if the error is an instance of `class` or a subclass.
    pub fn is_a(&self, class: ErrorClass) -> bool {
        self.class.is_a(class)
    }
}

impl From<std::io::Error> for ErrorValue {
    fn from(err: std::io::Error) -> Self {
        let class = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorClass::NotFound,
            std::io::ErrorKind::Unsupported => ErrorClass::Unsupported,
            std::io::ErrorKind::InvalidInput => ErrorClass::Argument,
            _ => ErrorClass::Io,
        };
        Self::new(class, err.to_string())
    }
}

macro_rules! impl_from_std_error {
    ($($class:ident => $($err:ty),+;)+) => {
        $($(
            impl From<$err> for ErrorValue {
                fn from(err: $err) -> Self {
                    Self::new(ErrorClass::$class, err.to_string())
                }
            }
        )+)+
    };
}

impl_from_std_error! {
    Argument =>
        std::num::ParseIntError,
        std::num::ParseFloatError,
        std::num::TryFromIntError,
        std::str::ParseBoolError,
        std::char::ParseCharError,
        std::char::CharTryFromError;
    Type =>
        std::str::Utf8Error,
        std::string::FromUtf8Error,
        std::string::FromUtf16Error;
    Standard =>
        std::fmt::Error;
}

impl From<Box<dyn std::error::Error + Send + Sync>> for ErrorValue {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        Self::from_error(err.as_ref())
    }
}

impl From<Box<dyn std::error::Error>> for ErrorValue {
    fn from(err: Box<dyn std::error::Error>) -> Self {
        Self::from_error(err.as_ref())
    }
}

impl From<std::convert::Infallible> for ErrorValue {
    fn from(err: std::convert::Infallible) -> Self {
        match err {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hierarchy_is_reflexive_and_transitive() {
        assert!(ErrorClass::DivideByZero.is_a(ErrorClass::DivideByZero));
        assert!(ErrorClass::DivideByZero.is_a(ErrorClass::Arithmetic));
        assert!(ErrorClass::DivideByZero.is_a(ErrorClass::Standard));
        assert!(!ErrorClass::DivideByZero.is_a(ErrorClass::Argument));
        assert!(!ErrorClass::Arithmetic.is_a(ErrorClass::DivideByZero));
    }

    #[test]
    fn test_every_class_reaches_the_root() {
        for class in ErrorClass::ALL {
            assert_eq!(class.ancestors().last(), Some(ErrorClass::Standard));
        }
    }

    #[test]
    fn test_class_from_name() {
        assert_eq!("ArgumentError".parse::<ErrorClass>(), Ok(ErrorClass::Argument));
        assert_eq!("dividebyzeroerror".parse::<ErrorClass>(), Ok(ErrorClass::DivideByZero));
        assert!("NoSuchError".parse::<ErrorClass>().is_err());
    }

    #[test]
    fn test_panic_payload_message() {
        let err = ErrorValue::from_panic(&"boom");
        assert_eq!(err.class(), ErrorClass::Panic);
        assert_eq!(err.message(), "boom");
        assert!(err.is_a(ErrorClass::Runtime));

        let err = ErrorValue::from_panic(&String::from("owned boom"));
        assert_eq!(err.message(), "owned boom");

        let err = ErrorValue::from_panic(&42_u8);
        assert_eq!(err.message(), "panicked with a non-string payload");
    }

    #[test]
    fn test_io_error_classification() {
        let err = ErrorValue::from(std::io::Error::new(std::io::ErrorKind::NotFound, "missing"));
        assert_eq!(err.class(), ErrorClass::NotFound);
        assert!(err.is_a(ErrorClass::Io));
        assert_eq!(err.message(), "missing");
    }

    #[test]
    fn test_std_error_classification() {
        let err = ErrorValue::from("maybe".parse::<bool>().unwrap_err());
        assert_eq!(err.class(), ErrorClass::Argument);
        assert_eq!(err.message(), "provided string was not `true` or `false`");

        let err = ErrorValue::from(u8::try_from(300_i32).unwrap_err());
        assert_eq!(err.class(), ErrorClass::Argument);

        let err = ErrorValue::from(String::from_utf8(vec![0xff]).unwrap_err());
        assert_eq!(err.class(), ErrorClass::Type);

        assert_eq!(ErrorValue::from(std::fmt::Error).class(), ErrorClass::Standard);
    }

    #[test]
    fn test_boxed_error_keeps_message() {
        let boxed: Box<dyn std::error::Error + Send + Sync> = "disk on fire".into();
        let err = ErrorValue::from(boxed);
        assert_eq!(err.class(), ErrorClass::Standard);
        assert_eq!(err.message(), "disk on fire");

        let boxed: Box<dyn std::error::Error> = Box::new(std::fmt::Error);
        assert_eq!(ErrorValue::from(boxed).message(), "an error occurred when formatting an argument");
    }

    #[test]
    fn test_display_includes_class() {
        let err = ErrorValue::argument("Failed");
        assert_eq!(err.to_string(), "ArgumentError: Failed");
    }
}
