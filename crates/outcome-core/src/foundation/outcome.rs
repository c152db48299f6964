//! The two-variant outcome type.
//!
//! An [`Outcome`] is either [`Outcome::Succeeded`] carrying an optional
//! payload, or [`Outcome::Failed`] carrying an optional error identity, an
//! optional message and an optional payload. The variant is fixed at
//! construction and every field is immutable afterwards.
//!
//! # Chaining
//!
//! ```rust
//! use outcome_core::Outcome;
//!
//! let doubled = Outcome::succeeded(21_i32).and_then(|payload| {
//!     let value = payload.and_then(|p| p.downcast_ref::<i32>().copied()).unwrap_or(0);
//!     Outcome::succeeded(value * 2)
//! });
//! assert_eq!(doubled.payload_as::<i32>(), Some(&42));
//! ```

use std::any::{Any, type_name};
use std::fmt;

use super::error::ErrorValue;
use super::identity::ErrorIdentity;
use super::payload::Payload;
use super::symbol::Symbol;
use crate::error::{OutcomeError, OutcomeResult};

// ============================================================================
// Succeeded Variant
// ============================================================================

/// Data of a successful outcome.
#[derive(Debug, Clone, Default)]
pub struct Success {
    payload: Option<Payload>,
}

impl Success {
    /// Creates a success with an optional payload.
    pub fn new(payload: Option<Payload>) -> Self {
        Self { payload }
    }

    /// The payload, if any.
    pub fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    /// Consumes the success and returns its payload.
    pub fn into_payload(self) -> Option<Payload> {
        self.payload
    }
}

// ============================================================================
// Failed Variant
// ============================================================================

/// Data of a failed outcome.
#[derive(Debug, Clone, Default)]
pub struct Failure {
    error: Option<ErrorIdentity>,
    message: Option<String>,
    payload: Option<Payload>,
}

impl Failure {
    /// Creates a failure, validating the identity and deriving the message.
    ///
    /// An explicit `message` always wins. Without one, a structured error
    /// lends its own message; otherwise the failure has no message.
    ///
    /// # Errors
    ///
    /// Returns [`OutcomeError::ReservedIdentity`] if `error` is a symbol equal
    /// to one of the reserved dispatch keywords.
    pub fn new(
        error: Option<ErrorIdentity>,
        message: Option<String>,
        payload: Option<Payload>,
    ) -> OutcomeResult<Self> {
        if let Some(ErrorIdentity::Named(symbol)) = &error
            && let Some(keyword) = symbol.reserved_keyword()
        {
            return Err(OutcomeError::ReservedIdentity { keyword });
        }

        let message = match (&error, message) {
            (_, Some(message)) => Some(message),
            (Some(ErrorIdentity::Structured(err)), None) => Some(err.message().to_string()),
            _ => None,
        };

        Ok(Self {
            error,
            message,
            payload,
        })
    }

    /// Creates a failure whose identity is a structured error.
    ///
    /// Never fails: structured errors cannot collide with reserved keywords.
    pub fn structured(err: ErrorValue, message: Option<String>) -> Self {
        let message = message.or_else(|| Some(err.message().to_string()));
        Self {
            error: Some(ErrorIdentity::Structured(err)),
            message,
            payload: None,
        }
    }

    /// Starts building a failure.
    pub fn builder() -> FailureBuilder {
        FailureBuilder::default()
    }

    /// Creates a failure from type-erased arguments.
    ///
    /// `error` must hold a [`Symbol`], an [`ErrorValue`] or an
    /// [`ErrorIdentity`]. `message` must hold a string, a symbol, a structured
    /// error, a `bool`, a `char` or a primitive number; it is converted to
    /// its string form.
    ///
    /// # Errors
    ///
    /// Returns [`OutcomeError::InvalidIdentity`] or
    /// [`OutcomeError::InvalidMessage`] for values of any other type, and
    /// [`OutcomeError::ReservedIdentity`] as [`Failure::new`] does.
    pub fn from_dynamic(
        error: Option<Payload>,
        message: Option<Payload>,
        payload: Option<Payload>,
    ) -> OutcomeResult<Self> {
        let error = error.map(|value| identity_from_payload(&value)).transpose()?;
        let message = message
            .map(|value| {
                display_payload(&value).ok_or(OutcomeError::InvalidMessage {
                    found: value.type_name(),
                })
            })
            .transpose()?;
        Self::new(error, message, payload)
    }

    /// The error identity, if any.
    pub fn error(&self) -> Option<&ErrorIdentity> {
        self.error.as_ref()
    }

    /// The derived or explicit message, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// The payload, if any.
    pub fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    /// Consumes the failure and returns its parts.
    pub fn into_parts(self) -> (Option<ErrorIdentity>, Option<String>, Option<Payload>) {
        (self.error, self.message, self.payload)
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.error, &self.message) {
            (Some(error), Some(message)) => write!(f, "{error} ({message})"),
            (Some(error), None) => write!(f, "{error}"),
            (None, Some(message)) => f.write_str(message),
            (None, None) => f.write_str("failure"),
        }
    }
}

fn identity_from_payload(value: &Payload) -> OutcomeResult<ErrorIdentity> {
    if let Some(symbol) = value.downcast_ref::<Symbol>() {
        Ok(ErrorIdentity::Named(symbol.clone()))
    } else if let Some(err) = value.downcast_ref::<ErrorValue>() {
        Ok(ErrorIdentity::Structured(err.clone()))
    } else if let Some(identity) = value.downcast_ref::<ErrorIdentity>() {
        Ok(identity.clone())
    } else {
        Err(OutcomeError::InvalidIdentity {
            found: value.type_name(),
        })
    }
}

fn display_payload(value: &Payload) -> Option<String> {
    macro_rules! try_display {
        ($($ty:ty),+ $(,)?) => {
            $(
                if let Some(v) = value.downcast_ref::<$ty>() {
                    return Some(v.to_string());
                }
            )+
        };
    }

    if let Some(err) = value.downcast_ref::<ErrorValue>() {
        return Some(err.message().to_string());
    }

    try_display!(
        String, &'static str, Symbol, bool, char,
        i8, i16, i32, i64, i128, isize,
        u8, u16, u32, u64, u128, usize,
        f32, f64,
    );
    None
}

/// Builder for [`Failure`] and failed [`Outcome`]s.
#[derive(Debug, Default)]
pub struct FailureBuilder {
    error: Option<ErrorIdentity>,
    message: Option<String>,
    payload: Option<Payload>,
}

impl FailureBuilder {
    /// Sets the error identity.
    pub fn error(mut self, error: impl Into<ErrorIdentity>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Sets an explicit message, converting it to a string.
    pub fn message(mut self, message: impl ToString) -> Self {
        self.message = Some(message.to_string());
        self
    }

    /// Wraps `value` as the failure's payload.
    pub fn payload<T: Any + Send + Sync>(mut self, value: T) -> Self {
        self.payload = Some(Payload::new(value));
        self
    }

    /// Sets an already wrapped payload.
    pub fn with_payload(mut self, payload: Option<Payload>) -> Self {
        self.payload = payload;
        self
    }

    /// Validates and builds the failure.
    pub fn build(self) -> OutcomeResult<Failure> {
        Failure::new(self.error, self.message, self.payload)
    }

    /// Validates and builds a failed outcome.
    pub fn into_outcome(self) -> OutcomeResult<Outcome> {
        self.build().map(Outcome::Failed)
    }
}

// ============================================================================
// Outcome
// ============================================================================

/// The outcome of a fallible operation.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// The operation succeeded.
    Succeeded(Success),
    /// The operation failed.
    Failed(Failure),
}

impl Outcome {
    /// A success without payload.
    pub fn success() -> Self {
        Self::Succeeded(Success::default())
    }

    /// A success carrying `value`.
    pub fn succeeded<T: Any + Send + Sync>(value: T) -> Self {
        Self::from_payload(Some(Payload::new(value)))
    }

    /// A success carrying an already wrapped payload.
    pub fn from_payload(payload: Option<Payload>) -> Self {
        Self::Succeeded(Success::new(payload))
    }

    /// A failure without identity, message or payload.
    pub fn failure() -> Self {
        Self::Failed(Failure::default())
    }

    /// A failure identified by `error`.
    ///
    /// # Errors
    ///
    /// See [`Failure::new`].
    pub fn fail(error: impl Into<ErrorIdentity>) -> OutcomeResult<Self> {
        Failure::new(Some(error.into()), None, None).map(Self::Failed)
    }

    /// A failure built from all three optional parts.
    ///
    /// # Errors
    ///
    /// See [`Failure::new`].
    pub fn failed(
        error: Option<ErrorIdentity>,
        message: Option<String>,
        payload: Option<Payload>,
    ) -> OutcomeResult<Self> {
        Failure::new(error, message, payload).map(Self::Failed)
    }

    /// Returns `true` for a successful outcome.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded(_))
    }

    /// Returns `true` for a failed outcome.
    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// The payload of either variant.
    pub fn payload(&self) -> Option<&Payload> {
        match self {
            Self::Succeeded(success) => success.payload(),
            Self::Failed(failure) => failure.payload(),
        }
    }

    /// The payload downcast to `T`.
    pub fn payload_as<T: Any>(&self) -> Option<&T> {
        self.payload().and_then(Payload::downcast_ref)
    }

    /// Consumes the outcome and returns the payload of either variant.
    pub fn into_payload(self) -> Option<Payload> {
        match self {
            Self::Succeeded(success) => success.into_payload(),
            Self::Failed(failure) => failure.payload,
        }
    }

    /// The error identity of a failure.
    pub fn error(&self) -> Option<&ErrorIdentity> {
        self.as_failure().and_then(Failure::error)
    }

    /// The message of a failure.
    pub fn message(&self) -> Option<&str> {
        self.as_failure().and_then(Failure::message)
    }

    /// Returns the success data, if this outcome succeeded.
    pub fn as_success(&self) -> Option<&Success> {
        match self {
            Self::Succeeded(success) => Some(success),
            Self::Failed(_) => None,
        }
    }

    /// Returns the failure data, if this outcome failed.
    pub fn as_failure(&self) -> Option<&Failure> {
        match self {
            Self::Succeeded(_) => None,
            Self::Failed(failure) => Some(failure),
        }
    }

    /// Runs `step` with the payload of a success and returns its outcome.
    ///
    /// A failure is returned unchanged and `step` is never called, so in a
    /// chain of `and_then` calls the first failure travels to the end.
    pub fn and_then<F>(self, step: F) -> Outcome
    where
        F: FnOnce(Option<Payload>) -> Outcome,
    {
        match self {
            Self::Succeeded(success) => step(success.into_payload()),
            failed @ Self::Failed(_) => failed,
        }
    }

    /// Like [`Outcome::and_then`], for steps whose return type is only known
    /// at run time.
    ///
    /// # Errors
    ///
    /// Returns [`OutcomeError::ChainContract`] if the step returned anything
    /// other than an [`Outcome`]. The returned value is dropped.
    pub fn and_then_any<F, R>(self, step: F) -> OutcomeResult<Outcome>
    where
        F: FnOnce(Option<Payload>) -> R,
        R: Any,
    {
        match self {
            Self::Succeeded(success) => {
                let returned: Box<dyn Any> = Box::new(step(success.into_payload()));
                returned
                    .downcast::<Outcome>()
                    .map(|outcome| *outcome)
                    .map_err(|_| OutcomeError::ChainContract {
                        returned: type_name::<R>(),
                    })
            }
            failed @ Self::Failed(_) => Ok(failed),
        }
    }

    /// Replaces the payload of a success with `f(payload)`.
    pub fn map<F, T>(self, f: F) -> Outcome
    where
        F: FnOnce(Option<Payload>) -> T,
        T: Any + Send + Sync,
    {
        self.and_then(|payload| Outcome::succeeded(f(payload)))
    }

    /// Converts into a standard `Result`.
    pub fn into_result(self) -> Result<Option<Payload>, Failure> {
        match self {
            Self::Succeeded(success) => Ok(success.into_payload()),
            Self::Failed(failure) => Err(failure),
        }
    }
}

impl From<Success> for Outcome {
    fn from(success: Success) -> Self {
        Self::Succeeded(success)
    }
}

impl From<Failure> for Outcome {
    fn from(failure: Failure) -> Self {
        Self::Failed(failure)
    }
}

impl<T, E> From<Result<T, E>> for Outcome
where
    T: Any + Send + Sync,
    E: Into<ErrorValue>,
{
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::succeeded(value),
            Err(err) => Self::Failed(Failure::structured(err.into(), None)),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Succeeded(success) => match success.payload() {
                Some(payload) => write!(f, "succeeded with {}", payload.type_name()),
                None => f.write_str("succeeded"),
            },
            Self::Failed(failure) => write!(f, "failed: {failure}"),
        }
    }
}
