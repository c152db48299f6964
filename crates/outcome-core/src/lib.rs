//! # Outcome Core
//!
//! Value types for representing the outcome of a fallible operation without
//! relying on panics or early returns for control flow.
//!
//! ## Architecture Layers
//!
//! ### Foundation Layer
//!
//! - **Outcome**: the two-variant result type ([`Outcome`], [`Success`], [`Failure`])
//! - **Payload**: type-erased data carried by either variant ([`Payload`])
//! - **Identities**: symbolic names and structured errors ([`Symbol`], [`ErrorValue`], [`ErrorClass`])
//!
//! ### Framework Layer
//!
//! - **Dispatch**: conditional handlers on outcomes ([`Outcome::on`], [`Event`])
//!
//! ### Integration Layer
//!
//! - **Adapters**: named conversions from external code into outcomes ([`AdapterRegistry`])
//! - **Built-ins**: the `exception` adapter, registered at link time
//!
//! ## Example
//!
//! ```rust
//! use outcome_core::{AdapterRegistry, ErrorClass};
//!
//! let registry = AdapterRegistry::with_builtins();
//!
//! let outcome = registry
//!     .run("exception", || "forty-two".parse::<i32>())
//!     .unwrap();
//!
//! outcome
//!     .on_success(|_| unreachable!())
//!     .on(ErrorClass::Argument, |_, message, _| {
//!         println!("could not parse: {}", message.unwrap_or_default());
//!     });
//! ```

extern crate self as outcome_core;

pub mod error;
pub mod foundation;
pub mod framework;
pub mod integration;

// Foundation
pub use foundation::error::{ErrorClass, ErrorValue};
pub use foundation::identity::ErrorIdentity;
pub use foundation::outcome::{Failure, FailureBuilder, Outcome, Success};
pub use foundation::payload::Payload;
pub use foundation::symbol::{FAILURE_KEYWORD, RESERVED_KEYWORDS, SUCCESS_KEYWORD, Symbol};

// Framework
pub use framework::event::Event;

// Integration
pub use integration::registry::{
    AdapterRegistry, BUILTIN_ADAPTERS, BuiltinAdapter, Callback, CallbackResult, Conversion,
    ConvertFn,
};

// Errors
pub use error::{OutcomeError, OutcomeResult, RegistryError, RegistryResult};

// Re-exported for `#[adapter]` expansions.
pub use linkme;
pub use outcome_macros::adapter;
