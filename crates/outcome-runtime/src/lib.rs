//! Outcome Runtime - configuration, logging and the shared adapter registry.
//!
//! This crate provides:
//! - Configuration loading with figment (`ConfigLoader`, `OutcomeConfig`)
//! - Logging initialization on `tracing-subscriber` (`LoggingBuilder`)
//! - The registry context (`OutcomeRuntime`), either process-wide or explicit
//!
//! # Example
//!
//! ```rust
//! use outcome_core::ErrorValue;
//! use outcome_runtime::OutcomeRuntime;
//!
//! let outcome = OutcomeRuntime::global()
//!     .registry()
//!     .run("exception", || Err::<(), _>(ErrorValue::argument("Failed")))
//!     .unwrap();
//! assert!(outcome.is_failure());
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod runtime;

// Re-exports
pub use config::{
    ConfigError, ConfigLoader, ConfigResult, LogFormat, LogLevel, LogOutput, LoggingConfig,
    OutcomeConfig, RegistryConfig,
};
pub use error::{RuntimeError, RuntimeResult};
pub use logging::{LoggingBuilder, LoggingError, LoggingResult, SpanEvents};
pub use runtime::{OutcomeRuntime, RuntimeBuilder};

// Re-export tracing for use by other crates
pub use tracing;
pub use tracing_subscriber;

/// Prelude module for convenient imports.
///
/// This provides the commonly used logging macros:
/// - `trace!`, `debug!`, `info!`, `warn!`, `error!`
/// - `span`, `event`
/// - `instrument` attribute
/// - `Level` for span creation
pub mod prelude {
    pub use tracing::{Level, debug, error, event, info, instrument, span, trace, warn};
}
