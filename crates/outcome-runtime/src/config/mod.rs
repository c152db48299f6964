//! Configuration module for the Outcome runtime.
//!
//! This module provides figment-based configuration loading and validation
//! for logging and for the shared adapter registry.

pub mod error;
pub mod loader;
pub mod schema;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigLoader, ENV_PREFIX, Profile, load_config, load_config_from_file};
pub use schema::{
    LogFormat, LogLevel, LogOutput, LoggingConfig, OutcomeConfig, RegistryConfig, SpanEventConfig,
};
pub use validation::validate_config;
