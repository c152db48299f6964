//! Runtime context owning the adapter registry.
//!
//! Most programs need one registry for the whole process; [`OutcomeRuntime::global`]
//! provides it. Code that wants isolation (tests, embedded use) builds its
//! own runtime and passes it by reference.
//!
//! ```rust,ignore
//! use outcome_runtime::OutcomeRuntime;
//!
//! let runtime = OutcomeRuntime::builder()
//!     .config_file("outcome.toml")
//!     .init_logging()
//!     .adapter("boolean", boolean)
//!     .build()?;
//!
//! let outcome = runtime.registry().run("boolean", || Ok::<_, ErrorValue>(true))?;
//! ```

use std::any::Any;
use std::path::Path;
use std::sync::{Arc, LazyLock};

use outcome_core::{AdapterRegistry, Callback, Conversion};
use tracing::{debug, info};

use crate::config::{ConfigLoader, OutcomeConfig};
use crate::error::{RuntimeError, RuntimeResult};
use crate::logging;

static GLOBAL: LazyLock<OutcomeRuntime> = LazyLock::new(OutcomeRuntime::default);

/// Configuration plus the adapter registry built from it.
#[derive(Debug, Clone)]
pub struct OutcomeRuntime {
    config: OutcomeConfig,
    registry: Arc<AdapterRegistry>,
}

impl Default for OutcomeRuntime {
    /// Default configuration with every built-in adapter installed.
    fn default() -> Self {
        Self {
            config: OutcomeConfig::default(),
            registry: Arc::new(AdapterRegistry::with_builtins()),
        }
    }
}

impl OutcomeRuntime {
    /// Returns the process-wide runtime, built on first use from defaults.
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Creates a runtime builder that loads configuration from files and
    /// the environment.
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Creates a runtime from already loaded configuration.
    ///
    /// Logging is left alone; call [`logging::init_from_config`] or use
    /// [`RuntimeBuilder::init_logging`] to install a subscriber.
    ///
    /// # Errors
    ///
    /// Fails if an adapter listed in `registry.adapters_required` is not
    /// installed.
    pub fn from_config(config: &OutcomeConfig) -> RuntimeResult<Self> {
        let runtime = Self::install(config);
        runtime.check_required()?;
        Ok(runtime)
    }

    fn install(config: &OutcomeConfig) -> Self {
        let registry = AdapterRegistry::new();
        let installed = registry.install_builtins(|name| config.registry.installs(name));

        info!(
            builtins = installed,
            log_level = %config.logging.level,
            "Runtime initialized from configuration"
        );

        Self {
            config: config.clone(),
            registry: Arc::new(registry),
        }
    }

    /// Returns `Err` naming the first required adapter that is missing.
    pub fn check_required(&self) -> RuntimeResult<()> {
        match self
            .config
            .registry
            .adapters_required
            .iter()
            .find(|name| !self.registry.contains(name))
        {
            Some(name) => Err(RuntimeError::MissingAdapter(name.clone())),
            None => Ok(()),
        }
    }

    /// Returns the configuration the runtime was built from.
    pub fn config(&self) -> &OutcomeConfig {
        &self.config
    }

    /// Returns the adapter registry.
    pub fn registry(&self) -> &Arc<AdapterRegistry> {
        &self.registry
    }
}

// =============================================================================
// RuntimeBuilder
// =============================================================================

/// Builder for an [`OutcomeRuntime`] with custom configuration.
pub struct RuntimeBuilder {
    config_loader: ConfigLoader,
    init_logging: bool,
    adapters: Vec<(String, Conversion)>,
}

impl RuntimeBuilder {
    /// Creates a new runtime builder.
    pub fn new() -> Self {
        Self {
            config_loader: ConfigLoader::new(),
            init_logging: false,
            adapters: Vec::new(),
        }
    }

    /// Sets a specific configuration file to load.
    pub fn config_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_loader = self.config_loader.file(path);
        self
    }

    /// Sets the configuration profile.
    pub fn profile(mut self, profile: impl AsRef<str>) -> Self {
        self.config_loader = self.config_loader.profile(profile);
        self
    }

    /// Adds a search path for configuration files.
    pub fn search_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_loader = self.config_loader.search_path(path);
        self
    }

    /// Disables loading environment variables.
    pub fn without_env(mut self) -> Self {
        self.config_loader = self.config_loader.without_env();
        self
    }

    /// Merges additional configuration programmatically.
    pub fn merge(mut self, config: OutcomeConfig) -> Self {
        self.config_loader = self.config_loader.merge(config);
        self
    }

    /// Installs a global `tracing` subscriber from the loaded logging
    /// configuration.
    pub fn init_logging(mut self) -> Self {
        self.init_logging = true;
        self
    }

    /// Registers an adapter before required adapters are checked.
    pub fn adapter<F, R>(mut self, name: impl Into<String>, conversion: F) -> Self
    where
        F: for<'a> Fn(Callback<'a>) -> R + Send + Sync + 'static,
        R: Any,
    {
        self.adapters.push((name.into(), Conversion::new(conversion)));
        self
    }

    /// Loads configuration and builds the runtime.
    ///
    /// # Errors
    ///
    /// Fails if configuration cannot be loaded, the configured log file
    /// cannot be opened, an adapter cannot be registered, or a required
    /// adapter is missing.
    pub fn build(self) -> RuntimeResult<OutcomeRuntime> {
        let config = self.config_loader.load()?;
        if self.init_logging {
            logging::init_from_config(&config.logging)?;
        }

        let runtime = OutcomeRuntime::install(&config);
        for (name, conversion) in self.adapters {
            runtime.registry.register_boxed(&name, Some(conversion))?;
        }
        runtime.check_required()?;

        debug!(adapters = ?runtime.registry.names(), "Runtime built");
        Ok(runtime)
    }
}

impl Default for RuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LogOutput, LoggingConfig, RegistryConfig};
    use crate::logging::LoggingError;
    use outcome_core::{ErrorValue, Outcome, RegistryError};

    fn boolean(callback: Callback<'_>) -> Outcome {
        match callback() {
            Ok(Some(value)) if value.downcast_ref::<bool>() == Some(&true) => Outcome::success(),
            _ => Outcome::failure(),
        }
    }

    fn builder() -> RuntimeBuilder {
        OutcomeRuntime::builder()
            .without_env()
            .search_path("/nonexistent")
    }

    #[test]
    fn test_global_is_shared() {
        let a = OutcomeRuntime::global();
        let b = OutcomeRuntime::global();
        assert!(Arc::ptr_eq(a.registry(), b.registry()));
        assert!(a.registry().contains("exception"));
    }

    #[test]
    fn test_from_config_respects_disabled() {
        let config = OutcomeConfig {
            registry: RegistryConfig {
                disabled: vec!["exception".to_string()],
                ..Default::default()
            },
            ..Default::default()
        };
        let runtime = OutcomeRuntime::from_config(&config).unwrap();
        assert!(runtime.registry().is_empty());
        assert!(!OutcomeRuntime::global().registry().is_empty());
    }

    #[test]
    fn test_missing_required_adapter() {
        let config = OutcomeConfig {
            registry: RegistryConfig {
                adapters_required: vec!["boolean".to_string()],
                ..Default::default()
            },
            ..Default::default()
        };
        let result = OutcomeRuntime::from_config(&config);
        assert!(matches!(result, Err(RuntimeError::MissingAdapter(name)) if name == "boolean"));
    }

    #[test]
    fn test_builder_registers_before_required_check() {
        let runtime = builder()
            .merge(OutcomeConfig {
                registry: RegistryConfig {
                    adapters_required: vec!["boolean".to_string(), "exception".to_string()],
                    ..Default::default()
                },
                ..Default::default()
            })
            .adapter("boolean", boolean)
            .build()
            .unwrap();

        let outcome = runtime
            .registry()
            .run("boolean", || Ok::<_, ErrorValue>(true))
            .unwrap();
        assert!(outcome.is_success());
    }

    #[test]
    fn test_builder_rejects_duplicate_adapter() {
        let result = builder().adapter("exception", boolean).build();
        assert!(matches!(
            result,
            Err(RuntimeError::Registry(RegistryError::DuplicateAdapter { .. }))
        ));
    }

    #[test]
    fn test_build_reports_unopenable_log_file() {
        let log_path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("Cargo.toml")
            .join("outcome.log");
        let result = builder()
            .merge(OutcomeConfig {
                logging: LoggingConfig {
                    output: LogOutput::File,
                    file_path: Some(log_path),
                    ..Default::default()
                },
                ..Default::default()
            })
            .init_logging()
            .build();
        assert!(matches!(
            result,
            Err(RuntimeError::Logging(LoggingError::Appender(_)))
        ));
    }

    #[test]
    fn test_separate_runtimes_are_isolated() {
        let first = builder().adapter("boolean", boolean).build().unwrap();
        let second = builder().build().unwrap();
        assert!(first.registry().contains("boolean"));
        assert!(!second.registry().contains("boolean"));
    }
}
