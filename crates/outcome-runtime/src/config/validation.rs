//! Configuration validation utilities.

use std::collections::HashSet;

use outcome_core::Symbol;

use super::error::{ConfigError, ConfigResult};
use super::schema::{LogOutput, LoggingConfig, OutcomeConfig, RegistryConfig};

/// Validates the entire configuration.
pub fn validate_config(config: &OutcomeConfig) -> ConfigResult<()> {
    validate_logging_config(&config.logging)?;
    validate_registry_config(&config.registry)?;
    Ok(())
}

/// Validates logging configuration.
fn validate_logging_config(logging: &LoggingConfig) -> ConfigResult<()> {
    if logging.output == LogOutput::File && logging.file_path.is_none() {
        return Err(ConfigError::validation(
            "File output requires logging.file_path",
        ));
    }

    for module in logging.filters.keys() {
        if module.is_empty() || module.contains(|c: char| c.is_whitespace() || c == '=') {
            return Err(ConfigError::validation(format!(
                "Invalid log filter target: {module:?}"
            )));
        }
    }

    Ok(())
}

/// Validates registry configuration.
fn validate_registry_config(registry: &RegistryConfig) -> ConfigResult<()> {
    for name in &registry.disabled {
        validate_adapter_name(name)?;
    }

    let mut seen = HashSet::new();
    for name in &registry.adapters_required {
        validate_adapter_name(name)?;
        if !seen.insert(name) {
            return Err(ConfigError::DuplicateAdapterName(name.clone()));
        }
    }

    if let Some(name) = registry
        .adapters_required
        .iter()
        .find(|name| registry.disabled.contains(name))
    {
        return Err(ConfigError::validation(format!(
            "Adapter {name} is both required and disabled"
        )));
    }

    Ok(())
}

/// Validates an adapter name.
fn validate_adapter_name(name: &str) -> ConfigResult<()> {
    if !Symbol::new(name).is_identifier() {
        return Err(ConfigError::InvalidAdapterName(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_validate_default_config() {
        let config = OutcomeConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_file_output_without_path() {
        let mut config = OutcomeConfig::default();
        config.logging.output = LogOutput::File;
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::ValidationError { .. })
        ));

        config.logging.file_path = Some(PathBuf::from("outcome.log"));
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_adapter_names() {
        let mut config = OutcomeConfig::default();
        config.registry.adapters_required = vec!["not an identifier".to_string()];
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::InvalidAdapterName(_))
        ));

        config.registry.adapters_required = vec!["exception".to_string(), "exception".to_string()];
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::DuplicateAdapterName(_))
        ));
    }

    #[test]
    fn test_validate_required_and_disabled() {
        let mut config = OutcomeConfig::default();
        config.registry.adapters_required = vec!["exception".to_string()];
        config.registry.disabled = vec!["exception".to_string()];
        assert!(validate_config(&config).is_err());
    }
}
