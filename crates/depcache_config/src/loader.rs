//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::DependsConfig;
use std::path::Path;

/// Conventional configuration file name inside a build directory.
pub const CONFIG_FILE: &str = "depcache.toml";

/// Loads and validates `<dir>/depcache.toml`.
pub fn load_config(dir: &Path) -> Result<DependsConfig, ConfigError> {
    load_config_file(&dir.join(CONFIG_FILE))
}

/// Loads and validates the configuration file at `path`.
pub fn load_config_file(path: &Path) -> Result<DependsConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Parses and validates a configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<DependsConfig, ConfigError> {
    let config: DependsConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates that configuration values are consistent.
fn validate_config(config: &DependsConfig) -> Result<(), ConfigError> {
    if config.make.line_continue.is_empty() {
        return Err(ConfigError::ValidationError(
            "make.line_continue must not be empty".to_string(),
        ));
    }
    if config.scan.in_project_only && config.project.source_dir.is_none() {
        return Err(ConfigError::MissingField("project.source_dir".to_string()));
    }
    if config.scan.in_project_only {
        // Roots are compared against absolute depfile paths.
        let roots = [
            ("project.source_dir", config.project.source_dir.as_deref()),
            ("project.binary_dir", Some(config.project.binary_dir.as_path())),
        ];
        for (key, root) in roots {
            if root.is_some_and(|root| !root.is_absolute()) {
                return Err(ConfigError::ValidationError(format!(
                    "{key} must be absolute when scan.in_project_only is set"
                )));
            }
        }
    }
    Ok(())
}
