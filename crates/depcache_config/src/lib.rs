//! Parsing and validation of `depcache.toml` configuration files.
//!
//! This crate reads the configuration file and produces a strongly-typed
//! [`DependsConfig`] holding the make-file formatting policy (line
//! continuation token, path style, relativization roots) and scan options.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_file, load_config_from_str, CONFIG_FILE};
pub use types::*;
