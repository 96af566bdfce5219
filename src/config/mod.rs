//! Configuration module for certdata2pem
//!
//! Handles loading settings from TOML files.

pub mod settings;

pub use settings::{OutputSettings, PathSettings, Settings, DEFAULT_CONFIG_FILE};

use crate::utils::ConfigError;
use std::path::Path;

/// Load settings from `path` if given, else from the default location
pub fn load_config(path: Option<&Path>) -> Result<Settings, ConfigError> {
    match path {
        Some(path) => Settings::load_from_file(path),
        None => Settings::load_default(),
    }
}
