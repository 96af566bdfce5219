//! Application settings configuration
//!
//! Defines input/output locations and output options for a conversion run.

use crate::utils::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Settings file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "certdata2pem.toml";

/// Input and output locations
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PathSettings {
    #[serde(default = "default_input")]
    pub input: PathBuf,
    #[serde(default = "default_blacklist")]
    pub blacklist: PathBuf,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_input() -> PathBuf {
    PathBuf::from("certdata.txt")
}

fn default_blacklist() -> PathBuf {
    PathBuf::from("blacklist.txt")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            input: default_input(),
            blacklist: default_blacklist(),
            output_dir: default_output_dir(),
        }
    }
}

/// Output file options
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OutputSettings {
    /// File extension without the leading dot
    #[serde(default = "default_extension")]
    pub extension: String,
    #[serde(default)]
    pub dry_run: bool,
}

fn default_extension() -> String {
    "crt".to_string()
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            extension: default_extension(),
            dry_run: false,
        }
    }
}

/// Application settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub paths: PathSettings,
    #[serde(default)]
    pub output: OutputSettings,
}

impl Settings {
    /// Load settings from the default config file
    pub fn load_default() -> Result<Self, ConfigError> {
        let config_path = Path::new(DEFAULT_CONFIG_FILE);
        if config_path.exists() {
            Self::load_from_file(config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load settings from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })
    }
}
