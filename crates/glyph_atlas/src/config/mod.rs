//! Configuration system
//!
//! Configuration files are TOML or RON, picked by file extension. The same
//! helpers back both the build configuration and the atlas descriptor.

use std::path::Path;

use serde::de::DeserializeOwned;
pub use serde::{Deserialize, Serialize};

mod atlas_config;

pub use atlas_config::{default_font_candidates, AtlasConfig};

/// Configuration trait
pub trait Config: Serialize + DeserializeOwned + Default {
    /// Load configuration from file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        load_file(path)
    }

    /// Save configuration to file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        save_file(self, path)
    }
}

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML (`.toml`)
    Toml,
    /// Rusty Object Notation (`.ron`)
    Ron,
}

impl ConfigFormat {
    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Deserialize any value from a `.toml` or `.ron` file
pub fn load_file<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, ConfigError> {
    let path = path.as_ref();
    let format = ConfigFormat::from_path(path)?;
    let contents = std::fs::read_to_string(path)?;

    match format {
        ConfigFormat::Toml => toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
        ConfigFormat::Ron => ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
    }
}

/// Serialize any value into a `.toml` or `.ron` file
pub fn save_file<T: Serialize + ?Sized>(value: &T, path: impl AsRef<Path>) -> Result<(), ConfigError> {
    let path = path.as_ref();
    let contents = match ConfigFormat::from_path(path)? {
        ConfigFormat::Toml => {
            toml::to_string_pretty(value).map_err(|e| ConfigError::Serialize(e.to_string()))?
        }
        ConfigFormat::Ron => ron::ser::to_string_pretty(value, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))?,
    };

    std::fs::write(path, contents).map_err(ConfigError::Io)
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}
