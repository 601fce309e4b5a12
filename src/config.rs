//! Client configuration.
//!
//! Loaded from `~/.config/haulog/config.toml`. Every key has a default, so
//! a missing file is not an error; the client just talks to a local
//! backend and the public geocoder.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Base URL of the fleet API when no config file overrides it.
const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api/";

/// Nominatim-compatible search endpoint used for location lookups.
const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org/search";

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An I/O error occurred while reading the config file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The config file exists but is not valid TOML.
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    /// Base URL of the fleet API, e.g. `http://localhost:8000/api/`.
    pub api_base_url: String,
    /// Geocoding search endpoint (Nominatim-compatible).
    pub geocoder_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            geocoder_url: DEFAULT_GEOCODER_URL.to_string(),
        }
    }
}

impl Config {
    /// Loads config from the XDG config directory, falling back to defaults
    /// when no file exists.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Loads config from the given path; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// The config file path: `~/.config/haulog/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|c| c.join("haulog").join("config.toml"))
    }
}
