//! API key configuration.
//!
//! Keys are read from a small JSON document:
//!
//! ```json
//! { "google-key": "AIza..." }
//! ```

use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_KEY_FILE: &str = "keys.cfg";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to open key file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Key file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct KeyConfig {
    /// Places API key. Empty means point of interest lookups are disabled.
    #[serde(rename = "google-key", default)]
    pub google_key: String,
}

impl KeyConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    pub fn has_key(&self) -> bool {
        !self.google_key.trim().is_empty()
    }
}
