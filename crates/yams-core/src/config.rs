//! Application configuration.
//!
//! ```ignore
//! use yams_core::config::YamsConfig;
//!
//! let config = YamsConfig::builder()
//!     .history_path("games.json")
//!     .debounce_ms(50)
//!     .build();
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct YamsConfig {
    /// History file holding players, notations and games
    pub history_path: PathBuf,
    /// Stats recomputation debounce window
    pub debounce_ms: u64,
    /// Notation used for new games when none is named
    pub default_notation: String,
    /// Destination of `export` when no path is given
    pub export_path: PathBuf,
}

impl Default for YamsConfig {
    fn default() -> Self {
        Self {
            history_path: PathBuf::from("yams-history.json"),
            debounce_ms: 150,
            default_notation: "classic".to_string(),
            export_path: PathBuf::from("stats.tsv"),
        }
    }
}

impl YamsConfig {
    pub fn builder() -> YamsConfigBuilder {
        YamsConfigBuilder::default()
    }

    /// Load from a TOML file. Keys that are absent keep their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config: YamsConfig = toml::from_str(&content)?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}

/// Builder for YamsConfig
#[derive(Debug, Clone, Default)]
pub struct YamsConfigBuilder {
    history_path: Option<PathBuf>,
    debounce_ms: Option<u64>,
    default_notation: Option<String>,
    export_path: Option<PathBuf>,
}

impl YamsConfigBuilder {
    pub fn history_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.history_path = Some(path.into());
        self
    }

    pub fn debounce_ms(mut self, millis: u64) -> Self {
        self.debounce_ms = Some(millis);
        self
    }

    pub fn default_notation<S: Into<String>>(mut self, name: S) -> Self {
        self.default_notation = Some(name.into());
        self
    }

    pub fn export_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.export_path = Some(path.into());
        self
    }

    pub fn build(self) -> YamsConfig {
        let default = YamsConfig::default();
        YamsConfig {
            history_path: self.history_path.unwrap_or(default.history_path),
            debounce_ms: self.debounce_ms.unwrap_or(default.debounce_ms),
            default_notation: self.default_notation.unwrap_or(default.default_notation),
            export_path: self.export_path.unwrap_or(default.export_path),
        }
    }
}
