//! Configuration module for TraceVis-RS
//!
//! This module handles application configuration:
//! - Plot settings (bounding box, jitter distance, marker format, elements)
//! - Ingestion settings (batcher cadence, batch size, default sample style)
//! - Loading and saving configuration files
//!
//! # Files
//!
//! Configuration files are TOML by default; files ending in `.json` are read
//! and written as JSON. Without an explicit path the binary looks for
//! `config.toml` in the platform configuration directory:
//!
//! - **Linux**: `~/.config/dev.tracevis-rs/`
//! - **macOS**: `~/Library/Application Support/dev.tracevis-rs/`
//! - **Windows**: `%APPDATA%\dev.tracevis-rs\`
//!
//! # Example
//!
//! ```ignore
//! use tracevis_rs::config::AppConfig;
//!
//! let mut config = AppConfig::load_or_default("plot.toml");
//! config.plot.min_distance = 0.0;
//! config.save("plot.toml")?;
//! ```

pub mod settings;

pub use settings::*;

use crate::error::{Result, TraceVisError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application identifier for configuration directories
pub const APP_ID: &str = "dev.tracevis-rs";

/// Default configuration filename
pub const CONFIG_FILE: &str = "config.toml";

/// Get the path of the default configuration file
pub fn default_config_path() -> Option<PathBuf> {
    dirs_next::config_dir().map(|p| p.join(APP_ID).join(CONFIG_FILE))
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub plot: PlotConfig,

    #[serde(default)]
    pub ingest: IngestConfig,
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

impl AppConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| TraceVisError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Load a configuration file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            TraceVisError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        if is_json(path) {
            serde_json::from_str(&content).map_err(|e| {
                TraceVisError::Config(format!("Failed to parse config file {:?}: {}", path, e))
            })
        } else {
            Self::from_toml_str(&content)
        }
    }

    /// Load a configuration file, returning defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Save the configuration to disk
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content = if is_json(path) {
            serde_json::to_string_pretty(self).map_err(|e| {
                TraceVisError::Config(format!("Failed to serialize config: {}", e))
            })?
        } else {
            toml::to_string_pretty(self).map_err(|e| {
                TraceVisError::Config(format!("Failed to serialize config: {}", e))
            })?
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    TraceVisError::Config(format!("Failed to create config directory: {}", e))
                })?;
            }
        }

        std::fs::write(path, content)
            .map_err(|e| TraceVisError::Config(format!("Failed to write config: {}", e)))
    }
}
