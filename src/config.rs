//! Configuration file support for port-search
//!
//! Config file location: ~/.config/port-search/config.toml
//!
//! Example config:
//! ```toml
//! [adapter]
//! kind = "memory"
//!
//! # Opaque to the port, handed to the adapter as is
//! [adapter.env]
//! max_matches = 50
//!
//! [run]
//! keep_going = false
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::port::AdapterEnv;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub adapter: AdapterConfig,

    #[serde(default)]
    pub run: RunConfig,
}

/// Adapter selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdapterConfig {
    /// Adapter kind: memory
    #[serde(default = "default_kind")]
    pub kind: String,

    /// Adapter environment
    #[serde(default)]
    pub env: toml::Table,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            kind: default_kind(),
            env: toml::Table::new(),
        }
    }
}

impl AdapterConfig {
    /// The `[adapter.env]` table as an adapter environment
    pub fn adapter_env(&self) -> anyhow::Result<AdapterEnv> {
        Ok(AdapterEnv::new(serde_json::to_value(&self.env)?))
    }
}

fn default_kind() -> String {
    "memory".to_string()
}

/// Script runner configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RunConfig {
    /// Continue past validation errors instead of aborting
    #[serde(default)]
    pub keep_going: bool,
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("port-search")
            .join("config.toml")
    }

    /// Load config from file, returning defaults if not found
    pub fn load() -> Self {
        let path = Self::config_path();
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => {
                        tracing::debug!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse config file: {}", e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config file: {}", e);
                }
            }
        }
        Self::default()
    }

    /// Save config to file
    pub fn save(&self) -> anyhow::Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Write the example config file, replacing any existing one
    pub fn write_example() -> anyhow::Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, EXAMPLE)?;
        Ok(())
    }
}

const EXAMPLE: &str = r#"# port-search configuration
# Location: ~/.config/port-search/config.toml

[adapter]
# Adapter bound to the search port: memory
kind = "memory"

# Adapter environment. The port passes it through untouched.
[adapter.env]
# Cap on query matches (memory adapter)
# max_matches = 50

[run]
# Keep replaying a script after a validation error (default: false)
keep_going = false
"#;
