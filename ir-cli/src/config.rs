//! Configuration loading and parsing
//!
//! The optional TOML file carries three tables: `[gpio]` for the input
//! line, `[protocol]` overriding any subset of the timing windows, and
//! `[keys]` mapping hex codes to display text on top of the built-in
//! Samsung table. Command-line flags win over file values.

use anyhow::{Context, Result};
use ir_decoder::{KeyTable, ProtocolConfig};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main application configuration (loaded from config.toml)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub gpio: GpioConfig,
    #[serde(default)]
    pub protocol: ProtocolConfig,
    /// Hex code → display text, e.g. `"0xE0E040BF" = "<POWER>"`
    #[serde(default)]
    pub keys: HashMap<String, String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GpioConfig {
    /// GPIO input pin (CLI --pin overrides)
    pub pin: Option<u32>,
    /// Invert the raw line polarity (the usual IR receiver wiring)
    #[serde(default = "default_invert")]
    pub invert: bool,
}

fn default_invert() -> bool {
    true
}

impl Default for GpioConfig {
    fn default() -> Self {
        Self {
            pin: None,
            invert: default_invert(),
        }
    }
}

impl AppConfig {
    /// Key table: built-in Samsung entries overlaid with `[keys]`
    pub fn key_table(&self) -> Result<KeyTable> {
        let mut table = KeyTable::samsung();
        table
            .extend_from_entries(self.keys.iter())
            .context("Invalid [keys] entry in config")?;
        Ok(table)
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    Ok(config)
}

/// Load configuration, falling back to defaults when no file is given
pub fn load_or_default(path: Option<&Path>) -> Result<AppConfig> {
    match path {
        Some(path) => load_config(path),
        None => Ok(AppConfig::default()),
    }
}
