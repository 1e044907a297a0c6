//! Configuration file support for canvas-input.
//!
//! Settings are read from `~/.config/canvas-input/config.toml` (or a path given
//! on the command line) and declare the shortcuts the replay tool watches.
//!
//! If no config file exists, defaults are used.

pub mod keybindings;
pub mod types;

pub use keybindings::{KeyCombo, KeysSpec};
pub use types::{ReplayConfig, ShortcutConfig};

use anyhow::{Context, Result};
use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure.
///
/// # Example TOML
/// ```toml
/// [replay]
/// echo_pointer = false
///
/// [[shortcuts]]
/// name = "quit"
/// keys = "ControlLeft+KeyQ"
///
/// [[shortcuts]]
/// keys = ["ShiftLeft", "KeyS"]
/// prevent_default = true
/// fire_on_end = true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Shortcuts bound at startup
    #[serde(default)]
    pub shortcuts: Vec<ShortcutConfig>,

    /// Replay mode output options
    #[serde(default)]
    pub replay: ReplayConfig,
}

impl Config {
    /// Drops shortcut entries whose keys can't be parsed, logging a warning
    /// for each.
    fn validate(&mut self) {
        self.shortcuts.retain(|shortcut| match shortcut.keys.to_combo() {
            Ok(_) => true,
            Err(err) => {
                warn!(
                    "Ignoring shortcut {}: {err}",
                    shortcut.name.as_deref().unwrap_or("<unnamed>")
                );
                false
            }
        });
    }

    /// Returns the path to the configuration file.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("canvas-input");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Loads configuration from `config_path`, or returns defaults if the file
    /// doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or contains
    /// invalid TOML.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config = Self::parse(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;
        config.validate();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    fn parse(config_str: &str) -> Result<Self> {
        Ok(toml::from_str(config_str)?)
    }

    /// JSON schema describing the config file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}
