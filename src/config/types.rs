//! Configuration type definitions.

use super::keybindings::KeysSpec;
use crate::input::ShortcutOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A shortcut declared in the config file.
///
/// ```toml
/// [[shortcuts]]
/// name = "quit"
/// keys = "ControlLeft+KeyQ"
/// fire_on_end = true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ShortcutConfig {
    /// Label printed when the shortcut fires (defaults to the canonical id)
    #[serde(default)]
    pub name: Option<String>,

    /// Key combination, as a "A+B" string or a list of key names
    pub keys: KeysSpec,

    /// Activation behavior; every switch defaults to false
    #[serde(flatten)]
    pub options: ShortcutOptions,
}

/// Settings for the `--script` replay mode.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ReplayConfig {
    /// Print pointer-move events (they are usually the noisiest part of a script)
    #[serde(default = "default_echo_pointer")]
    pub echo_pointer: bool,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            echo_pointer: default_echo_pointer(),
        }
    }
}

fn default_echo_pointer() -> bool {
    true
}
