//! Shortcut key-combination parsing for configuration files.
//!
//! Users write combinations as "ControlLeft+KeyQ" strings; this module splits
//! them into the key lists that [`ShortcutTable::bind`](crate::input::ShortcutTable::bind)
//! accepts.

use crate::input::keys::{canonical_id, normalize_keys};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A parsed key combination, in the order written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombo {
    pub keys: Vec<String>,
}

impl KeyCombo {
    /// Parse a combination string like "ControlLeft+ShiftLeft+KeyZ".
    ///
    /// Keys can appear in any order and spaces around '+' are ignored. A '+'
    /// with nothing on one side is the '+' key itself (e.g. "ShiftLeft++").
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Empty key combination".to_string());
        }

        let mut keys = Vec::new();
        let mut literal_plus = false;
        for part in s.split('+').map(str::trim) {
            if part.is_empty() {
                literal_plus = true;
            } else {
                keys.push(part.to_string());
            }
        }
        if literal_plus {
            keys.push("+".to_string());
        }

        Ok(Self { keys })
    }

    /// Canonical shortcut id for this combination.
    pub fn id(&self) -> String {
        canonical_id(&normalize_keys(&self.keys))
    }
}

/// Keys of a configured shortcut: either a combination string or a list.
///
/// ```toml
/// keys = "ControlLeft+KeyQ"
/// keys = ["ControlLeft", "KeyQ"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum KeysSpec {
    Combo(String),
    List(Vec<String>),
}

impl KeysSpec {
    pub fn to_combo(&self) -> Result<KeyCombo, String> {
        match self {
            KeysSpec::Combo(s) => KeyCombo::parse(s),
            KeysSpec::List(keys) => {
                let keys: Vec<String> = keys
                    .iter()
                    .map(|k| k.trim())
                    .filter(|k| !k.is_empty())
                    .map(str::to_string)
                    .collect();
                if keys.is_empty() {
                    Err("Empty key list".to_string())
                } else {
                    Ok(KeyCombo { keys })
                }
            }
        }
    }
}
