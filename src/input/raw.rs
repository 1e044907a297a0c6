//! Raw platform event shapes delivered by the host windowing layer.
//!
//! Backends translate their native events into these types before handing them
//! to [`InputState::handle`](super::InputState::handle). The types derive serde
//! so scripted sessions can be written as TOML.

use super::events::{Phase, Point};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Element kinds that consume typing and clicks before the application sees them.
const UI_CONSUMING_TAGS: [&str; 4] = ["input", "textarea", "select", "button"];

/// The element a native event was targeted at.
///
/// `Target::default()` describes the bare canvas or window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Target {
    /// Element tag name, e.g. `"input"` or `"canvas"`
    #[serde(default)]
    pub tag: Option<String>,
    /// Whether the element is content-editable
    #[serde(default)]
    pub content_editable: bool,
}

impl Target {
    pub fn element(tag: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            content_editable: false,
        }
    }

    pub fn editable() -> Self {
        Self {
            tag: None,
            content_editable: true,
        }
    }

    /// True when the target is a form field, text area, dropdown, button or
    /// content-editable element.
    pub fn is_ui_consumed(&self) -> bool {
        if self.content_editable {
            return true;
        }
        self.tag.as_deref().is_some_and(|tag| {
            UI_CONSUMING_TAGS
                .iter()
                .any(|consuming| tag.eq_ignore_ascii_case(consuming))
        })
    }
}

/// Keyboard key down/up.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RawKey {
    /// Physical, layout-independent code (e.g. `"KeyW"`, `"ArrowRight"`)
    #[serde(default)]
    pub code: Option<String>,
    /// Logical key value (e.g. `"w"`, `"Enter"`)
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub target: Target,
    #[serde(default)]
    pub timestamp_ms: u64,
}

impl RawKey {
    /// Key event carrying a physical code.
    pub fn code(code: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            ..Self::default()
        }
    }

    /// Key event carrying only a logical key value.
    pub fn logical(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            ..Self::default()
        }
    }

    pub fn on(mut self, target: Target) -> Self {
        self.target = target;
        self
    }

    pub fn at(mut self, timestamp_ms: u64) -> Self {
        self.timestamp_ms = timestamp_ms;
        self
    }
}

/// Pointer button down/up.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RawButton {
    pub button: u16,
    #[serde(default)]
    pub position: Point,
    #[serde(default)]
    pub target: Target,
    #[serde(default)]
    pub timestamp_ms: u64,
}

/// Pointer motion to an absolute position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RawMove {
    pub position: Point,
    #[serde(default)]
    pub target: Target,
    #[serde(default)]
    pub timestamp_ms: u64,
}

/// One contact point of a touch event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TouchPoint {
    pub id: u64,
    pub position: Point,
}

/// Touch start/move/end with every contact point that changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RawTouch {
    pub phase: Phase,
    #[serde(default)]
    pub touches: Vec<TouchPoint>,
    #[serde(default)]
    pub target: Target,
    #[serde(default)]
    pub timestamp_ms: u64,
}

/// Any raw event the host delivers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RawEvent {
    KeyDown(RawKey),
    KeyUp(RawKey),
    ButtonDown(RawButton),
    ButtonUp(RawButton),
    PointerMove(RawMove),
    Touch(RawTouch),
    FocusLost {
        #[serde(default)]
        timestamp_ms: u64,
    },
    FocusGained {
        #[serde(default)]
        timestamp_ms: u64,
    },
}

/// Side effects the host should apply to the native event after handling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Disposition {
    pub prevent_default: bool,
    pub stop_propagation: bool,
}

impl Disposition {
    pub fn merge(&mut self, other: Disposition) {
        self.prevent_default |= other.prevent_default;
        self.stop_propagation |= other.stop_propagation;
    }
}
