//! Normalized input event types handed to listeners.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Sub;

/// Which family of device produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Keyboard keys and synthesized shortcut transitions
    Keyboard,
    /// Mouse or pen button press/release
    PointerButton,
    /// Pointer motion
    PointerMove,
    /// Touch contact points
    Touch,
    /// Window focus gained or lost
    Focus,
}

/// Edge of an interaction: started, changed while ongoing, or finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Begin,
    Change,
    End,
}

impl Phase {
    /// The listener list that receives events of this phase.
    pub fn action_kind(self) -> ActionKind {
        match self {
            Phase::Begin => ActionKind::Began,
            Phase::Change => ActionKind::Changed,
            Phase::End => ActionKind::Ended,
        }
    }
}

/// Selects one of the three ordered listener lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Began,
    Changed,
    Ended,
}

/// A position or offset in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One normalized input notification.
///
/// Built from a single raw platform event (or synthesized for shortcuts and
/// focus changes) and passed to listeners by reference. Nothing keeps it after
/// dispatch returns.
#[derive(Debug, Clone, PartialEq)]
pub struct InputEvent {
    pub category: Category,
    pub phase: Phase,
    /// Key identifier, or the canonical shortcut id for synthesized shortcut events
    pub key_id: Option<String>,
    pub button_id: Option<u16>,
    pub position: Option<Point>,
    pub delta: Option<Point>,
    pub timestamp_ms: u64,
}

impl InputEvent {
    pub(crate) fn new(category: Category, phase: Phase, timestamp_ms: u64) -> Self {
        Self {
            category,
            phase,
            key_id: None,
            button_id: None,
            position: None,
            delta: None,
            timestamp_ms,
        }
    }

    pub(crate) fn with_key(mut self, key_id: impl Into<String>) -> Self {
        self.key_id = Some(key_id.into());
        self
    }

    pub(crate) fn with_button(mut self, button_id: u16) -> Self {
        self.button_id = Some(button_id);
        self
    }

    pub(crate) fn with_position(mut self, position: Point) -> Self {
        self.position = Some(position);
        self
    }

    pub(crate) fn with_delta(mut self, delta: Point) -> Self {
        self.delta = Some(delta);
        self
    }

    /// The listener list this event is delivered to.
    pub fn action_kind(&self) -> ActionKind {
        self.phase.action_kind()
    }
}

impl fmt::Display for InputEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}/{:?}", self.category, self.phase)?;
        if let Some(key) = &self.key_id {
            write!(f, " key={key}")?;
        }
        if let Some(button) = self.button_id {
            write!(f, " button={button}")?;
        }
        if let Some(position) = self.position {
            write!(f, " at={position}")?;
        }
        if let Some(delta) = self.delta {
            write!(f, " delta={delta}")?;
        }
        write!(f, " t={}", self.timestamp_ms)
    }
}
