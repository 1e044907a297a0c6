//! Input normalization and shortcut detection.
//!
//! This module turns raw platform events (keyboard, pointer, touch, focus)
//! into normalized [`InputEvent`]s, keeps track of what is currently held,
//! and fires shortcut callbacks on the edges of multi-key combinations.

pub mod context;
pub mod events;
pub mod keys;
pub mod listeners;
pub mod raw;
pub mod session;
pub mod shortcuts;
pub mod state;

// Re-export commonly used types at module level
pub use context::InputContext;
pub use events::{ActionKind, Category, InputEvent, Phase, Point};
pub use listeners::{Callback, DispatchReport, HandlerResult, ListenerSet};
pub use raw::{Disposition, RawButton, RawEvent, RawKey, RawMove, RawTouch, Target, TouchPoint};
pub use session::{InputSource, Session};
pub use shortcuts::{ShortcutBinding, ShortcutOptions, ShortcutTable};
pub use state::InputState;
