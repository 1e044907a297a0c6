//! Read-only view of press state handed to callbacks during dispatch.

use super::events::Point;
use super::keys::normalize_key;
use std::collections::HashSet;

/// What a listener or shortcut callback can see while it runs.
///
/// The view reflects the state after the triggering event was applied: a key
/// that just went down is already held, and a pointer move has already
/// replaced the tracked position.
#[derive(Debug, Clone, Copy)]
pub struct InputContext<'a> {
    held_keys: &'a HashSet<String>,
    held_buttons: &'a HashSet<u16>,
    pointer: Point,
    consumed_by_ui: bool,
}

impl<'a> InputContext<'a> {
    /// `held_keys` must hold normalized (lower-case) identifiers.
    pub fn new(
        held_keys: &'a HashSet<String>,
        held_buttons: &'a HashSet<u16>,
        pointer: Point,
        consumed_by_ui: bool,
    ) -> Self {
        Self {
            held_keys,
            held_buttons,
            pointer,
            consumed_by_ui,
        }
    }

    /// Case-insensitive check whether a key is currently down.
    pub fn is_key_pressed(&self, key_id: &str) -> bool {
        normalize_key(key_id).is_some_and(|key| self.held_keys.contains(&key))
    }

    pub fn is_button_pressed(&self, button_id: u16) -> bool {
        self.held_buttons.contains(&button_id)
    }

    /// Last known pointer position.
    pub fn pointer_position(&self) -> Point {
        self.pointer
    }

    /// True if the triggering native event targeted a form control or an
    /// editable element.
    pub fn consumed_by_ui(&self) -> bool {
        self.consumed_by_ui
    }

    pub(crate) fn held_keys(&self) -> &'a HashSet<String> {
        self.held_keys
    }
}
