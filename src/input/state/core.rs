//! Press-state tracking, lifecycle and public queries.

use crate::input::context::InputContext;
use crate::input::events::{ActionKind, Point};
use crate::input::listeners::{Callback, ListenerSet};
use crate::input::raw::{Disposition, RawEvent};
use crate::input::session::InputSource;
use crate::input::shortcuts::{ShortcutOptions, ShortcutTable};
use anyhow::{Context, Result};
use log::{debug, info};
use std::collections::HashSet;

/// Input state for one window or canvas.
///
/// Owns all press state, registered listeners and shortcuts. The host's event
/// loop owns the `InputState` and feeds it raw events through
/// [`handle`](Self::handle) (or the per-event `on_*` methods) while listening.
#[derive(Debug, Default)]
pub struct InputState {
    /// Normalized (lower-case) identifiers of keys currently down
    pub(super) held_keys: HashSet<String>,
    /// Pointer buttons currently down
    pub(super) held_buttons: HashSet<u16>,
    /// Last position reported by a pointer move
    pub(super) pointer: Point,
    /// Whether a source is attached and delivering events
    pub(super) listening: bool,
    pub(super) listeners: ListenerSet,
    pub(super) shortcuts: ShortcutTable,
}

impl InputState {
    /// Creates an idle state with nothing held and nothing bound.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches `source` so it starts delivering events.
    ///
    /// Does nothing if already listening. If the source fails to attach, the
    /// state stays idle and the error is returned.
    pub fn start<S: InputSource + ?Sized>(&mut self, source: &mut S) -> Result<()> {
        if self.listening {
            debug!("Input already listening; ignoring start for {}", source.name());
            return Ok(());
        }

        source
            .attach()
            .with_context(|| format!("Failed to attach input source '{}'", source.name()))?;
        self.listening = true;
        info!("Listening for input from {}", source.name());
        Ok(())
    }

    /// Detaches `source` and forgets all press and shortcut activity.
    ///
    /// Bindings and listeners are kept, so the state can be started again.
    pub fn stop<S: InputSource + ?Sized>(&mut self, source: &mut S) {
        if !self.listening {
            return;
        }

        source.detach();
        self.listening = false;
        self.reset_press_state();
        info!("Stopped listening for input from {}", source.name());
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Routes one raw event to its handler.
    ///
    /// Events arriving while not listening are dropped.
    pub fn handle(&mut self, event: &RawEvent) -> Disposition {
        if !self.listening {
            debug!("Dropping {event:?}: input is not listening");
            return Disposition::default();
        }

        match event {
            RawEvent::KeyDown(key) => self.on_key_down(key),
            RawEvent::KeyUp(key) => self.on_key_up(key),
            RawEvent::ButtonDown(button) => self.on_button_down(button),
            RawEvent::ButtonUp(button) => self.on_button_up(button),
            RawEvent::PointerMove(motion) => self.on_pointer_move(motion),
            RawEvent::Touch(touch) => self.on_touch(touch),
            RawEvent::FocusLost { timestamp_ms } => self.on_focus_lost(*timestamp_ms),
            RawEvent::FocusGained { timestamp_ms } => self.on_focus_gained(*timestamp_ms),
        }
    }

    /// Read-only view of the current press state, as handed to callbacks.
    pub fn context(&self, consumed_by_ui: bool) -> InputContext<'_> {
        InputContext::new(&self.held_keys, &self.held_buttons, self.pointer, consumed_by_ui)
    }

    /// Case-insensitive check whether a key is currently down.
    pub fn is_key_pressed(&self, key_id: &str) -> bool {
        self.context(false).is_key_pressed(key_id)
    }

    pub fn is_button_pressed(&self, button_id: u16) -> bool {
        self.context(false).is_button_pressed(button_id)
    }

    /// Last known pointer position.
    pub fn pointer_position(&self) -> Point {
        self.pointer
    }

    /// Normalized identifiers of all keys currently down, sorted.
    pub fn held_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.held_keys.iter().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Canonical ids of shortcuts currently active.
    pub fn active_shortcuts(&self) -> impl Iterator<Item = &str> {
        self.shortcuts.active_ids()
    }

    /// Registers a listener for began, changed or ended events.
    pub fn bind_action(&mut self, kind: ActionKind, callback: Callback) {
        self.listeners.bind(kind, callback);
    }

    /// Removes the first registration of `callback` for `kind`.
    pub fn unbind_action(&mut self, kind: ActionKind, callback: &Callback) -> bool {
        self.listeners.unbind(kind, callback)
    }

    /// Binds `callback` to a set of keys held together.
    ///
    /// Returns the canonical shortcut id, or `None` if no key was usable.
    pub fn bind_shortcut<I, S>(
        &mut self,
        keys: I,
        callback: Callback,
        options: ShortcutOptions,
    ) -> Option<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.shortcuts.bind(keys, callback, options)
    }

    /// Removes shortcut bindings for a key set; see [`ShortcutTable::unbind`].
    pub fn unbind_shortcut<I, S>(&mut self, keys: I, callback: Option<&Callback>) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.shortcuts.unbind(keys, callback)
    }

    pub fn shortcuts(&self) -> &ShortcutTable {
        &self.shortcuts
    }

    /// Re-evaluates shortcuts against the keys held right now.
    pub(super) fn evaluate_shortcuts(
        &mut self,
        consumed_by_ui: bool,
        timestamp_ms: u64,
    ) -> Disposition {
        let input =
            InputContext::new(&self.held_keys, &self.held_buttons, self.pointer, consumed_by_ui);
        self.shortcuts.evaluate(&input, timestamp_ms)
    }

    /// Clears held keys, held buttons and active shortcuts together.
    pub(super) fn reset_press_state(&mut self) {
        self.held_keys.clear();
        self.held_buttons.clear();
        self.shortcuts.clear_active();
    }
}
