use crate::input::events::{Category, InputEvent, Phase};
use crate::input::keys::key_identifier;
use crate::input::raw::{Disposition, RawKey};
use log::debug;

use super::InputState;

impl InputState {
    /// Processes a key-down event.
    ///
    /// A key that is already held is an OS auto-repeat: no began event is
    /// sent, but shortcuts are still re-evaluated.
    pub fn on_key_down(&mut self, raw: &RawKey) -> Disposition {
        let key_id = key_identifier(raw.code.as_deref(), raw.key.as_deref());
        let normalized = key_id.to_lowercase();
        let consumed = raw.target.is_ui_consumed();

        if self.held_keys.insert(normalized) {
            debug!("Key down: {key_id}");
            let event = InputEvent::new(Category::Keyboard, Phase::Begin, raw.timestamp_ms)
                .with_key(key_id);
            self.listeners.dispatch(&event, &self.context(consumed));
        } else {
            debug!("Key repeat suppressed: {key_id}");
        }

        self.evaluate_shortcuts(consumed, raw.timestamp_ms)
    }

    /// Processes a key-up event. Releasing a key that isn't held is harmless.
    pub fn on_key_up(&mut self, raw: &RawKey) -> Disposition {
        let key_id = key_identifier(raw.code.as_deref(), raw.key.as_deref());
        let consumed = raw.target.is_ui_consumed();

        self.held_keys.remove(&key_id.to_lowercase());
        debug!("Key up: {key_id}");

        let event =
            InputEvent::new(Category::Keyboard, Phase::End, raw.timestamp_ms).with_key(key_id);
        self.listeners.dispatch(&event, &self.context(consumed));

        self.evaluate_shortcuts(consumed, raw.timestamp_ms)
    }
}
