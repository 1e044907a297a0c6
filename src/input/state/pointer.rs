use crate::input::events::{Category, InputEvent, Phase};
use crate::input::raw::{Disposition, RawButton, RawMove, RawTouch};
use log::debug;

use super::InputState;

impl InputState {
    /// Processes a pointer button press.
    pub fn on_button_down(&mut self, raw: &RawButton) -> Disposition {
        self.held_buttons.insert(raw.button);
        self.dispatch_button(raw, Phase::Begin);
        Disposition::default()
    }

    /// Processes a pointer button release.
    pub fn on_button_up(&mut self, raw: &RawButton) -> Disposition {
        self.held_buttons.remove(&raw.button);
        self.dispatch_button(raw, Phase::End);
        Disposition::default()
    }

    fn dispatch_button(&self, raw: &RawButton, phase: Phase) {
        debug!("Button {} {:?} at {}", raw.button, phase, raw.position);
        let event = InputEvent::new(Category::PointerButton, phase, raw.timestamp_ms)
            .with_button(raw.button)
            .with_position(raw.position);
        self.listeners
            .dispatch(&event, &self.context(raw.target.is_ui_consumed()));
    }

    /// Processes pointer motion.
    ///
    /// The delta is taken against the previous position, which is replaced
    /// before listeners run so they see the new one through their context.
    pub fn on_pointer_move(&mut self, raw: &RawMove) -> Disposition {
        let delta = raw.position - self.pointer;
        self.pointer = raw.position;

        let event = InputEvent::new(Category::PointerMove, Phase::Change, raw.timestamp_ms)
            .with_position(raw.position)
            .with_delta(delta);
        self.listeners
            .dispatch(&event, &self.context(raw.target.is_ui_consumed()));
        Disposition::default()
    }

    /// Processes a touch event, one notification per contact point.
    pub fn on_touch(&mut self, raw: &RawTouch) -> Disposition {
        let consumed = raw.target.is_ui_consumed();
        for touch in &raw.touches {
            debug!("Touch {} {:?} at {}", touch.id, raw.phase, touch.position);
            let event = InputEvent::new(Category::Touch, raw.phase, raw.timestamp_ms)
                .with_position(touch.position);
            self.listeners.dispatch(&event, &self.context(consumed));
        }
        Disposition::default()
    }

    /// Handles the window losing focus.
    ///
    /// Key-up events can't be trusted to arrive without focus, so everything
    /// is treated as released.
    pub fn on_focus_lost(&mut self, timestamp_ms: u64) -> Disposition {
        self.reset_press_state();
        debug!("Focus lost; press state cleared");
        let event = InputEvent::new(Category::Focus, Phase::End, timestamp_ms);
        self.listeners.dispatch(&event, &self.context(false));
        Disposition::default()
    }

    /// Handles the window gaining focus. No key is assumed held.
    pub fn on_focus_gained(&mut self, timestamp_ms: u64) -> Disposition {
        debug!("Focus gained");
        let event = InputEvent::new(Category::Focus, Phase::Begin, timestamp_ms);
        self.listeners.dispatch(&event, &self.context(false));
        Disposition::default()
    }
}
