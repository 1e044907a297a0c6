use super::*;
use crate::input::events::{ActionKind, Category, InputEvent, Phase, Point};
use crate::input::listeners::Callback;
use crate::input::raw::{RawButton, RawEvent, RawKey, RawMove, RawTouch, Target, TouchPoint};
use crate::input::session::InputSource;
use crate::input::shortcuts::ShortcutOptions;
use std::cell::RefCell;
use std::rc::Rc;

struct NullSource;

impl InputSource for NullSource {
    fn name(&self) -> &str {
        "null"
    }

    fn attach(&mut self) -> anyhow::Result<()> {
        Ok(())
    }

    fn detach(&mut self) {}
}

type EventLog = Rc<RefCell<Vec<(InputEvent, bool)>>>;

fn create_listening_state() -> InputState {
    let mut state = InputState::new();
    state.start(&mut NullSource).unwrap();
    state
}

fn recorder(log: &EventLog) -> Callback {
    let log = Rc::clone(log);
    Callback::new(move |event, input| {
        log.borrow_mut().push((event.clone(), input.consumed_by_ui()));
        Ok(())
    })
}

fn phases(log: &EventLog) -> Vec<Phase> {
    log.borrow().iter().map(|(event, _)| event.phase).collect()
}

fn down(code: &str) -> RawEvent {
    RawEvent::KeyDown(RawKey::code(code))
}

fn up(code: &str) -> RawEvent {
    RawEvent::KeyUp(RawKey::code(code))
}

#[test]
fn test_key_is_pressed_between_begin_and_end() {
    let mut state = create_listening_state();

    state.handle(&down("KeyW"));
    assert!(state.is_key_pressed("KeyW"));
    assert!(state.is_key_pressed("keyw"));

    state.handle(&up("KeyW"));
    assert!(!state.is_key_pressed("KeyW"));
}

#[test]
fn test_blank_queries_are_false() {
    let mut state = create_listening_state();
    state.handle(&down("KeyW"));
    assert!(!state.is_key_pressed(""));
    assert!(!state.is_key_pressed("   "));
}

#[test]
fn test_logical_key_fallback_matches_code_names() {
    let mut state = create_listening_state();
    state.handle(&RawEvent::KeyDown(RawKey::logical("q")));
    assert!(state.is_key_pressed("KeyQ"));

    // The physical code for the same key releases it.
    state.handle(&up("KeyQ"));
    assert!(!state.is_key_pressed("KeyQ"));
}

#[test]
fn test_events_before_start_are_ignored() {
    let mut state = InputState::new();
    let log = EventLog::default();
    state.bind_action(ActionKind::Began, recorder(&log));

    state.handle(&down("KeyW"));

    assert!(!state.is_key_pressed("KeyW"));
    assert!(log.borrow().is_empty());
    assert_eq!(state.pointer_position(), Point::default());
}

#[test]
fn test_auto_repeat_sends_one_began_event() {
    let mut state = create_listening_state();
    let log = EventLog::default();
    state.bind_action(ActionKind::Began, recorder(&log));

    state.handle(&down("KeyD"));
    state.handle(&down("KeyD"));
    state.handle(&down("KeyD"));

    let log = log.borrow();
    assert_eq!(log.len(), 1);
    let (event, consumed) = &log[0];
    assert_eq!(event.category, Category::Keyboard);
    assert_eq!(event.key_id.as_deref(), Some("KeyD"));
    assert!(!consumed);
}

#[test]
fn test_auto_repeat_still_reevaluates_shortcuts() {
    let mut state = create_listening_state();
    let log = EventLog::default();
    state.bind_shortcut(["KeyA", "KeyB"], recorder(&log), ShortcutOptions::default());

    // Typing guard blocks activation on the first press of B.
    state.handle(&down("KeyA"));
    state.handle(&RawEvent::KeyDown(
        RawKey::code("KeyB").on(Target::element("input")),
    ));
    assert!(log.borrow().is_empty());

    // The repeat of B arrives with the canvas focused and completes the combo.
    state.handle(&down("KeyB"));
    assert_eq!(phases(&log), vec![Phase::Begin]);
}

#[test]
fn test_key_up_always_sends_ended_event() {
    let mut state = create_listening_state();
    let log = EventLog::default();
    state.bind_action(ActionKind::Ended, recorder(&log));

    // Releasing a key that was never pressed is harmless.
    state.handle(&up("KeyZ"));

    assert_eq!(phases(&log), vec![Phase::End]);
    assert!(!state.is_key_pressed("KeyZ"));
}

#[test]
fn test_shortcut_fires_once_in_either_order() {
    for order in [["KeyA", "KeyB"], ["KeyB", "KeyA"]] {
        let mut state = create_listening_state();
        let log = EventLog::default();
        state.bind_shortcut(["KeyA", "KeyB"], recorder(&log), ShortcutOptions::default());

        state.handle(&down(order[0]));
        state.handle(&down(order[1]));
        state.handle(&down(order[1]));
        state.handle(&down(order[0]));

        assert_eq!(phases(&log), vec![Phase::Begin], "order {order:?}");
        assert_eq!(state.active_shortcuts().collect::<Vec<_>>(), vec!["keya+keyb"]);
    }
}

#[test]
fn test_shortcut_release_respects_fire_on_end() {
    for (fire_on_end, expected) in [
        (true, vec![Phase::Begin, Phase::End]),
        (false, vec![Phase::Begin]),
    ] {
        let mut state = create_listening_state();
        let log = EventLog::default();
        state.bind_shortcut(
            ["KeyA", "KeyB"],
            recorder(&log),
            ShortcutOptions {
                fire_on_end,
                ..ShortcutOptions::default()
            },
        );

        state.handle(&down("KeyA"));
        state.handle(&down("KeyB"));
        state.handle(&up("KeyB"));
        state.handle(&up("KeyA"));

        assert_eq!(phases(&log), expected);
        assert_eq!(state.active_shortcuts().count(), 0);
    }
}

#[test]
fn test_focus_loss_resets_held_and_active_state() {
    let mut state = create_listening_state();
    let log = EventLog::default();
    state.bind_shortcut(["KeyA", "KeyB"], recorder(&log), ShortcutOptions::default());

    state.handle(&down("KeyA"));
    state.handle(&down("KeyB"));
    state.handle(&RawEvent::ButtonDown(RawButton {
        button: 0,
        ..RawButton::default()
    }));
    state.handle(&RawEvent::FocusLost { timestamp_ms: 10 });

    assert!(!state.is_key_pressed("KeyA"));
    assert!(!state.is_key_pressed("KeyB"));
    assert!(!state.is_button_pressed(0));
    assert_eq!(state.active_shortcuts().count(), 0);

    state.handle(&RawEvent::FocusGained { timestamp_ms: 20 });
    assert!(!state.is_key_pressed("KeyA"));
    state.handle(&down("KeyA"));
    state.handle(&down("KeyB"));

    assert_eq!(phases(&log), vec![Phase::Begin, Phase::Begin]);
}

#[test]
fn test_focus_changes_send_synthetic_events() {
    let mut state = create_listening_state();
    let began = EventLog::default();
    let ended = EventLog::default();
    state.bind_action(ActionKind::Began, recorder(&began));
    state.bind_action(ActionKind::Ended, recorder(&ended));

    state.handle(&RawEvent::FocusLost { timestamp_ms: 3 });
    state.handle(&RawEvent::FocusGained { timestamp_ms: 4 });

    let ended = ended.borrow();
    let lost = &ended[0].0;
    assert_eq!((lost.category, lost.phase, lost.timestamp_ms), (Category::Focus, Phase::End, 3));
    let began = began.borrow();
    let gained = &began[0].0;
    assert_eq!((gained.category, gained.phase), (Category::Focus, Phase::Begin));
}

#[test]
fn test_typing_guard_blocks_shortcuts_in_text_fields() {
    let mut state = create_listening_state();
    let log = EventLog::default();
    state.bind_shortcut(["ControlLeft", "KeyS"], recorder(&log), ShortcutOptions::default());

    for target in [Target::element("textarea"), Target::editable()] {
        state.handle(&RawEvent::KeyDown(RawKey::code("ControlLeft").on(target.clone())));
        state.handle(&RawEvent::KeyDown(RawKey::code("KeyS").on(target.clone())));
        assert!(state.is_key_pressed("KeyS"));
        state.handle(&RawEvent::KeyUp(RawKey::code("KeyS").on(target.clone())));
        state.handle(&RawEvent::KeyUp(RawKey::code("ControlLeft").on(target)));
    }

    assert!(log.borrow().is_empty());
}

#[test]
fn test_listeners_see_consumed_flag_for_form_targets() {
    let mut state = create_listening_state();
    let log = EventLog::default();
    state.bind_action(ActionKind::Began, recorder(&log));

    state.handle(&RawEvent::KeyDown(RawKey::code("KeyA").on(Target::element("input"))));
    state.handle(&down("KeyB"));

    let flags: Vec<bool> = log.borrow().iter().map(|(_, consumed)| *consumed).collect();
    assert_eq!(flags, vec![true, false]);
}

#[test]
fn test_failing_listener_does_not_break_dispatch() {
    let mut state = create_listening_state();
    let log = EventLog::default();
    state.bind_action(
        ActionKind::Began,
        Callback::new(|_, _| Err(anyhow::anyhow!("listener bug"))),
    );
    state.bind_action(ActionKind::Began, recorder(&log));

    state.handle(&down("KeyE"));

    assert_eq!(log.borrow().len(), 1);
    assert!(state.is_key_pressed("KeyE"));
}

#[test]
fn test_unbind_action_stops_delivery() {
    let mut state = create_listening_state();
    let log = EventLog::default();
    let callback = recorder(&log);
    state.bind_action(ActionKind::Began, callback.clone());

    state.handle(&down("KeyA"));
    assert!(state.unbind_action(ActionKind::Began, &callback));
    state.handle(&down("KeyB"));

    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn test_control_q_scenario() {
    let mut state = create_listening_state();
    let log = EventLog::default();
    let id = state.bind_shortcut(
        ["ControlLeft", "KeyQ"],
        recorder(&log),
        ShortcutOptions::default(),
    );
    assert_eq!(id.as_deref(), Some("controlleft+keyq"));

    state.handle(&down("ControlLeft"));
    state.handle(&down("KeyQ"));
    {
        let log = log.borrow();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].0.key_id.as_deref(), Some("controlleft+keyq"));
        assert_eq!(log[0].0.phase, Phase::Begin);
    }

    state.handle(&up("KeyQ"));
    assert_eq!(log.borrow().len(), 1);
    assert!(state.is_key_pressed("ControlLeft"));
}

#[test]
fn test_shortcut_activation_returns_disposition() {
    let mut state = create_listening_state();
    let log = EventLog::default();
    state.bind_shortcut(
        ["ControlLeft", "KeyP"],
        recorder(&log),
        ShortcutOptions {
            prevent_default: true,
            ..ShortcutOptions::default()
        },
    );

    assert!(!state.handle(&down("ControlLeft")).prevent_default);
    let disposition = state.handle(&down("KeyP"));
    assert!(disposition.prevent_default);
    assert!(!disposition.stop_propagation);
}

#[test]
fn test_buttons_track_press_state() {
    let mut state = create_listening_state();
    let log = EventLog::default();
    state.bind_action(ActionKind::Began, recorder(&log));
    let press = RawButton {
        button: 2,
        position: Point::new(4.0, 5.0),
        ..RawButton::default()
    };

    state.handle(&RawEvent::ButtonDown(press.clone()));
    state.handle(&RawEvent::ButtonDown(press.clone()));
    assert!(state.is_button_pressed(2));
    assert!(!state.is_button_pressed(0));

    state.handle(&RawEvent::ButtonUp(press));
    assert!(!state.is_button_pressed(2));

    // Buttons are never repeat-suppressed.
    let log = log.borrow();
    assert_eq!(log.len(), 2);
    let event = &log[0].0;
    assert_eq!(event.button_id, Some(2));
    assert_eq!(event.position, Some(Point::new(4.0, 5.0)));
}

#[test]
fn test_pointer_move_reports_delta_and_updates_position() {
    let mut state = create_listening_state();
    let log = EventLog::default();
    state.bind_action(ActionKind::Changed, recorder(&log));

    for (x, y) in [(10.0, 10.0), (15.0, 7.0)] {
        state.handle(&RawEvent::PointerMove(RawMove {
            position: Point::new(x, y),
            ..RawMove::default()
        }));
    }

    let log = log.borrow();
    assert_eq!(log[0].0.delta, Some(Point::new(10.0, 10.0)));
    assert_eq!(log[1].0.position, Some(Point::new(15.0, 7.0)));
    assert_eq!(log[1].0.delta, Some(Point::new(5.0, -3.0)));
    assert_eq!(state.pointer_position(), Point::new(15.0, 7.0));
}

#[test]
fn test_touch_points_dispatch_independently() {
    let mut state = create_listening_state();
    let log = EventLog::default();
    state.bind_action(ActionKind::Changed, recorder(&log));

    state.handle(&RawEvent::Touch(RawTouch {
        phase: Phase::Change,
        touches: vec![
            TouchPoint {
                id: 1,
                position: Point::new(1.0, 1.0),
            },
            TouchPoint {
                id: 2,
                position: Point::new(9.0, 9.0),
            },
        ],
        target: Target::default(),
        timestamp_ms: 7,
    }));

    let positions: Vec<_> = log.borrow().iter().map(|(e, _)| e.position).collect();
    assert_eq!(positions, vec![Some(Point::new(1.0, 1.0)), Some(Point::new(9.0, 9.0))]);
    assert!(log.borrow().iter().all(|(e, _)| e.category == Category::Touch));
    assert!(state.held_keys().is_empty());
}

#[test]
fn test_stop_clears_state_but_keeps_bindings() {
    let mut source = NullSource;
    let mut state = InputState::new();
    state.start(&mut source).unwrap();
    let log = EventLog::default();
    state.bind_shortcut(["KeyA"], recorder(&log), ShortcutOptions::default());

    state.handle(&down("KeyA"));
    state.stop(&mut source);
    assert_eq!(state.active_shortcuts().count(), 0);
    assert_eq!(state.shortcuts().bindings().len(), 1);

    state.start(&mut source).unwrap();
    state.handle(&down("KeyA"));
    assert_eq!(phases(&log), vec![Phase::Begin, Phase::Begin]);
}

#[test]
fn test_changed_listener_reads_new_pointer_position() {
    let mut state = create_listening_state();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    state.bind_action(
        ActionKind::Changed,
        Callback::new(move |event, input| {
            sink.borrow_mut().push((event.position, input.pointer_position()));
            Ok(())
        }),
    );

    state.handle(&RawEvent::PointerMove(RawMove {
        position: Point::new(12.0, 8.0),
        ..RawMove::default()
    }));

    let target = Point::new(12.0, 8.0);
    assert_eq!(*seen.borrow(), vec![(Some(target), target)]);
}

#[test]
fn test_button_listener_sees_modifier_state() {
    let mut state = create_listening_state();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    state.bind_action(
        ActionKind::Began,
        Callback::new(move |event, input| {
            if event.category == Category::PointerButton {
                let shift = input.is_key_pressed("ShiftLeft");
                sink.borrow_mut().push((shift, input.is_button_pressed(0)));
            }
            Ok(())
        }),
    );
    let click = RawEvent::ButtonDown(RawButton {
        button: 0,
        ..RawButton::default()
    });

    state.handle(&click);
    state.handle(&RawEvent::ButtonUp(RawButton::default()));
    state.handle(&down("ShiftLeft"));
    state.handle(&click);

    assert_eq!(*seen.borrow(), vec![(false, true), (true, true)]);
}

#[test]
fn test_key_listener_sees_its_own_key_held() {
    let mut state = create_listening_state();
    let seen = Rc::new(RefCell::new(Vec::new()));
    for kind in [ActionKind::Began, ActionKind::Ended] {
        let sink = Rc::clone(&seen);
        state.bind_action(
            kind,
            Callback::new(move |event, input| {
                sink.borrow_mut().push((event.phase, input.is_key_pressed("KeyF")));
                Ok(())
            }),
        );
    }

    state.handle(&down("KeyF"));
    state.handle(&up("KeyF"));

    assert_eq!(*seen.borrow(), vec![(Phase::Begin, true), (Phase::End, false)]);
}

#[test]
fn test_padded_key_code_matches_queries_and_shortcuts() {
    let mut state = create_listening_state();
    let log = EventLog::default();
    state.bind_shortcut(["KeyW"], recorder(&log), ShortcutOptions::default());

    state.handle(&down(" KeyW "));
    assert!(state.is_key_pressed("KeyW"));
    assert_eq!(state.held_keys(), vec!["keyw"]);
    assert_eq!(phases(&log), vec![Phase::Begin]);

    state.handle(&up("KeyW"));
    assert!(!state.is_key_pressed("KeyW"));
}
