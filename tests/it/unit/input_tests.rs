//! Unit tests for the input mediator.

use crate::helpers::{Recorder, click, names, record_all_pointer, record_pointer};
use glam::Vec2;
use viewer_core::input::{
    EventKind, Handler, InputMediator, KeyCode, MouseButton, RawEvent,
};
use viewer_core::settings::InputSettings;

// ============================================================================
// Subscriptions
// ============================================================================

#[test]
fn test_three_subscribers_called_in_registration_order() {
    let mediator = InputMediator::new();
    let log: Recorder<(usize, Vec2)> = Recorder::new();
    for i in 0..3 {
        let log = log.clone();
        mediator
            .on_pointer(EventKind::MouseDown, move |pos| log.push((i, pos)))
            .unwrap();
    }

    mediator.handle_raw(RawEvent::mouse_down(MouseButton::Left, 12.0, 34.0, 0));

    let calls = log.take();
    assert_eq!(calls.len(), 3);
    for (i, (order, pos)) in calls.into_iter().enumerate() {
        assert_eq!(order, i);
        assert_eq!(pos, Vec2::new(12.0, 34.0));
    }
}

#[test]
fn test_unknown_event_name_is_unsupported() {
    let mediator = InputMediator::new();
    let err = mediator
        .on_named("mousehover", Handler::pointer(|_| {}))
        .unwrap_err();
    assert!(err.is_unsupported_event());
    assert_eq!(mediator.subscriber_count(EventKind::MouseMove), 0);
}

#[test]
fn test_named_subscription() {
    let mediator = InputMediator::new();
    let log: Recorder<KeyCode> = Recorder::new();
    let sink = log.clone();
    mediator
        .on_named("keyup", Handler::key(move |code| sink.push(code)))
        .unwrap();

    mediator.handle_raw(RawEvent::key_down(65, 0));
    mediator.handle_raw(RawEvent::key_up(65, 10));
    assert_eq!(log.take(), vec![65]);
}

#[test]
fn test_payload_mismatch_is_unsupported() {
    let mediator = InputMediator::new();
    let err = mediator
        .on(EventKind::KeyDown, Handler::pointer(|_| {}))
        .unwrap_err();
    assert!(err.is_unsupported_event());
    assert!(mediator.on_key(EventKind::MouseUp, |_| {}).is_err());
}

#[test]
fn test_off_is_idempotent() {
    let mediator = InputMediator::new();
    let log = Recorder::new();
    let handle = record_pointer(&mediator, EventKind::MouseMove, &log);

    assert!(mediator.off(handle));
    assert!(!mediator.off(handle));

    mediator.handle_raw(RawEvent::mouse_move(1.0, 1.0, 0));
    assert_eq!(log.len(), 0);
}

#[test]
fn test_wheel_delivers_delta() {
    let mediator = InputMediator::new();
    let log: Recorder<f32> = Recorder::new();
    let sink = log.clone();
    mediator.on_wheel(move |delta| sink.push(delta));

    mediator.handle_raw(RawEvent::wheel(5.0, 5.0, -120.0, 0));
    assert_eq!(log.take(), vec![-120.0]);
    assert_eq!(mediator.pointer_position(), Vec2::new(5.0, 5.0));
}

// ============================================================================
// Coordinates and button state
// ============================================================================

#[test]
fn test_canvas_origin_is_subtracted() {
    let mediator = InputMediator::new();
    mediator.set_canvas_origin(Vec2::new(44.0, 40.0));
    let log = Recorder::new();
    record_pointer(&mediator, EventKind::MouseDown, &log);

    mediator.handle_raw(RawEvent::mouse_down(MouseButton::Left, 144.0, 90.0, 0));
    assert_eq!(log.take(), vec![("mousedown", Vec2::new(100.0, 50.0))]);
}

#[test]
fn test_button_state_updated_before_subscribers() {
    let mediator = InputMediator::new();
    let seen: Recorder<(bool, bool)> = Recorder::new();

    let (m, s) = (mediator.clone(), seen.clone());
    mediator
        .on_pointer(EventKind::MouseDown, move |_| {
            s.push((m.is_button_down(MouseButton::Right), m.is_button_down(MouseButton::Left)));
        })
        .unwrap();
    let (m, s) = (mediator.clone(), seen.clone());
    mediator
        .on_pointer(EventKind::MouseUp, move |_| {
            s.push((m.is_button_down(MouseButton::Right), m.is_button_down(MouseButton::Left)));
        })
        .unwrap();

    mediator.handle_raw(RawEvent::mouse_down(MouseButton::Right, 0.0, 0.0, 0));
    mediator.handle_raw(RawEvent::mouse_up(MouseButton::Right, 0.0, 0.0, 10));
    assert_eq!(seen.take(), vec![(true, false), (false, false)]);
}

#[test]
fn test_disabled_press_and_release_leave_no_stuck_button() {
    let mediator = InputMediator::new();
    let log = record_all_pointer(&mediator);

    mediator.set_enabled(false);
    mediator.handle_raw(RawEvent::mouse_down(MouseButton::Left, 10.0, 10.0, 0));
    assert!(!mediator.is_button_down(MouseButton::Left));
    mediator.handle_raw(RawEvent::mouse_up(MouseButton::Left, 10.0, 10.0, 50));
    assert!(!mediator.is_button_down(MouseButton::Left));
    mediator.set_enabled(true);

    assert!(!mediator.is_button_down(MouseButton::Left));
    assert!(!mediator.button_state().any());
    assert_eq!(log.len(), 0);
}

#[test]
fn test_disabling_mid_press_suppresses_click() {
    let mediator = InputMediator::new();
    let log = record_all_pointer(&mediator);

    mediator.handle_raw(RawEvent::mouse_down(MouseButton::Left, 10.0, 10.0, 0));
    mediator.set_enabled(false);
    mediator.set_enabled(true);
    mediator.handle_raw(RawEvent::mouse_up(MouseButton::Left, 10.0, 10.0, 50));

    assert_eq!(names(&log.take()), vec!["mousedown", "mouseup"]);
}

// ============================================================================
// Keyboard gating
// ============================================================================

#[test]
fn test_keyboard_flag_gates_only_keys() {
    let mediator = InputMediator::new();
    let keys: Recorder<KeyCode> = Recorder::new();
    let sink = keys.clone();
    mediator.on_key(EventKind::KeyDown, move |c| sink.push(c)).unwrap();
    let pointer = Recorder::new();
    record_pointer(&mediator, EventKind::MouseMove, &pointer);

    mediator.set_keyboard_enabled(false);
    mediator.handle_raw(RawEvent::key_down(32, 0));
    mediator.handle_raw(RawEvent::mouse_move(3.0, 4.0, 5));
    assert!(keys.take().is_empty());
    assert!(!mediator.is_key_down(32));
    assert_eq!(pointer.len(), 1);

    mediator.set_keyboard_enabled(true);
    mediator.handle_raw(RawEvent::key_down(32, 10));
    assert_eq!(keys.take(), vec![32]);
    assert!(mediator.is_key_down(32));
}

#[test]
fn test_overall_flag_gates_keys_too() {
    let mediator = InputMediator::new();
    let keys: Recorder<KeyCode> = Recorder::new();
    let sink = keys.clone();
    mediator.on_key(EventKind::KeyDown, move |c| sink.push(c)).unwrap();

    mediator.set_enabled(false);
    mediator.handle_raw(RawEvent::key_down(13, 0));
    assert!(keys.take().is_empty());
    assert!(mediator.keyboard_enabled());
}

// ============================================================================
// Click detection
// ============================================================================

#[test]
fn test_jitter_still_clicks() {
    let mediator = InputMediator::new();
    let log = record_all_pointer(&mediator);

    mediator.handle_raw(RawEvent::mouse_down(MouseButton::Left, 100.0, 100.0, 0));
    mediator.handle_raw(RawEvent::mouse_move(100.4, 100.3, 20));
    mediator.handle_raw(RawEvent::mouse_up(MouseButton::Left, 100.6, 99.8, 80));

    let events = log.take();
    assert_eq!(names(&events), vec!["mousedown", "mousemove", "mouseup", "mouseclicked"]);
    assert_eq!(events[3].1, Vec2::new(100.6, 99.8));
}

#[test]
fn test_drag_suppresses_click_even_when_returning() {
    let mediator = InputMediator::new();
    let log = record_all_pointer(&mediator);

    mediator.handle_raw(RawEvent::mouse_down(MouseButton::Left, 100.0, 100.0, 0));
    mediator.handle_raw(RawEvent::mouse_move(140.0, 100.0, 20));
    mediator.handle_raw(RawEvent::mouse_move(100.0, 100.0, 40));
    mediator.handle_raw(RawEvent::mouse_up(MouseButton::Left, 100.0, 100.0, 60));

    assert_eq!(
        names(&log.take()),
        vec!["mousedown", "mousemove", "mousemove", "mouseup"]
    );
}

#[test]
fn test_slow_release_is_not_a_click() {
    let mediator = InputMediator::new();
    let log = record_all_pointer(&mediator);

    mediator.handle_raw(RawEvent::mouse_down(MouseButton::Left, 5.0, 5.0, 0));
    mediator.handle_raw(RawEvent::mouse_up(MouseButton::Left, 5.0, 5.0, 900));
    assert_eq!(names(&log.take()), vec!["mousedown", "mouseup"]);
}

#[test]
fn test_release_of_other_button_is_not_a_click() {
    let mediator = InputMediator::new();
    let log = record_all_pointer(&mediator);

    mediator.handle_raw(RawEvent::mouse_down(MouseButton::Left, 5.0, 5.0, 0));
    mediator.handle_raw(RawEvent::mouse_up(MouseButton::Right, 5.0, 5.0, 30));
    assert_eq!(names(&log.take()), vec!["mousedown", "mouseup"]);
    assert!(mediator.is_button_down(MouseButton::Left));
}

#[test]
fn test_double_click_and_third_click_starts_new_pair() {
    let mediator = InputMediator::new();
    let log = record_all_pointer(&mediator);

    click(&mediator, 50.0, 50.0, 0);
    click(&mediator, 50.0, 50.0, 200);
    click(&mediator, 50.0, 50.0, 400);

    assert_eq!(
        names(&log.take()),
        vec![
            "mousedown", "mouseup", "mouseclicked",
            "mousedown", "mouseup", "mouseclicked", "dblclick",
            "mousedown", "mouseup", "mouseclicked",
        ]
    );
}

#[test]
fn test_clicks_too_far_apart_in_time_are_not_double() {
    let mediator = InputMediator::new();
    let log = record_all_pointer(&mediator);

    click(&mediator, 50.0, 50.0, 0);
    click(&mediator, 50.0, 50.0, 1000);

    let events = names(&log.take());
    assert_eq!(events.iter().filter(|n| **n == "mouseclicked").count(), 2);
    assert!(!events.contains(&"dblclick"));
}

#[test]
fn test_touch_tap_clicks_without_touching_buttons() {
    let mediator = InputMediator::new();
    let log = record_all_pointer(&mediator);
    let pressed: Recorder<bool> = Recorder::new();
    let (m, p) = (mediator.clone(), pressed.clone());
    mediator
        .on_pointer(EventKind::MouseDown, move |_| p.push(m.is_button_down(MouseButton::Left)))
        .unwrap();

    mediator.handle_raw(RawEvent::TouchStart {
        touches: vec![Vec2::new(20.0, 30.0)],
        timestamp: std::time::Duration::from_millis(0),
    });
    mediator.handle_raw(RawEvent::TouchEnd {
        touches: Vec::new(),
        timestamp: std::time::Duration::from_millis(60),
    });

    let events = log.take();
    assert_eq!(names(&events), vec!["mousedown", "mouseup", "mouseclicked"]);
    assert!(events.iter().all(|(_, pos)| *pos == Vec2::new(20.0, 30.0)));
    assert_eq!(pressed.take(), vec![false]);
}

#[test]
fn test_settings_tolerance_applies() {
    let settings = InputSettings {
        click_tolerance_px: 50.0,
        ..InputSettings::default()
    };
    let mediator = InputMediator::with_settings(&settings);
    let log = record_all_pointer(&mediator);

    mediator.handle_raw(RawEvent::mouse_down(MouseButton::Left, 0.0, 0.0, 0));
    mediator.handle_raw(RawEvent::mouse_up(MouseButton::Left, 30.0, 0.0, 50));
    assert!(names(&log.take()).contains(&"mouseclicked"));
}

#[test]
fn test_settings_initial_flags() {
    let settings = InputSettings {
        enabled: false,
        keyboard_enabled: false,
        ..InputSettings::default()
    };
    let mediator = InputMediator::with_settings(&settings);
    assert!(!mediator.enabled());
    assert!(!mediator.keyboard_enabled());

    // applying settings later only changes the click policy
    mediator.set_enabled(true);
    mediator.apply_settings(&settings);
    assert!(mediator.enabled());
}
