//! Input state - enable flags, button/key state and the press gesture machine.
//!
//! All raw-event handlers mutate `InputState` first and return the normalized
//! events to emit, so subscribers always observe up-to-date state.
//!
//! ## Gesture Transitions
//!
//! ```text
//! Idle -> Pressed              (button down, or single-finger touch start)
//! Pressed -> Pressed(dragged)  (pointer travels past the click tolerance)
//! Pressed -> Idle              (release of the tracked button; click if not dragged)
//! Any -> Idle                  (input disabled)
//! ```

use super::coords::{CoordinateContext, CoordinateConverter};
use super::events::{CanvasPoint, InputEvent, KeyCode, MouseButton, RawEvent};
use crate::constants::{
    DEFAULT_CLICK_TIMEOUT_MS, DEFAULT_CLICK_TOLERANCE_PX, DEFAULT_DBLCLICK_WINDOW_MS,
};
use crate::settings::InputSettings;
use glam::Vec2;
use std::collections::HashSet;
use std::time::Duration;

/// Where a tracked press came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressSource {
    Mouse,
    Touch,
}

/// Press gesture tracking for click detection.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    /// No press in progress
    #[default]
    Idle,

    /// A button (or finger) is down
    Pressed {
        button: MouseButton,
        source: PressSource,
        /// Canvas position of the press
        origin: CanvasPoint,
        pressed_at: Duration,
        /// Set once the pointer travels past the click tolerance; never cleared
        dragged: bool,
    },
}

impl GestureState {
    pub fn is_pressed(&self) -> bool {
        matches!(self, Self::Pressed { .. })
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Pressed { dragged: true, .. })
    }
}

/// A completed click, kept to pair with the next one
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickRecord {
    pub button: MouseButton,
    pub at: Duration,
}

/// Thresholds separating clicks from drags and single from double clicks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickPolicy {
    pub tolerance_px: f32,
    pub timeout: Duration,
    pub dblclick_window: Duration,
}

impl Default for ClickPolicy {
    fn default() -> Self {
        Self {
            tolerance_px: DEFAULT_CLICK_TOLERANCE_PX,
            timeout: Duration::from_millis(DEFAULT_CLICK_TIMEOUT_MS),
            dblclick_window: Duration::from_millis(DEFAULT_DBLCLICK_WINDOW_MS),
        }
    }
}

impl From<&InputSettings> for ClickPolicy {
    fn from(settings: &InputSettings) -> Self {
        Self {
            tolerance_px: settings.click_tolerance_px,
            timeout: Duration::from_millis(settings.click_timeout_ms),
            dblclick_window: Duration::from_millis(settings.dblclick_window_ms),
        }
    }
}

/// Pressed state of each mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonState {
    pub left: bool,
    pub middle: bool,
    pub right: bool,
}

impl ButtonState {
    pub fn get(&self, button: MouseButton) -> bool {
        match button {
            MouseButton::Left => self.left,
            MouseButton::Middle => self.middle,
            MouseButton::Right => self.right,
        }
    }

    pub fn set(&mut self, button: MouseButton, down: bool) {
        match button {
            MouseButton::Left => self.left = down,
            MouseButton::Middle => self.middle = down,
            MouseButton::Right => self.right = down,
        }
    }

    pub fn any(&self) -> bool {
        self.left || self.middle || self.right
    }
}

/// Scene-wide input state owned by one mediator.
#[derive(Debug, Clone)]
pub struct InputState {
    pub(super) enabled: bool,
    pub(super) keyboard_enabled: bool,
    pub(super) buttons: ButtonState,
    pub(super) keys_down: HashSet<KeyCode>,
    /// Last known pointer position, canvas-local
    pub(super) pointer: CanvasPoint,
    pub(super) gesture: GestureState,
    pub(super) last_click: Option<ClickRecord>,
    pub(super) coords: CoordinateContext,
    pub(super) policy: ClickPolicy,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new(ClickPolicy::default())
    }
}

impl InputState {
    pub fn new(policy: ClickPolicy) -> Self {
        Self {
            enabled: true,
            keyboard_enabled: true,
            buttons: ButtonState::default(),
            keys_down: HashSet::new(),
            pointer: Vec2::ZERO,
            gesture: GestureState::Idle,
            last_click: None,
            coords: CoordinateContext::default(),
            policy,
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            // A press seen before disabling must not pair with a release seen after.
            self.reset_gesture();
        }
    }

    pub fn set_keyboard_enabled(&mut self, enabled: bool) {
        self.keyboard_enabled = enabled;
    }

    pub fn set_policy(&mut self, policy: ClickPolicy) {
        self.policy = policy;
    }

    pub fn set_canvas_origin(&mut self, origin: Vec2) {
        self.coords = CoordinateContext::new(origin);
    }

    pub fn reset_gesture(&mut self) {
        self.gesture = GestureState::Idle;
        self.last_click = None;
    }

    #[inline]
    pub(super) fn to_canvas(&self, device_pos: Vec2) -> CanvasPoint {
        CoordinateConverter::device_to_canvas(device_pos, &self.coords)
    }

    /// Apply a raw event and return the normalized events it produces, in
    /// emission order. Disabled input yields nothing and changes nothing.
    pub fn process(&mut self, event: RawEvent) -> Vec<InputEvent> {
        if !self.enabled {
            return Vec::new();
        }
        if event.is_keyboard() && !self.keyboard_enabled {
            return Vec::new();
        }

        match event {
            RawEvent::PointerDown {
                position,
                button,
                timestamp,
            } => self.handle_mouse_down(position, button, timestamp),
            RawEvent::PointerUp {
                position,
                button,
                timestamp,
            } => self.handle_mouse_up(position, button, timestamp),
            RawEvent::PointerMove { position, .. } => self.handle_pointer_move(position),
            RawEvent::TouchStart { touches, timestamp } => {
                self.handle_touch_start(&touches, timestamp)
            }
            RawEvent::TouchMove { touches, .. } => self.handle_touch_move(&touches),
            RawEvent::TouchEnd { touches, timestamp } => self.handle_touch_end(&touches, timestamp),
            RawEvent::Wheel {
                position, delta, ..
            } => self.handle_wheel(position, delta),
            RawEvent::KeyDown { key_code, .. } => self.handle_key_down(key_code),
            RawEvent::KeyUp { key_code, .. } => self.handle_key_up(key_code),
        }
    }
}
