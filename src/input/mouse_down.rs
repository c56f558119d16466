//! Press handling - button down and touch start.

use super::events::{InputEvent, MouseButton};
use super::state::{GestureState, InputState, PressSource};
use glam::Vec2;
use std::time::Duration;

impl InputState {
    pub(super) fn handle_mouse_down(
        &mut self,
        device_pos: Vec2,
        button: MouseButton,
        at: Duration,
    ) -> Vec<InputEvent> {
        let pos = self.to_canvas(device_pos);
        self.pointer = pos;
        self.buttons.set(button, true);
        self.begin_press(button, PressSource::Mouse, pos, at);

        vec![InputEvent::MouseDown(pos)]
    }

    /// Single-finger touches act as the left button without touching button
    /// state. A second finger turns the gesture into a drag (pinch/rotate).
    pub(super) fn handle_touch_start(&mut self, touches: &[Vec2], at: Duration) -> Vec<InputEvent> {
        let Some(&first) = touches.first() else {
            return Vec::new();
        };
        let pos = self.to_canvas(first);
        self.pointer = pos;

        if touches.len() == 1 {
            self.begin_press(MouseButton::Left, PressSource::Touch, pos, at);
            vec![InputEvent::MouseDown(pos)]
        } else {
            if let GestureState::Pressed { dragged, .. } = &mut self.gesture {
                *dragged = true;
            }
            Vec::new()
        }
    }

    fn begin_press(&mut self, button: MouseButton, source: PressSource, origin: Vec2, at: Duration) {
        self.gesture = GestureState::Pressed {
            button,
            source,
            origin,
            pressed_at: at,
            dragged: false,
        };
    }
}
