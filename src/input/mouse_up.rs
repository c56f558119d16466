//! Release handling - button up, touch end, and derived click / double-click.
//!
//! Emission order for one release is always `mouseup`, then `mouseclicked`,
//! then `dblclick`.

use super::events::{CanvasPoint, InputEvent, MouseButton};
use super::state::{ClickRecord, GestureState, InputState, PressSource};
use glam::Vec2;
use std::time::Duration;

impl InputState {
    pub(super) fn handle_mouse_up(
        &mut self,
        device_pos: Vec2,
        button: MouseButton,
        at: Duration,
    ) -> Vec<InputEvent> {
        let pos = self.to_canvas(device_pos);
        self.pointer = pos;
        self.buttons.set(button, false);

        let mut out = vec![InputEvent::MouseUp(pos)];
        self.finish_press(button, PressSource::Mouse, pos, at, &mut out);
        out
    }

    /// Fires only once the last finger lifts, at the last known touch position.
    /// A touch end without a tracked touch press emits nothing.
    pub(super) fn handle_touch_end(&mut self, remaining: &[Vec2], at: Duration) -> Vec<InputEvent> {
        if !remaining.is_empty() {
            return Vec::new();
        }
        if !matches!(
            self.gesture,
            GestureState::Pressed {
                source: PressSource::Touch,
                ..
            }
        ) {
            return Vec::new();
        }
        let pos = self.pointer;

        let mut out = vec![InputEvent::MouseUp(pos)];
        self.finish_press(MouseButton::Left, PressSource::Touch, pos, at, &mut out);
        out
    }

    fn finish_press(
        &mut self,
        button: MouseButton,
        source: PressSource,
        pos: CanvasPoint,
        at: Duration,
        out: &mut Vec<InputEvent>,
    ) {
        let GestureState::Pressed {
            button: pressed_button,
            source: pressed_source,
            origin,
            pressed_at,
            dragged,
        } = self.gesture
        else {
            return;
        };
        if pressed_button != button || pressed_source != source {
            return;
        }
        self.gesture = GestureState::Idle;

        let within_distance = origin.distance(pos) <= self.policy.tolerance_px;
        let within_time = at.saturating_sub(pressed_at) <= self.policy.timeout;
        if dragged || !within_distance || !within_time {
            // A drag between two clicks breaks the pair.
            self.last_click = None;
            return;
        }

        out.push(InputEvent::MouseClicked(pos));

        match self.last_click {
            Some(prev)
                if prev.button == button
                    && at.saturating_sub(prev.at) <= self.policy.dblclick_window =>
            {
                out.push(InputEvent::DblClick(pos));
                self.last_click = None;
            }
            _ => {
                self.last_click = Some(ClickRecord { button, at });
            }
        }
    }
}
