//! Move handling - pointer and touch motion, drag detection.
//!
//! Mouse move is called very frequently, so this only updates the pointer and
//! the sticky `dragged` flag of an active press.

use super::events::InputEvent;
use super::state::{GestureState, InputState};
use glam::Vec2;

impl InputState {
    pub(super) fn handle_pointer_move(&mut self, device_pos: Vec2) -> Vec<InputEvent> {
        let pos = self.to_canvas(device_pos);
        self.pointer = pos;
        self.mark_drag(pos);

        vec![InputEvent::MouseMove(pos)]
    }

    /// Only the first touch point moves the pointer.
    pub(super) fn handle_touch_move(&mut self, touches: &[Vec2]) -> Vec<InputEvent> {
        let Some(&first) = touches.first() else {
            return Vec::new();
        };
        let pos = self.to_canvas(first);
        self.pointer = pos;
        self.mark_drag(pos);

        vec![InputEvent::MouseMove(pos)]
    }

    fn mark_drag(&mut self, pos: Vec2) {
        let tolerance = self.policy.tolerance_px;
        if let GestureState::Pressed {
            origin, dragged, ..
        } = &mut self.gesture
        {
            if !*dragged && origin.distance(pos) > tolerance {
                *dragged = true;
            }
        }
    }
}
