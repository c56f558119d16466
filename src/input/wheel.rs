//! Wheel handling.

use super::events::InputEvent;
use super::state::InputState;
use glam::Vec2;

impl InputState {
    pub(super) fn handle_wheel(&mut self, device_pos: Vec2, delta: f32) -> Vec<InputEvent> {
        self.pointer = self.to_canvas(device_pos);
        vec![InputEvent::MouseWheel(delta)]
    }
}
