//! Keyboard handling - pressed-key set and key events.

use super::events::{InputEvent, KeyCode};
use super::state::InputState;

impl InputState {
    pub(super) fn handle_key_down(&mut self, key_code: KeyCode) -> Vec<InputEvent> {
        self.keys_down.insert(key_code);
        vec![InputEvent::KeyDown(key_code)]
    }

    pub(super) fn handle_key_up(&mut self, key_code: KeyCode) -> Vec<InputEvent> {
        self.keys_down.remove(&key_code);
        vec![InputEvent::KeyUp(key_code)]
    }
}
