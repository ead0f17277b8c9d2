#![warn(missing_docs)]
//! Input handling: raw key/mouse state plus named actions with phases.

mod action;
mod binding;

use std::collections::HashSet;
use winit::event::MouseButton;
use winit::keyboard::KeyCode;

pub use action::{ActionConfig, ActionKind, ActionMap, ActionPhase, ActionsConfig, InputAction};
pub use binding::InputBinding;

/// Errors raised while building action maps.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum InputError {
    /// A binding token that names no key or button.
    #[error("unknown binding '{0}'")]
    UnknownBinding(String),
    /// An action ended up with no usable bindings.
    #[error("action '{0}' has no bindings")]
    NoBindings(String),
    /// Two actions share a name.
    #[error("action '{0}' is defined more than once")]
    DuplicateAction(String),
}

/// Input state tracking for a single frame.
#[derive(Debug, Default)]
pub struct InputState {
    /// Keys currently pressed.
    keys_pressed: HashSet<KeyCode>,
    /// Keys pressed this frame (edge-triggered).
    keys_just_pressed: HashSet<KeyCode>,
    /// Keys released this frame (edge-triggered).
    keys_just_released: HashSet<KeyCode>,

    /// Mouse buttons currently pressed.
    mouse_buttons: HashSet<MouseButton>,
    /// Mouse buttons pressed this frame.
    mouse_just_pressed: HashSet<MouseButton>,
    /// Mouse buttons released this frame.
    mouse_just_released: HashSet<MouseButton>,
}

impl InputState {
    /// Create a new input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a binding as pressed. Repeats while held are not new edges.
    pub fn press(&mut self, binding: InputBinding) {
        match binding {
            InputBinding::Key(key) => {
                if self.keys_pressed.insert(key) {
                    self.keys_just_pressed.insert(key);
                }
            }
            InputBinding::Mouse(button) => {
                if self.mouse_buttons.insert(button) {
                    self.mouse_just_pressed.insert(button);
                }
            }
        }
    }

    /// Mark a binding as released.
    pub fn release(&mut self, binding: InputBinding) {
        match binding {
            InputBinding::Key(key) => {
                if self.keys_pressed.remove(&key) {
                    self.keys_just_released.insert(key);
                }
            }
            InputBinding::Mouse(button) => {
                if self.mouse_buttons.remove(&button) {
                    self.mouse_just_released.insert(button);
                }
            }
        }
    }

    /// Reset per-frame state (call at the end of each frame).
    pub fn begin_frame(&mut self) {
        self.keys_just_pressed.clear();
        self.keys_just_released.clear();
        self.mouse_just_pressed.clear();
        self.mouse_just_released.clear();
    }

    /// Check if a key is currently pressed.
    pub fn key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Check if a key was just pressed this frame.
    pub fn key_just_pressed(&self, key: KeyCode) -> bool {
        self.keys_just_pressed.contains(&key)
    }

    /// Check if a key was just released this frame.
    pub fn key_just_released(&self, key: KeyCode) -> bool {
        self.keys_just_released.contains(&key)
    }

    /// Check if a mouse button is currently pressed.
    pub fn mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.mouse_buttons.contains(&button)
    }

    /// Check if a mouse button was just pressed this frame.
    pub fn mouse_button_just_pressed(&self, button: MouseButton) -> bool {
        self.mouse_just_pressed.contains(&button)
    }

    /// Check if a mouse button was just released this frame.
    pub fn mouse_button_just_released(&self, button: MouseButton) -> bool {
        self.mouse_just_released.contains(&button)
    }

    /// Whether `binding` went down this frame.
    pub fn binding_just_pressed(&self, binding: InputBinding) -> bool {
        match binding {
            InputBinding::Key(key) => self.key_just_pressed(key),
            InputBinding::Mouse(button) => self.mouse_button_just_pressed(button),
        }
    }

    /// Whether `binding` is held.
    pub fn binding_pressed(&self, binding: InputBinding) -> bool {
        match binding {
            InputBinding::Key(key) => self.key_pressed(key),
            InputBinding::Mouse(button) => self.mouse_button_pressed(button),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_and_release_track_edges() {
        let mut input = InputState::new();
        input.press(InputBinding::Key(KeyCode::KeyE));
        assert!(input.key_pressed(KeyCode::KeyE));
        assert!(input.key_just_pressed(KeyCode::KeyE));

        input.begin_frame();
        input.press(InputBinding::Key(KeyCode::KeyE));
        assert!(!input.key_just_pressed(KeyCode::KeyE), "repeat is not an edge");

        input.release(InputBinding::Key(KeyCode::KeyE));
        assert!(!input.key_pressed(KeyCode::KeyE));
        assert!(input.key_just_released(KeyCode::KeyE));
    }

    #[test]
    fn releasing_unpressed_button_is_ignored() {
        let mut input = InputState::new();
        input.release(InputBinding::Mouse(MouseButton::Left));
        assert!(!input.mouse_button_just_released(MouseButton::Left));
    }

    #[test]
    fn begin_frame_clears_edges_but_keeps_held() {
        let mut input = InputState::new();
        input.press(InputBinding::Mouse(MouseButton::Left));
        assert!(input.binding_just_pressed(InputBinding::Mouse(MouseButton::Left)));

        input.begin_frame();
        assert!(!input.binding_just_pressed(InputBinding::Mouse(MouseButton::Left)));
        assert!(input.binding_pressed(InputBinding::Mouse(MouseButton::Left)));
    }
}
