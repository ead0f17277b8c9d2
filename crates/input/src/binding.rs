//! Physical bindings and their config-file tokens.

use crate::InputError;
use winit::event::MouseButton;
use winit::keyboard::KeyCode;

/// A physical control an action can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputBinding {
    /// Keyboard key.
    Key(KeyCode),
    /// Mouse button.
    Mouse(MouseButton),
}

impl InputBinding {
    /// Parse a token such as `KeyE`, `Space` or `MouseLeft`.
    pub fn parse(token: &str) -> Result<Self, InputError> {
        if let Some(key) = parse_key_code(token) {
            return Ok(InputBinding::Key(key));
        }
        match token {
            "MouseLeft" => Ok(InputBinding::Mouse(MouseButton::Left)),
            "MouseRight" => Ok(InputBinding::Mouse(MouseButton::Right)),
            "MouseMiddle" => Ok(InputBinding::Mouse(MouseButton::Middle)),
            _ => Err(InputError::UnknownBinding(token.to_string())),
        }
    }
}

fn parse_key_code(name: &str) -> Option<KeyCode> {
    Some(match name {
        "KeyE" => KeyCode::KeyE,
        "KeyF" => KeyCode::KeyF,
        "KeyG" => KeyCode::KeyG,
        "KeyQ" => KeyCode::KeyQ,
        "KeyR" => KeyCode::KeyR,
        "KeyW" => KeyCode::KeyW,
        "KeyA" => KeyCode::KeyA,
        "KeyS" => KeyCode::KeyS,
        "KeyD" => KeyCode::KeyD,
        "Space" => KeyCode::Space,
        "Enter" => KeyCode::Enter,
        "ShiftLeft" => KeyCode::ShiftLeft,
        "ControlLeft" => KeyCode::ControlLeft,
        "Tab" => KeyCode::Tab,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_keys_and_buttons() {
        assert_eq!(
            InputBinding::parse("KeyE"),
            Ok(InputBinding::Key(KeyCode::KeyE))
        );
        assert_eq!(
            InputBinding::parse("MouseLeft"),
            Ok(InputBinding::Mouse(MouseButton::Left))
        );
        assert_eq!(
            InputBinding::parse("KeyZZ"),
            Err(InputError::UnknownBinding("KeyZZ".into()))
        );
    }
}
