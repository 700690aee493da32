//! Input events and the commands they trigger
//!
//! Backends translate their native events into [`InputEvent`]; anything the
//! game does not react to maps to `None`.

use glam::Vec2;

/// Mouse buttons the backends report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    Other,
}

/// Keys the backends report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    R,
    Escape,
    Other,
}

/// Raw input in game coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    MouseDown { pos: Vec2, button: MouseButton },
    KeyDown(Key),
}

/// Something the game should do
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Try to pop a circle at this point
    Click(Vec2),
    /// Start a new game
    Reset,
    /// Leave the game
    Quit,
}

impl InputEvent {
    pub fn command(&self) -> Option<Command> {
        match *self {
            InputEvent::MouseDown {
                pos,
                button: MouseButton::Left,
            } => Some(Command::Click(pos)),
            InputEvent::KeyDown(Key::R) => Some(Command::Reset),
            InputEvent::KeyDown(Key::Escape) => Some(Command::Quit),
            _ => None,
        }
    }
}

/// Map a DOM `KeyboardEvent.code` / key name to a [`Key`]
pub fn key_from_code(code: &str) -> Key {
    match code {
        "KeyR" | "r" | "R" => Key::R,
        "Escape" => Key::Escape,
        _ => Key::Other,
    }
}

/// Map a DOM `MouseEvent.button` index to a [`MouseButton`]
pub fn mouse_button_from_index(index: i16) -> MouseButton {
    match index {
        0 => MouseButton::Left,
        1 => MouseButton::Middle,
        2 => MouseButton::Right,
        _ => MouseButton::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_click_maps_to_click() {
        let pos = Vec2::new(12.0, 34.0);
        let event = InputEvent::MouseDown {
            pos,
            button: MouseButton::Left,
        };
        assert_eq!(event.command(), Some(Command::Click(pos)));
    }

    #[test]
    fn test_other_buttons_are_ignored() {
        for button in [MouseButton::Right, MouseButton::Middle, MouseButton::Other] {
            let event = InputEvent::MouseDown {
                pos: Vec2::ZERO,
                button,
            };
            assert_eq!(event.command(), None);
        }
    }

    #[test]
    fn test_keys() {
        assert_eq!(InputEvent::KeyDown(Key::R).command(), Some(Command::Reset));
        assert_eq!(
            InputEvent::KeyDown(Key::Escape).command(),
            Some(Command::Quit)
        );
        assert_eq!(InputEvent::KeyDown(Key::Other).command(), None);
    }

    #[test]
    fn test_dom_mapping() {
        assert_eq!(key_from_code("KeyR"), Key::R);
        assert_eq!(key_from_code("Escape"), Key::Escape);
        assert_eq!(key_from_code("Space"), Key::Other);
        assert_eq!(mouse_button_from_index(0), MouseButton::Left);
        assert_eq!(mouse_button_from_index(2), MouseButton::Right);
        assert_eq!(mouse_button_from_index(7), MouseButton::Other);
    }
}
