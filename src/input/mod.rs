//! # Input Module
//!
//! The keyboard input surface consumed by the game core: single key
//! identifiers for movement, dialog composition, and confirmation.

use crate::game::Direction;

/// One key press, as the engine consumes it.
///
/// Arrow keys are distinct variants; letters arrive as `Char` and are
/// interpreted contextually — WASD moves while navigating, while the same
/// characters are ordinary message text inside a dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Escape,
    Backspace,
    Char(char),
}

impl Key {
    /// Parses a DOM-style key identifier (`"ArrowUp"`, `"Enter"`, `"w"`).
    ///
    /// Returns `None` for identifiers the game does not consume.
    ///
    /// # Examples
    ///
    /// ```
    /// use gatewood::Key;
    ///
    /// assert_eq!(Key::parse("ArrowUp"), Some(Key::Up));
    /// assert_eq!(Key::parse("y"), Some(Key::Char('y')));
    /// assert_eq!(Key::parse("F1"), None);
    /// ```
    pub fn parse(identifier: &str) -> Option<Key> {
        match identifier {
            "ArrowUp" => Some(Key::Up),
            "ArrowDown" => Some(Key::Down),
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            "Enter" => Some(Key::Enter),
            "Escape" => Some(Key::Escape),
            "Backspace" => Some(Key::Backspace),
            _ => {
                let mut chars = identifier.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if !c.is_control() => Some(Key::Char(c)),
                    _ => None,
                }
            }
        }
    }

    /// The movement direction this key requests while navigating, if any.
    /// Arrow keys and WASD (either case) move; everything else does not.
    pub fn movement_direction(self) -> Option<Direction> {
        match self {
            Key::Up | Key::Char('w') | Key::Char('W') => Some(Direction::North),
            Key::Down | Key::Char('s') | Key::Char('S') => Some(Direction::South),
            Key::Left | Key::Char('a') | Key::Char('A') => Some(Direction::West),
            Key::Right | Key::Char('d') | Key::Char('D') => Some(Direction::East),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named_keys() {
        assert_eq!(Key::parse("ArrowUp"), Some(Key::Up));
        assert_eq!(Key::parse("ArrowDown"), Some(Key::Down));
        assert_eq!(Key::parse("ArrowLeft"), Some(Key::Left));
        assert_eq!(Key::parse("ArrowRight"), Some(Key::Right));
        assert_eq!(Key::parse("Enter"), Some(Key::Enter));
        assert_eq!(Key::parse("Escape"), Some(Key::Escape));
        assert_eq!(Key::parse("Backspace"), Some(Key::Backspace));
    }

    #[test]
    fn test_parse_printable_characters() {
        assert_eq!(Key::parse("w"), Some(Key::Char('w')));
        assert_eq!(Key::parse("y"), Some(Key::Char('y')));
        assert_eq!(Key::parse(" "), Some(Key::Char(' ')));
        assert_eq!(Key::parse("!"), Some(Key::Char('!')));
    }

    #[test]
    fn test_parse_rejects_unknown_identifiers() {
        assert_eq!(Key::parse("F1"), None);
        assert_eq!(Key::parse("Shift"), None);
        assert_eq!(Key::parse(""), None);
        assert_eq!(Key::parse("\u{7}"), None);
    }

    #[test]
    fn test_movement_mapping() {
        assert_eq!(Key::Up.movement_direction(), Some(Direction::North));
        assert_eq!(Key::Char('w').movement_direction(), Some(Direction::North));
        assert_eq!(Key::Char('a').movement_direction(), Some(Direction::West));
        assert_eq!(Key::Char('s').movement_direction(), Some(Direction::South));
        assert_eq!(Key::Char('D').movement_direction(), Some(Direction::East));
        assert_eq!(Key::Char('y').movement_direction(), None);
        assert_eq!(Key::Enter.movement_direction(), None);
    }
}
