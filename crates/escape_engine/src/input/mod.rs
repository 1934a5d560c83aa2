//! Input events
//!
//! Backend-neutral key codes and the application events a game mode
//! consumes. Window backends translate their native events into
//! [`AppEvent`] before handing them to the game.

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// R key
    R,
    /// Space key
    Space,
    /// Enter key
    Enter,
    /// Escape key
    Escape,
}

/// Application events
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Key was pressed
    KeyPressed(KeyCode),

    /// Key was released
    KeyReleased(KeyCode),
}

impl AppEvent {
    /// The key of a press event, if this is one
    pub fn pressed_key(&self) -> Option<KeyCode> {
        match self {
            Self::KeyPressed(key) => Some(*key),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pressed_key_only_for_presses() {
        assert_eq!(AppEvent::KeyPressed(KeyCode::Left).pressed_key(), Some(KeyCode::Left));
        assert_eq!(AppEvent::KeyReleased(KeyCode::Left).pressed_key(), None);
    }
}
