//! Input events delivered by the host.

use crate::input::keyboard::KeyEvent;
use crate::input::mouse::MouseEvent;

/// An input event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Keyboard event.
    Key(KeyEvent),
    /// Pointer event.
    Mouse(MouseEvent),
    /// Text delivered by the host, inserted at the cursor.
    Paste(PasteEvent),
}

impl From<KeyEvent> for Event {
    fn from(e: KeyEvent) -> Self {
        Self::Key(e)
    }
}

impl From<MouseEvent> for Event {
    fn from(e: MouseEvent) -> Self {
        Self::Mouse(e)
    }
}

impl From<PasteEvent> for Event {
    fn from(e: PasteEvent) -> Self {
        Self::Paste(e)
    }
}

/// Host-delivered text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PasteEvent {
    content: String,
}

impl PasteEvent {
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{KeyCode, MouseButton};

    #[test]
    fn test_conversions_pick_variant() {
        let key: Event = KeyEvent::key(KeyCode::Enter).into();
        assert_eq!(key, Event::Key(KeyEvent::key(KeyCode::Enter)));

        let press = MouseEvent::press(1, 2, MouseButton::Left);
        assert!(matches!(Event::from(press), Event::Mouse(m) if m.x == 1 && m.y == 2));

        match Event::from(PasteEvent::new("hi")) {
            Event::Paste(p) => assert_eq!(p.content(), "hi"),
            other => panic!("expected paste, got {other:?}"),
        }
    }
}
