//! Pointer event types.

use super::KeyModifiers;

/// Mouse button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    /// No button (moves and wheel steps).
    None,
}

/// Kind of pointer event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseEventKind {
    Press,
    Release,
    /// Pointer moved; `button` is the button held, if any.
    Move,
    DoubleClick,
    TripleClick,
    ScrollUp,
    ScrollDown,
}

/// A pointer event in text area coordinates (pixels, origin at the text
/// area's top-left corner).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MouseEvent {
    pub x: i32,
    pub y: i32,
    pub button: MouseButton,
    pub kind: MouseEventKind,
    pub modifiers: KeyModifiers,
}

impl MouseEvent {
    #[must_use]
    pub fn new(x: i32, y: i32, button: MouseButton, kind: MouseEventKind) -> Self {
        Self {
            x,
            y,
            button,
            kind,
            modifiers: KeyModifiers::empty(),
        }
    }

    #[must_use]
    pub fn press(x: i32, y: i32, button: MouseButton) -> Self {
        Self::new(x, y, button, MouseEventKind::Press)
    }

    #[must_use]
    pub fn release(x: i32, y: i32, button: MouseButton) -> Self {
        Self::new(x, y, button, MouseEventKind::Release)
    }

    /// Pointer motion with `button` held.
    #[must_use]
    pub fn drag(x: i32, y: i32, button: MouseButton) -> Self {
        Self::new(x, y, button, MouseEventKind::Move)
    }

    #[must_use]
    pub fn double_click(x: i32, y: i32, button: MouseButton) -> Self {
        Self::new(x, y, button, MouseEventKind::DoubleClick)
    }

    #[must_use]
    pub fn triple_click(x: i32, y: i32, button: MouseButton) -> Self {
        Self::new(x, y, button, MouseEventKind::TripleClick)
    }

    #[must_use]
    pub fn scroll_up(x: i32, y: i32) -> Self {
        Self::new(x, y, MouseButton::None, MouseEventKind::ScrollUp)
    }

    #[must_use]
    pub fn scroll_down(x: i32, y: i32) -> Self {
        Self::new(x, y, MouseButton::None, MouseEventKind::ScrollDown)
    }

    #[must_use]
    pub fn with_modifiers(mut self, modifiers: KeyModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}
