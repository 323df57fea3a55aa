//! Key presses as delivered by the host.

use bitflags::bitflags;

bitflags! {
    /// Modifiers held during a key press.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct KeyModifiers: u8 {
        const SHIFT = 0b0000_0001;
        const ALT = 0b0000_0010;
        const CTRL = 0b0000_0100;
        /// Super/Windows key. No binding uses it.
        const SUPER = 0b0000_1000;
    }
}

impl KeyModifiers {
    /// Ctrl and Shift, nothing else.
    pub const CTRL_SHIFT: Self = Self::CTRL.union(Self::SHIFT);
    /// Ctrl and Alt, nothing else.
    pub const CTRL_ALT: Self = Self::CTRL.union(Self::ALT);
    /// Ctrl, Shift and Alt.
    pub const CTRL_SHIFT_ALT: Self = Self::CTRL_SHIFT.union(Self::ALT);
}

/// Keys the bindings can tell apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Backspace,
    Enter,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    Tab,
    /// Shift+Tab as reported by some hosts.
    BackTab,
    Delete,
    Insert,
    Esc,
    /// A printable character, already shifted by the host (includes space).
    Char(char),
    /// A bare modifier key (Shift, Ctrl, Caps Lock).
    Modifier,
}

/// A key press with its modifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyEvent {
    #[must_use]
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Key press with no modifiers.
    #[must_use]
    pub fn key(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::empty())
    }
}

/// Typed character; newline maps to Enter.
impl From<char> for KeyEvent {
    fn from(c: char) -> Self {
        Self::key(if c == '\n' { KeyCode::Enter } else { KeyCode::Char(c) })
    }
}

impl From<KeyCode> for KeyEvent {
    fn from(code: KeyCode) -> Self {
        Self::key(code)
    }
}
