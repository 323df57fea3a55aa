//! Key bindings.

use super::{KeyCode, KeyEvent, KeyModifiers};
use crate::commands::Command;

/// Modifier combinations the bindings distinguish.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mods {
    None,
    Shift,
    Ctrl,
    CtrlShift,
    CtrlAlt,
    CtrlShiftAlt,
    Other,
}

impl From<KeyModifiers> for Mods {
    fn from(m: KeyModifiers) -> Self {
        if m.is_empty() {
            Self::None
        } else if m == KeyModifiers::SHIFT {
            Self::Shift
        } else if m == KeyModifiers::CTRL {
            Self::Ctrl
        } else if m == KeyModifiers::CTRL_SHIFT {
            Self::CtrlShift
        } else if m == KeyModifiers::CTRL_ALT {
            Self::CtrlAlt
        } else if m == KeyModifiers::CTRL_SHIFT_ALT {
            Self::CtrlShiftAlt
        } else {
            Self::Other
        }
    }
}

/// Command bound to `key`, if any.
///
/// Printable characters without a Ctrl binding insert themselves; bare
/// modifiers and unbound keys map to `None`.
#[must_use]
pub fn command_for_key(key: &KeyEvent) -> Option<Command> {
    let mods = Mods::from(key.modifiers);
    let cmd = match key.code {
        KeyCode::Right => match mods {
            Mods::CtrlShift => Command::JumpRight { select: true },
            Mods::Ctrl => Command::JumpRight { select: false },
            Mods::Shift => Command::MoveRight { select: true },
            Mods::None => Command::MoveRight { select: false },
            _ => return None,
        },
        KeyCode::Left => match mods {
            Mods::CtrlShift => Command::JumpLeft { select: true },
            Mods::Ctrl => Command::JumpLeft { select: false },
            Mods::Shift => Command::MoveLeft { select: true },
            Mods::None => Command::MoveLeft { select: false },
            _ => return None,
        },
        KeyCode::Up => match mods {
            Mods::CtrlAlt => Command::MoveLineUp,
            Mods::Shift => Command::MoveUp { select: true },
            Mods::None => Command::MoveUp { select: false },
            _ => return None,
        },
        KeyCode::Down => match mods {
            Mods::CtrlShiftAlt => Command::DuplicateLines,
            Mods::CtrlAlt => Command::MoveLineDown,
            Mods::Shift => Command::MoveDown { select: true },
            Mods::None => Command::MoveDown { select: false },
            _ => return None,
        },
        KeyCode::Home => match mods {
            Mods::CtrlShift => Command::StringStart { select: true },
            Mods::Ctrl => Command::StringStart { select: false },
            Mods::Shift => Command::LineStart { select: true },
            Mods::None => Command::LineStart { select: false },
            _ => return None,
        },
        KeyCode::End => match mods {
            Mods::CtrlShift => Command::StringEnd { select: true },
            Mods::Ctrl => Command::StringEnd { select: false },
            Mods::Shift => Command::LineEnd { select: true },
            Mods::None => Command::LineEnd { select: false },
            _ => return None,
        },
        KeyCode::Backspace => Command::Backspace,
        KeyCode::Delete if mods == Mods::None => Command::Delete,
        KeyCode::PageUp if mods == Mods::None => Command::PageUp,
        KeyCode::PageDown if mods == Mods::None => Command::PageDown,
        KeyCode::Tab if mods == Mods::None => Command::TabRight,
        KeyCode::Tab if mods == Mods::Shift => Command::TabLeft,
        KeyCode::BackTab => Command::TabLeft,
        KeyCode::Enter if mods == Mods::None => Command::AutoIndent,
        KeyCode::Char(' ') => Command::InsertString(" ".to_string()),
        KeyCode::Char(c) => return char_command(c, mods),
        _ => return None,
    };
    Some(cmd)
}

fn char_command(c: char, mods: Mods) -> Option<Command> {
    let cmd = match mods {
        Mods::CtrlShift => match c.to_ascii_lowercase() {
            'd' => Command::Uncomment,
            'z' => Command::Redo,
            _ => return None,
        },
        Mods::Ctrl => match c.to_ascii_lowercase() {
            'd' => Command::Comment,
            'c' => Command::Copy,
            'x' => Command::Cut,
            'v' => Command::PasteClipboard,
            'k' => Command::RemoveLines,
            'a' => Command::SelectAll,
            'z' => Command::Undo,
            _ => return None,
        },
        _ => Command::InsertString(c.to_string()),
    };
    Some(cmd)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: KeyModifiers = KeyModifiers::empty();
    const SHIFT: KeyModifiers = KeyModifiers::SHIFT;
    const CTRL: KeyModifiers = KeyModifiers::CTRL;
    const CTRL_SHIFT: KeyModifiers = KeyModifiers::CTRL_SHIFT;
    const CTRL_ALT: KeyModifiers = KeyModifiers::CTRL_ALT;
    const CTRL_SHIFT_ALT: KeyModifiers = KeyModifiers::CTRL_SHIFT_ALT;

    fn cmd(code: KeyCode, mods: KeyModifiers) -> Option<Command> {
        command_for_key(&KeyEvent::new(code, mods))
    }

    #[test]
    fn test_arrows() {
        assert_eq!(cmd(KeyCode::Left, NONE), Some(Command::MoveLeft { select: false }));
        assert_eq!(cmd(KeyCode::Right, SHIFT), Some(Command::MoveRight { select: true }));
        assert_eq!(cmd(KeyCode::Right, CTRL_SHIFT), Some(Command::JumpRight { select: true }));
        assert_eq!(cmd(KeyCode::Up, CTRL_ALT), Some(Command::MoveLineUp));
        assert_eq!(cmd(KeyCode::Down, CTRL_SHIFT_ALT), Some(Command::DuplicateLines));
        assert_eq!(cmd(KeyCode::Left, KeyModifiers::ALT), None);
    }

    #[test]
    fn test_home_end() {
        assert_eq!(cmd(KeyCode::Home, CTRL), Some(Command::StringStart { select: false }));
        assert_eq!(cmd(KeyCode::End, SHIFT), Some(Command::LineEnd { select: true }));
    }

    #[test]
    fn test_ctrl_shortcuts() {
        assert_eq!(cmd(KeyCode::Char('z'), CTRL), Some(Command::Undo));
        assert_eq!(cmd(KeyCode::Char('Z'), CTRL_SHIFT), Some(Command::Redo));
        assert_eq!(cmd(KeyCode::Char('c'), CTRL), Some(Command::Copy));
        assert_eq!(cmd(KeyCode::Char('D'), CTRL_SHIFT), Some(Command::Uncomment));
        assert_eq!(cmd(KeyCode::Char('q'), CTRL), None);
    }

    #[test]
    fn test_printable_inserts() {
        assert_eq!(cmd(KeyCode::Char('a'), NONE), Some(Command::InsertString("a".into())));
        assert_eq!(cmd(KeyCode::Char('A'), SHIFT), Some(Command::InsertString("A".into())));
        assert_eq!(cmd(KeyCode::Char(' '), CTRL), Some(Command::InsertString(" ".into())));
    }

    #[test]
    fn test_ignored_keys() {
        assert_eq!(cmd(KeyCode::Modifier, SHIFT), None);
        assert_eq!(cmd(KeyCode::Insert, NONE), None);
        assert_eq!(cmd(KeyCode::Delete, SHIFT), None);
        assert_eq!(cmd(KeyCode::Enter, SHIFT), None);
    }

    #[test]
    fn test_tab() {
        assert_eq!(cmd(KeyCode::Tab, NONE), Some(Command::TabRight));
        assert_eq!(cmd(KeyCode::Tab, SHIFT), Some(Command::TabLeft));
        assert_eq!(cmd(KeyCode::BackTab, SHIFT), Some(Command::TabLeft));
    }
}
