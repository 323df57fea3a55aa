//! Editing commands.
//!
//! Every command is a plain function over [`TextArea`]; [`Command`] names them
//! so key bindings and hosts can dispatch through [`execute`]. Commands that
//! change content run inside one edit transaction, so each is a single undo
//! step.

mod copy_paste;
mod edit;
mod lines;
mod movement;
mod scroll;
mod selection;

pub use copy_paste::{copy, cut, paste};
pub use edit::{auto_indent, backspace, delete, insert_string, tab_left, tab_right};
pub use lines::{comment, duplicate_lines, move_line_down, move_line_up, remove_lines, uncomment};
pub use movement::{
    jump_left, jump_right, line_end, line_start, move_cursor_to_point, move_down, move_left,
    move_right, move_up, string_end, string_start,
};
pub use scroll::{page_down, page_up, scroll_down, scroll_up};
pub use selection::{select_all, select_line, select_word};

use crate::clipboard::SelectionKind;
use crate::error::Result;
use crate::fixed::Point;
use crate::textarea::TextArea;

/// Prefix inserted by [`comment`] and removed by [`uncomment`].
pub const COMMENT_PREFIX: &str = "// ";

/// A text area command.
///
/// `select` extends the selection from its anchor instead of clearing it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    MoveLeft { select: bool },
    MoveRight { select: bool },
    JumpLeft { select: bool },
    JumpRight { select: bool },
    MoveUp { select: bool },
    MoveDown { select: bool },
    LineStart { select: bool },
    LineEnd { select: bool },
    StringStart { select: bool },
    StringEnd { select: bool },
    /// Move the cursor to the index under a content point.
    MoveCursorToPoint { point: Point, select: bool },

    Backspace,
    Delete,
    /// Insert at the cursor, replacing the selection.
    InsertString(String),
    TabRight,
    TabLeft,
    AutoIndent,

    Copy,
    Cut,
    PasteClipboard,
    PastePrimary,

    SelectAll,
    SelectWord,
    SelectLine,

    RemoveLines,
    DuplicateLines,
    MoveLineUp,
    MoveLineDown,
    Comment,
    Uncomment,

    PageUp,
    PageDown,
    ScrollUp,
    ScrollDown,

    Undo,
    Redo,
}

impl Command {
    /// Whether the command may change the content.
    #[must_use]
    pub fn is_edit(&self) -> bool {
        matches!(
            self,
            Self::Backspace
                | Self::Delete
                | Self::InsertString(_)
                | Self::TabRight
                | Self::TabLeft
                | Self::AutoIndent
                | Self::Cut
                | Self::PasteClipboard
                | Self::PastePrimary
                | Self::RemoveLines
                | Self::DuplicateLines
                | Self::MoveLineUp
                | Self::MoveLineDown
                | Self::Comment
                | Self::Uncomment
                | Self::Undo
                | Self::Redo
        )
    }
}

/// Run `command` against `ta`.
///
/// Only the paste commands can fail, with the clipboard's error.
pub fn execute(ta: &mut TextArea, command: &Command) -> Result<()> {
    tracing::trace!(?command, "execute");
    match command {
        Command::MoveLeft { select } => move_left(ta, *select),
        Command::MoveRight { select } => move_right(ta, *select),
        Command::JumpLeft { select } => jump_left(ta, *select),
        Command::JumpRight { select } => jump_right(ta, *select),
        Command::MoveUp { select } => move_up(ta, *select),
        Command::MoveDown { select } => move_down(ta, *select),
        Command::LineStart { select } => line_start(ta, *select),
        Command::LineEnd { select } => line_end(ta, *select),
        Command::StringStart { select } => string_start(ta, *select),
        Command::StringEnd { select } => string_end(ta, *select),
        Command::MoveCursorToPoint { point, select } => move_cursor_to_point(ta, *point, *select),

        Command::Backspace => backspace(ta),
        Command::Delete => delete(ta),
        Command::InsertString(s) => insert_string(ta, s),
        Command::TabRight => tab_right(ta),
        Command::TabLeft => tab_left(ta),
        Command::AutoIndent => auto_indent(ta),

        Command::Copy => copy(ta),
        Command::Cut => cut(ta),
        Command::PasteClipboard => return paste(ta, SelectionKind::Clipboard),
        Command::PastePrimary => return paste(ta, SelectionKind::Primary),

        Command::SelectAll => select_all(ta),
        Command::SelectWord => select_word(ta),
        Command::SelectLine => select_line(ta),

        Command::RemoveLines => remove_lines(ta),
        Command::DuplicateLines => duplicate_lines(ta),
        Command::MoveLineUp => move_line_up(ta),
        Command::MoveLineDown => move_line_down(ta),
        Command::Comment => comment(ta),
        Command::Uncomment => uncomment(ta),

        Command::PageUp => page_up(ta),
        Command::PageDown => page_down(ta),
        Command::ScrollUp => scroll_up(ta),
        Command::ScrollDown => scroll_down(ta),

        Command::Undo => {
            ta.undo();
        }
        Command::Redo => {
            ta.redo();
        }
    }
    Ok(())
}

/// Line and cursor span a command acts on: the selection, or the cursor.
pub(crate) fn target_range(ta: &TextArea) -> (usize, usize) {
    ta.selection_range().unwrap_or_else(|| {
        let c = ta.cursor_index();
        (c, c)
    })
}
