//! Fuzz target for editing sessions.
//!
//! Drives a text area with arbitrary commands, host pastes and pointer
//! events, checking buffer invariants after every step and that undoing
//! everything restores the initial content.

#![no_main]

use std::sync::Arc;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use textarea_core::face::{GlyphFace, MonoFace};
use textarea_core::input::PasteEvent;
use textarea_core::{
    Command, Event, MemoryClipboard, MouseButton, MouseEvent, Point, Rect, TextArea,
    TextAreaConfig,
};

#[derive(Arbitrary, Debug)]
enum Step {
    Command(FuzzCommand),
    Paste(String),
    Click { x: i16, y: i16, shift: bool },
    Drag { x: i16, y: i16 },
    DoubleClick { x: i16, y: i16 },
    Undo,
    Redo,
}

#[derive(Arbitrary, Debug)]
enum FuzzCommand {
    Move { dir: u8, select: bool },
    Backspace,
    Delete,
    Insert(String),
    TabRight,
    TabLeft,
    AutoIndent,
    Cut,
    Copy,
    PasteClipboard,
    SelectAll,
    SelectWord,
    SelectLine,
    RemoveLines,
    DuplicateLines,
    MoveLineUp,
    MoveLineDown,
    Comment,
    Uncomment,
    PageDown,
    PageUp,
    ToPoint { x: i16, y: i16, select: bool },
}

impl FuzzCommand {
    fn to_command(&self) -> Command {
        match self {
            Self::Move { dir, select } => {
                let select = *select;
                match dir % 10 {
                    0 => Command::MoveLeft { select },
                    1 => Command::MoveRight { select },
                    2 => Command::JumpLeft { select },
                    3 => Command::JumpRight { select },
                    4 => Command::MoveUp { select },
                    5 => Command::MoveDown { select },
                    6 => Command::LineStart { select },
                    7 => Command::LineEnd { select },
                    8 => Command::StringStart { select },
                    _ => Command::StringEnd { select },
                }
            }
            Self::Backspace => Command::Backspace,
            Self::Delete => Command::Delete,
            Self::Insert(s) => Command::InsertString(s.chars().take(32).collect()),
            Self::TabRight => Command::TabRight,
            Self::TabLeft => Command::TabLeft,
            Self::AutoIndent => Command::AutoIndent,
            Self::Cut => Command::Cut,
            Self::Copy => Command::Copy,
            Self::PasteClipboard => Command::PasteClipboard,
            Self::SelectAll => Command::SelectAll,
            Self::SelectWord => Command::SelectWord,
            Self::SelectLine => Command::SelectLine,
            Self::RemoveLines => Command::RemoveLines,
            Self::DuplicateLines => Command::DuplicateLines,
            Self::MoveLineUp => Command::MoveLineUp,
            Self::MoveLineDown => Command::MoveLineDown,
            Self::Comment => Command::Comment,
            Self::Uncomment => Command::Uncomment,
            Self::PageDown => Command::PageDown,
            Self::PageUp => Command::PageUp,
            Self::ToPoint { x, y, select } => Command::MoveCursorToPoint {
                point: Point::from_int(i32::from(*x), i32::from(*y)),
                select: *select,
            },
        }
    }
}

#[derive(Arbitrary, Debug)]
struct Session {
    initial: String,
    steps: Vec<Step>,
}

fuzz_target!(|session: Session| {
    let face: Arc<dyn GlyphFace> = Arc::new(MonoFace::default());
    let config = TextAreaConfig::default()
        .with_render_workers(1)
        .with_max_undo_depth(1_000);
    let mut ta = TextArea::new(face, config).with_clipboard(Box::new(MemoryClipboard::default()));
    ta.set_bounds(Rect::new(0, 0, 200, 120));
    ta.set_content(&session.initial, true, true);

    let mut edits = 0usize;
    for step in session.steps.iter().take(200) {
        let before = ta.buffer().revision();
        // paste failures on an empty clipboard are expected
        let _ = match step {
            Step::Command(cmd) => ta.execute(&cmd.to_command()),
            Step::Paste(s) => ta.handle_event(&Event::Paste(PasteEvent::new(s.as_str()))),
            Step::Click { x, y, shift } => {
                let ev = MouseEvent::press(i32::from(*x), i32::from(*y), MouseButton::Left);
                let ev = if *shift {
                    ev.with_modifiers(textarea_core::KeyModifiers::SHIFT)
                } else {
                    ev
                };
                ta.handle_event(&ev.into())
            }
            Step::Drag { x, y } => ta.handle_event(
                &MouseEvent::drag(i32::from(*x), i32::from(*y), MouseButton::Left).into(),
            ),
            Step::DoubleClick { x, y } => ta.handle_event(
                &MouseEvent::double_click(i32::from(*x), i32::from(*y), MouseButton::Left).into(),
            ),
            Step::Undo => {
                ta.undo();
                Ok(())
            }
            Step::Redo => {
                ta.redo();
                Ok(())
            }
        };
        if !matches!(step, Step::Undo | Step::Redo) && ta.buffer().revision() != before {
            edits += 1;
        }

        let content = ta.content();
        assert!(ta.cursor_index() <= content.len());
        assert!(content.is_char_boundary(ta.cursor_index()));
        assert!(content.is_char_boundary(ta.selection_anchor()));
        assert_eq!(ta.selection_active(), ta.selection_range().is_some());
        assert!(!ta.is_editing());
    }

    if !session.steps.iter().any(|s| matches!(s, Step::Undo | Step::Redo)) {
        for _ in 0..edits {
            assert!(ta.undo());
        }
        assert_eq!(ta.content(), session.initial);
    }
});
