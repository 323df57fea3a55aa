//! Property-based tests for editing commands run through the text area.
//!
//! Every content-changing command is one undo step: undoing it restores the
//! content and cursor from before the command, and redoing it restores the
//! content and cursor the command left.

mod common;

use common::text_area;
use proptest::prelude::*;
use textarea_core::Command;

// ============================================================================
// Strategies
// ============================================================================

fn content() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(vec!["ab", "cd", " ", "  ", "\t", "// ", "é", "\n"]),
        0..24,
    )
    .prop_map(|parts| parts.concat())
}

fn movement() -> impl Strategy<Value = Command> {
    prop_oneof![
        any::<bool>().prop_map(|select| Command::MoveLeft { select }),
        any::<bool>().prop_map(|select| Command::MoveRight { select }),
        any::<bool>().prop_map(|select| Command::MoveUp { select }),
        any::<bool>().prop_map(|select| Command::MoveDown { select }),
        any::<bool>().prop_map(|select| Command::JumpRight { select }),
        any::<bool>().prop_map(|select| Command::LineEnd { select }),
        Just(Command::SelectLine),
    ]
}

fn edit() -> impl Strategy<Value = Command> {
    prop_oneof![
        "[a-z\n]{1,3}".prop_map(Command::InsertString),
        Just(Command::Backspace),
        Just(Command::Delete),
        Just(Command::TabRight),
        Just(Command::TabLeft),
        Just(Command::AutoIndent),
        Just(Command::Copy),
        Just(Command::Cut),
        Just(Command::PasteClipboard),
    ]
}

fn line_edit() -> impl Strategy<Value = Command> {
    prop_oneof![
        Just(Command::RemoveLines),
        Just(Command::DuplicateLines),
        Just(Command::MoveLineUp),
        Just(Command::MoveLineDown),
        Just(Command::Comment),
        Just(Command::Uncomment),
    ]
}

fn command() -> impl Strategy<Value = Command> {
    prop_oneof![movement(), edit(), line_edit()]
}

// ============================================================================
// Undo/Redo Properties
// ============================================================================

proptest! {
    #[test]
    fn command_undo_redo_restores_cursor(
        s in content(),
        start in any::<usize>(),
        commands in prop::collection::vec(command(), 1..30),
    ) {
        let mut ta = text_area(&s, 20, 8);
        ta.set_cursor_index(start % (s.len() + 1));

        // (content, cursor) before and after each recorded command
        let mut steps: Vec<((String, usize), (String, usize))> = Vec::new();
        for command in &commands {
            let before = (ta.content().to_string(), ta.cursor_index());
            let revision = ta.buffer().revision();
            // an empty clipboard fails the paste and leaves the content alone
            let _ = ta.execute(command);
            if ta.buffer().revision() != revision {
                steps.push((before, (ta.content().to_string(), ta.cursor_index())));
            }
        }
        prop_assert_eq!(ta.buffer().history().len(), steps.len());

        for (before, _) in steps.iter().rev() {
            prop_assert!(ta.undo());
            prop_assert_eq!(ta.content(), before.0.as_str());
            prop_assert_eq!(ta.cursor_index(), before.1);
        }
        prop_assert!(!ta.undo());

        for (_, after) in &steps {
            prop_assert!(ta.redo());
            prop_assert_eq!(ta.content(), after.0.as_str());
            prop_assert_eq!(ta.cursor_index(), after.1);
        }
        prop_assert!(!ta.redo());
    }
}

// ============================================================================
// Fixed Scenarios
// ============================================================================

fn assert_undo_redo(content: &str, cursor: usize, command: &Command) {
    let mut ta = text_area(content, 20, 8);
    ta.set_cursor_index(cursor);
    ta.execute(command).unwrap();
    let after = (ta.content().to_string(), ta.cursor_index());

    assert!(ta.undo());
    assert_eq!((ta.content(), ta.cursor_index()), (content, cursor));
    assert!(ta.redo());
    assert_eq!((ta.content().to_string(), ta.cursor_index()), after);
}

#[test]
fn duplicate_lines_redo_cursor() {
    assert_undo_redo("ab\ncd", 0, &Command::DuplicateLines);
}

#[test]
fn comment_redo_cursor() {
    assert_undo_redo("ab\ncd", 4, &Command::Comment);
}

#[test]
fn move_line_down_redo_cursor() {
    assert_undo_redo("ab\ncd", 1, &Command::MoveLineDown);
}

#[test]
fn tab_right_on_selection_redo_cursor() {
    let mut ta = text_area("a\nb\nc", 20, 8);
    ta.set_selection(2, 5);
    ta.execute(&Command::TabRight).unwrap();
    assert_eq!(ta.content(), "a\n\tb\n\tc");
    assert_eq!(ta.cursor_index(), 7);

    assert!(ta.undo());
    assert_eq!(ta.cursor_index(), 5);
    assert!(ta.redo());
    assert_eq!(ta.cursor_index(), 7);
}
