//! End-to-end tests: input events through the text area into paint output.
//!
//! Run with:
//!   cargo test --test `textarea_flow` -- --nocapture

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::{CELL_W, LINE_H, init_logging, text_area, text_area_with};
use textarea_core::input::PasteEvent;
use textarea_core::{
    Event, Fixed, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, Rgba, SelectionKind,
    Surface, TextAreaConfig, TextAreaEvent, Wrap,
};

fn key(code: KeyCode) -> Event {
    KeyEvent::key(code).into()
}

fn key_mods(code: KeyCode, mods: KeyModifiers) -> Event {
    KeyEvent::new(code, mods).into()
}

fn type_text(ta: &mut textarea_core::TextArea, s: &str) {
    for c in s.chars() {
        ta.handle_event(&KeyEvent::from(c).into()).unwrap();
    }
}

#[test]
fn typing_and_undo() {
    init_logging();
    let mut ta = text_area("", 20, 4);
    type_text(&mut ta, "hi\nthere");
    assert_eq!(ta.content(), "hi\nthere");
    assert_eq!(ta.cursor_index(), 8);

    ta.handle_event(&key_mods(KeyCode::Char('z'), KeyModifiers::CTRL)).unwrap();
    assert_eq!(ta.content(), "hi\nther");
    ta.handle_event(&key_mods(KeyCode::Char('z'), KeyModifiers::CTRL_SHIFT))
        .unwrap();
    assert_eq!(ta.content(), "hi\nthere");
}

#[test]
fn keyboard_selection_and_clipboard() {
    let mut ta = text_area("hello world", 20, 4);
    ta.handle_event(&key_mods(KeyCode::Right, KeyModifiers::CTRL_SHIFT))
        .unwrap();
    assert_eq!(ta.selected_text(), Some("hello"));

    ta.handle_event(&key_mods(KeyCode::Char('x'), KeyModifiers::CTRL)).unwrap();
    assert_eq!(ta.content(), " world");

    ta.handle_event(&key(KeyCode::End)).unwrap();
    ta.handle_event(&key_mods(KeyCode::Char('v'), KeyModifiers::CTRL)).unwrap();
    assert_eq!(ta.content(), " worldhello");
}

#[test]
fn host_paste_replaces_selection() {
    let mut ta = text_area("abc", 20, 4);
    ta.handle_event(&key_mods(KeyCode::Char('a'), KeyModifiers::CTRL)).unwrap();
    ta.handle_event(&PasteEvent::new("xyz").into()).unwrap();
    assert_eq!(ta.content(), "xyz");
    assert_eq!(ta.cursor_index(), 3);
}

#[test]
fn double_and_triple_click() {
    let mut ta = text_area("one two\nthree", 20, 4);
    ta.handle_event(&MouseEvent::double_click(5 * CELL_W, 2, MouseButton::Left).into())
        .unwrap();
    assert_eq!(ta.selected_text(), Some("two"));
    assert_eq!(ta.request_paste(SelectionKind::Primary).as_deref(), Ok("two"));

    ta.handle_event(&MouseEvent::triple_click(2, LINE_H + 2, MouseButton::Left).into())
        .unwrap();
    assert_eq!(ta.selected_text(), Some("three"));
}

#[test]
fn middle_click_pastes_primary() {
    let mut ta = text_area("ab", 20, 4);
    ta.set_selection(0, 1);
    ta.set_copy(SelectionKind::Primary, "Q");
    ta.handle_event(&MouseEvent::press(2 * CELL_W + 1, 2, MouseButton::Middle).into())
        .unwrap();
    ta.handle_event(&MouseEvent::release(2 * CELL_W + 1, 2, MouseButton::Middle).into())
        .unwrap();
    assert_eq!(ta.content(), "abQ");
}

#[test]
fn release_outside_bounds_is_ignored() {
    let mut ta = text_area("ab", 20, 4);
    let seen = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&seen);
    let _sub = ta.subscribe(move |ev| {
        if matches!(ev, TextAreaEvent::Cmd { .. }) {
            *sink.borrow_mut() += 1;
        }
    });
    ta.handle_event(&MouseEvent::press(1, 1, MouseButton::Right).into())
        .unwrap();
    ta.handle_event(&MouseEvent::release(-5, 1, MouseButton::Right).into())
        .unwrap();
    assert_eq!(*seen.borrow(), 0);

    ta.handle_event(&MouseEvent::press(1, 1, MouseButton::Right).into())
        .unwrap();
    ta.handle_event(&MouseEvent::release(1, 1, MouseButton::Right).into())
        .unwrap();
    assert_eq!(*seen.borrow(), 1);
}

#[test]
fn wheel_scrolls_view() {
    let content = "x\n".repeat(40);
    let mut ta = text_area(&content, 10, 4);
    ta.handle_event(&MouseEvent::scroll_down(0, 0).into()).unwrap();
    assert_eq!(ta.offset_y(), Fixed::from_int(4 * LINE_H));
    ta.handle_event(&MouseEvent::scroll_up(0, 0).into()).unwrap();
    assert_eq!(ta.offset_y(), Fixed::ZERO);

    ta.handle_event(&key(KeyCode::PageDown)).unwrap();
    assert_eq!(ta.offset_y(), Fixed::from_int(4 * LINE_H));
}

#[test]
fn wheel_outside_bounds_is_ignored() {
    let content = "x\n".repeat(40);
    let mut ta = text_area(&content, 10, 4);
    let right = 10 * CELL_W;
    let below = 4 * LINE_H;
    ta.handle_event(&MouseEvent::scroll_down(right, 0).into()).unwrap();
    ta.handle_event(&MouseEvent::scroll_down(0, below).into()).unwrap();
    ta.handle_event(&MouseEvent::scroll_down(-1, 2).into()).unwrap();
    assert_eq!(ta.offset_y(), Fixed::ZERO);

    ta.handle_event(&MouseEvent::scroll_down(right - 1, below - 1).into()).unwrap();
    assert_eq!(ta.offset_y(), Fixed::from_int(4 * LINE_H));
    ta.handle_event(&MouseEvent::scroll_up(right, below).into()).unwrap();
    assert_eq!(ta.offset_y(), Fixed::from_int(4 * LINE_H));
}

#[test]
fn shift_click_extends_selection() {
    let mut ta = text_area("hello world", 20, 2);
    ta.handle_event(&MouseEvent::press(0, 0, MouseButton::Left).into()).unwrap();
    ta.handle_event(&MouseEvent::release(0, 0, MouseButton::Left).into()).unwrap();
    let shifted = MouseEvent::press(5 * CELL_W, 0, MouseButton::Left)
        .with_modifiers(KeyModifiers::SHIFT);
    ta.handle_event(&shifted.into()).unwrap();
    assert_eq!(ta.selection_range(), Some((0, 5)));
    assert_eq!(ta.cursor_index(), 5);
}

#[test]
fn cursor_moves_keep_cursor_visible() {
    let content = "x\n".repeat(40);
    let mut ta = text_area(&content, 10, 4);
    for _ in 0..10 {
        ta.handle_event(&key(KeyCode::Down)).unwrap();
    }
    let y = ta.point_at_index(ta.cursor_index()).y;
    let view = Fixed::from_int(4 * LINE_H);
    assert!(y >= ta.offset_y());
    assert!(y + Fixed::from_int(LINE_H) <= ta.offset_y() + view);
}

#[test]
fn content_events_follow_edits() {
    let mut ta = text_area("", 20, 4);
    let revisions = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&revisions);
    let sub = ta.subscribe(move |ev| {
        if let TextAreaEvent::ContentChanged { revision } = ev {
            sink.borrow_mut().push(*revision);
        }
    });
    type_text(&mut ta, "ab");
    // moving the cursor changes no content
    ta.handle_event(&key(KeyCode::Left)).unwrap();
    assert_eq!(revisions.borrow().len(), 2);

    drop(sub);
    type_text(&mut ta, "c");
    assert_eq!(revisions.borrow().len(), 2);
}

#[test]
fn paint_reflects_selection_and_wrap() {
    init_logging();
    let config = TextAreaConfig::default()
        .with_wrap(Wrap::Columns(4))
        .with_highlight_cursor_word(false)
        .with_render_workers(2);
    let mut ta = text_area_with("abcdefgh", 20, 4, config);
    assert_eq!(ta.measure(160), 2 * LINE_H as u32);

    ta.set_selection(0, 2);
    let mut surface = Surface::new(160, 64).unwrap();
    let stats = ta.paint(&mut surface);
    assert_eq!(stats.lines, 2);
    assert_eq!(stats.glyphs, 8);

    let selection_bg = ta.config().colors.selection.bg;
    // selected cell, away from the glyph ink
    assert_eq!(surface.get(0, 0), Some(selection_bg));
    // unselected cell on the second line keeps the normal background
    assert_eq!(surface.get(0, LINE_H), Some(ta.config().colors.normal.bg));
    assert_ne!(selection_bg, Rgba::WHITE);
}

#[test]
fn paint_highlights_word_under_cursor() {
    let mut ta = text_area("let x = x + y", 20, 2);
    ta.set_cursor_index(4);
    let mut surface = Surface::new(160, 32).unwrap();
    ta.paint(&mut surface);

    let colors = ta.config().colors;
    // right padding column of cell `i`, clear of the glyph ink and the cursor
    let cell = |i: i32| surface.get(i * CELL_W + CELL_W - 1, 0);
    assert_eq!(cell(4), Some(colors.word.bg));
    assert_eq!(cell(8), Some(colors.word.bg));
    assert_eq!(cell(0), Some(colors.normal.bg));
    assert_eq!(cell(12), Some(colors.normal.bg));

    let config = ta.config().clone().with_highlight_cursor_word(false);
    ta.set_config(config);
    ta.paint(&mut surface);
    assert_eq!(surface.get(9 * CELL_W - 1, 0), Some(colors.normal.bg));
}
