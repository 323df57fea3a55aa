//! Cursor movement.

use crate::fixed::{Fixed, Point};
use crate::text::boundary;
use crate::textarea::TextArea;

/// Move the cursor to `index`, extending the selection or clearing it.
pub(crate) fn move_to(ta: &mut TextArea, index: usize, select: bool) {
    if select {
        let anchor = ta.selection_anchor();
        ta.set_selection(anchor, index);
    } else {
        ta.clear_selection();
        ta.set_cursor_index(index);
    }
}

/// Collapse an active selection to one of its ends. Returns whether it did.
fn collapse(ta: &mut TextArea, select: bool, to_start: bool) -> bool {
    if select {
        return false;
    }
    let Some((start, end)) = ta.selection_range() else {
        return false;
    };
    move_to(ta, if to_start { start } else { end }, false);
    true
}

pub fn move_left(ta: &mut TextArea, select: bool) {
    if collapse(ta, select, true) {
        return;
    }
    if let Some(i) = boundary::prev_rune_index(ta.content(), ta.cursor_index()) {
        move_to(ta, i, select);
    }
}

pub fn move_right(ta: &mut TextArea, select: bool) {
    if collapse(ta, select, false) {
        return;
    }
    if let Some(i) = boundary::next_rune_index(ta.content(), ta.cursor_index()) {
        move_to(ta, i, select);
    }
}

/// Move to the start of the previous word.
pub fn jump_left(ta: &mut TextArea, select: bool) {
    let i = boundary::prev_word_start(ta.content(), ta.cursor_index());
    move_to(ta, i, select);
}

/// Move to the end of the next word.
pub fn jump_right(ta: &mut TextArea, select: bool) {
    let i = boundary::next_word_end(ta.content(), ta.cursor_index());
    move_to(ta, i, select);
}

/// Move one visual line up, keeping the pen X. On the first line the cursor
/// goes to the start of the text.
pub fn move_up(ta: &mut TextArea, select: bool) {
    let p = ta.point_at_index(ta.cursor_index());
    let y = p.y - ta.line_height();
    let i = if y < Fixed::ZERO {
        0
    } else {
        ta.index_at_point(Point::new(p.x, y))
    };
    move_to(ta, i, select);
}

/// Move one visual line down, keeping the pen X. On the last line the cursor
/// goes to the end of the text.
pub fn move_down(ta: &mut TextArea, select: bool) {
    let p = ta.point_at_index(ta.cursor_index());
    let y = p.y + ta.line_height();
    let i = if y >= ta.layout().height() {
        ta.content().len()
    } else {
        ta.index_at_point(Point::new(p.x, y))
    };
    move_to(ta, i, select);
}

pub fn line_start(ta: &mut TextArea, select: bool) {
    let i = boundary::line_start(ta.content(), ta.cursor_index());
    move_to(ta, i, select);
}

pub fn line_end(ta: &mut TextArea, select: bool) {
    let i = boundary::line_end(ta.content(), ta.cursor_index());
    move_to(ta, i, select);
}

pub fn string_start(ta: &mut TextArea, select: bool) {
    move_to(ta, 0, select);
}

pub fn string_end(ta: &mut TextArea, select: bool) {
    let len = ta.content().len();
    move_to(ta, len, select);
}

/// Move to the index under `point` (content coordinates).
pub fn move_cursor_to_point(ta: &mut TextArea, point: Point, select: bool) {
    let i = ta.index_at_point(point);
    move_to(ta, i, select);
}
