//! Selection commands.

use crate::text::boundary;
use crate::textarea::TextArea;

pub fn select_all(ta: &mut TextArea) {
    let len = ta.content().len();
    ta.set_selection(0, len);
}

/// Select the word at the cursor; no-op between words.
pub fn select_word(ta: &mut TextArea) {
    if let Some((start, end)) = boundary::word_range_at(ta.content(), ta.cursor_index()) {
        ta.set_selection(start, end);
    }
}

/// Select the cursor line including its newline.
pub fn select_line(ta: &mut TextArea) {
    let c = ta.cursor_index();
    let (start, end) = boundary::lines_range(ta.content(), c, c);
    ta.set_selection(start, end);
}
