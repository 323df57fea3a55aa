//! Character and indentation edits.

use super::target_range;
use crate::text::boundary;
use crate::textarea::TextArea;

/// Delete `[start, end)` in one transaction and leave the cursor at `start`.
pub(crate) fn delete_range(ta: &mut TextArea, start: usize, end: usize) {
    ta.clear_selection();
    ta.begin_edit();
    ta.delete(start, end);
    ta.end_edit_at(start);
}

/// Insert `s` at the cursor, replacing the selection.
pub fn insert_string(ta: &mut TextArea, s: &str) {
    let (start, end) = target_range(ta);
    ta.clear_selection();
    ta.begin_edit();
    if start < end {
        ta.delete(start, end);
    }
    ta.insert(start, s);
    ta.end_edit_at(start + s.len());
}

/// Delete the selection, or the rune before the cursor.
pub fn backspace(ta: &mut TextArea) {
    let (start, end) = match ta.selection_range() {
        Some(range) => range,
        None => {
            let end = ta.cursor_index();
            let Some(start) = boundary::prev_rune_index(ta.content(), end) else {
                return;
            };
            (start, end)
        }
    };
    delete_range(ta, start, end);
}

/// Delete the selection, or the rune after the cursor.
pub fn delete(ta: &mut TextArea) {
    let (start, end) = match ta.selection_range() {
        Some(range) => range,
        None => {
            let start = ta.cursor_index();
            let Some(end) = boundary::next_rune_index(ta.content(), start) else {
                return;
            };
            (start, end)
        }
    };
    delete_range(ta, start, end);
}

/// Insert a newline followed by the current line's leading whitespace.
pub fn auto_indent(ta: &mut TextArea) {
    let (start, _) = target_range(ta);
    let content = ta.content();
    let line = boundary::line_start(content, start);
    let indent: String = content[line..start]
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .collect();
    insert_string(ta, &format!("\n{indent}"));
}

/// Indent the selected lines with a tab, or insert a tab at the cursor.
pub fn tab_right(ta: &mut TextArea) {
    if !ta.selection_active() {
        insert_string(ta, "\t");
        return;
    }
    super::lines::edit_line_prefixes(ta, |_| Some((0, 0, "\t")));
}

/// Remove one level of indentation (a tab, or up to a tab width of spaces)
/// from the selected lines or the cursor line.
pub fn tab_left(ta: &mut TextArea) {
    let tab_width = ta.config().tab_width as usize;
    super::lines::edit_line_prefixes(ta, |line| {
        if line.starts_with('\t') {
            return Some((0, 1, ""));
        }
        let spaces = line
            .bytes()
            .take(tab_width)
            .take_while(|b| *b == b' ')
            .count();
        (spaces > 0).then_some((0, spaces, ""))
    });
}
