//! Whole-line edits.

use super::{COMMENT_PREFIX, target_range};
use crate::text::boundary;
use crate::textarea::TextArea;

/// Edit at a line start: byte offset within the line, bytes removed there
/// and text inserted.
pub(crate) type LineEdit = (usize, usize, &'static str);

/// Cursor and anchor captured before a line edit.
struct Marks {
    selected: bool,
    anchor: usize,
    cursor: usize,
}

impl Marks {
    fn take(ta: &mut TextArea) -> Self {
        let marks = Self {
            selected: ta.selection_active(),
            anchor: ta.selection_anchor(),
            cursor: ta.cursor_index(),
        };
        ta.clear_selection();
        marks
    }

    /// Commit the open edit with the marks mapped into the new content.
    fn commit(&self, ta: &mut TextArea, map: impl Fn(usize) -> usize) {
        let cursor = map(self.cursor);
        ta.end_edit_at(cursor);
        if self.selected {
            ta.set_selection(map(self.anchor), cursor);
        }
    }
}

/// Replace `[start, end)` with `text` in an open transaction.
fn replace(ta: &mut TextArea, start: usize, end: usize, text: &str) {
    ta.delete(start, end);
    ta.insert(start, text);
}

fn shift(index: usize, edits: &[(usize, usize, &str)]) -> usize {
    let mut out = index;
    for &(at, remove, insert) in edits {
        if at < index || (at == index && remove == 0) {
            let removed = remove.min(index - at);
            out = (out + insert.len()).saturating_sub(removed);
        }
    }
    out
}

/// Apply `edit` to the start of every line touched by the selection, or to
/// the cursor line, as one transaction.
///
/// An active selection is widened to the edited lines.
pub(crate) fn edit_line_prefixes<F>(ta: &mut TextArea, mut edit: F)
where
    F: FnMut(&str) -> Option<LineEdit>,
{
    let (a, b) = target_range(ta);
    let content = ta.content();
    let (start, end) = boundary::lines_range(content, a, b);

    let mut edits: Vec<(usize, usize, &'static str)> = Vec::new();
    let mut pos = start;
    loop {
        let eol = boundary::line_end(content, pos);
        if let Some((at, remove, insert)) = edit(&content[pos..eol]) {
            edits.push((pos + at, remove, insert));
        }
        pos = eol + 1;
        if eol >= content.len() || pos >= end {
            break;
        }
    }
    if edits.is_empty() {
        return;
    }

    let marks = Marks::take(ta);
    ta.begin_edit();
    for &(at, remove, insert) in edits.iter().rev() {
        if remove > 0 {
            ta.delete(at, at + remove);
        }
        if !insert.is_empty() {
            ta.insert(at, insert);
        }
    }

    if marks.selected {
        let new_end = shift(end, &edits);
        ta.end_edit_at(new_end);
        ta.set_selection(start, new_end);
    } else {
        marks.commit(ta, |i| shift(i, &edits));
    }
}

/// Delete the selected lines or the cursor line.
pub fn remove_lines(ta: &mut TextArea) {
    let (a, b) = target_range(ta);
    let content = ta.content();
    let (mut start, end) = boundary::lines_range(content, a, b);
    // the last line takes the newline before it
    if end == content.len() && start > 0 && !content[start..end].ends_with('\n') {
        start -= 1;
    }
    if start == end {
        return;
    }
    let line = boundary::line_start(content, start);
    ta.clear_selection();
    ta.begin_edit();
    ta.delete(start, end);
    ta.end_edit_at(line);
}

/// Insert a copy of the selected lines (or the cursor line) below them and
/// move the cursor or selection into the copy.
pub fn duplicate_lines(ta: &mut TextArea) {
    let (a, b) = target_range(ta);
    let content = ta.content();
    let (start, end) = boundary::lines_range(content, a, b);
    let text = &content[start..end];
    let copy = if text.ends_with('\n') {
        text.to_string()
    } else {
        format!("\n{text}")
    };

    let marks = Marks::take(ta);
    ta.begin_edit();
    ta.insert(end, &copy);
    // the copy starts right after the original, past any added newline
    let moved = copy.len();
    marks.commit(ta, |i| i + moved);
}

/// Swap the selected lines (or the cursor line) with the line above.
pub fn move_line_up(ta: &mut TextArea) {
    let (a, b) = target_range(ta);
    let content = ta.content();
    let (start, end) = boundary::lines_range(content, a, b);
    if start == 0 {
        return;
    }
    let above = boundary::line_start(content, start - 1);
    let lines = &content[start..end];
    let prev = &content[above..start];
    let text = if lines.ends_with('\n') {
        format!("{lines}{prev}")
    } else {
        format!("{lines}\n{}", &prev[..prev.len() - 1])
    };

    let marks = Marks::take(ta);
    ta.begin_edit();
    replace(ta, above, end, &text);
    let moved = start - above;
    marks.commit(ta, |i| i - moved);
}

/// Swap the selected lines (or the cursor line) with the line below.
pub fn move_line_down(ta: &mut TextArea) {
    let (a, b) = target_range(ta);
    let content = ta.content();
    let (start, end) = boundary::lines_range(content, a, b);
    if end >= content.len() {
        return;
    }
    let next_eol = boundary::line_end(content, end);
    let below = if next_eol < content.len() {
        next_eol + 1
    } else {
        next_eol
    };
    let lines = &content[start..end];
    let next = &content[end..below];
    let (text, moved) = if next.ends_with('\n') {
        (format!("{next}{lines}"), next.len())
    } else {
        (
            format!("{next}\n{}", &lines[..lines.len() - 1]),
            next.len() + 1,
        )
    };

    let marks = Marks::take(ta);
    ta.begin_edit();
    replace(ta, start, below, &text);
    marks.commit(ta, |i| i + moved);
}

fn indent_len(line: &str) -> usize {
    line.bytes().take_while(|b| *b == b' ' || *b == b'\t').count()
}

/// Prefix non-blank lines with `// ` after their indentation.
pub fn comment(ta: &mut TextArea) {
    edit_line_prefixes(ta, |line| {
        let indent = indent_len(line);
        (indent < line.len()).then_some((indent, 0, COMMENT_PREFIX))
    });
}

/// Remove a `// ` (or `//`) prefix after the indentation.
pub fn uncomment(ta: &mut TextArea) {
    edit_line_prefixes(ta, |line| {
        let indent = indent_len(line);
        let rest = &line[indent..];
        if rest.starts_with(COMMENT_PREFIX) {
            Some((indent, COMMENT_PREFIX.len(), ""))
        } else if rest.starts_with("//") {
            Some((indent, 2, ""))
        } else {
            None
        }
    });
}
