//! Rune, word and line boundaries over byte offsets.
//!
//! All functions take and return byte offsets into `s`; inputs past the end
//! are treated as `s.len()`.

use unicode_segmentation::UnicodeSegmentation;

/// Largest `char` boundary not greater than `index`.
#[must_use]
pub fn floor_char_boundary(s: &str, index: usize) -> usize {
    let mut i = index.min(s.len());
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Start of the rune before `index`, or `None` at the start of `s`.
#[must_use]
pub fn prev_rune_index(s: &str, index: usize) -> Option<usize> {
    let index = floor_char_boundary(s, index);
    s[..index].char_indices().next_back().map(|(i, _)| i)
}

/// End of the rune starting at `index`, or `None` at the end of `s`.
#[must_use]
pub fn next_rune_index(s: &str, index: usize) -> Option<usize> {
    let index = floor_char_boundary(s, index);
    s[index..].chars().next().map(|c| index + c.len_utf8())
}

fn is_word(segment: &str) -> bool {
    segment.chars().any(|c| c.is_alphanumeric() || c == '_')
}

/// Word segment (per Unicode word boundaries) touching `index`.
///
/// Prefers the word starting at or containing `index`; falls back to a word
/// ending exactly at `index`. Returns `None` when neither side is a word.
#[must_use]
pub fn word_range_at(s: &str, index: usize) -> Option<(usize, usize)> {
    let index = floor_char_boundary(s, index);
    let mut before = None;
    for (start, seg) in s.split_word_bound_indices() {
        let end = start + seg.len();
        if start <= index && index < end && is_word(seg) {
            return Some((start, end));
        }
        if end == index && is_word(seg) {
            before = Some((start, end));
        }
        if start > index {
            break;
        }
    }
    before
}

/// Every whole-word occurrence of the word touching `index`, in order.
///
/// Empty when no word touches `index`.
#[must_use]
pub fn word_occurrences_at(s: &str, index: usize) -> Vec<(usize, usize)> {
    let Some((start, end)) = word_range_at(s, index) else {
        return Vec::new();
    };
    let word = &s[start..end];
    s.split_word_bound_indices()
        .filter(|(_, seg)| *seg == word)
        .map(|(at, seg)| (at, at + seg.len()))
        .collect()
}

/// End of the next word after `index`, or `s.len()`.
#[must_use]
pub fn next_word_end(s: &str, index: usize) -> usize {
    let index = floor_char_boundary(s, index);
    s[index..]
        .split_word_bound_indices()
        .find(|(_, seg)| is_word(seg))
        .map_or(s.len(), |(start, seg)| index + start + seg.len())
}

/// Start of the word before `index`, or 0.
#[must_use]
pub fn prev_word_start(s: &str, index: usize) -> usize {
    let index = floor_char_boundary(s, index);
    s[..index]
        .split_word_bound_indices()
        .rev()
        .find(|(_, seg)| is_word(seg))
        .map_or(0, |(start, _)| start)
}

/// Start of the line containing `index`.
#[must_use]
pub fn line_start(s: &str, index: usize) -> usize {
    let index = floor_char_boundary(s, index);
    s[..index].rfind('\n').map_or(0, |i| i + 1)
}

/// End of the line containing `index` (offset of its `'\n'`, or `s.len()`).
#[must_use]
pub fn line_end(s: &str, index: usize) -> usize {
    let index = floor_char_boundary(s, index);
    s[index..].find('\n').map_or(s.len(), |i| index + i)
}

/// Byte range of the whole lines touched by `[a, b)`, including the trailing
/// newline of the last line when present.
#[must_use]
pub fn lines_range(s: &str, a: usize, b: usize) -> (usize, usize) {
    let (a, b) = if a <= b { (a, b) } else { (b, a) };
    let start = line_start(s, a);
    // a selection ending at a line start does not include that line
    let last = if b > a && line_start(s, b) == floor_char_boundary(s, b) {
        b - 1
    } else {
        b
    };
    let end = line_end(s, last.max(start));
    let end = if end < s.len() { end + 1 } else { end };
    (start, end)
}
