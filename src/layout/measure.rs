//! Measured layout: line table and index/point mapping.

use super::{Flow, Origin, PipelineBuilder, StepKind};
use crate::face::GlyphFace;
use crate::fixed::{Fixed, Point};
use crate::text::boundary::floor_char_boundary;

/// Inputs that change line breaking.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutOptions {
    /// Wrap width; `None` disables wrapping.
    pub wrap_width: Option<Fixed>,
    /// Tab stop distance in space advances.
    pub tab_width: u32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            wrap_width: None,
            tab_width: PipelineBuilder::DEFAULT_TAB_WIDTH,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Entry {
    index: usize,
    x: Fixed,
    advance: Fixed,
}

/// One visual line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineInfo {
    /// Byte offset of the first rune on the line.
    pub start: usize,
    /// Offset hit by clicks past the last rune: the newline, the wrap
    /// position or the end of the content.
    pub end: usize,
    /// Top edge of the line.
    pub y: Fixed,
    entries: std::ops::Range<usize>,
}

/// Result of measuring the whole content once.
///
/// A layout is tied to the buffer revision and options it was measured
/// with; callers rebuild it when either changes.
#[derive(Clone, Debug)]
pub struct Layout {
    revision: u64,
    options: LayoutOptions,
    line_height: Fixed,
    entries: Vec<Entry>,
    lines: Vec<LineInfo>,
}

impl Layout {
    /// Lay out `content` from the start.
    #[must_use]
    pub fn measure(content: &str, face: &dyn GlyphFace, options: LayoutOptions, revision: u64) -> Self {
        let mut entries: Vec<Entry> = Vec::with_capacity(content.len() + 1);
        let mut lines: Vec<LineInfo> = Vec::new();

        let mut pipeline = PipelineBuilder::new(content, face)
            .tab_width(options.tab_width)
            .wrap(options.wrap_width)
            .lines()
            .build();
        let summary = pipeline.run(|step| {
            if lines.len() <= step.line {
                let first = entries.len();
                lines.push(LineInfo {
                    start: step.index,
                    end: step.index,
                    y: step.pen.y,
                    entries: first..first,
                });
            }
            if let Some(line) = lines.last_mut() {
                match step.kind {
                    StepKind::WrapBreak => line.end = step.index,
                    StepKind::Rune | StepKind::End => {
                        entries.push(Entry {
                            index: step.index,
                            x: step.pen.x,
                            advance: step.advance,
                        });
                        line.entries.end = entries.len();
                        line.end = step.index;
                    }
                }
            }
            Flow::Continue
        });

        tracing::debug!(
            revision,
            lines = summary.lines,
            bytes = content.len(),
            "measured layout"
        );

        Self {
            revision,
            options,
            line_height: face.line_height(),
            entries,
            lines,
        }
    }

    /// Whether this layout is still valid for `revision` and `options`.
    #[must_use]
    pub fn is_valid_for(&self, revision: u64, options: LayoutOptions) -> bool {
        self.revision == revision && self.options == options
    }

    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[must_use]
    pub fn options(&self) -> LayoutOptions {
        self.options
    }

    #[must_use]
    pub fn line_height(&self) -> Fixed {
        self.line_height
    }

    #[must_use]
    pub fn lines(&self) -> &[LineInfo] {
        &self.lines
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total height of the content.
    #[must_use]
    pub fn height(&self) -> Fixed {
        self.line_height * self.lines.len() as i32
    }

    /// Widest line, measured to the end of its last rune.
    #[must_use]
    pub fn width(&self) -> Fixed {
        self.entries
            .iter()
            .map(|e| e.x + e.advance)
            .fold(Fixed::ZERO, Fixed::max)
    }

    fn entry_for(&self, index: usize) -> usize {
        self.entries
            .partition_point(|e| e.index <= index)
            .saturating_sub(1)
    }

    /// Visual line holding `index`.
    #[must_use]
    pub fn line_of_index(&self, index: usize) -> usize {
        let entry = self.entry_for(index);
        self.lines
            .partition_point(|l| l.entries.start <= entry)
            .saturating_sub(1)
    }

    /// Visual line under the vertical position `y`, clamped to the first and
    /// last line.
    #[must_use]
    pub fn line_at_y(&self, y: Fixed) -> usize {
        self.lines.partition_point(|l| l.y <= y).saturating_sub(1)
    }

    /// Start offset of the line under `y`.
    #[must_use]
    pub fn line_start_at_y(&self, y: Fixed) -> usize {
        self.lines.get(self.line_at_y(y)).map_or(0, |l| l.start)
    }

    /// Pass origin for the first line visible at `offset_y`.
    #[must_use]
    pub fn origin_at_y(&self, offset_y: Fixed) -> Origin {
        let line = self.line_at_y(offset_y);
        self.lines.get(line).map_or_else(Origin::default, |l| Origin {
            index: l.start,
            y: l.y,
            line,
        })
    }

    /// Top-left of the rune box at `index`.
    ///
    /// Offsets past the end map to the end position; offsets inside a
    /// multi-byte rune map to that rune.
    #[must_use]
    pub fn point_at_index(&self, content: &str, index: usize) -> Point {
        let index = floor_char_boundary(content, index);
        let entry = self.entry_for(index);
        let line = self.line_of_index(index);
        match (self.entries.get(entry), self.lines.get(line)) {
            (Some(e), Some(l)) => Point::new(e.x, l.y),
            _ => Point::default(),
        }
    }

    /// Offset of the rune under `point`.
    ///
    /// The rune whose box contains `point.x` wins. Zero-width runes share
    /// their x with the rune after them, and the last of such a run wins, so
    /// a click lands on grapheme cluster boundaries. Past the last rune the
    /// line's end offset is returned.
    #[must_use]
    pub fn index_at_point(&self, point: Point) -> usize {
        let Some(line) = self.lines.get(self.line_at_y(point.y)) else {
            return 0;
        };
        let entries = &self.entries[line.entries.clone()];
        let Some(mut i) = entries.iter().position(|e| {
            point.x < e.x + e.advance || (e.advance == Fixed::ZERO && point.x <= e.x)
        }) else {
            return line.end;
        };
        while entries[i].advance == Fixed::ZERO {
            match entries.get(i + 1) {
                Some(next) if next.x == entries[i].x => i += 1,
                Some(_) => break,
                None => return line.end,
            }
        }
        entries[i].index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::face::MonoFace;

    fn layout(content: &str, wrap: Option<i32>) -> Layout {
        let face = MonoFace::with_cell(8, 16);
        let options = LayoutOptions {
            wrap_width: wrap.map(Fixed::from_int),
            ..LayoutOptions::default()
        };
        Layout::measure(content, &face, options, 0)
    }

    #[test]
    fn test_two_lines() {
        let l = layout("ab\ncd", None);
        assert_eq!(l.line_count(), 2);
        assert_eq!(l.height(), Fixed::from_int(32));
        assert_eq!(l.lines()[1].start, 3);
        assert_eq!(l.lines()[0].end, 2);
        assert_eq!(l.lines()[1].end, 5);
    }

    #[test]
    fn test_empty_content_has_one_line() {
        let l = layout("", None);
        assert_eq!(l.line_count(), 1);
        assert_eq!(l.height(), Fixed::from_int(16));
        assert_eq!(l.index_at_point(Point::from_int(50, 50)), 0);
    }

    #[test]
    fn test_trailing_newline_adds_line() {
        let l = layout("ab\n", None);
        assert_eq!(l.line_count(), 2);
        assert_eq!(l.point_at_index("ab\n", 3), Point::from_int(0, 16));
    }

    #[test]
    fn test_point_at_index() {
        let s = "ab\ncd";
        let l = layout(s, None);
        assert_eq!(l.point_at_index(s, 0), Point::from_int(0, 0));
        assert_eq!(l.point_at_index(s, 2), Point::from_int(16, 0));
        assert_eq!(l.point_at_index(s, 4), Point::from_int(8, 16));
        assert_eq!(l.point_at_index(s, 5), Point::from_int(16, 16));
        assert_eq!(l.point_at_index(s, 99), Point::from_int(16, 16));
    }

    #[test]
    fn test_index_at_point_clamps() {
        let s = "ab\ncd";
        let l = layout(s, None);
        assert_eq!(l.index_at_point(Point::from_int(-5, -5)), 0);
        assert_eq!(l.index_at_point(Point::from_int(100, 0)), 2);
        assert_eq!(l.index_at_point(Point::from_int(100, 100)), 5);
        assert_eq!(l.index_at_point(Point::from_int(9, 20)), 4);
    }

    #[test]
    fn test_wrapped_lines() {
        let s = "abcdef";
        let l = layout(s, Some(24));
        assert_eq!(l.line_count(), 2);
        assert_eq!(l.lines()[0].end, 3);
        assert_eq!(l.point_at_index(s, 3), Point::from_int(0, 16));
        assert_eq!(l.index_at_point(Point::from_int(100, 0)), 3);
        assert_eq!(l.line_of_index(3), 1);
    }

    #[test]
    fn test_inverse_mapping() {
        let s = "héllo\n\twörld\n\nend";
        let l = layout(s, Some(40));
        for (i, _) in s.char_indices().chain(std::iter::once((s.len(), ' '))) {
            let p = l.point_at_index(s, i);
            assert_eq!(l.index_at_point(p), i, "index {i} at {p:?}");
        }
    }

    #[test]
    fn test_combining_mark_hits_following_rune() {
        let s = "e\u{301}f";
        let l = layout(s, None);
        assert_eq!(l.point_at_index(s, 3), Point::from_int(8, 0));
        assert_eq!(l.index_at_point(Point::from_int(8, 0)), 3);
        assert_eq!(l.index_at_point(Point::from_int(3, 0)), 0);
        assert_eq!(l.index_at_point(Point::from_int(100, 0)), 4);
    }

    #[test]
    fn test_combining_mark_before_newline_and_wrap() {
        let s = "e\u{301}\nx";
        let l = layout(s, None);
        assert_eq!(l.index_at_point(Point::from_int(8, 0)), 3);

        let s = "ab\u{301}cd";
        let l = layout(s, Some(16));
        assert_eq!(l.lines()[0].end, 4);
        assert_eq!(l.index_at_point(Point::from_int(16, 0)), 4);
    }

    #[test]
    fn test_origin_at_y() {
        let l = layout("a\nb\nc", None);
        let origin = l.origin_at_y(Fixed::from_int(20));
        assert_eq!(origin.index, 2);
        assert_eq!(origin.line, 1);
        assert_eq!(origin.y, Fixed::from_int(16));
    }

    #[test]
    fn test_validity() {
        let l = layout("abc", None);
        assert!(l.is_valid_for(0, LayoutOptions::default()));
        assert!(!l.is_valid_for(1, LayoutOptions::default()));
    }
}
