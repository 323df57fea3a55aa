//! Built-in layout stages.

use super::{Flow, PenState, Stage, StepKind};
use crate::face::GlyphFace;
use crate::fixed::Fixed;

/// Drives the pass: loads one rune per step, then a final end step.
pub struct RuneSource<'a> {
    content: &'a str,
    pos: usize,
    face: &'a dyn GlyphFace,
    done: bool,
}

impl<'a> RuneSource<'a> {
    pub fn new(content: &'a str, start: usize, face: &'a dyn GlyphFace) -> Self {
        let mut pos = start.min(content.len());
        while !content.is_char_boundary(pos) {
            pos -= 1;
        }
        Self {
            content,
            pos,
            face,
            done: false,
        }
    }
}

impl Stage for RuneSource<'_> {
    fn advance(&mut self, state: &mut PenState) -> Flow {
        if state.replay {
            state.replay = false;
            let rune = state.rune;
            let index = state.index;
            state.load(StepKind::Rune, rune, index, self.face.advance(rune));
            return Flow::Continue;
        }
        match self.content[self.pos..].chars().next() {
            Some(rune) => {
                state.load(StepKind::Rune, rune, self.pos, self.face.advance(rune));
                self.pos += rune.len_utf8();
                Flow::Continue
            }
            None if !self.done => {
                self.done = true;
                state.load(StepKind::End, '\0', self.content.len(), Fixed::ZERO);
                Flow::Continue
            }
            None => Flow::Stop,
        }
    }
}

/// Tracks pen X, expands tabs and breaks lines wider than the wrap width.
///
/// A rune that would overflow turns into a [`StepKind::WrapBreak`] step and
/// is replayed at the start of the next line. The first rune of a line never
/// wraps, so a single over-wide rune still makes progress.
pub struct WrapStage {
    width: Option<Fixed>,
    tab_stop: Fixed,
}

impl WrapStage {
    pub fn new(width: Option<Fixed>, tab_stop: Fixed) -> Self {
        Self { width, tab_stop }
    }

    pub fn set_tab_stop(&mut self, tab_stop: Fixed) {
        self.tab_stop = tab_stop;
    }

    fn tab_advance(&self, x: Fixed) -> Fixed {
        if self.tab_stop <= Fixed::ZERO {
            return Fixed::ZERO;
        }
        let stops = x.div_floor(self.tab_stop) + 1;
        self.tab_stop * stops - x
    }
}

impl Stage for WrapStage {
    fn advance(&mut self, state: &mut PenState) -> Flow {
        if state.kind != StepKind::Rune {
            return Flow::Continue;
        }
        if state.rune == '\t' {
            state.advance = self.tab_advance(state.pen.x);
        }
        let overflows = self.width.is_some_and(|width| {
            state.pen.x > Fixed::ZERO
                && state.advance > Fixed::ZERO
                && state.pen.x + state.advance > width
        });
        if overflows {
            state.kind = StepKind::WrapBreak;
            state.advance = Fixed::ZERO;
            state.replay = true;
        }
        Flow::Continue
    }

    fn finish(&mut self, state: &mut PenState) {
        if state.breaks_line() {
            state.pen.x = Fixed::ZERO;
        } else {
            state.pen.x += state.advance;
        }
    }
}

/// Moves the pen down one line height after every line break.
pub struct LineStage {
    line_height: Fixed,
}

impl LineStage {
    pub fn new(line_height: Fixed) -> Self {
        Self { line_height }
    }
}

impl Stage for LineStage {
    fn advance(&mut self, _state: &mut PenState) -> Flow {
        Flow::Continue
    }

    fn finish(&mut self, state: &mut PenState) {
        if state.breaks_line() {
            state.pen.y += self.line_height;
            state.line += 1;
        }
    }
}

/// Marks runes inside `[start, end)` as highlighted.
pub struct SelectionStage {
    start: usize,
    end: usize,
}

impl SelectionStage {
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start: start.min(end),
            end: start.max(end),
        }
    }
}

impl Stage for SelectionStage {
    fn advance(&mut self, state: &mut PenState) -> Flow {
        state.highlighted =
            state.kind == StepKind::Rune && self.start <= state.index && state.index < self.end;
        Flow::Continue
    }
}

/// Marks runes inside any of a sorted list of disjoint ranges, such as the
/// occurrences of the word under the cursor.
pub struct WordStage {
    ranges: Vec<(usize, usize)>,
    next: usize,
}

impl WordStage {
    pub fn new(ranges: Vec<(usize, usize)>) -> Self {
        Self { ranges, next: 0 }
    }
}

impl Stage for WordStage {
    fn start(&mut self, state: &mut PenState) {
        // passes may begin mid-content
        self.next = self.ranges.partition_point(|&(_, end)| end <= state.index);
    }

    fn advance(&mut self, state: &mut PenState) -> Flow {
        while self
            .ranges
            .get(self.next)
            .is_some_and(|&(_, end)| end <= state.index)
        {
            self.next += 1;
        }
        state.word = state.kind == StepKind::Rune
            && self
                .ranges
                .get(self.next)
                .is_some_and(|&(start, _)| start <= state.index);
        Flow::Continue
    }
}

/// Marks the step where the cursor sits. Wrap breaks are skipped so the
/// cursor is drawn once, at the start of the continuation line.
pub struct CursorStage {
    index: usize,
}

impl CursorStage {
    pub fn new(index: usize) -> Self {
        Self { index }
    }
}

impl Stage for CursorStage {
    fn advance(&mut self, state: &mut PenState) -> Flow {
        state.cursor = state.kind != StepKind::WrapBreak && state.index == self.index;
        Flow::Continue
    }
}

/// Stops the pass once a line starts past the viewport bottom plus slack.
pub struct EarlyExitStage {
    offset_y: Fixed,
    limit: Fixed,
}

impl EarlyExitStage {
    /// `slack` is the extra distance below the viewport still laid out.
    pub fn new(offset_y: Fixed, viewport_height: Fixed, slack: Fixed) -> Self {
        Self {
            offset_y,
            limit: viewport_height + slack,
        }
    }
}

impl Stage for EarlyExitStage {
    fn advance(&mut self, state: &mut PenState) -> Flow {
        if state.pen.y - self.offset_y >= self.limit {
            tracing::trace!(index = state.index, line = state.line, "layout early exit");
            return Flow::Stop;
        }
        Flow::Continue
    }
}
