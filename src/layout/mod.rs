//! Line layout pipeline.
//!
//! A layout pass walks the content one step at a time. Every step goes
//! through an explicit, ordered list of [`Stage`]s that share one contract:
//! [`Stage::advance`] inspects or annotates the current [`PenState`] before the
//! visitor sees it (and may stop the pass), [`Stage::finish`] moves the pen
//! once the visitor is done with the step.
//!
//! The [`PipelineBuilder`] always composes stages in the same order:
//!
//! ```text
//! rune source -> wrap -> lines -> selection -> word -> cursor -> early exit -> extra
//! ```
//!
//! Measurement ([`Layout::measure`]) and painting both build their pipeline
//! through the builder, so pen positions agree exactly between hit testing and
//! drawing.
//!
//! # Examples
//!
//! ```
//! use textarea_core::face::MonoFace;
//! use textarea_core::layout::{Flow, PipelineBuilder, StepKind};
//!
//! let face = MonoFace::with_cell(8, 16);
//! let mut pipeline = PipelineBuilder::new("ab\ncd", &face).wrap(None).lines().build();
//!
//! let mut ys = Vec::new();
//! let summary = pipeline.run(|step| {
//!     if step.kind == StepKind::Rune {
//!         ys.push(step.pen.y.floor());
//!     }
//!     Flow::Continue
//! });
//! assert_eq!(ys, vec![0, 0, 0, 16, 16]);
//! assert_eq!(summary.lines, 2);
//! ```

mod measure;
mod stages;

pub use measure::{Layout, LayoutOptions, LineInfo};
pub use stages::{
    CursorStage, EarlyExitStage, LineStage, RuneSource, SelectionStage, WordStage, WrapStage,
};

use crate::face::GlyphFace;
use crate::fixed::{Fixed, Point};
use crate::text::boundary;

/// Whether a pass continues after a step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// What the current step represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepKind {
    /// A rune of the content.
    Rune,
    /// Synthetic line break inserted by wrapping, before the rune at `index`.
    WrapBreak,
    /// Position just past the end of the content.
    End,
}

/// Shared per-step state passed through the stages.
#[derive(Clone, Debug)]
pub struct PenState {
    pub kind: StepKind,
    /// Current rune (`'\0'` for [`StepKind::End`]).
    pub rune: char,
    /// Byte offset of the rune in the content.
    pub index: usize,
    /// Top-left corner of the rune box.
    pub pen: Point,
    /// Horizontal advance of the step.
    pub advance: Fixed,
    /// Visual line number, counted from the start of the content.
    pub line: usize,
    /// Set by the selection stage.
    pub highlighted: bool,
    /// Set by the word stage.
    pub word: bool,
    /// Set by the cursor stage.
    pub cursor: bool,
    /// Asks the source to emit the current rune again.
    pub(crate) replay: bool,
}

impl PenState {
    fn at(origin: Origin) -> Self {
        Self {
            kind: StepKind::Rune,
            rune: '\0',
            index: origin.index,
            pen: Point::new(Fixed::ZERO, origin.y),
            advance: Fixed::ZERO,
            line: origin.line,
            highlighted: false,
            word: false,
            cursor: false,
            replay: false,
        }
    }

    /// Load a new step, clearing per-step marks.
    pub(crate) fn load(&mut self, kind: StepKind, rune: char, index: usize, advance: Fixed) {
        self.kind = kind;
        self.rune = rune;
        self.index = index;
        self.advance = advance;
        self.highlighted = false;
        self.word = false;
        self.cursor = false;
    }

    /// Whether this step ends its visual line.
    #[must_use]
    pub fn breaks_line(&self) -> bool {
        match self.kind {
            StepKind::WrapBreak => true,
            StepKind::Rune => self.rune == '\n',
            StepKind::End => false,
        }
    }
}

/// A composable layout stage.
pub trait Stage {
    /// Called once before the first step of a pass.
    fn start(&mut self, _state: &mut PenState) {}

    /// Process the current step before it is visited.
    fn advance(&mut self, state: &mut PenState) -> Flow;

    /// Called after the step was visited.
    fn finish(&mut self, _state: &mut PenState) {}
}

/// Where a pass begins. Passes always start at the beginning of a visual line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Origin {
    pub index: usize,
    pub y: Fixed,
    pub line: usize,
}

/// Outcome of one pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PassSummary {
    /// Steps handed to the visitor.
    pub steps: usize,
    /// Distinct visual lines visited.
    pub lines: usize,
    /// Bottom edge of the last visited line.
    pub bottom: Fixed,
    /// The pass ended before the end-of-content step.
    pub stopped: bool,
}

/// An ordered list of stages driven by a rune source.
pub struct Pipeline<'a> {
    stages: Vec<Box<dyn Stage + 'a>>,
    origin: Origin,
    line_height: Fixed,
}

impl Pipeline<'_> {
    /// Run the pass, calling `visit` for every step.
    pub fn run<F>(&mut self, mut visit: F) -> PassSummary
    where
        F: FnMut(&PenState) -> Flow,
    {
        let mut state = PenState::at(self.origin);
        for stage in &mut self.stages {
            stage.start(&mut state);
        }

        let mut summary = PassSummary {
            bottom: self.origin.y + self.line_height,
            ..PassSummary::default()
        };
        let mut last_line = None;
        let mut reached_end = false;
        'pass: loop {
            for stage in &mut self.stages {
                if stage.advance(&mut state) == Flow::Stop {
                    break 'pass;
                }
            }
            summary.steps += 1;
            if last_line != Some(state.line) {
                last_line = Some(state.line);
                summary.lines += 1;
                summary.bottom = state.pen.y + self.line_height;
            }
            reached_end = state.kind == StepKind::End;
            if visit(&state) == Flow::Stop {
                break;
            }
            for stage in &mut self.stages {
                stage.finish(&mut state);
            }
        }
        summary.stopped = !reached_end;
        summary
    }
}

/// Composes the fixed stage order for a pass.
pub struct PipelineBuilder<'a> {
    content: &'a str,
    face: &'a dyn GlyphFace,
    origin: Origin,
    wrap: Option<WrapStage>,
    lines: bool,
    selection: Option<SelectionStage>,
    word: Option<WordStage>,
    cursor: Option<CursorStage>,
    early_exit: Option<EarlyExitStage>,
    extra: Vec<Box<dyn Stage + 'a>>,
    tab_width: u32,
}

impl<'a> PipelineBuilder<'a> {
    /// Default tab width in space advances.
    pub const DEFAULT_TAB_WIDTH: u32 = 8;

    #[must_use]
    pub fn new(content: &'a str, face: &'a dyn GlyphFace) -> Self {
        Self {
            content,
            face,
            origin: Origin::default(),
            wrap: None,
            lines: false,
            selection: None,
            word: None,
            cursor: None,
            early_exit: None,
            extra: Vec::new(),
            tab_width: Self::DEFAULT_TAB_WIDTH,
        }
    }

    /// Start the pass at a visual line start instead of the content start.
    #[must_use]
    pub fn origin(mut self, origin: Origin) -> Self {
        self.origin = origin;
        self
    }

    #[must_use]
    pub fn tab_width(mut self, columns: u32) -> Self {
        self.tab_width = columns;
        self
    }

    /// Track pen X; wrap at `width` when given.
    #[must_use]
    pub fn wrap(mut self, width: Option<Fixed>) -> Self {
        self.wrap = Some(WrapStage::new(width, Fixed::ZERO));
        self
    }

    /// Track pen Y across line breaks.
    #[must_use]
    pub fn lines(mut self) -> Self {
        self.lines = true;
        self
    }

    /// Highlight runes in the half-open `[start, end)` range.
    #[must_use]
    pub fn selection(mut self, range: Option<(usize, usize)>) -> Self {
        self.selection = range.map(|(start, end)| SelectionStage::new(start, end));
        self
    }

    /// Mark every occurrence of the word touching `index`.
    #[must_use]
    pub fn word_highlight(mut self, index: Option<usize>) -> Self {
        self.word = index
            .map(|i| boundary::word_occurrences_at(self.content, i))
            .filter(|ranges| !ranges.is_empty())
            .map(WordStage::new);
        self
    }

    /// Mark the cursor position.
    #[must_use]
    pub fn cursor(mut self, index: Option<usize>) -> Self {
        self.cursor = index.map(CursorStage::new);
        self
    }

    /// Stop once the pen passes the viewport bottom plus `slack_lines` lines.
    #[must_use]
    pub fn early_exit(mut self, offset_y: Fixed, viewport_height: Fixed, slack_lines: u32) -> Self {
        self.early_exit = Some(EarlyExitStage::new(
            offset_y,
            viewport_height,
            self.face.line_height() * slack_lines as i32,
        ));
        self
    }

    /// Append a custom stage after the built-in ones.
    #[must_use]
    pub fn stage(mut self, stage: Box<dyn Stage + 'a>) -> Self {
        self.extra.push(stage);
        self
    }

    #[must_use]
    pub fn build(self) -> Pipeline<'a> {
        let line_height = self.face.line_height();
        let mut stages: Vec<Box<dyn Stage + 'a>> = Vec::new();
        stages.push(Box::new(RuneSource::new(
            self.content,
            self.origin.index,
            self.face,
        )));
        if let Some(mut wrap) = self.wrap {
            wrap.set_tab_stop(self.face.advance(' ') * self.tab_width as i32);
            stages.push(Box::new(wrap));
        }
        if self.lines {
            stages.push(Box::new(LineStage::new(line_height)));
        }
        if let Some(selection) = self.selection {
            stages.push(Box::new(selection));
        }
        if let Some(word) = self.word {
            stages.push(Box::new(word));
        }
        if let Some(cursor) = self.cursor {
            stages.push(Box::new(cursor));
        }
        if let Some(early_exit) = self.early_exit {
            stages.push(Box::new(early_exit));
        }
        stages.extend(self.extra);
        Pipeline {
            stages,
            origin: self.origin,
            line_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::face::MonoFace;

    fn collect(pipeline: &mut Pipeline<'_>) -> Vec<(StepKind, usize, i32, i32)> {
        let mut out = Vec::new();
        pipeline.run(|s| {
            out.push((s.kind, s.index, s.pen.x.floor(), s.pen.y.floor()));
            Flow::Continue
        });
        out
    }

    #[test]
    fn test_source_only_emits_runes_and_end() {
        let face = MonoFace::with_cell(8, 16);
        let mut p = PipelineBuilder::new("aé", &face).build();
        let steps = collect(&mut p);
        assert_eq!(
            steps.iter().map(|s| (s.0, s.1)).collect::<Vec<_>>(),
            vec![(StepKind::Rune, 0), (StepKind::Rune, 1), (StepKind::End, 3)]
        );
    }

    #[test]
    fn test_wrap_emits_break_then_replays_rune() {
        let face = MonoFace::with_cell(8, 16);
        let mut p = PipelineBuilder::new("abc", &face)
            .wrap(Some(Fixed::from_int(16)))
            .lines()
            .build();
        let steps = collect(&mut p);
        assert_eq!(
            steps,
            vec![
                (StepKind::Rune, 0, 0, 0),
                (StepKind::Rune, 1, 8, 0),
                (StepKind::WrapBreak, 2, 16, 0),
                (StepKind::Rune, 2, 0, 16),
                (StepKind::End, 3, 8, 16),
            ]
        );
    }

    #[test]
    fn test_summary_counts_lines() {
        let face = MonoFace::with_cell(8, 16);
        let mut p = PipelineBuilder::new("a\nb\nc", &face).wrap(None).lines().build();
        let summary = p.run(|_| Flow::Continue);
        assert_eq!(summary.lines, 3);
        assert_eq!(summary.bottom, Fixed::from_int(48));
        assert!(!summary.stopped);
    }

    #[test]
    fn test_visitor_can_stop() {
        let face = MonoFace::with_cell(8, 16);
        let mut p = PipelineBuilder::new("abcdef", &face).wrap(None).build();
        let mut seen = 0;
        let summary = p.run(|s| {
            seen += 1;
            if s.index == 2 { Flow::Stop } else { Flow::Continue }
        });
        assert_eq!(seen, 3);
        assert!(summary.stopped);
    }

    #[test]
    fn test_origin_starts_mid_content() {
        let face = MonoFace::with_cell(8, 16);
        let origin = Origin {
            index: 3,
            y: Fixed::from_int(16),
            line: 1,
        };
        let mut p = PipelineBuilder::new("ab\ncd", &face)
            .origin(origin)
            .wrap(None)
            .lines()
            .build();
        let steps = collect(&mut p);
        assert_eq!(steps[0], (StepKind::Rune, 3, 0, 16));
        assert_eq!(steps.len(), 3);
    }

    #[test]
    fn test_word_highlight_marks_every_occurrence() {
        let face = MonoFace::with_cell(8, 16);
        let s = "ab abc ab\nab";
        let mut p = PipelineBuilder::new(s, &face)
            .wrap(None)
            .lines()
            .word_highlight(Some(1))
            .build();
        let mut marked = Vec::new();
        p.run(|step| {
            if step.word {
                marked.push(step.index);
            }
            Flow::Continue
        });
        assert_eq!(marked, vec![0, 1, 7, 8, 10, 11]);
    }

    #[test]
    fn test_word_highlight_off_between_words() {
        let face = MonoFace::with_cell(8, 16);
        let mut p = PipelineBuilder::new("a  b", &face).word_highlight(Some(2)).build();
        let mut any = false;
        p.run(|step| {
            any |= step.word;
            Flow::Continue
        });
        assert!(!any);
    }

    #[test]
    fn test_custom_stage_runs_last() {
        struct Upper;
        impl Stage for Upper {
            fn advance(&mut self, state: &mut PenState) -> Flow {
                state.rune = state.rune.to_ascii_uppercase();
                Flow::Continue
            }
        }
        let face = MonoFace::default();
        let mut p = PipelineBuilder::new("ab", &face)
            .stage(Box::new(Upper))
            .build();
        let mut runes = String::new();
        p.run(|s| {
            if s.kind == StepKind::Rune {
                runes.push(s.rune);
            }
            Flow::Continue
        });
        assert_eq!(runes, "AB");
    }
}
