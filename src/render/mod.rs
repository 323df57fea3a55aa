//! Render driver.
//!
//! Paints the visible part of a measured [`Layout`] into a caller-owned
//! [`Surface`]:
//!
//! 1. fill the bounds with the normal background
//! 2. run the paint pipeline from the first visible line (wrap, lines,
//!    selection, word, cursor, early exit)
//! 3. per step, fill selection and word backgrounds and draw the cursor
//!    marker, and queue a [`GlyphJob`] snapshot for the rune
//! 4. composite queued glyphs band by band on a bounded set of scoped threads
//!
//! Everything borrowed by the workers is immutable except the band each one
//! owns, so no locking is involved.

mod compose;

pub use compose::{GlyphBatch, GlyphJob};

use std::sync::Arc;

use crate::config::Colors;
use crate::face::GlyphFace;
use crate::fixed::{Fixed, Rect};
use crate::layout::{Flow, Layout, PipelineBuilder, StepKind};
use crate::surface::Surface;

/// What to paint.
#[derive(Clone, Copy, Debug)]
pub struct PaintRequest<'a> {
    pub content: &'a str,
    /// Measurement of `content`; supplies wrap width, tab width and the
    /// first visible line.
    pub layout: &'a Layout,
    pub offset_y: Fixed,
    /// Cursor index, `None` to hide the marker.
    pub cursor: Option<usize>,
    /// Highlighted range.
    pub selection: Option<(usize, usize)>,
    /// Index whose word is highlighted wherever it occurs.
    pub word_at: Option<usize>,
}

/// Counters from one paint call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PaintStats {
    pub steps: usize,
    pub lines: usize,
    pub glyphs: usize,
    pub workers: usize,
}

/// Paints text with a shared face and a bounded glyph worker pool.
#[derive(Clone)]
pub struct RenderDriver {
    face: Arc<dyn GlyphFace>,
    colors: Colors,
    workers: usize,
    slack_lines: u32,
}

impl std::fmt::Debug for RenderDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderDriver")
            .field("colors", &self.colors)
            .field("workers", &self.workers)
            .field("slack_lines", &self.slack_lines)
            .finish_non_exhaustive()
    }
}

impl RenderDriver {
    #[must_use]
    pub fn new(face: Arc<dyn GlyphFace>) -> Self {
        Self {
            face,
            colors: Colors::default(),
            workers: 1,
            slack_lines: 1,
        }
    }

    #[must_use]
    pub fn with_colors(mut self, colors: Colors) -> Self {
        self.colors = colors;
        self
    }

    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    #[must_use]
    pub fn with_slack_lines(mut self, lines: u32) -> Self {
        self.slack_lines = lines;
        self
    }

    pub fn set_colors(&mut self, colors: Colors) {
        self.colors = colors;
    }

    #[must_use]
    pub fn colors(&self) -> &Colors {
        &self.colors
    }

    /// Paint `request` into `bounds` of `surface`.
    pub fn paint(&self, surface: &mut Surface, bounds: Rect, request: &PaintRequest<'_>) -> PaintStats {
        let clip = bounds.intersect(&surface.bounds());
        if clip.is_empty() {
            return PaintStats::default();
        }
        surface.fill_rect(clip, self.colors.normal.bg);

        let face = self.face.as_ref();
        let line_height = face.line_height();
        let options = request.layout.options();
        let origin = request.layout.origin_at_y(request.offset_y);
        let mut pipeline = PipelineBuilder::new(request.content, face)
            .origin(origin)
            .tab_width(options.tab_width)
            .wrap(options.wrap_width)
            .lines()
            .selection(request.selection)
            .word_highlight(request.word_at)
            .cursor(request.cursor)
            .early_exit(
                request.offset_y,
                Fixed::from_int(bounds.height as i32),
                self.slack_lines,
            )
            .build();

        let base_x = Fixed::from_int(bounds.x);
        let base_y = Fixed::from_int(bounds.y) - request.offset_y;
        let mut batch = GlyphBatch::default();
        let mut band_line = None;
        let summary = pipeline.run(|step| {
            let x0 = base_x + step.pen.x;
            let y0 = base_y + step.pen.y;
            let x1 = x0 + step.advance;
            let y1 = y0 + line_height;

            if band_line != Some(step.line) {
                band_line = Some(step.line);
                batch.open_band(y0.floor(), y1.floor());
            }

            // selection wins over word highlight
            let pair = if step.highlighted {
                self.colors.selection
            } else if step.word {
                self.colors.word
            } else {
                self.colors.normal
            };
            if step.highlighted || step.word {
                let rect = Rect::from_corners(x0.floor(), y0.floor(), x1.floor(), y1.floor());
                surface.fill_rect(rect.intersect(&clip), pair.bg);
            }
            if step.cursor {
                self.draw_cursor(surface, x0.floor(), y0.floor(), y1.floor(), clip);
            }
            if step.kind == StepKind::Rune && !step.rune.is_whitespace() {
                batch.push(GlyphJob {
                    rune: step.rune,
                    x: x0.floor(),
                    y: y0.floor(),
                    color: pair.fg,
                });
            }
            Flow::Continue
        });

        let bands = batch.band_count();
        let (glyphs, workers) = batch.composite(surface, face, clip, self.workers);
        let stats = PaintStats {
            steps: summary.steps,
            lines: summary.lines,
            glyphs,
            workers,
        };
        tracing::trace!(
            steps = stats.steps,
            lines = stats.lines,
            bands,
            glyphs,
            workers,
            "painted text"
        );
        stats
    }

    /// Vertical bar with small serifs at the top and bottom.
    fn draw_cursor(&self, surface: &mut Surface, x: i32, y0: i32, y1: i32, clip: Rect) {
        let color = self.colors.cursor;
        let top = Rect::from_corners(x - 1, y0, x + 2, y0 + 3);
        let bottom = Rect::from_corners(x - 1, y1 - 3, x + 2, y1);
        let bar = Rect::from_corners(x, y0, x + 1, y1);
        for rect in [top, bottom, bar] {
            surface.fill_rect(rect.intersect(&clip), color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use crate::face::MonoFace;
    use crate::layout::LayoutOptions;

    fn driver() -> RenderDriver {
        RenderDriver::new(Arc::new(MonoFace::with_cell(8, 16)))
    }

    fn measure(content: &str) -> Layout {
        Layout::measure(content, &MonoFace::with_cell(8, 16), LayoutOptions::default(), 0)
    }

    #[test]
    fn test_background_and_glyphs() {
        let content = "ab";
        let layout = measure(content);
        let mut surface = Surface::new(32, 32).unwrap();
        let bounds = surface.bounds();
        let request = PaintRequest {
            content,
            layout: &layout,
            offset_y: Fixed::ZERO,
            cursor: None,
            selection: None,
            word_at: None,
        };
        let stats = driver().paint(&mut surface, bounds, &request);
        assert_eq!(stats.glyphs, 2);
        assert_eq!(stats.lines, 1);
        assert_eq!(surface.get(0, 0), Some(Rgba::WHITE));
        assert_eq!(surface.get(3, 5), Some(Rgba::BLACK));
        assert_eq!(surface.get(20, 5), Some(Rgba::WHITE));
    }

    #[test]
    fn test_selection_background() {
        let content = "ab";
        let layout = measure(content);
        let mut surface = Surface::new(32, 16).unwrap();
        let bounds = surface.bounds();
        let request = PaintRequest {
            content,
            layout: &layout,
            offset_y: Fixed::ZERO,
            cursor: None,
            selection: Some((1, 2)),
            word_at: None,
        };
        let d = driver();
        d.paint(&mut surface, bounds, &request);
        // padding pixel of the selected cell keeps the selection color
        assert_eq!(surface.get(8, 0), Some(d.colors().selection.bg));
        assert_eq!(surface.get(0, 0), Some(Rgba::WHITE));
    }

    #[test]
    fn test_word_occurrences_background() {
        let content = "ab ab";
        let layout = measure(content);
        let mut surface = Surface::new(48, 16).unwrap();
        let bounds = surface.bounds();
        let d = driver();
        let mut request = PaintRequest {
            content,
            layout: &layout,
            offset_y: Fixed::ZERO,
            cursor: None,
            selection: None,
            word_at: Some(1),
        };
        d.paint(&mut surface, bounds, &request);
        assert_eq!(surface.get(0, 0), Some(d.colors().word.bg));
        assert_eq!(surface.get(16, 0), Some(Rgba::WHITE));
        assert_eq!(surface.get(24, 0), Some(d.colors().word.bg));

        request.selection = Some((3, 4));
        d.paint(&mut surface, bounds, &request);
        assert_eq!(surface.get(24, 0), Some(d.colors().selection.bg));
        assert_eq!(surface.get(32, 0), Some(d.colors().word.bg));
    }

    #[test]
    fn test_cursor_marker() {
        let content = "ab";
        let layout = measure(content);
        let mut surface = Surface::new(32, 16).unwrap();
        let bounds = surface.bounds();
        let request = PaintRequest {
            content,
            layout: &layout,
            offset_y: Fixed::ZERO,
            cursor: Some(2),
            selection: None,
            word_at: None,
        };
        driver().paint(&mut surface, bounds, &request);
        assert_eq!(surface.get(16, 8), Some(Rgba::BLACK));
        assert_eq!(surface.get(15, 0), Some(Rgba::BLACK));
        assert_eq!(surface.get(18, 8), Some(Rgba::WHITE));
    }

    #[test]
    fn test_partial_redraw_starts_at_visible_line() {
        let content = "a\n".repeat(100);
        let layout = measure(&content);
        let mut surface = Surface::new(16, 32).unwrap();
        let bounds = surface.bounds();
        let request = PaintRequest {
            content: &content,
            layout: &layout,
            offset_y: Fixed::from_int(16 * 50),
            cursor: None,
            selection: None,
            word_at: None,
        };
        let stats = driver()
            .with_workers(3)
            .paint(&mut surface, bounds, &request);
        assert_eq!(stats.lines, 3);
        // the slack line is laid out but falls outside the surface
        assert_eq!(stats.glyphs, 2);
        assert!(stats.workers <= 3);
    }

    #[test]
    fn test_bounds_offset_on_surface() {
        let content = "x";
        let layout = measure(content);
        let mut surface = Surface::new(64, 64).unwrap();
        let request = PaintRequest {
            content,
            layout: &layout,
            offset_y: Fixed::ZERO,
            cursor: None,
            selection: None,
            word_at: None,
        };
        driver().paint(&mut surface, Rect::new(20, 20, 20, 20), &request);
        assert_eq!(surface.get(0, 0), Some(Rgba::TRANSPARENT));
        assert_eq!(surface.get(20, 20), Some(Rgba::WHITE));
        assert_eq!(surface.get(23, 25), Some(Rgba::BLACK));
    }
}
