//! Text area configuration.

use crate::color::Rgba;
use crate::face::GlyphFace;
use crate::fixed::Fixed;
use crate::text::DEFAULT_MAX_DEPTH;

/// Wrapping policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Wrap {
    /// Wrap at the text area width.
    #[default]
    Bounds,
    /// Wrap at a fixed width in pixels.
    Pixels(u32),
    /// Wrap after a number of space advances.
    Columns(u32),
    /// Never wrap.
    None,
}

impl Wrap {
    /// Wrap width for a text area `bounds_width` pixels wide.
    #[must_use]
    pub fn width(self, bounds_width: u32, face: &dyn GlyphFace) -> Option<Fixed> {
        match self {
            Self::Bounds => Some(Fixed::from_int(bounds_width as i32)),
            Self::Pixels(px) => Some(Fixed::from_int(px as i32)),
            Self::Columns(cols) => Some(face.advance(' ') * cols as i32),
            Self::None => None,
        }
    }
}

/// Foreground and background pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorPair {
    pub fg: Rgba,
    pub bg: Rgba,
}

/// Paint colors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Colors {
    pub normal: ColorPair,
    pub selection: ColorPair,
    /// Occurrences of the word under the cursor.
    pub word: ColorPair,
    pub cursor: Rgba,
}

impl Default for Colors {
    fn default() -> Self {
        Self {
            normal: ColorPair {
                fg: Rgba::BLACK,
                bg: Rgba::WHITE,
            },
            selection: ColorPair {
                fg: Rgba::BLACK,
                bg: Rgba::from_rgb_u8(0xee, 0xee, 0x9e),
            },
            word: ColorPair {
                fg: Rgba::BLACK,
                bg: Rgba::from_rgb_u8(0xc6, 0xee, 0xe3),
            },
            cursor: Rgba::BLACK,
        }
    }
}

/// Text area options.
#[derive(Clone, Debug, PartialEq)]
pub struct TextAreaConfig {
    pub wrap: Wrap,
    /// Tab stop distance in space advances.
    pub tab_width: u32,
    pub max_undo_depth: usize,
    pub cursor_visible: bool,
    /// Paint every occurrence of the word under the cursor with
    /// [`Colors::word`].
    pub highlight_cursor_word: bool,
    /// Page up/down keys and the scroll wheel move the view.
    pub page_up_down_enabled: bool,
    /// Lines moved per scroll step.
    pub scroll_lines: u32,
    /// Lines laid out below the viewport before a paint pass stops.
    pub early_exit_slack_lines: u32,
    /// Upper bound on glyph compositing threads.
    pub render_workers: usize,
    pub colors: Colors,
}

impl Default for TextAreaConfig {
    fn default() -> Self {
        Self {
            wrap: Wrap::Bounds,
            tab_width: 8,
            max_undo_depth: DEFAULT_MAX_DEPTH,
            cursor_visible: true,
            highlight_cursor_word: true,
            page_up_down_enabled: true,
            scroll_lines: 4,
            early_exit_slack_lines: 1,
            render_workers: std::thread::available_parallelism().map_or(1, |n| n.get().min(4)),
            colors: Colors::default(),
        }
    }
}

impl TextAreaConfig {
    #[must_use]
    pub fn with_wrap(mut self, wrap: Wrap) -> Self {
        self.wrap = wrap;
        self
    }

    #[must_use]
    pub fn with_tab_width(mut self, columns: u32) -> Self {
        self.tab_width = columns;
        self
    }

    #[must_use]
    pub fn with_max_undo_depth(mut self, depth: usize) -> Self {
        self.max_undo_depth = depth.max(1);
        self
    }

    #[must_use]
    pub fn with_cursor_visible(mut self, visible: bool) -> Self {
        self.cursor_visible = visible;
        self
    }

    #[must_use]
    pub fn with_highlight_cursor_word(mut self, enabled: bool) -> Self {
        self.highlight_cursor_word = enabled;
        self
    }

    #[must_use]
    pub fn with_page_up_down(mut self, enabled: bool) -> Self {
        self.page_up_down_enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_scroll_lines(mut self, lines: u32) -> Self {
        self.scroll_lines = lines.max(1);
        self
    }

    #[must_use]
    pub fn with_early_exit_slack(mut self, lines: u32) -> Self {
        self.early_exit_slack_lines = lines;
        self
    }

    #[must_use]
    pub fn with_render_workers(mut self, workers: usize) -> Self {
        self.render_workers = workers.max(1);
        self
    }

    #[must_use]
    pub fn with_colors(mut self, colors: Colors) -> Self {
        self.colors = colors;
        self
    }
}
