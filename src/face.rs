//! Glyph face boundary.
//!
//! The font backend is an external collaborator; the text area only needs
//! advances, a line height and a coverage mask per glyph. [`MonoFace`] is a
//! dependency-free implementation that lays text out on a monospace grid
//! (wide characters take two cells) and rasterizes every visible glyph as a
//! filled cell box, which is enough for measurement, tests and previews.

use unicode_width::UnicodeWidthChar;

use crate::fixed::Fixed;

/// 8-bit coverage mask of a rasterized glyph.
///
/// The mask's top-left corner sits at the pen position (top-left of the rune
/// box) offset by (`left`, `top`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphMask {
    pub width: u32,
    pub height: u32,
    pub left: i32,
    pub top: i32,
    coverage: Vec<u8>,
}

impl GlyphMask {
    /// Create a mask with zero offset.
    ///
    /// # Panics
    /// Panics if `coverage.len() != width * height`.
    #[must_use]
    pub fn new(width: u32, height: u32, coverage: Vec<u8>) -> Self {
        assert_eq!(
            coverage.len(),
            width as usize * height as usize,
            "glyph mask coverage size mismatch"
        );
        Self {
            width,
            height,
            left: 0,
            top: 0,
            coverage,
        }
    }

    #[must_use]
    pub fn with_offset(mut self, left: i32, top: i32) -> Self {
        self.left = left;
        self.top = top;
        self
    }

    /// Coverage at mask-local (`x`, `y`); zero outside the mask.
    #[must_use]
    pub fn coverage(&self, x: i32, y: i32) -> u8 {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return 0;
        }
        self.coverage[y as usize * self.width as usize + x as usize]
    }
}

/// Font backend contract.
///
/// Faces are shared with the glyph compositing workers, hence `Send + Sync`.
pub trait GlyphFace: Send + Sync {
    /// Horizontal advance of `ch`. Control characters should report zero.
    fn advance(&self, ch: char) -> Fixed;

    /// Distance between consecutive baselines.
    fn line_height(&self) -> Fixed;

    /// Rasterized glyph, or `None` for glyphs with no ink (spaces, controls).
    fn glyph(&self, ch: char) -> Option<GlyphMask>;
}

/// Monospace face on a fixed cell grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonoFace {
    cell_width: Fixed,
    line_height: Fixed,
}

impl MonoFace {
    /// Create a face with the given cell width and line height.
    #[must_use]
    pub fn new(cell_width: Fixed, line_height: Fixed) -> Self {
        Self {
            cell_width: cell_width.max(Fixed::ONE),
            line_height: line_height.max(Fixed::ONE),
        }
    }

    /// Whole-pixel cell size.
    #[must_use]
    pub fn with_cell(width: i32, height: i32) -> Self {
        Self::new(Fixed::from_int(width), Fixed::from_int(height))
    }

    #[must_use]
    pub fn cell_width(&self) -> Fixed {
        self.cell_width
    }

    fn columns(ch: char) -> i32 {
        ch.width().map_or(0, |w| w as i32)
    }
}

impl Default for MonoFace {
    fn default() -> Self {
        Self::with_cell(8, 16)
    }
}

impl GlyphFace for MonoFace {
    fn advance(&self, ch: char) -> Fixed {
        self.cell_width * Self::columns(ch)
    }

    fn line_height(&self) -> Fixed {
        self.line_height
    }

    fn glyph(&self, ch: char) -> Option<GlyphMask> {
        if ch.is_whitespace() || ch.is_control() {
            return None;
        }
        let cols = Self::columns(ch);
        if cols == 0 {
            return None;
        }
        // one pixel of padding on every side of the cell box
        let w = (self.advance(ch).floor() - 2).max(1) as u32;
        let h = (self.line_height.floor() - 2).max(1) as u32;
        Some(GlyphMask::new(w, h, vec![255; w as usize * h as usize]).with_offset(1, 1))
    }
}
