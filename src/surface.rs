//! Caller-owned RGBA pixel surface.
//!
//! The paint host owns a [`Surface`] and hands it to the text area for the
//! duration of a paint call. Besides plain rectangle fills the surface can be
//! split into disjoint horizontal [`Band`]s, each exclusively borrowed, which
//! is what lets glyph compositing fan out across threads without locks.

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::face::GlyphMask;
use crate::fixed::Rect;

/// A 2D pixel buffer in row-major order.
#[derive(Clone, Debug)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl Surface {
    /// Create a surface filled with transparent black.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        let size = (width as usize)
            .checked_mul(height as usize)
            .ok_or(Error::InvalidDimensions { width, height })?;
        Ok(Self {
            width,
            height,
            pixels: vec![Rgba::TRANSPARENT; size],
        })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whole-surface rectangle.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    #[must_use]
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    #[inline]
    fn pixel_index(&self, x: i32, y: i32) -> Option<usize> {
        if !self.bounds().contains(x, y) {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> Option<Rgba> {
        self.pixel_index(x, y).map(|idx| self.pixels[idx])
    }

    pub fn set(&mut self, x: i32, y: i32, color: Rgba) {
        if let Some(idx) = self.pixel_index(x, y) {
            self.pixels[idx] = color;
        }
    }

    /// Fill the entire surface.
    pub fn fill(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    /// Blend `color` over every pixel of `rect` (clipped to the surface).
    pub fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        let r = rect.intersect(&self.bounds());
        if r.is_empty() {
            return;
        }
        let stride = self.width as usize;
        for y in r.y..r.bottom() {
            let row = y as usize * stride;
            for px in &mut self.pixels[row + r.x as usize..row + r.right() as usize] {
                *px = color.blend_over(*px);
            }
        }
    }

    /// Composite a glyph mask with its top-left at (`x`, `y`), clipped to `clip`.
    pub fn composite_mask(&mut self, x: i32, y: i32, mask: &GlyphMask, color: Rgba, clip: Rect) {
        let clip = clip.intersect(&self.bounds());
        composite(
            &mut self.pixels,
            self.width,
            0,
            x,
            y,
            mask,
            color,
            clip,
        );
    }

    /// Split the surface into disjoint mutable row bands.
    ///
    /// `rows` are half-open `(start, end)` row ranges in ascending order. Ranges
    /// are clipped to the surface; a range overlapping its predecessor is
    /// trimmed to start where the predecessor ended. The returned bands keep the
    /// order and count of `rows` (empty ranges produce empty bands).
    pub fn bands_mut(&mut self, rows: &[(i32, i32)]) -> Vec<Band<'_>> {
        let width = self.width;
        let stride = width as usize;
        let height = self.height as i32;

        let mut bands = Vec::with_capacity(rows.len());
        let mut rest: &mut [Rgba] = &mut self.pixels;
        let mut consumed = 0i32;
        for &(start, end) in rows {
            let start = start.clamp(consumed, height);
            let end = end.clamp(start, height);
            let skip = (start - consumed) as usize * stride;
            let take = (end - start) as usize * stride;
            let tail = std::mem::take(&mut rest);
            let (_, tail) = tail.split_at_mut(skip);
            let (band, tail) = tail.split_at_mut(take);
            rest = tail;
            consumed = end;
            bands.push(Band {
                top: start,
                width,
                pixels: band,
            });
        }
        bands
    }
}

/// Exclusive view over a contiguous run of surface rows.
#[derive(Debug)]
pub struct Band<'a> {
    top: i32,
    width: u32,
    pixels: &'a mut [Rgba],
}

impl Band<'_> {
    /// First surface row covered by the band.
    #[must_use]
    pub fn top(&self) -> i32 {
        self.top
    }

    /// One past the last surface row covered by the band.
    #[must_use]
    pub fn bottom(&self) -> i32 {
        self.top + self.rows()
    }

    fn rows(&self) -> i32 {
        if self.width == 0 {
            0
        } else {
            (self.pixels.len() / self.width as usize) as i32
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Composite a glyph mask in surface coordinates, clipped to `clip` and
    /// to the band's rows.
    pub fn composite_mask(&mut self, x: i32, y: i32, mask: &GlyphMask, color: Rgba, clip: Rect) {
        let rows = Rect::from_corners(0, self.top, self.width as i32, self.bottom());
        composite(
            self.pixels,
            self.width,
            self.top,
            x,
            y,
            mask,
            color,
            clip.intersect(&rows),
        );
    }
}

/// Blend `mask` into `pixels`, whose first row is surface row `top`.
/// `clip` is in surface coordinates and must lie inside `pixels`.
#[allow(clippy::too_many_arguments)]
fn composite(
    pixels: &mut [Rgba],
    width: u32,
    top: i32,
    x: i32,
    y: i32,
    mask: &GlyphMask,
    color: Rgba,
    clip: Rect,
) {
    let dst = Rect::new(x, y, mask.width, mask.height).intersect(&clip);
    if dst.is_empty() {
        return;
    }
    let stride = width as usize;
    for dy in dst.y..dst.bottom() {
        let row = (dy - top) as usize * stride;
        let my = (dy - y) as usize;
        for dx in dst.x..dst.right() {
            let coverage = mask.coverage(dx - x, my as i32);
            if coverage == 0 {
                continue;
            }
            let px = &mut pixels[row + dx as usize];
            *px = color.with_coverage(coverage).blend_over(*px);
        }
    }
}
