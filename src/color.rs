//! RGBA color used by fills and glyph compositing.
//!
//! Glyph masks carry per-pixel coverage; compositing a glyph scales the
//! foreground alpha by that coverage and blends it over the destination with
//! Porter-Duff "over".
//!
//! ```
//! use textarea_core::Rgba;
//!
//! let ink = Rgba::from_rgb_u8(0x20, 0x20, 0x20);
//! let paper = Rgba::from_rgb_u8(0xf5, 0xf5, 0xdc);
//! let edge = ink.with_coverage(128).blend_over(paper);
//! assert!((edge.a - 1.0).abs() < 1e-6);
//! ```

/// RGBA color with f32 components in range [0.0, 1.0].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color.
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    #[must_use]
    pub fn from_rgb_u8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba_u8(r, g, b, 255)
    }

    #[must_use]
    pub fn from_rgba_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        let f = |v: u8| f32::from(v) / 255.0;
        Self::new(f(r), f(g), f(b), f(a))
    }

    /// Composite `self` over `below` (Porter-Duff "over").
    #[must_use]
    pub fn blend_over(self, below: Self) -> Self {
        const ALPHA_EPSILON: f32 = 1e-6;

        if self.a >= 1.0 {
            return self;
        }
        if self.a <= 0.0 {
            return below;
        }

        let keep = 1.0 - self.a;
        let out_a = below.a.mul_add(keep, self.a);
        if out_a <= ALPHA_EPSILON {
            return Self::TRANSPARENT;
        }
        let mix = |top: f32, bottom: f32| (bottom * below.a).mul_add(keep, top * self.a) / out_a;
        Self::new(
            mix(self.r, below.r),
            mix(self.g, below.g),
            mix(self.b, below.b),
            out_a,
        )
    }

    #[must_use]
    pub const fn with_alpha(self, alpha: f32) -> Self {
        Self::new(self.r, self.g, self.b, alpha)
    }

    /// Scale alpha by a coverage factor in [0, 1].
    #[must_use]
    pub fn multiply_alpha(self, factor: f32) -> Self {
        self.with_alpha(self.a * factor.clamp(0.0, 1.0))
    }

    /// Scale alpha by an 8-bit mask coverage value.
    #[must_use]
    pub fn with_coverage(self, coverage: u8) -> Self {
        self.multiply_alpha(f32::from(coverage) / 255.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_u8() {
        assert_eq!(Rgba::from_rgb_u8(255, 255, 255), Rgba::WHITE);
        assert_eq!(Rgba::from_rgba_u8(0, 0, 0, 0), Rgba::TRANSPARENT);
    }

    #[test]
    fn test_blend_over_extremes() {
        assert_eq!(Rgba::WHITE.blend_over(Rgba::BLACK), Rgba::WHITE);
        assert_eq!(Rgba::TRANSPARENT.blend_over(Rgba::BLACK), Rgba::BLACK);
    }

    #[test]
    fn test_coverage_blend() {
        let half = Rgba::BLACK.with_coverage(128).blend_over(Rgba::WHITE);
        assert!((half.a - 1.0).abs() < 1e-6);
        assert!((half.r - 127.0 / 255.0).abs() < 1e-3);
        assert_eq!(half.r, half.g);
        assert_eq!(half.g, half.b);
    }
}
