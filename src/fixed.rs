//! 26.6 fixed-point geometry.
//!
//! Pen positions accumulate many small advances along a line; keeping them in
//! fixed point (26 integer bits, 6 fractional bits) avoids the drift that
//! float accumulation produces, and makes layout comparisons exact.
//!
//! # Examples
//!
//! ```
//! use textarea_core::fixed::{Fixed, Point};
//!
//! let advance = Fixed::from_ratio(15, 2); // 7.5px
//! let pen = Point::new(advance * 3, Fixed::from_int(16));
//! assert_eq!(pen.x.floor(), 22);
//! assert_eq!(pen.x.round(), 23);
//! ```

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// Number of fractional bits.
const FRAC_BITS: i32 = 6;
const ONE: i32 = 1 << FRAC_BITS;

/// Signed 26.6 fixed-point number.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fixed(i32);

impl Fixed {
    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(ONE);
    pub const MAX: Self = Self(i32::MAX);

    /// Create from the raw 26.6 representation.
    #[must_use]
    pub const fn from_bits(bits: i32) -> Self {
        Self(bits)
    }

    /// Raw 26.6 representation.
    #[must_use]
    pub const fn to_bits(self) -> i32 {
        self.0
    }

    /// Create from a whole number of pixels.
    #[must_use]
    pub const fn from_int(v: i32) -> Self {
        Self(v.saturating_mul(ONE))
    }

    /// Create from `num / den` pixels, rounded to the nearest 1/64.
    ///
    /// # Panics
    /// Panics if `den` is zero.
    #[must_use]
    pub fn from_ratio(num: i32, den: i32) -> Self {
        assert!(den != 0, "fixed-point ratio with zero denominator");
        let bits = (i64::from(num) * i64::from(ONE) * 2 + i64::from(den)) / (i64::from(den) * 2);
        Self(clamp_i64(bits))
    }

    /// Largest whole pixel not greater than this value.
    #[must_use]
    pub const fn floor(self) -> i32 {
        self.0 >> FRAC_BITS
    }

    /// Smallest whole pixel not less than this value.
    #[must_use]
    pub const fn ceil(self) -> i32 {
        (self.0.saturating_add(ONE - 1)) >> FRAC_BITS
    }

    /// Nearest whole pixel, halves rounding up.
    #[must_use]
    pub const fn round(self) -> i32 {
        (self.0.saturating_add(ONE / 2)) >> FRAC_BITS
    }

    #[must_use]
    pub fn max(self, other: Self) -> Self {
        Self(self.0.max(other.0))
    }

    #[must_use]
    pub fn min(self, other: Self) -> Self {
        Self(self.0.min(other.0))
    }

    #[must_use]
    pub fn clamp(self, lo: Self, hi: Self) -> Self {
        Self(self.0.clamp(lo.0, hi.0.max(lo.0)))
    }

    /// Integer quotient `self / other`, floored. Zero divisor yields zero.
    #[must_use]
    pub fn div_floor(self, other: Self) -> i32 {
        if other.0 == 0 {
            return 0;
        }
        self.0.div_euclid(other.0)
    }
}

fn clamp_i64(v: i64) -> i32 {
    v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

impl Add for Fixed {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Fixed {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Fixed {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Fixed {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for Fixed {
    type Output = Self;
    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

/// Scale by a whole number.
impl Mul<i32> for Fixed {
    type Output = Self;
    fn mul(self, rhs: i32) -> Self {
        Self(self.0.saturating_mul(rhs))
    }
}

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 >> FRAC_BITS;
        let frac = self.0 & (ONE - 1);
        if frac == 0 {
            write!(f, "{whole}")
        } else {
            write!(f, "{whole}:{frac:02}")
        }
    }
}

/// Fixed-point pen position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: Fixed,
    pub y: Fixed,
}

impl Point {
    #[must_use]
    pub const fn new(x: Fixed, y: Fixed) -> Self {
        Self { x, y }
    }

    /// Point at whole pixel coordinates.
    #[must_use]
    pub const fn from_int(x: i32, y: i32) -> Self {
        Self::new(Fixed::from_int(x), Fixed::from_int(y))
    }
}

impl Add for Point {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Integer pixel rectangle, half-open on both axes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    #[must_use]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build from corner coordinates; inverted corners yield an empty rect.
    #[must_use]
    pub fn from_corners(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self::new(
            x0,
            y0,
            x1.saturating_sub(x0).max(0) as u32,
            y1.saturating_sub(y0).max(0) as u32,
        )
    }

    #[must_use]
    pub fn right(&self) -> i32 {
        self.x.saturating_add_unsigned(self.width)
    }

    #[must_use]
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add_unsigned(self.height)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check if a pixel is inside this rectangle.
    #[must_use]
    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && py >= self.y && px < self.right() && py < self.bottom()
    }

    /// Intersection with another rectangle (empty when disjoint).
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Self {
        Self::from_corners(
            self.x.max(other.x),
            self.y.max(other.y),
            self.right().min(other.right()),
            self.bottom().min(other.bottom()),
        )
    }

    /// Translate by a pixel offset.
    #[must_use]
    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(
            self.x.saturating_add(dx),
            self.y.saturating_add(dy),
            self.width,
            self.height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounding() {
        let v = Fixed::from_bits(64 * 3 + 32);
        assert_eq!(v.floor(), 3);
        assert_eq!(v.ceil(), 4);
        assert_eq!(v.round(), 4);

        let neg = Fixed::from_bits(-(64 + 1));
        assert_eq!(neg.floor(), -2);
        assert_eq!(neg.ceil(), -1);
    }

    #[test]
    fn test_from_ratio() {
        assert_eq!(Fixed::from_ratio(1, 2).to_bits(), 32);
        assert_eq!(Fixed::from_ratio(15, 2) * 2, Fixed::from_int(15));
        // 1/3 rounds to 21/64
        assert_eq!(Fixed::from_ratio(1, 3).to_bits(), 21);
    }

    #[test]
    fn test_arithmetic_saturates() {
        assert_eq!(Fixed::MAX + Fixed::ONE, Fixed::MAX);
        assert_eq!(Fixed::from_int(3) - Fixed::from_int(5), Fixed::from_int(-2));
        assert_eq!(Fixed::from_int(7).div_floor(Fixed::from_int(2)), 3);
        assert_eq!(Fixed::from_int(7).div_floor(Fixed::ZERO), 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(Fixed::from_int(12).to_string(), "12");
        assert_eq!(Fixed::from_bits(64 + 5).to_string(), "1:05");
    }

    #[test]
    fn test_rect_intersect() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 10, 10);
        assert_eq!(a.intersect(&b), Rect::new(5, 5, 5, 5));

        let c = Rect::new(20, 20, 5, 5);
        assert!(a.intersect(&c).is_empty());
        assert!(a.contains(9, 9));
        assert!(!a.contains(10, 9));
    }
}
