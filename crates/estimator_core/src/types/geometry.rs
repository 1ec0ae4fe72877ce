//! Integer geometry primitives.
//!
//! [`Rectangle`] is the bounding box inside which samples are drawn and
//! [`Point`] is a single sample. Both are plain `Copy` values; a rectangle is
//! validated once at construction and is immutable afterwards, so every
//! worker can hold a shared reference to it without synchronisation.
//!
//! # Examples
//!
//! ```
//! use estimator_core::types::{Point, Rectangle};
//!
//! let bounding_box = Rectangle::new(-100, -50, 100, 50).unwrap();
//! assert_eq!(bounding_box.width(), 200);
//! assert_eq!(bounding_box.height(), 100);
//! assert_eq!(bounding_box.area(), 20_000.0);
//!
//! assert!(bounding_box.contains(Point::new(-100, -50)));
//! assert!(!bounding_box.contains(Point::new(100, 0)));  // right edge is open
//! ```

use std::fmt;

use super::error::GeometryError;

/// A sample point with integer coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    /// Horizontal coordinate
    pub x: i32,
    /// Vertical coordinate
    pub y: i32,
}

impl Point {
    /// Creates a point from its coordinates.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Axis-aligned, non-degenerate bounding box.
///
/// The bounds are private so that a `Rectangle` always satisfies
/// `right > left` and `top > bottom`; sampling can therefore never divide by
/// a zero or negative span.
///
/// Spans and areas are computed in 64-bit arithmetic, so boxes spanning the
/// full `i32` range do not overflow.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rectangle {
    top: i32,
    left: i32,
    right: i32,
    bottom: i32,
}

impl Rectangle {
    /// Creates a bounding box from its bounds, in command-line order.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateBox`] when `right <= left` or
    /// `top <= bottom`.
    ///
    /// # Examples
    ///
    /// ```
    /// use estimator_core::types::{GeometryError, Rectangle};
    ///
    /// assert!(Rectangle::new(0, 0, 100, 100).is_ok());
    /// assert!(matches!(
    ///     Rectangle::new(0, 0, 0, 100),
    ///     Err(GeometryError::DegenerateBox { .. })
    /// ));
    /// ```
    pub fn new(left: i32, bottom: i32, right: i32, top: i32) -> Result<Self, GeometryError> {
        if right <= left || top <= bottom {
            return Err(GeometryError::DegenerateBox {
                left,
                bottom,
                right,
                top,
            });
        }
        Ok(Self {
            top,
            left,
            right,
            bottom,
        })
    }

    /// Returns the top bound (exclusive for sampling).
    #[inline]
    pub fn top(&self) -> i32 {
        self.top
    }

    /// Returns the left bound (inclusive).
    #[inline]
    pub fn left(&self) -> i32 {
        self.left
    }

    /// Returns the right bound (exclusive for sampling).
    #[inline]
    pub fn right(&self) -> i32 {
        self.right
    }

    /// Returns the bottom bound (inclusive).
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.bottom
    }

    /// Horizontal span `right - left`, always positive.
    #[inline]
    pub fn width(&self) -> u64 {
        (i64::from(self.right) - i64::from(self.left)) as u64
    }

    /// Vertical span `top - bottom`, always positive.
    #[inline]
    pub fn height(&self) -> u64 {
        (i64::from(self.top) - i64::from(self.bottom)) as u64
    }

    /// Box area `(right - left) * (top - bottom)`.
    #[inline]
    pub fn area(&self) -> f64 {
        self.width() as f64 * self.height() as f64
    }

    /// Returns true if `point` lies in `[left, right) x [bottom, top)`.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left && point.x < self.right && point.y >= self.bottom && point.y < self.top
    }
}

impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}) x [{}, {})",
            self.left, self.right, self.bottom, self.top
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_rectangle_accessors() {
        let rect = Rectangle::new(-100, -50, 100, 50).unwrap();
        assert_eq!(rect.left(), -100);
        assert_eq!(rect.bottom(), -50);
        assert_eq!(rect.right(), 100);
        assert_eq!(rect.top(), 50);
        assert_eq!(rect.width(), 200);
        assert_eq!(rect.height(), 100);
        assert_eq!(rect.area(), 20_000.0);
    }

    #[test]
    fn test_rectangle_rejects_degenerate() {
        assert!(Rectangle::new(10, 0, 10, 5).is_err());
        assert!(Rectangle::new(10, 0, 5, 5).is_err());
        assert!(Rectangle::new(0, 5, 10, 5).is_err());
        assert!(Rectangle::new(0, 6, 10, 5).is_err());
    }

    #[test]
    fn test_rectangle_full_i32_range() {
        let rect = Rectangle::new(i32::MIN, i32::MIN, i32::MAX, i32::MAX).unwrap();
        assert_eq!(rect.width(), u32::MAX as u64);
        assert_eq!(rect.height(), u32::MAX as u64);
        assert!(rect.area() > 0.0);
    }

    #[test]
    fn test_rectangle_contains_half_open() {
        let rect = Rectangle::new(0, 0, 10, 10).unwrap();
        assert!(rect.contains(Point::new(0, 0)));
        assert!(rect.contains(Point::new(9, 9)));
        assert!(!rect.contains(Point::new(10, 5)));
        assert!(!rect.contains(Point::new(5, 10)));
        assert!(!rect.contains(Point::new(-1, 5)));
    }

    #[test]
    fn test_display() {
        let rect = Rectangle::new(0, 0, 100, 100).unwrap();
        assert_eq!(rect.to_string(), "[0, 100) x [0, 100)");
        assert_eq!(Point::new(3, -4).to_string(), "(3, -4)");
    }

    proptest! {
        #[test]
        fn prop_valid_box_has_positive_area(
            left in -10_000i32..10_000,
            bottom in -10_000i32..10_000,
            w in 1i32..10_000,
            h in 1i32..10_000,
        ) {
            let rect = Rectangle::new(left, bottom, left + w, bottom + h).unwrap();
            prop_assert!(rect.area() > 0.0);
            prop_assert_eq!(rect.area(), (w as f64) * (h as f64));
        }
    }
}
