//! Curve predicates for inside/outside classification.
//!
//! The [`Curve`] trait is the single customisation point of the estimator:
//! swapping the target shape means supplying another implementation while
//! the sampler, worker and coordinator stay unchanged.
//!
//! Implementations must be pure: the same point always classifies the same
//! way, and classification never mutates shared state. Workers call
//! `contains` concurrently through a shared reference.

use std::f64::consts::PI;

use crate::types::{GeometryError, Point, Rectangle};

/// Membership test for the shape whose area is estimated.
pub trait Curve {
    /// Returns true if `point` lies inside the curve (boundary included).
    fn contains(&self, point: Point) -> bool;
}

impl<C: Curve + ?Sized> Curve for &C {
    #[inline]
    fn contains(&self, point: Point) -> bool {
        (**self).contains(point)
    }
}

/// Axis-aligned ellipse centred at the origin.
///
/// A point is inside when `x²/a² + y²/b² - 1 <= 0`.
///
/// # Examples
///
/// ```
/// use estimator_core::{Curve, Ellipse, Point};
///
/// let ellipse = Ellipse::reference(); // a = 100, b = 50
/// assert!(ellipse.contains(Point::new(0, 0)));
/// assert!(ellipse.contains(Point::new(0, 50)));   // boundary is inside
/// assert!(!ellipse.contains(Point::new(0, 51)));
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ellipse {
    a_squared: f64,
    b_squared: f64,
    a: f64,
    b: f64,
}

impl Ellipse {
    /// Horizontal semi-axis of the reference ellipse.
    pub const REFERENCE_A: f64 = 100.0;

    /// Vertical semi-axis of the reference ellipse.
    pub const REFERENCE_B: f64 = 50.0;

    /// Creates an ellipse with semi-axes `a` (horizontal) and `b` (vertical).
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidSemiAxis`] if either axis is not a
    /// finite positive number.
    pub fn new(a: f64, b: f64) -> Result<Self, GeometryError> {
        if !(a.is_finite() && a > 0.0) {
            return Err(GeometryError::InvalidSemiAxis { name: "a", value: a });
        }
        if !(b.is_finite() && b > 0.0) {
            return Err(GeometryError::InvalidSemiAxis { name: "b", value: b });
        }
        Ok(Self {
            a_squared: a * a,
            b_squared: b * b,
            a,
            b,
        })
    }

    /// The reference target curve: `a = 100`, `b = 50`.
    pub fn reference() -> Self {
        Self {
            a_squared: Self::REFERENCE_A * Self::REFERENCE_A,
            b_squared: Self::REFERENCE_B * Self::REFERENCE_B,
            a: Self::REFERENCE_A,
            b: Self::REFERENCE_B,
        }
    }

    /// Horizontal semi-axis.
    #[inline]
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Vertical semi-axis.
    #[inline]
    pub fn b(&self) -> f64 {
        self.b
    }

    /// Closed-form area `πab`, used to report the error of an estimate.
    #[inline]
    pub fn analytic_area(&self) -> f64 {
        PI * self.a * self.b
    }

    /// Signed level-set value `x²/a² + y²/b² - 1`; non-positive means inside.
    #[inline]
    pub fn level(&self, point: Point) -> f64 {
        let x = f64::from(point.x);
        let y = f64::from(point.y);
        (x * x) / self.a_squared + (y * y) / self.b_squared - 1.0
    }

    /// Returns true if every point of the ellipse lies in `bounding_box`.
    ///
    /// Only then does an estimate over the box measure the whole ellipse
    /// and compare against [`analytic_area`](Self::analytic_area). The
    /// right and top edges are exclusive, so they must lie strictly beyond
    /// the semi-axes.
    pub fn is_enclosed_by(&self, bounding_box: &Rectangle) -> bool {
        f64::from(bounding_box.left()) <= -self.a
            && f64::from(bounding_box.bottom()) <= -self.b
            && f64::from(bounding_box.right()) > self.a
            && f64::from(bounding_box.top()) > self.b
    }
}

impl Default for Ellipse {
    fn default() -> Self {
        Self::reference()
    }
}

impl Curve for Ellipse {
    #[inline]
    fn contains(&self, point: Point) -> bool {
        self.level(point) <= 0.0
    }
}
