use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::geometry::{Angle, Point};
use crate::tolerance::EPSILON;

/// A free 2-D vector.
///
/// `Vector2D` is an immutable value type: every operation returns a new
/// vector. Arithmetic is delegated to [`glam::DVec2`]; the `dx`/`dy`
/// fields are kept so the type reads as a displacement rather than a
/// position (see [`Point`] for the latter).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2D {
    pub dx: f64,
    pub dy: f64,
}

impl Vector2D {
    pub const ZERO: Self = Self { dx: 0.0, dy: 0.0 };
    pub const UNIT_X: Self = Self { dx: 1.0, dy: 0.0 };
    pub const UNIT_Y: Self = Self { dx: 0.0, dy: 1.0 };

    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    /// Builds a vector of the given magnitude pointing along `angle`.
    pub fn from_angle(angle: Angle, magnitude: f64) -> Self {
        (DVec2::from_angle(angle.radians()) * magnitude).into()
    }

    /// Vector going from `start` to `end`.
    pub fn from_points(start: Point, end: Point) -> Self {
        Self::new(end.x - start.x, end.y - start.y)
    }

    /// Component-wise mean of `vectors`, or [`Vector2D::ZERO`] if empty.
    pub fn average(vectors: &[Vector2D]) -> Self {
        if vectors.is_empty() {
            return Self::ZERO;
        }
        let sum = vectors.iter().fold(Self::ZERO, |acc, v| acc + *v);
        sum / vectors.len() as f64
    }

    #[inline]
    pub fn as_dvec2(self) -> DVec2 {
        DVec2::new(self.dx, self.dy)
    }

    #[inline]
    pub fn as_point(self) -> Point {
        Point::new(self.dx, self.dy)
    }

    #[inline]
    pub fn magnitude(self) -> f64 {
        self.as_dvec2().length()
    }

    #[inline]
    pub fn magnitude_squared(self) -> f64 {
        self.as_dvec2().length_squared()
    }

    /// Unit vector with the same direction.
    ///
    /// A zero-length vector normalizes to [`Vector2D::ZERO`] instead of
    /// producing NaNs.
    pub fn normalized(self) -> Self {
        self.as_dvec2().normalize_or_zero().into()
    }

    pub fn is_zero(self) -> bool {
        self.dx.abs() < EPSILON && self.dy.abs() < EPSILON
    }

    pub fn is_unit(self) -> bool {
        (self.magnitude() - 1.0).abs() < EPSILON
    }

    /// The vector rotated by +90°.
    pub fn perpendicular(self) -> Self {
        self.as_dvec2().perp().into()
    }

    pub fn inverse(self) -> Self {
        -self
    }

    /// Angle from the positive x-axis, in radians.
    pub fn angle(self) -> Angle {
        Angle::from_radians(self.dy.atan2(self.dx))
    }

    pub fn distance_to(self, other: Vector2D) -> f64 {
        self.as_dvec2().distance(other.as_dvec2())
    }

    pub fn is_equal_to(self, other: Vector2D, tolerance: f64) -> bool {
        (self.dx - other.dx).abs() < tolerance && (self.dy - other.dy).abs() < tolerance
    }

    #[inline]
    pub fn dot(self, other: Vector2D) -> f64 {
        self.as_dvec2().dot(other.as_dvec2())
    }

    /// Z component of the 3-D cross product.
    #[inline]
    pub fn cross(self, other: Vector2D) -> f64 {
        self.as_dvec2().perp_dot(other.as_dvec2())
    }

    /// Rotates counter-clockwise by `angle`.
    pub fn rotated_by(self, angle: Angle) -> Self {
        DVec2::from_angle(angle.radians())
            .rotate(self.as_dvec2())
            .into()
    }

    /// Projection of `self` onto `other`.
    ///
    /// Projecting onto a zero vector yields [`Vector2D::ZERO`].
    pub fn projected_onto(self, other: Vector2D) -> Self {
        let len2 = other.magnitude_squared();
        if len2 == 0.0 {
            return Self::ZERO;
        }
        other * (self.dot(other) / len2)
    }

    /// Unsigned angle between the two vectors, in `[0, π]`.
    pub fn angle_between(self, other: Vector2D) -> Angle {
        let mags = self.magnitude() * other.magnitude();
        if mags == 0.0 {
            return Angle::from_radians(0.0);
        }
        let cos = (self.dot(other) / mags).clamp(-1.0, 1.0);
        Angle::from_radians(cos.acos())
    }

    /// Mirror image of `self` across the line spanned by `axis`.
    pub fn reflected_over(self, axis: Vector2D) -> Self {
        let n = axis.normalized();
        n * (2.0 * self.dot(n)) - self
    }

    /// Clamps the magnitude to at most `max_magnitude`.
    pub fn limited(self, max_magnitude: f64) -> Self {
        self.as_dvec2().clamp_length_max(max_magnitude).into()
    }
}

impl From<DVec2> for Vector2D {
    fn from(v: DVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Vector2D> for DVec2 {
    fn from(v: Vector2D) -> Self {
        v.as_dvec2()
    }
}

impl From<Point> for Vector2D {
    fn from(p: Point) -> Self {
        Self::new(p.x, p.y)
    }
}

impl Add for Vector2D {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.dx + rhs.dx, self.dy + rhs.dy)
    }
}

impl AddAssign for Vector2D {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Vector2D {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.dx - rhs.dx, self.dy - rhs.dy)
    }
}

impl SubAssign for Vector2D {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Mul<f64> for Vector2D {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.dx * rhs, self.dy * rhs)
    }
}

/// Divides both components by a scalar.
///
/// ### Panics
/// Panics if `rhs` is exactly zero. Dividing by a literal zero is a
/// programming error; use [`Vector2D::normalized`] for the guarded case.
impl Div<f64> for Vector2D {
    type Output = Self;
    fn div(self, rhs: f64) -> Self {
        assert!(rhs != 0.0, "cannot divide a vector by zero");
        Self::new(self.dx / rhs, self.dy / rhs)
    }
}

impl Neg for Vector2D {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.dx, -self.dy)
    }
}
