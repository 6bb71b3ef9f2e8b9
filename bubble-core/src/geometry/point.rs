use std::fmt;
use std::ops::{Add, Sub};

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::geometry::{Angle, Rect, Vector2D};
use crate::tolerance::EPSILON;

/// A position in the plane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn as_vector(self) -> Vector2D {
        Vector2D::new(self.x, self.y)
    }

    #[inline]
    pub fn as_dvec2(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    pub fn distance_to(self, other: Point) -> f64 {
        self.as_dvec2().distance(other.as_dvec2())
    }

    /// `self - other`, component-wise.
    pub fn delta(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    pub fn sum(points: &[Point]) -> Point {
        points
            .iter()
            .fold(Point::ZERO, |acc, p| Point::new(acc.x + p.x, acc.y + p.y))
    }

    pub fn midpoint(self, other: Point) -> Point {
        Point::lerp(self, other, 0.5)
    }

    /// Linear interpolation; `t = 0` yields `start`, `t = 1` yields `end`.
    pub fn lerp(start: Point, end: Point, t: f64) -> Point {
        start.as_dvec2().lerp(end.as_dvec2(), t).into()
    }

    pub fn is_equal_to(self, other: Point, tolerance: f64) -> bool {
        (self.x - other.x).abs() < tolerance && (self.y - other.y).abs() < tolerance
    }

    pub fn is_zero(self) -> bool {
        self.x.abs() < EPSILON && self.y.abs() < EPSILON
    }

    pub fn is_nan(self) -> bool {
        self.x.is_nan() || self.y.is_nan()
    }

    /// Rotates the point counter-clockwise by `angle` around `center`.
    pub fn rotated_about(self, center: Point, angle: Angle) -> Point {
        let offset = self.as_dvec2() - center.as_dvec2();
        let rotated = DVec2::from_angle(angle.radians()).rotate(offset);
        (rotated + center.as_dvec2()).into()
    }

    /// Smallest axis-aligned rectangle containing every point.
    ///
    /// An empty slice yields a zero-sized rectangle at the origin.
    pub fn bounding_box(points: &[Point]) -> Rect {
        let Some(first) = points.first() else {
            return Rect::ZERO;
        };

        let (min, max) = points.iter().skip(1).fold(
            (first.as_dvec2(), first.as_dvec2()),
            |(min, max), p| (min.min(p.as_dvec2()), max.max(p.as_dvec2())),
        );

        Rect::from_corners(min.x, min.y, max.x, max.y)
    }

    pub fn translate_points(points: &[Point], offset: Vector2D) -> Vec<Point> {
        points.iter().map(|p| *p + offset).collect()
    }

    pub fn rotate_points_about(points: &[Point], center: Point, angle: Angle) -> Vec<Point> {
        points
            .iter()
            .map(|p| p.rotated_about(center, angle))
            .collect()
    }
}

impl From<DVec2> for Point {
    fn from(v: DVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Vector2D> for Point {
    fn from(v: Vector2D) -> Self {
        Self::new(v.dx, v.dy)
    }
}

impl Add<Vector2D> for Point {
    type Output = Point;
    fn add(self, rhs: Vector2D) -> Point {
        Point::new(self.x + rhs.dx, self.y + rhs.dy)
    }
}

impl Sub<Vector2D> for Point {
    type Output = Point;
    fn sub(self, rhs: Vector2D) -> Point {
        Point::new(self.x - rhs.dx, self.y - rhs.dy)
    }
}

impl Sub for Point {
    type Output = Vector2D;
    fn sub(self, rhs: Point) -> Vector2D {
        Vector2D::from_points(rhs, self)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point({}, {})", self.x, self.y)
    }
}
