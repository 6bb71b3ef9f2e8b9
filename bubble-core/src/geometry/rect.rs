use serde::{Deserialize, Serialize};

use crate::geometry::shape::scaled_center;
use crate::geometry::{Point, RectCorner, ScaleAnchor, Shape};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle stored as `origin` (minimum corner) plus `size`.
///
/// The min/mid/max setters move `origin` and never change `size`, so the
/// two fields always stay consistent. Non-negative width and height are
/// the caller's responsibility.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const ZERO: Self = Self {
        origin: Point::ZERO,
        size: Size::new(0.0, 0.0),
    };

    pub const fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    pub fn from_corners(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            origin: Point::new(min_x, min_y),
            size: Size::new(max_x - min_x, max_y - min_y),
        }
    }

    pub fn from_center(center: Point, size: Size) -> Self {
        let mut rect = Self::new(Point::ZERO, size);
        rect.set_center(center);
        rect
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.size.width
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.size.height
    }

    pub fn min_x(&self) -> f64 {
        self.origin.x
    }

    pub fn min_y(&self) -> f64 {
        self.origin.y
    }

    pub fn mid_x(&self) -> f64 {
        self.origin.x + self.size.width / 2.0
    }

    pub fn mid_y(&self) -> f64 {
        self.origin.y + self.size.height / 2.0
    }

    pub fn max_x(&self) -> f64 {
        self.origin.x + self.size.width
    }

    pub fn max_y(&self) -> f64 {
        self.origin.y + self.size.height
    }

    pub fn set_min_x(&mut self, value: f64) {
        self.origin.x = value;
    }

    pub fn set_min_y(&mut self, value: f64) {
        self.origin.y = value;
    }

    pub fn set_mid_x(&mut self, value: f64) {
        self.origin.x = value - self.size.width / 2.0;
    }

    pub fn set_mid_y(&mut self, value: f64) {
        self.origin.y = value - self.size.height / 2.0;
    }

    pub fn set_max_x(&mut self, value: f64) {
        self.origin.x = value - self.size.width;
    }

    pub fn set_max_y(&mut self, value: f64) {
        self.origin.y = value - self.size.height;
    }

    pub fn area(&self) -> f64 {
        self.size.width * self.size.height
    }

    pub fn is_nan(&self) -> bool {
        self.origin.is_nan() || self.size.width.is_nan() || self.size.height.is_nan()
    }

    pub fn top_mid_point(&self) -> Point {
        Point::new(self.mid_x(), self.min_y())
    }

    pub fn bottom_mid_point(&self) -> Point {
        Point::new(self.mid_x(), self.max_y())
    }

    pub fn left_mid_point(&self) -> Point {
        Point::new(self.min_x(), self.mid_y())
    }

    pub fn right_mid_point(&self) -> Point {
        Point::new(self.max_x(), self.mid_y())
    }

    pub fn corner(&self, corner: RectCorner) -> Point {
        match corner {
            RectCorner::TopLeft => Point::new(self.min_x(), self.min_y()),
            RectCorner::TopRight => Point::new(self.max_x(), self.min_y()),
            RectCorner::BottomLeft => Point::new(self.min_x(), self.max_y()),
            RectCorner::BottomRight => Point::new(self.max_x(), self.max_y()),
        }
    }

    /// Moves the rectangle so `corner` lands on `point`.
    pub fn set_corner(&mut self, corner: RectCorner, point: Point) {
        match corner {
            RectCorner::TopLeft => {
                self.set_min_x(point.x);
                self.set_min_y(point.y);
            }
            RectCorner::TopRight => {
                self.set_max_x(point.x);
                self.set_min_y(point.y);
            }
            RectCorner::BottomLeft => {
                self.set_min_x(point.x);
                self.set_max_y(point.y);
            }
            RectCorner::BottomRight => {
                self.set_max_x(point.x);
                self.set_max_y(point.y);
            }
        }
    }

    pub fn corners(&self) -> [Point; 4] {
        [
            self.corner(RectCorner::TopLeft),
            self.corner(RectCorner::TopRight),
            self.corner(RectCorner::BottomLeft),
            self.corner(RectCorner::BottomRight),
        ]
    }

    /// Shrinks the width by `margin` on both sides, keeping the center.
    pub fn inset_horizontally(&self, margin: f64) -> Rect {
        let size = Size::new(self.size.width - margin * 2.0, self.size.height);
        Rect::from_center(self.center(), size)
    }
}

impl Shape for Rect {
    fn origin(&self) -> Point {
        self.origin
    }

    fn center(&self) -> Point {
        Point::new(self.mid_x(), self.mid_y())
    }

    fn set_center(&mut self, center: Point) {
        self.set_mid_x(center.x);
        self.set_mid_y(center.y);
    }

    fn bounding_box(&self) -> Rect {
        *self
    }

    fn is_point_inside(&self, point: Point, tolerance: f64) -> bool {
        point.x >= self.min_x() - tolerance
            && point.x <= self.max_x() + tolerance
            && point.y >= self.min_y() - tolerance
            && point.y <= self.max_y() + tolerance
    }

    /// Axis-aligned separation: Euclidean distance between the closest
    /// edges when apart, minus the smaller penetration depth when overlapping.
    fn distance_to_other(&self, other: &Self) -> f64 {
        let gap_x = (self.mid_x() - other.mid_x()).abs() - (self.width() + other.width()) / 2.0;
        let gap_y = (self.mid_y() - other.mid_y()).abs() - (self.height() + other.height()) / 2.0;

        if gap_x > 0.0 && gap_y > 0.0 {
            gap_x.hypot(gap_y)
        } else {
            gap_x.max(gap_y)
        }
    }

    fn scale_uniformly_by_factor(&mut self, factor: f64, anchor: ScaleAnchor) {
        let anchor_point = self.anchor_point(anchor);
        let center = scaled_center(self.center(), anchor_point, factor);

        self.size = Size::new(self.size.width * factor, self.size.height * factor);
        self.set_center(center);
    }
}
