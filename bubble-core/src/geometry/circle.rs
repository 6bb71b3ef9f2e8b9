use serde::{Deserialize, Serialize};

use crate::geometry::shape::scaled_center;
use crate::geometry::{Angle, Point, Rect, RectCorner, ScaleAnchor, Shape, Size, Vector2D};

/// A circle stored by the top-left corner of its bounding box.
///
/// `center = origin + (radius, radius)`; moving the center recomputes the
/// origin. The radius is expected to stay strictly positive.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoxedCircle {
    pub origin: Point,
    pub radius: f64,
}

impl BoxedCircle {
    pub const fn from_origin(origin: Point, radius: f64) -> Self {
        Self { origin, radius }
    }

    pub fn from_center(center: Point, radius: f64) -> Self {
        Self {
            origin: Point::new(center.x - radius, center.y - radius),
            radius,
        }
    }

    pub fn diameter(&self) -> f64 {
        self.radius * 2.0
    }

    /// Point on the circumference at `angle`, measured counter-clockwise.
    pub fn point_along_path(&self, angle: Angle) -> Point {
        angle.point_along_circle(self.radius, self.center(), false)
    }

    /// `true` if the whole circle lies within `rect`, with the rectangle
    /// inflated by `tolerance` on every side.
    pub fn is_inside_rect(&self, rect: &Rect, tolerance: f64) -> bool {
        let c = self.center();
        let r = self.radius;
        c.x - r >= rect.min_x() - tolerance
            && c.x + r <= rect.max_x() + tolerance
            && c.y - r >= rect.min_y() - tolerance
            && c.y + r <= rect.max_y() + tolerance
    }

    /// Bounding box of a group of circles.
    pub fn group_bounding_box(circles: &[BoxedCircle]) -> Rect {
        let corners: Vec<Point> = circles
            .iter()
            .flat_map(|c| {
                let bb = c.bounding_box();
                [bb.corner(RectCorner::TopLeft), bb.corner(RectCorner::BottomRight)]
            })
            .collect();
        Point::bounding_box(&corners)
    }

    /// Translates the group so the center of its bounding box lands on `center`.
    pub fn recenter_circles(circles: &mut [BoxedCircle], center: Point) {
        if circles.is_empty() {
            return;
        }
        let offset = center - Self::group_bounding_box(circles).center();
        for circle in circles.iter_mut() {
            circle.origin = circle.origin + offset;
        }
    }

    /// Rotates every circle center counter-clockwise around `center`.
    pub fn rotate_circles(circles: &mut [BoxedCircle], center: Point, angle: Angle) {
        for circle in circles.iter_mut() {
            let rotated = circle.center().rotated_about(center, angle);
            circle.set_center(rotated);
        }
    }
}

impl Shape for BoxedCircle {
    fn origin(&self) -> Point {
        self.origin
    }

    fn center(&self) -> Point {
        self.origin + Vector2D::new(self.radius, self.radius)
    }

    fn set_center(&mut self, center: Point) {
        self.origin = Point::new(center.x - self.radius, center.y - self.radius);
    }

    fn bounding_box(&self) -> Rect {
        Rect::new(self.origin, Size::new(self.diameter(), self.diameter()))
    }

    fn is_point_inside(&self, point: Point, tolerance: f64) -> bool {
        point.distance_to(self.center()) - self.radius <= tolerance
    }

    /// Center distance minus the sum of radii.
    fn distance_to_other(&self, other: &Self) -> f64 {
        self.center().distance_to(other.center()) - (self.radius + other.radius)
    }

    fn scale_uniformly_by_factor(&mut self, factor: f64, anchor: ScaleAnchor) {
        let anchor_point = self.anchor_point(anchor);
        let center = scaled_center(self.center(), anchor_point, factor);

        self.radius *= factor;
        self.set_center(center);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tolerance::EPSILON;
    use approx::assert_relative_eq;

    fn circle_at(x: f64, y: f64, r: f64) -> BoxedCircle {
        BoxedCircle::from_center(Point::new(x, y), r)
    }

    #[test]
    fn center_and_origin_are_consistent() {
        let mut c = BoxedCircle::from_origin(Point::new(0.0, 0.0), 5.0);
        assert_eq!(c.center(), Point::new(5.0, 5.0));

        c.set_center(Point::new(20.0, 10.0));
        assert_eq!(c.origin, Point::new(15.0, 5.0));
        assert_eq!(c.bounding_box(), Rect::from_corners(15.0, 5.0, 25.0, 15.0));
    }

    #[test]
    fn distance_is_a_signed_gap() {
        let a = circle_at(0.0, 0.0, 10.0);
        let b = circle_at(30.0, 40.0, 5.0);
        assert_relative_eq!(a.distance_to_other(&b), 35.0);
    }

    #[test]
    fn touching_circles_collide_and_are_edge_to_edge() {
        let a = circle_at(0.0, 0.0, 10.0);
        let b = circle_at(20.0, 0.0, 10.0);
        assert!(a.is_colliding_with_other(&b, EPSILON));
        assert!(a.is_edge_to_edge_with_other(&b, EPSILON));
    }

    #[test]
    fn overlapping_circles() {
        let a = circle_at(0.0, 0.0, 10.0);
        let b = circle_at(15.0, 0.0, 10.0);
        assert!(a.distance_to_other(&b) < 0.0);
        assert!(a.is_colliding_with_other(&b, EPSILON));
        assert!(!a.is_edge_to_edge_with_other(&b, EPSILON));
    }

    #[test]
    fn separated_circles() {
        let a = circle_at(0.0, 0.0, 10.0);
        let b = circle_at(25.0, 0.0, 10.0);
        assert!(!a.is_colliding_with_other(&b, EPSILON));
        assert!(!a.is_edge_to_edge_with_other(&b, EPSILON));
    }

    #[test]
    fn point_inside() {
        let c = circle_at(0.0, 0.0, 10.0);
        assert!(c.is_point_inside(Point::new(10.0, 0.0), EPSILON));
        assert!(c.is_point_inside(Point::new(3.0, 4.0), EPSILON));
        assert!(!c.is_point_inside(Point::new(8.0, 8.0), EPSILON));
    }

    #[test]
    fn point_along_path() {
        let c = circle_at(1.0, 1.0, 2.0);
        let p = c.point_along_path(Angle::from_degrees(0.0));
        assert!(p.is_equal_to(Point::new(3.0, 1.0), 1e-12));
    }

    #[test]
    fn inside_rect_with_tolerance() {
        let rect = Rect::from_corners(0.0, 0.0, 20.0, 20.0);
        assert!(circle_at(10.0, 10.0, 10.0).is_inside_rect(&rect, EPSILON));
        assert!(!circle_at(10.0, 10.0, 10.001).is_inside_rect(&rect, EPSILON));
    }

    #[test]
    fn scaling_about_each_anchor() {
        let c = circle_at(10.0, 10.0, 4.0);

        let centered = c.scaled_uniformly_by_factor(1.5, ScaleAnchor::Center);
        assert_relative_eq!(centered.radius, 6.0);
        assert_eq!(centered.center(), c.center());

        let from_origin = c.scaled_uniformly_by_factor(0.5, ScaleAnchor::Origin);
        assert_relative_eq!(from_origin.radius, 2.0);
        assert!(from_origin.origin.is_equal_to(c.origin, 1e-12));

        let corner = ScaleAnchor::Corner(RectCorner::BottomRight);
        let from_corner = c.scaled_uniformly_by_factor(2.0, corner);
        assert!(
            from_corner
                .anchor_point(corner)
                .is_equal_to(c.anchor_point(corner), 1e-12)
        );
    }

    #[test]
    fn recentering_a_group() {
        let mut circles = vec![circle_at(0.0, 0.0, 1.0), circle_at(10.0, 0.0, 1.0)];
        BoxedCircle::recenter_circles(&mut circles, Point::new(0.0, 0.0));
        assert!(circles[0].center().is_equal_to(Point::new(-5.0, 0.0), 1e-12));
        assert!(circles[1].center().is_equal_to(Point::new(5.0, 0.0), 1e-12));
    }
}
