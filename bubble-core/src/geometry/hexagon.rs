use serde::{Deserialize, Serialize};

use crate::geometry::shape::scaled_center;
use crate::geometry::{Angle, BoxedCircle, Line, Point, Rect, ScaleAnchor, Shape, Vector2D};

/// Orientation presets for [`BoxedHexagon`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HexagonKind {
    /// Corners at 0°, 60°, 120°, …
    FlatTopped,
    /// Corners at 30°, 90°, 150°, …
    PointyTopped,
}

impl HexagonKind {
    pub fn start_angle_offset(self) -> Angle {
        match self {
            HexagonKind::FlatTopped => Angle::from_degrees(0.0),
            HexagonKind::PointyTopped => Angle::from_degrees(30.0),
        }
    }
}

/// A regular hexagon anchored like [`BoxedCircle`]: `origin` is the
/// top-left corner of its circumscribed circle's box.
///
/// The six corners sit on the circumcircle at 60° steps, starting one
/// step after `start_angle_offset`. Only the circumradius is stored, so
/// the hexagon cannot become irregular.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoxedHexagon {
    pub origin: Point,
    pub circum_radius: f64,
    pub start_angle_offset: Angle,
}

impl BoxedHexagon {
    pub const CORNER_COUNT: usize = 6;

    pub fn from_center(center: Point, circum_radius: f64) -> Self {
        Self {
            origin: Point::new(center.x - circum_radius, center.y - circum_radius),
            circum_radius,
            start_angle_offset: Angle::from_degrees(0.0),
        }
    }

    pub fn from_origin(origin: Point, circum_radius: f64) -> Self {
        Self {
            origin,
            circum_radius,
            start_angle_offset: Angle::from_degrees(0.0),
        }
    }

    pub fn with_kind(mut self, kind: HexagonKind) -> Self {
        self.start_angle_offset = kind.start_angle_offset();
        self
    }

    /// Distance between two adjacent corners.
    pub fn side_length(&self) -> f64 {
        self.circum_radius
    }

    pub fn perimeter(&self) -> f64 {
        self.circum_radius * 6.0
    }

    /// Distance from the center to the midpoint of an edge.
    pub fn in_radius(&self) -> f64 {
        self.circum_radius * 3f64.sqrt() / 2.0
    }

    pub fn apothem(&self) -> f64 {
        self.in_radius()
    }

    pub fn area(&self) -> f64 {
        self.perimeter() * self.apothem() / 2.0
    }

    pub fn in_circle(&self) -> BoxedCircle {
        BoxedCircle::from_center(self.center(), self.in_radius())
    }

    pub fn circum_circle(&self) -> BoxedCircle {
        BoxedCircle::from_origin(self.origin, self.circum_radius)
    }

    /// Corner angles, 60° apart, starting one step past the offset.
    pub fn angles(&self) -> [Angle; 6] {
        let start = self.start_angle_offset.degrees();
        std::array::from_fn(|i| Angle::from_degrees(start + 60.0 * (i + 1) as f64))
    }

    pub fn corner_points(&self) -> [Point; 6] {
        let center = self.center();
        self.angles()
            .map(|angle| angle.point_along_circle(self.circum_radius, center, false))
    }

    /// Edge `i` runs from corner `i` to corner `i + 1` (wrapping).
    pub fn edge_lines(&self) -> [Line; 6] {
        let corners = self.corner_points();
        std::array::from_fn(|i| Line::new(corners[i], corners[(i + 1) % Self::CORNER_COUNT]))
    }

    /// Extent of the corners along `axis`, as `(min, max)`.
    fn projected_onto(&self, axis: Vector2D) -> (f64, f64) {
        self.corner_points()
            .iter()
            .map(|corner| corner.as_vector().dot(axis))
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), d| {
                (lo.min(d), hi.max(d))
            })
    }

    pub fn edge_midpoints(&self) -> [Point; 6] {
        self.edge_lines().map(|edge| edge.midpoint())
    }

    /// Hexagon of the same size sharing `edge` with this one.
    ///
    /// The new center lies on the ray from this center through the edge
    /// midpoint, at twice the apothem plus `extra_offset`. With a zero
    /// offset the two hexagons are exactly edge-to-edge.
    pub fn tiled_alongside_edge(&self, edge: &Line, extra_offset: f64) -> BoxedHexagon {
        let apothem_line = Line::new(self.center(), edge.midpoint());
        let next_center = apothem_line.point_at_distance(apothem_line.length() * 2.0 + extra_offset);

        BoxedHexagon {
            start_angle_offset: self.start_angle_offset,
            ..BoxedHexagon::from_center(next_center, self.circum_radius)
        }
    }

    pub fn translated_by(&self, offset: Vector2D) -> BoxedHexagon {
        BoxedHexagon {
            origin: self.origin + offset,
            ..*self
        }
    }

    /// Rotates the hexagon about its own center.
    pub fn rotated_by(&self, angle: Angle) -> BoxedHexagon {
        BoxedHexagon {
            start_angle_offset: self.start_angle_offset + angle,
            ..*self
        }
    }

    /// Bounding box of every corner of every hexagon in the group.
    pub fn group_bounding_box(hexagons: &[BoxedHexagon]) -> Rect {
        let corners: Vec<Point> = hexagons.iter().flat_map(|h| h.corner_points()).collect();
        Point::bounding_box(&corners)
    }

    /// Translates the group so the center of its bounding box lands on `center`.
    pub fn recenter_hexagons(hexagons: &mut [BoxedHexagon], center: Point) {
        if hexagons.is_empty() {
            return;
        }
        let offset = center - Self::group_bounding_box(hexagons).center();
        for hexagon in hexagons.iter_mut() {
            hexagon.origin = hexagon.origin + offset;
        }
    }
}

impl Shape for BoxedHexagon {
    fn origin(&self) -> Point {
        self.origin
    }

    fn center(&self) -> Point {
        self.origin + Vector2D::new(self.circum_radius, self.circum_radius)
    }

    fn set_center(&mut self, center: Point) {
        self.origin = Point::new(center.x - self.circum_radius, center.y - self.circum_radius);
    }

    fn bounding_box(&self) -> Rect {
        Point::bounding_box(&self.corner_points())
    }

    /// Exact convex polygon test: the point must not lie outside any edge.
    fn is_point_inside(&self, point: Point, tolerance: f64) -> bool {
        // corners run counter-clockwise, so inside is to the left of every edge
        self.edge_lines().iter().all(|edge| {
            let along = edge.end - edge.start;
            let to_point = point - edge.start;
            along.cross(to_point) / along.magnitude() >= -tolerance
        })
    }

    /// Exact signed gap between the two polygons.
    ///
    /// Overlapping hexagons return the negated penetration depth along the
    /// best separating edge normal. Disjoint ones return the shortest
    /// corner-to-edge distance.
    fn distance_to_other(&self, other: &Self) -> f64 {
        let separation = self
            .edge_lines()
            .iter()
            .chain(other.edge_lines().iter())
            .map(|edge| {
                let axis = edge.direction().perpendicular();
                let (min_a, max_a) = self.projected_onto(axis);
                let (min_b, max_b) = other.projected_onto(axis);
                (min_b - max_a).max(min_a - max_b)
            })
            .fold(f64::NEG_INFINITY, f64::max);

        if separation <= 0.0 {
            return separation;
        }

        let nearest_corner = |corners: [Point; 6], edges: [Line; 6]| {
            corners
                .iter()
                .flat_map(|&corner| edges.iter().map(move |edge| edge.distance_to_point(corner)))
                .fold(f64::INFINITY, f64::min)
        };
        nearest_corner(self.corner_points(), other.edge_lines())
            .min(nearest_corner(other.corner_points(), self.edge_lines()))
    }

    fn scale_uniformly_by_factor(&mut self, factor: f64, anchor: ScaleAnchor) {
        let anchor_point = self.anchor_point(anchor);
        let center = scaled_center(self.center(), anchor_point, factor);

        self.circum_radius *= factor;
        self.set_center(center);
    }
}
