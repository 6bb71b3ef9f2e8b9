use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};

/// One of the four corners of an axis-aligned rectangle.
///
/// "Top" is the minimum-y side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RectCorner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// The point that stays fixed while a shape is scaled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScaleAnchor {
    /// The shape's origin (top-left of its box).
    Origin,
    /// The shape's center.
    Center,
    /// A corner of the shape's bounding box.
    Corner(RectCorner),
}

/// Common capabilities of the boxed shapes.
///
/// Distances are *signed gaps*: negative while the shapes overlap, zero
/// when they touch and positive once they are apart. Every predicate is
/// derived from that gap and compared against an explicit tolerance
/// (usually [`crate::tolerance::EPSILON`]).
///
/// Generic code such as [`crate::physics::Particle`] and
/// [`crate::physics::PhysicsEngine`] is written against this trait only.
pub trait Shape: Clone + Debug {
    /// Top-left corner of the box the shape is anchored to.
    fn origin(&self) -> Point;

    fn center(&self) -> Point;

    /// Moves the shape so its center lands on `center`, keeping its size.
    fn set_center(&mut self, center: Point);

    fn bounding_box(&self) -> Rect;

    fn is_point_inside(&self, point: Point, tolerance: f64) -> bool;

    /// Signed gap between `self` and `other`.
    fn distance_to_other(&self, other: &Self) -> f64;

    /// Scales the shape by `factor`, keeping the `anchor` point fixed.
    fn scale_uniformly_by_factor(&mut self, factor: f64, anchor: ScaleAnchor);

    /// `true` if the shapes overlap or touch (boundary inclusive).
    fn is_colliding_with_other(&self, other: &Self, tolerance: f64) -> bool {
        self.distance_to_other(other) <= tolerance
    }

    /// `true` if the shapes touch without overlapping, within `tolerance`.
    fn is_edge_to_edge_with_other(&self, other: &Self, tolerance: f64) -> bool {
        self.distance_to_other(other).abs() < tolerance
    }

    fn scaled_uniformly_by_factor(&self, factor: f64, anchor: ScaleAnchor) -> Self {
        let mut copy = self.clone();
        copy.scale_uniformly_by_factor(factor, anchor);
        copy
    }

    /// Absolute position of `anchor` for this shape.
    fn anchor_point(&self, anchor: ScaleAnchor) -> Point {
        match anchor {
            ScaleAnchor::Origin => self.origin(),
            ScaleAnchor::Center => self.center(),
            ScaleAnchor::Corner(corner) => self.bounding_box().corner(corner),
        }
    }
}

/// Where the center of a shape ends up after scaling by `factor` around
/// `anchor`. Shared by the shape impls so they all agree on the anchor
/// staying put.
pub(crate) fn scaled_center(center: Point, anchor: Point, factor: f64) -> Point {
    anchor + (center - anchor) * factor
}
