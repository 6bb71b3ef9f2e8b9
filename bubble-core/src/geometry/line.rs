use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Vector2D};

/// A directed line segment.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub start: Point,
    pub end: Point,
}

impl Line {
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(self.end)
    }

    pub fn midpoint(&self) -> Point {
        self.start.midpoint(self.end)
    }

    /// Unit vector from `start` towards `end` (zero for a degenerate line).
    pub fn direction(&self) -> Vector2D {
        (self.end - self.start).normalized()
    }

    /// Point reached by walking `distance` from `start` along the ray
    /// through `end`. The distance is absolute, not relative to
    /// [`Line::length`], so it may land past `end`.
    pub fn point_at_distance(&self, distance: f64) -> Point {
        self.start + self.direction() * distance
    }

    /// Shortest distance from `point` to any point of the segment.
    pub fn distance_to_point(&self, point: Point) -> f64 {
        let along = self.end - self.start;
        let length_squared = along.magnitude_squared();
        if length_squared == 0.0 {
            return self.start.distance_to(point);
        }
        let t = ((point - self.start).dot(along) / length_squared).clamp(0.0, 1.0);
        (self.start + along * t).distance_to(point)
    }
}
