//! 2-D geometry primitives.
//!
//! - [`Vector2D`] and [`Point`] wrap `glam::DVec2` arithmetic.
//! - [`Angle`] keeps its unit and converts on demand.
//! - [`Rect`], [`BoxedCircle`] and [`BoxedHexagon`] implement [`Shape`],
//!   which measures signed gaps and scales around a [`ScaleAnchor`].

mod angle;
mod circle;
mod hexagon;
mod line;
mod point;
mod rect;
mod shape;
mod vector;

pub use angle::{Angle, AngleUnit};
pub use circle::BoxedCircle;
pub use hexagon::{BoxedHexagon, HexagonKind};
pub use line::Line;
pub use point::Point;
pub use rect::{Rect, Size};
pub use shape::{RectCorner, ScaleAnchor, Shape};
pub use vector::Vector2D;
