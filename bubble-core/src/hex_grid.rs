//! Deterministic layouts for small groups of hexagons.
//!
//! Two arrangements are supported:
//! - **triangle** — for 2 or 3 hexagons, a first hexagon plus neighbours
//!   tiled along two consecutive edges.
//! - **flower** — for 4 to 7 hexagons, a center hexagon ringed by up to
//!   six neighbours.
//!
//! The layouts seed the initial positions of a circle packing run (see
//! [`crate::packing`]).

use log::debug;

use crate::error::LayoutError;
use crate::geometry::{BoxedHexagon, Line, Point, Rect, Shape};

/// Largest group [`create_hexagons`] can arrange.
pub const MAX_HEXAGON_COUNT: usize = 7;

/// A laid out group of hexagons plus the box around all of their corners.
#[derive(Clone, Debug, PartialEq)]
pub struct HexagonGroup {
    pub hexagons: Vec<BoxedHexagon>,
    pub bounding_box: Rect,
}

impl HexagonGroup {
    fn from_hexagons(hexagons: Vec<BoxedHexagon>) -> Self {
        let bounding_box = BoxedHexagon::group_bounding_box(&hexagons);
        Self {
            hexagons,
            bounding_box,
        }
    }

    pub fn len(&self) -> usize {
        self.hexagons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hexagons.is_empty()
    }

    /// Centers of the hexagons, in layout order.
    pub fn centers(&self) -> Vec<Point> {
        self.hexagons.iter().map(|h| h.center()).collect()
    }
}

/// Edges of `hexagon`, rotated left by `offset` positions.
fn rotated_edges(hexagon: &BoxedHexagon, offset: usize) -> [Line; 6] {
    let mut edges = hexagon.edge_lines();
    edges.rotate_left(offset % BoxedHexagon::CORNER_COUNT);
    edges
}

/// Three hexagons in a triangle, re-centered on `center`.
///
/// The second and third hexagons are tiled along the first two edges of
/// the first one, after rotating the edge list by `start_edge_offset`.
///
/// ### Parameters
/// - `circum_radius` - Circumradius shared by all hexagons.
/// - `center` - Point the finished group is centered on.
/// - `extra_offset` - Gap added between tiled neighbours.
/// - `start_edge_offset` - How far to rotate the edge list before tiling.
pub fn triangle_arrangement(
    circum_radius: f64,
    center: Point,
    extra_offset: f64,
    start_edge_offset: usize,
) -> Vec<BoxedHexagon> {
    let first = BoxedHexagon::from_center(center, circum_radius);
    let edges = rotated_edges(&first, start_edge_offset);

    let second = first.tiled_alongside_edge(&edges[0], extra_offset);
    let third = first.tiled_alongside_edge(&edges[1], extra_offset);

    let mut hexagons = vec![first, second, third];
    BoxedHexagon::recenter_hexagons(&mut hexagons, center);
    hexagons
}

/// A center hexagon followed by the six neighbours tiled along its edges.
///
/// The ring starts at edge `start_edge_offset`, so trimming the tail of
/// the result removes a different side of the ring for different
/// offsets. The group is *not* re-centered.
///
/// ### Parameters
/// - `circum_radius` - Circumradius shared by all hexagons.
/// - `center` - Center of the middle hexagon.
/// - `extra_offset` - Gap added between tiled neighbours.
/// - `start_edge_offset` - Edge the outer ring starts from.
pub fn flower_arrangement(
    circum_radius: f64,
    center: Point,
    extra_offset: f64,
    start_edge_offset: usize,
) -> Vec<BoxedHexagon> {
    let middle = BoxedHexagon::from_center(center, circum_radius);

    let mut hexagons = Vec::with_capacity(MAX_HEXAGON_COUNT);
    hexagons.push(middle);
    hexagons.extend(
        rotated_edges(&middle, start_edge_offset)
            .iter()
            .map(|edge| middle.tiled_alongside_edge(edge, extra_offset)),
    );
    hexagons
}

/// Lays out `count` hexagons around `center`.
///
/// | count | arrangement | edge offset | re-centered after trimming |
/// |-------|-------------|-------------|----------------------------|
/// | 1     | single      | -           | -                          |
/// | 2     | triangle    | 1           | yes                        |
/// | 3     | triangle    | 0           | no                         |
/// | 4     | flower      | 0           | yes                        |
/// | 5, 6  | flower      | 1           | no                         |
/// | 7     | flower      | 0           | no                         |
///
/// The returned bounding box covers the final hexagon positions.
///
/// ### Returns
/// The hexagon group, or [`LayoutError::UnsupportedHexagonCount`] when
/// `count` is 0 or larger than [`MAX_HEXAGON_COUNT`].
pub fn create_hexagons(
    count: usize,
    circum_radius: f64,
    center: Point,
    extra_offset: f64,
) -> Result<HexagonGroup, LayoutError> {
    let hexagons = match count {
        1 => vec![BoxedHexagon::from_center(center, circum_radius)],
        2 | 3 => {
            let start_edge_offset = if count == 2 { 1 } else { 0 };
            let mut hexagons =
                triangle_arrangement(circum_radius, center, extra_offset, start_edge_offset);
            hexagons.truncate(count);
            if count == 2 {
                BoxedHexagon::recenter_hexagons(&mut hexagons, center);
            }
            hexagons
        }
        4..=MAX_HEXAGON_COUNT => {
            let start_edge_offset = if count == 5 || count == 6 { 1 } else { 0 };
            let mut hexagons =
                flower_arrangement(circum_radius, center, extra_offset, start_edge_offset);
            hexagons.truncate(count);
            if count == 4 {
                BoxedHexagon::recenter_hexagons(&mut hexagons, center);
            }
            hexagons
        }
        _ => return Err(LayoutError::UnsupportedHexagonCount { count }),
    };

    debug!(
        "hex_grid: laid out {} hexagons (R = {:.3}) around {}",
        hexagons.len(),
        circum_radius,
        center
    );

    Ok(HexagonGroup::from_hexagons(hexagons))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tolerance::EPSILON;
    use approx::assert_relative_eq;

    const TOLERANCE: f64 = 1e-9;

    fn touching_pairs(hexagons: &[BoxedHexagon]) -> usize {
        let mut pairs = 0;
        for i in 0..hexagons.len() {
            for j in (i + 1)..hexagons.len() {
                if hexagons[i].is_edge_to_edge_with_other(&hexagons[j], TOLERANCE) {
                    pairs += 1;
                }
            }
        }
        pairs
    }

    #[test]
    fn every_supported_count_yields_that_many_hexagons() {
        for count in 1..=MAX_HEXAGON_COUNT {
            let group = create_hexagons(count, 10.0, Point::new(50.0, 50.0), 0.0).unwrap();
            assert_eq!(group.len(), count);
        }
    }

    #[test]
    fn neighbours_are_edge_to_edge_and_never_overlap() {
        for count in 2..=MAX_HEXAGON_COUNT {
            let group = create_hexagons(count, 10.0, Point::ZERO, 0.0).unwrap();
            let hexagons = &group.hexagons;

            for (i, hexagon) in hexagons.iter().enumerate() {
                let has_neighbour = hexagons
                    .iter()
                    .enumerate()
                    .any(|(j, other)| i != j && hexagon.is_edge_to_edge_with_other(other, TOLERANCE));
                assert!(has_neighbour, "count {count}: hexagon {i} is isolated");

                for other in &hexagons[i + 1..] {
                    assert!(hexagon.distance_to_other(other) >= -TOLERANCE);
                }
            }
        }
    }

    #[test]
    fn flower_ring_touches_the_middle() {
        let group = create_hexagons(7, 10.0, Point::ZERO, 0.0).unwrap();
        let middle = group.hexagons[0];
        assert_eq!(middle.center(), Point::ZERO);
        for outer in &group.hexagons[1..] {
            assert!(middle.is_edge_to_edge_with_other(outer, TOLERANCE));
        }
        // 6 spokes plus 6 ring neighbours
        assert_eq!(touching_pairs(&group.hexagons), 12);
    }

    #[test]
    fn triangle_is_fully_connected() {
        let group = create_hexagons(3, 10.0, Point::ZERO, 0.0).unwrap();
        assert_eq!(touching_pairs(&group.hexagons), 3);
    }

    #[test]
    fn extra_offset_separates_neighbours() {
        let group = create_hexagons(7, 10.0, Point::ZERO, 8.0).unwrap();
        let middle = group.hexagons[0];
        for outer in &group.hexagons[1..] {
            assert_relative_eq!(middle.distance_to_other(outer), 8.0, epsilon = TOLERANCE);
        }
    }

    #[test]
    fn recentered_groups_are_centered() {
        let center = Point::new(120.0, -40.0);
        for count in [2, 3, 4] {
            let group = create_hexagons(count, 10.0, center, 0.0).unwrap();
            assert!(
                group.bounding_box.center().is_equal_to(center, TOLERANCE),
                "count {count}"
            );
        }
    }

    #[test]
    fn bounding_box_covers_every_corner() {
        for count in 1..=MAX_HEXAGON_COUNT {
            let group = create_hexagons(count, 10.0, Point::ZERO, 4.0).unwrap();
            for hexagon in &group.hexagons {
                for corner in hexagon.corner_points() {
                    assert!(group.bounding_box.is_point_inside(corner, EPSILON));
                }
            }
        }
    }

    #[test]
    fn unsupported_counts_fail() {
        assert_eq!(
            create_hexagons(8, 10.0, Point::ZERO, 0.0),
            Err(LayoutError::UnsupportedHexagonCount { count: 8 })
        );
        assert_eq!(
            create_hexagons(0, 10.0, Point::ZERO, 0.0),
            Err(LayoutError::UnsupportedHexagonCount { count: 0 })
        );
    }
}
