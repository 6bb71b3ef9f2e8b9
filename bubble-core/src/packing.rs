//! Circle packing on top of [`OfflineSimulation`].
//!
//! A packing run turns each circle into a particle, pulls everything
//! towards the frame center with a [`CentralAttractionForce`] and lets
//! collision resolution push overlapping circles apart until the system
//! settles or the iteration cap is hit. Any residual overlap left by a
//! capped run is then cleared with position-only separation rounds.
//!
//! [`compute_bubble_layout`] builds the full "one bubble grows, the
//! others shrink" layout set for a container: one packing per bubble.

use log::debug;

use crate::config::{HexGridConfig, PackingConfig};
use crate::error::PackingError;
use crate::geometry::{Angle, BoxedCircle, Rect, ScaleAnchor, Shape, Vector2D};
use crate::hex_grid::{HexagonGroup, create_hexagons};
use crate::physics::{CentralAttractionForce, Particle, PhysicsEngine};
use crate::simulation::{OfflineSimulation, SimulationOutcome};
use crate::tolerance::EPSILON;

/// One circle to pack and how hard it is to push around.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PackingItem {
    pub circle: BoxedCircle,
    /// Zero pins the circle in place.
    pub mass: f64,
}

impl PackingItem {
    pub fn new(circle: BoxedCircle, mass: f64) -> Self {
        Self { circle, mass }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PackingResult {
    /// Final circles, in input order.
    pub circles: Vec<BoxedCircle>,
    pub bounding_box: Rect,
    pub iterations: usize,
    pub outcome: SimulationOutcome,
}

/// An offline simulation preconfigured for circle packing in `frame`.
pub struct CirclePacking {
    simulation: OfflineSimulation<BoxedCircle>,
    settle_rounds: usize,
}

impl CirclePacking {
    /// Engine with a central attraction towards `frame.center()`, world
    /// bounds set to `frame`, and the step settings from `cfg`.
    pub fn new(frame: Rect, cfg: &PackingConfig) -> Self {
        let mut engine = PhysicsEngine::from_config(&cfg.engine_config());
        engine.set_world_bounds(Some(frame));
        engine.add_force(CentralAttractionForce::new(
            Vector2D::from(frame.center()),
            cfg.central_attraction_strength,
        ));

        Self {
            simulation: OfflineSimulation::new(engine, &cfg.simulation_config()),
            settle_rounds: cfg.settle_rounds,
        }
    }

    /// Adds a circle as a particle centered on the circle's center.
    pub fn add_item(&mut self, id: usize, item: PackingItem) {
        let position = Vector2D::from(item.circle.center());
        self.simulation
            .add_particle(Particle::new(id, position, item.mass, item.circle));
    }

    pub fn simulation(&self) -> &OfflineSimulation<BoxedCircle> {
        &self.simulation
    }

    pub fn simulation_mut(&mut self) -> &mut OfflineSimulation<BoxedCircle> {
        &mut self.simulation
    }

    /// Runs to completion, clears residual overlaps and reads the
    /// circles back in insertion order.
    pub fn run(mut self) -> PackingResult {
        let outcome = self.simulation.run();
        let iterations = self.simulation.iteration_count();

        self.simulation
            .engine_mut()
            .settle_overlaps(self.settle_rounds, EPSILON);

        let circles = self.simulation.engine().shapes();
        let bounding_box = BoxedCircle::group_bounding_box(&circles);

        PackingResult {
            circles,
            bounding_box,
            iterations,
            outcome,
        }
    }
}

fn validate(items: &[PackingItem]) -> Result<(), PackingError> {
    if items.is_empty() {
        return Err(PackingError::NoItems);
    }
    for (index, item) in items.iter().enumerate() {
        let radius = item.circle.radius;
        if !radius.is_finite() || radius <= 0.0 {
            return Err(PackingError::InvalidRadius { index, radius });
        }
        if !item.mass.is_finite() || item.mass < 0.0 {
            return Err(PackingError::InvalidMass {
                index,
                mass: item.mass,
            });
        }
    }
    Ok(())
}

/// Packs `items` inside `frame`.
///
/// Particle ids are the item indices, and the result lists circles in
/// the same order as `items`.
///
/// ### Parameters
/// - `frame` - World bounds; its center is the attraction point.
/// - `items` - Circles to pack, with their masses.
/// - `cfg` - Force strength, step size, iteration limits.
///
/// ### Returns
/// The packed circles, or a [`PackingError`] for an empty input or a
/// non-positive radius or negative mass.
pub fn pack_circles(
    frame: Rect,
    items: &[PackingItem],
    cfg: &PackingConfig,
) -> Result<PackingResult, PackingError> {
    validate(items)?;

    let mut packing = CirclePacking::new(frame, cfg);
    for (id, item) in items.iter().enumerate() {
        packing.add_item(id, *item);
    }
    Ok(packing.run())
}

/// Maps `value` from `[in_start, in_end]` onto `[out_start, out_end]`
/// without clamping. A degenerate input range maps to `out_start`.
pub fn ranged_lerp(value: f64, in_start: f64, in_end: f64, out_start: f64, out_end: f64) -> f64 {
    let span = in_end - in_start;
    if span == 0.0 {
        return out_start;
    }
    out_start + (value - in_start) / span * (out_end - out_start)
}

/// Everything needed to draw a group of bubbles and animate between
/// their focus states.
#[derive(Clone, Debug, PartialEq)]
pub struct BubbleLayout {
    /// Seed hexagons for the resting layout.
    pub hexagons: HexagonGroup,
    /// Inscribed circles of the hexagons; the unfocused layout.
    pub resting: Vec<BoxedCircle>,
    /// The container inset by the frame margin.
    pub frame: Rect,
    /// `focused[i]` is the layout where bubble `i` is enlarged.
    pub focused: Vec<Vec<BoxedCircle>>,
}

/// Scale factor and mass for every bubble when `target` is focused.
fn focus_items(resting: &[BoxedCircle], target: usize, cfg: &PackingConfig) -> Vec<PackingItem> {
    let count = resting.len();
    let mut rank = 0;

    resting
        .iter()
        .enumerate()
        .map(|(index, circle)| {
            if index == target {
                let scaled = circle.scaled_uniformly_by_factor(cfg.target_scale(), ScaleAnchor::Center);
                return PackingItem::new(scaled, (count - 1) as f64);
            }

            rank += 1;
            let factor = match cfg.variable_scaling {
                Some(range) => ranged_lerp(rank as f64, 1.0, count as f64, range.start, range.end),
                None => cfg.scale_down,
            };
            PackingItem::new(circle.scaled_uniformly_by_factor(factor, ScaleAnchor::Center), 1.0)
        })
        .collect()
}

/// Computes the resting layout and one focused layout per bubble.
///
/// 1. Lay out `count` hexagons centered in `container`, sized so
///    `circles_per_row` of them span its width.
/// 2. Take their inscribed circles as the resting layout.
/// 3. For each bubble, pack the group with that bubble scaled up (and
///    made heavier) and the others scaled down.
/// 4. Re-center each packed group on the frame; groups of seven are also
///    rotated about the center and re-centered again.
///
/// ### Returns
/// The layout, or an error if `count` is not in `1..=7`.
pub fn compute_bubble_layout(
    container: Rect,
    count: usize,
    hex_cfg: &HexGridConfig,
    cfg: &PackingConfig,
) -> Result<BubbleLayout, PackingError> {
    let circum_radius = hex_cfg.circum_radius(container.width(), count);
    let hexagons = create_hexagons(
        count,
        circum_radius,
        container.center(),
        hex_cfg.extra_position_offset,
    )?;

    let frame = container.inset_horizontally(cfg.frame_margin);
    let resting: Vec<BoxedCircle> = hexagons.hexagons.iter().map(|h| h.in_circle()).collect();

    let mut focused = Vec::with_capacity(count);
    for target in 0..count {
        let items = focus_items(&resting, target, cfg);
        let result = pack_circles(frame, &items, cfg)?;
        debug!(
            "packing: bubble {target}/{count} finished as {:?} after {} iterations",
            result.outcome, result.iterations
        );

        let mut circles = result.circles;
        BoxedCircle::recenter_circles(&mut circles, frame.center());

        if count == 7
            && let Some(degrees) = cfg.seven_group_rotation_degrees
        {
            BoxedCircle::rotate_circles(&mut circles, frame.center(), Angle::from_degrees(degrees));
            BoxedCircle::recenter_circles(&mut circles, frame.center());
        }

        focused.push(circles);
    }

    Ok(BubbleLayout {
        hexagons,
        resting,
        frame,
        focused,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VariableScaling;
    use crate::error::LayoutError;
    use crate::geometry::{Point, Size};
    use approx::assert_relative_eq;

    fn frame() -> Rect {
        Rect::new(Point::ZERO, Size::new(300.0, 300.0))
    }

    fn item(x: f64, y: f64, radius: f64, mass: f64) -> PackingItem {
        PackingItem::new(BoxedCircle::from_center(Point::new(x, y), radius), mass)
    }

    #[test]
    fn rejects_bad_input() {
        let cfg = PackingConfig::default();
        assert_eq!(pack_circles(frame(), &[], &cfg), Err(PackingError::NoItems));
        assert_eq!(
            pack_circles(frame(), &[item(0.0, 0.0, 1.0, 1.0), item(0.0, 0.0, 0.0, 1.0)], &cfg),
            Err(PackingError::InvalidRadius {
                index: 1,
                radius: 0.0
            })
        );
        assert!(matches!(
            pack_circles(frame(), &[item(0.0, 0.0, 1.0, -1.0)], &cfg),
            Err(PackingError::InvalidMass { index: 0, .. })
        ));
    }

    #[test]
    fn two_overlapping_circles_end_up_apart_in_input_order() {
        let cfg = PackingConfig::default();
        let items = [item(150.0, 150.0, 30.0, 1.0), item(160.0, 150.0, 30.0, 1.0)];
        let result = pack_circles(frame(), &items, &cfg).unwrap();

        assert_eq!(result.circles.len(), 2);
        assert!(result.iterations <= cfg.max_iterations);
        assert!(result.circles[0].distance_to_other(&result.circles[1]) >= -EPSILON);
        assert!(result.circles[0].center().x < result.circles[1].center().x);
        assert_relative_eq!(result.circles[0].radius, 30.0);
    }

    #[test]
    fn pinned_circle_does_not_move() {
        let cfg = PackingConfig::default();
        let items = [item(100.0, 150.0, 30.0, 0.0), item(120.0, 150.0, 30.0, 1.0)];
        let result = pack_circles(frame(), &items, &cfg).unwrap();

        assert_eq!(result.circles[0].center(), Point::new(100.0, 150.0));
        assert!(result.circles[0].distance_to_other(&result.circles[1]) >= -EPSILON);
    }

    #[test]
    fn ranged_lerp_maps_linearly() {
        assert_relative_eq!(ranged_lerp(1.0, 1.0, 7.0, 0.6, 1.1), 0.6);
        assert_relative_eq!(ranged_lerp(7.0, 1.0, 7.0, 0.6, 1.1), 1.1);
        assert_relative_eq!(ranged_lerp(4.0, 1.0, 7.0, 0.6, 1.1), 0.85);
        assert_relative_eq!(ranged_lerp(3.0, 1.0, 1.0, 0.6, 1.1), 0.6);
    }

    #[test]
    fn focus_scales_the_target_up_and_the_rest_down() {
        let resting: Vec<BoxedCircle> = (0..4)
            .map(|i| BoxedCircle::from_center(Point::new(i as f64 * 50.0, 0.0), 10.0))
            .collect();

        let items = focus_items(&resting, 2, &PackingConfig::default());
        assert_relative_eq!(items[2].circle.radius, 13.0);
        assert_eq!(items[2].mass, 3.0);
        assert!(items[2].circle.center().is_equal_to(resting[2].center(), 1e-12));
        for i in [0, 1, 3] {
            assert_relative_eq!(items[i].circle.radius, 8.0);
            assert_eq!(items[i].mass, 1.0);
        }

        let variable = PackingConfig {
            variable_scaling: Some(VariableScaling::default()),
            ..PackingConfig::default()
        };
        let items = focus_items(&resting, 0, &variable);
        assert_relative_eq!(items[0].circle.radius, 14.0);
        // ranks 1, 2, 3 over 1..=4
        assert_relative_eq!(items[1].circle.radius, 6.0, epsilon = 1e-12);
        assert_relative_eq!(items[3].circle.radius, 6.0 + 10.0 * (2.0 / 3.0) * 0.5, epsilon = 1e-12);
    }

    #[test]
    fn bubble_layout_has_one_focus_state_per_bubble() {
        let container = Rect::new(Point::ZERO, Size::new(300.0, 300.0));
        let layout =
            compute_bubble_layout(container, 4, &HexGridConfig::default(), &PackingConfig::default())
                .unwrap();

        assert_eq!(layout.resting.len(), 4);
        assert_eq!(layout.focused.len(), 4);
        assert_relative_eq!(layout.frame.width(), 284.0);

        for circles in &layout.focused {
            assert_eq!(circles.len(), 4);
            let center = BoxedCircle::group_bounding_box(circles).center();
            assert!(center.is_equal_to(layout.frame.center(), 1e-9));
        }
    }

    #[test]
    fn bubble_layout_rejects_unsupported_counts() {
        let container = Rect::new(Point::ZERO, Size::new(300.0, 300.0));
        let result =
            compute_bubble_layout(container, 8, &HexGridConfig::default(), &PackingConfig::default());
        assert_eq!(
            result,
            Err(PackingError::Layout(LayoutError::UnsupportedHexagonCount { count: 8 }))
        );
    }
}
