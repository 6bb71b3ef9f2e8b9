use bubble_core::config::PackingConfig;
use bubble_core::geometry::{Angle, BoxedCircle, Point, Rect, ScaleAnchor, Shape, Size};
use bubble_core::hex_grid::create_hexagons;
use bubble_core::packing::{PackingItem, pack_circles};
use bubble_core::simulation::SimulationOutcome;
use bubble_core::tolerance::EPSILON;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn frame() -> Rect {
    Rect::new(Point::ZERO, Size::new(300.0, 300.0))
}

fn assert_no_overlaps(circles: &[BoxedCircle]) {
    for (i, a) in circles.iter().enumerate() {
        for (j, b) in circles.iter().enumerate().skip(i + 1) {
            let gap = a.distance_to_other(b);
            assert!(gap >= -EPSILON, "circles {i} and {j} overlap by {}", -gap);
        }
    }
}

/// Seven hexagon in-circles, the first one enlarged and heavier.
fn seven_bubbles() -> Vec<PackingItem> {
    let group = create_hexagons(7, 50.0, frame().center(), 8.0).unwrap();
    group
        .hexagons
        .iter()
        .enumerate()
        .map(|(i, hexagon)| {
            let circle = hexagon.in_circle();
            if i == 0 {
                PackingItem::new(circle.scaled_uniformly_by_factor(1.3, ScaleAnchor::Center), 6.0)
            } else {
                PackingItem::new(circle.scaled_uniformly_by_factor(0.8, ScaleAnchor::Center), 1.0)
            }
        })
        .collect()
}

#[test]
fn seven_circles_converge_without_overlap() {
    let cfg = PackingConfig {
        central_attraction_strength: 8.0,
        collision_iterations: 2,
        max_iterations: 100,
        ..PackingConfig::default()
    };
    let items = seven_bubbles();

    let result = pack_circles(frame(), &items, &cfg).unwrap();

    assert!(result.iterations <= 100);
    assert!(matches!(
        result.outcome,
        SimulationOutcome::Stable | SimulationOutcome::IterationCapReached
    ));
    assert_eq!(result.circles.len(), 7);
    for (circle, item) in result.circles.iter().zip(&items) {
        assert_eq!(circle.radius, item.circle.radius);
    }
    assert_no_overlaps(&result.circles);
}

#[test]
fn capped_run_is_settled_to_full_precision() {
    // stopping after a handful of steps under a strong pull leaves deep overlaps
    let cfg = PackingConfig {
        central_attraction_strength: 60.0,
        collision_iterations: 1,
        max_iterations: 5,
        ..PackingConfig::default()
    };
    let items = seven_bubbles();

    let result = pack_circles(frame(), &items, &cfg).unwrap();

    assert_eq!(result.outcome, SimulationOutcome::IterationCapReached);
    assert_no_overlaps(&result.circles);
    for circle in &result.circles {
        assert!(frame().is_point_inside(circle.center(), EPSILON));
    }
}

#[test]
fn random_crowds_are_separated() {
    let mut rng = StdRng::seed_from_u64(7);
    let cfg = PackingConfig::default();

    for _ in 0..10 {
        let count = rng.random_range(2..=7);
        let items: Vec<PackingItem> = (0..count)
            .map(|_| {
                let center = Point::new(rng.random_range(120.0..180.0), rng.random_range(120.0..180.0));
                let radius = rng.random_range(15.0..35.0);
                PackingItem::new(BoxedCircle::from_center(center, radius), 1.0)
            })
            .collect();

        let result = pack_circles(frame(), &items, &cfg).unwrap();
        assert_eq!(result.circles.len(), count);
        assert_no_overlaps(&result.circles);
    }
}

#[test]
fn rotation_round_trip_restores_centers() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..20 {
        let pivot = Point::new(rng.random_range(-200.0..200.0), rng.random_range(-200.0..200.0));
        let degrees = rng.random_range(-720.0..720.0);

        let seeded: Vec<BoxedCircle> = (0..rng.random_range(1..10))
            .map(|_| {
                let center =
                    Point::new(rng.random_range(-500.0..500.0), rng.random_range(-500.0..500.0));
                BoxedCircle::from_center(center, rng.random_range(1.0..50.0))
            })
            .collect();

        let mut circles = seeded.clone();
        BoxedCircle::rotate_circles(&mut circles, pivot, Angle::from_degrees(degrees));
        BoxedCircle::rotate_circles(&mut circles, pivot, Angle::from_degrees(-degrees));

        for (back, before) in circles.iter().zip(&seeded) {
            assert!(back.center().is_equal_to(before.center(), 1e-6));
            assert_eq!(back.radius, before.radius);
        }
    }
}
