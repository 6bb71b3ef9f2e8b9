use std::thread;

use bubble_core::config::{HexGridConfig, PackingConfig, VariableScaling};
use bubble_core::geometry::{BoxedCircle, Point, Rect, Shape, Size};
use bubble_core::packing::{BubbleLayout, compute_bubble_layout};
use bubble_core::tolerance::EPSILON;

fn container() -> Rect {
    Rect::new(Point::ZERO, Size::new(360.0, 320.0))
}

fn layout(count: usize, cfg: &PackingConfig) -> BubbleLayout {
    compute_bubble_layout(container(), count, &HexGridConfig::default(), cfg).unwrap()
}

#[test]
fn independent_layouts_match_when_computed_in_parallel() {
    let cfg = PackingConfig::default();
    let sequential: Vec<BubbleLayout> = (1..=7).map(|count| layout(count, &cfg)).collect();

    let parallel: Vec<BubbleLayout> = thread::scope(|scope| {
        let workers: Vec<_> = (1..=7)
            .map(|count| {
                let cfg = &cfg;
                scope.spawn(move || layout(count, cfg))
            })
            .collect();
        workers
            .into_iter()
            .map(|worker| worker.join().unwrap())
            .collect()
    });

    assert_eq!(parallel, sequential);
}

#[test]
fn every_focus_state_is_overlap_free_and_centered() {
    let variable = PackingConfig {
        variable_scaling: Some(VariableScaling::default()),
        ..PackingConfig::default()
    };

    for cfg in [PackingConfig::default(), variable] {
        for count in 1..=7 {
            let layout = layout(count, &cfg);
            assert_eq!(layout.resting.len(), count);
            assert_eq!(layout.focused.len(), count);

            for circles in &layout.focused {
                assert_eq!(circles.len(), count);
                let center = BoxedCircle::group_bounding_box(circles).center();
                assert!(center.is_equal_to(layout.frame.center(), 1e-9));

                for (i, a) in circles.iter().enumerate() {
                    for b in &circles[i + 1..] {
                        assert!(a.distance_to_other(b) >= -EPSILON);
                    }
                }
            }
        }
    }
}

#[test]
fn focused_bubble_is_the_largest() {
    let layout = layout(5, &PackingConfig::default());
    for (target, circles) in layout.focused.iter().enumerate() {
        let largest = circles
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.radius.total_cmp(&b.1.radius))
            .map(|(i, _)| i);
        assert_eq!(largest, Some(target));
    }
}
