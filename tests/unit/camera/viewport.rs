use super::*;
use crate::curve::generator::{CurveSpec, generate_curve};
use crate::playback::schedule::PhaseKind;

fn curve() -> Curve {
    generate_curve(&CurveSpec {
        turns: 113.0,
        samples: 2048,
        ..CurveSpec::default()
    })
    .unwrap()
}

fn phase(kind: PhaseKind, half_width: f64) -> PhaseSpec {
    PhaseSpec {
        kind,
        duration: 1.0,
        speed: 1.0,
        half_width,
    }
}

#[test]
fn wide_phase_ignores_the_tip() {
    let c = curve();
    let v = select_viewport(&phase(PhaseKind::Wide, 2.5), &c, 1500);
    assert_eq!(v, Viewport::centered(2.5));
    assert_eq!(v.x_range(), (-2.5, 2.5));
    assert_eq!(v.y_range(), (-2.5, 2.5));
}

#[test]
fn following_phases_center_on_the_last_revealed_point() {
    let c = curve();
    for (kind, hw) in [(PhaseKind::Medium, 1.0), (PhaseKind::Close, 0.2)] {
        let v = select_viewport(&phase(kind, hw), &c, 700);
        assert_eq!(v.center, c.point(699).unwrap());
        assert_eq!(v.half_width, hw);
    }
}

#[test]
fn following_phase_with_nothing_revealed_centers_on_origin() {
    let c = curve();
    let v = select_viewport(&phase(PhaseKind::Close, 0.4), &c, 0);
    assert_eq!(v.center, Point::ORIGIN);
    assert_eq!(v.half_width, 0.4);
}

#[test]
fn contains_includes_edges() {
    let v = Viewport {
        center: Point::new(1.0, -1.0),
        half_width: 0.5,
    };
    assert!(v.contains(Point::new(1.5, -0.5)));
    assert!(v.contains(Point::new(0.5, -1.5)));
    assert!(!v.contains(Point::new(1.6, -1.0)));
    assert_eq!(v.rect(), Rect::new(0.5, -1.5, 1.5, -0.5));
}

#[test]
fn canvas_affine_maps_viewport_into_shorter_side() {
    let canvas = Canvas {
        width: 800,
        height: 1200,
    };
    let v = Viewport {
        center: Point::new(1.0, 1.0),
        half_width: 0.5,
    };
    let a = v.to_canvas_affine(canvas);

    let c = a * v.center;
    assert!((c.x - 400.0).abs() < 1e-9 && (c.y - 600.0).abs() < 1e-9);

    // Right edge lands on the canvas edge; y grows upward.
    let right = a * Point::new(1.5, 1.0);
    assert!((right.x - 800.0).abs() < 1e-9);
    let top = a * Point::new(1.0, 1.5);
    assert!((top.y - 200.0).abs() < 1e-9);

    let vis = v.visible_rect(canvas);
    assert!((vis.width() - 1.0).abs() < 1e-9);
    assert!((vis.height() - 1.5).abs() < 1e-9);
}
