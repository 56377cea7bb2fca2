use super::*;
use crate::curve::generator::{CurveSpec, generate_curve};
use kurbo::PathEl;

fn canvas() -> Canvas {
    Canvas {
        width: 200,
        height: 100,
    }
}

fn curve(samples: usize) -> Curve {
    generate_curve(&CurveSpec {
        turns: 113.0,
        samples,
        ..CurveSpec::default()
    })
    .unwrap()
}

fn count_lines(path: &BezPath) -> usize {
    path.elements()
        .iter()
        .filter(|el| matches!(el, PathEl::LineTo(_)))
        .count()
}

fn no_cull() -> SceneOpts {
    SceneOpts {
        cull_offscreen: false,
        min_segment_px: 0.0,
    }
}

#[test]
fn nothing_revealed_draws_nothing() {
    let c = curve(100);
    let s = build_scene(
        &c,
        0,
        &Viewport::centered(2.5),
        canvas(),
        &Style::default(),
        SceneOpts::default(),
    );
    assert!(s.trail.elements().is_empty());
    assert!(s.marker.is_none());
    assert_eq!(s.background, Style::default().background);
}

#[test]
fn wide_view_keeps_every_segment_without_decimation() {
    let c = curve(100);
    let s = build_scene(
        &c,
        50,
        &Viewport::centered(2.5),
        canvas(),
        &Style::default(),
        no_cull(),
    );
    assert_eq!(count_lines(&s.trail), 49);
    assert!(matches!(s.trail.elements()[0], PathEl::MoveTo(_)));
}

#[test]
fn marker_sits_on_the_last_revealed_point() {
    let c = curve(100);
    let v = Viewport::centered(2.5);
    let s = build_scene(&c, 10, &v, canvas(), &Style::default(), no_cull());
    let m = s.marker.unwrap();
    let expected = v.to_canvas_affine(canvas()) * c.point(9).unwrap();
    assert_eq!(m.center, expected);
    assert_eq!(m.radius, Style::default().marker_radius);
}

#[test]
fn zero_radius_hides_the_marker() {
    let c = curve(100);
    let style = Style {
        marker_radius: 0.0,
        ..Style::default()
    };
    let s = build_scene(
        &c,
        10,
        &Viewport::centered(2.5),
        canvas(),
        &style,
        no_cull(),
    );
    assert!(s.marker.is_none());
}

#[test]
fn revealed_beyond_curve_is_clamped() {
    let c = curve(20);
    let s = build_scene(
        &c,
        500,
        &Viewport::centered(2.5),
        canvas(),
        &Style::default(),
        no_cull(),
    );
    assert_eq!(count_lines(&s.trail), 19);
}

#[test]
fn culling_drops_offscreen_segments_when_zoomed_in() {
    let c = curve(20_000);
    let v = Viewport {
        center: c.point(9_999).unwrap(),
        half_width: 0.05,
    };
    let full = build_scene(&c, 10_000, &v, canvas(), &Style::default(), no_cull());
    let culled = build_scene(
        &c,
        10_000,
        &v,
        canvas(),
        &Style::default(),
        SceneOpts {
            cull_offscreen: true,
            min_segment_px: 0.0,
        },
    );
    assert!(count_lines(&culled.trail) > 0);
    assert!(count_lines(&culled.trail) < count_lines(&full.trail));
}

#[test]
fn decimation_keeps_the_final_point() {
    let c = curve(50_000);
    let v = Viewport::centered(2.5);
    let s = build_scene(
        &c,
        50_000,
        &v,
        canvas(),
        &Style::default(),
        SceneOpts {
            cull_offscreen: false,
            min_segment_px: 5.0,
        },
    );
    let last = match s.trail.elements().last() {
        Some(PathEl::LineTo(p)) => *p,
        other => panic!("unexpected last element: {other:?}"),
    };
    assert_eq!(last, v.to_canvas_affine(canvas()) * c.point(49_999).unwrap());
    assert!(count_lines(&s.trail) < 49_999);
}
