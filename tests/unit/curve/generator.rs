use super::*;

fn spec(turns: f64, samples: usize) -> CurveSpec {
    CurveSpec {
        turns,
        samples,
        ..CurveSpec::default()
    }
}

#[test]
fn generation_is_deterministic() {
    let a = generate_curve(&spec(113.0, 4096)).unwrap();
    let b = generate_curve(&spec(113.0, 4096)).unwrap();
    assert_eq!(a.points(), b.points());
    assert_eq!(a.len(), 4096);
}

#[test]
fn first_sample_is_two_on_the_real_axis() {
    let c = generate_curve(&spec(113.0, 10)).unwrap();
    assert_eq!(c.point(0), Some(Point::new(2.0, 0.0)));
}

#[test]
fn last_sample_lands_on_the_sweep_end() {
    let s = spec(3.0, 7);
    let last = s.theta_at(6);
    assert_eq!(last, (3.0f64 * 360.0).to_radians());
    let c = generate_curve(&s).unwrap();
    let expected = spiral_point(last, std::f64::consts::PI);
    assert_eq!(c.point(6), Some(expected));
}

#[test]
fn samples_are_uniform_in_angle() {
    let s = spec(1.0, 5);
    let step = s.theta_at(1) - s.theta_at(0);
    for i in 1..4 {
        let d = s.theta_at(i + 1) - s.theta_at(i);
        assert!((d - step).abs() < 1e-12);
    }
    assert!((step - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
}

#[test]
fn points_stay_within_radius_two() {
    let c = generate_curve(&spec(113.0, 20_000)).unwrap();
    for p in c.points() {
        assert!(p.to_vec2().hypot() <= 2.0 + 1e-12);
    }
    let b = c.bounds();
    assert!(b.x0 >= -2.0 - 1e-12 && b.x1 <= 2.0 + 1e-12);
    assert!(b.y0 >= -2.0 - 1e-12 && b.y1 <= 2.0 + 1e-12);
}

#[test]
fn single_sample_and_zero_turns_are_degenerate_but_valid() {
    let one = generate_curve(&spec(113.0, 1)).unwrap();
    assert_eq!(one.points(), &[Point::new(2.0, 0.0)]);

    let still = generate_curve(&spec(0.0, 4)).unwrap();
    assert!(still.points().iter().all(|p| *p == Point::new(2.0, 0.0)));
}

#[test]
fn invalid_specs_are_rejected() {
    assert!(generate_curve(&spec(113.0, 0)).is_err());
    assert!(generate_curve(&spec(-1.0, 10)).is_err());
    assert!(generate_curve(&spec(f64::NAN, 10)).is_err());
    let bad_ratio = CurveSpec {
        ratio: f64::INFINITY,
        ..CurveSpec::default()
    };
    assert!(bad_ratio.validate().is_err());
}

#[test]
fn ratio_defaults_to_pi_when_omitted() {
    let s: CurveSpec = serde_json::from_str(r#"{"turns": 2.0, "samples": 8}"#).unwrap();
    assert_eq!(s.ratio, std::f64::consts::PI);
}
