use super::*;
use crate::playback::schedule::PhaseSpec;

fn classic() -> PhaseSchedule {
    PhaseSchedule::new(vec![
        PhaseSpec {
            kind: PhaseKind::Wide,
            duration: 5.0,
            speed: 105.0,
            half_width: 2.5,
        },
        PhaseSpec {
            kind: PhaseKind::Medium,
            duration: 5.0,
            speed: 50.0,
            half_width: 1.0,
        },
        PhaseSpec {
            kind: PhaseKind::Close,
            duration: 5.0,
            speed: 20.0,
            half_width: 0.2,
        },
    ])
    .unwrap()
}

fn fps60() -> Fps {
    Fps::new(60, 1).unwrap()
}

#[test]
fn seconds_clock_divides_by_fps() {
    assert_eq!(Clock::Seconds.time_at(FrameIndex(120), fps60()), 2.0);
    assert_eq!(Clock::Frames.time_at(FrameIndex(120), fps60()), 120.0);
}

#[test]
fn elapsed_reveal_uses_total_time_times_active_speed() {
    let s = classic();
    let c = PlaybackCursor::at(
        &s,
        Clock::Seconds,
        RevealMode::Elapsed,
        fps60(),
        50_000,
        FrameIndex(420),
    );
    // t = 7s, medium phase: floor(7 * 50) = 350.
    assert_eq!(c.phase, PhaseKind::Medium);
    assert_eq!(c.revealed, 350);
    assert_eq!(c.tip(), Some(349));
    assert!((c.phase_offset - 2.0).abs() < 1e-9);
}

#[test]
fn integrated_reveal_carries_previous_phases() {
    let s = classic();
    let c = PlaybackCursor::at(
        &s,
        Clock::Seconds,
        RevealMode::Integrated,
        fps60(),
        50_000,
        FrameIndex(420),
    );
    assert_eq!(c.revealed, 625);
}

#[test]
fn revealed_count_wraps_below_n() {
    let s = classic();
    let n = 1000;
    for f in 0..6000u64 {
        for mode in [RevealMode::Elapsed, RevealMode::Integrated] {
            let c = PlaybackCursor::at(&s, Clock::Seconds, mode, fps60(), n, FrameIndex(f));
            assert!(c.revealed < n);
        }
    }
}

#[test]
fn first_frame_reveals_nothing() {
    let s = classic();
    let c = PlaybackCursor::at(
        &s,
        Clock::Frames,
        RevealMode::Elapsed,
        fps60(),
        10,
        FrameIndex(0),
    );
    assert_eq!(c.revealed, 0);
    assert_eq!(c.tip(), None);
}

#[test]
fn integrated_reveal_never_moves_backwards_within_a_lap() {
    let s = classic();
    let n = 1_000_000;
    let mut last = 0usize;
    for f in 0..900u64 {
        let c = PlaybackCursor::at(
            &s,
            Clock::Seconds,
            RevealMode::Integrated,
            fps60(),
            n,
            FrameIndex(f),
        );
        assert!(c.revealed >= last);
        last = c.revealed;
    }
}

#[test]
fn wrap_count_handles_degenerate_inputs() {
    assert_eq!(wrap_count(12.7, 0), 0);
    assert_eq!(wrap_count(-3.0, 10), 0);
    assert_eq!(wrap_count(f64::NAN, 10), 0);
    assert_eq!(wrap_count(12.7, 10), 2);
}
