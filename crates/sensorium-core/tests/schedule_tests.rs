// Host tests for viewport bookkeeping, resize detection and phase wrapping.

use sensorium_core::audio::*;
use sensorium_core::schedule::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::f32::consts::{PI, TAU};

#[test]
fn viewport_never_collapses_to_zero() {
    let vp = Viewport::new(0.0, -5.0);
    assert_eq!(vp.width, 1.0);
    assert_eq!(vp.height, 1.0);
}

#[test]
fn compact_threshold_is_exclusive() {
    assert!(Viewport::new(767.0, 900.0).is_compact());
    assert!(!Viewport::new(768.0, 900.0).is_compact());
}

#[test]
fn resize_watch_fires_once_per_change() {
    let mut watch = ResizeWatch::default();
    let a = Viewport::new(800.0, 600.0);
    let b = Viewport::new(400.0, 600.0);
    assert!(watch.observe(a));
    assert!(!watch.observe(a));
    assert!(watch.observe(b));
    assert!(!watch.observe(b));
    assert_eq!(watch.current(), Some(b));
}

#[test]
fn phase_stays_in_range_both_directions() {
    let mut forward = Phase::new(0.0);
    let mut backward = Phase::new(0.0);
    for _ in 0..10_000 {
        let f = forward.advance(0.03, 4.0);
        let b = backward.advance(0.01, -1.0);
        assert!((0.0..TAU).contains(&f));
        assert!((0.0..TAU).contains(&b));
    }
}

#[test]
fn angular_distance_takes_the_short_way_round() {
    assert!((angular_distance(0.01, TAU - 0.01) - 0.02).abs() < 1e-5);
    assert!((angular_distance(0.0, PI) - PI).abs() < 1e-5);
    assert!(angular_distance(1.0, 1.0) < 1e-6);
}

#[test]
fn swept_arc_includes_the_end_and_wraps() {
    assert!(swept_past(0.1, 0.3, 0.2));
    assert!(swept_past(0.1, 0.3, 0.3));
    assert!(!swept_past(0.1, 0.3, 0.1));
    assert!(!swept_past(0.1, 0.3, 0.35));
    // crossing the zero angle
    assert!(swept_past(TAU - 0.05, 0.07, 0.0));
    assert!(swept_past(TAU - 0.05, 0.07, TAU - 0.01));
    assert!(!swept_past(TAU - 0.05, 0.07, PI));
}

#[test]
fn pan_follows_horizontal_position() {
    assert_eq!(pan_from_x(0.0), -1.0);
    assert_eq!(pan_from_x(0.5), 0.0);
    assert_eq!(pan_from_x(1.0), 1.0);
    assert_eq!(pan_from_x(3.0), 1.0);
}

#[test]
fn expressive_cutoff_spans_the_filter_range() {
    assert!((expressive_cutoff_hz(0.0) - EXPRESSIVE_MIN_HZ).abs() < 1e-3);
    assert!((expressive_cutoff_hz(1.0) - EXPRESSIVE_MAX_HZ).abs() < 1.0);
    assert!((expressive_cutoff_hz(-2.0) - EXPRESSIVE_MIN_HZ).abs() < 1e-3);
    let mid = expressive_cutoff_hz(0.5);
    assert!(mid > EXPRESSIVE_MIN_HZ && mid < EXPRESSIVE_MAX_HZ);
}

#[test]
fn delay_send_only_above_threshold() {
    assert!(!ToneEvent::at_x(400.0, 0.5, Default::default()).uses_delay_send());
    assert!(ToneEvent::at_x(401.0, 0.5, Default::default()).uses_delay_send());
}

#[test]
fn impulse_response_decays_to_silence() {
    let mut rng = StdRng::seed_from_u64(1);
    let [left, right] = impulse_response(1000.0, 2.5, REVERB_DECAY, &mut rng);
    assert_eq!(left.len(), 2500);
    assert_eq!(right.len(), 2500);
    assert!(left.iter().chain(right.iter()).all(|s| s.abs() <= 1.0));
    let tail: f32 = left[2400..].iter().map(|s| s.abs()).fold(0.0, f32::max);
    assert!(tail < 0.01, "tail too loud: {tail}");
    assert_ne!(left, right, "channels should be independent");
}
