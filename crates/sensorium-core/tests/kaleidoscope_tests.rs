// Host tests for kaleidoscope geometry and control ranges.

use sensorium_core::kaleidoscope::*;
use sensorium_core::Viewport;
use std::f32::consts::TAU;

#[test]
fn wedges_tile_the_full_circle() {
    let k = Kaleidoscope::new(KaleidoscopeConfig::default());
    let wedges = k.wedges();
    assert_eq!(wedges.len(), 12);
    let slice = TAU / 12.0;
    for (i, w) in wedges.iter().enumerate() {
        assert!((w.rotation - i as f32 * slice).abs() < 1e-5);
        assert!(w.half_angle * 2.0 > slice, "wedges must overlap");
        assert_eq!(w.mirrored, i % 2 == 0);
    }
}

#[test]
fn slices_stay_even_and_bounded() {
    let mut cfg = KaleidoscopeConfig::default();
    for _ in 0..50 {
        cfg.apply(KaleidoscopeCommand::AdjustSlices(1));
        assert_eq!(cfg.slices % 2, 0);
    }
    assert_eq!(cfg.slices, 32);
    for _ in 0..50 {
        cfg.apply(KaleidoscopeCommand::AdjustSlices(-1));
    }
    assert_eq!(cfg.slices, 4);

    let odd = KaleidoscopeConfig {
        slices: 7,
        ..KaleidoscopeConfig::default()
    }
    .sanitized();
    assert_eq!(odd.slices, 6);
}

#[test]
fn zoom_and_speed_are_clamped() {
    let mut cfg = KaleidoscopeConfig::default();
    for _ in 0..100 {
        cfg.apply(KaleidoscopeCommand::AdjustZoom(0.1));
        cfg.apply(KaleidoscopeCommand::AdjustSpeed(0.1));
    }
    assert_eq!(cfg.zoom, 3.0);
    assert_eq!(cfg.rotation_speed, 1.0);
    cfg.apply(KaleidoscopeCommand::ReverseSpin);
    assert_eq!(cfg.rotation_speed, -1.0);
    for _ in 0..100 {
        cfg.apply(KaleidoscopeCommand::AdjustZoom(-0.1));
    }
    assert_eq!(cfg.zoom, 0.5);
}

#[test]
fn spin_advances_with_signed_speed() {
    let mut k = Kaleidoscope::new(KaleidoscopeConfig {
        rotation_speed: 1.0,
        ..KaleidoscopeConfig::default()
    });
    k.advance();
    assert!((k.rotation() - 0.01).abs() < 1e-6);

    k.config.apply(KaleidoscopeCommand::ReverseSpin);
    k.advance();
    k.advance();
    assert!((k.rotation() - (TAU - 0.01)).abs() < 1e-4);
    for _ in 0..5000 {
        let r = k.advance();
        assert!((0.0..TAU).contains(&r));
    }
}

#[test]
fn video_fills_each_wedge() {
    let k = Kaleidoscope::new(KaleidoscopeConfig {
        zoom: 1.0,
        ..KaleidoscopeConfig::default()
    });
    let vp = Viewport::new(600.0, 800.0);
    let scale = k.video_scale(vp, 1280.0, 720.0);
    assert!((scale * 720.0 - 500.0).abs() < 1e-2);
}

#[test]
fn placeholder_draws_one_spoke_per_slice() {
    let k = Kaleidoscope::new(KaleidoscopeConfig {
        slices: 8,
        ..KaleidoscopeConfig::default()
    });
    let (spokes, hue) = k.placeholder();
    assert_eq!(spokes.len(), 8);
    assert!((spokes[2] - TAU / 4.0).abs() < 1e-5);
    assert!(hue.abs() < 1e-6);
}
