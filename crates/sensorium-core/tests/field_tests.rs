// Host tests for the particle field: grid sizing, pointer response, spring
// return and the expression/bass outputs.

use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sensorium_core::field::*;
use sensorium_core::{Pointer, PointerId, Viewport};

fn field_for(vp: Viewport, controls: FieldControls) -> ParticleField {
    let mut rng = StdRng::seed_from_u64(3);
    let mut field = ParticleField::new(controls);
    field.resize(vp, &mut rng);
    field
}

fn touch(x: f32, y: f32) -> Pointer {
    Pointer {
        id: PointerId::Touch(0),
        pos: Vec2::new(x, y),
        vel: Vec2::ZERO,
    }
}

fn max_offset(field: &ParticleField, lift: f32) -> f32 {
    field
        .particles()
        .iter()
        .map(|p| p.pos.distance(Vec2::new(p.base.x, p.base.y - lift)))
        .fold(0.0, f32::max)
}

#[test]
fn grid_size_depends_on_layout() {
    let wide = field_for(Viewport::new(1280.0, 720.0), FieldControls::default());
    assert_eq!(wide.particles().len(), 100 * 60);
    let compact = field_for(Viewport::new(400.0, 800.0), FieldControls::default());
    assert_eq!(compact.particles().len(), 50 * 30);
}

#[test]
fn resize_rebuilds_at_rest() {
    let vp = Viewport::new(800.0, 600.0);
    let mut field = field_for(vp, FieldControls::default());
    field.step(&[touch(400.0, 300.0)], &[], 0.0);
    let mut rng = StdRng::seed_from_u64(9);
    field.resize(Viewport::new(900.0, 600.0), &mut rng);
    assert!(field.particles().iter().all(|p| p.pos == p.base && p.vel == Vec2::ZERO));
    for p in field.particles() {
        assert!(p.base.x > 0.0 && p.base.x < 900.0);
        assert!(p.base.y > 0.0 && p.base.y < 600.0);
        assert!((0.5..2.0).contains(&p.size));
    }
}

#[test]
fn particles_return_to_rest_when_left_alone() {
    let vp = Viewport::new(800.0, 600.0);
    let mut field = field_for(vp, FieldControls::default());
    for _ in 0..30 {
        field.step(&[touch(400.0, 300.0)], &[], 0.0);
    }
    assert!(max_offset(&field, 0.0) > 1.0, "pointer should disturb the grid");
    for _ in 0..600 {
        field.step(&[], &[], 0.0);
    }
    assert!(max_offset(&field, 0.0) < 0.5);
}

#[test]
fn constant_spectrum_lifts_every_particle() {
    let vp = Viewport::new(800.0, 600.0);
    let mut field = field_for(vp, FieldControls::default());
    let spectrum = vec![255u8; 1024];
    for _ in 0..600 {
        field.step(&[], &spectrum, 0.0);
    }
    assert!(max_offset(&field, 30.0) < 0.5);
}

#[test]
fn repel_pushes_away_and_attract_pulls_in() {
    let vp = Viewport::new(800.0, 600.0);
    let pointer = touch(0.0, 0.0);
    for (mode, moves_away) in [(FieldMode::Repel, true), (FieldMode::Attract, false)] {
        let controls = FieldControls {
            mode,
            ..FieldControls::default()
        };
        let mut field = field_for(vp, controls);
        let before = field.particles()[0].pos.distance(pointer.pos);
        field.step(&[pointer], &[], 0.0);
        let after = field.particles()[0].pos.distance(pointer.pos);
        assert_eq!(after > before, moves_away, "{mode:?}: {before} -> {after}");
    }
}

#[test]
fn pointers_outside_the_radius_have_no_effect() {
    let vp = Viewport::new(800.0, 600.0);
    let mut field = field_for(vp, FieldControls::default());
    field.step(&[touch(5000.0, 5000.0)], &[], 0.0);
    assert!(field.particles().iter().all(|p| p.pos == p.base));
}

#[test]
fn expression_tracks_pointer_height() {
    let vp = Viewport::new(800.0, 600.0);
    let mut field = field_for(vp, FieldControls::default());
    let idle = field.step(&[], &[], 0.0);
    assert!((idle.expression - 0.8).abs() < 1e-6);
    let top = field.step(&[touch(100.0, 0.0)], &[], 0.0);
    assert!((top.expression - 1.0).abs() < 1e-6);
    let bottom = field.step(&[touch(100.0, 600.0)], &[], 0.0);
    assert!(bottom.expression.abs() < 1e-6);
}

#[test]
fn bass_is_mean_of_lowest_bins() {
    assert_eq!(bass_energy(&[]), 0.0);
    let mut spectrum = vec![0u8; 256];
    spectrum[..20].fill(100);
    assert!((bass_energy(&spectrum) - 100.0).abs() < 1e-4);
    assert!((bass_energy(&[255; 1024]) - 255.0).abs() < 1e-4);
}

#[test]
fn controls_stay_in_range() {
    let mut c = FieldControls::default();
    for _ in 0..100 {
        c.apply(FieldCommand::AdjustForce(0.5));
        c.apply(FieldCommand::AdjustOpacity(0.5));
    }
    assert_eq!(c.force, 3.0);
    assert_eq!(c.video_opacity, 1.0);
    for _ in 0..100 {
        c.apply(FieldCommand::AdjustForce(-0.5));
        c.apply(FieldCommand::AdjustOpacity(-0.5));
    }
    assert!((c.force - 0.1).abs() < 1e-6);
    assert_eq!(c.video_opacity, 0.0);
    c.apply(FieldCommand::ToggleMode);
    assert_eq!(c.mode, FieldMode::Repel);
    c.apply(FieldCommand::SetMode(FieldMode::Attract));
    assert_eq!(c.mode, FieldMode::Attract);
}

#[test]
fn unsized_field_reports_idle_expression() {
    let mut field = ParticleField::default();
    let out = field.step(&[touch(0.0, 0.0)], &[], 0.0);
    assert!((out.expression - 0.8).abs() < 1e-6);
    assert!(field.particles().is_empty());
}
