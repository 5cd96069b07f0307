// Host tests for the radar sequencer: tap placement and removal, pitch by
// elevation, scan triggering and the command queue.

use rand::rngs::StdRng;
use rand::SeedableRng;
use sensorium_core::music::{quantize_step, Scale, Waveform};
use sensorium_core::radar::*;
use sensorium_core::schedule::swept_past;
use sensorium_core::{ToneEvent, Viewport};

fn vp() -> Viewport {
    Viewport::new(800.0, 600.0)
}

fn node(id: &str, x: f32, y: f32) -> AudioNode {
    AudioNode {
        id: id.to_string(),
        x,
        y,
        active: false,
        frequency: 220.0,
        life: 0.0,
    }
}

fn assert_near(actual: f32, expected: f32) {
    assert!(
        (actual / expected - 1.0).abs() <= 0.0051,
        "{actual} not within detune of {expected}"
    );
}

#[test]
fn elevation_maps_to_fifteen_steps() {
    assert_eq!(pitch_step_for_elevation(0.0), 0);
    assert_eq!(pitch_step_for_elevation(0.5), 7);
    assert_eq!(pitch_step_for_elevation(1.0), 14);
    assert_eq!(pitch_step_for_elevation(-3.0), 0);
}

#[test]
fn bottom_and_top_taps_span_the_console_range() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut seq = RadarSequencer::default();
    let mut tones = Vec::new();

    seq.tap(0.1, 1.0, vp(), &mut rng, &mut tones);
    seq.tap(0.9, 0.0, vp(), &mut rng, &mut tones);

    let nodes = seq.nodes();
    assert_eq!(nodes.len(), 2);
    assert_near(nodes[0].frequency, quantize_step(0, Scale::Pentatonic, 110.0));
    assert_near(nodes[1].frequency, quantize_step(14, Scale::Pentatonic, 110.0));
    assert!(nodes[1].frequency > 700.0);
}

#[test]
fn phrygian_uses_the_lower_root() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut seq = RadarSequencer::new(ConsoleConfig {
        scale: Scale::Phrygian,
        ..ConsoleConfig::default()
    });
    let mut tones = Vec::new();
    seq.tap(0.5, 1.0, vp(), &mut rng, &mut tones);
    assert_near(seq.nodes()[0].frequency, 80.0);
}

#[test]
fn adding_a_node_voices_it_once() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut seq = RadarSequencer::default();
    let mut tones = Vec::new();
    let outcome = seq.tap(1.0, 0.5, vp(), &mut rng, &mut tones);
    let TapOutcome::Added(id) = outcome else {
        panic!("expected a new node");
    };
    assert_eq!(id.len(), 9);
    assert!(id.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    assert_eq!(tones.len(), 1);
    assert_eq!(tones[0].pan, 1.0);
    assert_eq!(tones[0].frequency_hz, seq.nodes()[0].frequency);
}

#[test]
fn tapping_near_a_node_removes_it() {
    let mut rng = StdRng::seed_from_u64(2);
    let mut seq = RadarSequencer::default();
    let mut tones = Vec::new();
    seq.tap(0.5, 0.5, vp(), &mut rng, &mut tones);
    seq.tap(0.6, 0.5, vp(), &mut rng, &mut tones);
    assert_eq!(seq.nodes().len(), 2);

    tones.clear();
    let outcome = seq.tap(0.52, 0.51, vp(), &mut rng, &mut tones);
    assert!(matches!(outcome, TapOutcome::Removed(_)));
    assert!(tones.is_empty(), "removal is silent");
    assert_eq!(seq.nodes().len(), 1);
    assert!((seq.nodes()[0].x - 0.6).abs() < 1e-6);
}

#[test]
fn scan_triggers_once_per_pass() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut seq = RadarSequencer::default();
    // straight right of centre: angle 0, where scan A starts
    seq.push(RadarCommand::Replace {
        config: ConsoleConfig::default(),
        nodes: vec![node("a", 0.9, 0.5)],
    });
    let mut tones: Vec<ToneEvent> = Vec::new();

    seq.tick(vp(), &mut rng, &mut tones);
    assert_eq!(tones.len(), 1);
    assert!(seq.nodes()[0].active);
    assert!((seq.nodes()[0].life - 0.95).abs() < 1e-6);
    assert_eq!(tones[0].waveform, Waveform::Sine);

    for _ in 1..10 {
        seq.tick(vp(), &mut rng, &mut tones);
    }
    assert_eq!(tones.len(), 1, "no retrigger while still under the scan");

    // scan B, starting opposite, reaches angle 0 around frame 104
    for _ in 10..120 {
        seq.tick(vp(), &mut rng, &mut tones);
    }
    assert_eq!(tones.len(), 2);
}

#[test]
fn fast_scan_never_skips_a_node() {
    let mut rng = StdRng::seed_from_u64(9);
    for (x, y) in [(0.9, 0.5), (0.8, 0.2), (0.5, 0.9), (0.1, 0.5)] {
        let mut seq = RadarSequencer::default();
        seq.push(RadarCommand::Replace {
            config: ConsoleConfig {
                tempo: 4.0,
                ..ConsoleConfig::default()
            },
            nodes: vec![node("a", x, y)],
        });
        let mut tones: Vec<ToneEvent> = Vec::new();
        seq.tick(vp(), &mut rng, &mut tones);
        let angle = seq.nodes()[0].angle(vp());

        let mut b_passes = 0;
        for _ in 0..10_000 {
            let armed = !seq.nodes()[0].active;
            let (_, prev_b) = seq.scan_angles();
            let before = tones.len();
            seq.tick(vp(), &mut rng, &mut tones);
            let (_, b) = seq.scan_angles();
            if swept_past(prev_b, b, angle) {
                b_passes += 1;
                if armed {
                    assert_eq!(tones.len(), before + 1, "scan B jumped over ({x}, {y})");
                }
            }
        }
        // 0.12 rad per frame: one pass every ~52 frames
        assert!(b_passes >= 185, "{b_passes} passes");
    }
}

#[test]
fn life_decays_to_zero_and_stays_there() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut seq = RadarSequencer::default();
    seq.push(RadarCommand::Replace {
        config: ConsoleConfig::default(),
        nodes: vec![node("a", 0.9, 0.5)],
    });
    let mut tones = Vec::new();
    for _ in 0..40 {
        seq.tick(vp(), &mut rng, &mut tones);
    }
    assert_eq!(seq.nodes()[0].life, 0.0);
    assert!(!seq.nodes()[0].active);
}

#[test]
fn commands_apply_on_next_tick() {
    let mut rng = StdRng::seed_from_u64(4);
    let mut seq = RadarSequencer::default();
    let mut tones = Vec::new();
    seq.push(RadarCommand::Tap { x: 0.2, y: 0.2 });
    seq.push(RadarCommand::CycleScale);
    seq.push(RadarCommand::CycleWaveform);
    assert!(seq.nodes().is_empty());
    assert_eq!(seq.config().scale, Scale::Pentatonic);

    seq.tick(vp(), &mut rng, &mut tones);
    assert_eq!(seq.nodes().len(), 1);
    assert_eq!(seq.config().scale, Scale::Phrygian);
    assert_eq!(seq.config().waveform, Waveform::Triangle);

    seq.push(RadarCommand::Clear);
    seq.tick(vp(), &mut rng, &mut tones);
    assert!(seq.nodes().is_empty());
}

#[test]
fn tempo_is_clamped() {
    let mut rng = StdRng::seed_from_u64(4);
    let mut seq = RadarSequencer::default();
    let mut tones = Vec::new();
    for _ in 0..40 {
        seq.push(RadarCommand::AdjustTempo(0.25));
    }
    seq.tick(vp(), &mut rng, &mut tones);
    assert_eq!(seq.config().tempo, 4.0);
    for _ in 0..40 {
        seq.push(RadarCommand::AdjustTempo(-0.25));
    }
    seq.tick(vp(), &mut rng, &mut tones);
    assert_eq!(seq.config().tempo, 0.25);
}

#[test]
fn replace_neutralizes_runtime_state() {
    let mut rng = StdRng::seed_from_u64(4);
    let mut seq = RadarSequencer::default();
    let mut lit = node("z", 0.1, 0.1);
    lit.active = true;
    lit.life = 0.7;
    seq.push(RadarCommand::Replace {
        config: ConsoleConfig {
            scale: Scale::Chromatic,
            waveform: Waveform::Square,
            tempo: 2.0,
        },
        nodes: vec![lit],
    });
    let mut tones = Vec::new();
    seq.tick(vp(), &mut rng, &mut tones);
    assert_eq!(seq.config().scale, Scale::Chromatic);
    assert_eq!(seq.config().tempo, 2.0);
    assert_eq!(seq.nodes()[0].id, "z");
}

#[test]
fn node_angle_is_measured_from_centre() {
    let v = vp();
    let right = node("r", 1.0, 0.5).angle(v);
    let below = node("b", 0.5, 1.0).angle(v);
    assert!(right.abs() < 1e-6);
    assert!((below - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
}
