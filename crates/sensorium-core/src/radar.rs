//! Radar sequencer: two rotating scan lines trigger the notes placed on the
//! canvas as they sweep past them.

use crate::audio::ToneEvent;
use crate::constants::*;
use crate::music::{note_frequency, Scale, Waveform};
use crate::schedule::{angular_distance, swept_past, wrap_angle, Phase, Viewport};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::f32::consts::PI;

/// A placed note. Position is normalized to the canvas (origin top-left) so
/// it survives resizes; `active` and `life` are per-frame runtime state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AudioNode {
    pub id: String,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub active: bool,
    pub frequency: f32,
    #[serde(default)]
    pub life: f32,
}

impl AudioNode {
    /// Copy with runtime fields reset so a reload starts clean.
    pub fn neutralized(&self) -> Self {
        Self {
            active: false,
            life: 0.0,
            ..self.clone()
        }
    }

    /// Angle of the node around the canvas centre, in [0, TAU).
    pub fn angle(&self, viewport: Viewport) -> f32 {
        let dx = self.x * viewport.width - viewport.width * 0.5;
        let dy = self.y * viewport.height - viewport.height * 0.5;
        wrap_angle(dy.atan2(dx))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    pub scale: Scale,
    pub waveform: Waveform,
    pub tempo: f32,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            scale: Scale::Pentatonic,
            waveform: Waveform::Sine,
            tempo: 1.0,
        }
    }
}

/// UI-originated changes, applied at the start of the next frame.
#[derive(Clone, Debug, PartialEq)]
pub enum RadarCommand {
    /// Tap at a normalized canvas position: removes a node under it or adds one.
    Tap { x: f32, y: f32 },
    Clear,
    CycleScale,
    CycleWaveform,
    AdjustTempo(f32),
    /// Wholesale replacement, e.g. from a loaded preset.
    Replace {
        config: ConsoleConfig,
        nodes: Vec<AudioNode>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub enum TapOutcome {
    Added(String),
    Removed(String),
}

/// Pitch step for a node at `elevation` (0 = bottom edge, 1 = top edge).
pub fn pitch_step_for_elevation(elevation: f32) -> u32 {
    let e = elevation.clamp(0.0, 1.0);
    ((e * RADAR_STEPS as f32) as u32).min(RADAR_STEPS - 1)
}

/// Nine random base-36 characters.
pub fn node_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    (0..9)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

#[derive(Clone, Debug)]
pub struct RadarSequencer {
    nodes: Vec<AudioNode>,
    config: ConsoleConfig,
    scan_a: Phase,
    scan_b: Phase,
    commands: VecDeque<RadarCommand>,
}

impl Default for RadarSequencer {
    fn default() -> Self {
        Self::new(ConsoleConfig::default())
    }
}

impl RadarSequencer {
    pub fn new(config: ConsoleConfig) -> Self {
        Self {
            nodes: Vec::new(),
            config,
            scan_a: Phase::new(0.0),
            scan_b: Phase::new(PI),
            commands: VecDeque::new(),
        }
    }

    pub fn nodes(&self) -> &[AudioNode] {
        &self.nodes
    }

    pub fn config(&self) -> ConsoleConfig {
        self.config
    }

    pub fn scan_angles(&self) -> (f32, f32) {
        (self.scan_a.angle(), self.scan_b.angle())
    }

    /// Queue a command for the next `tick`.
    pub fn push(&mut self, cmd: RadarCommand) {
        self.commands.push_back(cmd);
    }

    /// Add a node at `(x, y)` or remove the first node within the hit radius.
    ///
    /// Adding also voices the new node once.
    pub fn tap<R: Rng + ?Sized>(
        &mut self,
        x: f32,
        y: f32,
        viewport: Viewport,
        rng: &mut R,
        tones: &mut Vec<ToneEvent>,
    ) -> TapOutcome {
        let hit = self.nodes.iter().position(|n| {
            let dx = (n.x - x) * viewport.width;
            let dy = (n.y - y) * viewport.height;
            (dx * dx + dy * dy).sqrt() < RADAR_HIT_RADIUS_PX
        });
        if let Some(i) = hit {
            let removed = self.nodes.remove(i);
            log::debug!("[radar] removed node {}", removed.id);
            return TapOutcome::Removed(removed.id);
        }

        let step = pitch_step_for_elevation(1.0 - y);
        let scale = self.config.scale;
        let frequency = note_frequency(step, scale, scale.console_root_hz(), rng);
        let node = AudioNode {
            id: node_id(rng),
            x,
            y,
            active: false,
            frequency,
            life: 0.0,
        };
        log::debug!("[radar] added node {} step={} f={:.1}Hz", node.id, step, frequency);
        tones.push(ToneEvent::at_x(frequency, x, self.config.waveform));
        let id = node.id.clone();
        self.nodes.push(node);
        TapOutcome::Added(id)
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    fn apply<R: Rng + ?Sized>(
        &mut self,
        cmd: RadarCommand,
        viewport: Viewport,
        rng: &mut R,
        tones: &mut Vec<ToneEvent>,
    ) {
        match cmd {
            RadarCommand::Tap { x, y } => {
                self.tap(x, y, viewport, rng, tones);
            }
            RadarCommand::Clear => self.clear(),
            RadarCommand::CycleScale => self.config.scale = self.config.scale.next(),
            RadarCommand::CycleWaveform => self.config.waveform = self.config.waveform.next(),
            RadarCommand::AdjustTempo(d) => {
                self.config.tempo = (self.config.tempo + d).clamp(TEMPO_MIN, TEMPO_MAX)
            }
            RadarCommand::Replace { config, nodes } => {
                self.config = config;
                self.nodes = nodes.iter().map(AudioNode::neutralized).collect();
            }
        }
    }

    /// Drain queued commands, advance both scan lines and fire every node
    /// whose angle a scan line just reached.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        viewport: Viewport,
        rng: &mut R,
        tones: &mut Vec<ToneEvent>,
    ) {
        while let Some(cmd) = self.commands.pop_front() {
            self.apply(cmd, viewport, rng, tones);
        }

        let tempo = self.config.tempo;
        let (prev_a, prev_b) = (self.scan_a.angle(), self.scan_b.angle());
        let a = self.scan_a.advance(SCAN_A_RATE, tempo);
        let b = self.scan_b.advance(SCAN_B_RATE, tempo);

        for node in self.nodes.iter_mut() {
            let angle = node.angle(viewport);
            let da = angular_distance(a, angle);
            let db = angular_distance(b, angle);

            // At high tempo a step is wider than the tolerance window, so the
            // arc covered this frame counts as well.
            let reached = da < SCAN_TRIGGER_TOLERANCE
                || db < SCAN_TRIGGER_TOLERANCE
                || swept_past(prev_a, a, angle)
                || swept_past(prev_b, b, angle);
            let triggered = !node.active && reached;
            if da > SCAN_REARM_MARGIN && db > SCAN_REARM_MARGIN {
                node.active = false;
            }
            if triggered {
                tones.push(ToneEvent::at_x(node.frequency, node.x, self.config.waveform));
                node.active = true;
                node.life = 1.0;
            }
            node.life = (node.life - NODE_LIFE_DECAY).max(0.0);
        }
    }
}
