//! Ink flow: pointer-driven trail painter with a harp of horizontal pitch
//! lanes. Crossing from one lane into another plucks the lane entered.

use crate::audio::ToneEvent;
use crate::constants::*;
use crate::music::Waveform;
use crate::pointer::{Pointer, PointerId};
use crate::schedule::Viewport;
use fnv::FnvHashMap;
use glam::Vec2;
use rand::Rng;
use smallvec::SmallVec;

pub const LANE_COUNT: usize = LANE_RATIOS.len();

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Intensity {
    Light,
    #[default]
    Medium,
    Heavy,
}

impl Intensity {
    /// Particles spawned per moving pointer per frame.
    pub fn spawn_count(self) -> usize {
        match self {
            Intensity::Light => 1,
            Intensity::Medium => 3,
            Intensity::Heavy => 6,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Intensity::Light => Intensity::Medium,
            Intensity::Medium => Intensity::Heavy,
            Intensity::Heavy => Intensity::Light,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Intensity::Light => "low",
            Intensity::Medium => "med",
            Intensity::Heavy => "high",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InkConfig {
    pub intensity: Intensity,
    pub sound_enabled: bool,
}

impl Default for InkConfig {
    fn default() -> Self {
        Self {
            intensity: Intensity::Medium,
            sound_enabled: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InkCommand {
    CycleIntensity,
    ToggleSound,
    Clear,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InkParticle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining life in (0, 1]; the particle is dropped at 0.
    pub life: f32,
    /// Recent positions, oldest first, at most `INK_HISTORY` entries.
    pub history: SmallVec<[Vec2; INK_HISTORY]>,
    pub hue: f32,
    pub size: f32,
}

impl InkParticle {
    fn advance(&mut self) {
        if self.history.len() == INK_HISTORY {
            self.history.remove(0);
        }
        self.history.push(self.pos);
        self.pos += self.vel;
        self.life -= INK_LIFE_DECAY;
    }
}

/// Lane under a canvas y, counted from the bottom edge.
pub fn lane_for_y(y: f32, height: f32) -> usize {
    let lane_h = height.max(1.0) / LANE_COUNT as f32;
    let from_bottom = height - y;
    let lane = (from_bottom / lane_h).floor();
    lane.clamp(0.0, (LANE_COUNT - 1) as f32) as usize
}

/// Canvas y of the guide line drawn through the middle of a lane.
pub fn lane_center_y(lane: usize, height: f32) -> f32 {
    let lane_h = height / LANE_COUNT as f32;
    height - lane as f32 * lane_h - lane_h * 0.5
}

pub fn lane_frequency(lane: usize) -> f32 {
    INK_ROOT_HZ * LANE_RATIOS[lane.min(LANE_COUNT - 1)]
}

pub fn lane_hue(lane: usize) -> f32 {
    lane as f32 / LANE_COUNT as f32 * INK_LANE_HUE_SPAN
}

#[derive(Clone, Debug, Default)]
pub struct InkFlow {
    particles: Vec<InkParticle>,
    lanes: FnvHashMap<PointerId, usize>,
    pub config: InkConfig,
}

impl InkFlow {
    pub fn new(config: InkConfig) -> Self {
        Self {
            particles: Vec::new(),
            lanes: FnvHashMap::default(),
            config,
        }
    }

    pub fn particles(&self) -> &[InkParticle] {
        &self.particles
    }

    /// Last lane recorded for a pointer.
    pub fn lane_of(&self, id: PointerId) -> Option<usize> {
        self.lanes.get(&id).copied()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn apply(&mut self, cmd: InkCommand) {
        match cmd {
            InkCommand::CycleIntensity => self.config.intensity = self.config.intensity.next(),
            InkCommand::ToggleSound => self.config.sound_enabled = !self.config.sound_enabled,
            InkCommand::Clear => self.clear(),
        }
    }

    /// One frame: detect lane crossings, spawn trail particles behind moving
    /// pointers and age every particle.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        pointers: &[Pointer],
        viewport: Viewport,
        rng: &mut R,
        tones: &mut Vec<ToneEvent>,
    ) {
        self.lanes
            .retain(|id, _| pointers.iter().any(|p| p.id == *id));

        let spawn = self.config.intensity.spawn_count();
        for p in pointers {
            let lane = lane_for_y(p.pos.y, viewport.height);
            let previous = self.lanes.insert(p.id, lane);
            if matches!(previous, Some(prev) if prev != lane) && self.config.sound_enabled {
                tones.push(ToneEvent::at_x(
                    lane_frequency(lane),
                    p.pos.x / viewport.width,
                    Waveform::Sine,
                ));
            }

            let speed = p.speed();
            if speed > INK_SPAWN_SPEED {
                let hue = lane_hue(lane);
                for _ in 0..spawn {
                    let jitter = Vec2::new(rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0));
                    let drift = Vec2::new(rng.gen_range(-0.5..0.5), rng.gen_range(-0.5..0.5));
                    self.particles.push(InkParticle {
                        pos: p.pos + jitter,
                        vel: p.vel * 0.05 + drift,
                        life: 1.0,
                        history: SmallVec::new(),
                        hue: hue + rng.gen_range(-10.0..10.0),
                        size: rng.gen_range(0.0..3.0) + speed * 0.1,
                    });
                }
            }
        }

        for particle in self.particles.iter_mut() {
            particle.advance();
        }
        self.particles.retain(|p| p.life > 0.0);

        if self.particles.len() > INK_MAX_PARTICLES {
            let excess = self.particles.len() - INK_MAX_PARTICLES;
            self.particles.drain(..excess);
        }
    }
}
