//! Particle field: a grid of rest-anchored particles pushed around by
//! pointers and lifted by the audio spectrum.

use crate::constants::*;
use crate::pointer::{average_y, Pointer};
use crate::schedule::Viewport;
use glam::Vec2;
use rand::Rng;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FieldMode {
    #[default]
    Attract,
    Repel,
}

impl FieldMode {
    /// Sign applied to the outward (particle minus pointer) direction.
    #[inline]
    fn sign(self) -> f32 {
        match self {
            FieldMode::Attract => -1.0,
            FieldMode::Repel => 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldControls {
    /// Per-frame velocity retention; must stay below 1.
    pub damping: f32,
    /// Multiplier on the pointer impulse, in [0.1, 3.0].
    pub force: f32,
    /// Alpha of the mirrored video backdrop, in [0, 1].
    pub video_opacity: f32,
    pub mode: FieldMode,
}

impl Default for FieldControls {
    fn default() -> Self {
        Self {
            damping: 0.95,
            force: 1.0,
            video_opacity: 0.6,
            mode: FieldMode::Attract,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldCommand {
    SetMode(FieldMode),
    ToggleMode,
    AdjustForce(f32),
    AdjustOpacity(f32),
}

impl FieldControls {
    pub fn apply(&mut self, cmd: FieldCommand) {
        match cmd {
            FieldCommand::SetMode(m) => self.mode = m,
            FieldCommand::ToggleMode => {
                self.mode = match self.mode {
                    FieldMode::Attract => FieldMode::Repel,
                    FieldMode::Repel => FieldMode::Attract,
                }
            }
            FieldCommand::AdjustForce(d) => self.force = (self.force + d).clamp(0.1, 3.0),
            FieldCommand::AdjustOpacity(d) => {
                self.video_opacity = (self.video_opacity + d).clamp(0.0, 1.0)
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldParticle {
    pub pos: Vec2,
    pub base: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub hue_offset: f32,
    /// Colour computed by the last step, in degrees and percent.
    pub hue: f32,
    pub lightness: f32,
}

/// Values the shell forwards to the audio engine after a step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldStep {
    /// Target for the expressive filter, in [0, 1].
    pub expression: f32,
    /// Mean magnitude of the lowest spectrum bins, in [0, 255].
    pub bass: f32,
}

#[derive(Clone, Debug, Default)]
pub struct ParticleField {
    particles: Vec<FieldParticle>,
    pub controls: FieldControls,
    viewport: Option<Viewport>,
}

impl ParticleField {
    pub fn new(controls: FieldControls) -> Self {
        Self {
            particles: Vec::new(),
            controls,
            viewport: None,
        }
    }

    pub fn particles(&self) -> &[FieldParticle] {
        &self.particles
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    /// Rebuild the grid for a new canvas size; all motion is discarded.
    pub fn resize<R: Rng + ?Sized>(&mut self, viewport: Viewport, rng: &mut R) {
        let (cols, rows) = if viewport.is_compact() {
            (FIELD_COLS_COMPACT, FIELD_ROWS_COMPACT)
        } else {
            (FIELD_COLS, FIELD_ROWS)
        };
        let spacing = Vec2::new(viewport.width / cols as f32, viewport.height / rows as f32);
        self.particles.clear();
        self.particles.reserve(cols * rows);
        for i in 0..cols {
            for j in 0..rows {
                let base = Vec2::new(i as f32, j as f32) * spacing + spacing * 0.5;
                self.particles.push(FieldParticle {
                    pos: base,
                    base,
                    vel: Vec2::ZERO,
                    size: rng.gen_range(0.5..2.0),
                    hue_offset: rng.gen_range(-30.0..30.0),
                    hue: 0.0,
                    lightness: 60.0,
                });
            }
        }
        self.viewport = Some(viewport);
        log::debug!("[field] grid {}x{} for {:?}", cols, rows, viewport);
    }

    /// Advance one frame.
    ///
    /// `spectrum` is a byte frequency snapshot (may be empty when audio is
    /// unavailable) and `now_ms` drives the slow hue cycle.
    pub fn step(&mut self, pointers: &[Pointer], spectrum: &[u8], now_ms: f64) -> FieldStep {
        let bass = bass_energy(spectrum);
        let Some(viewport) = self.viewport else {
            return FieldStep {
                expression: FIELD_IDLE_EXPRESSION,
                bass,
            };
        };
        let expression = match average_y(pointers) {
            Some(y) => 1.0 - (y / viewport.height).clamp(0.0, 1.0),
            None => FIELD_IDLE_EXPRESSION,
        };

        let compact = viewport.is_compact();
        let radius = if compact {
            FIELD_RADIUS_PX_COMPACT
        } else {
            FIELD_RADIUS_PX
        };
        let lift = if compact {
            FIELD_DISPLACEMENT_PX_COMPACT
        } else {
            FIELD_DISPLACEMENT_PX
        };
        let impulse = FIELD_IMPULSE * self.controls.force * self.controls.mode.sign() * 0.5;
        let damping = self.controls.damping.clamp(0.0, 0.999);
        let base_hue = ((now_ms * FIELD_HUE_RATE_PER_MS) % 360.0) as f32;
        let count = self.particles.len();

        for (index, p) in self.particles.iter_mut().enumerate() {
            let magnitude = spectrum_bin(spectrum, index, count) as f32;
            let displacement = magnitude / 255.0 * lift;

            if let Some((nearest, dist_sq)) = nearest_pointer(p.pos, pointers) {
                if dist_sq < radius * radius {
                    let dist = dist_sq.sqrt();
                    let falloff = (radius - dist) / radius;
                    let outward = (p.pos - nearest).try_normalize().unwrap_or(Vec2::X);
                    p.vel += outward * falloff * impulse;
                }
            }

            let target = Vec2::new(p.base.x, p.base.y - displacement);
            p.vel += (target - p.pos) * FIELD_SPRING;
            p.vel *= damping;
            p.pos += p.vel;

            p.hue = base_hue + p.hue_offset + bass * 0.5;
            p.lightness = 60.0 + magnitude / 255.0 * 40.0;
        }

        FieldStep { expression, bass }
    }
}

/// Spectrum bin assigned to particle `index` out of `count`.
fn spectrum_bin(spectrum: &[u8], index: usize, count: usize) -> u8 {
    if spectrum.is_empty() || count == 0 {
        return 0;
    }
    let span = spectrum.len() as f32 * FIELD_SPECTRUM_SPAN;
    let bin = ((index as f32 / count as f32) * span) as usize;
    spectrum.get(bin).copied().unwrap_or(0)
}

/// Mean of the first `FIELD_BASS_BINS` bins.
pub fn bass_energy(spectrum: &[u8]) -> f32 {
    let n = spectrum.len().min(FIELD_BASS_BINS);
    if n == 0 {
        return 0.0;
    }
    spectrum[..n].iter().map(|&v| v as f32).sum::<f32>() / FIELD_BASS_BINS as f32
}

fn nearest_pointer(pos: Vec2, pointers: &[Pointer]) -> Option<(Vec2, f32)> {
    pointers
        .iter()
        .map(|ptr| (ptr.pos, pos.distance_squared(ptr.pos)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
}
