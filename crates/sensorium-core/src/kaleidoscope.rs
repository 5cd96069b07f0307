//! Radial-symmetry compositor geometry. The front-end clips to each wedge and
//! applies its transform before drawing the video frame.

use crate::constants::*;
use crate::schedule::{Phase, Viewport};
use std::f32::consts::{FRAC_PI_2, TAU};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KaleidoscopeConfig {
    pub slices: u32,
    pub zoom: f32,
    /// Signed; negative values spin the pattern backwards.
    pub rotation_speed: f32,
}

impl Default for KaleidoscopeConfig {
    fn default() -> Self {
        Self {
            slices: 12,
            zoom: 1.5,
            rotation_speed: 0.2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum KaleidoscopeCommand {
    /// Change slice count by a number of pairs.
    AdjustSlices(i32),
    AdjustZoom(f32),
    AdjustSpeed(f32),
    ReverseSpin,
}

impl KaleidoscopeConfig {
    /// Clamp every field into its supported range; slices become even.
    pub fn sanitized(self) -> Self {
        let slices = self.slices.clamp(SLICES_MIN, SLICES_MAX);
        Self {
            slices: slices - slices % 2,
            zoom: self.zoom.clamp(ZOOM_MIN, ZOOM_MAX),
            rotation_speed: self.rotation_speed.clamp(-1.0, 1.0),
        }
    }

    pub fn apply(&mut self, cmd: KaleidoscopeCommand) {
        match cmd {
            KaleidoscopeCommand::AdjustSlices(pairs) => {
                let s = self.slices as i64 + 2 * pairs as i64;
                self.slices = s.clamp(SLICES_MIN as i64, SLICES_MAX as i64) as u32;
            }
            KaleidoscopeCommand::AdjustZoom(d) => self.zoom += d,
            KaleidoscopeCommand::AdjustSpeed(d) => self.rotation_speed += d,
            KaleidoscopeCommand::ReverseSpin => self.rotation_speed = -self.rotation_speed,
        }
        *self = self.sanitized();
    }
}

/// One angular sector of the composition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wedge {
    /// Rotation applied to the wedge frame (index offset plus global spin).
    pub rotation: f32,
    /// Clip arc spans `[-half_angle, half_angle]`, slightly overlapped.
    pub half_angle: f32,
    /// Every other wedge is flipped vertically.
    pub mirrored: bool,
}

#[derive(Clone, Debug, Default)]
pub struct Kaleidoscope {
    pub config: KaleidoscopeConfig,
    spin: Phase,
}

impl Kaleidoscope {
    pub fn new(config: KaleidoscopeConfig) -> Self {
        Self {
            config: config.sanitized(),
            spin: Phase::default(),
        }
    }

    pub fn rotation(&self) -> f32 {
        self.spin.angle()
    }

    /// Advance the global spin by one frame.
    pub fn advance(&mut self) -> f32 {
        self.spin.advance(ROTATION_RATE, self.config.rotation_speed)
    }

    pub fn wedges(&self) -> Vec<Wedge> {
        let slices = self.config.slices.max(1);
        let slice_angle = TAU / slices as f32;
        let spin = self.spin.angle();
        (0..slices)
            .map(|i| Wedge {
                rotation: i as f32 * slice_angle + spin,
                half_angle: slice_angle * 0.5 + WEDGE_OVERLAP,
                mirrored: i % 2 == 0,
            })
            .collect()
    }

    /// Uniform scale that maps the short side of the video onto the wedge
    /// radius, times the zoom.
    pub fn video_scale(&self, viewport: Viewport, video_w: f32, video_h: f32) -> f32 {
        let short = video_w.min(video_h).max(1.0);
        viewport.half_diagonal() / short * self.config.zoom
    }

    /// Quarter turn applied inside each wedge before drawing the video.
    pub fn video_rotation(&self) -> f32 {
        FRAC_PI_2
    }

    /// Spoke angles and hue for the no-video placeholder.
    pub fn placeholder(&self) -> (Vec<f32>, f32) {
        let slices = self.config.slices.max(1);
        let spin = self.spin.angle();
        let spokes = (0..slices)
            .map(|i| TAU * i as f32 / slices as f32 + spin)
            .collect();
        (spokes, spin.sin() * 360.0)
    }
}
