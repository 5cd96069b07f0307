//! Per-frame bookkeeping shared by every chamber loop: viewport size,
//! resize detection and wrapped phase accumulators.

use crate::constants::COMPACT_WIDTH_PX;
use std::f32::consts::TAU;

/// Canvas size in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    /// Phone-sized layouts use coarser grids and smaller radii.
    #[inline]
    pub fn is_compact(&self) -> bool {
        self.width < COMPACT_WIDTH_PX
    }

    #[inline]
    pub fn center(&self) -> glam::Vec2 {
        glam::Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// Distance from the centre to a corner.
    #[inline]
    pub fn half_diagonal(&self) -> f32 {
        self.center().length()
    }
}

/// Remembers the last observed viewport so a loop can rebuild size-dependent
/// buffers exactly once per change.
#[derive(Clone, Debug, Default)]
pub struct ResizeWatch {
    last: Option<Viewport>,
}

impl ResizeWatch {
    /// Returns true on the first observation and whenever the size changed.
    pub fn observe(&mut self, viewport: Viewport) -> bool {
        let changed = self.last != Some(viewport);
        self.last = Some(viewport);
        changed
    }

    pub fn current(&self) -> Option<Viewport> {
        self.last
    }
}

/// Angle accumulator advanced by a fixed step per frame, kept in [0, TAU).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Phase {
    angle: f32,
}

impl Phase {
    pub fn new(angle: f32) -> Self {
        Self {
            angle: wrap_angle(angle),
        }
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Advance by `rate * speed`; negative speeds spin backwards.
    pub fn advance(&mut self, rate: f32, speed: f32) -> f32 {
        self.angle = wrap_angle(self.angle + rate * speed);
        self.angle
    }
}

/// Wrap any finite angle into [0, TAU).
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    let a = angle.rem_euclid(TAU);
    if a >= TAU {
        0.0
    } else {
        a
    }
}

/// Shortest unsigned distance between two angles, in [0, PI].
#[inline]
pub fn angular_distance(a: f32, b: f32) -> f32 {
    let d = wrap_angle(a - b);
    d.min(TAU - d)
}

/// True when a forward step from `from` to `to` passed over `target`.
#[inline]
pub fn swept_past(from: f32, to: f32, target: f32) -> bool {
    let span = wrap_angle(to - from);
    let offset = wrap_angle(target - from);
    offset > 0.0 && offset <= span
}
