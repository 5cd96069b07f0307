//! Uniform pointer set built from touch/click samples and pose fingertips.

use crate::pose::PoseFrame;
use crate::schedule::Viewport;
use fnv::FnvHashMap;
use glam::Vec2;

/// Identity of a pointer; touches and hands never collide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PointerId {
    Touch(i32),
    Hand(usize),
}

/// An active 2D pointer in canvas pixels with its last observed velocity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pointer {
    pub id: PointerId,
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Pointer {
    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// Holds the currently active pointers between frames.
///
/// Pose results arrive asynchronously; between deliveries the last known
/// hand positions are held. Touch pointers report velocity only on the frame
/// in which they moved.
#[derive(Clone, Debug)]
pub struct PointerSource {
    tracked: FnvHashMap<PointerId, Pointer>,
    empty_pose_frames: u32,
    clear_after_empty: u32,
}

impl Default for PointerSource {
    fn default() -> Self {
        Self::new(0)
    }
}

impl PointerSource {
    /// `clear_after_empty` is the number of consecutive hand-less pose frames
    /// tolerated before hand pointers are dropped; 0 drops them immediately.
    pub fn new(clear_after_empty: u32) -> Self {
        Self {
            tracked: FnvHashMap::default(),
            empty_pose_frames: 0,
            clear_after_empty,
        }
    }

    fn observe(&mut self, id: PointerId, pos: Vec2) {
        let vel = self
            .tracked
            .get(&id)
            .map(|p| pos - p.pos)
            .unwrap_or(Vec2::ZERO);
        self.tracked.insert(id, Pointer { id, pos, vel });
    }

    /// Touch start or move; the first sample has zero velocity.
    pub fn touch_move(&mut self, touch_id: i32, pos: Vec2) {
        self.observe(PointerId::Touch(touch_id), pos);
    }

    pub fn touch_end(&mut self, touch_id: i32) {
        self.tracked.remove(&PointerId::Touch(touch_id));
    }

    /// Replace the hand pointers with the fingertips in `frame`.
    ///
    /// X is mirrored so the pointer matches a mirrored self-view. Hands that
    /// disappear from a non-empty frame are dropped; an empty frame only
    /// clears hands after the configured run of empty frames.
    pub fn ingest_pose(&mut self, frame: &PoseFrame, viewport: Viewport) {
        if frame.is_empty() {
            self.empty_pose_frames = self.empty_pose_frames.saturating_add(1);
            if self.empty_pose_frames > self.clear_after_empty {
                self.clear_hands();
            }
            return;
        }
        self.empty_pose_frames = 0;
        let mut seen: smallvec::SmallVec<[PointerId; 2]> = smallvec::SmallVec::new();
        for (hand, tip) in frame.fingertips() {
            let pos = Vec2::new(
                (1.0 - tip.x) * viewport.width,
                tip.y * viewport.height,
            );
            let id = PointerId::Hand(hand);
            self.observe(id, pos);
            seen.push(id);
        }
        self.tracked
            .retain(|id, _| !matches!(id, PointerId::Hand(_)) || seen.contains(id));
    }

    pub fn clear_hands(&mut self) {
        self.tracked.retain(|id, _| !matches!(id, PointerId::Hand(_)));
    }

    pub fn clear(&mut self) {
        self.tracked.clear();
        self.empty_pose_frames = 0;
    }

    /// Call once per rendered frame after the chamber consumed the pointers.
    pub fn end_frame(&mut self) {
        for p in self.tracked.values_mut() {
            if matches!(p.id, PointerId::Touch(_)) {
                p.vel = Vec2::ZERO;
            }
        }
    }

    /// Active pointers ordered by id.
    pub fn snapshot(&self) -> Vec<Pointer> {
        let mut out: Vec<Pointer> = self.tracked.values().copied().collect();
        out.sort_by_key(|p| p.id);
        out
    }

    pub fn get(&self, id: PointerId) -> Option<Pointer> {
        self.tracked.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.tracked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracked.is_empty()
    }
}

/// Mean vertical position of a pointer set, or `None` when empty.
pub fn average_y(pointers: &[Pointer]) -> Option<f32> {
    if pointers.is_empty() {
        return None;
    }
    Some(pointers.iter().map(|p| p.pos.y).sum::<f32>() / pointers.len() as f32)
}
