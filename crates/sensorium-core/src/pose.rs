//! Narrow capability for the external hand pose estimator.
//!
//! The estimator is a black box that consumes video frames and calls back,
//! at its own cadence, with zero or more hand landmark sets in normalized
//! image coordinates. Chambers receive an implementation by injection and
//! never probe for one themselves.

use crate::constants::FINGERTIP_LANDMARK;
use smallvec::SmallVec;

/// One keypoint in normalized image space ([0, 1] on both axes).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
}

/// Landmarks for a single detected hand, in estimator order.
pub type HandLandmarks = Vec<Landmark>;

/// Result of one estimator pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PoseFrame {
    pub hands: SmallVec<[HandLandmarks; 2]>,
}

impl PoseFrame {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.hands.is_empty()
    }

    /// Fingertip of every hand that carries one, paired with its hand index.
    pub fn fingertips(&self) -> impl Iterator<Item = (usize, Landmark)> + '_ {
        self.hands
            .iter()
            .enumerate()
            .filter_map(|(i, h)| h.get(FINGERTIP_LANDMARK).map(|lm| (i, *lm)))
    }
}

impl FromIterator<HandLandmarks> for PoseFrame {
    fn from_iter<I: IntoIterator<Item = HandLandmarks>>(iter: I) -> Self {
        Self {
            hands: iter.into_iter().collect(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PoseStatus {
    /// The estimator backend has not loaded (yet).
    Unavailable,
    /// Constructed but not started.
    Ready,
    Running,
    Stopped,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoseError {
    #[error("pose estimator not available")]
    Unavailable,
    #[error("pose estimator failed: {0}")]
    Backend(String),
}

pub type PoseCallback = Box<dyn FnMut(PoseFrame)>;

pub trait PoseProvider {
    /// Register the sink for results; replaces any previous callback.
    fn on_results(&mut self, callback: PoseCallback);
    fn start(&mut self) -> Result<(), PoseError>;
    fn stop(&mut self);
    fn status(&self) -> PoseStatus;
}
