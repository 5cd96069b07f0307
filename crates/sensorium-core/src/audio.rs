//! Backend-independent pieces of the audio engine: the tone request that
//! chambers emit, the expressive filter mapping and the synthetic reverb
//! impulse.

use crate::music::Waveform;
use rand::Rng;

/// Voice envelope: linear attack to `VOICE_PEAK_GAIN`, then exponential decay
/// to `VOICE_FLOOR_GAIN`; the voice is released after `VOICE_LIFETIME_SEC`.
pub const VOICE_PEAK_GAIN: f32 = 0.3;
pub const VOICE_ATTACK_SEC: f64 = 0.02;
pub const VOICE_DECAY_END_SEC: f64 = 1.5;
pub const VOICE_FLOOR_GAIN: f32 = 0.001;
pub const VOICE_LIFETIME_SEC: f64 = 2.0;

/// Tones above this are also routed to the delay send.
pub const DELAY_SEND_MIN_HZ: f32 = 400.0;

/// Expressive lowpass range (Hz) and smoothing time constant (s).
pub const EXPRESSIVE_MIN_HZ: f32 = 200.0;
pub const EXPRESSIVE_MAX_HZ: f32 = 15_000.0;
pub const EXPRESSIVE_TAU_SEC: f64 = 0.1;

/// Synthetic reverb impulse length (s) and decay exponent.
pub const REVERB_SECONDS: f32 = 2.5;
pub const REVERB_DECAY: f32 = 2.0;

/// Which analyser view to read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpectrumMode {
    Time,
    Frequency,
}

/// A single fire-and-forget voice request produced by a chamber.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ToneEvent {
    pub frequency_hz: f32,
    /// Stereo position in [-1, 1].
    pub pan: f32,
    pub waveform: Waveform,
}

impl ToneEvent {
    /// Build a tone whose pan follows a normalized horizontal position.
    pub fn at_x(frequency_hz: f32, x_norm: f32, waveform: Waveform) -> Self {
        Self {
            frequency_hz,
            pan: pan_from_x(x_norm),
            waveform,
        }
    }

    pub fn uses_delay_send(&self) -> bool {
        self.frequency_hz > DELAY_SEND_MIN_HZ
    }
}

/// Map a normalized x in [0, 1] to a stereo pan in [-1, 1].
#[inline]
pub fn pan_from_x(x_norm: f32) -> f32 {
    (x_norm * 2.0 - 1.0).clamp(-1.0, 1.0)
}

/// Exponential mapping from the mood knob in [0, 1] to a lowpass cutoff.
pub fn expressive_cutoff_hz(value: f32) -> f32 {
    let v = if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        1.0
    };
    EXPRESSIVE_MIN_HZ * (EXPRESSIVE_MAX_HZ / EXPRESSIVE_MIN_HZ).powf(v)
}

/// Stereo noise burst shaped by `(1 - t/len)^decay`, each channel drawn
/// independently.
pub fn impulse_response<R: Rng + ?Sized>(
    sample_rate: f32,
    seconds: f32,
    decay: f32,
    rng: &mut R,
) -> [Vec<f32>; 2] {
    let len = (sample_rate * seconds).max(1.0) as usize;
    let mut channels = [Vec::with_capacity(len), Vec::with_capacity(len)];
    for i in 0..len {
        let envelope = (1.0 - i as f32 / len as f32).powf(decay);
        for ch in channels.iter_mut() {
            ch.push(rng.gen_range(-1.0..1.0_f32) * envelope);
        }
    }
    channels
}
