use rand::Rng;
use serde::{Deserialize, Serialize};

/// Oscillator shape used when a tone is voiced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    #[default]
    Sine,
    Triangle,
    Square,
    #[serde(rename = "sawtooth")]
    Saw,
}

impl Waveform {
    pub const ALL: [Waveform; 4] = [
        Waveform::Sine,
        Waveform::Triangle,
        Waveform::Square,
        Waveform::Saw,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Waveform::Sine => "sine",
            Waveform::Triangle => "triangle",
            Waveform::Square => "square",
            Waveform::Saw => "sawtooth",
        }
    }

    /// Next waveform in `ALL`, wrapping around.
    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|w| *w == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }
}

/// Named scale whose steps are expressed as frequency ratios over a root.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scale {
    #[default]
    Pentatonic,
    Phrygian,
    Chromatic,
}

/// Ratio tables; every table spans less than one octave so that stepping
/// past the end wraps into the next octave.
pub const PENTATONIC_RATIOS: &[f32] = &[1.0, 1.125, 1.25, 1.5, 1.66];
pub const PHRYGIAN_RATIOS: &[f32] = &[1.0, 1.06, 1.25, 1.33, 1.5];
pub const CHROMATIC_RATIOS: &[f32] = &[1.0, 1.059, 1.122, 1.189, 1.26];

/// Detune applied to every quantized pitch, as a fraction of the frequency.
pub const DETUNE_SPREAD: f32 = 0.005;

impl Scale {
    pub const ALL: [Scale; 3] = [Scale::Pentatonic, Scale::Phrygian, Scale::Chromatic];

    pub fn ratios(self) -> &'static [f32] {
        match self {
            Scale::Pentatonic => PENTATONIC_RATIOS,
            Scale::Phrygian => PHRYGIAN_RATIOS,
            Scale::Chromatic => CHROMATIC_RATIOS,
        }
    }

    pub fn step_count(self) -> usize {
        self.ratios().len()
    }

    pub fn name(self) -> &'static str {
        match self {
            Scale::Pentatonic => "pentatonic",
            Scale::Phrygian => "phrygian",
            Scale::Chromatic => "chromatic",
        }
    }

    /// Root used by the radar console for this scale; phrygian sits lower.
    pub fn console_root_hz(self) -> f32 {
        match self {
            Scale::Phrygian => 80.0,
            _ => 110.0,
        }
    }

    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }
}

/// Deterministic part of the pitch quantizer.
///
/// `octave = index / len`, `step = index % len`, and the result is
/// `root * ratio[step] * 2^octave`. Adding `scale.len()` to `index` exactly
/// doubles the output.
pub fn quantize_step(index: u32, scale: Scale, root_hz: f32) -> f32 {
    let ratios = scale.ratios();
    let len = ratios.len() as u32;
    let octave = index / len;
    let step = (index % len) as usize;
    root_hz * ratios[step] * 2.0_f32.powi(octave as i32)
}

/// Multiplicative detune factor drawn from `1 ± DETUNE_SPREAD`.
pub fn detune_factor<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    1.0 + rng.gen_range(-DETUNE_SPREAD..DETUNE_SPREAD)
}

/// Map an integer step to a frequency with a small organic detune.
pub fn note_frequency<R: Rng + ?Sized>(index: u32, scale: Scale, root_hz: f32, rng: &mut R) -> f32 {
    quantize_step(index, scale, root_hz) * detune_factor(rng)
}
