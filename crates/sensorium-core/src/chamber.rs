use std::fmt;
use std::str::FromStr;

/// The fixed set of chambers the shell can mount, in navigation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChamberId {
    Field,
    Digitizer,
    Radar,
    Kaleidoscope,
    Ink,
}

impl ChamberId {
    pub const ALL: [ChamberId; 5] = [
        ChamberId::Field,
        ChamberId::Digitizer,
        ChamberId::Radar,
        ChamberId::Kaleidoscope,
        ChamberId::Ink,
    ];

    /// Stable identifier used in element ids and the URL hash.
    pub fn as_str(self) -> &'static str {
        match self {
            ChamberId::Field => "spectrum",
            ChamberId::Digitizer => "biomesh",
            ChamberId::Radar => "console",
            ChamberId::Kaleidoscope => "source",
            ChamberId::Ink => "ink",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ChamberId::Field => "PRISM",
            ChamberId::Digitizer => "BIOMESH",
            ChamberId::Radar => "CONSOLE",
            ChamberId::Kaleidoscope => "SOURCE",
            ChamberId::Ink => "TATTOO",
        }
    }

    /// Chambers that read the shared camera stream.
    pub fn uses_video(self) -> bool {
        !matches!(self, ChamberId::Radar)
    }

    /// Chambers that run the hand pose pipeline.
    pub fn uses_pose(self) -> bool {
        matches!(self, ChamberId::Field | ChamberId::Ink)
    }

    /// Digit keys `1`..`5` select chambers in navigation order.
    pub fn for_digit(key: &str) -> Option<Self> {
        let n: usize = key.parse().ok()?;
        n.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }
}

impl fmt::Display for ChamberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown chamber `{0}`")]
pub struct UnknownChamber(pub String);

impl FromStr for ChamberId {
    type Err = UnknownChamber;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().trim_start_matches('#');
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(key))
            .ok_or_else(|| UnknownChamber(s.to_string()))
    }
}
