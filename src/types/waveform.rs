use serde::{Deserialize, Serialize};

/// Supported waveform shapes for the wavetable oscillator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    Sine,
    Triangle,
    Square,
    Saw,
}

impl Default for Waveform {
    fn default() -> Self {
        Waveform::Sine
    }
}

impl Waveform {
    /// Convert to the integer selector used across the binding boundary
    pub fn to_raw(self) -> i32 {
        match self {
            Waveform::Sine => 0,
            Waveform::Triangle => 1,
            Waveform::Square => 2,
            Waveform::Saw => 3,
        }
    }

    /// Decode an integer selector. Out-of-range values yield `None`;
    /// callers map that to the silent table rather than an error.
    pub fn from_raw(value: i32) -> Option<Self> {
        match value {
            0 => Some(Waveform::Sine),
            1 => Some(Waveform::Triangle),
            2 => Some(Waveform::Square),
            3 => Some(Waveform::Saw),
            _ => None,
        }
    }
}
