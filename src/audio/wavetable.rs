/// Number of samples in every wavetable (one full period)
pub const WAVETABLE_LENGTH: usize = 256;

/// One period of a periodic signal, stored as a fixed-length sample
/// sequence and read cyclically by the oscillator.
///
/// Immutable once generated; shared between threads behind an `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub struct Wavetable {
    samples: Box<[f32]>,
}

impl Wavetable {
    /// Wrap a generated sample sequence. Callers are expected to pass
    /// exactly `WAVETABLE_LENGTH` samples.
    pub fn from_samples(samples: Vec<f32>) -> Self {
        debug_assert_eq!(samples.len(), WAVETABLE_LENGTH);
        Self {
            samples: samples.into_boxed_slice(),
        }
    }

    /// An all-zero table of standard length, used when an out-of-range
    /// waveform selector crosses the binding boundary.
    pub fn silent() -> Self {
        Self {
            samples: vec![0.0; WAVETABLE_LENGTH].into_boxed_slice(),
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Sample value at an integer position
    #[inline]
    pub fn at(&self, index: usize) -> f32 {
        self.samples[index]
    }
}
