use std::f32::consts::PI;
use std::sync::Arc;

use super::wavetable::{Wavetable, WAVETABLE_LENGTH};
use crate::types::waveform::Waveform;

/// Generates and memoizes the canonical wavetables
///
/// Each table is computed lazily on first request and cached for the
/// factory's lifetime, so repeated requests for the same waveform
/// return the same allocation. The cache is only ever touched from the
/// control thread; the render thread sees finished tables behind `Arc`s.
pub struct WavetableFactory {
    sine: Option<Arc<Wavetable>>,
    triangle: Option<Arc<Wavetable>>,
    square: Option<Arc<Wavetable>>,
    saw: Option<Arc<Wavetable>>,
    silent: Option<Arc<Wavetable>>,
}

impl WavetableFactory {
    pub fn new() -> Self {
        Self {
            sine: None,
            triangle: None,
            square: None,
            saw: None,
            silent: None,
        }
    }

    /// Get the table for a waveform, generating it on first use
    pub fn wave_table(&mut self, waveform: Waveform) -> Arc<Wavetable> {
        match waveform {
            Waveform::Sine => Self::table_once(&mut self.sine, generate_sine),
            Waveform::Triangle => Self::table_once(&mut self.triangle, generate_triangle),
            Waveform::Square => Self::table_once(&mut self.square, generate_square),
            Waveform::Saw => Self::table_once(&mut self.saw, generate_saw),
        }
    }

    /// Resolve a raw integer selector; out-of-range values degrade to
    /// the silent table instead of failing.
    pub fn wave_table_for_raw(&mut self, raw: i32) -> Arc<Wavetable> {
        match Waveform::from_raw(raw) {
            Some(waveform) => self.wave_table(waveform),
            None => self.silent_table(),
        }
    }

    /// The memoized all-zero table
    pub fn silent_table(&mut self) -> Arc<Wavetable> {
        Self::table_once(&mut self.silent, || Wavetable::silent())
    }

    fn table_once(
        slot: &mut Option<Arc<Wavetable>>,
        generator: impl FnOnce() -> Wavetable,
    ) -> Arc<Wavetable> {
        slot.get_or_insert_with(|| Arc::new(generator())).clone()
    }
}

impl Default for WavetableFactory {
    fn default() -> Self {
        Self::new()
    }
}

/// Sine table sampled directly from the trigonometric function
fn generate_sine() -> Wavetable {
    let samples = (0..WAVETABLE_LENGTH)
        .map(|i| (2.0 * PI * i as f32 / WAVETABLE_LENGTH as f32).sin())
        .collect();

    Wavetable::from_samples(samples)
}

/// Triangle approximated by additive synthesis: six odd harmonics with
/// alternating sign and inverse-square amplitude decay, scaled so the
/// fundamental carries the 8/pi^2 weight of the analytic series.
fn generate_triangle() -> Wavetable {
    const HARMONICS: usize = 6;

    let mut samples = vec![0.0f32; WAVETABLE_LENGTH];

    for k in 0..HARMONICS {
        let n = (2 * k + 1) as f32;
        let sign = if k % 2 == 0 { 1.0 } else { -1.0 };
        let coefficient = 8.0 / (PI * PI) * sign / (n * n);

        for (j, sample) in samples.iter_mut().enumerate() {
            let phase = 2.0 * PI * j as f32 / WAVETABLE_LENGTH as f32;
            *sample += coefficient * (n * phase).sin();
        }
    }

    Wavetable::from_samples(samples)
}

/// Square approximated by twelve odd harmonics with inverse-linear
/// amplitude decay, scaled by 4/pi
fn generate_square() -> Wavetable {
    const HARMONICS: usize = 12;

    let mut samples = vec![0.0f32; WAVETABLE_LENGTH];

    for i in 1..=HARMONICS {
        let n = (2 * i - 1) as f32;
        let coefficient = 4.0 / PI / n;

        for (j, sample) in samples.iter_mut().enumerate() {
            let phase = 2.0 * PI * j as f32 / WAVETABLE_LENGTH as f32;
            *sample += coefficient * (n * phase).sin();
        }
    }

    Wavetable::from_samples(samples)
}

/// Saw approximated by twelve harmonics with alternating sign and
/// inverse-linear amplitude decay, scaled by 2/pi
fn generate_saw() -> Wavetable {
    const HARMONICS: usize = 12;

    let mut samples = vec![0.0f32; WAVETABLE_LENGTH];

    for i in 1..=HARMONICS {
        let n = i as f32;
        let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
        let coefficient = 2.0 / PI * sign / n;

        for (j, sample) in samples.iter_mut().enumerate() {
            let phase = 2.0 * PI * j as f32 / WAVETABLE_LENGTH as f32;
            *sample += coefficient * (n * phase).sin();
        }
    }

    Wavetable::from_samples(samples)
}
