//! Real-time wavetable synthesizer core
//!
//! A control thread adjusts frequency, volume, and waveform shape while
//! a real-time render thread pulls samples one at a time; the render
//! path never blocks, allocates, or takes a lock. Waveform changes go
//! through a lock-free single-slot hand-off consumed between samples.

pub mod audio;
pub mod config;
pub mod error;
pub mod registry;
pub mod types;

pub use audio::factory::WavetableFactory;
pub use audio::oscillator::WavetableOscillator;
pub use audio::player::{AudioPlayer, CpalAudioPlayer};
pub use audio::source::{A4Oscillator, AudioSource};
pub use audio::synthesizer::{db_to_amplitude, AudioSynthesizer, SAMPLE_RATE};
pub use audio::wavetable::{Wavetable, WAVETABLE_LENGTH};
pub use config::DemoConfig;
pub use error::PlayerError;
pub use registry::SynthRegistry;
pub use types::waveform::Waveform;
