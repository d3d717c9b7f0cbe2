use slotmap::{new_key_type, Key, KeyData, SlotMap};

use crate::audio::synthesizer::AudioSynthesizer;

new_key_type! {
    struct SynthKey;
}

/// Handle-based control surface for binding layers
///
/// Owns synthesizer instances and exposes every operation through an
/// opaque `u64` handle, the shape a foreign-function boundary expects.
/// Operations on destroyed or unknown handles are no-ops with a
/// diagnostic log line, never a panic.
pub struct SynthRegistry {
    synths: SlotMap<SynthKey, AudioSynthesizer>,
}

impl SynthRegistry {
    pub fn new() -> Self {
        Self {
            synths: SlotMap::with_key(),
        }
    }

    /// Create a synthesizer and return its handle
    pub fn create(&mut self) -> u64 {
        self.insert(AudioSynthesizer::new())
    }

    /// Register an existing synthesizer (custom driver, tests)
    pub fn insert(&mut self, synth: AudioSynthesizer) -> u64 {
        let key = self.synths.insert(synth);
        log::debug!("Created synthesizer handle {:x}", key.data().as_ffi());
        key.data().as_ffi()
    }

    /// Destroy the synthesizer behind a handle, stopping it first
    pub fn destroy(&mut self, handle: u64) {
        match self.synths.remove(Self::key(handle)) {
            Some(synth) => synth.stop(),
            None => log::warn!("destroy() on unknown handle {:x}", handle),
        }
    }

    pub fn play(&self, handle: u64) -> bool {
        let Some(synth) = self.get(handle, "play") else {
            return false;
        };
        match synth.play() {
            Ok(()) => true,
            Err(err) => {
                log::error!("play() failed: {}", err);
                false
            }
        }
    }

    pub fn stop(&self, handle: u64) {
        if let Some(synth) = self.get(handle, "stop") {
            synth.stop();
        }
    }

    pub fn is_playing(&self, handle: u64) -> bool {
        self.get(handle, "is_playing")
            .map(AudioSynthesizer::is_playing)
            .unwrap_or(false)
    }

    pub fn set_frequency(&self, handle: u64, frequency_hz: f32) {
        if let Some(synth) = self.get(handle, "set_frequency") {
            synth.set_frequency(frequency_hz);
        }
    }

    pub fn set_volume(&self, handle: u64, volume_db: f32) {
        if let Some(synth) = self.get(handle, "set_volume") {
            synth.set_volume(volume_db);
        }
    }

    /// Select a waveform by raw integer selector; out-of-range values
    /// select the silent table downstream
    pub fn set_waveform(&self, handle: u64, kind: i32) {
        if let Some(synth) = self.get(handle, "set_waveform") {
            synth.set_waveform_raw(kind);
        }
    }

    fn key(handle: u64) -> SynthKey {
        KeyData::from_ffi(handle).into()
    }

    fn get(&self, handle: u64, operation: &str) -> Option<&AudioSynthesizer> {
        let synth = self.synths.get(Self::key(handle));
        if synth.is_none() {
            log::warn!("{}() on unknown handle {:x}", operation, handle);
        }
        synth
    }
}

impl Default for SynthRegistry {
    fn default() -> Self {
        Self::new()
    }
}
