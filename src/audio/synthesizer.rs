use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crossbeam::atomic::AtomicCell;

use super::factory::WavetableFactory;
use super::oscillator::WavetableOscillator;
use super::player::{AudioPlayer, CpalAudioPlayer};
use super::source::AudioSource;
use crate::error::PlayerError;
use crate::types::waveform::Waveform;

/// Sample rate of every synthesizer instance, in Hz
pub const SAMPLE_RATE: u32 = 48000;

/// Convert a volume in decibels to a linear gain factor
pub fn db_to_amplitude(db: f32) -> f32 {
    10.0f32.powf(db / 20.0)
}

/// One oscillator plus one output driver, with transport and parameter
/// control
///
/// Transport operations (`play`, `stop`) serialize against each other
/// with a mutex that is never touched by the render thread. Parameter
/// setters forward straight to the oscillator's atomics so they stay
/// callable from the control thread while audio is rendering.
pub struct AudioSynthesizer {
    oscillator: Arc<WavetableOscillator>,
    factory: Mutex<WavetableFactory>,
    /// Raw selector of the active wavetable, for idempotence checks
    current_wave: AtomicCell<i32>,
    is_playing: AtomicBool,
    player: Mutex<Box<dyn AudioPlayer>>,
}

impl AudioSynthesizer {
    /// Create a synthesizer driving the default cpal output device
    pub fn new() -> Self {
        Self::with_player(|source| Box::new(CpalAudioPlayer::new(source, SAMPLE_RATE)))
    }

    /// Create a synthesizer with a custom output driver
    ///
    /// The driver receives the shared oscillator as its audio source;
    /// both stay alive for as long as callbacks may fire.
    pub fn with_player<F>(make_player: F) -> Self
    where
        F: FnOnce(Arc<dyn AudioSource>) -> Box<dyn AudioPlayer>,
    {
        let mut factory = WavetableFactory::new();
        let initial = Waveform::default();
        let oscillator = Arc::new(WavetableOscillator::new(
            factory.wave_table(initial),
            SAMPLE_RATE as f32,
        ));
        let player = make_player(oscillator.clone());

        Self {
            oscillator,
            factory: Mutex::new(factory),
            current_wave: AtomicCell::new(initial.to_raw()),
            is_playing: AtomicBool::new(false),
            player: Mutex::new(player),
        }
    }

    /// Open and start the output stream
    ///
    /// On failure the synthesizer stays stopped and the driver error is
    /// returned; the caller may retry later.
    pub fn play(&self) -> Result<(), PlayerError> {
        let mut player = self.player.lock().expect("transport mutex poisoned");
        log::debug!("play() requested");

        match player.play() {
            Ok(()) => {
                self.is_playing.store(true, Ordering::Relaxed);
                Ok(())
            }
            Err(err) => {
                self.is_playing.store(false, Ordering::Relaxed);
                Err(err)
            }
        }
    }

    /// Stop and close the output stream. Safe to call while stopped.
    pub fn stop(&self) {
        let mut player = self.player.lock().expect("transport mutex poisoned");
        log::debug!("stop() requested");

        player.stop();
        self.is_playing.store(false, Ordering::Relaxed);
    }

    /// Lock-free read of the transport flag; may be momentarily stale
    /// while a concurrent play()/stop() is in flight
    pub fn is_playing(&self) -> bool {
        self.is_playing.load(Ordering::Relaxed)
    }

    /// Set the oscillator frequency in Hz
    pub fn set_frequency(&self, frequency_hz: f32) {
        log::debug!("set_frequency({} Hz)", frequency_hz);
        self.oscillator.set_frequency(frequency_hz);
    }

    /// Set the output volume in decibels (0 dB is unity gain)
    pub fn set_volume(&self, volume_db: f32) {
        let amplitude = db_to_amplitude(volume_db);
        log::debug!("set_volume({} dB -> gain {})", volume_db, amplitude);
        self.oscillator.set_amplitude(amplitude);
    }

    /// Select the active waveform
    pub fn set_waveform(&self, waveform: Waveform) {
        self.set_waveform_raw(waveform.to_raw());
    }

    /// Select the active waveform by raw integer selector
    ///
    /// Out-of-range selectors switch to the silent table. Requesting
    /// the selector that is already active is a no-op, avoiding a
    /// pointless swap handshake.
    pub fn set_waveform_raw(&self, raw: i32) {
        if self.current_wave.swap(raw) == raw {
            return;
        }

        log::debug!("set_waveform_raw({})", raw);
        let table = self
            .factory
            .lock()
            .expect("factory mutex poisoned")
            .wave_table_for_raw(raw);
        self.oscillator.set_wavetable(table);
    }
}

impl Default for AudioSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    /// Driver stand-in recording transport calls; forwards stop
    /// notifications to the source like the real driver does.
    struct FakePlayer {
        source: Arc<dyn AudioSource>,
        stats: Arc<PlayerStats>,
        fail_play: bool,
    }

    #[derive(Default)]
    struct PlayerStats {
        plays: AtomicUsize,
        stops: AtomicUsize,
    }

    impl AudioPlayer for FakePlayer {
        fn play(&mut self) -> Result<(), PlayerError> {
            self.stats.plays.fetch_add(1, Ordering::Relaxed);
            if self.fail_play {
                Err(PlayerError::NoDevice)
            } else {
                Ok(())
            }
        }

        fn stop(&mut self) {
            self.stats.stops.fetch_add(1, Ordering::Relaxed);
            self.source.on_playback_stopped();
        }
    }

    fn test_synth(fail_play: bool) -> (AudioSynthesizer, Arc<PlayerStats>) {
        let stats = Arc::new(PlayerStats::default());
        let player_stats = stats.clone();
        let synth = AudioSynthesizer::with_player(move |source| {
            Box::new(FakePlayer {
                source,
                stats: player_stats,
                fail_play,
            })
        });
        (synth, stats)
    }

    #[test]
    fn test_db_to_amplitude() {
        assert!((db_to_amplitude(0.0) - 1.0).abs() < 1e-6);
        assert!((db_to_amplitude(-20.0) - 0.1).abs() < 1e-6);
        assert!((db_to_amplitude(20.0) - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_play_marks_playing() {
        let (synth, stats) = test_synth(false);
        assert!(!synth.is_playing());

        synth.play().unwrap();
        assert!(synth.is_playing());
        assert_eq!(stats.plays.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_failed_play_stays_stopped() {
        let (synth, _stats) = test_synth(true);
        assert!(synth.play().is_err());
        assert!(!synth.is_playing());
    }

    #[test]
    fn test_stop_while_stopped_is_noop() {
        let (synth, stats) = test_synth(false);
        synth.stop();
        assert!(!synth.is_playing());
        // The driver is still asked to stop; it owns its own idempotence
        assert_eq!(stats.stops.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_play_after_stop_restarts_phase() {
        let (synth, _stats) = test_synth(false);
        synth.set_frequency(440.0);
        synth.play().unwrap();

        // Advance the oscillator as the render thread would
        for _ in 0..100 {
            synth.oscillator.get_sample();
        }
        synth.stop();
        synth.play().unwrap();

        // First sample after restart is the sine table origin
        assert_eq!(synth.oscillator.get_sample(), 0.0);
    }

    #[test]
    fn test_identical_waveform_request_skips_handshake() {
        let (synth, _stats) = test_synth(false);

        // Sine is active from construction
        synth.set_waveform(Waveform::Sine);
        synth.oscillator.get_sample();
        assert_eq!(synth.oscillator.swap_count(), 0);

        synth.set_waveform(Waveform::Square);
        synth.oscillator.get_sample();
        assert_eq!(synth.oscillator.swap_count(), 1);

        synth.set_waveform(Waveform::Square);
        synth.oscillator.get_sample();
        assert_eq!(synth.oscillator.swap_count(), 1);
    }

    #[test]
    fn test_out_of_range_selector_goes_silent() {
        let (synth, _stats) = test_synth(false);
        synth.set_frequency(440.0);
        synth.set_volume(0.0);
        synth.set_waveform_raw(99);

        for _ in 0..1000 {
            assert_eq!(synth.oscillator.get_sample(), 0.0);
        }
    }

    #[test]
    fn test_volume_reaches_render_path() {
        let (synth, _stats) = test_synth(false);
        synth.set_frequency(1500.0);
        synth.set_volume(-20.0);

        let quiet: Vec<f32> = (0..32).map(|_| synth.oscillator.get_sample()).collect();
        synth.oscillator.on_playback_stopped();
        synth.set_volume(0.0);
        let loud: Vec<f32> = (0..32).map(|_| synth.oscillator.get_sample()).collect();

        for (q, l) in quiet.iter().zip(&loud) {
            assert!((q - 0.1 * l).abs() < 1e-6);
        }
    }
}
