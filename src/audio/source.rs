use std::f32::consts::PI;

use crossbeam::atomic::AtomicCell;

/// Capability consumed by the output driver
///
/// The driver pulls one sample per frame from the render thread, so
/// implementations must never block, allocate, or panic inside
/// `get_sample`. `on_playback_stopped` is invoked from the control
/// thread after the stream has been torn down.
pub trait AudioSource: Send + Sync {
    /// Produce the next output sample
    fn get_sample(&self) -> f32;

    /// Notification that streaming stopped; restart phase from the origin
    fn on_playback_stopped(&self);
}

/// Fixed 440 Hz reference oscillator
///
/// Plays a half-amplitude sine regardless of any parameter surface.
/// Useful as a known-good source when debugging the output driver.
pub struct A4Oscillator {
    phase: AtomicCell<f32>,
    phase_increment: f32,
}

impl A4Oscillator {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            phase: AtomicCell::new(0.0),
            phase_increment: 440.0 / sample_rate * 2.0 * PI,
        }
    }
}

impl AudioSource for A4Oscillator {
    fn get_sample(&self) -> f32 {
        let phase = self.phase.load();
        let sample = 0.5 * phase.sin();
        self.phase.store((phase + self.phase_increment) % (2.0 * PI));
        sample
    }

    fn on_playback_stopped(&self) {
        self.phase.store(0.0);
    }
}
