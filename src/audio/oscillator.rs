use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use crossbeam::atomic::AtomicCell;

use super::params::AtomicF32;
use super::source::AudioSource;
use super::wavetable::{Wavetable, WAVETABLE_LENGTH};

/// Wavetable oscillator with lock-free parameter and table updates
///
/// Shared between the control thread (parameter setters) and the
/// real-time render thread (`get_sample`), so every field uses interior
/// mutability. The render path performs only atomic operations: no
/// locks, no allocation.
///
/// Table replacement uses a single-slot mailbox guarded by two flags.
/// The control thread stages the next table and raises
/// `swap_requested`; the render thread consumes it exactly once at the
/// start of a sample. `swap_in_progress` brackets that consume window
/// so the control thread can spin (on its own thread, never the render
/// thread) until it is safe to restage. A second `set_wavetable` before
/// the first is consumed overwrites the staged table, last-writer-wins.
pub struct WavetableOscillator {
    /// Active table; only the render thread takes and restores it
    table: AtomicCell<Option<Arc<Wavetable>>>,
    /// Staged table written by the control thread
    pending: AtomicCell<Option<Arc<Wavetable>>>,
    swap_requested: AtomicBool,
    swap_in_progress: AtomicBool,
    /// Number of swaps the render thread has consumed
    swaps_applied: AtomicU64,
    /// Fractional read position in [0, WAVETABLE_LENGTH)
    index: AtomicCell<f32>,
    /// Per-sample index advance: frequency * table length / sample rate
    index_increment: AtomicF32,
    /// Linear gain applied to every output sample
    amplitude: AtomicF32,
    sample_rate: f32,
}

impl WavetableOscillator {
    pub fn new(table: Arc<Wavetable>, sample_rate: f32) -> Self {
        Self {
            table: AtomicCell::new(Some(table)),
            pending: AtomicCell::new(None),
            swap_requested: AtomicBool::new(false),
            swap_in_progress: AtomicBool::new(false),
            swaps_applied: AtomicU64::new(0),
            index: AtomicCell::new(0.0),
            index_increment: AtomicF32::new(0.0),
            amplitude: AtomicF32::new(1.0),
            sample_rate,
        }
    }

    /// Recompute the index increment for a new frequency in Hz
    pub fn set_frequency(&self, frequency: f32) {
        let increment = frequency * WAVETABLE_LENGTH as f32 / self.sample_rate;
        self.index_increment.store(increment, Ordering::Relaxed);
    }

    /// Set the linear gain. Takes effect on the next sample with no
    /// ramping; callers needing click-free changes must smooth upstream.
    pub fn set_amplitude(&self, amplitude: f32) {
        self.amplitude.store(amplitude, Ordering::Relaxed);
    }

    /// Stage a new wavetable for the render thread to pick up
    ///
    /// Called from the control thread. Spins briefly if the render
    /// thread is inside its consume window, then stages the table and
    /// raises the request flag. The Release store ensures the render
    /// thread observes a fully-written staged slot once it sees the
    /// flag.
    pub fn set_wavetable(&self, table: Arc<Wavetable>) {
        self.swap_requested.store(false, Ordering::Release);
        while self.swap_in_progress.load(Ordering::Acquire) {
            std::hint::spin_loop();
        }

        self.pending.store(Some(table));
        self.swap_requested.store(true, Ordering::Release);
    }

    /// Number of table swaps consumed by the render thread so far
    pub fn swap_count(&self) -> u64 {
        self.swaps_applied.load(Ordering::Relaxed)
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    fn swap_wavetable_if_necessary(&self) {
        self.swap_in_progress.store(true, Ordering::Release);
        if self.swap_requested.load(Ordering::Acquire) {
            if let Some(next) = self.pending.take() {
                // The previous table drops here; the factory cache
                // still holds a reference, so the render thread never
                // frees the allocation.
                self.table.store(Some(next));
                self.swaps_applied.fetch_add(1, Ordering::Relaxed);
            }
            self.swap_requested.store(false, Ordering::Relaxed);
        }
        self.swap_in_progress.store(false, Ordering::Release);
    }
}

impl AudioSource for WavetableOscillator {
    fn get_sample(&self) -> f32 {
        self.swap_wavetable_if_necessary();

        // The active slot is only ever empty if a second consumer runs
        // concurrently, which is a documented caller precondition
        // violation; emit silence rather than panic.
        let Some(table) = self.table.take() else {
            return 0.0;
        };

        let mut index = self.index.load() % table.len() as f32;
        let sample = interpolate_linear(&table, index);
        index += self.index_increment.load(Ordering::Relaxed);
        self.index.store(index);
        self.table.store(Some(table));

        self.amplitude.load(Ordering::Relaxed) * sample
    }

    fn on_playback_stopped(&self) {
        self.index.store(0.0);
    }
}

/// Linear interpolation between the two entries bracketing `index`
///
/// The last entry interpolates toward entry 0, preserving periodicity
/// with no discontinuity at the table boundary.
#[inline]
fn interpolate_linear(table: &Wavetable, index: f32) -> f32 {
    let truncated = index as usize;
    let next = (truncated + 1) % table.len();
    let weight = index - truncated as f32;

    table.at(next) * weight + (1.0 - weight) * table.at(truncated)
}
