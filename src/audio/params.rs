use std::sync::atomic::{AtomicU32, Ordering};

/// Atomic f32 wrapper for lock-free parameter updates
///
/// Stores the float as its raw bit pattern in an `AtomicU32` so the
/// real-time audio thread can read parameters without blocking.
pub struct AtomicF32 {
    storage: AtomicU32,
}

impl AtomicF32 {
    pub fn new(value: f32) -> Self {
        Self {
            storage: AtomicU32::new(value.to_bits()),
        }
    }

    pub fn load(&self, ordering: Ordering) -> f32 {
        f32::from_bits(self.storage.load(ordering))
    }

    pub fn store(&self, value: f32, ordering: Ordering) {
        self.storage.store(value.to_bits(), ordering);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_load_round_trip() {
        let value = AtomicF32::new(0.0);
        value.store(440.0, Ordering::Relaxed);
        assert_eq!(value.load(Ordering::Relaxed), 440.0);
    }

    #[test]
    fn test_preserves_exact_bits() {
        let value = AtomicF32::new(f32::MIN_POSITIVE);
        assert_eq!(value.load(Ordering::Relaxed), f32::MIN_POSITIVE);
        value.store(-0.0, Ordering::Relaxed);
        assert!(value.load(Ordering::Relaxed).is_sign_negative());
    }
}
