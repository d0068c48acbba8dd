use std::sync::{
    Arc,
    atomic::{AtomicU32, Ordering},
};

/// Peak absolute amplitude seen since the last read.
///
/// Written by the capture callback, drained by the level sampler. Stored as
/// `f32` bits; amplitudes are non-negative, so their bit patterns order the
/// same way as the values.
#[derive(Debug, Clone, Default)]
pub struct LevelProbe {
    peak_bits: Arc<AtomicU32>,
}

impl LevelProbe {
    /// Raises the stored peak to `amplitude` if it is larger.
    pub fn record_peak(&self, amplitude: f32) {
        let amplitude = amplitude.abs();
        if !amplitude.is_finite() {
            return;
        }
        self.peak_bits
            .fetch_max(amplitude.to_bits(), Ordering::AcqRel);
    }

    /// Returns the peak since the last call and resets it to zero.
    pub fn take_peak(&self) -> f32 {
        f32::from_bits(self.peak_bits.swap(0, Ordering::AcqRel))
    }
}
