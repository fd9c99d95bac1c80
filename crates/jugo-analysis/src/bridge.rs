//! Lock-free metric hand-off between audio and observer threads.
//!
//! The audio thread publishes a [`JuicinessMetrics`] after each block;
//! UI or logging threads read a snapshot whenever they like. Each field
//! is stored in its own `AtomicU32` as an `f32` bit pattern with relaxed
//! ordering, so a reader may see fields from two adjacent blocks mixed.
//! Metrics evolve smoothly block to block, so tearing across one block
//! boundary is acceptable for display purposes.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::metrics::JuicinessMetrics;

/// Shared metric cell, one atomic per field.
#[derive(Debug)]
pub struct MetricsBridge {
    score: AtomicU32,
    punch: AtomicU32,
    richness: AtomicU32,
    clarity: AtomicU32,
    width: AtomicU32,
    mono_safety: AtomicU32,
    emphasis: AtomicU32,
    coherence: AtomicU32,
    synesthesia: AtomicU32,
    fatigue_risk: AtomicU32,
    repetition_density: AtomicU32,
}

impl MetricsBridge {
    /// Create a bridge holding the silence default.
    pub fn new() -> Self {
        let bridge = Self {
            score: AtomicU32::new(0),
            punch: AtomicU32::new(0),
            richness: AtomicU32::new(0),
            clarity: AtomicU32::new(0),
            width: AtomicU32::new(0),
            mono_safety: AtomicU32::new(0),
            emphasis: AtomicU32::new(0),
            coherence: AtomicU32::new(0),
            synesthesia: AtomicU32::new(0),
            fatigue_risk: AtomicU32::new(0),
            repetition_density: AtomicU32::new(0),
        };
        bridge.publish(&JuicinessMetrics::default());
        bridge
    }

    /// Store a metric set. Wait-free; callable from the audio thread.
    pub fn publish(&self, m: &JuicinessMetrics) {
        self.score.store(m.score.to_bits(), Ordering::Relaxed);
        self.punch.store(m.punch.to_bits(), Ordering::Relaxed);
        self.richness.store(m.richness.to_bits(), Ordering::Relaxed);
        self.clarity.store(m.clarity.to_bits(), Ordering::Relaxed);
        self.width.store(m.width.to_bits(), Ordering::Relaxed);
        self.mono_safety.store(m.mono_safety.to_bits(), Ordering::Relaxed);
        self.emphasis.store(m.emphasis.to_bits(), Ordering::Relaxed);
        self.coherence.store(m.coherence.to_bits(), Ordering::Relaxed);
        self.synesthesia.store(m.synesthesia.to_bits(), Ordering::Relaxed);
        self.fatigue_risk.store(m.fatigue_risk.to_bits(), Ordering::Relaxed);
        self.repetition_density
            .store(m.repetition_density.to_bits(), Ordering::Relaxed);
    }

    /// Read the most recently published metric set.
    pub fn snapshot(&self) -> JuicinessMetrics {
        JuicinessMetrics {
            score: f32::from_bits(self.score.load(Ordering::Relaxed)),
            punch: f32::from_bits(self.punch.load(Ordering::Relaxed)),
            richness: f32::from_bits(self.richness.load(Ordering::Relaxed)),
            clarity: f32::from_bits(self.clarity.load(Ordering::Relaxed)),
            width: f32::from_bits(self.width.load(Ordering::Relaxed)),
            mono_safety: f32::from_bits(self.mono_safety.load(Ordering::Relaxed)),
            emphasis: f32::from_bits(self.emphasis.load(Ordering::Relaxed)),
            coherence: f32::from_bits(self.coherence.load(Ordering::Relaxed)),
            synesthesia: f32::from_bits(self.synesthesia.load(Ordering::Relaxed)),
            fatigue_risk: f32::from_bits(self.fatigue_risk.load(Ordering::Relaxed)),
            repetition_density: f32::from_bits(self.repetition_density.load(Ordering::Relaxed)),
        }
    }
}

impl Default for MetricsBridge {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn fresh_bridge_reads_silence_default() {
        let bridge = MetricsBridge::new();
        assert_eq!(bridge.snapshot(), JuicinessMetrics::default());
    }

    #[test]
    fn publish_then_snapshot_round_trips() {
        let bridge = MetricsBridge::new();
        let m = JuicinessMetrics {
            score: 72.5,
            punch: 0.8,
            richness: 0.6,
            clarity: 0.9,
            width: 0.4,
            mono_safety: 0.95,
            emphasis: 0.7,
            coherence: 0.85,
            synesthesia: 0.5,
            fatigue_risk: 0.2,
            repetition_density: 0.3,
        };
        bridge.publish(&m);
        assert_eq!(bridge.snapshot(), m);
    }

    #[test]
    fn shared_across_threads() {
        let bridge = Arc::new(MetricsBridge::new());
        let writer = Arc::clone(&bridge);
        let handle = std::thread::spawn(move || {
            let mut m = JuicinessMetrics::default();
            for i in 0..1000 {
                m.score = i as f32 / 10.0;
                writer.publish(&m);
            }
        });
        for _ in 0..1000 {
            let s = bridge.snapshot();
            assert!((0.0..=100.0).contains(&s.score));
        }
        handle.join().unwrap();
    }
}
