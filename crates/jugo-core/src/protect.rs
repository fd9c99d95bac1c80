//! Transparent peak protection for resonant material output.
//!
//! A slow-attack/fast-duck gain rider: whenever the instantaneous output
//! magnitude exceeds the ceiling, the gain snaps down to just under the
//! ratio that would bring the peak back to the ceiling; otherwise it
//! recovers toward unity a small step per sample. The gain never falls
//! below a floor, and callers apply a final hard clamp after this stage.

/// Peak-riding protection gain.
#[derive(Debug, Clone)]
pub struct PeakGuard {
    gain: f32,
    ceiling: f32,
}

impl PeakGuard {
    /// Output ceiling above which the gain ducks.
    pub const DEFAULT_CEILING: f32 = 0.88;
    /// Duck multiplier applied to the exact ceiling ratio.
    const DUCK: f32 = 0.98;
    /// Per-sample recovery rate toward unity gain.
    const RECOVERY: f32 = 0.0028;
    /// Lowest gain the guard will apply.
    const GAIN_FLOOR: f32 = 0.2;
    /// Final hard output bound applied by [`limit`](Self::limit).
    pub const OUTPUT_CLAMP: f32 = 0.98;

    /// Create a guard at the default ceiling with unity gain.
    pub fn new() -> Self {
        Self::with_ceiling(Self::DEFAULT_CEILING)
    }

    /// Create a guard with an explicit ceiling.
    pub fn with_ceiling(ceiling: f32) -> Self {
        Self { gain: 1.0, ceiling }
    }

    /// Update the gain for `input` and return the protected sample,
    /// hard-clamped to ±[`OUTPUT_CLAMP`](Self::OUTPUT_CLAMP).
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let peak = input.abs();
        if peak > self.ceiling {
            self.gain = self.gain.min((self.ceiling / peak) * Self::DUCK);
        } else {
            self.gain += (1.0 - self.gain) * Self::RECOVERY;
        }
        Self::limit(input * self.gain.clamp(Self::GAIN_FLOOR, 1.0))
    }

    /// Hard clamp to the final output bound.
    #[inline]
    pub fn limit(sample: f32) -> f32 {
        sample.clamp(-Self::OUTPUT_CLAMP, Self::OUTPUT_CLAMP)
    }

    /// Current protection gain.
    pub fn gain(&self) -> f32 {
        self.gain
    }

    /// Restore unity gain.
    pub fn reset(&mut self) {
        self.gain = 1.0;
    }
}

impl Default for PeakGuard {
    fn default() -> Self {
        Self::new()
    }
}
