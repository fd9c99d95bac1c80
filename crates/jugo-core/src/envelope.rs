//! Asymmetric attack/release envelope follower.
//!
//! The follower blends toward the input with the attack coefficient while the
//! input exceeds the current envelope, and with the release coefficient
//! otherwise:
//!
//! ```text
//! coeff = if x > env { attack } else { release }
//! env   = (1 - coeff) * x + coeff * env
//! ```
//!
//! Coefficients are `exp(-1 / (sample_rate * seconds))`, so the envelope
//! settles to ~63% of a step within the configured time constant. This is
//! the leaf primitive behind transient detection, impact/body drive signals,
//! and the wet-level tracker of the auto-gain stage.

use crate::math::time_coeff;

/// Envelope follower with independent attack and release time constants.
///
/// Callers decide the rectification semantics: feed `x.abs()` for an
/// energy-like envelope, or the raw signed signal for tonal tracking.
#[derive(Debug, Clone)]
pub struct EnvelopeFollower {
    env: f32,
    attack_coeff: f32,
    release_coeff: f32,
    sample_rate: f32,
    attack_secs: f32,
    release_secs: f32,
}

impl EnvelopeFollower {
    /// Create a follower with attack/release time constants in seconds.
    pub fn new(sample_rate: f32, attack_secs: f32, release_secs: f32) -> Self {
        let mut follower = Self {
            env: 0.0,
            attack_coeff: 0.0,
            release_coeff: 0.0,
            sample_rate,
            attack_secs,
            release_secs,
        };
        follower.recalculate();
        follower
    }

    /// Advance the envelope by one sample of `input` and return the new level.
    #[inline]
    pub fn track(&mut self, input: f32) -> f32 {
        let coeff = if input > self.env {
            self.attack_coeff
        } else {
            self.release_coeff
        };
        self.env = (1.0 - coeff) * input + coeff * self.env;
        self.env
    }

    /// Advance on the rectified magnitude of `input`.
    #[inline]
    pub fn track_magnitude(&mut self, input: f32) -> f32 {
        self.track(input.abs())
    }

    /// Current envelope level without consuming a sample.
    pub fn level(&self) -> f32 {
        self.env
    }

    /// Update both time constants.
    pub fn set_times(&mut self, attack_secs: f32, release_secs: f32) {
        self.attack_secs = attack_secs;
        self.release_secs = release_secs;
        self.recalculate();
    }

    /// Update sample rate, preserving the time constants.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.recalculate();
    }

    /// Zero the envelope state.
    pub fn reset(&mut self) {
        self.env = 0.0;
    }

    fn recalculate(&mut self) {
        self.attack_coeff = time_coeff(self.sample_rate, self.attack_secs);
        self.release_coeff = time_coeff(self.sample_rate, self.release_secs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rises_on_attack() {
        let mut env = EnvelopeFollower::new(48000.0, 0.001, 0.1);
        let mut level = 0.0;
        for _ in 0..500 {
            level = env.track(1.0);
        }
        assert!(level > 0.9, "envelope should rise, got {level}");
    }

    #[test]
    fn falls_on_release() {
        let mut env = EnvelopeFollower::new(48000.0, 0.001, 0.01);
        for _ in 0..500 {
            env.track(1.0);
        }
        let mut level = 0.0;
        for _ in 0..1000 {
            level = env.track(0.0);
        }
        // ~2 release time constants: expect roughly e^-2.
        assert!(level < 0.15, "envelope should fall, got {level}");
    }

    #[test]
    fn asymmetry_attack_faster_than_release() {
        let mut env = EnvelopeFollower::new(48000.0, 0.003, 0.3);
        for _ in 0..288 {
            env.track(1.0);
        }
        let after_attack = env.level();
        for _ in 0..288 {
            env.track(0.0);
        }
        let after_release = env.level();
        // 6 ms of attack should move much further than 6 ms of release.
        assert!(after_attack > 0.8);
        assert!(after_release > 0.9 * after_attack);
    }

    #[test]
    fn magnitude_rectifies() {
        let mut env = EnvelopeFollower::new(48000.0, 0.001, 0.1);
        assert!(env.track_magnitude(-0.5) > 0.0);
    }

    #[test]
    fn reset_clears() {
        let mut env = EnvelopeFollower::new(48000.0, 0.01, 0.1);
        env.track(1.0);
        env.reset();
        assert_eq!(env.level(), 0.0);
    }
}
