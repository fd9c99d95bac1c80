//! Bank of damped two-pole modal resonators.
//!
//! Each mode is the standard resonator recursion with a pole pair at radius
//! `r` and angle `θ`:
//!
//! ```text
//! r  = exp(ln(0.001) / (t60 * sr))
//! θ  = 2π·f / sr
//! a1 = 2r·cos(θ)
//! a2 = -r²
//! y[n] = excitation·gain + a1·y[n-1] + a2·y[n-2]
//! ```
//!
//! The pole radius is chosen so the impulse response decays to −60 dB at
//! exactly `t60` seconds. Material models drive four modes at harmonically or
//! inharmonically related frequencies with decreasing gain and decay for the
//! higher partials.

use libm::{cosf, expf};

/// ln(0.001): −60 dB expressed as a natural log amplitude ratio.
const LN_MINUS_60_DB: f32 = -6.907_755_3;

/// Lowest resonant frequency a mode will accept, in Hz.
const MIN_FREQ_HZ: f32 = 20.0;

/// Shortest 60 dB decay a mode will accept, in seconds. Shorter times push
/// the pole radius toward zero and the recursion loses its resonant form.
const MIN_T60_SECS: f32 = 0.02;

/// A bank of `N` independent modal resonators sharing a sample rate.
///
/// Frequencies, decay times, and gains are supplied per call so callers can
/// bend them sample-by-sample (impact-dependent pitch bend, damping-scaled
/// decay) without coefficient caching getting in the way.
#[derive(Debug, Clone)]
pub struct ModalBank<const N: usize> {
    sample_rate: f32,
    y1: [f32; N],
    y2: [f32; N],
}

impl<const N: usize> ModalBank<N> {
    /// Create a silent bank.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            y1: [0.0; N],
            y2: [0.0; N],
        }
    }

    /// Advance mode `index` by one sample.
    ///
    /// `freq_hz` is clamped into (20, 0.45·sr) against aliasing and
    /// instability; `t60` is floored at 0.02 s. `index >= N` is a no-op
    /// returning silence.
    #[inline]
    pub fn strike(&mut self, index: usize, excitation: f32, freq_hz: f32, t60: f32, gain: f32) -> f32 {
        if index >= N {
            return 0.0;
        }
        let f = freq_hz.clamp(MIN_FREQ_HZ, 0.45 * self.sample_rate);
        let t = t60.max(MIN_T60_SECS);
        let r = expf(LN_MINUS_60_DB / (t * self.sample_rate));
        let theta = core::f32::consts::TAU * f / self.sample_rate;
        let a1 = 2.0 * r * cosf(theta);
        let a2 = -r * r;
        let y = excitation * gain + a1 * self.y1[index] + a2 * self.y2[index];
        self.y2[index] = self.y1[index];
        self.y1[index] = y;
        y
    }

    /// Update sample rate. Filter histories keep their values; call
    /// [`reset`](Self::reset) as well when re-preparing.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
    }

    /// Zero all mode histories.
    pub fn reset(&mut self) {
        self.y1 = [0.0; N];
        self.y2 = [0.0; N];
    }
}
