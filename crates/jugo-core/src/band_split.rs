//! One-pole low/high crossover producing low, mid, and high bands.
//!
//! Two independent one-pole lowpass trackers split the input:
//!
//! ```text
//! low_lp  += low_coeff  * (x - low_lp)
//! high_lp += high_coeff * (x - high_lp)
//! low  = low_lp
//! high = x - high_lp
//! mid  = x - low - high
//! ```
//!
//! Coefficients follow `1 - exp(-2π·fc/sr)`. The crossover pairs in use:
//! 250/2500 Hz for metric analysis, 220/2400 Hz for tonal matching, and
//! 140/2600 Hz inside the material engine. The analysis defaults must not
//! change — derived metric weights are tuned against them.

use crate::math::cutoff_coeff;

/// Analysis crossover frequencies in Hz (low, high).
pub const ANALYSIS_CROSSOVER_HZ: (f32, f32) = (250.0, 2500.0);

/// Tonal-balance crossover frequencies in Hz (low, high).
pub const TONAL_CROSSOVER_HZ: (f32, f32) = (220.0, 2400.0);

/// The three outputs of one splitter step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bands {
    /// Lowpass output below the low crossover.
    pub low: f32,
    /// Residual between the two crossovers.
    pub mid: f32,
    /// Input minus the high lowpass.
    pub high: f32,
}

/// Two-pole-pair band splitter with persistent filter memory.
#[derive(Debug, Clone)]
pub struct BandSplitter {
    low_state: f32,
    high_state: f32,
    low_coeff: f32,
    high_coeff: f32,
}

impl BandSplitter {
    /// Create a splitter with explicit crossover frequencies.
    pub fn new(sample_rate: f32, low_hz: f32, high_hz: f32) -> Self {
        Self {
            low_state: 0.0,
            high_state: 0.0,
            low_coeff: cutoff_coeff(sample_rate, low_hz),
            high_coeff: cutoff_coeff(sample_rate, high_hz),
        }
    }

    /// Create a splitter at the analysis crossovers (250/2500 Hz).
    pub fn analysis(sample_rate: f32) -> Self {
        Self::new(sample_rate, ANALYSIS_CROSSOVER_HZ.0, ANALYSIS_CROSSOVER_HZ.1)
    }

    /// Create a splitter at the tonal-balance crossovers (220/2400 Hz).
    pub fn tonal(sample_rate: f32) -> Self {
        Self::new(sample_rate, TONAL_CROSSOVER_HZ.0, TONAL_CROSSOVER_HZ.1)
    }

    /// Split one sample into its three bands.
    #[inline]
    pub fn split(&mut self, input: f32) -> Bands {
        self.low_state += self.low_coeff * (input - self.low_state);
        self.high_state += self.high_coeff * (input - self.high_state);
        let low = self.low_state;
        let high = input - self.high_state;
        Bands {
            low,
            mid: input - low - high,
            high,
        }
    }

    /// Zero the filter memory.
    pub fn reset(&mut self) {
        self.low_state = 0.0;
        self.high_state = 0.0;
    }
}
