//! Fractional delay line for waveguide-style resonance.
//!
//! A circular buffer with a one-slot-per-sample write head and a
//! linear-interpolated fractional read. `read(0.0)` returns the most
//! recently written sample. Cavity and tube material models derive the
//! delay each sample from a target resonant frequency (`sr / freq_hz`)
//! and run a damped feedback loop through the line.
//!
//! The buffer is sized once at preparation and never grows; delay requests
//! are clamped into `[0, capacity - 2]` so the interpolation pair always
//! reads inside the buffer.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec;
use alloc::vec::Vec;

/// Heap-backed circular delay line with linear-interpolated reads.
///
/// The buffer is allocated at construction and never reallocates; no
/// allocation happens on the audio path.
#[derive(Debug, Clone)]
pub struct WaveguideDelay {
    buffer: Vec<f32>,
    write_pos: usize,
}

impl WaveguideDelay {
    /// Create a delay line holding `capacity` samples.
    ///
    /// # Panics
    /// Panics if `capacity < 2` (no room for an interpolation pair).
    pub fn new(capacity: usize) -> Self {
        assert!(capacity >= 2, "waveguide needs at least 2 slots");
        Self {
            buffer: vec![0.0; capacity],
            write_pos: 0,
        }
    }

    /// Create a delay line sized for `max_seconds` at `sample_rate`, with a
    /// floor of 2048 slots so short lines still have interpolation headroom.
    pub fn from_time(sample_rate: f32, max_seconds: f32) -> Self {
        let samples = (sample_rate * max_seconds) as usize + 1;
        Self::new(samples.max(2048))
    }

    /// Read `delay_samples` behind the most recent write, linear-interpolated.
    ///
    /// `delay_samples` is clamped into `[0, capacity - 2]`; `read(0.0)`
    /// returns the sample passed to the last [`write`](Self::write).
    #[inline]
    pub fn read(&self, delay_samples: f32) -> f32 {
        let len = self.buffer.len();
        let delay = delay_samples.clamp(0.0, (len - 2) as f32);
        let delay_int = delay as usize;
        let frac = delay - delay_int as f32;

        // Most recent write sits one slot behind the write head.
        let read_pos = (self.write_pos + len - delay_int - 1) % len;
        let older_pos = (read_pos + len - 1) % len;
        let a = self.buffer[read_pos];
        let b = self.buffer[older_pos];
        a + (b - a) * frac
    }

    /// Write one sample and advance the write head.
    #[inline]
    pub fn write(&mut self, sample: f32) {
        self.buffer[self.write_pos] = sample;
        self.write_pos = (self.write_pos + 1) % self.buffer.len();
    }

    /// Buffer length in samples.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Largest delay that still leaves a safe interpolation pair.
    pub fn max_delay(&self) -> f32 {
        (self.buffer.len() - 2) as f32
    }

    /// Zero the line and rewind the write head.
    pub fn clear(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
    }
}
