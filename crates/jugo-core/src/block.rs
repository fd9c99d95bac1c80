//! Block-based stereo effect trait.
//!
//! Effect units process audio in place, one buffer per channel, with an
//! optional right channel so the same unit serves mono and stereo paths.
//! Width-style units fall back to mono behavior (or pass through) when
//! the right channel is absent.
//!
//! The lifecycle mirrors a plugin host: [`prepare`](BlockEffect::prepare)
//! before the first block and after any sample-rate change,
//! [`process_block`](BlockEffect::process_block) per buffer, and
//! [`reset`](BlockEffect::reset) when the transport stops. Any allocation
//! happens in `prepare`; `process_block` must be allocation-free.

/// Trait for in-place block processors.
pub trait BlockEffect {
    /// Configure for a sample rate, maximum block size, and channel count.
    ///
    /// Must be called before the first [`process_block`](Self::process_block).
    /// May allocate. Implementations should also clear processing state.
    fn prepare(&mut self, sample_rate: f32, max_block: usize, channels: usize);

    /// Process one block in place.
    ///
    /// `right`, when present, must be the same length as `left`.
    fn process_block(&mut self, left: &mut [f32], right: Option<&mut [f32]>);

    /// Clear processing state without touching parameters.
    fn reset(&mut self);
}
