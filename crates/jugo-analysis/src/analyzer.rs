//! Block-wise juiciness metric extraction.
//!
//! One pass over a block feeds four accumulator groups: a fast/slow
//! envelope pair for transient detection, squared-sample sums for RMS
//! and crest factor, one-pole band states for spectral balance, and
//! mid/side/correlation sums for the stereo picture. The metric
//! formulas at the end of [`JuicinessAnalyzer::analyze`] are empirical;
//! their weights were tuned by ear against reference material and are
//! not derived from anything.
//!
//! Envelope, band, and EMA state persists across blocks so metrics
//! evolve smoothly over a stream; accumulators restart per block.

use jugo_core::{BandSplitter, EnvelopeFollower, clamp01};

use crate::metrics::JuicinessMetrics;

/// Transient level that counts as an onset.
const ONSET_THRESHOLD: f32 = 0.045;
/// Refractory period after an onset, in seconds.
const ONSET_COOLDOWN_SECS: f32 = 0.035;
/// EMA coefficient for the onset-rate tracker.
const REPETITION_SMOOTHING: f32 = 0.08;
/// Onset rate (per second) that maps to repetition density 1.0.
const REPETITION_REFERENCE_RATE: f32 = 12.0;
/// EMA coefficient for the fatigue tracker.
const FATIGUE_SMOOTHING: f32 = 0.06;

/// Streaming metric extractor.
///
/// Call [`prepare`](Self::prepare) before the first block and after any
/// sample-rate change, then [`analyze`](Self::analyze) once per block.
#[derive(Debug, Clone)]
pub struct JuicinessAnalyzer {
    sample_rate: f32,
    short_env: EnvelopeFollower,
    long_env: EnvelopeFollower,
    bands: BandSplitter,
    repetition_ema: f32,
    fatigue_ema: f32,
    onset_cooldown: u32,
}

impl JuicinessAnalyzer {
    /// Create an analyzer for `sample_rate`.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            short_env: EnvelopeFollower::new(sample_rate, 0.003, 0.030),
            long_env: EnvelopeFollower::new(sample_rate, 0.050, 0.300),
            bands: BandSplitter::analysis(sample_rate),
            repetition_ema: 0.0,
            fatigue_ema: 0.0,
            onset_cooldown: 0,
        }
    }

    /// Reconfigure for a sample rate and clear all tracking state.
    pub fn prepare(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.short_env = EnvelopeFollower::new(sample_rate, 0.003, 0.030);
        self.long_env = EnvelopeFollower::new(sample_rate, 0.050, 0.300);
        self.bands = BandSplitter::analysis(sample_rate);
        self.reset();
    }

    /// Clear envelopes, band states, and slow trackers.
    pub fn reset(&mut self) {
        self.short_env.reset();
        self.long_env.reset();
        self.bands.reset();
        self.repetition_ema = 0.0;
        self.fatigue_ema = 0.0;
        self.onset_cooldown = 0;
    }

    /// Extract metrics for one block.
    ///
    /// `right`, when present, must be the same length as `left`; absent,
    /// the block is treated as mono (correlation degenerates toward 1).
    /// An empty block returns the silence default untouched.
    pub fn analyze(&mut self, left: &[f32], right: Option<&[f32]>) -> JuicinessMetrics {
        let n = left.len();
        if n == 0 {
            return JuicinessMetrics::default();
        }
        debug_assert!(right.is_none_or(|r| r.len() == n));

        let cooldown_samples = (self.sample_rate * ONSET_COOLDOWN_SECS) as u32;

        let mut transient_accum = 0.0f32;
        let mut onset_count = 0u32;
        let mut rms_accum = 0.0f32;
        let mut peak = 0.0f32;
        let mut low_accum = 0.0f32;
        let mut high_accum = 0.0f32;
        let mut mid_accum = 0.0f32;
        let mut side_accum = 0.0f32;
        let mut corr_accum = 0.0f32;
        let mut left_sq = 0.0f32;
        let mut right_sq = 0.0f32;

        for i in 0..n {
            let l = left[i];
            let r = right.map_or(l, |r| r[i]);
            let mono = 0.5 * (l + r);
            let abs_mono = mono.abs();

            let short = self.short_env.track(abs_mono);
            let long = self.long_env.track(abs_mono);
            let transient = (short - long).max(0.0);
            transient_accum += transient;

            if self.onset_cooldown > 0 {
                self.onset_cooldown -= 1;
            }
            if transient > ONSET_THRESHOLD && self.onset_cooldown == 0 {
                onset_count += 1;
                self.onset_cooldown = cooldown_samples;
            }

            rms_accum += mono * mono;
            peak = peak.max(abs_mono);

            let bands = self.bands.split(mono);
            low_accum += bands.low * bands.low;
            high_accum += bands.high * bands.high;

            let side = 0.5 * (l - r);
            mid_accum += mono * mono;
            side_accum += side * side;
            corr_accum += l * r;
            left_sq += l * l;
            right_sq += r * r;
        }

        let inv_n = 1.0 / n as f32;
        let rms = (rms_accum * inv_n + 1.0e-12).sqrt();
        let crest = peak / (rms + 1.0e-6);
        let low_energy = low_accum * inv_n;
        let high_energy = high_accum * inv_n;
        let low_high_ratio = low_energy / (high_energy + 1.0e-8);
        let width_ratio = side_accum / (mid_accum + side_accum + 1.0e-8);

        let left_rms = (left_sq * inv_n).sqrt();
        let right_rms = (right_sq * inv_n).sqrt();
        let corr =
            (corr_accum * inv_n / (left_rms * right_rms + 1.0e-6)).clamp(-1.0, 1.0);

        let punch = clamp01(6.0 * transient_accum * inv_n / (rms + 1.0e-5));
        let richness = clamp01((2.3 - crest) * 0.65 + rms * 2.0);

        let mut clarity = 1.0f32;
        if low_high_ratio > 2.5 {
            clarity -= ((low_high_ratio - 2.5) * 0.15).clamp(0.0, 0.6);
        }
        if high_energy > 0.03 {
            clarity -= ((high_energy - 0.03) * 8.0).clamp(0.0, 0.5);
        }
        let clarity = clamp01(clarity);

        let width = clamp01(width_ratio * 2.0);
        let mono_safety = clamp01(0.5 * (corr + 1.0));

        let block_seconds = n as f32 / self.sample_rate;
        let onset_rate = if block_seconds > 0.0 {
            onset_count as f32 / block_seconds
        } else {
            0.0
        };
        self.repetition_ema += (onset_rate - self.repetition_ema) * REPETITION_SMOOTHING;
        let repetition_density = clamp01(self.repetition_ema / REPETITION_REFERENCE_RATE);

        let emphasis =
            clamp01(0.62 * punch + 0.38 * clamp01(transient_accum * inv_n * 8.5));
        let coherence = clamp01(
            0.50 * clarity + 0.30 * mono_safety + 0.20 * (1.0 - (width - 0.45).abs()),
        );
        let synesthesia = clamp01(
            0.45 * richness
                + 0.30 * clamp01(low_high_ratio / 3.5)
                + 0.25 * clamp01(transient_accum * inv_n * 5.0),
        );

        let crest_penalty = clamp01((1.8 - crest) * 1.1);
        let harsh_penalty = clamp01(high_energy * 12.0);
        let instant_fatigue =
            clamp01(0.35 * crest_penalty + 0.35 * harsh_penalty + 0.30 * repetition_density);
        self.fatigue_ema += (instant_fatigue - self.fatigue_ema) * FATIGUE_SMOOTHING;
        let fatigue_risk = clamp01(self.fatigue_ema);

        let mut score =
            100.0 * (0.30 * punch + 0.25 * richness + 0.25 * clarity + 0.20 * width);
        score *= 0.6 + 0.4 * mono_safety;
        let score = score.clamp(0.0, 100.0);

        JuicinessMetrics {
            score,
            punch,
            richness,
            clarity,
            width,
            mono_safety,
            emphasis,
            coherence,
            synesthesia,
            fatigue_risk,
            repetition_density,
        }
    }

    /// Current sample rate.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }
}
