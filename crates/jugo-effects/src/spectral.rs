//! Three-band spectral matcher with a learnable target profile.
//!
//! The block's mono sum is split at the tonal crossovers (220 Hz /
//! 2.4 kHz) into low/mid/high energies. In learn mode the target
//! profile chases the measured profile with a slow EMA; out of learn
//! mode, per-band compensation gains pull the signal toward the stored
//! target, limited to [0.5, 1.8] so matching never becomes surgery.
//! A per-channel feedback tail smears the matched signal for coherence,
//! and the per-band dB deviation is condensed into a 0-100 context-fit
//! figure for metering.
//!
//! The measurement filters persist across blocks; the per-channel
//! shaping filters restart each block, which keeps the channel passes
//! independent of channel count.

use jugo_core::{
    BandSplitter, BlockEffect, ParamDescriptor, ParamUnit, ParameterInfo, db_to_linear,
};
use libm::{log10f, powf};

/// Learn-mode EMA coefficient per block.
const LEARN_RATE: f32 = 0.02;
/// Compensation gain bounds.
const COMP_MIN: f32 = 0.5;
const COMP_MAX: f32 = 1.8;
/// Feedback ceiling for the coherence tail.
const TAIL_FEEDBACK_MAX: f32 = 0.93;

/// Spectral profile matcher.
#[derive(Debug, Clone)]
pub struct SpectralMatcher {
    match_amount: f32,
    learn: bool,
    tail_amount: f32,
    decay: f32,
    mix: f32,
    output_db: f32,

    sample_rate: f32,
    // Mono measurement splitter, persistent across blocks.
    measure: BandSplitter,
    target_low: f32,
    target_mid: f32,
    target_high: f32,
    tail: [f32; 2],
    context_fit: f32,
}

impl SpectralMatcher {
    /// Create a matcher at `sample_rate` with a flat 0.2-energy target.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            match_amount: 0.65,
            learn: false,
            tail_amount: 0.45,
            decay: 0.65,
            mix: 1.0,
            output_db: 0.0,
            sample_rate,
            measure: BandSplitter::tonal(sample_rate),
            target_low: 0.2,
            target_mid: 0.2,
            target_high: 0.2,
            tail: [0.0; 2],
            context_fit: 0.0,
        }
    }

    /// Matching strength, 0..1.
    pub fn set_match_amount(&mut self, amount: f32) {
        self.match_amount = amount.clamp(0.0, 1.0);
    }

    /// Enable or disable target learning.
    pub fn set_learn(&mut self, learn: bool) {
        self.learn = learn;
    }

    /// Tail contribution, 0..1.
    pub fn set_tail_amount(&mut self, amount: f32) {
        self.tail_amount = amount.clamp(0.0, 1.0);
    }

    /// Tail feedback decay, 0.1..0.95 (applied clamped to 0.93).
    pub fn set_decay(&mut self, decay: f32) {
        self.decay = decay.clamp(0.1, 0.95);
    }

    /// Dry/wet blend, 0..1.
    pub fn set_mix(&mut self, mix: f32) {
        self.mix = mix.clamp(0.0, 1.0);
    }

    /// Output trim in dB.
    pub fn set_output_db(&mut self, db: f32) {
        self.output_db = db.clamp(-18.0, 18.0);
    }

    /// How close the last block sat to the learned target, 0..100.
    pub fn context_fit(&self) -> f32 {
        self.context_fit
    }

    /// Measured-vs-target band energies for the mono sum of one block.
    fn measure(&mut self, left: &[f32], right: Option<&[f32]>) -> (f32, f32, f32) {
        let mut low_e = 0.0f32;
        let mut mid_e = 0.0f32;
        let mut high_e = 0.0f32;
        for (i, &l) in left.iter().enumerate() {
            let r = right.map_or(l, |r| r[i]);
            let bands = self.measure.split(0.5 * (l + r));
            low_e += bands.low * bands.low;
            mid_e += bands.mid * bands.mid;
            high_e += bands.high * bands.high;
        }
        let inv_n = 1.0 / left.len().max(1) as f32;
        (low_e * inv_n, mid_e * inv_n, high_e * inv_n)
    }

    fn comp_gain(target: f32, current: f32, exponent: f32) -> f32 {
        powf((target + 1.0e-6) / (current + 1.0e-6), exponent).clamp(COMP_MIN, COMP_MAX)
    }

    fn band_error_db(current: f32, target: f32) -> f32 {
        (20.0 * log10f((current + 1.0e-6) / (target + 1.0e-6))).abs()
    }

    fn process_channel(&mut self, ch: usize, buf: &mut [f32], comps: (f32, f32, f32)) {
        let (low_comp, mid_comp, high_comp) = comps;
        let fb = self.decay.clamp(0.0, TAIL_FEEDBACK_MAX);
        let out_gain = db_to_linear(self.output_db);

        // Shaping filters restart per block.
        let mut shaping = BandSplitter::tonal(self.sample_rate);
        for s in buf.iter_mut() {
            let dry = *s;
            let bands = shaping.split(dry);
            let matched = bands.low * low_comp + bands.mid * mid_comp + bands.high * high_comp;

            self.tail[ch] = matched + self.tail[ch] * fb;
            let wet = matched + self.tail_amount * 0.35 * self.tail[ch];
            *s = (dry + self.mix * (wet - dry)) * out_gain;
        }
    }
}

impl BlockEffect for SpectralMatcher {
    fn prepare(&mut self, sample_rate: f32, _max_block: usize, _channels: usize) {
        self.sample_rate = sample_rate;
        self.measure = BandSplitter::tonal(sample_rate);
        self.reset();
    }

    fn process_block(&mut self, left: &mut [f32], mut right: Option<&mut [f32]>) {
        if left.is_empty() {
            return;
        }

        let (low_e, mid_e, high_e) = self.measure(left, right.as_deref());

        if self.learn {
            self.target_low += (low_e - self.target_low) * LEARN_RATE;
            self.target_mid += (mid_e - self.target_mid) * LEARN_RATE;
            self.target_high += (high_e - self.target_high) * LEARN_RATE;
        }

        let deviation = (Self::band_error_db(low_e, self.target_low)
            + Self::band_error_db(mid_e, self.target_mid)
            + Self::band_error_db(high_e, self.target_high))
            / 3.0;
        self.context_fit = (100.0 - deviation * 10.0).clamp(0.0, 100.0);

        let exponent = 0.25 * self.match_amount;
        let comps = (
            Self::comp_gain(self.target_low, low_e, exponent),
            Self::comp_gain(self.target_mid, mid_e, exponent),
            Self::comp_gain(self.target_high, high_e, exponent),
        );

        self.process_channel(0, left, comps);
        if let Some(right) = right.as_deref_mut() {
            self.process_channel(1, right, comps);
        }
    }

    /// Clears filter and tail state. The learned target profile is kept;
    /// re-learn or construct a new instance to discard it.
    fn reset(&mut self) {
        self.measure.reset();
        self.tail = [0.0; 2];
        self.context_fit = 0.0;
    }
}

impl ParameterInfo for SpectralMatcher {
    fn param_count(&self) -> usize {
        6
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        match index {
            0 => Some(ParamDescriptor::amount("Match", "Match", 0.65)),
            1 => Some(ParamDescriptor::selector("Learn", "Learn", 1)),
            2 => Some(ParamDescriptor::amount("Tail", "Tail", 0.45)),
            3 => Some(ParamDescriptor {
                name: "Decay",
                short_name: "Decay",
                unit: ParamUnit::None,
                min: 0.1,
                max: 0.95,
                default: 0.65,
                stepped: false,
            }),
            4 => Some(ParamDescriptor::amount("Mix", "Mix", 1.0)),
            5 => Some(ParamDescriptor::gain_db("Output", "Out", -18.0, 18.0, 0.0)),
            _ => None,
        }
    }

    fn get_param(&self, index: usize) -> f32 {
        match index {
            0 => self.match_amount,
            1 => f32::from(self.learn),
            2 => self.tail_amount,
            3 => self.decay,
            4 => self.mix,
            5 => self.output_db,
            _ => 0.0,
        }
    }

    fn set_param(&mut self, index: usize, value: f32) {
        match index {
            0 => self.set_match_amount(value),
            1 => self.set_learn(value > 0.5),
            2 => self.set_tail_amount(value),
            3 => self.set_decay(value),
            4 => self.set_mix(value),
            5 => self.set_output_db(value),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(freq: f32, n: usize, amp: f32) -> Vec<f32> {
        (0..n)
            .map(|i| amp * (core::f32::consts::TAU * freq * i as f32 / 48000.0).sin())
            .collect()
    }

    #[test]
    fn mix_zero_is_passthrough_at_unity() {
        let mut fx = SpectralMatcher::new(48000.0);
        fx.prepare(48000.0, 512, 1);
        fx.set_mix(0.0);

        let dry = sine(500.0, 512, 0.5);
        let mut buf = dry.clone();
        fx.process_block(&mut buf, None);
        assert_eq!(buf, dry);
    }

    #[test]
    fn learning_converges_context_fit_toward_100() {
        let mut fx = SpectralMatcher::new(48000.0);
        fx.prepare(48000.0, 1024, 1);
        fx.set_learn(true);

        let block = sine(300.0, 1024, 0.5);
        for _ in 0..400 {
            let mut buf = block.clone();
            fx.process_block(&mut buf, None);
        }
        assert!(
            fx.context_fit() > 90.0,
            "fit after learning: {}",
            fx.context_fit()
        );
    }

    #[test]
    fn mismatched_material_scores_low_fit() {
        let mut fx = SpectralMatcher::new(48000.0);
        fx.prepare(48000.0, 1024, 1);

        // Learn a bass-heavy target, then feed bright material.
        fx.set_learn(true);
        for _ in 0..400 {
            let mut buf = sine(80.0, 1024, 0.6);
            fx.process_block(&mut buf, None);
        }
        fx.set_learn(false);
        let fit_matched = fx.context_fit();

        for _ in 0..8 {
            let mut buf = sine(6000.0, 1024, 0.6);
            fx.process_block(&mut buf, None);
        }
        assert!(
            fx.context_fit() < fit_matched,
            "bright input against bass target: {} !< {fit_matched}",
            fx.context_fit()
        );
    }

    #[test]
    fn matching_pulls_spectrum_toward_target() {
        let mut fx = SpectralMatcher::new(48000.0);
        fx.prepare(48000.0, 2048, 1);

        // Learn a low-heavy profile.
        fx.set_learn(true);
        for _ in 0..400 {
            let mut buf = sine(100.0, 2048, 0.6);
            fx.process_block(&mut buf, None);
        }
        fx.set_learn(false);
        fx.set_match_amount(1.0);
        fx.set_tail_amount(0.0);

        // Bright input should come out attenuated in the highs relative
        // to a match-off pass.
        let bright = sine(6000.0, 2048, 0.5);
        let mut matched = bright.clone();
        fx.process_block(&mut matched, None);

        let energy = |b: &[f32]| b[1024..].iter().map(|x| x * x).sum::<f32>();
        assert!(energy(&matched) < energy(&bright));
    }

    #[test]
    fn output_stays_finite_with_max_feedback() {
        let mut fx = SpectralMatcher::new(48000.0);
        fx.prepare(48000.0, 512, 2);
        fx.set_decay(0.95);
        fx.set_tail_amount(1.0);

        let mut left = sine(440.0, 512, 0.8);
        let mut right = left.clone();
        for _ in 0..100 {
            fx.process_block(&mut left, Some(&mut right));
        }
        for &s in left.iter().chain(right.iter()) {
            assert!(s.is_finite());
        }
    }

    #[test]
    fn learn_param_maps_to_bool() {
        let mut fx = SpectralMatcher::new(48000.0);
        fx.set_param(1, 1.0);
        assert_eq!(fx.get_param(1), 1.0);
        fx.set_param(1, 0.0);
        assert_eq!(fx.get_param(1), 0.0);
    }
}
