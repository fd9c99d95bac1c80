//! Transient shaper: emphasize attacks, optionally lift sustain.
//!
//! A fast (2.5 ms) and a slow (80 ms) one-pole envelope track the
//! rectified input per channel; their difference is the transient
//! estimate. Attack gain rides the transient, sustain gain rides the
//! slow envelope with the transient removed, and the wet path is
//! hard-clipped to ±1 before the dry/wet blend.
//!
//! Both envelopes here are symmetric (one coefficient each); the
//! asymmetric follower in the analyzer serves a different job.

use jugo_core::{BlockEffect, ParamDescriptor, ParameterInfo, db_to_linear, time_coeff};

const FAST_SECS: f32 = 0.0025;
const SLOW_SECS: f32 = 0.080;

/// Attack/sustain shaper.
#[derive(Debug, Clone)]
pub struct TransientShaper {
    punch: f32,
    sustain: f32,
    mix: f32,
    output_db: f32,

    sample_rate: f32,
    fast_env: [f32; 2],
    slow_env: [f32; 2],
}

impl TransientShaper {
    /// Create a shaper at `sample_rate` with default settings.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            punch: 0.55,
            sustain: 0.2,
            mix: 1.0,
            output_db: 0.0,
            sample_rate,
            fast_env: [0.0; 2],
            slow_env: [0.0; 2],
        }
    }

    /// Attack emphasis amount, 0..1.
    pub fn set_punch(&mut self, punch: f32) {
        self.punch = punch.clamp(0.0, 1.0);
    }

    /// Sustain lift amount, 0..1.
    pub fn set_sustain(&mut self, sustain: f32) {
        self.sustain = sustain.clamp(0.0, 1.0);
    }

    /// Dry/wet blend, 0..1.
    pub fn set_mix(&mut self, mix: f32) {
        self.mix = mix.clamp(0.0, 1.0);
    }

    /// Output trim in dB.
    pub fn set_output_db(&mut self, db: f32) {
        self.output_db = db.clamp(-18.0, 18.0);
    }

    fn process_channel(&mut self, ch: usize, buf: &mut [f32]) {
        let fast_coeff = time_coeff(self.sample_rate, FAST_SECS);
        let slow_coeff = time_coeff(self.sample_rate, SLOW_SECS);
        let out_gain = db_to_linear(self.output_db);

        for s in buf.iter_mut() {
            let dry = *s;
            let level = dry.abs();
            self.fast_env[ch] = (1.0 - fast_coeff) * level + fast_coeff * self.fast_env[ch];
            self.slow_env[ch] = (1.0 - slow_coeff) * level + slow_coeff * self.slow_env[ch];

            let transient = (self.fast_env[ch] - self.slow_env[ch]).max(0.0);
            let punch_gain = 1.0 + self.punch * transient * 8.0;
            let sustain_gain = 1.0 + self.sustain * (self.slow_env[ch] - transient).max(0.0) * 2.0;
            let wet = (dry * punch_gain * sustain_gain).clamp(-1.0, 1.0);

            *s = (dry + self.mix * (wet - dry)) * out_gain;
        }
    }
}

impl BlockEffect for TransientShaper {
    fn prepare(&mut self, sample_rate: f32, _max_block: usize, _channels: usize) {
        self.sample_rate = sample_rate;
        self.reset();
    }

    fn process_block(&mut self, left: &mut [f32], right: Option<&mut [f32]>) {
        self.process_channel(0, left);
        if let Some(right) = right {
            self.process_channel(1, right);
        }
    }

    fn reset(&mut self) {
        self.fast_env = [0.0; 2];
        self.slow_env = [0.0; 2];
    }
}

impl ParameterInfo for TransientShaper {
    fn param_count(&self) -> usize {
        4
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        match index {
            0 => Some(ParamDescriptor::amount("Punch", "Punch", 0.55)),
            1 => Some(ParamDescriptor::amount("Sustain", "Sustain", 0.2)),
            2 => Some(ParamDescriptor::amount("Mix", "Mix", 1.0)),
            3 => Some(ParamDescriptor::gain_db("Output", "Out", -18.0, 18.0, 0.0)),
            _ => None,
        }
    }

    fn get_param(&self, index: usize) -> f32 {
        match index {
            0 => self.punch,
            1 => self.sustain,
            2 => self.mix,
            3 => self.output_db,
            _ => 0.0,
        }
    }

    fn set_param(&mut self, index: usize, value: f32) {
        match index {
            0 => self.set_punch(value),
            1 => self.set_sustain(value),
            2 => self.set_mix(value),
            3 => self.set_output_db(value),
            _ => {}
        }
    }
}
