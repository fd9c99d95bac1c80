//! Micro-motion: onset-triggered variation against loop fatigue.
//!
//! An onset detector runs over the mono sum; every detected hit draws
//! three new bipolar variation targets (tone, transient, tail) from a
//! deterministic LCG and bumps a leaky repetition counter. The per-
//! channel pass then applies a slowly slewed tone shift, a transient
//! boost, and a feedback tail, all wobbled by a sine LFO whose rate and
//! depth follow the variation and depth controls. Dense repetition
//! scales the direct signal down and a recovery term lifts it back as
//! hits thin out, so identical loops drift instead of stacking.
//!
//! A budget limiter rides the wet envelope so the added motion cannot
//! exceed a loudness allowance set by the budget control.
//!
//! The LFO phase, the slewed variation values, and the budget envelope
//! are shared between channels and keep advancing through the
//! right-channel pass, which gives the right channel a faster wobble, a
//! built-in offset, and a budget that reacts to both channels.

use jugo_core::{
    BlockEffect, Lcg, ParamDescriptor, ParameterInfo, clamp01, cutoff_coeff, db_to_linear,
    map_range, time_coeff,
};

const ONSET_ENV_SECS: f32 = 0.015;
const BUDGET_ENV_SECS: f32 = 0.080;
const VARIATION_SLEW_SECS: f32 = 0.020;
const ONSET_COOLDOWN_SECS: f32 = 0.04;
const REPETITION_LEAK: f32 = 0.997;
const RNG_SEED: u32 = 0x93ab_12f0;

/// Onset-triggered micro-variation effect.
#[derive(Debug, Clone)]
pub struct MicroMotion {
    micro_var: f32,
    motion_depth: f32,
    repeat_ctrl: f32,
    budget: f32,
    mix: f32,
    output_db: f32,

    sample_rate: f32,
    rng: Lcg,
    onset_env: f32,
    onset_cooldown: f32,
    repetition: f32,
    var_tone_target: f32,
    var_transient_target: f32,
    var_tail_target: f32,
    var_tone: f32,
    var_transient: f32,
    var_tail: f32,
    motion_phase: f32,
    lp: [f32; 2],
    prev: [f32; 2],
    tail: [f32; 2],
    budget_env: f32,
}

impl MicroMotion {
    /// Create a micro-motion unit at `sample_rate` with default settings.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            micro_var: 0.55,
            motion_depth: 1.0,
            repeat_ctrl: 0.65,
            budget: 0.5,
            mix: 1.0,
            output_db: -2.0,
            sample_rate,
            rng: Lcg::new(RNG_SEED),
            onset_env: 0.0,
            onset_cooldown: 0.0,
            repetition: 0.0,
            var_tone_target: 0.0,
            var_transient_target: 0.0,
            var_tail_target: 0.0,
            var_tone: 0.0,
            var_transient: 0.0,
            var_tail: 0.0,
            motion_phase: 0.0,
            lp: [0.0; 2],
            prev: [0.0; 2],
            tail: [0.0; 2],
            budget_env: 0.0,
        }
    }

    /// Variation amount, 0..1.
    pub fn set_micro_var(&mut self, amount: f32) {
        self.micro_var = amount.clamp(0.0, 1.0);
    }

    /// Motion depth, 0..2.
    pub fn set_motion_depth(&mut self, depth: f32) {
        self.motion_depth = depth.clamp(0.0, 2.0);
    }

    /// Repetition control, 0..1.
    pub fn set_repeat_ctrl(&mut self, amount: f32) {
        self.repeat_ctrl = amount.clamp(0.0, 1.0);
    }

    /// Loudness budget, 0 (loose) to 1 (tight).
    pub fn set_budget(&mut self, budget: f32) {
        self.budget = budget.clamp(0.0, 1.0);
    }

    /// Dry/wet blend, 0..1.
    pub fn set_mix(&mut self, mix: f32) {
        self.mix = mix.clamp(0.0, 1.0);
    }

    /// Output trim in dB.
    pub fn set_output_db(&mut self, db: f32) {
        self.output_db = db.clamp(-18.0, 18.0);
    }

    /// Onset scan over the mono sum; refreshes variation targets and
    /// the repetition counter.
    fn detect_onsets(&mut self, left: &[f32], right: Option<&[f32]>) {
        let env_coeff = time_coeff(self.sample_rate, ONSET_ENV_SECS);
        for (i, &l) in left.iter().enumerate() {
            let r = right.map_or(l, |r| r[i]);
            let mono = (0.5 * (l + r)).abs();
            self.onset_env = env_coeff * self.onset_env + (1.0 - env_coeff) * mono;

            if mono > self.onset_env * 1.35 + 0.02 && self.onset_cooldown <= 0.0 {
                self.onset_cooldown = self.sample_rate * ONSET_COOLDOWN_SECS;
                self.repetition += 1.0;
                self.var_tone_target = self.rng.bipolar(7) * self.micro_var * 0.9;
                self.var_transient_target = self.rng.bipolar(9) * self.micro_var * 0.8;
                self.var_tail_target = self.rng.bipolar(11) * self.micro_var * 0.8;
            }

            self.onset_cooldown -= 1.0;
            self.repetition *= REPETITION_LEAK;
        }
    }

    fn process_channel(&mut self, ch: usize, buf: &mut [f32], repetition_scale: f32, recovery: f32) {
        let sr = self.sample_rate;
        let depth = self.motion_depth.clamp(0.0, 2.0);
        let budget_coeff = time_coeff(sr, BUDGET_ENV_SECS);
        let var_slew = time_coeff(sr, VARIATION_SLEW_SECS);
        let tail_feedback = map_range(self.repeat_ctrl, 0.15, 0.88);
        let motion_rate_hz =
            map_range(self.micro_var, 0.25, 2.0) * (0.75 + (depth / 2.0) * (1.6 - 0.75));
        let motion_inc = core::f32::consts::TAU * motion_rate_hz / sr;
        let budget_target = map_range(self.budget, 0.8, 0.25);
        let out_gain = db_to_linear(self.output_db);
        let phase_offset = if ch == 0 { 0.0 } else { 0.85 };

        for s in buf.iter_mut() {
            let dry = *s;

            self.var_tone = self.var_tone * var_slew + self.var_tone_target * (1.0 - var_slew);
            self.var_transient =
                self.var_transient * var_slew + self.var_transient_target * (1.0 - var_slew);
            self.var_tail = self.var_tail * var_slew + self.var_tail_target * (1.0 - var_slew);

            self.motion_phase += motion_inc;
            if self.motion_phase > core::f32::consts::TAU {
                self.motion_phase -= 2.0 * core::f32::consts::TAU;
            }
            let motion_lfo = (self.motion_phase + phase_offset).sin();

            let lfo_depth = (250.0 + 550.0 * self.micro_var) * (0.5 + 0.9 * depth);
            let cutoff = (900.0
                + self.var_tone * 1100.0 * (0.6 + 0.6 * depth)
                + motion_lfo * lfo_depth)
                .clamp(120.0, 4200.0);
            let lp_coeff = cutoff_coeff(sr, cutoff);

            self.lp[ch] += lp_coeff * (dry - self.lp[ch]);
            let hp = dry - self.lp[ch];
            let transient = dry - self.prev[ch];
            self.prev[ch] = dry;

            let transient_boost = 1.0
                + self.var_transient * 1.2 * (0.6 + 0.7 * depth)
                + 0.35 * self.micro_var * motion_lfo * (0.6 + 0.8 * depth);
            let tone_shift = self.lp[ch] * (1.0 + self.var_tone * 0.65 * (0.55 + 0.7 * depth))
                + hp * transient_boost
                + transient * (0.12 + 0.30 * self.micro_var) * (0.5 + 0.8 * depth);

            let fb = (tail_feedback + self.var_tail * 0.06).clamp(0.0, 0.93);
            self.tail[ch] = tone_shift + self.tail[ch] * fb;

            let mut wet = tone_shift * repetition_scale * recovery
                + (0.26 + 0.24 * self.micro_var) * (0.6 + 0.7 * depth) * self.tail[ch];

            self.budget_env =
                budget_coeff * self.budget_env + (1.0 - budget_coeff) * wet.abs();
            let limiter_gain = if self.budget_env > budget_target {
                budget_target / (self.budget_env + 1.0e-5)
            } else {
                1.0
            };
            wet *= limiter_gain;

            let wet_boost = 1.0 + 0.9 * self.micro_var * (0.55 + 0.9 * depth);
            *s = (dry + self.mix * (wet * wet_boost - dry)) * out_gain;
        }
    }
}

impl BlockEffect for MicroMotion {
    /// The RNG keeps its stream across prepare calls; only the audio
    /// state clears.
    fn prepare(&mut self, sample_rate: f32, _max_block: usize, _channels: usize) {
        self.sample_rate = sample_rate;
        self.reset();
    }

    fn process_block(&mut self, left: &mut [f32], mut right: Option<&mut [f32]>) {
        if left.is_empty() {
            return;
        }

        self.detect_onsets(left, right.as_deref());

        let rep_norm = clamp01(self.repetition * 0.08);
        let repetition_scale = 1.0 - self.repeat_ctrl * rep_norm * 0.65;
        let recovery = 1.0 + self.repeat_ctrl * (1.0 - rep_norm) * 0.25;

        self.process_channel(0, left, repetition_scale, recovery);
        if let Some(right) = right.as_deref_mut() {
            self.process_channel(1, right, repetition_scale, recovery);
        }
    }

    fn reset(&mut self) {
        self.onset_env = 0.0;
        self.onset_cooldown = 0.0;
        self.repetition = 0.0;
        self.var_tone_target = 0.0;
        self.var_transient_target = 0.0;
        self.var_tail_target = 0.0;
        self.var_tone = 0.0;
        self.var_transient = 0.0;
        self.var_tail = 0.0;
        self.motion_phase = 0.0;
        self.lp = [0.0; 2];
        self.prev = [0.0; 2];
        self.tail = [0.0; 2];
        self.budget_env = 0.0;
    }
}

impl ParameterInfo for MicroMotion {
    fn param_count(&self) -> usize {
        6
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        match index {
            0 => Some(ParamDescriptor::amount("Variation", "Var", 0.55)),
            1 => Some(ParamDescriptor {
                max: 2.0,
                ..ParamDescriptor::amount("Depth", "Depth", 1.0)
            }),
            2 => Some(ParamDescriptor::amount("Repeat Control", "Repeat", 0.65)),
            3 => Some(ParamDescriptor::amount("Budget", "Budget", 0.5)),
            4 => Some(ParamDescriptor::amount("Mix", "Mix", 1.0)),
            5 => Some(ParamDescriptor::gain_db("Output", "Out", -18.0, 18.0, -2.0)),
            _ => None,
        }
    }

    fn get_param(&self, index: usize) -> f32 {
        match index {
            0 => self.micro_var,
            1 => self.motion_depth,
            2 => self.repeat_ctrl,
            3 => self.budget,
            4 => self.mix,
            5 => self.output_db,
            _ => 0.0,
        }
    }

    fn set_param(&mut self, index: usize, value: f32) {
        match index {
            0 => self.set_micro_var(value),
            1 => self.set_motion_depth(value),
            2 => self.set_repeat_ctrl(value),
            3 => self.set_budget(value),
            4 => self.set_mix(value),
            5 => self.set_output_db(value),
            _ => {}
        }
    }
}
