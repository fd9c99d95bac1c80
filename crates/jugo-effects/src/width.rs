//! Mono-safe stereo widener with a Haas delay on the right channel.
//!
//! Mid/side widening with a per-sample correlation proxy: when the
//! instantaneous channel product turns negative the working width is
//! ducked toward a floor set by the mono-safe control. The duck
//! compounds within a block and restarts from the user width at the
//! next block, so sustained anti-correlated material collapses quickly
//! while a stray sample barely registers. The right wet channel is then
//! read back through a short delay line for Haas-style depth.
//!
//! Mono buffers pass through untouched; widening needs two channels.

use jugo_core::{BlockEffect, ParamDescriptor, ParameterInfo, db_to_linear, map_range};

/// Delay capacity in seconds; the Haas control tops out at 35 ms.
const DELAY_CAPACITY_SECS: f32 = 0.060;
/// Correlation proxy below this trips the width duck.
const DUCK_THRESHOLD: f32 = -0.1;

/// Haas-based stereo widener.
#[derive(Debug, Clone)]
pub struct StereoWidth {
    width: f32,
    haas_ms: f32,
    mono_safe: f32,
    mix: f32,
    output_db: f32,

    sample_rate: f32,
    delay_left: Vec<f32>,
    delay_right: Vec<f32>,
    write_pos: usize,
}

impl StereoWidth {
    /// Create a widener at `sample_rate` with default settings.
    pub fn new(sample_rate: f32) -> Self {
        let capacity = Self::capacity_for(sample_rate);
        Self {
            width: 0.45,
            haas_ms: 12.0,
            mono_safe: 0.7,
            mix: 1.0,
            output_db: 0.0,
            sample_rate,
            delay_left: vec![0.0; capacity],
            delay_right: vec![0.0; capacity],
            write_pos: 0,
        }
    }

    fn capacity_for(sample_rate: f32) -> usize {
        ((sample_rate * DELAY_CAPACITY_SECS) as usize).max(16)
    }

    /// Side gain amount, 0..1.
    pub fn set_width(&mut self, width: f32) {
        self.width = width.clamp(0.0, 1.0);
    }

    /// Haas delay on the right channel in milliseconds, 0..35.
    pub fn set_haas_ms(&mut self, ms: f32) {
        self.haas_ms = ms.clamp(0.0, 35.0);
    }

    /// Mono safety, 0 (no ducking) to 1 (strong ducking).
    pub fn set_mono_safe(&mut self, amount: f32) {
        self.mono_safe = amount.clamp(0.0, 1.0);
    }

    /// Dry/wet blend, 0..1.
    pub fn set_mix(&mut self, mix: f32) {
        self.mix = mix.clamp(0.0, 1.0);
    }

    /// Output trim in dB.
    pub fn set_output_db(&mut self, db: f32) {
        self.output_db = db.clamp(-18.0, 18.0);
    }
}

impl BlockEffect for StereoWidth {
    fn prepare(&mut self, sample_rate: f32, _max_block: usize, _channels: usize) {
        self.sample_rate = sample_rate;
        let capacity = Self::capacity_for(sample_rate);
        self.delay_left = vec![0.0; capacity];
        self.delay_right = vec![0.0; capacity];
        self.write_pos = 0;
    }

    fn process_block(&mut self, left: &mut [f32], right: Option<&mut [f32]>) {
        let Some(right) = right else {
            return;
        };

        let out_gain = db_to_linear(self.output_db);
        let len = self.delay_left.len();
        let delay_samples = ((self.sample_rate * self.haas_ms * 0.001) as usize).min(len - 1);
        let dynamic_limit = map_range(self.mono_safe, 1.0, 0.35);

        // Working width for this block; the duck compounds and resets
        // at the next block.
        let mut width = self.width;

        for (l, r) in left.iter_mut().zip(right.iter_mut()) {
            let dry_l = *l;
            let dry_r = *r;

            let corr_proxy = (dry_l * dry_r * 12.0).clamp(-1.0, 1.0);
            if corr_proxy < DUCK_THRESHOLD {
                width *= dynamic_limit;
            }

            let mid = 0.5 * (dry_l + dry_r);
            let side = 0.5 * (dry_l - dry_r) * (1.0 + width);
            let wet_l = mid + side;
            let wet_r = mid - side;

            self.delay_left[self.write_pos] = wet_l;
            self.delay_right[self.write_pos] = wet_r;
            let read_pos = (self.write_pos + len - delay_samples) % len;
            let haas_r = self.delay_right[read_pos];
            self.write_pos = (self.write_pos + 1) % len;

            *l = (dry_l + self.mix * (wet_l - dry_l)) * out_gain;
            *r = (dry_r + self.mix * (haas_r - dry_r)) * out_gain;
        }
    }

    fn reset(&mut self) {
        self.delay_left.fill(0.0);
        self.delay_right.fill(0.0);
        self.write_pos = 0;
    }
}

impl ParameterInfo for StereoWidth {
    fn param_count(&self) -> usize {
        5
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        match index {
            0 => Some(ParamDescriptor::amount("Width", "Width", 0.45)),
            1 => Some(ParamDescriptor::time_ms("Haas", "Haas", 0.0, 35.0, 12.0)),
            2 => Some(ParamDescriptor::amount("Mono Safe", "Safe", 0.7)),
            3 => Some(ParamDescriptor::amount("Mix", "Mix", 1.0)),
            4 => Some(ParamDescriptor::gain_db("Output", "Out", -18.0, 18.0, 0.0)),
            _ => None,
        }
    }

    fn get_param(&self, index: usize) -> f32 {
        match index {
            0 => self.width,
            1 => self.haas_ms,
            2 => self.mono_safe,
            3 => self.mix,
            4 => self.output_db,
            _ => 0.0,
        }
    }

    fn set_param(&mut self, index: usize, value: f32) {
        match index {
            0 => self.set_width(value),
            1 => self.set_haas_ms(value),
            2 => self.set_mono_safe(value),
            3 => self.set_mix(value),
            4 => self.set_output_db(value),
            _ => {}
        }
    }
}
