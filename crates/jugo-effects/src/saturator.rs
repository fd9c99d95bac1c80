//! Asymmetric tanh saturator with a one-pole tone filter.
//!
//! Drive is applied in dB, an `x + a·x²` term skews the waveform to
//! generate even harmonics, tanh bounds the result, and a lowpass tone
//! stage (2.5-16 kHz) tames the added brightness. The output trim sits
//! on the wet path only, so at mix 0 the unit is an exact pass-through.

use jugo_core::{
    BlockEffect, ParamDescriptor, ParameterInfo, cutoff_coeff, db_to_linear, map_range, soft_clip,
};

/// Harmonic saturation unit.
#[derive(Debug, Clone)]
pub struct Saturator {
    drive_db: f32,
    asymmetry: f32,
    tone: f32,
    mix: f32,
    output_db: f32,

    sample_rate: f32,
    tone_state: [f32; 2],
}

impl Saturator {
    /// Create a saturator at `sample_rate` with default settings.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            drive_db: 6.0,
            asymmetry: 0.1,
            tone: 0.55,
            mix: 1.0,
            output_db: -3.0,
            sample_rate,
            tone_state: [0.0; 2],
        }
    }

    /// Input drive in dB, 0..24.
    pub fn set_drive_db(&mut self, db: f32) {
        self.drive_db = db.clamp(0.0, 24.0);
    }

    /// Even-harmonic skew, -0.5..0.5.
    pub fn set_asymmetry(&mut self, asymmetry: f32) {
        self.asymmetry = asymmetry.clamp(-0.5, 0.5);
    }

    /// Tone control, 0 (dark, 2.5 kHz) to 1 (open, 16 kHz).
    pub fn set_tone(&mut self, tone: f32) {
        self.tone = tone.clamp(0.0, 1.0);
    }

    /// Dry/wet blend, 0..1.
    pub fn set_mix(&mut self, mix: f32) {
        self.mix = mix.clamp(0.0, 1.0);
    }

    /// Wet-path output trim in dB.
    pub fn set_output_db(&mut self, db: f32) {
        self.output_db = db.clamp(-18.0, 18.0);
    }

    fn process_channel(&mut self, ch: usize, buf: &mut [f32]) {
        let in_gain = db_to_linear(self.drive_db);
        let out_gain = db_to_linear(self.output_db);
        let cutoff = map_range(self.tone, 2500.0, 16000.0);
        let tone_coeff = cutoff_coeff(self.sample_rate, cutoff);

        for s in buf.iter_mut() {
            let dry = *s;
            let driven = dry * in_gain;
            let skewed = driven + self.asymmetry * driven * driven;
            let soft = soft_clip(skewed);
            self.tone_state[ch] += tone_coeff * (soft - self.tone_state[ch]);
            let wet = self.tone_state[ch] * out_gain;
            *s = dry + self.mix * (wet - dry);
        }
    }
}

impl BlockEffect for Saturator {
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
        self.tone_state = [0.0; 2];
    }
}

impl ParameterInfo for Saturator {
    fn param_count(&self) -> usize {
        5
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        match index {
            0 => Some(ParamDescriptor::gain_db("Drive", "Drive", 0.0, 24.0, 6.0)),
            1 => Some(ParamDescriptor {
                min: -0.5,
                max: 0.5,
                default: 0.1,
                ..ParamDescriptor::amount("Asymmetry", "Asym", 0.1)
            }),
            2 => Some(ParamDescriptor::amount("Tone", "Tone", 0.55)),
            3 => Some(ParamDescriptor::amount("Mix", "Mix", 1.0)),
            4 => Some(ParamDescriptor::gain_db("Output", "Out", -18.0, 18.0, -3.0)),
            _ => None,
        }
    }

    fn get_param(&self, index: usize) -> f32 {
        match index {
            0 => self.drive_db,
            1 => self.asymmetry,
            2 => self.tone,
            3 => self.mix,
            4 => self.output_db,
            _ => 0.0,
        }
    }

    fn set_param(&mut self, index: usize, value: f32) {
        match index {
            0 => self.set_drive_db(value),
            1 => self.set_asymmetry(value),
            2 => self.set_tone(value),
            3 => self.set_mix(value),
            4 => self.set_output_db(value),
            _ => {}
        }
    }
}
