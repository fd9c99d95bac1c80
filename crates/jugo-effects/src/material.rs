//! Physically-modeled material texture synthesis.
//!
//! Incoming audio is reduced to impact/body drive signals and a
//! three-band excitation core, which then feeds one of five material
//! voices per channel:
//!
//! * **Gel** — a single viscoelastic spring-mass with a tanh skin.
//! * **Metal** — four inharmonic modal resonators with impact bend and
//!   a bright-excitation term.
//! * **Wood** — a cavity waveguide around 92-187 Hz plus a short modal
//!   knock.
//! * **Plastic** — a narrow tube waveguide plus hollow upper modes.
//! * **Flesh-like** — two coupled masses with a cubic tissue
//!   nonlinearity.
//!
//! Each channel holds state for the selected voice only; switching
//! material rebuilds the voice from rest. After the voice, shared
//! roughness noise, a feedback tail, envelope-tracked auto-gain, DC
//! blocking, and a peak guard finish the chain.

use jugo_core::{
    BlockEffect, CoupledMasses, CouplingCoeffs, DEFAULT_SEED, DcBlocker, EnvelopeFollower, Lcg,
    ModalBank, ParamDescriptor, ParameterInfo, PeakGuard, SpringMass, WaveguideDelay, clamp01,
    cutoff_coeff, db_to_linear, map_range, omega, soft_clip,
};

/// Excitation band split points in Hz.
const SPLIT_LOW_HZ: f32 = 140.0;
const SPLIT_HIGH_HZ: f32 = 2600.0;

const IMPACT_ATTACK_SECS: f32 = 0.0025;
const IMPACT_RELEASE_SECS: f32 = 0.080;
const WET_ATTACK_SECS: f32 = 0.005;
const WET_RELEASE_SECS: f32 = 0.090;

/// Waveguide capacity in seconds; cavity delays stay far below this.
const WAVEGUIDE_SECS: f32 = 0.08;

const METAL_RATIOS: [f32; 4] = [1.00, 2.31, 4.18, 6.87];
const METAL_T60S: [f32; 4] = [0.56, 0.40, 0.26, 0.17];
const METAL_GAINS: [f32; 4] = [0.34, 0.20, 0.13, 0.09];

const WOOD_FREQS: [f32; 4] = [155.0, 355.0, 690.0, 1130.0];
const WOOD_T60S: [f32; 4] = [0.40, 0.27, 0.16, 0.10];
const WOOD_GAINS: [f32; 4] = [0.32, 0.18, 0.10, 0.06];

const PLASTIC_FREQS: [f32; 4] = [280.0, 690.0, 1320.0, 2360.0];
const PLASTIC_T60S: [f32; 4] = [0.28, 0.18, 0.11, 0.07];
const PLASTIC_GAINS: [f32; 4] = [0.34, 0.22, 0.16, 0.11];

/// Selectable material model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Material {
    /// Soft viscoelastic blob.
    #[default]
    Gel,
    /// Struck inharmonic metal.
    Metal,
    /// Knocked wooden cavity.
    Wood,
    /// Hollow plastic tube.
    Plastic,
    /// Damped compound tissue.
    FleshLike,
}

impl Material {
    /// All materials in selector order.
    pub const ALL: [Material; 5] = [
        Material::Gel,
        Material::Metal,
        Material::Wood,
        Material::Plastic,
        Material::FleshLike,
    ];

    /// Selector index of this material.
    pub fn index(self) -> usize {
        match self {
            Material::Gel => 0,
            Material::Metal => 1,
            Material::Wood => 2,
            Material::Plastic => 3,
            Material::FleshLike => 4,
        }
    }

    /// Material for a selector index; out-of-range clamps to the
    /// nearest valid entry.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Material::Gel => "Gel",
            Material::Metal => "Metal",
            Material::Wood => "Wood",
            Material::Plastic => "Plastic",
            Material::FleshLike => "Flesh-like",
        }
    }

    /// Input trim applied before excitation; the resonant models need
    /// less drive than the nonlinear ones.
    fn input_trim(self) -> f32 {
        match self {
            Material::Metal => 0.58,
            Material::Wood => 0.62,
            Material::Plastic => 0.60,
            Material::Gel | Material::FleshLike => 1.0,
        }
    }

    /// Output trim applied after the voice dynamics.
    fn output_trim(self) -> f32 {
        match self {
            Material::Metal | Material::Plastic => 0.62,
            Material::Wood => 0.54,
            Material::Gel | Material::FleshLike => 1.0,
        }
    }
}

/// State for the currently selected voice. Only the active material's
/// resonators are held; a material switch starts from rest.
#[derive(Debug, Clone)]
enum MaterialVoice {
    Gel {
        spring: SpringMass,
    },
    Metal {
        modes: ModalBank<4>,
    },
    Wood {
        line: WaveguideDelay,
        prev_wave: f32,
        modes: ModalBank<4>,
    },
    Plastic {
        line: WaveguideDelay,
        prev_wave: f32,
        modes: ModalBank<4>,
    },
    Flesh {
        masses: CoupledMasses,
    },
}

impl MaterialVoice {
    fn new(material: Material, sample_rate: f32) -> Self {
        match material {
            Material::Gel => Self::Gel {
                spring: SpringMass::new(),
            },
            Material::Metal => Self::Metal {
                modes: ModalBank::new(sample_rate),
            },
            Material::Wood => Self::Wood {
                line: WaveguideDelay::from_time(sample_rate, WAVEGUIDE_SECS),
                prev_wave: 0.0,
                modes: ModalBank::new(sample_rate),
            },
            Material::Plastic => Self::Plastic {
                line: WaveguideDelay::from_time(sample_rate, WAVEGUIDE_SECS),
                prev_wave: 0.0,
                modes: ModalBank::new(sample_rate),
            },
            Material::FleshLike => Self::Flesh {
                masses: CoupledMasses::new(),
            },
        }
    }
}

#[derive(Debug, Clone)]
struct ChannelState {
    impact_env: EnvelopeFollower,
    wet_env: EnvelopeFollower,
    lp: f32,
    hp: f32,
    noise_hp: f32,
    tail: f32,
    voice: MaterialVoice,
    dc: DcBlocker,
    guard: PeakGuard,
}

impl ChannelState {
    fn new(material: Material, sample_rate: f32) -> Self {
        Self {
            impact_env: EnvelopeFollower::new(sample_rate, IMPACT_ATTACK_SECS, IMPACT_RELEASE_SECS),
            wet_env: EnvelopeFollower::new(sample_rate, WET_ATTACK_SECS, WET_RELEASE_SECS),
            lp: 0.0,
            hp: 0.0,
            noise_hp: 0.0,
            tail: 0.0,
            voice: MaterialVoice::new(material, sample_rate),
            dc: DcBlocker::new(),
            guard: PeakGuard::new(),
        }
    }

    fn rebuild_voice(&mut self, material: Material, sample_rate: f32) {
        self.voice = MaterialVoice::new(material, sample_rate);
        self.tail = 0.0;
    }
}

/// Per-block constants shared by both channel passes.
struct BlockConsts {
    material: Material,
    tail_shape: f32,
    damping: f32,
    weight: f32,
    texture: f32,
    mix: f32,
    sample_rate: f32,
    low_coeff: f32,
    high_coeff: f32,
    low_boost: f32,
    damping_mul: f32,
    decay: f32,
    auto_gain_base: f32,
    out_gain: f32,
}

/// Material texture synthesis effect.
#[derive(Debug, Clone)]
pub struct MaterialTexture {
    material: Material,
    tail_shape: f32,
    damping: f32,
    weight: f32,
    texture: f32,
    mix: f32,
    output_db: f32,

    sample_rate: f32,
    rng: Lcg,
    channels: [ChannelState; 2],
}

impl MaterialTexture {
    /// Create a texture engine at `sample_rate` with default settings.
    pub fn new(sample_rate: f32) -> Self {
        let material = Material::default();
        Self {
            material,
            tail_shape: 0.55,
            damping: 0.5,
            weight: 0.45,
            texture: 0.5,
            mix: 1.0,
            output_db: -2.0,
            sample_rate,
            rng: Lcg::new(DEFAULT_SEED),
            channels: [
                ChannelState::new(material, sample_rate),
                ChannelState::new(material, sample_rate),
            ],
        }
    }

    /// Currently selected material.
    pub fn material(&self) -> Material {
        self.material
    }

    /// Select a material. Changing material rebuilds the voice state
    /// from rest on both channels.
    pub fn set_material(&mut self, material: Material) {
        if material != self.material {
            self.material = material;
            for ch in &mut self.channels {
                ch.rebuild_voice(material, self.sample_rate);
            }
        }
    }

    /// Tail length and looseness, 0..1.
    pub fn set_tail_shape(&mut self, amount: f32) {
        self.tail_shape = amount.clamp(0.0, 1.0);
    }

    /// Damping amount, 0 (ringing) to 1 (dead).
    pub fn set_damping(&mut self, amount: f32) {
        self.damping = amount.clamp(0.0, 1.0);
    }

    /// Perceived mass, boosts the low excitation band.
    pub fn set_weight(&mut self, amount: f32) {
        self.weight = amount.clamp(0.0, 1.0);
    }

    /// Surface texture, brightens excitation and roughness.
    pub fn set_texture(&mut self, amount: f32) {
        self.texture = amount.clamp(0.0, 1.0);
    }

    /// Dry/wet blend, 0..1.
    pub fn set_mix(&mut self, mix: f32) {
        self.mix = mix.clamp(0.0, 1.0);
    }

    /// Output trim in dB.
    pub fn set_output_db(&mut self, db: f32) {
        self.output_db = db.clamp(-18.0, 18.0);
    }

    fn block_consts(&self) -> BlockConsts {
        BlockConsts {
            material: self.material,
            tail_shape: self.tail_shape,
            damping: self.damping,
            weight: self.weight,
            texture: self.texture,
            mix: self.mix,
            sample_rate: self.sample_rate,
            low_coeff: cutoff_coeff(self.sample_rate, SPLIT_LOW_HZ),
            high_coeff: cutoff_coeff(self.sample_rate, SPLIT_HIGH_HZ),
            low_boost: 1.0 + self.weight,
            damping_mul: map_range(self.damping, 1.35, 0.40),
            decay: map_range(self.tail_shape, 0.30, 0.985) * map_range(self.damping, 1.0, 0.80),
            auto_gain_base: map_range(self.texture, 0.78, 0.54),
            out_gain: db_to_linear(self.output_db),
        }
    }
}

/// One step of the damped cavity recursion shared by the wood and
/// plastic voices. The feedback memory holds the previous delayed read,
/// so the loop filter averages two consecutive taps of the line rather
/// than the tap and the sample just written. Returns the delayed read
/// that feeds the output.
fn cavity_step(
    line: &mut WaveguideDelay,
    prev_wave: &mut f32,
    delay_samples: f32,
    damp: f32,
    direct: f32,
    history: f32,
    excitation: f32,
) -> f32 {
    let delayed = line.read(delay_samples - 1.0);
    let new_wave = damp * (direct * delayed + history * *prev_wave) + excitation;
    line.write(new_wave);
    *prev_wave = delayed;
    delayed
}

fn voice_output(
    voice: &mut MaterialVoice,
    c: &BlockConsts,
    core: f32,
    hp_state: f32,
    impact: f32,
    body: f32,
    trail: f32,
) -> f32 {
    match voice {
        MaterialVoice::Gel { spring } => {
            let f0 = 42.0 + 88.0 * c.texture;
            let zeta = map_range(trail, 0.62, 1.45);
            let w = omega(f0, c.sample_rate);
            let force = core * (0.52 + 0.62 * body);
            let pos = spring.step(force, w * w, 2.0 * zeta * w);
            soft_clip((0.48 * core + 1.85 * pos) * (0.96 + 0.28 * c.texture))
        }
        MaterialVoice::Metal { modes } => {
            let exc = core * (0.19 + 0.52 * impact);
            let f0 = 320.0 + 140.0 * c.texture;
            let bend = 1.0 + 0.09 * impact;
            let metal_damp = map_range(c.damping, 1.0, 0.55);
            let t_scale = map_range(c.tail_shape, 0.18, 0.72) * c.damping_mul * metal_damp;
            let mut sum = 0.0;
            for i in 0..4 {
                sum += modes.strike(
                    i,
                    exc,
                    f0 * METAL_RATIOS[i] * bend,
                    METAL_T60S[i] * t_scale,
                    METAL_GAINS[i],
                );
            }
            let bright_excite = 0.03 * impact * (core - hp_state);
            (0.44 * core + 0.42 * sum + bright_excite) * (0.78 + 0.10 * c.texture)
        }
        MaterialVoice::Wood {
            line,
            prev_wave,
            modes,
        } => {
            let exc = core * (0.10 + 0.34 * impact);
            let cavity_hz = 92.0 + 95.0 * (0.5 * c.weight + 0.5 * c.texture);
            let delay_samp = (c.sample_rate / cavity_hz).clamp(16.0, line.max_delay());
            let damp = map_range(c.tail_shape, 0.26, 0.90) * map_range(c.damping, 1.0, 0.72);
            let delayed = cavity_step(
                line,
                prev_wave,
                delay_samp,
                damp,
                0.62,
                0.38,
                exc * (0.09 + 0.04 * body),
            );

            let wood_damp = map_range(c.damping, 1.0, 0.64);
            let t_scale = map_range(c.tail_shape, 0.18, 0.62) * c.damping_mul * wood_damp;
            let mut sum = 0.0;
            for i in 0..4 {
                sum += modes.strike(i, exc, WOOD_FREQS[i], WOOD_T60S[i] * t_scale, WOOD_GAINS[i]);
            }
            (0.56 * core + 0.24 * delayed + 0.30 * sum) * (0.74 + 0.08 * c.texture)
        }
        MaterialVoice::Plastic {
            line,
            prev_wave,
            modes,
        } => {
            let exc = core * (0.20 + 0.60 * impact);
            let tube_hz = 210.0 + 340.0 * c.texture;
            let delay_samp = (c.sample_rate / tube_hz).clamp(8.0, line.max_delay());
            let damp = map_range(c.tail_shape, 0.22, 0.91) * map_range(c.damping, 1.0, 0.82);
            let delayed = cavity_step(line, prev_wave, delay_samp, damp, 0.76, 0.24, 0.14 * exc);

            let t_scale = map_range(c.tail_shape, 0.16, 0.72) * c.damping_mul;
            let mut sum = 0.0;
            for i in 0..4 {
                sum += modes.strike(
                    i,
                    exc,
                    PLASTIC_FREQS[i],
                    PLASTIC_T60S[i] * t_scale,
                    PLASTIC_GAINS[i],
                );
            }
            (0.52 * core + 0.36 * delayed + 0.40 * sum) * (0.80 + 0.10 * c.texture)
        }
        MaterialVoice::Flesh { masses } => {
            let force = core * (0.55 + 0.65 * body);
            let w_a = omega(38.0 + 52.0 * c.texture, c.sample_rate);
            let w_b = omega(88.0 + 72.0 * c.texture, c.sample_rate);
            let coeffs = CouplingCoeffs {
                k_a: w_a * w_a,
                k_b: w_b * w_b,
                c_a: 2.0 * map_range(c.tail_shape, 0.56, 1.18) * w_a,
                c_b: 2.0 * map_range(c.tail_shape, 0.70, 1.34) * w_b,
                k_couple: 0.14 + 0.24 * c.texture,
            };
            let (pos_a, pos_b) = masses.step(force, coeffs);
            let tissue = 0.92 * pos_a + 0.58 * pos_b;
            let nl = tissue - 0.19 * tissue * tissue * tissue;
            soft_clip((0.50 * core + 1.34 * nl) * (0.98 + 0.16 * c.texture))
        }
    }
}

fn process_channel(c: &BlockConsts, state: &mut ChannelState, rng: &mut Lcg, buf: &mut [f32]) {
    let input_trim = c.material.input_trim();
    let output_trim = c.material.output_trim();

    for s in buf.iter_mut() {
        let dry = *s;
        let driven = dry * input_trim;

        let env = state.impact_env.track_magnitude(dry);
        let impact = clamp01((dry.abs() - env).max(0.0) * 10.0);
        let body = clamp01(env * 3.2);
        let trail = clamp01(1.0 - impact) * c.tail_shape;

        state.lp += c.low_coeff * (driven - state.lp);
        state.hp += c.high_coeff * (driven - state.hp);
        let low = state.lp * c.low_boost;
        let high = driven - state.hp;
        let mid = driven - state.lp - high;
        let core = low + mid + high * (0.9 + c.texture * 1.3);

        let mut shaped = voice_output(&mut state.voice, c, core, state.hp, impact, body, trail);

        let white = rng.white();
        state.noise_hp += 0.08 * (white - state.noise_hp);
        let rough = white - state.noise_hp;
        shaped += rough * (0.004 + 0.022 * c.texture) * (0.14 + 0.64 * impact);

        let dynamics = 1.0 + impact * (0.18 + c.texture * 0.12) + body * 0.06;
        shaped *= dynamics * output_trim;

        let tail_input = shaped.clamp(-2.0, 2.0) * (0.45 + 0.55 * trail);
        state.tail = tail_input + state.tail * c.decay;
        let mut wet = shaped + state.tail * (0.30 + 0.45 * trail);

        let wet_level = state.wet_env.track_magnitude(wet);
        let auto_comp = c.auto_gain_base / (1.0 + 1.8 * wet_level);
        wet *= auto_comp.clamp(0.18, 1.0);

        let mixed = dry + c.mix * (wet - dry);
        let blocked = state.dc.process(mixed * c.out_gain);
        *s = state.guard.process(blocked);
    }
}

impl BlockEffect for MaterialTexture {
    fn prepare(&mut self, sample_rate: f32, _max_block: usize, _channels: usize) {
        self.sample_rate = sample_rate;
        self.rng.reseed(DEFAULT_SEED);
        self.channels = [
            ChannelState::new(self.material, sample_rate),
            ChannelState::new(self.material, sample_rate),
        ];
    }

    fn process_block(&mut self, left: &mut [f32], right: Option<&mut [f32]>) {
        let consts = self.block_consts();
        let [ch0, ch1] = &mut self.channels;
        process_channel(&consts, ch0, &mut self.rng, left);
        if let Some(right) = right {
            process_channel(&consts, ch1, &mut self.rng, right);
        }
    }

    fn reset(&mut self) {
        for ch in &mut self.channels {
            ch.impact_env.reset();
            ch.wet_env.reset();
            ch.lp = 0.0;
            ch.hp = 0.0;
            ch.noise_hp = 0.0;
            ch.tail = 0.0;
            ch.rebuild_voice(self.material, self.sample_rate);
            ch.dc.reset();
            ch.guard.reset();
        }
    }
}

impl ParameterInfo for MaterialTexture {
    fn param_count(&self) -> usize {
        7
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        match index {
            0 => Some(ParamDescriptor::selector("Material", "Mat", 4)),
            1 => Some(ParamDescriptor::amount("Tail Shape", "Tail", 0.55)),
            2 => Some(ParamDescriptor::amount("Damping", "Damp", 0.5)),
            3 => Some(ParamDescriptor::amount("Weight", "Weight", 0.45)),
            4 => Some(ParamDescriptor::amount("Texture", "Tex", 0.5)),
            5 => Some(ParamDescriptor::amount("Mix", "Mix", 1.0)),
            6 => Some(ParamDescriptor::gain_db("Output", "Out", -18.0, 18.0, -2.0)),
            _ => None,
        }
    }

    fn get_param(&self, index: usize) -> f32 {
        match index {
            0 => self.material.index() as f32,
            1 => self.tail_shape,
            2 => self.damping,
            3 => self.weight,
            4 => self.texture,
            5 => self.mix,
            6 => self.output_db,
            _ => 0.0,
        }
    }

    fn set_param(&mut self, index: usize, value: f32) {
        match index {
            0 => self.set_material(Material::from_index(value.max(0.0) as usize)),
            1 => self.set_tail_shape(value),
            2 => self.set_damping(value),
            3 => self.set_weight(value),
            4 => self.set_texture(value),
            5 => self.set_mix(value),
            6 => self.set_output_db(value),
            _ => {}
        }
    }
}
