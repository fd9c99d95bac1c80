//! Juiciness enhancement effects and physically-modeled texture synthesis.
//!
//! Six block-based effect units built on the `jugo-core` primitives:
//!
//! * [`MaterialTexture`] — five-material physical texture engine
//! * [`TransientShaper`] — attack emphasis and sustain lift
//! * [`Saturator`] — asymmetric tanh drive with tone shaping
//! * [`SpectralMatcher`] — learnable three-band spectral matching
//! * [`MicroMotion`] — onset-triggered micro-variation
//! * [`StereoWidth`] — mono-safe Haas widening
//!
//! All units implement [`BlockEffect`](jugo_core::BlockEffect) plus
//! [`ParameterInfo`](jugo_core::ParameterInfo) and can be built by id
//! through [`create_effect`]. [`MeteredPipeline`] chains them with
//! pre/post juiciness metering from `jugo-analysis`.
//!
//! ```rust
//! use jugo_effects::MeteredPipeline;
//! use jugo_effects::create_effect;
//!
//! let mut pipeline = MeteredPipeline::new(48000.0);
//! pipeline.push(create_effect("punch", 48000.0).unwrap());
//! pipeline.prepare(48000.0, 512, 1);
//!
//! let mut block = vec![0.0f32; 512];
//! pipeline.process_block(&mut block, None);
//! assert!(pipeline.post_score() >= 0.0);
//! ```

pub mod factory;
pub mod material;
pub mod motion;
pub mod pipeline;
pub mod saturator;
pub mod spectral;
pub mod transient;
pub mod width;

pub use factory::{EFFECT_IDS, EffectUnit, create_effect};
pub use material::{Material, MaterialTexture};
pub use motion::MicroMotion;
pub use pipeline::MeteredPipeline;
pub use saturator::Saturator;
pub use spectral::SpectralMatcher;
pub use transient::TransientShaper;
pub use width::StereoWidth;
