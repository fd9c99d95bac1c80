//! Jugo Core - DSP primitives for perceptual audio processing
//!
//! Foundational building blocks shared by the analysis and effect crates:
//! envelope followers, band splitters, physical resonator models, and the
//! protection/utility stages every effect chain ends with. Everything here
//! is real-time safe: allocation is confined to construction, processing
//! paths are allocation-free.
//!
//! # Modules
//!
//! - [`envelope`] — asymmetric attack/release followers for level tracking
//! - [`band_split`] — serial one-pole three-band splitter (low/mid/high)
//! - [`modal`] — bank of two-pole resonators excited by transient strikes
//! - [`waveguide`] — fractional delay line for tube and cavity resonance
//! - [`spring`] — explicit-integration mass-spring models, single and coupled
//! - [`dc_blocker`] — first-order highpass for nonlinear chains
//! - [`noise`] — deterministic LCG noise source
//! - [`protect`] — peak-riding output protection
//! - [`block`] — the [`BlockEffect`] stereo processing trait
//! - [`param_info`] — runtime parameter discovery
//! - [`math`] — conversion and mapping helpers over `libm`
//!
//! # no_std Support
//!
//! `no_std` compatible with the default `std` feature disabled; `libm`
//! supplies the float math either way.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod band_split;
pub mod block;
pub mod dc_blocker;
pub mod envelope;
pub mod math;
pub mod modal;
pub mod noise;
pub mod param_info;
pub mod protect;
pub mod spring;
pub mod waveguide;

pub use band_split::{ANALYSIS_CROSSOVER_HZ, Bands, BandSplitter, TONAL_CROSSOVER_HZ};
pub use block::BlockEffect;
pub use dc_blocker::DcBlocker;
pub use envelope::EnvelopeFollower;
pub use math::{
    clamp01, cutoff_coeff, db_to_linear, flush_denormal, hard_clip, lerp, linear_to_db,
    map_range, soft_clip, time_coeff,
};
pub use modal::ModalBank;
pub use noise::{DEFAULT_SEED, Lcg};
pub use param_info::{ParamDescriptor, ParamUnit, ParameterInfo};
pub use protect::PeakGuard;
pub use spring::{CoupledMasses, CouplingCoeffs, SpringMass, omega};
pub use waveguide::WaveguideDelay;
