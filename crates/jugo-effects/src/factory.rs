//! Effect registry: string ids to boxed effect units.

use crate::material::MaterialTexture;
use crate::motion::MicroMotion;
use crate::saturator::Saturator;
use crate::spectral::SpectralMatcher;
use crate::transient::TransientShaper;
use crate::width::StereoWidth;
use jugo_core::{BlockEffect, ParameterInfo};

/// A processing unit: block processing plus parameter introspection.
pub trait EffectUnit: BlockEffect + ParameterInfo + Send {}

impl<T: BlockEffect + ParameterInfo + Send> EffectUnit for T {}

/// Ids accepted by [`create_effect`], in display order.
pub const EFFECT_IDS: &[&str] = &[
    "material",
    "punch",
    "saturator",
    "cohere",
    "motion",
    "width",
];

/// Instantiate an effect by id with default parameters.
/// Returns `None` for an unknown id.
pub fn create_effect(id: &str, sample_rate: f32) -> Option<Box<dyn EffectUnit>> {
    match id {
        "material" => Some(Box::new(MaterialTexture::new(sample_rate))),
        "punch" => Some(Box::new(TransientShaper::new(sample_rate))),
        "saturator" => Some(Box::new(Saturator::new(sample_rate))),
        "cohere" => Some(Box::new(SpectralMatcher::new(sample_rate))),
        "motion" => Some(Box::new(MicroMotion::new(sample_rate))),
        "width" => Some(Box::new(StereoWidth::new(sample_rate))),
        _ => None,
    }
}
