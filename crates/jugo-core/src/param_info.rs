//! Runtime parameter discovery for effect units.
//!
//! Every effect exposes its controls through [`ParameterInfo`]: a count,
//! a descriptor per index, and index-based get/set. Hosts use this for
//! generic control surfaces and for applying named control values from
//! the command line without knowing each effect's struct layout.
//!
//! Access is index-based; [`ParameterInfo::set_by_name`] resolves a
//! case-insensitive name first and then sets by index. Implementations
//! clamp incoming values to the descriptor range.

/// Unit tag for formatting a parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// Decibels, for gains and thresholds.
    Decibels,
    /// Hertz, for rates and frequencies.
    Hertz,
    /// Milliseconds, for times.
    Milliseconds,
    /// Percent, for mixes and depths.
    Percent,
    /// Dimensionless normalized amount.
    None,
}

impl ParamUnit {
    /// Display suffix for this unit.
    pub const fn suffix(&self) -> &'static str {
        match self {
            ParamUnit::Decibels => " dB",
            ParamUnit::Hertz => " Hz",
            ParamUnit::Milliseconds => " ms",
            ParamUnit::Percent => "%",
            ParamUnit::None => "",
        }
    }
}

/// Metadata for a single effect parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full display name, e.g. "Material".
    pub name: &'static str,
    /// Short name for narrow displays, 8 chars or fewer.
    pub short_name: &'static str,
    /// Unit tag for formatting.
    pub unit: ParamUnit,
    /// Minimum allowed value.
    pub min: f32,
    /// Maximum allowed value.
    pub max: f32,
    /// Value after construction or reset.
    pub default: f32,
    /// True for discrete selector parameters (material type, mode index).
    pub stepped: bool,
}

impl ParamDescriptor {
    /// Normalized 0..1 amount parameter.
    pub const fn amount(name: &'static str, short_name: &'static str, default: f32) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::None,
            min: 0.0,
            max: 1.0,
            default,
            stepped: false,
        }
    }

    /// Discrete selector over `0..=max_index`.
    pub const fn selector(name: &'static str, short_name: &'static str, max_index: u32) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::None,
            min: 0.0,
            max: max_index as f32,
            default: 0.0,
            stepped: true,
        }
    }

    /// Gain parameter in decibels.
    pub const fn gain_db(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Decibels,
            min,
            max,
            default,
            stepped: false,
        }
    }

    /// Time parameter in milliseconds.
    pub const fn time_ms(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Milliseconds,
            min,
            max,
            default,
            stepped: false,
        }
    }

    /// Rate parameter in Hz.
    pub const fn rate_hz(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Hertz,
            min,
            max,
            default,
            stepped: false,
        }
    }

    /// Clamp `value` into this parameter's range.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }
}

/// Trait for effects with discoverable parameters.
///
/// Indices are stable for the lifetime of the instance; valid indices
/// are `0..param_count()`. Out-of-range `get_param` returns `0.0`,
/// out-of-range `set_param` is ignored.
pub trait ParameterInfo {
    /// Number of exposed parameters.
    fn param_count(&self) -> usize;

    /// Descriptor for the parameter at `index`, or `None` out of range.
    fn param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Current value of the parameter at `index`.
    fn get_param(&self, index: usize) -> f32;

    /// Set the parameter at `index`, clamped to its descriptor range.
    fn set_param(&mut self, index: usize, value: f32);

    /// Find a parameter index by name or short name, case-insensitive.
    fn find_param_by_name(&self, name: &str) -> Option<usize> {
        (0..self.param_count()).find(|&i| {
            self.param_info(i).is_some_and(|desc| {
                desc.name.eq_ignore_ascii_case(name) || desc.short_name.eq_ignore_ascii_case(name)
            })
        })
    }

    /// Set a parameter by name. Returns `false` if no parameter matches.
    fn set_by_name(&mut self, name: &str, value: f32) -> bool {
        match self.find_param_by_name(name) {
            Some(index) => {
                self.set_param(index, value);
                true
            }
            None => false,
        }
    }
}
