//! Effect chain specification parsing.
//!
//! A chain spec is a pipe-separated list of effect stages, each an id
//! with optional comma-separated parameter assignments:
//!
//! ```text
//! material:texture=0.8,damping=0.3|punch:punch=0.7|width
//! ```
//!
//! Parameter names match the descriptors reported by the effect, case
//! insensitively, by either full or short name.

use anyhow::{Context, bail};
use jugo_effects::{EFFECT_IDS, EffectUnit, create_effect};

/// One parsed stage: effect id plus parameter assignments.
#[derive(Debug, Clone, PartialEq)]
pub struct StageSpec {
    /// Factory id of the effect.
    pub id: String,
    /// `(name, value)` assignments in spec order.
    pub params: Vec<(String, f32)>,
}

/// Parse a chain spec into stages. Errors name the offending token.
pub fn parse_chain(spec: &str) -> anyhow::Result<Vec<StageSpec>> {
    let mut stages = Vec::new();
    for stage_spec in spec.split('|') {
        let stage_spec = stage_spec.trim();
        if stage_spec.is_empty() {
            continue;
        }

        let (id, param_spec) = match stage_spec.split_once(':') {
            Some((id, rest)) => (id.trim(), rest),
            None => (stage_spec, ""),
        };
        if !EFFECT_IDS.contains(&id) {
            bail!(
                "unknown effect '{id}' (available: {})",
                EFFECT_IDS.join(", ")
            );
        }

        let mut params = Vec::new();
        for assignment in param_spec.split(',') {
            let assignment = assignment.trim();
            if assignment.is_empty() {
                continue;
            }
            let (name, value) = assignment
                .split_once('=')
                .with_context(|| format!("expected name=value, got '{assignment}'"))?;
            let value: f32 = value
                .trim()
                .parse()
                .with_context(|| format!("invalid value in '{assignment}'"))?;
            params.push((name.trim().to_string(), value));
        }

        stages.push(StageSpec {
            id: id.to_string(),
            params,
        });
    }
    Ok(stages)
}

/// Instantiate a parsed stage, applying its parameter assignments.
pub fn build_stage(stage: &StageSpec, sample_rate: f32) -> anyhow::Result<Box<dyn EffectUnit>> {
    let mut effect = create_effect(&stage.id, sample_rate)
        .with_context(|| format!("unknown effect '{}'", stage.id))?;
    for (name, value) in &stage.params {
        if !effect.set_by_name(name, *value) {
            bail!("effect '{}' has no parameter '{name}'", stage.id);
        }
    }
    Ok(effect)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_multi_stage_chain() {
        let stages = parse_chain("material:texture=0.8,damping=0.3|punch:punch=0.7|width").unwrap();
        assert_eq!(stages.len(), 3);
        assert_eq!(stages[0].id, "material");
        assert_eq!(stages[0].params, vec![
            ("texture".to_string(), 0.8),
            ("damping".to_string(), 0.3),
        ]);
        assert_eq!(stages[1].params, vec![("punch".to_string(), 0.7)]);
        assert!(stages[2].params.is_empty());
    }

    #[test]
    fn rejects_unknown_effect() {
        assert!(parse_chain("reverb:mix=0.5").is_err());
    }

    #[test]
    fn rejects_malformed_assignment() {
        assert!(parse_chain("punch:sustain").is_err());
        assert!(parse_chain("punch:sustain=loud").is_err());
    }

    #[test]
    fn builds_stage_with_params_applied() {
        let stages = parse_chain("saturator:drive=12").unwrap();
        let effect = build_stage(&stages[0], 48000.0).unwrap();
        assert_eq!(effect.get_param(0), 12.0);
    }

    #[test]
    fn build_rejects_unknown_parameter() {
        let stages = parse_chain("punch:sparkle=1").unwrap();
        assert!(build_stage(&stages[0], 48000.0).is_err());
    }
}
