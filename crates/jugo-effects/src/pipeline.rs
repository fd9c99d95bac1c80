//! Effect chain with pre/post juiciness metering.
//!
//! The pipeline runs its effects in order and measures the signal with
//! one analyzer before and after the chain. Sharing a single analyzer
//! across both measurement points keeps the envelope and repetition
//! trackers fed with twice the onsets, so the two scores are directly
//! comparable rather than independently calibrated. Scores land in
//! relaxed atomics for lock-free UI reads; the full post-chain metric
//! set goes out through a [`MetricsBridge`].

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use jugo_analysis::{JuicinessAnalyzer, JuicinessMetrics, MetricsBridge};

use crate::factory::EffectUnit;

/// Metered effect chain.
pub struct MeteredPipeline {
    effects: Vec<Box<dyn EffectUnit>>,
    analyzer: JuicinessAnalyzer,
    bridge: Arc<MetricsBridge>,
    sensitivity: f32,
    sample_rate: f32,
    pre_score: AtomicU32,
    post_score: AtomicU32,
}

impl MeteredPipeline {
    /// Create an empty pipeline at `sample_rate`.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            effects: Vec::new(),
            analyzer: JuicinessAnalyzer::new(sample_rate),
            bridge: Arc::new(MetricsBridge::new()),
            sensitivity: 1.0,
            sample_rate,
            pre_score: AtomicU32::new(0.0f32.to_bits()),
            post_score: AtomicU32::new(0.0f32.to_bits()),
        }
    }

    /// Append an effect to the end of the chain.
    pub fn push(&mut self, effect: Box<dyn EffectUnit>) {
        self.effects.push(effect);
    }

    /// Number of effects in the chain.
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// True when the chain has no effects.
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Mutable access to the effect at `index` for parameter changes.
    pub fn effect_mut(&mut self, index: usize) -> Option<&mut Box<dyn EffectUnit>> {
        self.effects.get_mut(index)
    }

    /// Score sensitivity multiplier, 0.5..2.0.
    pub fn set_sensitivity(&mut self, sensitivity: f32) {
        self.sensitivity = sensitivity.clamp(0.5, 2.0);
    }

    /// Sample rate the pipeline was last prepared for.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Shared handle for metric readers on other threads.
    pub fn bridge(&self) -> Arc<MetricsBridge> {
        Arc::clone(&self.bridge)
    }

    /// Juiciness score measured before the chain, 0..100.
    pub fn pre_score(&self) -> f32 {
        f32::from_bits(self.pre_score.load(Ordering::Relaxed))
    }

    /// Juiciness score measured after the chain, 0..100.
    pub fn post_score(&self) -> f32 {
        f32::from_bits(self.post_score.load(Ordering::Relaxed))
    }

    /// Last published post-chain metrics.
    pub fn metrics(&self) -> JuicinessMetrics {
        self.bridge.snapshot()
    }

    fn scaled_score(&self, score: f32) -> f32 {
        (score * self.sensitivity).clamp(0.0, 100.0)
    }

    /// Prepare the analyzer and every effect for a new stream.
    pub fn prepare(&mut self, sample_rate: f32, max_block: usize, channels: usize) {
        self.sample_rate = sample_rate;
        self.analyzer.prepare(sample_rate);
        for effect in &mut self.effects {
            effect.prepare(sample_rate, max_block, channels);
        }
    }

    /// Process one block through the chain, metering on both sides.
    pub fn process_block(&mut self, left: &mut [f32], mut right: Option<&mut [f32]>) {
        let pre = self.analyzer.analyze(left, right.as_deref());
        let pre_score = self.scaled_score(pre.score);
        self.pre_score.store(pre_score.to_bits(), Ordering::Relaxed);

        for effect in &mut self.effects {
            effect.process_block(left, right.as_deref_mut());
        }

        let mut post = self.analyzer.analyze(left, right.as_deref());
        post.score = self.scaled_score(post.score);
        self.post_score.store(post.score.to_bits(), Ordering::Relaxed);
        self.bridge.publish(&post);
    }

    /// Reset the analyzer and every effect.
    pub fn reset(&mut self) {
        self.analyzer.reset();
        for effect in &mut self.effects {
            effect.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::create_effect;
    use jugo_core::ParameterInfo;

    fn drum_loop(n: usize) -> (Vec<f32>, Vec<f32>) {
        let left: Vec<f32> = (0..n)
            .map(|i| {
                let phase = i % 4800;
                if phase < 96 {
                    0.8 * (1.0 - phase as f32 / 96.0)
                } else {
                    0.05 * (core::f32::consts::TAU * 220.0 * i as f32 / 48000.0).sin()
                }
            })
            .collect();
        let right = left.clone();
        (left, right)
    }

    #[test]
    fn empty_pipeline_passes_audio_and_meters() {
        let mut pipeline = MeteredPipeline::new(48000.0);
        pipeline.prepare(48000.0, 512, 2);

        let (mut left, mut right) = drum_loop(48000);
        let dry = left.clone();
        for (lc, rc) in left.chunks_mut(512).zip(right.chunks_mut(512)) {
            pipeline.process_block(lc, Some(rc));
        }
        assert_eq!(left, dry, "no effects, no change");
        assert!(pipeline.pre_score() > 0.0);
        assert!(pipeline.post_score() > 0.0);
    }

    #[test]
    fn chain_runs_in_order_and_alters_audio() {
        let mut pipeline = MeteredPipeline::new(48000.0);
        pipeline.push(create_effect("punch", 48000.0).unwrap());
        pipeline.push(create_effect("saturator", 48000.0).unwrap());
        pipeline.prepare(48000.0, 512, 1);
        assert_eq!(pipeline.len(), 2);

        let (mut left, _) = drum_loop(9600);
        let dry = left.clone();
        for chunk in left.chunks_mut(512) {
            pipeline.process_block(chunk, None);
        }
        assert_ne!(left, dry);
        for &s in &left {
            assert!(s.is_finite());
        }
    }

    #[test]
    fn sensitivity_scales_the_scores() {
        let (signal, _) = drum_loop(48000);

        let run = |sensitivity: f32| {
            let mut pipeline = MeteredPipeline::new(48000.0);
            pipeline.set_sensitivity(sensitivity);
            pipeline.prepare(48000.0, 512, 1);
            let mut buf = signal.clone();
            for chunk in buf.chunks_mut(512) {
                pipeline.process_block(chunk, None);
            }
            pipeline.post_score()
        };

        let base = run(1.0);
        let half = run(0.5);
        assert!((half - (base * 0.5).clamp(0.0, 100.0)).abs() < 1e-3);
    }

    #[test]
    fn bridge_carries_post_metrics() {
        let mut pipeline = MeteredPipeline::new(48000.0);
        pipeline.push(create_effect("punch", 48000.0).unwrap());
        pipeline.prepare(48000.0, 512, 1);
        let bridge = pipeline.bridge();

        let (mut left, _) = drum_loop(24000);
        for chunk in left.chunks_mut(512) {
            pipeline.process_block(chunk, None);
        }
        let metrics = bridge.snapshot();
        assert!(metrics.score > 0.0);
        assert!((metrics.score - pipeline.post_score()).abs() < 1e-6);
    }

    #[test]
    fn effect_params_reachable_through_the_chain() {
        let mut pipeline = MeteredPipeline::new(48000.0);
        pipeline.push(create_effect("material", 48000.0).unwrap());
        let fx = pipeline.effect_mut(0).unwrap();
        assert!(fx.set_by_name("Mix", 0.25));
        assert!(pipeline.effect_mut(1).is_none());
    }
}
