//! End-to-end tests for the metric extraction pipeline.

use jugo_analysis::{JuicinessAnalyzer, JuicinessMetrics, MetricsBridge};
use proptest::prelude::*;

const SR: f32 = 48000.0;

fn sine(freq: f32, n: usize, amp: f32) -> Vec<f32> {
    (0..n)
        .map(|i| amp * (core::f32::consts::TAU * freq * i as f32 / SR).sin())
        .collect()
}

/// Drum-loop stand-in: decaying noise bursts over a low sine bed.
fn drum_loop(n: usize) -> (Vec<f32>, Vec<f32>) {
    let mut state = 0x2468_ace0u32;
    let mut next = move || {
        state = state.wrapping_mul(1664525).wrapping_add(1013904223);
        ((state >> 8) & 0xFFFF) as f32 / 32768.0 - 1.0
    };
    let mut left = vec![0.0f32; n];
    let mut right = vec![0.0f32; n];
    for i in 0..n {
        let bed = 0.2 * (core::f32::consts::TAU * 80.0 * i as f32 / SR).sin();
        let phase = i % 12000;
        let burst = if phase < 1200 {
            0.6 * (1.0 - phase as f32 / 1200.0) * next()
        } else {
            0.0
        };
        left[i] = bed + burst;
        right[i] = bed + 0.8 * burst;
    }
    (left, right)
}

#[test]
fn streaming_metrics_converge_on_repeated_material() {
    let (left, right) = drum_loop(48000);
    let mut analyzer = JuicinessAnalyzer::new(SR);

    let mut last = JuicinessMetrics::default();
    let mut prev_score = -1.0f32;
    let mut settled_delta = f32::MAX;
    for _ in 0..6 {
        for (l, r) in left.chunks(512).zip(right.chunks(512)) {
            last = analyzer.analyze(l, Some(r));
        }
        if prev_score >= 0.0 {
            settled_delta = (last.score - prev_score).abs();
        }
        prev_score = last.score;
    }

    assert!(last.score > 0.0 && last.score <= 100.0);
    assert!(last.punch > 0.1, "percussive loop should have punch");
    assert!(settled_delta < 5.0, "score should settle, delta {settled_delta}");
}

#[test]
fn mono_and_identical_stereo_agree() {
    let block = sine(440.0, 4096, 0.5);
    let mut mono = JuicinessAnalyzer::new(SR);
    let mut stereo = JuicinessAnalyzer::new(SR);

    let mut m1 = JuicinessMetrics::default();
    let mut m2 = JuicinessMetrics::default();
    for _ in 0..10 {
        m1 = mono.analyze(&block, None);
        m2 = stereo.analyze(&block, Some(&block));
    }
    assert!((m1.score - m2.score).abs() < 1e-3);
    assert!((m1.width - m2.width).abs() < 1e-6);
}

#[test]
fn bridge_carries_analyzer_output() {
    let bridge = MetricsBridge::new();
    let mut analyzer = JuicinessAnalyzer::new(SR);
    let block = sine(220.0, 2048, 0.6);

    let mut published = JuicinessMetrics::default();
    for _ in 0..5 {
        published = analyzer.analyze(&block, Some(&block));
        bridge.publish(&published);
    }
    assert_eq!(bridge.snapshot(), published);
}

#[test]
fn prepare_survives_sample_rate_change() {
    let mut analyzer = JuicinessAnalyzer::new(44100.0);
    let block = sine(440.0, 1024, 0.5);
    analyzer.analyze(&block, None);

    analyzer.prepare(96000.0);
    assert_eq!(analyzer.sample_rate(), 96000.0);
    let m = analyzer.analyze(&block, None);
    assert!((0.0..=100.0).contains(&m.score));
}

proptest! {
    #[test]
    fn metrics_bounded_for_arbitrary_blocks(
        samples in prop::collection::vec(-1.5f32..1.5, 1..2048),
    ) {
        let mut analyzer = JuicinessAnalyzer::new(SR);
        let m = analyzer.analyze(&samples, None);
        prop_assert!(m.score.is_finite());
        prop_assert!((0.0..=100.0).contains(&m.score));
        for v in [
            m.punch, m.richness, m.clarity, m.width, m.mono_safety,
            m.emphasis, m.coherence, m.synesthesia, m.fatigue_risk,
            m.repetition_density,
        ] {
            prop_assert!((0.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn stereo_metrics_bounded_for_arbitrary_blocks(
        pairs in prop::collection::vec((-1.5f32..1.5, -1.5f32..1.5), 1..1024),
    ) {
        let left: Vec<f32> = pairs.iter().map(|p| p.0).collect();
        let right: Vec<f32> = pairs.iter().map(|p| p.1).collect();
        let mut analyzer = JuicinessAnalyzer::new(SR);
        let m = analyzer.analyze(&left, Some(&right));
        prop_assert!(m.score.is_finite());
        prop_assert!((-0.0..=1.0).contains(&m.mono_safety));
    }
}
