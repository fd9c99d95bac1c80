//! Metric set produced by one analysis pass.

/// Perceptual metrics for one audio block.
///
/// All fields except [`score`](Self::score) are normalized to `[0, 1]`;
/// `score` is a composite on `[0, 100]`. A freshly constructed value is
/// the silence default: everything zero except `mono_safety`, which is
/// `1.0` (silence collapses to mono perfectly).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JuicinessMetrics {
    /// Composite quality score, 0 to 100.
    pub score: f32,
    /// Transient impact relative to average level.
    pub punch: f32,
    /// Density and fullness of the signal body.
    pub richness: f32,
    /// Freedom from mud (excess low/high imbalance) and harshness.
    pub clarity: f32,
    /// Stereo side energy relative to total.
    pub width: f32,
    /// Inter-channel correlation mapped to 0..1; low values warn of
    /// phase cancellation on mono playback.
    pub mono_safety: f32,
    /// How strongly transient events stand out from the bed.
    pub emphasis: f32,
    /// Combined clarity, mono safety, and moderate-width agreement.
    pub coherence: f32,
    /// Cross-sensory intensity proxy: weight, warmth, and snap together.
    pub synesthesia: f32,
    /// Slow-moving listening fatigue estimate.
    pub fatigue_risk: f32,
    /// Smoothed onset rate against a 12-onsets-per-second reference.
    pub repetition_density: f32,
}

impl Default for JuicinessMetrics {
    fn default() -> Self {
        Self {
            score: 0.0,
            punch: 0.0,
            richness: 0.0,
            clarity: 0.0,
            width: 0.0,
            mono_safety: 1.0,
            emphasis: 0.0,
            coherence: 0.0,
            synesthesia: 0.0,
            fatigue_risk: 0.0,
            repetition_density: 0.0,
        }
    }
}
