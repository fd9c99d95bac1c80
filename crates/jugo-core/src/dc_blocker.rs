//! DC blocking filter for nonlinear processing chains.
//!
//! First-order highpass, `y[n] = x[n] - x[n-1] + R·y[n-1]`. The physical
//! material models (asymmetric springs, rectifying nonlinearities) leak DC
//! into the output; this stage removes it without touching audible content.
//! `R = 0.995` puts the cutoff around 38 Hz at 48 kHz scaled by the pole,
//! well below the lowest material resonance in use.

/// One-pole DC blocker.
#[derive(Debug, Clone)]
pub struct DcBlocker {
    coeff: f32,
    x_prev: f32,
    y_prev: f32,
}

impl DcBlocker {
    /// Pole coefficient shared by all effect chains.
    pub const DEFAULT_COEFF: f32 = 0.995;

    /// Create a blocker with the default pole coefficient.
    pub fn new() -> Self {
        Self::with_coeff(Self::DEFAULT_COEFF)
    }

    /// Create a blocker with an explicit pole coefficient, clamped into
    /// [0.9, 0.9999] for stability.
    pub fn with_coeff(coeff: f32) -> Self {
        Self {
            coeff: coeff.clamp(0.9, 0.9999),
            x_prev: 0.0,
            y_prev: 0.0,
        }
    }

    /// Filter one sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let output = input - self.x_prev + self.coeff * self.y_prev;
        self.x_prev = input;
        self.y_prev = output;
        output
    }

    /// Current pole coefficient.
    pub fn coeff(&self) -> f32 {
        self.coeff
    }

    /// Zero the filter memory.
    pub fn reset(&mut self) {
        self.x_prev = 0.0;
        self.y_prev = 0.0;
    }
}

impl Default for DcBlocker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_dc_offset() {
        let mut blocker = DcBlocker::new();
        let mut out = 0.0;
        for _ in 0..48000 {
            out = blocker.process(1.0);
        }
        assert!(out.abs() < 0.01, "DC should be removed, got {out}");
    }

    #[test]
    fn passes_audio_band() {
        let mut blocker = DcBlocker::new();
        let sr = 48000.0;
        for i in 0..48000 {
            let t = i as f32 / sr;
            blocker.process(libm::sinf(core::f32::consts::TAU * 1000.0 * t));
        }
        let mut max_out = 0.0f32;
        for i in 48000..48096 {
            let t = i as f32 / sr;
            let out = blocker.process(libm::sinf(core::f32::consts::TAU * 1000.0 * t));
            max_out = max_out.max(out.abs());
        }
        assert!(max_out > 0.95, "1 kHz should pass near unity, got {max_out}");
    }

    #[test]
    fn coeff_is_clamped() {
        assert_eq!(DcBlocker::with_coeff(0.5).coeff(), 0.9);
        assert_eq!(DcBlocker::with_coeff(1.0).coeff(), 0.9999);
    }

    #[test]
    fn reset_clears_memory() {
        let mut blocker = DcBlocker::new();
        blocker.process(1.0);
        blocker.reset();
        assert_eq!(blocker.process(0.0), 0.0);
    }
}
