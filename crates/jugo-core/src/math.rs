//! Mathematical utility functions for DSP.
//!
//! Allocation-free helpers shared by the analyzer and the material engines.
//! All functions are `no_std`-safe (`libm` for transcendentals).

use libm::{expf, logf, tanhf};

/// Convert decibels to linear gain.
///
/// # Example
/// ```rust
/// use jugo_core::db_to_linear;
///
/// assert!((db_to_linear(0.0) - 1.0).abs() < 0.001);
/// assert!((db_to_linear(-6.02) - 0.5).abs() < 0.01);
/// ```
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    // 10^(dB/20) = e^(dB * ln(10)/20)
    const FACTOR: f32 = core::f32::consts::LN_10 / 20.0;
    expf(db * FACTOR)
}

/// Convert linear gain to decibels. Inputs at or below zero floor at -200 dB.
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    const FACTOR: f32 = 20.0 / core::f32::consts::LN_10;
    logf(linear.max(1e-10)) * FACTOR
}

/// Clamp a value into [0, 1].
#[inline]
pub fn clamp01(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}

/// Map a normalized control value in [0, 1] onto [lo, hi].
///
/// `hi < lo` is allowed and inverts the mapping, which is how damping-style
/// controls turn "more damping" into "shorter decay".
#[inline]
pub fn map_range(t: f32, lo: f32, hi: f32) -> f32 {
    lo + t * (hi - lo)
}

/// Linear interpolation between `a` and `b`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Soft clip using hyperbolic tangent. Output in (-1, 1).
#[inline]
pub fn soft_clip(x: f32) -> f32 {
    tanhf(x)
}

/// Hard clip to the ±threshold range.
#[inline]
pub fn hard_clip(x: f32, threshold: f32) -> f32 {
    x.clamp(-threshold, threshold)
}

/// One-pole smoothing coefficient for a time constant in seconds.
///
/// `exp(-1 / (sample_rate * seconds))` — the smoothed value settles to ~63%
/// of a step within `seconds`.
#[inline]
pub fn time_coeff(sample_rate: f32, seconds: f32) -> f32 {
    expf(-1.0 / (sample_rate * seconds.max(1e-6)))
}

/// One-pole lowpass tracking coefficient for a cutoff frequency in Hz.
///
/// `1 - exp(-2π·fc/sr)`, the gain applied to the input-minus-state update
/// `state += coeff * (x - state)`.
#[inline]
pub fn cutoff_coeff(sample_rate: f32, freq_hz: f32) -> f32 {
    1.0 - expf(-core::f32::consts::TAU * freq_hz / sample_rate)
}

/// Flush denormal values to zero to avoid denormal CPU stalls in feedback
/// paths.
#[inline]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < 1e-20 { 0.0 } else { x }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_round_trip() {
        for db in [-24.0, -6.0, 0.0, 6.0, 18.0] {
            let back = linear_to_db(db_to_linear(db));
            assert!((back - db).abs() < 0.01, "round trip {db} -> {back}");
        }
    }

    #[test]
    fn map_range_inverts() {
        assert!((map_range(0.0, 1.35, 0.40) - 1.35).abs() < 1e-6);
        assert!((map_range(1.0, 1.35, 0.40) - 0.40).abs() < 1e-6);
        assert!((map_range(0.5, 0.0, 2.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn time_coeff_settles_at_tau() {
        // After sr * t samples of a unit step, a one-pole with this coeff
        // reaches 1 - 1/e.
        let sr = 48000.0;
        let c = time_coeff(sr, 0.01);
        let mut y = 0.0f32;
        for _ in 0..480 {
            y = (1.0 - c) * 1.0 + c * y;
        }
        assert!((y - (1.0 - core::f32::consts::E.recip())).abs() < 0.01);
    }

    #[test]
    fn flush_denormal_zeroes_tiny() {
        assert_eq!(flush_denormal(1e-30), 0.0);
        assert_eq!(flush_denormal(0.5), 0.5);
    }

    #[test]
    fn soft_clip_bounded() {
        for x in [-100.0, -1.0, 0.0, 1.0, 100.0] {
            assert!(soft_clip(x).abs() <= 1.0);
        }
    }
}
