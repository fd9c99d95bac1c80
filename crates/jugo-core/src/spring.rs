//! Explicit-integration mass-spring-damper oscillators.
//!
//! Unit mass, one-sample timestep:
//!
//! ```text
//! acc  = k·(force - pos) - c·vel
//! vel += acc
//! pos += vel
//! ```
//!
//! with `k = ω²` and `c = 2ζω` for `ω = 2π·f/sr`. The integrator is only
//! stable for small ω, which the material models guarantee by keeping the
//! natural frequency well below 200 Hz and ζ in roughly [0.5, 1.5].
//!
//! The coupled two-mass form drives a second mass from the first through a
//! coupling stiffness, emulating compound tissue response.

/// Angular frequency per sample for a natural frequency in Hz.
#[inline]
pub fn omega(freq_hz: f32, sample_rate: f32) -> f32 {
    core::f32::consts::TAU * freq_hz / sample_rate
}

/// Single viscoelastic mass on a spring.
#[derive(Debug, Clone, Default)]
pub struct SpringMass {
    /// Mass position, the model output.
    pub pos: f32,
    /// Mass velocity.
    pub vel: f32,
}

impl SpringMass {
    /// Create a mass at rest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one sample under `force` with stiffness `k` and damping `c`.
    /// Returns the new position.
    #[inline]
    pub fn step(&mut self, force: f32, k: f32, c: f32) -> f32 {
        let acc = k * (force - self.pos) - c * self.vel;
        self.vel += acc;
        self.pos += self.vel;
        self.pos
    }

    /// Return the mass to rest.
    pub fn reset(&mut self) {
        self.pos = 0.0;
        self.vel = 0.0;
    }
}

/// Two masses coupled through a shared stiffness term.
///
/// Mass A is driven by the external force; mass B follows A through
/// `k_couple`. Both positions contribute to the tissue output.
#[derive(Debug, Clone, Default)]
pub struct CoupledMasses {
    /// Driven mass position.
    pub pos_a: f32,
    /// Driven mass velocity.
    pub vel_a: f32,
    /// Follower mass position.
    pub pos_b: f32,
    /// Follower mass velocity.
    pub vel_b: f32,
}

/// Per-sample coefficients for [`CoupledMasses::step`].
#[derive(Debug, Clone, Copy)]
pub struct CouplingCoeffs {
    /// Stiffness of the driven mass.
    pub k_a: f32,
    /// Stiffness of the follower mass.
    pub k_b: f32,
    /// Damping of the driven mass.
    pub c_a: f32,
    /// Damping of the follower mass.
    pub c_b: f32,
    /// Coupling stiffness between the two positions.
    pub k_couple: f32,
}

impl CoupledMasses {
    /// Create both masses at rest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance both masses one sample under `force`.
    /// Returns `(pos_a, pos_b)`.
    #[inline]
    pub fn step(&mut self, force: f32, coeffs: CouplingCoeffs) -> (f32, f32) {
        let acc_a = coeffs.k_a * (force - self.pos_a)
            - coeffs.c_a * self.vel_a
            - coeffs.k_couple * (self.pos_a - self.pos_b);
        let acc_b = coeffs.k_b * (self.pos_a - self.pos_b) - coeffs.c_b * self.vel_b;
        self.vel_a += acc_a;
        self.vel_b += acc_b;
        self.pos_a += self.vel_a;
        self.pos_b += self.vel_b;
        (self.pos_a, self.pos_b)
    }

    /// Return both masses to rest.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
