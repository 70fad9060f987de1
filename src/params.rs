// src/params.rs
//! Physical parameters of an overdamped Langevin step.
//!
//! # Update Rule
//!
//! ```text
//! x_{n+1} = x_n + D β F(x_n) Δt + √(2 D Δt) g,    g ~ N(0, 1)
//! ```
//!
//! Where:
//! - `D`: diffusion coefficient
//! - `β = 1/(k_B T)`: inverse temperature
//! - `Δt`: timestep
//!
//! The two scalar prefactors are computed once here and applied elementwise by
//! the integrator.

use crate::error::{validation::*, LangevinResult};
use log::debug;

/// Precision of the random term before it is combined with the configuration
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NoisePrecision {
    /// Keep the draw at the precision of the configuration
    #[default]
    Native,
    /// Narrow every draw to `f32` first, whatever the configuration type
    Single,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LangevinParams {
    pub beta: f64,            // Inverse temperature 1/(k_B T)
    pub dt: f64,              // Timestep
    pub diffusion_coeff: f64, // Diffusion coefficient D
    pub precision: NoisePrecision,
}

impl LangevinParams {
    pub fn new(beta: f64, dt: f64, diffusion_coeff: f64) -> LangevinResult<Self> {
        let params = LangevinParams {
            beta,
            dt,
            diffusion_coeff,
            precision: NoisePrecision::Native,
        };
        params.validate()?;
        Ok(params)
    }

    /// Build parameters from a thermal energy scale instead of `beta`.
    ///
    /// `beta = 1 / (k_b * temperature)`; both factors must be positive.
    pub fn from_temperature(
        k_b: f64,
        temperature: f64,
        dt: f64,
        diffusion_coeff: f64,
    ) -> LangevinResult<Self> {
        validate_positive("k_b", k_b, "Boltzmann constant must be positive")?;
        validate_positive("temperature", temperature, "temperature must be positive")?;
        let beta = 1.0 / (k_b * temperature);
        debug!(
            "temperature {} with k_B = {} gives beta = {}",
            temperature, k_b, beta
        );
        Self::new(beta, dt, diffusion_coeff)
    }

    pub fn with_precision(mut self, precision: NoisePrecision) -> Self {
        self.precision = precision;
        self
    }

    /// Validate the physical parameters
    pub fn validate(&self) -> LangevinResult<()> {
        validate_positive("dt", self.dt, "timestep must be positive")?;
        validate_positive(
            "diffusion_coeff",
            self.diffusion_coeff,
            "diffusion coefficient must be positive",
        )?;
        validate_positive("beta", self.beta, "temperature parameter must be positive")?;
        Ok(())
    }

    /// `D Δt β`, the factor multiplying the force
    pub fn drift_coefficient(&self) -> f64 {
        self.diffusion_coeff * self.dt * self.beta
    }

    /// `√(2 D Δt)`, the factor multiplying the normal draw
    pub fn noise_prefactor(&self) -> f64 {
        self.displacement_variance().sqrt()
    }

    /// Variance of a single force-free displacement, `2 D Δt`
    pub fn displacement_variance(&self) -> f64 {
        2.0 * self.diffusion_coeff * self.dt
    }
}

impl Default for LangevinParams {
    fn default() -> Self {
        LangevinParams {
            beta: 1.0,
            dt: 1e-3,
            diffusion_coeff: 1.0,
            precision: NoisePrecision::Native,
        }
    }
}
