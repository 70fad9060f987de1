// src/integrator/overdamped.rs
//! Euler-Maruyama Step for Overdamped Langevin Dynamics
//!
//! # Mathematical Framework
//!
//! In the overdamped (high friction) limit the position obeys
//! ```text
//! dX_t = D β F(X_t) dt + √(2D) dW_t
//! ```
//!
//! One Euler-Maruyama step of size Δt gives
//! ```text
//! X_{n+1} = X_n + D Δt β F(X_n) + √(2 D Δt) g,    g ~ N(0, 1)
//! ```
//!
//! # Properties
//!
//! - **Elementwise**: each component only sees its own position, force and draw
//! - **Shape agnostic**: works on flat slices, arrays of any rank and point lists
//! - **Stateless**: the only state touched is the caller's noise source
//!
//! With zero force the displacement of each component has variance `2 D Δt`.

use crate::error::{validation::validate_same_shape, LangevinResult};
use crate::params::{LangevinParams, NoisePrecision};
use crate::real::Real;
use crate::rng::NoiseSource;
use nalgebra::SVector;
use ndarray::{Array, ArrayBase, Data, Dimension};

/// Per-call scalars, computed once and applied to every element
#[derive(Clone, Copy, Debug)]
struct StepKernel<T> {
    drift: T,
    prefactor: T,
    precision: NoisePrecision,
}

impl<T: Real> StepKernel<T> {
    fn new(params: &LangevinParams) -> Self {
        StepKernel {
            drift: T::from_f64(params.drift_coefficient()),
            prefactor: T::from_f64(params.noise_prefactor()),
            precision: params.precision,
        }
    }

    #[inline]
    fn noise(&self, gauss: f64) -> T {
        match self.precision {
            NoisePrecision::Native => T::from_f64(gauss),
            NoisePrecision::Single => T::from_f32(gauss as f32),
        }
    }

    #[inline]
    fn advance(&self, x: T, force: T, gauss: f64) -> T {
        x + (self.drift * force + self.prefactor * self.noise(gauss))
    }
}

/// Overdamped Langevin (Brownian dynamics) integrator
pub struct OverdampedLangevin;

impl OverdampedLangevin {
    /// Single step on a flat buffer.
    ///
    /// # Parameters
    /// - `current`: configuration, left untouched
    /// - `force`: force at `current`, same length
    /// - `params`: validated again on every call
    /// - `noise`: consumed exactly `current.len()` times, and only on success
    ///
    /// # Errors
    ///
    /// `InvalidParameter` for a non-positive `dt`, `diffusion_coeff` or `beta`,
    /// `ShapeMismatch` when the lengths differ.
    pub fn step_slice<T, G>(
        current: &[T],
        force: &[T],
        params: &LangevinParams,
        noise: &mut G,
    ) -> LangevinResult<Vec<T>>
    where
        T: Real,
        G: NoiseSource + ?Sized,
    {
        params.validate()?;
        validate_same_shape(&[current.len()], &[force.len()])?;

        let kernel = StepKernel::<T>::new(params);
        Ok(current
            .iter()
            .zip(force)
            .map(|(&x, &f)| kernel.advance(x, f, noise.standard_normal()))
            .collect())
    }

    /// Single step on an n-dimensional array.
    ///
    /// Draws are assigned in logical (row-major) order, so the result does not
    /// depend on the memory layout of `current` or `force`. The output has the
    /// shape of `current` in standard layout.
    pub fn step_array<T, S1, S2, D1, D2, G>(
        current: &ArrayBase<S1, D1>,
        force: &ArrayBase<S2, D2>,
        params: &LangevinParams,
        noise: &mut G,
    ) -> LangevinResult<Array<T, D1>>
    where
        T: Real,
        S1: Data<Elem = T>,
        S2: Data<Elem = T>,
        D1: Dimension,
        D2: Dimension,
        G: NoiseSource + ?Sized,
    {
        params.validate()?;
        validate_same_shape(current.shape(), force.shape())?;

        let kernel = StepKernel::<T>::new(params);
        let mut next = Array::from_shape_fn(current.raw_dim(), |_| T::from_f64(0.0));
        for ((slot, &x), &f) in next.iter_mut().zip(current.iter()).zip(force.iter()) {
            *slot = kernel.advance(x, f, noise.standard_normal());
        }
        Ok(next)
    }

    /// Flat-argument form: `x_{n+1} = x_n + D β F Δt + √(2 D Δt) g`.
    ///
    /// Checks `dt`, then `diffusion_coeff`, then `beta`, then the shapes.
    pub fn update_positions<T, S1, S2, D1, D2, G>(
        current: &ArrayBase<S1, D1>,
        force: &ArrayBase<S2, D2>,
        beta: f64,
        dt: f64,
        diffusion_coeff: f64,
        noise: &mut G,
    ) -> LangevinResult<Array<T, D1>>
    where
        T: Real,
        S1: Data<Elem = T>,
        S2: Data<Elem = T>,
        D1: Dimension,
        D2: Dimension,
        G: NoiseSource + ?Sized,
    {
        let params = LangevinParams::new(beta, dt, diffusion_coeff)?;
        Self::step_array(current, force, &params, noise)
    }

    /// Single step on a list of `DIM`-dimensional points (shape `[len, DIM]`).
    pub fn step_points<T, G, const DIM: usize>(
        current: &[SVector<T, DIM>],
        force: &[SVector<T, DIM>],
        params: &LangevinParams,
        noise: &mut G,
    ) -> LangevinResult<Vec<SVector<T, DIM>>>
    where
        T: Real,
        G: NoiseSource + ?Sized,
    {
        params.validate()?;
        validate_same_shape(&[current.len(), DIM], &[force.len(), DIM])?;

        let kernel = StepKernel::<T>::new(params);
        Ok(current
            .iter()
            .zip(force)
            .map(|(x, f)| {
                SVector::<T, DIM>::from_fn(|i, _| kernel.advance(x[i], f[i], noise.standard_normal()))
            })
            .collect())
    }

    /// Deterministic kernel with the normal draws supplied explicitly.
    ///
    /// `gauss` must hold one sample per element; a length mismatch is reported
    /// as `ShapeMismatch` with the noise length in the `force` field.
    pub fn step_with_noise<T: Real>(
        current: &[T],
        force: &[T],
        params: &LangevinParams,
        gauss: &[f64],
    ) -> LangevinResult<Vec<T>> {
        params.validate()?;
        validate_same_shape(&[current.len()], &[force.len()])?;
        validate_same_shape(&[current.len()], &[gauss.len()])?;

        let kernel = StepKernel::<T>::new(params);
        Ok(current
            .iter()
            .zip(force)
            .zip(gauss)
            .map(|((&x, &f), &g)| kernel.advance(x, f, g))
            .collect())
    }
}
