//! # overdamped-langevin: Brownian Dynamics Steps
//!
//! A small library that advances a configuration by one step of overdamped
//! Langevin dynamics. Force evaluation and the trajectory loop belong to the
//! caller; this crate supplies the step, its parameters and explicit noise
//! streams.
//!
//! ## Key Features
//!
//! - **Any Shape**: flat slices, `ndarray` arrays of any rank, `nalgebra` point lists
//! - **Explicit Randomness**: every step consumes a caller-owned noise source
//! - **Validated Inputs**: non-positive parameters and shape mismatches fail before any draw
//! - **Precision Control**: `f32` or `f64` configurations, optional `f32` narrowing of the noise
//!
//! ## Quick Start
//!
//! ```rust
//! use ndarray::Array2;
//! use overdamped_langevin::integrator::overdamped::OverdampedLangevin;
//! use overdamped_langevin::params::LangevinParams;
//! use overdamped_langevin::rng::seed_rng_from_u64;
//!
//! let params = LangevinParams::new(1.0, 1e-3, 0.5).expect("Valid parameters");
//! let mut rng = seed_rng_from_u64(42);
//!
//! let x = Array2::<f64>::zeros((100, 3));
//! let force = Array2::<f64>::ones((100, 3));
//! let next = OverdampedLangevin::step_array(&x, &force, &params, &mut rng)
//!     .expect("Matching shapes");
//! assert_eq!(next.shape(), x.shape());
//! ```
//!
//! ## Mathematical Foundation
//!
//! ```text
//! x_{n+1} = x_n + D Δt β F(x_n) + √(2 D Δt) g,    g ~ N(0, 1)
//! ```
//!
//! With zero force each component performs free diffusion with per-step
//! variance `2 D Δt`.

pub mod error;
pub mod integrator;
pub mod params;
pub mod real;
pub mod rng;

pub use error::{LangevinError, LangevinResult};
pub use integrator::overdamped::OverdampedLangevin;
pub use params::{LangevinParams, NoisePrecision};
pub use rng::NoiseSource;
