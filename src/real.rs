// src/real.rs
//! Floating-point element types a configuration can be stored in.

use std::fmt::{Debug, Display};
use std::ops::{Add, Mul};

/// Element type of configurations and forces.
///
/// Implemented for `f32` and `f64`. Scalar coefficients are computed in `f64`
/// and converted once per step with [`Real::from_f64`].
pub trait Real:
    Copy + PartialEq + Debug + Display + Send + Sync + Add<Output = Self> + Mul<Output = Self> + 'static
{
    fn from_f64(value: f64) -> Self;
    fn from_f32(value: f32) -> Self;
}

impl Real for f32 {
    #[inline]
    fn from_f64(value: f64) -> Self {
        value as f32
    }

    #[inline]
    fn from_f32(value: f32) -> Self {
        value
    }
}

impl Real for f64 {
    #[inline]
    fn from_f64(value: f64) -> Self {
        value
    }

    #[inline]
    fn from_f32(value: f32) -> Self {
        value as f64
    }
}
