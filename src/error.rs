// src/error.rs
use std::fmt;

/// Errors raised by the Langevin step before any noise is consumed
#[derive(Debug, Clone, PartialEq)]
pub enum LangevinError {
    /// A physical parameter violates its domain
    InvalidParameter {
        parameter: String,
        value: f64,
        constraint: String,
    },

    /// Configuration and force (or noise) do not have the same shape
    ShapeMismatch {
        position: Vec<usize>,
        force: Vec<usize>,
    },
}

impl fmt::Display for LangevinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LangevinError::InvalidParameter {
                parameter,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid parameter '{}' = {}: {}",
                    parameter, value, constraint
                )
            }
            LangevinError::ShapeMismatch { position, force } => {
                write!(
                    f,
                    "Shape mismatch: force and position must have the same shape (position {:?}, force {:?})",
                    position, force
                )
            }
        }
    }
}

impl std::error::Error for LangevinError {}

/// Result type alias for Langevin operations
pub type LangevinResult<T> = Result<T, LangevinError>;

/// Validation utilities
pub mod validation {
    use super::{LangevinError, LangevinResult};

    /// Validate that a parameter is strictly positive.
    ///
    /// NaN is rejected as well, since it never compares greater than zero.
    pub fn validate_positive(name: &str, value: f64, constraint: &str) -> LangevinResult<()> {
        if value > 0.0 {
            Ok(())
        } else {
            Err(LangevinError::InvalidParameter {
                parameter: name.to_string(),
                value,
                constraint: constraint.to_string(),
            })
        }
    }

    /// Validate that force and position share a shape
    pub fn validate_same_shape(position: &[usize], force: &[usize]) -> LangevinResult<()> {
        if position == force {
            Ok(())
        } else {
            Err(LangevinError::ShapeMismatch {
                position: position.to_vec(),
                force: force.to_vec(),
            })
        }
    }
}
