//! Error types for art-core

use thiserror::Error;

/// Result type for core operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Errors raised by the numerical substrate.
///
/// Precondition and invariant violations are fatal to the call. Capacity and
/// convergence outcomes are *not* errors — they are result variants in the
/// crates that own those searches.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Parameter out of range: {name} = {value} (allowed [{min}, {max}])")]
    ParameterOutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Numeric invariant violated: {0}")]
    NumericInvariant(String),

    #[error("Integration step rejected after {attempts} halvings")]
    StepRejected { attempts: u32 },

    #[error("Component closed: {0}")]
    ResourceClosed(String),
}

impl CoreError {
    /// Range-violation constructor used by parameter validators
    pub fn range(name: &'static str, value: f64, min: f64, max: f64) -> Self {
        CoreError::ParameterOutOfRange {
            name,
            value,
            min,
            max,
        }
    }
}

/// Guard for slice dimensions
#[inline]
pub fn check_dim(expected: usize, actual: usize) -> CoreResult<()> {
    if expected != actual {
        return Err(CoreError::DimensionMismatch { expected, actual });
    }
    Ok(())
}

/// Guard for finite values; NaN/inf in state is always fatal
#[inline]
pub fn check_finite<T: num_traits::Float>(values: &[T], context: &str) -> CoreResult<()> {
    for &v in values {
        if !v.is_finite() {
            return Err(CoreError::NumericInvariant(format!(
                "non-finite value in {context}"
            )));
        }
    }
    Ok(())
}
