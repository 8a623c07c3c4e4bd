//! Error types for art-bipole

use thiserror::Error;

/// Result type for bipole operations
pub type BipoleResult<T> = std::result::Result<T, BipoleError>;

/// Errors raised by bipole cells and networks
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BipoleError {
    #[error("Cell index out of range: {index} (network size {size})")]
    CellOutOfRange { index: usize, size: usize },

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Parameter out of range: {name} = {value}")]
    ParameterOutOfRange { name: &'static str, value: f64 },

    #[error(transparent)]
    Core(#[from] art_core::CoreError),
}
