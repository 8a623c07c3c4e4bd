//! Error types for art-temporal

use thiserror::Error;

/// Result type for temporal-stack operations
pub type TemporalResult<T> = std::result::Result<T, TemporalError>;

/// Errors raised by working memory, the masking field, and the stack
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TemporalError {
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Parameter out of range: {name} = {value}")]
    ParameterOutOfRange { name: &'static str, value: f64 },

    #[error("Item index out of range: {index} (stored {stored})")]
    ItemOutOfRange { index: usize, stored: usize },

    #[error(transparent)]
    Core(#[from] art_core::CoreError),
}
