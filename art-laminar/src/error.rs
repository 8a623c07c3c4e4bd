//! Error types for art-laminar

use art_core::LayerId;
use thiserror::Error;

/// Result type for laminar operations
pub type LaminarResult<T> = std::result::Result<T, LaminarError>;

/// Errors raised by layers, pathways, and the circuit assembly
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LaminarError {
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Parameter out of range: {name} = {value}")]
    ParameterOutOfRange { name: &'static str, value: f64 },

    #[error("Unknown layer: {0}")]
    UnknownLayer(LayerId),

    #[error("Component closed: {0}")]
    ResourceClosed(String),

    #[error(transparent)]
    Core(#[from] art_core::CoreError),

    #[error(transparent)]
    Bipole(#[from] art_bipole::BipoleError),

    #[error(transparent)]
    Fuzzy(#[from] art_fuzzy::FuzzyError),
}
