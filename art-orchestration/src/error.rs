//! Error types for art-orchestration

use thiserror::Error;

/// Result type for orchestration operations
pub type OrchestrationResult<T> = std::result::Result<T, OrchestrationError>;

/// Errors raised by the orchestrator and event bus
#[derive(Debug, Error)]
pub enum OrchestrationError {
    #[error("Configuration mismatch: {0}")]
    ConfigMismatch(String),

    #[error("Event bus lock poisoned")]
    LockPoisoned,

    #[error(transparent)]
    Core(#[from] art_core::CoreError),

    #[error(transparent)]
    Fuzzy(#[from] art_fuzzy::FuzzyError),

    #[error(transparent)]
    Laminar(#[from] art_laminar::LaminarError),

    #[error(transparent)]
    Temporal(#[from] art_temporal::TemporalError),
}

impl<T> From<std::sync::PoisonError<T>> for OrchestrationError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        OrchestrationError::LockPoisoned
    }
}
