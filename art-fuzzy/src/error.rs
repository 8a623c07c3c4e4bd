//! Error types for art-fuzzy

use thiserror::Error;

/// Result type for FuzzyART operations
pub type FuzzyResult<T> = std::result::Result<T, FuzzyError>;

/// Errors raised by the category engine.
///
/// Capacity and no-match outcomes are *not* errors — they are variants of
/// [`crate::ArtOutcome`] so callers branch without exception control flow.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FuzzyError {
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Parameter out of range: {name} = {value}")]
    ParameterOutOfRange { name: &'static str, value: f64 },

    #[error("Input component {index} = {value} outside [0, 1]")]
    InputOutOfRange { index: usize, value: f64 },

    #[error("Category index out of range: {index} (count {count})")]
    CategoryOutOfRange { index: usize, count: usize },

    #[error("Bad snapshot magic")]
    BadMagic,

    #[error("Unsupported snapshot version: {0}")]
    UnsupportedVersion(u16),

    #[error("Unsupported snapshot flags: {0:#04x}")]
    UnsupportedFlags(u8),

    #[error("Snapshot truncated: need {need} bytes, have {have}")]
    SnapshotTruncated { need: usize, have: usize },

    #[error("Snapshot codec error: {0}")]
    SnapshotCodec(String),

    #[error(transparent)]
    Core(#[from] art_core::CoreError),
}
