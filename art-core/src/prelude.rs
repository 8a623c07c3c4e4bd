//! # Prelude — Convenient Re-exports
//!
//! Single import for the numerical substrate:
//!
//! ```
//! use art_core::prelude::*;
//! ```

// State
pub use crate::state::{
    cosine,
    Activation,
    ShuntingField,
    ShuntingParams,
    TransmitterParams,
    TransmitterPool,
};

// Dynamics
pub use crate::dynamics::IntegratorKind;

// Cycle
pub use crate::cycle::{CoordinatorParams, TimescaleCoordinator};

// Kinds and base trait
pub use crate::traits::{
    ArtComponent,
    LayerId,
    LayerKind,
    PathwayId,
    PathwayKind,
    StepStamp,
};

// Errors
pub use crate::error::{CoreError, CoreResult};
