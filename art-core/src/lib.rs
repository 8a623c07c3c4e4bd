//! # 🌀 ART-Core
//!
//! Continuous-time substrate for adaptive resonance systems.
//!
//! > *"Bounded dynamics first — every layer above inherits its stability
//! > from the shunting equation."*
//!
//! ## The substrate
//!
//! 1. Every activation lives in a **bounded vector** `[floor, ceiling]`
//! 2. Every field evolves by the **shunting equation**
//!    `τ·dx/dt = −A·x + (B−x)·E − (x+C)·I`
//! 3. Every synapse is gated by a **habituative transmitter** z ∈ [0, 1]
//! 4. Every cadence is driven by one **multi-timescale coordinator**
//!
//! ## Computational Complexity
//!
//! **Field Operations — O(n):**
//! - `evolve`, `equilibrium`, `has_converged`: linear in field size
//! - Substeps are bounded by the stiffness cap `min(0.1·τ, 1/(A+E+I))`
//!
//! **Coordinator Operations — O(1):**
//! - Non-blocking counters; no I/O, no waiting
//!
//! **Scalability:** ✓ Per-unit updates are independent — a vectorization
//! pass is a mechanical transformation, not a behavioral change.
//!
//! ## Módulos
//!
//! - [`state`]: Activation, ShuntingField, TransmitterPool — bounded state
//! - [`dynamics`]: Euler/RK4 fixed-step integrators
//! - [`cycle`]: TimescaleCoordinator — fast/medium/slow cadences
//! - [`traits`]: shared kinds (LayerKind, PathwayKind) and ArtComponent
//!
//! ## Quick Start
//!
//! ```
//! use art_core::prelude::*;
//!
//! let mut field = ShuntingField::new(16, ShuntingParams::default()).unwrap();
//! field.set_excitatory(&vec![0.8; 16]).unwrap();
//!
//! let mut coord = TimescaleCoordinator::new(CoordinatorParams::default()).unwrap();
//! for _ in 0..100 {
//!     let dt = coord.advance_fast_step();
//!     field.evolve(dt).unwrap();
//! }
//! assert!(field.has_converged(1e-3));
//! ```
//!
//! ## Princípios
//!
//! 1. **State is bounded** — no update may leave `[floor, ceiling]`
//! 2. **Parameters are validated at construction** — invalid ranges are fatal
//! 3. **The coordinator owns time only** — it never mutates a field
//! 4. **No global mutable state** — configuration flows through parameter structs

pub mod cycle;
pub mod dynamics;
pub mod error;
pub mod prelude;
pub mod state;
pub mod traits;

// Top-level re-exports
pub use error::{CoreError, CoreResult};
pub use state::{Activation, ShuntingField, ShuntingParams, TransmitterParams, TransmitterPool};
pub use traits::{ArtComponent, LayerId, LayerKind, PathwayId, PathwayKind};
