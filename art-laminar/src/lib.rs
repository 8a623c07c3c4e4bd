//! # 🧠 art-laminar — Laminar Cortical Circuit
//!
//! Six-layer resonance circuit over the shunting substrate: L4 drives,
//! L2/3 groups through the bipole network, L5 reads out into FuzzyART, and
//! the learned expectation returns through L1 priming and L6 modulation.
//!
//! ## Arquitetura
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     LaminarCircuit                          │
//! │  ┌───────────────────────────────────────────────────────┐  │
//! │  │  Layer arena: L1 | L2/3 | L4 | L5 | L6                │  │
//! │  └───────────────────────────────────────────────────────┘  │
//! │  ┌───────────────────────────────────────────────────────┐  │
//! │  │  Pathway arena: L4→L2/3 | L2/3→L5 | L6→L4 | L1→L2/3   │  │
//! │  └───────────────────────────────────────────────────────┘  │
//! │  ┌───────────────────────────────────────────────────────┐  │
//! │  │  BipoleNetwork (L2/3) · FuzzyArt (L5) · Attention     │  │
//! │  └───────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The matching rule
//!
//! L6 is modulatory-only: its route into L4 is AND-gated on present
//! bottom-up activity, so a top-down expectation can prime but never fire
//! the driving layer on its own.
//!
//! ## Exemplo
//!
//! ```
//! use art_laminar::{LaminarCircuit, CircuitParams, CircuitOutcome};
//!
//! let mut circuit = LaminarCircuit::new(CircuitParams {
//!     input_dim: 8,
//!     ..Default::default()
//! }).unwrap();
//!
//! let input = vec![0.2, 0.4, 0.9, 0.4, 0.2, 0.1, 0.0, 0.1];
//! match circuit.process(&input).unwrap() {
//!     CircuitOutcome::Resonating { category, .. } => assert_eq!(category, 0),
//!     CircuitOutcome::NotConverged { .. } => panic!("search exhausted"),
//! }
//! ```

pub mod attention;
pub mod circuit;
pub mod error;
pub mod gain;
pub mod layer;
pub mod params;
pub mod pathway;

pub use attention::{AttentionField, AttentionParams};
pub use circuit::{CircuitOutcome, CircuitParams, CircuitState, LaminarCircuit};
pub use error::{LaminarError, LaminarResult};
pub use gain::{GainModulator, GainParams};
pub use layer::{LaminarLayer, Layer};
pub use params::{GenericParams, L23Params, L4Params, L6Params, LayerParams};
pub use pathway::LaminarPathway;
