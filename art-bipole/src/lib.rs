//! # 🧩 art-bipole — Horizontal Grouping
//!
//! Bipole cells complete boundaries across gaps: a cell fires on strong
//! direct evidence, on bilateral horizontal agreement, or on weak direct
//! evidence backed by one horizontal branch. The network iterates the
//! three-way logic synchronously over a precomputed spatial kernel.
//!
//! ## Arquitetura
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │              BipoleNetwork                      │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  Cells: position + orientation + (D,H_L,H_R)│ │
//! │  └───────────────────────────────────────────┘  │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  WeightMatrix: w_max·e^(−d/σ_d)·g(Δθ)     │  │
//! │  └───────────────────────────────────────────┘  │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  Step: read H → compute targets → commit  │  │
//! │  └───────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! ## Computational Complexity
//!
//! **Step — O(N²):**
//! - Horizontal pass visits every pair inside R_max
//! - The horizontal pass is read-only and independent per cell; the commit
//!   pass is serial by contract
//!
//! **Orientation change — O(N):**
//! - Rebuilds one row and one column of the kernel, not the full matrix
//!
//! ## Exemplo
//!
//! ```
//! use art_bipole::{BipoleNetwork, BipoleParams};
//!
//! let mut net = BipoleNetwork::new(BipoleParams { n: 50, ..Default::default() }).unwrap();
//! net.set_direct(10, 0.9).unwrap();
//! net.set_direct(20, 0.9).unwrap();
//! net.settle(2.0);
//! // cells between the inducers fire from bilateral support alone
//! assert!(net.activations()[15] > 0.3);
//! ```

pub mod cell;
pub mod error;
pub mod network;
pub mod spatial;

pub use cell::{BipoleCell, BipoleParams, FiringCondition, THETA_BILATERAL};
pub use error::{BipoleError, BipoleResult};
pub use network::{BipoleNetwork, SETTLE_ITERATIONS, SETTLE_ITERATIONS_PROPAGATION};
pub use spatial::{connection_weight, orientation_difference, WeightMatrix};
