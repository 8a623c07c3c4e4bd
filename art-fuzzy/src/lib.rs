//! # 🗂️ art-fuzzy — FuzzyART Category Engine
//!
//! Category formation, recognition, and fast learning with complement-coded
//! inputs and vigilance-controlled specificity.
//!
//! ## Arquitetura
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                 FuzzyArt                        │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  I ↦ [I, 1−I]   complement coding         │  │
//! │  └───────────────────────────────────────────┘  │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  T_j = |I∧w_j|/(α+|w_j|)   ranked search  │  │
//! │  │  |I∧w_j|/|I| ≥ ρ           vigilance      │  │
//! │  └───────────────────────────────────────────┘  │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  w_j ← β(I∧w_j)+(1−β)w_j   resonance      │  │
//! │  └───────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! ## Computational Complexity
//!
//! **Learn — O(C × M):**
//! - C = category count, M = input dimension
//! - Choice computation is read-only over the category list and safe to
//!   parallelize; the single weight update is serialized
//!
//! **Invariants:**
//! - Weights are componentwise non-increasing per learn (fuzzy-min)
//! - Exactly one category is updated per learn call
//! - Fixed seed + identical input order ⇒ identical outcome sequence
//!
//! ## Exemplo
//!
//! ```
//! use art_fuzzy::{FuzzyArt, FuzzyParams, ArtOutcome};
//!
//! let mut art = FuzzyArt::new(FuzzyParams { rho: 0.75, ..Default::default() }).unwrap();
//! art.learn(&[0.8, 0.1, 0.6]).unwrap();
//!
//! match art.predict(&[0.78, 0.12, 0.61]).unwrap() {
//!     ArtOutcome::Resonance { index, .. } => assert_eq!(index, 0),
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```

pub mod category;
pub mod complement;
pub mod engine;
pub mod error;
pub mod params;
pub mod snapshot;

pub use category::FuzzyCategory;
pub use complement::{complement_code, complement_decode, fuzzy_min, fuzzy_min_norm, l1_norm};
pub use engine::{ArtOutcome, FuzzyArt};
pub use error::{FuzzyError, FuzzyResult};
pub use params::FuzzyParams;
pub use snapshot::{load_categories, save_categories, MAGIC, VERSION};
