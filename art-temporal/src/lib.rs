//! # ⏱️ art-temporal — Sequence Memory and Chunking
//!
//! The temporal side of the resonance stack: a primacy-gradient working
//! memory (STORE-2 reset dynamics), a multi-scale masking field with
//! asymmetric cross-scale inhibition, and temporal categories that
//! accumulate elected chunks.
//!
//! ## Arquitetura
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │               TemporalStack                     │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  WorkingMemory: γ^i primacy, gate reset   │  │
//! │  └───────────────────────────────────────────┘  │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  MaskingField: S scales, a^(k−j) masking  │  │
//! │  └───────────────────────────────────────────┘  │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  TemporalCategory: prototype + strength   │  │
//! │  └───────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! ## Exemplo
//!
//! ```
//! use art_temporal::{TemporalStack, TemporalStackParams, OverflowPolicy};
//!
//! let mut stack = TemporalStack::new(
//!     TemporalStackParams::default(),
//!     OverflowPolicy::TruncateOldest, // the policy is always explicit
//! ).unwrap();
//!
//! stack.feed(&[0.9, 0.8, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0], 0.1).unwrap();
//! for _ in 0..100 {
//!     stack.update_chunking(1.0).unwrap();
//! }
//! assert!(stack.category_count() >= 1);
//! ```

pub mod category;
pub mod error;
pub mod masking_field;
pub mod stack;
pub mod working_memory;

pub use category::TemporalCategory;
pub use error::{TemporalError, TemporalResult};
pub use masking_field::{ChunkEvent, MaskingField, MaskingFieldParams};
pub use stack::{TemporalStack, TemporalStackParams};
pub use working_memory::{
    OverflowPolicy, StoreOutcome, StoredItem, WorkingMemory, WorkingMemoryParams,
};
