//! # 🎭 art-orchestration — Resonance Orchestration
//!
//! Top-level binding of the ART stack: the laminar circuit's resonance
//! loop, the temporal stack's chunking pipeline, an event bus, and the
//! master multi-timescale cadence. Structured logging (`tracing`) lives at
//! this edge of the workspace — the core crates stay silent.
//!
//! ## Arquitetura
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  ResonanceOrchestrator                      │
//! │  ┌───────────────────────────────────────────────────────┐  │
//! │  │  LaminarCircuit — fast cadence (resonance loop)       │  │
//! │  └───────────────────────────────────────────────────────┘  │
//! │  ┌───────────────────────────────────────────────────────┐  │
//! │  │  TemporalStack — medium (chunking) / slow (strength)  │  │
//! │  └───────────────────────────────────────────────────────┘  │
//! │  ┌───────────────────────────────────────────────────────┐  │
//! │  │  EventBus — Resonance | Category | Memory | Chunking  │  │
//! │  └───────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Exemplo
//!
//! ```
//! use art_orchestration::{ResonanceOrchestrator, OrchestratorConfig};
//! use art_temporal::OverflowPolicy;
//!
//! let config = OrchestratorConfig::with_dim(8, OverflowPolicy::TruncateOldest);
//! let mut orch = ResonanceOrchestrator::new(config).unwrap();
//!
//! let sequence = vec![
//!     vec![0.9, 0.1, 0.1, 0.9, 0.1, 0.1, 0.9, 0.1],
//!     vec![0.1, 0.9, 0.1, 0.1, 0.9, 0.1, 0.1, 0.9],
//! ];
//! let report = orch.run_sequence(&sequence).unwrap();
//! assert_eq!(report.outcomes.len(), 2);
//! ```

pub mod config;
pub mod error;
pub mod events;
pub mod orchestrator;

pub use error::{OrchestrationError, OrchestrationResult};
pub use events::{ArtEvent, EventBus, EventFilter, EventHandler};
pub use orchestrator::{
    OrchestratorConfig, PatternOutcome, ResonanceOrchestrator, SequenceReport,
};
