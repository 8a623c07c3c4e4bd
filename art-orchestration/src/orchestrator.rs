//! # Resonance Orchestrator
//!
//! Binds the laminar circuit to the temporal stack under one master
//! coordinator: fast steps run the circuit's resonance loop, the medium
//! cadence drives masking-field chunking over the working memory, and the
//! slow cadence consolidates temporal-category strengths. The orchestrator
//! owns timing and event plumbing only — every state mutation happens
//! inside the components it schedules.

use tracing::{debug, info, warn};

use art_core::cycle::{CoordinatorParams, TimescaleCoordinator};
use art_laminar::{CircuitOutcome, CircuitParams, LaminarCircuit};
use art_temporal::{OverflowPolicy, StoreOutcome, TemporalStack, TemporalStackParams};

use crate::error::{OrchestrationError, OrchestrationResult};
use crate::events::{ArtEvent, EventBus};

/// Orchestrator configuration
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OrchestratorConfig {
    pub circuit: CircuitParams,
    pub temporal: TemporalStackParams,
    /// Working-memory overflow policy — always explicit, never defaulted
    pub overflow_policy: OverflowPolicy,
    /// Master cadence (may differ from the circuit's internal clock)
    pub coordinator: CoordinatorParams,
    /// Presentation duration per pattern, in working-memory time units
    pub pattern_duration: f64,
    /// Clear circuit dynamics between unrelated presentations
    pub clear_dynamics_between_patterns: bool,
    /// Event-bus history size
    pub event_history: usize,
}

impl OrchestratorConfig {
    /// Config with matched circuit/temporal dimensions
    pub fn with_dim(input_dim: usize, overflow_policy: OverflowPolicy) -> Self {
        let mut temporal = TemporalStackParams::default();
        temporal.masking_field.cells_per_scale = input_dim;
        Self {
            circuit: CircuitParams {
                input_dim,
                ..Default::default()
            },
            temporal,
            overflow_policy,
            coordinator: CoordinatorParams::default(),
            pattern_duration: 0.1,
            clear_dynamics_between_patterns: true,
            event_history: 100,
        }
    }
}

/// Outcome of one pattern presentation
#[derive(Debug, Clone, PartialEq)]
pub struct PatternOutcome {
    pub pattern_index: usize,
    pub resonance: Option<(usize, f64)>,
    pub converged: bool,
}

/// Summary of one sequence run
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceReport {
    pub outcomes: Vec<PatternOutcome>,
    pub chunk_count: usize,
    pub memory_resets: u64,
    pub fast_steps: u64,
}

/// The top-level binding of circuit + temporal stack
pub struct ResonanceOrchestrator {
    config: OrchestratorConfig,
    circuit: LaminarCircuit,
    temporal: TemporalStack,
    coordinator: TimescaleCoordinator,
    events: EventBus,
}

impl ResonanceOrchestrator {
    pub fn new(config: OrchestratorConfig) -> OrchestrationResult<Self> {
        if config.circuit.input_dim != config.temporal.masking_field.cells_per_scale {
            return Err(OrchestrationError::ConfigMismatch(format!(
                "circuit input_dim {} != masking-field cells_per_scale {}",
                config.circuit.input_dim, config.temporal.masking_field.cells_per_scale
            )));
        }
        if !config.pattern_duration.is_finite() || config.pattern_duration <= 0.0 {
            return Err(OrchestrationError::ConfigMismatch(
                "pattern_duration must be positive".into(),
            ));
        }
        let circuit = LaminarCircuit::new(config.circuit.clone())?;
        let temporal = TemporalStack::new(config.temporal.clone(), config.overflow_policy)?;
        let coordinator = TimescaleCoordinator::new(config.coordinator)?;
        let events = EventBus::with_history(config.event_history);
        Ok(Self {
            config,
            circuit,
            temporal,
            coordinator,
            events,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn circuit(&self) -> &LaminarCircuit {
        &self.circuit
    }

    #[inline]
    pub fn temporal(&self) -> &TemporalStack {
        &self.temporal
    }

    #[inline]
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    #[inline]
    pub fn coordinator(&self) -> &TimescaleCoordinator {
        &self.coordinator
    }

    // =========================================================================
    // Sequence processing
    // =========================================================================

    /// Present one pattern: resonance loop, memory store, cadence-driven
    /// chunking and consolidation
    pub fn present(
        &mut self,
        pattern_index: usize,
        pattern: &[f64],
    ) -> OrchestrationResult<PatternOutcome> {
        let steps_before = self.circuit.fast_steps();
        let categories_before = self.circuit.category_count();

        let outcome = self.circuit.process(pattern)?;
        let steps_used = self.circuit.fast_steps().saturating_sub(steps_before);

        if self.circuit.category_count() > categories_before {
            let index = self.circuit.category_count() - 1;
            debug!(index, "category committed");
            self.events.emit(ArtEvent::CategoryCreated { index })?;
        }

        let resonance = match &outcome {
            CircuitOutcome::Resonating {
                category,
                match_score,
                ..
            } => {
                info!(category = *category, match_score = *match_score, "resonance achieved");
                self.events.emit(ArtEvent::ResonanceAchieved {
                    category: *category,
                    match_score: *match_score,
                    step: self.circuit.state().steps,
                })?;
                Some((*category, *match_score))
            }
            CircuitOutcome::NotConverged { best } => {
                warn!(?best, "resonance search exhausted");
                self.events.emit(ArtEvent::SearchExhausted { best: *best })?;
                None
            }
        };

        // Feed the sequence side
        let resets_before = self.temporal.memory().reset_count();
        let store = self
            .temporal
            .feed(pattern, self.config.pattern_duration)?;
        if store == StoreOutcome::DepletionReset {
            let resets = self.temporal.memory().reset_count();
            info!(resets, "working memory reset by transmitter depletion");
            self.events.emit(ArtEvent::MemoryReset { resets })?;
        }
        debug_assert!(self.temporal.memory().reset_count() >= resets_before);

        // Advance the master cadence by the fast steps the circuit consumed
        for _ in 0..steps_used.max(1) {
            self.coordinator.advance_fast_step();
            if self.coordinator.should_update_chunking() {
                let dt = self.coordinator.get_chunking_dt();
                for chunk in self.temporal.update_chunking(dt)? {
                    debug!(scale = chunk.scale, index = chunk.index, "chunk elected");
                    self.events.emit(ArtEvent::ChunkEmitted {
                        scale: chunk.scale,
                        index: chunk.index,
                        strength: chunk.strength,
                    })?;
                }
            }
            if self.coordinator.should_update_slow_dynamics() {
                self.temporal
                    .update_slow_dynamics(self.coordinator.get_slow_dt());
            }
        }

        if self.config.clear_dynamics_between_patterns {
            self.circuit.clear_dynamics();
        }

        Ok(PatternOutcome {
            pattern_index,
            resonance,
            converged: matches!(outcome, CircuitOutcome::Resonating { .. }),
        })
    }

    /// Run a whole sequence of patterns and summarize
    pub fn run_sequence(&mut self, patterns: &[Vec<f64>]) -> OrchestrationResult<SequenceReport> {
        let chunk_history_before = self
            .events
            .history()?
            .iter()
            .filter(|e| matches!(e, ArtEvent::ChunkEmitted { .. }))
            .count();

        let mut outcomes = Vec::with_capacity(patterns.len());
        for (pattern_index, pattern) in patterns.iter().enumerate() {
            outcomes.push(self.present(pattern_index, pattern)?);
        }

        let chunk_count = self
            .events
            .history()?
            .iter()
            .filter(|e| matches!(e, ArtEvent::ChunkEmitted { .. }))
            .count()
            .saturating_sub(chunk_history_before);

        Ok(SequenceReport {
            outcomes,
            chunk_count,
            memory_resets: self.temporal.memory().reset_count(),
            fast_steps: self.coordinator.fast_steps(),
        })
    }

    /// Full reset of every owned component
    pub fn reset(&mut self) -> OrchestrationResult<()> {
        self.circuit.reset();
        self.temporal.reset();
        self.coordinator.reset();
        self.events.clear_history()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventFilter;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn orchestrator(dim: usize) -> ResonanceOrchestrator {
        ResonanceOrchestrator::new(OrchestratorConfig::with_dim(
            dim,
            OverflowPolicy::TruncateOldest,
        ))
        .unwrap()
    }

    fn patterns(dim: usize) -> Vec<Vec<f64>> {
        (0..3)
            .map(|k| {
                (0..dim)
                    .map(|i| if i % 3 == k { 0.9 } else { 0.1 })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_sequence_run_produces_report() {
        let mut orch = orchestrator(8);
        let report = orch.run_sequence(&patterns(8)).unwrap();
        assert_eq!(report.outcomes.len(), 3);
        assert!(report.fast_steps > 0);
        assert!(report.outcomes.iter().all(|o| o.converged));
        assert!(orch.circuit().category_count() >= 1);
    }

    #[test]
    fn test_events_flow_to_subscribers() {
        let mut orch = orchestrator(8);
        let resonances = Arc::new(AtomicUsize::new(0));
        let counter = resonances.clone();
        orch.events()
            .subscribe(
                EventFilter::Resonance,
                Arc::new(move |_| {
                    counter.fetch_add(1, Ordering::SeqCst);
                }),
            )
            .unwrap();

        orch.run_sequence(&patterns(8)).unwrap();
        assert!(resonances.load(Ordering::SeqCst) >= 1);
    }

    #[test]
    fn test_dimension_mismatch_rejected_at_construction() {
        let mut config =
            OrchestratorConfig::with_dim(8, OverflowPolicy::TruncateOldest);
        config.temporal.masking_field.cells_per_scale = 4;
        assert!(matches!(
            ResonanceOrchestrator::new(config),
            Err(OrchestrationError::ConfigMismatch(_))
        ));
    }

    #[test]
    fn test_memory_accumulates_sequence() {
        let mut orch = orchestrator(8);
        orch.run_sequence(&patterns(8)).unwrap();
        assert_eq!(orch.temporal().memory().len(), 3);
    }

    #[test]
    fn test_reset_behaves_as_fresh() {
        let mut orch = orchestrator(8);
        orch.run_sequence(&patterns(8)).unwrap();
        orch.reset().unwrap();
        assert_eq!(orch.circuit().category_count(), 0);
        assert!(orch.temporal().memory().is_empty());
        assert_eq!(orch.coordinator().fast_steps(), 0);
        assert!(orch.events().history().unwrap().is_empty());

        let report = orch.run_sequence(&patterns(8)).unwrap();
        assert_eq!(report.outcomes.len(), 3);
    }
}
