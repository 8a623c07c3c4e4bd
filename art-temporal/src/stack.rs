//! # Temporal Stack — Working Memory + Masking Field + Chunk Learning
//!
//! The sequence-learning pipeline: patterns stream into the primacy
//! working memory; on the chunking cadence the masking field competes over
//! the primacy-weighted readout and elected winners are folded into
//! temporal categories. The stack exclusively owns its working memory and
//! masking field — consumers read chunks and categories through this
//! interface only.

use serde::{Deserialize, Serialize};

use crate::category::TemporalCategory;
use crate::error::{TemporalError, TemporalResult};
use crate::masking_field::{ChunkEvent, MaskingField, MaskingFieldParams};
use crate::working_memory::{
    OverflowPolicy, StoreOutcome, WorkingMemory, WorkingMemoryParams,
};

/// Stack configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemporalStackParams {
    pub working_memory: WorkingMemoryParams,
    pub masking_field: MaskingFieldParams,
    /// Chunk-to-category similarity needed to reinforce instead of create
    pub match_threshold: f64,
    /// Prototype blend on reinforcement
    pub reinforcement_blend: f64,
    /// Strength decay rate per millisecond of slow cadence
    pub decay_rate: f64,
}

impl Default for TemporalStackParams {
    fn default() -> Self {
        Self {
            working_memory: WorkingMemoryParams::default(),
            masking_field: MaskingFieldParams::default(),
            match_threshold: 0.9,
            reinforcement_blend: 0.2,
            decay_rate: 1e-4,
        }
    }
}

impl TemporalStackParams {
    pub fn validate(&self) -> TemporalResult<()> {
        self.working_memory.validate()?;
        self.masking_field.validate()?;
        for (name, v) in [
            ("match_threshold", self.match_threshold),
            ("reinforcement_blend", self.reinforcement_blend),
            ("decay_rate", self.decay_rate),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(TemporalError::ParameterOutOfRange { name, value: v });
            }
        }
        Ok(())
    }
}

/// The sequence-learning stack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemporalStack {
    params: TemporalStackParams,
    memory: WorkingMemory,
    field: MaskingField,
    categories: Vec<TemporalCategory>,
    time_ms: f64,
}

impl TemporalStack {
    /// The working-memory overflow policy is a required argument — the
    /// stack never picks one silently
    pub fn new(params: TemporalStackParams, policy: OverflowPolicy) -> TemporalResult<Self> {
        params.validate()?;
        let memory = WorkingMemory::new(params.working_memory.clone(), policy)?;
        let field = MaskingField::new(params.masking_field.clone())?;
        Ok(Self {
            params,
            memory,
            field,
            categories: Vec::new(),
            time_ms: 0.0,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn memory(&self) -> &WorkingMemory {
        &self.memory
    }

    #[inline]
    pub fn masking_field(&self) -> &MaskingField {
        &self.field
    }

    #[inline]
    pub fn categories(&self) -> &[TemporalCategory] {
        &self.categories
    }

    #[inline]
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    // =========================================================================
    // Pipeline
    // =========================================================================

    /// Feed one pattern into the working memory (fast cadence)
    pub fn feed(&mut self, pattern: &[f64], duration: f64) -> TemporalResult<StoreOutcome> {
        if pattern.len() != self.params.masking_field.cells_per_scale {
            return Err(TemporalError::DimensionMismatch {
                expected: self.params.masking_field.cells_per_scale,
                actual: pattern.len(),
            });
        }
        self.time_ms += duration;
        self.memory.store(pattern, duration)
    }

    /// One chunking update (medium cadence): run the masking field over
    /// the memory readout and fold winners into temporal categories
    pub fn update_chunking(&mut self, dt: f64) -> TemporalResult<Vec<ChunkEvent>> {
        if self.memory.is_empty() {
            return Ok(Vec::new());
        }
        let readout = self.memory.readout();
        let events = self.field.step(&readout, dt)?;
        self.time_ms += dt;

        for _event in &events {
            self.absorb_chunk(&readout)?;
        }
        Ok(events)
    }

    /// Slow-cadence consolidation: strengths decay between reinforcements
    pub fn update_slow_dynamics(&mut self, dt: f64) {
        for category in self.categories.iter_mut() {
            category.decay(dt, self.params.decay_rate);
        }
        self.time_ms += dt;
    }

    fn absorb_chunk(&mut self, readout: &[f64]) -> TemporalResult<()> {
        let best = self
            .categories
            .iter_mut()
            .map(|c| (c.similarity(readout), c))
            .max_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        match best {
            Some((similarity, category)) if similarity >= self.params.match_threshold => {
                category.reinforce(readout, self.params.reinforcement_blend, self.time_ms)?;
            }
            _ => {
                self.categories.push(TemporalCategory::new(
                    readout.to_vec(),
                    self.memory.len(),
                    self.time_ms - self.memory.items().first().map_or(0.0, |i| i.timestamp),
                    self.time_ms,
                )?);
            }
        }
        Ok(())
    }

    /// Sequence boundary: clear the memory and field but keep what was
    /// learned
    pub fn clear_memory(&mut self) {
        self.memory.clear();
        self.field.reset();
    }

    /// Full reset: memory, field, categories, clock
    pub fn reset(&mut self) {
        self.memory.clear();
        self.field.reset();
        self.categories.clear();
        self.time_ms = 0.0;
    }
}
