//! Temporal categories: learned sequence chunks with strength dynamics

use serde::{Deserialize, Serialize};

use art_core::state::{cosine, Activation};

use crate::error::TemporalResult;

/// One learned sequence chunk.
///
/// The prototype is a bounded activation vector, so reinforcement can
/// never push it outside [0, 1]. Strength grows with reinforcement and
/// decays between accesses; it stays inside [0, 1] too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemporalCategory {
    prototype: Activation,
    sequence_length: usize,
    temporal_span: f64,
    created_at: f64,
    last_access: f64,
    access_count: u64,
    strength: f64,
}

impl TemporalCategory {
    pub fn new(
        prototype: Vec<f64>,
        sequence_length: usize,
        temporal_span: f64,
        now: f64,
    ) -> TemporalResult<Self> {
        Ok(Self {
            prototype: Activation::from_values(prototype)?,
            sequence_length,
            temporal_span,
            created_at: now,
            last_access: now,
            access_count: 1,
            strength: 0.5,
        })
    }

    #[inline]
    pub fn prototype(&self) -> &[f64] {
        self.prototype.as_slice()
    }

    #[inline]
    pub fn sequence_length(&self) -> usize {
        self.sequence_length
    }

    #[inline]
    pub fn temporal_span(&self) -> f64 {
        self.temporal_span
    }

    #[inline]
    pub fn created_at(&self) -> f64 {
        self.created_at
    }

    #[inline]
    pub fn last_access(&self) -> f64 {
        self.last_access
    }

    #[inline]
    pub fn access_count(&self) -> u64 {
        self.access_count
    }

    #[inline]
    pub fn strength(&self) -> f64 {
        self.strength
    }

    /// Cosine similarity of a pattern against the prototype
    pub fn similarity(&self, pattern: &[f64]) -> f64 {
        if pattern.len() != self.prototype.len() {
            return 0.0;
        }
        cosine(pattern, self.prototype.as_slice())
    }

    /// Reinforce on re-access: blend the prototype toward the pattern and
    /// raise strength
    pub fn reinforce(&mut self, pattern: &[f64], blend: f64, now: f64) -> TemporalResult<()> {
        let blend = blend.clamp(0.0, 1.0);
        let blended: Vec<f64> = self
            .prototype
            .as_slice()
            .iter()
            .zip(pattern)
            .map(|(&p, &v)| (1.0 - blend) * p + blend * v)
            .collect();
        self.prototype.set_all(&blended)?;
        self.strength = (self.strength + 0.1).min(1.0);
        self.last_access = now;
        self.access_count += 1;
        Ok(())
    }

    /// Exponential strength decay over `dt`
    pub fn decay(&mut self, dt: f64, rate: f64) {
        self.strength = (self.strength * (-rate * dt).exp()).max(0.0);
    }
}
