//! # Working Memory — Primacy-Gradient Storage with Habituative Reset
//!
//! Ordered store of at most K patterns. Earlier items carry geometrically
//! higher primacy weight (`γ^position`, strictly monotone non-increasing),
//! which is what lets a downstream masking field recover serial order from
//! a superposition. Every store habituates the input-gate transmitter; when
//! depletion crosses the reset threshold the whole memory clears — the
//! reset that segments one sequence from the next.

use serde::{Deserialize, Serialize};

use art_core::state::{TransmitterParams, TransmitterPool};

use crate::error::{TemporalError, TemporalResult};

/// What happens when a store arrives at capacity.
///
/// There is deliberately no default: the policy is a required constructor
/// argument, chosen explicitly by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverflowPolicy {
    /// Clear the whole memory, then store
    Reset,
    /// Evict the oldest entry
    TruncateOldest,
}

/// Working-memory parameter block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkingMemoryParams {
    /// Capacity K
    pub capacity: usize,
    /// Geometric primacy ratio γ ∈ (0, 1): item i carries weight γ^i
    pub primacy_ratio: f64,
    /// Gate depletion above this level clears the memory
    pub reset_threshold: f64,
    /// Input-gate transmitter dynamics
    pub gate: TransmitterParams,
}

impl Default for WorkingMemoryParams {
    fn default() -> Self {
        Self {
            capacity: 7,
            primacy_ratio: 0.9,
            reset_threshold: 0.5,
            gate: TransmitterParams::default(),
        }
    }
}

impl WorkingMemoryParams {
    pub fn validate(&self) -> TemporalResult<()> {
        if self.capacity == 0 {
            return Err(TemporalError::ParameterOutOfRange {
                name: "capacity",
                value: 0.0,
            });
        }
        if !self.primacy_ratio.is_finite() || !(0.0..1.0).contains(&self.primacy_ratio)
            || self.primacy_ratio == 0.0
        {
            return Err(TemporalError::ParameterOutOfRange {
                name: "primacy_ratio",
                value: self.primacy_ratio,
            });
        }
        if !self.reset_threshold.is_finite() || !(0.0..=1.0).contains(&self.reset_threshold) {
            return Err(TemporalError::ParameterOutOfRange {
                name: "reset_threshold",
                value: self.reset_threshold,
            });
        }
        self.gate.validate()?;
        Ok(())
    }
}

/// One stored entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredItem {
    pub pattern: Vec<f64>,
    /// Primacy weight at the current serial position
    pub primacy: f64,
    /// Logical store time (cumulative durations)
    pub timestamp: f64,
}

/// Outcome of a store call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreOutcome {
    Stored,
    /// Transmitter depletion crossed the threshold: memory cleared, then
    /// the incoming pattern was stored fresh
    DepletionReset,
}

/// Primacy-gradient working memory (capacity-K ordered store).
///
/// # Example
///
/// ```
/// use art_temporal::{WorkingMemory, WorkingMemoryParams, OverflowPolicy};
///
/// let mut wm = WorkingMemory::new(
///     WorkingMemoryParams::default(),
///     OverflowPolicy::TruncateOldest,
/// ).unwrap();
/// wm.store(&[0.5, 0.2], 0.1).unwrap();
/// wm.store(&[0.1, 0.9], 0.1).unwrap();
/// assert!(wm.activation_of(0).unwrap() > wm.activation_of(1).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkingMemory {
    params: WorkingMemoryParams,
    policy: OverflowPolicy,
    items: Vec<StoredItem>,
    gate: TransmitterPool,
    time: f64,
    dim: Option<usize>,
    reset_count: u64,
}

impl WorkingMemory {
    /// The overflow policy is required — there is no implicit default
    pub fn new(params: WorkingMemoryParams, policy: OverflowPolicy) -> TemporalResult<Self> {
        params.validate()?;
        let gate = TransmitterPool::new(1, params.gate)?;
        Ok(Self {
            params,
            policy,
            items: Vec::new(),
            gate,
            time: 0.0,
            dim: None,
            reset_count: 0,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.params.capacity
    }

    #[inline]
    pub fn policy(&self) -> OverflowPolicy {
        self.policy
    }

    #[inline]
    pub fn items(&self) -> &[StoredItem] {
        &self.items
    }

    /// How many depletion resets have fired
    #[inline]
    pub fn reset_count(&self) -> u64 {
        self.reset_count
    }

    /// Current input-gate depletion
    #[inline]
    pub fn gate_depletion(&self) -> f64 {
        self.gate.depletion()
    }

    /// Primacy weight at serial position i: `γ^i`
    pub fn primacy_of(&self, index: usize) -> TemporalResult<f64> {
        self.check_index(index)?;
        Ok(self.params.primacy_ratio.powi(index as i32))
    }

    /// Primacy-weighted readout strength of item i. Item 0 exceeds item 4
    /// by the documented factor `γ⁻⁴` (1.52 at the default γ = 0.9).
    pub fn activation_of(&self, index: usize) -> TemporalResult<f64> {
        self.primacy_of(index)
    }

    /// Stored pattern scaled by its primacy weight
    pub fn weighted_pattern(&self, index: usize) -> TemporalResult<Vec<f64>> {
        self.check_index(index)?;
        let w = self.params.primacy_ratio.powi(index as i32);
        Ok(self.items[index].pattern.iter().map(|v| v * w).collect())
    }

    /// Primacy-weighted superposition of every stored pattern, clamped to
    /// [0, 1] — the masking field's input
    pub fn readout(&self) -> Vec<f64> {
        let Some(dim) = self.dim else {
            return Vec::new();
        };
        let mut out = vec![0.0; dim];
        for (i, item) in self.items.iter().enumerate() {
            let w = self.params.primacy_ratio.powi(i as i32);
            for (o, &v) in out.iter_mut().zip(&item.pattern) {
                *o += w * v;
            }
        }
        for o in out.iter_mut() {
            *o = o.clamp(0.0, 1.0);
        }
        out
    }

    fn check_index(&self, index: usize) -> TemporalResult<()> {
        if index >= self.items.len() {
            return Err(TemporalError::ItemOutOfRange {
                index,
                stored: self.items.len(),
            });
        }
        Ok(())
    }

    // =========================================================================
    // Storage
    // =========================================================================

    /// Store a pattern presented for `duration` time units.
    ///
    /// The presentation habituates the input gate in proportion to the
    /// duration; a gate depleted past the threshold clears the whole
    /// memory (STORE-2 reset) before the new pattern is stored.
    pub fn store(&mut self, pattern: &[f64], duration: f64) -> TemporalResult<StoreOutcome> {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(TemporalError::ParameterOutOfRange {
                name: "duration",
                value: duration,
            });
        }
        if let Some(dim) = self.dim {
            if pattern.len() != dim {
                return Err(TemporalError::DimensionMismatch {
                    expected: dim,
                    actual: pattern.len(),
                });
            }
        } else {
            self.dim = Some(pattern.len());
        }

        self.gate.evolve(&[1.0], duration)?;
        self.time += duration;

        let mut outcome = StoreOutcome::Stored;
        if self.gate.depletion() > self.params.reset_threshold {
            self.items.clear();
            self.gate.reset();
            self.reset_count += 1;
            outcome = StoreOutcome::DepletionReset;
        } else if self.items.len() >= self.params.capacity {
            match self.policy {
                OverflowPolicy::Reset => self.items.clear(),
                OverflowPolicy::TruncateOldest => {
                    self.items.remove(0);
                }
            }
        }

        let position = self.items.len();
        self.items.push(StoredItem {
            pattern: pattern.to_vec(),
            primacy: self.params.primacy_ratio.powi(position as i32),
            timestamp: self.time,
        });
        self.refresh_primacies();
        Ok(outcome)
    }

    /// Primacy weights always reflect current serial positions
    fn refresh_primacies(&mut self) {
        let gamma = self.params.primacy_ratio;
        for (i, item) in self.items.iter_mut().enumerate() {
            item.primacy = gamma.powi(i as i32);
        }
    }

    /// Clear items and recover the gate
    pub fn clear(&mut self) {
        self.items.clear();
        self.gate.reset();
        self.time = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory(policy: OverflowPolicy) -> WorkingMemory {
        WorkingMemory::new(WorkingMemoryParams::default(), policy).unwrap()
    }

    #[test]
    fn test_primacy_gradient_is_monotone() {
        let mut wm = memory(OverflowPolicy::TruncateOldest);
        for k in 0..5 {
            wm.store(&[k as f64 / 10.0, 0.5], 0.1).unwrap();
        }
        for i in 0..4 {
            assert!(wm.activation_of(i).unwrap() > wm.activation_of(i + 1).unwrap());
        }
    }

    #[test]
    fn test_item_zero_exceeds_item_four_by_documented_factor() {
        let mut wm = memory(OverflowPolicy::TruncateOldest);
        for _ in 0..5 {
            wm.store(&[0.5; 10], 0.1).unwrap();
        }
        let ratio = wm.activation_of(0).unwrap() / wm.activation_of(4).unwrap();
        assert!(ratio > 1.2, "primacy ratio {ratio} too flat");
        // γ⁻⁴ exactly at the default γ = 0.9
        assert!((ratio - 0.9f64.powi(-4)).abs() < 1e-12);
    }

    #[test]
    fn test_truncate_oldest_at_capacity() {
        let mut wm = WorkingMemory::new(
            WorkingMemoryParams {
                capacity: 3,
                ..Default::default()
            },
            OverflowPolicy::TruncateOldest,
        )
        .unwrap();
        for k in 0..5 {
            wm.store(&[k as f64 / 10.0], 0.1).unwrap();
        }
        assert_eq!(wm.len(), 3);
        // Oldest survivors are items 2, 3, 4
        assert_eq!(wm.items()[0].pattern, vec![0.2]);
        assert_eq!(wm.items()[2].pattern, vec![0.4]);
    }

    #[test]
    fn test_reset_policy_clears_at_capacity() {
        let mut wm = WorkingMemory::new(
            WorkingMemoryParams {
                capacity: 2,
                ..Default::default()
            },
            OverflowPolicy::Reset,
        )
        .unwrap();
        wm.store(&[0.1], 0.1).unwrap();
        wm.store(&[0.2], 0.1).unwrap();
        wm.store(&[0.3], 0.1).unwrap();
        assert_eq!(wm.len(), 1);
        assert_eq!(wm.items()[0].pattern, vec![0.3]);
    }

    #[test]
    fn test_capacity_one_is_most_recent_slot() {
        let mut wm = WorkingMemory::new(
            WorkingMemoryParams {
                capacity: 1,
                ..Default::default()
            },
            OverflowPolicy::TruncateOldest,
        )
        .unwrap();
        wm.store(&[0.1], 0.1).unwrap();
        wm.store(&[0.9], 0.1).unwrap();
        assert_eq!(wm.len(), 1);
        assert_eq!(wm.items()[0].pattern, vec![0.9]);
        assert_eq!(wm.activation_of(0).unwrap(), 1.0);
    }

    #[test]
    fn test_depletion_reset_clears_memory() {
        let mut wm = WorkingMemory::new(
            WorkingMemoryParams {
                reset_threshold: 0.05,
                ..Default::default()
            },
            OverflowPolicy::TruncateOldest,
        )
        .unwrap();
        let mut saw_reset = false;
        for _ in 0..30 {
            let outcome = wm.store(&[0.5], 5.0).unwrap();
            if outcome == StoreOutcome::DepletionReset {
                saw_reset = true;
                // Reset stores the incoming pattern into a fresh memory
                assert_eq!(wm.len(), 1);
                break;
            }
        }
        assert!(saw_reset, "gate never depleted past the threshold");
        assert_eq!(wm.reset_count(), 1);
    }

    #[test]
    fn test_readout_superposes_with_primacy() {
        let mut wm = memory(OverflowPolicy::TruncateOldest);
        wm.store(&[1.0, 0.0], 0.1).unwrap();
        wm.store(&[0.0, 1.0], 0.1).unwrap();
        let readout = wm.readout();
        assert!((readout[0] - 1.0).abs() < 1e-12);
        assert!((readout[1] - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_dimension_fixed_by_first_store() {
        let mut wm = memory(OverflowPolicy::TruncateOldest);
        wm.store(&[0.1, 0.2, 0.3], 0.1).unwrap();
        assert!(matches!(
            wm.store(&[0.1], 0.1),
            Err(TemporalError::DimensionMismatch { expected: 3, actual: 1 })
        ));
    }

    #[test]
    fn test_policy_is_explicit() {
        let wm = memory(OverflowPolicy::Reset);
        assert_eq!(wm.policy(), OverflowPolicy::Reset);
    }

    #[test]
    fn test_invalid_params_fatal() {
        assert!(WorkingMemory::new(
            WorkingMemoryParams {
                capacity: 0,
                ..Default::default()
            },
            OverflowPolicy::Reset,
        )
        .is_err());
        assert!(WorkingMemory::new(
            WorkingMemoryParams {
                primacy_ratio: 1.0,
                ..Default::default()
            },
            OverflowPolicy::Reset,
        )
        .is_err());
    }
}
