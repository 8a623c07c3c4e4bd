//! # 🔄 Coordinator — Multi-Timescale Cadence
//!
//! Drives the three update cadences of the stack from a single fast clock:
//!
//! ```text
//! FAST    (τ_fast,   ~1 ms)   shunting/bipole integration
//! MEDIUM  (τ_medium, ~10 ms)  masking-field chunking
//! SLOW    (τ_slow,   ~100 ms) weight consolidation, category strength
//! ```
//!
//! Non-blocking counters only: `advance_fast_step` moves logical time, the
//! `should_update_*` queries consume due-flags so that over N fast steps
//! chunking fires ≈ N·(τ_fast/τ_medium) times and slow dynamics
//! ≈ N·(τ_fast/τ_slow) times.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Timescale parameter block, all in milliseconds.
/// Must satisfy `0 < τ_fast ≤ τ_medium ≤ τ_slow`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinatorParams {
    pub tau_fast: f64,
    pub tau_medium: f64,
    pub tau_slow: f64,
}

impl Default for CoordinatorParams {
    fn default() -> Self {
        Self {
            tau_fast: 1.0,
            tau_medium: 10.0,
            tau_slow: 100.0,
        }
    }
}

impl CoordinatorParams {
    pub fn validate(&self) -> CoreResult<()> {
        if !self.tau_fast.is_finite() || self.tau_fast <= 0.0 {
            return Err(CoreError::range(
                "tau_fast",
                self.tau_fast,
                f64::EPSILON,
                f64::INFINITY,
            ));
        }
        if !self.tau_medium.is_finite() || self.tau_medium < self.tau_fast {
            return Err(CoreError::range(
                "tau_medium",
                self.tau_medium,
                self.tau_fast,
                f64::INFINITY,
            ));
        }
        if !self.tau_slow.is_finite() || self.tau_slow < self.tau_medium {
            return Err(CoreError::range(
                "tau_slow",
                self.tau_slow,
                self.tau_medium,
                f64::INFINITY,
            ));
        }
        Ok(())
    }
}

/// Owns timing state only; never mutates layers directly.
///
/// # Example
///
/// ```
/// use art_core::cycle::{TimescaleCoordinator, CoordinatorParams};
///
/// let mut coord = TimescaleCoordinator::new(CoordinatorParams::default()).unwrap();
/// let mut chunk_updates = 0;
/// for _ in 0..1000 {
///     coord.advance_fast_step();
///     if coord.should_update_chunking() {
///         chunk_updates += 1;
///     }
/// }
/// assert_eq!(chunk_updates, 100);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimescaleCoordinator {
    params: CoordinatorParams,
    fast_steps: u64,
    chunk_updates: u64,
    slow_updates: u64,
}

impl TimescaleCoordinator {
    pub fn new(params: CoordinatorParams) -> CoreResult<Self> {
        params.validate()?;
        Ok(Self {
            params,
            fast_steps: 0,
            chunk_updates: 0,
            slow_updates: 0,
        })
    }

    #[inline]
    pub fn params(&self) -> &CoordinatorParams {
        &self.params
    }

    /// Advance logical time by one fast step; returns τ_fast (ms)
    pub fn advance_fast_step(&mut self) -> f64 {
        self.fast_steps += 1;
        self.params.tau_fast
    }

    /// Elapsed logical time in milliseconds
    #[inline]
    pub fn elapsed_ms(&self) -> f64 {
        self.fast_steps as f64 * self.params.tau_fast
    }

    #[inline]
    pub fn fast_steps(&self) -> u64 {
        self.fast_steps
    }

    /// True when a chunking (medium-cadence) update is due; consumes the flag
    pub fn should_update_chunking(&mut self) -> bool {
        let due = (self.elapsed_ms() / self.params.tau_medium).floor() as u64;
        if due > self.chunk_updates {
            self.chunk_updates += 1;
            true
        } else {
            false
        }
    }

    /// True when a slow-cadence update is due; consumes the flag
    pub fn should_update_slow_dynamics(&mut self) -> bool {
        let due = (self.elapsed_ms() / self.params.tau_slow).floor() as u64;
        if due > self.slow_updates {
            self.slow_updates += 1;
            true
        } else {
            false
        }
    }

    /// Effective dt handed to chunking updates (ms)
    #[inline]
    pub fn get_chunking_dt(&self) -> f64 {
        self.params.tau_medium
    }

    /// Effective dt handed to slow updates (ms)
    #[inline]
    pub fn get_slow_dt(&self) -> f64 {
        self.params.tau_slow
    }

    #[inline]
    pub fn chunk_update_count(&self) -> u64 {
        self.chunk_updates
    }

    #[inline]
    pub fn slow_update_count(&self) -> u64 {
        self.slow_updates
    }

    /// Back to t = 0
    pub fn reset(&mut self) {
        self.fast_steps = 0;
        self.chunk_updates = 0;
        self.slow_updates = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_ordering_fatal() {
        let bad = CoordinatorParams {
            tau_fast: 10.0,
            tau_medium: 5.0,
            tau_slow: 100.0,
        };
        assert!(TimescaleCoordinator::new(bad).is_err());
        let bad = CoordinatorParams {
            tau_fast: 0.0,
            ..Default::default()
        };
        assert!(TimescaleCoordinator::new(bad).is_err());
    }

    #[test]
    fn test_cadence_ratios_over_1000_steps() {
        let params = CoordinatorParams {
            tau_fast: 1.0,
            tau_medium: 10.0,
            tau_slow: 100.0,
        };
        let mut coord = TimescaleCoordinator::new(params).unwrap();
        let mut chunking = 0u64;
        let mut slow = 0u64;
        for _ in 0..1000 {
            coord.advance_fast_step();
            if coord.should_update_chunking() {
                chunking += 1;
            }
            if coord.should_update_slow_dynamics() {
                slow += 1;
            }
        }
        // Expected ~100 and ~10; contract band is ±50%
        assert!((50..=200).contains(&chunking), "chunking = {chunking}");
        assert!((5..=20).contains(&slow), "slow = {slow}");
    }

    #[test]
    fn test_ratios_hold_for_non_integer_multiples() {
        let params = CoordinatorParams {
            tau_fast: 1.0,
            tau_medium: 3.0,
            tau_slow: 7.0,
        };
        let mut coord = TimescaleCoordinator::new(params).unwrap();
        let mut chunking = 0u64;
        for _ in 0..300 {
            coord.advance_fast_step();
            if coord.should_update_chunking() {
                chunking += 1;
            }
        }
        assert_eq!(chunking, 100);
    }

    #[test]
    fn test_due_flag_consumed_once() {
        let mut coord = TimescaleCoordinator::new(CoordinatorParams::default()).unwrap();
        for _ in 0..10 {
            coord.advance_fast_step();
        }
        assert!(coord.should_update_chunking());
        assert!(!coord.should_update_chunking());
    }

    #[test]
    fn test_reset_behaves_as_fresh() {
        let mut coord = TimescaleCoordinator::new(CoordinatorParams::default()).unwrap();
        for _ in 0..50 {
            coord.advance_fast_step();
            coord.should_update_chunking();
        }
        coord.reset();
        assert_eq!(coord.fast_steps(), 0);
        assert_eq!(coord.elapsed_ms(), 0.0);
        assert!(!coord.should_update_chunking());
    }

    #[test]
    fn test_dts_exposed() {
        let coord = TimescaleCoordinator::new(CoordinatorParams::default()).unwrap();
        assert_eq!(coord.get_chunking_dt(), 10.0);
        assert_eq!(coord.get_slow_dt(), 100.0);
    }
}
