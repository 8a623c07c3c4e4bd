//! # Transmitter Dynamics — Habituative Synaptic Gates
//!
//! Per-synapse resource z ∈ [0, 1]:
//!
//! ```text
//! dz/dt = ε·(1 − z) − z·(λ·S + μ·S²)
//! ```
//!
//! Recovery toward 1 when the gating signal S is silent, depletion under
//! sustained drive. Depletion is what triggers STORE-2 resets and novelty
//! detection upstream.

use serde::{Deserialize, Serialize};

use crate::error::{check_dim, check_finite, CoreError, CoreResult};

/// Transmitter parameter block: recovery ε, linear depletion λ,
/// quadratic depletion μ. Negative rates are fatal at construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransmitterParams {
    pub epsilon: f64,
    pub lambda: f64,
    pub mu: f64,
}

impl Default for TransmitterParams {
    fn default() -> Self {
        Self {
            epsilon: 0.01,
            lambda: 0.1,
            mu: 0.05,
        }
    }
}

impl TransmitterParams {
    pub fn validate(&self) -> CoreResult<()> {
        for (name, v) in [
            ("epsilon", self.epsilon),
            ("lambda", self.lambda),
            ("mu", self.mu),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(CoreError::range(name, v, 0.0, f64::INFINITY));
            }
        }
        Ok(())
    }
}

/// Pool of habituative transmitter gates, one per synapse.
///
/// # Example
///
/// ```
/// use art_core::state::{TransmitterPool, TransmitterParams};
///
/// let mut pool = TransmitterPool::new(4, TransmitterParams::default()).unwrap();
/// pool.evolve(&[1.0, 1.0, 0.0, 0.0], 10.0).unwrap();
/// assert!(pool.levels()[0] < 1.0); // driven gates deplete
/// assert_eq!(pool.levels()[2], 1.0); // silent gates hold
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransmitterPool {
    z: Vec<f64>,
    params: TransmitterParams,
}

impl TransmitterPool {
    /// Fully recovered pool (z = 1 everywhere)
    pub fn new(dim: usize, params: TransmitterParams) -> CoreResult<Self> {
        params.validate()?;
        Ok(Self {
            z: vec![1.0; dim],
            params,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.z.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.z.is_empty()
    }

    #[inline]
    pub fn levels(&self) -> &[f64] {
        &self.z
    }

    #[inline]
    pub fn params(&self) -> &TransmitterParams {
        &self.params
    }

    /// Mean resource loss across the pool: `1 − mean(z)`
    pub fn depletion(&self) -> f64 {
        if self.z.is_empty() {
            return 0.0;
        }
        1.0 - self.z.iter().sum::<f64>() / self.z.len() as f64
    }

    /// Weakest gate in the pool
    pub fn min_level(&self) -> f64 {
        self.z.iter().cloned().fold(1.0, f64::min)
    }

    /// Gate a signal through the pool: `out[i] = signal[i] · z[i]`
    pub fn gate(&self, signal: &[f64]) -> CoreResult<Vec<f64>> {
        check_dim(self.z.len(), signal.len())?;
        Ok(signal.iter().zip(&self.z).map(|(s, z)| s * z).collect())
    }

    /// Advance the pool under gating signal `s` for `dt` milliseconds.
    ///
    /// The analytic solution stays inside [0, 1]; the end-of-step clamp is
    /// only a roundoff safety net.
    pub fn evolve(&mut self, signal: &[f64], dt: f64) -> CoreResult<()> {
        check_dim(self.z.len(), signal.len())?;
        check_finite(signal, "transmitter signal")?;
        if !dt.is_finite() || dt <= 0.0 {
            return Err(CoreError::range("dt", dt, f64::EPSILON, f64::INFINITY));
        }
        let p = self.params;
        for (z, &s) in self.z.iter_mut().zip(signal) {
            let s = s.max(0.0);
            let dz = p.epsilon * (1.0 - *z) - *z * (p.lambda * s + p.mu * s * s);
            *z = (*z + dt * dz).clamp(0.0, 1.0);
        }
        Ok(())
    }

    /// Restore full resources
    pub fn reset(&mut self) {
        self.z.iter_mut().for_each(|z| *z = 1.0);
    }
}
