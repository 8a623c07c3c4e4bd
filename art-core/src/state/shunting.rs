//! # Shunting Dynamics — Bounded On-Center Fields
//!
//! The membrane equation of the whole stack:
//!
//! ```text
//! τ·dx/dt = −A·x + (B − x)·E − (x + C)·I
//! ```
//!
//! Multiplicative gating keeps x inside [−C, B] for any non-negative inputs,
//! which is the boundedness invariant every layer above relies on.

use serde::{Deserialize, Serialize};

use crate::dynamics::integrator::{self, IntegratorKind};
use crate::error::{check_dim, check_finite, CoreError, CoreResult};

/// Hard ceiling on step-rejection halvings before giving up
const MAX_STEP_HALVINGS: u32 = 10;

/// Tolerance for the out-of-bounds rejection test
const BOUND_SLACK: f64 = 1e-6;

/// Shunting parameter block.
///
/// `a` is passive decay, `b` the excitatory ceiling, `c` the inhibitory
/// floor offset (the reachable floor is −c), `tau` the time constant in
/// milliseconds, `dt` the nominal step in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShuntingParams {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub tau: f64,
    pub dt: f64,
    pub integrator: IntegratorKind,
}

impl Default for ShuntingParams {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 1.0,
            c: 0.0,
            tau: 10.0,
            dt: 1.0,
            integrator: IntegratorKind::Euler,
        }
    }
}

impl ShuntingParams {
    /// Validate ranges; invalid parameters are fatal at construction
    pub fn validate(&self) -> CoreResult<()> {
        if !self.a.is_finite() || self.a < 0.0 {
            return Err(CoreError::range("a", self.a, 0.0, f64::INFINITY));
        }
        if !self.b.is_finite() || !self.c.is_finite() || self.b <= -self.c || self.b < self.c {
            return Err(CoreError::range("b", self.b, self.c, f64::INFINITY));
        }
        if self.c < 0.0 {
            return Err(CoreError::range("c", self.c, 0.0, f64::INFINITY));
        }
        if !self.tau.is_finite() || self.tau <= 0.0 {
            return Err(CoreError::range("tau", self.tau, f64::EPSILON, f64::INFINITY));
        }
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(CoreError::range("dt", self.dt, f64::EPSILON, f64::INFINITY));
        }
        Ok(())
    }

    /// Step cap: `dt ≤ min(0.1·τ, 1/(A + E_max + I_max))`
    pub fn step_cap(&self, e_max: f64, i_max: f64) -> f64 {
        let stiffness = self.a + e_max + i_max;
        let cap = if stiffness > 0.0 {
            (0.1 * self.tau).min(1.0 / stiffness)
        } else {
            0.1 * self.tau
        };
        cap.max(f64::MIN_POSITIVE)
    }
}

/// A population of shunting units with shared parameters.
///
/// Inputs are rectified on write (negative excitation/inhibition is clamped
/// to zero) so the boundedness invariant holds for every admissible call.
///
/// # Example
///
/// ```
/// use art_core::state::{ShuntingField, ShuntingParams};
///
/// let mut field = ShuntingField::new(8, ShuntingParams::default()).unwrap();
/// field.set_excitatory(&vec![0.5; 8]).unwrap();
/// field.evolve(1.0).unwrap();
/// assert!(field.activations().iter().all(|&x| (0.0..=1.0).contains(&x)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShuntingField {
    x: Vec<f64>,
    excitatory: Vec<f64>,
    inhibitory: Vec<f64>,
    params: ShuntingParams,
}

impl ShuntingField {
    /// New field at rest (x = 0, no input)
    pub fn new(dim: usize, params: ShuntingParams) -> CoreResult<Self> {
        params.validate()?;
        Ok(Self {
            x: vec![0.0; dim],
            excitatory: vec![0.0; dim],
            inhibitory: vec![0.0; dim],
            params,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    #[inline]
    pub fn params(&self) -> &ShuntingParams {
        &self.params
    }

    #[inline]
    pub fn activations(&self) -> &[f64] {
        &self.x
    }

    /// Reachable bounds of the field: [−C, B]
    #[inline]
    pub fn bounds(&self) -> (f64, f64) {
        (-self.params.c, self.params.b)
    }

    // =========================================================================
    // Inputs
    // =========================================================================

    /// Set excitatory drive; negatives are rectified to zero, NaN is fatal
    pub fn set_excitatory(&mut self, input: &[f64]) -> CoreResult<()> {
        check_dim(self.x.len(), input.len())?;
        check_finite(input, "excitatory input")?;
        for (dst, &src) in self.excitatory.iter_mut().zip(input) {
            *dst = src.max(0.0);
        }
        Ok(())
    }

    /// Set inhibitory drive; negatives are rectified to zero, NaN is fatal
    pub fn set_inhibitory(&mut self, input: &[f64]) -> CoreResult<()> {
        check_dim(self.x.len(), input.len())?;
        check_finite(input, "inhibitory input")?;
        for (dst, &src) in self.inhibitory.iter_mut().zip(input) {
            *dst = src.max(0.0);
        }
        Ok(())
    }

    /// Overwrite activations directly (clamped into [−C, B])
    pub fn set_activations(&mut self, values: &[f64]) -> CoreResult<()> {
        check_dim(self.x.len(), values.len())?;
        check_finite(values, "activation write")?;
        let (lo, hi) = self.bounds();
        for (dst, &src) in self.x.iter_mut().zip(values) {
            *dst = src.clamp(lo, hi);
        }
        Ok(())
    }

    // =========================================================================
    // Dynamics
    // =========================================================================

    /// Advance the field by `dt` milliseconds.
    ///
    /// Substeps at the stiffness-aware cap; a substep that leaves any unit
    /// more than 1e-6 outside [−C, B] is rejected and retried at half the
    /// step. The final state is clamped as a safety net (the analytic
    /// solution stays in bounds; the clamp only absorbs roundoff).
    pub fn evolve(&mut self, dt: f64) -> CoreResult<()> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(CoreError::range("dt", dt, f64::EPSILON, f64::INFINITY));
        }
        check_finite(&self.x, "activation state")?;

        let e_max = self.excitatory.iter().cloned().fold(0.0, f64::max);
        let i_max = self.inhibitory.iter().cloned().fold(0.0, f64::max);
        let cap = self.params.step_cap(e_max, i_max);

        let mut remaining = dt;
        while remaining > 0.0 {
            let h = remaining.min(cap);
            self.substep(h)?;
            remaining -= h;
        }
        Ok(())
    }

    fn substep(&mut self, h: f64) -> CoreResult<()> {
        let (lo, hi) = self.bounds();
        let params = self.params;
        let e = self.excitatory.clone();
        let i = self.inhibitory.clone();
        let deriv = move |x: &[f64], dx: &mut [f64]| {
            for k in 0..x.len() {
                dx[k] = (-params.a * x[k] + (params.b - x[k]) * e[k]
                    - (x[k] + params.c) * i[k])
                    / params.tau;
            }
        };

        let mut step = h;
        for _attempt in 0..=MAX_STEP_HALVINGS {
            let mut trial = self.x.clone();
            let mut advanced = 0.0;
            let mut ok = true;
            while advanced < h - f64::EPSILON {
                let s = step.min(h - advanced);
                integrator::step(params.integrator, &mut trial, s, &deriv);
                if trial
                    .iter()
                    .any(|&v| !v.is_finite() || v < lo - BOUND_SLACK || v > hi + BOUND_SLACK)
                {
                    ok = false;
                    break;
                }
                advanced += s;
            }
            if ok {
                for v in trial.iter_mut() {
                    *v = v.clamp(lo, hi);
                }
                self.x = trial;
                return Ok(());
            }
            step *= 0.5;
        }
        Err(CoreError::StepRejected {
            attempts: MAX_STEP_HALVINGS,
        })
    }

    /// Instantaneous derivative at the current state
    pub fn derivative(&self) -> Vec<f64> {
        let p = &self.params;
        self.x
            .iter()
            .zip(self.excitatory.iter().zip(&self.inhibitory))
            .map(|(&x, (&e, &i))| (-p.a * x + (p.b - x) * e - (x + p.c) * i) / p.tau)
            .collect()
    }

    /// True iff `‖dx/dt‖∞ < tol`
    pub fn has_converged(&self, tol: f64) -> bool {
        self.derivative().iter().all(|d| d.abs() < tol)
    }

    /// Closed-form equilibrium `(B·E − C·I)/(A + E + I)` per unit
    pub fn equilibrium(&self) -> Vec<f64> {
        let p = &self.params;
        self.excitatory
            .iter()
            .zip(&self.inhibitory)
            .map(|(&e, &i)| {
                let denom = p.a + e + i;
                if denom == 0.0 {
                    0.0
                } else {
                    (p.b * e - p.c * i) / denom
                }
            })
            .collect()
    }

    /// Back to rest: zero activations and inputs
    pub fn reset(&mut self) {
        self.x.iter_mut().for_each(|v| *v = 0.0);
        self.excitatory.iter_mut().for_each(|v| *v = 0.0);
        self.inhibitory.iter_mut().for_each(|v| *v = 0.0);
    }
}
