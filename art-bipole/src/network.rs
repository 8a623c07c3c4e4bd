//! # Bipole Network — Synchronous Horizontal Grouping
//!
//! Fixed lattice of bipole cells over a precomputed weight matrix. One
//! integration step is three passes with no within-iteration races:
//!
//! ```text
//! 1. read-only: H_L[i], H_R[i] from current activations
//! 2. read-only: firing targets from the three-way logic
//! 3. synchronous commit of new activations
//! ```

use serde::{Deserialize, Serialize};

use art_core::error::check_finite;

use crate::cell::{BipoleCell, BipoleParams, FiringCondition};
use crate::error::{BipoleError, BipoleResult};
use crate::spatial::WeightMatrix;

/// Settle iterations without propagation mode (contract)
pub const SETTLE_ITERATIONS: usize = 10;

/// Settle iterations with propagation mode (contract)
pub const SETTLE_ITERATIONS_PROPAGATION: usize = 15;

/// Horizontal grouping network.
///
/// # Example
///
/// ```
/// use art_bipole::{BipoleNetwork, BipoleParams};
///
/// let params = BipoleParams { n: 16, ..Default::default() };
/// let mut net = BipoleNetwork::new(params).unwrap();
/// net.set_direct(3, 0.9).unwrap();
/// net.settle(2.0);
/// assert!(net.activations()[3] > 0.5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BipoleNetwork {
    cells: Vec<BipoleCell>,
    weights: WeightMatrix,
    params: BipoleParams,
}

impl BipoleNetwork {
    /// Lattice of `params.n` cells at positions 0..n, uniform orientation
    pub fn new(params: BipoleParams) -> BipoleResult<Self> {
        params.validate()?;
        let mut cells: Vec<BipoleCell> = (0..params.n).map(BipoleCell::new).collect();
        for cell in cells.iter_mut() {
            cell.set_propagation_mode(params.propagation_mode);
        }
        let weights = WeightMatrix::build(&cells, &params);
        Ok(Self {
            cells,
            weights,
            params,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn params(&self) -> &BipoleParams {
        &self.params
    }

    #[inline]
    pub fn cell(&self, i: usize) -> BipoleResult<&BipoleCell> {
        self.cells.get(i).ok_or(BipoleError::CellOutOfRange {
            index: i,
            size: self.cells.len(),
        })
    }

    #[inline]
    pub fn weight(&self, i: usize, j: usize) -> f64 {
        self.weights.get(i, j)
    }

    pub fn activations(&self) -> Vec<f64> {
        self.cells.iter().map(|c| c.activation()).collect()
    }

    /// Which condition fired per cell on the last committed step
    pub fn firing_conditions(&self) -> Vec<Option<FiringCondition>> {
        self.cells.iter().map(|c| c.last_firing()).collect()
    }

    // =========================================================================
    // Inputs
    // =========================================================================

    pub fn set_direct(&mut self, i: usize, value: f64) -> BipoleResult<()> {
        check_finite(&[value], "direct input")?;
        let size = self.cells.len();
        self.cells
            .get_mut(i)
            .ok_or(BipoleError::CellOutOfRange { index: i, size })?
            .set_direct(value);
        Ok(())
    }

    pub fn set_direct_inputs(&mut self, inputs: &[f64]) -> BipoleResult<()> {
        if inputs.len() != self.cells.len() {
            return Err(BipoleError::DimensionMismatch {
                expected: self.cells.len(),
                actual: inputs.len(),
            });
        }
        check_finite(inputs, "direct input")?;
        for (cell, &d) in self.cells.iter_mut().zip(inputs) {
            cell.set_direct(d);
        }
        Ok(())
    }

    /// Change one cell's orientation; rebuilds that cell's weight row and
    /// column only
    pub fn set_orientation(&mut self, i: usize, theta: f64) -> BipoleResult<()> {
        let size = self.cells.len();
        self.cells
            .get_mut(i)
            .ok_or(BipoleError::CellOutOfRange { index: i, size })?
            .set_orientation(theta);
        self.weights.rebuild_row_col(i, &self.cells, &self.params);
        Ok(())
    }

    // =========================================================================
    // Dynamics
    // =========================================================================

    /// One synchronous integration step (three-pass discipline)
    pub fn step(&mut self, dt: f64) {
        let n = self.cells.len();

        // Pass 1: horizontal inputs from current activations (read-only).
        // Left/right split follows lattice position.
        let mut horizontal = vec![(0.0f64, 0.0f64); n];
        for i in 0..n {
            let mut h_left = 0.0;
            let mut h_right = 0.0;
            for j in 0..n {
                let w = self.weights.get(i, j);
                if w == 0.0 {
                    continue;
                }
                let contribution = w * self.cells[j].activation();
                if self.cells[j].position() < self.cells[i].position() {
                    h_left += contribution;
                } else if self.cells[j].position() > self.cells[i].position() {
                    h_right += contribution;
                }
            }
            horizontal[i] = (h_left, h_right);
        }
        for (cell, &(hl, hr)) in self.cells.iter_mut().zip(&horizontal) {
            cell.set_horizontal(hl, hr);
        }

        // Pass 2 + 3: targets are pure functions of the frozen inputs, so
        // the per-cell step commits synchronously.
        for cell in self.cells.iter_mut() {
            cell.step(dt, &self.params);
        }
    }

    /// Run the contractual settle schedule: 10 iterations, 15 with
    /// propagation mode. Returns the iteration count.
    pub fn settle(&mut self, dt: f64) -> usize {
        let iterations = if self.params.propagation_mode {
            SETTLE_ITERATIONS_PROPAGATION
        } else {
            SETTLE_ITERATIONS
        };
        for _ in 0..iterations {
            self.step(dt);
        }
        iterations
    }

    /// Back to rest; weights are kept (they depend only on geometry)
    pub fn reset(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.reset();
        }
    }
}
