//! # Spatial Kernel — Horizontal Connection Weights
//!
//! Connection strength between bipole cells falls off exponentially with
//! lattice distance and, when orientation selectivity is enabled, as a
//! Gaussian in orientation difference (mod π):
//!
//! ```text
//! w(d, Δθ) = w_max · exp(−d/σ_d) · exp(−Δθ²/(2σ_θ²))
//! ```
//!
//! Zero at d = 0 (no self-connection) and beyond R_max.

use serde::{Deserialize, Serialize};

use crate::cell::{BipoleCell, BipoleParams};

/// Orientation difference folded into [0, π/2] (orientations are mod π)
pub fn orientation_difference(a: f64, b: f64) -> f64 {
    let pi = std::f64::consts::PI;
    let d = (a - b).rem_euclid(pi);
    d.min(pi - d)
}

/// Kernel weight for one cell pair
pub fn connection_weight(distance: f64, delta_theta: f64, p: &BipoleParams) -> f64 {
    if distance <= 0.0 || distance > p.r_max {
        return 0.0;
    }
    let spatial = (-distance / p.sigma_d).exp();
    let angular = if p.orientation_selectivity {
        (-(delta_theta * delta_theta) / (2.0 * p.sigma_theta * p.sigma_theta)).exp()
    } else {
        1.0
    };
    p.w_max * spatial * angular
}

/// Precomputed N×N weight matrix.
///
/// Zero diagonal, zero outside [−R_max, +R_max]. An orientation change of
/// one cell rebuilds only that cell's row and column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightMatrix {
    n: usize,
    data: Vec<f64>,
}

impl WeightMatrix {
    /// Build the full matrix from the current cell lattice
    pub fn build(cells: &[BipoleCell], p: &BipoleParams) -> Self {
        let n = cells.len();
        let mut m = Self {
            n,
            data: vec![0.0; n * n],
        };
        for i in 0..n {
            m.fill_row(i, cells, p);
        }
        m
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.n + j]
    }

    fn fill_row(&mut self, i: usize, cells: &[BipoleCell], p: &BipoleParams) {
        for j in 0..self.n {
            self.data[i * self.n + j] = Self::pair_weight(&cells[i], &cells[j], p);
        }
    }

    fn pair_weight(a: &BipoleCell, b: &BipoleCell, p: &BipoleParams) -> f64 {
        let d = (a.position() as f64 - b.position() as f64).abs();
        let dtheta = orientation_difference(a.orientation(), b.orientation());
        connection_weight(d, dtheta, p)
    }

    /// Refresh row i and column i only — called after one cell's
    /// orientation changes
    pub fn rebuild_row_col(&mut self, i: usize, cells: &[BipoleCell], p: &BipoleParams) {
        self.fill_row(i, cells, p);
        for j in 0..self.n {
            self.data[j * self.n + i] = Self::pair_weight(&cells[j], &cells[i], p);
        }
    }
}
