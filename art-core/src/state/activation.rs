//! # Activation — Bounded Activation Vectors
//!
//! Ordered sequence of reals in `[floor, ceiling]`, dimension fixed at
//! construction. Every write clamps into bounds; NaN/inf never enters.

use serde::{Deserialize, Serialize};

use crate::error::{check_dim, CoreError, CoreResult};

/// Bounded activation vector.
///
/// # Example
///
/// ```
/// use art_core::state::Activation;
///
/// let mut act = Activation::zeros(4);
/// act.set(0, 0.8).unwrap();
/// act.set(1, 1.5).unwrap(); // clamped to ceiling
/// assert_eq!(act.get(1), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activation {
    values: Vec<f64>,
    floor: f64,
    ceiling: f64,
}

impl Activation {
    /// All-zero vector bounded in [0, 1]
    pub fn zeros(dim: usize) -> Self {
        Self {
            values: vec![0.0; dim],
            floor: 0.0,
            ceiling: 1.0,
        }
    }

    /// All-zero vector with explicit bounds
    pub fn with_bounds(dim: usize, floor: f64, ceiling: f64) -> CoreResult<Self> {
        if !floor.is_finite() || !ceiling.is_finite() || floor >= ceiling {
            return Err(CoreError::range("floor", floor, f64::NEG_INFINITY, ceiling));
        }
        let start = if floor <= 0.0 && ceiling >= 0.0 { 0.0 } else { floor };
        Ok(Self {
            values: vec![start; dim],
            floor,
            ceiling,
        })
    }

    /// Build from raw values, clamped into [0, 1]; NaN/inf is fatal
    pub fn from_values(values: Vec<f64>) -> CoreResult<Self> {
        let mut act = Self::zeros(values.len());
        act.set_all(&values)?;
        Ok(act)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn floor(&self) -> f64 {
        self.floor
    }

    #[inline]
    pub fn ceiling(&self) -> f64 {
        self.ceiling
    }

    #[inline]
    pub fn get(&self, index: usize) -> f64 {
        self.values[index]
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.values.clone()
    }

    // =========================================================================
    // Mutation (always clamped)
    // =========================================================================

    /// Write one component, clamped into bounds
    pub fn set(&mut self, index: usize, value: f64) -> CoreResult<()> {
        if !value.is_finite() {
            return Err(CoreError::NumericInvariant(format!(
                "non-finite activation at index {index}"
            )));
        }
        if index >= self.values.len() {
            return Err(CoreError::DimensionMismatch {
                expected: self.values.len(),
                actual: index + 1,
            });
        }
        self.values[index] = value.clamp(self.floor, self.ceiling);
        Ok(())
    }

    /// Replace the whole vector, clamped componentwise
    pub fn set_all(&mut self, values: &[f64]) -> CoreResult<()> {
        check_dim(self.values.len(), values.len())?;
        for &v in values {
            if !v.is_finite() {
                return Err(CoreError::NumericInvariant(
                    "non-finite activation in bulk write".into(),
                ));
            }
        }
        for (dst, &src) in self.values.iter_mut().zip(values) {
            *dst = src.clamp(self.floor, self.ceiling);
        }
        Ok(())
    }

    /// Set every component to `value` (clamped)
    pub fn fill(&mut self, value: f64) {
        let v = value.clamp(self.floor, self.ceiling);
        self.values.iter_mut().for_each(|x| *x = v);
    }

    /// Re-clamp in place; safety net after external arithmetic
    pub fn clamp_all(&mut self) {
        for v in self.values.iter_mut() {
            *v = v.clamp(self.floor, self.ceiling);
        }
    }

    // =========================================================================
    // Measures
    // =========================================================================

    /// L∞ norm
    pub fn linf_norm(&self) -> f64 {
        self.values.iter().fold(0.0, |m, v| m.max(v.abs()))
    }

    /// L1 norm
    pub fn l1_norm(&self) -> f64 {
        self.values.iter().map(|v| v.abs()).sum()
    }

    /// Largest component
    pub fn max(&self) -> f64 {
        self.values.iter().fold(self.floor, |m, &v| m.max(v))
    }

    /// Cosine similarity against another vector of the same dimension.
    /// Returns 0 when either side has zero norm.
    pub fn cosine(&self, other: &[f64]) -> CoreResult<f64> {
        check_dim(self.values.len(), other.len())?;
        Ok(cosine(&self.values, other))
    }
}

/// Cosine similarity over raw slices (callers guarantee equal length)
pub fn cosine(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let na: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let nb: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if na == 0.0 || nb == 0.0 {
        return 0.0;
    }
    dot / (na * nb)
}
