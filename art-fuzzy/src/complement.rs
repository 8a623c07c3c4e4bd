//! # Complement Coding
//!
//! The input transform `I ↦ [I, 1−I]` doubles the dimension and keeps the
//! L1 norm of every coded input constant at M, which is what stabilizes
//! FuzzyART category geometry against weight erosion.

use crate::error::{FuzzyError, FuzzyResult};

/// Validate that every component lies in [0, 1]; optionally clamp instead
pub fn normalize_input(input: &[f64], clamp: bool) -> FuzzyResult<Vec<f64>> {
    let mut out = Vec::with_capacity(input.len());
    for (index, &v) in input.iter().enumerate() {
        if !v.is_finite() {
            return Err(FuzzyError::InputOutOfRange { index, value: v });
        }
        if (0.0..=1.0).contains(&v) {
            out.push(v);
        } else if clamp {
            out.push(v.clamp(0.0, 1.0));
        } else {
            return Err(FuzzyError::InputOutOfRange { index, value: v });
        }
    }
    Ok(out)
}

/// `I ↦ [I, 1 − I]`, dimension 2M
pub fn complement_code(input: &[f64]) -> Vec<f64> {
    let mut coded = Vec::with_capacity(input.len() * 2);
    coded.extend_from_slice(input);
    coded.extend(input.iter().map(|v| 1.0 - v));
    coded
}

/// Exact inverse of [`complement_code`]: the first half of the coded vector
pub fn complement_decode(coded: &[f64]) -> FuzzyResult<Vec<f64>> {
    if coded.len() % 2 != 0 {
        return Err(FuzzyError::DimensionMismatch {
            expected: coded.len() + 1,
            actual: coded.len(),
        });
    }
    Ok(coded[..coded.len() / 2].to_vec())
}

/// Componentwise fuzzy AND (min)
pub fn fuzzy_min(a: &[f64], b: &[f64]) -> Vec<f64> {
    a.iter().zip(b).map(|(x, y)| x.min(*y)).collect()
}

/// L1 norm of the fuzzy AND, without allocating
pub fn fuzzy_min_norm(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x.min(*y)).sum()
}

/// L1 norm
pub fn l1_norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x.abs()).sum()
}
