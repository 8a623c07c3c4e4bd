//! FuzzyART category: a complement-coded prototype plus access bookkeeping

use serde::{Deserialize, Serialize};

use crate::complement::{fuzzy_min_norm, l1_norm};

/// One learned category.
///
/// The weight vector has length 2M for M-dimensional inputs when
/// complement coding is on. Fuzzy-min learning makes every component
/// monotonically non-increasing over the category's lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuzzyCategory {
    weights: Vec<f64>,
    label: Option<String>,
    created_at: u64,
    last_access: u64,
    access_count: u64,
}

impl FuzzyCategory {
    /// New category committed directly to the coded input
    pub fn new(coded_input: Vec<f64>, step: u64) -> Self {
        Self {
            weights: coded_input,
            label: None,
            created_at: step,
            last_access: step,
            access_count: 1,
        }
    }

    #[inline]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    #[inline]
    pub fn weight_norm(&self) -> f64 {
        l1_norm(&self.weights)
    }

    #[inline]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = Some(label.into());
    }

    #[inline]
    pub fn created_at(&self) -> u64 {
        self.created_at
    }

    #[inline]
    pub fn last_access(&self) -> u64 {
        self.last_access
    }

    #[inline]
    pub fn access_count(&self) -> u64 {
        self.access_count
    }

    /// Choice function `T = |I ∧ w| / (α + |w|)`
    pub fn choice(&self, coded_input: &[f64], alpha: f64) -> f64 {
        fuzzy_min_norm(coded_input, &self.weights) / (alpha + self.weight_norm())
    }

    /// Match function `|I ∧ w| / |I|`.
    ///
    /// A zero-norm input (possible only with complement coding off) is the
    /// degenerate-resonance branch: match is defined as 1.0.
    pub fn match_score(&self, coded_input: &[f64]) -> f64 {
        let input_norm = l1_norm(coded_input);
        if input_norm == 0.0 {
            return 1.0;
        }
        fuzzy_min_norm(coded_input, &self.weights) / input_norm
    }

    /// Resonant update `w ← β·(I ∧ w) + (1−β)·w`; records the access
    pub fn learn(&mut self, coded_input: &[f64], beta: f64, step: u64) {
        for (w, &i) in self.weights.iter_mut().zip(coded_input) {
            let m = i.min(*w);
            *w = beta * m + (1.0 - beta) * *w;
        }
        self.last_access = step;
        self.access_count += 1;
    }

    /// Read access (prediction) bookkeeping
    pub fn touch(&mut self, step: u64) {
        self.last_access = step;
        self.access_count += 1;
    }
}
