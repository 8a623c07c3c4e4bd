//! # FuzzyART Engine — Resonant Category Search
//!
//! Choice-ranked search with vigilance gating:
//!
//! ```text
//! T_j = |I ∧ w_j| / (α + |w_j|)        choice (ranking)
//! ρ_j = |I ∧ w_j| / |I|                match (vigilance test)
//! w_j ← β·(I ∧ w_j) + (1−β)·w_j        resonant update
//! ```
//!
//! Ties in T break toward the lower category index; the first candidate
//! passing vigilance resonates (first-hit search). Capacity and no-match
//! outcomes are result variants, never errors.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::category::FuzzyCategory;
use crate::complement::{complement_code, normalize_input};
use crate::error::{FuzzyError, FuzzyResult};
use crate::params::FuzzyParams;

/// Outcome of a learn or predict call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ArtOutcome {
    /// A category passed vigilance (or was newly committed)
    Resonance {
        index: usize,
        activation: f64,
        match_score: f64,
    },
    /// No category passed vigilance; carries the best candidate seen
    NoMatch { best: Option<(usize, f64)> },
    /// At max_categories with no resonant candidate
    CapacityExceeded,
}

impl ArtOutcome {
    /// Category index if this outcome is a resonance
    pub fn resonant_index(&self) -> Option<usize> {
        match self {
            ArtOutcome::Resonance { index, .. } => Some(*index),
            _ => None,
        }
    }
}

/// The category engine. Exclusively owns its category list — append-only
/// except for [`clear`](FuzzyArt::clear).
///
/// # Example
///
/// ```
/// use art_fuzzy::{FuzzyArt, FuzzyParams, ArtOutcome};
///
/// let mut art = FuzzyArt::new(FuzzyParams { rho: 0.7, ..Default::default() }).unwrap();
/// let outcome = art.learn(&[0.8, 0.2, 0.5]).unwrap();
/// assert_eq!(outcome.resonant_index(), Some(0));
/// assert_eq!(art.category_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct FuzzyArt {
    params: FuzzyParams,
    categories: Vec<FuzzyCategory>,
    input_dim: Option<usize>,
    learn_count: u64,
    rng: StdRng,
}

impl FuzzyArt {
    pub fn new(params: FuzzyParams) -> FuzzyResult<Self> {
        params.validate()?;
        let rng = StdRng::seed_from_u64(params.rng_seed);
        Ok(Self {
            params,
            categories: Vec::new(),
            input_dim: None,
            learn_count: 0,
            rng,
        })
    }

    /// Rebuild from snapshot fields; the RNG restarts from the stored seed
    pub(crate) fn from_parts(
        params: FuzzyParams,
        categories: Vec<FuzzyCategory>,
        learn_count: u64,
    ) -> FuzzyResult<Self> {
        params.validate()?;
        let rng = StdRng::seed_from_u64(params.rng_seed);
        let input_dim = categories.first().map(|c| {
            if params.complement_coding {
                c.weights().len() / 2
            } else {
                c.weights().len()
            }
        });
        Ok(Self {
            params,
            categories,
            input_dim,
            learn_count,
            rng,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn params(&self) -> &FuzzyParams {
        &self.params
    }

    #[inline]
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    #[inline]
    pub fn get_categories(&self) -> &[FuzzyCategory] {
        &self.categories
    }

    pub fn get_category(&self, index: usize) -> FuzzyResult<&FuzzyCategory> {
        self.categories
            .get(index)
            .ok_or(FuzzyError::CategoryOutOfRange {
                index,
                count: self.categories.len(),
            })
    }

    /// Attach a label to a learned category
    pub fn set_label(&mut self, index: usize, label: impl Into<String>) -> FuzzyResult<()> {
        let count = self.categories.len();
        self.categories
            .get_mut(index)
            .ok_or(FuzzyError::CategoryOutOfRange { index, count })?
            .set_label(label);
        Ok(())
    }

    #[inline]
    pub fn learn_count(&self) -> u64 {
        self.learn_count
    }

    /// Decoded prototype of a category in input dimension (first half of
    /// the complement-coded weight)
    pub fn category_expectation(&self, index: usize) -> FuzzyResult<Vec<f64>> {
        let cat = self.get_category(index)?;
        if self.params.complement_coding {
            Ok(cat.weights()[..cat.weights().len() / 2].to_vec())
        } else {
            Ok(cat.weights().to_vec())
        }
    }

    // =========================================================================
    // Preprocessing
    // =========================================================================

    fn prepare(&mut self, input: &[f64]) -> FuzzyResult<Vec<f64>> {
        if let Some(dim) = self.input_dim {
            if input.len() != dim {
                return Err(FuzzyError::DimensionMismatch {
                    expected: dim,
                    actual: input.len(),
                });
            }
        }
        let clean = normalize_input(input, self.params.input_clamp)?;
        Ok(if self.params.complement_coding {
            complement_code(&clean)
        } else {
            clean
        })
    }

    /// Choice values for every category, ranked descending with ties broken
    /// by lower index
    fn ranked_choices(&mut self, coded: &[f64]) -> Vec<(usize, f64)> {
        let noise = self.params.choice_noise;
        let mut ranked: Vec<(usize, f64)> = self
            .categories
            .iter()
            .enumerate()
            .map(|(j, cat)| {
                let mut t = cat.choice(coded, self.params.alpha);
                if noise > 0.0 {
                    t += noise * self.rng.r#gen::<f64>();
                }
                (j, t)
            })
            .collect();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
        ranked
    }

    // =========================================================================
    // Learning and recognition
    // =========================================================================

    /// Learn one input: resonate with the best vigilance-passing category
    /// or commit a new one. Exactly one category is updated per call.
    pub fn learn(&mut self, input: &[f64]) -> FuzzyResult<ArtOutcome> {
        let coded = self.prepare(input)?;
        self.learn_count += 1;
        let step = self.learn_count;

        for (j, activation) in self.ranked_choices(&coded) {
            let match_score = self.categories[j].match_score(&coded);
            if match_score >= self.params.rho {
                self.categories[j].learn(&coded, self.params.beta, step);
                return Ok(ArtOutcome::Resonance {
                    index: j,
                    activation,
                    match_score,
                });
            }
        }

        if self.categories.len() >= self.params.max_categories {
            return Ok(ArtOutcome::CapacityExceeded);
        }

        self.input_dim.get_or_insert(input.len());
        let committed = FuzzyCategory::new(coded.clone(), step);
        let activation = committed.choice(&coded, self.params.alpha);
        self.categories.push(committed);
        Ok(ArtOutcome::Resonance {
            index: self.categories.len() - 1,
            activation,
            // A fresh commit has w = I, so the match is exact
            match_score: 1.0,
        })
    }

    /// Recognize without committing or updating weights
    pub fn predict(&mut self, input: &[f64]) -> FuzzyResult<ArtOutcome> {
        let coded = self.prepare(input)?;
        let mut best: Option<(usize, f64)> = None;

        for (j, activation) in self.ranked_choices(&coded) {
            let match_score = self.categories[j].match_score(&coded);
            if best.is_none_or(|(_, m)| match_score > m) {
                best = Some((j, match_score));
            }
            if match_score >= self.params.rho {
                self.categories[j].touch(self.learn_count);
                return Ok(ArtOutcome::Resonance {
                    index: j,
                    activation,
                    match_score,
                });
            }
        }
        Ok(ArtOutcome::NoMatch { best })
    }

    /// Remove every category; parameters and seed state are kept
    pub fn clear(&mut self) {
        self.categories.clear();
        self.input_dim = None;
        self.learn_count = 0;
        self.rng = StdRng::seed_from_u64(self.params.rng_seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(rho: f64) -> FuzzyArt {
        FuzzyArt::new(FuzzyParams {
            rho,
            alpha: 0.001,
            beta: 1.0,
            max_categories: 100,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_first_input_commits_category_zero() {
        let mut art = engine(0.7);
        let input = [0.8, 0.6, 0.4, 0.2, 0.5, 0.7, 0.3, 0.9, 0.1, 0.6];
        let outcome = art.learn(&input).unwrap();
        match outcome {
            ArtOutcome::Resonance {
                index,
                activation,
                match_score,
            } => {
                assert_eq!(index, 0);
                assert!(activation > 0.0);
                assert!(match_score > 0.0);
            }
            other => panic!("expected resonance, got {other:?}"),
        }
        assert_eq!(art.category_count(), 1);
    }

    #[test]
    fn test_reactivation_keeps_single_category() {
        let mut art = engine(0.7);
        let input = [0.8, 0.6, 0.4, 0.2, 0.5, 0.7, 0.3, 0.9, 0.1, 0.6];
        art.learn(&input).unwrap();
        let outcome = art.learn(&input).unwrap();
        assert_eq!(outcome.resonant_index(), Some(0));
        assert_eq!(art.category_count(), 1);
    }

    #[test]
    fn test_capacity_exceeded_is_a_variant() {
        let mut art = FuzzyArt::new(FuzzyParams {
            rho: 0.95,
            max_categories: 1,
            ..Default::default()
        })
        .unwrap();
        art.learn(&[0.9, 0.9, 0.9]).unwrap();
        let outcome = art.learn(&[0.1, 0.1, 0.1]).unwrap();
        assert_eq!(outcome, ArtOutcome::CapacityExceeded);
        assert_eq!(art.category_count(), 1);
    }

    #[test]
    fn test_predict_does_not_learn() {
        let mut art = engine(0.7);
        art.learn(&[0.5, 0.5]).unwrap();
        let weights_before = art.get_category(0).unwrap().weights().to_vec();
        let outcome = art.predict(&[0.4, 0.6]).unwrap();
        assert!(matches!(outcome, ArtOutcome::Resonance { .. }));
        assert_eq!(art.get_category(0).unwrap().weights(), &weights_before[..]);
        assert_eq!(art.category_count(), 1);
    }

    #[test]
    fn test_predict_no_match_reports_best() {
        let mut art = engine(0.99);
        art.learn(&[0.9, 0.1]).unwrap();
        let outcome = art.predict(&[0.1, 0.9]).unwrap();
        match outcome {
            ArtOutcome::NoMatch { best: Some((0, m)) } => assert!(m < 0.99),
            other => panic!("expected NoMatch with best, got {other:?}"),
        }
    }

    #[test]
    fn test_dimension_mismatch_fatal_after_first_learn() {
        let mut art = engine(0.7);
        art.learn(&[0.5, 0.5, 0.5]).unwrap();
        assert!(matches!(
            art.learn(&[0.5, 0.5]),
            Err(FuzzyError::DimensionMismatch { expected: 3, actual: 2 })
        ));
    }

    #[test]
    fn test_out_of_range_input_fatal_unless_clamped() {
        let mut art = engine(0.7);
        assert!(art.learn(&[1.5, 0.0]).is_err());

        let mut clamping = FuzzyArt::new(FuzzyParams {
            input_clamp: true,
            ..Default::default()
        })
        .unwrap();
        assert!(clamping.learn(&[1.5, -0.2]).is_ok());
    }

    #[test]
    fn test_clear_behaves_as_fresh() {
        let mut art = engine(0.7);
        art.learn(&[0.2, 0.8]).unwrap();
        art.learn(&[0.9, 0.1]).unwrap();
        art.clear();
        assert_eq!(art.category_count(), 0);
        assert_eq!(art.learn_count(), 0);
        let outcome = art.learn(&[0.2, 0.8]).unwrap();
        assert_eq!(outcome.resonant_index(), Some(0));
    }

    #[test]
    fn test_exactly_one_category_updated_per_learn() {
        let mut art = engine(0.5);
        art.learn(&[0.9, 0.1, 0.5]).unwrap();
        art.learn(&[0.1, 0.9, 0.5]).unwrap();
        let before: Vec<Vec<f64>> = art
            .get_categories()
            .iter()
            .map(|c| c.weights().to_vec())
            .collect();
        let outcome = art.learn(&[0.85, 0.15, 0.5]).unwrap();
        let winner = outcome.resonant_index().unwrap();
        let mut changed = 0;
        for (j, cat) in art.get_categories().iter().enumerate() {
            if cat.weights() != &before[j][..] {
                changed += 1;
                assert_eq!(j, winner);
            }
        }
        assert!(changed <= 1);
    }

    #[test]
    fn test_zero_input_commits_complement_weights() {
        let mut art = engine(0.7);
        art.learn(&[0.0, 0.0, 0.0]).unwrap();
        let w = art.get_category(0).unwrap().weights();
        assert_eq!(w, &[0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);

        // Identical input resonates with the same category
        let outcome = art.learn(&[0.0, 0.0, 0.0]).unwrap();
        assert_eq!(outcome.resonant_index(), Some(0));
        assert_eq!(art.category_count(), 1);
    }

    #[test]
    fn test_ones_input_commits_complement_weights() {
        let mut art = engine(0.7);
        art.learn(&[1.0, 1.0]).unwrap();
        assert_eq!(art.get_category(0).unwrap().weights(), &[1.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_degenerate_zero_norm_without_complement_coding() {
        let mut art = FuzzyArt::new(FuzzyParams {
            complement_coding: false,
            rho: 0.7,
            ..Default::default()
        })
        .unwrap();
        art.learn(&[0.0, 0.0]).unwrap();
        // Zero-norm input: choice is 0 but match is defined 1.0, so the
        // degenerate branch resonates instead of spawning a duplicate
        let outcome = art.learn(&[0.0, 0.0]).unwrap();
        match outcome {
            ArtOutcome::Resonance {
                index, activation, ..
            } => {
                assert_eq!(index, 0);
                assert_eq!(activation, 0.0);
            }
            other => panic!("expected degenerate resonance, got {other:?}"),
        }
        assert_eq!(art.category_count(), 1);
    }

    #[test]
    fn test_determinism_per_seed() {
        let run = || {
            let mut art = FuzzyArt::new(FuzzyParams {
                rho: 0.85,
                choice_noise: 0.01,
                rng_seed: 7,
                ..Default::default()
            })
            .unwrap();
            let inputs = [
                vec![0.8, 0.2, 0.5],
                vec![0.1, 0.9, 0.4],
                vec![0.75, 0.25, 0.55],
                vec![0.15, 0.85, 0.45],
            ];
            inputs
                .iter()
                .map(|i| {
                    let o = art.learn(i).unwrap();
                    match o {
                        ArtOutcome::Resonance {
                            index, activation, ..
                        } => (index, activation),
                        _ => (usize::MAX, -1.0),
                    }
                })
                .collect::<Vec<_>>()
        };
        let a = run();
        let b = run();
        for ((ia, xa), (ib, xb)) in a.iter().zip(&b) {
            assert_eq!(ia, ib);
            assert!((xa - xb).abs() < 1e-9);
        }
    }
}
