//! FuzzyART parameter block

use serde::{Deserialize, Serialize};

use crate::error::{FuzzyError, FuzzyResult};

/// FuzzyART parameters.
///
/// `rho` is vigilance (higher partitions finer), `alpha` the choice
/// regularizer, `beta` the learning rate (1.0 = fast learning).
/// `choice_noise` adds a small seeded jitter to the choice function to
/// break symmetric ties stochastically; it is off by default and the
/// determinism contract holds per seed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuzzyParams {
    pub rho: f64,
    pub alpha: f64,
    pub beta: f64,
    pub max_categories: usize,
    pub complement_coding: bool,
    /// Clamp out-of-range inputs into [0, 1] instead of failing
    pub input_clamp: bool,
    pub choice_noise: f64,
    pub rng_seed: u64,
}

impl Default for FuzzyParams {
    fn default() -> Self {
        Self {
            rho: 0.75,
            alpha: 0.001,
            beta: 1.0,
            max_categories: 1000,
            complement_coding: true,
            input_clamp: false,
            choice_noise: 0.0,
            rng_seed: 42,
        }
    }
}

impl FuzzyParams {
    /// Range checks; violations are fatal at construction
    pub fn validate(&self) -> FuzzyResult<()> {
        if !self.rho.is_finite() || !(0.0..=1.0).contains(&self.rho) {
            return Err(FuzzyError::ParameterOutOfRange {
                name: "rho",
                value: self.rho,
            });
        }
        if !self.alpha.is_finite() || self.alpha <= 0.0 {
            return Err(FuzzyError::ParameterOutOfRange {
                name: "alpha",
                value: self.alpha,
            });
        }
        if !self.beta.is_finite() || self.beta <= 0.0 || self.beta > 1.0 {
            return Err(FuzzyError::ParameterOutOfRange {
                name: "beta",
                value: self.beta,
            });
        }
        if !self.choice_noise.is_finite() || self.choice_noise < 0.0 {
            return Err(FuzzyError::ParameterOutOfRange {
                name: "choice_noise",
                value: self.choice_noise,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(FuzzyParams::default().validate().is_ok());
    }

    #[test]
    fn test_ranges_enforced() {
        for (mutate, _) in [
            (FuzzyParams { rho: 1.5, ..Default::default() }, "rho"),
            (FuzzyParams { rho: -0.1, ..Default::default() }, "rho"),
            (FuzzyParams { alpha: 0.0, ..Default::default() }, "alpha"),
            (FuzzyParams { beta: 0.0, ..Default::default() }, "beta"),
            (FuzzyParams { beta: 1.1, ..Default::default() }, "beta"),
        ] {
            assert!(mutate.validate().is_err());
        }
    }

    #[test]
    fn test_serde_round_trip() {
        let params = FuzzyParams {
            rho: 0.9,
            max_categories: 10,
            ..Default::default()
        };
        let json = serde_json::to_string(&params).unwrap();
        let back: FuzzyParams = serde_json::from_str(&json).unwrap();
        assert_eq!(back, params);
    }
}
