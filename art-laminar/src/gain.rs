//! # Gain Modulation — Multiplicative Signal Scaling
//!
//! Applies an attention gain field to a layer signal:
//!
//! ```text
//! modulated[i] = signal[i] · clamp(1 + field[i]·strength·w_layer, min, max)
//! ```
//!
//! `field` carries deviations from neutral (0 = no change), `w_layer` is a
//! per-layer-kind scalar (unknown kinds map to 1.0). The contract is
//! strictly multiplicative: a zero signal stays exactly zero.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use art_core::LayerKind;

use crate::error::{LaminarError, LaminarResult};

/// Gain-modulation parameter block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GainParams {
    /// Blend of the gain field into the final gain, in [0, 1]
    pub modulation_strength: f64,
    /// Lower clamp on the applied gain
    pub min_gain: f64,
    /// Upper clamp on the applied gain (≥ 1)
    pub max_gain: f64,
    /// Per-layer-kind scaling of the modulation
    pub layer_weights: HashMap<LayerKind, f64>,
}

impl Default for GainParams {
    fn default() -> Self {
        let mut layer_weights = HashMap::new();
        layer_weights.insert(LayerKind::L1, 1.5);
        layer_weights.insert(LayerKind::L4, 0.8);
        layer_weights.insert(LayerKind::L5, 1.0);
        layer_weights.insert(LayerKind::L6, 0.9);
        Self {
            modulation_strength: 0.5,
            min_gain: 0.2,
            max_gain: 2.0,
            layer_weights,
        }
    }
}

impl GainParams {
    pub fn validate(&self) -> LaminarResult<()> {
        if !self.modulation_strength.is_finite()
            || !(0.0..=1.0).contains(&self.modulation_strength)
        {
            return Err(LaminarError::ParameterOutOfRange {
                name: "modulation_strength",
                value: self.modulation_strength,
            });
        }
        if !self.min_gain.is_finite() || self.min_gain < 0.0 || self.min_gain > 1.0 {
            return Err(LaminarError::ParameterOutOfRange {
                name: "min_gain",
                value: self.min_gain,
            });
        }
        if !self.max_gain.is_finite() || self.max_gain < 1.0 {
            return Err(LaminarError::ParameterOutOfRange {
                name: "max_gain",
                value: self.max_gain,
            });
        }
        for &w in self.layer_weights.values() {
            if !w.is_finite() || w < 0.0 {
                return Err(LaminarError::ParameterOutOfRange {
                    name: "layer_weight",
                    value: w,
                });
            }
        }
        Ok(())
    }
}

/// Stateless modulator over validated parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GainModulator {
    params: GainParams,
}

impl GainModulator {
    pub fn new(params: GainParams) -> LaminarResult<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    #[inline]
    pub fn params(&self) -> &GainParams {
        &self.params
    }

    /// Modulation scalar for a layer kind; unknown kinds are neutral
    #[inline]
    pub fn layer_weight(&self, kind: LayerKind) -> f64 {
        self.params.layer_weights.get(&kind).copied().unwrap_or(1.0)
    }

    /// Apply the gain field to a signal. Zero signal components remain
    /// exactly zero.
    pub fn apply(
        &self,
        signal: &[f64],
        field: &[f64],
        kind: LayerKind,
    ) -> LaminarResult<Vec<f64>> {
        if signal.len() != field.len() {
            return Err(LaminarError::DimensionMismatch {
                expected: signal.len(),
                actual: field.len(),
            });
        }
        let weight = self.layer_weight(kind);
        let strength = self.params.modulation_strength;
        Ok(signal
            .iter()
            .zip(field)
            .map(|(&s, &g)| {
                let gain =
                    (1.0 + g * strength * weight).clamp(self.params.min_gain, self.params.max_gain);
                s * gain
            })
            .collect())
    }
}
