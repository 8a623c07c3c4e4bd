//! # Masking Field — Multi-Scale Competitive Chunking
//!
//! One shunting field per scale. Scale k prefers sequences of k+1 items;
//! cross-scale inhibition is strictly asymmetric — a larger scale k
//! inhibits a smaller scale j with factor `a^(k−j)`, a > 1 — so the
//! longest chunk consistent with the evidence masks its own sub-chunks.
//! Each step elects at most one winner per scale and emits chunk events.

use serde::{Deserialize, Serialize};

use art_core::state::{ShuntingField, ShuntingParams};

use crate::error::{TemporalError, TemporalResult};

/// Masking-field parameter block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaskingFieldParams {
    /// Number of scales S
    pub scales: usize,
    /// Cells per scale (must match the working-memory readout dimension)
    pub cells_per_scale: usize,
    /// Cross-scale asymmetry base a > 1
    pub asymmetry: f64,
    /// Inhibition strength applied through the asymmetry factor
    pub inhibition_strength: f64,
    /// Winner strength below this emits no chunk
    pub emission_threshold: f64,
    /// Per-scale shunting dynamics
    pub shunting: ShuntingParams,
}

impl Default for MaskingFieldParams {
    fn default() -> Self {
        Self {
            scales: 3,
            cells_per_scale: 8,
            asymmetry: 2.0,
            inhibition_strength: 0.5,
            emission_threshold: 0.1,
            shunting: ShuntingParams {
                tau: 10.0,
                ..Default::default()
            },
        }
    }
}

impl MaskingFieldParams {
    pub fn validate(&self) -> TemporalResult<()> {
        if self.scales == 0 {
            return Err(TemporalError::ParameterOutOfRange {
                name: "scales",
                value: 0.0,
            });
        }
        if self.cells_per_scale == 0 {
            return Err(TemporalError::ParameterOutOfRange {
                name: "cells_per_scale",
                value: 0.0,
            });
        }
        if !self.asymmetry.is_finite() || self.asymmetry <= 1.0 {
            return Err(TemporalError::ParameterOutOfRange {
                name: "asymmetry",
                value: self.asymmetry,
            });
        }
        for (name, v) in [
            ("inhibition_strength", self.inhibition_strength),
            ("emission_threshold", self.emission_threshold),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(TemporalError::ParameterOutOfRange { name, value: v });
            }
        }
        self.shunting.validate()?;
        Ok(())
    }
}

/// One elected chunk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkEvent {
    pub scale: usize,
    pub index: usize,
    pub strength: f64,
    pub time_ms: f64,
}

/// The multi-scale competitive layer.
///
/// # Example
///
/// ```
/// use art_temporal::{MaskingField, MaskingFieldParams};
///
/// let mut field = MaskingField::new(MaskingFieldParams::default()).unwrap();
/// let input = vec![0.9, 0.8, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
/// for _ in 0..50 {
///     field.step(&input, 1.0).unwrap();
/// }
/// assert!(!field.step(&input, 1.0).unwrap().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaskingField {
    params: MaskingFieldParams,
    fields: Vec<ShuntingField>,
    time_ms: f64,
}

impl MaskingField {
    pub fn new(params: MaskingFieldParams) -> TemporalResult<Self> {
        params.validate()?;
        let fields = (0..params.scales)
            .map(|_| ShuntingField::new(params.cells_per_scale, params.shunting))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            params,
            fields,
            time_ms: 0.0,
        })
    }

    #[inline]
    pub fn params(&self) -> &MaskingFieldParams {
        &self.params
    }

    #[inline]
    pub fn scales(&self) -> usize {
        self.fields.len()
    }

    /// Activation vector of one scale
    pub fn scale_activation(&self, scale: usize) -> TemporalResult<&[f64]> {
        self.fields
            .get(scale)
            .map(|f| f.activations())
            .ok_or(TemporalError::ItemOutOfRange {
                index: scale,
                stored: self.fields.len(),
            })
    }

    /// One chunking step: scale-local shunting under chunk-size-preference
    /// input, asymmetric cross-scale inhibition, winner election per scale.
    pub fn step(&mut self, input: &[f64], dt: f64) -> TemporalResult<Vec<ChunkEvent>> {
        if input.len() != self.params.cells_per_scale {
            return Err(TemporalError::DimensionMismatch {
                expected: self.params.cells_per_scale,
                actual: input.len(),
            });
        }

        let mass: f64 = input.iter().sum();

        // Mean activity per scale from the previous step (read-only pass)
        let scale_activity: Vec<f64> = self
            .fields
            .iter()
            .map(|f| {
                let acts = f.activations();
                acts.iter().sum::<f64>() / acts.len() as f64
            })
            .collect();

        for (j, field) in self.fields.iter_mut().enumerate() {
            let preference = self.params.scale_preference_of(j, mass);
            let excitatory: Vec<f64> = input.iter().map(|&v| preference * v).collect();

            // Strictly asymmetric: only larger scales k > j inhibit scale j
            let mut inhibition = 0.0;
            for (k, &activity) in scale_activity.iter().enumerate().skip(j + 1) {
                inhibition += self.params.inhibition_strength
                    * self.params.asymmetry.powi((k - j) as i32)
                    * activity;
            }
            let inhibitory = vec![inhibition; input.len()];

            field.set_excitatory(&excitatory)?;
            field.set_inhibitory(&inhibitory)?;
            field.evolve(dt)?;
        }
        self.time_ms += dt;

        // Winner election: at most one chunk per scale
        let mut events = Vec::new();
        for (scale, field) in self.fields.iter().enumerate() {
            let mut index = 0;
            let mut strength = f64::NEG_INFINITY;
            for (i, &v) in field.activations().iter().enumerate() {
                if v > strength {
                    strength = v;
                    index = i;
                }
            }
            if strength > self.params.emission_threshold {
                events.push(ChunkEvent {
                    scale,
                    index,
                    strength,
                    time_ms: self.time_ms,
                });
            }
        }
        Ok(events)
    }

    /// Back to rest
    pub fn reset(&mut self) {
        for field in self.fields.iter_mut() {
            field.reset();
        }
        self.time_ms = 0.0;
    }
}

impl MaskingFieldParams {
    /// Preference of scale k for the evidence mass in the input: a
    /// Gaussian around the scale's preferred item count k+1
    pub fn scale_preference_of(&self, scale: usize, input_mass: f64) -> f64 {
        let preferred = (scale + 1) as f64;
        (-(input_mass - preferred).powi(2) / 2.0).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> MaskingField {
        MaskingField::new(MaskingFieldParams::default()).unwrap()
    }

    #[test]
    fn test_invalid_params_fatal() {
        let bad = MaskingFieldParams {
            asymmetry: 1.0,
            ..Default::default()
        };
        assert!(MaskingField::new(bad).is_err());
        let bad = MaskingFieldParams {
            scales: 0,
            ..Default::default()
        };
        assert!(MaskingField::new(bad).is_err());
    }

    #[test]
    fn test_small_mass_favors_small_scale() {
        let mut mf = field();
        // Mass ≈ 1: scale 0 (preferred count 1) should dominate
        let input = [0.9, 0.1, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        for _ in 0..100 {
            mf.step(&input, 1.0).unwrap();
        }
        let s0: f64 = mf.scale_activation(0).unwrap().iter().sum();
        let s2: f64 = mf.scale_activation(2).unwrap().iter().sum();
        assert!(s0 > s2, "scale0 {s0} should beat scale2 {s2}");
    }

    #[test]
    fn test_large_mass_favors_large_scale() {
        let mut mf = field();
        // Mass = 3: the largest scale (preferred count 3) should dominate
        let input = [1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        for _ in 0..100 {
            mf.step(&input, 1.0).unwrap();
        }
        let s0: f64 = mf.scale_activation(0).unwrap().iter().sum();
        let s2: f64 = mf.scale_activation(2).unwrap().iter().sum();
        assert!(s2 > s0, "scale2 {s2} should beat scale0 {s0}");
    }

    #[test]
    fn test_at_most_one_winner_per_scale() {
        let mut mf = field();
        let input = [0.9, 0.8, 0.7, 0.0, 0.0, 0.0, 0.0, 0.0];
        for _ in 0..50 {
            let events = mf.step(&input, 1.0).unwrap();
            let mut seen = std::collections::HashSet::new();
            for event in &events {
                assert!(seen.insert(event.scale), "two winners on one scale");
            }
        }
    }

    #[test]
    fn test_winner_is_strongest_cell() {
        let mut mf = field();
        let input = [0.2, 0.9, 0.1, 0.0, 0.0, 0.0, 0.0, 0.0];
        let mut last = Vec::new();
        for _ in 0..100 {
            last = mf.step(&input, 1.0).unwrap();
        }
        assert!(!last.is_empty());
        for event in &last {
            assert_eq!(event.index, 1);
            assert!(event.strength > 0.1);
        }
    }

    #[test]
    fn test_larger_scale_masks_smaller() {
        // Drive with mass between the preferences; with inhibition on, the
        // small scale ends lower than it would alone
        let input = [0.7, 0.7, 0.7, 0.0, 0.0, 0.0, 0.0, 0.0];

        let mut inhibited = field();
        for _ in 0..100 {
            inhibited.step(&input, 1.0).unwrap();
        }

        let mut free = MaskingField::new(MaskingFieldParams {
            inhibition_strength: 0.0,
            ..Default::default()
        })
        .unwrap();
        for _ in 0..100 {
            free.step(&input, 1.0).unwrap();
        }

        let masked: f64 = inhibited.scale_activation(0).unwrap().iter().sum();
        let unmasked: f64 = free.scale_activation(0).unwrap().iter().sum();
        assert!(masked < unmasked, "masked {masked} vs unmasked {unmasked}");
    }

    #[test]
    fn test_dimension_mismatch_fatal() {
        let mut mf = field();
        assert!(matches!(
            mf.step(&[0.5; 4], 1.0),
            Err(TemporalError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_reset_behaves_as_fresh() {
        let mut mf = field();
        let input = [0.9; 8];
        for _ in 0..20 {
            mf.step(&input, 1.0).unwrap();
        }
        mf.reset();
        for scale in 0..mf.scales() {
            assert!(mf
                .scale_activation(scale)
                .unwrap()
                .iter()
                .all(|&x| x == 0.0));
        }
    }
}
