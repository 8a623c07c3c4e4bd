//! # Laminar Layers — Tagged Variants over One Shunting Core
//!
//! A layer is a kind tag plus a shunting field; layer-specific behavior is
//! a match on the tag, not an inheritance hierarchy. Every `process_*`
//! operation returns a bounded activation vector of the layer's size.
//!
//! Specializations:
//! - **L4** drives: multiplicative driving strength, soft saturation,
//!   minimal lateral inhibition, top-down capped at 10%
//! - **L2/3** groups: combines L4 bottom-up, L1 priming, and bipole
//!   horizontal input; optional complex-cell pooling
//! - **L6** modulates: on-center/off-surround profile; its output may not
//!   fire downstream without concurrent bottom-up (the circuit gates it)
//! - **L1/L5** carry apical feedback and readout on the plain core

use serde::{Deserialize, Serialize};

use art_core::state::ShuntingField;
use art_core::{LayerId, LayerKind};

use crate::error::{LaminarError, LaminarResult};
use crate::params::LayerParams;

/// The uniform layer interface consumed by the circuit assembly.
///
/// A mismatched parameter variant is coerced to the layer kind's defaults;
/// dimension mismatch and operating on a closed layer are fatal.
pub trait Layer {
    fn id(&self) -> LayerId;
    fn size(&self) -> usize;
    fn layer_type(&self) -> LayerKind;
    fn activation(&self) -> &[f64];
    fn set_activation(&mut self, pattern: &[f64]) -> LaminarResult<()>;
    fn process_bottom_up(
        &mut self,
        input: &[f64],
        params: &LayerParams,
    ) -> LaminarResult<Vec<f64>>;
    fn process_top_down(
        &mut self,
        expectation: &[f64],
        params: &LayerParams,
    ) -> LaminarResult<Vec<f64>>;
    fn process_lateral(
        &mut self,
        lateral: &[f64],
        params: &LayerParams,
    ) -> LaminarResult<Vec<f64>>;
    fn update_weights(&mut self, input: &[f64], learning_rate: f64) -> LaminarResult<()>;
    fn reset(&mut self);
    fn close(&mut self);
    fn is_closed(&self) -> bool;
}

/// Concrete laminar layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaminarLayer {
    id: LayerId,
    kind: LayerKind,
    size: usize,
    shunting: ShuntingField,
    /// Construction-time parameter block (already resolved for the kind)
    params: LayerParams,
    /// Per-unit instar weights
    weights: Vec<f64>,
    closed: bool,
}

impl LaminarLayer {
    /// Build a layer; a wrong parameter variant is coerced to the kind's
    /// defaults, range violations are fatal
    pub fn new(
        id: LayerId,
        kind: LayerKind,
        size: usize,
        params: LayerParams,
    ) -> LaminarResult<Self> {
        let params = params.resolve_for(kind)?;
        let shunting = ShuntingField::new(size, params.base().to_shunting())?;
        Ok(Self {
            id,
            kind,
            size,
            shunting,
            params,
            weights: vec![0.0; size],
            closed: false,
        })
    }

    /// Construction-time parameters
    pub fn params(&self) -> &LayerParams {
        &self.params
    }

    /// Learned instar weights
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    fn guard(&self, input_len: usize) -> LaminarResult<()> {
        if self.closed {
            return Err(LaminarError::ResourceClosed(format!(
                "layer {} ({})",
                self.id, self.kind
            )));
        }
        if input_len != self.size {
            return Err(LaminarError::DimensionMismatch {
                expected: self.size,
                actual: input_len,
            });
        }
        Ok(())
    }

    /// Resolve per-call parameters against this layer's kind
    fn resolve(&self, params: &LayerParams) -> LaminarResult<LayerParams> {
        params.resolve_for(self.kind)
    }

    /// Soft saturation `B·v/(1 + v)` for positive v
    fn saturate(v: f64, ceiling: f64) -> f64 {
        if v > 0.0 {
            ceiling * v / (1.0 + v)
        } else {
            0.0
        }
    }

    /// Drive the shunting core with an excitatory/inhibitory pair and
    /// return the bounded activation
    fn drive(
        &mut self,
        excitatory: &[f64],
        inhibitory: &[f64],
        dt: f64,
    ) -> LaminarResult<Vec<f64>> {
        self.shunting.set_excitatory(excitatory)?;
        self.shunting.set_inhibitory(inhibitory)?;
        self.shunting.evolve(dt)?;
        Ok(self.shunting.activations().to_vec())
    }

    /// Uniform lateral inhibition from mean drive
    fn uniform_inhibition(excitatory: &[f64], weight: f64) -> Vec<f64> {
        let mean = if excitatory.is_empty() {
            0.0
        } else {
            excitatory.iter().sum::<f64>() / excitatory.len() as f64
        };
        vec![weight * mean; excitatory.len()]
    }

    /// Complex-cell pooling: units above threshold take the max of their
    /// immediate neighborhood
    fn pool(activation: &mut [f64], threshold: f64) {
        let snapshot = activation.to_vec();
        for i in 0..snapshot.len() {
            if snapshot[i] > threshold {
                let lo = i.saturating_sub(1);
                let hi = (i + 1).min(snapshot.len() - 1);
                activation[i] = snapshot[lo..=hi].iter().cloned().fold(0.0, f64::max);
            }
        }
    }
}

impl Layer for LaminarLayer {
    fn id(&self) -> LayerId {
        self.id
    }

    fn size(&self) -> usize {
        self.size
    }

    fn layer_type(&self) -> LayerKind {
        self.kind
    }

    fn activation(&self) -> &[f64] {
        self.shunting.activations()
    }

    fn set_activation(&mut self, pattern: &[f64]) -> LaminarResult<()> {
        self.guard(pattern.len())?;
        self.shunting.set_activations(pattern)?;
        Ok(())
    }

    fn process_bottom_up(
        &mut self,
        input: &[f64],
        params: &LayerParams,
    ) -> LaminarResult<Vec<f64>> {
        self.guard(input.len())?;
        let params = self.resolve(params)?;
        let base = *params.base();
        let dt = base.dt;

        match params {
            LayerParams::L4(p) => {
                let excitatory: Vec<f64> = input
                    .iter()
                    .map(|&v| Self::saturate(p.driving_strength * v, base.ceiling))
                    .collect();
                let inhibitory =
                    Self::uniform_inhibition(&excitatory, base.lateral_inhibition);
                self.drive(&excitatory, &inhibitory, dt)
            }
            LayerParams::L23(p) => {
                let current = self.shunting.activations().to_vec();
                let excitatory: Vec<f64> = input
                    .iter()
                    .zip(&current)
                    .map(|(&v, &x)| p.bottom_up_weight * v + base.self_excitation * x)
                    .collect();
                let inhibitory =
                    Self::uniform_inhibition(&excitatory, base.lateral_inhibition);
                self.drive(&excitatory, &inhibitory, dt)
            }
            LayerParams::L6(p) => {
                let total: f64 = input.iter().sum();
                let n = input.len().max(2) as f64;
                let excitatory: Vec<f64> =
                    input.iter().map(|&v| p.on_center * v).collect();
                let inhibitory: Vec<f64> = input
                    .iter()
                    .map(|&v| p.off_surround * (total - v) / (n - 1.0))
                    .collect();
                self.drive(&excitatory, &inhibitory, dt)
            }
            LayerParams::Generic(_) => {
                let current = self.shunting.activations().to_vec();
                let excitatory: Vec<f64> = input
                    .iter()
                    .zip(&current)
                    .map(|(&v, &x)| v + base.self_excitation * x)
                    .collect();
                let inhibitory =
                    Self::uniform_inhibition(&excitatory, base.lateral_inhibition);
                self.drive(&excitatory, &inhibitory, dt)
            }
        }
    }

    fn process_top_down(
        &mut self,
        expectation: &[f64],
        params: &LayerParams,
    ) -> LaminarResult<Vec<f64>> {
        self.guard(expectation.len())?;
        let params = self.resolve(params)?;
        let base = *params.base();
        let dt = base.dt;

        match params {
            // Top-down into the driving layer is weak by contract
            LayerParams::L4(p) => {
                let excitatory: Vec<f64> =
                    expectation.iter().map(|&v| p.top_down_cap * v).collect();
                let inhibitory = vec![0.0; expectation.len()];
                self.drive(&excitatory, &inhibitory, dt)
            }
            LayerParams::L23(p) => {
                let excitatory: Vec<f64> =
                    expectation.iter().map(|&v| p.top_down_weight * v).collect();
                let inhibitory = vec![0.0; expectation.len()];
                self.drive(&excitatory, &inhibitory, dt)
            }
            // The expectation reaches L6 through its on-center/off-surround
            // profile; downstream gating is the circuit's responsibility
            LayerParams::L6(p) => {
                let total: f64 = expectation.iter().sum();
                let n = expectation.len().max(2) as f64;
                let excitatory: Vec<f64> =
                    expectation.iter().map(|&v| p.on_center * v).collect();
                let inhibitory: Vec<f64> = expectation
                    .iter()
                    .map(|&v| p.off_surround * (total - v) / (n - 1.0))
                    .collect();
                self.drive(&excitatory, &inhibitory, dt)
            }
            LayerParams::Generic(_) => {
                let inhibitory = vec![0.0; expectation.len()];
                self.drive(expectation, &inhibitory, dt)
            }
        }
    }

    fn process_lateral(
        &mut self,
        lateral: &[f64],
        params: &LayerParams,
    ) -> LaminarResult<Vec<f64>> {
        self.guard(lateral.len())?;
        let params = self.resolve(params)?;
        let base = *params.base();
        let dt = base.dt;

        match params {
            LayerParams::L23(p) => {
                let excitatory: Vec<f64> =
                    lateral.iter().map(|&v| p.horizontal_weight * v).collect();
                let inhibitory =
                    Self::uniform_inhibition(&excitatory, base.lateral_inhibition);
                let mut activation = self.drive(&excitatory, &inhibitory, dt)?;
                if let Some(threshold) = p.pooling_threshold {
                    Self::pool(&mut activation, threshold);
                    self.shunting.set_activations(&activation)?;
                }
                Ok(activation)
            }
            _ => {
                let inhibitory =
                    Self::uniform_inhibition(lateral, base.lateral_inhibition);
                self.drive(lateral, &inhibitory, dt)
            }
        }
    }

    fn update_weights(&mut self, input: &[f64], learning_rate: f64) -> LaminarResult<()> {
        self.guard(input.len())?;
        if !learning_rate.is_finite() || learning_rate < 0.0 {
            return Err(LaminarError::ParameterOutOfRange {
                name: "learning_rate",
                value: learning_rate,
            });
        }
        // Instar rule: weights track the input where the layer is active
        let activation = self.shunting.activations().to_vec();
        for ((w, &x), &v) in self.weights.iter_mut().zip(&activation).zip(input) {
            *w += learning_rate * x * (v - *w);
        }
        Ok(())
    }

    fn reset(&mut self) {
        self.shunting.reset();
        self.weights.iter_mut().for_each(|w| *w = 0.0);
    }

    fn close(&mut self) {
        self.closed = true;
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}

impl art_core::ArtComponent for LaminarLayer {
    fn name(&self) -> &str {
        self.kind.label()
    }

    fn reset(&mut self) {
        Layer::reset(self);
    }

    fn close(&mut self) {
        Layer::close(self);
    }

    fn is_closed(&self) -> bool {
        Layer::is_closed(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{GenericParams, L23Params, L4Params, L6Params};

    fn layer(kind: LayerKind, size: usize) -> LaminarLayer {
        LaminarLayer::new(0, kind, size, LayerParams::defaults_for(kind)).unwrap()
    }

    #[test]
    fn test_output_dimension_and_bounds() {
        let mut l4 = layer(LayerKind::L4, 6);
        let params = LayerParams::defaults_for(LayerKind::L4);
        let out = l4
            .process_bottom_up(&[0.9, 0.0, 0.5, 1.0, 0.2, 0.7], &params)
            .unwrap();
        assert_eq!(out.len(), 6);
        assert!(out.iter().all(|&x| (0.0..=1.0).contains(&x)));
    }

    #[test]
    fn test_dimension_mismatch_fatal() {
        let mut l4 = layer(LayerKind::L4, 4);
        let params = LayerParams::defaults_for(LayerKind::L4);
        assert!(matches!(
            l4.process_bottom_up(&[0.5; 3], &params),
            Err(LaminarError::DimensionMismatch { expected: 4, actual: 3 })
        ));
    }

    #[test]
    fn test_closed_layer_fatal() {
        let mut l5 = layer(LayerKind::L5, 3);
        l5.close();
        assert!(l5.is_closed());
        let params = LayerParams::defaults_for(LayerKind::L5);
        assert!(matches!(
            l5.process_bottom_up(&[0.5; 3], &params),
            Err(LaminarError::ResourceClosed(_))
        ));
        assert!(l5.set_activation(&[0.1; 3]).is_err());
    }

    #[test]
    fn test_l4_driving_amplifies_weak_input() {
        let mut strong = layer(LayerKind::L4, 4);
        let mut weak_params = L4Params::default();
        weak_params.driving_strength = 0.5;
        let mut weak =
            LaminarLayer::new(1, LayerKind::L4, 4, LayerParams::L4(weak_params)).unwrap();

        let input = [0.4, 0.4, 0.4, 0.4];
        for _ in 0..100 {
            strong
                .process_bottom_up(&input, &LayerParams::defaults_for(LayerKind::L4))
                .unwrap();
            weak.process_bottom_up(&input, &LayerParams::L4(weak_params))
                .unwrap();
        }
        assert!(strong.activation()[0] > weak.activation()[0]);
    }

    #[test]
    fn test_l4_top_down_is_weak() {
        let params = LayerParams::defaults_for(LayerKind::L4);
        let mut driven = layer(LayerKind::L4, 4);
        let mut primed = layer(LayerKind::L4, 4);
        let pattern = [1.0, 1.0, 1.0, 1.0];
        for _ in 0..200 {
            driven.process_bottom_up(&pattern, &params).unwrap();
            primed.process_top_down(&pattern, &params).unwrap();
        }
        // Top-down alone saturates far below the driven response
        assert!(primed.activation()[0] < 0.15);
        assert!(driven.activation()[0] > 0.3);
    }

    #[test]
    fn test_l23_combines_three_streams() {
        let params = LayerParams::defaults_for(LayerKind::L23);
        let mut l23 = layer(LayerKind::L23, 4);
        l23.process_bottom_up(&[0.8, 0.8, 0.0, 0.0], &params).unwrap();
        l23.process_top_down(&[0.0, 0.5, 0.5, 0.0], &params).unwrap();
        let out = l23.process_lateral(&[0.0, 0.0, 0.6, 0.6], &params).unwrap();
        // Unit 0: bottom-up only; unit 3: lateral only; unit 1 strongest
        assert!(out[0] > 0.0);
        assert!(out[3] > 0.0);
        assert!(out[1] >= out[3]);
    }

    #[test]
    fn test_l23_pooling_spreads_peaks() {
        let mut p = L23Params::default();
        p.pooling_threshold = Some(0.01);
        let params = LayerParams::L23(p);
        let mut l23 = LaminarLayer::new(0, LayerKind::L23, 5, params).unwrap();
        l23.set_activation(&[0.0, 0.9, 0.05, 0.0, 0.0]).unwrap();
        let out = l23.process_lateral(&[0.0; 5], &params).unwrap();
        // The sub-peak unit next to the peak pools up toward it
        assert!(out[2] >= out[3]);
    }

    #[test]
    fn test_l6_off_surround_raises_relative_contrast() {
        let input = [0.2, 0.2, 0.9, 0.2, 0.2];
        let contrast = |off_surround: f64| {
            let mut p = L6Params::default();
            p.off_surround = off_surround;
            let params = LayerParams::L6(p);
            let mut l6 = LaminarLayer::new(0, LayerKind::L6, 5, params).unwrap();
            for _ in 0..100 {
                l6.process_top_down(&input, &params).unwrap();
            }
            l6.activation()[2] / l6.activation()[0].max(1e-9)
        };
        assert!(contrast(0.3) > contrast(0.0));
    }

    #[test]
    fn test_wrong_variant_coerced_per_call() {
        let mut l23 = layer(LayerKind::L23, 3);
        // Handing L4 params to an L2/3 layer falls back to L2/3 defaults
        let wrong = LayerParams::L4(L4Params::default());
        let out = l23.process_bottom_up(&[0.5, 0.5, 0.5], &wrong).unwrap();
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn test_instar_weights_track_input() {
        let params = LayerParams::Generic(GenericParams::default());
        let mut l5 = LaminarLayer::new(0, LayerKind::L5, 3, params).unwrap();
        let input = [0.9, 0.1, 0.5];
        for _ in 0..50 {
            l5.process_bottom_up(&input, &params).unwrap();
            l5.update_weights(&input, 0.2).unwrap();
        }
        // Weights converge toward the input where the layer is active
        assert!((l5.weights()[0] - 0.9).abs() < 0.1);
        assert!(l5.weights()[0] > l5.weights()[1]);
    }

    #[test]
    fn test_reset_behaves_as_fresh() {
        let params = LayerParams::defaults_for(LayerKind::L4);
        let mut l4 = layer(LayerKind::L4, 3);
        l4.process_bottom_up(&[0.9; 3], &params).unwrap();
        l4.update_weights(&[0.9; 3], 0.5).unwrap();
        l4.reset();
        assert!(l4.activation().iter().all(|&x| x == 0.0));
        assert!(l4.weights().iter().all(|&w| w == 0.0));
    }

    #[test]
    fn test_l6_params_validated() {
        let mut p = L6Params::default();
        p.off_surround = -0.1;
        assert!(LaminarLayer::new(0, LayerKind::L6, 3, LayerParams::L6(p)).is_err());
    }
}
