//! # Pathways — Shunting-Gated Connections between Layers
//!
//! A pathway routes a signal from a source layer to a target layer with a
//! scalar gain, an optional adaptive weight matrix, an optional habituative
//! transmitter pool, and an optional shunting field for temporal
//! integration. Pathways are owned by the circuit arena and referenced by
//! opaque indices.

use serde::{Deserialize, Serialize};

use art_core::state::{ShuntingField, ShuntingParams, TransmitterParams, TransmitterPool};
use art_core::{LayerId, PathwayId, PathwayKind};

use crate::error::{LaminarError, LaminarResult};

/// Connection between two layers.
///
/// # Example
///
/// ```
/// use art_core::PathwayKind;
/// use art_laminar::LaminarPathway;
///
/// let mut path = LaminarPathway::new(0, 1, 2, PathwayKind::BottomUp, 4, 4).unwrap();
/// path.set_gain(2.0).unwrap();
/// let out = path.propagate(&[0.1, 0.2, 0.3, 0.4], 1.0).unwrap();
/// assert_eq!(out, vec![0.2, 0.4, 0.6, 0.8]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaminarPathway {
    id: PathwayId,
    source: LayerId,
    target: LayerId,
    kind: PathwayKind,
    source_dim: usize,
    target_dim: usize,
    gain: f64,
    /// Row-major target_dim × source_dim matrix; None is the identity route
    weights: Option<Vec<f64>>,
    transmitter: Option<TransmitterPool>,
    shunting: Option<ShuntingField>,
    closed: bool,
}

impl LaminarPathway {
    /// Identity pathway with unit gain. A weightless pathway requires
    /// matching dimensions.
    pub fn new(
        id: PathwayId,
        source: LayerId,
        target: LayerId,
        kind: PathwayKind,
        source_dim: usize,
        target_dim: usize,
    ) -> LaminarResult<Self> {
        if source_dim == 0 || target_dim == 0 {
            return Err(LaminarError::ParameterOutOfRange {
                name: "dim",
                value: 0.0,
            });
        }
        Ok(Self {
            id,
            source,
            target,
            kind,
            source_dim,
            target_dim,
            gain: 1.0,
            weights: None,
            transmitter: None,
            shunting: None,
            closed: false,
        })
    }

    /// Attach an adaptive weight matrix, initialized uniform
    pub fn with_weights(mut self, initial: f64) -> Self {
        self.weights = Some(vec![initial; self.target_dim * self.source_dim]);
        self
    }

    /// Attach a habituative transmitter pool on the target side
    pub fn with_transmitter(mut self, params: TransmitterParams) -> LaminarResult<Self> {
        self.transmitter = Some(TransmitterPool::new(self.target_dim, params)?);
        Ok(self)
    }

    /// Attach a shunting field for temporal integration of the routed signal
    pub fn with_shunting(mut self, params: ShuntingParams) -> LaminarResult<Self> {
        self.shunting = Some(ShuntingField::new(self.target_dim, params)?);
        Ok(self)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn id(&self) -> PathwayId {
        self.id
    }

    #[inline]
    pub fn source_id(&self) -> LayerId {
        self.source
    }

    #[inline]
    pub fn target_id(&self) -> LayerId {
        self.target
    }

    #[inline]
    pub fn pathway_type(&self) -> PathwayKind {
        self.kind
    }

    #[inline]
    pub fn gain(&self) -> f64 {
        self.gain
    }

    pub fn set_gain(&mut self, gain: f64) -> LaminarResult<()> {
        if !gain.is_finite() || gain < 0.0 {
            return Err(LaminarError::ParameterOutOfRange {
                name: "gain",
                value: gain,
            });
        }
        self.gain = gain;
        Ok(())
    }

    #[inline]
    pub fn is_adaptive(&self) -> bool {
        self.weights.is_some()
    }

    /// Current transmitter depletion, 0.0 when no pool is attached
    pub fn depletion(&self) -> f64 {
        self.transmitter.as_ref().map_or(0.0, |t| t.depletion())
    }

    fn guard(&self, input_len: usize) -> LaminarResult<()> {
        if self.closed {
            return Err(LaminarError::ResourceClosed(format!("pathway {}", self.id)));
        }
        if input_len != self.source_dim {
            return Err(LaminarError::DimensionMismatch {
                expected: self.source_dim,
                actual: input_len,
            });
        }
        Ok(())
    }

    // =========================================================================
    // Propagation
    // =========================================================================

    /// Route one signal: weights (or identity) × gain × transmitter gating,
    /// then optional shunting integration over `dt` milliseconds.
    ///
    /// Driving the pathway habituates its transmitter pool.
    pub fn propagate(&mut self, signal: &[f64], dt: f64) -> LaminarResult<Vec<f64>> {
        self.guard(signal.len())?;

        let mut routed = match &self.weights {
            Some(w) => {
                let mut out = vec![0.0; self.target_dim];
                for (t, out_t) in out.iter_mut().enumerate() {
                    let row = &w[t * self.source_dim..(t + 1) * self.source_dim];
                    *out_t = row.iter().zip(signal).map(|(wi, si)| wi * si).sum();
                }
                out
            }
            None => {
                if self.target_dim != self.source_dim {
                    return Err(LaminarError::DimensionMismatch {
                        expected: self.target_dim,
                        actual: self.source_dim,
                    });
                }
                signal.to_vec()
            }
        };

        for v in routed.iter_mut() {
            *v *= self.gain;
        }

        if let Some(pool) = self.transmitter.as_mut() {
            let gated = pool.gate(&routed)?;
            pool.evolve(&routed, dt)?;
            routed = gated;
        }

        if let Some(field) = self.shunting.as_mut() {
            field.set_excitatory(&routed)?;
            field.evolve(dt)?;
            routed = field.activations().to_vec();
        }

        Ok(routed)
    }

    /// Outer-product instar update of the adaptive matrix:
    /// `w[t][s] += η · tgt[t] · (src[s] − w[t][s])`
    pub fn update_weights(
        &mut self,
        source_activation: &[f64],
        target_activation: &[f64],
        learning_rate: f64,
    ) -> LaminarResult<()> {
        self.guard(source_activation.len())?;
        if target_activation.len() != self.target_dim {
            return Err(LaminarError::DimensionMismatch {
                expected: self.target_dim,
                actual: target_activation.len(),
            });
        }
        if !learning_rate.is_finite() || learning_rate < 0.0 {
            return Err(LaminarError::ParameterOutOfRange {
                name: "learning_rate",
                value: learning_rate,
            });
        }
        let source_dim = self.source_dim;
        if let Some(w) = self.weights.as_mut() {
            for (t, &y) in target_activation.iter().enumerate() {
                let row = &mut w[t * source_dim..(t + 1) * source_dim];
                for (wi, &x) in row.iter_mut().zip(source_activation) {
                    *wi += learning_rate * y * (x - *wi);
                }
            }
        }
        Ok(())
    }

    /// Restore construction-time state (weights revert to their initial
    /// uniform value only via the circuit rebuilding; here state fields
    /// recover and the gain is kept)
    pub fn reset(&mut self) {
        if let Some(pool) = self.transmitter.as_mut() {
            pool.reset();
        }
        if let Some(field) = self.shunting.as_mut() {
            field.reset();
        }
    }

    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_route_applies_gain() {
        let mut path =
            LaminarPathway::new(0, 0, 1, PathwayKind::BottomUp, 3, 3).unwrap();
        path.set_gain(0.5).unwrap();
        let out = path.propagate(&[0.2, 0.4, 0.8], 1.0).unwrap();
        assert_eq!(out, vec![0.1, 0.2, 0.4]);
    }

    #[test]
    fn test_weighted_route_projects_dimensions() {
        let mut path = LaminarPathway::new(0, 0, 1, PathwayKind::BottomUp, 2, 3)
            .unwrap()
            .with_weights(1.0);
        let out = path.propagate(&[0.3, 0.5], 1.0).unwrap();
        assert_eq!(out.len(), 3);
        for v in out {
            assert!((v - 0.8).abs() < 1e-12);
        }
    }

    #[test]
    fn test_identity_route_requires_matching_dims() {
        let mut path =
            LaminarPathway::new(0, 0, 1, PathwayKind::BottomUp, 2, 3).unwrap();
        assert!(path.propagate(&[0.3, 0.5], 1.0).is_err());
    }

    #[test]
    fn test_transmitter_habituates_repeated_signal() {
        let mut path = LaminarPathway::new(0, 0, 1, PathwayKind::BottomUp, 2, 2)
            .unwrap()
            .with_transmitter(TransmitterParams::default())
            .unwrap();
        let first = path.propagate(&[1.0, 0.0], 1.0).unwrap();
        for _ in 0..100 {
            path.propagate(&[1.0, 0.0], 1.0).unwrap();
        }
        let late = path.propagate(&[1.0, 0.0], 1.0).unwrap();
        assert!(late[0] < first[0]);
        assert!(path.depletion() > 0.0);
        // Silent channel keeps full resources
        assert_eq!(late[1], 0.0);
    }

    #[test]
    fn test_shunting_integration_smooths_signal() {
        let mut path = LaminarPathway::new(0, 0, 1, PathwayKind::TopDown, 2, 2)
            .unwrap()
            .with_shunting(ShuntingParams::default())
            .unwrap();
        let first = path.propagate(&[1.0, 1.0], 1.0).unwrap();
        assert!(first[0] < 1.0); // integrates toward, not jumps to, the drive
        let mut last = first[0];
        for _ in 0..50 {
            last = path.propagate(&[1.0, 1.0], 1.0).unwrap()[0];
        }
        assert!(last > first[0]);
    }

    #[test]
    fn test_instar_matrix_learns_association() {
        let mut path = LaminarPathway::new(0, 0, 1, PathwayKind::BottomUp, 2, 2)
            .unwrap()
            .with_weights(0.0);
        assert!(path.is_adaptive());
        for _ in 0..200 {
            path.update_weights(&[1.0, 0.0], &[0.0, 1.0], 0.1).unwrap();
        }
        // Target unit 1 learned source unit 0
        let out = path.propagate(&[1.0, 0.0], 1.0).unwrap();
        assert!(out[1] > 0.8);
        assert!(out[0] < 1e-6);
    }

    #[test]
    fn test_closed_pathway_fatal() {
        let mut path =
            LaminarPathway::new(0, 0, 1, PathwayKind::Lateral, 2, 2).unwrap();
        path.close();
        assert!(matches!(
            path.propagate(&[0.1, 0.2], 1.0),
            Err(LaminarError::ResourceClosed(_))
        ));
    }

    #[test]
    fn test_negative_gain_rejected() {
        let mut path =
            LaminarPathway::new(0, 0, 1, PathwayKind::BottomUp, 2, 2).unwrap();
        assert!(path.set_gain(-1.0).is_err());
    }

    #[test]
    fn test_reset_recovers_state() {
        let mut path = LaminarPathway::new(0, 0, 1, PathwayKind::BottomUp, 1, 1)
            .unwrap()
            .with_transmitter(TransmitterParams::default())
            .unwrap();
        for _ in 0..100 {
            path.propagate(&[1.0], 1.0).unwrap();
        }
        assert!(path.depletion() > 0.0);
        path.reset();
        assert_eq!(path.depletion(), 0.0);
    }
}
