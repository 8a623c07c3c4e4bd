//! # 🧠 Circuit — Laminar Resonance Assembly
//!
//! Owns the layer and pathway arenas, the bipole network on L2/3, the
//! FuzzyART engine on the L5 readout, and the timescale coordinator. One
//! `process` call runs the resonance loop:
//!
//! ```text
//! input ─► L4 ─► L2/3 ◄─ bipole horizontal
//!            ▲     │  ◄─ L1 priming
//!   L6 ──────┘     ▼
//!    ▲            L5 ─► FuzzyART
//!    └── expectation ◄── resonant category
//! ```
//!
//! Resonance is reported only when the active category's match stays at or
//! above vigilance AND L2/3 and L6 are jointly above the stability floor
//! for `stability_steps` consecutive steps. L6's route into L4 is
//! AND-gated on present bottom-up activity (the matching rule).

use serde::{Deserialize, Serialize};

use art_bipole::{BipoleNetwork, BipoleParams};
use art_core::cycle::{CoordinatorParams, TimescaleCoordinator};
use art_core::{LayerId, LayerKind, PathwayKind};
use art_fuzzy::{ArtOutcome, FuzzyArt, FuzzyParams};

use crate::attention::{AttentionField, AttentionParams};
use crate::error::{LaminarError, LaminarResult};
use crate::gain::{GainModulator, GainParams};
use crate::layer::{LaminarLayer, Layer};
use crate::params::{GenericParams, L23Params, L4Params, L6Params, LayerParams};
use crate::pathway::LaminarPathway;

// Arena indices of the fixed laminar stack
const L1: LayerId = 0;
const L23: LayerId = 1;
const L4: LayerId = 2;
const L5: LayerId = 3;
const L6: LayerId = 4;

// Pathway arena indices
const P_L4_L23: usize = 0;
const P_L23_L5: usize = 1;
const P_L6_L4: usize = 2;
const P_L1_L23: usize = 3;

/// Circuit configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitParams {
    pub input_dim: usize,
    pub fuzzy: FuzzyParams,
    pub bipole: BipoleParams,
    pub coordinator: CoordinatorParams,
    pub gain: GainParams,
    /// Attention is optional; None runs the circuit unattended
    pub attention: Option<AttentionParams>,
    pub l1: GenericParams,
    pub l23: L23Params,
    pub l4: L4Params,
    pub l5: GenericParams,
    pub l6: L6Params,
    /// Hard cap on the resonance search loop
    pub max_search_iterations: usize,
    /// Settle iterations before the first category readout
    pub settle_iterations: usize,
    /// Consecutive agreeing steps required to report resonance
    pub stability_steps: usize,
    /// Bottom-up-present predicate on L4 mean activity (gates L6 → L4)
    pub activity_threshold: f64,
    /// Joint L2/3 and L6 mean-activity floor for stable resonance
    pub stability_floor: f64,
    /// Slow-cadence instar learning rate
    pub learning_rate: f64,
}

impl Default for CircuitParams {
    fn default() -> Self {
        Self {
            input_dim: 16,
            fuzzy: FuzzyParams::default(),
            bipole: BipoleParams::default(),
            coordinator: CoordinatorParams::default(),
            gain: GainParams::default(),
            attention: None,
            l1: GenericParams {
                tau: 30.0,
                ..Default::default()
            },
            l23: L23Params::default(),
            l4: L4Params::default(),
            l5: GenericParams {
                tau: 25.0,
                ..Default::default()
            },
            l6: L6Params::default(),
            max_search_iterations: 50,
            settle_iterations: 10,
            stability_steps: 3,
            activity_threshold: 0.05,
            stability_floor: 0.005,
            learning_rate: 0.05,
        }
    }
}

impl CircuitParams {
    pub fn validate(&self) -> LaminarResult<()> {
        if self.input_dim == 0 {
            return Err(LaminarError::ParameterOutOfRange {
                name: "input_dim",
                value: 0.0,
            });
        }
        if self.max_search_iterations == 0 {
            return Err(LaminarError::ParameterOutOfRange {
                name: "max_search_iterations",
                value: 0.0,
            });
        }
        if self.stability_steps == 0 {
            return Err(LaminarError::ParameterOutOfRange {
                name: "stability_steps",
                value: 0.0,
            });
        }
        if self.settle_iterations >= self.max_search_iterations {
            return Err(LaminarError::ParameterOutOfRange {
                name: "settle_iterations",
                value: self.settle_iterations as f64,
            });
        }
        for (name, v) in [
            ("activity_threshold", self.activity_threshold),
            ("stability_floor", self.stability_floor),
            ("learning_rate", self.learning_rate),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(LaminarError::ParameterOutOfRange { name, value: v });
            }
        }
        Ok(())
    }
}

/// Externally visible circuit state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CircuitState {
    pub is_resonating: bool,
    pub active_category: Option<usize>,
    pub match_score: f64,
    pub steps: u64,
}

/// Outcome of one `process` call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CircuitOutcome {
    /// Stable resonance: top-down expectation in input dimension
    Resonating {
        expectation: Vec<f64>,
        category: usize,
        match_score: f64,
    },
    /// Search exhausted; carries the last best (category, match) candidate
    NotConverged { best: Option<(usize, f64)> },
}

impl CircuitOutcome {
    pub fn expectation(&self) -> Option<&[f64]> {
        match self {
            CircuitOutcome::Resonating { expectation, .. } => Some(expectation),
            CircuitOutcome::NotConverged { .. } => None,
        }
    }
}

/// The laminar circuit. Layers and pathways live in arenas owned here;
/// cross-references are opaque indices, so `reset()` is a plain in-place
/// clear with no back-reference cycles.
#[derive(Debug)]
pub struct LaminarCircuit {
    params: CircuitParams,
    layers: Vec<LaminarLayer>,
    pathways: Vec<LaminarPathway>,
    bipole: BipoleNetwork,
    fuzzy: FuzzyArt,
    attention: Option<AttentionField>,
    gain: GainModulator,
    coordinator: TimescaleCoordinator,
    state: CircuitState,
    closed: bool,
}

impl LaminarCircuit {
    pub fn new(params: CircuitParams) -> LaminarResult<Self> {
        params.validate()?;
        let dim = params.input_dim;

        let layers = vec![
            LaminarLayer::new(L1, LayerKind::L1, dim, LayerParams::Generic(params.l1))?,
            LaminarLayer::new(L23, LayerKind::L23, dim, LayerParams::L23(params.l23))?,
            LaminarLayer::new(L4, LayerKind::L4, dim, LayerParams::L4(params.l4))?,
            LaminarLayer::new(L5, LayerKind::L5, dim, LayerParams::Generic(params.l5))?,
            LaminarLayer::new(L6, LayerKind::L6, dim, LayerParams::L6(params.l6))?,
        ];

        let pathways = vec![
            LaminarPathway::new(P_L4_L23, L4, L23, PathwayKind::BottomUp, dim, dim)?,
            LaminarPathway::new(P_L23_L5, L23, L5, PathwayKind::BottomUp, dim, dim)?,
            LaminarPathway::new(P_L6_L4, L6, L4, PathwayKind::TopDown, dim, dim)?,
            LaminarPathway::new(P_L1_L23, L1, L23, PathwayKind::TopDown, dim, dim)?,
        ];

        let bipole = BipoleNetwork::new(BipoleParams {
            n: dim,
            ..params.bipole
        })?;
        let fuzzy = FuzzyArt::new(params.fuzzy.clone())?;
        let attention = match &params.attention {
            Some(p) => Some(AttentionField::new(dim, 1, p.clone())?),
            None => None,
        };
        let gain = GainModulator::new(params.gain.clone())?;
        let coordinator = TimescaleCoordinator::new(params.coordinator)?;

        Ok(Self {
            params,
            layers,
            pathways,
            bipole,
            fuzzy,
            attention,
            gain,
            coordinator,
            state: CircuitState::default(),
            closed: false,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn params(&self) -> &CircuitParams {
        &self.params
    }

    #[inline]
    pub fn state(&self) -> &CircuitState {
        &self.state
    }

    #[inline]
    pub fn is_resonating(&self) -> bool {
        self.state.is_resonating
    }

    #[inline]
    pub fn category_count(&self) -> usize {
        self.fuzzy.category_count()
    }

    /// Total fast steps consumed by the internal coordinator
    #[inline]
    pub fn fast_steps(&self) -> u64 {
        self.coordinator.fast_steps()
    }

    /// Decoded top-down expectation of a learned category
    pub fn get_category_expectation(&self, index: usize) -> LaminarResult<Vec<f64>> {
        Ok(self.fuzzy.category_expectation(index)?)
    }

    /// Attention controller, when configured
    pub fn attention_mut(&mut self) -> Option<&mut AttentionField> {
        self.attention.as_mut()
    }

    /// Read a layer's current activation by arena kind
    pub fn layer_activation(&self, kind: LayerKind) -> LaminarResult<&[f64]> {
        let id = match kind {
            LayerKind::L1 => L1,
            LayerKind::L23 => L23,
            LayerKind::L4 => L4,
            LayerKind::L5 => L5,
            LayerKind::L6 => L6,
            LayerKind::Custom => return Err(LaminarError::UnknownLayer(usize::MAX)),
        };
        Ok(self.layers[id].activation())
    }

    fn mean(values: &[f64]) -> f64 {
        if values.is_empty() {
            0.0
        } else {
            values.iter().sum::<f64>() / values.len() as f64
        }
    }

    // =========================================================================
    // Resonance loop
    // =========================================================================

    /// Process one input pattern to stable resonance or search exhaustion.
    ///
    /// Within a step bottom-up precedes top-down, and every layer reads its
    /// peers' previous-step activations.
    pub fn process(&mut self, input: &[f64]) -> LaminarResult<CircuitOutcome> {
        if self.closed {
            return Err(LaminarError::ResourceClosed("circuit".into()));
        }
        if input.len() != self.params.input_dim {
            return Err(LaminarError::DimensionMismatch {
                expected: self.params.input_dim,
                actual: input.len(),
            });
        }

        let mut active: Option<usize> = None;
        let mut stable = 0usize;
        let mut last_candidate: Option<(usize, f64)> = None;

        for iteration in 0..self.params.max_search_iterations {
            let dt = self.coordinator.advance_fast_step();

            // Attention modulates the driving input multiplicatively
            let drive = match &mut self.attention {
                Some(att) => {
                    att.step_shift();
                    let field = att.deviation_field(input, input.len());
                    self.gain.apply(input, &field, LayerKind::L4)?
                }
                None => input.to_vec(),
            };

            // 1. L4 bottom-up with driving strength
            let l4_params = LayerParams::L4(self.params.l4);
            let l4_act = self.layers[L4].process_bottom_up(&drive, &l4_params)?;

            // ART matching rule: L6 reaches L4 only with concurrent
            // bottom-up support
            if Self::mean(&l4_act) >= self.params.activity_threshold {
                let l6_act = self.layers[L6].activation().to_vec();
                let routed = self.pathways[P_L6_L4].propagate(&l6_act, dt)?;
                self.layers[L4].process_top_down(&routed, &l4_params)?;
            }
            let l4_act = self.layers[L4].activation().to_vec();

            // 2. L2/3: L4 bottom-up, L1 priming, bipole horizontal grouping
            let l23_params = LayerParams::L23(self.params.l23);
            let routed = self.pathways[P_L4_L23].propagate(&l4_act, dt)?;
            self.layers[L23].process_bottom_up(&routed, &l23_params)?;

            let l1_act = self.layers[L1].activation().to_vec();
            let primed = self.pathways[P_L1_L23].propagate(&l1_act, dt)?;
            self.layers[L23].process_top_down(&primed, &l23_params)?;

            self.bipole
                .set_direct_inputs(self.layers[L23].activation())?;
            self.bipole.settle(dt);
            let horizontal = self.bipole.activations();
            let l23_act = self.layers[L23].process_lateral(&horizontal, &l23_params)?;

            // 3. L5 readout, contrast-normalized so category matching is
            // amplitude-invariant while the stack is still charging
            let l5_params = LayerParams::Generic(self.params.l5);
            let routed = self.pathways[P_L23_L5].propagate(&l23_act, dt)?;
            let l5_act = self.layers[L5].process_bottom_up(&routed, &l5_params)?;
            let peak = l5_act.iter().cloned().fold(0.0, f64::max);
            let readout: Vec<f64> = if peak > 1e-9 {
                l5_act.iter().map(|v| v / peak).collect()
            } else {
                l5_act.clone()
            };

            // Slow-cadence consolidation of layer weights
            if self.coordinator.should_update_slow_dynamics() {
                self.layers[L4].update_weights(&drive, self.params.learning_rate)?;
                self.layers[L23].update_weights(&l4_act, self.params.learning_rate)?;
            }

            // Let the stack settle before the first category readout
            if iteration < self.params.settle_iterations {
                continue;
            }

            // 4. Category readout: commit once, then track
            let outcome = match active {
                None => self.fuzzy.learn(&readout)?,
                Some(_) => self.fuzzy.predict(&readout)?,
            };

            match outcome {
                ArtOutcome::Resonance {
                    index, match_score, ..
                } => {
                    last_candidate = Some((index, match_score));

                    // 5. Top-down expectation into L1 (priming) and L6
                    // (modulation; gated into L4 on the next step)
                    let expectation = self.fuzzy.category_expectation(index)?;
                    let l1_params = LayerParams::Generic(self.params.l1);
                    self.layers[L1].process_top_down(&expectation, &l1_params)?;
                    let l6_params = LayerParams::L6(self.params.l6);
                    self.layers[L6].process_top_down(&expectation, &l6_params)?;

                    let same = active == Some(index);
                    active = Some(index);

                    let l23_mean = Self::mean(self.layers[L23].activation());
                    let l6_mean = Self::mean(self.layers[L6].activation());
                    let jointly_active = l23_mean > self.params.stability_floor
                        && l6_mean > self.params.stability_floor;

                    if (same || stable == 0)
                        && match_score >= self.fuzzy.params().rho
                        && jointly_active
                    {
                        stable += 1;
                    } else {
                        stable = 0;
                    }

                    if stable >= self.params.stability_steps {
                        self.state = CircuitState {
                            is_resonating: true,
                            active_category: Some(index),
                            match_score,
                            steps: self.coordinator.fast_steps(),
                        };
                        return Ok(CircuitOutcome::Resonating {
                            expectation,
                            category: index,
                            match_score,
                        });
                    }
                }
                ArtOutcome::NoMatch { best } => {
                    if let Some(candidate) = best {
                        last_candidate = Some(candidate);
                    }
                    active = None;
                    stable = 0;
                }
                ArtOutcome::CapacityExceeded => {
                    self.state = CircuitState {
                        is_resonating: false,
                        active_category: None,
                        match_score: last_candidate.map_or(0.0, |(_, m)| m),
                        steps: self.coordinator.fast_steps(),
                    };
                    return Ok(CircuitOutcome::NotConverged {
                        best: last_candidate,
                    });
                }
            }
        }

        self.state = CircuitState {
            is_resonating: false,
            active_category: last_candidate.map(|(i, _)| i),
            match_score: last_candidate.map_or(0.0, |(_, m)| m),
            steps: self.coordinator.fast_steps(),
        };
        Ok(CircuitOutcome::NotConverged {
            best: last_candidate,
        })
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Clear the dynamical state (layers, pathways, bipole, attention)
    /// between unrelated presentations while keeping learned categories
    pub fn clear_dynamics(&mut self) {
        for layer in self.layers.iter_mut() {
            layer.reset();
        }
        for pathway in self.pathways.iter_mut() {
            pathway.reset();
        }
        self.bipole.reset();
        if let Some(att) = self.attention.as_mut() {
            att.reset();
        }
        self.state = CircuitState::default();
    }

    /// Restore the whole assembly to construction-time state
    pub fn reset(&mut self) {
        for layer in self.layers.iter_mut() {
            layer.reset();
        }
        for pathway in self.pathways.iter_mut() {
            pathway.reset();
        }
        self.bipole.reset();
        self.fuzzy.clear();
        self.coordinator.reset();
        if let Some(att) = self.attention.as_mut() {
            att.reset();
        }
        self.state = CircuitState::default();
    }

    /// Close the circuit and every owned component
    pub fn close(&mut self) {
        for layer in self.layers.iter_mut() {
            layer.close();
        }
        for pathway in self.pathways.iter_mut() {
            pathway.close();
        }
        self.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl art_core::ArtComponent for LaminarCircuit {
    fn name(&self) -> &str {
        "laminar-circuit"
    }

    fn reset(&mut self) {
        LaminarCircuit::reset(self);
    }

    fn close(&mut self) {
        LaminarCircuit::close(self);
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}
