//! # Layer Parameters — Tagged Variants with Enforced Ranges
//!
//! Each laminar layer kind carries its own parameter variant. Time-constant
//! ranges are part of the layer contract (L4 10–50 ms, L2/3 30–150 ms,
//! L6 100–500 ms) and are fatal when violated. A wrong variant handed to a
//! layer is coerced to that kind's defaults from the static preset table.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use art_core::dynamics::IntegratorKind;
use art_core::state::ShuntingParams;
use art_core::LayerKind;

use crate::error::{LaminarError, LaminarResult};

/// Shunting-core parameters shared by every layer kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenericParams {
    /// Time constant (ms); range enforced per layer kind
    pub tau: f64,
    /// Excitatory ceiling B
    pub ceiling: f64,
    /// Inhibitory floor offset C (reachable floor is −C)
    pub floor_offset: f64,
    /// Passive decay A
    pub decay: f64,
    /// Recurrent self-excitation weight
    pub self_excitation: f64,
    /// Uniform lateral inhibition weight
    pub lateral_inhibition: f64,
    /// Integration step (ms)
    pub dt: f64,
    pub integrator: IntegratorKind,
}

impl Default for GenericParams {
    fn default() -> Self {
        Self {
            tau: 20.0,
            ceiling: 1.0,
            floor_offset: 0.0,
            decay: 1.0,
            self_excitation: 0.1,
            lateral_inhibition: 0.2,
            dt: 1.0,
            integrator: IntegratorKind::Euler,
        }
    }
}

impl GenericParams {
    /// Shunting-core view of this block
    pub fn to_shunting(&self) -> ShuntingParams {
        ShuntingParams {
            a: self.decay,
            b: self.ceiling,
            c: self.floor_offset,
            tau: self.tau,
            dt: self.dt,
            integrator: self.integrator,
        }
    }

    fn validate_for(&self, kind: LayerKind) -> LaminarResult<()> {
        let (lo, hi) = kind.tau_range_ms();
        if !self.tau.is_finite() || self.tau < lo || self.tau > hi {
            return Err(LaminarError::ParameterOutOfRange {
                name: "tau",
                value: self.tau,
            });
        }
        for (name, v) in [
            ("self_excitation", self.self_excitation),
            ("lateral_inhibition", self.lateral_inhibition),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(LaminarError::ParameterOutOfRange { name, value: v });
            }
        }
        self.to_shunting().validate()?;
        Ok(())
    }
}

/// L4: fast driving layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct L4Params {
    pub base: GenericParams,
    /// Multiplicative driving strength on bottom-up input
    pub driving_strength: f64,
    /// Cap on top-down modulation (contract: ≤ 0.10)
    pub top_down_cap: f64,
}

impl Default for L4Params {
    fn default() -> Self {
        Self {
            base: GenericParams {
                tau: 20.0,
                lateral_inhibition: 0.05,
                ..Default::default()
            },
            driving_strength: 2.0,
            top_down_cap: 0.1,
        }
    }
}

/// L2/3: medium-speed grouping layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct L23Params {
    pub base: GenericParams,
    pub bottom_up_weight: f64,
    /// L1 priming weight
    pub top_down_weight: f64,
    /// Bipole horizontal grouping weight
    pub horizontal_weight: f64,
    /// Complex-cell pooling threshold; None disables pooling
    pub pooling_threshold: Option<f64>,
}

impl Default for L23Params {
    fn default() -> Self {
        Self {
            base: GenericParams {
                tau: 60.0,
                ..Default::default()
            },
            bottom_up_weight: 1.0,
            top_down_weight: 0.3,
            horizontal_weight: 0.5,
            pooling_threshold: None,
        }
    }
}

/// L6: slow modulatory layer with on-center/off-surround profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct L6Params {
    pub base: GenericParams,
    pub on_center: f64,
    pub off_surround: f64,
    /// Downstream gating threshold on concurrent bottom-up activity
    pub modulation_threshold: f64,
}

impl Default for L6Params {
    fn default() -> Self {
        Self {
            base: GenericParams {
                tau: 200.0,
                // The modulatory layer integrates on the medium cadence
                dt: 10.0,
                ..Default::default()
            },
            on_center: 1.0,
            off_surround: 0.3,
            modulation_threshold: 0.05,
        }
    }
}

/// Tagged parameter variant — the layer dispatches on its own kind and
/// coerces a mismatched variant to the kind's defaults
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LayerParams {
    L4(L4Params),
    L23(L23Params),
    L6(L6Params),
    Generic(GenericParams),
}

static PRESETS: Lazy<HashMap<LayerKind, LayerParams>> = Lazy::new(|| {
    let mut presets = HashMap::new();
    presets.insert(LayerKind::L4, LayerParams::L4(L4Params::default()));
    presets.insert(LayerKind::L23, LayerParams::L23(L23Params::default()));
    presets.insert(LayerKind::L6, LayerParams::L6(L6Params::default()));
    presets.insert(
        LayerKind::L1,
        LayerParams::Generic(GenericParams {
            tau: 30.0,
            ..Default::default()
        }),
    );
    presets.insert(
        LayerKind::L5,
        LayerParams::Generic(GenericParams {
            tau: 25.0,
            ..Default::default()
        }),
    );
    presets.insert(
        LayerKind::Custom,
        LayerParams::Generic(GenericParams::default()),
    );
    presets
});

impl LayerParams {
    /// Default preset for a layer kind
    pub fn defaults_for(kind: LayerKind) -> LayerParams {
        *PRESETS
            .get(&kind)
            .unwrap_or(&LayerParams::Generic(GenericParams::default()))
    }

    /// True when the variant matches the layer kind
    pub fn matches(&self, kind: LayerKind) -> bool {
        matches!(
            (self, kind),
            (LayerParams::L4(_), LayerKind::L4)
                | (LayerParams::L23(_), LayerKind::L23)
                | (LayerParams::L6(_), LayerKind::L6)
                | (
                    LayerParams::Generic(_),
                    LayerKind::L1 | LayerKind::L5 | LayerKind::Custom
                )
        )
    }

    /// Coerce to the kind's defaults when the variant is wrong, then
    /// validate ranges (fatal)
    pub fn resolve_for(self, kind: LayerKind) -> LaminarResult<LayerParams> {
        let resolved = if self.matches(kind) {
            self
        } else {
            LayerParams::defaults_for(kind)
        };
        resolved.base().validate_for(kind)?;
        resolved.validate_specific()?;
        Ok(resolved)
    }

    /// The shared shunting-core block
    pub fn base(&self) -> &GenericParams {
        match self {
            LayerParams::L4(p) => &p.base,
            LayerParams::L23(p) => &p.base,
            LayerParams::L6(p) => &p.base,
            LayerParams::Generic(p) => p,
        }
    }

    fn validate_specific(&self) -> LaminarResult<()> {
        match self {
            LayerParams::L4(p) => {
                if !p.driving_strength.is_finite() || p.driving_strength < 0.0 {
                    return Err(LaminarError::ParameterOutOfRange {
                        name: "driving_strength",
                        value: p.driving_strength,
                    });
                }
                if !p.top_down_cap.is_finite() || !(0.0..=0.1).contains(&p.top_down_cap) {
                    return Err(LaminarError::ParameterOutOfRange {
                        name: "top_down_cap",
                        value: p.top_down_cap,
                    });
                }
            }
            LayerParams::L23(p) => {
                for (name, v) in [
                    ("bottom_up_weight", p.bottom_up_weight),
                    ("top_down_weight", p.top_down_weight),
                    ("horizontal_weight", p.horizontal_weight),
                ] {
                    if !v.is_finite() || v < 0.0 {
                        return Err(LaminarError::ParameterOutOfRange { name, value: v });
                    }
                }
            }
            LayerParams::L6(p) => {
                for (name, v) in [
                    ("on_center", p.on_center),
                    ("off_surround", p.off_surround),
                    ("modulation_threshold", p.modulation_threshold),
                ] {
                    if !v.is_finite() || v < 0.0 {
                        return Err(LaminarError::ParameterOutOfRange { name, value: v });
                    }
                }
            }
            LayerParams::Generic(_) => {}
        }
        Ok(())
    }
}
