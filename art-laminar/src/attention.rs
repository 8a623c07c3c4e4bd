//! # Attention — Spatial, Feature, and Object Gain Fields
//!
//! Three independent mechanisms composed multiplicatively:
//!
//! ```text
//! spatial   g(x,y) = exp(−d²/(2σ²))          around the attended point
//! feature   1 + α·cos(feat, attended)         capped at max_feature_gain
//! object    1 + β·cos(pattern, template)      capped at max_object_gain
//! combined  (1 + spatial·(feature − 1)) · object
//! ```
//!
//! The attended point shifts toward its target at `shift_speed` grid units
//! per step. With nothing attended every mechanism returns 1 (neutral).

use serde::{Deserialize, Serialize};

use art_core::state::cosine;

use crate::error::{LaminarError, LaminarResult};

/// Attention parameter block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttentionParams {
    pub spatial_sigma: f64,
    pub feature_alpha: f64,
    pub object_beta: f64,
    pub max_feature_gain: f64,
    pub max_object_gain: f64,
    /// Focus shift per step, in grid units
    pub shift_speed: f64,
}

impl Default for AttentionParams {
    fn default() -> Self {
        Self {
            spatial_sigma: 2.0,
            feature_alpha: 0.5,
            object_beta: 0.5,
            max_feature_gain: 2.0,
            max_object_gain: 2.0,
            shift_speed: 0.5,
        }
    }
}

impl AttentionParams {
    pub fn validate(&self) -> LaminarResult<()> {
        if !self.spatial_sigma.is_finite() || self.spatial_sigma <= 0.0 {
            return Err(LaminarError::ParameterOutOfRange {
                name: "spatial_sigma",
                value: self.spatial_sigma,
            });
        }
        for (name, v) in [
            ("feature_alpha", self.feature_alpha),
            ("object_beta", self.object_beta),
            ("shift_speed", self.shift_speed),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(LaminarError::ParameterOutOfRange { name, value: v });
            }
        }
        for (name, v) in [
            ("max_feature_gain", self.max_feature_gain),
            ("max_object_gain", self.max_object_gain),
        ] {
            if !v.is_finite() || v < 1.0 {
                return Err(LaminarError::ParameterOutOfRange { name, value: v });
            }
        }
        Ok(())
    }
}

/// Attention state over a layer's 2D grid (units mapped row-major)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttentionField {
    params: AttentionParams,
    width: usize,
    height: usize,
    focus: Option<(f64, f64)>,
    target: Option<(f64, f64)>,
    attended_feature: Option<Vec<f64>>,
    object_template: Option<Vec<f64>>,
}

impl AttentionField {
    pub fn new(width: usize, height: usize, params: AttentionParams) -> LaminarResult<Self> {
        params.validate()?;
        if width == 0 || height == 0 {
            return Err(LaminarError::ParameterOutOfRange {
                name: "grid",
                value: 0.0,
            });
        }
        Ok(Self {
            params,
            width,
            height,
            focus: None,
            target: None,
            attended_feature: None,
            object_template: None,
        })
    }

    #[inline]
    pub fn params(&self) -> &AttentionParams {
        &self.params
    }

    #[inline]
    pub fn grid(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    #[inline]
    pub fn focus(&self) -> Option<(f64, f64)> {
        self.focus
    }

    // =========================================================================
    // Attending
    // =========================================================================

    /// Snap attention to a point immediately
    pub fn attend_point(&mut self, x: f64, y: f64) {
        self.focus = Some((x, y));
        self.target = Some((x, y));
    }

    /// Set a shift target; the focus moves there at `shift_speed` per step
    pub fn shift_to(&mut self, x: f64, y: f64) {
        self.target = Some((x, y));
        if self.focus.is_none() {
            self.focus = Some((x, y));
        }
    }

    /// Advance the focus one step toward its target
    pub fn step_shift(&mut self) {
        let (Some((fx, fy)), Some((tx, ty))) = (self.focus, self.target) else {
            return;
        };
        let dx = tx - fx;
        let dy = ty - fy;
        let dist = (dx * dx + dy * dy).sqrt();
        if dist <= self.params.shift_speed {
            self.focus = Some((tx, ty));
        } else {
            let scale = self.params.shift_speed / dist;
            self.focus = Some((fx + dx * scale, fy + dy * scale));
        }
    }

    pub fn attend_feature(&mut self, feature: Vec<f64>) {
        self.attended_feature = Some(feature);
    }

    pub fn attend_object(&mut self, template: Vec<f64>) {
        self.object_template = Some(template);
    }

    /// Drop all attended targets; every gain returns to neutral
    pub fn clear_attention(&mut self) {
        self.focus = None;
        self.target = None;
        self.attended_feature = None;
        self.object_template = None;
    }

    // =========================================================================
    // Gains
    // =========================================================================

    /// Gaussian spatial gain at a grid point; 1.0 with no attended point
    pub fn spatial_gain(&self, x: f64, y: f64) -> f64 {
        match self.focus {
            Some((fx, fy)) => {
                let d2 = (x - fx).powi(2) + (y - fy).powi(2);
                (-d2 / (2.0 * self.params.spatial_sigma.powi(2))).exp()
            }
            None => 1.0,
        }
    }

    /// `1 + α·cos(feat, attended)`, capped; 1.0 with no attended feature
    pub fn feature_gain(&self, pattern: &[f64]) -> f64 {
        match &self.attended_feature {
            Some(feature) if feature.len() == pattern.len() => {
                let gain = 1.0 + self.params.feature_alpha * cosine(pattern, feature);
                gain.clamp(0.0, self.params.max_feature_gain)
            }
            _ => 1.0,
        }
    }

    /// `1 + β·cos(pattern, template)`, capped; 1.0 with no template
    pub fn object_gain(&self, pattern: &[f64]) -> f64 {
        match &self.object_template {
            Some(template) if template.len() == pattern.len() => {
                let gain = 1.0 + self.params.object_beta * cosine(pattern, template);
                gain.clamp(0.0, self.params.max_object_gain)
            }
            _ => 1.0,
        }
    }

    /// Combined gain field over a row-major layer of `size` units,
    /// expressed as deviations from neutral (0 = no change):
    /// `(1 + spatial·(feature − 1)) · object − 1`
    pub fn deviation_field(&self, pattern: &[f64], size: usize) -> Vec<f64> {
        let feature = self.feature_gain(pattern);
        let object = self.object_gain(pattern);
        (0..size)
            .map(|i| {
                let x = (i % self.width) as f64;
                let y = (i / self.width) as f64;
                let spatial = match self.focus {
                    Some(_) => self.spatial_gain(x, y),
                    None => 0.0, // neutral spatial contribution
                };
                (1.0 + spatial * (feature - 1.0)) * object - 1.0
            })
            .collect()
    }

    pub fn reset(&mut self) {
        self.clear_attention();
    }
}
