//! # Bipole Cell — Three-Way Firing Logic
//!
//! A bipole cell fires when direct input is strong, when both horizontal
//! branches agree, or when weak direct input is backed by one branch. The
//! OR of these conditions is what completes boundaries across gaps.

use serde::{Deserialize, Serialize};

use crate::error::{BipoleError, BipoleResult};

/// Fixed lower bilateral threshold, distinct from the unilateral
/// threshold `theta_h`
pub const THETA_BILATERAL: f64 = 0.1;

/// Bipole parameter block.
///
/// Thresholds live in [0, 1]; distances in cell-position units; `tau` in
/// milliseconds. Violations are fatal at construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BipoleParams {
    /// Network size
    pub n: usize,
    /// Strong direct-input threshold
    pub theta_strong: f64,
    /// Weak direct-input threshold
    pub theta_weak: f64,
    /// Unilateral horizontal threshold
    pub theta_h: f64,
    /// Horizontal connection radius
    pub r_max: f64,
    /// Distance decay constant
    pub sigma_d: f64,
    /// Peak connection weight
    pub w_max: f64,
    /// Gate connection weights on orientation difference
    pub orientation_selectivity: bool,
    /// Orientation tuning width (radians)
    pub sigma_theta: f64,
    /// Cell time constant (ms)
    pub tau: f64,
    /// Enable the propagation firing condition (off by default)
    pub propagation_mode: bool,
}

impl Default for BipoleParams {
    fn default() -> Self {
        Self {
            n: 32,
            theta_strong: 0.8,
            theta_weak: 0.3,
            theta_h: 0.5,
            r_max: 15.0,
            sigma_d: 5.0,
            w_max: 1.0,
            orientation_selectivity: false,
            sigma_theta: 0.4,
            tau: 10.0,
            propagation_mode: false,
        }
    }
}

impl BipoleParams {
    pub fn validate(&self) -> BipoleResult<()> {
        if self.n == 0 {
            return Err(BipoleError::ParameterOutOfRange {
                name: "n",
                value: 0.0,
            });
        }
        for (name, v) in [
            ("theta_strong", self.theta_strong),
            ("theta_weak", self.theta_weak),
            ("theta_h", self.theta_h),
        ] {
            if !v.is_finite() || !(0.0..=1.0).contains(&v) {
                return Err(BipoleError::ParameterOutOfRange { name, value: v });
            }
        }
        for (name, v) in [
            ("r_max", self.r_max),
            ("sigma_d", self.sigma_d),
            ("sigma_theta", self.sigma_theta),
            ("tau", self.tau),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(BipoleError::ParameterOutOfRange { name, value: v });
            }
        }
        if !self.w_max.is_finite() || self.w_max < 0.0 {
            return Err(BipoleError::ParameterOutOfRange {
                name: "w_max",
                value: self.w_max,
            });
        }
        Ok(())
    }
}

/// Which branch of the OR-logic fired on the last step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FiringCondition {
    /// D > θ_strong
    StrongDirect,
    /// H_L > θ_bi and H_R > θ_bi
    BilateralHorizontal,
    /// D > θ_weak and one branch above θ_h
    WeakDirectUnilateral,
    /// Propagation mode: summed branches above 0.5·θ_h with none of the above
    Propagation,
}

/// One bipole cell: position on the 1D lattice, orientation preference
/// (radians mod π), activation, and its three input channels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BipoleCell {
    position: usize,
    orientation: f64,
    x: f64,
    direct: f64,
    h_left: f64,
    h_right: f64,
    propagation_mode: bool,
    last_firing: Option<FiringCondition>,
}

impl BipoleCell {
    pub fn new(position: usize) -> Self {
        Self {
            position,
            orientation: 0.0,
            x: 0.0,
            direct: 0.0,
            h_left: 0.0,
            h_right: 0.0,
            propagation_mode: false,
            last_firing: None,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    #[inline]
    pub fn orientation(&self) -> f64 {
        self.orientation
    }

    #[inline]
    pub fn activation(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn direct_input(&self) -> f64 {
        self.direct
    }

    #[inline]
    pub fn horizontal_inputs(&self) -> (f64, f64) {
        (self.h_left, self.h_right)
    }

    /// Which condition fired on the most recent step, if any
    #[inline]
    pub fn last_firing(&self) -> Option<FiringCondition> {
        self.last_firing
    }

    // =========================================================================
    // Inputs
    // =========================================================================

    /// Orientation is stored mod π
    pub fn set_orientation(&mut self, theta: f64) {
        let pi = std::f64::consts::PI;
        self.orientation = theta.rem_euclid(pi);
    }

    pub fn set_direct(&mut self, d: f64) {
        self.direct = d.clamp(0.0, 1.0);
    }

    pub fn set_horizontal(&mut self, h_left: f64, h_right: f64) {
        self.h_left = h_left.max(0.0);
        self.h_right = h_right.max(0.0);
    }

    pub fn set_propagation_mode(&mut self, on: bool) {
        self.propagation_mode = on;
    }

    pub fn set_activation(&mut self, x: f64) {
        self.x = x.clamp(0.0, 1.0);
    }

    // =========================================================================
    // Firing logic
    // =========================================================================

    /// Evaluate the three-way OR-logic at the current inputs.
    ///
    /// The target is the max over contributing branches; the reported
    /// condition is the branch that supplied the max.
    pub fn compute_target(&self, p: &BipoleParams) -> Option<(f64, FiringCondition)> {
        let mut best: Option<(f64, FiringCondition)> = None;
        let mut consider = |target: f64, cond: FiringCondition| {
            if best.is_none_or(|(t, _)| target > t) {
                best = Some((target, cond));
            }
        };

        if self.direct > p.theta_strong {
            consider(self.direct, FiringCondition::StrongDirect);
        }
        if self.h_left > THETA_BILATERAL && self.h_right > THETA_BILATERAL {
            consider(
                (0.8 * (self.h_left + self.h_right)).min(1.0),
                FiringCondition::BilateralHorizontal,
            );
        }
        if self.direct > p.theta_weak && (self.h_left > p.theta_h || self.h_right > p.theta_h) {
            consider(
                (self.direct + self.h_left.max(self.h_right)) / 2.0,
                FiringCondition::WeakDirectUnilateral,
            );
        }
        if best.is_none()
            && self.propagation_mode
            && (self.h_left + self.h_right) > 0.5 * p.theta_h
        {
            best = Some((
                0.6 * (self.h_left + self.h_right),
                FiringCondition::Propagation,
            ));
        }
        best
    }

    /// One temporal step toward the firing target, or slow decay.
    ///
    /// Rise: `x ← x + (dt/τ)·(target − x)`. Decay: `x ← x·(1 − dt/(2τ))` —
    /// decay is exactly twice as slow as rise (boundary hysteresis
    /// contract). Clamped to [0, 1].
    pub fn step(&mut self, dt: f64, p: &BipoleParams) {
        match self.compute_target(p) {
            Some((target, cond)) => {
                self.x += (dt / p.tau) * (target - self.x);
                self.last_firing = Some(cond);
            }
            None => {
                self.x *= 1.0 - dt / (2.0 * p.tau);
                self.last_firing = None;
            }
        }
        self.x = self.x.clamp(0.0, 1.0);
    }

    /// Back to rest, inputs cleared
    pub fn reset(&mut self) {
        self.x = 0.0;
        self.direct = 0.0;
        self.h_left = 0.0;
        self.h_right = 0.0;
        self.last_firing = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> BipoleParams {
        BipoleParams::default()
    }

    #[test]
    fn test_strong_direct_fires() {
        let mut cell = BipoleCell::new(0);
        cell.set_direct(0.9);
        let (target, cond) = cell.compute_target(&params()).unwrap();
        assert_eq!(cond, FiringCondition::StrongDirect);
        assert_eq!(target, 0.9);
    }

    #[test]
    fn test_bilateral_fires_without_direct() {
        let mut cell = BipoleCell::new(0);
        cell.set_horizontal(0.4, 0.3);
        let (target, cond) = cell.compute_target(&params()).unwrap();
        assert_eq!(cond, FiringCondition::BilateralHorizontal);
        assert!((target - 0.8 * 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_bilateral_target_saturates_at_one() {
        let mut cell = BipoleCell::new(0);
        cell.set_horizontal(0.9, 0.9);
        let (target, _) = cell.compute_target(&params()).unwrap();
        assert_eq!(target, 1.0);
    }

    #[test]
    fn test_unilateral_alone_does_not_fire() {
        let mut cell = BipoleCell::new(0);
        cell.set_horizontal(0.9, 0.0);
        assert!(cell.compute_target(&params()).is_none());
    }

    #[test]
    fn test_weak_direct_plus_unilateral_fires() {
        let mut cell = BipoleCell::new(0);
        cell.set_direct(0.4);
        cell.set_horizontal(0.7, 0.0);
        let (target, cond) = cell.compute_target(&params()).unwrap();
        assert_eq!(cond, FiringCondition::WeakDirectUnilateral);
        assert!((target - (0.4 + 0.7) / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_weak_direct_without_support_does_not_fire() {
        let mut cell = BipoleCell::new(0);
        cell.set_direct(0.4);
        assert!(cell.compute_target(&params()).is_none());
    }

    #[test]
    fn test_propagation_only_when_enabled_and_nothing_else_fired() {
        let p = params();
        let mut cell = BipoleCell::new(0);
        cell.set_horizontal(0.2, 0.09);
        assert!(cell.compute_target(&p).is_none());

        cell.set_propagation_mode(true);
        let (target, cond) = cell.compute_target(&p).unwrap();
        assert_eq!(cond, FiringCondition::Propagation);
        assert!((target - 0.6 * 0.29).abs() < 1e-12);
    }

    #[test]
    fn test_decay_is_twice_as_slow_as_rise() {
        let p = params();
        let mut rising = BipoleCell::new(0);
        rising.set_direct(0.9);
        rising.step(1.0, &p);
        let rise_delta = rising.activation();

        let mut decaying = BipoleCell::new(0);
        decaying.set_activation(rise_delta);
        decaying.step(1.0, &p);
        let decay_delta = rise_delta - decaying.activation();

        // rise moved dt/tau of the gap, decay dt/(2 tau) of the level
        assert!((rise_delta - 0.09).abs() < 1e-12);
        assert!((decay_delta - rise_delta * 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_last_firing_tracks_branch() {
        let p = params();
        let mut cell = BipoleCell::new(0);
        cell.set_direct(0.9);
        cell.step(1.0, &p);
        assert_eq!(cell.last_firing(), Some(FiringCondition::StrongDirect));
        cell.set_direct(0.0);
        cell.step(1.0, &p);
        assert_eq!(cell.last_firing(), None);
    }

    #[test]
    fn test_orientation_stored_mod_pi() {
        let pi = std::f64::consts::PI;
        let mut cell = BipoleCell::new(0);
        cell.set_orientation(pi + 0.3);
        assert!((cell.orientation() - 0.3).abs() < 1e-12);
        cell.set_orientation(-0.3);
        assert!((cell.orientation() - (pi - 0.3)).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_params_rejected() {
        let mut p = params();
        p.theta_strong = 1.5;
        assert!(p.validate().is_err());
        let mut p = params();
        p.sigma_d = 0.0;
        assert!(p.validate().is_err());
        let mut p = params();
        p.n = 0;
        assert!(p.validate().is_err());
    }
}
