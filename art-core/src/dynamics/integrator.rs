//! # Integrators — Fixed-Step ODE Steppers
//!
//! Explicit Euler (default) and classical RK4 over flat slices. Both
//! steppers take the derivative as a closure `f(x, dx)` writing into a
//! caller-visible buffer, so the same field code drives either one.
//!
//! On the reference shunting problem the two must agree to 1e-3 after
//! 100 steps; the integration tests in `state::shunting` pin that down.

use serde::{Deserialize, Serialize};

/// Integrator selection, carried inside parameter blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IntegratorKind {
    /// Explicit Euler
    #[default]
    Euler,
    /// Classical fourth-order Runge-Kutta
    Rk4,
}

/// One explicit-Euler step: `x ← x + dt·f(x)`
pub fn euler_step<F>(x: &mut [f64], dt: f64, deriv: F)
where
    F: Fn(&[f64], &mut [f64]),
{
    let mut dx = vec![0.0; x.len()];
    deriv(x, &mut dx);
    for (xi, di) in x.iter_mut().zip(&dx) {
        *xi += dt * di;
    }
}

/// One classical RK4 step
pub fn rk4_step<F>(x: &mut [f64], dt: f64, deriv: F)
where
    F: Fn(&[f64], &mut [f64]),
{
    let n = x.len();
    let mut k1 = vec![0.0; n];
    let mut k2 = vec![0.0; n];
    let mut k3 = vec![0.0; n];
    let mut k4 = vec![0.0; n];
    let mut probe = vec![0.0; n];

    deriv(x, &mut k1);

    for i in 0..n {
        probe[i] = x[i] + 0.5 * dt * k1[i];
    }
    deriv(&probe, &mut k2);

    for i in 0..n {
        probe[i] = x[i] + 0.5 * dt * k2[i];
    }
    deriv(&probe, &mut k3);

    for i in 0..n {
        probe[i] = x[i] + dt * k3[i];
    }
    deriv(&probe, &mut k4);

    for i in 0..n {
        x[i] += dt / 6.0 * (k1[i] + 2.0 * k2[i] + 2.0 * k3[i] + k4[i]);
    }
}

/// Dispatch one step on the selected integrator
pub fn step<F>(kind: IntegratorKind, x: &mut [f64], dt: f64, deriv: F)
where
    F: Fn(&[f64], &mut [f64]),
{
    match kind {
        IntegratorKind::Euler => euler_step(x, dt, deriv),
        IntegratorKind::Rk4 => rk4_step(x, dt, deriv),
    }
}
