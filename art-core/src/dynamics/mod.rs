//! Fixed-step integration machinery shared by every continuous-time field.

pub mod integrator;

pub use integrator::{euler_step, rk4_step, step, IntegratorKind};
