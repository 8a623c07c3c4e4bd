//! Closed-loop timing: the multi-timescale coordinator that schedules every
//! fast/medium/slow update in the stack.

mod coordinator;

pub use coordinator::{CoordinatorParams, TimescaleCoordinator};
