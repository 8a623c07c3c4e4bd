//! # 🎯 Traits — Shared Abstractions of the ART Stack
//!
//! Identifiers, layer/pathway kinds, and the base component trait that every
//! crate in the workspace builds on.
//!
//! | Group | Crate | Types |
//! |:------|:------|:------|
//! | Substrate | `art-core` | [`LayerKind`], [`PathwayKind`], [`ArtComponent`] |
//! | Grouping | `art-bipole` | bipole cells over the substrate |
//! | Categories | `art-fuzzy` | resonant category engine |
//! | Circuit | `art-laminar` | laminar layers implementing the uniform interface |
//!
//! ## Design principle
//!
//! > *"Kind in the core, behavior in the module."*
//!
//! The enums here are pure tags. Layer-specific behavior is a match on the
//! tag inside `art-laminar` — there is no inheritance hierarchy.

use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════════════
// COMMON TYPES
// ═══════════════════════════════════════════════════════════════════════════════

/// Opaque index of a layer inside its owning circuit arena
pub type LayerId = usize;

/// Opaque index of a pathway inside its owning circuit arena
pub type PathwayId = usize;

/// Logical timestamp in fast-step units
pub type StepStamp = u64;

/// Laminar layer variants.
///
/// Time-constant ranges are part of the contract of each variant and are
/// enforced at parameter construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerKind {
    /// Apical feedback target
    L1,
    /// Horizontal grouping layer
    L23,
    /// Driving input layer
    L4,
    /// Motor/readout layer
    L5,
    /// Modulatory layer — may not fire downstream without bottom-up support
    L6,
    /// Caller-defined dynamics
    Custom,
}

impl LayerKind {
    /// Admissible time-constant range in milliseconds
    pub const fn tau_range_ms(&self) -> (f64, f64) {
        match self {
            LayerKind::L4 => (10.0, 50.0),
            LayerKind::L23 => (30.0, 150.0),
            LayerKind::L6 => (100.0, 500.0),
            LayerKind::L1 | LayerKind::L5 | LayerKind::Custom => (1.0, 1000.0),
        }
    }

    /// Short display label
    pub const fn label(&self) -> &'static str {
        match self {
            LayerKind::L1 => "L1",
            LayerKind::L23 => "L2/3",
            LayerKind::L4 => "L4",
            LayerKind::L5 => "L5",
            LayerKind::L6 => "L6",
            LayerKind::Custom => "custom",
        }
    }

    /// True for the variant whose output is modulatory-only
    pub const fn is_modulatory(&self) -> bool {
        matches!(self, LayerKind::L6)
    }
}

impl std::fmt::Display for LayerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Pathway variants between layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathwayKind {
    BottomUp,
    TopDown,
    Lateral,
}

impl std::fmt::Display for PathwayKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PathwayKind::BottomUp => "bottom-up",
            PathwayKind::TopDown => "top-down",
            PathwayKind::Lateral => "lateral",
        };
        write!(f, "{s}")
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// BASE COMPONENT
// ═══════════════════════════════════════════════════════════════════════════════

/// Base trait for every stateful ART component.
///
/// `reset()` restores construction-time state; calling into a component
/// after `close()` is a fatal `ResourceClosed` error in the owning crate.
pub trait ArtComponent {
    /// Component name for diagnostics
    fn name(&self) -> &str;

    /// Restore construction-time state
    fn reset(&mut self);

    /// Mark the component closed; subsequent operations must fail
    fn close(&mut self);

    /// True once closed
    fn is_closed(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tau_ranges_follow_layer_contract() {
        assert_eq!(LayerKind::L4.tau_range_ms(), (10.0, 50.0));
        assert_eq!(LayerKind::L23.tau_range_ms(), (30.0, 150.0));
        assert_eq!(LayerKind::L6.tau_range_ms(), (100.0, 500.0));
    }

    #[test]
    fn test_only_l6_is_modulatory() {
        assert!(LayerKind::L6.is_modulatory());
        assert!(!LayerKind::L4.is_modulatory());
        assert!(!LayerKind::L23.is_modulatory());
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(LayerKind::L23.label(), "L2/3");
        assert_eq!(PathwayKind::TopDown.to_string(), "top-down");
    }
}
