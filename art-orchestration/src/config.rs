//! JSON configuration surface for the orchestrator.
//!
//! Whole-stack configuration is one serde tree — circuit, temporal stack,
//! cadences, and the explicit overflow policy — so an experiment is fully
//! described by one file and reproducible from it.

use std::fs;
use std::path::Path;

use crate::error::{OrchestrationError, OrchestrationResult};
use crate::orchestrator::OrchestratorConfig;

/// Serialize a configuration as pretty JSON
pub fn to_json(config: &OrchestratorConfig) -> OrchestrationResult<String> {
    serde_json::to_string_pretty(config)
        .map_err(|e| OrchestrationError::ConfigMismatch(e.to_string()))
}

/// Parse a configuration from JSON
pub fn from_json(json: &str) -> OrchestrationResult<OrchestratorConfig> {
    serde_json::from_str(json).map_err(|e| OrchestrationError::ConfigMismatch(e.to_string()))
}

/// Load a configuration file
pub fn load(path: impl AsRef<Path>) -> OrchestrationResult<OrchestratorConfig> {
    let json = fs::read_to_string(path.as_ref())
        .map_err(|e| OrchestrationError::ConfigMismatch(e.to_string()))?;
    from_json(&json)
}

/// Write a configuration file (pretty JSON)
pub fn save(config: &OrchestratorConfig, path: impl AsRef<Path>) -> OrchestrationResult<()> {
    fs::write(path.as_ref(), to_json(config)?)
        .map_err(|e| OrchestrationError::ConfigMismatch(e.to_string()))
}
