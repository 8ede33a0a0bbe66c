// ─────────────────────────────────────────────────────────────────────
// FPGroup Bridge — Configuration
// ─────────────────────────────────────────────────────────────────────

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{BridgeError, BridgeResult};

/// Runtime configuration for the bridge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Overrides the default census search path at start-up.
    /// Default: None (keep the installation's census directory).
    pub census_data_path: Option<PathBuf>,

    /// Check every relator term against the generator count before
    /// any host object is built.
    /// Default: true.
    pub validate_generators: bool,

    /// Label prefix for generators of the native free group.
    /// Default: "x" (generators print as x0, x1, ...).
    pub generator_prefix: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            census_data_path: None,
            validate_generators: true,
            generator_prefix: "x".to_string(),
        }
    }
}

impl BridgeConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> BridgeResult<()> {
        if let Some(path) = &self.census_data_path {
            if path.as_os_str().is_empty() {
                return Err(BridgeError::Config(
                    "census_data_path must not be empty".to_string(),
                ));
            }
        }
        let mut chars = self.generator_prefix.chars();
        match chars.next() {
            Some(c) if c.is_ascii_alphabetic() => {}
            _ => {
                return Err(BridgeError::Config(format!(
                    "generator_prefix must start with an ASCII letter, got {:?}",
                    self.generator_prefix
                )));
            }
        }
        if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(BridgeError::Config(format!(
                "generator_prefix may only contain ASCII alphanumerics or '_', got {:?}",
                self.generator_prefix
            )));
        }
        Ok(())
    }

    /// Load from JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> BridgeResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| BridgeError::Config(format!("JSON parse error: {e}")))
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> BridgeResult<String> {
        serde_json::to_string(self).map_err(|e| BridgeError::Serialization(e.to_string()))
    }
}
