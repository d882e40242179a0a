use serde::{Deserialize, Serialize};

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default filter when `SWAP_LOG` is unset. Default: "info".
    pub log_level: String,
    /// Emit JSON lines instead of human-readable output. Default: false.
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
        }
    }
}
