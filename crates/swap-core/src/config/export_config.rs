use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_FPR, DEFAULT_MDR};

/// Retirement threshold targets for score exports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Tolerated false-positive rate above the real threshold. Default: 0.01.
    pub fpr: f64,
    /// Tolerated missed-detection rate below the bogus threshold. Default: 0.1.
    pub mdr: f64,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            fpr: DEFAULT_FPR,
            mdr: DEFAULT_MDR,
        }
    }
}
