//! Engine configuration.
//!
//! One [`SwapConfig`] is built at startup (usually from TOML) and handed to
//! the controller; ledgers receive the [`Priors`] slice of it at construction.
//!
//! # Examples
//!
//! ```
//! use swap_core::config::{SkillMode, SwapConfig};
//!
//! let config = SwapConfig::from_toml("p0 = 0.2\nback_update = true").unwrap();
//! assert!((config.p0 - 0.2).abs() < f64::EPSILON);
//! assert_eq!(config.priors().mode, SkillMode::Static);
//! assert!(config.gold_updates);
//! ```

mod export_config;
mod observability_config;
mod online_config;

pub use export_config::ExportConfig;
pub use observability_config::ObservabilityConfig;
pub use online_config::OnlineConfig;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_EPSILON, DEFAULT_P0};
use crate::errors::{SwapError, SwapResult};
use crate::models::ControversyVersion;

/// Top-level SWAP configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwapConfig {
    /// Prior probability that a subject is real. Default: 0.12.
    pub p0: f64,
    /// Prior worker skill for both classes. Default: 0.5.
    pub epsilon: f64,
    /// Whether gold known at classification time trains the worker at once. Default: true.
    pub gold_updates: bool,
    /// Static (back-updating) methodology instead of the dynamic one. Default: false.
    pub back_update: bool,
    /// Operator for controversy/consensus ranking. Default: pow.
    pub controversial_version: ControversyVersion,
    pub export: ExportConfig,
    pub online: OnlineConfig,
    pub observability: ObservabilityConfig,
}

impl Default for SwapConfig {
    fn default() -> Self {
        Self {
            p0: DEFAULT_P0,
            epsilon: DEFAULT_EPSILON,
            gold_updates: true,
            back_update: false,
            controversial_version: ControversyVersion::default(),
            export: ExportConfig::default(),
            online: OnlineConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl SwapConfig {
    /// Parse and validate a TOML document. Missing keys take their defaults.
    pub fn from_toml(source: &str) -> SwapResult<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| SwapError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject priors and rates that would make the odds update meaningless.
    pub fn validate(&self) -> SwapResult<()> {
        open_unit("p0", self.p0)?;
        open_unit("epsilon", self.epsilon)?;
        closed_unit("export.fpr", self.export.fpr)?;
        closed_unit("export.mdr", self.export.mdr)?;
        Ok(())
    }

    pub fn skill_mode(&self) -> SkillMode {
        if self.back_update {
            SkillMode::Static
        } else {
            SkillMode::Dynamic
        }
    }

    pub fn priors(&self) -> Priors {
        Priors {
            p0: self.p0,
            epsilon: self.epsilon,
            mode: self.skill_mode(),
        }
    }
}

fn open_unit(name: &str, value: f64) -> SwapResult<()> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(SwapError::Config(format!("{name} must be in (0, 1), got {value}")))
    }
}

fn closed_unit(name: &str, value: f64) -> SwapResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(SwapError::Config(format!("{name} must be in [0, 1], got {value}")))
    }
}

/// How worker skill reaches subject transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillMode {
    /// Each subject transaction sees the worker's skill as of that classification.
    Dynamic,
    /// Every subject transaction sees the worker's latest skill.
    Static,
}

/// The parameters an agent needs at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Priors {
    pub p0: f64,
    pub epsilon: f64,
    pub mode: SkillMode,
}

impl Default for Priors {
    fn default() -> Self {
        SwapConfig::default().priors()
    }
}
