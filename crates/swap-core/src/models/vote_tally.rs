//! Per-subject vote counts and the controversy/consensus measures used to
//! pick gold subjects.
//!
//! With `x` the minority count and `y` the majority count:
//!
//! - controversy: `(x + y) ^ (x / y)` (`pow`) or `(x + y) · (x / y)` (`multiply`)
//! - consensus: `(y − x) ^ (1 − x / y)` (`pow`) or `(y − x) · (1 − x / y)` (`multiply`)
//!
//! # Examples
//!
//! ```
//! use swap_core::models::{ControversyVersion, VoteTally};
//!
//! let split = VoteTally { real: 5, bogus: 5 };
//! let agreed = VoteTally { real: 10, bogus: 0 };
//! let pow = ControversyVersion::Pow;
//! assert!(split.controversy(pow).unwrap() > agreed.controversy(pow).unwrap());
//! assert!(agreed.consensus(pow).unwrap() > split.consensus(pow).unwrap());
//! ```

use serde::{Deserialize, Serialize};

use crate::models::Label;

/// Operator combining vote volume and vote balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControversyVersion {
    #[default]
    Pow,
    Multiply,
}

impl ControversyVersion {
    fn combine(self, base: f64, factor: f64) -> f64 {
        match self {
            Self::Pow => base.powf(factor),
            Self::Multiply => base * factor,
        }
    }
}

/// Annotation counts for one subject.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    pub real: u64,
    pub bogus: u64,
}

impl VoteTally {
    pub fn add(&mut self, annotation: Label) {
        match annotation {
            Label::Real => self.real += 1,
            Label::Bogus => self.bogus += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.real + self.bogus
    }

    fn split(&self) -> Option<(f64, f64)> {
        let x = self.real.min(self.bogus) as f64;
        let y = self.real.max(self.bogus) as f64;
        (y > 0.0).then_some((x, y))
    }

    /// How evenly split the votes are, scaled by volume. `None` without votes.
    pub fn controversy(&self, version: ControversyVersion) -> Option<f64> {
        self.split().map(|(x, y)| version.combine(x + y, x / y))
    }

    /// How one-sided the votes are, scaled by margin. `None` without votes.
    pub fn consensus(&self, version: ControversyVersion) -> Option<f64> {
        self.split().map(|(x, y)| version.combine(y - x, 1.0 - x / y))
    }
}
