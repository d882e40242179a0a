use serde::{Deserialize, Serialize};

use crate::models::Label;

/// A worker's skill pair: probability of answering correctly when the
/// subject's true class is `Bogus` (`u0`) and when it is `Real` (`u1`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UserScore {
    pub bogus: f64,
    pub real: f64,
}

impl UserScore {
    pub fn new(bogus: f64, real: f64) -> Self {
        Self { bogus, real }
    }

    /// The same skill for both classes.
    pub fn uniform(epsilon: f64) -> Self {
        Self::new(epsilon, epsilon)
    }

    pub fn for_label(&self, label: Label) -> f64 {
        match label {
            Label::Bogus => self.bogus,
            Label::Real => self.real,
        }
    }
}

impl std::fmt::Display for UserScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "score 0: {:.2} score 1: {:.2}", self.bogus, self.real)
    }
}
