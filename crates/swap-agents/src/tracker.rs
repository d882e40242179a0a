//! Running counters behind a worker's skill estimate.
//!
//! Skill for one true class is the posterior mean of a Beta prior with mean
//! `epsilon` and weight [`SKILL_PRIOR_WEIGHT`]:
//!
//! ```text
//! score = (matched + 2·epsilon) / (seen + 2)
//! ```
//!
//! At the default `epsilon = 0.5` this is the Laplace rule
//! `(matched + 1) / (seen + 2)`.
//!
//! # Examples
//!
//! ```
//! use swap_agents::tracker::Counter;
//!
//! let mut counter = Counter::default();
//! assert_eq!(counter.score(0.5), 0.5);
//! counter.add(true);
//! assert!((counter.score(0.5) - 2.0 / 3.0).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};

use swap_core::constants::SKILL_PRIOR_WEIGHT;
use swap_core::models::{Label, UserScore};

/// Gold observations for one true class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counter {
    pub seen: u64,
    pub matched: u64,
}

impl Counter {
    pub fn add(&mut self, matched: bool) {
        self.seen += 1;
        if matched {
            self.matched += 1;
        }
    }

    pub fn score(&self, epsilon: f64) -> f64 {
        (self.matched as f64 + SKILL_PRIOR_WEIGHT * epsilon) / (self.seen as f64 + SKILL_PRIOR_WEIGHT)
    }
}

/// One counter per true class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    pub bogus: Counter,
    pub real: Counter,
}

impl Counts {
    /// Record an answer on a subject whose true class is `gold`.
    pub fn observe(&mut self, gold: Label, annotation: Label) {
        self.get_mut(gold).add(annotation == gold);
    }

    pub fn get(&self, gold: Label) -> &Counter {
        match gold {
            Label::Bogus => &self.bogus,
            Label::Real => &self.real,
        }
    }

    fn get_mut(&mut self, gold: Label) -> &mut Counter {
        match gold {
            Label::Bogus => &mut self.bogus,
            Label::Real => &mut self.real,
        }
    }

    pub fn seen(&self) -> u64 {
        self.bogus.seen + self.real.seen
    }

    pub fn score(&self, epsilon: f64) -> UserScore {
        UserScore::new(self.bogus.score(epsilon), self.real.score(epsilon))
    }
}
