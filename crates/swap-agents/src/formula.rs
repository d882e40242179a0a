//! The per-classification odds update.
//!
//! With prior `s`, skill pair `(u0, u1)` and annotation `a`:
//!
//! ```text
//! a = 1:  s' = s·u1 / (s·u1 + (1 − s)·(1 − u0))
//! a = 0:  s' = s·(1 − u1) / (s·(1 − u1) + (1 − s)·u0)
//! ```
//!
//! A zero (or non-finite) denominator returns the prior unchanged.

use tracing::warn;

use swap_core::models::{Label, UserScore};

/// Posterior after one annotation from a worker with the given skill.
///
/// # Examples
///
/// ```
/// use swap_agents::formula::odds_update;
/// use swap_core::models::{Label, UserScore};
///
/// let skill = UserScore::new(0.5, 2.0 / 3.0);
/// let p = odds_update(0.12, Label::Real, skill);
/// assert!((p - 0.08 / 0.52).abs() < 1e-12);
/// ```
pub fn odds_update(prior: f64, annotation: Label, skill: UserScore) -> f64 {
    let (u0, u1) = (skill.bogus, skill.real);
    let (numerator, rest) = match annotation {
        Label::Real => (prior * u1, (1.0 - prior) * (1.0 - u0)),
        Label::Bogus => (prior * (1.0 - u1), (1.0 - prior) * u0),
    };
    let denominator = numerator + rest;

    if denominator == 0.0 || !denominator.is_finite() {
        warn!(prior, %annotation, u0, u1, "degenerate odds update, keeping prior");
        return prior;
    }

    let posterior = numerator / denominator;
    if posterior.is_finite() {
        posterior
    } else {
        warn!(prior, %annotation, u0, u1, "non-finite posterior, keeping prior");
        prior
    }
}
