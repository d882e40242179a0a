use serde::{Deserialize, Serialize};

use swap_core::models::{Label, UserId, UserScore};

use crate::formula::odds_update;

/// One annotation on a subject, carrying the skill snapshot used to weigh it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectTransaction {
    pub(crate) user: UserId,
    /// Position of the matching transaction in the user's ledger.
    pub(crate) user_order: usize,
    pub(crate) annotation: Label,
    /// Skill applied in the last recompute.
    pub(crate) committed: UserScore,
    /// Skill notified since the last recompute.
    pub(crate) pending: Option<UserScore>,
    pub(crate) order: usize,
    /// Posterior after this transaction. `None` until first recomputed.
    pub(crate) score: Option<f64>,
}

impl SubjectTransaction {
    pub fn new(user: UserId, user_order: usize, annotation: Label, skill: UserScore) -> Self {
        Self {
            user,
            user_order,
            annotation,
            committed: skill,
            pending: None,
            order: 0,
            score: None,
        }
    }

    pub fn user(&self) -> &UserId {
        &self.user
    }

    pub fn user_order(&self) -> usize {
        self.user_order
    }

    pub fn annotation(&self) -> Label {
        self.annotation
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn score(&self) -> Option<f64> {
        self.score
    }

    /// The skill the next recompute will use.
    pub fn user_score(&self) -> UserScore {
        self.pending.unwrap_or(self.committed)
    }

    pub fn is_changed(&self) -> bool {
        self.pending.is_some()
    }

    /// Stage a new skill. Returns false when it equals the one in effect.
    pub(crate) fn notify(&mut self, skill: UserScore) -> bool {
        if skill == self.user_score() {
            return false;
        }
        self.pending = Some(skill);
        true
    }

    /// Promote the pending skill and fold this transaction onto `prior`.
    pub(crate) fn calculate(&mut self, prior: f64) -> f64 {
        if let Some(skill) = self.pending.take() {
            self.committed = skill;
        }
        let posterior = odds_update(prior, self.annotation, self.committed);
        self.score = Some(posterior);
        posterior
    }
}
