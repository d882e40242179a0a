//! User agents: the workers giving annotations.
//!
//! A user's score is the skill pair `(u0, u1)`, estimated from how often the
//! user agreed with gold on each class.

mod ledger;
mod transaction;

pub use ledger::{Notification, UserLedger};
pub use transaction::UserTransaction;

use serde::{Deserialize, Serialize};

use swap_core::config::Priors;
use swap_core::errors::{AgentError, SwapResult};
use swap_core::models::{AgentKind, Classification, Label, SubjectId, UserId, UserScore};

use crate::agent::{Agent, AgentRecord};
use crate::ledger::Ledger;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    ledger: UserLedger,
}

impl User {
    pub fn new(id: UserId, priors: &Priors) -> Self {
        let ledger = UserLedger::new(id.clone(), priors);
        Self { id, ledger }
    }

    pub fn ledger(&self) -> &UserLedger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut UserLedger {
        &mut self.ledger
    }

    pub fn n_classifications(&self) -> usize {
        self.ledger.len()
    }

    /// Record an annotation on the subject transaction at `subject_order`.
    /// `gold` is the subject's true class when it is already known and gold
    /// updates are on; otherwise the transaction waits unresolved.
    pub fn classify(
        &mut self,
        classification: &Classification,
        subject_order: usize,
        gold: Option<Label>,
    ) -> SwapResult<usize> {
        if classification.user != self.id {
            return Err(AgentError::UserMismatch {
                expected: self.id.to_string(),
                found: classification.user.to_string(),
            }
            .into());
        }
        let tx = UserTransaction::new(
            classification.subject.clone(),
            subject_order,
            classification.annotation,
            gold,
        );
        Ok(self.ledger.add(tx))
    }

    /// Current skill, recomputing pending changes first.
    pub fn score(&mut self) -> UserScore {
        self.ledger.recalculate()
    }

    pub fn resolve_gold(&mut self, order: usize, subject: &SubjectId, gold: Label) -> SwapResult<bool> {
        self.ledger.resolve_gold(order, subject, gold)
    }
}

impl Agent for User {
    type Id = UserId;
    const KIND: AgentKind = AgentKind::User;

    fn spawn(id: UserId, priors: &Priors) -> Self {
        Self::new(id, priors)
    }

    fn id(&self) -> &UserId {
        &self.id
    }

    fn is_stale(&self) -> bool {
        self.ledger.is_stale()
    }

    fn recalculate(&mut self) {
        self.ledger.recalculate();
    }

    fn into_record(self) -> AgentRecord {
        AgentRecord::User(self)
    }

    fn from_record(record: AgentRecord) -> Result<Self, AgentRecord> {
        match record {
            AgentRecord::User(user) => Ok(user),
            other => Err(other),
        }
    }
}

impl std::fmt::Display for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "id: {} {} transactions: {}",
            self.id,
            self.ledger.cached_score(),
            self.ledger.len()
        )
    }
}
