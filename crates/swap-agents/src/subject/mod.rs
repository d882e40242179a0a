//! Subject agents: the items being labelled.
//!
//! A subject's score is the posterior probability that it is real, built by
//! folding the odds update over its annotations in arrival order.

mod ledger;
mod transaction;

pub use ledger::SubjectLedger;
pub use transaction::SubjectTransaction;

use serde::{Deserialize, Serialize};
use tracing::debug;

use swap_core::config::Priors;
use swap_core::errors::{AgentError, SwapResult};
use swap_core::models::{AgentKind, Classification, Label, SubjectId, UserId, UserScore, VoteTally};

use crate::agent::{Agent, AgentRecord};
use crate::bureau::Bureau;
use crate::ledger::Ledger;
use crate::user::User;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    id: SubjectId,
    gold: Option<Label>,
    ledger: SubjectLedger,
}

impl Subject {
    pub fn new(id: SubjectId, p0: f64) -> Self {
        let ledger = SubjectLedger::new(id.clone(), p0);
        Self { id, gold: None, ledger }
    }

    pub fn gold(&self) -> Option<Label> {
        self.gold
    }

    pub fn is_gold(&self) -> bool {
        self.gold.is_some()
    }

    pub fn ledger(&self) -> &SubjectLedger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut SubjectLedger {
        &mut self.ledger
    }

    pub fn n_classifications(&self) -> usize {
        self.ledger.len()
    }

    /// Record an annotation weighed by `skill`. Returns the transaction's order.
    pub fn classify(
        &mut self,
        classification: &Classification,
        user_order: usize,
        skill: UserScore,
    ) -> SwapResult<usize> {
        if classification.subject != self.id {
            return Err(AgentError::SubjectMismatch {
                expected: self.id.to_string(),
                found: classification.subject.to_string(),
            }
            .into());
        }
        let tx = SubjectTransaction::new(
            classification.user.clone(),
            user_order,
            classification.annotation,
            skill,
        );
        Ok(self.ledger.add(tx))
    }

    /// Current posterior, recomputing pending changes first.
    pub fn score(&mut self) -> f64 {
        self.ledger.recalculate()
    }

    /// Posterior after each annotation, starting with the prior.
    pub fn history(&mut self) -> Vec<f64> {
        self.ledger.history()
    }

    pub fn tally(&self) -> VoteTally {
        let mut tally = VoteTally::default();
        for tx in self.ledger.iter() {
            tally.add(tx.annotation());
        }
        tally
    }

    /// Assign a gold label and resolve every user transaction that annotated
    /// this subject.
    ///
    /// Returns the users whose ledgers changed, or `None` if the subject
    /// already had this gold. The caller notifies those users so their new
    /// skill reaches the subjects they classified. Every referenced user
    /// transaction is checked before anything changes, so a failure leaves
    /// the subject and the users as they were.
    pub fn set_gold_label(
        &mut self,
        gold: Label,
        users: &mut Bureau<User>,
    ) -> SwapResult<Option<Vec<UserId>>> {
        if self.gold == Some(gold) {
            return Ok(None);
        }
        let touched = self.resolve(gold, users)?;
        self.gold = Some(gold);
        debug!(subject = %self.id, %gold, users = touched.len(), "gold label assigned");
        Ok(Some(touched))
    }

    /// Resolve the user transactions of this subject that are still missing
    /// its gold. Used for annotations recorded while gold updates were off.
    /// Returns the users whose ledgers changed.
    pub fn resolve_users(&self, users: &mut Bureau<User>) -> SwapResult<Vec<UserId>> {
        match self.gold {
            Some(gold) => self.resolve(gold, users),
            None => Ok(Vec::new()),
        }
    }

    fn resolve(&self, gold: Label, users: &mut Bureau<User>) -> SwapResult<Vec<UserId>> {
        for tx in self.ledger.iter() {
            users
                .get(tx.user())?
                .ledger()
                .check_reference(tx.user_order(), &self.id)?;
        }

        let mut touched = Vec::new();
        for tx in self.ledger.iter() {
            let user = users.get_mut(tx.user())?;
            if user.resolve_gold(tx.user_order(), &self.id, gold)? {
                touched.push(tx.user().clone());
            }
        }
        touched.sort();
        touched.dedup();
        Ok(touched)
    }
}

impl Agent for Subject {
    type Id = SubjectId;
    const KIND: AgentKind = AgentKind::Subject;

    fn spawn(id: SubjectId, priors: &Priors) -> Self {
        Self::new(id, priors.p0)
    }

    fn id(&self) -> &SubjectId {
        &self.id
    }

    fn is_stale(&self) -> bool {
        self.ledger.is_stale()
    }

    fn recalculate(&mut self) {
        self.ledger.recalculate();
    }

    fn into_record(self) -> AgentRecord {
        AgentRecord::Subject(self)
    }

    fn from_record(record: AgentRecord) -> Result<Self, AgentRecord> {
        match record {
            AgentRecord::Subject(subject) => Ok(subject),
            other => Err(other),
        }
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "id: {} gold: {} score: {:.4} transactions: {}",
            self.id,
            Label::gold_code(self.gold),
            self.ledger.cached_score(),
            self.ledger.len()
        )
    }
}
