use serde::{Deserialize, Serialize};
use tracing::trace;

use swap_core::config::{Priors, SkillMode};
use swap_core::errors::{AgentError, SwapResult};
use swap_core::models::{Label, SubjectId, UserId, UserScore};

use super::transaction::UserTransaction;
use crate::ledger::{lower, Ledger, LedgerMetrics};
use crate::tracker::Counts;

/// A skill value owed to one subject transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub subject: SubjectId,
    pub subject_order: usize,
    pub score: UserScore,
}

/// A user's annotations in arrival order, folded into seen/matched counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserLedger {
    user: UserId,
    epsilon: f64,
    mode: SkillMode,
    transactions: Vec<UserTransaction>,
    first_change: Option<usize>,
    stale: bool,
    counts: Counts,
    /// Lowest order whose skill has not been pushed to its subject yet.
    notify_from: Option<usize>,
    /// In static mode, the skill every subject transaction holds. `None`
    /// once a recompute moved the skill away from it.
    notified: Option<UserScore>,
    #[serde(skip)]
    metrics: LedgerMetrics,
}

impl UserLedger {
    pub fn new(user: UserId, priors: &Priors) -> Self {
        Self {
            user,
            epsilon: priors.epsilon,
            mode: priors.mode,
            transactions: Vec::new(),
            first_change: None,
            stale: false,
            counts: Counts::default(),
            notify_from: None,
            notified: Some(UserScore::uniform(priors.epsilon)),
            metrics: LedgerMetrics::default(),
        }
    }

    pub fn mode(&self) -> SkillMode {
        self.mode
    }

    /// Counters as of the last recompute.
    pub fn counts(&self) -> &Counts {
        &self.counts
    }

    /// Skill as of the last recompute.
    pub fn cached_score(&self) -> UserScore {
        self.counts.score(self.epsilon)
    }

    pub fn iter(&self) -> impl Iterator<Item = &UserTransaction> {
        self.transactions.iter()
    }

    /// Transactions whose gold is known.
    pub fn n_resolved(&self) -> usize {
        self.transactions.iter().filter(|tx| tx.gold.is_some()).count()
    }

    /// Fail unless transaction `order` exists and annotated `subject`.
    pub fn check_reference(&self, order: usize, subject: &SubjectId) -> SwapResult<()> {
        let tx = self
            .transactions
            .get(order)
            .ok_or_else(|| AgentError::TransactionNotFound {
                agent: self.user.to_string(),
                order,
            })?;
        if &tx.subject != subject {
            return Err(AgentError::SubjectMismatch {
                expected: tx.subject.to_string(),
                found: subject.to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Record the true class of the subject behind transaction `order`.
    /// Returns whether anything changed.
    pub fn resolve_gold(&mut self, order: usize, subject: &SubjectId, gold: Label) -> SwapResult<bool> {
        self.check_reference(order, subject)?;
        let tx = &mut self.transactions[order];
        if tx.gold == Some(gold) {
            return Ok(false);
        }
        tx.gold = Some(gold);
        tx.changed = true;
        lower(&mut self.first_change, order);
        self.stale = true;
        Ok(true)
    }

    /// Whether some subject transaction holds a skill this ledger has not
    /// pushed yet.
    pub fn has_notifications(&self) -> bool {
        if self.stale {
            return true;
        }
        match self.mode {
            SkillMode::Dynamic => self.notify_from.is_some(),
            SkillMode::Static => self.notified != Some(self.cached_score()),
        }
    }

    /// Recompute and hand out the skill values owed to subject transactions.
    ///
    /// Dynamic mode owes each transaction from the earliest change onward its
    /// prefix skill. Static mode owes every transaction the latest skill, and
    /// only when that skill moved since the last push.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        let latest = self.recalculate();
        let from = self.notify_from.take();
        let epsilon = self.epsilon;
        match self.mode {
            SkillMode::Dynamic => match from {
                Some(from) => self.transactions[from..]
                    .iter()
                    .map(|tx| Notification {
                        subject: tx.subject.clone(),
                        subject_order: tx.subject_order,
                        score: tx.counts.score(epsilon),
                    })
                    .collect(),
                None => Vec::new(),
            },
            SkillMode::Static => {
                if self.notified == Some(latest) {
                    return Vec::new();
                }
                self.notified = Some(latest);
                self.transactions
                    .iter()
                    .map(|tx| Notification {
                        subject: tx.subject.clone(),
                        subject_order: tx.subject_order,
                        score: latest,
                    })
                    .collect()
            }
        }
    }
}

impl Ledger for UserLedger {
    type Transaction = UserTransaction;
    type Score = UserScore;

    fn add(&mut self, mut transaction: UserTransaction) -> usize {
        let order = self.transactions.len();
        transaction.order = order;
        transaction.changed = true;
        self.transactions.push(transaction);
        lower(&mut self.first_change, order);
        self.stale = true;
        order
    }

    fn get(&self, order: usize) -> Option<&UserTransaction> {
        self.transactions.get(order)
    }

    fn update(&mut self, order: usize) -> SwapResult<()> {
        let tx = self
            .transactions
            .get_mut(order)
            .ok_or_else(|| AgentError::TransactionNotFound {
                agent: self.user.to_string(),
                order,
            })?;
        tx.changed = true;
        lower(&mut self.first_change, order);
        self.stale = true;
        Ok(())
    }

    fn recalculate(&mut self) -> UserScore {
        let Some(start) = self.first_change else {
            self.stale = false;
            return self.cached_score();
        };

        let mut counts = match start {
            0 => Counts::default(),
            n => self.transactions[n - 1].counts,
        };
        for tx in &mut self.transactions[start..] {
            counts = tx.calculate(counts);
        }

        let steps = (self.transactions.len() - start) as u64;
        self.metrics.passes += 1;
        self.metrics.recomputed += steps;
        self.counts = counts;
        lower(&mut self.notify_from, start);
        self.clear_changes();

        let score = self.cached_score();
        if self.notified != Some(score) {
            self.notified = None;
        }
        trace!(user = %self.user, start, steps, %score, "user ledger recomputed");
        score
    }

    fn clear_changes(&mut self) {
        self.first_change = None;
        self.stale = false;
    }

    fn is_stale(&self) -> bool {
        self.stale
    }

    fn first_change(&self) -> Option<usize> {
        self.first_change
    }

    fn len(&self) -> usize {
        self.transactions.len()
    }

    fn metrics(&self) -> LedgerMetrics {
        self.metrics
    }
}
