use serde::{Deserialize, Serialize};
use tracing::trace;

use swap_core::errors::{AgentError, SwapResult};
use swap_core::models::{SubjectId, UserScore};

use super::transaction::SubjectTransaction;
use crate::ledger::{lower, Ledger, LedgerMetrics};

/// A subject's annotations in arrival order, folded into a posterior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectLedger {
    subject: SubjectId,
    p0: f64,
    transactions: Vec<SubjectTransaction>,
    first_change: Option<usize>,
    stale: bool,
    score: f64,
    #[serde(skip)]
    metrics: LedgerMetrics,
}

impl SubjectLedger {
    pub fn new(subject: SubjectId, p0: f64) -> Self {
        Self {
            subject,
            p0,
            transactions: Vec::new(),
            first_change: None,
            stale: false,
            score: p0,
            metrics: LedgerMetrics::default(),
        }
    }

    pub fn p0(&self) -> f64 {
        self.p0
    }

    /// Score as of the last recompute.
    pub fn cached_score(&self) -> f64 {
        self.score
    }

    pub fn last(&self) -> Option<&SubjectTransaction> {
        self.transactions.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SubjectTransaction> {
        self.transactions.iter()
    }

    /// Stage a new skill for one transaction. Returns whether it changed.
    pub fn notify(&mut self, order: usize, skill: UserScore) -> SwapResult<bool> {
        let tx = self
            .transactions
            .get_mut(order)
            .ok_or_else(|| AgentError::TransactionNotFound {
                agent: self.subject.to_string(),
                order,
            })?;
        if !tx.notify(skill) {
            return Ok(false);
        }
        lower(&mut self.first_change, order);
        self.stale = true;
        Ok(true)
    }

    /// The posterior after every transaction, starting with the prior.
    pub fn history(&mut self) -> Vec<f64> {
        self.recalculate();
        std::iter::once(self.p0)
            .chain(self.transactions.iter().map(|tx| tx.score.unwrap_or(self.p0)))
            .collect()
    }
}

impl Ledger for SubjectLedger {
    type Transaction = SubjectTransaction;
    type Score = f64;

    fn add(&mut self, mut transaction: SubjectTransaction) -> usize {
        let order = self.transactions.len();
        transaction.order = order;
        self.transactions.push(transaction);
        lower(&mut self.first_change, order);
        self.stale = true;
        order
    }

    fn get(&self, order: usize) -> Option<&SubjectTransaction> {
        self.transactions.get(order)
    }

    fn update(&mut self, order: usize) -> SwapResult<()> {
        if order >= self.transactions.len() {
            return Err(AgentError::TransactionNotFound {
                agent: self.subject.to_string(),
                order,
            }
            .into());
        }
        lower(&mut self.first_change, order);
        self.stale = true;
        Ok(())
    }

    fn recalculate(&mut self) -> f64 {
        let Some(start) = self.first_change else {
            self.stale = false;
            return self.score;
        };

        // Everything left of `start` was computed by an earlier pass.
        let mut prior = match start {
            0 => self.p0,
            n => self.transactions[n - 1].score.unwrap_or(self.p0),
        };
        for tx in &mut self.transactions[start..] {
            prior = tx.calculate(prior);
        }

        let steps = (self.transactions.len() - start) as u64;
        self.metrics.passes += 1;
        self.metrics.recomputed += steps;
        trace!(subject = %self.subject, start, steps, score = prior, "subject ledger recomputed");

        self.score = prior;
        self.clear_changes();
        prior
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
