//! The contract shared by subject and user ledgers.
//!
//! A ledger is an ordered, append-only sequence of transactions whose
//! per-transaction results form a left fold from the agent's prior. Changing
//! a transaction only marks the ledger stale and lowers `first_change`;
//! [`Ledger::recalculate`] then recomputes from that position onward and
//! leaves everything before it untouched.

use serde::{Deserialize, Serialize};

use swap_core::errors::SwapResult;

/// Instrumentation for incremental recomputation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerMetrics {
    /// Recompute passes that touched at least one transaction.
    pub passes: u64,
    /// Transactions recomputed over all passes.
    pub recomputed: u64,
}

pub trait Ledger {
    type Transaction;
    type Score;

    /// Append a transaction, assigning it the next order. Returns that order.
    fn add(&mut self, transaction: Self::Transaction) -> usize;

    fn get(&self, order: usize) -> Option<&Self::Transaction>;

    /// Mark the transaction at `order` as changed.
    fn update(&mut self, order: usize) -> SwapResult<()>;

    /// Recompute from the earliest change and return the current score.
    fn recalculate(&mut self) -> Self::Score;

    /// Forget pending changes without recomputing.
    fn clear_changes(&mut self);

    fn is_stale(&self) -> bool;

    /// Lowest order changed since the last recompute.
    fn first_change(&self) -> Option<usize>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn metrics(&self) -> LedgerMetrics;
}

/// Lower a running `first_change` minimum.
pub(crate) fn lower(first_change: &mut Option<usize>, order: usize) {
    *first_change = Some(first_change.map_or(order, |current| current.min(order)));
}
