use std::collections::HashMap;

use crate::errors::SwapResult;
use crate::models::{Label, SubjectId};

/// Expert labels keyed by subject.
pub type GoldMap = HashMap<SubjectId, Label>;

/// Supplies expert gold labels and subject selections used to seed them.
pub trait GoldSource {
    /// Every known expert label.
    fn all_golds(&self) -> SwapResult<GoldMap>;

    /// Expert labels for the given subjects; subjects without one are omitted.
    fn golds_for(&self, subjects: &[SubjectId]) -> SwapResult<GoldMap>;

    /// A random sample of `size` expert labels.
    fn random_golds(&self, size: usize) -> SwapResult<GoldMap>;

    /// The `size` subjects whose votes are most evenly split.
    fn controversial_subjects(&self, size: usize) -> SwapResult<Vec<SubjectId>>;

    /// The `size` subjects whose votes are most one-sided.
    fn consensus_subjects(&self, size: usize) -> SwapResult<Vec<SubjectId>>;
}
