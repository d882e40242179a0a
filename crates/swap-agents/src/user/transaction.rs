use serde::{Deserialize, Serialize};

use swap_core::models::{Label, SubjectId};

use crate::tracker::Counts;

/// One annotation by a user. Carries the counters after itself so the
/// ledger can resume its fold from any position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserTransaction {
    pub(crate) subject: SubjectId,
    /// Position of the matching transaction in the subject's ledger.
    pub(crate) subject_order: usize,
    pub(crate) annotation: Label,
    /// True class of the subject, once known.
    pub(crate) gold: Option<Label>,
    pub(crate) order: usize,
    pub(crate) changed: bool,
    pub(crate) counts: Counts,
}

impl UserTransaction {
    pub fn new(subject: SubjectId, subject_order: usize, annotation: Label, gold: Option<Label>) -> Self {
        Self {
            subject,
            subject_order,
            annotation,
            gold,
            order: 0,
            changed: false,
            counts: Counts::default(),
        }
    }

    pub fn subject(&self) -> &SubjectId {
        &self.subject
    }

    pub fn subject_order(&self) -> usize {
        self.subject_order
    }

    pub fn annotation(&self) -> Label {
        self.annotation
    }

    pub fn gold(&self) -> Option<Label> {
        self.gold
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// Counters over the user's transactions up to and including this one.
    pub fn counts(&self) -> &Counts {
        &self.counts
    }

    /// `None` while the gold is unknown.
    pub fn matched(&self) -> Option<bool> {
        self.gold.map(|gold| gold == self.annotation)
    }

    pub(crate) fn calculate(&mut self, mut counts: Counts) -> Counts {
        if let Some(gold) = self.gold {
            counts.observe(gold, self.annotation);
        }
        self.counts = counts;
        self.changed = false;
        counts
    }
}
