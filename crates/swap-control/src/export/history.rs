use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use swap_core::models::{Label, SubjectId};

/// One subject's score trace: the prior followed by the score after each
/// annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct History {
    pub id: SubjectId,
    pub gold: Option<Label>,
    pub scores: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryExport {
    histories: BTreeMap<SubjectId, History>,
    generated_at: DateTime<Utc>,
}

impl HistoryExport {
    pub fn new(histories: impl IntoIterator<Item = History>) -> Self {
        Self {
            histories: histories
                .into_iter()
                .map(|history| (history.id.clone(), history))
                .collect(),
            generated_at: Utc::now(),
        }
    }

    pub fn get(&self, id: &SubjectId) -> Option<&History> {
        self.histories.get(id)
    }

    /// `(gold, trace)` per subject, ordered by id.
    pub fn traces(&self) -> impl Iterator<Item = (Option<Label>, &[f64])> {
        self.histories
            .values()
            .map(|history| (history.gold, history.scores.as_slice()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &History> {
        self.histories.values()
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    pub fn len(&self) -> usize {
        self.histories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.histories.is_empty()
    }
}
