use serde::{Deserialize, Serialize};

use crate::models::{Label, SubjectId, UserId};

/// A subject's current posterior, as answered to a score query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectScore {
    pub id: SubjectId,
    pub gold: Option<Label>,
    pub score: f64,
}

/// One row of the worker skill export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserScoreRow {
    pub id: UserId,
    pub score_bogus: f64,
    pub score_real: f64,
    pub classifications: usize,
}
