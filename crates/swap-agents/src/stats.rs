//! Score summaries for diagnostics.

use serde::{Deserialize, Serialize};

use crate::user::User;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreStats {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// Population standard deviation.
    pub stdev: f64,
}

impl ScoreStats {
    /// `None` for an empty slice.
    pub fn from_scores(scores: &[f64]) -> Option<Self> {
        if scores.is_empty() {
            return None;
        }
        let count = scores.len();
        let mean = scores.iter().sum::<f64>() / count as f64;
        let variance = scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / count as f64;

        let mut sorted = scores.to_vec();
        sorted.sort_by(f64::total_cmp);
        let median = if count % 2 == 1 {
            sorted[count / 2]
        } else {
            (sorted[count / 2 - 1] + sorted[count / 2]) / 2.0
        };

        Some(Self {
            count,
            mean,
            median,
            stdev: variance.sqrt(),
        })
    }
}

impl std::fmt::Display for ScoreStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "n {} mean {:.4} median {:.4} stdev {:.4}",
            self.count, self.mean, self.median, self.stdev
        )
    }
}

/// Per-class skill summaries across users.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    pub bogus: Option<ScoreStats>,
    pub real: Option<ScoreStats>,
}

impl UserStats {
    pub(crate) fn from_users<'a>(users: impl Iterator<Item = &'a User>) -> Self {
        let (bogus, real): (Vec<f64>, Vec<f64>) = users
            .map(|user| {
                let score = user.ledger().cached_score();
                (score.bogus, score.real)
            })
            .unzip();
        Self {
            bogus: ScoreStats::from_scores(&bogus),
            real: ScoreStats::from_scores(&real),
        }
    }
}
