//! Score and history exports.
//!
//! A [`ScoreExport`] is a snapshot of every subject's score, used to pick
//! retirement thresholds from the gold subjects and to measure purity and
//! completeness. A [`HistoryExport`] holds each subject's score trace so a
//! retirement decision can be replayed against it.

mod history;
mod score;

pub use history::{History, HistoryExport};
pub use score::{ClassCounts, Composition, Score, ScoreExport, Thresholds};
