use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use swap_core::config::ExportConfig;
use swap_core::models::{Label, SubjectId};

use super::history::HistoryExport;

/// One subject in an export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub id: SubjectId,
    pub gold: Option<Label>,
    pub p: f64,
    /// The first historical score that crossed a retirement threshold.
    pub retired: Option<f64>,
}

impl Score {
    pub fn new(id: SubjectId, gold: Option<Label>, p: f64) -> Self {
        Self {
            id,
            gold,
            p,
            retired: None,
        }
    }

    pub fn is_retired(&self) -> bool {
        self.retired.is_some()
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "id: {} gold: {} p: {:.4} retired: {:.4}",
            self.id,
            Label::gold_code(self.gold),
            self.p,
            self.retired.unwrap_or(-1.0)
        )
    }
}

/// Subjects per gold class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassCounts {
    pub unknown: usize,
    pub bogus: usize,
    pub real: usize,
}

impl ClassCounts {
    fn slot(&mut self, gold: Option<Label>) -> &mut usize {
        match gold {
            None => &mut self.unknown,
            Some(Label::Bogus) => &mut self.bogus,
            Some(Label::Real) => &mut self.real,
        }
    }

    pub fn add(&mut self, gold: Option<Label>) {
        *self.slot(gold) += 1;
    }

    fn remove(&mut self, gold: Option<Label>) {
        let slot = self.slot(gold);
        *slot = slot.saturating_sub(1);
    }

    pub fn gold(&self) -> usize {
        self.bogus + self.real
    }

    /// Fraction of gold subjects that are real. `None` without gold.
    pub fn purity(&self) -> Option<f64> {
        let total = self.gold();
        (total > 0).then(|| self.real as f64 / total as f64)
    }
}

/// Class counts relative to the number of gold subjects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Composition {
    pub unknown: f64,
    pub bogus: f64,
    pub real: f64,
}

/// Retirement thresholds. A subject whose score drops below `bogus` or
/// rises above `real` is retired.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub bogus: f64,
    pub real: f64,
}

impl Thresholds {
    pub fn retires(&self, p: f64) -> bool {
        p < self.bogus || p > self.real
    }
}

impl Default for Thresholds {
    /// Thresholds that retire nothing.
    fn default() -> Self {
        Self {
            bogus: 0.0,
            real: 1.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreExport {
    scores: BTreeMap<SubjectId, Score>,
    /// Ids ordered by ascending score, ties by id.
    sorted: Vec<SubjectId>,
    class_counts: ClassCounts,
    thresholds: Thresholds,
    generated_at: DateTime<Utc>,
}

impl ScoreExport {
    /// Build an export and derive its thresholds from the configured
    /// false-positive and missed-detection rates.
    pub fn new(scores: impl IntoIterator<Item = Score>, config: &ExportConfig) -> Self {
        let scores: BTreeMap<SubjectId, Score> = scores
            .into_iter()
            .map(|score| (score.id.clone(), score))
            .collect();

        let mut ranked: Vec<&Score> = scores.values().collect();
        ranked.sort_by(|a, b| a.p.total_cmp(&b.p).then_with(|| a.id.cmp(&b.id)));
        let sorted = ranked.into_iter().map(|score| score.id.clone()).collect();

        let mut export = Self {
            scores,
            sorted,
            class_counts: ClassCounts::default(),
            thresholds: Thresholds::default(),
            generated_at: Utc::now(),
        };
        export.class_counts = export.counts(0.0);
        export.thresholds = export.find_thresholds(config.fpr, config.mdr);
        export
    }

    pub fn get(&self, id: &SubjectId) -> Option<&Score> {
        self.scores.get(id)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    pub fn class_counts(&self) -> ClassCounts {
        self.class_counts
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    /// Scores ordered by ascending `p`.
    pub fn sorted_scores(&self) -> impl DoubleEndedIterator<Item = &Score> {
        self.sorted.iter().filter_map(|id| self.scores.get(id))
    }

    pub fn retired_scores(&self) -> impl Iterator<Item = &Score> {
        self.scores.values().filter(|score| score.is_retired())
    }

    /// Subjects per class with `p >= threshold`.
    pub fn counts(&self, threshold: f64) -> ClassCounts {
        let mut counts = ClassCounts::default();
        for score in self.scores.values().filter(|score| score.p >= threshold) {
            counts.add(score.gold);
        }
        counts
    }

    /// [`ScoreExport::counts`] as fractions of the gold subjects. `None`
    /// when no gold subject reaches the threshold.
    pub fn composition(&self, threshold: f64) -> Option<Composition> {
        let counts = self.counts(threshold);
        let total = counts.gold();
        (total > 0).then(|| {
            let total = total as f64;
            Composition {
                unknown: counts.unknown as f64 / total,
                bogus: counts.bogus as f64 / total,
                real: counts.real as f64 / total,
            }
        })
    }

    /// Purity of real subjects among gold subjects with `p >= threshold`.
    pub fn purity(&self, threshold: f64) -> Option<f64> {
        self.counts(threshold).purity()
    }

    /// The lowest score threshold above which purity exceeds `target`.
    /// Returns 1.0 when no threshold reaches it.
    pub fn find_purity(&self, target: f64) -> f64 {
        let mut counts = self.class_counts;
        for score in self.sorted_scores() {
            counts.remove(score.gold);
            if counts.purity().is_some_and(|purity| purity > target) {
                debug!(target, p = score.p, "purity threshold found");
                return score.p;
            }
        }
        info!(target, "no threshold reaches the requested purity");
        1.0
    }

    /// Fraction of real gold subjects scored above `threshold`. `None`
    /// without real gold subjects.
    pub fn completeness(&self, threshold: f64) -> Option<f64> {
        let real: Vec<f64> = self
            .scores
            .values()
            .filter(|score| score.gold == Some(Label::Real))
            .map(|score| score.p)
            .collect();
        if real.is_empty() {
            return None;
        }
        let inside = real.iter().filter(|&&p| p > threshold).count();
        Some(inside as f64 / real.len() as f64)
    }

    /// Retirement thresholds from the gold subjects.
    ///
    /// The real threshold is the lowest score above which the fraction of
    /// bogus gold falls under `fpr`. The bogus threshold is the highest score
    /// below which the fraction of real gold falls under `mdr`. A class with
    /// no gold keeps the threshold that retires nothing.
    pub fn find_thresholds(&self, fpr: f64, mdr: f64) -> Thresholds {
        let totals = self.counts(0.0);
        let mut thresholds = Thresholds::default();

        if totals.bogus > 0 {
            let mut seen = 0;
            for score in self.sorted_scores().filter(|s| s.gold == Some(Label::Bogus)) {
                seen += 1;
                if 1.0 - seen as f64 / (totals.bogus as f64) < fpr {
                    thresholds.real = score.p;
                    break;
                }
            }
        }

        if totals.real > 0 {
            let mut seen = 0;
            for score in self.sorted_scores().rev().filter(|s| s.gold == Some(Label::Real)) {
                seen += 1;
                if 1.0 - seen as f64 / (totals.real as f64) < mdr {
                    thresholds.bogus = score.p;
                    break;
                }
            }
        }

        debug!(fpr, mdr, bogus = thresholds.bogus, real = thresholds.real, "retirement thresholds");
        thresholds
    }

    /// Mark each subject retired at the first historical score outside the
    /// thresholds. Returns how many subjects are retired.
    pub fn retire(&mut self, history: &HistoryExport) -> usize {
        let thresholds = self.thresholds;
        let mut retired = 0;
        for score in self.scores.values_mut() {
            score.retired = history
                .get(&score.id)
                .and_then(|h| h.scores.iter().copied().find(|&p| thresholds.retires(p)));
            if score.is_retired() {
                retired += 1;
            }
        }
        debug!(retired, "retirement applied");
        retired
    }

    /// `(gold, p)` for gold subjects, by ascending `p`.
    pub fn roc(&self) -> Vec<(Label, f64)> {
        self.sorted_scores()
            .filter_map(|score| score.gold.map(|gold| (gold, score.p)))
            .collect()
    }

    /// `{subject: (gold, p)}`.
    pub fn to_map(&self) -> BTreeMap<SubjectId, (Option<Label>, f64)> {
        self.scores
            .iter()
            .map(|(id, score)| (id.clone(), (score.gold, score.p)))
            .collect()
    }
}
