//! The SWAP controller.
//!
//! [`Swap`] owns the user and subject bureaus and applies classifications
//! one at a time:
//!
//! 1. resolve (or create) the subject and the user
//! 2. record the annotation in the user's ledger, resolved when the subject's
//!    gold is known and gold updates are on
//! 3. record the annotation in the subject's ledger with the user's current
//!    skill
//!
//! Subject scores are recomputed lazily, on read or on
//! [`Swap::process_changes`].
//!
//! With gold updates off, an annotation on a subject whose gold is already
//! known is recorded unresolved and resolved on the next
//! [`Swap::process_changes`], so the worker ends up with the same skill
//! whether the gold arrived before or after the annotation.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use swap_agents::stats::{ScoreStats, UserStats};
use swap_agents::{Agent, Bureau, Subject, User};
use swap_core::config::{Priors, SkillMode, SwapConfig};
use swap_core::errors::SwapResult;
use swap_core::models::{Classification, Label, SubjectId, SubjectScore, UserScoreRow, VoteTally};

use crate::export::{History, HistoryExport, Score, ScoreExport};
use crate::{classify_span, export_span, propagation_span};

/// What happened to the user side of a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifyOutcome {
    /// Gold was known: the user's skill was trained.
    UserUpdated,
    /// Gold unknown: the user's transaction waits for it.
    Skipped,
}

/// Result of assigning one gold label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoldOutcome {
    Assigned,
    Unchanged,
    /// The subject already had a different gold and overwrite was off.
    Conflict,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoldStats {
    pub assigned: u64,
    pub unchanged: u64,
    pub conflicts: u64,
}

impl GoldStats {
    fn record(&mut self, outcome: GoldOutcome) {
        match outcome {
            GoldOutcome::Assigned => self.assigned += 1,
            GoldOutcome::Unchanged => self.unchanged += 1,
            GoldOutcome::Conflict => self.conflicts += 1,
        }
    }
}

/// Classification counts for one drain of a cursor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingested {
    pub processed: u64,
    pub user_updates: u64,
    pub skipped: u64,
}

impl Ingested {
    pub fn record(&mut self, outcome: ClassifyOutcome) {
        self.processed += 1;
        match outcome {
            ClassifyOutcome::UserUpdated => self.user_updates += 1,
            ClassifyOutcome::Skipped => self.skipped += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapStats {
    pub subjects: usize,
    pub users: usize,
    pub classifications: u64,
    pub subject_scores: Option<ScoreStats>,
    pub user_scores: UserStats,
}

#[derive(Debug)]
pub struct Swap {
    config: SwapConfig,
    priors: Priors,
    subjects: Bureau<Subject>,
    users: Bureau<User>,
    classifications: u64,
    /// Gold subjects with annotations recorded while gold updates were off.
    deferred: BTreeSet<SubjectId>,
}

impl Swap {
    pub fn new(config: SwapConfig) -> SwapResult<Self> {
        config.validate()?;
        Ok(Self::from_validated(config))
    }

    pub(crate) fn from_validated(config: SwapConfig) -> Self {
        let priors = config.priors();
        Self {
            config,
            priors,
            subjects: Bureau::new(priors),
            users: Bureau::new(priors),
            classifications: 0,
            deferred: BTreeSet::new(),
        }
    }

    pub fn config(&self) -> &SwapConfig {
        &self.config
    }

    pub fn priors(&self) -> &Priors {
        &self.priors
    }

    pub fn subjects(&self) -> &Bureau<Subject> {
        &self.subjects
    }

    pub fn users(&self) -> &Bureau<User> {
        &self.users
    }

    pub fn classifications(&self) -> u64 {
        self.classifications
    }

    /// Apply one classification.
    ///
    /// In dynamic mode the user's skill is pushed to its subjects right away.
    /// In static mode the push waits for [`Swap::process_changes`], which the
    /// offline controller runs once the cursor is drained.
    pub fn process_one(&mut self, classification: &Classification) -> SwapResult<ClassifyOutcome> {
        let _span = classify_span!(classification.user, classification.subject).entered();

        let subject = self.subjects.get_or_create(&classification.subject);
        let subject_order = subject.n_classifications();
        let gold = if self.config.gold_updates {
            subject.gold().or(classification.gold)
        } else {
            if subject.is_gold() {
                self.deferred.insert(classification.subject.clone());
            }
            None
        };

        let user = self.users.get_or_create(&classification.user);
        let user_order = user.classify(classification, subject_order, gold)?;
        let skill = user.score();

        self.subjects
            .get_mut(&classification.subject)?
            .classify(classification, user_order, skill)?;
        self.classifications += 1;

        if self.priors.mode == SkillMode::Dynamic {
            self.users.notify_user(&classification.user, &mut self.subjects)?;
        }

        let outcome = match gold {
            Some(_) => ClassifyOutcome::UserUpdated,
            None => ClassifyOutcome::Skipped,
        };
        debug!(?outcome, %skill, "classification applied");
        Ok(outcome)
    }

    /// Apply one classification and return the subject's updated score.
    /// Used by the online path, so the user's skill is pushed in both modes.
    pub fn classify(&mut self, classification: &Classification) -> SwapResult<SubjectScore> {
        self.process_one(classification)?;
        if self.priors.mode == SkillMode::Static {
            self.users.notify_user(&classification.user, &mut self.subjects)?;
        }
        self.subject_score(&classification.subject)
    }

    /// Apply every classification in order.
    pub fn run(&mut self, classifications: impl IntoIterator<Item = Classification>) -> SwapResult<Ingested> {
        let mut ingested = Ingested::default();
        for classification in classifications {
            ingested.record(self.process_one(&classification)?);
        }
        Ok(ingested)
    }

    /// Assign a gold label and push the retrained skills to every subject the
    /// affected users classified.
    ///
    /// A subject that already has a different gold is only relabelled when
    /// `overwrite` is set.
    pub fn set_gold_label(&mut self, id: &SubjectId, gold: Label, overwrite: bool) -> SwapResult<GoldOutcome> {
        let subject = self.subjects.get_or_create(id);
        match subject.gold() {
            Some(current) if current == gold => return Ok(GoldOutcome::Unchanged),
            Some(current) if !overwrite => {
                warn!(subject = %id, %current, requested = %gold, "conflicting gold label skipped");
                return Ok(GoldOutcome::Conflict);
            }
            _ => {}
        }

        let touched = subject
            .set_gold_label(gold, &mut self.users)?
            .unwrap_or_default();
        for user in &touched {
            self.users.notify_user(user, &mut self.subjects)?;
        }
        Ok(GoldOutcome::Assigned)
    }

    pub fn set_gold_labels(
        &mut self,
        golds: impl IntoIterator<Item = (SubjectId, Label)>,
        overwrite: bool,
    ) -> SwapResult<GoldStats> {
        let mut golds: Vec<(SubjectId, Label)> = golds.into_iter().collect();
        golds.sort();
        let _span = propagation_span!(golds.len()).entered();

        let mut stats = GoldStats::default();
        for (id, gold) in &golds {
            stats.record(self.set_gold_label(id, *gold, overwrite)?);
        }
        info!(
            assigned = stats.assigned,
            unchanged = stats.unchanged,
            conflicts = stats.conflicts,
            "gold labels applied"
        );
        Ok(stats)
    }

    /// Resolve deferred gold, push every outstanding user skill, and
    /// recompute every stale ledger. Returns how many subject transactions
    /// received a new skill.
    pub fn process_changes(&mut self) -> SwapResult<usize> {
        let _span = propagation_span!(self.deferred.len()).entered();
        self.resolve_deferred()?;
        let changed = self.users.notify_changes(&mut self.subjects)?;
        let users = self.users.process_changes();
        let subjects = self.subjects.process_changes();
        debug!(changed, users, subjects, "changes processed");
        Ok(changed)
    }

    /// Number of gold subjects waiting for [`Swap::process_changes`] to
    /// resolve their annotations.
    pub fn deferred_golds(&self) -> usize {
        self.deferred.len()
    }

    fn resolve_deferred(&mut self) -> SwapResult<()> {
        // An id leaves the set only once resolved, so a failure can be retried.
        while let Some(id) = self.deferred.first().cloned() {
            let touched = self.subjects.get(&id)?.resolve_users(&mut self.users)?;
            debug!(subject = %id, users = touched.len(), "deferred gold resolved");
            self.deferred.remove(&id);
        }
        Ok(())
    }

    pub fn subject_score(&mut self, id: &SubjectId) -> SwapResult<SubjectScore> {
        let subject = self.subjects.get_mut(id)?;
        Ok(SubjectScore {
            id: id.clone(),
            gold: subject.gold(),
            score: subject.score(),
        })
    }

    /// Snapshot of every subject's gold and score.
    pub fn score_export(&mut self) -> SwapResult<ScoreExport> {
        self.process_changes()?;
        let _span = export_span!("scores", self.subjects.len()).entered();

        let scores: Vec<Score> = self
            .subjects
            .iter()
            .map(|subject| {
                Score::new(
                    subject.id().clone(),
                    subject.gold(),
                    subject.ledger().cached_score(),
                )
            })
            .collect();
        Ok(ScoreExport::new(scores, &self.config.export))
    }

    /// Every subject's score trace, starting at the prior.
    pub fn history_export(&mut self) -> SwapResult<HistoryExport> {
        self.process_changes()?;
        let _span = export_span!("history", self.subjects.len()).entered();

        let histories: Vec<History> = self
            .subjects
            .iter_mut()
            .map(|subject| History {
                id: subject.id().clone(),
                gold: subject.gold(),
                scores: subject.history(),
            })
            .collect();
        Ok(HistoryExport::new(histories))
    }

    /// `(user, u0, u1, classifications)` per user, ordered by id.
    pub fn export_user_scores(&mut self) -> SwapResult<Vec<UserScoreRow>> {
        self.process_changes()?;
        let mut rows: Vec<UserScoreRow> = self
            .users
            .iter()
            .map(|user| {
                let score = user.ledger().cached_score();
                UserScoreRow {
                    id: user.id().clone(),
                    score_bogus: score.bogus,
                    score_real: score.real,
                    classifications: user.n_classifications(),
                }
            })
            .collect();
        rows.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(rows)
    }

    pub fn stats(&mut self) -> SwapStats {
        SwapStats {
            subjects: self.subjects.len(),
            users: self.users.len(),
            classifications: self.classifications,
            subject_scores: self.subjects.stats(),
            user_scores: self.users.stats(),
        }
    }

    /// The `size` subjects whose votes are most evenly split.
    pub fn controversial_subjects(&self, size: usize) -> Vec<SubjectId> {
        let version = self.config.controversial_version;
        self.rank(size, |tally| tally.controversy(version))
    }

    /// The `size` subjects whose votes are most one-sided.
    pub fn consensus_subjects(&self, size: usize) -> Vec<SubjectId> {
        let version = self.config.controversial_version;
        self.rank(size, |tally| tally.consensus(version))
    }

    fn rank(&self, size: usize, measure: impl Fn(&VoteTally) -> Option<f64>) -> Vec<SubjectId> {
        let mut ranked: Vec<(SubjectId, f64)> = self
            .subjects
            .iter()
            .filter_map(|subject| measure(&subject.tally()).map(|m| (subject.id().clone(), m)))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.into_iter().take(size).map(|(id, _)| id).collect()
    }
}
