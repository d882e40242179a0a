use std::collections::{BTreeMap, HashMap};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use swap_core::errors::SwapResult;
use swap_core::models::{Classification, ControversyVersion, Label, SubjectId, VoteTally};
use swap_core::traits::{ClassificationCursor, ClassificationSource, GoldMap, GoldSource};

/// Classifications and expert labels held in memory. Random gold samples are
/// drawn from a seeded generator so tests are reproducible.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    historical: Vec<Classification>,
    live: Vec<Classification>,
    golds: BTreeMap<SubjectId, Label>,
    seed: u64,
    version: ControversyVersion,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_version(mut self, version: ControversyVersion) -> Self {
        self.version = version;
        self
    }

    pub fn push(&mut self, classification: Classification) -> &mut Self {
        self.historical.push(classification);
        self
    }

    pub fn push_live(&mut self, classification: Classification) -> &mut Self {
        self.live.push(classification);
        self
    }

    pub fn set_gold(&mut self, subject: SubjectId, gold: Label) -> &mut Self {
        self.golds.insert(subject, gold);
        self
    }

    pub fn historical(&self) -> &[Classification] {
        &self.historical
    }

    pub fn live_classifications(&self) -> &[Classification] {
        &self.live
    }

    /// Votes per subject over both cursors.
    pub fn tallies(&self) -> BTreeMap<SubjectId, VoteTally> {
        let mut tallies: BTreeMap<SubjectId, VoteTally> = BTreeMap::new();
        for cl in self.historical.iter().chain(&self.live) {
            tallies.entry(cl.subject.clone()).or_default().add(cl.annotation);
        }
        tallies
    }

    fn rank(&self, size: usize, measure: impl Fn(&VoteTally) -> Option<f64>) -> Vec<SubjectId> {
        let mut ranked: Vec<(SubjectId, f64)> = self
            .tallies()
            .into_iter()
            .filter_map(|(id, tally)| measure(&tally).map(|m| (id, m)))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.into_iter().take(size).map(|(id, _)| id).collect()
    }
}

fn cursor(classifications: &[Classification]) -> ClassificationCursor {
    Box::new(classifications.to_vec().into_iter().map(Ok))
}

impl ClassificationSource for InMemoryStore {
    fn classifications(&self) -> SwapResult<ClassificationCursor> {
        Ok(cursor(&self.historical))
    }

    fn live(&self) -> SwapResult<Option<ClassificationCursor>> {
        Ok((!self.live.is_empty()).then(|| cursor(&self.live)))
    }
}

impl GoldSource for InMemoryStore {
    fn all_golds(&self) -> SwapResult<GoldMap> {
        Ok(self.golds.iter().map(|(id, gold)| (id.clone(), *gold)).collect())
    }

    fn golds_for(&self, subjects: &[SubjectId]) -> SwapResult<GoldMap> {
        Ok(subjects
            .iter()
            .filter_map(|id| self.golds.get(id).map(|gold| (id.clone(), *gold)))
            .collect())
    }

    fn random_golds(&self, size: usize) -> SwapResult<GoldMap> {
        let ids: Vec<&SubjectId> = self.golds.keys().collect();
        let mut rng = StdRng::seed_from_u64(self.seed);
        let sample: HashMap<SubjectId, Label> = ids
            .choose_multiple(&mut rng, size)
            .map(|id| ((*id).clone(), self.golds[*id]))
            .collect();
        Ok(sample)
    }

    fn controversial_subjects(&self, size: usize) -> SwapResult<Vec<SubjectId>> {
        let version = self.version;
        Ok(self.rank(size, |tally| tally.controversy(version)))
    }

    fn consensus_subjects(&self, size: usize) -> SwapResult<Vec<SubjectId>> {
        let version = self.version;
        Ok(self.rank(size, |tally| tally.consensus(version)))
    }
}
