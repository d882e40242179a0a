//! Composable gold-label selection.
//!
//! Getters run in the order they were added and later getters override
//! earlier ones for the same subject. An empty selector selects every
//! known gold label.
//!
//! # Examples
//!
//! ```
//! use swap_control::GoldSelector;
//!
//! let mut selector = GoldSelector::new();
//! selector.random(100).controversial(20);
//! assert_eq!(selector.len(), 2);
//! ```

use swap_core::errors::SwapResult;
use swap_core::models::SubjectId;
use swap_core::traits::{GoldMap, GoldSource};
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
enum Getter {
    All,
    Random(usize),
    Subjects(Vec<SubjectId>),
    Controversial(usize),
    Consensus(usize),
    These(GoldMap),
}

impl Getter {
    fn fetch(&self, source: &dyn GoldSource) -> SwapResult<GoldMap> {
        match self {
            Self::All => source.all_golds(),
            Self::Random(size) => source.random_golds(*size),
            Self::Subjects(ids) => source.golds_for(ids),
            Self::Controversial(size) => source.golds_for(&source.controversial_subjects(*size)?),
            Self::Consensus(size) => source.golds_for(&source.consensus_subjects(*size)?),
            Self::These(golds) => Ok(golds.clone()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GoldSelector {
    getters: Vec<Getter>,
    cache: Option<GoldMap>,
}

impl GoldSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&mut self) -> &mut Self {
        self.push(Getter::All)
    }

    pub fn random(&mut self, size: usize) -> &mut Self {
        self.push(Getter::Random(size))
    }

    pub fn subjects(&mut self, ids: Vec<SubjectId>) -> &mut Self {
        self.push(Getter::Subjects(ids))
    }

    pub fn controversial(&mut self, size: usize) -> &mut Self {
        self.push(Getter::Controversial(size))
    }

    pub fn consensus(&mut self, size: usize) -> &mut Self {
        self.push(Getter::Consensus(size))
    }

    /// Labels given directly rather than fetched.
    pub fn these(&mut self, golds: GoldMap) -> &mut Self {
        self.push(Getter::These(golds))
    }

    fn push(&mut self, getter: Getter) -> &mut Self {
        self.getters.push(getter);
        self.cache = None;
        self
    }

    pub fn len(&self) -> usize {
        self.getters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.getters.is_empty()
    }

    /// Resolve the selection against `source`. The result is cached until
    /// [`GoldSelector::reset`] or another getter is added.
    pub fn golds(&mut self, source: &dyn GoldSource) -> SwapResult<&GoldMap> {
        if self.cache.is_none() {
            let golds = if self.getters.is_empty() {
                source.all_golds()?
            } else {
                let mut golds = GoldMap::new();
                for getter in &self.getters {
                    golds.extend(getter.fetch(source)?);
                }
                golds
            };
            debug!(getters = self.getters.len(), golds = golds.len(), "gold labels selected");
            self.cache = Some(golds);
        }
        Ok(self.cache.get_or_insert_with(GoldMap::new))
    }

    /// Drop the cached selection and every getter.
    pub fn reset(&mut self) {
        self.getters.clear();
        self.cache = None;
    }
}
