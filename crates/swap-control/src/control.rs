//! Offline controller: select golds, drain a source, flush.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use swap_core::config::SwapConfig;
use swap_core::errors::SwapResult;
use swap_core::traits::{ClassificationSource, GoldSource};

use crate::cursor::DualCursor;
use crate::gold::GoldSelector;
use crate::swap::{Ingested, Swap};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub processed: u64,
    pub user_updates: u64,
    pub skipped: u64,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct Control {
    config: SwapConfig,
    golds: GoldSelector,
    swap: Option<Swap>,
}

impl Control {
    pub fn new(config: SwapConfig) -> SwapResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            golds: GoldSelector::new(),
            swap: None,
        })
    }

    pub fn config(&self) -> &SwapConfig {
        &self.config
    }

    /// Getters added here pick the gold labels assigned on the next run.
    pub fn gold_selector(&mut self) -> &mut GoldSelector {
        &mut self.golds
    }

    pub fn swap(&self) -> Option<&Swap> {
        self.swap.as_ref()
    }

    pub fn swap_mut(&mut self) -> Option<&mut Swap> {
        self.swap.as_mut()
    }

    pub fn into_swap(self) -> Option<Swap> {
        self.swap
    }

    /// Assign the selected golds, then apply every classification from
    /// `source`, historical cursor first. Reuses the controller's `Swap` if
    /// one survives from an earlier run.
    #[instrument(skip_all, fields(back_update = self.config.back_update))]
    pub fn run(&mut self, source: &dyn ClassificationSource, golds: &dyn GoldSource) -> SwapResult<RunStats> {
        let started_at = Utc::now();
        let config = &self.config;
        let swap = self
            .swap
            .get_or_insert_with(|| Swap::from_validated(config.clone()));

        let selected = self.golds.golds(golds)?.clone();
        swap.set_gold_labels(selected, false)?;

        let interval = config.online.progress_interval;
        let mut ingested = Ingested::default();
        for classification in DualCursor::from_source(source)? {
            ingested.record(swap.process_one(&classification?)?);
            if interval > 0 && ingested.processed % interval == 0 {
                info!(processed = ingested.processed, "classifications processed");
            }
        }

        // Static skills and gold deferred by `gold_updates = false` land here.
        swap.process_changes()?;

        let stats = RunStats {
            processed: ingested.processed,
            user_updates: ingested.user_updates,
            skipped: ingested.skipped,
            started_at,
            finished_at: Utc::now(),
        };
        info!(
            processed = stats.processed,
            user_updates = stats.user_updates,
            skipped = stats.skipped,
            elapsed_ms = (stats.finished_at - stats.started_at).num_milliseconds(),
            "run complete"
        );
        Ok(stats)
    }

    /// Drop the `Swap` and the gold selection.
    pub fn reset(&mut self) {
        self.swap = None;
        self.golds.reset();
    }
}
