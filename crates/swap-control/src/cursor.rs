//! Historical-then-live classification stream.

use tracing::debug;

use swap_core::errors::SwapResult;
use swap_core::models::Classification;
use swap_core::traits::{ClassificationCursor, ClassificationSource};

/// Yields every historical classification, then every live one. Nothing
/// from the live cursor is read before the historical cursor is drained.
pub struct DualCursor {
    historical: Option<ClassificationCursor>,
    live: Option<ClassificationCursor>,
    historical_count: u64,
    live_count: u64,
}

impl DualCursor {
    pub fn new(historical: ClassificationCursor, live: Option<ClassificationCursor>) -> Self {
        Self {
            historical: Some(historical),
            live,
            historical_count: 0,
            live_count: 0,
        }
    }

    pub fn from_source(source: &dyn ClassificationSource) -> SwapResult<Self> {
        Ok(Self::new(source.classifications()?, source.live()?))
    }

    /// Whether the historical cursor is drained.
    pub fn is_live(&self) -> bool {
        self.historical.is_none()
    }

    pub fn historical_count(&self) -> u64 {
        self.historical_count
    }

    pub fn live_count(&self) -> u64 {
        self.live_count
    }
}

impl Iterator for DualCursor {
    type Item = SwapResult<Classification>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(historical) = self.historical.as_mut() {
            match historical.next() {
                Some(item) => {
                    self.historical_count += 1;
                    return Some(item);
                }
                None => {
                    debug!(count = self.historical_count, "historical cursor drained");
                    self.historical = None;
                }
            }
        }
        let item = self.live.as_mut()?.next();
        if item.is_some() {
            self.live_count += 1;
        }
        item
    }
}

impl std::fmt::Debug for DualCursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DualCursor")
            .field("live", &self.is_live())
            .field("historical_count", &self.historical_count)
            .field("live_count", &self.live_count)
            .finish()
    }
}
