use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PROGRESS_INTERVAL, DEFAULT_QUEUE_CAPACITY, DEFAULT_REPLY_TIMEOUT_MS};

/// Request serializer and batch runner settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OnlineConfig {
    /// Bound of the request queue; producers block when full. 0 = unbounded. Default: 1024.
    pub queue_capacity: usize,
    /// How long a caller waits for a reply. Default: 30_000 ms.
    pub reply_timeout_ms: u64,
    /// Classifications between progress log lines. Default: 10_000.
    pub progress_interval: u64,
}

impl Default for OnlineConfig {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            reply_timeout_ms: DEFAULT_REPLY_TIMEOUT_MS,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}
