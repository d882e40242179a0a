/// SWAP engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default prior probability that a subject belongs to the class of interest.
pub const DEFAULT_P0: f64 = 0.12;

/// Default prior worker skill for both true classes.
pub const DEFAULT_EPSILON: f64 = 0.5;

/// Pseudo-observations added to every skill counter (Beta prior weight).
pub const SKILL_PRIOR_WEIGHT: f64 = 2.0;

/// Default false-positive rate used to derive the "real" retirement threshold.
pub const DEFAULT_FPR: f64 = 0.01;

/// Default missed-detection rate used to derive the "bogus" retirement threshold.
pub const DEFAULT_MDR: f64 = 0.1;

/// Default capacity of the online request queue.
pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;

/// Default time a caller waits for the online worker to answer.
pub const DEFAULT_REPLY_TIMEOUT_MS: u64 = 30_000;

/// Default number of classifications between batch progress log lines.
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 10_000;
