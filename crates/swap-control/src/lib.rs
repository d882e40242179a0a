//! # swap-control
//!
//! The SWAP controller and the two ways of driving it.
//!
//! - [`swap::Swap`] owns both bureaus and routes one classification at a time
//! - [`control::Control`] drains a classification source offline
//! - [`online::OnlineControl`] serializes every live mutation and score
//!   query through one worker thread
//! - [`export`] turns subject scores into retirement decisions

pub mod control;
pub mod cursor;
pub mod export;
pub mod gold;
pub mod online;
pub mod swap;
pub mod tracing_setup;

pub use control::{Control, RunStats};
pub use cursor::DualCursor;
pub use export::{HistoryExport, ScoreExport};
pub use gold::GoldSelector;
pub use online::{OnlineControl, StoppedWorker, WorkerStats};
pub use swap::{ClassifyOutcome, GoldOutcome, GoldStats, Swap};
