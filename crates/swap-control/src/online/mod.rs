//! Online control: one worker thread applies every mutation and answers
//! every score query.
//!
//! Callers enqueue [`Request`]s on a bounded crossbeam channel and wait on a
//! per-request reply channel. The worker owns the `Swap`: it first drains the
//! historical cursor, then serves requests in FIFO order. Gold labels travel
//! the same queue, so they land between the classifications sent before and
//! after them. The `Swap` is handed back by [`OnlineControl::shutdown`].
//!
//! A failed classification, gold assignment or export is replied to its
//! caller and stops the worker; every later call fails with
//! [`OnlineError::WorkerStopped`].
//!
//! ```no_run
//! use swap_control::{OnlineControl, Swap};
//! use swap_core::config::SwapConfig;
//! use swap_core::models::{Classification, Label};
//!
//! let config = SwapConfig::default();
//! swap_control::tracing_setup::init_tracing(&config.observability);
//! let swap = Swap::new(config.clone()).unwrap();
//! let online = OnlineControl::start(swap, None, &config.online).unwrap();
//! let score = online.classify(Classification::new("u1", "s1", Label::Real)).unwrap();
//! println!("{} {:.4}", score.id, score.score);
//! let stopped = online.shutdown().unwrap();
//! assert_eq!(stopped.stats.classified, 1);
//! assert_eq!(stopped.swap.classifications(), 1);
//! ```

mod request;
mod worker;

pub use request::{Reply, Request};
pub use worker::{StoppedWorker, WorkerStats};

use std::thread::JoinHandle;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use tracing::info;

use swap_core::config::OnlineConfig;
use swap_core::errors::{OnlineError, SwapResult};
use swap_core::models::{Classification, Label, SubjectId, SubjectScore, UserScoreRow};
use swap_core::traits::ClassificationCursor;

use crate::export::ScoreExport;
use crate::swap::{GoldStats, Swap};

pub struct OnlineControl {
    sender: Sender<Request>,
    handle: Option<JoinHandle<StoppedWorker>>,
    reply_timeout: Duration,
}

impl OnlineControl {
    /// Spawn the worker. `historical` is applied before any request.
    pub fn start(
        swap: Swap,
        historical: Option<ClassificationCursor>,
        config: &OnlineConfig,
    ) -> SwapResult<Self> {
        let (sender, receiver) = match config.queue_capacity {
            0 => crossbeam_channel::unbounded(),
            capacity => crossbeam_channel::bounded(capacity),
        };

        let handle = std::thread::Builder::new()
            .name("swap-online".into())
            .spawn(move || worker::run(swap, historical, receiver))
            .map_err(|e| OnlineError::Spawn(e.to_string()))?;

        info!(queue_capacity = config.queue_capacity, "online worker started");
        Ok(Self {
            sender,
            handle: Some(handle),
            reply_timeout: Duration::from_millis(config.reply_timeout_ms),
        })
    }

    /// Apply a classification and wait for the subject's new score.
    pub fn classify(&self, classification: Classification) -> SwapResult<SubjectScore> {
        let reply = self.submit(classification)?;
        self.wait(reply)
    }

    /// Enqueue a classification without waiting for it.
    pub fn submit(&self, classification: Classification) -> SwapResult<Receiver<SwapResult<SubjectScore>>> {
        self.request(|reply| Request::Classify {
            classification,
            reply,
        })
    }

    /// Assign gold labels behind every request already queued. See
    /// [`Swap::set_gold_labels`].
    pub fn set_gold_labels(
        &self,
        golds: impl IntoIterator<Item = (SubjectId, Label)>,
        overwrite: bool,
    ) -> SwapResult<GoldStats> {
        let golds = golds.into_iter().collect();
        let reply = self.request(|reply| Request::SetGold {
            golds,
            overwrite,
            reply,
        })?;
        self.wait(reply)
    }

    pub fn score(&self, subject: SubjectId) -> SwapResult<SubjectScore> {
        let reply = self.request(|reply| Request::Score { subject, reply })?;
        self.wait(reply)
    }

    pub fn score_export(&self) -> SwapResult<ScoreExport> {
        let reply = self.request(|reply| Request::Export { reply })?;
        self.wait(reply)
    }

    pub fn export_user_scores(&self) -> SwapResult<Vec<UserScoreRow>> {
        let reply = self.request(|reply| Request::UserExport { reply })?;
        self.wait(reply)
    }

    /// Whether the worker thread is still serving requests.
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Stop the worker after the requests already queued, wait for it, and
    /// take back the `Swap`.
    pub fn shutdown(mut self) -> SwapResult<StoppedWorker> {
        // The worker may already be gone; joining still reports its stats.
        let _ = self.sender.send(Request::Shutdown);
        match self.handle.take() {
            Some(handle) => handle.join().map_err(|_| OnlineError::WorkerPanicked.into()),
            None => Err(OnlineError::WorkerStopped.into()),
        }
    }

    fn request<T>(&self, make: impl FnOnce(Reply<T>) -> Request) -> SwapResult<Receiver<SwapResult<T>>> {
        let (reply, receiver) = crossbeam_channel::bounded(1);
        self.sender
            .send(make(reply))
            .map_err(|_| OnlineError::WorkerStopped)?;
        Ok(receiver)
    }

    fn wait<T>(&self, receiver: Receiver<SwapResult<T>>) -> SwapResult<T> {
        match receiver.recv_timeout(self.reply_timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => Err(OnlineError::ReplyTimeout {
                waited_ms: self.reply_timeout.as_millis() as u64,
            }
            .into()),
            Err(RecvTimeoutError::Disconnected) => Err(OnlineError::WorkerStopped.into()),
        }
    }
}

impl Drop for OnlineControl {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = self.sender.send(Request::Shutdown);
            let _ = handle.join();
        }
    }
}
