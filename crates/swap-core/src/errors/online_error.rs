/// Failures of the online request serializer.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OnlineError {
    /// The worker thread is gone; no further requests are served.
    #[error("online worker stopped")]
    WorkerStopped,

    /// The caller gave up waiting. The request still runs to completion.
    #[error("no reply from online worker after {waited_ms} ms")]
    ReplyTimeout { waited_ms: u64 },

    /// The worker thread panicked.
    #[error("online worker panicked")]
    WorkerPanicked,

    /// The worker thread could not be started.
    #[error("failed to spawn online worker: {0}")]
    Spawn(String),
}
