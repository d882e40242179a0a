use super::{AgentError, ClassificationError, OnlineError};

/// Top-level error for every SWAP operation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SwapError {
    #[error("classification error: {0}")]
    Classification(#[from] ClassificationError),

    #[error("agent error: {0}")]
    Agent(#[from] AgentError),

    #[error("online control error: {0}")]
    Online(#[from] OnlineError),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("source error: {0}")]
    Source(String),
}

impl SwapError {
    /// Whether this error signals a broken lifecycle or programming bug rather
    /// than bad input.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Agent(_))
    }
}

/// Convenience alias used across the workspace.
pub type SwapResult<T> = Result<T, SwapError>;
