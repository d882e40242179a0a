//! Error types for the SWAP engine.
//!
//! [`SwapError`] is the top-level error. Each concern has its own enum that
//! converts into it, so callers can match on the precise failure while most
//! code just propagates [`SwapResult`].

mod agent_error;
mod classification_error;
mod online_error;
mod swap_error;

pub use agent_error::AgentError;
pub use classification_error::ClassificationError;
pub use online_error::OnlineError;
pub use swap_error::{SwapError, SwapResult};
