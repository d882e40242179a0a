//! # swap-core
//!
//! Foundation crate for the SWAP aggregation engine.
//! Defines ids, labels, classifications, config, errors, and the traits
//! through which external storage feeds classifications and gold labels.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::{Priors, SkillMode, SwapConfig};
pub use errors::{SwapError, SwapResult};
pub use models::{Classification, Label, SubjectId, UserId, UserScore};
