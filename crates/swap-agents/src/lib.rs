//! # swap-agents
//!
//! Agents, their ledgers, and the bureaus that own them.
//!
//! Ownership is strictly `Bureau → Agent → Ledger → Transactions`. A subject
//! transaction names its user by `(UserId, order)` and a user transaction
//! names its subject by `(SubjectId, order)`; both are resolved through the
//! owning bureau when a change has to cross from one kind to the other.
//!
//! ## Modules
//!
//! - [`tracker`]: seen/matched counters behind a worker's skill
//! - [`formula`]: the odds update applied per subject transaction
//! - [`ledger`]: the contract shared by both ledger kinds
//! - [`subject`]: subject agent, ledger, and transactions
//! - [`user`]: user agent, ledger, and transactions
//! - [`agent`]: the `Agent` trait and the `AgentRecord` tagged sum
//! - [`bureau`]: keyed registry with cross-bureau propagation
//! - [`stats`]: score summaries for diagnostics

pub mod agent;
pub mod bureau;
pub mod formula;
pub mod ledger;
pub mod stats;
pub mod subject;
pub mod tracker;
pub mod user;

pub use agent::{Agent, AgentRecord};
pub use bureau::Bureau;
pub use ledger::{Ledger, LedgerMetrics};
pub use subject::Subject;
pub use user::User;
