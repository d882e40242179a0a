//! Shared data model: identities, labels, classifications, and score rows.

pub mod agent_kind;
pub mod classification;
pub mod ids;
pub mod label;
pub mod score;
pub mod user_score;
pub mod vote_tally;

pub use agent_kind::AgentKind;
pub use classification::Classification;
pub use ids::{SubjectId, UserId};
pub use label::Label;
pub use score::{SubjectScore, UserScoreRow};
pub use user_score::UserScore;
pub use vote_tally::{ControversyVersion, VoteTally};
