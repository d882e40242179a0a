use crossbeam_channel::Sender;

use swap_core::errors::SwapResult;
use swap_core::models::{Classification, Label, SubjectId, SubjectScore, UserScoreRow};

use crate::export::ScoreExport;
use crate::swap::GoldStats;

/// The channel one answer travels on.
pub type Reply<T> = Sender<SwapResult<T>>;

/// A message to the online worker. Every variant but `Shutdown` carries the
/// channel its answer is sent on.
pub enum Request {
    Classify {
        classification: Classification,
        reply: Reply<SubjectScore>,
    },
    SetGold {
        golds: Vec<(SubjectId, Label)>,
        overwrite: bool,
        reply: Reply<GoldStats>,
    },
    Score {
        subject: SubjectId,
        reply: Reply<SubjectScore>,
    },
    Export {
        reply: Reply<ScoreExport>,
    },
    UserExport {
        reply: Reply<Vec<UserScoreRow>>,
    },
    Shutdown,
}

impl Request {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Classify { .. } => "classify",
            Self::SetGold { .. } => "set_gold",
            Self::Score { .. } => "score",
            Self::Export { .. } => "export",
            Self::UserExport { .. } => "user_export",
            Self::Shutdown => "shutdown",
        }
    }
}
