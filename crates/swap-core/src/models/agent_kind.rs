use serde::{Deserialize, Serialize};

/// Tag distinguishing the two agent kinds a bureau can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    Subject,
    User,
}

impl AgentKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Subject => "subject",
            Self::User => "user",
        }
    }
}

impl std::fmt::Display for AgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
