//! What a bureau needs from the agents it holds.

use std::fmt::{Debug, Display};
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use swap_core::config::Priors;
use swap_core::models::AgentKind;

use crate::subject::Subject;
use crate::user::User;

pub trait Agent: Sized {
    type Id: Clone + Debug + Eq + Hash + Ord + Display;
    const KIND: AgentKind;

    /// A fresh agent holding only its priors.
    fn spawn(id: Self::Id, priors: &Priors) -> Self;

    fn id(&self) -> &Self::Id;

    fn is_stale(&self) -> bool;

    fn recalculate(&mut self);

    fn into_record(self) -> AgentRecord;

    /// Unwrap a record of this kind, handing back any other.
    fn from_record(record: AgentRecord) -> Result<Self, AgentRecord>;
}

/// An agent of either kind, for evicting, snapshotting, and restoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AgentRecord {
    Subject(Subject),
    User(User),
}

impl AgentRecord {
    pub fn kind(&self) -> AgentKind {
        match self {
            Self::Subject(_) => AgentKind::Subject,
            Self::User(_) => AgentKind::User,
        }
    }

    pub fn id(&self) -> String {
        match self {
            Self::Subject(subject) => subject.id().to_string(),
            Self::User(user) => user.id().to_string(),
        }
    }
}

impl From<Subject> for AgentRecord {
    fn from(subject: Subject) -> Self {
        Self::Subject(subject)
    }
}

impl From<User> for AgentRecord {
    fn from(user: User) -> Self {
        Self::User(user)
    }
}
