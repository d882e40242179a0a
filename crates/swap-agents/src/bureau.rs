//! Keyed registries of agents.
//!
//! A `Bureau<A>` owns every agent of one kind. Cross-kind references are
//! `(id, order)` pairs, so propagating a user's new skill to the subjects it
//! classified needs both bureaus: [`Bureau::notify_user`] and
//! [`Bureau::notify_changes`] take the subject bureau explicitly.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use tracing::{debug, instrument};

use swap_core::config::Priors;
use swap_core::errors::{AgentError, SwapResult};
use swap_core::models::{AgentKind, UserId};

use crate::agent::{Agent, AgentRecord};
use crate::stats::{ScoreStats, UserStats};
use crate::subject::Subject;
use crate::user::User;

#[derive(Debug, Clone)]
pub struct Bureau<A: Agent> {
    priors: Priors,
    agents: HashMap<A::Id, A>,
}

impl<A: Agent> Bureau<A> {
    pub fn new(priors: Priors) -> Self {
        Self {
            priors,
            agents: HashMap::new(),
        }
    }

    pub fn kind(&self) -> AgentKind {
        A::KIND
    }

    pub fn priors(&self) -> &Priors {
        &self.priors
    }

    pub fn get(&self, id: &A::Id) -> SwapResult<&A> {
        self.agents.get(id).ok_or_else(|| missing::<A>(id))
    }

    pub fn get_mut(&mut self, id: &A::Id) -> SwapResult<&mut A> {
        self.agents.get_mut(id).ok_or_else(|| missing::<A>(id))
    }

    /// The agent for `id`, spawning it from the bureau's priors if absent.
    pub fn get_or_create(&mut self, id: &A::Id) -> &mut A {
        let priors = self.priors;
        self.agents
            .entry(id.clone())
            .or_insert_with(|| A::spawn(id.clone(), &priors))
    }

    pub fn has(&self, id: &A::Id) -> bool {
        self.agents.contains_key(id)
    }

    pub fn add(&mut self, agent: A) -> SwapResult<()> {
        match self.agents.entry(agent.id().clone()) {
            Entry::Occupied(entry) => Err(AgentError::AlreadyRegistered {
                kind: A::KIND,
                id: entry.key().to_string(),
            }
            .into()),
            Entry::Vacant(entry) => {
                entry.insert(agent);
                Ok(())
            }
        }
    }

    /// Register an agent that arrived as a record.
    pub fn adopt(&mut self, record: AgentRecord) -> SwapResult<()> {
        let found = record.kind();
        let agent = A::from_record(record).map_err(|_| AgentError::KindMismatch {
            expected: A::KIND,
            found,
        })?;
        self.add(agent)
    }

    /// Evict an agent, handing ownership back to the caller.
    pub fn remove(&mut self, id: &A::Id) -> Option<A> {
        self.agents.remove(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &A> {
        self.agents.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut A> {
        self.agents.values_mut()
    }

    /// Every id, sorted.
    pub fn ids(&self) -> Vec<A::Id> {
        let mut ids: Vec<_> = self.agents.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Recompute every stale agent. Returns how many were recomputed.
    pub fn process_changes(&mut self) -> usize {
        let mut recomputed = 0;
        for agent in self.agents.values_mut().filter(|agent| agent.is_stale()) {
            agent.recalculate();
            recomputed += 1;
        }
        recomputed
    }
}

fn missing<A: Agent>(id: &A::Id) -> swap_core::SwapError {
    AgentError::MissingReference {
        kind: A::KIND,
        id: id.to_string(),
    }
    .into()
}

impl Bureau<User> {
    /// Recompute one user and push its skill to the subject transactions
    /// that owe an update. Returns how many subject transactions changed.
    #[instrument(skip_all, fields(user = %id))]
    pub fn notify_user(&mut self, id: &UserId, subjects: &mut Bureau<Subject>) -> SwapResult<usize> {
        let notifications = self.get_mut(id)?.ledger_mut().take_notifications();
        let mut changed = 0;
        for notification in &notifications {
            let subject = subjects.get_mut(&notification.subject)?;
            if subject
                .ledger_mut()
                .notify(notification.subject_order, notification.score)?
            {
                changed += 1;
            }
        }
        debug!(pushed = notifications.len(), changed, "user skill propagated");
        Ok(changed)
    }

    /// [`Bureau::notify_user`] for every user with outstanding notifications.
    pub fn notify_changes(&mut self, subjects: &mut Bureau<Subject>) -> SwapResult<usize> {
        let pending: Vec<UserId> = self
            .agents
            .values()
            .filter(|user| user.ledger().has_notifications())
            .map(|user| user.id().clone())
            .collect();
        let mut changed = 0;
        for id in &pending {
            changed += self.notify_user(id, subjects)?;
        }
        Ok(changed)
    }

    pub fn stats(&mut self) -> UserStats {
        self.process_changes();
        UserStats::from_users(self.agents.values())
    }
}

impl Bureau<Subject> {
    /// Summary of subject scores after recomputing pending changes.
    pub fn stats(&mut self) -> Option<ScoreStats> {
        self.process_changes();
        let scores: Vec<f64> = self
            .agents
            .values()
            .map(|subject| subject.ledger().cached_score())
            .collect();
        ScoreStats::from_scores(&scores)
    }
}
