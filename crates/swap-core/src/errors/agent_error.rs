use crate::models::AgentKind;

/// Registry and ledger errors. All of them indicate a caller bug or a broken
/// agent lifecycle; none are recoverable.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AgentError {
    /// An agent of the wrong kind was offered to a bureau.
    #[error("agent kind {found} is not of kind {expected}")]
    KindMismatch { expected: AgentKind, found: AgentKind },

    /// The id is already held by the bureau.
    #[error("{kind} {id} already registered, remove first")]
    AlreadyRegistered { kind: AgentKind, id: String },

    /// A weak reference resolved to no agent.
    #[error("missing reference: {kind} {id} is not in the bureau")]
    MissingReference { kind: AgentKind, id: String },

    /// A transaction position does not exist in the agent's ledger.
    #[error("transaction {order} not found in ledger of {agent}")]
    TransactionNotFound { agent: String, order: usize },

    /// A classification was routed to the wrong subject.
    #[error("classification for subject {found} routed to subject {expected}")]
    SubjectMismatch { expected: String, found: String },

    /// A classification was routed to the wrong user.
    #[error("classification by user {found} routed to user {expected}")]
    UserMismatch { expected: String, found: String },
}
