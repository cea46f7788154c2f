use dao_asset::AssetError;
use dao_ledger::LedgerError;
use dao_types::Address;
use thiserror::Error;

use crate::proposal::ProposalId;

/// Errors raised by the governance engine.
///
/// Every variant is detected by a precondition check before any mutation,
/// except [`GovernanceError::ActionInvocation`], which is reported after the
/// proposal has been marked executed (see `execute_proposal`).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GovernanceError {
    #[error("caller {0} is not a member")]
    NotMember(Address),

    #[error("caller {0} has already voted on this proposal")]
    AlreadyVoted(Address),

    #[error("caller has an active delegation; revoke it before voting or re-delegating")]
    DelegationActive,

    #[error("delegate's delegator list is full (capacity {capacity})")]
    DelegationCapacity { capacity: usize },

    #[error("cannot delegate to self")]
    SelfDelegation,

    #[error("no active delegation to revoke")]
    NoActiveDelegation,

    #[error("proposal {0} not found")]
    ProposalNotFound(ProposalId),

    #[error("voting window has closed for proposal {0}")]
    ProposalClosed(ProposalId),

    #[error("proposal {0} has not reached its deadline yet")]
    NotYetDue(ProposalId),

    #[error("proposal {0} has already been executed")]
    AlreadyExecuted(ProposalId),

    #[error("arithmetic overflow")]
    Overflow,

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// The external asset rejected the transfer. Passed through unmodified.
    #[error("asset transfer rejected: {0}")]
    AssetTransfer(#[source] AssetError),

    /// A passing proposal's target call failed. The proposal stays executed.
    #[error("action invocation failed: {0}")]
    ActionInvocation(#[source] AssetError),

    #[error("snapshot error: {0}")]
    Snapshot(String),
}
