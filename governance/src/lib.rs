//! Share-weighted governance for the DAO engine.
//!
//! Members buy shares with an external asset, propose decisions, and vote
//! with weight equal to their share balance. Voting power can be entrusted
//! to a delegate (bounded per-delegate capacity, weight captured at
//! delegation time); a delegate votes once for itself and everyone
//! delegating to it. Proposals follow a strict Open → Executed lifecycle:
//! votes are only accepted before the deadline, execution only at or after
//! it, exactly once.

pub mod delegation;
pub mod engine;
pub mod error;
pub mod proposal;
pub mod snapshot;

pub use delegation::{DelegationEdge, DelegationRegistry};
pub use engine::GovernanceEngine;
pub use error::GovernanceError;
pub use proposal::{Proposal, ProposalId, ProposalStore, VoteChoice};
pub use snapshot::EngineSnapshot;
