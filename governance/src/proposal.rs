//! Proposals and their lifecycle.

use std::collections::HashSet;

use dao_types::{Address, ShareAmount, Timestamp, TokenAmount};
use serde::{Deserialize, Serialize};

/// Sequential proposal identifier, starting at 0.
pub type ProposalId = u64;

/// A binary vote on a proposal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoteChoice {
    /// In favor of the proposal.
    For,
    /// Against the proposal.
    Against,
}

impl VoteChoice {
    /// Wire encoding used by the reference deployment (For = 1, Against = 2).
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::For),
            2 => Some(Self::Against),
            _ => None,
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            Self::For => 1,
            Self::Against => 2,
        }
    }
}

/// A governance proposal.
///
/// Immutable after creation except for the vote tallies, the voter set, and
/// the executed flag. Never deleted.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Proposal {
    pub id: ProposalId,
    pub title: String,
    pub description: String,
    /// Invoked with `action_value` if the proposal passes. The null address
    /// means the pass is a no-op decision record.
    pub target: Address,
    pub action_value: TokenAmount,
    pub created_at: Timestamp,
    /// Votes are accepted strictly before this instant; execution at or
    /// after it.
    pub deadline: Timestamp,
    pub votes_for: ShareAmount,
    pub votes_against: ShareAmount,
    /// Monotonic false → true; terminal.
    pub executed: bool,
    /// Everyone counted on this proposal: direct voters plus the delegators
    /// marked when their delegate voted. Never cleared.
    voters: HashSet<Address>,
}

impl Proposal {
    /// Whether votes may still be applied at `now`.
    pub fn is_open(&self, now: Timestamp) -> bool {
        !self.executed && !self.deadline.has_passed(now)
    }

    /// Whether an address has been counted on this proposal.
    pub fn has_voted(&self, voter: &Address) -> bool {
        self.voters.contains(voter)
    }

    /// The proposal passes iff votes for strictly exceed votes against
    /// (ties fail).
    pub fn passed(&self) -> bool {
        self.votes_for > self.votes_against
    }

    /// Add `weight` to the chosen tally. Fails on overflow with no mutation.
    pub(crate) fn apply_weight(&mut self, choice: VoteChoice, weight: ShareAmount) -> Option<()> {
        match choice {
            VoteChoice::For => self.votes_for = self.votes_for.checked_add(weight)?,
            VoteChoice::Against => self.votes_against = self.votes_against.checked_add(weight)?,
        }
        Some(())
    }

    pub(crate) fn mark_voted(&mut self, voter: &Address) {
        self.voters.insert(*voter);
    }
}

/// Holds all proposals and allocates their sequential ids.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ProposalStore {
    proposals: Vec<Proposal>,
}

impl ProposalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a proposal with the next sequential id.
    ///
    /// The deadline is `created_at` plus `duration_days` whole days.
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        target: Address,
        action_value: TokenAmount,
        duration_days: u64,
        created_at: Timestamp,
    ) -> ProposalId {
        let id = self.proposals.len() as ProposalId;
        self.proposals.push(Proposal {
            id,
            title: title.into(),
            description: description.into(),
            target,
            action_value,
            created_at,
            deadline: created_at.plus_days(duration_days),
            votes_for: ShareAmount::ZERO,
            votes_against: ShareAmount::ZERO,
            executed: false,
            voters: HashSet::new(),
        });
        id
    }

    pub fn get(&self, id: ProposalId) -> Option<&Proposal> {
        self.proposals.get(id as usize)
    }

    pub(crate) fn get_mut(&mut self, id: ProposalId) -> Option<&mut Proposal> {
        self.proposals.get_mut(id as usize)
    }

    pub fn len(&self) -> usize {
        self.proposals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proposals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Proposal> {
        self.proposals.iter()
    }
}
