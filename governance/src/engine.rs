//! The governance engine — a single owned state object holding the
//! membership ledger, the delegation registry, and the proposal store.
//!
//! Every public operation is atomic: all preconditions are checked against
//! the exact pre-operation state before any mutation, so a failed operation
//! leaves the engine untouched. Time is an explicit `now` argument; external
//! collaborators (the asset, action targets) are passed in per call.

use dao_asset::{ActionTarget, AssetToken};
use dao_ledger::ShareLedger;
use dao_types::{Address, GovernanceParams, ShareAmount, Timestamp, TokenAmount};
use tracing::{debug, info};

use crate::delegation::DelegationRegistry;
use crate::error::GovernanceError;
use crate::proposal::{Proposal, ProposalId, ProposalStore, VoteChoice};

#[derive(Debug)]
pub struct GovernanceEngine {
    pub(crate) params: GovernanceParams,
    /// The engine's own address — share purchases transfer the asset here.
    pub(crate) custody: Address,
    pub(crate) ledger: ShareLedger,
    pub(crate) delegation: DelegationRegistry,
    pub(crate) proposals: ProposalStore,
}

impl GovernanceEngine {
    pub fn new(custody: Address, params: GovernanceParams) -> Self {
        let delegation = DelegationRegistry::new(params.delegator_capacity);
        Self {
            params,
            custody,
            ledger: ShareLedger::new(),
            delegation,
            proposals: ProposalStore::new(),
        }
    }

    // ── Membership Ledger ────────────────────────────────────────────────

    /// Buy `amount` shares, paying `amount * price_per_share` of the
    /// external asset into engine custody.
    ///
    /// The transfer uses the buyer's previously granted allowance; its
    /// failure aborts the purchase with no engine-state change. Share
    /// balances only ever increase through this operation.
    pub fn buy_shares(
        &mut self,
        token: &mut dyn AssetToken,
        buyer: &Address,
        amount: ShareAmount,
    ) -> Result<(), GovernanceError> {
        if amount.is_zero() {
            return Err(dao_ledger::LedgerError::ZeroAmount.into());
        }
        let cost = amount
            .cost_at(self.params.price_per_share)
            .ok_or(GovernanceError::Overflow)?;
        // Pre-validate the credit so a successful transfer can never be
        // followed by a failed ledger write.
        if self.ledger.balance(buyer).checked_add(amount).is_none()
            || self.ledger.total_issued().checked_add(amount).is_none()
        {
            return Err(GovernanceError::Overflow);
        }
        token
            .transfer_from(buyer, &self.custody, cost)
            .map_err(GovernanceError::AssetTransfer)?;
        self.ledger.credit(buyer, amount)?;
        info!(buyer = %buyer, %amount, %cost, "shares purchased");
        Ok(())
    }

    // ── Delegation Registry ──────────────────────────────────────────────

    /// Delegate the caller's voting power to `delegate`.
    ///
    /// The caller's share balance at this instant is captured into the
    /// delegate's aggregate weight. Re-delegation requires an explicit
    /// revoke first.
    pub fn delegate_vote(
        &mut self,
        caller: &Address,
        delegate: &Address,
    ) -> Result<(), GovernanceError> {
        if !self.ledger.is_member(caller) {
            return Err(GovernanceError::NotMember(*caller));
        }
        let weight = self.ledger.balance(caller);
        self.delegation.delegate(caller, delegate, weight)?;
        info!(delegator = %caller, delegate = %delegate, %weight, "vote delegated");
        Ok(())
    }

    /// Revoke the caller's active delegation, restoring the delegate's
    /// aggregate weight and slot to their pre-delegation values.
    pub fn revoke_delegation(&mut self, caller: &Address) -> Result<(), GovernanceError> {
        let edge = self.delegation.revoke(caller)?;
        info!(delegator = %caller, delegate = %edge.delegate, "delegation revoked");
        Ok(())
    }

    // ── Proposal Store ───────────────────────────────────────────────────

    /// Create a proposal; returns the new sequential id.
    #[allow(clippy::too_many_arguments)]
    pub fn propose_decision(
        &mut self,
        proposer: &Address,
        title: impl Into<String>,
        description: impl Into<String>,
        target: Address,
        action_value: TokenAmount,
        duration_days: u64,
        now: Timestamp,
    ) -> Result<ProposalId, GovernanceError> {
        if !self.ledger.is_member(proposer) {
            return Err(GovernanceError::NotMember(*proposer));
        }
        let id = self
            .proposals
            .create(title, description, target, action_value, duration_days, now);
        info!(proposal = id, proposer = %proposer, duration_days, "proposal created");
        Ok(id)
    }

    // ── Voting Engine ────────────────────────────────────────────────────

    /// Cast a vote with effective weight = own shares + captured delegated
    /// weight, exactly once per effective voter.
    ///
    /// Every current delegator of the caller is marked as having voted on
    /// this proposal too; that mark is proposal-scoped and survives a later
    /// `revoke_delegation`, so the same weight can never be counted twice.
    pub fn vote(
        &mut self,
        voter: &Address,
        id: ProposalId,
        choice: VoteChoice,
        now: Timestamp,
    ) -> Result<(), GovernanceError> {
        if !self.ledger.is_member(voter) {
            return Err(GovernanceError::NotMember(*voter));
        }
        {
            let proposal = self
                .proposals
                .get(id)
                .ok_or(GovernanceError::ProposalNotFound(id))?;
            if proposal.executed {
                return Err(GovernanceError::AlreadyExecuted(id));
            }
            if proposal.deadline.has_passed(now) {
                return Err(GovernanceError::ProposalClosed(id));
            }
            if self.delegation.is_delegating(voter) {
                return Err(GovernanceError::DelegationActive);
            }
            if proposal.has_voted(voter) {
                return Err(GovernanceError::AlreadyVoted(*voter));
            }
        }

        let weight = self
            .ledger
            .balance(voter)
            .checked_add(self.delegation.delegated_weight(voter))
            .ok_or(GovernanceError::Overflow)?;
        // Snapshot the delegator list at the moment of the vote; proposals
        // are immutable once closed, so a live join would be wrong.
        let delegators = self.delegation.current_delegators(voter);

        let proposal = self
            .proposals
            .get_mut(id)
            .ok_or(GovernanceError::ProposalNotFound(id))?;
        proposal
            .apply_weight(choice, weight)
            .ok_or(GovernanceError::Overflow)?;
        proposal.mark_voted(voter);
        for delegator in &delegators {
            proposal.mark_voted(delegator);
        }
        debug!(
            proposal = id,
            voter = %voter,
            choice = ?choice,
            %weight,
            propagated = delegators.len(),
            "vote applied"
        );
        Ok(())
    }

    // ── Execution Engine ─────────────────────────────────────────────────

    /// Finalize a proposal at or after its deadline, exactly once.
    ///
    /// The proposal passes iff votes for strictly exceed votes against
    /// (ties fail). `executed` flips before the action is invoked, so a
    /// failed target call leaves the proposal executed and unretryable;
    /// the failure surfaces as [`GovernanceError::ActionInvocation`].
    ///
    /// Returns whether the proposal passed.
    pub fn execute_proposal(
        &mut self,
        id: ProposalId,
        now: Timestamp,
        target: &mut dyn ActionTarget,
    ) -> Result<bool, GovernanceError> {
        let proposal = self
            .proposals
            .get_mut(id)
            .ok_or(GovernanceError::ProposalNotFound(id))?;
        if proposal.executed {
            return Err(GovernanceError::AlreadyExecuted(id));
        }
        if !proposal.deadline.has_passed(now) {
            return Err(GovernanceError::NotYetDue(id));
        }

        let passed = proposal.passed();
        proposal.executed = true;
        info!(
            proposal = id,
            passed,
            votes_for = %proposal.votes_for,
            votes_against = %proposal.votes_against,
            "proposal executed"
        );
        if passed && !proposal.target.is_zero() {
            let action_target = proposal.target;
            let action_value = proposal.action_value;
            target
                .invoke(&action_target, action_value)
                .map_err(GovernanceError::ActionInvocation)?;
        }
        Ok(passed)
    }

    // ── Read-only queries ────────────────────────────────────────────────

    pub fn share_balance(&self, owner: &Address) -> ShareAmount {
        self.ledger.balance(owner)
    }

    pub fn is_member(&self, owner: &Address) -> bool {
        self.ledger.is_member(owner)
    }

    pub fn proposal(&self, id: ProposalId) -> Option<&Proposal> {
        self.proposals.get(id)
    }

    pub fn proposal_count(&self) -> usize {
        self.proposals.len()
    }

    /// Whether `voter` has been counted on a proposal (false for unknown
    /// proposals).
    pub fn has_voted(&self, id: ProposalId, voter: &Address) -> bool {
        self.proposals
            .get(id)
            .map(|p| p.has_voted(voter))
            .unwrap_or(false)
    }

    pub fn delegated_weight(&self, delegate: &Address) -> ShareAmount {
        self.delegation.delegated_weight(delegate)
    }

    /// The fixed-size delegator-slot view for a delegate; free slots read
    /// back as the null address.
    pub fn delegators(&self, delegate: &Address) -> Vec<Address> {
        self.delegation.delegators(delegate)
    }

    /// The caller's active delegate, if any.
    pub fn delegate_of(&self, delegator: &Address) -> Option<Address> {
        self.delegation.delegate_of(delegator).map(|e| e.delegate)
    }

    pub fn params(&self) -> &GovernanceParams {
        &self.params
    }

    pub fn custody(&self) -> &Address {
        &self.custody
    }
}
