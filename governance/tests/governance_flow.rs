//! End-to-end governance scenarios: purchase, proposal, weighted voting,
//! delegation, and deadline execution against a deterministic clock.

use dao_asset::{AssetToken, InMemoryToken};
use dao_governance::{GovernanceEngine, GovernanceError, VoteChoice};
use dao_nullables::{NullActionTarget, NullClock};
use dao_types::{Address, GovernanceParams, ShareAmount, TokenAmount};

fn addr(seed: u8) -> Address {
    Address::new([seed; 20])
}

struct Fixture {
    engine: GovernanceEngine,
    token: InMemoryToken,
    clock: NullClock,
    owner: Address,
    addr1: Address,
    addr2: Address,
    addr3: Address,
}

/// Mirrors the reference deployment: a 10_000-unit asset supply held by the
/// owner and an engine priced at 10 asset units per share.
fn deploy() -> Fixture {
    let owner = addr(0x0A);
    let engine = GovernanceEngine::new(
        addr(0xEE),
        GovernanceParams {
            delegator_capacity: 2,
            price_per_share: 10,
        },
    );
    Fixture {
        token: InMemoryToken::with_supply(owner, TokenAmount::new(10_000)),
        engine,
        clock: NullClock::new(1_000),
        owner,
        addr1: addr(1),
        addr2: addr(2),
        addr3: addr(3),
    }
}

impl Fixture {
    /// Fund a participant from the owner's supply, approve the engine, and
    /// buy shares.
    fn buy_shares(&mut self, who: Address, shares: u128) {
        let funds = TokenAmount::new(shares * 10);
        self.token.transfer(&self.owner, &who, funds).unwrap();
        self.token.approve(&who, self.engine.custody(), funds);
        self.engine
            .buy_shares(&mut self.token, &who, ShareAmount::new(shares))
            .unwrap();
    }

    fn propose(&mut self, proposer: Address) -> u64 {
        self.engine
            .propose_decision(
                &proposer,
                "Proposal 1",
                "Proposal test 1",
                Address::ZERO,
                TokenAmount::ZERO,
                3,
                self.clock.now(),
            )
            .unwrap()
    }
}

#[test]
fn buying_shares_creates_membership() {
    let mut f = deploy();
    f.buy_shares(f.addr1, 100);

    assert_eq!(f.engine.share_balance(&f.addr1), ShareAmount::new(100));
    assert!(f.engine.is_member(&f.addr1));
    // The purchase cost landed in engine custody.
    assert_eq!(
        f.token.balance_of(f.engine.custody()),
        TokenAmount::new(1_000)
    );
}

#[test]
fn members_can_propose_decisions() {
    let mut f = deploy();
    f.buy_shares(f.addr1, 100);

    let id = f.propose(f.addr1);

    assert_eq!(id, 0);
    let proposal = f.engine.proposal(0).unwrap();
    assert_eq!(proposal.title, "Proposal 1");
    assert_eq!(proposal.description, "Proposal test 1");
    assert!(!proposal.executed);
}

#[test]
fn votes_are_share_weighted() {
    let mut f = deploy();
    f.buy_shares(f.addr1, 100);
    f.buy_shares(f.addr2, 75);
    f.propose(f.addr1);

    f.engine
        .vote(&f.addr1, 0, VoteChoice::For, f.clock.now())
        .unwrap();
    f.engine
        .vote(&f.addr2, 0, VoteChoice::Against, f.clock.now())
        .unwrap();

    let proposal = f.engine.proposal(0).unwrap();
    assert_eq!(proposal.votes_for, ShareAmount::new(100));
    assert_eq!(proposal.votes_against, ShareAmount::new(75));
}

#[test]
fn majority_proposal_executes_after_deadline() {
    let mut f = deploy();
    f.buy_shares(f.addr1, 100);
    f.propose(f.addr1);
    f.engine
        .vote(&f.addr1, 0, VoteChoice::For, f.clock.now())
        .unwrap();

    f.clock.advance_days(3);
    let mut target = NullActionTarget::new();
    let passed = f
        .engine
        .execute_proposal(0, f.clock.now(), &mut target)
        .unwrap();

    assert!(passed);
    assert!(f.engine.proposal(0).unwrap().executed);
    // Null target: the pass is a no-op decision record.
    assert!(target.invocations().is_empty());
}

#[test]
fn non_members_cannot_vote() {
    let mut f = deploy();

    let err = f
        .engine
        .vote(&f.addr1, 0, VoteChoice::For, f.clock.now())
        .unwrap_err();

    assert_eq!(err, GovernanceError::NotMember(f.addr1));
    assert_eq!(f.engine.proposal_count(), 0);
}

#[test]
fn delegation_accumulates_captured_weight() {
    let mut f = deploy();
    f.buy_shares(f.addr1, 100);
    f.buy_shares(f.addr2, 75);

    f.engine.delegate_vote(&f.addr1, &f.addr2).unwrap();

    assert_eq!(f.engine.delegated_weight(&f.addr2), ShareAmount::new(100));
    assert_eq!(f.engine.delegate_of(&f.addr1), Some(f.addr2));
}

#[test]
fn revocation_restores_delegated_weight() {
    let mut f = deploy();
    f.buy_shares(f.addr1, 100);
    f.buy_shares(f.addr2, 75);
    f.engine.delegate_vote(&f.addr1, &f.addr2).unwrap();

    f.engine.revoke_delegation(&f.addr1).unwrap();

    assert_eq!(f.engine.delegated_weight(&f.addr2), ShareAmount::ZERO);
    assert_eq!(f.engine.delegate_of(&f.addr1), None);
}

#[test]
fn delegate_vote_marks_delegators_as_voted() {
    let mut f = deploy();
    f.buy_shares(f.addr1, 100);
    f.buy_shares(f.addr2, 75);
    f.buy_shares(f.addr3, 75);
    f.engine.delegate_vote(&f.addr1, &f.addr3).unwrap();
    f.engine.delegate_vote(&f.addr2, &f.addr3).unwrap();
    f.propose(f.addr1);

    f.engine
        .vote(&f.addr3, 0, VoteChoice::For, f.clock.now())
        .unwrap();

    assert!(f.engine.has_voted(0, &f.addr1));
    assert!(f.engine.has_voted(0, &f.addr2));
    // Weight applied exactly once: own 75 + captured 175.
    assert_eq!(
        f.engine.proposal(0).unwrap().votes_for,
        ShareAmount::new(250)
    );
}

#[test]
fn revocation_clears_delegator_slots() {
    let mut f = deploy();
    f.buy_shares(f.addr1, 100);
    f.buy_shares(f.addr2, 75);
    f.buy_shares(f.addr3, 75);
    f.engine.delegate_vote(&f.addr1, &f.addr3).unwrap();
    f.engine.delegate_vote(&f.addr2, &f.addr3).unwrap();
    f.propose(f.addr1);

    f.engine.revoke_delegation(&f.addr1).unwrap();
    f.engine.revoke_delegation(&f.addr2).unwrap();

    let slots = f.engine.delegators(&f.addr3);
    assert_eq!(slots, vec![Address::ZERO, Address::ZERO]);
}

#[test]
fn delegate_capacity_is_bounded() {
    let mut f = deploy();
    f.buy_shares(f.addr1, 100);
    f.buy_shares(f.addr2, 75);
    f.buy_shares(f.addr3, 75);
    let late = addr(4);
    f.buy_shares(late, 50);

    f.engine.delegate_vote(&f.addr1, &f.addr3).unwrap();
    f.engine.delegate_vote(&f.addr2, &f.addr3).unwrap();

    let err = f.engine.delegate_vote(&late, &f.addr3).unwrap_err();
    assert_eq!(err, GovernanceError::DelegationCapacity { capacity: 2 });
    // State unchanged for both sides.
    assert_eq!(f.engine.delegated_weight(&f.addr3), ShareAmount::new(175));
    assert_eq!(f.engine.delegate_of(&late), None);
}

#[test]
fn delegated_member_cannot_vote_directly() {
    let mut f = deploy();
    f.buy_shares(f.addr1, 100);
    f.buy_shares(f.addr2, 75);
    f.engine.delegate_vote(&f.addr1, &f.addr2).unwrap();
    f.propose(f.addr2);

    let err = f
        .engine
        .vote(&f.addr1, 0, VoteChoice::For, f.clock.now())
        .unwrap_err();

    assert_eq!(err, GovernanceError::DelegationActive);
    assert_eq!(f.engine.proposal(0).unwrap().votes_for, ShareAmount::ZERO);
}

#[test]
fn propagated_vote_mark_outlives_revocation() {
    let mut f = deploy();
    f.buy_shares(f.addr1, 100);
    f.buy_shares(f.addr2, 75);
    f.engine.delegate_vote(&f.addr1, &f.addr2).unwrap();
    f.propose(f.addr2);
    f.engine
        .vote(&f.addr2, 0, VoteChoice::For, f.clock.now())
        .unwrap();

    // Revoking afterwards does not clear the proposal-scoped mark.
    f.engine.revoke_delegation(&f.addr1).unwrap();
    let err = f
        .engine
        .vote(&f.addr1, 0, VoteChoice::Against, f.clock.now())
        .unwrap_err();

    assert_eq!(err, GovernanceError::AlreadyVoted(f.addr1));
    assert_eq!(f.engine.proposal(0).unwrap().votes_for, ShareAmount::new(175));
}

#[test]
fn double_voting_rejected() {
    let mut f = deploy();
    f.buy_shares(f.addr1, 100);
    f.propose(f.addr1);
    f.engine
        .vote(&f.addr1, 0, VoteChoice::For, f.clock.now())
        .unwrap();

    let err = f
        .engine
        .vote(&f.addr1, 0, VoteChoice::For, f.clock.now())
        .unwrap_err();

    assert_eq!(err, GovernanceError::AlreadyVoted(f.addr1));
    assert_eq!(f.engine.proposal(0).unwrap().votes_for, ShareAmount::new(100));
}

#[test]
fn voting_closes_at_deadline() {
    let mut f = deploy();
    f.buy_shares(f.addr1, 100);
    f.propose(f.addr1);

    f.clock.advance_days(3);
    let err = f
        .engine
        .vote(&f.addr1, 0, VoteChoice::For, f.clock.now())
        .unwrap_err();

    assert_eq!(err, GovernanceError::ProposalClosed(0));
}

#[test]
fn execution_before_deadline_fails() {
    let mut f = deploy();
    f.buy_shares(f.addr1, 100);
    f.propose(f.addr1);

    let mut target = NullActionTarget::new();
    let err = f
        .engine
        .execute_proposal(0, f.clock.now(), &mut target)
        .unwrap_err();

    assert_eq!(err, GovernanceError::NotYetDue(0));
    assert!(!f.engine.proposal(0).unwrap().executed);
}

#[test]
fn execution_happens_exactly_once() {
    let mut f = deploy();
    f.buy_shares(f.addr1, 100);
    f.propose(f.addr1);
    f.engine
        .vote(&f.addr1, 0, VoteChoice::For, f.clock.now())
        .unwrap();
    f.clock.advance_days(3);

    let mut target = NullActionTarget::new();
    f.engine
        .execute_proposal(0, f.clock.now(), &mut target)
        .unwrap();
    let err = f
        .engine
        .execute_proposal(0, f.clock.now(), &mut target)
        .unwrap_err();

    assert_eq!(err, GovernanceError::AlreadyExecuted(0));
    let proposal = f.engine.proposal(0).unwrap();
    assert!(proposal.executed);
    assert_eq!(proposal.votes_for, ShareAmount::new(100));
    assert_eq!(proposal.votes_against, ShareAmount::ZERO);
}

#[test]
fn tied_proposal_fails() {
    let mut f = deploy();
    f.buy_shares(f.addr1, 100);
    f.buy_shares(f.addr2, 100);
    f.propose(f.addr1);
    f.engine
        .vote(&f.addr1, 0, VoteChoice::For, f.clock.now())
        .unwrap();
    f.engine
        .vote(&f.addr2, 0, VoteChoice::Against, f.clock.now())
        .unwrap();

    f.clock.advance_days(3);
    let mut target = NullActionTarget::new();
    let passed = f
        .engine
        .execute_proposal(0, f.clock.now(), &mut target)
        .unwrap();

    assert!(!passed);
    assert!(f.engine.proposal(0).unwrap().executed);
    assert!(target.invocations().is_empty());
}

#[test]
fn passing_proposal_invokes_action_target() {
    let mut f = deploy();
    f.buy_shares(f.addr1, 100);
    let beneficiary = addr(0xB0);
    let id = f
        .engine
        .propose_decision(
            &f.addr1,
            "Fund beneficiary",
            "Forward the action value",
            beneficiary,
            TokenAmount::new(500),
            3,
            f.clock.now(),
        )
        .unwrap();
    f.engine
        .vote(&f.addr1, id, VoteChoice::For, f.clock.now())
        .unwrap();
    f.clock.advance_days(3);

    let mut target = NullActionTarget::new();
    let passed = f
        .engine
        .execute_proposal(id, f.clock.now(), &mut target)
        .unwrap();

    assert!(passed);
    assert_eq!(target.invocations(), &[(beneficiary, TokenAmount::new(500))]);
}

#[test]
fn failed_action_leaves_proposal_executed() {
    let mut f = deploy();
    f.buy_shares(f.addr1, 100);
    let id = f
        .engine
        .propose_decision(
            &f.addr1,
            "Fund beneficiary",
            "Forward the action value",
            addr(0xB0),
            TokenAmount::new(500),
            3,
            f.clock.now(),
        )
        .unwrap();
    f.engine
        .vote(&f.addr1, id, VoteChoice::For, f.clock.now())
        .unwrap();
    f.clock.advance_days(3);

    let mut target = NullActionTarget::fail_with("target reverted");
    let err = f
        .engine
        .execute_proposal(id, f.clock.now(), &mut target)
        .unwrap_err();

    assert!(matches!(err, GovernanceError::ActionInvocation(_)));
    // Executed flipped before the invocation; no retry is possible.
    assert!(f.engine.proposal(id).unwrap().executed);
    let err = f
        .engine
        .execute_proposal(id, f.clock.now(), &mut target)
        .unwrap_err();
    assert_eq!(err, GovernanceError::AlreadyExecuted(id));
}

#[test]
fn unknown_proposal_rejected_for_members() {
    let mut f = deploy();
    f.buy_shares(f.addr1, 100);

    let err = f
        .engine
        .vote(&f.addr1, 7, VoteChoice::For, f.clock.now())
        .unwrap_err();
    assert_eq!(err, GovernanceError::ProposalNotFound(7));

    let mut target = NullActionTarget::new();
    let err = f
        .engine
        .execute_proposal(7, f.clock.now(), &mut target)
        .unwrap_err();
    assert_eq!(err, GovernanceError::ProposalNotFound(7));
}
