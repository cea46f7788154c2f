//! The share ledger — per-participant governance balances.

use std::collections::HashMap;

use dao_types::{Address, ShareAmount};
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// Credit-only share balances, keyed by participant address.
///
/// A balance is created on first credit and never decreases afterwards.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ShareLedger {
    shares: HashMap<Address, ShareAmount>,
    /// Running total of all shares ever credited.
    total_issued: ShareAmount,
}

impl ShareLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit shares to a participant.
    ///
    /// Rejects zero amounts; overflow of either the participant balance or
    /// the issued total fails with no mutation.
    pub fn credit(&mut self, owner: &Address, amount: ShareAmount) -> Result<(), LedgerError> {
        if amount.is_zero() {
            return Err(LedgerError::ZeroAmount);
        }
        let balance = self.balance(owner);
        let updated = balance.checked_add(amount).ok_or(LedgerError::Overflow)?;
        let total = self
            .total_issued
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        self.shares.insert(*owner, updated);
        self.total_issued = total;
        tracing::debug!(owner = %owner, %amount, balance = %updated, "shares credited");
        Ok(())
    }

    /// Current share balance of a participant (zero if never credited).
    pub fn balance(&self, owner: &Address) -> ShareAmount {
        self.shares.get(owner).copied().unwrap_or(ShareAmount::ZERO)
    }

    /// A participant is a member iff their balance is positive.
    pub fn is_member(&self, owner: &Address) -> bool {
        !self.balance(owner).is_zero()
    }

    /// Total shares ever issued across all participants.
    pub fn total_issued(&self) -> ShareAmount {
        self.total_issued
    }

    /// Number of participants holding a positive balance.
    pub fn member_count(&self) -> usize {
        self.shares.values().filter(|b| !b.is_zero()).count()
    }
}
